use std::fmt;

use crate::query::preparer::{Hop, QueryPath};

/// Query paths folded on shared prefixes.
///
/// Children keep first-seen order so that equal scores resolve in discovery
/// order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathTrie {
    children: Vec<(Hop, PathTrie)>,
}

impl PathTrie {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hops: &[Hop]) {
        let Some((first, rest)) = hops.split_first() else {
            return;
        };
        let idx = match self.children.iter().position(|(hop, _)| hop == first) {
            Some(idx) => idx,
            None => {
                self.children.push((first.clone(), PathTrie::new()));
                self.children.len() - 1
            }
        };
        self.children[idx].1.insert(rest);
    }

    pub fn children(&self) -> &[(Hop, PathTrie)] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of root-to-leaf paths.
    pub fn leaf_count(&self) -> usize {
        if self.children.is_empty() {
            return 0;
        }
        self.children
            .iter()
            .map(|(_, sub)| sub.leaf_count().max(1))
            .sum()
    }

    /// The paths spelled out again, in trie order.
    pub fn paths(&self) -> Vec<QueryPath> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        self.collect(&mut prefix, &mut out);
        out
    }

    fn collect(&self, prefix: &mut Vec<Hop>, out: &mut Vec<QueryPath>) {
        for (hop, sub) in &self.children {
            prefix.push(hop.clone());
            if sub.is_leaf() {
                out.push(QueryPath(prefix.clone()));
            } else {
                sub.collect(prefix, out);
            }
            prefix.pop();
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for (hop, sub) in &self.children {
            writeln!(f, "{:width$}{hop}", "", width = depth * 4)?;
            sub.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for PathTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

/// Folds `paths` into a trie keyed by hop.
pub fn merge_paths(paths: &[QueryPath]) -> PathTrie {
    let mut trie = PathTrie::new();
    for path in paths {
        trie.insert(path.hops());
    }
    trie
}
