use std::path::Path;

use rusqlite::{Connection, params, params_from_iter, types::Value};

use crate::{
    errors::ObjectGraphError,
    pattern::{PatternTerm, TriplePattern},
    range::InRange,
    schema::ensure_schema,
    store::{TripleStore, finish, reject_choices},
    term::{Term, Triple},
};

const SELECT_SQL: &str = "SELECT subject, predicate, object FROM graph_triples";
const INSERT_SQL: &str = "INSERT OR IGNORE INTO graph_triples\
     (context, subject, predicate, object, object_kind, object_int, object_text) \
     VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7)";

/// Triple store persisted in a SQLite database. Range constraints on the
/// object are evaluated in SQL.
pub struct SqliteTripleStore {
    conn: Connection,
}

impl SqliteTripleStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ObjectGraphError> {
        let conn =
            Connection::open(path).map_err(|e| ObjectGraphError::connection(e.to_string()))?;
        ensure_schema(&conn)?;
        Ok(Self::from_connection(conn))
    }

    pub fn open_in_memory() -> Result<Self, ObjectGraphError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| ObjectGraphError::connection(e.to_string()))?;
        ensure_schema(&conn)?;
        Ok(Self::from_connection(conn))
    }

    pub(crate) fn from_connection(conn: Connection) -> Self {
        conn.set_prepared_statement_cache_capacity(128);
        Self { conn }
    }

    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns `false` when the triple was already present in that graph.
    pub fn add(&self, triple: &Triple, context: Option<&Term>) -> Result<bool, ObjectGraphError> {
        let affected = insert(&self.conn, triple, context)?;
        Ok(affected > 0)
    }

    /// Inserts every triple in a single transaction; returns how many were new.
    pub fn add_all<'a, I>(&self, triples: I, context: Option<&Term>) -> Result<usize, ObjectGraphError>
    where
        I: IntoIterator<Item = &'a Triple>,
    {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| ObjectGraphError::query(e.to_string()))?;
        let mut added = 0;
        for triple in triples {
            added += insert(&tx, triple, context)?;
        }
        tx.commit()
            .map_err(|e| ObjectGraphError::query(e.to_string()))?;
        Ok(added)
    }

    /// Removes from one graph, or from every graph when `context` is `None`.
    pub fn remove(&self, triple: &Triple, context: Option<&Term>) -> Result<usize, ObjectGraphError> {
        let subject = encode(&triple.subject)?;
        let predicate = encode(&triple.predicate)?;
        let object = encode(&triple.object)?;
        let affected = match context {
            Some(ctx) => self.conn.execute(
                "DELETE FROM graph_triples WHERE context=?1 AND subject=?2 AND predicate=?3 AND object=?4",
                params![encode(ctx)?, subject, predicate, object],
            ),
            None => self.conn.execute(
                "DELETE FROM graph_triples WHERE subject=?1 AND predicate=?2 AND object=?3",
                params![subject, predicate, object],
            ),
        }
        .map_err(|e| ObjectGraphError::query(e.to_string()))?;
        Ok(affected)
    }

    /// Number of distinct triples across all graphs.
    pub fn len(&self) -> Result<usize, ObjectGraphError> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM (SELECT DISTINCT subject, predicate, object FROM graph_triples)",
                [],
                |row| row.get(0),
            )
            .map_err(|e| ObjectGraphError::query(e.to_string()))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool, ObjectGraphError> {
        Ok(self.len()? == 0)
    }

    fn run(
        &self,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        if pattern.matches_nothing() {
            return Ok(Vec::new());
        }
        let mut clauses = Vec::new();
        let mut values: Vec<Value> = Vec::new();
        if let Some(ctx) = context {
            values.push(Value::Text(encode(ctx)?));
            clauses.push(format!("context = ?{}", values.len()));
        }
        push_clause("subject", &pattern.subject, &mut clauses, &mut values)?;
        push_clause("predicate", &pattern.predicate, &mut clauses, &mut values)?;
        push_clause("object", &pattern.object, &mut clauses, &mut values)?;

        let mut sql = SELECT_SQL.to_string();
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        let mut stmt = self
            .conn
            .prepare_cached(&sql)
            .map_err(|e| ObjectGraphError::query(e.to_string()))?;
        let rows = stmt
            .query_map(params_from_iter(values.iter()), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .map_err(|e| ObjectGraphError::query(e.to_string()))?;
        let mut out = Vec::new();
        for row in rows {
            let (s, p, o) = row.map_err(|e| ObjectGraphError::query(e.to_string()))?;
            out.push(Triple::new(decode(&s)?, decode(&p)?, decode(&o)?));
        }
        Ok(finish(out))
    }
}

impl TripleStore for SqliteTripleStore {
    fn triples(
        &self,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        reject_choices(pattern)?;
        self.run(pattern, context)
    }

    fn triples_choices(
        &self,
        pattern: &TriplePattern,
        context: Option<&Term>,
    ) -> Result<Vec<Triple>, ObjectGraphError> {
        self.run(pattern, context)
    }

    fn supports_range_queries(&self) -> bool {
        true
    }
}

fn insert(conn: &Connection, triple: &Triple, context: Option<&Term>) -> Result<usize, ObjectGraphError> {
    let ctx = match context {
        Some(ctx) => encode(ctx)?,
        None => String::new(),
    };
    let (object_int, object_text) = split_object(&triple.object);
    let mut stmt = conn
        .prepare_cached(INSERT_SQL)
        .map_err(|e| ObjectGraphError::query(e.to_string()))?;
    stmt.execute(params![
        ctx,
        encode(&triple.subject)?,
        encode(&triple.predicate)?,
        encode(&triple.object)?,
        triple.object.kind(),
        object_int,
        object_text,
    ])
    .map_err(|e| ObjectGraphError::query(e.to_string()))
}

fn push_clause(
    column: &str,
    term: &PatternTerm,
    clauses: &mut Vec<String>,
    values: &mut Vec<Value>,
) -> Result<(), ObjectGraphError> {
    match term {
        PatternTerm::Any => {}
        PatternTerm::Exact(term) => {
            values.push(Value::Text(encode(term)?));
            clauses.push(format!("{column} = ?{}", values.len()));
        }
        PatternTerm::Choices(list) => {
            let mut slots = Vec::with_capacity(list.len());
            for term in list {
                values.push(Value::Text(encode(term)?));
                slots.push(format!("?{}", values.len()));
            }
            clauses.push(format!("{column} IN ({})", slots.join(", ")));
        }
        PatternTerm::Range(range) => {
            if column != "object" {
                return Err(ObjectGraphError::invalid_input(format!(
                    "ranges are only supported in the object position, not {column}"
                )));
            }
            push_range(range, clauses, values);
        }
    }
    Ok(())
}

fn push_range(range: &InRange, clauses: &mut Vec<String>, values: &mut Vec<Value>) {
    let Some(kind_source) = range.min().or(range.max()) else {
        return;
    };
    values.push(Value::Text(kind_source.kind().to_string()));
    clauses.push(format!("object_kind = ?{}", values.len()));
    for (bound, op) in [(range.min(), ">"), (range.max(), "<")] {
        let Some(bound) = bound else { continue };
        let (int, text) = split_object(bound);
        let column = if int.is_some() { "object_int" } else { "object_text" };
        values.push(match (int, text) {
            (Some(int), _) => Value::Integer(int),
            (None, Some(text)) => Value::Text(text),
            (None, None) => Value::Null,
        });
        clauses.push(format!("{column} {op} ?{}", values.len()));
    }
}

fn split_object(term: &Term) -> (Option<i64>, Option<String>) {
    match term {
        Term::Integer(value) => (Some(*value), None),
        Term::Boolean(value) => (Some(i64::from(*value)), None),
        Term::Iri(text) | Term::Blank(text) | Term::Text(text) => (None, Some(text.clone())),
    }
}

fn encode(term: &Term) -> Result<String, ObjectGraphError> {
    serde_json::to_string(term).map_err(|e| ObjectGraphError::invalid_input(e.to_string()))
}

fn decode(raw: &str) -> Result<Term, ObjectGraphError> {
    serde_json::from_str(raw).map_err(|e| ObjectGraphError::query(e.to_string()))
}
