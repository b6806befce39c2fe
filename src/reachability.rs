//! Ownership analyses used to decide what can be deleted with an object.
//!
//! All walks track visited nodes by arena handle and terminate on cycles.
//! Undefined nodes are walked through where noted but never reported as
//! store triples. Functions taking `store: Option<&dyn TripleStore>` read
//! neighbourhoods from the store when one is given and from the object graph
//! otherwise.

mod component;
mod descendants;
mod heroes;
mod legends;
mod references;

pub use component::{ComponentTriples, component};
pub use descendants::{DescendantTriples, descendants};
pub use heroes::{heroes, heroes_with_legends};
pub use legends::legends;
pub use references::references;
