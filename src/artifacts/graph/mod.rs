//! Object graph
//!
//! Turns a loaded object store into nodes (one per object) and directed edges:
//!
//! - commit -> parent, for every parent in declaration order
//! - commit -> tree
//! - tree -> entry target, in on-disk entry order
//!
//! Edges may point at objects that are not present in the store.

pub mod builder;
pub mod node;
