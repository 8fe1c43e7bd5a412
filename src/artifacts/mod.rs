//! Git data structures and algorithms
//!
//! - `database`: The frozen in-memory object store built by a loading pass
//! - `graph`: Node/edge construction over a loaded store
//! - `objects`: Object identifiers, headers, and the tree/commit decoders

pub mod database;
pub mod graph;
pub mod objects;
