//! Plumbing commands (low-level object inspection)
//!
//! ## Commands
//!
//! - `cat-file`: Print the type or decoded contents of one object
//! - `verify`: Check stored objects against their content hashes

pub mod cat_file;
pub mod verify;
