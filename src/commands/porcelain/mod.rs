//! Porcelain commands (user-facing reports)
//!
//! ## Commands
//!
//! - `graph`: Build the object graph of the whole store and export or summarise it
//! - `head`: Show the current branch and commit

pub mod graph;
pub mod head;
