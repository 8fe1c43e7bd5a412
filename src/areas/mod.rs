//! Core repository components
//!
//! - `database`: Loose object discovery and loading
//! - `refs`: HEAD and branch resolution
//! - `repository`: Ties the git directory, database, refs and output writer together

pub mod database;
pub mod refs;
pub mod repository;
