//! Loaded object collections
//!
//! This module contains the in-memory result of reading the object database: decoded
//! objects keyed by identifier plus the per-path load failures.

pub mod object_store;
