//! Read-only decoding of a git object store into an object graph.
//!
//! Loose objects are discovered under `.git/objects`, decompressed, header-parsed and, for
//! trees and commits, decoded into their entries and links. The result is a graph with one
//! node per object and an edge for every reference between objects.

pub mod areas;
pub mod artifacts;
pub mod commands;
