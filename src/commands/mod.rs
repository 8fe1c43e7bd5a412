//! Command implementations
//!
//! - `plumbing`: Low-level commands for inspecting single objects (cat-file, verify)
//! - `porcelain`: Whole-repository reports (graph, head)

pub mod plumbing;
pub mod porcelain;
