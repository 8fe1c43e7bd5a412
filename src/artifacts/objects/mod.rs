//! Git object types and decoding
//!
//! Git stores all content as objects identified by SHA-1 hashes. This reader understands:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (names, modes, and object IDs)
//! - **Commit**: Snapshot pointing at a tree and its parent commits
//!
//! Every loose object decompresses to `<type> <size>\0<content>`. Headers are parsed when an
//! object is loaded; tree and commit bodies are decoded when asked for.

pub mod commit;
pub mod error;
pub mod header;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in binary format
pub const RAW_OBJECT_ID_LENGTH: usize = 20;
