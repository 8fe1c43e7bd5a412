use std::path::PathBuf;

/// Position inside a tree entry where decoding stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeField {
    Mode,
    Name,
    Hash,
}

impl std::fmt::Display for TreeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeField::Mode => write!(f, "mode"),
            TreeField::Name => write!(f, "name"),
            TreeField::Hash => write!(f, "hash"),
        }
    }
}

/// Errors raised while turning one loose object file into decoded data.
///
/// Every variant describes a single object; none of them should abort a whole pass.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The object file could not be read.
    #[error("unable to read object file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The compressed stream is not valid zlib.
    #[error("corrupt object: {0}")]
    CorruptObject(#[source] std::io::Error),

    /// No space, or no zero byte after the space, in the object header.
    #[error("malformed header: {0}")]
    MalformedHeader(&'static str),

    /// A tree body ended in the middle of an entry.
    #[error("truncated tree: entry {field} cut short at offset {offset}")]
    TruncatedTree { field: TreeField, offset: usize },

    /// A tree entry violates the `<mode> <name>\0<hash>` grammar.
    #[error("malformed tree at offset {offset}: {reason}")]
    MalformedTree { offset: usize, reason: &'static str },

    /// A commit body is missing its tree line or has an unusable parent line.
    #[error("malformed commit: {0}")]
    MalformedCommit(String),

    /// The storage path has no parent directory or file name to derive an identifier from.
    #[error("cannot derive an object id from {0}")]
    InvalidLocation(PathBuf),
}

impl DecodeError {
    /// Stable label used when grouping failures in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::Io { .. } => "Io",
            DecodeError::CorruptObject(_) => "CorruptObject",
            DecodeError::MalformedHeader(_) => "MalformedHeader",
            DecodeError::TruncatedTree { .. } => "TruncatedTree",
            DecodeError::MalformedTree { .. } => "MalformedTree",
            DecodeError::MalformedCommit(_) => "MalformedCommit",
            DecodeError::InvalidLocation(_) => "InvalidLocation",
        }
    }
}
