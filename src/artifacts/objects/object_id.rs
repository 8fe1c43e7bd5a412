//! Git object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character lowercase hexadecimal strings naming every object in the store.
//!
//! ## Storage
//!
//! Loose objects live at `.git/objects/<first-2-chars>/<remaining-38-chars>`, so the identifier
//! of a stored object is recovered by joining those two path segments back together.

use crate::artifacts::objects::error::DecodeError;
use crate::artifacts::objects::{OBJECT_ID_LENGTH, RAW_OBJECT_ID_LENGTH};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Git object identifier (SHA-1 hash)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// # Returns
    ///
    /// Validated ObjectId or error if invalid length/characters
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Build an object ID from its 20-byte binary form, as embedded in tree entries.
    pub fn from_raw(raw: &[u8]) -> anyhow::Result<Self> {
        if raw.len() != RAW_OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid raw object ID length: {}", raw.len()));
        }
        Ok(Self(hex::encode(raw)))
    }

    /// Recover the object ID from a loose object path (`.../ab/cdef...`).
    ///
    /// The directory name and file name are concatenated as-is. Callers are expected to hand in
    /// paths that discovery has already filtered to hex names.
    pub fn from_storage_path(path: &Path) -> Result<Self, DecodeError> {
        let file = path.file_name().and_then(|name| name.to_str());
        let dir = path
            .parent()
            .and_then(|parent| parent.file_name())
            .and_then(|name| name.to_str());

        match (dir, file) {
            (Some(dir), Some(file)) => Ok(Self(format!("{dir}{file}"))),
            _ => Err(DecodeError::InvalidLocation(path.to_path_buf())),
        }
    }

    /// Write the object ID in binary format (20 bytes)
    pub fn to_raw(&self) -> anyhow::Result<Vec<u8>> {
        hex::decode(&self.0).map_err(|e| anyhow::anyhow!("Invalid hex in object ID {}: {e}", self.0))
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2.min(self.0.len()));
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hash (standard Git abbreviation)
    pub fn to_short_oid(&self) -> &str {
        &self.0[..7.min(self.0.len())]
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
