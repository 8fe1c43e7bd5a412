//! Loose object header
//!
//! Every decompressed object starts with `<type> <size>\0`. The header is split off here;
//! the bytes after the zero byte are the object's content.

use crate::artifacts::objects::error::DecodeError;

const SPACE: u8 = b' ';
const NUL: u8 = b'\0';

/// Parsed `<type> <size>\0` prefix of a decompressed object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Everything before the first space.
    pub kind: String,
    /// The size field, trimmed but not validated as numeric.
    pub size: String,
    /// Index of the first content byte.
    pub content_offset: usize,
}

impl Header {
    pub fn parse(data: &[u8]) -> Result<Self, DecodeError> {
        let space = data
            .iter()
            .position(|&b| b == SPACE)
            .ok_or(DecodeError::MalformedHeader("missing space after object type"))?;
        let nul = data[space + 1..]
            .iter()
            .position(|&b| b == NUL)
            .map(|i| space + 1 + i)
            .ok_or(DecodeError::MalformedHeader("missing zero byte after object size"))?;

        Ok(Header {
            kind: String::from_utf8_lossy(&data[..space]).into_owned(),
            size: String::from_utf8_lossy(&data[space + 1..nul])
                .trim()
                .to_string(),
            content_offset: nul + 1,
        })
    }

    /// The declared size, if the field is a number.
    pub fn declared_size(&self) -> Option<usize> {
        self.size.parse().ok()
    }
}
