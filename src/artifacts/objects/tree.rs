//! Git tree object
//!
//! Trees represent directory snapshots in Git. They contain entries for files (blobs)
//! and subdirectories (other trees), along with their names and modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! Modes are variable width (`40000` is one character shorter than `100644`), so every field
//! is found by scanning for its delimiter rather than by stepping a fixed stride.

use crate::artifacts::objects::RAW_OBJECT_ID_LENGTH;
use crate::artifacts::objects::error::{DecodeError, TreeField};
use crate::artifacts::objects::object_id::ObjectId;
use serde::{Serialize, Serializer};
use std::borrow::Cow;

const SPACE: u8 = b' ';
const NUL: u8 = b'\0';

/// Mode used for subdirectory entries.
pub const DIRECTORY_MODE: &str = "40000";
/// Mode used for submodule (gitlink) entries.
pub const GITLINK_MODE: &str = "160000";

/// A path component exactly as stored in the tree.
///
/// Names are raw bytes on disk. They are kept that way and only rendered lossily for display,
/// so a non UTF-8 name never fails a decode and never changes on re-encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryName(Vec<u8>);

impl EntryName {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        EntryName(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl std::fmt::Display for EntryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_lossy())
    }
}

impl Serialize for EntryName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}

/// One `<mode> <name>\0<hash>` record of a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEntry {
    /// Permission/type code, not checked against a known set.
    pub mode: String,
    pub name: EntryName,
    #[serde(rename = "hash")]
    pub target: ObjectId,
}

impl TreeEntry {
    /// Object kind implied by the entry mode.
    pub fn target_kind(&self) -> &'static str {
        match self.mode.as_str() {
            DIRECTORY_MODE => "tree",
            GITLINK_MODE => "commit",
            _ => "blob",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    Mode,
    Name,
    Hash,
}

impl From<DecodeState> for TreeField {
    fn from(state: DecodeState) -> Self {
        match state {
            DecodeState::Mode => TreeField::Mode,
            DecodeState::Name => TreeField::Name,
            DecodeState::Hash => TreeField::Hash,
        }
    }
}

/// Decoded tree: entries in on-disk order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Decode a tree body (the bytes after the object header).
    ///
    /// An empty body is an empty directory. A body that stops in the middle of an entry is
    /// reported as [`DecodeError::TruncatedTree`]; no partial entry list is returned.
    pub fn decode(content: &[u8]) -> Result<Self, DecodeError> {
        let mut entries = Vec::new();
        let mut state = DecodeState::Mode;
        let mut cursor = 0;
        let mut mode = String::new();
        let mut name = EntryName::default();

        while cursor < content.len() {
            match state {
                DecodeState::Mode => {
                    let end = find_from(content, cursor, SPACE).ok_or(
                        DecodeError::TruncatedTree {
                            field: TreeField::Mode,
                            offset: cursor,
                        },
                    )?;
                    if end == cursor {
                        return Err(DecodeError::MalformedTree {
                            offset: cursor,
                            reason: "empty mode",
                        });
                    }
                    mode = String::from_utf8_lossy(&content[cursor..end]).into_owned();
                    cursor = end + 1;
                    state = DecodeState::Name;
                }
                DecodeState::Name => {
                    let end = find_from(content, cursor, NUL).ok_or(
                        DecodeError::TruncatedTree {
                            field: TreeField::Name,
                            offset: cursor,
                        },
                    )?;
                    if end == cursor {
                        return Err(DecodeError::MalformedTree {
                            offset: cursor,
                            reason: "empty name",
                        });
                    }
                    name = EntryName::new(&content[cursor..end]);
                    cursor = end + 1;
                    state = DecodeState::Hash;
                }
                DecodeState::Hash => {
                    let end = cursor + RAW_OBJECT_ID_LENGTH;
                    let raw = content.get(cursor..end).ok_or(DecodeError::TruncatedTree {
                        field: TreeField::Hash,
                        offset: cursor,
                    })?;
                    let target = ObjectId::from_raw(raw).map_err(|_| DecodeError::MalformedTree {
                        offset: cursor,
                        reason: "invalid object id",
                    })?;

                    entries.push(TreeEntry {
                        mode: std::mem::take(&mut mode),
                        name: std::mem::take(&mut name),
                        target,
                    });
                    cursor = end;
                    state = DecodeState::Mode;
                }
            }
        }

        // the body ended after a mode or a name but before the entry was complete
        if state != DecodeState::Mode {
            return Err(DecodeError::TruncatedTree {
                field: state.into(),
                offset: cursor,
            });
        }

        Ok(Tree { entries })
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<TreeEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `ls-tree` style listing, one entry per line.
    pub fn display(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "{:0>6} {} {}\t{}",
                    entry.mode,
                    entry.target_kind(),
                    entry.target,
                    entry.name
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

fn find_from(content: &[u8], start: usize, delimiter: u8) -> Option<usize> {
    content[start..]
        .iter()
        .position(|&b| b == delimiter)
        .map(|i| start + i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn encode(entries: &[(String, Vec<u8>, [u8; 20])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (mode, name, hash) in entries {
            body.extend_from_slice(mode.as_bytes());
            body.push(SPACE);
            body.extend_from_slice(name);
            body.push(NUL);
            body.extend_from_slice(hash);
        }
        body
    }

    fn encode_tree(tree: &Tree) -> Vec<u8> {
        let entries = tree
            .entries()
            .iter()
            .map(|entry| {
                let mut hash = [0u8; 20];
                hash.copy_from_slice(&entry.target.to_raw().unwrap());
                (entry.mode.clone(), entry.name.as_bytes().to_vec(), hash)
            })
            .collect::<Vec<_>>();
        encode(&entries)
    }

    fn entry_strategy() -> impl Strategy<Value = (String, Vec<u8>, [u8; 20])> {
        (
            prop_oneof![
                Just("100644".to_string()),
                Just("100755".to_string()),
                Just("40000".to_string()),
                Just("120000".to_string()),
                Just("160000".to_string()),
            ],
            proptest::collection::vec(1u8..=255, 1..24),
            proptest::array::uniform20(any::<u8>()),
        )
    }

    #[test]
    fn empty_body_is_an_empty_directory() {
        let tree = Tree::decode(b"").unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn mixed_width_modes_decode_in_order() {
        let body = encode(&[
            ("100644".to_string(), b"a.txt".to_vec(), [0x11; 20]),
            ("40000".to_string(), b"b".to_vec(), [0x22; 20]),
            ("100755".to_string(), b"run.sh".to_vec(), [0x33; 20]),
        ]);
        let tree = Tree::decode(&body).unwrap();

        let summary = tree
            .entries()
            .iter()
            .map(|e| (e.mode.as_str(), e.name.to_string(), e.target.to_string()))
            .collect::<Vec<_>>();
        assert_eq!(
            summary,
            vec![
                ("100644", "a.txt".to_string(), "11".repeat(20)),
                ("40000", "b".to_string(), "22".repeat(20)),
                ("100755", "run.sh".to_string(), "33".repeat(20)),
            ]
        );
    }

    #[test]
    fn names_may_contain_spaces_and_invalid_utf8() {
        let body = encode(&[("100644".to_string(), b"my file\xff".to_vec(), [0x01; 20])]);
        let tree = Tree::decode(&body).unwrap();
        let entry = &tree.entries()[0];

        assert_eq!(entry.name.as_bytes(), b"my file\xff");
        assert_eq!(entry.name.to_string(), "my file\u{fffd}");
    }

    #[test]
    fn hash_bytes_containing_delimiters_are_read_verbatim() {
        let mut hash = [0x20; 20];
        hash[3] = 0;
        let body = encode(&[("100644".to_string(), b"x".to_vec(), hash)]);
        let tree = Tree::decode(&body).unwrap();

        assert_eq!(tree.entries()[0].target.to_raw().unwrap(), hash.to_vec());
    }

    #[test]
    fn missing_hash_bytes_is_truncated() {
        let mut body = encode(&[("100644".to_string(), b"a.txt".to_vec(), [0x11; 20])]);
        body.truncate(body.len() - 5);

        let err = Tree::decode(&body).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TruncatedTree {
                field: TreeField::Hash,
                ..
            }
        ));
    }

    #[test]
    fn missing_name_terminator_is_truncated() {
        let err = Tree::decode(b"100644 a.txt").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TruncatedTree {
                field: TreeField::Name,
                offset: 7
            }
        ));
    }

    #[test]
    fn body_ending_after_mode_is_truncated() {
        let err = Tree::decode(b"100644 ").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TruncatedTree {
                field: TreeField::Name,
                ..
            }
        ));
    }

    #[test]
    fn empty_fields_are_malformed() {
        assert!(matches!(
            Tree::decode(b" a\0").unwrap_err(),
            DecodeError::MalformedTree { offset: 0, .. }
        ));
        assert!(matches!(
            Tree::decode(b"100644 \0").unwrap_err(),
            DecodeError::MalformedTree { offset: 7, .. }
        ));
    }

    #[test]
    fn display_lists_kind_from_mode() {
        let body = encode(&[
            ("100644".to_string(), b"a.txt".to_vec(), [0x11; 20]),
            ("40000".to_string(), b"b".to_vec(), [0x22; 20]),
        ]);
        let tree = Tree::decode(&body).unwrap();

        assert_eq!(
            tree.display(),
            format!(
                "100644 blob {}\ta.txt\n040000 tree {}\tb",
                "11".repeat(20),
                "22".repeat(20)
            )
        );
    }

    proptest! {
        #[test]
        fn decoding_then_encoding_reproduces_the_body(
            entries in proptest::collection::vec(entry_strategy(), 0..8)
        ) {
            let body = encode(&entries);
            let tree = Tree::decode(&body).unwrap();

            prop_assert_eq!(tree.len(), entries.len());
            prop_assert_eq!(encode_tree(&tree), body);
        }

        #[test]
        fn cutting_mid_entry_is_always_truncated(
            entries in proptest::collection::vec(entry_strategy(), 1..6),
            cut in any::<proptest::sample::Index>()
        ) {
            let body = encode(&entries);
            let boundaries = entries
                .iter()
                .scan(0, |end, (mode, name, _)| {
                    *end += mode.len() + 1 + name.len() + 1 + RAW_OBJECT_ID_LENGTH;
                    Some(*end)
                })
                .collect::<Vec<_>>();
            let len = cut.index(body.len());
            prop_assume!(len != 0 && !boundaries.contains(&len));

            let err = Tree::decode(&body[..len]).unwrap_err();
            let is_truncated = matches!(err, DecodeError::TruncatedTree { .. });
            prop_assert!(is_truncated);
        }
    }
}
