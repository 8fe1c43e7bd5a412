//! Git commit object
//!
//! Commits represent snapshots of the repository at specific points in time. Only the
//! graph-relevant header lines are decoded here: the root tree and the parent list.
//!
//! ## Format
//!
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::error::DecodeError;
use crate::artifacts::objects::object_id::ObjectId;
use serde::Serialize;

const TREE_LABEL: &[u8] = b"tree";
const PARENT_LABEL: &[u8] = b"parent";

/// Tree and parent links of a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    /// Root tree of the snapshot
    tree: ObjectId,
    /// Parents in declaration order (empty for a root commit, several for a merge)
    parents: Vec<ObjectId>,
}

impl Commit {
    pub fn new(tree: ObjectId, parents: Vec<ObjectId>) -> Self {
        Commit { tree, parents }
    }

    /// Decode a commit body (the bytes after the object header).
    pub fn decode(content: &[u8]) -> Result<Self, DecodeError> {
        let mut lines = content.split(|&b| b == b'\n');

        let tree_line = lines.next().unwrap_or_default();
        let tree = match split_label(tree_line) {
            (TREE_LABEL, value) => parse_oid(TREE_LABEL, value)?,
            _ => {
                return Err(DecodeError::MalformedCommit(
                    "first line is not a tree line".to_string(),
                ));
            }
        };

        let mut parents = Vec::new();
        for line in lines {
            match split_label(line) {
                (PARENT_LABEL, value) => parents.push(parse_oid(PARENT_LABEL, value)?),
                _ => break,
            }
        }

        Ok(Commit { tree, parents })
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// First parent, the primary line of history.
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}

/// Split a header line into its first token and the rest.
///
/// A line without a space is all label and an empty value, so short lines are never sliced
/// past their end.
fn split_label(line: &[u8]) -> (&[u8], &[u8]) {
    match line.iter().position(|&b| b == b' ') {
        Some(space) => (&line[..space], &line[space + 1..]),
        None => (line, &[]),
    }
}

fn parse_oid(label: &[u8], value: &[u8]) -> Result<ObjectId, DecodeError> {
    let label = String::from_utf8_lossy(label);
    let value = std::str::from_utf8(value).map_err(|_| {
        DecodeError::MalformedCommit(format!("{label} line is not valid text"))
    })?;

    ObjectId::try_parse(value.to_string()).map_err(|e| {
        DecodeError::MalformedCommit(format!("{label} line has no usable object id: {e}"))
    })
}
