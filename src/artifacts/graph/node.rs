use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::TreeEntry;
use serde::Serialize;

/// Kind label carried by nodes whose object could not be loaded or decoded.
pub const UNREADABLE_KIND: &str = "unreadable";

/// Kind-specific contents of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NodeView {
    Blob { size: usize },
    Tree { entries: Vec<TreeEntry> },
    Commit(Commit),
    Unknown { kind: String },
    Unreadable { error: String, reason: String },
}

/// One object of the store as it appears in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    #[serde(rename = "name")]
    pub id: ObjectId,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "object")]
    pub view: NodeView,
}

impl Node {
    pub fn is_unreadable(&self) -> bool {
        matches!(self.view, NodeView::Unreadable { .. })
    }
}

/// Directed link from one object to an object it references.
///
/// `dest` may name an object that is not in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Edge {
    pub src: ObjectId,
    pub dest: ObjectId,
}
