use crate::artifacts::database::object_store::ObjectStore;
use crate::artifacts::graph::node::{Edge, Node, NodeView, UNREADABLE_KIND};
use crate::artifacts::objects::error::DecodeError;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

/// An object that ended up as an unreadable node, or could not become a node at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub id: Option<ObjectId>,
    pub path: PathBuf,
    pub kind: &'static str,
    pub reason: String,
}

impl Failure {
    fn new(id: Option<ObjectId>, path: PathBuf, error: &DecodeError) -> Self {
        Failure {
            id,
            path,
            kind: error.kind(),
            reason: error.to_string(),
        }
    }
}

/// Object graph of one store: a node per object and an edge per reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    #[serde(skip)]
    failures: Vec<Failure>,
}

impl Graph {
    /// Decode every object of `store` and collect nodes and edges.
    ///
    /// Nodes come out in identifier order. Edges of one object keep their intra-object
    /// order: a commit's parents in declaration order followed by its tree, a tree's
    /// entries in on-disk order. A failed object becomes an unreadable node with no edges.
    pub fn build(store: &ObjectStore) -> Self {
        let mut graph = Graph::default();

        for object in store.objects() {
            match Self::decode(object) {
                Ok((view, targets)) => {
                    graph.edges.extend(targets.into_iter().map(|dest| Edge {
                        src: object.id().clone(),
                        dest,
                    }));
                    graph.nodes.push(Node {
                        id: object.id().clone(),
                        kind: object.object_type().to_string(),
                        view,
                    });
                }
                Err(error) => {
                    tracing::warn!(oid = %object.id(), %error, "unable to decode object");
                    graph.push_failure(Failure::new(
                        Some(object.id().clone()),
                        object.location().to_path_buf(),
                        &error,
                    ));
                }
            }
        }

        for failure in store.failures() {
            graph.push_failure(Failure::new(
                failure.id.clone(),
                failure.path.clone(),
                &failure.error,
            ));
        }

        graph.nodes.sort_by(|a, b| a.id.cmp(&b.id));
        tracing::debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            failures = graph.failures.len(),
            "built object graph"
        );

        graph
    }

    fn decode(object: &Object) -> Result<(NodeView, Vec<ObjectId>), DecodeError> {
        match object.object_type() {
            ObjectType::Commit => {
                let commit = object.decode_commit()?;
                let targets = commit
                    .parents()
                    .iter()
                    .chain(std::iter::once(commit.tree_oid()))
                    .cloned()
                    .collect();
                Ok((NodeView::Commit(commit), targets))
            }
            ObjectType::Tree => {
                let entries = object.decode_tree()?.into_entries();
                let targets = entries.iter().map(|entry| entry.target.clone()).collect();
                Ok((NodeView::Tree { entries }, targets))
            }
            ObjectType::Blob => Ok((
                NodeView::Blob {
                    size: object.content().len(),
                },
                Vec::new(),
            )),
            ObjectType::Unknown(kind) => Ok((NodeView::Unknown { kind: kind.clone() }, Vec::new())),
        }
    }

    fn push_failure(&mut self, failure: Failure) {
        if let Some(id) = &failure.id {
            self.nodes.push(Node {
                id: id.clone(),
                kind: UNREADABLE_KIND.to_string(),
                view: NodeView::Unreadable {
                    error: failure.kind.to_string(),
                    reason: failure.reason.clone(),
                },
            });
        }
        self.failures.push(failure);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn node(&self, id: &ObjectId) -> Option<&Node> {
        self.nodes
            .binary_search_by(|node| node.id.cmp(id))
            .ok()
            .map(|index| &self.nodes[index])
    }

    /// Edges of one source object, in emission order.
    pub fn edges_from<'g>(&'g self, src: &'g ObjectId) -> impl Iterator<Item = &'g Edge> + 'g {
        self.edges.iter().filter(move |edge| &edge.src == src)
    }

    /// Edges pointing at identifiers that have no node.
    pub fn dangling_edges(&self) -> Vec<&Edge> {
        let known = self.nodes.iter().map(|node| &node.id).collect::<HashSet<_>>();
        self.edges
            .iter()
            .filter(|edge| !known.contains(&edge.dest))
            .collect()
    }

    pub fn summary(&self) -> GraphSummary<'_> {
        let mut kinds = BTreeMap::new();
        for node in &self.nodes {
            *kinds.entry(node.kind.as_str()).or_insert(0) += 1;
        }

        GraphSummary {
            kinds,
            nodes: self.nodes.len(),
            edges: self.edges.len(),
            dangling_edges: self.dangling_edges().len(),
            failures: &self.failures,
        }
    }
}

/// Counts describing one graph-building pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSummary<'g> {
    /// Nodes per kind label, including `unreadable`.
    pub kinds: BTreeMap<&'g str, usize>,
    pub nodes: usize,
    pub edges: usize,
    pub dangling_edges: usize,
    pub failures: &'g [Failure],
}
