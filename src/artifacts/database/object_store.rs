use crate::artifacts::objects::error::DecodeError;
use crate::artifacts::objects::object::{Inflate, Object};
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A loose object that could not be loaded.
#[derive(Debug)]
pub struct LoadFailure {
    /// Identifier derived from the path, when the path allowed it.
    pub id: Option<ObjectId>,
    pub path: PathBuf,
    pub error: DecodeError,
}

/// Result of loading one discovered path.
#[derive(Debug)]
pub enum LoadOutcome {
    Decoded(Object),
    Failed(LoadFailure),
}

impl LoadOutcome {
    pub fn load(path: &Path, inflater: &(impl Inflate + ?Sized)) -> Self {
        match Object::load(path, inflater) {
            Ok(object) => {
                tracing::debug!(
                    oid = %object.id(),
                    kind = %object.object_type(),
                    size = object.content().len(),
                    "loaded object"
                );
                LoadOutcome::Decoded(object)
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "skipping unreadable object");
                LoadOutcome::Failed(LoadFailure {
                    id: ObjectId::from_storage_path(path).ok(),
                    path: path.to_path_buf(),
                    error,
                })
            }
        }
    }
}

/// Every object of one pass, frozen once loading is complete.
///
/// Built in one go from [`LoadOutcome`]s, so readers never observe a partially filled store.
#[derive(Debug, Default)]
pub struct ObjectStore {
    objects: BTreeMap<ObjectId, Object>,
    failures: Vec<LoadFailure>,
}

impl ObjectStore {
    pub fn get(&self, oid: &ObjectId) -> Option<&Object> {
        self.objects.get(oid)
    }

    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.objects.contains_key(oid)
    }

    /// Loaded objects in identifier order.
    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.values()
    }

    /// Failed loads in path order.
    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.failures.is_empty()
    }
}

impl FromIterator<LoadOutcome> for ObjectStore {
    fn from_iter<T: IntoIterator<Item = LoadOutcome>>(iter: T) -> Self {
        let (objects, mut failures) = iter.into_iter().fold(
            (BTreeMap::new(), Vec::new()),
            |(mut objects, mut failures), outcome| {
                match outcome {
                    LoadOutcome::Decoded(object) => {
                        objects.insert(object.id().clone(), object);
                    }
                    LoadOutcome::Failed(failure) => failures.push(failure),
                }
                (objects, failures)
            },
        );
        failures.sort_by(|a: &LoadFailure, b: &LoadFailure| a.path.cmp(&b.path));

        ObjectStore { objects, failures }
    }
}
