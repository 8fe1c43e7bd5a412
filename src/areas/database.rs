use crate::artifacts::database::object_store::{LoadOutcome, ObjectStore};
use crate::artifacts::objects::error::DecodeError;
use crate::artifacts::objects::object::{Inflate, Object, ZlibInflater};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use walkdir::WalkDir;

/// Fan-out directory names: two lowercase hex characters.
const OBJECT_DIR_REGEX: &str = r"^[0-9a-f]{2}$";
/// Loose object file names: the remaining 38 hex characters.
const OBJECT_FILE_REGEX: &str = r"^[0-9a-f]{38}$";

/// Read-only view of `.git/objects`.
#[derive(Debug)]
pub struct Database<I = ZlibInflater> {
    path: Box<Path>,
    inflater: Arc<I>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database::with_inflater(path, ZlibInflater)
    }
}

impl<I: Inflate> Database<I> {
    pub fn with_inflater(path: Box<Path>, inflater: I) -> Self {
        Database {
            path,
            inflater: Arc::new(inflater),
        }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Every loose object file under the objects directory, sorted.
    ///
    /// Only `<2 hex>/<38 hex>` files are returned; `pack/`, `info/` and temporary files are
    /// skipped.
    pub fn object_paths(&self) -> anyhow::Result<Vec<PathBuf>> {
        if !self.path.is_dir() {
            anyhow::bail!("Objects directory {} does not exist", self.path.display());
        }

        let dir_regex = regex::Regex::new(OBJECT_DIR_REGEX)?;
        let file_regex = regex::Regex::new(OBJECT_FILE_REGEX)?;

        let mut paths = Vec::new();
        for entry in WalkDir::new(&self.path).min_depth(2).max_depth(2) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    tracing::warn!(%error, "skipping unreadable objects entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let is_object = {
                let file_name = entry.file_name().to_string_lossy();
                let dir_name = entry
                    .path()
                    .parent()
                    .and_then(|parent| parent.file_name())
                    .map(|name| name.to_string_lossy())
                    .unwrap_or_default();

                dir_regex.is_match(&dir_name) && file_regex.is_match(&file_name)
            };
            if is_object {
                paths.push(entry.into_path());
            }
        }
        paths.sort();

        Ok(paths)
    }

    /// Load a single object by identifier.
    pub fn load(&self, object_id: &ObjectId) -> Result<Object, DecodeError> {
        Object::load(&self.path.join(object_id.to_path()), &*self.inflater)
    }

    /// Load every loose object on the current thread.
    pub fn load_all(&self) -> anyhow::Result<ObjectStore> {
        let store = self
            .object_paths()?
            .iter()
            .map(|path| LoadOutcome::load(path, &*self.inflater))
            .collect::<ObjectStore>();
        Self::log_loaded(&store);

        Ok(store)
    }

    fn log_loaded(store: &ObjectStore) {
        tracing::info!(
            objects = store.len(),
            failures = store.failures().len(),
            "loaded object database"
        );
    }
}

impl<I: Inflate + Send + Sync + 'static> Database<I> {
    /// Load every loose object using up to `jobs` blocking workers.
    ///
    /// Workers each own a slice of the path list and return their outcomes; the store is only
    /// assembled after all of them have finished, so the result matches [`Database::load_all`].
    pub async fn load_all_concurrently(&self, jobs: usize) -> anyhow::Result<ObjectStore> {
        let paths = self.object_paths()?;
        let chunk_size = paths.len().div_ceil(jobs.max(1)).max(1);

        let mut workers = JoinSet::new();
        for chunk in paths.chunks(chunk_size) {
            let chunk = chunk.to_vec();
            let inflater = Arc::clone(&self.inflater);
            workers.spawn_blocking(move || {
                chunk
                    .iter()
                    .map(|path| LoadOutcome::load(path, &*inflater))
                    .collect::<Vec<_>>()
            });
        }

        let mut outcomes = Vec::with_capacity(paths.len());
        while let Some(result) = workers.join_next().await {
            outcomes.extend(result.context("Object loading worker failed")?);
        }

        let store = outcomes.into_iter().collect::<ObjectStore>();
        Self::log_loaded(&store);

        Ok(store)
    }
}
