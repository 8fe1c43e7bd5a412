use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::artifacts::database::object_store::ObjectStore;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

const GIT_DIR: &str = ".git";
const OBJECTS_DIR: &str = "objects";

pub struct Repository {
    /// Path to the git directory (`.git`, or the repository itself when bare)
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    refs: Refs,
}

impl Repository {
    /// Open the repository at `path`, which may be a working tree or a git directory.
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let git_dir = Self::locate_git_dir(path)?;
        tracing::debug!(git_dir = %git_dir.display(), "opened repository");

        let database = Database::new(git_dir.join(OBJECTS_DIR).into_boxed_path());
        let refs = Refs::new(git_dir.clone().into_boxed_path());

        Ok(Repository {
            path: git_dir.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            refs,
        })
    }

    fn locate_git_dir(path: &Path) -> anyhow::Result<PathBuf> {
        let path = path
            .canonicalize()
            .with_context(|| format!("Unable to open repository at {}", path.display()))?;

        if path.join(GIT_DIR).join(OBJECTS_DIR).is_dir() {
            Ok(path.join(GIT_DIR))
        } else if path.join(OBJECTS_DIR).is_dir() {
            Ok(path)
        } else {
            anyhow::bail!("Not a git repository: {}", path.display())
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Load the whole object store, concurrently when `jobs` is above one.
    pub async fn load_objects(&self, jobs: usize) -> anyhow::Result<ObjectStore> {
        if jobs > 1 {
            self.database.load_all_concurrently(jobs).await
        } else {
            self.database.load_all()
        }
    }

    /// Commit HEAD points at, with its id, or `None` on an unborn branch.
    pub fn current_commit(&self) -> anyhow::Result<Option<(ObjectId, Commit)>> {
        let Some(oid) = self.refs.resolve_head()? else {
            return Ok(None);
        };

        let commit = self
            .database
            .load(&oid)
            .and_then(|object| object.decode_commit())
            .with_context(|| format!("Unable to read HEAD commit {oid}"))?;

        Ok(Some((oid, commit)))
    }
}
