//! Git references (HEAD and branches)
//!
//! References are plain text files naming commits. They can be:
//! - Direct: Containing a commit SHA-1
//! - Symbolic: Pointing to another reference (e.g., HEAD -> refs/heads/master)
//!
//! ## File Format
//!
//! - A 40-character SHA-1 hash (direct reference)
//! - `ref: <path>` for symbolic references
//!
//! Refs that are missing as loose files are looked up in `packed-refs`.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::path::Path;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

const BRANCH_PREFIX: &str = "refs/heads/";

/// Symbolic references may point at other symbolic references; git gives up after 5 hops.
const MAX_SYMREF_DEPTH: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, new)]
pub struct SymRefName(String);

impl SymRefName {
    pub fn as_ref_path(&self) -> &str {
        &self.0
    }

    /// Branch name without the `refs/heads/` prefix.
    pub fn short_name(&self) -> &str {
        self.0.strip_prefix(BRANCH_PREFIX).unwrap_or(&self.0)
    }
}

impl std::fmt::Display for SymRefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What HEAD currently names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// `ref: refs/heads/<branch>`
    Symbolic(SymRefName),
    /// A bare commit id
    Detached(ObjectId),
}

#[derive(Debug, Clone)]
enum SymRefOrOid {
    SymRef(SymRefName),
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn parse(content: &str) -> anyhow::Result<Option<SymRefOrOid>> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            Ok(Some(SymRefOrOid::SymRef(SymRefName::new(
                symref_match[1].trim().to_string(),
            ))))
        } else {
            Ok(Some(SymRefOrOid::Oid(ObjectId::try_parse(
                content.to_string(),
            )?)))
        }
    }

    fn read(path: &Path) -> anyhow::Result<Option<SymRefOrOid>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        Self::parse(&content).with_context(|| format!("invalid ref file at {:?}", path))
    }
}

/// Read-only access to the refs of a git directory.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the git directory (typically `.git`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn read_head(&self) -> anyhow::Result<Head> {
        match SymRefOrOid::read(&self.head_path())? {
            Some(SymRefOrOid::SymRef(name)) => Ok(Head::Symbolic(name)),
            Some(SymRefOrOid::Oid(oid)) => Ok(Head::Detached(oid)),
            None => anyhow::bail!("HEAD is missing or empty in {}", self.path.display()),
        }
    }

    /// Checked-out branch name, or `None` for a detached HEAD.
    pub fn current_branch(&self) -> anyhow::Result<Option<String>> {
        Ok(match self.read_head()? {
            Head::Symbolic(name) => Some(name.short_name().to_string()),
            Head::Detached(_) => None,
        })
    }

    /// Commit HEAD resolves to, or `None` on an unborn branch.
    pub fn resolve_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.resolve(&SymRefName::new(HEAD_REF_NAME.to_string()))
    }

    /// Follow a reference until it names an object.
    pub fn resolve(&self, name: &SymRefName) -> anyhow::Result<Option<ObjectId>> {
        let mut current = name.clone();

        for _ in 0..=MAX_SYMREF_DEPTH {
            let loose = SymRefOrOid::read(&self.path.join(current.as_ref_path()))?;
            match loose {
                Some(SymRefOrOid::SymRef(target)) => current = target,
                Some(SymRefOrOid::Oid(oid)) => return Ok(Some(oid)),
                None => return self.read_packed_ref(&current),
            }
        }

        anyhow::bail!("symbolic reference {} nests too deeply", name)
    }

    fn read_packed_ref(&self, name: &SymRefName) -> anyhow::Result<Option<ObjectId>> {
        let packed_path = self.path.join("packed-refs");
        if !packed_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&packed_path)
            .with_context(|| format!("failed to read {:?}", packed_path))?;

        // lines are `<oid> <refname>`; `#` starts a comment, `^` a peeled tag target
        content
            .lines()
            .filter(|line| !line.starts_with('#') && !line.starts_with('^'))
            .filter_map(|line| line.split_once(' '))
            .find(|(_, ref_name)| ref_name.trim() == name.as_ref_path())
            .map(|(oid, _)| ObjectId::try_parse(oid.to_string()))
            .transpose()
    }
}
