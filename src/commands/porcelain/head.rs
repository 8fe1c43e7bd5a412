use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use colored::Colorize;

impl Repository {
    /// Show the checked-out branch and the commit HEAD resolves to.
    pub fn head(&self) -> anyhow::Result<()> {
        match self.refs().read_head()? {
            Head::Symbolic(name) => {
                writeln!(self.writer(), "On branch {}", name.short_name().yellow())?
            }
            Head::Detached(oid) => writeln!(
                self.writer(),
                "HEAD detached at {}",
                oid.to_short_oid().yellow()
            )?,
        }

        match self.current_commit()? {
            Some((oid, commit)) => {
                writeln!(self.writer(), "{} {}", "commit".yellow(), oid)?;
                writeln!(self.writer(), "tree {}", commit.tree_oid())?;
                for parent in commit.parents() {
                    writeln!(self.writer(), "parent {}", parent)?;
                }
            }
            None => writeln!(self.writer(), "No commits yet")?,
        }

        Ok(())
    }
}
