use crate::areas::repository::Repository;
use colored::Colorize;

impl Repository {
    /// Recompute every object's hash and report the ones that disagree with their storage name.
    pub async fn verify(&self, jobs: usize) -> anyhow::Result<()> {
        let store = self.load_objects(jobs).await?;
        let mut mismatches = 0;

        for object in store.objects() {
            let computed = object.computed_id()?;
            if &computed != object.id() {
                mismatches += 1;
                writeln!(
                    self.writer(),
                    "{} {} (content hashes to {})",
                    "mismatch".red(),
                    object.id(),
                    computed
                )?;
            }
        }
        for failure in store.failures() {
            writeln!(
                self.writer(),
                "{} {}: {}",
                "unreadable".red(),
                failure.path.display(),
                failure.error
            )?;
        }

        let problems = mismatches + store.failures().len();
        if problems > 0 {
            anyhow::bail!(
                "{problems} of {} objects failed verification",
                store.len() + store.failures().len()
            );
        }

        writeln!(self.writer(), "{} {} objects verified", "ok".green(), store.len())?;
        Ok(())
    }
}
