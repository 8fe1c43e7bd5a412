use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;

impl Repository {
    /// Print one object: its type with `show_type`, otherwise its decoded contents.
    pub fn cat_file(&self, object_id: &str, show_type: bool) -> anyhow::Result<()> {
        let oid = ObjectId::try_parse(object_id.to_string())?;
        let object = self
            .database()
            .load(&oid)
            .with_context(|| format!("Unable to read object {oid}"))?;

        if show_type {
            writeln!(self.writer(), "{}", object.object_type())?;
            return Ok(());
        }

        match object.object_type() {
            ObjectType::Tree => {
                let tree = object.decode_tree()?;
                if !tree.is_empty() {
                    writeln!(self.writer(), "{}", tree.display())?;
                }
            }
            // commit bodies are already text; blobs and unknown kinds are printed as stored
            ObjectType::Commit | ObjectType::Blob | ObjectType::Unknown(_) => {
                self.writer().write_all(object.content())?;
            }
        }

        Ok(())
    }
}
