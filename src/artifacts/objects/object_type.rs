use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
    /// Any header type this reader does not decode (e.g. `tag`).
    Unknown(String),
}

impl ObjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
            ObjectType::Unknown(kind) => kind,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ObjectType::Unknown(_))
    }
}

impl From<&str> for ObjectType {
    fn from(value: &str) -> Self {
        match value {
            "blob" => ObjectType::Blob,
            "tree" => ObjectType::Tree,
            "commit" => ObjectType::Commit,
            other => ObjectType::Unknown(other.to_string()),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ObjectType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_kind_is_kept_verbatim() {
        let kind = ObjectType::from("tag");

        assert_eq!(kind, ObjectType::Unknown("tag".to_string()));
        assert_eq!(kind.as_str(), "tag");
        assert!(!kind.is_known());
        assert!(ObjectType::from("commit").is_known());
    }
}
