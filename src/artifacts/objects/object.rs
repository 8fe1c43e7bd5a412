use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::error::DecodeError;
use crate::artifacts::objects::header::Header;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Decompression step applied to a loose object file before its header is parsed.
pub trait Inflate {
    fn inflate(&self, data: &[u8]) -> std::io::Result<Vec<u8>>;
}

impl<F> Inflate for F
where
    F: Fn(&[u8]) -> std::io::Result<Vec<u8>>,
{
    fn inflate(&self, data: &[u8]) -> std::io::Result<Vec<u8>> {
        self(data)
    }
}

/// zlib decompression, the encoding git uses for loose objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZlibInflater;

impl Inflate for ZlibInflater {
    fn inflate(&self, data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut decoder = flate2::read::ZlibDecoder::new(data);
        let mut decompressed_content = Vec::new();
        decoder.read_to_end(&mut decompressed_content)?;

        Ok(decompressed_content)
    }
}

/// One loose object with its header parsed and its body kept raw.
///
/// Tree and commit bodies are decoded on demand through [`Object::decode_tree`] and
/// [`Object::decode_commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    id: ObjectId,
    object_type: ObjectType,
    /// Size field from the header; may disagree with `content.len()` for damaged objects.
    size: String,
    location: PathBuf,
    content: Bytes,
}

impl Object {
    /// Read, decompress and header-parse the loose object stored at `path`.
    pub fn load(path: &Path, inflater: &(impl Inflate + ?Sized)) -> Result<Self, DecodeError> {
        let id = ObjectId::from_storage_path(path)?;
        let compressed = std::fs::read(path).map_err(|source| DecodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_compressed(id, path.to_path_buf(), &compressed, inflater)
    }

    /// Build an object from an already read loose object file.
    pub fn from_compressed(
        id: ObjectId,
        location: PathBuf,
        compressed: &[u8],
        inflater: &(impl Inflate + ?Sized),
    ) -> Result<Self, DecodeError> {
        let data = inflater
            .inflate(compressed)
            .map_err(DecodeError::CorruptObject)?;
        let header = Header::parse(&data)?;
        let content = Bytes::from(data).slice(header.content_offset..);

        Ok(Object {
            id,
            object_type: ObjectType::from(header.kind.as_str()),
            size: header.size,
            location,
            content,
        })
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn object_type(&self) -> &ObjectType {
        &self.object_type
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Raw size field from the header.
    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn declared_size(&self) -> Option<usize> {
        self.size.parse().ok()
    }

    pub fn decode_tree(&self) -> Result<Tree, DecodeError> {
        Tree::decode(&self.content)
    }

    pub fn decode_commit(&self) -> Result<Commit, DecodeError> {
        Commit::decode(&self.content)
    }

    /// SHA-1 of the object as git would hash it, rebuilt from kind and content.
    pub fn computed_id(&self) -> anyhow::Result<ObjectId> {
        let mut hasher = Sha1::new();
        hasher.update(format!("{} {}\0", self.object_type, self.content.len()).as_bytes());
        hasher.update(&self.content);

        let oid = hasher.finalize();
        ObjectId::try_parse(format!("{oid:x}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::ZlibEncoder;
    use std::io::Write;

    fn compress(data: &[u8]) -> Vec<u8> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn location() -> PathBuf {
        PathBuf::from("objects/ce/013625030ba8dba906f756967f9e9ca394464a")
    }

    fn oid() -> ObjectId {
        ObjectId::try_parse("ce013625030ba8dba906f756967f9e9ca394464a".to_string()).unwrap()
    }

    #[test]
    fn blob_content_follows_the_header() {
        let object =
            Object::from_compressed(oid(), location(), &compress(b"blob 6\0hello\n"), &ZlibInflater)
                .unwrap();

        assert_eq!(object.object_type(), &ObjectType::Blob);
        assert_eq!(object.declared_size(), Some(6));
        assert_eq!(object.content().as_ref(), b"hello\n");
        assert_eq!(object.computed_id().unwrap(), oid());
    }

    #[test]
    fn declared_size_may_disagree_with_content() {
        let object =
            Object::from_compressed(oid(), location(), &compress(b"blob 99\0hi"), &ZlibInflater)
                .unwrap();

        assert_eq!(object.declared_size(), Some(99));
        assert_eq!(object.content().len(), 2);
    }

    #[test]
    fn invalid_zlib_stream_is_corrupt() {
        let err = Object::from_compressed(oid(), location(), b"not zlib", &ZlibInflater)
            .unwrap_err();
        assert!(matches!(err, DecodeError::CorruptObject(_)));
    }

    #[test]
    fn collaborator_failure_is_corrupt() {
        let failing = |_: &[u8]| -> std::io::Result<Vec<u8>> {
            Err(std::io::Error::other("inflate failed"))
        };
        let err = Object::from_compressed(oid(), location(), b"", &failing).unwrap_err();
        assert!(matches!(err, DecodeError::CorruptObject(_)));
    }

    #[test]
    fn headerless_data_is_not_sliced() {
        let err = Object::from_compressed(oid(), location(), &compress(b"blob"), &ZlibInflater)
            .unwrap_err();
        assert!(matches!(err, DecodeError::MalformedHeader(_)));
    }

    #[test]
    fn unknown_kind_loads_without_decoding() {
        let object = Object::from_compressed(
            oid(),
            location(),
            &compress(b"tag 3\0abc"),
            &ZlibInflater,
        )
        .unwrap();

        assert_eq!(object.object_type(), &ObjectType::Unknown("tag".to_string()));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Object::load(Path::new("/nonexistent/ce/0136"), &ZlibInflater).unwrap_err();
        assert!(matches!(err, DecodeError::Io { .. }));
    }
}
