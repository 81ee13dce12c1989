//! Object store abstraction, and the built-in store backends.

use std::{
    collections::HashMap,
    io::{Cursor, Error as IoError, ErrorKind as IoErrorKind},
    path::{Component, Path, PathBuf},
};

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::Stream;
use mime_guess::MimeGuess;
use tokio::fs::File;

use crate::range::ByteRange;
use crate::util::ReaderStream;

/// Object metadata returned by [`ObjectStore::head`].
#[derive(Clone, Debug)]
pub struct ObjectMetadata {
    /// Object size in bytes.
    pub size: u64,
    /// Content type recorded for the object, if any.
    pub content_type: Option<String>,
}

/// Trait for a simple blob store layer.
///
/// There are only the two operations the gateway needs: a metadata lookup
/// and a ranged read. An absent object is reported as `Ok(None)`, distinct
/// from an `Err`, so store failures are never silently mistaken for
/// missing objects.
///
/// In order to use an implementation with the other parts of this crate
/// (ie. resolver and gateway service), it must be marked `Send` and `Sync`,
/// and must have `'static` lifetime.
#[async_trait]
pub trait ObjectStore {
    /// Byte stream type produced by `get`.
    ///
    /// In order to use streams with the other parts of this crate, the
    /// stream must be marked `Send` and `Unpin`, and have `'static`
    /// lifetime.
    type Stream: Stream<Item = Result<Bytes, IoError>> + Send + Unpin + 'static;

    /// Look up the metadata for an object. Returns `Ok(None)` if the key
    /// does not name an object.
    async fn head(&self, key: &str) -> Result<Option<ObjectMetadata>, IoError>;

    /// Open a byte stream over an object, or over `range` within it.
    ///
    /// The range was validated against the size reported by `head`, but the
    /// object may have disappeared in between; that is again `Ok(None)`.
    async fn get(&self, key: &str, range: Option<ByteRange>)
        -> Result<Option<Self::Stream>, IoError>;
}

/// Errors that mean "no such object" rather than a real store failure.
fn map_absent<T>(err: IoError) -> Result<Option<T>, IoError> {
    match err.kind() {
        IoErrorKind::NotFound => Ok(None),
        _ => Err(err),
    }
}

/// Store implementation serving a local directory using `tokio::fs`.
///
/// Object keys map to relative paths below the root, and the content type
/// is guessed from the key extension. Keys containing parent or root
/// components are treated as absent; no other normalization is applied.
pub struct FsStore {
    /// The root directory objects are served from.
    ///
    /// The path may be absolute or relative.
    pub root: PathBuf,
}

impl FsStore {
    /// Create a new `FsStore` for the given root path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, key: &str) -> Option<PathBuf> {
        let relative = Path::new(key);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return None;
        }
        Some(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStore for FsStore {
    type Stream = ReaderStream<File>;

    async fn head(&self, key: &str) -> Result<Option<ObjectMetadata>, IoError> {
        let Some(path) = self.object_path(key) else {
            return Ok(None);
        };
        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(err) => return map_absent(err),
        };
        if metadata.is_dir() {
            return Ok(None);
        }
        let content_type = MimeGuess::from_path(&path).first().map(|m| m.to_string());
        Ok(Some(ObjectMetadata {
            size: metadata.len(),
            content_type,
        }))
    }

    async fn get(
        &self,
        key: &str,
        range: Option<ByteRange>,
    ) -> Result<Option<Self::Stream>, IoError> {
        let Some(path) = self.object_path(key) else {
            return Ok(None);
        };
        let file = match File::open(&path).await {
            Ok(file) => file,
            Err(err) => return map_absent(err),
        };
        if file.metadata().await?.is_dir() {
            return Ok(None);
        }
        Ok(Some(match range {
            Some(range) => ReaderStream::with_range(file, range),
            None => ReaderStream::new(file),
        }))
    }
}

struct StoredObject {
    data: Bytes,
    content_type: Option<String>,
}

/// An in-memory object store.
///
/// This type implements [`ObjectStore`], and can be used directly with
/// [`Gateway::new`][crate::Gateway::new], for example as a test fixture.
#[derive(Default)]
pub struct MemoryStore {
    objects: HashMap<String, StoredObject>,
}

impl MemoryStore {
    /// Create an empty `MemoryStore`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object, guessing its content type from the key extension.
    ///
    /// Any existing object under the same key is overwritten.
    pub fn insert(&mut self, key: impl Into<String>, data: impl Into<Bytes>) -> &mut Self {
        let key = key.into();
        let content_type = MimeGuess::from_path(&key).first().map(|m| m.to_string());
        self.insert_with_content_type(key, data, content_type.as_deref())
    }

    /// Add an object with an explicit content type, or none at all.
    pub fn insert_with_content_type(
        &mut self,
        key: impl Into<String>,
        data: impl Into<Bytes>,
        content_type: Option<&str>,
    ) -> &mut Self {
        self.objects.insert(
            key.into(),
            StoredObject {
                data: data.into(),
                content_type: content_type.map(str::to_owned),
            },
        );
        self
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    type Stream = ReaderStream<Cursor<Bytes>>;

    async fn head(&self, key: &str) -> Result<Option<ObjectMetadata>, IoError> {
        Ok(self.objects.get(key).map(|object| ObjectMetadata {
            size: object.data.len() as u64,
            content_type: object.content_type.clone(),
        }))
    }

    async fn get(
        &self,
        key: &str,
        range: Option<ByteRange>,
    ) -> Result<Option<Self::Stream>, IoError> {
        let Some(object) = self.objects.get(key) else {
            return Ok(None);
        };
        let cursor = Cursor::new(object.data.clone());
        Ok(Some(match range {
            Some(range) => ReaderStream::with_range(cursor, range),
            None => ReaderStream::new(cursor),
        }))
    }
}

#[cfg(test)]
mod tests {
    use futures_util::StreamExt;

    use super::*;

    async fn collect(mut stream: impl Stream<Item = Result<Bytes, IoError>> + Unpin) -> Vec<u8> {
        let mut out = Vec::new();
        while let Some(chunk) = stream.next().await {
            out.extend_from_slice(&chunk.unwrap());
        }
        out
    }

    #[tokio::test]
    async fn test_should_report_memory_object_metadata() {
        let mut store = MemoryStore::new();
        store.insert("hello.txt", &b"hello world"[..]);

        let meta = store.head("hello.txt").await.unwrap().unwrap();
        assert_eq!(meta.size, 11);
        assert_eq!(meta.content_type.as_deref(), Some("text/plain"));

        assert!(store.head("missing.txt").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_should_read_memory_object_with_range() {
        let mut store = MemoryStore::new();
        store.insert("digits.bin", &b"0123456789"[..]);

        let full = store.get("digits.bin", None).await.unwrap().unwrap();
        assert_eq!(collect(full).await, b"0123456789");

        let range = ByteRange { start: 2, end: 5 };
        let partial = store.get("digits.bin", Some(range)).await.unwrap().unwrap();
        assert_eq!(collect(partial).await, b"2345");
    }

    #[tokio::test]
    async fn test_should_read_fs_object_with_range() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data.txt"), "file contents here").unwrap();
        let store = FsStore::new(dir.path());

        let meta = store.head("data.txt").await.unwrap().unwrap();
        assert_eq!(meta.size, 18);
        assert_eq!(meta.content_type.as_deref(), Some("text/plain"));

        let range = ByteRange { start: 5, end: 12 };
        let partial = store.get("data.txt", Some(range)).await.unwrap().unwrap();
        assert_eq!(collect(partial).await, b"contents");
    }

    #[tokio::test]
    async fn test_should_treat_escaping_keys_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data.txt"), "x").unwrap();
        let store = FsStore::new(dir.path().join("sub"));

        assert!(store.head("../data.txt").await.unwrap().is_none());
        assert!(store.get("../data.txt", None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_should_treat_directories_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        let store = FsStore::new(dir.path());

        assert!(store.head("nested").await.unwrap().is_none());
    }
}
