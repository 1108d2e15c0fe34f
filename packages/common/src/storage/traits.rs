use async_trait::async_trait;
use tokio::io::AsyncRead;

use super::error::StorageError;
use super::key::ObjectKey;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Key-addressed object storage for uploaded media.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store data from an async reader under `key`. Returns the stored size.
    async fn put_stream(&self, key: &ObjectKey, reader: BoxReader) -> Result<u64, StorageError>;

    /// Retrieve an object as a streaming async reader.
    async fn get_stream(&self, key: &ObjectKey) -> Result<BoxReader, StorageError>;

    /// Check whether an object exists.
    async fn exists(&self, key: &ObjectKey) -> Result<bool, StorageError>;

    /// Remove an object.
    ///
    /// Returns `true` if the object was removed, `false` if it did not exist.
    async fn remove(&self, key: &ObjectKey) -> Result<bool, StorageError>;

    /// Get the size of an object in bytes.
    async fn size(&self, key: &ObjectKey) -> Result<u64, StorageError>;

    /// Public URL under which the object is served.
    fn public_url(&self, key: &ObjectKey) -> String;
}
