use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

/// An error resulting from operations on a repository.
#[derive(thiserror::Error, Debug)]
pub enum RepositoryError {
    /// An internal unspecified error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// A serialization or deserialization error.
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

/// This trait represents a generic repository interface, capable of storing and retrieving
/// items using a key-value API. Backing implementations are expected to behave like a single
/// collection of a document store, with one document per key.
#[async_trait::async_trait]
pub trait Repository<V: RepositoryItem>: Send + Sync {
    /// Retrieves an item from the repository by its key. Returns `None` if no document
    /// exists under the key.
    async fn get(&self, key: String) -> Result<Option<V>, RepositoryError>;
    /// Sets an item in the repository with the specified key, overwriting any existing
    /// document. The store assigns server timestamps on write, see
    /// [RepositoryItem::assign_server_timestamps].
    async fn set(&self, key: String, value: V) -> Result<(), RepositoryError>;
}

/// This trait is used to mark types that can be stored in a repository.
///
/// All repository items must implement `Serialize` and `DeserializeOwned` to support
/// repositories that persist items to storage.
pub trait RepositoryItem: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The name of the collection the items are stored in. Must satisfy
    /// [validate_collection_name].
    const NAME: &'static str;

    /// Called by the store when an item is written, with the store's server clock.
    /// Items with server-assigned timestamp fields fill them in here; the default
    /// implementation leaves the item untouched.
    fn assign_server_timestamps(&mut self, _now: DateTime<Utc>) {}
}

/// Validate that the provided collection name will be a valid identifier at compile time.
/// This is intentionally limited to ensure compatibility with current and future storage
/// backends. Valid characters are a-z, A-Z, and underscore (_).
pub const fn validate_collection_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        // Check if character is alphabetic (a-z, A-Z) or underscore
        if !((byte >= b'a' && byte <= b'z') || (byte >= b'A' && byte <= b'Z') || byte == b'_') {
            return false;
        }
        i += 1;
    }
    true
}
