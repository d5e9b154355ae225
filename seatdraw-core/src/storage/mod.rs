pub mod file;
pub mod memory;
pub mod participant_store;
pub mod sqlite;

pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use participant_store::ParticipantStore;
pub use sqlite::SqliteBackend;

use crate::error::Result;

/// Flat string key-value storage, shaped like a browser's local storage.
///
/// Methods take `&self`; implementations keep their own interior mutability.
pub trait KeyValueBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueBackend + ?Sized> KeyValueBackend for Box<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}
