//! Durable cart storage
//!
//! Adapters stand in for the browser's local storage: one JSON array of line
//! items under [`SHOPPING_CART_KEY`]. The store treats every adapter failure
//! as recoverable (see [`crate::store`]); adapters themselves just report
//! what went wrong.

use std::{fs, io, path::PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::items::LineItem;

/// Storage key under which the serialized cart lives.
pub const SHOPPING_CART_KEY: &str = "shopping_cart";

/// Errors raised by cart storage adapters.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying store could not be read or written.
    #[error("storage unavailable: {0}")]
    Io(#[from] io::Error),

    /// The stored value was not a valid serialized cart.
    #[error("stored cart is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Durable key/value persistence for the shopping cart.
pub trait CartStorage {
    /// Reads the stored cart; `None` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the store cannot be read or the
    /// stored value does not parse as a line-item list.
    fn load(&self) -> Result<Option<Vec<LineItem>>, StorageError>;

    /// Serializes and stores the cart, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the cart cannot be serialized or the
    /// store cannot be written.
    fn save(&mut self, cart: &[LineItem]) -> Result<(), StorageError>;

    /// Removes the stored cart entirely. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the store cannot be written.
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// In-process storage backed by a string map.
///
/// The default test double; behaves like local storage without a browser.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: FxHashMap<String, String>,
}

impl MemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw stored value, bypassing serialization.
    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    /// Raw stored value for a key.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<LineItem>>, StorageError> {
        let Some(value) = self.entries.get(SHOPPING_CART_KEY) else {
            return Ok(None);
        };

        Ok(Some(serde_json::from_str(value)?))
    }

    fn save(&mut self, cart: &[LineItem]) -> Result<(), StorageError> {
        let value = serde_json::to_string(cart)?;
        self.entries.insert(SHOPPING_CART_KEY.to_string(), value);

        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.entries.remove(SHOPPING_CART_KEY);

        Ok(())
    }
}

/// File-backed storage writing one JSON document per key under a base
/// directory.
#[derive(Debug)]
pub struct JsonFileStorage {
    base_path: PathBuf,
}

impl JsonFileStorage {
    /// Creates an adapter rooted at the given directory.
    ///
    /// The directory is created on first save, not here.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn cart_path(&self) -> PathBuf {
        self.base_path.join(format!("{SHOPPING_CART_KEY}.json"))
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<Vec<LineItem>>, StorageError> {
        match fs::read_to_string(self.cart_path()) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io(err)),
        }
    }

    fn save(&mut self, cart: &[LineItem]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path)?;
        fs::write(self.cart_path(), serde_json::to_string(cart)?)?;

        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        match fs::remove_file(self.cart_path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io(err)),
        }
    }
}
