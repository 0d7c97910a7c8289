//! Durable local cart persistence.
//!
//! The cart survives restarts as one serialized snapshot under a single
//! key, here a JSON document at a configured path. A missing or corrupt
//! snapshot is never an error: it reads back as "no saved cart".

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use benabazar::cart::CartLine;
use thiserror::Error;
use tracing::warn;

/// Errors writing or reading the cart snapshot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure other than the file being absent.
    #[error("cart storage io error")]
    Io(#[from] std::io::Error),

    /// The snapshot could not be serialized.
    #[error("cart snapshot serialization failed")]
    Serialize(#[from] serde_json::Error),
}

/// A durable mirror for the cart's line collection.
pub trait CartStorage: Send {
    /// Reads the saved snapshot. `Ok(None)` means no usable saved cart,
    /// covering both "never saved" and "saved but unparsable".
    fn load(&self) -> Result<Option<Vec<CartLine>>, StorageError>;

    /// Replaces the snapshot with the given lines.
    fn save(&self, lines: &[CartLine]) -> Result<(), StorageError>;
}

/// Snapshot storage in a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Creates storage rooted at the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<Vec<CartLine>>, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(lines) => Ok(Some(lines)),
            Err(error) => {
                warn!(path = %self.path.display(), %error, "saved cart is unreadable; starting empty");
                Ok(None)
            }
        }
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec(lines)?;
        fs::write(&self.path, json)?;

        Ok(())
    }
}

/// In-process storage, for tests and ephemeral sessions.
///
/// Clones share the same underlying snapshot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    data: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage pre-seeded with a raw snapshot, parsable or not.
    #[must_use]
    pub fn seeded(raw: impl Into<String>) -> Self {
        Self {
            data: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<CartLine>>, StorageError> {
        let guard = self.data.lock().map_err(|_| poisoned())?;

        let Some(raw) = guard.as_ref() else {
            return Ok(None);
        };

        match serde_json::from_str(raw) {
            Ok(lines) => Ok(Some(lines)),
            Err(error) => {
                warn!(%error, "saved cart is unreadable; starting empty");
                Ok(None)
            }
        }
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), StorageError> {
        let json = serde_json::to_string(lines)?;

        *self.data.lock().map_err(|_| poisoned())? = Some(json);

        Ok(())
    }
}

fn poisoned() -> StorageError {
    StorageError::Io(std::io::Error::other("cart storage mutex poisoned"))
}

#[cfg(test)]
mod tests {
    use benabazar::{
        cart::Cart,
        products::{Product, ProductId},
    };
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    fn sample_lines() -> Vec<CartLine> {
        let mut cart = Cart::new();
        cart.add(&Product {
            id: ProductId::new(1),
            name: "Soap".to_string(),
            unit_price: Decimal::new(250, 2),
            image_url: "https://img/1.jpg".to_string(),
            category: "Bath".to_string(),
        });
        cart.add(&Product {
            id: ProductId::new(2),
            name: "Lamp".to_string(),
            unit_price: Decimal::new(1_999, 2),
            image_url: "https://img/2.jpg".to_string(),
            category: "Home".to_string(),
        });

        cart.lines().to_vec()
    }

    #[test]
    fn file_snapshot_round_trips() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = JsonFileStorage::new(dir.path().join("cart.json"));
        let lines = sample_lines();

        storage.save(&lines)?;

        assert_eq!(storage.load()?, Some(lines));

        Ok(())
    }

    #[test]
    fn missing_file_reads_as_no_saved_cart() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = JsonFileStorage::new(dir.path().join("absent.json"));

        assert_eq!(storage.load()?, None);

        Ok(())
    }

    #[test]
    fn corrupt_file_reads_as_no_saved_cart() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cart.json");
        fs::write(&path, b"{not json")?;

        let storage = JsonFileStorage::new(path);

        assert_eq!(storage.load()?, None);

        Ok(())
    }

    #[test]
    fn save_creates_missing_parent_directories() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = JsonFileStorage::new(dir.path().join("nested/state/cart.json"));

        storage.save(&sample_lines())?;

        assert!(storage.load()?.is_some());

        Ok(())
    }

    #[test]
    fn memory_snapshot_round_trips() -> TestResult {
        let storage = MemoryStorage::new();
        let lines = sample_lines();

        assert_eq!(storage.load()?, None);

        storage.save(&lines)?;

        assert_eq!(storage.load()?, Some(lines));

        Ok(())
    }

    #[test]
    fn corrupt_memory_snapshot_reads_as_no_saved_cart() -> TestResult {
        let storage = MemoryStorage::seeded("][");

        assert_eq!(storage.load()?, None);

        Ok(())
    }
}
