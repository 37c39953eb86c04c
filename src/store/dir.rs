//! Directory-backed store

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use super::{Store, StoreError};

/// Durable store keeping one `<key>.json` file per key under a root
/// directory.
///
/// Writes are whole-file replacements, matching the whole-snapshot contract
/// of [`Store::set`]. Keys must be plain names (no path separators); the
/// managers only ever use the fixed keys in [`crate::store`].
#[derive(Debug)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();

        fs::create_dir_all(&root)?;

        Ok(Self { root })
    }

    /// Directory this store writes into.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        debug_assert!(
            !key.contains(['/', '\\', '.']),
            "store keys must be plain names, got {key:?}"
        );

        self.root.join(format!("{key}.json"))
    }
}

impl Store for DirStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.path_for(key), value)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Io(err)),
        }
    }
}
