//! One text file per record.

use super::{Serializer, Storage, StorageError};
use std::fs;
use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

/// Stores each record as `<dir>/<key>.txt`, encoded by `S`. Writes go
/// through a temporary file and a rename, so every read sees a whole record.
///
/// Keys must be safe file stems; [`Name`](crate::Name) guarantees that.
#[derive(Debug)]
pub struct FileStorage<T, S> {
    dir: PathBuf,
    serializer: S,
    _record: PhantomData<fn() -> T>,
}

impl<T, S: Serializer<T>> FileStorage<T, S> {
    /// Creates a store rooted at `dir`. The directory is created lazily.
    #[instrument(skip(dir, serializer), fields(dir = %dir.as_ref().display()))]
    pub fn new(dir: impl AsRef<Path>, serializer: S) -> Self {
        info!("Creating FileStorage");
        Self {
            dir: dir.as_ref().to_path_buf(),
            serializer,
            _record: PhantomData,
        }
    }

    /// Directory holding the record files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &impl std::fmt::Display) -> PathBuf {
        self.dir.join(format!("{}.txt", key))
    }

    /// Writes the encoded record to a temporary file in the store directory.
    /// Renaming it into place keeps readers from seeing a partial record.
    fn stage(&self, value: &T) -> Result<NamedTempFile, StorageError> {
        let text = self.serializer.serialize(value)?;
        fs::create_dir_all(&self.dir)?;
        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(text.as_bytes())?;
        staged.as_file().sync_all()?;
        Ok(staged)
    }
}

impl<K, T, S> Storage<K, T> for FileStorage<T, S>
where
    K: std::fmt::Display + std::fmt::Debug,
    T: std::fmt::Debug,
    S: Serializer<T>,
{
    #[instrument(skip(self, value))]
    fn create(&self, key: &K, value: &T) -> Result<(), StorageError> {
        let staged = self.stage(value)?;
        match staged.persist_noclobber(self.path(key)) {
            Ok(_) => {
                debug!(%key, "Record file created");
                Ok(())
            }
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                Err(StorageError::already_exists(key))
            }
            Err(e) => Err(e.error.into()),
        }
    }

    #[instrument(skip(self))]
    fn read(&self, key: &K) -> Result<Option<T>, StorageError> {
        match fs::read_to_string(self.path(key)) {
            Ok(text) => self.serializer.deserialize(&text).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, value))]
    fn update(&self, key: &K, value: &T) -> Result<(), StorageError> {
        let path = self.path(key);
        if !path.is_file() {
            return Err(StorageError::not_found(key));
        }
        self.stage(value)?.persist(path).map_err(|e| e.error)?;
        debug!(%key, "Record file updated");
        Ok(())
    }

    #[instrument(skip(self))]
    fn delete(&self, key: &K) -> Result<(), StorageError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => {
                debug!(%key, "Record file deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::not_found(key)),
            Err(e) => Err(e.into()),
        }
    }
}
