// src/store/lock.rs

//! Cross-process writer lock for the recipe file
//!
//! The in-process mutex in [`RecipeStore`](super::RecipeStore) only
//! serializes writers inside one server. When several processes share a
//! recipe file, configure a lock file so every `append` also holds an
//! exclusive `flock(LOCK_EX)` for its read-modify-write cycle. Without one,
//! concurrent writers in different processes can lose updates.

use super::error::{Result, StoreError};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// Exclusive advisory lock, released on drop
pub struct WriterLock {
    /// Kept open to hold the lock
    file: File,
    path: PathBuf,
}

impl WriterLock {
    /// Acquire the lock, blocking until it is available
    ///
    /// Call from a blocking context (e.g. `spawn_blocking`).
    pub fn acquire<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = Self::open(&path)?;

        file.lock_exclusive()
            .map_err(|source| StoreError::LockFailed {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("Acquired writer lock at {:?}", path);
        Ok(Self { file, path })
    }

    /// Try to acquire the lock without blocking
    ///
    /// Returns `Ok(None)` if another process holds it.
    pub fn try_acquire<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref().to_path_buf();
        let file = Self::open(&path)?;

        match file.try_lock_exclusive() {
            Ok(()) => {
                tracing::debug!("Acquired writer lock at {:?}", path);
                Ok(Some(Self { file, path }))
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Ok(None),
            Err(source) => Err(StoreError::LockFailed { path, source }),
        }
    }

    fn open(path: &Path) -> Result<File> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| StoreError::LockFailed {
                path: path.to_path_buf(),
                source,
            })?;
        }

        // Never truncate: the file only carries the lock
        OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)
            .map_err(|source| StoreError::LockFailed {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Path of the lock file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for WriterLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
        tracing::debug!("Released writer lock at {:?}", self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_acquire_creates_lock_file() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = temp_dir.path().join("locks").join("recipes.lock");

        let lock = WriterLock::acquire(&lock_path).unwrap();
        assert!(lock_path.exists());
        assert_eq!(lock.path(), lock_path);
    }

    #[test]
    fn test_try_acquire_while_held() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = temp_dir.path().join("recipes.lock");

        let lock = WriterLock::acquire(&lock_path).unwrap();
        assert!(WriterLock::try_acquire(&lock_path).unwrap().is_none());

        drop(lock);
        assert!(WriterLock::try_acquire(&lock_path).unwrap().is_some());
    }
}
