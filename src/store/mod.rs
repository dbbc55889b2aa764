// src/store/mod.rs

//! Recipe Store - flat-file persistence for recipes
//!
//! The whole recipe collection lives in one JSON file holding an array of
//! flat string-to-string objects. Every operation reads the file fresh;
//! nothing is cached between calls.
//!
//! # Write path
//!
//! `append` is a read-modify-write cycle:
//!
//! 1. Take the in-process writer mutex (and the cross-process lock file,
//!    if configured)
//! 2. Load the current collection
//! 3. Push the new record with a freshly generated id
//! 4. Write the pretty-printed collection to a temp file in the same
//!    directory, `fsync` it and rename it over the storage file
//!
//! The cycle runs on a spawned task: once started it completes or fails
//! even if the caller stops waiting for it.
//!
//! The rename means readers see either the previous or the new file, never
//! a truncated one. Writers in separate processes are only serialized when
//! a lock file is configured.
//!
//! # Empty storage
//!
//! A missing file is `StorageUnavailable` and an empty file is
//! `CorruptData`. Only `[]` is an empty collection. Use
//! [`RecipeStore::init`] to create one.

mod error;
mod id;
mod lock;
mod recipe;

pub use error::{Result, StoreError};
pub use id::{IdGenerator, UuidGenerator};
pub use lock::WriterLock;
pub use recipe::{ID_FIELD, Recipe, RecipeCollection};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Attempts at generating an id not already present in the collection
const MAX_ID_ATTEMPTS: usize = 8;

/// Construction options for [`RecipeStore`]
#[derive(Clone)]
pub struct StoreOptions {
    /// Lock file held exclusively during `append` (cross-process safety)
    pub lock_file: Option<PathBuf>,
    /// Identifier source for new recipes
    pub id_generator: Arc<dyn IdGenerator>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            lock_file: None,
            id_generator: Arc::new(UuidGenerator),
        }
    }
}

impl std::fmt::Debug for StoreOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreOptions")
            .field("lock_file", &self.lock_file)
            .finish_non_exhaustive()
    }
}

/// Recipe store bound to a single JSON file
///
/// Cheap to clone; clones share the writer mutex.
#[derive(Clone)]
pub struct RecipeStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    path: PathBuf,
    options: StoreOptions,
    /// Serializes read-modify-write cycles within this process
    write_guard: Mutex<()>,
}

impl RecipeStore {
    /// Open a store at `path` with default options
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, StoreOptions::default())
    }

    /// Open a store at `path` with explicit options
    pub fn with_options(path: impl Into<PathBuf>, options: StoreOptions) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                path: path.into(),
                options,
                write_guard: Mutex::new(()),
            }),
        }
    }

    /// Path of the storage file
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Create the storage file with an empty collection if it is missing
    ///
    /// Returns `true` if a file was created. An existing file is left alone.
    pub async fn init(&self) -> Result<bool> {
        let path = self.path();
        if tokio::fs::try_exists(path)
            .await
            .map_err(|e| StoreError::unavailable(path, e))?
        {
            return Ok(false);
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::unavailable(parent, e))?;
        }

        self.inner.persist(&RecipeCollection::new()).await?;
        tracing::info!("Initialized empty recipe collection at {:?}", path);
        Ok(true)
    }

    /// Load the full recipe collection in stored order
    pub async fn load_all(&self) -> Result<RecipeCollection> {
        self.inner.load_all().await
    }

    /// Append a new recipe built from `fields`
    ///
    /// The store assigns the id; any `id` in `fields` is ignored. Returns
    /// the stored recipe.
    pub async fn append(&self, fields: BTreeMap<String, String>) -> Result<Recipe> {
        let (recipe, _) = self.append_with_snapshot(fields).await?;
        Ok(recipe)
    }

    /// Append a new recipe and also return the collection as written
    ///
    /// The cycle runs on its own task, so dropping this future (client
    /// disconnect, timeout) does not stop it between write and rename.
    pub async fn append_with_snapshot(
        &self,
        fields: BTreeMap<String, String>,
    ) -> Result<(Recipe, RecipeCollection)> {
        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move { inner.append(fields).await });

        match handle.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => Err(StoreError::unavailable(self.path(), std::io::Error::other(e))),
        }
    }

    /// Find the first recipe whose id matches
    ///
    /// A missing recipe is `Ok(None)`, not an error.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Recipe>> {
        let recipes = self.inner.load_all().await?;
        let found = recipes.into_iter().find(|r| r.id == id);

        if found.is_none() {
            tracing::debug!("Recipe {} not found", id);
        }
        Ok(found)
    }
}

impl StoreInner {
    async fn load_all(&self) -> Result<RecipeCollection> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| StoreError::unavailable(&self.path, e))?;

        let recipes: RecipeCollection =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::corrupt(&self.path, e))?;

        tracing::debug!("Loaded {} recipes from {:?}", recipes.len(), self.path);
        Ok(recipes)
    }

    async fn append(
        &self,
        fields: BTreeMap<String, String>,
    ) -> Result<(Recipe, RecipeCollection)> {
        let _guard = self.write_guard.lock().await;
        let _lock = self.acquire_writer_lock().await?;

        let current = self.load_all().await?;
        let id = self.fresh_id(&current)?;
        let recipe = Recipe::new(id, fields);

        // Mutate a private copy; `current` is what a failed write leaves behind
        let mut updated = current.clone();
        updated.push(recipe.clone());
        self.persist(&updated).await?;

        tracing::info!(
            "Appended recipe {} ({} recipes total)",
            recipe.id,
            updated.len()
        );
        Ok((recipe, updated))
    }

    /// Generate an id not already used in `recipes`
    fn fresh_id(&self, recipes: &[Recipe]) -> Result<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = self.options.id_generator.next_id();
            if recipes.iter().all(|r| r.id != candidate) {
                return Ok(candidate);
            }
            tracing::warn!("Generated recipe id {} collides, retrying", candidate);
        }
        Err(StoreError::IdExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    async fn acquire_writer_lock(&self) -> Result<Option<WriterLock>> {
        let Some(lock_path) = self.options.lock_file.clone() else {
            return Ok(None);
        };

        // flock blocks the thread, keep it off the runtime workers
        let blocking_path = lock_path.clone();
        let lock = tokio::task::spawn_blocking(move || WriterLock::acquire(blocking_path))
            .await
            .map_err(|e| StoreError::LockFailed {
                path: lock_path,
                source: std::io::Error::other(e),
            })??;
        Ok(Some(lock))
    }

    /// Write the collection atomically (synced temp file + rename)
    async fn persist(&self, recipes: &[Recipe]) -> Result<()> {
        let contents = serde_json::to_vec_pretty(recipes)
            .map_err(|e| StoreError::corrupt(&self.path, e))?;

        let temp = TempFile::new(self.temp_path());
        write_synced(temp.path(), &contents)
            .await
            .map_err(|e| StoreError::unavailable(temp.path(), e))?;

        tokio::fs::rename(temp.path(), &self.path)
            .await
            .map_err(|e| StoreError::unavailable(&self.path, e))?;
        temp.keep();

        Ok(())
    }

    /// Unique sibling path so concurrent writers never share a temp file
    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "recipes.json".to_string());
        self.path
            .with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()))
    }
}

/// Write `contents` and flush them to disk before returning
async fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(contents).await?;
    file.sync_all().await?;
    Ok(())
}

/// Temp file removed on drop unless it was renamed into place
struct TempFile {
    path: PathBuf,
    renamed: bool,
}

impl TempFile {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            renamed: false,
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn keep(mut self) {
        self.renamed = true;
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if !self.renamed {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}
