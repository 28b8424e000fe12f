//! Disk-backed prompt cache.
//!
//! Model responses are memoised across process runs in a single JSON object
//! file keyed by the exact prompt string. The cache is injected as a
//! dependency via [`PromptCache`] rather than read from an implicit global
//! file, and writes are atomic: the updated map is written to a temp file in
//! the same directory and renamed over the old one.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::llm::{LlmError, TextModel};

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to write cache file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize cache")]
    Serialize(#[from] serde_json::Error),
}

/// Key/value store for model responses keyed by exact prompt text.
pub trait PromptCache: Send + Sync {
    /// Look up a previously stored response. A missing, unreadable or
    /// corrupt store reads as empty; lookups never fail.
    fn get(&self, prompt: &str) -> Option<String>;

    /// Store a response. The updated store must be visible to subsequent
    /// `get` calls and to future process runs.
    fn put(&self, prompt: &str, response: &str) -> Result<(), CacheError>;
}

/// [`PromptCache`] backed by one JSON file on disk.
pub struct JsonFileCache {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileCache {
    pub fn new(path: PathBuf) -> Self {
        JsonFileCache {
            path,
            write_lock: Mutex::new(()),
        }
    }

    fn load(&self) -> HashMap<String, String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return HashMap::new(),
        };
        match serde_json::from_str(&content) {
            Ok(map) => map,
            Err(e) => {
                warn!(
                    error = ?e,
                    path = %self.path.display(),
                    "Failed to parse cache file, starting with empty cache"
                );
                HashMap::new()
            }
        }
    }
}

impl PromptCache for JsonFileCache {
    fn get(&self, prompt: &str) -> Option<String> {
        self.load().remove(prompt)
    }

    fn put(&self, prompt: &str, response: &str) -> Result<(), CacheError> {
        // Serialise writers within the process; reload before writing so a
        // put does not clobber entries added since our last read.
        let _guard = match self.write_lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let mut cache = self.load();
        cache.insert(prompt.to_string(), response.to_string());

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let tmp = NamedTempFile::new_in(dir).map_err(|e| CacheError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        serde_json::to_writer(tmp.as_file(), &cache)?;
        tmp.persist(&self.path).map_err(|e| CacheError::Write {
            path: self.path.clone(),
            source: e.error,
        })?;

        debug!(path = %self.path.display(), entries = cache.len(), "Cache file updated");
        Ok(())
    }
}

/// Decorates any [`TextModel`] with a [`PromptCache`]: hits skip the network
/// entirely, misses are stored after the call. A failed cache write is logged
/// and does not fail the generation.
pub struct CachedModel<M, C> {
    model: M,
    cache: C,
}

impl<M, C> CachedModel<M, C> {
    pub fn new(model: M, cache: C) -> Self {
        CachedModel { model, cache }
    }
}

#[async_trait]
impl<M: TextModel, C: PromptCache> TextModel for CachedModel<M, C> {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        if let Some(hit) = self.cache.get(prompt) {
            debug!(prompt_chars = prompt.len(), "Serving response from cache");
            return Ok(hit);
        }

        let response = self.model.generate(prompt).await?;
        if let Err(e) = self.cache.put(prompt, &response) {
            error!(error = ?e, "Failed to save response to cache");
        }
        Ok(response)
    }
}
