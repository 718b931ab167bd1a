//! Artifact loading from the HuggingFace Hub.
//!
//! [`HfLoader`] resolves a single file of a Hub repository remote-first: it
//! tries to fetch the file into the on-disk cache, and if that fails for any
//! reason (no network, remote unavailable, auth failure) it falls back to a
//! local-only lookup of a previously cached copy. Only when both paths fail
//! does loading error out, with [`SentixError::ModelUnavailable`].

use std::path::PathBuf;

use hf_hub::api::sync::ApiBuilder;
use hf_hub::{Cache, Repo, RepoType};
use tokenizers::Tokenizer;

use crate::error::{Result, SentixError};

/// Generic HuggingFace Hub file loader with an offline fallback path.
#[derive(Debug, Clone)]
pub struct HfLoader {
    /// Hub repository id, e.g. `cardiffnlp/twitter-roberta-base-sentiment`.
    pub repo: String,
    /// File within the repository, e.g. `model.safetensors`.
    pub filename: String,
    /// Cache directory override. Defaults to the hf-hub standard location.
    pub cache_dir: Option<PathBuf>,
}

impl HfLoader {
    pub fn new(repo: &str, filename: &str) -> Self {
        Self {
            repo: repo.into(),
            filename: filename.into(),
            cache_dir: None,
        }
    }

    pub fn with_cache_dir(mut self, dir: PathBuf) -> Self {
        self.cache_dir = Some(dir);
        self
    }

    /// Resolves the file to a local path, remote-first.
    pub fn load(&self) -> Result<PathBuf> {
        let artifact = format!("{}/{}", self.repo, self.filename);
        resolve(&artifact, || self.fetch_remote(), || self.lookup_local())
    }

    /// Primary path: fetch from the Hub into the cache directory.
    fn fetch_remote(&self) -> Result<PathBuf> {
        let mut builder = ApiBuilder::new();
        if let Some(dir) = &self.cache_dir {
            std::fs::create_dir_all(dir)?;
            builder = builder.with_cache_dir(dir.clone());
        }
        let api = builder.build()?;
        let repo = api.repo(Repo::new(self.repo.clone(), RepoType::Model));
        Ok(repo.get(&self.filename)?)
    }

    /// Fallback path: local cache lookup only, never touches the network.
    fn lookup_local(&self) -> Option<PathBuf> {
        let cache = match &self.cache_dir {
            Some(dir) => Cache::new(dir.clone()),
            None => Cache::default(),
        };
        cache
            .repo(Repo::new(self.repo.clone(), RepoType::Model))
            .get(&self.filename)
    }
}

/// Remote-first resolution policy.
///
/// The fallback must not reattempt network access; `local` is a pure cache
/// lookup. A `ModelUnavailable` error carries the original remote failure, as
/// that is the actionable one ("check connectivity").
fn resolve(
    artifact: &str,
    remote: impl FnOnce() -> Result<PathBuf>,
    local: impl FnOnce() -> Option<PathBuf>,
) -> Result<PathBuf> {
    match remote() {
        Ok(path) => {
            tracing::info!(artifact, path = %path.display(), "fetched from hub");
            Ok(path)
        }
        Err(err) => {
            tracing::warn!(artifact, error = %err, "hub fetch failed, trying local cache");
            match local() {
                Some(path) => {
                    tracing::info!(artifact, path = %path.display(), "loaded from local cache");
                    Ok(path)
                }
                None => {
                    tracing::error!(artifact, error = %err, "not in local cache either");
                    Err(SentixError::ModelUnavailable(err.to_string()))
                }
            }
        }
    }
}

/// Loads a `tokenizer.json` from a Hub repository.
#[derive(Debug, Clone)]
pub struct TokenizerLoader {
    pub tokenizer_file_loader: HfLoader,
}

impl TokenizerLoader {
    pub fn new(repo: &str, filename: &str) -> Self {
        Self {
            tokenizer_file_loader: HfLoader::new(repo, filename),
        }
    }

    pub fn load(&self) -> Result<Tokenizer> {
        let tokenizer_file_path = self.tokenizer_file_loader.load()?;

        let tokenizer = Tokenizer::from_file(tokenizer_file_path)
            .map_err(|e| SentixError::Tokenization(format!("Failed to load tokenizer: {e}")))?;

        Ok(tokenizer)
    }
}
