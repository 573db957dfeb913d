//! Runtime configuration.
//!
//! Built once at startup and passed explicitly to everything that needs it.

use std::path::{Path, PathBuf};

use crate::crypto::{Algorithm, KdfParams, SALT_LEN};
use crate::error::DrillError;
use crate::storage::Storage;

/// Default record file, relative to the working directory.
pub const DEFAULT_HASH_FILE: &str = "passdrill.hash";
/// Overrides the record file path.
pub const HASH_FILE_ENV: &str = "PASSDRILL_HASH_FILE";
/// Forces the algorithm used for new records (`pbkdf2` or `scrypt`). Read in save mode only.
pub const ALGORITHM_ENV: &str = "PASSDRILL_ALGORITHM";

#[derive(Debug, Clone)]
pub struct Config {
    hash_path: PathBuf,
    delimiter: u8,
    salt_len: usize,
    kdf: KdfParams,
    preferred: Option<Algorithm>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hash_path: PathBuf::from(DEFAULT_HASH_FILE),
            delimiter: b':',
            salt_len: SALT_LEN,
            kdf: KdfParams::default(),
            preferred: None,
        }
    }
}

impl Config {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, DrillError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DrillError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(path) = non_empty(&lookup, HASH_FILE_ENV) {
            config.hash_path = PathBuf::from(path);
        }
        Ok(config)
    }

    /// Applies the `PASSDRILL_ALGORITHM` override from the process environment.
    pub fn with_algorithm_from_env(self) -> Result<Self, DrillError> {
        self.with_algorithm_from_lookup(|key| std::env::var(key).ok())
    }

    /// Applies the algorithm override read through `lookup`.
    pub fn with_algorithm_from_lookup<F>(mut self, lookup: F) -> Result<Self, DrillError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = non_empty(&lookup, ALGORITHM_ENV) {
            self.preferred = Some(name.trim().to_ascii_lowercase().parse()?);
        }
        Ok(self)
    }

    pub fn with_hash_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.hash_path = path.into();
        self
    }

    pub fn with_kdf(mut self, kdf: KdfParams) -> Self {
        self.kdf = kdf;
        self
    }

    pub fn with_preferred(mut self, algorithm: Option<Algorithm>) -> Self {
        self.preferred = algorithm;
        self
    }

    pub fn hash_path(&self) -> &Path {
        &self.hash_path
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn salt_len(&self) -> usize {
        self.salt_len
    }

    pub fn kdf(&self) -> &KdfParams {
        &self.kdf
    }

    pub fn preferred(&self) -> Option<Algorithm> {
        self.preferred
    }

    pub fn storage(&self) -> Storage {
        Storage::new(self.hash_path.clone())
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}
