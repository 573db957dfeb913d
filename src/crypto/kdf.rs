use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use log::debug;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;

use super::KEY_LEN;
use crate::{QUIT, error::DrillError};

/// Key derivation functions a passphrase hash record can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// PBKDF2-HMAC-SHA512.
    Pbkdf2,
    /// scrypt, memory-hard. Only executable when built with the `scrypt` feature.
    Scrypt,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Pbkdf2, Algorithm::Scrypt];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Pbkdf2 => "pbkdf2",
            Algorithm::Scrypt => "scrypt",
        }
    }

    /// Whether this build can execute the algorithm.
    pub fn is_available(self) -> bool {
        match self {
            Algorithm::Pbkdf2 => true,
            Algorithm::Scrypt => cfg!(feature = "scrypt"),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| DrillError::UnsupportedAlgorithm(s.to_string()))
    }
}

/// Algorithms this build can execute, strongest first.
pub fn available_algorithms() -> Vec<Algorithm> {
    let mut algorithms: Vec<_> = Algorithm::ALL
        .into_iter()
        .filter(|a| a.is_available())
        .collect();
    algorithms.reverse();
    algorithms
}

/// Outcome of choosing the algorithm for a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub algorithm: Algorithm,
    /// `true` when the wanted algorithm is missing and PBKDF2 is used instead.
    pub fell_back: bool,
}

/// Picks the algorithm for a new record: `preferred` if given, scrypt otherwise,
/// degrading to PBKDF2 when the wanted one is not available.
pub fn select_algorithm(preferred: Option<Algorithm>) -> Selection {
    let wanted = preferred.unwrap_or(Algorithm::Scrypt);
    let selection = if wanted.is_available() {
        Selection {
            algorithm: wanted,
            fell_back: false,
        }
    } else {
        Selection {
            algorithm: Algorithm::Pbkdf2,
            fell_back: true,
        }
    };
    debug!(
        "selected {} (wanted {wanted}, fallback: {})",
        selection.algorithm, selection.fell_back
    );
    selection
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    key_len: usize,
    pbkdf2_rounds: u32,
    scrypt_log_n: u8,
    scrypt_r: u32,
    scrypt_p: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            key_len: KEY_LEN,
            pbkdf2_rounds: 200_000,
            // N = 32768
            scrypt_log_n: 15,
            scrypt_r: 8,
            scrypt_p: 1,
        }
    }
}

impl KdfParams {
    /// Smallest and largest derived key length accepted by both algorithms.
    pub const MIN_KEY_LEN: usize = 10;
    pub const MAX_KEY_LEN: usize = 64;

    pub fn new(
        key_len: usize,
        pbkdf2_rounds: u32,
        scrypt_log_n: u8,
        scrypt_r: u32,
        scrypt_p: u32,
    ) -> Result<Self, DrillError> {
        let params = Self {
            key_len,
            pbkdf2_rounds,
            scrypt_log_n,
            scrypt_r,
            scrypt_p,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn key_len(&self) -> usize {
        self.key_len
    }

    pub fn pbkdf2_rounds(&self) -> u32 {
        self.pbkdf2_rounds
    }

    pub fn scrypt_log_n(&self) -> u8 {
        self.scrypt_log_n
    }

    pub fn scrypt_r(&self) -> u32 {
        self.scrypt_r
    }

    pub fn scrypt_p(&self) -> u32 {
        self.scrypt_p
    }

    pub fn validate(&self) -> Result<(), DrillError> {
        if !(Self::MIN_KEY_LEN..=Self::MAX_KEY_LEN).contains(&self.key_len) {
            return Err(DrillError::InvalidParams(format!(
                "derived key length must be between {} and {} bytes",
                Self::MIN_KEY_LEN,
                Self::MAX_KEY_LEN
            )));
        }
        if self.pbkdf2_rounds < 1 {
            return Err(DrillError::InvalidParams(
                "pbkdf2 rounds must be >= 1".into(),
            ));
        }
        if self.scrypt_r < 1 || self.scrypt_p < 1 {
            return Err(DrillError::InvalidParams(
                "scrypt r and p must be >= 1".into(),
            ));
        }
        if self.scrypt_log_n < 1 || u32::from(self.scrypt_log_n) >= self.scrypt_r.saturating_mul(16) {
            return Err(DrillError::InvalidParams(
                "scrypt log2(N) must be >= 1 and < 16 * r".into(),
            ));
        }
        Ok(())
    }
}

/// Rejects passphrases the drill cannot use: empty, or the quit keyword.
pub fn check_passphrase(plaintext: &str) -> Result<(), DrillError> {
    if plaintext.is_empty() || plaintext == QUIT {
        return Err(DrillError::EmptyPassphrase);
    }
    Ok(())
}

/// Derives a `params.key_len()` byte digest of `plaintext` with `salt`.
///
/// Deterministic for identical inputs. Never substitutes another algorithm:
/// asking for one this build cannot run fails with
/// [`DrillError::AlgorithmUnavailable`].
pub fn derive(
    algorithm: Algorithm,
    salt: &[u8],
    plaintext: &str,
    params: &KdfParams,
) -> Result<Vec<u8>, DrillError> {
    params.validate()?;
    check_passphrase(plaintext)?;

    let started = Instant::now();
    let mut digest = vec![0u8; params.key_len];
    match algorithm {
        Algorithm::Pbkdf2 => {
            pbkdf2_hmac::<Sha512>(
                plaintext.as_bytes(),
                salt,
                params.pbkdf2_rounds,
                &mut digest,
            );
        }
        Algorithm::Scrypt => derive_scrypt(salt, plaintext, params, &mut digest)?,
    }
    debug!("{algorithm} derivation took {:?}", started.elapsed());

    Ok(digest)
}

#[cfg(feature = "scrypt")]
fn derive_scrypt(
    salt: &[u8],
    plaintext: &str,
    params: &KdfParams,
    out: &mut [u8],
) -> Result<(), DrillError> {
    let scrypt_params = scrypt::Params::new(
        params.scrypt_log_n,
        params.scrypt_r,
        params.scrypt_p,
        params.key_len,
    )
    .map_err(|e| DrillError::InvalidParams(format!("scrypt: {e}")))?;

    scrypt::scrypt(plaintext.as_bytes(), salt, &scrypt_params, out)
        .map_err(|e| DrillError::InvalidParams(format!("scrypt: {e}")))
}

#[cfg(not(feature = "scrypt"))]
fn derive_scrypt(
    _salt: &[u8],
    _plaintext: &str,
    _params: &KdfParams,
    _out: &mut [u8],
) -> Result<(), DrillError> {
    Err(DrillError::AlgorithmUnavailable(Algorithm::Scrypt))
}
