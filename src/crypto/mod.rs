//! Key derivation for passphrase hashes.
//!
//! Provides the supported algorithms, their parameters, and salt generation.

pub mod kdf;
pub mod random;

pub use kdf::{
    Algorithm, KdfParams, Selection, available_algorithms, check_passphrase, derive, select_algorithm,
};
pub use random::generate_salt;

/// Length of the salt (32 bytes).
pub const SALT_LEN: usize = 32;
/// Length of the derived key (64 bytes / 512 bits).
pub const KEY_LEN: usize = 64;
