//! Typing drills for practicing passphrases.
//!
//! Save mode stores only a salted key-derivation digest of the passphrase;
//! practice mode derives each attempt the same way and compares digests.

pub mod config;
pub mod console;
pub mod crypto;
pub mod error;
pub mod practice;
pub mod record;
pub mod save;
pub mod session;
pub mod storage;

pub use crate::config::Config;
pub use crate::console::Console;
pub use crate::crypto::{Algorithm, KdfParams};
pub use crate::error::DrillError;
pub use crate::practice::practice;
pub use crate::record::{HashRecord, decode, encode};
pub use crate::save::save;
pub use crate::session::PracticeSession;
pub use crate::storage::Storage;

/// Ends a practice session; never accepted as a passphrase.
pub const QUIT: &str = "q";
