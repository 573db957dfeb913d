//! Save mode: ask for a passphrase, confirm it, and store its hash.

use anyhow::{Context, Result};
use log::info;
use zeroize::Zeroizing;

use crate::config::Config;
use crate::console::Console;
use crate::crypto::{self, check_passphrase};
use crate::error::DrillError;
use crate::record::{self, HashRecord};

pub const SHOWN_WARNING: &str = "WARNING: the passphrase will be shown so that you can check it!";
pub const FALLBACK_WARNING: &str =
    "WARNING: scrypt is not available in this build; using the weaker pbkdf2 algorithm.";

/// Prompts until the user confirms a usable passphrase.
///
/// Empty input and the quit keyword are rejected; any answer other than
/// `y` starts over.
pub fn prompt_passphrase<C: Console + ?Sized>(console: &mut C) -> Result<Zeroizing<String>> {
    console.say(SHOWN_WARNING)?;
    loop {
        let passphrase = console
            .read_line("Type passphrase to hash (it will be echoed): ")?
            .ok_or(DrillError::UnexpectedEof)?;

        if let Err(e) = check_passphrase(&passphrase) {
            console.say(&format!("ERROR: {e}"))?;
            continue;
        }

        console.say(&format!("Passphrase to be hashed -> {}", passphrase.as_str()))?;
        let confirmed = console
            .read_line("Confirm (y/n): ")?
            .ok_or(DrillError::UnexpectedEof)?;

        if confirmed.trim().eq_ignore_ascii_case("y") {
            return Ok(passphrase);
        }
    }
}

/// Runs save mode and returns the record that was written.
pub fn save<C: Console + ?Sized>(console: &mut C, config: &Config) -> Result<HashRecord> {
    let passphrase = prompt_passphrase(console)?;

    let selection = crypto::select_algorithm(config.preferred());
    if selection.fell_back {
        info!("scrypt unavailable, falling back to {}", selection.algorithm);
        console.say(FALLBACK_WARNING)?;
    }

    let record = HashRecord::create(selection.algorithm, &passphrase, config)
        .context("failed to hash passphrase")?;
    drop(passphrase);

    let storage = config.storage();
    storage
        .save(&record::encode(&record, config))
        .context("failed to save passphrase hash")?;
    info!("saved {} record", record.algorithm());

    console.say(&format!(
        "Passphrase hash saved to {}",
        storage.path().display()
    ))?;
    Ok(record)
}
