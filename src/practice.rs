//! Practice mode: retype the saved passphrase and keep score.

use anyhow::Result;
use log::{debug, info};

use crate::QUIT;
use crate::config::Config;
use crate::console::Console;
use crate::crypto::KdfParams;
use crate::error::DrillError;
use crate::record::{self, HashRecord};
use crate::session::PracticeSession;

/// Loads the saved record and checks this build can verify against it.
pub fn load_record(config: &Config) -> Result<HashRecord> {
    let data = config.storage().load()?;
    let record = record::decode(&data, config)?;

    if !record.algorithm().is_available() {
        return Err(DrillError::AlgorithmUnavailable(record.algorithm()).into());
    }
    info!("practicing against {} record", record.algorithm());
    Ok(record)
}

/// Runs practice mode against the saved record.
pub fn practice<C: Console + ?Sized>(console: &mut C, config: &Config) -> Result<PracticeSession> {
    let record = load_record(config)?;
    drill(console, &record, config.kdf())
}

/// Reads hidden responses until `q` or end of input, scoring each one.
pub fn drill<C: Console + ?Sized>(
    console: &mut C,
    record: &HashRecord,
    params: &KdfParams,
) -> Result<PracticeSession> {
    console.say(&format!("Type {QUIT} to end practice."))?;

    let mut session = PracticeSession::new();
    loop {
        let prompt = format!("{}:", session.turns() + 1);
        let Some(response) = console.read_hidden(&prompt)? else {
            debug!("input closed, ending practice");
            break;
        };

        match response.as_str() {
            "" => {
                console.say(&format!("Type {QUIT} to quit."))?;
                continue;
            }
            QUIT => break,
            _ => {}
        }

        let hit = record.matches(&response, params)?;
        let outcome = session.record(hit);
        console.say(&session.feedback(outcome))?;
    }

    if let Some(summary) = session.summary() {
        console.say("")?;
        console.say(&summary)?;
    }
    Ok(session)
}
