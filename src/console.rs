//! Line-oriented terminal interaction used by the drills.

use anyhow::Result;
use zeroize::Zeroizing;

/// Echoed and hidden line reads plus plain output.
///
/// Reads return `Ok(None)` once input is exhausted.
pub trait Console {
    /// Reads a line with echo on.
    fn read_line(&mut self, prompt: &str) -> Result<Option<Zeroizing<String>>>;

    /// Reads a line with echo suppressed.
    fn read_hidden(&mut self, prompt: &str) -> Result<Option<Zeroizing<String>>>;

    /// Writes one line of output.
    fn say(&mut self, line: &str) -> Result<()>;
}

/// Strips trailing `\n` / `\r` left by line reads.
pub fn trim_newline(s: &mut String) {
    while s.ends_with('\n') || s.ends_with('\r') {
        s.pop();
    }
}
