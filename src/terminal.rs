use anyhow::Result;
use passdrill::console::{Console, trim_newline};
use std::io::{self, BufRead, ErrorKind, IsTerminal, Write};
use zeroize::Zeroizing;

/// Console backed by the process's stdin/stdout.
///
/// Hidden reads use `rpassword` on a TTY. When stdin is piped
/// (`printf 'pw\nq\n' | passdrill`) every read is a plain line read.
pub struct Terminal;

impl Terminal {
    fn read_stdin_line(&mut self, prompt: &str) -> Result<Option<Zeroizing<String>>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut buf = Zeroizing::new(String::new());
        if io::stdin().lock().read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        trim_newline(&mut buf);
        Ok(Some(buf))
    }
}

impl Console for Terminal {
    fn read_line(&mut self, prompt: &str) -> Result<Option<Zeroizing<String>>> {
        self.read_stdin_line(prompt)
    }

    fn read_hidden(&mut self, prompt: &str) -> Result<Option<Zeroizing<String>>> {
        if !io::stdin().is_terminal() {
            return self.read_stdin_line(prompt);
        }

        match rpassword::prompt_password(prompt) {
            Ok(response) => Ok(Some(Zeroizing::new(response))),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(io::stdout().lock(), "{line}")?;
        Ok(())
    }
}
