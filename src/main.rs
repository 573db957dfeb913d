use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use log::debug;
use passdrill::error::{DrillError, EXIT_FAILURE};
use passdrill::{Config, crypto, practice, save};

mod terminal;
use terminal::Terminal;

#[derive(Debug, Parser)]
#[command(name = "passdrill")]
#[command(
    disable_help_flag = true,
    disable_version_flag = true,
    about = "Typing drills for practicing passphrases.",
    long_about = "Typing drills for practicing passphrases.\n\n\
        Run with -s to save a salted hash of your passphrase, then run \
        without arguments to practice typing it."
)]
struct Cli {
    /// Save passphrase hash for practice
    #[arg(short = 's')]
    save: bool,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => return report(&anyhow::Error::new(e)),
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

/// Accepts exactly `passdrill` or `passdrill -s`; anything else is a usage error.
fn parse_args<I>(args: I) -> Result<Cli, DrillError>
where
    I: IntoIterator<Item = OsString>,
{
    let args: Vec<OsString> = args.into_iter().collect();
    match args.get(1..) {
        Some([]) => {}
        Some([flag]) if flag == "-s" => {}
        _ => {
            debug!("rejected arguments {:?}", args.get(1..));
            return Err(DrillError::Usage);
        }
    }

    Cli::try_parse_from(args).map_err(|e| {
        debug!("argument error: {e}");
        DrillError::Usage
    })
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_env()?;
    if cli.save {
        config = config.with_algorithm_from_env()?;
    }
    debug!(
        "record file {}, available algorithms {:?}",
        config.hash_path().display(),
        crypto::available_algorithms()
    );

    let mut terminal = Terminal;
    if cli.save {
        save(&mut terminal, &config)?;
    } else {
        practice(&mut terminal, &config)?;
    }
    Ok(())
}

fn report(err: &anyhow::Error) -> ExitCode {
    eprintln!("ERROR: {err:#}");
    let code = err
        .downcast_ref::<DrillError>()
        .map(DrillError::exit_code)
        .unwrap_or(EXIT_FAILURE);
    ExitCode::from(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, DrillError> {
        parse_args(
            std::iter::once("passdrill")
                .chain(args.iter().copied())
                .map(OsString::from),
        )
    }

    #[test]
    fn no_arguments_is_practice() {
        assert!(!parse(&[]).unwrap().save);
    }

    #[test]
    fn single_s_flag_is_save() {
        assert!(parse(&["-s"]).unwrap().save);
    }

    #[test]
    fn anything_else_is_usage_error() {
        let invocations: [&[&str]; 9] = [
            &["--"],
            &["--help"],
            &["-h"],
            &["-V"],
            &["--version"],
            &["-ss"],
            &["-s", "-s"],
            &["-s", "--"],
            &["save"],
        ];
        for args in invocations {
            assert!(
                matches!(parse(args), Err(DrillError::Usage)),
                "{args:?} should be rejected"
            );
        }
    }
}
