mod cli;
mod frames;
mod origin;

use anyhow::Result;
use clap::{error::ErrorKind, Parser};
use log::debug;
use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use cli::{Args, CliError, Input};
use frames::sez_to_ecef;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut stdout = std::io::stdout().lock();

    match run(std::env::args_os(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:?}", err);
            ExitCode::FAILURE
        }
    }
}

// Usage and parse errors are reported on `out` and are not failures
fn run<I, T, W>(args: I, out: &mut W) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
{
    let args = match Args::from_argv(args) {
        Ok(args) => args,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                write!(out, "{}", err.render())?;
                return Ok(());
            }
            _ => {
                debug!("rejected command line: {:?}", err.kind());
                writeln!(out, "{}", CliError::Usage)?;
                return Ok(());
            }
        },
    };

    let input = match Input::from_values(&args.values) {
        Ok(input) => input,
        Err(err) => {
            if let CliError::Parse { value } = &err {
                debug!("not a number: {:?}", value);
            }
            writeln!(out, "{}", err)?;
            return Ok(());
        }
    };

    let ecef = sez_to_ecef(&input.origin, &input.sez);

    // Debug formatting keeps a fractional part and round-trips exactly
    writeln!(out, "{:?}", ecef.x)?;
    writeln!(out, "{:?}", ecef.y)?;
    writeln!(out, "{:?}", ecef.z)?;
    out.flush()?;

    Ok(())
}
