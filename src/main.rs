use anyhow::{Context, Result};
use array_mean::{
    array::NumericArray,
    console::{Console, is_end_of_input},
};
use clap::Parser;
use std::io;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:?}");
        let code = if is_end_of_input(&error) { 2 } else { 1 };
        std::process::exit(code);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::debug!("{args:#?}");

    let mut console = Console::new(io::stdin().lock(), io::stdout().lock(), io::stderr());
    console
        .run_session(NumericArray::try_new)
        .context("failed to run session")?;

    Ok(())
}
