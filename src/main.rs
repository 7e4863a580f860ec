//! Sysctl Tree CLI
//!
//! A thin command-line front end over the `sysctl_tree` library.

use anyhow::Result;
use clap::Parser;
use std::fs::OpenOptions;
use std::process::ExitCode;
use sysctl_tree::cli::{Cli, Command};
use sysctl_tree::format::{OutputFormat, format_entries, format_error};
use sysctl_tree::{Client, Snapshot, SysctlError};
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let base = cli.resolve_base();
    debug!(base = %base.display(), "using sysctl tree");
    let client = Client::new(&base)?;

    match &cli.command {
        Command::Get { keys } => {
            let mut values = Snapshot::new();
            for key in keys {
                values.insert(key.clone(), client.get(key)?);
            }
            print_entries(&values, cli.format);
        }
        Command::Set(args) => {
            let (key, value) = args.assignment().map_err(anyhow::Error::msg)?;
            client.set(&key, &value)?;
            print_entries(&Snapshot::from([(key, value)]), cli.format);
        }
        Command::All => print_entries(&client.get_all()?, cli.format),
        Command::Match { pattern } => print_entries(&client.get_pattern(pattern)?, cli.format),
        Command::Load { files } => {
            let applied = client.apply_config_files(files.as_slice())?;
            print_entries(&applied, cli.format);
        }
    }
    Ok(())
}

fn print_entries(entries: &Snapshot, format: OutputFormat) {
    print!("{}", format_entries(entries, format));
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    match run(&cli) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            match err.downcast_ref::<SysctlError>() {
                Some(sysctl_err) => eprintln!("{}", format_error(sysctl_err, cli.format)),
                None => eprintln!("error: {:#}", err),
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
