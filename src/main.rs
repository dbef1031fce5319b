use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use refcount_list::demo::{run_cycle_demo, run_list_demo};
use refcount_list::logging::initialize_logging;

#[derive(Parser)]
#[command(version, about = "Walkthroughs of a reference-counted linked list")]
struct Cli {
    /// Verbosity of the terminal logger
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    log_level: LogLevel,

    /// Also write debug logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Push 1, 2, 3, print them, push 4, 5, then pop three values
    List,
    /// Link two nodes to each other and watch them leak
    Cycle,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    initialize_logging(cli.log_level.into(), cli.log_file.as_deref())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::List => run_list_demo(&mut out)?,
        Commands::Cycle => {
            run_cycle_demo(&mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
