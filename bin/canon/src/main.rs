use std::{path::PathBuf, process::ExitCode};

use clap::{CommandFactory, Parser};
use tracing::{debug, info, trace};
use tracing_subscriber::{filter::LevelFilter, prelude::*};
use transducers::{
    prelude::*,
    table::{self, TableError, TableFormat, WriteTable},
};

#[derive(Debug, Clone, clap::Parser)]
#[command(
    name = "canon",
    about = "Minimizes Mealy and Moore machines given as tables and converts between them"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// The character separating the cells of a row.
    #[arg(short = 'd', long, default_value = ";")]
    delimiter: char,
    /// Increases the amount of logging, can be given multiple times.
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Disables logging entirely.
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, clap::Subcommand)]
enum Command {
    /// Minimizes the Mealy machine in INPUT and writes it to OUTPUT.
    Mealy(Files),
    /// Minimizes the Moore machine in INPUT and writes it to OUTPUT.
    Moore(Files),
    /// Converts the Mealy machine in INPUT into a Moore machine written to OUTPUT.
    MealyToMoore(Files),
    /// Converts the Moore machine in INPUT into a Mealy machine written to OUTPUT.
    MooreToMealy(Files),
}

#[derive(Debug, Clone, clap::Args)]
struct Files {
    input: PathBuf,
    output: PathBuf,
}

impl Command {
    fn input_kind(&self) -> MachineKind {
        match self {
            Command::Mealy(_) | Command::MealyToMoore(_) => MachineKind::Mealy,
            Command::Moore(_) | Command::MooreToMealy(_) => MachineKind::Moore,
        }
    }

    fn files(&self) -> &Files {
        match self {
            Command::Mealy(files)
            | Command::Moore(files)
            | Command::MealyToMoore(files)
            | Command::MooreToMealy(files) => files,
        }
    }

    fn apply(&self, aut: Automaton) -> Automaton {
        match self {
            Command::Mealy(_) | Command::Moore(_) => aut.minimize(),
            Command::MealyToMoore(_) => aut.into_moore().into(),
            Command::MooreToMealy(_) => aut.into_mealy().into(),
        }
    }
}

fn setup_logging(cli: &Cli) {
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => LevelFilter::OFF,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::INFO,
        (false, 2) => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn run(command: &Command, format: TableFormat) -> Result<(), TableError> {
    let files = command.files();
    let kind = command.input_kind();
    debug!("reading {kind} machine from {}", files.input.display());
    let aut = table::read_from_path(kind, &files.input, format)?;
    info!("read {kind} machine with {} states", aut.size());

    let result = command.apply(aut);
    info!(
        "writing {} machine with {} states to {}",
        result.kind(),
        result.size(),
        files.output.display()
    );
    result.write_table_to_path(&files.output, format)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if !cli.delimiter.is_ascii() {
        Cli::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("delimiter `{}` is not an ASCII character", cli.delimiter),
            )
            .exit();
    }
    setup_logging(&cli);

    match run(&cli.command, TableFormat::with_delimiter(cli.delimiter as u8)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("canon: {e}");
            ExitCode::FAILURE
        }
    }
}
