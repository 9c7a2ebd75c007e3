use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod utils;

#[derive(Parser)]
#[command(name = "rawrec-cmd")]
#[command(about = "Command-line utility for dumping Arrow data as raw records")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every row as one JSON object per line
    Records {
        /// Maximum number of rows to print
        #[arg(short, long)]
        limit: Option<usize>,

        /// Number of leading rows to skip
        #[arg(short, long, default_value_t = 0)]
        offset: usize,

        /// Comma-separated list of columns to print, in output order
        #[arg(short, long, value_delimiter = ',')]
        columns: Option<Vec<String>>,

        /// Input file(s): .arrow/.ipc/.feather, .arrows, .csv, .json/.ndjson/.jsonl.
        /// Multiple files must share a schema and are read as one table.
        #[arg(required = true)]
        files: Vec<String>,
    },

    /// Display the row count, batch layout and column kinds of input files
    Inspect {
        /// Input file(s) to inspect
        #[arg(required = true)]
        files: Vec<String>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Records {
            limit,
            offset,
            columns,
            files,
        } => commands::records::run(
            commands::records::RecordsOptions {
                offset,
                limit,
                columns,
            },
            files,
        ),
        Commands::Inspect { files } => commands::inspect::run(files),
    }
}
