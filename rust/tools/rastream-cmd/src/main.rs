use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod utils;

#[derive(Parser)]
#[command(name = "rastream-cmd")]
#[command(about = "Command-line utility for positional reads over files")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display the logical size of a file as seen by a stream
    Info {
        /// Path to the file
        path: String,
    },

    /// Perform a single positional read and print the bytes
    Read {
        /// Absolute byte offset to start reading at
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,

        /// Number of bytes to read
        #[arg(short, long, allow_negative_numbers = true)]
        count: i64,

        /// Print a hex dump instead of raw bytes
        #[arg(long)]
        hex: bool,

        /// Path to the file
        path: String,
    },

    /// Read a whole file through the stream and print its size and checksum
    Dump {
        /// Size of a single positional read
        #[arg(long, default_value_t = 64 * 1024)]
        chunk_size: usize,

        /// Number of threads reading disjoint ranges concurrently
        #[arg(short, long, default_value_t = 1)]
        threads: usize,

        /// Path to the file
        path: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose);

    match cli.command {
        Commands::Info { path } => commands::info::run(path),
        Commands::Read {
            offset,
            count,
            hex,
            path,
        } => commands::read::run(offset, count, hex, path),
        Commands::Dump {
            chunk_size,
            threads,
            path,
        } => commands::dump::run(chunk_size, threads, path),
    }
}
