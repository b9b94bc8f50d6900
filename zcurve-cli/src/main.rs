use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use commands::coords::CoordsArgs;
use commands::gc::GcArgs;
use commands::plot::PlotArgs;
use config::Config;
use error::{print_error_and_exit, CliError, CliResult};

#[derive(Parser)]
#[command(name = "zcurve")]
#[command(about = "Z-curve plots and GC content of genomic sequences")]
#[command(version)]
#[command(long_about = "
zcurve reads genome sequences in FASTA format, computes their Z-curve
(a 3-D cumulative representation of nucleotide composition) and GC content,
and writes Z-curve and W/S disparity plots.

Examples:
  zcurve plot -i zika.fna ecoli.fna -f png svg -o results --ws
  zcurve plot -i phage.fna.gz --gc --out-gc gc.txt
  zcurve gc -i *.fna
  zcurve coords -i zika.fna -o zika_coords.csv
  zcurve config --example -o zcurve.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plot the Z-curve (and optionally the W/S disparity) of each input
    Plot(PlotArgs),

    /// Report the GC content of each input without plotting
    Gc(GcArgs),

    /// Export the Z-curve coordinates of one input as CSV or JSON
    Coords(CoordsArgs),

    /// Show the effective configuration or an example zcurve.toml
    Config {
        /// Print a complete example configuration instead
        #[arg(long)]
        example: bool,

        /// Write the configuration to this file instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn run(cli: Cli) -> CliResult<()> {
    let config = Config::load(cli.config.as_deref())
        .map_err(|e| CliError::config(format!("{:#}", e)))?;

    match cli.command {
        Commands::Plot(args) => commands::plot::execute(&config, args),
        Commands::Gc(args) => commands::gc::execute(&config, args),
        Commands::Coords(args) => commands::coords::execute(args),
        Commands::Config { example, output } => commands::config::execute(&config, example, output.as_deref()),
    }
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        print_error_and_exit(&err);
    }
}
