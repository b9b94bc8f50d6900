//! GC command: GC content report only, no rendering

use clap::Args;
use std::path::PathBuf;

use zcurve_core::{gc_percent, load_fasta_file};

use super::GcReport;
use crate::config::Config;
use crate::error::{CliError, CliResult};

#[derive(Args, Debug, Clone)]
pub struct GcArgs {
    /// Input genome(s) in FASTA format (.gz accepted)
    #[arg(short, long = "input", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Write the report to this file instead of the terminal
    #[arg(long)]
    pub out_gc: Option<PathBuf>,

    /// Stop at the first failing input
    #[arg(long)]
    pub fail_fast: bool,
}

pub fn execute(config: &Config, args: GcArgs) -> CliResult<()> {
    let mut report = GcReport::open(false, args.out_gc.as_deref(), config.output.gc_report.as_deref())?;
    let fail_fast = args.fail_fast || config.batch.fail_fast;

    let mut failed = 0;
    for input in &args.inputs {
        let result = load_fasta_file(input).and_then(|loaded| {
            let gc = gc_percent(&loaded.sequence)?;
            Ok((loaded.identifier, gc))
        });
        match result {
            Ok((identifier, gc)) => report.write_line(&identifier, gc)?,
            Err(err) => {
                log::error!("Failed to process {}: {}", input.display(), err);
                failed += 1;
                if fail_fast {
                    break;
                }
            }
        }
    }
    report.finish()?;

    if failed == 0 {
        Ok(())
    } else {
        Err(CliError::batch(failed, args.inputs.len()))
    }
}
