//! Command implementations for the zcurve CLI

pub mod config;
pub mod coords;
pub mod gc;
pub mod plot;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use zcurve_core::SequenceReport;

/// Where GC lines go when `--gc` is given without a file name
pub const DEFAULT_GC_REPORT: &str = "GC_content_output.txt";

/// Line-oriented GC content report, one `<identifier>: <gc>%` line per input.
pub struct GcReport<W: Write> {
    out: W,
    destination: Option<PathBuf>,
}

impl<W: Write> GcReport<W> {
    pub fn new(out: W) -> Self {
        Self { out, destination: None }
    }

    pub fn write_line(&mut self, identifier: &str, gc_percent: f64) -> io::Result<()> {
        writeln!(self.out, "{}: {:.2}%", identifier, gc_percent)
    }

    pub fn write_report(&mut self, report: &SequenceReport) -> io::Result<()> {
        writeln!(self.out, "{}", report.gc_line())
    }

    /// Flush and log where the report went.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        if let Some(path) = &self.destination {
            log::info!("GC content written to {}", path.display());
        }
        Ok(self.out)
    }
}

/// Resolve the GC report file, or `None` for terminal output.
///
/// An explicit `out_gc` always means file output; `--gc` alone falls back
/// to the configured report path, then to [`DEFAULT_GC_REPORT`]. A path in
/// the configuration enables file output on its own.
pub fn gc_report_path(save_gc: bool, out_gc: Option<&Path>, configured: Option<&Path>) -> Option<PathBuf> {
    match (out_gc, save_gc, configured) {
        (Some(path), _, _) => Some(path.to_path_buf()),
        (None, true, configured) => {
            Some(configured.map_or_else(|| PathBuf::from(DEFAULT_GC_REPORT), Path::to_path_buf))
        }
        (None, false, Some(path)) => Some(path.to_path_buf()),
        (None, false, None) => None,
    }
}

impl GcReport<Box<dyn Write>> {
    /// Open the destination chosen by [`gc_report_path`], stdout when none.
    pub fn open(save_gc: bool, out_gc: Option<&Path>, configured: Option<&Path>) -> io::Result<Self> {
        match gc_report_path(save_gc, out_gc, configured) {
            Some(path) => {
                let file = File::create(&path)?;
                Ok(Self { out: Box::new(BufWriter::new(file)), destination: Some(path) })
            }
            None => {
                log::info!(
                    "The GC content will be printed to the terminal; use --gc or --out-gc to save it to a file"
                );
                Ok(Self::new(Box::new(io::stdout())))
            }
        }
    }
}
