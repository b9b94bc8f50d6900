//! Per-input pipeline and batch driver
//!
//! Each input runs load -> GC content -> transform -> render to completion
//! before the next one starts. Inputs share no state, the only policy choice
//! is what a failed input does to the rest of the batch.

use std::path::{Path, PathBuf};

use crate::composition::gc_percent;
use crate::error::{Result, ZcurveError};
use crate::gateway::{PlotRequest, RenderGateway};
use crate::io::fasta::load_fasta_file;
use crate::transform::zcurve_coordinates;
use crate::types::{PlotFormat, TransformMatrix};

/// Settings shared by every input of one run.
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub output_dir: PathBuf,
    pub formats: Vec<PlotFormat>,
    /// Also render the W/S disparity plot
    pub ws_plot: bool,
    pub matrix: TransformMatrix,
}

impl PlotOptions {
    pub fn new<P: Into<PathBuf>>(output_dir: P, formats: Vec<PlotFormat>) -> Self {
        Self {
            output_dir: output_dir.into(),
            formats,
            ws_plot: false,
            matrix: TransformMatrix::zcurve(),
        }
    }

    pub fn with_ws_plot(mut self, enabled: bool) -> Self {
        self.ws_plot = enabled;
        self
    }
}

/// Result of one successfully processed input.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceReport {
    pub identifier: String,
    pub gc_percent: f64,
    pub length: usize,
    pub artifacts: Vec<PathBuf>,
}

impl SequenceReport {
    /// `"<identifier>: <percent>%"` with two decimals
    pub fn gc_line(&self) -> String {
        format!("{}: {:.2}%", self.identifier, self.gc_percent)
    }
}

/// What a failed input does to the remaining inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Report the failure and go on with the next input
    #[default]
    Continue,
    /// Stop at the first failure
    Abort,
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub reports: Vec<SequenceReport>,
    pub failures: Vec<(PathBuf, ZcurveError)>,
    /// Inputs never attempted because the batch aborted
    pub skipped: usize,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.skipped == 0
    }
}

/// Run the whole pipeline for one input file.
pub fn process_file<P: AsRef<Path>>(
    path: P,
    options: &PlotOptions,
    gateway: &dyn RenderGateway,
) -> Result<SequenceReport> {
    let loaded = load_fasta_file(path.as_ref())?;
    let gc = gc_percent(&loaded.sequence)?;
    let coordinates = zcurve_coordinates(&loaded.sequence, &options.matrix);

    let request = PlotRequest::new(
        loaded.identifier.clone(),
        &options.output_dir,
        options.formats.clone(),
        coordinates,
    );

    log::info!("Plotting the Z-curve for {}...", request.identifier);
    let mut artifacts = gateway.render_zcurve(&request)?;

    if options.ws_plot {
        log::info!("Plotting the W/S plot for {}...", request.identifier);
        artifacts.extend(gateway.render_ws(&request)?);
    }

    Ok(SequenceReport {
        identifier: loaded.identifier,
        gc_percent: gc,
        length: loaded.sequence.len(),
        artifacts,
    })
}

/// Process `inputs` in order. `on_report` sees every successful report as soon
/// as it is produced; an error from it stops the batch and is returned.
pub fn run_batch<P, F>(
    inputs: &[P],
    options: &PlotOptions,
    gateway: &dyn RenderGateway,
    policy: FailurePolicy,
    mut on_report: F,
) -> Result<BatchSummary>
where
    P: AsRef<Path>,
    F: FnMut(&SequenceReport) -> Result<()>,
{
    let mut summary = BatchSummary::default();

    for (i, input) in inputs.iter().enumerate() {
        let path = input.as_ref();
        match process_file(path, options, gateway) {
            Ok(report) => {
                on_report(&report)?;
                summary.reports.push(report);
            }
            Err(err) => {
                log::error!("Failed to process {}: {}", path.display(), err);
                summary.failures.push((path.to_path_buf(), err));
                if policy == FailurePolicy::Abort {
                    summary.skipped = inputs.len() - i - 1;
                    break;
                }
            }
        }
    }

    log::info!(
        "Processed {} input(s): {} succeeded, {} failed",
        inputs.len() - summary.skipped,
        summary.reports.len(),
        summary.failures.len()
    );

    Ok(summary)
}
