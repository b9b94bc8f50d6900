//! Plot command: Z-curve and W/S plots plus the GC report for each input

use clap::Args;
use std::path::PathBuf;

use zcurve_core::{run_batch, validate_output_dir, FailurePolicy, PlotFormat, PlotOptions, RenderGateway};
use zcurve_render::{ExportConfig, PlotExporter, PDF_DISABLED};

use super::GcReport;
use crate::config::Config;
use crate::error::{CliError, CliResult};

#[derive(Args, Debug, Clone)]
pub struct PlotArgs {
    /// Input genome(s) in FASTA format (.gz accepted)
    #[arg(short, long = "input", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Output formats: png, jpeg, svg, pdf [default: png]
    #[arg(short, long = "format", num_args = 1..)]
    pub formats: Vec<PlotFormat>,

    /// Output directory; must already exist [default: .]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Rendering style file (TOML)
    #[arg(short, long)]
    pub style: Option<PathBuf>,

    /// Save the GC content to a file instead of printing it
    #[arg(long)]
    pub gc: bool,

    /// GC report file; implies --gc
    #[arg(long)]
    pub out_gc: Option<PathBuf>,

    /// Also write a W/S disparity plot per input
    #[arg(long)]
    pub ws: bool,

    /// Stop at the first failing input
    #[arg(long)]
    pub fail_fast: bool,
}

pub fn execute(config: &Config, args: PlotArgs) -> CliResult<()> {
    let output_dir = validate_output_dir(args.output.as_ref().unwrap_or(&config.output.directory))?;
    let formats = resolve_formats(&args.formats, &config.output.formats)?;
    log::info!(
        "Writing {} plot(s) to {}",
        formats.iter().map(|f| f.to_string()).collect::<Vec<_>>().join(", "),
        output_dir.display()
    );

    let export = build_export_config(config, args.style.as_ref())?;
    let exporter = PlotExporter::new(export);
    exporter.prepare()?;
    check_formats(&exporter, &formats)?;

    let options = PlotOptions::new(output_dir, formats).with_ws_plot(args.ws);
    let policy = if args.fail_fast || config.batch.fail_fast {
        FailurePolicy::Abort
    } else {
        FailurePolicy::Continue
    };

    let mut report = GcReport::open(args.gc, args.out_gc.as_deref(), config.output.gc_report.as_deref())?;
    let summary = run_batch(args.inputs.as_slice(), &options, &exporter, policy, |r| {
        report.write_report(r).map_err(Into::into)
    })?;
    report.finish()?;

    if summary.skipped > 0 {
        log::warn!("Skipped {} input(s) after the first failure", summary.skipped);
    }
    if summary.is_success() {
        Ok(())
    } else {
        Err(CliError::batch(summary.failures.len(), args.inputs.len()))
    }
}

/// Command-line formats win over the configured ones; duplicates are dropped.
fn resolve_formats(cli: &[PlotFormat], configured: &[PlotFormat]) -> CliResult<Vec<PlotFormat>> {
    let source = if cli.is_empty() { configured } else { cli };
    let mut formats = Vec::with_capacity(source.len());
    for &format in source {
        if !formats.contains(&format) {
            formats.push(format);
        }
    }
    if formats.is_empty() {
        return Err(CliError::validation("at least one output format is required"));
    }
    Ok(formats)
}

/// Reject formats the backend cannot write before any input is read.
fn check_formats(gateway: &dyn RenderGateway, formats: &[PlotFormat]) -> CliResult<()> {
    match formats.iter().copied().find(|&f| !gateway.supports(f)) {
        Some(PlotFormat::Pdf) => Err(CliError::rendering(PDF_DISABLED)),
        Some(format) => Err(CliError::rendering(format!("{} export is not available in this build", format))),
        None => Ok(()),
    }
}

/// Style file (command line, then configuration) with `[render]` overrides on top.
fn build_export_config(config: &Config, style: Option<&PathBuf>) -> CliResult<ExportConfig> {
    let mut export = match style.or(config.render.style.as_ref()) {
        Some(path) => {
            log::info!("Using rendering style {}", path.display());
            ExportConfig::from_style_file(path)?
        }
        None => ExportConfig::default(),
    };
    config.render.apply_to(&mut export);
    Ok(export)
}
