//! Seam between the core computation and whatever draws the plots

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::{CoordinateSeries, PlotFormat};

/// Everything a renderer needs for one input sequence.
#[derive(Debug, Clone)]
pub struct PlotRequest {
    pub identifier: String,
    pub output_dir: PathBuf,
    pub formats: Vec<PlotFormat>,
    pub coordinates: CoordinateSeries,
    pub title: String,
}

impl PlotRequest {
    pub fn new<P: AsRef<Path>>(
        identifier: impl Into<String>,
        output_dir: P,
        formats: Vec<PlotFormat>,
        coordinates: CoordinateSeries,
    ) -> Self {
        let identifier = identifier.into();
        Self {
            title: identifier.clone(),
            identifier,
            output_dir: output_dir.as_ref().to_path_buf(),
            formats,
            coordinates,
        }
    }

    /// `<output_dir>/<identifier>`, the Z-curve artifact path without extension
    pub fn output_stem(&self) -> PathBuf {
        self.output_dir.join(&self.identifier)
    }

    /// `<output_dir>/<identifier>_WS`
    pub fn ws_stem(&self) -> PathBuf {
        self.output_dir.join(format!("{}_WS", self.identifier))
    }

    /// Artifact path for `stem` in `format`.
    pub fn artifact_path(stem: &Path, format: PlotFormat) -> PathBuf {
        let mut name = stem.as_os_str().to_os_string();
        name.push(".");
        name.push(format.extension());
        PathBuf::from(name)
    }
}

/// A plotting backend. Each render call writes one file per requested format
/// and returns the written paths in format order.
pub trait RenderGateway {
    /// One-time setup run by the front end before any sequence is processed.
    /// Must be safe to call more than once.
    fn prepare(&self) -> Result<()> {
        Ok(())
    }

    /// Whether this backend can write `format` at all.
    fn supports(&self, _format: PlotFormat) -> bool {
        true
    }

    fn render_zcurve(&self, request: &PlotRequest) -> Result<Vec<PathBuf>>;

    /// W/S disparity plot: the Z coordinate against sequence position.
    fn render_ws(&self, request: &PlotRequest) -> Result<Vec<PathBuf>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_names() {
        let req = PlotRequest::new(
            "genome",
            "out",
            vec![PlotFormat::Png, PlotFormat::Pdf],
            CoordinateSeries::default(),
        );
        assert_eq!(req.output_stem(), Path::new("out").join("genome"));
        assert_eq!(
            PlotRequest::artifact_path(&req.ws_stem(), PlotFormat::Pdf),
            Path::new("out").join("genome_WS.pdf")
        );
        assert_eq!(req.title, "genome");
    }

    struct NullGateway;

    impl RenderGateway for NullGateway {
        fn render_zcurve(&self, _request: &PlotRequest) -> Result<Vec<PathBuf>> {
            Ok(Vec::new())
        }

        fn render_ws(&self, _request: &PlotRequest) -> Result<Vec<PathBuf>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_default_gateway_supports_every_format() {
        let gateway = NullGateway;
        assert!(gateway.prepare().is_ok());
        for format in [PlotFormat::Png, PlotFormat::Jpeg, PlotFormat::Svg, PlotFormat::Pdf] {
            assert!(gateway.supports(format));
        }
    }

    #[test]
    fn test_artifact_path_keeps_dots_in_identifier() {
        let stem = Path::new("out").join("e.coli");
        assert_eq!(
            PlotRequest::artifact_path(&stem, PlotFormat::Svg),
            Path::new("out").join("e.coli.svg")
        );
    }
}
