/*!
# Plot Export

Writes laid-out [`Scene`]s as SVG, PNG/JPEG or PDF, and implements the
[`RenderGateway`] seam on top of that.
*/

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use zcurve_core::{validate_definitions_path, PlotFormat, PlotRequest, RenderGateway, ZcurveError};

use crate::scene::{self, parse_hex_rgb, Mark, Scene};

/// Error text for PDF requests in builds without the `printpdf` feature
pub const PDF_DISABLED: &str = "PDF export not enabled (compile with 'printpdf' feature)";

/// Largest accepted canvas edge, pixels
pub const MAX_CANVAS_EDGE: u32 = 16_384;
/// Largest accepted stroke width, pixels
pub const MAX_LINE_WIDTH: f32 = 64.0;
/// Accepted base font sizes, points
pub const FONT_SIZE_RANGE: std::ops::RangeInclusive<u32> = 4..=256;

/// Export configuration, also the schema of the rendering style file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub width: u32,
    pub height: u32,
    pub show_axes: bool,
    pub show_grid: bool,
    pub show_footer: bool,
    pub background_color: String,
    pub curve_start_color: String,
    pub curve_end_color: String,
    pub axis_color: String,
    pub grid_color: String,
    pub font_family: String,
    pub font_size: u32,
    pub line_width: f32,
    /// Upper bound on drawn points per curve; longer series are thinned.
    pub max_points: usize,
    /// View rotation around the Z axis, degrees
    pub theta: f64,
    /// View elevation, degrees
    pub phi: f64,
    pub provenance_comment: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 900,
            show_axes: true,
            show_grid: true,
            show_footer: true,
            background_color: "#ffffff".to_string(),
            curve_start_color: "#2a6fef".to_string(),
            curve_end_color: "#e53935".to_string(),
            axis_color: "#000000".to_string(),
            grid_color: "#cccccc".to_string(),
            font_family: "Arial, sans-serif".to_string(),
            font_size: 12,
            line_width: 1.2,
            max_points: 20_000,
            theta: 40.0,
            phi: 40.0,
            provenance_comment: None,
        }
    }
}

impl ExportConfig {
    /// Load a TOML style file. Keys left out keep their defaults.
    pub fn from_style_file<P: AsRef<Path>>(path: P) -> zcurve_core::Result<Self> {
        let path = path.as_ref();
        validate_definitions_path(path)?;
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text).map_err(|e| {
            ZcurveError::rendering(format!("invalid style file {}: {}", path.display(), e))
        })?;
        log::debug!("Loaded rendering style from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            anyhow::bail!("canvas size must be positive, got {}x{}", self.width, self.height);
        }
        if self.width > MAX_CANVAS_EDGE || self.height > MAX_CANVAS_EDGE {
            anyhow::bail!(
                "canvas size {}x{} exceeds the {} pixel limit",
                self.width,
                self.height,
                MAX_CANVAS_EDGE
            );
        }
        if self.max_points < 2 {
            anyhow::bail!("max_points must be at least 2, got {}", self.max_points);
        }
        if !(self.line_width > 0.0 && self.line_width <= MAX_LINE_WIDTH) {
            anyhow::bail!("line_width must be in (0, {}], got {}", MAX_LINE_WIDTH, self.line_width);
        }
        if !FONT_SIZE_RANGE.contains(&self.font_size) {
            anyhow::bail!(
                "font_size must be between {} and {}, got {}",
                FONT_SIZE_RANGE.start(),
                FONT_SIZE_RANGE.end(),
                self.font_size
            );
        }
        for (name, value) in [
            ("background_color", &self.background_color),
            ("curve_start_color", &self.curve_start_color),
            ("curve_end_color", &self.curve_end_color),
            ("axis_color", &self.axis_color),
            ("grid_color", &self.grid_color),
        ] {
            if parse_hex_rgb(value).is_none() {
                anyhow::bail!("{} is not a #RRGGBB colour: {:?}", name, value);
            }
        }
        Ok(())
    }
}

/// Plot exporter: scene layout plus the file backends
pub struct PlotExporter {
    config: ExportConfig,
}

impl PlotExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Write `scene` in `format`.
    pub fn export<P: AsRef<Path>>(&self, scene: &Scene, format: PlotFormat, path: P) -> Result<()> {
        let path = path.as_ref();
        match format {
            PlotFormat::Svg => self.export_svg(scene, path),
            PlotFormat::Png => self.export_raster(scene, path, image::ImageFormat::Png),
            PlotFormat::Jpeg => self.export_raster(scene, path, image::ImageFormat::Jpeg),
            PlotFormat::Pdf => self.export_pdf(scene, path),
        }
        .with_context(|| format!("failed to write {}", path.display()))
    }

    /// Export to SVG format
    pub fn export_svg<P: AsRef<Path>>(&self, scene: &Scene, path: P) -> Result<()> {
        let mut svg = SvgBuilder::new(scene);
        for mark in &scene.marks {
            svg.add_mark(mark);
        }
        svg.write_to_file(path)
    }

    /// CPU raster export. Text marks are drawn only with the `raster-text`
    /// feature; without it the image carries lines alone.
    pub fn export_raster<P: AsRef<Path>>(&self, scene: &Scene, path: P, format: image::ImageFormat) -> Result<()> {
        use image::{Rgb, RgbImage};
        let mut img = RgbImage::from_pixel(scene.width, scene.height, Rgb(scene.background));

        for mark in &scene.marks {
            match mark {
                Mark::Line { from, to, color, width } => {
                    draw_thick_line(&mut img, *from, *to, Rgb(*color), *width);
                }
                Mark::Polyline { points, color, width } => {
                    if let [only] = points.as_slice() {
                        draw_thick_line(&mut img, *only, *only, Rgb(*color), *width);
                    }
                    for pair in points.windows(2) {
                        draw_thick_line(&mut img, pair[0], pair[1], Rgb(*color), *width);
                    }
                }
                Mark::Text { .. } => {}
            }
        }
        #[cfg(feature = "raster-text")]
        draw_raster_text(&mut img, scene);

        img.save_with_format(path, format)?;
        Ok(())
    }

    /// Export to PDF format
    #[cfg(feature = "printpdf")]
    pub fn export_pdf<P: AsRef<Path>>(&self, scene: &Scene, path: P) -> Result<()> {
        let pdf = PdfBuilder::new(scene)?;
        for mark in &scene.marks {
            pdf.add_mark(mark);
        }
        pdf.write_to_file(path)
    }

    #[cfg(not(feature = "printpdf"))]
    pub fn export_pdf<P: AsRef<Path>>(&self, _scene: &Scene, _path: P) -> Result<()> {
        Err(anyhow::anyhow!(PDF_DISABLED))
    }

    fn render_all(&self, scene: &Scene, stem: &Path, formats: &[PlotFormat]) -> zcurve_core::Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(formats.len());
        for &format in formats {
            let path = PlotRequest::artifact_path(stem, format);
            self.export(scene, format, &path)
                .map_err(|e| ZcurveError::rendering(format!("{:#}", e)))?;
            log::debug!("Wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}

impl RenderGateway for PlotExporter {
    fn prepare(&self) -> zcurve_core::Result<()> {
        self.config
            .validate()
            .map_err(|e| ZcurveError::rendering(format!("invalid rendering style: {:#}", e)))?;
        #[cfg(not(feature = "printpdf"))]
        log::debug!("PDF backend not compiled in; PDF requests will be rejected");
        Ok(())
    }

    fn supports(&self, format: PlotFormat) -> bool {
        format != PlotFormat::Pdf || cfg!(feature = "printpdf")
    }

    fn render_zcurve(&self, request: &PlotRequest) -> zcurve_core::Result<Vec<PathBuf>> {
        let scene = scene::zcurve_scene(request, &self.config);
        self.render_all(&scene, &request.output_stem(), &request.formats)
    }

    fn render_ws(&self, request: &PlotRequest) -> zcurve_core::Result<Vec<PathBuf>> {
        let scene = scene::ws_scene(request, &self.config);
        self.render_all(&scene, &request.ws_stem(), &request.formats)
    }
}

/// SVG builder for vector graphics
struct SvgBuilder {
    width: u32,
    height: u32,
    font_family: String,
    elements: Vec<String>,
    top_comments: Vec<String>,
}

impl SvgBuilder {
    fn new(scene: &Scene) -> Self {
        let [r, g, b] = scene.background;
        let background = format!(
            r#"<rect width="{}" height="{}" fill="rgb({},{},{})"/>"#,
            scene.width, scene.height, r, g, b
        );
        Self {
            width: scene.width,
            height: scene.height,
            font_family: xml_escape(&scene.font_family),
            elements: vec![background],
            top_comments: scene.comments.clone(),
        }
    }

    fn add_mark(&mut self, mark: &Mark) {
        let element = match mark {
            Mark::Line { from, to, color, width } => format!(
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}"/>"#,
                from.0, from.1, to.0, to.1, svg_color(*color), width
            ),
            Mark::Polyline { points, color, width } => {
                let coords: Vec<String> = points.iter().map(|(x, y)| format!("{:.2},{:.2}", x, y)).collect();
                format!(
                    r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="round"/>"#,
                    coords.join(" "),
                    svg_color(*color),
                    width
                )
            }
            Mark::Text { at, text, size, anchor, vertical, color } => {
                let rotate = if *vertical {
                    format!(r#" transform="rotate(-90 {:.2} {:.2})""#, at.0, at.1)
                } else {
                    String::new()
                };
                format!(
                    r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{}px" text-anchor="{}" fill="{}"{}>{}</text>"#,
                    at.0,
                    at.1,
                    self.font_family,
                    size,
                    anchor.as_svg(),
                    svg_color(*color),
                    rotate,
                    xml_escape(text)
                )
            }
        };
        self.elements.push(element);
    }

    fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = BufWriter::new(File::create(path)?);

        writeln!(file, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            file,
            r#"<svg width="{}" height="{}" viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg">"#,
            self.width, self.height, self.width, self.height
        )?;
        for c in &self.top_comments {
            for line in c.lines() {
                // "--" is not allowed inside XML comments
                writeln!(file, "  <!-- {} -->", line.replace("--", "- -"))?;
            }
        }
        for element in &self.elements {
            writeln!(file, "  {}", element)?;
        }
        writeln!(file, "</svg>")?;

        file.flush()?;
        Ok(())
    }
}

/// PDF builder for vector graphics
#[cfg(feature = "printpdf")]
struct PdfBuilder {
    doc: printpdf::PdfDocumentReference,
    page: printpdf::PdfPageIndex,
    layer: printpdf::PdfLayerIndex,
    font: printpdf::IndirectFontRef,
    height: f32,
}

#[cfg(feature = "printpdf")]
const PX_TO_MM: f32 = 0.264583;

#[cfg(feature = "printpdf")]
impl PdfBuilder {
    fn new(scene: &Scene) -> Result<Self> {
        use printpdf::{BuiltinFont, Mm, PdfDocument};
        let (doc, page, layer) = PdfDocument::new(
            "Z-curve Export",
            Mm(scene.width as f32 * PX_TO_MM),
            Mm(scene.height as f32 * PX_TO_MM),
            "Layer 1",
        );
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| anyhow::anyhow!("failed to load PDF font: {:?}", e))?;
        Ok(Self { doc, page, layer, font, height: scene.height as f32 })
    }

    fn layer(&self) -> printpdf::PdfLayerReference {
        self.doc.get_page(self.page).get_layer(self.layer)
    }

    // Scene pixels have a top-left origin, PDF points a bottom-left one
    fn to_pdf(&self, p: (f32, f32)) -> printpdf::Point {
        printpdf::Point::new(printpdf::Mm(p.0 * PX_TO_MM), printpdf::Mm((self.height - p.1) * PX_TO_MM))
    }

    fn add_mark(&self, mark: &Mark) {
        use printpdf::{Color, Line, Mm, Pt, Rgb, TextMatrix};
        let layer = self.layer();
        let color = |c: [u8; 3]| Color::Rgb(Rgb::new(c[0] as f32 / 255.0, c[1] as f32 / 255.0, c[2] as f32 / 255.0, None));

        match mark {
            Mark::Line { from, to, color: c, width } => {
                layer.set_outline_color(color(*c));
                layer.set_outline_thickness(*width * PX_TO_MM * 2.835);
                layer.add_line(Line {
                    points: vec![(self.to_pdf(*from), false), (self.to_pdf(*to), false)],
                    is_closed: false,
                });
            }
            Mark::Polyline { points, color: c, width } => {
                if points.len() < 2 {
                    return;
                }
                layer.set_outline_color(color(*c));
                layer.set_outline_thickness(*width * PX_TO_MM * 2.835);
                layer.add_line(Line {
                    points: points.iter().map(|p| (self.to_pdf(*p), false)).collect(),
                    is_closed: false,
                });
            }
            Mark::Text { at, text, size, anchor, vertical, color: c } => {
                // Helvetica averages about half an em per glyph
                let advance = text.chars().count() as f32 * *size as f32 * 0.5;
                let shift = match anchor {
                    crate::TextAnchor::Start => 0.0,
                    crate::TextAnchor::Middle => advance / 2.0,
                    crate::TextAnchor::End => advance,
                };
                layer.set_fill_color(color(*c));
                let font_size = *size as f32 * PX_TO_MM * 2.835;
                if *vertical {
                    let x = Mm(at.0 * PX_TO_MM);
                    let y = Mm((self.height - at.1 - shift) * PX_TO_MM);
                    layer.begin_text_section();
                    layer.set_font(&self.font, font_size);
                    layer.set_text_matrix(TextMatrix::TranslateRotate(Pt::from(x), Pt::from(y), 90.0));
                    layer.write_text(text.as_str(), &self.font);
                    layer.end_text_section();
                } else {
                    let x = Mm((at.0 - shift) * PX_TO_MM);
                    let y = Mm((self.height - at.1) * PX_TO_MM);
                    layer.use_text(text.as_str(), font_size, x, y, &self.font);
                }
            }
        }
    }

    fn write_to_file<P: AsRef<Path>>(self, path: P) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.doc
            .save(&mut out)
            .map_err(|e| anyhow::anyhow!("failed to save PDF: {:?}", e))?;
        Ok(())
    }
}

/// Text marks through the plotters bitmap backend. Missing system fonts are
/// logged and leave the lines untouched.
#[cfg(feature = "raster-text")]
fn draw_raster_text(img: &mut image::RgbImage, scene: &Scene) {
    use plotters::prelude::*;

    let (width, height) = img.dimensions();
    let root = BitMapBackend::with_buffer(&mut **img, (width, height)).into_drawing_area();
    for mark in &scene.marks {
        let Mark::Text { at, text, size, anchor, vertical, color } = mark else {
            continue;
        };
        let mut style = (FontFamily::SansSerif, f64::from(*size))
            .into_font()
            .color(&RGBColor(color[0], color[1], color[2]))
            .pos(text_pos(*anchor));
        if *vertical {
            style = style.transform(FontTransform::Rotate270);
        }
        let pos = (at.0.round() as i32, at.1.round() as i32);
        if let Err(e) = root.draw_text(text, &style, pos) {
            log::warn!("Skipping raster text {:?}: {}", text, e);
        }
    }
    if let Err(e) = root.present() {
        log::warn!("Raster text not flushed: {}", e);
    }
}

/// SVG-style anchoring: `at` is the baseline point.
#[cfg(feature = "raster-text")]
fn text_pos(anchor: crate::TextAnchor) -> plotters::style::text_anchor::Pos {
    use plotters::style::text_anchor::{HPos, Pos, VPos};
    let h = match anchor {
        crate::TextAnchor::Start => HPos::Left,
        crate::TextAnchor::Middle => HPos::Center,
        crate::TextAnchor::End => HPos::Right,
    };
    Pos::new(h, VPos::Bottom)
}

fn draw_thick_line(img: &mut image::RgbImage, from: (f32, f32), to: (f32, f32), color: image::Rgb<u8>, width: f32) {
    let (x0, y0) = (from.0.round() as i32, from.1.round() as i32);
    let (x1, y1) = (to.0.round() as i32, to.1.round() as i32);
    let radius = ((width - 1.0) / 2.0).round().max(0.0) as i32;
    for oy in -radius..=radius {
        for ox in -radius..=radius {
            draw_line(img, x0 + ox, y0 + oy, x1 + ox, y1 + oy, color);
        }
    }
}

fn draw_line(img: &mut image::RgbImage, x0: i32, y0: i32, x1: i32, y1: i32, color: image::Rgb<u8>) {
    // Bresenham line drawing
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        if x0 >= 0 && y0 >= 0 && (x0 as u32) < img.width() && (y0 as u32) < img.height() {
            img.put_pixel(x0 as u32, y0 as u32, color);
        }
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

fn svg_color(c: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", c[0], c[1], c[2])
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
