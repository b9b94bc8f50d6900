//! Plot layout: turns a [`PlotRequest`] into drawing primitives in pixels

use zcurve_core::PlotRequest;

use crate::projection::{Projection, UnitBox};
use crate::vector_export::ExportConfig;
use crate::{Canvas, PlotArea};

/// Number of colour bands the Z-curve gradient is split into
const GRADIENT_BANDS: usize = 64;

pub type Rgb = [u8; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_svg(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Rgb,
        width: f32,
    },
    Polyline {
        points: Vec<(f32, f32)>,
        color: Rgb,
        width: f32,
    },
    Text {
        at: (f32, f32),
        text: String,
        size: u32,
        anchor: TextAnchor,
        /// Rotated 90 degrees counter-clockwise (vertical axis labels)
        vertical: bool,
        color: Rgb,
    },
}

/// A laid-out plot, ready for any export backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: Rgb,
    pub font_family: String,
    pub marks: Vec<Mark>,
    pub comments: Vec<String>,
}

impl Scene {
    fn new(config: &ExportConfig) -> Self {
        let mut comments = Vec::new();
        if let Some(comment) = &config.provenance_comment {
            comments.push(comment.clone());
        }
        Self {
            width: config.width,
            height: config.height,
            background: parse_hex_rgb(&config.background_color).unwrap_or([255, 255, 255]),
            font_family: config.font_family.clone(),
            marks: Vec::new(),
            comments,
        }
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgb, width: f32) {
        self.marks.push(Mark::Line { from, to, color, width });
    }

    fn text(&mut self, at: (f32, f32), text: impl Into<String>, size: u32, anchor: TextAnchor, color: Rgb) {
        self.marks.push(Mark::Text { at, text: text.into(), size, anchor, vertical: false, color });
    }

    fn add_title(&mut self, title: &str, config: &ExportConfig) {
        let y = config.font_size as f32 + 12.0;
        let color = parse_hex_rgb(&config.axis_color).unwrap_or([0, 0, 0]);
        self.text((self.width as f32 / 2.0, y), title, config.font_size.saturating_add(4), TextAnchor::Middle, color);
    }

    fn add_footer(&mut self, request: &PlotRequest, config: &ExportConfig) {
        let text = format!(
            "zcurve v{} | {} | {} positions | Generated: {}",
            env!("CARGO_PKG_VERSION"),
            request.identifier,
            request.coordinates.len(),
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        );
        let size = config.font_size.saturating_sub(2).max(6);
        self.text((10.0, self.height as f32 - 8.0), text, size, TextAnchor::Start, [128, 128, 128]);
    }
}

/// Layout of the projected 3-D Z-curve: data box, axes, gradient curve.
pub fn zcurve_scene(request: &PlotRequest, config: &ExportConfig) -> Scene {
    let mut scene = Scene::new(config);
    scene.add_title(&request.title, config);

    let coords = &request.coordinates;
    let axis_color = parse_hex_rgb(&config.axis_color).unwrap_or([0, 0, 0]);
    let grid_color = parse_hex_rgb(&config.grid_color).unwrap_or([204, 204, 204]);

    if let Some(bounds) = coords.bounds() {
        let unit = UnitBox::new(bounds);
        let projection = Projection::new(config.theta, config.phi);

        // Fit on the cube corners so the frame does not depend on the curve
        let corners: Vec<(f64, f64)> = UnitBox::corners().iter().map(|c| projection.project(*c)).collect();
        let (mut u_min, mut u_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut v_min, mut v_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for &(u, v) in &corners {
            u_min = u_min.min(u);
            u_max = u_max.max(u);
            v_min = v_min.min(v);
            v_max = v_max.max(v);
        }
        let area = PlotArea {
            left: 60.0,
            right: scene.width as f32 - 60.0,
            top: config.font_size as f32 + 40.0,
            bottom: scene.height as f32 - 40.0,
        };
        let canvas = Canvas::fit_uniform(u_min, u_max, v_min, v_max, area);
        let to_px = |p: (f64, f64)| canvas.world_to_pixel(p.0, p.1);

        if config.show_grid {
            for (a, b) in UnitBox::edges() {
                scene.line(to_px(corners[a]), to_px(corners[b]), grid_color, 1.0);
            }
        }

        if config.show_axes {
            // Axes start at the corner holding every minimum
            let origin = to_px(corners[0]);
            for (bit, label) in [(1usize, "X"), (2, "Y"), (4, "Z")] {
                let end = to_px(corners[bit]);
                scene.line(origin, end, axis_color, 1.5);
                let (dx, dy) = (end.0 - origin.0, end.1 - origin.1);
                let len = (dx * dx + dy * dy).sqrt().max(1.0);
                let at = (end.0 + dx / len * 14.0, end.1 + dy / len * 14.0 + 4.0);
                scene.text(at, label, config.font_size, TextAnchor::Middle, axis_color);
            }
        }

        let start = parse_hex_rgb(&config.curve_start_color).unwrap_or([42, 111, 239]);
        let end = parse_hex_rgb(&config.curve_end_color).unwrap_or([229, 57, 53]);
        let points: Vec<(f32, f32)> = coords
            .sample_indices(config.max_points)
            .into_iter()
            .filter_map(|i| coords.point(i))
            .map(|p| to_px(projection.project(unit.normalize(p))))
            .collect();
        push_gradient_polyline(&mut scene, &points, start, end, config.line_width);
    }

    if config.show_footer {
        scene.add_footer(request, config);
    }
    scene
}

/// Layout of the W/S disparity plot: Z coordinate against 1-based position.
pub fn ws_scene(request: &PlotRequest, config: &ExportConfig) -> Scene {
    let mut scene = Scene::new(config);
    scene.add_title(&format!("{} W/S disparity", request.title), config);

    let coords = &request.coordinates;
    let axis_color = parse_hex_rgb(&config.axis_color).unwrap_or([0, 0, 0]);
    let grid_color = parse_hex_rgb(&config.grid_color).unwrap_or([204, 204, 204]);
    let curve_color = parse_hex_rgb(&config.curve_start_color).unwrap_or([42, 111, 239]);

    let area = PlotArea {
        left: 80.0,
        right: scene.width as f32 - 30.0,
        top: config.font_size as f32 + 40.0,
        bottom: scene.height as f32 - 60.0,
    };

    let n = coords.len();
    let (z_min, z_max) = coords
        .z
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &z| (lo.min(z), hi.max(z)));
    let (z_min, z_max) = if n == 0 { (-1.0, 1.0) } else { (z_min, z_max) };
    let canvas = Canvas::new(1.0, n.max(1) as f64, z_min, z_max, area);

    if config.show_axes {
        scene.line((area.left, area.bottom), (area.right, area.bottom), axis_color, 1.0);
        scene.line((area.left, area.top), (area.left, area.bottom), axis_color, 1.0);
        let label_size = config.font_size.saturating_sub(2).max(6);

        for w in nice_ticks_world(canvas.x_min, canvas.x_max, 6) {
            let (x, _) = canvas.world_to_pixel(w, canvas.y_min);
            scene.line((x, area.bottom), (x, area.bottom + 5.0), axis_color, 1.0);
            if config.show_grid {
                scene.line((x, area.top), (x, area.bottom), grid_color, 1.0);
            }
            scene.text((x, area.bottom + 18.0), format_bp(w), label_size, TextAnchor::Middle, axis_color);
        }

        let y_ticks = nice_ticks_world(canvas.y_min, canvas.y_max, 6);
        let decimals = tick_decimals(&y_ticks);
        for w in y_ticks {
            let (_, y) = canvas.world_to_pixel(canvas.x_min, w);
            scene.line((area.left - 5.0, y), (area.left, y), axis_color, 1.0);
            if config.show_grid {
                scene.line((area.left, y), (area.right, y), grid_color, 1.0);
            }
            scene.text((area.left - 8.0, y + 4.0), format!("{:.*}", decimals, w), label_size, TextAnchor::End, axis_color);
        }

        scene.text(
            ((area.left + area.right) / 2.0, scene.height as f32 - 24.0),
            "Position (bp)",
            config.font_size,
            TextAnchor::Middle,
            axis_color,
        );
        scene.marks.push(Mark::Text {
            at: (20.0, (area.top + area.bottom) / 2.0),
            text: "W/S disparity (Z)".to_string(),
            size: config.font_size,
            anchor: TextAnchor::Middle,
            vertical: true,
            color: axis_color,
        });
    }

    let points: Vec<(f32, f32)> = coords
        .sample_indices(config.max_points)
        .into_iter()
        .map(|i| canvas.world_to_pixel(i as f64 + 1.0, coords.z[i]))
        .collect();
    if !points.is_empty() {
        scene.marks.push(Mark::Polyline { points, color: curve_color, width: config.line_width });
    }

    if config.show_footer {
        scene.add_footer(request, config);
    }
    scene
}

/// Splits `points` into consecutive bands sharing their boundary point, each
/// coloured along the start-to-end gradient.
fn push_gradient_polyline(scene: &mut Scene, points: &[(f32, f32)], start: Rgb, end: Rgb, width: f32) {
    if points.is_empty() {
        return;
    }
    if points.len() == 1 {
        scene.marks.push(Mark::Polyline { points: points.to_vec(), color: start, width });
        return;
    }
    let bands = GRADIENT_BANDS.min(points.len() - 1);
    let segments = points.len() - 1;
    for band in 0..bands {
        let from = band * segments / bands;
        let to = (band + 1) * segments / bands;
        let t = if bands > 1 { band as f32 / (bands - 1) as f32 } else { 0.0 };
        scene.marks.push(Mark::Polyline {
            points: points[from..=to].to_vec(),
            color: lerp_rgb(start, end, t),
            width,
        });
    }
}

fn lerp_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
}

/// Parse a hex colour like "#RRGGBB"
pub fn parse_hex_rgb(s: &str) -> Option<Rgb> {
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some([r, g, b])
}

// Format a basepair position in human-friendly units
fn format_bp(bp: f64) -> String {
    if bp >= 1e9 { format!("{:.2} Gb", bp / 1e9) }
    else if bp >= 1e6 { format!("{:.2} Mb", bp / 1e6) }
    else if bp >= 1e3 { format!("{:.2} kb", bp / 1e3) }
    else { format!("{:.0}", bp) }
}

// Round a length to a "nice" number: 1, 2, 5 or 10 × 10^k
fn nice_round_length(x: f64) -> f64 {
    if x <= 0.0 { return 1.0; }
    let exp = x.log10().floor();
    let base = 10f64.powf(exp);
    let mant = x / base;
    let nice = if mant <= 1.0 { 1.0 } else if mant <= 2.0 { 2.0 } else if mant <= 5.0 { 5.0 } else { 10.0 };
    nice * base
}

// Tick positions at multiples of a nice step inside [min_world, max_world]
fn nice_ticks_world(min_world: f64, max_world: f64, desired: usize) -> Vec<f64> {
    let span = max_world - min_world;
    if !(span > 0.0) || desired == 0 {
        return vec![min_world];
    }
    let step = nice_round_length(span / desired as f64);
    let first = (min_world / step).ceil() as i64;
    let last = (max_world / step + 1e-9).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

fn tick_decimals(ticks: &[f64]) -> usize {
    match ticks {
        [a, b, ..] => {
            let step = (b - a).abs();
            if step >= 1.0 { 0 } else { (-step.log10().floor()) as usize }
        }
        _ => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zcurve_core::{zcurve_coordinates, PlotFormat, Sequence, TransformMatrix};

    fn request(text: &str) -> PlotRequest {
        let seq = Sequence::parse(text).unwrap();
        let coords = zcurve_coordinates(&seq, &TransformMatrix::zcurve());
        PlotRequest::new("demo", ".", vec![PlotFormat::Svg], coords)
    }

    fn quiet_config() -> ExportConfig {
        ExportConfig { show_footer: false, ..Default::default() }
    }

    #[test]
    fn test_parse_hex_rgb() {
        assert_eq!(parse_hex_rgb("#2a6fef"), Some([42, 111, 239]));
        assert_eq!(parse_hex_rgb("ffffff"), Some([255, 255, 255]));
        assert_eq!(parse_hex_rgb("#fff"), None);
        assert_eq!(parse_hex_rgb("#gggggg"), None);
    }

    #[test]
    fn test_title_size_saturates() {
        let config = ExportConfig { font_size: u32::MAX, ..quiet_config() };
        let scene = zcurve_scene(&request("acgt"), &config);
        let sizes: Vec<u32> = scene
            .marks
            .iter()
            .filter_map(|m| match m {
                Mark::Text { text, size, .. } if text == "demo" => Some(*size),
                _ => None,
            })
            .collect();
        assert_eq!(sizes, vec![u32::MAX]);
    }

    #[test]
    fn test_nice_ticks() {
        assert_eq!(nice_ticks_world(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        let small = nice_ticks_world(-0.4, 0.4, 4);
        assert_eq!(small.len(), 5);
        assert!(small.iter().all(|t| (-0.4..=0.4 + 1e-9).contains(t)));
        assert_eq!(nice_ticks_world(3.0, 3.0, 5), vec![3.0]);
    }

    #[test]
    fn test_gradient_bands_cover_curve() {
        let req = request("atgcgcgatatatcgcgcgggccaattagcatcgatcgatcagctagcatcgactacgactacgactacgatcagcatcgac");
        let scene = zcurve_scene(&req, &quiet_config());
        let polylines: Vec<&Vec<(f32, f32)>> = scene
            .marks
            .iter()
            .filter_map(|m| match m {
                Mark::Polyline { points, .. } => Some(points),
                _ => None,
            })
            .collect();
        let segments: usize = polylines.iter().map(|p| p.len() - 1).sum();
        assert_eq!(segments, req.coordinates.len() - 1);
        assert!(polylines.len() <= GRADIENT_BANDS);
    }

    #[test]
    fn test_zcurve_scene_stays_inside_canvas() {
        let req = request("aaaaccccggggttttacgtacgt");
        let scene = zcurve_scene(&req, &quiet_config());
        for mark in &scene.marks {
            if let Mark::Polyline { points, .. } = mark {
                for &(x, y) in points {
                    assert!(x >= 0.0 && x <= scene.width as f32);
                    assert!(y >= 0.0 && y <= scene.height as f32);
                }
            }
        }
    }

    #[test]
    fn test_ws_scene_labels() {
        let scene = ws_scene(&request("acgtacgtgg"), &quiet_config());
        let texts: Vec<&str> = scene
            .marks
            .iter()
            .filter_map(|m| match m {
                Mark::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"demo W/S disparity"));
        assert!(texts.contains(&"Position (bp)"));
        assert!(texts.contains(&"W/S disparity (Z)"));
    }

    #[test]
    fn test_empty_series_has_only_frame() {
        let req = PlotRequest::new("empty", ".", vec![PlotFormat::Svg], Default::default());
        let scene = zcurve_scene(&req, &quiet_config());
        assert!(scene.marks.iter().all(|m| !matches!(m, Mark::Polyline { .. })));
    }
}
