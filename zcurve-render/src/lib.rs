/*!
# Z-curve Plot Export

CPU rendering of Z-curve coordinate series for the [`RenderGateway`] seam.

## Architecture

Rendering is split in two steps:
1. **Scene building** ([`scene`]): a plot kind (3-D projected Z-curve or W/S
   disparity) is laid out as lines, polylines and text in canvas pixels.
2. **Export** ([`vector_export`]): the scene is written as SVG, PNG/JPEG
   (through `image`) or PDF (through `printpdf`, behind the `printpdf` feature).

Scenes carry no timestamps unless the footer is enabled, so identical input
renders to identical bytes.

[`RenderGateway`]: zcurve_core::RenderGateway
*/

pub mod projection;
pub mod scene;
pub mod vector_export;

pub use projection::Projection;
pub use scene::{Mark, Scene, TextAnchor};
pub use vector_export::{ExportConfig, PlotExporter, PDF_DISABLED};

/// Pixel rectangle that plot content is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl PlotArea {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Maps world coordinates onto a [`PlotArea`], larger y values drawn higher.
#[derive(Debug, Clone, Copy)]
pub struct Canvas {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub area: PlotArea,
}

impl Canvas {
    /// Independent scaling of both axes. Degenerate ranges are widened so
    /// every point still lands inside the area.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64, area: PlotArea) -> Self {
        let (x_min, x_max) = widen(x_min, x_max);
        let (y_min, y_max) = widen(y_min, y_max);
        Self { x_min, x_max, y_min, y_max, area }
    }

    /// Same scale on both axes, content centred in the area.
    pub fn fit_uniform(x_min: f64, x_max: f64, y_min: f64, y_max: f64, area: PlotArea) -> Self {
        let (x_min, x_max) = widen(x_min, x_max);
        let (y_min, y_max) = widen(y_min, y_max);
        let (dx, dy) = (x_max - x_min, y_max - y_min);
        let scale = (area.width() as f64 / dx).min(area.height() as f64 / dy);
        let half_w = area.width() as f64 / scale / 2.0;
        let half_h = area.height() as f64 / scale / 2.0;
        let (cx, cy) = ((x_min + x_max) / 2.0, (y_min + y_max) / 2.0);
        Self {
            x_min: cx - half_w,
            x_max: cx + half_w,
            y_min: cy - half_h,
            y_max: cy + half_h,
            area,
        }
    }

    pub fn world_to_pixel(&self, world_x: f64, world_y: f64) -> (f32, f32) {
        let nx = (world_x - self.x_min) / (self.x_max - self.x_min);
        let ny = (world_y - self.y_min) / (self.y_max - self.y_min);
        let px = self.area.left + nx as f32 * self.area.width();
        // Invert Y so that larger values are higher on the canvas
        let py = self.area.bottom - ny as f32 * self.area.height();
        (px, py)
    }
}

fn widen(min: f64, max: f64) -> (f64, f64) {
    if max > min {
        (min, max)
    } else {
        let pad = if min.abs() > 0.0 { min.abs() * 0.05 } else { 0.5 };
        (min - pad, max + pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: PlotArea = PlotArea { left: 10.0, right: 110.0, top: 0.0, bottom: 50.0 };

    #[test]
    fn test_world_to_pixel_corners() {
        let canvas = Canvas::new(0.0, 1.0, 0.0, 1.0, AREA);
        assert_eq!(canvas.world_to_pixel(0.0, 0.0), (10.0, 50.0));
        assert_eq!(canvas.world_to_pixel(1.0, 1.0), (110.0, 0.0));
    }

    #[test]
    fn test_degenerate_range_is_widened() {
        let canvas = Canvas::new(3.0, 3.0, 0.0, 0.0, AREA);
        let (px, py) = canvas.world_to_pixel(3.0, 0.0);
        assert!((px - 60.0).abs() < 1e-3);
        assert!((py - 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_uniform_fit_keeps_aspect() {
        let canvas = Canvas::fit_uniform(0.0, 1.0, 0.0, 1.0, AREA);
        let (x0, y0) = canvas.world_to_pixel(0.0, 0.0);
        let (x1, y1) = canvas.world_to_pixel(1.0, 1.0);
        assert!(((x1 - x0) - (y0 - y1)).abs() < 1e-3);
        assert!((y0 - y1 - 50.0).abs() < 1e-3);
    }
}
