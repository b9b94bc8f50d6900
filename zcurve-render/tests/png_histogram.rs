use zcurve_core::{zcurve_coordinates, PlotFormat, PlotRequest, Sequence, TransformMatrix};
use zcurve_render::scene::zcurve_scene;
use zcurve_render::vector_export::{ExportConfig, PlotExporter};

fn dense_request() -> PlotRequest {
    // Long enough to exercise point thinning
    let text: String = (0..5000).map(|i| ['a', 'c', 'g', 't', 'g', 'c'][(i * 7 + i / 13) % 6]).collect();
    let seq = Sequence::parse(&text).unwrap();
    let coords = zcurve_coordinates(&seq, &TransformMatrix::zcurve());
    PlotRequest::new("dense", ".", vec![PlotFormat::Png], coords)
}

fn histogram(png_bytes: &[u8]) -> [u32; 256] {
    let img = image::load_from_memory(png_bytes).unwrap().to_luma8();
    let mut hist = [0u32; 256];
    for p in img.pixels() {
        hist[p[0] as usize] += 1;
    }
    hist
}

#[test]
fn png_histogram_is_stable() {
    let cfg = ExportConfig {
        width: 640,
        height: 480,
        show_footer: false,
        max_points: 1000,
        ..Default::default()
    };
    let exporter = PlotExporter::new(cfg.clone());
    let scene = zcurve_scene(&dense_request(), &cfg);

    let dir = tempfile::tempdir().unwrap();
    let f1 = dir.path().join("d1.png");
    let f2 = dir.path().join("d2.png");

    exporter.export_raster(&scene, &f1, image::ImageFormat::Png).unwrap();
    exporter.export_raster(&scene, &f2, image::ImageFormat::Png).unwrap();
    let h1 = histogram(&std::fs::read(&f1).unwrap());
    let h2 = histogram(&std::fs::read(&f2).unwrap());
    assert_eq!(h1, h2, "Histogram differs between identical renders");

    // Something besides the white background was drawn
    let total: u32 = h1.iter().sum();
    assert_eq!(total, 640 * 480);
    assert!(h1[255] < total);
}

#[test]
fn png_has_configured_size() {
    let cfg = ExportConfig { width: 320, height: 200, show_footer: false, ..Default::default() };
    let exporter = PlotExporter::new(cfg.clone());
    let scene = zcurve_scene(&dense_request(), &cfg);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.jpg");
    exporter.export_raster(&scene, &path, image::ImageFormat::Jpeg).unwrap();

    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (320, 200));
}
