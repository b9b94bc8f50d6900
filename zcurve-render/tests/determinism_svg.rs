use zcurve_core::{zcurve_coordinates, PlotFormat, PlotRequest, Sequence, TransformMatrix};
use zcurve_render::scene::{ws_scene, zcurve_scene};
use zcurve_render::vector_export::{ExportConfig, PlotExporter};

fn demo_request() -> PlotRequest {
    let seq = Sequence::parse("AGTTGTTGATCTGTGTGAGTCAGACTGCGACAGTTCGAGTTTGAAGCGAAAGC").unwrap();
    let coords = zcurve_coordinates(&seq, &TransformMatrix::zcurve());
    let mut request = PlotRequest::new("zika", ".", vec![PlotFormat::Svg], coords);
    request.title = "Determinism <Test>".into();
    request
}

#[test]
fn svg_export_is_deterministic() {
    let cfg = ExportConfig {
        width: 800,
        height: 600,
        show_footer: false, // disable dynamic timestamp
        ..Default::default()
    };
    let exporter = PlotExporter::new(cfg.clone());
    let request = demo_request();

    let dir = tempfile::tempdir().unwrap();
    let f1 = dir.path().join("a.svg");
    let f2 = dir.path().join("b.svg");

    exporter.export_svg(&zcurve_scene(&request, &cfg), &f1).unwrap();
    exporter.export_svg(&zcurve_scene(&request, &cfg), &f2).unwrap();

    let b1 = std::fs::read(&f1).unwrap();
    let b2 = std::fs::read(&f2).unwrap();
    assert_eq!(b1, b2, "SVG bytes differ between identical renders");
}

#[test]
fn svg_contains_escaped_title_and_comment() {
    let cfg = ExportConfig {
        show_footer: false,
        provenance_comment: Some("zcurve test run".into()),
        ..Default::default()
    };
    let exporter = PlotExporter::new(cfg.clone());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ws.svg");
    exporter.export_svg(&ws_scene(&demo_request(), &cfg), &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("<?xml"));
    assert!(text.contains("<!-- zcurve test run -->"));
    assert!(text.contains("Determinism &lt;Test&gt; W/S disparity"));
    assert!(text.contains("<polyline"));
    assert!(text.trim_end().ends_with("</svg>"));
}
