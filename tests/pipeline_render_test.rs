// tests/pipeline_render_test.rs

use std::fs;
use std::path::PathBuf;

use plotters::style::IntoFont;

use owl_wing_render::data_analysis::aero_summary::AeroSummary;
use owl_wing_render::data_input::cfd_data::load_cfd_data;
use owl_wing_render::data_output::csv_export::export_record_csv;
use owl_wing_render::font_config::FONT_TUPLE_AXIS_LABEL;
use owl_wing_render::pipeline::{expected_outputs, run_pipeline};
use owl_wing_render::plot_context::PlotContext;

fn scratch_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("owl_wing_{name}_{}", std::process::id()))
}

/// Text rendering needs a system font; headless machines may have none.
fn font_resolves() -> bool {
    FONT_TUPLE_AXIS_LABEL.into_font().box_size("Ag").is_ok()
}

#[test]
fn test_csv_export_into_nested_output_dir() {
    let dir = scratch_dir("csv").join("nested");
    let ctx = PlotContext::new(&dir, "Test", true);
    ctx.ensure_output_dir().unwrap();

    let path = export_record_csv(&load_cfd_data(), &ctx.file_path("coefficients", "csv")).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 8);
    assert!(content.starts_with("aoa (deg),cl_bionic"));

    fs::remove_dir_all(scratch_dir("csv")).ok();
}

#[test]
fn test_pipeline_writes_every_figure() {
    if !font_resolves() {
        eprintln!("  Skipping render test: no font resolves for '{}'.", FONT_TUPLE_AXIS_LABEL.0);
        return;
    }
    let dir = scratch_dir("render");
    let record = load_cfd_data();
    let summary = AeroSummary::from_record(&record).unwrap();
    let ctx = PlotContext::new(&dir, "OwlWing", true);

    let written = run_pipeline(&record, &summary, &ctx).unwrap();
    assert_eq!(written, expected_outputs(&record, &ctx));
    for path in &written {
        let size = fs::metadata(path).unwrap().len();
        assert!(size > 0, "'{}' is empty", path.display());
    }

    fs::remove_dir_all(&dir).ok();
}
