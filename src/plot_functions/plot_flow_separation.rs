// src/plot_functions/plot_flow_separation.rs

use std::error::Error;
use std::path::PathBuf;

use crate::constants::{
    COLOR_AIRFOIL_OUTLINE, COLOR_SEPARATION_PRESSURE, COLOR_SEPARATION_SUCTION,
    FILL_OPACITY_SEPARATION, LINE_WIDTH_PLOT, SEPARATION_BAND_HALF_HEIGHT_DEG,
};
use crate::data_analysis::aero_summary::suction_separation_onset;
use crate::data_input::cfd_data::{SeparationRegion, SimulationRecord};
use crate::plot_context::PlotContext;
use crate::plot_framework::{
    calculate_range, draw_panel_grid, LegendPosition, Panel, PlotConfig, PlotPolygon, PlotSeries,
};
use plotters::style::RGBColor;

/// One horizontal band per observed region, spanning separation to reattachment
/// at the height of its angle of attack. Angles without separation produce nothing.
pub fn separation_bands(
    angles: &[f64],
    regions: &[Option<SeparationRegion>],
    color: RGBColor,
    label: &str,
) -> Vec<PlotPolygon> {
    angles
        .iter()
        .zip(regions.iter())
        .filter_map(|(&angle, region)| region.map(|r| (angle, r)))
        .enumerate()
        .map(|(band_idx, (angle, r))| PlotPolygon {
            points: vec![
                (r.start, angle - SEPARATION_BAND_HALF_HEIGHT_DEG),
                (r.end, angle - SEPARATION_BAND_HALF_HEIGHT_DEG),
                (r.end, angle + SEPARATION_BAND_HALF_HEIGHT_DEG),
                (r.start, angle + SEPARATION_BAND_HALF_HEIGHT_DEG),
            ],
            color,
            opacity: FILL_OPACITY_SEPARATION,
            // One legend entry per panel
            label: if band_idx == 0 { label.to_string() } else { String::new() },
        })
        .collect()
}

fn angle_range(record: &SimulationRecord) -> (f64, f64) {
    let first = record.angles.first().copied().unwrap_or(0.0);
    let last = record.angles.last().copied().unwrap_or(first);
    (
        first - 2.0 * SEPARATION_BAND_HALF_HEIGHT_DEG,
        last + 2.0 * SEPARATION_BAND_HALF_HEIGHT_DEG,
    )
}

/// Separation onset x/c against AOA, attached angles skipped.
pub fn onset_trace(record: &SimulationRecord) -> Vec<(f64, f64)> {
    suction_separation_onset(record)
        .into_iter()
        .filter_map(|(angle, onset)| onset.map(|x| (x, angle)))
        .collect()
}

pub fn build_flow_separation_panels(record: &SimulationRecord) -> Vec<Panel> {
    let angles = record.angles.to_vec();
    let (aoa_lo, aoa_hi) = angle_range(record);

    let mut suction = PlotConfig::new(
        "Suction Side (Upper Surface) Separation",
        -0.02..1.02,
        aoa_lo..aoa_hi,
        "Separation Region (x/c)",
        "Angle of Attack (deg)",
    );
    suction.polygons = separation_bands(
        &angles,
        &record.separation_suction,
        *COLOR_SEPARATION_SUCTION,
        "Separated flow",
    );
    suction.series.push(PlotSeries::line_with_markers(
        onset_trace(record),
        "Separation onset",
        COLOR_AIRFOIL_OUTLINE,
        LINE_WIDTH_PLOT,
    ));
    suction.legend_position = LegendPosition::UpperLeft;

    let mut pressure = PlotConfig::new(
        "Pressure Side (Lower Surface) Separation",
        -0.02..1.02,
        aoa_lo..aoa_hi,
        "Separation Region (x/c)",
        "Angle of Attack (deg)",
    );
    pressure.polygons = separation_bands(
        &angles,
        &record.separation_pressure,
        *COLOR_SEPARATION_PRESSURE,
        "Laminar separation bubble",
    );
    pressure.legend_position = LegendPosition::UpperRight;

    vec![Panel::Chart(suction), Panel::Chart(pressure)]
}

/// Onset-only variant used by the combined figure.
pub fn build_onset_panel(record: &SimulationRecord) -> PlotConfig {
    let trace = onset_trace(record);
    let (aoa_lo, aoa_hi) = calculate_range(
        record.angles.first().copied().unwrap_or(0.0),
        record.angles.last().copied().unwrap_or(0.0),
    );
    let mut config = PlotConfig::new(
        "Suction-Side Separation Onset",
        aoa_lo..aoa_hi,
        -0.05..1.05,
        "Angle of Attack (deg)",
        "Separation onset (x/c)",
    );
    config.series.push(PlotSeries::line_with_markers(
        trace.into_iter().map(|(x, angle)| (angle, x)).collect(),
        "Bionic airfoil",
        *COLOR_SEPARATION_SUCTION,
        LINE_WIDTH_PLOT,
    ));
    config.legend_position = LegendPosition::LowerLeft;
    config
}

/// Renders separation bands for both surfaces.
pub fn plot_flow_separation(record: &SimulationRecord, ctx: &PlotContext) -> Result<PathBuf, Box<dyn Error>> {
    let output_path = ctx.figure_path("FlowSeparation");
    let panels = build_flow_separation_panels(record);
    draw_panel_grid(&output_path, "Flow Separation Regions vs Angle of Attack", (1, 2), &panels)?;
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::cfd_data::load_cfd_data;

    #[test]
    fn test_band_per_observed_region() {
        let record = load_cfd_data();
        let panels = build_flow_separation_panels(&record);
        let (Panel::Chart(suction), Panel::Chart(pressure)) = (&panels[0], &panels[1]) else {
            panic!("expected cartesian panels");
        };
        assert_eq!(suction.polygons.len(), 7);
        assert_eq!(pressure.polygons.len(), 2);
        // Only the first band carries a legend label
        assert_eq!(pressure.polygons.iter().filter(|p| !p.label.is_empty()).count(), 1);
    }

    #[test]
    fn test_band_geometry() {
        let bands = separation_bands(
            &[1.5],
            &[Some(SeparationRegion::new(0.21, 0.58))],
            *COLOR_SEPARATION_PRESSURE,
            "bubble",
        );
        let points = &bands[0].points;
        assert_eq!(points[0], (0.21, 1.0));
        assert_eq!(points[2], (0.58, 2.0));
    }

    #[test]
    fn test_onset_trace_moves_forward_with_angle() {
        let trace = onset_trace(&load_cfd_data());
        assert_eq!(trace.len(), 7);
        assert_eq!(trace[6], (0.0, 9.0));
        assert!(trace[6].0 < trace[2].0);
    }
}
