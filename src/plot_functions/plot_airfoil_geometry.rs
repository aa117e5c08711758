// src/plot_functions/plot_airfoil_geometry.rs

use std::error::Error;
use std::path::PathBuf;

use ndarray_stats::QuantileExt;

use crate::constants::{
    COLOR_AIRFOIL_OUTLINE, COLOR_BIONIC, COLOR_CAMBER_LINE, COLOR_CHORD_LINE, COLOR_THICKNESS,
    FILL_OPACITY_PROFILE, LINE_WIDTH_PLOT, LINE_WIDTH_THIN, SPLINE_RESAMPLE_POINTS,
};
use crate::data_analysis::interpolation::CubicSpline;
use crate::data_input::cfd_data::SimulationRecord;
use crate::plot_context::PlotContext;
use crate::plot_framework::{
    calculate_range, draw_panel_grid, series_y_bounds, Annotation, LegendPosition, Panel,
    PlotConfig, PlotPolygon, PlotSeries,
};

/// Closed outline: upper surface leading to trailing edge, then lower surface back.
pub fn airfoil_outline(record: &SimulationRecord) -> Vec<(f64, f64)> {
    let upper = record.x_upper.iter().zip(record.z_upper.iter());
    let lower = record.x_lower.iter().zip(record.z_lower.iter()).rev();
    upper.chain(lower).map(|(&x, &z)| (x, z)).collect()
}

/// Spline-smoothed upper and lower surfaces.
pub fn smoothed_surfaces(
    record: &SimulationRecord,
) -> Result<(Vec<(f64, f64)>, Vec<(f64, f64)>), Box<dyn Error>> {
    let upper = CubicSpline::natural(&record.x_upper.to_vec(), &record.z_upper.to_vec())?
        .resample(SPLINE_RESAMPLE_POINTS);
    let lower = CubicSpline::natural(&record.x_lower.to_vec(), &record.z_lower.to_vec())?
        .resample(SPLINE_RESAMPLE_POINTS);
    Ok((upper, lower))
}

/// Profile panel: filled section, smoothed surfaces, raw surface points and the chord line.
pub fn build_profile_panel(record: &SimulationRecord) -> Result<PlotConfig, Box<dyn Error>> {
    let (upper, lower) = smoothed_surfaces(record)?;

    let mut outline: Vec<(f64, f64)> = upper.clone();
    outline.extend(lower.iter().rev().copied());

    let z_min = record.z_lower.iter().copied().fold(f64::INFINITY, f64::min);
    let z_max = record.z_upper.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // Keep the section visible with room for the legend above it
    let half_height = z_max.abs().max(z_min.abs()) * 3.0;

    let mut config = PlotConfig::new(
        "Bionic Owl-Wing Airfoil Profile",
        -0.05..1.05,
        -half_height..half_height,
        "x/c",
        "z/c",
    );
    config.legend_position = LegendPosition::UpperRight;
    config.polygons.push(PlotPolygon {
        points: outline,
        color: *COLOR_BIONIC,
        opacity: FILL_OPACITY_PROFILE,
        label: String::new(),
    });
    config.series.push(PlotSeries::line(
        vec![(0.0, 0.0), (1.0, 0.0)],
        "Chord line",
        *COLOR_CHORD_LINE,
        LINE_WIDTH_THIN,
    ));
    config.series.push(PlotSeries::line(upper, "Upper surface", *COLOR_BIONIC, LINE_WIDTH_PLOT));
    config.series.push(PlotSeries::line(lower, "Lower surface", COLOR_AIRFOIL_OUTLINE, LINE_WIDTH_PLOT));
    config.series.push(PlotSeries::markers(
        airfoil_outline(record),
        "CFD surface points",
        *COLOR_BIONIC,
    ));
    Ok(config)
}

/// Thickness and camber distribution panel with the maximum thickness marked.
pub fn build_thickness_panel(record: &SimulationRecord) -> Result<PlotConfig, Box<dyn Error>> {
    let thickness = record.thickness();
    let camber = record.camber();
    let max_idx = thickness.argmax()?;
    let (x_max, t_max) = (record.x_upper[max_idx], thickness[max_idx]);

    let thickness_points: Vec<(f64, f64)> =
        record.x_upper.iter().zip(thickness.iter()).map(|(&x, &t)| (x, t)).collect();
    let camber_points: Vec<(f64, f64)> =
        record.x_upper.iter().zip(camber.iter()).map(|(&x, &c)| (x, c)).collect();

    let series = vec![
        PlotSeries::line_with_markers(thickness_points, "Thickness t/c", *COLOR_THICKNESS, LINE_WIDTH_PLOT),
        PlotSeries::line_with_markers(camber_points, "Camber line", *COLOR_CAMBER_LINE, LINE_WIDTH_PLOT),
        PlotSeries::line(vec![(x_max, 0.0), (x_max, t_max)], "", *COLOR_CHORD_LINE, LINE_WIDTH_THIN),
    ];
    let (y_min, y_max) = series_y_bounds(&series).ok_or("No thickness data")?;
    let (y_lo, y_hi) = calculate_range(y_min.min(0.0), y_max);

    let mut config = PlotConfig::new(
        "Thickness and Camber Distribution",
        -0.05..1.05,
        y_lo..y_hi,
        "x/c",
        "Fraction of chord",
    );
    config.series = series;
    config.annotations.push(Annotation {
        x: x_max + 0.02,
        y: t_max,
        text: format!("max t/c = {:.1}% at x/c = {:.3}", t_max * 100.0, x_max),
    });
    Ok(config)
}

pub fn build_airfoil_geometry_panels(record: &SimulationRecord) -> Result<Vec<Panel>, Box<dyn Error>> {
    Ok(vec![
        Panel::Chart(build_profile_panel(record)?),
        Panel::Chart(build_thickness_panel(record)?),
    ])
}

/// Renders the airfoil section and its thickness distribution.
pub fn plot_airfoil_geometry(record: &SimulationRecord, ctx: &PlotContext) -> Result<PathBuf, Box<dyn Error>> {
    let output_path = ctx.figure_path("AirfoilGeometry");
    let panels = build_airfoil_geometry_panels(record)?;
    draw_panel_grid(&output_path, "Airfoil Geometry: Bionic Owl-Wing Section", (2, 1), &panels)?;
    Ok(output_path)
}
