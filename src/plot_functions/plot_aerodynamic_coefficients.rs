// src/plot_functions/plot_aerodynamic_coefficients.rs

use std::error::Error;
use std::path::PathBuf;

use ndarray::Array1;

use crate::constants::{COLOR_BIONIC, COLOR_NACA, LINE_WIDTH_PLOT};
use crate::data_input::cfd_data::SimulationRecord;
use crate::plot_context::PlotContext;
use crate::plot_framework::{
    calculate_range, draw_panel_grid, series_y_bounds, LegendPosition, Panel, PlotConfig,
    PlotSeries,
};

fn zip_points(x: &Array1<f64>, y: &Array1<f64>) -> Vec<(f64, f64)> {
    x.iter().zip(y.iter()).map(|(&a, &b)| (a, b)).collect()
}

/// Bionic and NACA 0006 series of one quantity against a shared x axis.
fn comparison_panel(
    title: &str,
    x_label: &str,
    y_label: &str,
    bionic: Vec<(f64, f64)>,
    naca: Vec<(f64, f64)>,
    legend_position: LegendPosition,
) -> PlotConfig {
    let series = vec![
        PlotSeries::line_with_markers(bionic, "Bionic airfoil", *COLOR_BIONIC, LINE_WIDTH_PLOT),
        PlotSeries::line_with_markers(naca, "NACA 0006", *COLOR_NACA, LINE_WIDTH_PLOT),
    ];

    let (x_min, x_max) = series
        .iter()
        .flat_map(|s| s.data.iter())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(x, _)| (lo.min(x), hi.max(x)));
    let (x_lo, x_hi) = calculate_range(x_min, x_max);
    let (y_lo, y_hi) = series_y_bounds(&series)
        .map(|(lo, hi)| calculate_range(lo.min(0.0), hi))
        .unwrap_or((0.0, 1.0));

    let mut config = PlotConfig::new(title, x_lo..x_hi, y_lo..y_hi, x_label, y_label);
    config.series = series;
    config.legend_position = legend_position;
    config
}

/// L/D against angle of attack for both airfoils.
pub fn build_lift_to_drag_panel(record: &SimulationRecord) -> PlotConfig {
    comparison_panel(
        "Lift-to-Drag Ratio",
        "Angle of Attack (deg)",
        "L/D",
        zip_points(&record.angles, &record.ld_bionic),
        zip_points(&record.angles, &record.ld_naca),
        LegendPosition::LowerRight,
    )
}

pub fn build_aerodynamic_coefficient_panels(record: &SimulationRecord) -> Vec<Panel> {
    let lift = comparison_panel(
        "Lift Coefficient",
        "Angle of Attack (deg)",
        "Cl",
        zip_points(&record.angles, &record.cl_bionic),
        zip_points(&record.angles, &record.cl_naca),
        LegendPosition::LowerRight,
    );
    let drag = comparison_panel(
        "Drag Coefficient",
        "Angle of Attack (deg)",
        "Cd",
        zip_points(&record.angles, &record.cd_bionic),
        zip_points(&record.angles, &record.cd_naca),
        LegendPosition::UpperLeft,
    );
    let polar = comparison_panel(
        "Drag Polar",
        "Cd",
        "Cl",
        zip_points(&record.cd_bionic, &record.cl_bionic),
        zip_points(&record.cd_naca, &record.cl_naca),
        LegendPosition::LowerRight,
    );

    vec![
        Panel::Chart(lift),
        Panel::Chart(drag),
        Panel::Chart(build_lift_to_drag_panel(record)),
        Panel::Chart(polar),
    ]
}

/// Renders Cl, Cd, L/D and the drag polar of both airfoils.
pub fn plot_aerodynamic_coefficients(
    record: &SimulationRecord,
    ctx: &PlotContext,
) -> Result<PathBuf, Box<dyn Error>> {
    let output_path = ctx.figure_path("AerodynamicCoefficients");
    let panels = build_aerodynamic_coefficient_panels(record);
    draw_panel_grid(
        &output_path,
        "Aerodynamic Coefficients: Bionic Airfoil vs NACA 0006",
        (2, 2),
        &panels,
    )?;
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::cfd_data::load_cfd_data;

    #[test]
    fn test_four_panels_with_two_series_each() {
        let panels = build_aerodynamic_coefficient_panels(&load_cfd_data());
        assert_eq!(panels.len(), 4);
        for panel in &panels {
            match panel {
                Panel::Chart(config) => {
                    assert_eq!(config.series.len(), 2);
                    assert!(config.series.iter().all(|s| s.data.len() == 7));
                }
                _ => panic!("expected cartesian panels"),
            }
        }
    }

    #[test]
    fn test_naca_lift_to_drag_starts_at_zero() {
        let config = build_lift_to_drag_panel(&load_cfd_data());
        assert_eq!(config.series[1].data[0], (0.0, 0.0));
        assert!(config.y_range.start < 0.0);
        assert!(config.y_range.end > 0.92 / 0.06);
    }

    #[test]
    fn test_drag_polar_uses_cd_on_x() {
        let panels = build_aerodynamic_coefficient_panels(&load_cfd_data());
        if let Panel::Chart(polar) = &panels[3] {
            assert_eq!(polar.series[0].data[0], (0.041, 0.32));
            assert_eq!(polar.x_label, "Cd");
        } else {
            panic!("expected cartesian drag polar");
        }
    }
}
