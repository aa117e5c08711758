// src/plot_functions/plot_dp_dt_distribution.rs

use std::error::Error;
use std::path::PathBuf;

use crate::constants::{
    COLOR_DPDT_PRESSURE, COLOR_DPDT_SUCTION, COLOR_PRESSURE_SIGNAL, LINE_WIDTH_PLOT,
};
use crate::data_analysis::pressure_signal::{create_dp_dt_data, DpDtData};
use crate::plot_context::PlotContext;
use crate::plot_framework::{
    calculate_range, draw_panel_grid, series_y_bounds, Annotation, LegendPosition, Panel,
    PlotConfig, PlotSeries,
};

fn time_panel(title: &str, y_label: &str, time_ms: &[f64], values: &[f64], label: &str) -> PlotConfig {
    let points: Vec<(f64, f64)> = time_ms.iter().copied().zip(values.iter().copied()).collect();
    let series = vec![PlotSeries::line(points, label, *COLOR_PRESSURE_SIGNAL, LINE_WIDTH_PLOT)];
    // An empty signal keeps its slot and is drawn as a placeholder message
    let (y_lo, y_hi) = series_y_bounds(&series)
        .map(|(lo, hi)| calculate_range(lo, hi))
        .unwrap_or((0.0, 1.0));
    let t_end = time_ms.last().copied().unwrap_or(1.0);

    let mut config = PlotConfig::new(title, 0.0..t_end, y_lo..y_hi, "Time (ms)", y_label);
    config.series = series;
    config.legend_position = LegendPosition::UpperRight;
    config
}

pub fn build_dp_dt_panels(data: &DpDtData) -> Vec<Panel> {
    let time_ms: Vec<f64> = data.time_s.iter().map(|t| t * 1000.0).collect();
    let mut panels = vec![
        Panel::Chart(time_panel(
            "Trailing-Edge Pressure Fluctuation",
            "p' (Pa)",
            &time_ms,
            &data.pressure_pa,
            "p'(t)",
        )),
        Panel::Chart(time_panel(
            "Pressure Time Derivative at the Trailing Edge",
            "dP/dt (Pa/s)",
            &time_ms,
            &data.dp_dt,
            "dP/dt",
        )),
    ];

    let suction: Vec<(f64, f64)> = data
        .chord_x
        .iter()
        .copied()
        .zip(data.rms_dp_dt_suction.iter().copied())
        .collect();
    let pressure_side: Vec<(f64, f64)> = data
        .chord_x
        .iter()
        .copied()
        .zip(data.rms_dp_dt_pressure.iter().copied())
        .collect();
    let series = vec![
        PlotSeries::line(suction, "Suction side", *COLOR_DPDT_SUCTION, LINE_WIDTH_PLOT),
        PlotSeries::line(pressure_side, "Pressure side", *COLOR_DPDT_PRESSURE, LINE_WIDTH_PLOT),
    ];
    let y_max = series_y_bounds(&series).map(|(_, hi)| hi).unwrap_or(1.0);
    let (_, y_hi) = calculate_range(0.0, y_max);

    let mut chordwise = PlotConfig::new(
        "Chordwise RMS dP/dt Distribution",
        -0.02..1.02,
        0.0..y_hi,
        "x/c",
        "RMS dP/dt (Pa/s)",
    );
    chordwise.series = series;
    chordwise.legend_position = LegendPosition::UpperLeft;
    if let Some(&te_value) = data.rms_dp_dt_suction.last() {
        chordwise.annotations.push(Annotation {
            x: 0.62,
            y: te_value * 0.9,
            text: format!("Trailing-edge maximum: {:.0} Pa/s", te_value),
        });
    }
    panels.push(Panel::Chart(chordwise));

    panels
}

/// Renders the synthetic trailing-edge pressure signal and the dP/dt distribution.
pub fn plot_dp_dt_distribution(ctx: &PlotContext) -> Result<PathBuf, Box<dyn Error>> {
    let data = create_dp_dt_data();
    println!(
        "  dP/dt: {} samples, trailing-edge RMS {:.0} Pa/s.",
        data.dp_dt.len(),
        data.rms_dp_dt_suction.last().copied().unwrap_or(0.0)
    );

    let output_path = ctx.figure_path("DpDtDistribution");
    let panels = build_dp_dt_panels(&data);
    draw_panel_grid(&output_path, "Surface Pressure Fluctuation (dP/dt) Distribution", (3, 1), &panels)?;
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_panels_all_drawable() {
        let panels = build_dp_dt_panels(&create_dp_dt_data());
        assert_eq!(panels.len(), 3);
        assert!(panels.iter().all(|p| p.unavailable_reason().is_none()));
    }

    #[test]
    fn test_time_axis_in_milliseconds() {
        let panels = build_dp_dt_panels(&create_dp_dt_data());
        let Panel::Chart(pressure) = &panels[0] else {
            panic!("expected cartesian panel");
        };
        assert!(pressure.x_range.end > 19.0 && pressure.x_range.end < 20.0);
    }

    #[test]
    fn test_empty_signal_falls_back_to_placeholder() {
        let data = DpDtData {
            time_s: Vec::new(),
            pressure_pa: Vec::new(),
            dp_dt: Vec::new(),
            chord_x: Vec::new(),
            rms_dp_dt_suction: Vec::new(),
            rms_dp_dt_pressure: Vec::new(),
        };
        let panels = build_dp_dt_panels(&data);
        assert_eq!(panels.len(), 3);
        assert!(panels.iter().all(|p| p.unavailable_reason() == Some("No data points")));
    }
}
