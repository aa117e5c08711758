// src/plot_functions/plot_acoustic_analysis.rs

use std::error::Error;
use std::path::PathBuf;

use crate::constants::{
    COLOR_ACOUSTIC, FILL_OPACITY_DIRECTIVITY, LINE_WIDTH_PLOT, SPLINE_RESAMPLE_POINTS,
};
use crate::data_analysis::interpolation::CubicSpline;
use crate::data_input::cfd_data::SimulationRecord;
use crate::plot_context::PlotContext;
use crate::plot_framework::{
    calculate_range, draw_panel_grid, series_y_bounds, Annotation, LegendPosition, Panel,
    PlotConfig, PlotSeries, PolarPlotConfig,
};
use crate::plot_functions::peak_detection::find_and_sort_peaks;

/// SPL spectrum on a log10 frequency axis, spline through log-frequency, peaks labeled.
pub fn build_spl_panel(record: &SimulationRecord) -> Result<PlotConfig, Box<dyn Error>> {
    let log_freq: Vec<f64> = record.acoustic_freq.iter().map(|f| f.log10()).collect();
    let spl = record.acoustic_spl.to_vec();
    let measured: Vec<(f64, f64)> = log_freq.iter().copied().zip(spl.iter().copied()).collect();

    let smooth = CubicSpline::natural(&log_freq, &spl)?.resample(SPLINE_RESAMPLE_POINTS);

    let spectrum: Vec<(f64, f64)> = record
        .acoustic_freq
        .iter()
        .copied()
        .zip(spl.iter().copied())
        .collect();
    let peaks = find_and_sort_peaks(&spectrum, "SPL Spectrum at 9° AOA");

    let series = vec![
        PlotSeries::line(smooth, "Spline fit", *COLOR_ACOUSTIC, LINE_WIDTH_PLOT),
        PlotSeries::markers(measured, "CFD prediction", *COLOR_ACOUSTIC),
    ];
    let (y_min, y_max) = series_y_bounds(&series).ok_or("Empty SPL spectrum")?;
    let (y_lo, y_hi) = calculate_range(y_min, y_max);
    let (x_lo, x_hi) = match (log_freq.first(), log_freq.last()) {
        (Some(&lo), Some(&hi)) => (lo - 0.1, hi + 0.1),
        _ => return Err("Empty frequency axis".into()),
    };

    let mut config = PlotConfig::new(
        "Sound Pressure Level Spectrum (9° AOA)",
        x_lo..x_hi,
        y_lo..y_hi,
        "Frequency (Hz)",
        "SPL (dB)",
    );
    config.x_axis_log10 = true;
    config.series = series;
    config.legend_position = LegendPosition::UpperRight;
    config.annotations = peaks
        .iter()
        .map(|&(freq, level)| Annotation {
            x: freq.log10() + 0.05,
            y: level,
            text: format!("Peak: {freq:.0} Hz, {level:.1} dB"),
        })
        .collect();
    Ok(config)
}

pub fn build_directivity_panel(record: &SimulationRecord) -> PolarPlotConfig {
    let max_spl = record
        .directivity_spl
        .iter()
        .copied()
        .fold(0.0_f64, f64::max);
    PolarPlotConfig {
        title: "Sound Directivity Pattern".to_string(),
        angles_deg: record.directivity_angles_deg.to_vec(),
        radii: record.directivity_spl.to_vec(),
        radial_max: ((max_spl / 10.0).ceil() * 10.0).max(10.0),
        radial_unit: "dB".to_string(),
        label: "Bionic airfoil, 192 Hz".to_string(),
        color: *COLOR_ACOUSTIC,
        fill_opacity: FILL_OPACITY_DIRECTIVITY,
    }
}

pub fn build_acoustic_panels(record: &SimulationRecord) -> Result<Vec<Panel>, Box<dyn Error>> {
    Ok(vec![
        Panel::Chart(build_spl_panel(record)?),
        Panel::Polar(build_directivity_panel(record)),
    ])
}

/// Renders the SPL spectrum and the directivity pattern.
pub fn plot_acoustic_analysis(record: &SimulationRecord, ctx: &PlotContext) -> Result<PathBuf, Box<dyn Error>> {
    let output_path = ctx.figure_path("AcousticAnalysis");
    let panels = build_acoustic_panels(record)?;
    draw_panel_grid(&output_path, "Aeroacoustic Analysis: Bionic Airfoil", (1, 2), &panels)?;
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::cfd_data::load_cfd_data;
    use approx::assert_relative_eq;

    #[test]
    fn test_spl_panel_labels_tonal_peak() {
        let config = build_spl_panel(&load_cfd_data()).unwrap();
        assert!(config.x_axis_log10);
        assert_eq!(config.annotations.len(), 1);
        assert_eq!(config.annotations[0].text, "Peak: 192 Hz, 22.6 dB");
        assert_relative_eq!(config.x_range.start, 2.0 - 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_spline_passes_through_measurements() {
        let config = build_spl_panel(&load_cfd_data()).unwrap();
        let smooth = &config.series[0].data;
        assert_eq!(smooth.len(), SPLINE_RESAMPLE_POINTS);
        assert_relative_eq!(smooth[0].1, 15.0, epsilon = 1e-9);
        assert_relative_eq!(smooth[smooth.len() - 1].1, -30.0, epsilon = 1e-9);
    }

    #[test]
    fn test_directivity_radial_scale() {
        let polar = build_directivity_panel(&load_cfd_data());
        assert_eq!(polar.angles_deg.len(), 12);
        assert_eq!(polar.radial_max, 30.0);
    }
}
