// src/plot_functions/plot_combined_summary.rs

use std::error::Error;
use std::path::PathBuf;

use crate::data_analysis::aero_summary::AeroSummary;
use crate::data_input::cfd_data::SimulationRecord;
use crate::plot_context::PlotContext;
use crate::plot_framework::{draw_panel_grid, Annotation, Panel};
use crate::plot_functions::plot_acoustic_analysis::build_spl_panel;
use crate::plot_functions::plot_aerodynamic_coefficients::build_lift_to_drag_panel;
use crate::plot_functions::plot_airfoil_geometry::build_profile_panel;
use crate::plot_functions::plot_flow_separation::build_onset_panel;

/// Max L/D of both airfoils with the signed improvement. The improvement is
/// left out when it is undefined (NACA max L/D of zero).
pub fn lift_to_drag_caption(summary: &AeroSummary) -> String {
    let base = format!(
        "Max L/D {:.1} vs {:.1}",
        summary.max_ld_bionic, summary.max_ld_naca
    );
    if summary.ld_improvement_percent.is_finite() {
        format!("{base} ({:+.1}%)", summary.ld_improvement_percent)
    } else {
        base
    }
}

/// Geometry, L/D comparison, separation onset and SPL spectrum, captioned with the summary metrics.
pub fn build_combined_panels(
    record: &SimulationRecord,
    summary: &AeroSummary,
) -> Result<Vec<Panel>, Box<dyn Error>> {
    let profile = build_profile_panel(record)?;

    let mut lift_to_drag = build_lift_to_drag_panel(record);
    lift_to_drag.annotations.push(Annotation {
        x: summary.max_ld_bionic_angle,
        y: summary.max_ld_bionic,
        text: lift_to_drag_caption(summary),
    });

    let mut onset = build_onset_panel(record);
    let first_angle = record.angles.first().copied().unwrap_or(0.0);
    if let Some(angle) = summary.full_suction_separation_angle {
        onset.annotations.push(Annotation {
            x: first_angle,
            y: 0.25,
            text: format!("Leading-edge separation at {angle:.1}°"),
        });
    }
    if let Some(angle) = summary.pressure_separation_clear_angle {
        onset.annotations.push(Annotation {
            x: first_angle,
            y: 0.15,
            text: format!("Pressure-side bubble gone from {angle:.1}°"),
        });
    }

    let spl = build_spl_panel(record)?;

    Ok(vec![
        Panel::Chart(profile),
        Panel::Chart(lift_to_drag),
        Panel::Chart(onset),
        Panel::Chart(spl),
    ])
}

/// Renders the four-panel overview figure.
pub fn plot_combined_summary(
    record: &SimulationRecord,
    summary: &AeroSummary,
    ctx: &PlotContext,
) -> Result<PathBuf, Box<dyn Error>> {
    let output_path = ctx.figure_path("CombinedAnalysis");
    let panels = build_combined_panels(record, summary)?;
    draw_panel_grid(
        &output_path,
        "Bionic Owl-Wing Airfoil: Combined Analysis",
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
    fn test_combined_panels_are_captioned() {
        let record = load_cfd_data();
        let summary = AeroSummary::from_record(&record).unwrap();
        let panels = build_combined_panels(&record, &summary).unwrap();
        assert_eq!(panels.len(), 4);
        assert!(panels.iter().all(|p| p.unavailable_reason().is_none()));

        let Panel::Chart(lift_to_drag) = &panels[1] else {
            panic!("expected cartesian panel");
        };
        assert_eq!(lift_to_drag.annotations.len(), 1);
        assert!(lift_to_drag.annotations[0].text.starts_with("Max L/D 15.3 vs 10."));

        let Panel::Chart(onset) = &panels[2] else {
            panic!("expected cartesian panel");
        };
        assert_eq!(onset.annotations.len(), 2);
        assert!(onset.annotations[1].text.contains("3.0°"));
    }

    #[test]
    fn test_lift_to_drag_caption_sign() {
        let mut summary = AeroSummary::from_record(&load_cfd_data()).unwrap();
        assert!(lift_to_drag_caption(&summary).ends_with("(+49.6%)"));

        summary.ld_improvement_percent = -12.34;
        let caption = lift_to_drag_caption(&summary);
        assert!(caption.ends_with("(-12.3%)"), "{caption}");
        assert!(!caption.contains("+-"));

        summary.ld_improvement_percent = f64::NAN;
        let caption = lift_to_drag_caption(&summary);
        assert!(!caption.contains("NaN") && !caption.contains('%'), "{caption}");
        assert!(caption.starts_with("Max L/D 15.3 vs"));
    }
}
