// src/pipeline.rs

use std::error::Error;
use std::path::PathBuf;

use crate::constants::FLOW_VISUALIZATION_AOA_INDICES;
use crate::data_analysis::aero_summary::AeroSummary;
use crate::data_input::cfd_data::SimulationRecord;
use crate::data_output::csv_export::export_record_csv;
use crate::plot_context::PlotContext;
use crate::plot_functions::plot_acoustic_analysis::plot_acoustic_analysis;
use crate::plot_functions::plot_aerodynamic_coefficients::plot_aerodynamic_coefficients;
use crate::plot_functions::plot_airfoil_geometry::plot_airfoil_geometry;
use crate::plot_functions::plot_combined_summary::plot_combined_summary;
use crate::plot_functions::plot_dp_dt_distribution::plot_dp_dt_distribution;
use crate::plot_functions::plot_flow_separation::plot_flow_separation;
use crate::plot_functions::plot_flow_visualization::{format_angle, plot_flow_visualization};

/// Runs every renderer in order and returns the paths of the written files.
/// `summary` must be derived from `record`; it captions the combined figure.
/// The first failing renderer aborts the run.
pub fn run_pipeline(
    record: &SimulationRecord,
    summary: &AeroSummary,
    ctx: &PlotContext,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    ctx.ensure_output_dir()?;
    let mut written = Vec::new();

    if ctx.export_csv {
        println!("\n--- Exporting Coefficient Table ---");
        written.push(export_record_csv(record, &ctx.file_path("coefficients", "csv"))?);
    }

    println!("\n--- Generating Plots ---");

    written.push(plot_airfoil_geometry(record, ctx)?);
    println!("Generated airfoil geometry plot");

    written.push(plot_aerodynamic_coefficients(record, ctx)?);
    println!("Generated aerodynamic coefficient plots");

    written.push(plot_flow_separation(record, ctx)?);
    println!("Generated flow separation plot");

    for &aoa_index in FLOW_VISUALIZATION_AOA_INDICES.iter() {
        let angle = record
            .angles
            .get(aoa_index)
            .copied()
            .ok_or_else(|| format!("Flow visualization AOA index {aoa_index} out of range"))?;
        written.push(plot_flow_visualization(record, aoa_index, ctx)?);
        println!("Generated flow visualization for {}° AOA", format_angle(angle));
    }

    written.push(plot_acoustic_analysis(record, ctx)?);
    println!("Generated acoustic analysis plot");

    written.push(plot_dp_dt_distribution(ctx)?);
    println!("Generated dP/dt distribution plot");

    written.push(plot_combined_summary(record, summary, ctx)?);
    println!("Generated combined analysis plot");

    println!("\nAnalysis visualization completed successfully!");
    Ok(written)
}

/// File names `run_pipeline` writes for a record, in order.
pub fn expected_outputs(record: &SimulationRecord, ctx: &PlotContext) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if ctx.export_csv {
        paths.push(ctx.file_path("coefficients", "csv"));
    }
    paths.push(ctx.figure_path("AirfoilGeometry"));
    paths.push(ctx.figure_path("AerodynamicCoefficients"));
    paths.push(ctx.figure_path("FlowSeparation"));
    for &aoa_index in FLOW_VISUALIZATION_AOA_INDICES.iter() {
        if let Some(&angle) = record.angles.get(aoa_index) {
            paths.push(ctx.figure_path(&format!("FlowField_AOA_{}", format_angle(angle))));
        }
    }
    paths.push(ctx.figure_path("AcousticAnalysis"));
    paths.push(ctx.figure_path("DpDtDistribution"));
    paths.push(ctx.figure_path("CombinedAnalysis"));
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::cfd_data::load_cfd_data;

    #[test]
    fn test_expected_outputs() {
        let record = load_cfd_data();
        let ctx = PlotContext::new("out", "OwlWing", true);
        let names: Vec<String> = expected_outputs(&record, &ctx)
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        assert_eq!(names.len(), 11);
        assert_eq!(names[0], "OwlWing_coefficients.csv");
        assert!(names.contains(&"OwlWing_FlowField_AOA_0.png".to_string()));
        assert!(names.contains(&"OwlWing_FlowField_AOA_3.png".to_string()));
        assert!(names.contains(&"OwlWing_FlowField_AOA_7.5.png".to_string()));
        assert!(names.contains(&"OwlWing_FlowField_AOA_9.png".to_string()));

        let without_csv = PlotContext::new("out", "OwlWing", false);
        assert_eq!(expected_outputs(&record, &without_csv).len(), 10);
    }
}
