// src/plot_functions/plot_flow_visualization.rs

use std::error::Error;
use std::path::PathBuf;

use ndarray::Array2;

use crate::constants::{COLOR_AIRFOIL_OUTLINE, FLOW_GRID_X_MAX, FLOW_GRID_X_MIN, FLOW_GRID_Y_MAX, FLOW_GRID_Y_MIN, LINE_WIDTH_PLOT};
use crate::data_analysis::flow_field::{create_flow_field_data, FlowFieldGrid};
use crate::data_input::cfd_data::SimulationRecord;
use crate::plot_context::PlotContext;
use crate::plot_framework::{draw_panel_grid, ColorMap, HeatmapData, HeatmapPlotConfig, Panel, PlotSeries};
use crate::plot_functions::plot_airfoil_geometry::airfoil_outline;

/// Angle as used in titles and file names: "3", "7.5".
pub fn format_angle(angle_deg: f64) -> String {
    if angle_deg.fract() == 0.0 {
        format!("{angle_deg:.0}")
    } else {
        format!("{angle_deg:.1}")
    }
}

/// Grid values with nodes inside the airfoil blanked out.
fn masked_values(values: &Array2<f64>, inside: &Array2<bool>) -> Vec<Vec<Option<f64>>> {
    values
        .outer_iter()
        .zip(inside.outer_iter())
        .map(|(column, mask)| {
            column
                .iter()
                .zip(mask.iter())
                .map(|(&v, &is_inside)| (!is_inside && v.is_finite()).then_some(v))
                .collect()
        })
        .collect()
}

fn field_panel(
    grid: &FlowFieldGrid,
    values: &Array2<f64>,
    value_range: (f64, f64),
    title: &str,
    colorbar_label: &str,
    color_map: ColorMap,
    outline: &[(f64, f64)],
) -> Panel {
    Panel::Heatmap(HeatmapPlotConfig {
        title: title.to_string(),
        x_range: FLOW_GRID_X_MIN..FLOW_GRID_X_MAX,
        y_range: FLOW_GRID_Y_MIN..FLOW_GRID_Y_MAX,
        heatmap_data: HeatmapData {
            x_bins: grid.x_bins.clone(),
            y_bins: grid.y_bins.clone(),
            values: masked_values(values, &grid.inside_airfoil),
        },
        x_label: "x/c".to_string(),
        y_label: "y/c".to_string(),
        value_range,
        colorbar_label: colorbar_label.to_string(),
        color_map,
        overlay: vec![PlotSeries::line(
            outline.to_vec(),
            "Airfoil",
            COLOR_AIRFOIL_OUTLINE,
            LINE_WIDTH_PLOT,
        )],
    })
}

pub fn build_flow_field_panels(record: &SimulationRecord, grid: &FlowFieldGrid) -> Vec<Panel> {
    let mut outline = airfoil_outline(record);
    if let Some(&first) = outline.first() {
        outline.push(first);
    }
    let angle = format_angle(grid.angle_deg);

    vec![
        field_panel(
            grid,
            &grid.velocity,
            grid.velocity_range(),
            &format!("Velocity Magnitude |V|/U∞ at {angle}° AOA"),
            "|V|/U∞",
            ColorMap::Viridis,
            &outline,
        ),
        field_panel(
            grid,
            &grid.pressure_coefficient,
            grid.pressure_range(),
            &format!("Pressure Coefficient Cp at {angle}° AOA"),
            "Cp",
            ColorMap::CoolWarm,
            &outline,
        ),
    ]
}

/// Renders the velocity and pressure fields for the angle at `aoa_index`.
pub fn plot_flow_visualization(
    record: &SimulationRecord,
    aoa_index: usize,
    ctx: &PlotContext,
) -> Result<PathBuf, Box<dyn Error>> {
    let grid = create_flow_field_data(record, aoa_index)?;
    let angle = format_angle(grid.angle_deg);
    println!(
        "  Flow field at {angle}° AOA: {} scattered samples onto a {}x{} grid.",
        grid.sample_count,
        grid.x_bins.len(),
        grid.y_bins.len()
    );

    let output_path = ctx.figure_path(&format!("FlowField_AOA_{angle}"));
    let panels = build_flow_field_panels(record, &grid);
    draw_panel_grid(
        &output_path,
        &format!("Flow Field Around the Bionic Airfoil at {angle}° Angle of Attack"),
        (2, 1),
        &panels,
    )?;
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::cfd_data::load_cfd_data;

    #[test]
    fn test_format_angle() {
        assert_eq!(format_angle(0.0), "0");
        assert_eq!(format_angle(3.0), "3");
        assert_eq!(format_angle(7.5), "7.5");
    }

    #[test]
    fn test_panels_mask_airfoil_interior() {
        let record = load_cfd_data();
        let grid = create_flow_field_data(&record, 2).unwrap();
        let panels = build_flow_field_panels(&record, &grid);
        assert_eq!(panels.len(), 2);

        let Panel::Heatmap(velocity) = &panels[0] else {
            panic!("expected heatmap panel");
        };
        let blanks = velocity
            .heatmap_data
            .values
            .iter()
            .flat_map(|column| column.iter())
            .filter(|v| v.is_none())
            .count();
        let inside = grid.inside_airfoil.iter().filter(|&&b| b).count();
        assert!(inside > 0);
        assert_eq!(blanks, inside);
        assert!(panels[0].unavailable_reason().is_none());
        assert!(velocity.title.contains("3°"));
    }
}
