// src/data_analysis/flow_field.rs
//
// Synthetic velocity field around the bionic airfoil for a given angle of attack.
// Freestream at the AOA plus a bound vortex at quarter chord whose circulation
// follows the measured lift coefficient (Kutta-Joukowski, Cl = 2Γ / (U c)),
// with a velocity deficit over the separated regions. Samples are taken on a
// scattered layout and interpolated onto a regular grid.

use ndarray::{Array1, Array2};
use std::error::Error;
use std::f64::consts::PI;

use crate::constants::{
    FLOW_GRID_NX, FLOW_GRID_NY, FLOW_GRID_X_MAX, FLOW_GRID_X_MIN, FLOW_GRID_Y_MAX,
    FLOW_GRID_Y_MIN, FLOW_IDW_POWER, FLOW_SAMPLE_RING_COUNT, FLOW_SAMPLE_RING_MAX_RADIUS,
    FLOW_SAMPLE_RING_MIN_RADIUS, FLOW_SAMPLE_RING_POINTS, FLOW_SURFACE_OFFSETS,
    FLOW_VORTEX_CORE_RADIUS, FLOW_VORTEX_X, WAKE_BASE_THICKNESS, WAKE_DECAY_LENGTH,
    WAKE_GROWTH_RATE, WAKE_PRESSURE_DEFICIT, WAKE_SUCTION_DEFICIT,
};
use crate::data_analysis::interpolation::{idw_grid, interp_linear};
use crate::data_input::cfd_data::{SeparationRegion, SimulationRecord};

/// Inputs of the analytic field model for one angle of attack.
#[derive(Debug, Clone)]
pub struct FlowModel {
    pub angle_deg: f64,
    pub lift_coefficient: f64,
    pub suction_separation: Option<SeparationRegion>,
    pub pressure_separation: Option<SeparationRegion>,
    x_surface: Vec<f64>,
    z_upper: Vec<f64>,
    z_lower: Vec<f64>,
}

/// Gridded flow field, indexed `[x_idx, y_idx]`.
/// Nodes inside the airfoil are flagged in `inside_airfoil`.
#[derive(Debug, Clone)]
pub struct FlowFieldGrid {
    pub angle_deg: f64,
    pub x_bins: Vec<f64>,
    pub y_bins: Vec<f64>,
    pub velocity: Array2<f64>,             // |V| / U∞
    pub pressure_coefficient: Array2<f64>, // Cp = 1 - (|V| / U∞)²
    pub inside_airfoil: Array2<bool>,
    pub sample_count: usize,
}

impl FlowModel {
    pub fn from_record(record: &SimulationRecord, aoa_index: usize) -> Result<Self, Box<dyn Error>> {
        if aoa_index >= record.angle_count() {
            return Err(format!(
                "AOA index {aoa_index} out of range (record has {} angles)",
                record.angle_count()
            )
            .into());
        }
        Ok(Self {
            angle_deg: record.angles[aoa_index],
            lift_coefficient: record.cl_bionic[aoa_index],
            suction_separation: record.separation_suction[aoa_index],
            pressure_separation: record.separation_pressure[aoa_index],
            x_surface: record.x_upper.to_vec(),
            z_upper: record.z_upper.to_vec(),
            z_lower: record.z_lower.to_vec(),
        })
    }

    pub fn upper_surface(&self, x: f64) -> f64 {
        interp_linear(&self.x_surface, &self.z_upper, x)
    }

    pub fn lower_surface(&self, x: f64) -> f64 {
        interp_linear(&self.x_surface, &self.z_lower, x)
    }

    pub fn is_inside_airfoil(&self, x: f64, y: f64) -> bool {
        (0.0..=1.0).contains(&x) && y <= self.upper_surface(x) && y >= self.lower_surface(x)
    }

    /// Velocity vector (u, v) normalized by the freestream speed.
    pub fn velocity(&self, x: f64, y: f64) -> (f64, f64) {
        let alpha = self.angle_deg.to_radians();
        let mut u = alpha.cos();
        let mut v = alpha.sin();

        // Clockwise bound vortex, Γ = Cl U c / 2, with a finite core
        let gamma = 0.5 * self.lift_coefficient;
        let dx = x - FLOW_VORTEX_X;
        let dy = y;
        let r_sq = dx * dx + dy * dy + FLOW_VORTEX_CORE_RADIUS * FLOW_VORTEX_CORE_RADIUS;
        u += gamma * dy / (2.0 * PI * r_sq);
        v -= gamma * dx / (2.0 * PI * r_sq);

        let scale = self.wake_factor(x, y);
        (u * scale, v * scale)
    }

    pub fn speed(&self, x: f64, y: f64) -> f64 {
        let (u, v) = self.velocity(x, y);
        (u * u + v * v).sqrt()
    }

    /// Multiplicative speed reduction inside the separated shear layers (1.0 outside).
    pub fn wake_factor(&self, x: f64, y: f64) -> f64 {
        let mut factor = 1.0;
        if let Some(region) = self.suction_separation {
            let surface = self.upper_surface(x.min(1.0));
            factor *= separated_layer_factor(region, x, y - surface, WAKE_SUCTION_DEFICIT);
        }
        if let Some(region) = self.pressure_separation {
            let surface = self.lower_surface(x.min(1.0));
            factor *= separated_layer_factor(region, x, surface - y, WAKE_PRESSURE_DEFICIT);
        }
        factor
    }

    /// Scattered sample layout: rings around mid chord plus points hugging both surfaces.
    /// Points inside the airfoil are skipped.
    pub fn scattered_samples(&self) -> Vec<(f64, f64, f64)> {
        let mut samples = Vec::new();
        let center = (0.5, 0.0);

        let radii = Array1::geomspace(
            FLOW_SAMPLE_RING_MIN_RADIUS,
            FLOW_SAMPLE_RING_MAX_RADIUS,
            FLOW_SAMPLE_RING_COUNT,
        )
        .map(|r| r.to_vec())
        .unwrap_or_default();
        for (ring_idx, radius) in radii.iter().enumerate() {
            // Stagger alternate rings so samples do not line up radially
            let offset = if ring_idx % 2 == 0 { 0.0 } else { 0.5 };
            for k in 0..FLOW_SAMPLE_RING_POINTS {
                let theta = 2.0 * PI * (k as f64 + offset) / FLOW_SAMPLE_RING_POINTS as f64;
                // Rings are flattened vertically to follow the slender body
                let x = center.0 + radius * theta.cos();
                let y = center.1 + 0.6 * radius * theta.sin();
                self.push_sample(&mut samples, x, y);
            }
        }

        for (i, &x) in self.x_surface.iter().enumerate() {
            for &offset in FLOW_SURFACE_OFFSETS.iter() {
                self.push_sample(&mut samples, x, self.z_upper[i] + offset);
                self.push_sample(&mut samples, x, self.z_lower[i] - offset);
            }
        }

        // Wake centreline behind the trailing edge
        for k in 1..=8 {
            let x = 1.0 + 0.07 * k as f64;
            for &offset in [-0.03, 0.0, 0.03, 0.08].iter() {
                self.push_sample(&mut samples, x, offset);
            }
        }

        samples
    }

    fn push_sample(&self, samples: &mut Vec<(f64, f64, f64)>, x: f64, y: f64) {
        if !self.is_inside_airfoil(x, y) {
            samples.push((x, y, self.speed(x, y)));
        }
    }
}

// Deficit profile across a separated layer. `normal_distance` is measured away
// from the surface; the deficit is strongest at the wall and fades at the layer edge,
// then decays downstream of the trailing edge.
fn separated_layer_factor(region: SeparationRegion, x: f64, normal_distance: f64, deficit: f64) -> f64 {
    if x < region.start || normal_distance < 0.0 {
        return 1.0;
    }
    // Reattached pressure-side bubbles end at their reattachment point
    if region.end < 1.0 && x > region.end {
        return 1.0;
    }
    let thickness = WAKE_BASE_THICKNESS + WAKE_GROWTH_RATE * (x.min(1.0) - region.start);
    let eta = normal_distance / thickness;
    if eta > 1.0 {
        return 1.0;
    }
    let downstream_decay = (-(x - 1.0).max(0.0) / WAKE_DECAY_LENGTH).exp();
    1.0 - deficit * (1.0 - eta).powi(2) * downstream_decay
}

/// Builds the gridded flow field for the angle at `aoa_index`.
pub fn create_flow_field_data(
    record: &SimulationRecord,
    aoa_index: usize,
) -> Result<FlowFieldGrid, Box<dyn Error>> {
    let model = FlowModel::from_record(record, aoa_index)?;
    let samples = model.scattered_samples();

    let x_bins = Array1::linspace(FLOW_GRID_X_MIN, FLOW_GRID_X_MAX, FLOW_GRID_NX).to_vec();
    let y_bins = Array1::linspace(FLOW_GRID_Y_MIN, FLOW_GRID_Y_MAX, FLOW_GRID_NY).to_vec();

    let velocity = idw_grid(&samples, &x_bins, &y_bins, FLOW_IDW_POWER)?;
    let pressure_coefficient = velocity.mapv(|speed| 1.0 - speed * speed);
    let inside_airfoil = Array2::from_shape_fn((x_bins.len(), y_bins.len()), |(i, j)| {
        model.is_inside_airfoil(x_bins[i], y_bins[j])
    });

    Ok(FlowFieldGrid {
        angle_deg: model.angle_deg,
        x_bins,
        y_bins,
        velocity,
        pressure_coefficient,
        inside_airfoil,
        sample_count: samples.len(),
    })
}

impl FlowFieldGrid {
    /// (min, max) over nodes outside the airfoil.
    pub fn velocity_range(&self) -> (f64, f64) {
        masked_range(&self.velocity, &self.inside_airfoil)
    }

    pub fn pressure_range(&self) -> (f64, f64) {
        masked_range(&self.pressure_coefficient, &self.inside_airfoil)
    }
}

fn masked_range(values: &Array2<f64>, mask: &Array2<bool>) -> (f64, f64) {
    values
        .iter()
        .zip(mask.iter())
        .filter(|(v, inside)| !**inside && v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (&v, _)| {
            (lo.min(v), hi.max(v))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::cfd_data::load_cfd_data;

    #[test]
    fn test_far_field_recovers_freestream() {
        let record = load_cfd_data();
        let model = FlowModel::from_record(&record, 2).unwrap();
        let speed = model.speed(-20.0, 15.0);
        assert!((speed - 1.0).abs() < 0.01, "far-field speed {speed}");
    }

    #[test]
    fn test_suction_side_faster_than_pressure_side() {
        let record = load_cfd_data();
        // 4.5 deg: attached pressure side, separation on the suction side starts at 0.60
        let model = FlowModel::from_record(&record, 3).unwrap();
        let above = model.speed(0.3, model.upper_surface(0.3) + 0.05);
        let below = model.speed(0.3, model.lower_surface(0.3) - 0.05);
        assert!(above > below, "above {above} below {below}");
    }

    #[test]
    fn test_wake_deficit_only_where_separated() {
        let record = load_cfd_data();
        // 0 deg: pressure-side bubble between 0.15 and 0.71
        let attached_low = FlowModel::from_record(&record, 0).unwrap();
        let y = attached_low.lower_surface(0.4) - 0.005;
        assert!(attached_low.wake_factor(0.4, y) < 1.0);
        assert_eq!(attached_low.wake_factor(0.05, attached_low.lower_surface(0.05) - 0.005), 1.0);

        // 3 deg: no pressure-side separation
        let clean_low = FlowModel::from_record(&record, 2).unwrap();
        let y = clean_low.lower_surface(0.4) - 0.005;
        assert_eq!(clean_low.wake_factor(0.4, y), 1.0);

        // 9 deg: separated from the leading edge on the suction side
        let stalled = FlowModel::from_record(&record, 6).unwrap();
        let y = stalled.upper_surface(0.1) + 0.005;
        assert!(stalled.wake_factor(0.1, y) < 1.0);
    }

    #[test]
    fn test_samples_exclude_airfoil_interior() {
        let record = load_cfd_data();
        let model = FlowModel::from_record(&record, 4).unwrap();
        let samples = model.scattered_samples();
        assert!(samples.len() > FLOW_SAMPLE_RING_COUNT * FLOW_SAMPLE_RING_POINTS / 2);
        assert!(samples.iter().all(|&(x, y, _)| !model.is_inside_airfoil(x, y)));
        assert!(samples.iter().all(|&(_, _, s)| s.is_finite() && s >= 0.0));
    }

    #[test]
    fn test_flow_field_grid_shape_and_mask() {
        let record = load_cfd_data();
        let field = create_flow_field_data(&record, 0).unwrap();
        assert_eq!(field.velocity.dim(), (FLOW_GRID_NX, FLOW_GRID_NY));
        assert_eq!(field.pressure_coefficient.dim(), (FLOW_GRID_NX, FLOW_GRID_NY));
        assert!(field.inside_airfoil.iter().any(|&inside| inside));
        assert!(field.inside_airfoil.iter().filter(|&&inside| inside).count() < FLOW_GRID_NX * FLOW_GRID_NY / 10);

        let (vmin, vmax) = field.velocity_range();
        assert!(vmin.is_finite() && vmax.is_finite() && vmax > vmin);
        for (speed, cp) in field.velocity.iter().zip(field.pressure_coefficient.iter()) {
            assert!((cp - (1.0 - speed * speed)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_out_of_range_index_is_error() {
        let record = load_cfd_data();
        assert!(create_flow_field_data(&record, 7).is_err());
    }
}
