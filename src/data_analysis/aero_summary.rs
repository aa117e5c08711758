// src/data_analysis/aero_summary.rs

use ndarray::Array1;
use ndarray_stats::QuantileExt;
use std::error::Error;

use crate::data_input::cfd_data::SimulationRecord;

/// Headline comparison numbers between the bionic airfoil and NACA 0006.
#[derive(Debug, Clone, PartialEq)]
pub struct AeroSummary {
    pub max_ld_bionic: f64,
    pub max_ld_bionic_angle: f64,
    pub max_ld_naca: f64,
    pub max_ld_naca_angle: f64,
    pub ld_improvement_percent: f64,
    pub max_cl_bionic: f64,
    pub max_cl_naca: f64,
    pub naca_stall_angle: f64, // AOA of maximum Cl for NACA 0006
    pub pressure_separation_clear_angle: Option<f64>, // First AOA without a pressure-side bubble
    pub full_suction_separation_angle: Option<f64>, // First AOA separated from the leading edge
}

impl AeroSummary {
    pub fn from_record(record: &SimulationRecord) -> Result<Self, Box<dyn Error>> {
        let (max_ld_bionic, max_ld_bionic_angle) = max_with_angle(&record.ld_bionic, &record.angles)?;
        let (max_ld_naca, max_ld_naca_angle) = max_with_angle(&record.ld_naca, &record.angles)?;
        let (max_cl_bionic, _) = max_with_angle(&record.cl_bionic, &record.angles)?;
        let (max_cl_naca, naca_stall_angle) = max_with_angle(&record.cl_naca, &record.angles)?;

        let ld_improvement_percent = if max_ld_naca.abs() > f64::EPSILON {
            (max_ld_bionic - max_ld_naca) / max_ld_naca * 100.0
        } else {
            f64::NAN
        };

        let pressure_separation_clear_angle = record
            .separation_pressure
            .iter()
            .position(|region| region.is_none())
            .map(|idx| record.angles[idx]);

        let full_suction_separation_angle = record
            .separation_suction
            .iter()
            .position(|region| region.map(|r| r.start <= 0.0).unwrap_or(false))
            .map(|idx| record.angles[idx]);

        Ok(Self {
            max_ld_bionic,
            max_ld_bionic_angle,
            max_ld_naca,
            max_ld_naca_angle,
            ld_improvement_percent,
            max_cl_bionic,
            max_cl_naca,
            naca_stall_angle,
            pressure_separation_clear_angle,
            full_suction_separation_angle,
        })
    }

    pub fn print(&self) {
        println!("\n--- Aerodynamic Summary ---");
        println!(
            "  Maximum L/D (Bionic):    {:.1} at {:.1}°",
            self.max_ld_bionic, self.max_ld_bionic_angle
        );
        println!(
            "  Maximum L/D (NACA 0006): {:.1} at {:.1}°",
            self.max_ld_naca, self.max_ld_naca_angle
        );
        println!("  L/D improvement: {:.1}%", self.ld_improvement_percent);
        println!(
            "  Maximum Cl: Bionic {:.2}, NACA 0006 {:.2} (peaks at {:.1}°)",
            self.max_cl_bionic, self.max_cl_naca, self.naca_stall_angle
        );
        match self.pressure_separation_clear_angle {
            Some(angle) => println!("  Pressure-side separation disappears at {angle:.1}°"),
            None => println!("  Pressure-side separation present at every angle"),
        }
        if let Some(angle) = self.full_suction_separation_angle {
            println!("  Suction side fully separated from the leading edge at {angle:.1}°");
        }
    }
}

/// Suction-side separation onset (x/c) per angle; `None` where the flow stays attached.
pub fn suction_separation_onset(record: &SimulationRecord) -> Vec<(f64, Option<f64>)> {
    record
        .angles
        .iter()
        .zip(record.separation_suction.iter())
        .map(|(&angle, region)| (angle, region.map(|r| r.start)))
        .collect()
}

fn max_with_angle(values: &Array1<f64>, angles: &Array1<f64>) -> Result<(f64, f64), Box<dyn Error>> {
    let idx = values.argmax()?;
    Ok((values[idx], angles[idx]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::cfd_data::load_cfd_data;
    use approx::assert_relative_eq;

    #[test]
    fn test_summary_values() {
        let summary = AeroSummary::from_record(&load_cfd_data()).unwrap();
        assert_eq!(summary.max_ld_bionic_angle, 6.0);
        assert_eq!(summary.max_ld_naca_angle, 6.0);
        assert_relative_eq!(summary.max_ld_bionic, 0.92 / 0.06, epsilon = 1e-12);
        assert_relative_eq!(summary.max_ld_naca, 0.82 / 0.08, epsilon = 1e-12);
        assert!(summary.ld_improvement_percent > 49.0 && summary.ld_improvement_percent < 50.0);
        assert_eq!(summary.naca_stall_angle, 7.5);
        assert_eq!(summary.pressure_separation_clear_angle, Some(3.0));
        assert_eq!(summary.full_suction_separation_angle, Some(9.0));
    }

    #[test]
    fn test_suction_onset_follows_angles() {
        let onset = suction_separation_onset(&load_cfd_data());
        assert_eq!(onset.len(), 7);
        assert_eq!(onset[2], (3.0, Some(0.69)));
        assert_eq!(onset[6], (9.0, Some(0.0)));
    }
}
