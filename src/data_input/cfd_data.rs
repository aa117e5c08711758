// src/data_input/cfd_data.rs

use ndarray::{array, Array1};
use std::error::Error;

/// Chordwise extent of a separated region, in x/c.
/// `start` is the separation point, `end` the reattachment point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparationRegion {
    pub start: f64,
    pub end: f64,
}

impl SeparationRegion {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, x_over_c: f64) -> bool {
        x_over_c >= self.start && x_over_c <= self.end
    }
}

/// CFD results for the bionic airfoil and the NACA 0006 baseline.
/// All coefficient arrays are index-aligned with `angles`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRecord {
    pub angles: Array1<f64>, // Angle of attack (deg)
    pub cl_bionic: Array1<f64>,
    pub cd_bionic: Array1<f64>,
    pub ld_bionic: Array1<f64>,
    pub cl_naca: Array1<f64>,
    pub cd_naca: Array1<f64>,
    pub ld_naca: Array1<f64>,
    pub separation_pressure: Vec<Option<SeparationRegion>>, // Lower surface, None if attached
    pub separation_suction: Vec<Option<SeparationRegion>>,  // Upper surface, None if attached
    pub acoustic_freq: Array1<f64>, // Hz, at 9 deg AOA
    pub acoustic_spl: Array1<f64>,  // dB
    pub directivity_angles_deg: Array1<f64>, // Receiver angle around the airfoil
    pub directivity_spl: Array1<f64>,        // dB
    pub x_upper: Array1<f64>,
    pub z_upper: Array1<f64>,
    pub x_lower: Array1<f64>,
    pub z_lower: Array1<f64>,
}

/// Loads the CFD simulation results.
///
/// The values are the published results for the owl-wing airfoil and are
/// embedded as constants; the function is pure and always returns the same record.
pub fn load_cfd_data() -> SimulationRecord {
    println!("Loading CFD simulation data...");

    let angles = array![0.0, 1.5, 3.0, 4.5, 6.0, 7.5, 9.0];

    // Bionic airfoil
    let cl_bionic = array![0.32, 0.4, 0.62, 0.78, 0.92, 1.02, 1.12];
    let cd_bionic = array![0.041, 0.037, 0.05, 0.052, 0.06, 0.07, 0.083];
    let ld_bionic = &cl_bionic / &cd_bionic;

    // NACA 0006
    let cl_naca = array![0.0, 0.25, 0.45, 0.65, 0.82, 0.85, 0.78];
    let cd_naca = array![0.04, 0.05, 0.06, 0.07, 0.08, 0.10, 0.10];
    let ld_naca = &cl_naca / &cd_naca;

    let separation_pressure = vec![
        Some(SeparationRegion::new(0.15, 0.71)), // 0 deg
        Some(SeparationRegion::new(0.21, 0.58)), // 1.5 deg
        None,
        None,
        None,
        None,
        None,
    ];

    let separation_suction = vec![
        Some(SeparationRegion::new(0.92, 1.0)),
        Some(SeparationRegion::new(0.95, 1.0)),
        Some(SeparationRegion::new(0.69, 1.0)),
        Some(SeparationRegion::new(0.60, 1.0)),
        Some(SeparationRegion::new(0.42, 1.0)),
        Some(SeparationRegion::new(0.08, 1.0)),
        Some(SeparationRegion::new(0.00, 1.0)), // Fully separated from the leading edge
    ];

    let acoustic_freq = array![100.0, 192.0, 500.0, 1000.0, 2000.0, 5000.0, 10000.0, 15000.0];
    let acoustic_spl = array![15.0, 22.6, 12.0, -5.0, -20.0, -30.0, -35.0, -30.0];

    let directivity_angles_deg = Array1::range(0.0, 360.0, 30.0);
    let directivity_spl = array![22.0, 24.0, 26.0, 28.0, 25.0, 20.0, 5.0, 8.0, 12.0, 28.0, 25.0, 18.0];

    let x_surface = array![
        0.0, 0.005, 0.01, 0.02, 0.03, 0.05, 0.075, 0.1, 0.15, 0.2, 0.25, 0.3, 0.4, 0.5, 0.6, 0.7,
        0.8, 0.9, 0.95, 1.0
    ];
    let z_upper = array![
        0.0, 0.0125, 0.0195, 0.0275, 0.032, 0.039, 0.043, 0.043, 0.04, 0.0382, 0.035, 0.032,
        0.026, 0.021, 0.016, 0.012, 0.008, 0.004, 0.002, 0.0
    ];
    let z_lower = array![
        0.0, -0.01, -0.018, -0.027, -0.033, -0.04, -0.042, -0.041, -0.038, -0.034, -0.03, -0.028,
        -0.022, -0.017, -0.012, -0.008, -0.005, -0.002, -0.001, 0.0
    ];

    SimulationRecord {
        angles,
        cl_bionic,
        cd_bionic,
        ld_bionic,
        cl_naca,
        cd_naca,
        ld_naca,
        separation_pressure,
        separation_suction,
        acoustic_freq,
        acoustic_spl,
        directivity_angles_deg,
        directivity_spl,
        x_upper: x_surface.clone(),
        z_upper,
        x_lower: x_surface,
        z_lower,
    }
}

impl SimulationRecord {
    pub fn angle_count(&self) -> usize {
        self.angles.len()
    }

    /// Checks the alignment invariants of the record.
    /// Returns an error naming the first field that violates them.
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        let n = self.angles.len();
        if n == 0 {
            return Err("Record contains no angles of attack".into());
        }

        let aligned = [
            ("cl_bionic", self.cl_bionic.len()),
            ("cd_bionic", self.cd_bionic.len()),
            ("ld_bionic", self.ld_bionic.len()),
            ("cl_naca", self.cl_naca.len()),
            ("cd_naca", self.cd_naca.len()),
            ("ld_naca", self.ld_naca.len()),
            ("separation_pressure", self.separation_pressure.len()),
            ("separation_suction", self.separation_suction.len()),
        ];
        for (name, len) in aligned {
            if len != n {
                return Err(format!("'{name}' has {len} entries, expected {n} (one per angle)").into());
            }
        }

        for (name, cd) in [("cd_bionic", &self.cd_bionic), ("cd_naca", &self.cd_naca)] {
            if let Some(idx) = cd.iter().position(|&v| v == 0.0 || !v.is_finite()) {
                return Err(format!("'{name}' is zero or non-finite at index {idx}").into());
            }
        }

        for (name, cl, cd, ld) in [
            ("ld_bionic", &self.cl_bionic, &self.cd_bionic, &self.ld_bionic),
            ("ld_naca", &self.cl_naca, &self.cd_naca, &self.ld_naca),
        ] {
            for i in 0..n {
                let expected = cl[i] / cd[i];
                if (ld[i] - expected).abs() > 1e-9 * expected.abs().max(1.0) {
                    return Err(format!(
                        "'{name}'[{i}] = {:.4} does not equal Cl/Cd = {expected:.4}",
                        ld[i]
                    )
                    .into());
                }
            }
        }

        if self.angles.windows(2).into_iter().any(|w| w[1] <= w[0]) {
            return Err("'angles' must be strictly increasing".into());
        }

        let surface_len = self.x_upper.len();
        if surface_len < 2 {
            return Err("Surface coordinates need at least two points".into());
        }
        for (name, len) in [
            ("z_upper", self.z_upper.len()),
            ("x_lower", self.x_lower.len()),
            ("z_lower", self.z_lower.len()),
        ] {
            if len != surface_len {
                return Err(format!("'{name}' has {len} points, expected {surface_len}").into());
            }
        }
        if self.x_upper != self.x_lower {
            return Err("Upper and lower surfaces must share the same x/c sequence".into());
        }
        if self.x_upper.windows(2).into_iter().any(|w| w[1] <= w[0]) {
            return Err("Surface x/c sequence must be strictly increasing".into());
        }

        if self.acoustic_freq.len() != self.acoustic_spl.len() {
            return Err("'acoustic_freq' and 'acoustic_spl' lengths differ".into());
        }
        if self.acoustic_freq.iter().any(|&f| f <= 0.0) {
            return Err("'acoustic_freq' must be positive for the log-frequency axis".into());
        }
        if self.directivity_angles_deg.len() != self.directivity_spl.len() {
            return Err("'directivity_angles_deg' and 'directivity_spl' lengths differ".into());
        }

        for (side, regions) in [
            ("separation_pressure", &self.separation_pressure),
            ("separation_suction", &self.separation_suction),
        ] {
            for (i, region) in regions.iter().enumerate() {
                if let Some(r) = region {
                    if !(0.0..=1.0).contains(&r.start) || !(0.0..=1.0).contains(&r.end) || r.end < r.start {
                        return Err(format!(
                            "'{side}'[{i}] = ({}, {}) is not a valid x/c interval",
                            r.start, r.end
                        )
                        .into());
                    }
                }
            }
        }

        Ok(())
    }

    /// Airfoil thickness (upper minus lower) at each surface station.
    pub fn thickness(&self) -> Array1<f64> {
        &self.z_upper - &self.z_lower
    }

    /// Mean camber line at each surface station.
    pub fn camber(&self) -> Array1<f64> {
        (&self.z_upper + &self.z_lower) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_coefficient_arrays_aligned_with_angles() {
        let data = load_cfd_data();
        assert_eq!(data.angles.len(), 7);
        assert_eq!(data.cl_bionic.len(), 7);
        assert_eq!(data.cd_bionic.len(), 7);
        assert_eq!(data.cl_naca.len(), 7);
        assert_eq!(data.cd_naca.len(), 7);
        assert_eq!(data.separation_pressure.len(), 7);
        assert_eq!(data.separation_suction.len(), 7);
    }

    #[test]
    fn test_lift_to_drag_is_elementwise_quotient() {
        let data = load_cfd_data();
        for i in 0..data.angle_count() {
            assert_eq!(data.ld_bionic[i], data.cl_bionic[i] / data.cd_bionic[i]);
            assert_eq!(data.ld_naca[i], data.cl_naca[i] / data.cd_naca[i]);
        }
        assert_relative_eq!(data.ld_bionic[0], 7.804878, epsilon = 1e-5);
        assert_eq!(data.ld_naca[0], 0.0);
    }

    #[test]
    fn test_surface_sequences_share_x() {
        let data = load_cfd_data();
        assert_eq!(data.x_upper.len(), 20);
        assert_eq!(data.z_upper.len(), 20);
        assert_eq!(data.x_lower.len(), 20);
        assert_eq!(data.z_lower.len(), 20);
        assert_eq!(data.x_upper, data.x_lower);
    }

    #[test]
    fn test_separation_entries() {
        let data = load_cfd_data();
        assert_eq!(data.separation_pressure[0], Some(SeparationRegion::new(0.15, 0.71)));
        assert!(data.separation_pressure[2..].iter().all(|r| r.is_none()));
        assert_eq!(data.separation_suction[6], Some(SeparationRegion::new(0.0, 1.0)));
        assert!(data.separation_suction.iter().all(|r| r.is_some()));
    }

    #[test]
    fn test_validate_accepts_loaded_record() {
        assert!(load_cfd_data().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_misaligned_array() {
        let mut data = load_cfd_data();
        data.cd_naca = array![0.04, 0.05];
        let err = data.validate().unwrap_err().to_string();
        assert!(err.contains("cd_naca"), "unexpected error: {err}");
    }

    #[test]
    fn test_validate_rejects_zero_drag() {
        let mut data = load_cfd_data();
        data.cd_bionic[3] = 0.0;
        let err = data.validate().unwrap_err().to_string();
        assert!(err.contains("cd_bionic"), "unexpected error: {err}");
    }

    #[test]
    fn test_validate_rejects_inverted_region() {
        let mut data = load_cfd_data();
        data.separation_suction[1] = Some(SeparationRegion::new(0.9, 0.2));
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_thickness_and_camber() {
        let data = load_cfd_data();
        let thickness = data.thickness();
        let camber = data.camber();
        assert_relative_eq!(thickness[7], 0.084, epsilon = 1e-12);
        assert_relative_eq!(camber[7], 0.001, epsilon = 1e-12);
        assert_eq!(thickness[0], 0.0);
        assert_eq!(thickness[19], 0.0);
    }
}
