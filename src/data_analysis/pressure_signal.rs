// src/data_analysis/pressure_signal.rs
//
// Synthetic surface-pressure fluctuation at the trailing edge and the chordwise
// distribution of its time derivative (dP/dt), the acoustic source term of the
// trailing-edge noise.

use ndarray::Array1;
use std::f64::consts::PI;

use crate::constants::{
    DPDT_CHORD_POINTS, DPDT_DURATION_S, DPDT_FUNDAMENTAL_HZ, DPDT_HARMONICS,
    DPDT_LEADING_EDGE_GAIN, DPDT_LEADING_EDGE_LENGTH, DPDT_PRESSURE_SIDE_SCALE,
    DPDT_SAMPLE_RATE_HZ, DPDT_TRAILING_EDGE_GAIN, DPDT_TRAILING_EDGE_LENGTH,
};
use crate::data_analysis::derivative::{calculate_derivative, rms};

#[derive(Debug, Clone)]
pub struct DpDtData {
    pub time_s: Vec<f64>,
    pub pressure_pa: Vec<f64>,
    pub dp_dt: Vec<f64>, // Pa/s
    pub chord_x: Vec<f64>,
    pub rms_dp_dt_suction: Vec<f64>,
    pub rms_dp_dt_pressure: Vec<f64>,
}

/// Trailing-edge pressure fluctuation: the vortex shedding tone and its harmonics.
pub fn trailing_edge_pressure(t: f64) -> f64 {
    DPDT_HARMONICS
        .iter()
        .map(|&(harmonic, amplitude, phase)| {
            amplitude * (2.0 * PI * harmonic * DPDT_FUNDAMENTAL_HZ * t + phase).sin()
        })
        .sum()
}

/// Relative fluctuation amplitude along the chord, 1.0 at mid chord rising
/// steeply towards the trailing edge with a weaker leading-edge peak.
pub fn chordwise_amplitude(x_over_c: f64) -> f64 {
    let x = x_over_c.clamp(0.0, 1.0);
    let trailing = DPDT_TRAILING_EDGE_GAIN * ((x - 1.0) / DPDT_TRAILING_EDGE_LENGTH).exp();
    let leading = DPDT_LEADING_EDGE_GAIN * (-x / DPDT_LEADING_EDGE_LENGTH).exp();
    (1.0 + trailing + leading) / (1.0 + DPDT_TRAILING_EDGE_GAIN)
}

/// Builds the dP/dt data set. Takes no inputs and is deterministic.
pub fn create_dp_dt_data() -> DpDtData {
    let sample_count = (DPDT_DURATION_S * DPDT_SAMPLE_RATE_HZ).round() as usize;
    let time_s: Vec<f64> = (0..sample_count)
        .map(|i| i as f64 / DPDT_SAMPLE_RATE_HZ)
        .collect();
    let pressure_pa: Vec<f64> = time_s.iter().map(|&t| trailing_edge_pressure(t)).collect();
    let dp_dt = calculate_derivative(&pressure_pa, DPDT_SAMPLE_RATE_HZ);

    let te_rms = rms(&dp_dt);
    let chord = Array1::linspace(0.0, 1.0, DPDT_CHORD_POINTS);
    let rms_dp_dt_suction: Vec<f64> = chord.iter().map(|&x| te_rms * chordwise_amplitude(x)).collect();
    let rms_dp_dt_pressure: Vec<f64> = rms_dp_dt_suction
        .iter()
        .map(|v| v * DPDT_PRESSURE_SIDE_SCALE)
        .collect();

    DpDtData {
        time_s,
        pressure_pa,
        dp_dt,
        chord_x: chord.to_vec(),
        rms_dp_dt_suction,
        rms_dp_dt_pressure,
    }
}
