// src/plot_functions/mod.rs

pub mod peak_detection;
pub mod plot_acoustic_analysis;
pub mod plot_aerodynamic_coefficients;
pub mod plot_airfoil_geometry;
pub mod plot_combined_summary;
pub mod plot_dp_dt_distribution;
pub mod plot_flow_separation;
pub mod plot_flow_visualization;

// src/plot_functions/mod.rs
