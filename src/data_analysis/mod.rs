// src/data_analysis/mod.rs

pub mod aero_summary;
pub mod derivative;
pub mod flow_field;
pub mod interpolation;
pub mod pressure_signal;

// src/data_analysis/mod.rs
