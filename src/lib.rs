// src/lib.rs - Library interface for internal module access

pub mod constants;
pub mod data_analysis;
pub mod data_input;
pub mod data_output;
pub mod font_config;
pub mod pipeline;
pub mod plot_context;
pub mod plot_framework;
pub mod plot_functions;

pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
