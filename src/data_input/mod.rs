// src/data_input/mod.rs

pub mod cfd_data;

// src/data_input/mod.rs
