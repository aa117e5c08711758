// src/constants.rs

use plotters::style::colors::full_palette::{BLUE_700, GREY_500, ORANGE_800, RED_700, TEAL_600};
use plotters::style::RGBColor;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1920;
pub const PLOT_HEIGHT: u32 = 1080;

// Font sizes (pixels).
pub const FONT_SIZE_MAIN_TITLE: i32 = 26;
pub const FONT_SIZE_CHART_TITLE: i32 = 22;
pub const FONT_SIZE_AXIS_LABEL: i32 = 16;
pub const FONT_SIZE_LEGEND: i32 = 16;
pub const FONT_SIZE_ANNOTATION: i32 = 15;
pub const FONT_SIZE_MESSAGE: i32 = 20;

// Default output naming.
pub const DEFAULT_OUTPUT_PREFIX: &str = "OwlWing";
pub const DEFAULT_OUTPUT_DIR: &str = ".";

// AOA indices rendered by the flow-field plots (0°, 3°, 7.5°, 9°).
pub const FLOW_VISUALIZATION_AOA_INDICES: [usize; 4] = [0, 2, 5, 6];

// --- Plot Color Assignments ---
pub const COLOR_BIONIC: &RGBColor = &BLUE_700;
pub const COLOR_NACA: &RGBColor = &RED_700;
pub const COLOR_CHORD_LINE: &RGBColor = &GREY_500;
pub const COLOR_CAMBER_LINE: &RGBColor = &ORANGE_800;
pub const COLOR_THICKNESS: &RGBColor = &TEAL_600;
pub const COLOR_SEPARATION_SUCTION: &RGBColor = &RED_700;
pub const COLOR_SEPARATION_PRESSURE: &RGBColor = &BLUE_700;
pub const COLOR_ACOUSTIC: &RGBColor = &BLUE_700;
pub const COLOR_DPDT_SUCTION: &RGBColor = &RED_700;
pub const COLOR_DPDT_PRESSURE: &RGBColor = &BLUE_700;
pub const COLOR_PRESSURE_SIGNAL: &RGBColor = &TEAL_600;
pub const COLOR_AIRFOIL_OUTLINE: RGBColor = RGBColor(20, 20, 20);
pub const COLOR_POLAR_GRID: RGBColor = RGBColor(190, 190, 190);

// Opacity for filled regions.
pub const FILL_OPACITY_PROFILE: f64 = 0.25;
pub const FILL_OPACITY_SEPARATION: f64 = 0.45;
pub const FILL_OPACITY_DIRECTIVITY: f64 = 0.2;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 2;
pub const LINE_WIDTH_THIN: u32 = 1;
pub const LINE_WIDTH_LEGEND: u32 = 2;
pub const MARKER_SIZE: u32 = 5;

// Half-height of a separation band on the AOA axis (degrees).
pub const SEPARATION_BAND_HALF_HEIGHT_DEG: f64 = 0.5;

// Number of points for spline-resampled curves.
pub const SPLINE_RESAMPLE_POINTS: usize = 200;

// --- Flow Field Constants ---
// Chord and freestream are normalized to 1.
pub const FLOW_GRID_X_MIN: f64 = -0.5;
pub const FLOW_GRID_X_MAX: f64 = 1.6;
pub const FLOW_GRID_Y_MIN: f64 = -0.6;
pub const FLOW_GRID_Y_MAX: f64 = 0.6;
pub const FLOW_GRID_NX: usize = 126;
pub const FLOW_GRID_NY: usize = 72;
pub const FLOW_VORTEX_X: f64 = 0.25; // Quarter chord
pub const FLOW_VORTEX_CORE_RADIUS: f64 = 0.05;
pub const FLOW_SAMPLE_RING_COUNT: usize = 14;
pub const FLOW_SAMPLE_RING_POINTS: usize = 56;
pub const FLOW_SAMPLE_RING_MIN_RADIUS: f64 = 0.08;
pub const FLOW_SAMPLE_RING_MAX_RADIUS: f64 = 1.6;
pub const FLOW_SURFACE_OFFSETS: [f64; 4] = [0.008, 0.025, 0.05, 0.09];
pub const FLOW_IDW_POWER: f64 = 2.0;
pub const WAKE_BASE_THICKNESS: f64 = 0.02;
pub const WAKE_GROWTH_RATE: f64 = 0.12;
pub const WAKE_SUCTION_DEFICIT: f64 = 0.75;
pub const WAKE_PRESSURE_DEFICIT: f64 = 0.45;
pub const WAKE_DECAY_LENGTH: f64 = 0.35;
pub const COLORBAR_WIDTH_PX: u32 = 110;
pub const COLORBAR_STEPS: usize = 100;

// --- Acoustic Constants ---
pub const PEAK_DETECTION_WINDOW_RADIUS: usize = 1;
pub const MAX_PEAKS_TO_LABEL: usize = 2;
pub const PEAK_LABEL_MIN_SPL_DB: f64 = 0.0;
pub const MIN_SECONDARY_PEAK_DROP_DB: f64 = 12.0; // Secondary peaks within this many dB of the primary
pub const MIN_PEAK_SEPARATION_OCTAVES: f64 = 1.0;
pub const POLAR_RING_COUNT: usize = 5;
pub const POLAR_SPOKE_STEP_DEG: f64 = 30.0;

// --- Synthetic Trailing-Edge Pressure Signal (dP/dt plot) ---
pub const DPDT_SAMPLE_RATE_HZ: f64 = 48_000.0;
pub const DPDT_DURATION_S: f64 = 0.02;
pub const DPDT_FUNDAMENTAL_HZ: f64 = 192.0; // Matches the SPL peak
// (harmonic number, amplitude in Pa, phase in rad)
pub const DPDT_HARMONICS: [(f64, f64, f64); 4] = [
    (1.0, 0.50, 0.0),
    (2.0, 0.18, 0.6),
    (3.0, 0.08, 1.3),
    (5.0, 0.03, 2.1),
];
pub const DPDT_CHORD_POINTS: usize = 101;
pub const DPDT_TRAILING_EDGE_GAIN: f64 = 6.0;
pub const DPDT_TRAILING_EDGE_LENGTH: f64 = 0.08;
pub const DPDT_LEADING_EDGE_GAIN: f64 = 1.2;
pub const DPDT_LEADING_EDGE_LENGTH: f64 = 0.03;
pub const DPDT_PRESSURE_SIDE_SCALE: f64 = 0.55;

// src/constants.rs
