// src/font_config.rs

// Global font style constants for plot rendering.
// All figures use a serif family to match publication figures.

use crate::constants::{
    FONT_SIZE_ANNOTATION, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE, FONT_SIZE_LEGEND,
    FONT_SIZE_MAIN_TITLE, FONT_SIZE_MESSAGE,
};

/// Font family name resolved by plotters through the system font database
pub const FONT_FAMILY_SERIF: &str = "serif";

// Tuple representations for use with plotters' IntoFont trait
// These are convenient for direct use with plotters methods like `.caption()` and `.label_style()`
pub const FONT_TUPLE_MAIN_TITLE: (&str, i32) = (FONT_FAMILY_SERIF, FONT_SIZE_MAIN_TITLE);
pub const FONT_TUPLE_CHART_TITLE: (&str, i32) = (FONT_FAMILY_SERIF, FONT_SIZE_CHART_TITLE);
pub const FONT_TUPLE_AXIS_LABEL: (&str, i32) = (FONT_FAMILY_SERIF, FONT_SIZE_AXIS_LABEL);
pub const FONT_TUPLE_LEGEND: (&str, i32) = (FONT_FAMILY_SERIF, FONT_SIZE_LEGEND);
pub const FONT_TUPLE_ANNOTATION: (&str, i32) = (FONT_FAMILY_SERIF, FONT_SIZE_ANNOTATION);
pub const FONT_TUPLE_MESSAGE: (&str, i32) = (FONT_FAMILY_SERIF, FONT_SIZE_MESSAGE);
