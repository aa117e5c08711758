// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, ChartContext, SeriesLabelPosition};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, PathElement, Polygon, Rectangle, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use std::error::Error;
use std::f64::consts::PI;
use std::ops::Range;
use std::path::Path;

use crate::constants::{
    COLORBAR_STEPS, COLORBAR_WIDTH_PX, COLOR_POLAR_GRID, FONT_SIZE_MESSAGE, LINE_WIDTH_LEGEND,
    LINE_WIDTH_THIN, MARKER_SIZE, PLOT_HEIGHT, PLOT_WIDTH, POLAR_RING_COUNT, POLAR_SPOKE_STEP_DEG,
};
use crate::font_config::{
    FONT_TUPLE_ANNOTATION, FONT_TUPLE_AXIS_LABEL, FONT_TUPLE_CHART_TITLE, FONT_TUPLE_LEGEND,
    FONT_TUPLE_MAIN_TITLE, FONT_TUPLE_MESSAGE,
};

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// (min, max) of the y values of every series, ignoring non-finite points.
pub fn series_y_bounds(series: &[PlotSeries]) -> Option<(f64, f64)> {
    let (lo, hi) = series
        .iter()
        .flat_map(|s| s.data.iter())
        .map(|&(_, y)| y)
        .filter(|y| y.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| (lo.min(y), hi.max(y)));
    if lo.is_finite() && hi.is_finite() {
        Some((lo, hi))
    } else {
        None
    }
}

const AXIS_ZERO_EPSILON: f64 = 1e-9;

/// Y-axis tick label. Large values get "k"/"M" notation, small fractional values keep
/// decimals, dB axes stay integer.
pub fn format_y_axis_label(y: f64, y_label: &str) -> String {
    // Ticks computed as lo + k * step land a rounding error away from zero
    let y = if y.abs() < AXIS_ZERO_EPSILON { 0.0 } else { y };
    if !y_label.contains("dB") {
        if y.abs() >= 1_000_000.0 {
            format!("{:.1}M", y / 1_000_000.0)
        } else if y.abs() >= 1000.0 {
            format!("{:.0}k", y / 1000.0)
        } else if y.abs() < 0.1 && y != 0.0 {
            format!("{:.3}", y)
        } else if y.abs() < 10.0 && y.fract() != 0.0 {
            format!("{:.2}", y)
        } else {
            format!("{:.0}", y)
        }
    } else {
        format!("{:.0}", y)
    }
}

/// X-axis tick label. On log10 axes the stored coordinate is the exponent.
pub fn format_x_axis_label(x: f64, log10_axis: bool) -> String {
    let x = if x.abs() < AXIS_ZERO_EPSILON { 0.0 } else { x };
    if log10_axis {
        let value = 10f64.powf(x);
        if value >= 1000.0 {
            format!("{:.1}k", value / 1000.0)
        } else {
            format!("{:.0}", value)
        }
    } else if x.fract() == 0.0 {
        format!("{:.0}", x)
    } else {
        format!("{:.2}", x)
    }
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &DrawingArea<BitMapBackend, Shift>,
    plot_type: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>> {
    const CHAR_WIDTH_RATIO: f32 = 0.6; // Approximate character width relative to font size

    let (width, height) = area.dim_in_pixel();
    let message = format!("{plot_type} Data Unavailable: {reason}");
    let estimated_text_width =
        (message.len() as f32 * FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let center_x = width as i32 / 2 - estimated_text_width / 2;
    let center_y = height as i32 / 2 - FONT_SIZE_MESSAGE / 2;

    let text_style = FONT_TUPLE_MESSAGE.into_font().color(&RED);
    area.draw(&Text::new(message, (center_x.max(0), center_y), text_style))?;
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegendPosition {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl LegendPosition {
    fn to_plotters(self) -> SeriesLabelPosition {
        match self {
            LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
            LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
            LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
        }
    }
}

/// A line and/or marker series. `stroke_width == 0` draws markers only,
/// `marker_size == 0` draws the line only.
#[derive(Clone, Debug)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
    pub marker_size: u32,
}

impl PlotSeries {
    pub fn line(data: Vec<(f64, f64)>, label: &str, color: RGBColor, stroke_width: u32) -> Self {
        Self {
            data,
            label: label.to_string(),
            color,
            stroke_width,
            marker_size: 0,
        }
    }

    pub fn line_with_markers(data: Vec<(f64, f64)>, label: &str, color: RGBColor, stroke_width: u32) -> Self {
        Self {
            marker_size: MARKER_SIZE,
            ..Self::line(data, label, color, stroke_width)
        }
    }

    pub fn markers(data: Vec<(f64, f64)>, label: &str, color: RGBColor) -> Self {
        Self {
            stroke_width: 0,
            marker_size: MARKER_SIZE,
            ..Self::line(data, label, color, 0)
        }
    }
}

/// Filled polygon drawn beneath the series (airfoil profile, separation bands, ...)
#[derive(Clone, Debug)]
pub struct PlotPolygon {
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
    pub opacity: f64, // 0.0 to 1.0
    pub label: String,
}

/// Text placed at a data coordinate
#[derive(Clone, Debug)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct PlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub polygons: Vec<PlotPolygon>,
    pub annotations: Vec<Annotation>,
    pub x_label: String,
    pub y_label: String,
    pub x_axis_log10: bool,
    pub legend_position: LegendPosition,
}

impl PlotConfig {
    pub fn new(title: &str, x_range: Range<f64>, y_range: Range<f64>, x_label: &str, y_label: &str) -> Self {
        Self {
            title: title.to_string(),
            x_range,
            y_range,
            series: Vec::new(),
            polygons: Vec::new(),
            annotations: Vec::new(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            x_axis_log10: false,
            legend_position: LegendPosition::UpperRight,
        }
    }

    fn has_data(&self) -> bool {
        self.series.iter().any(|s| !s.data.is_empty())
            || self.polygons.iter().any(|p| !p.points.is_empty())
    }
}

/// Selects the continuous colormap of a heatmap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMap {
    Viridis,
    CoolWarm, // Blue for low values, red for high values
}

#[derive(Clone, Debug)]
pub struct HeatmapData {
    pub x_bins: Vec<f64>,
    pub y_bins: Vec<f64>,
    pub values: Vec<Vec<Option<f64>>>, // [x_idx][y_idx], None cells are left blank
}

#[derive(Clone, Debug)]
pub struct HeatmapPlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub heatmap_data: HeatmapData,
    pub x_label: String,
    pub y_label: String,
    pub value_range: (f64, f64), // Color scale limits
    pub colorbar_label: String,
    pub color_map: ColorMap,
    pub overlay: Vec<PlotSeries>,
}

#[derive(Clone, Debug)]
pub struct PolarPlotConfig {
    pub title: String,
    pub angles_deg: Vec<f64>,
    pub radii: Vec<f64>,
    pub radial_max: f64,
    pub radial_unit: String,
    pub label: String,
    pub color: RGBColor,
    pub fill_opacity: f64,
}

/// One cell of a figure grid.
#[derive(Clone, Debug)]
pub enum Panel {
    Chart(PlotConfig),
    Heatmap(HeatmapPlotConfig),
    Polar(PolarPlotConfig),
}

impl Panel {
    pub fn title(&self) -> &str {
        match self {
            Panel::Chart(c) => &c.title,
            Panel::Heatmap(c) => &c.title,
            Panel::Polar(c) => &c.title,
        }
    }

    /// Reason the panel cannot be drawn, if any.
    pub fn unavailable_reason(&self) -> Option<&'static str> {
        let (has_data, valid_ranges) = match self {
            Panel::Chart(c) => (
                c.has_data(),
                c.x_range.end > c.x_range.start && c.y_range.end > c.y_range.start,
            ),
            Panel::Heatmap(c) => (
                c.heatmap_data.values.iter().any(|row| row.iter().any(|v| v.is_some())),
                c.x_range.end > c.x_range.start
                    && c.y_range.end > c.y_range.start
                    && c.value_range.1 > c.value_range.0,
            ),
            Panel::Polar(c) => (
                !c.radii.is_empty() && c.radii.len() == c.angles_deg.len(),
                c.radial_max > 0.0,
            ),
        };
        if !has_data {
            Some("No data points")
        } else if !valid_ranges {
            Some("Invalid ranges")
        } else {
            None
        }
    }
}

pub fn map_value_to_color(value: f64, min: f64, max: f64, color_map: ColorMap) -> RGBColor {
    // Validate input parameters
    if !value.is_finite() || !min.is_finite() || !max.is_finite() {
        return RGBColor(0, 0, 0); // Black for invalid values
    }

    // Ensure span is non-zero to avoid division by zero
    let span = (max - min).abs().max(1e-9);
    let t = ((value.clamp(min, max) - min) / span).clamp(0.0, 1.0);

    let color = match color_map {
        ColorMap::Viridis => colorous::VIRIDIS.eval_continuous(t),
        ColorMap::CoolWarm => colorous::RED_BLUE.eval_continuous(1.0 - t),
    };
    RGBColor(color.r, color.g, color.b)
}

fn draw_series_on_chart<'a, 'b>(
    chart: &mut ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    series: &[PlotSeries],
) -> Result<usize, Box<dyn Error>> {
    let mut legend_series_count = 0;
    for s in series {
        if s.data.is_empty() {
            continue;
        }
        let color = s.color;

        if s.stroke_width > 0 {
            let drawn = chart.draw_series(LineSeries::new(
                s.data.iter().cloned(),
                color.stroke_width(s.stroke_width),
            ))?;
            if !s.label.is_empty() {
                drawn.label(&s.label).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH_LEGEND))
                });
                legend_series_count += 1;
            }
        }

        if s.marker_size > 0 {
            let marker_size = s.marker_size;
            let drawn = chart.draw_series(
                s.data
                    .iter()
                    .map(move |&point| Circle::new(point, marker_size, color.filled())),
            )?;
            // Marker-only series carry their own legend entry
            if s.stroke_width == 0 && !s.label.is_empty() {
                drawn
                    .label(&s.label)
                    .legend(move |(x, y)| Circle::new((x + 10, y), marker_size, color.filled()));
                legend_series_count += 1;
            }
        }
    }
    Ok(legend_series_count)
}

/// Draws a single cartesian chart from a PlotConfig.
pub fn draw_chart(
    area: &DrawingArea<BitMapBackend, Shift>,
    plot_config: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    let mut chart = ChartBuilder::on(area)
        .caption(&plot_config.title, FONT_TUPLE_CHART_TITLE)
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(plot_config.x_range.clone(), plot_config.y_range.clone())?;

    let x_log = plot_config.x_axis_log10;
    let y_label = plot_config.y_label.as_str();
    chart
        .configure_mesh()
        .x_desc(&plot_config.x_label)
        .y_desc(&plot_config.y_label)
        .x_labels(10)
        .y_labels(8)
        .x_label_formatter(&|x: &f64| format_x_axis_label(*x, x_log))
        .y_label_formatter(&|y: &f64| format_y_axis_label(*y, y_label))
        .light_line_style(WHITE.mix(0.7))
        .label_style(FONT_TUPLE_AXIS_LABEL)
        .axis_desc_style(FONT_TUPLE_AXIS_LABEL)
        .draw()?;

    let mut legend_series_count = 0;

    // Draw filled regions BEFORE series (so data appears on top)
    for polygon in &plot_config.polygons {
        if polygon.points.is_empty() {
            continue;
        }
        let fill = polygon.color.mix(polygon.opacity);
        let drawn = chart.draw_series(std::iter::once(Polygon::new(
            polygon.points.clone(),
            fill.filled(),
        )))?;
        if !polygon.label.is_empty() {
            drawn
                .label(&polygon.label)
                .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 20, y + 6)], fill.filled()));
            legend_series_count += 1;
        }
    }

    legend_series_count += draw_series_on_chart(&mut chart, &plot_config.series)?;

    for annotation in &plot_config.annotations {
        chart.draw_series(std::iter::once(Text::new(
            annotation.text.clone(),
            (annotation.x, annotation.y),
            FONT_TUPLE_ANNOTATION.into_font().color(&BLACK),
        )))?;
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(plot_config.legend_position.to_plotters())
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(FONT_TUPLE_LEGEND)
            .draw()?;
    }

    Ok(())
}

/// Draws a heatmap with a colorbar strip on its right side.
pub fn draw_heatmap_chart(
    area: &DrawingArea<BitMapBackend, Shift>,
    plot_config: &HeatmapPlotConfig,
) -> Result<(), Box<dyn Error>> {
    let split_x = area.dim_in_pixel().0.saturating_sub(COLORBAR_WIDTH_PX);
    let (map_area, bar_area) = area.split_horizontally(split_x as i32);
    let (v_min, v_max) = plot_config.value_range;

    let mut chart = ChartBuilder::on(&map_area)
        .caption(&plot_config.title, FONT_TUPLE_CHART_TITLE)
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(plot_config.x_range.clone(), plot_config.y_range.clone())?;

    let y_label = plot_config.y_label.as_str();
    chart
        .configure_mesh()
        .x_desc(&plot_config.x_label)
        .y_desc(&plot_config.y_label)
        .x_labels(10)
        .y_labels(8)
        .x_label_formatter(&|x: &f64| format_x_axis_label(*x, false))
        .y_label_formatter(&|y: &f64| format_y_axis_label(*y, y_label))
        .disable_mesh()
        .label_style(FONT_TUPLE_AXIS_LABEL)
        .axis_desc_style(FONT_TUPLE_AXIS_LABEL)
        .draw()?;

    let heatmap_data = &plot_config.heatmap_data;
    // Calculate bin widths for rectangle sizing
    let x_bin_width = if heatmap_data.x_bins.len() > 1 {
        heatmap_data.x_bins[1] - heatmap_data.x_bins[0]
    } else {
        1.0 // fallback for single bin
    };
    let y_bin_width = if heatmap_data.y_bins.len() > 1 {
        heatmap_data.y_bins[1] - heatmap_data.y_bins[0]
    } else {
        1.0 // fallback for single bin
    };

    let mut cells = Vec::with_capacity(heatmap_data.x_bins.len() * heatmap_data.y_bins.len());
    for (x_idx, &x_val) in heatmap_data.x_bins.iter().enumerate() {
        for (y_idx, &y_val) in heatmap_data.y_bins.iter().enumerate() {
            let value = heatmap_data
                .values
                .get(x_idx)
                .and_then(|row| row.get(y_idx))
                .copied()
                .flatten();
            if let Some(value) = value {
                let color = map_value_to_color(value, v_min, v_max, plot_config.color_map);
                cells.push(Rectangle::new(
                    [
                        (x_val - x_bin_width * 0.5, y_val - y_bin_width * 0.5),
                        (x_val + x_bin_width * 0.5, y_val + y_bin_width * 0.5),
                    ],
                    color.filled(),
                ));
            }
        }
    }
    chart.draw_series(cells)?;

    let legend_series_count = draw_series_on_chart(&mut chart, &plot_config.overlay)?;
    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(FONT_TUPLE_LEGEND)
            .draw()?;
    }

    // Colorbar
    let mut bar = ChartBuilder::on(&bar_area)
        .margin_top(45)
        .margin_bottom(60)
        .margin_right(10)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0, v_min..v_max)?;
    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc(&plot_config.colorbar_label)
        .y_labels(6)
        .y_label_formatter(&|y: &f64| format!("{:.2}", y))
        .label_style(FONT_TUPLE_AXIS_LABEL)
        .axis_desc_style(FONT_TUPLE_AXIS_LABEL)
        .draw()?;
    let step = (v_max - v_min) / COLORBAR_STEPS as f64;
    bar.draw_series((0..COLORBAR_STEPS).map(|i| {
        let lo = v_min + step * i as f64;
        let color = map_value_to_color(lo + step * 0.5, v_min, v_max, plot_config.color_map);
        Rectangle::new([(0.0, lo), (1.0, lo + step)], color.filled())
    }))?;

    Ok(())
}

/// Draws a polar pattern (e.g. sound directivity) on a square-ish cartesian chart.
/// Angles are measured counter-clockwise from the +x axis.
pub fn draw_polar_chart(
    area: &DrawingArea<BitMapBackend, Shift>,
    plot_config: &PolarPlotConfig,
) -> Result<(), Box<dyn Error>> {
    let (width, height) = area.dim_in_pixel();
    let aspect = width as f64 / height.max(1) as f64;
    let limit = plot_config.radial_max * 1.2;

    let mut chart = ChartBuilder::on(area)
        .caption(&plot_config.title, FONT_TUPLE_CHART_TITLE)
        .margin(10)
        .build_cartesian_2d(-limit * aspect..limit * aspect, -limit..limit)?;

    let polar = |angle_deg: f64, r: f64| {
        let theta = angle_deg * PI / 180.0;
        (r * theta.cos(), r * theta.sin())
    };

    // Concentric rings with radial labels
    for ring in 1..=POLAR_RING_COUNT {
        let r = plot_config.radial_max * ring as f64 / POLAR_RING_COUNT as f64;
        chart.draw_series(LineSeries::new(
            (0..=72).map(|k| polar(k as f64 * 5.0, r)),
            COLOR_POLAR_GRID.stroke_width(LINE_WIDTH_THIN),
        ))?;
        chart.draw_series(std::iter::once(Text::new(
            format!("{:.0} {}", r, plot_config.radial_unit),
            polar(80.0, r),
            FONT_TUPLE_ANNOTATION.into_font().color(&BLACK),
        )))?;
    }

    // Spokes with angle labels
    let spoke_count = (360.0 / POLAR_SPOKE_STEP_DEG).round() as usize;
    for k in 0..spoke_count {
        let angle = k as f64 * POLAR_SPOKE_STEP_DEG;
        chart.draw_series(LineSeries::new(
            vec![(0.0, 0.0), polar(angle, plot_config.radial_max)],
            COLOR_POLAR_GRID.stroke_width(LINE_WIDTH_THIN),
        ))?;
        chart.draw_series(std::iter::once(Text::new(
            format!("{angle:.0}°"),
            polar(angle, plot_config.radial_max * 1.08),
            FONT_TUPLE_ANNOTATION.into_font().color(&BLACK),
        )))?;
    }

    let mut points: Vec<(f64, f64)> = plot_config
        .angles_deg
        .iter()
        .zip(plot_config.radii.iter())
        .map(|(&angle, &r)| polar(angle, r.max(0.0)))
        .collect();

    let color = plot_config.color;
    chart.draw_series(std::iter::once(Polygon::new(
        points.clone(),
        color.mix(plot_config.fill_opacity).filled(),
    )))?;
    chart.draw_series(points.iter().map(|&p| Circle::new(p, MARKER_SIZE, color.filled())))?;
    if let Some(&first) = points.first() {
        points.push(first);
    }
    chart
        .draw_series(LineSeries::new(points, color.stroke_width(LINE_WIDTH_LEGEND)))?
        .label(&plot_config.label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH_LEGEND)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(FONT_TUPLE_LEGEND)
        .draw()?;

    Ok(())
}

/// Creates a figure with the panels laid out on a (rows, columns) grid.
/// Panels without usable data are replaced by a placeholder message.
pub fn draw_panel_grid(
    output_path: &Path,
    main_title: &str,
    layout: (usize, usize),
    panels: &[Panel],
) -> Result<(), Box<dyn Error>> {
    let root_area = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;
    root_area.draw(&Text::new(
        main_title,
        (10, 10),
        FONT_TUPLE_MAIN_TITLE.into_font().color(&BLACK),
    ))?;
    let margined_root_area = root_area.margin(50, 5, 5, 5);
    let sub_plot_areas = margined_root_area.split_evenly(layout);
    let mut any_panel_drawn = false;

    for (area, panel) in sub_plot_areas.iter().zip(panels.iter()) {
        if let Some(reason) = panel.unavailable_reason() {
            draw_unavailable_message(area, panel.title(), reason)?;
            continue;
        }
        match panel {
            Panel::Chart(config) => draw_chart(area, config)?,
            Panel::Heatmap(config) => draw_heatmap_chart(area, config)?,
            Panel::Polar(config) => draw_polar_chart(area, config)?,
        }
        any_panel_drawn = true;
    }

    if panels.len() > sub_plot_areas.len() {
        eprintln!(
            "  Warning: {} panel(s) did not fit the {}x{} layout of '{}'.",
            panels.len() - sub_plot_areas.len(),
            layout.0,
            layout.1,
            output_path.display()
        );
    }

    root_area.present()?;
    if any_panel_drawn {
        println!("  Plot saved as '{}'.", output_path.display());
    } else {
        println!(
            "  Saved '{}' with placeholder messages only: no panel had data to plot.",
            output_path.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_range_pads_and_orders() {
        let (lo, hi) = calculate_range(10.0, 0.0);
        assert!((lo + 1.5).abs() < 1e-12);
        assert!((hi - 11.5).abs() < 1e-12);
        let (lo, hi) = calculate_range(2.0, 2.0);
        assert_eq!((lo, hi), (1.5, 2.5));
    }

    #[test]
    fn test_series_y_bounds_skips_non_finite() {
        let series = vec![
            PlotSeries::line(vec![(0.0, 1.0), (1.0, f64::NAN)], "a", RED, 1),
            PlotSeries::line(vec![(0.0, -2.0), (1.0, 4.0)], "b", RED, 1),
        ];
        assert_eq!(series_y_bounds(&series), Some((-2.0, 4.0)));
        assert_eq!(series_y_bounds(&[]), None);
    }

    #[test]
    fn test_log_axis_labels() {
        assert_eq!(format_x_axis_label(2.0, true), "100");
        assert_eq!(format_x_axis_label(4.0, true), "10.0k");
        assert_eq!(format_x_axis_label(1.5, false), "1.50");
        assert_eq!(format_x_axis_label(3.0, false), "3");
    }

    #[test]
    fn test_color_map_endpoints() {
        let low = map_value_to_color(0.0, 0.0, 1.0, ColorMap::Viridis);
        let high = map_value_to_color(1.0, 0.0, 1.0, ColorMap::Viridis);
        assert_ne!(low, high);
        // Out of range values clamp to the ends
        assert_eq!(map_value_to_color(-5.0, 0.0, 1.0, ColorMap::Viridis), low);
        assert_eq!(map_value_to_color(f64::NAN, 0.0, 1.0, ColorMap::CoolWarm), RGBColor(0, 0, 0));
        // CoolWarm: high values are red dominant
        let hot = map_value_to_color(1.0, 0.0, 1.0, ColorMap::CoolWarm);
        assert!(hot.0 > hot.2);
    }

    #[test]
    fn test_panel_unavailable_reasons() {
        let empty = Panel::Chart(PlotConfig::new("t", 0.0..1.0, 0.0..1.0, "x", "y"));
        assert_eq!(empty.unavailable_reason(), Some("No data points"));

        let mut inverted = PlotConfig::new("t", 1.0..0.0, 0.0..1.0, "x", "y");
        inverted.series.push(PlotSeries::line(vec![(0.0, 0.0)], "", RED, 1));
        assert_eq!(Panel::Chart(inverted).unavailable_reason(), Some("Invalid ranges"));

        let polar = Panel::Polar(PolarPlotConfig {
            title: "p".to_string(),
            angles_deg: vec![0.0, 90.0],
            radii: vec![1.0, 2.0],
            radial_max: 2.0,
            radial_unit: "dB".to_string(),
            label: "l".to_string(),
            color: RED,
            fill_opacity: 0.2,
        });
        assert_eq!(polar.unavailable_reason(), None);
    }
}
