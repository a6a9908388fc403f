//! Chart rasterization
//!
//! Renders into an RGB buffer with the bitmap backend and encodes the result
//! as PNG bytes, so callers can serve the chart straight from memory or
//! write it to an export file unchanged.

use crate::theme::ChartTheme;
use ecodash_common::{EcodashError, Result};
use image::{codecs::png::PngEncoder, ColorType, ImageEncoder};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

/// Rendering options shared by the dashboard chart and the plot export
#[derive(Debug, Clone)]
pub struct ChartOptions {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Color theme (dashboard toggle)
    pub theme: ChartTheme,
    /// Series color; falls back to the theme accent when `None`
    pub line_color: Option<RGBColor>,
    /// Whether to draw grid lines behind the series
    pub show_grid: bool,
    /// Font family for titles and labels
    pub font_family: String,
    /// Font size for axis labels
    pub font_size: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 900,
            height: 520,
            theme: ChartTheme::Light,
            line_color: None,
            show_grid: true,
            font_family: "sans-serif".to_string(),
            font_size: 14,
        }
    }
}

impl ChartOptions {
    /// Same options at a different output resolution (plot export)
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    fn series_color(&self) -> RGBColor {
        self.line_color.unwrap_or_else(|| self.theme.accent())
    }

    fn title_font_size(&self) -> u32 {
        self.font_size + 10
    }
}

/// Parse a "#RRGGBB" color string
pub fn parse_hex_color(color: &str) -> Option<RGBColor> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(RGBColor(r, g, b))
}

/// Render a single-series line chart to PNG bytes.
///
/// An empty series falls through to the placeholder so callers never have to
/// treat "no rows" as an error.
pub fn render_line_chart(
    title: &str,
    points: &[(i32, f64)],
    options: &ChartOptions,
) -> Result<Vec<u8>> {
    if points.is_empty() {
        return render_placeholder(title, options);
    }

    let (width, height) = (options.width, options.height);
    let mut buffer = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&options.theme.background())?;

        let (x_range, y_range) = axis_ranges(points);
        let foreground = options.theme.foreground();

        let mut chart = ChartBuilder::on(&root)
            .caption(
                title,
                (options.font_family.as_str(), options.title_font_size())
                    .into_font()
                    .color(&foreground),
            )
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, y_range)?;

        let x_formatter = |year: &i32| format!("{}", year);
        let y_formatter = |value: &f64| format_axis_value(*value);
        let label_style = (options.font_family.as_str(), options.font_size)
            .into_font()
            .color(&foreground);

        let mut mesh = chart.configure_mesh();
        mesh.label_style(label_style)
            .axis_style(foreground)
            .x_desc("Year")
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter);
        if options.show_grid {
            mesh.bold_line_style(options.theme.grid().mix(0.5))
                .light_line_style(options.theme.grid().mix(0.15));
        } else {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        let color = options.series_color();
        chart.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?;
        chart.draw_series(
            points
                .iter()
                .map(|(year, value)| Circle::new((*year, *value), 3, color.filled())),
        )?;

        root.present()?;
    }

    debug!("Rendered {}x{} line chart with {} points", width, height, points.len());
    encode_png(&buffer, width, height)
}

/// Render a chart area that carries only an explanatory title.
///
/// Used for missing selections, empty filter results, and invalid year
/// bounds; always succeeds with a drawable image.
pub fn render_placeholder(message: &str, options: &ChartOptions) -> Result<Vec<u8>> {
    let (width, height) = (options.width, options.height);
    let mut buffer = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&options.theme.background())?;

        let style = (options.font_family.as_str(), options.title_font_size())
            .into_font()
            .color(&options.theme.foreground())
            .pos(Pos::new(HPos::Center, VPos::Center));
        root.draw(&Text::new(
            message.to_string(),
            (width as i32 / 2, height as i32 / 2),
            style,
        ))?;

        root.present()?;
    }

    encode_png(&buffer, width, height)
}

/// Compute padded axis ranges for the series
fn axis_ranges(points: &[(i32, f64)]) -> (std::ops::Range<i32>, std::ops::Range<f64>) {
    let x_min = points.iter().map(|(x, _)| *x).min().unwrap_or(0);
    let x_max = points.iter().map(|(x, _)| *x).max().unwrap_or(1);
    let y_min = points.iter().map(|(_, y)| *y).fold(f64::INFINITY, f64::min);
    let y_max = points
        .iter()
        .map(|(_, y)| *y)
        .fold(f64::NEG_INFINITY, f64::max);

    // A single year or a flat series still needs a drawable span
    let x_pad = (((x_max - x_min) as f64) * 0.05).ceil() as i32;
    let x_pad = x_pad.max(1);
    let y_spread = y_max - y_min;
    let y_pad = if y_spread > 0.0 {
        y_spread * 0.05
    } else {
        (y_max.abs() * 0.1).max(1.0)
    };

    (
        (x_min - x_pad)..(x_max + x_pad),
        (y_min - y_pad)..(y_max + y_pad),
    )
}

/// Compact axis labels: magnitude suffixes for large values, decimals for
/// fractional ones
fn format_axis_value(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1e12 {
        format!("{:.1}T", value / 1e12)
    } else if magnitude >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if magnitude >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if magnitude >= 1e3 {
        format!("{:.1}K", value / 1e3)
    } else if magnitude >= 1.0 || magnitude == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.3}", value)
    }
}

/// Encode an RGB buffer as PNG bytes
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(buffer, width, height, ColorType::Rgb8)
        .map_err(|e| EcodashError::chart_with_source("PNG encoding failed", e))?;
    Ok(png)
}
