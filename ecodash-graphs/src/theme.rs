//! Chart color themes

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

/// Light/dark palette selected by the dashboard theme toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartTheme {
    #[default]
    Light,
    Dark,
}

impl ChartTheme {
    /// Parse a theme query value; anything unrecognized falls back to light
    pub fn from_param(value: &str) -> Self {
        if value.eq_ignore_ascii_case("dark") {
            ChartTheme::Dark
        } else {
            ChartTheme::Light
        }
    }

    /// Chart background fill
    pub fn background(&self) -> RGBColor {
        match self {
            ChartTheme::Light => RGBColor(255, 255, 255),
            ChartTheme::Dark => RGBColor(17, 24, 39),
        }
    }

    /// Title and axis label color
    pub fn foreground(&self) -> RGBColor {
        match self {
            ChartTheme::Light => RGBColor(31, 41, 55),
            ChartTheme::Dark => RGBColor(229, 231, 235),
        }
    }

    /// Grid line color
    pub fn grid(&self) -> RGBColor {
        match self {
            ChartTheme::Light => RGBColor(209, 213, 219),
            ChartTheme::Dark => RGBColor(55, 65, 81),
        }
    }

    /// Default series color when none is configured
    pub fn accent(&self) -> RGBColor {
        match self {
            ChartTheme::Light => RGBColor(31, 119, 180),
            ChartTheme::Dark => RGBColor(96, 165, 250),
        }
    }
}
