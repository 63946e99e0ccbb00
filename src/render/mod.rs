//! Plot rendering.
//!
//! Charts are drawn with the [`plotters`] bitmap backend and written as PNG.
//! The same PNG is used for on-screen preview (opened in the system image
//! viewer) and for `--save`.

use std::path::{Path, PathBuf};

use plotters::style::{register_font, FontStyle, RGBColor};
use thiserror::Error;

use crate::core::Prefix;

pub mod errorbar;

/// Horizontal axis label: pseudorapidity
pub const X_LABEL: &str = "η";

/// Vertical axis label: charged-particle density per unit pseudorapidity
pub const Y_LABEL: &str = "dN_ch/dη";

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save plot to file: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Failed to load font: {0}")]
    Font(String),
}

pub type Result<T> = std::result::Result<T, PlotError>;

/// DejaVu Sans, shipped with the binary so text renders without system fonts
static DEJAVU_SANS: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Register the embedded font under `family` for all text drawn by plotters
///
/// # Errors
///
/// Returns `PlotError::Font` if the embedded font data cannot be parsed.
pub fn register_embedded_font(family: &str) -> Result<()> {
    register_font(family, FontStyle::Normal, DEJAVU_SANS).map_err(|_| {
        PlotError::Font(format!(
            "embedded DejaVu Sans is not a valid font for '{family}'"
        ))
    })
}

/// Visual parameters of a chart
#[derive(Debug, Clone)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    pub label_area_size: u32,
    pub font_family: &'static str,
    pub title_size: u32,
    pub axis_desc_size: u32,
    pub tick_label_size: u32,
    pub marker_size: u32,
    pub color: RGBColor,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            margin: 20,
            label_area_size: 50,
            font_family: "sans-serif",
            title_size: 28,
            axis_desc_size: 22,
            tick_label_size: 16,
            marker_size: 4,
            // matplotlib's default first cycle color
            color: RGBColor(31, 119, 180),
        }
    }
}

/// Chart title: the integer event count, followed by the prefix when there is one
///
/// # Examples
///
/// ```
/// use yoda_plot::core::Prefix;
/// use yoda_plot::render::plot_title;
///
/// assert_eq!(plot_title(1000.0, &Prefix::none()), "1000 events");
/// assert_eq!(plot_title(999.9, &Prefix::raw()), "999 events (/RAW)");
/// ```
#[must_use]
pub fn plot_title(num_events: f64, prefix: &Prefix) -> String {
    #[allow(clippy::cast_possible_truncation)] // Event counts fit in i64
    let events = num_events.trunc() as i64;
    if prefix.is_empty() {
        format!("{events} events")
    } else {
        format!("{events} events ({prefix})")
    }
}

/// Where `--save` writes the image for `input`: same directory and stem, `.png` extension
#[must_use]
pub fn png_path_for(input: &Path) -> PathBuf {
    input.with_extension("png")
}
