//! Error-bar scatter chart of a 1D histogram, rendered with [`plotters`].
//!
//! One marker per bin at the bin midpoint and height, vertical bars for the
//! height error and horizontal bars spanning the bin.

use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;
use tracing::debug;

use crate::core::Histo1D;
use crate::render::{register_embedded_font, PlotError, PlotStyle, Result, X_LABEL, Y_LABEL};

/// One marker of the chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorBarPoint {
    pub x: f64,
    pub y: f64,
    /// Half the bin width
    pub x_err: f64,
    pub y_err: f64,
}

impl ErrorBarPoint {
    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.x_err.is_finite() && self.y_err.is_finite()
    }
}

/// Chart points for every bin of `histo`
#[must_use]
pub fn points_from_histogram(histo: &Histo1D) -> Vec<ErrorBarPoint> {
    histo
        .x_mids()
        .into_iter()
        .zip(histo.y_vals())
        .zip(histo.x_widths())
        .zip(histo.y_errs())
        .map(|(((x, y), width), y_err)| ErrorBarPoint {
            x,
            y,
            x_err: width / 2.0,
            y_err,
        })
        .collect()
}

/// Axis ranges covering all bars, with a small margin on the value axis
///
/// # Errors
///
/// Returns `PlotError::InvalidData` if there are no finite points.
pub fn axis_ranges(points: &[ErrorBarPoint]) -> Result<(Range<f64>, Range<f64>)> {
    let finite: Vec<&ErrorBarPoint> = points.iter().filter(|p| p.is_finite()).collect();
    if finite.is_empty() {
        return Err(PlotError::InvalidData(
            "Histogram has no finite bins to plot".to_string(),
        ));
    }

    let x_min = finite.iter().map(|p| p.x - p.x_err).fold(f64::INFINITY, f64::min);
    let x_max = finite
        .iter()
        .map(|p| p.x + p.x_err)
        .fold(f64::NEG_INFINITY, f64::max);
    let y_min = finite.iter().map(|p| p.y - p.y_err).fold(f64::INFINITY, f64::min);
    let y_max = finite
        .iter()
        .map(|p| p.y + p.y_err)
        .fold(f64::NEG_INFINITY, f64::max);

    Ok((padded(x_min, x_max, 0.02), padded(y_min, y_max, 0.05)))
}

fn padded(min: f64, max: f64, fraction: f64) -> Range<f64> {
    // Degenerate range: open it up around the single value
    if max <= min {
        let half = if min == 0.0 { 1.0 } else { min.abs() * 0.5 };
        return (min - half)..(max + half);
    }
    let pad = (max - min) * fraction;
    (min - pad)..(max + pad)
}

/// Render the error-bar chart of `points` to a PNG file
///
/// Text uses the embedded font, so title and axis labels are drawn on every host.
///
/// # Errors
///
/// Returns a `PlotError` if the data is unusable or drawing fails.
pub fn render_png(
    points: &[ErrorBarPoint],
    title: &str,
    style: &PlotStyle,
    output_path: &Path,
) -> Result<()> {
    let (x_range, y_range) = axis_ranges(points)?;
    register_embedded_font(style.font_family)?;

    debug!(
        path = %output_path.display(),
        points = points.len(),
        width = style.width,
        height = style.height,
        "Rendering error-bar plot"
    );

    let root = BitMapBackend::new(output_path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(style.margin)
        .caption(title, (style.font_family, style.title_size))
        .x_label_area_size(style.label_area_size)
        .y_label_area_size(style.label_area_size + 20)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .axis_desc_style((style.font_family, style.axis_desc_size))
        .label_style((style.font_family, style.tick_label_size))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let color = style.color;
    let finite = || points.iter().filter(|p| p.is_finite());

    chart
        .draw_series(finite().map(|p| {
            ErrorBar::new_vertical(p.x, p.y - p.y_err, p.y, p.y + p.y_err, color.filled(), 0)
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(finite().map(|p| {
            ErrorBar::new_horizontal(p.y, p.x - p.x_err, p.x, p.x + p.x_err, color.filled(), 0)
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(finite().map(|p| Circle::new((p.x, p.y), style.marker_size, color.filled())))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}
