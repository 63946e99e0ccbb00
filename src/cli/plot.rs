use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tempfile::TempPath;
use tracing::{info, warn};

use crate::cli::{Cli, OutputFormat};
use crate::core::AnalysisObjects;
use crate::matching::{
    prefix_order, Candidate, MatchingConfig, MatchingEngine, SelectError, Selection,
};
use crate::parsing::yoda::parse_yoda_file;
use crate::render::errorbar::{points_from_histogram, render_png, ErrorBarPoint};
use crate::render::{plot_title, png_path_for, PlotStyle};

/// What was plotted, as printed after a successful run
#[derive(Debug, Serialize)]
pub struct PlotSummary {
    pub input: String,
    pub histogram: String,
    /// `Title` annotation of the histogram in the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram_title: Option<String>,
    pub prefix: String,
    pub events: f64,
    pub events_err: f64,
    pub event_entries: f64,
    pub cross_section: f64,
    pub cross_section_err: f64,
    pub eff_entries: f64,
    pub bins: usize,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<String>,
    pub rejected: Vec<Candidate>,
}

impl PlotSummary {
    fn new(input: &Path, selection: &Selection<'_>, title: String, saved: Option<&Path>) -> Self {
        Self {
            input: input.display().to_string(),
            histogram: selection.histogram.path.clone(),
            histogram_title: selection.histogram.title.clone(),
            prefix: selection.prefix.to_string(),
            events: selection.num_events(),
            events_err: selection.event_count.err(),
            event_entries: selection.event_count.num_entries(),
            cross_section: selection.cross_section.val(),
            cross_section_err: selection.cross_section.err_avg(),
            eff_entries: selection.eff_entries,
            bins: selection.histogram.num_bins(),
            title,
            saved: saved.map(|p| p.display().to_string()),
            rejected: selection.rejected.clone(),
        }
    }
}

/// Execute the plot command
///
/// Returns the temporary preview image, if one was created; it is deleted
/// when dropped, so the caller keeps it until the session ends.
///
/// # Errors
///
/// Returns an error if the file cannot be read, no data or no matching
/// histogram is found, or rendering fails.
pub fn run(cli: &Cli) -> anyhow::Result<Option<TempPath>> {
    let objects = parse_yoda_file(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;

    if cli.verbose {
        eprintln!(
            "Read {} analysis objects from {}",
            objects.len(),
            cli.input.display()
        );
    }

    if cli.list {
        print_object_list(&objects, cli.format)?;
        return Ok(None);
    }

    let config = MatchingConfig::default()
        .with_histogram(cli.histogram.clone())
        .with_prefixes(prefix_order(cli.raw, cli.reference))
        .with_min_eff_entries(cli.min_entries);

    let engine = MatchingEngine::new(&objects, config);
    let selection = engine
        .find()
        .map_err(|e| selection_error(&e, &cli.input))?;

    let title = plot_title(selection.num_events(), &selection.prefix);
    let points = points_from_histogram(selection.histogram);
    let style = PlotStyle::default();

    let saved = if cli.save {
        let path = png_path_for(&cli.input);
        render_png(&points, &title, &style, &path)
            .with_context(|| format!("Failed to save plot to {}", path.display()))?;
        info!(path = %path.display(), "Saved plot");
        Some(path)
    } else {
        None
    };

    let preview = if cli.no_show {
        None
    } else {
        show(&points, &title, &style, saved.as_deref())?
    };

    let summary = PlotSummary::new(&cli.input, &selection, title, saved.as_deref());
    match cli.format {
        OutputFormat::Text => print_text_summary(&summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Tsv => print_tsv_summary(&summary),
    }

    Ok(preview)
}

fn selection_error(err: &SelectError, input: &Path) -> anyhow::Error {
    match err {
        SelectError::NoData => {
            anyhow::anyhow!("No analysis objects read from {}", input.display())
        }
        SelectError::HistogramNotFound { histogram, tried } => {
            for candidate in tried {
                info!(
                    histogram = %histogram,
                    prefix = %candidate.prefix,
                    reason = %candidate.rejection,
                    "Not usable"
                );
            }
            anyhow::anyhow!("Histogram not found in {}", input.display())
        }
    }
}

/// Open the plot in the system image viewer.
///
/// Uses the saved image when there is one, otherwise renders to a temporary file.
fn show(
    points: &[ErrorBarPoint],
    title: &str,
    style: &PlotStyle,
    saved: Option<&Path>,
) -> anyhow::Result<Option<TempPath>> {
    let (path, guard): (PathBuf, Option<TempPath>) = if let Some(saved) = saved {
        (saved.to_path_buf(), None)
    } else {
        let preview = tempfile::Builder::new()
            .prefix("yoda-plot-")
            .suffix(".png")
            .tempfile()
            .context("Failed to create preview file")?
            .into_temp_path();
        render_png(points, title, style, &preview)?;
        (preview.to_path_buf(), Some(preview))
    };

    // A missing viewer is not fatal; the image is still on disk
    if let Err(e) = open::that(&path) {
        warn!(path = %path.display(), error = %e, "Could not open plot viewer");
    }

    Ok(guard)
}

fn print_text_summary(summary: &PlotSummary) {
    println!("Plot Summary");
    println!("{}", "=".repeat(60));

    println!("\nInput: {}", summary.input);
    println!("  Histogram: {}", summary.histogram);
    if let Some(histogram_title) = &summary.histogram_title {
        println!("  Histogram title: {histogram_title}");
    }
    if summary.prefix.is_empty() {
        println!("  Prefix: (none)");
    } else {
        println!("  Prefix: {}", summary.prefix);
    }
    println!("  Bins: {}", summary.bins);
    println!("  Effective entries: {:.2}", summary.eff_entries);
    println!(
        "  Events: {} ± {:.2} ({} entries)",
        summary.events, summary.events_err, summary.event_entries
    );
    println!(
        "  Cross-section: {:e} ± {:e}",
        summary.cross_section, summary.cross_section_err
    );

    if !summary.rejected.is_empty() {
        println!("\nSkipped:");
        for candidate in &summary.rejected {
            let prefix = if candidate.prefix.is_empty() {
                "(none)".to_string()
            } else {
                candidate.prefix.to_string()
            };
            println!("  {prefix}: {}", candidate.rejection);
        }
    }

    println!("\nTitle: {}", summary.title);
    if let Some(saved) = &summary.saved {
        println!("Saved: {saved}");
    }
}

fn print_tsv_summary(summary: &PlotSummary) {
    println!("histogram\tprefix\tevents\tcross_section\teff_entries\tbins\ttitle\tsaved");
    println!(
        "{}\t{}\t{}\t{:e}\t{:.4}\t{}\t{}\t{}",
        summary.histogram,
        summary.prefix,
        summary.events,
        summary.cross_section,
        summary.eff_entries,
        summary.bins,
        summary.title,
        summary.saved.as_deref().unwrap_or(""),
    );
}

fn print_object_list(objects: &AnalysisObjects, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for object in objects.iter() {
                println!("{:<10} {}", object.kind().to_string(), object.path());
            }
        }
        OutputFormat::Json => {
            let entries: Vec<_> = objects
                .iter()
                .map(|o| serde_json::json!({ "type": o.kind().to_string(), "path": o.path() }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Tsv => {
            println!("type\tpath");
            for object in objects.iter() {
                println!("{}\t{}", object.kind(), object.path());
            }
        }
    }
    Ok(())
}
