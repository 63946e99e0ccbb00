//! Reader for the YODA text format written by Rivet.
//!
//! A file is a sequence of blocks:
//!
//! ```text
//! BEGIN YODA_COUNTER_V2 /_EVTCOUNT
//! Path=/_EVTCOUNT
//! Type=Counter
//! ---
//! # sumW	 sumW2	 numEntries
//! 1.000000e+03	1.000000e+03	1.000000e+03
//! END YODA_COUNTER_V2
//! ```
//!
//! Annotations come before the `---` separator (`Key=Value` in YODA1,
//! `Key: Value` in YODA2), data rows after it. Legacy files without a
//! separator are accepted. Blocks of unsupported types are skipped.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::histogram::{Dbn1D, Histo1D, HistoBin1D};
use crate::core::types::{block_version, ObjectKind};
use crate::core::{AnalysisObject, AnalysisObjects, Counter, Estimate};
use crate::parsing::format::read_text;
use crate::utils::validation::{check_bin_limit, check_object_limit};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YODA format: {0}")]
    InvalidFormat(String),

    #[error("Unterminated block '{path}' starting on line {line}")]
    UnterminatedBlock { path: String, line: usize },

    #[error("Too many objects: {0} exceeds maximum allowed (100000)")]
    TooManyObjects(usize),

    #[error("Too many bins in '{0}': exceeds maximum allowed (1000000)")]
    TooManyBins(String),
}

/// Parse a YODA file (plain or gzip-compressed)
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_yoda_file(path: &Path) -> Result<AnalysisObjects, ParseError> {
    let text = read_text(path)?;
    let objects = parse_yoda_text(&text)?;
    debug!(path = %path.display(), objects = objects.len(), "Parsed YODA file");
    Ok(objects)
}

/// Parse YODA objects from text
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` for malformed blocks or data rows,
/// `ParseError::UnterminatedBlock` if a block has no `END` line, or
/// `ParseError::TooManyObjects`/`ParseError::TooManyBins` if a limit is exceeded.
pub fn parse_yoda_text(text: &str) -> Result<AnalysisObjects, ParseError> {
    let mut objects = AnalysisObjects::new();
    let mut current: Option<Block<'_>> = None;

    for (i, raw_line) in text.lines().enumerate() {
        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;
        let line = raw_line.trim();

        if let Some(rest) = line.strip_prefix("BEGIN YODA_") {
            if let Some(open) = &current {
                return Err(ParseError::UnterminatedBlock {
                    path: open.path.clone(),
                    line: open.start_line,
                });
            }
            current = Some(Block::open(rest, line_num));
            continue;
        }

        if let Some(rest) = line.strip_prefix("END YODA_") {
            let block = current.take().ok_or_else(|| {
                ParseError::InvalidFormat(format!("Line {line_num}: END without matching BEGIN"))
            })?;
            let end_tag = rest.trim();
            if end_tag != block.tag {
                return Err(ParseError::InvalidFormat(format!(
                    "Line {line_num}: END YODA_{end_tag} does not match BEGIN YODA_{}",
                    block.tag
                )));
            }

            if let Some(object) = block.finish()? {
                // Check object limit for DOS protection
                if check_object_limit(objects.len()).is_some() {
                    return Err(ParseError::TooManyObjects(objects.len()));
                }
                objects.insert(object);
            }
            continue;
        }

        // Text between blocks is ignored
        if let Some(block) = current.as_mut() {
            block.push_line(line, line_num);
        }
    }

    if let Some(open) = current {
        return Err(ParseError::UnterminatedBlock {
            path: open.path,
            line: open.start_line,
        });
    }

    Ok(objects)
}

/// An open `BEGIN ... END` block being collected
struct Block<'a> {
    tag: &'a str,
    path: String,
    start_line: usize,
    title: Option<String>,
    in_data: bool,
    rows: Vec<(usize, &'a str)>,
}

impl<'a> Block<'a> {
    fn open(header: &'a str, line_num: usize) -> Self {
        let (tag, path) = match header.split_once(char::is_whitespace) {
            Some((tag, path)) => (tag, path.trim()),
            None => (header, ""),
        };

        Self {
            tag,
            path: path.to_string(),
            start_line: line_num,
            title: None,
            in_data: false,
            rows: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &'a str, line_num: usize) {
        if line.is_empty() {
            return;
        }

        if !self.in_data {
            if line == "---" {
                self.in_data = true;
                return;
            }
            if let Some((key, value)) = split_annotation(line) {
                self.annotate(key, value);
                return;
            }
        }

        if line.starts_with('#') {
            return;
        }

        self.rows.push((line_num, line));
    }

    fn annotate(&mut self, key: &str, value: &str) {
        match key {
            // The BEGIN line path wins; older files only carry it here
            "Path" if self.path.is_empty() => self.path = value.to_string(),
            "Title" if !value.is_empty() => self.title = Some(value.to_string()),
            _ => {}
        }
    }

    fn finish(self) -> Result<Option<AnalysisObject>, ParseError> {
        let Some(kind) = ObjectKind::from_block_tag(self.tag) else {
            debug!(tag = self.tag, path = %self.path, "Skipping unsupported object type");
            return Ok(None);
        };

        if self.path.is_empty() {
            return Err(ParseError::InvalidFormat(format!(
                "Block YODA_{} starting on line {} has no path",
                self.tag, self.start_line
            )));
        }

        let object = match kind {
            ObjectKind::Histo1D => {
                let histo = if block_version(self.tag) >= 3 {
                    self.histo1d_with_edges()?
                } else {
                    self.histo1d_with_bin_rows()?
                };
                AnalysisObject::Histo1D(histo)
            }
            ObjectKind::Counter => AnalysisObject::Counter(self.counter()?),
            ObjectKind::Estimate => AnalysisObject::Estimate(self.estimate()?),
        };

        Ok(Some(object))
    }

    /// YODA1 layout: `Total`/`Underflow`/`Overflow` rows, then one row per bin
    fn histo1d_with_bin_rows(self) -> Result<Histo1D, ParseError> {
        let mut bins = Vec::new();
        let mut total = None;
        let mut underflow = Dbn1D::default();
        let mut overflow = Dbn1D::default();

        for &(line_num, row) in &self.rows {
            let fields: Vec<&str> = row.split_whitespace().collect();
            match fields[0] {
                "Total" => total = Some(labelled_dbn(&fields, line_num)?),
                "Underflow" => underflow = labelled_dbn(&fields, line_num)?,
                "Overflow" => overflow = labelled_dbn(&fields, line_num)?,
                first if first.ends_with(':') => {}
                _ => {
                    let values = parse_numbers(&fields, line_num)?;
                    if values.len() < 7 {
                        return Err(ParseError::InvalidFormat(format!(
                            "Line {line_num}: expected 7 fields for a histogram bin, found {}",
                            values.len()
                        )));
                    }
                    if values[1] <= values[0] {
                        return Err(ParseError::InvalidFormat(format!(
                            "Line {line_num}: bin upper edge {} is not above lower edge {}",
                            values[1], values[0]
                        )));
                    }

                    // Check bin limit for DOS protection
                    if check_bin_limit(bins.len()).is_some() {
                        return Err(ParseError::TooManyBins(self.path));
                    }

                    bins.push(HistoBin1D::new(values[0], values[1], dbn(&values[2..7])));
                }
            }
        }

        let mut histo = Histo1D::new(self.path, bins).with_flows(underflow, overflow);
        if let Some(total) = total {
            histo = histo.with_total(total);
        }
        if let Some(title) = self.title {
            histo = histo.with_title(title);
        }
        Ok(histo)
    }

    /// YODA2 layout: an `Edges(A1)` list, then one row per bin including both flows
    fn histo1d_with_edges(self) -> Result<Histo1D, ParseError> {
        let mut edges: Option<Vec<f64>> = None;
        let mut dbns = Vec::new();

        for &(line_num, row) in &self.rows {
            if let Some(list) = row.strip_prefix("Edges(A1):") {
                edges = Some(parse_edges(list, line_num)?);
                continue;
            }

            let fields: Vec<&str> = row.split_whitespace().collect();
            if fields[0].ends_with(':') {
                continue;
            }

            let values = parse_numbers(&fields, line_num)?;
            if values.len() < 5 {
                return Err(ParseError::InvalidFormat(format!(
                    "Line {line_num}: expected 5 fields for a histogram bin, found {}",
                    values.len()
                )));
            }

            // Check bin limit for DOS protection
            if check_bin_limit(dbns.len()).is_some() {
                return Err(ParseError::TooManyBins(self.path));
            }

            dbns.push(dbn(&values[..5]));
        }

        let edges = edges.ok_or_else(|| {
            ParseError::InvalidFormat(format!("Histogram '{}' has no Edges(A1) line", self.path))
        })?;

        if edges.len() < 2 {
            return Err(ParseError::InvalidFormat(format!(
                "Histogram '{}' needs at least 2 edges, found {}",
                self.path,
                edges.len()
            )));
        }
        if edges.windows(2).any(|w| w[1] <= w[0]) {
            return Err(ParseError::InvalidFormat(format!(
                "Histogram '{}' has edges that are not strictly increasing",
                self.path
            )));
        }
        if dbns.len() != edges.len() + 1 {
            return Err(ParseError::InvalidFormat(format!(
                "Histogram '{}' has {} bin rows, expected {} for {} edges",
                self.path,
                dbns.len(),
                edges.len() + 1,
                edges.len()
            )));
        }

        let underflow = dbns[0];
        let overflow = dbns[dbns.len() - 1];
        let bins = edges
            .windows(2)
            .zip(&dbns[1..dbns.len() - 1])
            .map(|(w, d)| HistoBin1D::new(w[0], w[1], *d))
            .collect();

        let mut histo = Histo1D::new(self.path, bins).with_flows(underflow, overflow);
        if let Some(title) = self.title {
            histo = histo.with_title(title);
        }
        Ok(histo)
    }

    /// `sumW sumW2 numEntries`
    fn counter(self) -> Result<Counter, ParseError> {
        let (line_num, values) = self.first_numeric_row()?;
        if values.len() < 3 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num}: expected 3 fields for a counter, found {}",
                values.len()
            )));
        }
        Ok(Counter::new(self.path, values[0], values[1], values[2]))
    }

    /// `xval xerr- xerr+` (YODA1 scatter point) or `value errDn errUp` (YODA2 estimate)
    fn estimate(self) -> Result<Estimate, ParseError> {
        let (line_num, values) = self.first_numeric_row()?;
        let estimate = match values.as_slice() {
            [value] => Estimate::new(self.path, *value, 0.0, 0.0),
            [value, err] => Estimate::new(self.path, *value, *err, *err),
            [value, down, up, ..] => Estimate::new(self.path, *value, *down, *up),
            [] => {
                return Err(ParseError::InvalidFormat(format!(
                    "Line {line_num}: empty estimate row"
                )))
            }
        };
        Ok(estimate)
    }

    fn first_numeric_row(&self) -> Result<(usize, Vec<f64>), ParseError> {
        let mut numeric_rows = self.rows.iter().filter(|(_, row)| {
            row.split_whitespace()
                .next()
                .is_some_and(|first| !first.ends_with(':'))
        });

        let Some(&(line_num, row)) = numeric_rows.next() else {
            return Err(ParseError::InvalidFormat(format!(
                "Object '{}' has no data",
                self.path
            )));
        };

        if numeric_rows.next().is_some() {
            warn!(path = %self.path, "Object has more than one data row, using the first");
        }

        let fields: Vec<&str> = row.split_whitespace().collect();
        Ok((line_num, parse_numbers(&fields, line_num)?))
    }
}

/// Split a `Key=Value` or `Key: Value` annotation line
fn split_annotation(line: &str) -> Option<(&str, &str)> {
    let pos = line.find(['=', ':'])?;
    let key = &line[..pos];
    let is_identifier = key.starts_with(|c: char| c.is_ascii_alphabetic())
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !is_identifier {
        return None;
    }
    Some((key, line[pos + 1..].trim()))
}

fn parse_numbers(fields: &[&str], line_num: usize) -> Result<Vec<f64>, ParseError> {
    fields
        .iter()
        .map(|field| {
            field.parse::<f64>().map_err(|_| {
                ParseError::InvalidFormat(format!("Invalid number on line {line_num}: '{field}'"))
            })
        })
        .collect()
}

/// `Total Total sumw sumw2 sumwx sumwx2 numEntries`
fn labelled_dbn(fields: &[&str], line_num: usize) -> Result<Dbn1D, ParseError> {
    if fields.len() < 7 {
        return Err(ParseError::InvalidFormat(format!(
            "Line {line_num}: expected 7 fields for '{}', found {}",
            fields[0],
            fields.len()
        )));
    }
    let values = parse_numbers(&fields[2..7], line_num)?;
    Ok(dbn(&values))
}

fn dbn(values: &[f64]) -> Dbn1D {
    Dbn1D::new(values[0], values[1], values[2], values[3], values[4])
}

/// Parse `[e0, e1, ...]`
fn parse_edges(list: &str, line_num: usize) -> Result<Vec<f64>, ParseError> {
    let inner = list
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| {
            ParseError::InvalidFormat(format!("Line {line_num}: edges must be a [...] list"))
        })?;

    let fields: Vec<&str> = inner
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    parse_numbers(&fields, line_num)
}

#[cfg(test)]
mod tests {
    use super::*;

    const YODA1: &str = r"
BEGIN YODA_COUNTER_V2 /_EVTCOUNT
Path=/_EVTCOUNT
Title=
Type=Counter
---
# sumW	 sumW2	 numEntries
1.000000e+03	1.000000e+03	1.000000e+03
END YODA_COUNTER_V2

BEGIN YODA_SCATTER1D_V2 /_XSEC
Path=/_XSEC
Type=Scatter1D
---
# xval	 xerr-	 xerr+
5.000000e+01	1.000000e+00	2.000000e+00
END YODA_SCATTER1D_V2

BEGIN YODA_HISTO1D_V2 /ALICE_YYYY_I1234567/d01-x01-y01
Path=/ALICE_YYYY_I1234567/d01-x01-y01
Title=dN/deta
Type=Histo1D
---
# Mean: 0.000000e+00
# Area: 3.000000e+00
# ID	 ID	 sumw	 sumw2	 sumwx	 sumwx2	 numEntries
Total   	Total   	3.000000e+00	3.000000e+00	0.000000e+00	0.000000e+00	3.000000e+00
Underflow	Underflow	0.000000e+00	0.000000e+00	0.000000e+00	0.000000e+00	0.000000e+00
Overflow	Overflow	0.000000e+00	0.000000e+00	0.000000e+00	0.000000e+00	0.000000e+00
# xlow	 xhigh	 sumw	 sumw2	 sumwx	 sumwx2	 numEntries
-1.000000e+00	0.000000e+00	1.000000e+00	1.000000e+00	-5.000000e-01	2.500000e-01	1.000000e+00
0.000000e+00	1.000000e+00	2.000000e+00	2.000000e+00	1.000000e+00	5.000000e-01	2.000000e+00
END YODA_HISTO1D_V2
";

    const YODA2_HISTO: &str = r"
BEGIN YODA_HISTO1D_V3 /ALICE_YYYY_I1234567/d01-x01-y01
Path: /ALICE_YYYY_I1234567/d01-x01-y01
Title:
Type: Histo1D
---
# Mean: 0.000000e+00
# Integral: 4.000000e+00
Edges(A1): [-1.000000e+00, 0.000000e+00, 2.000000e+00]
# sumW       	 sumW2       	 sumW(A1)    	 sumW2(A1)   	 numEntries
1.000000e+00	1.000000e+00	-2.000000e+00	4.000000e+00	1.000000e+00
1.000000e+00	1.000000e+00	-5.000000e-01	2.500000e-01	1.000000e+00
2.000000e+00	2.000000e+00	1.000000e+00	5.000000e-01	2.000000e+00
0.000000e+00	0.000000e+00	0.000000e+00	0.000000e+00	0.000000e+00
END YODA_HISTO1D_V3

BEGIN YODA_ESTIMATE0D_V3 /_XSEC
Path: /_XSEC
Type: Estimate0D
---
ErrorLabels: [stats]
# value       	 errDn(1)    	 errUp(1)
5.000000e+01	-1.000000e+00	1.000000e+00
END YODA_ESTIMATE0D_V3
";

    #[test]
    fn test_parse_yoda1_objects() {
        let objects = parse_yoda_text(YODA1).unwrap();
        assert_eq!(objects.len(), 3);

        let nev = objects.counter("/_EVTCOUNT").unwrap();
        assert_eq!(nev.val(), 1000.0);

        let xsec = objects.estimate("/_XSEC").unwrap();
        assert_eq!(xsec.val(), 50.0);
        assert_eq!(xsec.err_down, 1.0);
        assert_eq!(xsec.err_up, 2.0);

        let histo = objects
            .histo1d("/ALICE_YYYY_I1234567/d01-x01-y01")
            .unwrap();
        assert_eq!(histo.num_bins(), 2);
        assert_eq!(histo.title.as_deref(), Some("dN/deta"));
        assert_eq!(histo.x_mids(), vec![-0.5, 0.5]);
        assert_eq!(histo.y_vals(), vec![1.0, 2.0]);
        assert!((histo.eff_num_entries() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_yoda2_histogram() {
        let objects = parse_yoda_text(YODA2_HISTO).unwrap();
        let histo = objects
            .histo1d("/ALICE_YYYY_I1234567/d01-x01-y01")
            .unwrap();

        assert_eq!(histo.num_bins(), 2);
        assert_eq!(histo.x_widths(), vec![1.0, 2.0]);
        assert_eq!(histo.y_vals(), vec![1.0, 1.0]);
        assert_eq!(histo.underflow.sumw, 1.0);
        assert!(histo.title.is_none());
        // (1 + 1 + 2)^2 / (1 + 1 + 2)
        assert!((histo.eff_num_entries() - 4.0).abs() < 1e-12);

        let xsec = objects.estimate("/_XSEC").unwrap();
        assert_eq!(xsec.val(), 50.0);
        assert_eq!(xsec.err_down, 1.0);
    }

    #[test]
    fn test_legacy_block_without_separator() {
        let text = "BEGIN YODA_COUNTER\nPath=/_EVTCOUNT\n# sumW sumW2 numEntries\n5 5 5\nEND YODA_COUNTER\n";
        let objects = parse_yoda_text(text).unwrap();
        assert_eq!(objects.counter("/_EVTCOUNT").map(Counter::val), Some(5.0));
    }

    #[test]
    fn test_unsupported_blocks_are_skipped() {
        let text = "BEGIN YODA_HISTO2D_V2 /h2\nPath=/h2\n---\n1 2 3\nEND YODA_HISTO2D_V2\n";
        let objects = parse_yoda_text(text).unwrap();
        assert!(objects.is_empty());
    }

    #[test]
    fn test_empty_text() {
        assert!(parse_yoda_text("").unwrap().is_empty());
        assert!(parse_yoda_text("# just a comment\n").unwrap().is_empty());
    }

    #[test]
    fn test_unterminated_block() {
        let text = "BEGIN YODA_COUNTER_V2 /_EVTCOUNT\n---\n1 1 1\n";
        let result = parse_yoda_text(text);
        assert!(matches!(
            result,
            Err(ParseError::UnterminatedBlock { line: 1, .. })
        ));
    }

    #[test]
    fn test_mismatched_end() {
        let text = "BEGIN YODA_COUNTER_V2 /c\n---\n1 1 1\nEND YODA_HISTO1D_V2\n";
        assert!(matches!(
            parse_yoda_text(text),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_invalid_number_reports_line() {
        let text = "BEGIN YODA_COUNTER_V2 /c\n---\n1 abc 1\nEND YODA_COUNTER_V2\n";
        let err = parse_yoda_text(text).unwrap_err();
        assert!(err.to_string().contains("line 3"), "{err}");
    }

    #[test]
    fn test_yoda2_row_count_mismatch() {
        let text = "BEGIN YODA_HISTO1D_V3 /h\n---\nEdges(A1): [0, 1]\n1 1 0 0 1\nEND YODA_HISTO1D_V3\n";
        let err = parse_yoda_text(text).unwrap_err();
        assert!(err.to_string().contains("expected 3"), "{err}");
    }

    #[test]
    fn test_yoda2_repeated_edge_rejected() {
        let text = "BEGIN YODA_HISTO1D_V3 /h\n---\nEdges(A1): [0, 1, 1]\n\
                    0 0 0 0 0\n1 1 0 0 1\n1 1 0 0 1\n0 0 0 0 0\nEND YODA_HISTO1D_V3\n";
        let err = parse_yoda_text(text).unwrap_err();
        assert!(err.to_string().contains("strictly increasing"), "{err}");
    }

    #[test]
    fn test_yoda1_zero_width_bin_rejected() {
        let text = "BEGIN YODA_HISTO1D_V2 /h\n---\n\
                    0.5 0.5 1 1 0.5 0.25 1\nEND YODA_HISTO1D_V2\n";
        let err = parse_yoda_text(text).unwrap_err();
        assert!(err.to_string().contains("Line 3"), "{err}");
        assert!(err.to_string().contains("not above"), "{err}");
    }

    #[test]
    fn test_missing_path() {
        let text = "BEGIN YODA_COUNTER_V2\n---\n1 1 1\nEND YODA_COUNTER_V2\n";
        assert!(matches!(
            parse_yoda_text(text),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_split_annotation() {
        assert_eq!(split_annotation("Path=/a"), Some(("Path", "/a")));
        assert_eq!(split_annotation("Title: a: b"), Some(("Title", "a: b")));
        assert_eq!(split_annotation("Edges(A1): [0, 1]"), None);
        assert_eq!(split_annotation("1.0e+00\t2.0"), None);
    }
}
