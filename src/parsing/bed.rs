//! Parser for BED interval lists.
//!
//! Only the first three columns (`contig`, `start`, `end`) are used; any
//! further columns are ignored. Coordinates are 0-based half-open, which is
//! also the internal convention, so no shifting takes place.
//!
//! Blank lines and header lines (`#...`, `track ...`, `browser ...`) are
//! skipped.

use std::io::BufRead;

use thiserror::Error;

use crate::core::interval::Interval;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid BED format: {0}")]
    InvalidFormat(String),
}

/// Whether a line carries no interval
fn is_comment(line: &str) -> bool {
    line.is_empty()
        || line.starts_with('#')
        || line.starts_with("track")
        || line.starts_with("browser")
}

/// Parse a single BED line.
///
/// `contig_prefix` is prepended to the contig name, e.g. `"chr"` turns `1`
/// into `chr1`. `line_number` is 1-based and only used in error messages.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the line has fewer than three
/// columns, non-numeric coordinates, or `start > end`.
pub fn parse_bed_line(
    line: &str,
    contig_prefix: &str,
    line_number: usize,
) -> Result<Option<Interval>, ParseError> {
    let line = line.trim_end();
    if is_comment(line) {
        return Ok(None);
    }

    let mut fields = line.split_whitespace();
    let (Some(contig), Some(start), Some(end)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(ParseError::InvalidFormat(format!(
            "line {line_number}: expected at least 3 columns, got '{line}'"
        )));
    };

    let parse_coordinate = |value: &str, column: &str| {
        value.parse::<u64>().map_err(|_| {
            ParseError::InvalidFormat(format!(
                "line {line_number}: invalid {column} coordinate '{value}'"
            ))
        })
    };
    let start = parse_coordinate(start, "start")?;
    let end = parse_coordinate(end, "end")?;

    Interval::new(format!("{contig_prefix}{contig}"), start, end)
        .map(Some)
        .map_err(|e| ParseError::InvalidFormat(format!("line {line_number}: {e}")))
}

/// Lazy iterator of intervals read from a BED stream, one line at a time.
pub struct BedReader<R> {
    reader: R,
    contig_prefix: String,
    line: String,
    line_number: usize,
}

impl<R: BufRead> BedReader<R> {
    pub fn new(reader: R, contig_prefix: impl Into<String>) -> Self {
        Self {
            reader,
            contig_prefix: contig_prefix.into(),
            line: String::new(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for BedReader<R> {
    type Item = Result<Interval, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_number += 1;

            match parse_bed_line(&self.line, &self.contig_prefix, self.line_number) {
                Ok(Some(interval)) => return Some(Ok(interval)),
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Parse BED text held in memory
///
/// # Errors
///
/// Returns the first `ParseError` in the text.
pub fn parse_bed_text(text: &str, contig_prefix: &str) -> Result<Vec<Interval>, ParseError> {
    BedReader::new(text.as_bytes(), contig_prefix).collect()
}
