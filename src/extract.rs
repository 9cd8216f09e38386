//! Line parser for compendium pages.
//!
//! Each activity row reads `<heading> <5-digit code> <MET> <description>`,
//! where the heading may span several words. Header rows repeated at the top
//! of every page are skipped.

use crate::core::RawRecord;
use crate::errors::{Error, Result};
use crate::io::PageSource;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Markers of the table header repeated on each page.
const HEADER_MARKERS: [&str; 2] = ["Major Heading", "Activity Code"];

const CODE_LEN: usize = 5;

static ACTIVITY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)\s+([0-9]{5})\s+([0-9]+\.?[0-9]*)\s+(.+)$").expect("valid activity pattern")
});

/// Why a line did not become a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRejection {
    Blank,
    Header,
    NoMatch,
    BadCode,
    InvalidMet,
}

/// Per-run counters for the extraction stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub pages: usize,
    pub empty_pages: usize,
    pub lines: usize,
    pub blank_lines: usize,
    pub header_lines: usize,
    pub unmatched_lines: usize,
    pub invalid_met: usize,
    pub records: usize,
}

impl ExtractionStats {
    fn record_rejection(&mut self, rejection: LineRejection) {
        match rejection {
            LineRejection::Blank => self.blank_lines += 1,
            LineRejection::Header => self.header_lines += 1,
            LineRejection::NoMatch | LineRejection::BadCode => self.unmatched_lines += 1,
            LineRejection::InvalidMet => self.invalid_met += 1,
        }
    }
}

/// Parse one physical line into a record.
pub fn parse_line(line: &str) -> std::result::Result<RawRecord, LineRejection> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(LineRejection::Blank);
    }
    if HEADER_MARKERS.iter().any(|marker| line.contains(marker)) {
        return Err(LineRejection::Header);
    }

    let caps = ACTIVITY_LINE
        .captures(trimmed)
        .ok_or(LineRejection::NoMatch)?;
    let field = |i: usize| caps.get(i).map_or("", |m| m.as_str().trim());

    let code = field(2);
    if code.len() != CODE_LEN || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LineRejection::BadCode);
    }

    let met_value = field(3)
        .parse::<f64>()
        .ok()
        .filter(|m| m.is_finite())
        .ok_or(LineRejection::InvalidMet)?;

    Ok(RawRecord::new(field(1), code, met_value, field(4)))
}

/// Parse every line of every page, in page then line order.
pub fn extract_records(pages: &[Option<String>]) -> (Vec<RawRecord>, ExtractionStats) {
    let mut stats = ExtractionStats {
        pages: pages.len(),
        ..ExtractionStats::default()
    };
    let mut records = Vec::new();

    for page in pages {
        let Some(text) = page.as_deref() else {
            stats.empty_pages += 1;
            continue;
        };

        for line in text.lines() {
            stats.lines += 1;
            match parse_line(line) {
                Ok(record) => records.push(record),
                Err(rejection) => stats.record_rejection(rejection),
            }
        }
    }

    stats.records = records.len();
    (records, stats)
}

/// Read a whole document. Zero parsed records makes the document unusable.
pub fn extract_document(source: &dyn PageSource) -> Result<(Vec<RawRecord>, ExtractionStats)> {
    let pages = source.pages()?;
    let (records, stats) = extract_records(&pages);

    tracing::info!(
        pages = stats.pages,
        lines = stats.lines,
        records = stats.records,
        "Extracted activities from {}",
        source.origin().display()
    );

    if records.is_empty() {
        return Err(Error::NoActivities {
            path: source.origin().to_path_buf(),
        });
    }
    Ok((records, stats))
}
