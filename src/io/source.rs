//! Page text collaborators.
//!
//! The pipeline asks a [`PageSource`] for the text of every page, in page
//! order. A page with no extractable text comes back as `None` and is skipped
//! by the extractor.

use crate::errors::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Page separator in pre-extracted text dumps (pdftotext convention).
pub const PAGE_SEPARATOR: char = '\u{000C}';

pub trait PageSource {
    /// Text of every page in document order.
    fn pages(&self) -> Result<Vec<Option<String>>>;

    /// Where the document came from, for diagnostics.
    fn origin(&self) -> &Path;
}

/// A PDF on disk, read with `pdf-extract`.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    path: PathBuf,
}

impl PdfDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageSource for PdfDocument {
    fn pages(&self) -> Result<Vec<Option<String>>> {
        let bytes = fs::read(&self.path)?;
        let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes)
            .map_err(|e| Error::extraction(&self.path, e.to_string()))?;
        Ok(pages.into_iter().map(non_blank).collect())
    }

    fn origin(&self) -> &Path {
        &self.path
    }
}

/// Already-extracted text with pages separated by form feeds.
#[derive(Debug, Clone)]
pub struct TextDocument {
    origin: PathBuf,
    text: String,
}

impl TextDocument {
    pub fn new(origin: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            text: text.into(),
        }
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let text = fs::read_to_string(&path)?;
        Ok(Self::new(path, text))
    }
}

impl PageSource for TextDocument {
    fn pages(&self) -> Result<Vec<Option<String>>> {
        Ok(self
            .text
            .split(PAGE_SEPARATOR)
            .map(|page| non_blank(page.to_string()))
            .collect())
    }

    fn origin(&self) -> &Path {
        &self.origin
    }
}

/// Open the document at `path`, picking the reader from the extension.
///
/// `.txt` files are treated as pre-extracted text, everything else as PDF.
pub fn open_source(path: &Path) -> Result<Box<dyn PageSource>> {
    if !path.is_file() {
        return Err(Error::SourceNotFound {
            path: path.to_path_buf(),
        });
    }

    let is_text = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));

    if is_text {
        Ok(Box::new(TextDocument::from_file(path)?))
    } else {
        Ok(Box::new(PdfDocument::new(path)))
    }
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
