//! Readers for the supported source formats.

mod json;
mod page_xml;

pub use json::read_json;
pub use page_xml::read_page_xml;

use crate::detect::{detect_format_from_bytes, LayoutFormat};
use crate::error::Result;
use crate::model::Document;
use std::path::Path;

/// Options for reading layout documents.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Error handling mode.
    pub error_mode: ErrorMode,

    /// Source format. When unset, the format is sniffed from the
    /// leading bytes.
    pub format: Option<LayoutFormat>,
}

impl ReadOptions {
    /// Create new read options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable lenient mode (skip invalid content).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Force a source format instead of sniffing.
    pub fn with_format(mut self, format: LayoutFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// Error handling mode during reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error.
    #[default]
    Strict,

    /// Recover from broken content where possible, logging what was
    /// dropped.
    Lenient,
}

/// Read a layout document from a file, sniffing the format.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    read_file_with_options(path, &ReadOptions::default())
}

/// Read a layout document from a file with custom options.
pub fn read_file_with_options<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<Document> {
    let data = std::fs::read(path)?;
    read_bytes_with_options(&data, options)
}

/// Read a layout document from bytes, sniffing the format.
pub fn read_bytes(data: &[u8]) -> Result<Document> {
    read_bytes_with_options(data, &ReadOptions::default())
}

/// Read a layout document from bytes with custom options.
pub fn read_bytes_with_options(data: &[u8], options: &ReadOptions) -> Result<Document> {
    let format = match options.format {
        Some(format) => format,
        None => detect_format_from_bytes(data)?,
    };
    let text = String::from_utf8_lossy(data);
    match format {
        LayoutFormat::PageXml => read_page_xml(&text, options),
        LayoutFormat::Json => read_json(&text),
    }
}
