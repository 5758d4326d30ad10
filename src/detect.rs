//! Source format detection and validation.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A recognized source format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutFormat {
    /// PAGE XML (`PcGts` root element).
    PageXml,

    /// Vendor JSON layout output.
    Json,
}

impl std::fmt::Display for LayoutFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutFormat::PageXml => f.write_str("PAGE XML"),
            LayoutFormat::Json => f.write_str("JSON"),
        }
    }
}

/// How many leading bytes format sniffing looks at. Enough for an XML
/// declaration, a comment and the root element tag.
const SNIFF_LEN: usize = 1024;

/// Detect the source format from a file path.
///
/// # Arguments
/// * `path` - Path to the layout file
///
/// # Returns
/// * `Ok(LayoutFormat)` if the leading bytes identify a supported format
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<LayoutFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = vec![0u8; SNIFF_LEN];
    let n = reader.read(&mut header)?;
    header.truncate(n);
    detect_format_from_bytes(&header)
}

/// Detect the source format from leading bytes.
///
/// JSON input is recognized by a leading `{`; PAGE XML by a `<PcGts`
/// root element within the sniffed prefix.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<LayoutFormat> {
    let data = strip_bom(data);
    let first = data
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .copied()
        .ok_or(Error::UnknownFormat)?;

    match first {
        b'{' => Ok(LayoutFormat::Json),
        b'<' => {
            let prefix = &data[..data.len().min(SNIFF_LEN)];
            let text = String::from_utf8_lossy(prefix);
            if text.contains("<PcGts") || text.contains(":PcGts") {
                Ok(LayoutFormat::PageXml)
            } else {
                Err(Error::UnknownFormat)
            }
        }
        _ => Err(Error::UnknownFormat),
    }
}

/// Check if a file is PAGE XML.
pub fn is_page_xml<P: AsRef<Path>>(path: P) -> bool {
    matches!(detect_format_from_path(path), Ok(LayoutFormat::PageXml))
}

/// Check if bytes look like PAGE XML.
pub fn is_page_xml_bytes(data: &[u8]) -> bool {
    matches!(detect_format_from_bytes(data), Ok(LayoutFormat::PageXml))
}

fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_page_xml() {
        let data = br#"<?xml version="1.0" encoding="UTF-8"?>
<PcGts xmlns="http://schema.primaresearch.org/PAGE/gts/pagecontent/2019-07-15">"#;
        assert_eq!(
            detect_format_from_bytes(data).unwrap(),
            LayoutFormat::PageXml
        );
    }

    #[test]
    fn test_detect_page_xml_with_bom_and_whitespace() {
        let data = b"\xEF\xBB\xBF\n  <PcGts>";
        assert_eq!(
            detect_format_from_bytes(data).unwrap(),
            LayoutFormat::PageXml
        );
    }

    #[test]
    fn test_detect_json() {
        let data = br#"{ "fullTextAnnotation": { "pages": [] } }"#;
        assert_eq!(detect_format_from_bytes(data).unwrap(), LayoutFormat::Json);
    }

    #[test]
    fn test_detect_foreign_xml() {
        let data = b"<svg xmlns=\"http://www.w3.org/2000/svg\"></svg>";
        assert!(matches!(
            detect_format_from_bytes(data),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_detect_empty_and_garbage() {
        assert!(detect_format_from_bytes(b"").is_err());
        assert!(detect_format_from_bytes(b"   \n ").is_err());
        assert!(detect_format_from_bytes(b"%PDF-1.7").is_err());
    }

    #[test]
    fn test_is_page_xml_bytes() {
        assert!(is_page_xml_bytes(b"<PcGts>"));
        assert!(!is_page_xml_bytes(b"{\"a\":1}"));
    }
}
