//! # pageconv
//!
//! Converter library for PAGE XML layout documents.
//!
//! This library loads a document-layout description (PAGE XML or a
//! vendor JSON layout), optionally corrects its geometry and metadata,
//! and writes it back out as PAGE XML under any supported schema
//! version or as ALTO XML.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pageconv::{convert_file, ConvertOptions, NegativeCoordPolicy};
//! use std::path::Path;
//!
//! fn main() -> pageconv::Result<()> {
//!     let options = ConvertOptions::new()
//!         .with_neg_coords(NegativeCoordPolicy::ZeroClamp)
//!         .convert_to(pageconv::OutputFormat::PageXml(
//!             pageconv::SchemaVersion::LATEST,
//!         ));
//!     let summary = convert_file(
//!         Path::new("page.xml"),
//!         Path::new("page-out.xml"),
//!         &options,
//!     )?;
//!     println!("{} objects written", summary.objects_after);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Schema migration**: read any supported PAGE version, write any
//!   other, including the pre-2013 `<Point>` coordinate form
//! - **ALTO export**: write the layout tree as ALTO v3
//! - **Geometry correction**: clamp or delete objects with negative
//!   coordinates
//! - **Coordinate rescaling**: convert 1/1200 inch and 1/10 mm
//!   geometry to pixel space using the image resolution
//! - **Metadata tooling**: GtsID assignment and rule-based text
//!   filtering

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod schema;
pub mod transform;
pub mod writer;

// Re-export commonly used types
pub use convert::{convert_file, ConvertOptions, ConvertSummary};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_page_xml, LayoutFormat};
pub use error::{Error, Result, ValidationError};
pub use model::{
    Document, Glyph, Layout, MeasurementUnit, Metadata, Point, Polygon, Region, RegionKind,
    ResolutionUnit, TextContent, TextLine, Word,
};
pub use parser::{read_bytes, read_file, read_file_with_options, ErrorMode, ReadOptions};
pub use schema::{OutputFormat, SchemaVersion};
pub use transform::{
    rescale, sanitize, GtsIdPattern, NegativeCoordPolicy, TextFilter, TextLevel, TextScope,
};
pub use writer::{validate, write_file, write_string};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_surface_is_wired_up() {
        // A small end-to-end pass over the in-memory API.
        let xml = r#"<PcGts xmlns="http://schema.primaresearch.org/PAGE/gts/pagecontent/2019-07-15">
  <Page imageFilename="p.png" imageWidth="1200" imageHeight="1200">
    <TextRegion id="r1"><Coords points="-4,0 480,0 480,240"/></TextRegion>
  </Page>
</PcGts>"#;
        let mut doc = read_bytes(xml.as_bytes()).unwrap();
        doc.measurement_unit = MeasurementUnit::Inch1200;

        sanitize(&mut doc, NegativeCoordPolicy::ZeroClamp);
        rescale(&mut doc, Some(300.0), Some(300.0), None);

        assert_eq!(
            doc.layout.regions[0].coords,
            Some(Polygon::from_pairs([(0, 0), (120, 0), (120, 60)]))
        );

        let out = write_string(&doc, OutputFormat::PageXml(SchemaVersion::LATEST)).unwrap();
        assert!(out.contains("points=\"0,0 120,0 120,60\""));
    }
}
