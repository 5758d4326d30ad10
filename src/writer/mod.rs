//! Writers for the supported output formats, plus pre-write
//! validation.

mod alto;
mod page_xml;

pub use alto::write_alto;
pub use page_xml::write_page_xml;

use crate::error::{Error, Result, ValidationError};
use crate::model::{is_valid_xml_id, Document, Polygon, Region, TextLine};
use crate::schema::OutputFormat;
use std::collections::HashSet;
use std::path::Path;

/// Serialize a document to a string in the given output format.
///
/// The document is validated first; validation failures are returned
/// as [`Error::Validation`] with one entry per problem and nothing is
/// serialized.
pub fn write_string(document: &Document, format: OutputFormat) -> Result<String> {
    let errors = validate(document);
    if !errors.is_empty() {
        return Err(Error::Validation(errors));
    }
    match format {
        OutputFormat::PageXml(version) => write_page_xml(document, version),
        OutputFormat::Alto => write_alto(document),
    }
}

/// Serialize a document to a file in the given output format.
pub fn write_file<P: AsRef<Path>>(
    document: &Document,
    path: P,
    format: OutputFormat,
) -> Result<()> {
    let output = write_string(document, format)?;
    std::fs::write(path, output)?;
    Ok(())
}

/// Check a document against the structural rules every supported
/// output schema shares. Returns one entry per problem; an empty list
/// means the document is writable.
pub fn validate(document: &Document) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(id) = &document.gts_id {
        if !is_valid_xml_id(id) {
            errors.push(ValidationError::new(
                "Metadata/GtsId",
                format!("{id:?} is not a valid XML ID"),
            ));
        }
    }
    if document.layout.width == 0 || document.layout.height == 0 {
        errors.push(ValidationError::new("Page", "image size is zero"));
    }
    check_optional_boundary(&document.layout.border, "Border", &mut errors);
    check_optional_boundary(&document.layout.print_space, "PrintSpace", &mut errors);

    let mut seen_ids = HashSet::new();
    for region in &document.layout.regions {
        check_region(region, &mut seen_ids, &mut errors);
    }
    errors
}

fn check_id(id: &str, what: &str, seen: &mut HashSet<String>, errors: &mut Vec<ValidationError>) {
    if !is_valid_xml_id(id) {
        errors.push(ValidationError::new(
            if id.is_empty() { what } else { id },
            format!("{what} id {id:?} is not a valid XML ID"),
        ));
    } else if !seen.insert(id.to_string()) {
        errors.push(ValidationError::new(id, format!("duplicate {what} id")));
    }
}

/// Boundary rules for border and print space: when present, at least
/// three points and no negative components.
fn check_optional_boundary(
    polygon: &Option<Polygon>,
    object: &str,
    errors: &mut Vec<ValidationError>,
) {
    if let Some(polygon) = polygon {
        boundary_rules(polygon, object, errors);
    }
}

fn boundary_rules(polygon: &Polygon, object: &str, errors: &mut Vec<ValidationError>) {
    if polygon.len() < 3 {
        errors.push(ValidationError::new(
            object,
            format!(
                "boundary polygon has fewer than 3 points ({})",
                polygon.len()
            ),
        ));
    }
    if polygon.has_negative() {
        errors.push(ValidationError::new(
            object,
            "boundary polygon has negative coordinates",
        ));
    }
}

fn check_region(
    region: &Region,
    seen: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    check_id(&region.id, "region", seen, errors);
    match &region.coords {
        Some(coords) => boundary_rules(coords, &region.id, errors),
        None => errors.push(ValidationError::new(
            &region.id,
            "region has no boundary polygon",
        )),
    }
    if let Some(content) = region.text_content() {
        for line in &content.lines {
            check_line(line, seen, errors);
        }
    }
    for child in &region.children {
        check_region(child, seen, errors);
    }
}

fn check_line(line: &TextLine, seen: &mut HashSet<String>, errors: &mut Vec<ValidationError>) {
    check_id(&line.id, "text line", seen, errors);
    match &line.coords {
        Some(coords) => boundary_rules(coords, &line.id, errors),
        None => errors.push(ValidationError::new(
            &line.id,
            "text line has no boundary polygon",
        )),
    }
    if let Some(baseline) = &line.baseline {
        if baseline.len() < 2 {
            errors.push(ValidationError::new(
                &line.id,
                format!("baseline has fewer than 2 points ({})", baseline.len()),
            ));
        }
    }
    for word in &line.words {
        check_id(&word.id, "word", seen, errors);
        if let Some(coords) = &word.coords {
            boundary_rules(coords, &word.id, errors);
        }
        for glyph in &word.glyphs {
            check_id(&glyph.id, "glyph", seen, errors);
            if let Some(coords) = &glyph.coords {
                boundary_rules(coords, &glyph.id, errors);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Polygon, RegionKind};
    use crate::schema::SchemaVersion;

    fn valid_doc() -> Document {
        let mut doc = Document::new(1000, 800);
        doc.layout.add_region(
            Region::new("r1", RegionKind::Image)
                .with_coords(Polygon::from_pairs([(0, 0), (10, 0), (10, 10)])),
        );
        doc
    }

    #[test]
    fn test_validate_clean_document() {
        assert!(validate(&valid_doc()).is_empty());
    }

    #[test]
    fn test_validate_flags_negative_boundary() {
        let mut doc = valid_doc();
        doc.layout.regions[0].coords = Some(Polygon::from_pairs([(-1, 0), (10, 0), (10, 10)]));
        let errors = validate(&doc);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("negative"));
    }

    #[test]
    fn test_validate_flags_duplicate_and_invalid_ids() {
        let mut doc = valid_doc();
        doc.layout.add_region(
            Region::new("r1", RegionKind::Separator)
                .with_coords(Polygon::from_pairs([(0, 20), (10, 20), (10, 30)])),
        );
        doc.layout.add_region(
            Region::new("1bad", RegionKind::Separator)
                .with_coords(Polygon::from_pairs([(0, 40), (10, 40), (10, 50)])),
        );
        let errors = validate(&doc);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.message.contains("duplicate")));
        assert!(errors.iter().any(|e| e.message.contains("not a valid XML ID")));
    }

    #[test]
    fn test_validate_flags_short_polygons_and_missing_coords() {
        let mut doc = valid_doc();
        doc.layout.regions[0].coords = Some(Polygon::from_pairs([(0, 0), (10, 10)]));
        doc.layout.add_region(Region::new("r2", RegionKind::Image));
        let errors = validate(&doc);
        assert!(errors.iter().any(|e| e.message.contains("fewer than 3")));
        assert!(errors.iter().any(|e| e.message.contains("no boundary")));
    }

    #[test]
    fn test_validate_ignores_negative_baseline() {
        // The sanitizer never corrects baselines, so validation must
        // not reject them either.
        let mut doc = valid_doc();
        let mut region = Region::text("t1")
            .with_coords(Polygon::from_pairs([(0, 0), (50, 0), (50, 50)]));
        region.text_content_mut().unwrap().lines.push(
            TextLine::new("t1-l1")
                .with_coords(Polygon::from_pairs([(0, 0), (50, 0), (50, 10)]))
                .with_baseline(Polygon::from_pairs([(-3, 9), (50, 9)])),
        );
        doc.layout.add_region(region);
        assert!(validate(&doc).is_empty());
    }

    #[test]
    fn test_write_string_returns_validation_errors() {
        let mut doc = valid_doc();
        doc.gts_id = Some("0-bad-id".into());
        doc.layout.width = 0;
        let err = write_string(&doc, OutputFormat::PageXml(SchemaVersion::LATEST)).unwrap_err();
        match err {
            Error::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
