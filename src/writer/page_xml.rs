//! PAGE XML writer.
//!
//! Serializes the model under any supported schema version. The
//! version controls the namespace, the coordinate encoding and which
//! page attributes are available.

use crate::error::Result;
use crate::model::{Document, Metadata, Polygon, Region, TextLine, Word};
use crate::schema::SchemaVersion;
use chrono::{DateTime, Utc};
use log::debug;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Serialize a document as PAGE XML under the given schema version.
///
/// Callers are expected to validate first (see
/// [`crate::writer::write_string`]); this function serializes whatever
/// it is given.
pub fn write_page_xml(document: &Document, version: SchemaVersion) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("PcGts");
    let namespace = version.namespace();
    let schema_location = version.schema_location();
    root.push_attribute(("xmlns", namespace.as_str()));
    root.push_attribute(("xmlns:xsi", XSI_NAMESPACE));
    root.push_attribute(("xsi:schemaLocation", schema_location.as_str()));
    if let Some(gts_id) = &document.gts_id {
        root.push_attribute(("pcGtsId", gts_id.as_str()));
    }
    writer.write_event(Event::Start(root))?;

    write_metadata(&mut writer, &document.metadata)?;
    write_page(&mut writer, document, version)?;

    writer.write_event(Event::End(BytesEnd::new("PcGts")))?;

    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_metadata(writer: &mut XmlWriter, metadata: &Metadata) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("Metadata")))?;
    if let Some(creator) = &metadata.creator {
        write_text_element(writer, "Creator", creator)?;
    }
    if let Some(created) = &metadata.created {
        write_text_element(writer, "Created", &format_timestamp(created))?;
    }
    if let Some(last_change) = &metadata.last_change {
        write_text_element(writer, "LastChange", &format_timestamp(last_change))?;
    }
    if let Some(comments) = &metadata.comments {
        write_text_element(writer, "Comments", comments)?;
    }
    writer.write_event(Event::End(BytesEnd::new("Metadata")))?;
    Ok(())
}

/// PAGE timestamps are written without a zone designator.
fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn write_page(writer: &mut XmlWriter, document: &Document, version: SchemaVersion) -> Result<()> {
    let layout = &document.layout;
    let mut page = BytesStart::new("Page");
    page.push_attribute(("imageFilename", layout.image_filename.as_str()));
    page.push_attribute(("imageWidth", layout.width.to_string().as_str()));
    page.push_attribute(("imageHeight", layout.height.to_string().as_str()));
    if version.has_resolution_attributes() {
        if let Some(x_resolution) = document.x_resolution {
            page.push_attribute(("imageXResolution", format_float(x_resolution).as_str()));
        }
        if let Some(y_resolution) = document.y_resolution {
            page.push_attribute(("imageYResolution", format_float(y_resolution).as_str()));
        }
        if let Some(unit) = document.resolution_unit {
            page.push_attribute(("imageResolutionUnit", unit.as_str()));
        }
    }
    writer.write_event(Event::Start(page))?;

    if let Some(border) = &layout.border {
        writer.write_event(Event::Start(BytesStart::new("Border")))?;
        write_polygon(writer, border, "Coords", version)?;
        writer.write_event(Event::End(BytesEnd::new("Border")))?;
    }
    if let Some(print_space) = &layout.print_space {
        writer.write_event(Event::Start(BytesStart::new("PrintSpace")))?;
        write_polygon(writer, print_space, "Coords", version)?;
        writer.write_event(Event::End(BytesEnd::new("PrintSpace")))?;
    }
    for region in &layout.regions {
        write_region(writer, region, version)?;
    }

    writer.write_event(Event::End(BytesEnd::new("Page")))?;
    Ok(())
}

fn write_region(writer: &mut XmlWriter, region: &Region, version: SchemaVersion) -> Result<()> {
    let name = region.kind.element_name();
    let mut start = BytesStart::new(name);
    start.push_attribute(("id", region.id.as_str()));
    writer.write_event(Event::Start(start))?;

    if let Some(coords) = &region.coords {
        write_polygon(writer, coords, "Coords", version)?;
    }
    if let Some(content) = region.text_content() {
        for line in &content.lines {
            write_text_line(writer, line, version)?;
        }
        write_text_equiv(writer, &content.text)?;
    }
    for child in &region.children {
        write_region(writer, child, version)?;
    }

    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_text_line(writer: &mut XmlWriter, line: &TextLine, version: SchemaVersion) -> Result<()> {
    let mut start = BytesStart::new("TextLine");
    start.push_attribute(("id", line.id.as_str()));
    writer.write_event(Event::Start(start))?;

    if let Some(coords) = &line.coords {
        write_polygon(writer, coords, "Coords", version)?;
    }
    if let Some(baseline) = &line.baseline {
        // The baseline element only exists from 2013-07-15 on.
        if version.uses_points_attribute() {
            write_polygon(writer, baseline, "Baseline", version)?;
        } else {
            debug!("dropping baseline of {}: not supported by {version}", line.id);
        }
    }
    for word in &line.words {
        write_word(writer, word, version)?;
    }
    write_text_equiv(writer, &line.text)?;

    writer.write_event(Event::End(BytesEnd::new("TextLine")))?;
    Ok(())
}

fn write_word(writer: &mut XmlWriter, word: &Word, version: SchemaVersion) -> Result<()> {
    let mut start = BytesStart::new("Word");
    start.push_attribute(("id", word.id.as_str()));
    writer.write_event(Event::Start(start))?;

    if let Some(coords) = &word.coords {
        write_polygon(writer, coords, "Coords", version)?;
    }
    for glyph in &word.glyphs {
        let mut start = BytesStart::new("Glyph");
        start.push_attribute(("id", glyph.id.as_str()));
        writer.write_event(Event::Start(start))?;
        if let Some(coords) = &glyph.coords {
            write_polygon(writer, coords, "Coords", version)?;
        }
        write_text_equiv(writer, &glyph.text)?;
        writer.write_event(Event::End(BytesEnd::new("Glyph")))?;
    }
    write_text_equiv(writer, &word.text)?;

    writer.write_event(Event::End(BytesEnd::new("Word")))?;
    Ok(())
}

/// Write a polygon in the version's coordinate encoding: a `points`
/// attribute from 2013-07-15 on, `<Point>` children before.
fn write_polygon(
    writer: &mut XmlWriter,
    polygon: &Polygon,
    name: &str,
    version: SchemaVersion,
) -> Result<()> {
    if version.uses_points_attribute() {
        let mut element = BytesStart::new(name);
        element.push_attribute(("points", points_attribute(polygon).as_str()));
        writer.write_event(Event::Empty(element))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new(name)))?;
        for point in &polygon.points {
            let mut element = BytesStart::new("Point");
            element.push_attribute(("x", point.x.to_string().as_str()));
            element.push_attribute(("y", point.y.to_string().as_str()));
            writer.write_event(Event::Empty(element))?;
        }
        writer.write_event(Event::End(BytesEnd::new(name)))?;
    }
    Ok(())
}

fn points_attribute(polygon: &Polygon) -> String {
    polygon
        .points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_text_equiv(writer: &mut XmlWriter, text: &Option<String>) -> Result<()> {
    if let Some(text) = text {
        writer.write_event(Event::Start(BytesStart::new("TextEquiv")))?;
        write_text_element(writer, "Unicode", text)?;
        writer.write_event(Event::End(BytesEnd::new("TextEquiv")))?;
    }
    Ok(())
}

fn write_text_element(writer: &mut XmlWriter, name: &str, value: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Format a resolution value without a trailing `.0` for whole
/// numbers.
fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
