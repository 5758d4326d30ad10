//! ALTO XML writer.
//!
//! Exports the layout tree as ALTO v3. ALTO blocks are rectangular, so
//! every polygon is reduced to its bounding box; the exact outline is
//! preserved in a `Shape` child. Glyph-level geometry has no ALTO v3
//! counterpart and is dropped.

use crate::error::Result;
use crate::model::{Document, Polygon, Region, RegionKind, TextLine};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

const ALTO_NAMESPACE: &str = "http://www.loc.gov/standards/alto/ns-v3#";
const ALTO_SCHEMA_LOCATION: &str =
    "http://www.loc.gov/standards/alto/ns-v3# http://www.loc.gov/standards/alto/v3/alto-3-1.xsd";

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Serialize a document as ALTO XML.
pub fn write_alto(document: &Document) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("alto");
    root.push_attribute(("xmlns", ALTO_NAMESPACE));
    root.push_attribute(("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"));
    root.push_attribute(("xsi:schemaLocation", ALTO_SCHEMA_LOCATION));
    writer.write_event(Event::Start(root))?;

    write_description(&mut writer, document)?;
    write_layout(&mut writer, document)?;

    writer.write_event(Event::End(BytesEnd::new("alto")))?;

    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_description(writer: &mut XmlWriter, document: &Document) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("Description")))?;

    writer.write_event(Event::Start(BytesStart::new("MeasurementUnit")))?;
    writer.write_event(Event::Text(BytesText::new(
        document.measurement_unit.as_str(),
    )))?;
    writer.write_event(Event::End(BytesEnd::new("MeasurementUnit")))?;

    if !document.layout.image_filename.is_empty() {
        writer.write_event(Event::Start(BytesStart::new("sourceImageInformation")))?;
        writer.write_event(Event::Start(BytesStart::new("fileName")))?;
        writer.write_event(Event::Text(BytesText::new(&document.layout.image_filename)))?;
        writer.write_event(Event::End(BytesEnd::new("fileName")))?;
        writer.write_event(Event::End(BytesEnd::new("sourceImageInformation")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("Description")))?;
    Ok(())
}

fn write_layout(writer: &mut XmlWriter, document: &Document) -> Result<()> {
    let layout = &document.layout;
    writer.write_event(Event::Start(BytesStart::new("Layout")))?;

    let mut page = BytesStart::new("Page");
    let page_id = document.gts_id.clone().unwrap_or_else(|| "page_1".into());
    page.push_attribute(("ID", page_id.as_str()));
    page.push_attribute(("PHYSICAL_IMG_NR", "1"));
    page.push_attribute(("WIDTH", layout.width.to_string().as_str()));
    page.push_attribute(("HEIGHT", layout.height.to_string().as_str()));
    writer.write_event(Event::Start(page))?;

    let mut print_space = BytesStart::new("PrintSpace");
    let space = layout
        .print_space
        .as_ref()
        .and_then(bounding_box)
        .unwrap_or((0, 0, layout.width as i64, layout.height as i64));
    push_box_attributes(&mut print_space, space);
    writer.write_event(Event::Start(print_space))?;
    for region in &layout.regions {
        write_block(writer, region)?;
    }
    writer.write_event(Event::End(BytesEnd::new("PrintSpace")))?;

    writer.write_event(Event::End(BytesEnd::new("Page")))?;
    writer.write_event(Event::End(BytesEnd::new("Layout")))?;
    Ok(())
}

/// Which ALTO block element a region maps to.
fn block_name(kind: &RegionKind) -> &'static str {
    match kind {
        RegionKind::Text(_) => "TextBlock",
        RegionKind::Image | RegionKind::Graphic | RegionKind::LineDrawing | RegionKind::Chart => {
            "Illustration"
        }
        RegionKind::Separator | RegionKind::Noise => "GraphicalElement",
        RegionKind::Table | RegionKind::Maths | RegionKind::Unknown => "ComposedBlock",
    }
}

fn write_block(writer: &mut XmlWriter, region: &Region) -> Result<()> {
    let name = block_name(&region.kind);
    let mut start = BytesStart::new(name);
    start.push_attribute(("ID", region.id.as_str()));
    if let Some(bbox) = region.coords.as_ref().and_then(bounding_box) {
        push_box_attributes(&mut start, bbox);
    }
    writer.write_event(Event::Start(start))?;

    if let Some(coords) = &region.coords {
        write_shape(writer, coords)?;
    }
    if let Some(content) = region.text_content() {
        for line in &content.lines {
            write_text_line(writer, line)?;
        }
    }
    // Only a composed block may contain other blocks; children of any
    // other block are hoisted next to their parent.
    if name == "ComposedBlock" {
        for child in &region.children {
            write_block(writer, child)?;
        }
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;

    if name != "ComposedBlock" {
        for child in &region.children {
            write_block(writer, child)?;
        }
    }
    Ok(())
}

fn write_text_line(writer: &mut XmlWriter, line: &TextLine) -> Result<()> {
    let mut start = BytesStart::new("TextLine");
    start.push_attribute(("ID", line.id.as_str()));
    if let Some(bbox) = line.coords.as_ref().and_then(bounding_box) {
        push_box_attributes(&mut start, bbox);
    }
    if let Some(baseline) = line.baseline.as_ref().and_then(|b| b.points.first()) {
        start.push_attribute(("BASELINE", baseline.y.to_string().as_str()));
    }
    writer.write_event(Event::Start(start))?;

    if line.words.is_empty() {
        if let Some(text) = &line.text {
            let mut string = BytesStart::new("String");
            string.push_attribute(("CONTENT", text.as_str()));
            if let Some(bbox) = line.coords.as_ref().and_then(bounding_box) {
                push_box_attributes(&mut string, bbox);
            }
            writer.write_event(Event::Empty(string))?;
        }
    } else {
        for (index, word) in line.words.iter().enumerate() {
            if index > 0 {
                writer.write_event(Event::Empty(BytesStart::new("SP")))?;
            }
            let mut string = BytesStart::new("String");
            string.push_attribute(("ID", word.id.as_str()));
            string.push_attribute(("CONTENT", word.text.as_deref().unwrap_or("")));
            if let Some(bbox) = word.coords.as_ref().and_then(bounding_box) {
                push_box_attributes(&mut string, bbox);
            }
            writer.write_event(Event::Empty(string))?;
        }
    }

    writer.write_event(Event::End(BytesEnd::new("TextLine")))?;
    Ok(())
}

fn write_shape(writer: &mut XmlWriter, polygon: &Polygon) -> Result<()> {
    if polygon.is_empty() {
        return Ok(());
    }
    writer.write_event(Event::Start(BytesStart::new("Shape")))?;
    let mut element = BytesStart::new("Polygon");
    let points = polygon
        .points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ");
    element.push_attribute(("POINTS", points.as_str()));
    writer.write_event(Event::Empty(element))?;
    writer.write_event(Event::End(BytesEnd::new("Shape")))?;
    Ok(())
}

fn bounding_box(polygon: &Polygon) -> Option<(i64, i64, i64, i64)> {
    let (min, max) = polygon.bounding_box()?;
    Some((
        i64::from(min.x),
        i64::from(min.y),
        i64::from(max.x) - i64::from(min.x),
        i64::from(max.y) - i64::from(min.y),
    ))
}

fn push_box_attributes(element: &mut BytesStart<'_>, (hpos, vpos, width, height): (i64, i64, i64, i64)) {
    element.push_attribute(("HPOS", hpos.to_string().as_str()));
    element.push_attribute(("VPOS", vpos.to_string().as_str()));
    element.push_attribute(("WIDTH", width.to_string().as_str()));
    element.push_attribute(("HEIGHT", height.to_string().as_str()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Polygon, TextLine, Word};

    fn sample_doc() -> Document {
        let mut doc = Document::new(1000, 800);
        doc.gts_id = Some("pc-0001".into());
        doc.layout.image_filename = "0001.png".into();
        doc.layout.print_space = Some(Polygon::from_pairs([
            (50, 50),
            (950, 50),
            (950, 750),
            (50, 750),
        ]));

        let mut region = Region::text("r1").with_coords(Polygon::from_pairs([
            (100, 100),
            (500, 100),
            (500, 200),
            (100, 200),
        ]));
        let mut line = TextLine::new("r1-l1")
            .with_coords(Polygon::from_pairs([(100, 100), (500, 100), (500, 140)]))
            .with_baseline(Polygon::from_pairs([(100, 135), (500, 135)]));
        let mut word = Word::new("r1-l1-w1").with_coords(Polygon::from_pairs([
            (100, 100),
            (180, 100),
            (180, 140),
        ]));
        word.text = Some("Hello".into());
        line.words.push(word);
        let mut word = Word::new("r1-l1-w2");
        word.text = Some("world".into());
        line.words.push(word);
        region.text_content_mut().unwrap().lines.push(line);
        doc.layout.add_region(region);

        let mut table = Region::new("t1", RegionKind::Table).with_coords(Polygon::from_pairs([
            (100, 300),
            (600, 300),
            (600, 500),
            (100, 500),
        ]));
        table.add_child(
            Region::new("t1-img", RegionKind::Image).with_coords(Polygon::from_pairs([
                (120, 320),
                (200, 320),
                (200, 380),
            ])),
        );
        doc.layout.add_region(table);
        doc
    }

    #[test]
    fn test_alto_structure() {
        let xml = write_alto(&sample_doc()).unwrap();

        assert!(xml.contains("xmlns=\"http://www.loc.gov/standards/alto/ns-v3#\""));
        assert!(xml.contains("<MeasurementUnit>pixel</MeasurementUnit>"));
        assert!(xml.contains("<fileName>0001.png</fileName>"));
        assert!(xml.contains("ID=\"pc-0001\""));
        // Print space bounding box from its polygon.
        assert!(xml.contains(
            "<PrintSpace HPOS=\"50\" VPOS=\"50\" WIDTH=\"900\" HEIGHT=\"700\">"
        ));
        // Text block with bounding box and shape outline.
        assert!(xml.contains("<TextBlock ID=\"r1\" HPOS=\"100\" VPOS=\"100\""));
        assert!(xml.contains("POINTS=\"100,100 500,100 500,200 100,200\""));
        // Baseline attribute carries the first baseline y value.
        assert!(xml.contains("BASELINE=\"135\""));
        // Words become strings separated by SP.
        assert!(xml.contains("CONTENT=\"Hello\""));
        assert!(xml.contains("<SP/>"));
        assert!(xml.contains("CONTENT=\"world\""));
        // Table becomes a composed block with its child inside.
        let composed = xml.find("<ComposedBlock ID=\"t1\"").unwrap();
        let child = xml.find("<Illustration ID=\"t1-img\"").unwrap();
        let composed_end = xml.find("</ComposedBlock>").unwrap();
        assert!(composed < child && child < composed_end);
    }

    #[test]
    fn test_alto_line_without_words_uses_line_text() {
        let mut doc = Document::new(100, 100);
        let mut region = Region::text("r1").with_coords(Polygon::from_pairs([
            (0, 0),
            (50, 0),
            (50, 20),
        ]));
        let mut line =
            TextLine::new("l1").with_coords(Polygon::from_pairs([(0, 0), (50, 0), (50, 20)]));
        line.text = Some("verse".into());
        region.text_content_mut().unwrap().lines.push(line);
        doc.layout.add_region(region);

        let xml = write_alto(&doc).unwrap();
        assert!(xml.contains("CONTENT=\"verse\""));
    }

    #[test]
    fn test_alto_defaults_print_space_to_canvas() {
        let doc = Document::new(640, 480);
        let xml = write_alto(&doc).unwrap();
        assert!(xml.contains("<PrintSpace HPOS=\"0\" VPOS=\"0\" WIDTH=\"640\" HEIGHT=\"480\">"));
        assert!(xml.contains("ID=\"page_1\""));
    }

    #[test]
    fn test_measurement_unit_is_exported() {
        let mut doc = Document::new(10, 10);
        doc.measurement_unit = crate::model::MeasurementUnit::Mm10;
        let xml = write_alto(&doc).unwrap();
        assert!(xml.contains("<MeasurementUnit>mm10</MeasurementUnit>"));
    }
}
