//! PAGE XML reader.
//!
//! Reads every supported schema version into the common model. The
//! version is derived from the root namespace; both coordinate
//! encodings are accepted regardless of the declared version, so
//! mislabeled files still load.

use super::{ErrorMode, ReadOptions};
use crate::error::{Error, Result};
use crate::model::{
    Document, Glyph, Point, Polygon, Region, RegionKind, ResolutionUnit, TextLine, Word,
};
use crate::schema::SchemaVersion;
use chrono::{DateTime, NaiveDateTime, Utc};
use log::warn;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;
use std::str::FromStr;

/// Parse a PAGE XML document.
pub fn read_page_xml(xml: &str, options: &ReadOptions) -> Result<Document> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut doc = Document::default();
    let mut found_root = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"PcGts" => {
                    found_root = true;
                    read_root_attributes(&e, &mut doc, options)?;
                }
                b"Metadata" => read_metadata(&mut reader, &mut doc)?,
                b"Page" => read_page(&mut reader, &e, &mut doc, options)?,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"PcGts" => {
                    found_root = true;
                    read_root_attributes(&e, &mut doc, options)?;
                }
                b"Page" => read_page_attributes(&e, &mut doc, options)?,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !found_root {
        return Err(Error::MalformedDocument("missing PcGts root element".into()));
    }
    Ok(doc)
}

fn read_root_attributes(
    e: &BytesStart<'_>,
    doc: &mut Document,
    options: &ReadOptions,
) -> Result<()> {
    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?.into_owned();
        match attr.key.as_ref() {
            b"xmlns" => {
                if let Some(version) = SchemaVersion::from_namespace(&value) {
                    doc.schema_version = version;
                } else if SchemaVersion::is_page_namespace(&value) {
                    match options.error_mode {
                        ErrorMode::Strict => return Err(Error::UnsupportedVersion(value)),
                        ErrorMode::Lenient => {
                            warn!("unsupported PAGE namespace {value}, reading as latest");
                        }
                    }
                }
            }
            b"pcGtsId" => doc.gts_id = Some(value),
            _ => {}
        }
    }
    Ok(())
}

fn read_metadata<R: BufRead>(reader: &mut Reader<R>, doc: &mut Document) -> Result<()> {
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                let text = read_element_text(reader, &name)?;
                match name.as_slice() {
                    b"Creator" => doc.metadata.creator = text,
                    b"Created" => doc.metadata.created = text.as_deref().and_then(parse_timestamp),
                    b"LastChange" => {
                        doc.metadata.last_change = text.as_deref().and_then(parse_timestamp)
                    }
                    b"Comments" => doc.metadata.comments = text,
                    _ => {}
                }
            }
            Event::End(e) if e.local_name().as_ref() == b"Metadata" => break,
            Event::Eof => return Err(unexpected_eof("Metadata")),
            _ => {}
        }
        buf.clear();
    }
    Ok(())
}

/// Timestamps in the wild are either RFC 3339 or the zone-less PAGE
/// form `2019-06-17T08:28:06`. Unparsable values are dropped.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc())
}

fn read_page_attributes(
    start: &BytesStart<'_>,
    doc: &mut Document,
    options: &ReadOptions,
) -> Result<()> {
    for attr in start.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?.into_owned();
        match attr.key.as_ref() {
            b"imageFilename" => doc.layout.image_filename = value,
            b"imageWidth" => {
                doc.layout.width = parse_number(&value, "imageWidth", options)?.unwrap_or(0)
            }
            b"imageHeight" => {
                doc.layout.height = parse_number(&value, "imageHeight", options)?.unwrap_or(0)
            }
            b"imageXResolution" => {
                doc.x_resolution = parse_number(&value, "imageXResolution", options)?
            }
            b"imageYResolution" => {
                doc.y_resolution = parse_number(&value, "imageYResolution", options)?
            }
            b"imageResolutionUnit" => {
                doc.resolution_unit = Some(ResolutionUnit::from_attribute(&value))
            }
            _ => {}
        }
    }
    Ok(())
}

fn read_page<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart<'_>,
    doc: &mut Document,
    options: &ReadOptions,
) -> Result<()> {
    read_page_attributes(start, doc, options)?;

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                match name.as_slice() {
                    b"Border" => doc.layout.border = read_bounded(reader, b"Border", options)?,
                    b"PrintSpace" => {
                        doc.layout.print_space = read_bounded(reader, b"PrintSpace", options)?
                    }
                    other => {
                        if let Some(kind) = region_kind(other) {
                            let region = read_region(reader, &e, kind, options)?;
                            doc.layout.regions.push(region);
                        } else {
                            skip_element(reader, &e)?;
                        }
                    }
                }
            }
            Event::Empty(e) => {
                if let Some(kind) = region_kind(e.local_name().as_ref()) {
                    let id = read_id(&e, "region", options)?;
                    doc.layout.regions.push(Region::new(id, kind));
                }
            }
            Event::End(e) if e.local_name().as_ref() == b"Page" => break,
            Event::Eof => return Err(unexpected_eof("Page")),
            _ => {}
        }
        buf.clear();
    }
    Ok(())
}

fn region_kind(element_name: &[u8]) -> Option<RegionKind> {
    std::str::from_utf8(element_name)
        .ok()
        .and_then(RegionKind::from_element_name)
}

/// Read a `Border` or `PrintSpace` element down to its `Coords`.
fn read_bounded<R: BufRead>(
    reader: &mut Reader<R>,
    end_name: &[u8],
    options: &ReadOptions,
) -> Result<Option<Polygon>> {
    let mut polygon = None;
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.local_name().as_ref() == b"Coords" => {
                polygon = read_coords(reader, &e, false, options)?;
            }
            Event::Empty(e) if e.local_name().as_ref() == b"Coords" => {
                polygon = read_coords(reader, &e, true, options)?;
            }
            Event::End(e) if e.local_name().as_ref() == end_name => break,
            Event::Eof => return Err(unexpected_eof("Border/PrintSpace")),
            _ => {}
        }
        buf.clear();
    }
    Ok(polygon)
}

fn read_region<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart<'_>,
    kind: RegionKind,
    options: &ReadOptions,
) -> Result<Region> {
    let name = start.local_name().as_ref().to_vec();
    let id = read_id(start, "region", options)?;
    let mut region = Region::new(id, kind);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let child = e.local_name().as_ref().to_vec();
                match child.as_slice() {
                    b"Coords" => region.coords = read_coords(reader, &e, false, options)?,
                    b"TextLine" => {
                        let line = read_text_line(reader, &e, options)?;
                        match region.text_content_mut() {
                            Some(content) => content.lines.push(line),
                            None => warn!("ignoring TextLine in non-text region {}", region.id),
                        }
                    }
                    b"TextEquiv" => {
                        let text = read_text_equiv(reader)?;
                        if let Some(content) = region.text_content_mut() {
                            content.text = text;
                        }
                    }
                    other => {
                        if let Some(child_kind) = region_kind(other) {
                            let nested = read_region(reader, &e, child_kind, options)?;
                            region.children.push(nested);
                        } else {
                            skip_element(reader, &e)?;
                        }
                    }
                }
            }
            Event::Empty(e) => {
                let child = e.local_name().as_ref().to_vec();
                if child == b"Coords" {
                    region.coords = read_coords(reader, &e, true, options)?;
                } else if let Some(child_kind) = region_kind(&child) {
                    let id = read_id(&e, "region", options)?;
                    region.children.push(Region::new(id, child_kind));
                }
            }
            Event::End(e) if e.local_name().as_ref() == name.as_slice() => break,
            Event::Eof => return Err(unexpected_eof("region")),
            _ => {}
        }
        buf.clear();
    }
    Ok(region)
}

fn read_text_line<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart<'_>,
    options: &ReadOptions,
) -> Result<TextLine> {
    let mut line = TextLine::new(read_id(start, "text line", options)?);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"Coords" => line.coords = read_coords(reader, &e, false, options)?,
                b"Baseline" => line.baseline = read_coords(reader, &e, false, options)?,
                b"Word" => line.words.push(read_word(reader, &e, options)?),
                b"TextEquiv" => line.text = read_text_equiv(reader)?,
                _ => skip_element(reader, &e)?,
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"Coords" => line.coords = read_coords(reader, &e, true, options)?,
                b"Baseline" => line.baseline = read_coords(reader, &e, true, options)?,
                _ => {}
            },
            Event::End(e) if e.local_name().as_ref() == b"TextLine" => break,
            Event::Eof => return Err(unexpected_eof("TextLine")),
            _ => {}
        }
        buf.clear();
    }
    Ok(line)
}

fn read_word<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart<'_>,
    options: &ReadOptions,
) -> Result<Word> {
    let mut word = Word::new(read_id(start, "word", options)?);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"Coords" => word.coords = read_coords(reader, &e, false, options)?,
                b"Glyph" => word.glyphs.push(read_glyph(reader, &e, options)?),
                b"TextEquiv" => word.text = read_text_equiv(reader)?,
                _ => skip_element(reader, &e)?,
            },
            Event::Empty(e) if e.local_name().as_ref() == b"Coords" => {
                word.coords = read_coords(reader, &e, true, options)?;
            }
            Event::End(e) if e.local_name().as_ref() == b"Word" => break,
            Event::Eof => return Err(unexpected_eof("Word")),
            _ => {}
        }
        buf.clear();
    }
    Ok(word)
}

fn read_glyph<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart<'_>,
    options: &ReadOptions,
) -> Result<Glyph> {
    let mut glyph = Glyph::new(read_id(start, "glyph", options)?);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"Coords" => glyph.coords = read_coords(reader, &e, false, options)?,
                b"TextEquiv" => glyph.text = read_text_equiv(reader)?,
                _ => skip_element(reader, &e)?,
            },
            Event::Empty(e) if e.local_name().as_ref() == b"Coords" => {
                glyph.coords = read_coords(reader, &e, true, options)?;
            }
            Event::End(e) if e.local_name().as_ref() == b"Glyph" => break,
            Event::Eof => return Err(unexpected_eof("Glyph")),
            _ => {}
        }
        buf.clear();
    }
    Ok(glyph)
}

/// Read a `Coords` or `Baseline` element into a polygon.
///
/// Handles both serialization forms: the `points` attribute and
/// `<Point>` child elements.
fn read_coords<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart<'_>,
    is_empty: bool,
    options: &ReadOptions,
) -> Result<Option<Polygon>> {
    let end_name = start.local_name().as_ref().to_vec();
    let mut polygon = match attribute(start, b"points")? {
        Some(value) => parse_points(&value, options.error_mode)?,
        None => Some(Polygon::new()),
    };

    if !is_empty {
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Point" => {
                    let x = attribute(&e, b"x")?.unwrap_or_default();
                    let y = attribute(&e, b"y")?.unwrap_or_default();
                    match (x.trim().parse(), y.trim().parse()) {
                        (Ok(x), Ok(y)) => {
                            if let Some(p) = polygon.as_mut() {
                                p.push(Point::new(x, y));
                            }
                        }
                        _ => match options.error_mode {
                            ErrorMode::Strict => {
                                return Err(Error::MalformedDocument(format!(
                                    "bad Point element: x={x:?} y={y:?}"
                                )))
                            }
                            ErrorMode::Lenient => {
                                warn!("dropping polygon with bad Point element");
                                polygon = None;
                            }
                        },
                    }
                }
                Event::End(e) if e.local_name().as_ref() == end_name.as_slice() => break,
                Event::Eof => return Err(unexpected_eof("Coords")),
                _ => {}
            }
            buf.clear();
        }
    }

    Ok(polygon)
}

/// Parse a `points` attribute value: whitespace-separated `x,y` pairs.
fn parse_points(value: &str, mode: ErrorMode) -> Result<Option<Polygon>> {
    let mut polygon = Polygon::new();
    for token in value.split_whitespace() {
        let point = token
            .split_once(',')
            .and_then(|(x, y)| Some(Point::new(x.trim().parse().ok()?, y.trim().parse().ok()?)));
        match point {
            Some(point) => polygon.push(point),
            None => {
                return match mode {
                    ErrorMode::Strict => Err(Error::MalformedDocument(format!(
                        "bad coordinate token {token:?}"
                    ))),
                    ErrorMode::Lenient => {
                        warn!("dropping polygon with bad coordinate token {token:?}");
                        Ok(None)
                    }
                }
            }
        }
    }
    Ok(Some(polygon))
}

fn read_text_equiv<R: BufRead>(reader: &mut Reader<R>) -> Result<Option<String>> {
    let mut buf = Vec::new();
    let mut text = None;
    let mut in_unicode = false;
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.local_name().as_ref() == b"Unicode" => in_unicode = true,
            Event::End(e) if e.local_name().as_ref() == b"Unicode" => in_unicode = false,
            Event::Text(t) if in_unicode => text = Some(t.unescape()?.into_owned()),
            Event::End(e) if e.local_name().as_ref() == b"TextEquiv" => break,
            Event::Eof => return Err(unexpected_eof("TextEquiv")),
            _ => {}
        }
        buf.clear();
    }
    Ok(text)
}

fn read_element_text<R: BufRead>(
    reader: &mut Reader<R>,
    end_name: &[u8],
) -> Result<Option<String>> {
    let mut buf = Vec::new();
    let mut text = None;
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(t) => text = Some(t.unescape()?.into_owned()),
            Event::End(e) if e.local_name().as_ref() == end_name => break,
            Event::Eof => return Err(unexpected_eof("Metadata")),
            _ => {}
        }
        buf.clear();
    }
    Ok(text)
}

fn read_id(e: &BytesStart<'_>, what: &str, options: &ReadOptions) -> Result<String> {
    match attribute(e, b"id")? {
        Some(id) => Ok(id),
        None => match options.error_mode {
            ErrorMode::Strict => Err(Error::MalformedDocument(format!("{what} without an id"))),
            ErrorMode::Lenient => {
                warn!("{what} without an id");
                Ok(String::new())
            }
        },
    }
}

fn attribute(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn parse_number<T: FromStr>(value: &str, what: &str, options: &ReadOptions) -> Result<Option<T>> {
    match value.trim().parse() {
        Ok(v) => Ok(Some(v)),
        Err(_) => match options.error_mode {
            ErrorMode::Strict => Err(Error::MalformedDocument(format!(
                "bad {what} value {value:?}"
            ))),
            ErrorMode::Lenient => {
                warn!("ignoring bad {what} value {value:?}");
                Ok(None)
            }
        },
    }
}

fn skip_element<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart<'_>) -> Result<()> {
    let end = start.to_end().into_owned();
    let mut buf = Vec::new();
    reader.read_to_end_into(end.name(), &mut buf)?;
    Ok(())
}

fn unexpected_eof(context: &str) -> Error {
    Error::MalformedDocument(format!("unexpected end of file inside {context}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MeasurementUnit;

    const SAMPLE_2019: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<PcGts xmlns="http://schema.primaresearch.org/PAGE/gts/pagecontent/2019-07-15"
       pcGtsId="pc-00236178">
  <Metadata>
    <Creator>scan-station-4</Creator>
    <Created>2019-06-17T08:28:06</Created>
    <LastChange>2019-06-18T10:00:00</LastChange>
    <Comments>second pass</Comments>
  </Metadata>
  <Page imageFilename="00236178.png" imageWidth="2480" imageHeight="3508"
        imageXResolution="300" imageYResolution="300" imageResolutionUnit="PPI">
    <Border>
      <Coords points="0,0 2479,0 2479,3507 0,3507"/>
    </Border>
    <PrintSpace>
      <Coords points="100,100 2380,100 2380,3400 100,3400"/>
    </PrintSpace>
    <TextRegion id="r1">
      <Coords points="120,120 900,120 900,400 120,400"/>
      <TextLine id="r1-l1">
        <Coords points="125,130 890,130 890,180 125,180"/>
        <Baseline points="125,170 890,170"/>
        <Word id="r1-l1-w1">
          <Coords points="125,130 300,130 300,180 125,180"/>
          <Glyph id="r1-l1-w1-g1">
            <Coords points="125,130 150,130 150,180 125,180"/>
            <TextEquiv><Unicode>T</Unicode></TextEquiv>
          </Glyph>
          <TextEquiv><Unicode>The</Unicode></TextEquiv>
        </Word>
        <TextEquiv><Unicode>The quick fox</Unicode></TextEquiv>
      </TextLine>
      <TextEquiv><Unicode>The quick fox</Unicode></TextEquiv>
      <ImageRegion id="r1-nested">
        <Coords points="500,300 600,300 600,380 500,380"/>
      </ImageRegion>
    </TextRegion>
    <SeparatorRegion id="r2">
      <Coords points="0,450 2479,450 2479,455 0,455"/>
    </SeparatorRegion>
  </Page>
</PcGts>"#;

    #[test]
    fn test_read_full_document() {
        let doc = read_page_xml(SAMPLE_2019, &ReadOptions::default()).unwrap();

        assert_eq!(doc.gts_id.as_deref(), Some("pc-00236178"));
        assert_eq!(doc.schema_version, SchemaVersion::V2019_07_15);
        assert_eq!(doc.metadata.creator.as_deref(), Some("scan-station-4"));
        assert!(doc.metadata.created.is_some());
        assert_eq!(doc.metadata.comments.as_deref(), Some("second pass"));

        assert_eq!(doc.layout.image_filename, "00236178.png");
        assert_eq!((doc.layout.width, doc.layout.height), (2480, 3508));
        assert_eq!(doc.x_resolution, Some(300.0));
        assert_eq!(doc.resolution_unit, Some(ResolutionUnit::Ppi));
        assert_eq!(doc.measurement_unit, MeasurementUnit::Pixel);

        assert_eq!(doc.layout.border.as_ref().unwrap().len(), 4);
        assert_eq!(doc.layout.print_space.as_ref().unwrap().len(), 4);
        assert_eq!(doc.layout.regions.len(), 2);

        let r1 = &doc.layout.regions[0];
        assert_eq!(r1.id, "r1");
        assert_eq!(r1.children.len(), 1);
        assert_eq!(r1.children[0].id, "r1-nested");
        let content = r1.text_content().unwrap();
        assert_eq!(content.text.as_deref(), Some("The quick fox"));
        let line = &content.lines[0];
        assert_eq!(line.baseline.as_ref().unwrap().len(), 2);
        assert_eq!(line.words[0].text.as_deref(), Some("The"));
        assert_eq!(line.words[0].glyphs[0].text.as_deref(), Some("T"));
    }

    #[test]
    fn test_read_point_children_form() {
        let xml = r#"<PcGts xmlns="http://schema.primaresearch.org/PAGE/gts/pagecontent/2010-03-19">
  <Page imageFilename="p.tif" imageWidth="100" imageHeight="100">
    <TextRegion id="r1">
      <Coords>
        <Point x="1" y="2"/>
        <Point x="3" y="4"/>
        <Point x="5" y="6"/>
      </Coords>
    </TextRegion>
  </Page>
</PcGts>"#;
        let doc = read_page_xml(xml, &ReadOptions::default()).unwrap();
        assert_eq!(doc.schema_version, SchemaVersion::V2010_03_19);
        assert_eq!(
            doc.layout.regions[0].coords,
            Some(Polygon::from_pairs([(1, 2), (3, 4), (5, 6)]))
        );
    }

    #[test]
    fn test_negative_coordinates_survive_reading() {
        let xml = r#"<PcGts xmlns="http://schema.primaresearch.org/PAGE/gts/pagecontent/2019-07-15">
  <Page imageFilename="p.png" imageWidth="10" imageHeight="10">
    <ImageRegion id="r1"><Coords points="-5,10 100,-3 100,100"/></ImageRegion>
  </Page>
</PcGts>"#;
        let doc = read_page_xml(xml, &ReadOptions::default()).unwrap();
        assert_eq!(
            doc.layout.regions[0].coords,
            Some(Polygon::from_pairs([(-5, 10), (100, -3), (100, 100)]))
        );
    }

    #[test]
    fn test_strict_rejects_bad_points() {
        let xml = r#"<PcGts xmlns="http://schema.primaresearch.org/PAGE/gts/pagecontent/2019-07-15">
  <Page imageFilename="p.png" imageWidth="10" imageHeight="10">
    <ImageRegion id="r1"><Coords points="1,2 oops 5,6"/></ImageRegion>
  </Page>
</PcGts>"#;
        assert!(matches!(
            read_page_xml(xml, &ReadOptions::default()),
            Err(Error::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_lenient_drops_bad_polygon() {
        let xml = r#"<PcGts xmlns="http://schema.primaresearch.org/PAGE/gts/pagecontent/2019-07-15">
  <Page imageFilename="p.png" imageWidth="10" imageHeight="10">
    <ImageRegion id="r1"><Coords points="1,2 oops 5,6"/></ImageRegion>
  </Page>
</PcGts>"#;
        let doc = read_page_xml(xml, &ReadOptions::new().lenient()).unwrap();
        assert_eq!(doc.layout.regions[0].id, "r1");
        assert!(doc.layout.regions[0].coords.is_none());
    }

    #[test]
    fn test_strict_rejects_unsupported_namespace() {
        let xml = r#"<PcGts xmlns="http://schema.primaresearch.org/PAGE/gts/pagecontent/2009-03-16">
  <Page imageFilename="p.png" imageWidth="1" imageHeight="1"/>
</PcGts>"#;
        assert!(matches!(
            read_page_xml(xml, &ReadOptions::default()),
            Err(Error::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_missing_root_is_malformed() {
        let err = read_page_xml("<Document/>", &ReadOptions::default()).unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }

    #[test]
    fn test_empty_page_element() {
        let xml = r#"<PcGts xmlns="http://schema.primaresearch.org/PAGE/gts/pagecontent/2019-07-15">
  <Page imageFilename="blank.png" imageWidth="640" imageHeight="480"/>
</PcGts>"#;
        let doc = read_page_xml(xml, &ReadOptions::default()).unwrap();
        assert_eq!(doc.layout.image_filename, "blank.png");
        assert_eq!((doc.layout.width, doc.layout.height), (640, 480));
        assert!(doc.layout.regions.is_empty());
    }

    #[test]
    fn test_unknown_elements_are_skipped() {
        let xml = r#"<PcGts xmlns="http://schema.primaresearch.org/PAGE/gts/pagecontent/2019-07-15">
  <Page imageFilename="p.png" imageWidth="10" imageHeight="10">
    <ReadingOrder><OrderedGroup id="g1"/></ReadingOrder>
    <TextRegion id="r1">
      <Coords points="0,0 5,0 5,5"/>
      <TextStyle fontSize="12.0"/>
    </TextRegion>
  </Page>
</PcGts>"#;
        let doc = read_page_xml(xml, &ReadOptions::default()).unwrap();
        assert_eq!(doc.layout.regions.len(), 1);
        assert_eq!(doc.layout.regions[0].coords.as_ref().unwrap().len(), 3);
    }
}
