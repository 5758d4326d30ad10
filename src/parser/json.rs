//! Vendor JSON layout reader.
//!
//! Reads the Google Cloud Vision `fullTextAnnotation` shape: pages
//! contain blocks, blocks contain paragraphs, paragraphs contain words,
//! words contain symbols, and every level carries a bounding polygon.
//! Blocks map to text regions, paragraphs to text lines, symbols to
//! glyphs. Only the first page of a multi-page response is used; a
//! layout document describes a single page image.

use crate::error::{Error, Result};
use crate::model::{Document, Glyph, Point, Polygon, Region, TextLine, Word};
use log::warn;
use serde::Deserialize;

/// Parse a vendor JSON layout document.
pub fn read_json(json: &str) -> Result<Document> {
    let root: VisionRoot = serde_json::from_str(json)?;
    let annotation = root
        .full_text_annotation
        .or_else(|| {
            root.responses
                .into_iter()
                .flatten()
                .find_map(|r| r.full_text_annotation)
        })
        .ok_or_else(|| {
            Error::MalformedDocument("JSON input has no fullTextAnnotation".into())
        })?;

    let mut pages = annotation.pages.into_iter();
    let Some(page) = pages.next() else {
        return Err(Error::MalformedDocument(
            "fullTextAnnotation has no pages".into(),
        ));
    };
    if pages.next().is_some() {
        warn!("JSON input has multiple pages, reading only the first");
    }

    let mut doc = Document::new(page.width, page.height);
    for (block_index, block) in page.blocks.into_iter().enumerate() {
        let region_id = format!("r{}", block_index + 1);
        let mut region = Region::text(&region_id);
        region.coords = polygon_from(block.bounding_box);

        let content = region.text_content_mut().expect("text region");
        for (para_index, paragraph) in block.paragraphs.into_iter().enumerate() {
            let line_id = format!("{region_id}-l{}", para_index + 1);
            let mut line = TextLine::new(&line_id);
            line.coords = polygon_from(paragraph.bounding_box);

            for (word_index, word) in paragraph.words.into_iter().enumerate() {
                let word_id = format!("{line_id}-w{}", word_index + 1);
                let mut out = Word::new(&word_id);
                out.coords = polygon_from(word.bounding_box);

                let mut text = String::new();
                for (symbol_index, symbol) in word.symbols.into_iter().enumerate() {
                    let glyph_id = format!("{word_id}-g{}", symbol_index + 1);
                    let mut glyph = Glyph::new(glyph_id);
                    glyph.coords = polygon_from(symbol.bounding_box);
                    text.push_str(&symbol.text);
                    glyph.text = Some(symbol.text);
                    out.glyphs.push(glyph);
                }
                if !text.is_empty() {
                    out.text = Some(text);
                }
                line.words.push(out);
            }

            let line_text = line
                .words
                .iter()
                .filter_map(|w| w.text.as_deref())
                .collect::<Vec<_>>()
                .join(" ");
            if !line_text.is_empty() {
                line.text = Some(line_text);
            }
            content.lines.push(line);
        }

        let region_text = content
            .lines
            .iter()
            .filter_map(|l| l.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n");
        if !region_text.is_empty() {
            content.text = Some(region_text);
        }
        doc.layout.add_region(region);
    }

    Ok(doc)
}

fn polygon_from(bounding_box: Option<BoundingBox>) -> Option<Polygon> {
    let bounding_box = bounding_box?;
    if bounding_box.vertices.is_empty() {
        return None;
    }
    Some(
        bounding_box
            .vertices
            .into_iter()
            .map(|v| Point::new(v.x, v.y))
            .collect(),
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VisionRoot {
    full_text_annotation: Option<Annotation>,
    #[serde(default)]
    responses: Option<Vec<VisionResponse>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VisionResponse {
    full_text_annotation: Option<Annotation>,
}

#[derive(Debug, Deserialize)]
struct Annotation {
    #[serde(default)]
    pages: Vec<VisionPage>,
}

#[derive(Debug, Deserialize)]
struct VisionPage {
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    blocks: Vec<VisionBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VisionBlock {
    bounding_box: Option<BoundingBox>,
    #[serde(default)]
    paragraphs: Vec<VisionParagraph>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VisionParagraph {
    bounding_box: Option<BoundingBox>,
    #[serde(default)]
    words: Vec<VisionWord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VisionWord {
    bounding_box: Option<BoundingBox>,
    #[serde(default)]
    symbols: Vec<VisionSymbol>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VisionSymbol {
    bounding_box: Option<BoundingBox>,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct BoundingBox {
    #[serde(default)]
    vertices: Vec<Vertex>,
}

/// Cloud Vision omits zero-valued components, so both default to zero.
#[derive(Debug, Deserialize)]
struct Vertex {
    #[serde(default)]
    x: i32,
    #[serde(default)]
    y: i32,
}
