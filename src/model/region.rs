//! Region tree and text object types.
//!
//! Regions nest arbitrarily deep; text regions additionally own a
//! text-line hierarchy (line → word → glyph) that mirrors the region
//! containment shape. Traversal code dispatches on what a node *has*
//! (a boundary polygon, child regions, text children) rather than on
//! concrete element names.

use super::Polygon;
use serde::{Deserialize, Serialize};

/// A layout region: a node with a polygon boundary, an identifier and
/// zero or more nested child regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Region identifier, unique within the document.
    pub id: String,

    /// Boundary polygon. Absent boundaries are legal and skipped by
    /// every geometry pass.
    pub coords: Option<Polygon>,

    /// What kind of content the region holds.
    pub kind: RegionKind,

    /// Nested child regions.
    pub children: Vec<Region>,
}

impl Region {
    /// Create a new region with the given id and kind.
    pub fn new(id: impl Into<String>, kind: RegionKind) -> Self {
        Self {
            id: id.into(),
            coords: None,
            kind,
            children: Vec::new(),
        }
    }

    /// Create a text region.
    pub fn text(id: impl Into<String>) -> Self {
        Self::new(id, RegionKind::Text(TextContent::default()))
    }

    /// Set the boundary polygon.
    pub fn with_coords(mut self, coords: Polygon) -> Self {
        self.coords = Some(coords);
        self
    }

    /// Add a nested child region.
    pub fn add_child(&mut self, child: Region) {
        self.children.push(child);
    }

    /// Text content, if this is a text region.
    pub fn text_content(&self) -> Option<&TextContent> {
        match &self.kind {
            RegionKind::Text(content) => Some(content),
            _ => None,
        }
    }

    /// Mutable text content, if this is a text region.
    pub fn text_content_mut(&mut self) -> Option<&mut TextContent> {
        match &mut self.kind {
            RegionKind::Text(content) => Some(content),
            _ => None,
        }
    }

    /// Count this region, its nested regions and all text objects.
    pub fn object_count(&self) -> usize {
        let text_objects: usize = self
            .text_content()
            .map(|c| c.lines.iter().map(TextLine::object_count).sum())
            .unwrap_or(0);
        let nested: usize = self.children.iter().map(Region::object_count).sum();
        1 + text_objects + nested
    }
}

/// Content classification of a region.
///
/// The `Text` variant is the only one carrying extra structure; the
/// remaining variants follow the PAGE region element names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegionKind {
    /// A region containing text lines.
    Text(TextContent),

    /// An image or photograph.
    Image,

    /// A hand-drawn or vector graphic.
    Graphic,

    /// A line drawing.
    LineDrawing,

    /// A table.
    Table,

    /// A chart or diagram.
    Chart,

    /// A separator line between layout elements.
    Separator,

    /// A mathematical formula.
    Maths,

    /// Noise (scanning artifacts, stains).
    Noise,

    /// A region type this tool does not model further.
    Unknown,
}

impl RegionKind {
    /// The PAGE XML element name for this region kind.
    pub fn element_name(&self) -> &'static str {
        match self {
            RegionKind::Text(_) => "TextRegion",
            RegionKind::Image => "ImageRegion",
            RegionKind::Graphic => "GraphicRegion",
            RegionKind::LineDrawing => "LineDrawingRegion",
            RegionKind::Table => "TableRegion",
            RegionKind::Chart => "ChartRegion",
            RegionKind::Separator => "SeparatorRegion",
            RegionKind::Maths => "MathsRegion",
            RegionKind::Noise => "NoiseRegion",
            RegionKind::Unknown => "UnknownRegion",
        }
    }

    /// Resolve a PAGE XML element name to a region kind.
    pub fn from_element_name(name: &str) -> Option<Self> {
        Some(match name {
            "TextRegion" => RegionKind::Text(TextContent::default()),
            "ImageRegion" => RegionKind::Image,
            "GraphicRegion" => RegionKind::Graphic,
            "LineDrawingRegion" => RegionKind::LineDrawing,
            "TableRegion" => RegionKind::Table,
            "ChartRegion" => RegionKind::Chart,
            "SeparatorRegion" => RegionKind::Separator,
            "MathsRegion" => RegionKind::Maths,
            "NoiseRegion" => RegionKind::Noise,
            "UnknownRegion" => RegionKind::Unknown,
            _ => return None,
        })
    }
}

/// Text structure owned by a text region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    /// Text lines, in reading order.
    pub lines: Vec<TextLine>,

    /// Region-level text content, if the producer recorded one.
    pub text: Option<String>,
}

/// A line of text with an optional baseline polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Line identifier, unique within the document.
    pub id: String,

    /// Boundary polygon.
    pub coords: Option<Polygon>,

    /// Baseline polyline. Open point sequence, not a closed boundary;
    /// geometry correction leaves it alone, rescaling does not.
    pub baseline: Option<Polygon>,

    /// Words on this line.
    pub words: Vec<Word>,

    /// Line-level text content.
    pub text: Option<String>,
}

impl TextLine {
    /// Create a new text line.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            coords: None,
            baseline: None,
            words: Vec::new(),
            text: None,
        }
    }

    /// Set the boundary polygon.
    pub fn with_coords(mut self, coords: Polygon) -> Self {
        self.coords = Some(coords);
        self
    }

    /// Set the baseline polyline.
    pub fn with_baseline(mut self, baseline: Polygon) -> Self {
        self.baseline = Some(baseline);
        self
    }

    /// Count this line and its words and glyphs.
    pub fn object_count(&self) -> usize {
        1 + self
            .words
            .iter()
            .map(|w| 1 + w.glyphs.len())
            .sum::<usize>()
    }
}

/// A word within a text line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Word identifier, unique within the document.
    pub id: String,

    /// Boundary polygon.
    pub coords: Option<Polygon>,

    /// Glyphs making up the word.
    pub glyphs: Vec<Glyph>,

    /// Word-level text content.
    pub text: Option<String>,
}

impl Word {
    /// Create a new word.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            coords: None,
            glyphs: Vec::new(),
            text: None,
        }
    }

    /// Set the boundary polygon.
    pub fn with_coords(mut self, coords: Polygon) -> Self {
        self.coords = Some(coords);
        self
    }
}

/// A single glyph within a word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    /// Glyph identifier, unique within the document.
    pub id: String,

    /// Boundary polygon.
    pub coords: Option<Polygon>,

    /// Glyph text content (usually a single character).
    pub text: Option<String>,
}

impl Glyph {
    /// Create a new glyph.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            coords: None,
            text: None,
        }
    }

    /// Set the boundary polygon.
    pub fn with_coords(mut self, coords: Polygon) -> Self {
        self.coords = Some(coords);
        self
    }
}
