//! Document-level types: root object, metadata, measurement units.

use super::Layout;
use crate::error::{Error, Result};
use crate::schema::SchemaVersion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A loaded layout document.
///
/// One document describes one page image: its metadata, the coordinate
/// unit and image resolution its geometry is expressed in, and the
/// layout tree itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Ground-truth dataset identifier (`pcGtsId`), if assigned.
    pub gts_id: Option<String>,

    /// Schema version the document was read as, and will be written as
    /// unless a conversion step changes it.
    pub schema_version: SchemaVersion,

    /// The coordinate unit geometry is expressed in.
    pub measurement_unit: MeasurementUnit,

    /// Horizontal image resolution, if declared.
    pub x_resolution: Option<f64>,

    /// Vertical image resolution, if declared.
    pub y_resolution: Option<f64>,

    /// Unit of the declared resolution values.
    pub resolution_unit: Option<ResolutionUnit>,

    /// Document metadata.
    pub metadata: Metadata,

    /// Page layout tree.
    pub layout: Layout,
}

impl Document {
    /// Create an empty document with the given canvas size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            layout: Layout::new(width, height),
            ..Default::default()
        }
    }

    /// Set the GtsID after checking it conforms to the XML ID
    /// convention (must be usable as an `xml:id` value).
    pub fn set_gts_id(&mut self, id: impl Into<String>) -> Result<()> {
        let id = id.into();
        if !is_valid_xml_id(&id) {
            return Err(Error::InvalidGtsId(id));
        }
        self.gts_id = Some(id);
        Ok(())
    }

    /// Total number of regions and text objects in the layout tree.
    pub fn object_count(&self) -> usize {
        self.layout.object_count()
    }
}

/// Check whether a string is usable as an XML ID: non-empty, starting
/// with a letter or underscore, continuing with letters, digits,
/// underscores, hyphens or dots.
pub fn is_valid_xml_id(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// The coordinate unit a document's geometry is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementUnit {
    /// Plain pixels. Rescaling a pixel-unit document is meaningless
    /// since the scale is always one.
    #[default]
    Pixel,

    /// 1/1200 inch units.
    Inch1200,

    /// 1/10 millimeter units.
    Mm10,
}

impl MeasurementUnit {
    /// The identifier used in serialized documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementUnit::Pixel => "pixel",
            MeasurementUnit::Inch1200 => "inch1200",
            MeasurementUnit::Mm10 => "mm10",
        }
    }
}

impl std::str::FromStr for MeasurementUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pixel" => Ok(MeasurementUnit::Pixel),
            "inch1200" => Ok(MeasurementUnit::Inch1200),
            "mm10" => Ok(MeasurementUnit::Mm10),
            other => Err(Error::Other(format!("unknown measurement unit: {other}"))),
        }
    }
}

impl std::fmt::Display for MeasurementUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit of declared image resolution values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionUnit {
    /// Pixels per inch.
    #[default]
    Ppi,

    /// Pixels per centimeter.
    Ppcm,

    /// Producer-specific unit; treated as PPI during rescaling.
    Other,
}

impl ResolutionUnit {
    /// The attribute value used in PAGE XML.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionUnit::Ppi => "PPI",
            ResolutionUnit::Ppcm => "PPCM",
            ResolutionUnit::Other => "other",
        }
    }

    /// Parse a PAGE XML attribute value. Unrecognized values map to
    /// [`ResolutionUnit::Other`].
    pub fn from_attribute(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "PPI" => ResolutionUnit::Ppi,
            "PPCM" => ResolutionUnit::Ppcm,
            _ => ResolutionUnit::Other,
        }
    }
}

impl std::fmt::Display for ResolutionUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document metadata, mirroring the PAGE `<Metadata>` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Producer of the document.
    pub creator: Option<String>,

    /// Creation timestamp.
    pub created: Option<DateTime<Utc>>,

    /// Last modification timestamp.
    pub last_change: Option<DateTime<Utc>>,

    /// Free-form comments.
    pub comments: Option<String>,
}

impl Metadata {
    /// Record a modification now, keeping the original creation time.
    pub fn touch(&mut self) {
        self.last_change = Some(Utc::now());
    }
}
