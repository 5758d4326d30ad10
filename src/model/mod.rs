//! In-memory model of a layout document.
//!
//! This module defines the intermediate representation shared by every
//! reader, writer and transform: a single-page document whose layout is
//! a recursive region tree with a parallel text hierarchy (text line →
//! word → glyph). Ownership is single-parent throughout; deleting an
//! object unlinks its whole subtree.

mod document;
mod geometry;
mod layout;
mod region;

pub use document::{is_valid_xml_id, Document, MeasurementUnit, Metadata, ResolutionUnit};
pub use geometry::{Point, Polygon};
pub use layout::Layout;
pub use region::{Glyph, Region, RegionKind, TextContent, TextLine, Word};
