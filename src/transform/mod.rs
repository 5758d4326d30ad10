//! In-place document transforms.
//!
//! All passes share the same walk over the layout tree: border and
//! print space first, then the region tree depth-first, then each text
//! region's line → word → glyph hierarchy. None of them perform I/O.

mod gts_id;
mod rescale;
mod sanitize;
mod text_filter;

pub use gts_id::{resolve_gts_id, GtsIdPattern};
pub use rescale::rescale;
pub use sanitize::{sanitize, NegativeCoordPolicy};
pub use text_filter::{FilterRule, TextFilter, TextLevel, TextScope};
