//! Negative-coordinate correction.
//!
//! Scanned ground truth occasionally carries boundary points with
//! negative components, which no downstream consumer can interpret.
//! This pass walks the full layout tree and either clamps the
//! offending components to zero or removes the offending objects.

use crate::model::{Document, Glyph, Polygon, Region, TextLine, Word};
use serde::{Deserialize, Serialize};

/// What to do with an object whose boundary has negative coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeCoordPolicy {
    /// Clamp every negative component to zero, keeping the object.
    ZeroClamp,

    /// Remove the object (and with it everything it contains) from its
    /// parent.
    DeleteObject,
}

/// Correct negative coordinates everywhere in the document, in place.
///
/// Border and print space are unset on the layout when deleted; regions
/// and text objects are removed from their parent's child collection.
/// Removal at each level is deferred until the sibling scan of that
/// level has completed, so a collection is never mutated while it is
/// being walked. Text line baselines are left untouched: only boundary
/// polygons are corrected.
pub fn sanitize(document: &mut Document, policy: NegativeCoordPolicy) {
    let layout = &mut document.layout;
    sanitize_slot(&mut layout.print_space, policy);
    sanitize_slot(&mut layout.border, policy);
    sanitize_regions(&mut layout.regions, policy);
}

/// True when a present polygon has at least one negative component.
/// Absent polygons never count as negative.
fn is_negative(coords: &Option<Polygon>) -> bool {
    coords.as_ref().is_some_and(Polygon::has_negative)
}

fn clamp(coords: &mut Option<Polygon>) {
    if let Some(polygon) = coords {
        polygon.clamp_negative();
    }
}

/// Apply the policy to a layout-owned optional polygon (border, print
/// space). Deletion means unsetting the slot.
fn sanitize_slot(slot: &mut Option<Polygon>, policy: NegativeCoordPolicy) {
    match policy {
        NegativeCoordPolicy::ZeroClamp => clamp(slot),
        NegativeCoordPolicy::DeleteObject => {
            if is_negative(slot) {
                *slot = None;
            }
        }
    }
}

fn sanitize_regions(regions: &mut Vec<Region>, policy: NegativeCoordPolicy) {
    for region in regions.iter_mut() {
        if policy == NegativeCoordPolicy::ZeroClamp {
            clamp(&mut region.coords);
        }
        // A region slated for removal is still scanned; its subtree is
        // dropped as one unit when the retain pass below runs.
        sanitize_regions(&mut region.children, policy);
        if let Some(content) = region.text_content_mut() {
            sanitize_lines(&mut content.lines, policy);
        }
    }
    if policy == NegativeCoordPolicy::DeleteObject {
        regions.retain(|r| !is_negative(&r.coords));
    }
}

fn sanitize_lines(lines: &mut Vec<TextLine>, policy: NegativeCoordPolicy) {
    for line in lines.iter_mut() {
        if policy == NegativeCoordPolicy::ZeroClamp {
            clamp(&mut line.coords);
        }
        sanitize_words(&mut line.words, policy);
    }
    if policy == NegativeCoordPolicy::DeleteObject {
        lines.retain(|l| !is_negative(&l.coords));
    }
}

fn sanitize_words(words: &mut Vec<Word>, policy: NegativeCoordPolicy) {
    for word in words.iter_mut() {
        if policy == NegativeCoordPolicy::ZeroClamp {
            clamp(&mut word.coords);
        }
        sanitize_glyphs(&mut word.glyphs, policy);
    }
    if policy == NegativeCoordPolicy::DeleteObject {
        words.retain(|w| !is_negative(&w.coords));
    }
}

fn sanitize_glyphs(glyphs: &mut Vec<Glyph>, policy: NegativeCoordPolicy) {
    if policy == NegativeCoordPolicy::ZeroClamp {
        for glyph in glyphs.iter_mut() {
            clamp(&mut glyph.coords);
        }
    } else {
        glyphs.retain(|g| !is_negative(&g.coords));
    }
}
