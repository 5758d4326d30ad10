//! Page layout: canvas size, border, print space and the region tree.

use super::{Polygon, Region};
use serde::{Deserialize, Serialize};

/// The physical layout of a single document page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Filename of the scanned page image this layout describes.
    pub image_filename: String,

    /// Canvas width in pixels.
    pub width: u32,

    /// Canvas height in pixels.
    pub height: u32,

    /// Printed area of the page, if delimited.
    pub print_space: Option<Polygon>,

    /// Border between page content and scanner background, if
    /// delimited.
    pub border: Option<Polygon>,

    /// Top-level layout regions, in document order.
    pub regions: Vec<Region>,
}

impl Layout {
    /// Create an empty layout with the given canvas size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Add a top-level region.
    pub fn add_region(&mut self, region: Region) {
        self.regions.push(region);
    }

    /// Find a region by id anywhere in the tree.
    pub fn find_region(&self, id: &str) -> Option<&Region> {
        fn find<'a>(regions: &'a [Region], id: &str) -> Option<&'a Region> {
            for region in regions {
                if region.id == id {
                    return Some(region);
                }
                if let Some(found) = find(&region.children, id) {
                    return Some(found);
                }
            }
            None
        }
        find(&self.regions, id)
    }

    /// Total number of regions and text objects in the tree.
    pub fn object_count(&self) -> usize {
        self.regions.iter().map(Region::object_count).sum()
    }

    /// Check whether the layout has no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
