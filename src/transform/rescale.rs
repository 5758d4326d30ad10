//! Coordinate rescaling between physical measurement units and pixels.
//!
//! Documents derived from print-oriented formats express geometry in
//! 1/1200 inch or 1/10 mm units. Given the resolution of the page
//! image, every coordinate can be converted to pixel space with one
//! linear factor per axis.

use crate::model::{Document, MeasurementUnit, Polygon, Region, ResolutionUnit, TextLine};

const MM_PER_INCH: f64 = 25.4;
const CM_PER_INCH: f64 = 2.54;

/// Rescale all document geometry from the declared measurement unit to
/// pixels, in place.
///
/// The resolution overrides take precedence over the values stored on
/// the document; the unit override likewise. The call is a no-op when
/// either effective resolution is missing or not positive, or when the
/// document's measurement unit is already pixels. The measurement unit
/// field itself is not changed here.
///
/// Scaled values are truncated when converted back to integer storage,
/// so a rescale composed with its inverse lands within one unit of the
/// original coordinates.
pub fn rescale(
    document: &mut Document,
    x_resolution: Option<f64>,
    y_resolution: Option<f64>,
    resolution_unit: Option<ResolutionUnit>,
) {
    if document.measurement_unit == MeasurementUnit::Pixel {
        return;
    }
    let Some(x_res) = x_resolution.or(document.x_resolution) else {
        return;
    };
    let Some(y_res) = y_resolution.or(document.y_resolution) else {
        return;
    };
    if x_res <= 0.0 || y_res <= 0.0 {
        return;
    }

    // Normalize the resolution to pixels per inch.
    let unit = resolution_unit
        .or(document.resolution_unit)
        .unwrap_or_default();
    let (x_ppi, y_ppi) = match unit {
        ResolutionUnit::Ppcm => (x_res * CM_PER_INCH, y_res * CM_PER_INCH),
        ResolutionUnit::Ppi | ResolutionUnit::Other => (x_res, y_res),
    };

    // Physical size of one pixel, expressed in the document's unit.
    let (pixel_width, pixel_height) = match document.measurement_unit {
        MeasurementUnit::Inch1200 => (1200.0 / x_ppi, 1200.0 / y_ppi),
        MeasurementUnit::Mm10 => (10.0 * MM_PER_INCH / x_ppi, 10.0 * MM_PER_INCH / y_ppi),
        MeasurementUnit::Pixel => return,
    };

    let x_factor = 1.0 / pixel_width;
    let y_factor = 1.0 / pixel_height;

    let layout = &mut document.layout;
    layout.width = (f64::from(layout.width) * x_factor) as u32;
    layout.height = (f64::from(layout.height) * y_factor) as u32;

    scale_slot(&mut layout.print_space, x_factor, y_factor);
    scale_slot(&mut layout.border, x_factor, y_factor);
    scale_regions(&mut layout.regions, x_factor, y_factor);
}

fn scale_slot(slot: &mut Option<Polygon>, x_factor: f64, y_factor: f64) {
    if let Some(polygon) = slot {
        polygon.scale(x_factor, y_factor);
    }
}

fn scale_regions(regions: &mut [Region], x_factor: f64, y_factor: f64) {
    for region in regions {
        scale_slot(&mut region.coords, x_factor, y_factor);
        scale_regions(&mut region.children, x_factor, y_factor);
        if let Some(content) = region.text_content_mut() {
            scale_lines(&mut content.lines, x_factor, y_factor);
        }
    }
}

fn scale_lines(lines: &mut [TextLine], x_factor: f64, y_factor: f64) {
    for line in lines {
        scale_slot(&mut line.coords, x_factor, y_factor);
        // Unlike the sanitizer, rescaling does cover baselines.
        scale_slot(&mut line.baseline, x_factor, y_factor);
        for word in &mut line.words {
            scale_slot(&mut word.coords, x_factor, y_factor);
            for glyph in &mut word.glyphs {
                scale_slot(&mut glyph.coords, x_factor, y_factor);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Glyph, Region, RegionKind, Word};

    fn inch1200_doc() -> Document {
        let mut doc = Document::new(9600, 14400);
        doc.measurement_unit = MeasurementUnit::Inch1200;
        let mut region = Region::text("r1")
            .with_coords(Polygon::from_pairs([(400, 800), (4800, 800), (4800, 7200)]));
        let mut line = TextLine::new("l1")
            .with_coords(Polygon::from_pairs([(400, 800), (2000, 800), (2000, 1200)]))
            .with_baseline(Polygon::from_pairs([(400, 1160), (2000, 1160)]));
        let mut word = Word::new("w1").with_coords(Polygon::from_pairs([
            (400, 800),
            (1000, 800),
            (1000, 1200),
        ]));
        word.glyphs.push(Glyph::new("g1").with_coords(Polygon::from_pairs([
            (400, 800),
            (520, 800),
            (520, 1200),
        ])));
        line.words.push(word);
        region.text_content_mut().unwrap().lines.push(line);
        doc.layout.add_region(region);
        doc
    }

    #[test]
    fn test_inch1200_at_300_ppi() {
        // One pixel is 1200/300 = 4 units, so the factor is 0.25.
        let mut doc = inch1200_doc();
        rescale(&mut doc, Some(300.0), Some(300.0), Some(ResolutionUnit::Ppi));

        assert_eq!(doc.layout.width, 2400);
        assert_eq!(doc.layout.height, 3600);
        let region = &doc.layout.regions[0];
        assert_eq!(
            region.coords,
            Some(Polygon::from_pairs([(100, 200), (1200, 200), (1200, 1800)]))
        );
        let line = &region.text_content().unwrap().lines[0];
        assert_eq!(
            line.baseline,
            Some(Polygon::from_pairs([(100, 290), (500, 290)]))
        );
        assert_eq!(
            line.words[0].glyphs[0].coords,
            Some(Polygon::from_pairs([(100, 200), (130, 200), (130, 300)]))
        );
        // Rescaling does not touch the declared unit.
        assert_eq!(doc.measurement_unit, MeasurementUnit::Inch1200);
    }

    #[test]
    fn test_mm10_pixel_size() {
        // 254 units per inch at 127 PPI gives a factor of 0.5.
        let mut doc = Document::new(2000, 1000);
        doc.measurement_unit = MeasurementUnit::Mm10;
        doc.layout.border = Some(Polygon::from_pairs([(100, 50), (900, 50), (900, 450)]));
        rescale(&mut doc, Some(127.0), Some(127.0), None);

        assert_eq!(doc.layout.width, 1000);
        assert_eq!(doc.layout.height, 500);
        assert_eq!(
            doc.layout.border,
            Some(Polygon::from_pairs([(50, 25), (450, 25), (450, 225)]))
        );
    }

    #[test]
    fn test_ppcm_normalization() {
        // 50 PPCM is 127 PPI, same factor as the test above.
        let mut doc = Document::new(2000, 1000);
        doc.measurement_unit = MeasurementUnit::Mm10;
        doc.layout.border = Some(Polygon::from_pairs([(100, 50), (900, 50), (900, 450)]));
        rescale(&mut doc, Some(50.0), Some(50.0), Some(ResolutionUnit::Ppcm));

        assert_eq!(
            doc.layout.border,
            Some(Polygon::from_pairs([(50, 25), (450, 25), (450, 225)]))
        );
    }

    #[test]
    fn test_axes_scale_independently() {
        let mut doc = Document::new(1200, 1200);
        doc.measurement_unit = MeasurementUnit::Inch1200;
        doc.layout.print_space = Some(Polygon::from_pairs([(400, 800)]));
        rescale(&mut doc, Some(300.0), Some(600.0), Some(ResolutionUnit::Ppi));

        assert_eq!(doc.layout.width, 300);
        assert_eq!(doc.layout.height, 600);
        assert_eq!(
            doc.layout.print_space,
            Some(Polygon::from_pairs([(100, 400)]))
        );
    }

    #[test]
    fn test_noop_for_pixel_documents() {
        let mut doc = inch1200_doc();
        doc.measurement_unit = MeasurementUnit::Pixel;
        let before = doc.clone();
        rescale(&mut doc, Some(300.0), Some(300.0), None);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_noop_when_resolution_missing() {
        let mut doc = inch1200_doc();
        let before = doc.clone();
        rescale(&mut doc, Some(300.0), None, None);
        assert_eq!(doc, before);
        rescale(&mut doc, None, None, None);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_noop_when_resolution_not_positive() {
        let mut doc = inch1200_doc();
        let before = doc.clone();
        rescale(&mut doc, Some(0.0), Some(300.0), None);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_document_resolution_used_when_no_override() {
        let mut doc = inch1200_doc();
        doc.x_resolution = Some(300.0);
        doc.y_resolution = Some(300.0);
        doc.resolution_unit = Some(ResolutionUnit::Ppi);
        rescale(&mut doc, None, None, None);
        assert_eq!(doc.layout.width, 2400);
    }

    #[test]
    fn test_override_beats_document_resolution() {
        let mut doc = inch1200_doc();
        doc.x_resolution = Some(1200.0);
        doc.y_resolution = Some(1200.0);
        rescale(&mut doc, Some(300.0), Some(300.0), None);
        assert_eq!(doc.layout.width, 2400);
    }

    #[test]
    fn test_round_trip_within_one_unit() {
        let original = Polygon::from_pairs([(401, 799), (4803, 801), (4799, 7201), (13, 7)]);
        for (unit, res) in [
            (MeasurementUnit::Inch1200, 300.0),
            (MeasurementUnit::Inch1200, 240.0),
            (MeasurementUnit::Mm10, 118.0),
        ] {
            let mut doc = Document::new(9600, 14400);
            doc.measurement_unit = unit;
            doc.layout.add_region(
                Region::new("r1", RegionKind::Graphic).with_coords(original.clone()),
            );
            rescale(&mut doc, Some(res), Some(res), None);

            // Undo with the reciprocal factor and compare.
            let pixel_size = match unit {
                MeasurementUnit::Inch1200 => 1200.0 / res,
                MeasurementUnit::Mm10 => 254.0 / res,
                MeasurementUnit::Pixel => unreachable!(),
            };
            let mut back = doc.layout.regions[0].coords.clone().unwrap();
            back.scale(pixel_size, pixel_size);
            for (a, b) in back.points.iter().zip(&original.points) {
                assert!((a.x - b.x).abs() <= pixel_size.ceil() as i32);
                assert!((a.y - b.y).abs() <= pixel_size.ceil() as i32);
            }
        }
    }

    #[test]
    fn test_missing_polygons_are_skipped() {
        let mut doc = Document::new(1200, 1200);
        doc.measurement_unit = MeasurementUnit::Inch1200;
        doc.layout.add_region(Region::new("r1", RegionKind::Image));
        rescale(&mut doc, Some(300.0), Some(300.0), None);
        assert_eq!(doc.layout.width, 300);
        assert!(doc.layout.regions[0].coords.is_none());
    }
}
