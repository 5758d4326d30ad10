//! The conversion pipeline.
//!
//! One run loads a document, applies the optional metadata and
//! geometry passes, and writes the result. Failures in the optional
//! passes are logged and the run continues; only loading and writing
//! are fatal.

use crate::detect::LayoutFormat;
use crate::error::Result;
use crate::model::{MeasurementUnit, ResolutionUnit};
use crate::parser::{read_file_with_options, ReadOptions};
use crate::schema::OutputFormat;
use crate::transform::{rescale, resolve_gts_id, sanitize, NegativeCoordPolicy, TextFilter};
use crate::writer::write_file;
use log::{info, warn};
use std::path::Path;

/// Options for a conversion run.
///
/// The struct is immutable once built; the pipeline takes it by
/// reference and keeps no other state between runs.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Source format. When unset, the format is sniffed.
    pub source_format: Option<LayoutFormat>,

    /// Read leniently, recovering from broken content.
    pub lenient: bool,

    /// GtsID assignment pattern (`ID` or `prefix[start,end]`).
    pub gts_id: Option<String>,

    /// Text filter applied before the geometry passes.
    pub text_filter: Option<TextFilter>,

    /// Negative-coordinate correction policy.
    pub neg_coords: Option<NegativeCoordPolicy>,

    /// Target output format. When unset, the document is written as
    /// PAGE XML in its source schema version.
    pub convert_to: Option<OutputFormat>,

    /// Declares the coordinate unit of the source document, overriding
    /// what the reader derived.
    pub measurement_unit: Option<MeasurementUnit>,

    /// Horizontal resolution override for rescaling.
    pub x_resolution: Option<f64>,

    /// Vertical resolution override for rescaling.
    pub y_resolution: Option<f64>,

    /// Unit of the resolution overrides.
    pub resolution_unit: Option<ResolutionUnit>,

    /// Whether to rescale coordinates to pixels.
    pub transform_coords: bool,
}

impl ConvertOptions {
    /// Create new conversion options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the source format instead of sniffing.
    pub fn with_source_format(mut self, format: LayoutFormat) -> Self {
        self.source_format = Some(format);
        self
    }

    /// Enable lenient reading.
    pub fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }

    /// Set the GtsID assignment pattern.
    pub fn with_gts_id(mut self, pattern: impl Into<String>) -> Self {
        self.gts_id = Some(pattern.into());
        self
    }

    /// Set the text filter.
    pub fn with_text_filter(mut self, filter: TextFilter) -> Self {
        self.text_filter = Some(filter);
        self
    }

    /// Set the negative-coordinate policy.
    pub fn with_neg_coords(mut self, policy: NegativeCoordPolicy) -> Self {
        self.neg_coords = Some(policy);
        self
    }

    /// Set the target output format.
    pub fn convert_to(mut self, format: OutputFormat) -> Self {
        self.convert_to = Some(format);
        self
    }

    /// Declare the source coordinate unit.
    pub fn with_measurement_unit(mut self, unit: MeasurementUnit) -> Self {
        self.measurement_unit = Some(unit);
        self
    }

    /// Set resolution overrides for rescaling.
    pub fn with_resolution(mut self, x: f64, y: f64) -> Self {
        self.x_resolution = Some(x);
        self.y_resolution = Some(y);
        self
    }

    /// Set the unit of the resolution overrides.
    pub fn with_resolution_unit(mut self, unit: ResolutionUnit) -> Self {
        self.resolution_unit = Some(unit);
        self
    }

    /// Enable coordinate rescaling.
    pub fn transform_coords(mut self, enabled: bool) -> Self {
        self.transform_coords = enabled;
        self
    }
}

/// What a conversion run did.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertSummary {
    /// Object count after loading.
    pub objects_before: usize,

    /// Object count after all passes.
    pub objects_after: usize,

    /// GtsID that was set, if any.
    pub gts_id: Option<String>,

    /// Sanitization policy that ran, if any.
    pub sanitized: Option<NegativeCoordPolicy>,

    /// Whether the rescaling pass ran. The pass itself is a no-op for
    /// pixel-unit documents and when no resolution is available.
    pub rescaled: bool,

    /// Format the document was written in.
    pub output_format: OutputFormat,
}

/// Run the full conversion pipeline: load, set GtsID, filter text,
/// sanitize coordinates, migrate schema, rescale, write.
pub fn convert_file(
    source: &Path,
    target: &Path,
    options: &ConvertOptions,
) -> Result<ConvertSummary> {
    // Load. Failures here are fatal; nothing has been mutated yet.
    let mut read_options = ReadOptions::new();
    if options.lenient {
        read_options = read_options.lenient();
    }
    if let Some(format) = options.source_format {
        read_options = read_options.with_format(format);
    }
    let mut document = read_file_with_options(source, &read_options)?;
    let objects_before = document.object_count();
    info!(
        "loaded {} ({} objects, schema {})",
        source.display(),
        objects_before,
        document.schema_version
    );

    if let Some(unit) = options.measurement_unit {
        document.measurement_unit = unit;
    }

    // Set GtsID. A bad pattern or an invalid resolved id is logged and
    // the run continues without the field.
    let mut assigned_gts_id = None;
    if let Some(pattern) = &options.gts_id {
        match resolve_gts_id(pattern, source).and_then(|id| {
            document.set_gts_id(id.clone())?;
            Ok(id)
        }) {
            Ok(id) => {
                info!("set GtsID to {id}");
                assigned_gts_id = Some(id);
            }
            Err(e) => warn!("could not set the GtsID: {e}"),
        }
    }

    // Text filter, before any geometry pass.
    if let Some(filter) = &options.text_filter {
        info!("applying {} text filter rule(s)", filter.len());
        filter.apply(&mut document);
    }

    // Negative-coordinate correction.
    if let Some(policy) = options.neg_coords {
        sanitize(&mut document, policy);
        info!(
            "sanitized negative coordinates ({policy:?}), {} object(s) remain",
            document.object_count()
        );
    }

    // Schema migration happens between sanitizing and rescaling.
    let output_format = match options.convert_to {
        Some(OutputFormat::PageXml(version)) => {
            info!(
                "converting schema {} -> {version}",
                document.schema_version
            );
            document.schema_version = version;
            OutputFormat::PageXml(version)
        }
        Some(OutputFormat::Alto) => OutputFormat::Alto,
        None => OutputFormat::PageXml(document.schema_version),
    };

    // Coordinate rescaling.
    if options.transform_coords {
        rescale(
            &mut document,
            options.x_resolution,
            options.y_resolution,
            options.resolution_unit,
        );
        info!("rescaled coordinates to pixel space");
    }

    document.metadata.touch();

    // Write. Validation failures surface as a structured error list.
    write_file(&document, target, output_format)?;
    info!("wrote {} as {output_format}", target.display());

    Ok(ConvertSummary {
        objects_before,
        objects_after: document.object_count(),
        gts_id: assigned_gts_id,
        sanitized: options.neg_coords,
        rescaled: options.transform_coords,
        output_format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaVersion;

    #[test]
    fn test_convert_options_builder() {
        let options = ConvertOptions::new()
            .lenient()
            .with_gts_id("pc-[0,7]")
            .with_neg_coords(NegativeCoordPolicy::ZeroClamp)
            .convert_to(OutputFormat::PageXml(SchemaVersion::LATEST))
            .with_resolution(300.0, 300.0)
            .with_resolution_unit(ResolutionUnit::Ppi)
            .with_measurement_unit(MeasurementUnit::Inch1200)
            .transform_coords(true);

        assert!(options.lenient);
        assert_eq!(options.gts_id.as_deref(), Some("pc-[0,7]"));
        assert_eq!(options.neg_coords, Some(NegativeCoordPolicy::ZeroClamp));
        assert_eq!(options.x_resolution, Some(300.0));
        assert_eq!(options.measurement_unit, Some(MeasurementUnit::Inch1200));
        assert!(options.transform_coords);
    }

    #[test]
    fn test_default_options_are_passive() {
        let options = ConvertOptions::default();
        assert!(options.gts_id.is_none());
        assert!(options.neg_coords.is_none());
        assert!(options.convert_to.is_none());
        assert!(!options.transform_coords);
    }
}
