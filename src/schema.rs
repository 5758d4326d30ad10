//! PAGE schema versions and output format selection.
//!
//! Schema migration in this tool means writing the tree under a
//! different namespace and serialization form; element semantics are
//! untouched. The visible differences between supported versions are
//! the namespace URI, the coordinate encoding (`points` attribute
//! versus `<Point>` children) and the 2019 resolution attributes.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const NAMESPACE_PREFIX: &str = "http://schema.primaresearch.org/PAGE/gts/pagecontent/";

/// A supported PAGE schema version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SchemaVersion {
    /// 2010-03-19: coordinates as `<Point>` child elements.
    V2010_03_19,

    /// 2013-07-15: coordinates move into the `points` attribute.
    V2013_07_15,

    /// 2017-07-15.
    V2017_07_15,

    /// 2019-07-15: adds image resolution attributes on `Page`.
    #[default]
    V2019_07_15,
}

impl SchemaVersion {
    /// The most recent supported version, selected by the `LATEST`
    /// sentinel.
    pub const LATEST: SchemaVersion = SchemaVersion::V2019_07_15;

    /// All supported versions, oldest first.
    pub const ALL: [SchemaVersion; 4] = [
        SchemaVersion::V2010_03_19,
        SchemaVersion::V2013_07_15,
        SchemaVersion::V2017_07_15,
        SchemaVersion::V2019_07_15,
    ];

    /// The dated version identifier, e.g. `2019-07-15`.
    pub fn identifier(&self) -> &'static str {
        match self {
            SchemaVersion::V2010_03_19 => "2010-03-19",
            SchemaVersion::V2013_07_15 => "2013-07-15",
            SchemaVersion::V2017_07_15 => "2017-07-15",
            SchemaVersion::V2019_07_15 => "2019-07-15",
        }
    }

    /// The XML namespace URI of this version.
    pub fn namespace(&self) -> String {
        format!("{NAMESPACE_PREFIX}{}", self.identifier())
    }

    /// The `xsi:schemaLocation` value of this version.
    pub fn schema_location(&self) -> String {
        let ns = self.namespace();
        format!("{ns} {ns}/pagecontent.xsd")
    }

    /// Whether coordinates are serialized as a `points` attribute
    /// (2013-07-15 and later) rather than `<Point>` children.
    pub fn uses_points_attribute(&self) -> bool {
        *self >= SchemaVersion::V2013_07_15
    }

    /// Whether `Page` carries image resolution attributes.
    pub fn has_resolution_attributes(&self) -> bool {
        *self >= SchemaVersion::V2019_07_15
    }

    /// Resolve a namespace URI to a schema version.
    pub fn from_namespace(namespace: &str) -> Option<Self> {
        let identifier = namespace.strip_prefix(NAMESPACE_PREFIX)?;
        Self::ALL
            .into_iter()
            .find(|v| v.identifier() == identifier)
    }

    /// Whether a namespace URI belongs to the PAGE content schema at
    /// all, supported version or not.
    pub fn is_page_namespace(namespace: &str) -> bool {
        namespace.starts_with(NAMESPACE_PREFIX)
    }
}

impl FromStr for SchemaVersion {
    type Err = Error;

    /// Resolve a version identifier, accepting the `LATEST` sentinel.
    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("latest") {
            return Ok(SchemaVersion::LATEST);
        }
        Self::ALL
            .into_iter()
            .find(|v| v.identifier() == s)
            .ok_or_else(|| Error::UnsupportedVersion(s.to_string()))
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// The output format of a conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// PAGE XML under the given schema version.
    PageXml(SchemaVersion),

    /// ALTO XML.
    Alto,
}

impl OutputFormat {
    /// Resolve a `--convert-to` identifier: `ALTO`, `LATEST` or a
    /// dated PAGE version.
    pub fn from_identifier(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("alto") {
            return Ok(OutputFormat::Alto);
        }
        Ok(OutputFormat::PageXml(s.parse()?))
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::PageXml(version) => write!(f, "PAGE {version}"),
            OutputFormat::Alto => f.write_str("ALTO"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_sentinel() {
        assert_eq!(
            "LATEST".parse::<SchemaVersion>().unwrap(),
            SchemaVersion::V2019_07_15
        );
        assert_eq!(
            "latest".parse::<SchemaVersion>().unwrap(),
            SchemaVersion::LATEST
        );
    }

    #[test]
    fn test_dated_identifiers() {
        for version in SchemaVersion::ALL {
            assert_eq!(
                version.identifier().parse::<SchemaVersion>().unwrap(),
                version
            );
        }
        assert!(matches!(
            "2005-01-01".parse::<SchemaVersion>(),
            Err(Error::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_namespace_round_trip() {
        for version in SchemaVersion::ALL {
            assert_eq!(
                SchemaVersion::from_namespace(&version.namespace()),
                Some(version)
            );
        }
        assert!(SchemaVersion::from_namespace("http://example.com/ns").is_none());
    }

    #[test]
    fn test_serialization_form_flags() {
        assert!(!SchemaVersion::V2010_03_19.uses_points_attribute());
        assert!(SchemaVersion::V2013_07_15.uses_points_attribute());
        assert!(!SchemaVersion::V2017_07_15.has_resolution_attributes());
        assert!(SchemaVersion::V2019_07_15.has_resolution_attributes());
    }

    #[test]
    fn test_output_format_from_identifier() {
        assert_eq!(
            OutputFormat::from_identifier("ALTO").unwrap(),
            OutputFormat::Alto
        );
        assert_eq!(
            OutputFormat::from_identifier("2013-07-15").unwrap(),
            OutputFormat::PageXml(SchemaVersion::V2013_07_15)
        );
        assert_eq!(
            OutputFormat::from_identifier("LATEST").unwrap(),
            OutputFormat::PageXml(SchemaVersion::LATEST)
        );
        assert!(OutputFormat::from_identifier("docx").is_err());
    }
}
