//! GtsID assignment.
//!
//! A GtsID is either given literally or extracted from the source
//! filename with a `prefix[start,end]` pattern, where `start` and
//! `end` are inclusive zero-based character positions within the
//! filename.

use crate::error::{Error, Result};
use crate::model::is_valid_xml_id;
use std::path::Path;

/// A parsed GtsID assignment pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GtsIdPattern {
    /// Use the given id as-is.
    Literal(String),

    /// Take `filename[start..=end]` from the source filename and
    /// prepend `prefix`.
    FromFilename {
        /// Prefix prepended to the extracted substring. May be empty.
        prefix: String,
        /// First character index, zero-based.
        start: usize,
        /// Last character index, inclusive.
        end: usize,
    },
}

impl GtsIdPattern {
    /// Parse a pattern string: `ID` or `prefix[start,end]`.
    ///
    /// Examples: `pc-00236178` is a literal; `pc-[0,7]` prepends
    /// `pc-` to the first 8 characters of the source filename.
    pub fn parse(pattern: &str) -> Result<Self> {
        let Some(open) = pattern.find('[') else {
            return Ok(GtsIdPattern::Literal(pattern.to_string()));
        };
        if !pattern.ends_with(']') {
            return Ok(GtsIdPattern::Literal(pattern.to_string()));
        }

        let prefix = pattern[..open].to_string();
        let positions = &pattern[open + 1..pattern.len() - 1];
        let (start, end) = positions
            .split_once(',')
            .ok_or_else(|| bad_pattern(pattern))?;
        let start: usize = start.trim().parse().map_err(|_| bad_pattern(pattern))?;
        let end: usize = end.trim().parse().map_err(|_| bad_pattern(pattern))?;
        if end < start {
            return Err(bad_pattern(pattern));
        }
        Ok(GtsIdPattern::FromFilename { prefix, start, end })
    }

    /// Resolve the pattern against the source file path, returning the
    /// id to set.
    pub fn resolve(&self, source_path: &Path) -> Result<String> {
        match self {
            GtsIdPattern::Literal(id) => Ok(id.clone()),
            GtsIdPattern::FromFilename { prefix, start, end } => {
                let filename = source_path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .ok_or_else(|| {
                        Error::InvalidGtsId(format!(
                            "cannot extract from path without a filename: {}",
                            source_path.display()
                        ))
                    })?;
                let chars: Vec<char> = filename.chars().collect();
                if *end >= chars.len() {
                    return Err(Error::InvalidGtsId(format!(
                        "position {end} is outside filename {filename:?}"
                    )));
                }
                let extracted: String = chars[*start..=*end].iter().collect();
                Ok(format!("{prefix}{extracted}"))
            }
        }
    }
}

fn bad_pattern(pattern: &str) -> Error {
    Error::InvalidGtsId(format!(
        "pattern must be an ID or prefix[start,end]: {pattern}"
    ))
}

/// Parse, resolve and validate a GtsID pattern in one step.
pub fn resolve_gts_id(pattern: &str, source_path: &Path) -> Result<String> {
    let id = GtsIdPattern::parse(pattern)?.resolve(source_path)?;
    if !is_valid_xml_id(&id) {
        return Err(Error::InvalidGtsId(id));
    }
    Ok(id)
}
