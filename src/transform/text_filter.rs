//! Rule-based rewriting of text content.
//!
//! Filter rules are regular-expression substitutions applied to the
//! text carried by text regions, lines, words and glyphs. Each rule
//! can restrict itself to a subset of those levels with a scope string
//! using the letters `r`, `l`, `w` and `g`; an empty scope applies
//! everywhere.
//!
//! Rules are loaded from an XML file of the form:
//!
//! ```xml
//! <TextFilter>
//!   <Rule pattern="\s+" replacement=" "/>
//!   <Rule pattern="¬" replacement="-" scope="wg"/>
//! </TextFilter>
//! ```

use crate::error::{Error, Result};
use crate::model::{Document, Region};
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use std::path::Path;

/// The text-object level a rule is being applied at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextLevel {
    /// Region-level text.
    Region,
    /// Line-level text.
    Line,
    /// Word-level text.
    Word,
    /// Glyph-level text.
    Glyph,
}

impl TextLevel {
    fn scope_letter(&self) -> char {
        match self {
            TextLevel::Region => 'r',
            TextLevel::Line => 'l',
            TextLevel::Word => 'w',
            TextLevel::Glyph => 'g',
        }
    }
}

/// The set of text-object levels a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextScope {
    letters: [bool; 4],
    unrestricted: bool,
}

impl TextScope {
    /// A scope covering every level.
    pub fn all() -> Self {
        Self {
            letters: [true; 4],
            unrestricted: true,
        }
    }

    /// Parse a scope string of `r`/`l`/`w`/`g` letters. An empty
    /// string covers every level; unknown letters are rejected.
    pub fn from_spec(spec: &str) -> Result<Self> {
        if spec.is_empty() {
            return Ok(Self::all());
        }
        let mut letters = [false; 4];
        for c in spec.chars() {
            match c.to_ascii_lowercase() {
                'r' => letters[0] = true,
                'l' => letters[1] = true,
                'w' => letters[2] = true,
                'g' => letters[3] = true,
                other => {
                    return Err(Error::InvalidFilterRule(format!(
                        "unknown scope letter {other:?} in {spec:?}"
                    )))
                }
            }
        }
        Ok(Self {
            letters,
            unrestricted: false,
        })
    }

    /// Whether the scope covers the given level.
    pub fn covers(&self, level: TextLevel) -> bool {
        if self.unrestricted {
            return true;
        }
        match level.scope_letter() {
            'r' => self.letters[0],
            'l' => self.letters[1],
            'w' => self.letters[2],
            _ => self.letters[3],
        }
    }
}

impl Default for TextScope {
    fn default() -> Self {
        Self::all()
    }
}

/// A single substitution rule.
#[derive(Debug, Clone)]
pub struct FilterRule {
    pattern: Regex,
    replacement: String,
    scope: TextScope,
}

impl FilterRule {
    /// Create a rule from a regex pattern, a replacement and a scope.
    pub fn new(pattern: &str, replacement: impl Into<String>, scope: TextScope) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| Error::InvalidFilterRule(format!("bad pattern {pattern:?}: {e}")))?;
        Ok(Self {
            pattern,
            replacement: replacement.into(),
            scope,
        })
    }
}

/// An ordered collection of substitution rules.
#[derive(Debug, Clone, Default)]
pub struct TextFilter {
    rules: Vec<FilterRule>,
}

impl TextFilter {
    /// Create a filter from already-built rules.
    pub fn new(rules: Vec<FilterRule>) -> Self {
        Self { rules }
    }

    /// Load filter rules from an XML rule file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_xml(&content)
    }

    /// Parse filter rules from XML text.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);
        let mut rules = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) | Event::Empty(e)
                    if e.local_name().as_ref() == b"Rule" =>
                {
                    let mut pattern = None;
                    let mut replacement = String::new();
                    let mut scope = TextScope::all();
                    for attr in e.attributes() {
                        let attr = attr?;
                        let value = attr.unescape_value()?.into_owned();
                        match attr.key.as_ref() {
                            b"pattern" => pattern = Some(value),
                            b"replacement" => replacement = value,
                            b"scope" => scope = TextScope::from_spec(&value)?,
                            _ => {}
                        }
                    }
                    let pattern = pattern.ok_or_else(|| {
                        Error::InvalidFilterRule("rule without a pattern attribute".into())
                    })?;
                    rules.push(FilterRule::new(&pattern, replacement, scope)?);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(Self::new(rules))
    }

    /// Number of loaded rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the filter has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every matching rule over a single text value.
    pub fn filter(&self, text: &str, level: TextLevel) -> String {
        let mut result = text.to_string();
        for rule in &self.rules {
            if rule.scope.covers(level) {
                result = rule
                    .pattern
                    .replace_all(&result, rule.replacement.as_str())
                    .into_owned();
            }
        }
        result
    }

    /// Apply the filter to every text object in the document, in
    /// place.
    pub fn apply(&self, document: &mut Document) {
        if self.is_empty() {
            return;
        }
        self.apply_regions(&mut document.layout.regions);
    }

    fn apply_regions(&self, regions: &mut [Region]) {
        for region in regions {
            self.apply_regions(&mut region.children);
            let Some(content) = region.text_content_mut() else {
                continue;
            };
            filter_slot(&mut content.text, self, TextLevel::Region);
            for line in &mut content.lines {
                filter_slot(&mut line.text, self, TextLevel::Line);
                for word in &mut line.words {
                    filter_slot(&mut word.text, self, TextLevel::Word);
                    for glyph in &mut word.glyphs {
                        filter_slot(&mut glyph.text, self, TextLevel::Glyph);
                    }
                }
            }
        }
    }
}

fn filter_slot(slot: &mut Option<String>, filter: &TextFilter, level: TextLevel) {
    if let Some(text) = slot {
        *text = filter.filter(text, level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Glyph, TextLine, Word};

    #[test]
    fn test_scope_parsing() {
        let scope = TextScope::from_spec("rl").unwrap();
        assert!(scope.covers(TextLevel::Region));
        assert!(scope.covers(TextLevel::Line));
        assert!(!scope.covers(TextLevel::Word));
        assert!(!scope.covers(TextLevel::Glyph));

        let all = TextScope::from_spec("").unwrap();
        assert!(all.covers(TextLevel::Glyph));

        assert!(TextScope::from_spec("rx").is_err());
    }

    #[test]
    fn test_filter_respects_scope() {
        let filter = TextFilter::new(vec![FilterRule::new(
            "a",
            "b",
            TextScope::from_spec("w").unwrap(),
        )
        .unwrap()]);
        assert_eq!(filter.filter("banana", TextLevel::Word), "bbnbnb");
        assert_eq!(filter.filter("banana", TextLevel::Line), "banana");
    }

    #[test]
    fn test_rules_apply_in_order() {
        let filter = TextFilter::new(vec![
            FilterRule::new("a", "b", TextScope::all()).unwrap(),
            FilterRule::new("bb", "c", TextScope::all()).unwrap(),
        ]);
        assert_eq!(filter.filter("ab", TextLevel::Line), "c");
    }

    #[test]
    fn test_from_xml() {
        let filter = TextFilter::from_xml(
            r#"<TextFilter>
                 <Rule pattern="\s+" replacement=" "/>
                 <Rule pattern="-$" replacement="" scope="l"/>
               </TextFilter>"#,
        )
        .unwrap();
        assert_eq!(filter.len(), 2);
        assert_eq!(filter.filter("a  \t b-", TextLevel::Line), "a b");
        assert_eq!(filter.filter("a  b-", TextLevel::Word), "a b-");
    }

    #[test]
    fn test_from_xml_rejects_missing_pattern() {
        let result = TextFilter::from_xml(r#"<TextFilter><Rule replacement="x"/></TextFilter>"#);
        assert!(matches!(result, Err(Error::InvalidFilterRule(_))));
    }

    #[test]
    fn test_apply_walks_text_hierarchy() {
        let mut doc = Document::new(100, 100);
        let mut region = Region::text("r1");
        {
            let content = region.text_content_mut().unwrap();
            content.text = Some("ff".into());
            let mut line = TextLine::new("l1");
            line.text = Some("ff".into());
            let mut word = Word::new("w1");
            word.text = Some("ff".into());
            let mut glyph = Glyph::new("g1");
            glyph.text = Some("f".into());
            word.glyphs.push(glyph);
            line.words.push(word);
            content.lines.push(line);
        }
        doc.layout.add_region(region);

        let filter = TextFilter::new(vec![FilterRule::new(
            "f",
            "t",
            TextScope::from_spec("wg").unwrap(),
        )
        .unwrap()]);
        filter.apply(&mut doc);

        let content = doc.layout.regions[0].text_content().unwrap();
        assert_eq!(content.text.as_deref(), Some("ff"));
        assert_eq!(content.lines[0].text.as_deref(), Some("ff"));
        assert_eq!(content.lines[0].words[0].text.as_deref(), Some("tt"));
        assert_eq!(
            content.lines[0].words[0].glyphs[0].text.as_deref(),
            Some("t")
        );
    }

    #[test]
    fn test_capture_group_replacement() {
        let filter = TextFilter::new(vec![FilterRule::new(
            r"(\d+)-(\d+)",
            "$2-$1",
            TextScope::all(),
        )
        .unwrap()]);
        assert_eq!(filter.filter("12-34", TextLevel::Region), "34-12");
    }
}
