//! Metadata tag parsing.
//!
//! A tag has the form `name[,segment]*`. Each segment after the name is
//! either `key=value`, which becomes a schema keyword on the property, or
//! a bare word. Bare words only matter when they are listed as semantic
//! keywords (by default just `required`); formatting hints such as
//! `omitempty` are ignored.
//!
//! # Examples
//!
//! ```
//! use tagschema::TagDirective;
//!
//! let directive = TagDirective::parse("email,format=email,required,omitempty", &["required"]);
//! assert_eq!(directive.name, "email");
//! assert_eq!(directive.keywords.get("format").map(String::as_str), Some("email"));
//! assert_eq!(directive.required, vec!["email"]);
//! ```

use std::collections::BTreeMap;

/// Tag value that excludes a field from the schema.
pub const SKIP_MARKER: &str = "-";

/// Bare word that marks a property as required.
pub const REQUIRED_KEYWORD: &str = "required";

/// Keyword → value mapping for a single property.
pub type Keywords = BTreeMap<String, String>;

/// Parsed form of one metadata tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDirective {
    /// Property name (the first comma-delimited segment, possibly empty).
    pub name: String,
    /// `key=value` segments.
    pub keywords: Keywords,
    /// Property names flagged required by this tag.
    pub required: Vec<String>,
}

impl TagDirective {
    /// Whether a tag excludes its field entirely.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagschema::TagDirective;
    ///
    /// assert!(TagDirective::is_skipped(""));
    /// assert!(TagDirective::is_skipped("-"));
    /// assert!(!TagDirective::is_skipped("-,"));
    /// ```
    pub fn is_skipped(tag: &str) -> bool {
        tag.is_empty() || tag == SKIP_MARKER
    }

    /// Parses a tag string.
    ///
    /// `required_keywords` lists the bare words that mark the property as
    /// required. Keyword segments are split at the first `=`, so values may
    /// themselves contain `=`.
    pub fn parse<S: AsRef<str>>(tag: &str, required_keywords: &[S]) -> Self {
        let mut segments = tag.split(',');
        let name = segments.next().unwrap_or_default().to_string();

        let mut keywords = Keywords::new();
        let mut required = Vec::new();
        for segment in segments {
            match segment.split_once('=') {
                Some((key, value)) => {
                    keywords.insert(key.to_string(), value.to_string());
                }
                None if required_keywords.iter().any(|k| k.as_ref() == segment) => {
                    required.push(name.clone());
                }
                None => {}
            }
        }

        Self {
            name,
            keywords,
            required,
        }
    }

    /// Returns the explicit `type` keyword, if the tag supplies one.
    pub fn explicit_type(&self) -> Option<&str> {
        self.keywords
            .get("type")
            .map(String::as_str)
            .filter(|t| !t.is_empty())
    }
}
