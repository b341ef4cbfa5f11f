//! Derivation settings.
//!
//! Defines the YAML-serializable configuration that controls which tag key
//! is read, which bare words mark a property as required, and how deep
//! nested documents may go.
//!
//! # Example YAML
//!
//! ```yaml
//! tag_key: json
//! required_keywords:
//!   - required
//! schema_uri: "http://json-schema.org/schema#"
//! additional_properties: false
//! max_depth: 32
//! ```
//!
//! Every key is optional; missing keys take their default value.

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tag::REQUIRED_KEYWORD;

/// URI placed in the `$schema` keyword of the outermost document.
pub const SCHEMA_URI: &str = "http://json-schema.org/schema#";

/// Tag key read when no configuration says otherwise.
pub const DEFAULT_TAG_KEY: &str = "json";

/// Nesting limit applied when no configuration says otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Settings for schema derivation.
///
/// # Examples
///
/// ```
/// use tagschema::SchemaConfig;
///
/// let config = SchemaConfig::default()
///     .with_tag_key("api")
///     .with_required_keyword("mandatory");
/// assert_eq!(config.tag_key, "api");
/// assert!(config.is_required_keyword("required"));
/// assert!(config.is_required_keyword("mandatory"));
/// assert!(!config.is_required_keyword("omitempty"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Tag key whose value drives derivation (e.g. `json` in `#[tag(json = "...")]`).
    pub tag_key: String,
    /// Bare tag words that mark a property as required.
    pub required_keywords: Vec<String>,
    /// Value of `$schema` on the outermost document.
    pub schema_uri: String,
    /// Value of `additionalProperties` on every derived document.
    pub additional_properties: bool,
    /// Maximum number of nested document levels below the root.
    pub max_depth: usize,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            tag_key: DEFAULT_TAG_KEY.to_string(),
            required_keywords: vec![REQUIRED_KEYWORD.to_string()],
            schema_uri: SCHEMA_URI.to_string(),
            additional_properties: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SchemaConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::SchemaError::Io) if the file cannot be read, or
    /// [`Yaml`](crate::SchemaError::Yaml) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`Yaml`](crate::SchemaError::Yaml) if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagschema::SchemaConfig;
    ///
    /// let config = SchemaConfig::from_yaml_str("tag_key: xml\nmax_depth: 4\n").unwrap();
    /// assert_eq!(config.tag_key, "xml");
    /// assert_eq!(config.max_depth, 4);
    /// assert_eq!(config.required_keywords, vec!["required"]);
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::SchemaError::Io) if the file cannot be written,
    /// or [`Yaml`](crate::SchemaError::Yaml) if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Sets the tag key.
    pub fn with_tag_key(mut self, key: &str) -> Self {
        self.tag_key = key.to_string();
        self
    }

    /// Adds a bare word that marks a property as required.
    pub fn with_required_keyword(mut self, keyword: &str) -> Self {
        if !self.is_required_keyword(keyword) {
            self.required_keywords.push(keyword.to_string());
        }
        self
    }

    /// Sets the nesting limit.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sets `additionalProperties` for derived documents.
    pub fn allow_additional_properties(mut self) -> Self {
        self.additional_properties = true;
        self
    }

    /// Returns `true` if `word` marks a property as required.
    pub fn is_required_keyword(&self, word: &str) -> bool {
        self.required_keywords.iter().any(|k| k == word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
tag_key: api
required_keywords:
  - required
  - mandatory
schema_uri: "https://json-schema.org/draft/2020-12/schema"
additional_properties: true
max_depth: 3
"#
    }

    #[test]
    fn test_defaults() {
        let config = SchemaConfig::default();
        assert_eq!(config.tag_key, "json");
        assert_eq!(config.required_keywords, vec!["required"]);
        assert_eq!(config.schema_uri, SCHEMA_URI);
        assert!(!config.additional_properties);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_deserialize_complete() {
        let config = SchemaConfig::from_yaml_str(sample_yaml()).unwrap();
        assert_eq!(config.tag_key, "api");
        assert_eq!(config.required_keywords, vec!["required", "mandatory"]);
        assert_eq!(
            config.schema_uri,
            "https://json-schema.org/draft/2020-12/schema"
        );
        assert!(config.additional_properties);
        assert_eq!(config.max_depth, 3);
    }

    #[test]
    fn test_deserialize_empty_document_uses_defaults() {
        let config = SchemaConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, SchemaConfig::default());
    }

    #[test]
    fn test_deserialize_rejects_wrong_types() {
        assert!(SchemaConfig::from_yaml_str("max_depth: deep").is_err());
    }

    #[test]
    fn test_with_required_keyword_is_idempotent() {
        let config = SchemaConfig::default()
            .with_required_keyword("required")
            .with_required_keyword("mandatory")
            .with_required_keyword("mandatory");
        assert_eq!(config.required_keywords, vec!["required", "mandatory"]);
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tagschema.yml");

        let original = SchemaConfig::from_yaml_str(sample_yaml()).unwrap();
        original.save(&path).unwrap();

        let loaded = SchemaConfig::load(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SchemaConfig::load(dir.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, crate::SchemaError::Io(_)));
    }
}
