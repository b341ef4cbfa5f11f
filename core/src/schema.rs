//! Derived schema documents.
//!
//! [`JsonSchema`] is the value handed back to callers. It serializes to the
//! JSON Schema flavored layout below; empty optional parts are omitted, and
//! in particular `required` never appears as an empty array.
//!
//! ```json
//! {
//!   "$schema": "http://json-schema.org/schema#",
//!   "name": "user",
//!   "type": "object",
//!   "required": ["id"],
//!   "properties": {
//!     "id": {"type": "integer"},
//!     "address": {"name": "address", "type": "object", "properties": {...}}
//!   },
//!   "links": [{"href": "/users/{id}", "rel": "self"}]
//! }
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::builder::SchemaBuilder;
use crate::config::SchemaConfig;
use crate::error::Result;
use crate::reflect::{Describe, Relation};
use crate::tag::Keywords;

/// Value of the `type` keyword on every derived document.
pub const OBJECT_TYPE: &str = "object";

/// A derived schema document.
///
/// # Examples
///
/// ```
/// use tagschema::{JsonSchema, Reflect, Shape};
///
/// struct Account {
///     id: u64,
///     email: String,
///     secret: String,
/// }
///
/// impl Reflect for Account {
///     fn shape() -> Shape {
///         Shape::record::<Self>()
///             .field::<u64>("id", &[("json", "id,required")])
///             .field::<String>("email", &[("json", "email,format=email")])
///             .field::<String>("secret", &[("json", "-")])
///     }
/// }
///
/// let account = Account { id: 1, email: String::new(), secret: String::new() };
/// let schema = JsonSchema::new(&account, Some("account"), None);
///
/// assert_eq!(schema.required, vec!["id"]);
/// assert_eq!(schema.properties.len(), 2);
/// assert_eq!(schema.properties.get("email").and_then(|p| p.json_type()), Some("string"));
/// assert!(schema.properties.get("secret").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct JsonSchema {
    /// `$schema`; only the outermost document carries it.
    #[serde(rename = "$schema", skip_serializing_if = "String::is_empty")]
    pub schema_uri: String,
    /// Caller-supplied name, or the property name for nested documents.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Always [`OBJECT_TYPE`].
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Caller-supplied description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// `additionalProperties`.
    #[serde(rename = "additionalProperties", skip_serializing_if = "is_false")]
    pub additional_properties: bool,
    /// Required property names in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Properties in derivation order.
    #[serde(skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
    /// Hyperlink relations from the [`Links`](crate::Links) capability.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Relation>,
}

fn is_false(value: &bool) -> bool {
    !value
}

impl JsonSchema {
    /// Derives a schema from `value` with the default configuration.
    ///
    /// Never fails: absent references, primitives, and records without
    /// tagged fields all produce a document with no properties.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagschema::JsonSchema;
    ///
    /// let schema = JsonSchema::new(&"", Some("nothing"), Some("not a record"));
    /// assert!(schema.properties.is_empty());
    /// assert!(schema.required.is_empty());
    /// assert_eq!(schema.schema_type, "object");
    /// ```
    pub fn new(value: &dyn Describe, name: Option<&str>, description: Option<&str>) -> Self {
        Self::with_config(value, name, description, &SchemaConfig::default())
    }

    /// Derives a schema from `value` with an explicit configuration.
    pub fn with_config(
        value: &dyn Describe,
        name: Option<&str>,
        description: Option<&str>,
        config: &SchemaConfig,
    ) -> Self {
        SchemaBuilder::new(config).build(
            value,
            name.unwrap_or_default(),
            description.unwrap_or_default(),
        )
    }

    /// Creates an empty document carrying the configured URI.
    pub(crate) fn empty(config: &SchemaConfig) -> Self {
        Self {
            schema_uri: config.schema_uri.clone(),
            name: String::new(),
            schema_type: OBJECT_TYPE.to_string(),
            description: String::new(),
            additional_properties: config.additional_properties,
            required: Vec::new(),
            properties: Properties::default(),
            links: Vec::new(),
        }
    }

    /// Records `name` as required unless it already is.
    pub(crate) fn push_required(&mut self, name: &str) {
        if !self.is_required(name) {
            self.required.push(name.to_string());
        }
    }

    /// Returns `true` if `name` is listed in `required`.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// Serializes the document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Json`](crate::SchemaError::Json) if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Converts the document into a [`serde_json::Value`].
    ///
    /// # Errors
    ///
    /// Returns [`Json`](crate::SchemaError::Json) if serialization fails.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Value of one entry in `properties`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Property {
    /// Keyword mapping for scalar, container, and opaque fields.
    Keywords(Keywords),
    /// Nested document for record fields without an explicit `type`.
    Nested(Box<JsonSchema>),
}

impl Property {
    /// The `type` of the property.
    pub fn json_type(&self) -> Option<&str> {
        match self {
            Self::Keywords(keywords) => keywords.get("type").map(String::as_str),
            Self::Nested(schema) => Some(schema.schema_type.as_str()),
        }
    }

    /// The keyword mapping, if this is not a nested document.
    pub fn as_keywords(&self) -> Option<&Keywords> {
        match self {
            Self::Keywords(keywords) => Some(keywords),
            Self::Nested(_) => None,
        }
    }

    /// The nested document, if this is one.
    pub fn as_nested(&self) -> Option<&JsonSchema> {
        match self {
            Self::Keywords(_) => None,
            Self::Nested(schema) => Some(schema),
        }
    }
}

/// Insertion-ordered property mapping with unique names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    entries: Vec<(String, Property)>,
}

impl Properties {
    /// Inserts a property, replacing any previous value under the same name.
    ///
    /// A replaced entry keeps its original position. Returns the previous
    /// value, if any.
    pub fn insert(&mut self, name: String, property: Property) -> Option<Property> {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, property)),
            None => {
                self.entries.push((name, property));
                None
            }
        }
    }

    /// Looks up a property by name.
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, property)| property)
    }

    /// Returns `true` if a property named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Property names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// `(name, property)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.entries
            .iter()
            .map(|(name, property)| (name.as_str(), property))
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no properties.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, property) in &self.entries {
            map.serialize_entry(name, property)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn keywords(pairs: &[(&str, &str)]) -> Property {
        Property::Keywords(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_properties_last_writer_wins_in_place() {
        let mut properties = Properties::default();
        assert!(properties.insert("a".into(), keywords(&[("type", "string")])).is_none());
        assert!(properties.insert("b".into(), keywords(&[("type", "integer")])).is_none());
        let previous = properties.insert("a".into(), keywords(&[("type", "boolean")]));

        assert_eq!(previous.unwrap().json_type(), Some("string"));
        assert_eq!(properties.len(), 2);
        assert_eq!(properties.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(properties.get("a").unwrap().json_type(), Some("boolean"));
    }

    #[test]
    fn test_empty_document_serialization_omits_optional_keys() {
        let schema = JsonSchema::empty(&SchemaConfig::default());
        let value = schema.to_value().unwrap();
        assert_eq!(
            value,
            json!({"$schema": "http://json-schema.org/schema#", "type": "object"})
        );
    }

    #[test]
    fn test_full_document_serialization() {
        let mut schema = JsonSchema::empty(&SchemaConfig::default());
        schema.name = "user".into();
        schema.description = "a user".into();
        schema.additional_properties = true;
        schema.push_required("id");
        schema.push_required("id");
        schema
            .properties
            .insert("id".into(), keywords(&[("type", "integer")]));

        let mut nested = JsonSchema::empty(&SchemaConfig::default());
        nested.schema_uri.clear();
        nested.name = "address".into();
        schema
            .properties
            .insert("address".into(), Property::Nested(Box::new(nested)));
        schema.links.push(Relation::from([
            ("href".to_string(), "/users".to_string()),
            ("rel".to_string(), "self".to_string()),
        ]));

        let text = schema.to_json_pretty().unwrap();
        assert_eq!(text.matches("\"required\"").count(), 1);
        assert!(text.find("\"id\"").unwrap() < text.find("\"address\"").unwrap());

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            json!({
                "$schema": "http://json-schema.org/schema#",
                "name": "user",
                "type": "object",
                "description": "a user",
                "additionalProperties": true,
                "required": ["id"],
                "properties": {
                    "id": {"type": "integer"},
                    "address": {"name": "address", "type": "object"}
                },
                "links": [{"href": "/users", "rel": "self"}]
            })
        );
    }

    #[test]
    fn test_property_accessors() {
        let property = keywords(&[("type", "string"), ("pattern", "url")]);
        assert_eq!(property.as_keywords().unwrap()["pattern"], "url");
        assert!(property.as_nested().is_none());

        let nested = Property::Nested(Box::new(JsonSchema::empty(&SchemaConfig::default())));
        assert_eq!(nested.json_type(), Some("object"));
        assert!(nested.as_keywords().is_none());
    }
}
