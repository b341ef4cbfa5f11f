//! Recursive schema derivation.
//!
//! [`SchemaBuilder`] walks the tagged fields of a value, turns every tag
//! into a property, and descends into record-typed fields to build nested
//! documents. Descent stops when a record type is already on the current
//! recursion path or the configured depth is reached; such fields fall
//! back to an opaque keyword property.

use tracing::{debug, warn};

use crate::config::SchemaConfig;
use crate::fields::{TaggedField, record_shape, shape_fields};
use crate::reflect::{Describe, Shape};
use crate::schema::{JsonSchema, Property};
use crate::tag::{Keywords, TagDirective};

/// Derives [`JsonSchema`] documents under one configuration.
///
/// # Examples
///
/// ```
/// use tagschema::{Reflect, SchemaBuilder, SchemaConfig, Shape};
///
/// struct Flags {
///     verbose: bool,
/// }
///
/// impl Reflect for Flags {
///     fn shape() -> Shape {
///         Shape::record::<Self>().field::<bool>("verbose", &[("cli", "verbose,mandatory")])
///     }
/// }
///
/// let config = SchemaConfig::default()
///     .with_tag_key("cli")
///     .with_required_keyword("mandatory");
/// let schema = SchemaBuilder::new(&config).build(&Flags { verbose: true }, "flags", "");
///
/// assert_eq!(schema.required, vec!["verbose"]);
/// assert_eq!(schema.properties.get("verbose").and_then(|p| p.json_type()), Some("boolean"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SchemaBuilder<'a> {
    config: &'a SchemaConfig,
}

impl<'a> SchemaBuilder<'a> {
    /// Creates a builder bound to `config`.
    pub fn new(config: &'a SchemaConfig) -> Self {
        Self { config }
    }

    /// Derives the outermost document for `value`.
    ///
    /// The outermost document takes its links from `value`. Nested documents
    /// take them from [`Reflect::type_links`](crate::Reflect::type_links) of
    /// the field type.
    pub fn build(&self, value: &dyn Describe, name: &str, description: &str) -> JsonSchema {
        let mut schema = JsonSchema::empty(self.config);
        schema.name = name.to_string();
        schema.description = description.to_string();

        match record_shape(value) {
            Some(shape) => {
                let mut path = vec![shape.type_name()];
                self.fill(&mut schema, &shape, &mut path);
            }
            None => debug!(
                type_name = value.describe().type_name(),
                "Root value is not a record, deriving empty schema"
            ),
        }

        if let Some(provider) = value.link_provider() {
            schema.links = provider.links();
        }

        schema
    }

    fn fill(&self, schema: &mut JsonSchema, shape: &Shape, path: &mut Vec<&'static str>) {
        for field in shape_fields(shape, &self.config.tag_key) {
            if TagDirective::is_skipped(field.tag) {
                continue;
            }

            let directive = TagDirective::parse(field.tag, &self.config.required_keywords);
            if directive.name.is_empty() {
                debug!(
                    field = field.name(),
                    tag = field.tag,
                    "Tag has no property name, skipping"
                );
                continue;
            }

            for required in &directive.required {
                schema.push_required(required);
            }

            let descend = field.kind.is_record() && directive.explicit_type().is_none();
            let TagDirective { name, keywords, .. } = directive;
            let property = if descend {
                match self.nested(&name, &field, path) {
                    Some(nested) => Property::Nested(Box::new(nested)),
                    None => Property::Keywords(infer_type(keywords, &field)),
                }
            } else {
                Property::Keywords(infer_type(keywords, &field))
            };

            if schema.properties.insert(name.clone(), property).is_some() {
                warn!(
                    property = %name,
                    field = field.name(),
                    type_name = shape.type_name(),
                    "Duplicate property name, later field overwrites earlier one"
                );
            }
        }
    }

    fn nested(
        &self,
        name: &str,
        field: &TaggedField,
        path: &mut Vec<&'static str>,
    ) -> Option<JsonSchema> {
        let shape = field.shape();
        let type_name = shape.type_name();

        if path.contains(&type_name) {
            debug!(
                property = name,
                type_name,
                path = ?path,
                "Record cycle detected, emitting opaque property"
            );
            return None;
        }
        if path.len() > self.config.max_depth {
            debug!(
                property = name,
                type_name,
                depth = path.len(),
                "Nesting limit reached, emitting opaque property"
            );
            return None;
        }

        debug!(
            property = name,
            type_name,
            depth = path.len(),
            "Descending into nested record"
        );
        let mut nested = JsonSchema::empty(self.config);
        nested.schema_uri.clear();
        nested.name = name.to_string();

        path.push(type_name);
        self.fill(&mut nested, &shape, path);
        path.pop();

        nested.links = field.field.links();

        Some(nested)
    }
}

/// Fills a missing `type` keyword from the field's kind.
fn infer_type(mut keywords: Keywords, field: &TaggedField) -> Keywords {
    let explicit = keywords.get("type").is_some_and(|t| !t.is_empty());
    if !explicit {
        if let Some(json_type) = field.kind.json_type() {
            keywords.insert("type".to_string(), json_type.to_string());
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::{Reflect, Relation};

    struct Node;

    impl Reflect for Node {
        fn shape() -> Shape {
            Shape::record::<Self>()
                .field::<String>("label", &[("json", "label")])
                .field::<Node>("child", &[("json", "child")])
        }
    }

    struct Ping;
    struct Pong;

    impl Reflect for Ping {
        fn shape() -> Shape {
            Shape::record::<Self>().field::<Pong>("pong", &[("json", "pong,required")])
        }
    }

    impl Reflect for Pong {
        fn shape() -> Shape {
            Shape::record::<Self>().field::<Ping>("ping", &[("json", "ping")])
        }
    }

    struct Chain;
    struct Link1;
    struct Link2;

    impl Reflect for Chain {
        fn shape() -> Shape {
            Shape::record::<Self>().field::<Link1>("one", &[("json", "one")])
        }
    }

    impl Reflect for Link1 {
        fn shape() -> Shape {
            Shape::record::<Self>().field::<Link2>("two", &[("json", "two")])
        }
    }

    impl Reflect for Link2 {
        fn shape() -> Shape {
            Shape::record::<Self>().field::<u8>("leaf", &[("json", "leaf")])
        }
    }

    struct Hub;
    struct Spoke;

    impl Reflect for Hub {
        fn shape() -> Shape {
            Shape::record::<Self>()
                .field::<Spoke>("spoke", &[("json", "spoke")])
                .field::<Option<Spoke>>("spare", &[("json", "spare")])
        }
    }

    impl Reflect for Spoke {
        fn shape() -> Shape {
            Shape::record::<Self>().field::<u8>("n", &[("json", "n")])
        }

        fn type_links() -> Vec<Relation> {
            vec![Relation::from([("rel".to_string(), "spoke".to_string())])]
        }
    }

    fn build(value: &dyn Describe, config: &SchemaConfig) -> JsonSchema {
        SchemaBuilder::new(config).build(value, "", "")
    }

    #[test]
    fn test_self_reference_terminates() {
        let schema = build(&Node, &SchemaConfig::default());
        let child = schema.properties.get("child").unwrap();
        assert_eq!(child.as_keywords().unwrap()["type"], "object");
        assert_eq!(
            schema.properties.get("label").unwrap().json_type(),
            Some("string")
        );
    }

    #[test]
    fn test_mutual_recursion_terminates() {
        let schema = build(&Ping, &SchemaConfig::default());
        let pong = schema.properties.get("pong").unwrap().as_nested().unwrap();
        assert_eq!(pong.name, "pong");
        assert!(pong.schema_uri.is_empty());

        let ping = pong.properties.get("ping").unwrap();
        assert_eq!(ping.as_keywords().unwrap()["type"], "object");
        assert_eq!(schema.required, vec!["pong"]);
    }

    #[test]
    fn test_max_depth_cuts_nesting() {
        let deep = build(&Chain, &SchemaConfig::default());
        let one = deep.properties.get("one").unwrap().as_nested().unwrap();
        assert!(one.properties.get("two").unwrap().as_nested().is_some());

        let shallow = build(&Chain, &SchemaConfig::default().with_max_depth(1));
        let one = shallow.properties.get("one").unwrap().as_nested().unwrap();
        let two = one.properties.get("two").unwrap();
        assert!(two.as_nested().is_none());
        assert_eq!(two.json_type(), Some("object"));

        let flat = build(&Chain, &SchemaConfig::default().with_max_depth(0));
        assert!(flat.properties.get("one").unwrap().as_nested().is_none());
    }

    #[test]
    fn test_additional_properties_applies_to_nested() {
        let config = SchemaConfig::default().allow_additional_properties();
        let schema = build(&Chain, &config);
        assert!(schema.additional_properties);
        let one = schema.properties.get("one").unwrap().as_nested().unwrap();
        assert!(one.additional_properties);
    }

    #[test]
    fn test_infer_type_keeps_explicit_type() {
        let field = shape_fields(&Node::shape(), "json")[0];
        let explicit = Keywords::from([("type".to_string(), "uri".to_string())]);
        assert_eq!(infer_type(explicit, &field)["type"], "uri");

        let blank = Keywords::from([("type".to_string(), String::new())]);
        assert_eq!(infer_type(blank, &field)["type"], "string");
    }

    #[test]
    fn test_nested_documents_take_type_links() {
        let schema = build(&Hub, &SchemaConfig::default());
        assert!(schema.links.is_empty());

        let spoke = schema.properties.get("spoke").unwrap().as_nested().unwrap();
        assert_eq!(spoke.links.len(), 1);
        assert_eq!(spoke.links[0]["rel"], "spoke");

        // references stay opaque, so no document to carry links
        let spare = schema.properties.get("spare").unwrap();
        assert_eq!(spare.json_type(), Some("object"));
        assert!(spare.as_nested().is_none());
    }
}
