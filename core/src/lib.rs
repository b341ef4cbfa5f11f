//! JSON Schema derivation from tagged type definitions.
//!
//! Types describe their fields through [`Reflect`], usually via
//! `#[derive(Reflect)]`, and attach a metadata tag to each field. The tag
//! names the external property and carries schema hints:
//!
//! - `name` is the property name; `-` or an empty tag excludes the field.
//! - `key=value` segments become schema keywords (`pattern=email`,
//!   `type=string`, ...). An explicit `type` overrides inference.
//! - The bare word `required` lists the property in `required`. Other bare
//!   words (`omitempty`, ...) are ignored.
//!
//! [`JsonSchema::new`] derives the document. Record-typed fields become
//! nested documents; everything else gets a keyword mapping whose `type` is
//! inferred from the field's [`Kind`]. Derivation never fails.
//!
//! # Example
//!
//! ```
//! use tagschema::{JsonSchema, Reflect};
//!
//! #[derive(Reflect)]
//! struct Address {
//!     #[tag(json = "city,required")]
//!     city: String,
//!     #[tag(json = "zip,pattern=^[0-9]{5}$")]
//!     zip: String,
//! }
//!
//! #[derive(Reflect)]
//! struct User {
//!     #[tag(json = "id,required")]
//!     id: u64,
//!     #[tag(json = "address")]
//!     address: Address,
//!     #[tag(json = "-")]
//!     password_hash: String,
//! }
//!
//! let user = User {
//!     id: 7,
//!     address: Address { city: "Oulu".into(), zip: "90100".into() },
//!     password_hash: String::new(),
//! };
//! let schema = JsonSchema::new(&user, Some("user"), Some("A registered user"));
//!
//! assert_eq!(schema.required, vec!["id"]);
//! assert!(!schema.properties.contains("password_hash"));
//!
//! let address = schema.properties.get("address").unwrap().as_nested().unwrap();
//! assert_eq!(address.name, "address");
//! assert_eq!(address.required, vec!["city"]);
//! ```

extern crate self as tagschema;

mod builder;
mod config;
mod error;
mod fields;
mod kind;
mod reflect;
mod schema;
mod tag;

pub use builder::SchemaBuilder;
pub use config::{DEFAULT_MAX_DEPTH, DEFAULT_TAG_KEY, SCHEMA_URI, SchemaConfig};
pub use error::{Result, SchemaError};
pub use fields::{TaggedField, record_shape, shape_fields, tagged_fields};
pub use kind::Kind;
pub use reflect::{Describe, Field, Links, Reflect, Relation, Shape, Tags};
pub use schema::{JsonSchema, OBJECT_TYPE, Properties, Property};
pub use tag::{Keywords, REQUIRED_KEYWORD, SKIP_MARKER, TagDirective};

#[cfg(feature = "derive")]
pub use tagschema_derive::Reflect;
