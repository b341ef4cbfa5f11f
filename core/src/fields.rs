//! Tagged field enumeration.
//!
//! Produces the fields of a value (or type) that carry a tag for a given
//! key. Inputs that are not records, after dereferencing at most one
//! reference level, produce no fields rather than an error.

use crate::kind::Kind;
use crate::reflect::{Describe, Field, Shape};

/// A field together with its tag for the key being enumerated.
#[derive(Debug, Clone, Copy)]
pub struct TaggedField {
    /// Declared field descriptor.
    pub field: Field,
    /// Tag value for the enumerated key; never empty.
    pub tag: &'static str,
    /// Kind of the declared field type.
    pub kind: Kind,
}

impl TaggedField {
    /// Rust name of the field.
    pub fn name(&self) -> &'static str {
        self.field.name()
    }

    /// Shape of the declared field type.
    pub fn shape(&self) -> Shape {
        self.field.shape()
    }
}

/// Resolves the record shape behind a value.
///
/// References are followed exactly one level; `None` is returned for
/// absent references and for anything that is not a record afterwards.
pub fn record_shape(value: &dyn Describe) -> Option<Shape> {
    let mut shape = value.describe();
    if shape.kind() == Kind::Reference {
        shape = value.deref_one()?.describe();
    }
    shape.kind().is_record().then_some(shape)
}

/// Lists the fields of `value` tagged with `key`, in declaration order.
///
/// # Examples
///
/// ```
/// use tagschema::{Reflect, Shape, tagged_fields};
///
/// struct Pair {
///     left: u8,
///     right: u8,
/// }
///
/// impl Reflect for Pair {
///     fn shape() -> Shape {
///         Shape::record::<Self>()
///             .field::<u8>("left", &[("json", "l")])
///             .field::<u8>("right", &[])
///     }
/// }
///
/// let fields = tagged_fields(&Pair { left: 1, right: 2 }, "json");
/// assert_eq!(fields.len(), 1);
/// assert_eq!(fields[0].name(), "left");
///
/// assert!(tagged_fields(&None::<Pair>, "json").is_empty());
/// assert!(tagged_fields(&7_u8, "json").is_empty());
/// ```
pub fn tagged_fields(value: &dyn Describe, key: &str) -> Vec<TaggedField> {
    record_shape(value)
        .map(|shape| shape_fields(&shape, key))
        .unwrap_or_default()
}

/// Lists the fields of a record shape tagged with `key`.
///
/// Non-record shapes yield an empty list.
pub fn shape_fields(shape: &Shape, key: &str) -> Vec<TaggedField> {
    if !shape.kind().is_record() {
        return Vec::new();
    }

    shape
        .fields()
        .iter()
        .filter_map(|field| {
            let tag = field.tag(key).filter(|tag| !tag.is_empty())?;
            Some(TaggedField {
                field: *field,
                tag,
                kind: field.kind(),
            })
        })
        .collect()
}
