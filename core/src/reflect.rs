//! Type shapes and field descriptors.
//!
//! Rust has no runtime reflection, so every type that takes part in schema
//! derivation describes itself through [`Reflect`]. Records usually get
//! their implementation from `#[derive(Reflect)]`; a hand-written
//! implementation uses the [`Shape::record`] builder and produces the same
//! descriptors:
//!
//! ```
//! use tagschema::{Kind, Reflect, Shape};
//!
//! struct Point {
//!     x: f64,
//!     y: f64,
//! }
//!
//! impl Reflect for Point {
//!     fn shape() -> Shape {
//!         Shape::record::<Self>()
//!             .field::<f64>("x", &[("json", "x,required")])
//!             .field::<f64>("y", &[("json", "y")])
//!     }
//! }
//!
//! let shape = Point::shape();
//! assert_eq!(shape.kind(), Kind::Record);
//! assert_eq!(shape.fields().len(), 2);
//! assert_eq!(shape.fields()[0].tag("json"), Some("x,required"));
//! ```
//!
//! Trait objects other than `dyn Any` are opaque to the library. A crate
//! that stores its own trait objects in a record describes them directly:
//!
//! ```
//! use tagschema::{Kind, Reflect, Shape};
//!
//! trait Render {
//!     fn render(&self) -> String;
//! }
//!
//! impl Reflect for Box<dyn Render> {
//!     fn shape() -> Shape {
//!         Shape::of::<Self>(Kind::Dynamic)
//!     }
//! }
//!
//! assert_eq!(<Box<dyn Render> as Reflect>::kind(), Kind::Dynamic);
//! ```
//!
//! Values are handed to the derivation entry point as [`Describe`] trait
//! objects. `Describe` is implemented for every `Reflect` type and adds the
//! two value-level questions the builder asks: what does this reference
//! point at, and does this value provide [`Links`]?

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, SyncSender};

use crate::kind::Kind;

/// `(tag key, tag value)` pairs attached to a field.
pub type Tags = &'static [(&'static str, &'static str)];

/// One hyperlink relation, e.g. `{"href": "/users/{id}", "rel": "self"}`.
pub type Relation = BTreeMap<String, String>;

/// Capability for values that advertise hyperlink relations.
///
/// Types opt in with `#[reflect(links)]` on the derive, or by overriding
/// [`Reflect::as_links`] and [`Reflect::type_links`] in a manual
/// implementation. The derive needs `Default` so that nested documents of
/// the type can carry links too.
pub trait Links {
    /// Relations attached to the top-level schema document.
    fn links(&self) -> Vec<Relation>;
}

/// Declared field of a record type.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    name: &'static str,
    tags: Tags,
    kind: fn() -> Kind,
    shape: fn() -> Shape,
    links: fn() -> Vec<Relation>,
}

impl Field {
    /// Creates a descriptor for a field of type `F`.
    pub fn new<F: Reflect>(name: &'static str, tags: Tags) -> Self {
        Self {
            name,
            tags,
            kind: F::kind,
            shape: F::shape,
            links: F::type_links,
        }
    }

    /// Rust name of the field.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// All tags attached to the field.
    pub fn tags(&self) -> Tags {
        self.tags
    }

    /// Tag value for `key`, if the field carries one.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| *value)
    }

    /// Kind of the declared field type.
    pub fn kind(&self) -> Kind {
        (self.kind)()
    }

    /// Shape of the declared field type.
    ///
    /// Computed on demand, so self-referential types never build an
    /// infinite structure.
    pub fn shape(&self) -> Shape {
        (self.shape)()
    }

    /// Relations for a nested document of the declared field type.
    pub fn links(&self) -> Vec<Relation> {
        (self.links)()
    }
}

/// Static description of a type: its identity, kind, and declared fields.
#[derive(Debug, Clone)]
pub struct Shape {
    type_name: &'static str,
    kind: Kind,
    fields: Vec<Field>,
}

impl Shape {
    /// Shape of a fieldless type `T`.
    pub fn of<T: ?Sized>(kind: Kind) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            kind,
            fields: Vec::new(),
        }
    }

    /// Starts the shape of a record type `T`; add fields with [`Shape::field`].
    pub fn record<T: ?Sized>() -> Self {
        Self::of::<T>(Kind::Record)
    }

    /// Appends a field of type `F`.
    pub fn field<F: Reflect>(mut self, name: &'static str, tags: Tags) -> Self {
        self.fields.push(Field::new::<F>(name, tags));
        self
    }

    /// Fully qualified type name; identifies the type on a recursion path.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Kind of the type.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/// Types that can describe their own shape.
pub trait Reflect {
    /// Shape of the implementing type.
    fn shape() -> Shape
    where
        Self: Sized;

    /// Kind of the implementing type, without building field descriptors.
    fn kind() -> Kind
    where
        Self: Sized,
    {
        Self::shape().kind()
    }

    /// The value one reference level down, for pointer-like types.
    ///
    /// `None` for non-references and for absent optional values.
    fn referent(&self) -> Option<&dyn Describe> {
        None
    }

    /// The [`Links`] capability of this value, if it has one.
    fn as_links(&self) -> Option<&dyn Links> {
        None
    }

    /// Relations for a nested document of this type.
    ///
    /// Nested documents are derived from the declared field type, so there
    /// is no value to ask. `#[reflect(links)]` asks `Self::default()`.
    fn type_links() -> Vec<Relation>
    where
        Self: Sized,
    {
        Vec::new()
    }
}

/// Object-safe, value-level view of a [`Reflect`] type.
pub trait Describe {
    /// Shape of the value's type.
    fn describe(&self) -> Shape;

    /// Dereferences one level, see [`Reflect::referent`].
    fn deref_one(&self) -> Option<&dyn Describe>;

    /// Queries the [`Links`] capability, see [`Reflect::as_links`].
    fn link_provider(&self) -> Option<&dyn Links>;
}

impl<T: Reflect> Describe for T {
    fn describe(&self) -> Shape {
        T::shape()
    }

    fn deref_one(&self) -> Option<&dyn Describe> {
        Reflect::referent(self)
    }

    fn link_provider(&self) -> Option<&dyn Links> {
        Reflect::as_links(self)
    }
}

macro_rules! reflect_as {
    ($kind:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl Reflect for $ty {
                fn shape() -> Shape {
                    Shape::of::<Self>($kind)
                }

                fn kind() -> Kind {
                    $kind
                }
            }
        )+
    };
}

macro_rules! reflect_generic_as {
    ($kind:expr => $($ty:ident<$($param:ident),+>),+ $(,)?) => {
        $(
            impl<$($param),+> Reflect for $ty<$($param),+> {
                fn shape() -> Shape {
                    Shape::of::<Self>($kind)
                }

                fn kind() -> Kind {
                    $kind
                }
            }
        )+
    };
}

macro_rules! reflect_pointer {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl<T: Reflect> Reflect for $ty<T> {
                fn shape() -> Shape {
                    Shape::of::<Self>(Kind::Reference)
                }

                fn kind() -> Kind {
                    Kind::Reference
                }

                fn referent(&self) -> Option<&dyn Describe> {
                    Some(&**self)
                }
            }
        )+
    };
}

reflect_as!(Kind::Bool => bool);
reflect_as!(Kind::I8 => i8);
reflect_as!(Kind::I16 => i16);
reflect_as!(Kind::I32 => i32);
reflect_as!(Kind::I64 => i64);
reflect_as!(Kind::I128 => i128);
reflect_as!(Kind::Isize => isize);
reflect_as!(Kind::U8 => u8);
reflect_as!(Kind::U16 => u16);
reflect_as!(Kind::U32 => u32);
reflect_as!(Kind::U64 => u64);
reflect_as!(Kind::U128 => u128);
reflect_as!(Kind::Usize => usize);
reflect_as!(Kind::F32 => f32);
reflect_as!(Kind::F64 => f64);
reflect_as!(Kind::Char => char);
reflect_as!(Kind::Str => String, &str, Box<str>, std::borrow::Cow<'_, str>, PathBuf);
reflect_as!(Kind::Unit => ());
reflect_as!(
    Kind::Dynamic => serde_json::Value,
    &dyn Any,
    Box<dyn Any>,
    Box<dyn Any + Send>,
    Box<dyn Any + Send + Sync>,
);
reflect_as!(Kind::Map => serde_json::Map<String, serde_json::Value>);

reflect_generic_as!(Kind::Seq => Vec<T>, VecDeque<T>, LinkedList<T>, BTreeSet<T>);
reflect_generic_as!(Kind::Map => BTreeMap<K, V>);
reflect_generic_as!(Kind::Channel => Sender<T>, SyncSender<T>, Receiver<T>);

reflect_pointer!(Box, Rc, Arc);

impl<T, S> Reflect for HashSet<T, S> {
    fn shape() -> Shape {
        Shape::of::<Self>(Kind::Seq)
    }

    fn kind() -> Kind {
        Kind::Seq
    }
}

impl<K, V, S> Reflect for HashMap<K, V, S> {
    fn shape() -> Shape {
        Shape::of::<Self>(Kind::Map)
    }

    fn kind() -> Kind {
        Kind::Map
    }
}

impl<T> Reflect for &[T] {
    fn shape() -> Shape {
        Shape::of::<Self>(Kind::Seq)
    }

    fn kind() -> Kind {
        Kind::Seq
    }
}

impl<T> Reflect for Box<[T]> {
    fn shape() -> Shape {
        Shape::of::<Self>(Kind::Seq)
    }

    fn kind() -> Kind {
        Kind::Seq
    }
}

impl<T, const N: usize> Reflect for [T; N] {
    fn shape() -> Shape {
        Shape::of::<Self>(Kind::Array)
    }

    fn kind() -> Kind {
        Kind::Array
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn shape() -> Shape {
        Shape::of::<Self>(Kind::Reference)
    }

    fn kind() -> Kind {
        Kind::Reference
    }

    fn referent(&self) -> Option<&dyn Describe> {
        self.as_ref().map(|value| value as &dyn Describe)
    }
}

impl<T: Reflect> Reflect for &T {
    fn shape() -> Shape {
        Shape::of::<Self>(Kind::Reference)
    }

    fn kind() -> Kind {
        Kind::Reference
    }

    fn referent(&self) -> Option<&dyn Describe> {
        Some(*self)
    }
}

impl<T: ?Sized> Reflect for *const T {
    fn shape() -> Shape {
        Shape::of::<Self>(Kind::RawPointer)
    }

    fn kind() -> Kind {
        Kind::RawPointer
    }
}

impl<T: ?Sized> Reflect for *mut T {
    fn shape() -> Shape {
        Shape::of::<Self>(Kind::RawPointer)
    }

    fn kind() -> Kind {
        Kind::RawPointer
    }
}

impl<T: ?Sized> Reflect for std::marker::PhantomData<T> {
    fn shape() -> Shape {
        Shape::of::<Self>(Kind::Unit)
    }

    fn kind() -> Kind {
        Kind::Unit
    }
}

impl<R> Reflect for fn() -> R {
    fn shape() -> Shape {
        Shape::of::<Self>(Kind::Function)
    }

    fn kind() -> Kind {
        Kind::Function
    }
}

impl<A, R> Reflect for fn(A) -> R {
    fn shape() -> Shape {
        Shape::of::<Self>(Kind::Function)
    }

    fn kind() -> Kind {
        Kind::Function
    }
}

impl<A, B, R> Reflect for fn(A, B) -> R {
    fn shape() -> Shape {
        Shape::of::<Self>(Kind::Function)
    }

    fn kind() -> Kind {
        Kind::Function
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Leaf;

    impl Reflect for Leaf {
        fn shape() -> Shape {
            Shape::record::<Self>().field::<String>("label", &[("json", "label"), ("xml", "l")])
        }
    }

    #[test]
    fn test_primitive_kinds() {
        assert_eq!(<bool as Reflect>::kind(), Kind::Bool);
        assert_eq!(<u64 as Reflect>::kind(), Kind::U64);
        assert_eq!(<String as Reflect>::kind(), Kind::Str);
        assert_eq!(<&str as Reflect>::kind(), Kind::Str);
        assert_eq!(<Vec<u8> as Reflect>::kind(), Kind::Seq);
        assert_eq!(<[u8; 4] as Reflect>::kind(), Kind::Array);
        assert_eq!(<HashMap<String, u8> as Reflect>::kind(), Kind::Map);
        assert_eq!(<Option<Leaf> as Reflect>::kind(), Kind::Reference);
        assert_eq!(<*const u8 as Reflect>::kind(), Kind::RawPointer);
        assert_eq!(<fn(u8) -> bool as Reflect>::kind(), Kind::Function);
        assert_eq!(<Sender<u8> as Reflect>::kind(), Kind::Channel);
        assert_eq!(<serde_json::Value as Reflect>::kind(), Kind::Dynamic);
        assert_eq!(<Box<str> as Reflect>::kind(), Kind::Str);
    }

    #[test]
    fn test_unsized_referents() {
        assert_eq!(<&[u8] as Reflect>::kind(), Kind::Seq);
        assert_eq!(<Box<[Leaf]> as Reflect>::kind(), Kind::Seq);
        assert_eq!(<&dyn Any as Reflect>::kind(), Kind::Dynamic);
        assert_eq!(<Box<dyn Any> as Reflect>::kind(), Kind::Dynamic);
        assert_eq!(<Box<dyn Any + Send + Sync> as Reflect>::kind(), Kind::Dynamic);

        let any: Box<dyn Any> = Box::new(7_u8);
        assert!(any.deref_one().is_none());
    }

    #[test]
    fn test_record_shape_fields() {
        let shape = Leaf::shape();
        assert_eq!(shape.kind(), Kind::Record);
        assert!(shape.type_name().ends_with("Leaf"));

        let field = shape.fields()[0];
        assert_eq!(field.name(), "label");
        assert_eq!(field.tag("json"), Some("label"));
        assert_eq!(field.tag("xml"), Some("l"));
        assert_eq!(field.tag("yaml"), None);
        assert_eq!(field.kind(), Kind::Str);
        assert_eq!(field.shape().kind(), Kind::Str);
    }

    #[test]
    fn test_references_deref_one_level() {
        let boxed = Box::new(Leaf);
        let inner = boxed.deref_one().unwrap();
        assert_eq!(inner.describe().kind(), Kind::Record);

        let nested: Option<Box<Leaf>> = Some(Box::new(Leaf));
        let once = nested.deref_one().unwrap();
        assert_eq!(once.describe().kind(), Kind::Reference);

        let absent: Option<Leaf> = None;
        assert!(absent.deref_one().is_none());

        assert!(Leaf.deref_one().is_none());
    }

    #[test]
    fn test_no_links_by_default() {
        assert!(Leaf.link_provider().is_none());
        assert!(42_u8.link_provider().is_none());
        assert!(Leaf::type_links().is_empty());
        assert!(Leaf::shape().fields()[0].links().is_empty());
    }
}
