//! Kind classification and JSON type inference.
//!
//! Every type that takes part in schema derivation reports a [`Kind`]. The
//! builder falls back to [`Kind::json_type`] whenever a field's tag does not
//! name a `type` keyword explicitly.

/// Schema-relevant classification of a Rust type.
///
/// # Examples
///
/// ```
/// use tagschema::Kind;
///
/// assert_eq!(Kind::U16.json_type(), Some("integer"));
/// assert_eq!(Kind::Seq.json_type(), Some("array"));
/// assert_eq!(Kind::Unit.json_type(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `bool`
    Bool,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `i128`
    I128,
    /// `isize`
    Isize,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `u128`
    U128,
    /// `usize`
    Usize,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `char`
    Char,
    /// `String`, `&str`, `Box<str>`, `Cow<str>`, paths.
    Str,
    /// Fixed-length sequence (`[T; N]`).
    Array,
    /// Variable-length sequence (`Vec<T>`, `VecDeque<T>`, sets, `&[T]`, `Box<[T]>`).
    Seq,
    /// Struct with named fields.
    Record,
    /// Associative container (`HashMap`, `BTreeMap`).
    Map,
    /// Smart pointer or optional value (`Box`, `Rc`, `Arc`, `Option`, `&T`).
    Reference,
    /// Value whose shape is only known at runtime (`serde_json::Value`, `dyn Any`).
    Dynamic,
    /// Function pointer.
    Function,
    /// Channel endpoint.
    Channel,
    /// Raw pointer.
    RawPointer,
    /// `()` and other zero-information types.
    Unit,
}

impl Kind {
    /// Returns the JSON Schema `type` keyword for this kind.
    ///
    /// `None` means no inference is possible and the property carries no
    /// `type` entry unless its tag supplies one.
    pub const fn json_type(self) -> Option<&'static str> {
        match self {
            Self::Bool => Some("boolean"),
            Self::I8
            | Self::I16
            | Self::I32
            | Self::I64
            | Self::I128
            | Self::Isize
            | Self::U8
            | Self::U16
            | Self::U32
            | Self::U64
            | Self::U128
            | Self::Usize => Some("integer"),
            Self::F32 | Self::F64 => Some("number"),
            Self::Char | Self::Str => Some("string"),
            Self::Array | Self::Seq => Some("array"),
            Self::Record
            | Self::Map
            | Self::Reference
            | Self::Dynamic
            | Self::Function
            | Self::Channel => Some("object"),
            Self::RawPointer => Some("null"),
            Self::Unit => None,
        }
    }

    /// Whether values of this kind carry named fields.
    pub const fn is_record(self) -> bool {
        matches!(self, Self::Record)
    }
}
