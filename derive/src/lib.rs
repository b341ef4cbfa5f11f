//! Procedural macros for tagschema

mod attrs;
mod reflect;

use proc_macro::TokenStream;

/// Derives `tagschema::Reflect` for a struct from its field tags.
///
/// # Example
///
/// ```ignore
/// #[derive(Reflect, Default)]
/// #[reflect(links)]
/// struct User {
///     #[tag(json = "id,required")]
///     id: u64,
///
///     #[tag(json = "email,format=email", xml = "mail")]
///     email: String,
///
///     #[tag(json = "-")]
///     password_hash: String,
///
///     cache: Vec<u8>, // no tag, never part of the schema
/// }
/// ```
///
/// This will generate:
///
/// ```ignore
/// impl ::tagschema::Reflect for User {
///     fn shape() -> ::tagschema::Shape {
///         ::tagschema::Shape::record::<Self>()
///             .field::<u64>("id", &[("json", "id,required")])
///             .field::<String>("email", &[("json", "email,format=email"), ("xml", "mail")])
///             .field::<String>("password_hash", &[("json", "-")])
///             .field::<Vec<u8>>("cache", &[])
///     }
///
///     fn kind() -> ::tagschema::Kind {
///         ::tagschema::Kind::Record
///     }
///
///     // only with #[reflect(links)]; requires `impl Links for User` and `Default`
///     fn as_links(&self) -> Option<&dyn ::tagschema::Links> {
///         Some(self)
///     }
///
///     fn type_links() -> Vec<::tagschema::Relation> {
///         ::tagschema::Links::links(&<Self as Default>::default())
///     }
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(tag, reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    reflect::derive_reflect_impl(input)
}
