//! Attribute parsing for the Reflect derive

use syn::{Attribute, LitStr};

/// Options from `#[reflect(...)]` on the type.
#[derive(Default)]
pub struct ContainerOptions {
    pub links: bool,
}

/// Parse every `#[reflect(...)]` attribute on the type
pub fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerOptions> {
    let mut options = ContainerOptions::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("reflect")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("links") {
                options.links = true;
                Ok(())
            } else {
                Err(meta.error("unsupported reflect attribute, expected `links`"))
            }
        })?;
    }
    Ok(options)
}

/// Collect `key = "value"` pairs from every `#[tag(...)]` attribute on a field.
///
/// A later pair with the same key replaces the earlier one.
pub fn parse_field_tags(attrs: &[Attribute]) -> syn::Result<Vec<(String, String)>> {
    let mut tags: Vec<(String, String)> = Vec::new();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("tag")) {
        attr.parse_nested_meta(|meta| {
            let Some(key) = meta.path.get_ident().map(ToString::to_string) else {
                return Err(meta.error("tag key must be a single identifier"));
            };
            let value: LitStr = meta.value()?.parse()?;
            match tags.iter_mut().find(|(existing, _)| *existing == key) {
                Some((_, slot)) => *slot = value.value(),
                None => tags.push((key, value.value())),
            }
            Ok(())
        })?;
    }
    Ok(tags)
}
