//! Reflect derive macro implementation

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, GenericParam, parse_macro_input, parse_quote};

use crate::attrs::{parse_container_attrs, parse_field_tags};

/// Implementation of the Reflect derive macro
pub fn derive_reflect_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(mut input: DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Struct(data_struct) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Reflect can only be derived for structs",
        ));
    };

    let options = parse_container_attrs(&input.attrs)?;
    let field_calls = field_calls(&data_struct.fields)?;

    // Every type parameter must itself be reflectable for its fields to be described.
    for param in &mut input.generics.params {
        if let GenericParam::Type(type_param) = param {
            type_param.bounds.push(parse_quote!(::tagschema::Reflect));
        }
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let links_impl = options.links.then(|| {
        quote! {
            fn as_links(&self) -> ::core::option::Option<&dyn ::tagschema::Links> {
                ::core::option::Option::Some(self)
            }

            fn type_links() -> ::std::vec::Vec<::tagschema::Relation> {
                ::tagschema::Links::links(&<Self as ::core::default::Default>::default())
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::tagschema::Reflect for #name #ty_generics #where_clause {
            fn shape() -> ::tagschema::Shape {
                ::tagschema::Shape::record::<Self>()
                    #(#field_calls)*
            }

            fn kind() -> ::tagschema::Kind {
                ::tagschema::Kind::Record
            }

            #links_impl
        }
    })
}

/// Generate one `.field::<T>(name, tags)` builder call per declared field
fn field_calls(fields: &Fields) -> syn::Result<Vec<TokenStream2>> {
    fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let field_name = field
                .ident
                .as_ref()
                .map_or_else(|| index.to_string(), |ident| ident.unraw().to_string());
            let field_type = &field.ty;
            let tags = parse_field_tags(&field.attrs)?;
            let keys = tags.iter().map(|(key, _)| key);
            let values = tags.iter().map(|(_, value)| value);

            Ok(quote! {
                .field::<#field_type>(#field_name, &[#((#keys, #values)),*])
            })
        })
        .collect()
}
