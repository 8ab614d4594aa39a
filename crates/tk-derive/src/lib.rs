use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, punctuated::Punctuated, token::Comma, DeriveInput, Meta};

/// Derive `tk_core::TaggedMarker` for a type
/// Adds the `TaggedRequirements` bound to all generic parameters
#[proc_macro_derive(TaggedMarker)]
pub fn tagged_marker_derive(input: TokenStream) -> TokenStream {
    let mut input = parse_macro_input!(input as DeriveInput);

    for param in &mut input.generics.params {
        if let syn::GenericParam::Type(type_param) = param {
            type_param
                .bounds
                .push(syn::parse_quote!(tk_core::TaggedRequirements));
        }
    }
    derive_tagged_marker(input).into()
}

/// Generate the implementation of TaggedMarker
/// The tag concats the module path with the name for 'path::to::module::TypeName'
fn derive_tagged_marker(input: DeriveInput) -> proc_macro2::TokenStream {
    let name = &input.ident;
    let (impl_generics, type_generics, where_clause) = &input.generics.split_for_impl();
    let generics_str = quote! {#type_generics}.to_string().replace(' ', "");
    quote! {impl #impl_generics tk_core::TaggedMarker for #name #type_generics #where_clause {
        fn _tag() -> &'static str {
            concat!(module_path!(), "::", stringify!(#name), #generics_str)
        }
    }}
}

/// Attribute macro to mark a type as a `Tagged` value, deriving `TaggedMarker` and the traits `Tagged` requires.
///
/// Will cause conflicting implementations if placed after any `#[derive(...)]` attributes that implement any of those traits.
#[proc_macro_attribute]
pub fn tagged(_: TokenStream, item: TokenStream) -> TokenStream {
    let mut item = parse_macro_input!(item as DeriveInput);

    let mut required_traits: Vec<syn::Path> = vec![
        syn::parse_quote!(Clone),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(Hash),
        syn::parse_quote!(Debug),
        syn::parse_quote!(tk_core::TaggedMarker),
    ];

    // drop anything an existing #[derive(...)] already provides
    item.attrs
        .iter()
        .filter(|attr| attr.path().is_ident("derive"))
        .filter_map(|attr| {
            attr.parse_args_with(Punctuated::<Meta, Comma>::parse_terminated)
                .ok()
        })
        .flatten()
        .for_each(|meta| {
            if let Meta::Path(path) = meta {
                let last = path.segments.last().map(|segment| segment.ident.clone());
                required_traits.retain(|required| {
                    required != &path
                        && required.segments.last().map(|segment| &segment.ident) != last.as_ref()
                });
            }
        });

    if !required_traits.is_empty() {
        item.attrs
            .push(syn::parse_quote!(#[derive(#(#required_traits),*)]));
    }

    quote! {
        #item
    }
    .into()
}
