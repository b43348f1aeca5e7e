//! Derive macro for `fieldmask`.
//!
//! This crate generates the `Maskable` implementation behind
//! `#[derive(Mask)]`. It:
//! - reads `#[mask(...)]` field attributes
//! - emits a static `RecordSchema` holding each field's name, directive and
//!   visibility
//! - emits `to_value`/`from_value` that lower and rebuild the struct field by
//!   field
//!
//! It does **not** define any transformation. Those are registered on a
//! `fieldmask::Engine` and looked up by name at runtime.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod derive_struct;
mod generics;
mod strategy;
mod transform;
use derive_struct::{derive_struct, StructDeriveOutput};
use generics::{add_maskable_bounds, add_opaque_bounds};

/// Derives `fieldmask::Maskable` for structs.
///
/// # Field Attributes
///
/// - **No annotation**: the field is copied unchanged. Nested types that
///   implement `Maskable` are still walked, so their own directives apply.
///
/// - `#[mask("name,arg,...")]`: the directive. The first token names a
///   registered transformation, the rest are its arguments. On a container
///   field (`Option<T>`, `Vec<T>`, `[T; N]`, `Box<T>`) the directive applies to
///   every leaf inside it.
///
/// - `#[mask(opaque)]`: carries a field whose type does not implement
///   `Maskable` (timestamps, decimals, ..) through unchanged. The type must be
///   `Clone + Default + Send + Sync + 'static`. A directive may be combined
///   as `#[mask(opaque, "zero")]`; it is recorded in the schema, but traversal
///   copies opaque values unchanged.
///
/// Non-`pub` fields are reset to their zero value when masked.
///
/// Tuple structs name their fields `0`, `1`, ..; unit structs have no
/// fields. Enums and unions are rejected at compile time.
#[proc_macro_derive(Mask, attributes(mask))]
pub fn derive_mask(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the fieldmask crate root.
///
/// Handles crate renaming (e.g., `masking = { package = "fieldmask", ... }`).
/// Inside `fieldmask` itself the crate declares `extern crate self as
/// fieldmask`, so `::fieldmask` resolves there too, including in its doctests.
fn crate_root() -> TokenStream {
    match crate_name("fieldmask") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::fieldmask },
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    if let Some(attr) = attrs.iter().find(|attr| attr.path().is_ident("mask")) {
        return Err(syn::Error::new(
            attr.span(),
            "#[mask] is a field attribute and cannot be placed on the type",
        ));
    }

    let crate_root = crate_root();

    let StructDeriveOutput {
        schema,
        to_value_body,
        from_value_body,
        maskable_generics,
        opaque_generics,
    } = match &data {
        Data::Struct(data) => derive_struct(&ident, data, &generics, &crate_root)?,
        Data::Enum(e) => {
            return Err(syn::Error::new(
                e.enum_token.span(),
                "`Mask` cannot be derived for enums",
            ));
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Mask` cannot be derived for unions",
            ));
        }
    };

    let bounded = add_maskable_bounds(generics, &maskable_generics, &crate_root);
    let bounded = add_opaque_bounds(bounded, &opaque_generics);
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();

    Ok(quote! {
        const _: () = {
            #schema

            impl #impl_generics #crate_root::Maskable for #ident #ty_generics #where_clause {
                fn to_value(&self) -> #crate_root::Value {
                    #to_value_body
                }

                fn from_value(
                    value: #crate_root::Value,
                ) -> ::core::result::Result<Self, #crate_root::MaskError> {
                    #from_value_body
                }
            }
        };
    })
}
