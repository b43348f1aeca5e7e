//! Struct-specific `Maskable` derivation.
//!
//! Named, tuple and unit structs share one shape of generated code: a static
//! `RecordSchema` listing the fields in declaration order, a `to_value` that
//! lowers every field, and a `from_value` that takes the values back in the
//! same order.

use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{DataStruct, Result};

use crate::transform::{generate_field, DeriveContext};

pub(crate) struct StructDeriveOutput {
    pub(crate) schema: TokenStream,
    pub(crate) to_value_body: TokenStream,
    pub(crate) from_value_body: TokenStream,
    pub(crate) maskable_generics: Vec<Ident>,
    pub(crate) opaque_generics: Vec<Ident>,
}

pub(crate) fn derive_struct(
    name: &Ident,
    data: &DataStruct,
    generics: &syn::Generics,
    crate_root: &TokenStream,
) -> Result<StructDeriveOutput> {
    let mut ctx = DeriveContext {
        generics,
        crate_root,
        maskable_generics: Vec::new(),
        opaque_generics: Vec::new(),
    };

    let mut members = Vec::new();
    let mut descriptors = Vec::new();
    let mut lowered = Vec::new();
    let mut rebuilt = Vec::new();
    for (index, field) in data.fields.iter().enumerate() {
        let tokens = generate_field(&mut ctx, field, index)?;
        members.push(tokens.member);
        descriptors.push(tokens.descriptor);
        lowered.push(tokens.lower);
        rebuilt.push(tokens.rebuild);
    }

    let type_name = name.to_string();
    let schema = quote! {
        static SCHEMA: #crate_root::RecordSchema = #crate_root::RecordSchema {
            name: #type_name,
            fields: &[#(#descriptors),*],
        };
    };

    let to_value_body = quote! {
        #crate_root::Value::Record(#crate_root::Record::from_derive(
            &SCHEMA,
            ::std::vec![#(#lowered),*],
        ))
    };

    let from_value_body = if members.is_empty() {
        quote! {
            #crate_root::Record::unpack(value, &SCHEMA)?;
            ::core::result::Result::Ok(Self {})
        }
    } else {
        quote! {
            let mut fields = #crate_root::Record::unpack(value, &SCHEMA)?;
            ::core::result::Result::Ok(Self {
                #(#members: #rebuilt),*
            })
        }
    };

    Ok(StructDeriveOutput {
        schema,
        to_value_body,
        from_value_body,
        maskable_generics: ctx.maskable_generics,
        opaque_generics: ctx.opaque_generics,
    })
}
