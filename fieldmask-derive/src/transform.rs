//! Per-field code generation.
//!
//! Each field contributes three pieces to the derived impl:
//!
//! | Piece | Lowered field | Opaque field |
//! |-------|---------------|--------------|
//! | descriptor | `FieldDescriptor::new(name, directive, visible)` | same |
//! | `to_value` | `Maskable::to_value(&self.f)` | `Value::Opaque(Opaque::new(self.f.clone()))` |
//! | `from_value` | `<T as Maskable>::from_value(next)?` | `Opaque::extract::<T>(next)?` |

use proc_macro2::{Ident, TokenStream};
use quote::{quote, quote_spanned};
use syn::{ext::IdentExt, spanned::Spanned, Field, Member, Result, Visibility};

use crate::{
    generics::collect_generics_from_type,
    strategy::{parse_field_options, Strategy},
};

/// Accumulated state while walking the fields of one struct.
pub(crate) struct DeriveContext<'a> {
    pub(crate) generics: &'a syn::Generics,
    pub(crate) crate_root: &'a TokenStream,
    pub(crate) maskable_generics: Vec<Ident>,
    pub(crate) opaque_generics: Vec<Ident>,
}

pub(crate) struct FieldTokens {
    pub(crate) member: Member,
    pub(crate) descriptor: TokenStream,
    pub(crate) lower: TokenStream,
    pub(crate) rebuild: TokenStream,
}

/// Generates the tokens for the field at `index`.
pub(crate) fn generate_field(
    ctx: &mut DeriveContext<'_>,
    field: &Field,
    index: usize,
) -> Result<FieldTokens> {
    let options = parse_field_options(&field.attrs)?;
    let span = field.span();
    let root = ctx.crate_root;
    let ty = &field.ty;

    let (member, name) = match &field.ident {
        Some(ident) => (Member::Named(ident.clone()), ident.unraw().to_string()),
        None => (Member::Unnamed(index.into()), index.to_string()),
    };
    let directive = options.directive;
    let visible = matches!(field.vis, Visibility::Public(_));

    let descriptor = quote! {
        #root::FieldDescriptor::new(#name, #directive, #visible)
    };

    let (lower, rebuild) = match options.strategy {
        Strategy::Lower => {
            collect_generics_from_type(ty, ctx.generics, &mut ctx.maskable_generics);
            (
                quote_spanned! { span =>
                    #root::Maskable::to_value(&self.#member)
                },
                quote_spanned! { span =>
                    <#ty as #root::Maskable>::from_value(fields.next_value()?)?
                },
            )
        }
        Strategy::Opaque => {
            collect_generics_from_type(ty, ctx.generics, &mut ctx.opaque_generics);
            (
                quote_spanned! { span =>
                    #root::Value::Opaque(#root::Opaque::new(
                        ::core::clone::Clone::clone(&self.#member),
                    ))
                },
                quote_spanned! { span =>
                    #root::Opaque::extract::<#ty>(fields.next_value()?)?
                },
            )
        }
    };

    Ok(FieldTokens {
        member,
        descriptor,
        lower,
        rebuild,
    })
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::{parse_quote, DeriveInput};

    use super::*;

    fn fields_of(input: &DeriveInput) -> Vec<Field> {
        match &input.data {
            syn::Data::Struct(data) => data.fields.iter().cloned().collect(),
            _ => panic!("expected a struct"),
        }
    }

    fn generate(input: &DeriveInput) -> (Vec<FieldTokens>, Vec<Ident>, Vec<Ident>) {
        let root = quote!(::fieldmask);
        let mut ctx = DeriveContext {
            generics: &input.generics,
            crate_root: &root,
            maskable_generics: Vec::new(),
            opaque_generics: Vec::new(),
        };
        let tokens = fields_of(input)
            .iter()
            .enumerate()
            .map(|(index, field)| generate_field(&mut ctx, field, index).unwrap())
            .collect();
        (tokens, ctx.maskable_generics, ctx.opaque_generics)
    }

    #[test]
    fn descriptor_carries_name_directive_and_visibility() {
        let input: DeriveInput = parse_quote! {
            struct Account {
                pub login: String,
                #[mask("char,-1")]
                pub r#type: String,
                salt: String,
            }
        };
        let (tokens, _, _) = generate(&input);
        let rendered: Vec<String> = tokens.iter().map(|t| t.descriptor.to_string()).collect();
        assert!(rendered[0].contains("\"login\" , \"\" , true"));
        assert!(rendered[1].contains("\"type\" , \"char,-1\" , true"));
        assert!(rendered[2].contains("\"salt\" , \"\" , false"));
    }

    #[test]
    fn tuple_fields_are_named_by_index() {
        let input: DeriveInput = parse_quote! {
            struct Pair(pub String, #[mask("zero")] pub u32);
        };
        let (tokens, _, _) = generate(&input);
        assert!(tokens[1].descriptor.to_string().contains("\"1\" , \"zero\""));
        assert!(matches!(tokens[1].member, Member::Unnamed(_)));
    }

    #[test]
    fn opaque_fields_use_opaque_wrapper() {
        let input: DeriveInput = parse_quote! {
            struct Event<T, U> {
                #[mask(opaque)]
                pub at: T,
                pub payload: U,
            }
        };
        let (tokens, maskable, opaque) = generate(&input);
        assert!(tokens[0].lower.to_string().contains("Opaque :: new"));
        assert!(tokens[0].rebuild.to_string().contains("Opaque :: extract"));
        assert!(tokens[1].lower.to_string().contains("Maskable :: to_value"));
        let u: Ident = parse_quote!(U);
        let t: Ident = parse_quote!(T);
        assert_eq!(maskable, [u]);
        assert_eq!(opaque, [t]);
    }
}
