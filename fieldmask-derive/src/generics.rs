//! Generic type parameter handling and trait bound management.
//!
//! Bounds are added only for type parameters that appear in field types, and
//! the bound depends on how the field is carried: `Maskable` for lowered
//! fields, `Clone + Default + Send + Sync + 'static` for opaque ones.
//!
//! ## PhantomData Handling
//!
//! `PhantomData<T>` fields lower to `Value::Unit` whatever `T` is, so they are
//! skipped when collecting generics:
//!
//! ```ignore
//! struct TypedId<T> {
//!     pub id: String,
//!     _marker: PhantomData<T>, // T does not need to be Maskable
//! }
//! ```

use proc_macro2::TokenStream;
use syn::{parse_quote, Ident};

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    match ty {
        syn::Type::Path(path) => {
            let Some(segment) = path.path.segments.last() else {
                return;
            };
            if segment.ident == "PhantomData" {
                return;
            }
            if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                for arg in &args.args {
                    if let syn::GenericArgument::Type(inner_ty) = arg {
                        collect_generics_from_type(inner_ty, generics, result);
                    }
                }
            }
            for param in generics.type_params() {
                if segment.ident == param.ident && !result.iter().any(|g| g == &param.ident) {
                    result.push(param.ident.clone());
                }
            }
        }
        syn::Type::Array(array) => collect_generics_from_type(&array.elem, generics, result),
        syn::Type::Paren(paren) => collect_generics_from_type(&paren.elem, generics, result),
        syn::Type::Group(group) => collect_generics_from_type(&group.elem, generics, result),
        _ => {}
    }
}

/// Adds `Maskable` bounds to generic parameters used in lowered fields.
pub(crate) fn add_maskable_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
    crate_root: &TokenStream,
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            param.bounds.push(parse_quote!(#crate_root::Maskable));
        }
    }
    generics
}

/// Adds the bounds `Opaque::new` needs to generic parameters used in opaque
/// fields.
pub(crate) fn add_opaque_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            param.bounds.push(parse_quote!(::core::clone::Clone));
            param.bounds.push(parse_quote!(::core::default::Default));
            param.bounds.push(parse_quote!(::core::marker::Send));
            param.bounds.push(parse_quote!(::core::marker::Sync));
            param.bounds.push(parse_quote!('static));
        }
    }
    generics
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::{parse_quote, DeriveInput};

    use super::*;

    fn generics_of(input: DeriveInput) -> syn::Generics {
        input.generics
    }

    fn collect(ty: syn::Type, generics: &syn::Generics) -> Vec<String> {
        let mut result = Vec::new();
        collect_generics_from_type(&ty, generics, &mut result);
        result.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn finds_nested_parameters() {
        let generics = generics_of(parse_quote! { struct S<T, U>; });
        assert_eq!(collect(parse_quote!(Option<Vec<T>>), &generics), ["T"]);
        assert_eq!(collect(parse_quote!([U; 4]), &generics), ["U"]);
        assert_eq!(
            collect(parse_quote!(HashMap<T, U>), &generics),
            ["T", "U"]
        );
    }

    #[test]
    fn skips_phantom_data() {
        let generics = generics_of(parse_quote! { struct S<T>; });
        assert!(collect(parse_quote!(PhantomData<T>), &generics).is_empty());
        assert!(collect(parse_quote!(::core::marker::PhantomData<T>), &generics).is_empty());
    }

    #[test]
    fn ignores_concrete_types() {
        let generics = generics_of(parse_quote! { struct S<T>; });
        assert!(collect(parse_quote!(String), &generics).is_empty());
    }

    #[test]
    fn bounds_only_used_parameters() {
        let generics = generics_of(parse_quote! { struct S<T, U>; });
        let root = quote!(::fieldmask);
        let used: Vec<Ident> = vec![parse_quote!(T)];
        let bounded = add_maskable_bounds(generics, &used, &root);
        let params: Vec<_> = bounded.type_params().collect();
        assert_eq!(params[0].bounds.len(), 1);
        assert!(params[1].bounds.is_empty());
    }

    #[test]
    fn opaque_bounds_include_static() {
        let generics = generics_of(parse_quote! { struct S<T>; });
        let used: Vec<Ident> = vec![parse_quote!(T)];
        let bounded = add_opaque_bounds(generics, &used);
        let param = bounded.type_params().next().unwrap();
        assert_eq!(param.bounds.len(), 5);
    }
}
