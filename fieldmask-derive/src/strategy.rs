//! Parsing of `#[mask(...)]` field attributes.
//!
//! This module maps attribute syntax to field options and produces structured
//! errors for invalid forms.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Ident, LitStr, Meta, Result, Token,
};

/// How a field is carried into the value tree.
///
/// | Attribute | Strategy |
/// |-----------|----------|
/// | none, or `#[mask("...")]` | `Lower` |
/// | `#[mask(opaque)]`, `#[mask(opaque, "...")]` | `Opaque` |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Strategy {
    /// Lowered through the field type's `Maskable` impl.
    Lower,
    /// Wrapped as an opaque value and copied through unchanged.
    Opaque,
}

/// Everything the derive needs to know about one field.
#[derive(Clone, Debug)]
pub(crate) struct FieldOptions {
    /// Raw directive, empty when the field carries none.
    pub(crate) directive: String,
    pub(crate) strategy: Strategy,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            directive: String::new(),
            strategy: Strategy::Lower,
        }
    }
}

/// One comma separated item inside `#[mask(...)]`.
enum MaskArg {
    Directive(LitStr),
    Opaque(Span),
}

impl Parse for MaskArg {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let lookahead = input.lookahead1();
        if lookahead.peek(LitStr) {
            return input.parse().map(MaskArg::Directive);
        }
        if lookahead.peek(Ident) {
            let ident: Ident = input.parse()?;
            if ident == "opaque" {
                return Ok(MaskArg::Opaque(ident.span()));
            }
            return Err(syn::Error::new(
                ident.span(),
                format!("unknown #[mask] option `{ident}`: expected a directive string or `opaque`"),
            ));
        }
        Err(lookahead.error())
    }
}

pub(crate) fn parse_field_options(attrs: &[Attribute]) -> Result<FieldOptions> {
    let mut seen = false;
    let mut options = FieldOptions::default();
    for attr in attrs {
        if !attr.path().is_ident("mask") {
            continue;
        }
        if seen {
            return Err(syn::Error::new(
                attr.span(),
                "multiple #[mask] attributes specified on the same field",
            ));
        }
        seen = true;

        let list = match &attr.meta {
            Meta::List(list) => list,
            Meta::Path(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "expected a directive: #[mask(\"name,args\")] or #[mask(opaque)]",
                ));
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[mask]",
                ));
            }
        };

        let args = list.parse_args_with(Punctuated::<MaskArg, Token![,]>::parse_terminated)?;
        if args.is_empty() {
            return Err(syn::Error::new(attr.span(), "empty #[mask()] attribute"));
        }
        let mut directive: Option<LitStr> = None;
        for arg in args {
            match arg {
                MaskArg::Directive(lit) => {
                    if directive.is_some() {
                        return Err(syn::Error::new(
                            lit.span(),
                            "a field takes a single directive string",
                        ));
                    }
                    directive = Some(lit);
                }
                MaskArg::Opaque(span) => {
                    if options.strategy == Strategy::Opaque {
                        return Err(syn::Error::new(span, "`opaque` specified twice"));
                    }
                    options.strategy = Strategy::Opaque;
                }
            }
        }
        if let Some(lit) = directive {
            options.directive = lit.value();
        }
    }
    Ok(options)
}
