//! Directive-driven masking of structured data.
//!
//! `fieldmask` produces a masked deep copy of a value. Which fields are masked,
//! and how, is declared on the type with `#[mask("...")]`; the original value
//! is never modified.
//!
//! ```
//! use fieldmask::Mask;
//!
//! #[derive(Clone, Debug, PartialEq, Mask)]
//! pub struct Customer {
//!     pub name: String,
//!     #[mask("hash,md5")]
//!     pub email: String,
//!     #[mask("zero")]
//!     pub card_number: u64,
//! }
//!
//! let customer = Customer {
//!     name: "Ada".into(),
//!     email: "abcdef".into(),
//!     card_number: 4_111_111_111_111_111,
//! };
//! let masked = fieldmask::mask(&customer)?;
//! assert_eq!(masked.name, "Ada");
//! assert_eq!(masked.email, "e80b5017098950fc58aad83c8c14978e");
//! assert_eq!(masked.card_number, 0);
//! # Ok::<(), fieldmask::MaskError>(())
//! ```
//!
//! Directives are comma separated: the first token names a transformation,
//! the rest are its arguments. A field without a directive is copied as is; a
//! directive naming an unregistered transformation is ignored.
//!
//! The pieces:
//! - [`Engine`] owns five registries of named transformations (string, signed
//!   integer, unsigned integer, float, untyped) and walks a [`Value`] tree.
//! - [`Maskable`] lowers Rust types into that tree and rebuilds them; the
//!   `Mask` derive implements it for structs and records each field's
//!   directive in a [`RecordSchema`].
//! - [`builtins`] holds the default transformations; [`default_engine`] is an
//!   engine with `zero`, `char`, `rand` and `hash` registered.
//!
//! Non-`pub` fields are reset to their zero value. Maps are copied unchanged
//! by traversal and can only be zeroed through [`mask_any`].
//!
//! Integrations live behind feature flags (`slog`).

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

pub use fieldmask_derive::Mask;

#[allow(unused_extern_crates)]
extern crate self as fieldmask;

// Module declarations
#[cfg(feature = "builtins")]
pub mod builtins;
mod directive;
mod engine;
mod error;
#[cfg(feature = "builtins")]
mod global;
mod maskable;
mod registry;
#[cfg(feature = "slog")]
pub mod slog;
mod value;

// Re-exports
pub use directive::{Directive, DELIMITER};
pub use engine::{AnyOutcome, Engine};
pub use error::MaskError;
#[cfg(feature = "builtins")]
pub use global::{default_engine, mask, mask_any, mask_float, mask_int, mask_string, mask_uint};
pub use maskable::{Dynamic, Maskable};
pub use registry::{
    AnyMaskFn, Category, FloatMaskFn, IntMaskFn, StringMaskFn, Transformation, UintMaskFn,
};
#[doc(hidden)]
pub use value::FieldValues;
pub use value::{
    FieldDescriptor, FloatWidth, IntWidth, Opaque, Record, RecordSchema, ShapeKind, UintWidth,
    Value,
};
