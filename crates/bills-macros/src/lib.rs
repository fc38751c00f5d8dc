//! Procedural macros for Bills.
//!
//! `#[derive(Validate)]` turns `#[validate(...)]` field attributes into a
//! static rule table and an indexed field accessor implementing
//! `bills_core::validate::Validate`. Validation then runs without any runtime
//! reflection.
//!
//! # Example
//!
//! ```rust,ignore
//! use bills_macros::Validate;
//! use serde::Deserialize;
//!
//! #[derive(Default, Deserialize, Validate)]
//! #[serde(default)]
//! struct CreationRequest {
//!     #[validate(required)]
//!     title: String,
//!     #[validate(required, number)]
//!     price: f64,
//!     #[validate(required, oneof = "'CREDIT' 'DEBIT'")]
//!     #[serde(rename = "type")]
//!     kind: String,
//! }
//! ```

mod parse;
mod validate;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `bills_core::validate::Validate`.
///
/// # Field attributes
///
/// | Attribute | Rule |
/// |---|---|
/// | `required` | value is not its zero value |
/// | `email` | text is an e-mail address |
/// | `number` | value is numeric |
/// | `gte = N` | lower bound (number value or text length) |
/// | `lte = N` | upper bound (number value or text length) |
/// | `oneof = "A B"` | value is one of the listed options |
/// | `name = "Field"` | name used in messages (default: PascalCase of the field) |
///
/// Rules run in the order written. Fields without `#[validate]` are ignored.
#[proc_macro_derive(Validate, attributes(validate))]
pub fn derive_validate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    validate::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
