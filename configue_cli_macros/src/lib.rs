//! Procedural macros for `configue_cli`.
//!
//! `#[derive(Structured)]` describes a struct's fields to the configuration
//! traverser and converts values back into records for factories.
//! Field behaviour is controlled with `#[configue(...)]`:
//!
//! - `default = expr`: static default, typed as the field;
//! - `default_type = Type` / `default_opaque = Type`: default given as a
//!   type, traversed when it is structured;
//! - `factory = path` and `factory_takes_self = path`: computed defaults;
//! - `nested`: recurse into the field's own structured type;
//! - `converter = path`: conversion applied before factories see the value;
//! - `skip`: exclude the field from skeletons and records.
//!
//! `#[configue(crate = "path")]` on the struct points generated code at a
//! renamed or re-exported runtime crate.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive `configue_cli::schema::Structured` and
/// `configue_cli::schema::ToInstance`.
#[proc_macro_derive(Structured, attributes(configue))]
pub fn derive_structured(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
