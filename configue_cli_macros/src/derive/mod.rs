//! Expansion of `#[derive(Structured)]`.

mod crate_path;
mod generate;
mod parse;

use proc_macro2::TokenStream;
use syn::DeriveInput;

/// Expand the derive, or report the first attribute error.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let (struct_attrs, fields) = parse::parse_input(input)?;
    let krate = crate_path::resolve(struct_attrs.crate_path.as_ref());
    Ok(generate::generate(input, &krate, &fields))
}
