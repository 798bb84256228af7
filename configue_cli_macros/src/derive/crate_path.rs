//! Path used by generated code to reach the runtime crate.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the runtime crate path.
///
/// Defaults to `::configue_cli`; `#[configue(crate = "...")]` substitutes a
/// re-export or renamed dependency.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::configue_cli }, |path| quote! { #path })
}
