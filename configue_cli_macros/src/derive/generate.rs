//! Token generation for the `Structured` and `ToInstance` impls.

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use super::parse::{FieldDefault, ParsedField};

/// Builder chain describing one field.
fn field_spec(krate: &TokenStream, field: &ParsedField) -> TokenStream {
    let name = field.ident.to_string();
    let ty = &field.ty;
    let attrs = &field.attrs;
    let mut spec = quote! { #krate::schema::FieldSpec::new(#name) };

    if attrs.skip {
        return quote! { #spec.no_init() };
    }
    if let Some(default) = &attrs.default {
        spec = match default {
            FieldDefault::Value(expr) => quote! {
                #spec.default_value::<#ty>(#expr)
            },
            FieldDefault::Type(default_ty) => quote! {
                #spec.default_type(#krate::TypeRef::of::<#default_ty>())
            },
            FieldDefault::Opaque(default_ty) => quote! {
                #spec.default_type(#krate::TypeRef::opaque::<#default_ty>())
            },
            FieldDefault::Factory(expr) => quote! { #spec.factory(#expr) },
            FieldDefault::FactoryTakesSelf(expr) => quote! { #spec.factory_takes_self(#expr) },
        };
    }
    if attrs.nested {
        spec = quote! { #spec.nested(#krate::TypeRef::of::<#ty>()) };
    }
    if let Some(converter) = &attrs.converter {
        spec = quote! { #spec.converter(#converter) };
    }
    spec
}

/// Generate both trait impls for `input`.
pub(crate) fn generate(input: &DeriveInput, krate: &TokenStream, fields: &[ParsedField]) -> TokenStream {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let specs = fields.iter().map(|field| field_spec(krate, field));
    let values = fields.iter().filter(|field| !field.attrs.skip).map(|field| {
        let member = &field.ident;
        let name = member.to_string();
        quote! { .with(#name, &self.#member) }
    });

    quote! {
        impl #impl_generics #krate::schema::Structured for #ident #ty_generics #where_clause {
            fn descriptor() -> #krate::schema::TypeDescriptor {
                #krate::schema::TypeDescriptor::of::<Self>()
                    #( .field(#specs) )*
            }
        }

        impl #impl_generics #krate::schema::ToInstance for #ident #ty_generics #where_clause {
            fn to_instance(&self) -> #krate::schema::Instance {
                #krate::schema::Instance::from(
                    #krate::schema::Record::of::<Self>() #( #values )*
                )
            }
        }
    }
}
