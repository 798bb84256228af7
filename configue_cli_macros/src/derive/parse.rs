//! Parsing of `#[configue(...)]` attributes for the `Structured` derive.

use syn::parenthesized;
use syn::{Attribute, Data, DeriveInput, Expr, Fields, LitStr, Token, Type};

/// Container-level settings.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    pub crate_path: Option<syn::Path>,
}

/// How a field obtains its default.
#[derive(Clone)]
pub(crate) enum FieldDefault {
    /// Value expression converted into the field type.
    Value(Expr),
    /// Structured type traversed in place of a value.
    Type(Type),
    /// Type that does not describe its fields.
    Opaque(Type),
    /// Zero-argument factory.
    Factory(Expr),
    /// Factory reading earlier siblings.
    FactoryTakesSelf(Expr),
}

impl FieldDefault {
    const fn key(&self) -> &'static str {
        match self {
            Self::Value(_) => "default",
            Self::Type(_) => "default_type",
            Self::Opaque(_) => "default_opaque",
            Self::Factory(_) => "factory",
            Self::FactoryTakesSelf(_) => "factory_takes_self",
        }
    }
}

/// Field-level settings.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub default: Option<FieldDefault>,
    pub nested: bool,
    pub converter: Option<Expr>,
    pub skip: bool,
}

/// A named field together with its parsed attributes.
pub(crate) struct ParsedField {
    pub ident: syn::Ident,
    pub ty: Type,
    pub attrs: FieldAttrs,
}

/// Iterate every `#[configue(...)]` attribute and apply `f` to each key.
fn parse_configue<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&syn::meta::ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("configue")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consume an unrecognised key, with or without a value.
fn discard_unknown(meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Parse container attributes. Only `crate = "path"` is recognised.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_configue(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let lit: LitStr = meta.value()?.parse()?;
            out.crate_path = Some(lit.parse()?);
            Ok(())
        } else {
            discard_unknown(meta)
        }
    })?;
    Ok(out)
}

fn set_default(
    meta: &syn::meta::ParseNestedMeta,
    out: &mut FieldAttrs,
    default: FieldDefault,
) -> syn::Result<()> {
    if let Some(previous) = &out.default {
        return Err(meta.error(format!(
            "`{}` conflicts with `{}`; a field takes a single default",
            default.key(),
            previous.key()
        )));
    }
    out.default = Some(default);
    Ok(())
}

/// Apply one field key, returning `false` when it is not recognised.
fn apply_field_attr(meta: &syn::meta::ParseNestedMeta, out: &mut FieldAttrs) -> syn::Result<bool> {
    let Some(ident) = meta.path.get_ident().map(ToString::to_string) else {
        return Ok(false);
    };
    match ident.as_str() {
        "default" => {
            let expr = meta.value()?.parse()?;
            set_default(meta, out, FieldDefault::Value(expr))?;
        }
        "default_type" => {
            let ty = meta.value()?.parse()?;
            set_default(meta, out, FieldDefault::Type(ty))?;
        }
        "default_opaque" => {
            let ty = meta.value()?.parse()?;
            set_default(meta, out, FieldDefault::Opaque(ty))?;
        }
        "factory" => {
            let expr = meta.value()?.parse()?;
            set_default(meta, out, FieldDefault::Factory(expr))?;
        }
        "factory_takes_self" => {
            let expr = meta.value()?.parse()?;
            set_default(meta, out, FieldDefault::FactoryTakesSelf(expr))?;
        }
        "converter" => out.converter = Some(meta.value()?.parse()?),
        "nested" => out.nested = true,
        "skip" => out.skip = true,
        _ => return Ok(false),
    }
    Ok(true)
}

/// Parse field attributes. Unknown keys are discarded.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_configue(attrs, |meta| {
        if !apply_field_attr(meta, &mut out)? {
            discard_unknown(meta)?;
        }
        Ok(())
    })?;
    Ok(out)
}

/// Collect the container settings and the named fields of a struct.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<(StructAttrs, Vec<ParsedField>)> {
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unnamed(_) | Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Structured requires named fields",
                ));
            }
        },
        Data::Enum(data) => {
            return Err(syn::Error::new_spanned(
                data.enum_token,
                "Structured can only be derived for structs",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "Structured can only be derived for structs",
            ));
        }
    };
    let fields = named
        .iter()
        .map(|field| {
            let ident = field
                .ident
                .clone()
                .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
            Ok(ParsedField {
                ident,
                ty: field.ty.clone(),
                attrs: parse_field_attrs(&field.attrs)?,
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;
    Ok((struct_attrs, fields))
}

#[cfg(test)]
mod tests {
    //! Unit tests for attribute parsing.

    use super::*;
    use anyhow::{Result, anyhow, ensure};
    use rstest::rstest;
    use syn::parse_quote;

    #[rstest]
    fn crate_override_is_parsed() -> Result<()> {
        let input: DeriveInput = parse_quote! {
            #[configue(crate = "my_ns::configue_cli", unknown = 3)]
            struct S { a: u8 }
        };
        let (attrs, fields) = parse_input(&input)?;
        let path = attrs.crate_path.ok_or_else(|| anyhow!("crate path"))?;
        ensure!(quote::quote!(#path).to_string() == "my_ns :: configue_cli");
        ensure!(fields.len() == 1);
        Ok(())
    }

    #[rstest]
    fn field_keys_are_recorded() -> Result<()> {
        let input: DeriveInput = parse_quote! {
            struct S {
                #[configue(default = 3, converter = to_u8)]
                a: u8,
                #[configue(nested)]
                b: Inner,
                #[configue(factory_takes_self = derive_c)]
                c: u16,
                #[configue(skip, future(flag))]
                d: u32,
            }
        };
        let (_, fields) = parse_input(&input)?;
        let [a, b, c, d] = fields.as_slice() else {
            return Err(anyhow!("expected four fields"));
        };
        ensure!(matches!(a.attrs.default, Some(FieldDefault::Value(_))));
        ensure!(a.attrs.converter.is_some());
        ensure!(b.attrs.nested && b.attrs.default.is_none());
        ensure!(matches!(c.attrs.default, Some(FieldDefault::FactoryTakesSelf(_))));
        ensure!(d.attrs.skip);
        Ok(())
    }

    #[rstest]
    #[case::value_and_factory(parse_quote! { struct S { #[configue(default = 1, factory = f)] a: u8 } })]
    #[case::split_attributes(parse_quote! {
        struct S {
            #[configue(default_type = Inner)]
            #[configue(default_opaque = Other)]
            a: u8,
        }
    })]
    fn conflicting_defaults_are_rejected(#[case] input: DeriveInput) {
        let Err(err) = parse_input(&input) else {
            panic!("conflicting defaults must be rejected");
        };
        assert!(err.to_string().contains("a field takes a single default"));
    }

    #[rstest]
    #[case::tuple(parse_quote! { struct S(u8); }, "named fields")]
    #[case::enumeration(parse_quote! { enum E { A } }, "only be derived for structs")]
    fn non_record_inputs_are_rejected(#[case] input: DeriveInput, #[case] message: &str) {
        let Err(err) = parse_input(&input) else {
            panic!("input must be rejected");
        };
        assert!(err.to_string().contains(message));
    }
}
