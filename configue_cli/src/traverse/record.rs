//! Traversal of structured type descriptors.

use std::sync::Arc;

use tracing::debug;

use super::MAX_DEPTH;
use super::instance::{leaf_override, traverse_instance};
use crate::schema::{DefaultSpec, FieldSpec, Shadow, TypeRef};
use crate::{
    CONSTRUCTOR_KEY, ConfigModel, ConfigValue, ConfigueError, ConfigueResult, Instance, Record,
    Reference,
};

/// Build the skeleton of a structured type.
///
/// Fields are resolved in declaration order:
///
/// 1. a type default is traversed recursively; an opaque type becomes the
///    override or an `!ext` reference to the type;
/// 2. a plain factory is called and its result traversed as an instance;
/// 3. a self-referential factory is called with the shadow built so far and
///    falls back to the override or [`crate::MISSING`] when it fails;
/// 4. a static default yields the override or the default;
/// 5. a field without default recurses into its declared nested type, if
///    any, else yields the override or [`crate::MISSING`].
///
/// The returned [`Record`] is the shadow: the value each field resolved to,
/// minus those a converter rejected.
///
/// # Errors
///
/// [`ConfigueError::UnsupportedType`] when `ty` is opaque,
/// [`ConfigueError::ReservedKey`] when a field is named `()`, and
/// [`ConfigueError::RecursionLimit`] when nesting exceeds the traversal
/// depth.
pub fn traverse_type(
    ty: &TypeRef,
    initial: Option<&ConfigModel>,
) -> ConfigueResult<(ConfigModel, Record)> {
    walk(ty, initial, 0)
}

fn walk(
    ty: &TypeRef,
    initial: Option<&ConfigModel>,
    depth: usize,
) -> ConfigueResult<(ConfigModel, Record)> {
    let descriptor = ty.descriptor()?;
    if depth > MAX_DEPTH {
        return Err(Arc::new(ConfigueError::RecursionLimit {
            type_name: descriptor.type_name().to_owned(),
        }));
    }

    let mut skeleton = ConfigModel::new();
    skeleton.insert(CONSTRUCTOR_KEY, descriptor.type_name());
    let mut shadow = Shadow::new(descriptor.type_name());

    for field in descriptor.init_fields() {
        if field.name() == CONSTRUCTOR_KEY {
            return Err(Arc::new(ConfigueError::ReservedKey {
                type_name: descriptor.type_name().to_owned(),
            }));
        }
        let overridden = initial.and_then(|overrides| overrides.get(field.name()));
        let (entry, instance) = resolve_field(field, overridden, &shadow, depth)?;
        shadow.assign(field.name(), instance, field.converter_fn());
        skeleton.insert(field.name(), entry);
    }

    Ok((skeleton, shadow.into_record()))
}

fn leaf(value: ConfigValue) -> (ConfigValue, Instance) {
    (value.clone(), Instance::Value(value))
}

fn override_or_missing(overridden: Option<&ConfigValue>) -> (ConfigValue, Instance) {
    leaf(overridden.cloned().unwrap_or(ConfigValue::Missing))
}

fn resolve_field(
    field: &FieldSpec,
    overridden: Option<&ConfigValue>,
    shadow: &Shadow,
    depth: usize,
) -> ConfigueResult<(ConfigValue, Instance)> {
    match field.default_spec() {
        DefaultSpec::Type(ty) => nested(ty, overridden, depth, || {
            ConfigValue::Reference(Reference::Extern(ty.name().to_owned()))
        }),
        DefaultSpec::Factory(factory) => Ok(traverse_instance(&factory(), overridden)),
        DefaultSpec::SelfFactory(factory) => Ok(match factory(shadow) {
            Ok(instance) => traverse_instance(&instance, overridden),
            Err(err) => {
                debug!(
                    type_name = shadow.type_name(),
                    field = field.name(),
                    error = %err,
                    "self-referential factory deferred"
                );
                override_or_missing(overridden)
            }
        }),
        DefaultSpec::Value(default) => Ok(leaf(overridden.unwrap_or(default).clone())),
        DefaultSpec::None => match field.nested_type() {
            Some(ty) => nested(ty, overridden, depth, || ConfigValue::Missing),
            None => Ok(override_or_missing(overridden)),
        },
    }
}

fn nested(
    ty: &TypeRef,
    overridden: Option<&ConfigValue>,
    depth: usize,
    fallback: impl FnOnce() -> ConfigValue,
) -> ConfigueResult<(ConfigValue, Instance)> {
    if let Some(value) = leaf_override(overridden) {
        return Ok(leaf(value.clone()));
    }
    match walk(ty, overridden.and_then(ConfigValue::as_map), depth + 1) {
        Ok((skeleton, record)) => Ok((ConfigValue::Map(skeleton), Instance::Record(record))),
        Err(err) if err.is_unsupported_type() => Ok(leaf(
            overridden
                .filter(|value| !value.is_null())
                .cloned()
                .unwrap_or_else(fallback),
        )),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests panic with context on unexpected results")]
mod tests {
    use super::*;
    use crate::schema::{Structured, TypeDescriptor};
    use crate::{FactoryError, ToInstance};
    use rstest::rstest;

    struct Looping;

    impl ToInstance for Looping {
        fn to_instance(&self) -> Instance {
            Record::of::<Self>().into()
        }
    }

    impl Structured for Looping {
        fn descriptor() -> TypeDescriptor {
            TypeDescriptor::of::<Self>().field(FieldSpec::new("next").nested(TypeRef::of::<Self>()))
        }
    }

    struct Reserved;

    impl ToInstance for Reserved {
        fn to_instance(&self) -> Instance {
            Record::of::<Self>().into()
        }
    }

    impl Structured for Reserved {
        fn descriptor() -> TypeDescriptor {
            TypeDescriptor::of::<Self>().field(FieldSpec::new(CONSTRUCTOR_KEY))
        }
    }

    struct Opaque;

    #[rstest]
    fn opaque_types_are_unsupported() {
        let err = traverse_type(&TypeRef::opaque::<Opaque>(), None).expect_err("opaque");
        assert!(err.is_unsupported_type());
    }

    #[rstest]
    fn self_referential_types_hit_the_depth_limit() {
        let err = traverse_type(&TypeRef::of::<Looping>(), None).expect_err("infinite nesting");
        assert!(matches!(err.as_ref(), ConfigueError::RecursionLimit { .. }));
    }

    #[rstest]
    fn reserved_field_names_are_rejected() {
        let err = traverse_type(&TypeRef::of::<Reserved>(), None).expect_err("reserved key");
        assert!(matches!(err.as_ref(), ConfigueError::ReservedKey { .. }));
    }

    fn doubled(value: &Instance) -> Result<i64, FactoryError> {
        match value.as_value() {
            Some(ConfigValue::Integer(n)) => Ok(n * 2),
            _ => Err(FactoryError::rejected("a", "expected an integer")),
        }
    }

    fn a_plus_one(shadow: &Shadow) -> Result<i64, FactoryError> {
        Ok(shadow.get::<i64>("a")? + 1)
    }

    struct Converted;

    impl ToInstance for Converted {
        fn to_instance(&self) -> Instance {
            Record::of::<Self>().into()
        }
    }

    impl Structured for Converted {
        fn descriptor() -> TypeDescriptor {
            TypeDescriptor::of::<Self>()
                .field(FieldSpec::new("a").converter(doubled))
                .field(FieldSpec::new("b").factory_takes_self(a_plus_one))
        }
    }

    #[rstest]
    #[case::missing(None, ConfigValue::Missing, ConfigValue::Missing)]
    #[case::overridden(Some(5), ConfigValue::Integer(5), ConfigValue::Integer(11))]
    fn converters_shape_what_factories_see(
        #[case] a: Option<i64>,
        #[case] expected_a: ConfigValue,
        #[case] expected_b: ConfigValue,
    ) {
        let initial: ConfigModel = a.map(|value| ("a", value)).into_iter().collect();
        let (skeleton, shadow) =
            traverse_type(&TypeRef::of::<Converted>(), Some(&initial)).expect("traversal");
        assert_eq!(skeleton.get("a"), Some(&expected_a));
        assert_eq!(skeleton.get("b"), Some(&expected_b));
        assert_eq!(shadow.contains("a"), a.is_some());
    }

    struct Inner;

    impl ToInstance for Inner {
        fn to_instance(&self) -> Instance {
            Record::of::<Self>().with("x", 1).into()
        }
    }

    impl Structured for Inner {
        fn descriptor() -> TypeDescriptor {
            TypeDescriptor::of::<Self>().field(FieldSpec::new("x").default_value(1))
        }
    }

    struct Sink;

    struct Holder;

    impl ToInstance for Holder {
        fn to_instance(&self) -> Instance {
            Record::of::<Self>().into()
        }
    }

    impl Structured for Holder {
        fn descriptor() -> TypeDescriptor {
            TypeDescriptor::of::<Self>()
                .field(FieldSpec::new("inner").default_type(TypeRef::of::<Inner>()))
                .field(FieldSpec::new("sink").default_type(TypeRef::opaque::<Sink>()))
        }
    }

    fn inner_skeleton(x: i64) -> ConfigValue {
        ConfigValue::Map(
            [
                (CONSTRUCTOR_KEY, ConfigValue::from(std::any::type_name::<Inner>())),
                ("x", ConfigValue::Integer(x)),
            ]
            .into_iter()
            .collect(),
        )
    }

    fn sink_reference() -> ConfigValue {
        ConfigValue::Reference(Reference::Extern(std::any::type_name::<Sink>().to_owned()))
    }

    fn holder(overrides: &[&str]) -> (ConfigModel, Record) {
        let initial = ConfigModel::from_dotlist(overrides).expect("valid overrides");
        traverse_type(&TypeRef::of::<Holder>(), Some(&initial)).expect("traversal")
    }

    #[rstest]
    fn structured_type_defaults_are_traversed() {
        let (skeleton, shadow) = holder(&[]);
        assert_eq!(skeleton.get("inner"), Some(&inner_skeleton(1)));
        assert!(shadow.get("inner").and_then(Instance::as_record).is_some());
    }

    #[rstest]
    fn type_default_overrides_reach_nested_fields() {
        let (skeleton, _) = holder(&["inner.x=5"]);
        assert_eq!(skeleton.get("inner"), Some(&inner_skeleton(5)));
    }

    #[rstest]
    fn opaque_type_defaults_become_references() {
        let (skeleton, _) = holder(&[]);
        let sink = skeleton.get("sink").expect("sink entry");
        assert_eq!(sink, &sink_reference());
        assert!(sink_reference().to_string().starts_with("!ext "));
        assert!(std::any::type_name::<Sink>().ends_with("::Sink"));
    }

    #[rstest]
    fn scalar_overrides_replace_type_defaults() {
        let (skeleton, shadow) = holder(&["inner=!ext app.Inner", "sink=!path /dev/null"]);
        assert_eq!(
            skeleton.get("inner"),
            Some(&ConfigValue::Reference(Reference::Extern("app.Inner".into())))
        );
        assert_eq!(
            skeleton.get("sink"),
            Some(&ConfigValue::Reference(Reference::Path("/dev/null".into())))
        );
        assert!(shadow.get("inner").and_then(Instance::as_record).is_none());
    }

    #[rstest]
    fn null_overrides_keep_type_defaults() {
        let (skeleton, _) = holder(&["inner", "sink"]);
        assert_eq!(skeleton.get("inner"), Some(&inner_skeleton(1)));
        assert_eq!(skeleton.get("sink"), Some(&sink_reference()));
    }
}
