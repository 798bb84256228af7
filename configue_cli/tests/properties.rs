//! Behavioural guarantees of skeleton synthesis, merging and rendering.

use anyhow::{Result, anyhow, ensure};
use configue_cli::render::{RenderOptions, render_to_string};
use configue_cli::schema::{FieldSpec, TypeDescriptor};
use configue_cli::{
    CONSTRUCTOR_KEY, ConfigModel, ConfigValue, ConfigueError, FactoryError, Instance,
    ListMergeMode, MISSING, Record, Shadow, Structured, ToInstance,
};
use rstest::rstest;

fn model(entries: &[&str]) -> Result<ConfigModel> {
    ConfigModel::from_dotlist(entries).map_err(|e| anyhow!("{e}"))
}

fn a_plus_two(shadow: &Shadow) -> Result<i64, FactoryError> {
    Ok(shadow.get::<i64>("a")? + 2)
}

fn c_times_ten(shadow: &Shadow) -> Result<i64, FactoryError> {
    Ok(shadow.get::<i64>("c")? * 10)
}

/// `a`, `b` derived from `a`, `d` derived from the later `c`.
struct Chain;

impl ToInstance for Chain {
    fn to_instance(&self) -> Instance {
        Record::of::<Self>().into()
    }
}

impl Structured for Chain {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::named("demo.Chain")
            .field(FieldSpec::new("a").default_value(3))
            .field(FieldSpec::new("b").factory_takes_self(a_plus_two))
            .field(FieldSpec::new("d").factory_takes_self(c_times_ten))
            .field(FieldSpec::new("c").default_value(1))
            .field(FieldSpec::new("hidden").default_value(0).no_init())
    }
}

/// `param_1` without default, `param_2` defaulting to 3.
struct Params;

impl ToInstance for Params {
    fn to_instance(&self) -> Instance {
        Record::of::<Self>().into()
    }
}

impl Structured for Params {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::named("demo.Params")
            .field(FieldSpec::new("param_1"))
            .field(FieldSpec::new("param_2").default_value(3))
    }
}

#[rstest]
fn skeleton_keys_are_init_fields_in_order() -> Result<()> {
    let skeleton = ConfigModel::from_type::<Chain>(None).map_err(|e| anyhow!("{e}"))?;
    let keys: Vec<&str> = skeleton.keys().collect();
    ensure!(keys == [CONSTRUCTOR_KEY, "a", "b", "d", "c"], "unexpected keys {keys:?}");
    ensure!(skeleton.get(CONSTRUCTOR_KEY) == Some(&ConfigValue::from("demo.Chain")));
    Ok(())
}

#[rstest]
#[case::default(&[], 3, 5)]
#[case::overridden(&["a=10"], 10, 12)]
fn self_factories_read_earlier_siblings(
    #[case] overrides: &[&str],
    #[case] a: i64,
    #[case] b: i64,
) -> Result<()> {
    let skeleton =
        ConfigModel::from_type::<Chain>(Some(&model(overrides)?)).map_err(|e| anyhow!("{e}"))?;
    ensure!(skeleton.get("a") == Some(&ConfigValue::Integer(a)));
    ensure!(skeleton.get("b") == Some(&ConfigValue::Integer(b)));
    Ok(())
}

#[rstest]
#[case::unresolved(&[], ConfigValue::Missing)]
#[case::overridden(&["d=7"], ConfigValue::Integer(7))]
fn later_dependencies_fall_back(
    #[case] overrides: &[&str],
    #[case] expected: ConfigValue,
) -> Result<()> {
    let skeleton =
        ConfigModel::from_type::<Chain>(Some(&model(overrides)?)).map_err(|e| anyhow!("{e}"))?;
    ensure!(skeleton.get("d") == Some(&expected));
    ensure!(skeleton.get("c") == Some(&ConfigValue::Integer(1)));
    Ok(())
}

#[rstest]
#[case::extend(ListMergeMode::Extend, vec![1, 2, 3])]
#[case::replace(ListMergeMode::Replace, vec![3])]
fn list_policy_applies_in_layer_order(
    #[case] mode: ListMergeMode,
    #[case] expected: Vec<i64>,
) -> Result<()> {
    let mut config = model(&["x.items=[1]"])?;
    config.merge([&model(&["x.items=[2]"])?, &model(&["x.items=[3]"])?], mode);
    let items = config.get_path("x.items").ok_or_else(|| anyhow!("items absent"))?;
    let expected: Vec<ConfigValue> = expected.into_iter().map(ConfigValue::Integer).collect();
    ensure!(items.as_list() == Some(expected.as_slice()), "unexpected {items:?}");
    Ok(())
}

#[rstest]
fn merging_a_copy_of_itself_changes_nothing() -> Result<()> {
    let original = model(&["a.b=1", "a.c=[1, 2]", "d='text'"])?;
    let mut config = original.clone();
    config.merge([&original], ListMergeMode::Replace);
    ensure!(config == original);
    Ok(())
}

#[rstest]
fn dotted_keys_nest() -> Result<()> {
    let config = model(&["a.b.c=5"])?;
    let expected: ConfigModel = [(
        "a",
        ConfigModel::from_iter([("b", ConfigModel::from_iter([("c", 5)]))]),
    )]
    .into_iter()
    .collect();
    ensure!(config == expected);
    Ok(())
}

#[rstest]
fn stripping_identity_and_replacing_keeps_overrides_and_defaults() -> Result<()> {
    let overrides = model(&["a=10", "c=4", "d=[1, 2]"])?;
    let defaults = ConfigModel::from_type::<Chain>(None).map_err(|e| anyhow!("{e}"))?;
    let mut config =
        ConfigModel::from_type::<Chain>(Some(&overrides)).map_err(|e| anyhow!("{e}"))?;
    config.remove(CONSTRUCTOR_KEY);
    config.merge([&overrides], ListMergeMode::Replace);

    for (key, value) in overrides.iter() {
        ensure!(config.get(key) == Some(value), "`{key}` lost its override");
    }
    ensure!(config.get("b") == Some(&ConfigValue::Integer(12)));
    ensure!(defaults.get("b") == Some(&ConfigValue::Integer(5)));
    ensure!(!config.contains_key(CONSTRUCTOR_KEY));
    Ok(())
}

#[rstest]
fn missing_values_are_reported_or_shown() -> Result<()> {
    let skeleton = ConfigModel::from_type::<Params>(None).map_err(|e| anyhow!("{e}"))?;
    let expected: ConfigModel = [
        (CONSTRUCTOR_KEY, ConfigValue::from("demo.Params")),
        ("param_1", ConfigValue::from(MISSING)),
        ("param_2", ConfigValue::Integer(3)),
    ]
    .into_iter()
    .collect();
    ensure!(skeleton == expected);

    let options = RenderOptions::new("Configuration").pretty(false).colour(false);
    let Err(err) = render_to_string(&skeleton, &options) else {
        return Err(anyhow!("strict rendering should fail"));
    };
    ensure!(matches!(
        err.as_ref(),
        ConfigueError::MissingMandatoryValue { path } if path == "param_1"
    ));

    let text = render_to_string(&skeleton, &options.strict(false)).map_err(|e| anyhow!("{e}"))?;
    ensure!(text == "(): demo.Params\nparam_1: Missing\nparam_2: 3\n", "unexpected {text}");
    Ok(())
}
