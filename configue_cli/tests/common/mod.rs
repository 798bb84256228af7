//! Schemas shared by the integration tests.
//!
//! The types nest in several ways: plain nested records, records produced
//! by factories, and records assembled by self-referential factories from
//! sibling fields.

use configue_cli::{FactoryError, Instance, Record, Shadow, Structured};
use serde::Deserialize;

/// Small structured value produced by factories.
#[derive(Clone, Debug, Default, PartialEq, Eq, Structured, Deserialize)]
pub struct Handle {
    /// Constructor argument.
    #[configue(default = 1)]
    pub arg: i64,
}

fn two() -> i64 {
    2
}

fn four() -> i64 {
    4
}

fn greetings() -> Vec<String> {
    vec!["hello".to_owned(), "world".to_owned()]
}

fn param_3_plus_two(shadow: &Shadow) -> Result<i64, FactoryError> {
    Ok(shadow.get::<i64>("param_3")? + 2)
}

/// Record whose defaults are static values and zero-argument factories.
#[derive(Clone, Debug, PartialEq, Eq, Structured, Deserialize)]
pub struct PlainSubConfig {
    /// Structured type without a default or `nested`: an opaque leaf.
    pub custom_object: Handle,
    /// Mandatory.
    pub param_1: i64,
    /// Static default.
    #[configue(default = 1)]
    pub param_2: i64,
    /// Factory default.
    #[configue(factory = two)]
    pub param_3: i64,
    /// Factory producing a list.
    #[configue(factory = greetings)]
    pub param_4: Vec<String>,
    /// Factory producing a record.
    #[configue(factory = Handle::default)]
    pub param_5: Handle,
    /// Not part of construction.
    #[configue(skip)]
    #[serde(skip)]
    pub non_init: i64,
}

/// Record with a self-referential factory.
#[derive(Clone, Debug, PartialEq, Eq, Structured, Deserialize)]
pub struct DerivedSubConfig {
    /// Mandatory.
    pub param_1: i64,
    /// Static default.
    #[configue(default = 3)]
    pub param_2: i64,
    /// Factory default.
    #[configue(factory = four)]
    pub param_3: i64,
    /// `param_3 + 2`.
    #[configue(factory_takes_self = param_3_plus_two)]
    pub param_4: i64,
    /// Factory producing a list.
    #[configue(factory = greetings)]
    pub param_5: Vec<String>,
    /// Factory producing a record.
    #[configue(factory = Handle::default)]
    pub param_6: Handle,
    /// Not part of construction.
    #[configue(skip)]
    #[serde(skip)]
    pub non_init: i64,
}

/// Record nesting both sub-configurations.
#[derive(Clone, Debug, PartialEq, Eq, Structured, Deserialize)]
pub struct PlainConfig {
    /// Nested record.
    #[configue(nested)]
    pub plain_sub_config: PlainSubConfig,
    /// Nested record.
    #[configue(nested)]
    pub derived_sub_config: DerivedSubConfig,
    /// Mandatory.
    pub param_1: i64,
    /// Static default.
    #[configue(default = 1)]
    pub param_2: i64,
    /// Factory default.
    #[configue(factory = two)]
    pub param_3: i64,
}

/// Like [`PlainConfig`] with a self-referential factory at the top.
#[derive(Clone, Debug, PartialEq, Eq, Structured, Deserialize)]
pub struct DerivedConfig {
    /// Nested record.
    #[configue(nested)]
    pub derived_sub_config: DerivedSubConfig,
    /// Nested record.
    #[configue(nested)]
    pub plain_sub_config: PlainSubConfig,
    /// Mandatory.
    pub param_1: i64,
    /// Static default.
    #[configue(default = 3)]
    pub param_2: i64,
    /// Factory default.
    #[configue(factory = four)]
    pub param_3: i64,
    /// `param_3 + 2`.
    #[configue(factory_takes_self = param_3_plus_two)]
    pub param_4: i64,
}

/// Sub-record `part` of the earlier sibling `field`.
fn sibling_part<'a>(shadow: &'a Shadow, field: &str, part: &str) -> Result<&'a Instance, FactoryError> {
    shadow
        .field(field)?
        .as_record()
        .and_then(|record| record.get(part))
        .ok_or_else(|| FactoryError::rejected(field, format!("`{part}` is not available")))
}

fn mirror_plain(shadow: &Shadow) -> Result<Record, FactoryError> {
    Ok(Record::defaults::<PlainConfig>()?
        .with("plain_sub_config", sibling_part(shadow, "plain_config_1", "plain_sub_config")?)
        .with("derived_sub_config", sibling_part(shadow, "derived_config_1", "derived_sub_config")?)
        .with("param_1", shadow.field("param_1")?))
}

fn mirror_derived(shadow: &Shadow) -> Result<Record, FactoryError> {
    Ok(Record::defaults::<DerivedConfig>()?
        .with("derived_sub_config", sibling_part(shadow, "derived_config_1", "derived_sub_config")?)
        .with("plain_sub_config", sibling_part(shadow, "plain_config_1", "plain_sub_config")?)
        .with("param_1", shadow.field("param_1")?))
}

/// Top-level schema whose second-generation fields are assembled from the
/// first generation.
#[derive(Clone, Debug, PartialEq, Eq, Structured, Deserialize)]
pub struct MainConfig {
    /// Mandatory, shared by the mirrored records.
    pub param_1: i64,
    /// Nested record.
    #[configue(nested)]
    pub plain_config_1: PlainConfig,
    /// Nested record.
    #[configue(nested)]
    pub derived_config_1: DerivedConfig,
    /// Built from `param_1` and the first-generation sub-records.
    #[configue(factory_takes_self = mirror_plain)]
    pub plain_config_2: PlainConfig,
    /// Built from `param_1` and the first-generation sub-records.
    #[configue(factory_takes_self = mirror_derived)]
    pub derived_config_2: DerivedConfig,
}

/// Fully-qualified name recorded under the constructor key for `T`.
#[must_use]
pub fn type_name<T: Structured>() -> &'static str {
    std::any::type_name::<T>()
}
