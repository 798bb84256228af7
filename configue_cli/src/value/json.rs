//! Conversion of finished configuration trees into `serde_json` values.

use serde_json::{Map, Number, Value};

use super::ConfigValue;
use crate::model::dotted;
use crate::{CONSTRUCTOR_KEY, ConfigModel, ConfigueError, ConfigueResult};

impl ConfigValue {
    /// Convert the value into JSON for deserialisation into a target type.
    ///
    /// Constructor keys are dropped, references become their tagged string
    /// form and non-finite floats become `null`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigueError::MissingMandatoryValue`] naming the dotted path
    /// of the first missing leaf.
    pub fn to_json(&self) -> ConfigueResult<Value> {
        to_json_at(self, "")
    }
}

impl ConfigModel {
    /// Convert the mapping into a JSON object; see [`ConfigValue::to_json`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigueError::MissingMandatoryValue`] when a leaf is
    /// missing.
    pub fn to_json(&self) -> ConfigueResult<Value> {
        map_to_json(self, "")
    }
}

fn map_to_json(model: &ConfigModel, path: &str) -> ConfigueResult<Value> {
    let mut object = Map::with_capacity(model.len());
    for (key, value) in model.iter().filter(|(key, _)| *key != CONSTRUCTOR_KEY) {
        object.insert(key.to_owned(), to_json_at(value, &dotted(path, key))?);
    }
    Ok(Value::Object(object))
}

fn to_json_at(value: &ConfigValue, path: &str) -> ConfigueResult<Value> {
    Ok(match value {
        ConfigValue::Missing => return Err(ConfigueError::missing_value(path)),
        ConfigValue::Null => Value::Null,
        ConfigValue::Bool(flag) => Value::Bool(*flag),
        ConfigValue::Integer(number) => Value::Number(Number::from(*number)),
        ConfigValue::Unsigned(number) => Value::Number(Number::from(*number)),
        ConfigValue::Float(number) => Number::from_f64(*number).map_or(Value::Null, Value::Number),
        ConfigValue::String(text) => Value::String(text.clone()),
        ConfigValue::Reference(reference) => Value::String(reference.to_string()),
        ConfigValue::List(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| to_json_at(item, &dotted(path, &index.to_string())))
                .collect::<ConfigueResult<_>>()?,
        ),
        ConfigValue::Map(model) => map_to_json(model, path)?,
    })
}
