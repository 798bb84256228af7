//! Parser for the right-hand side of dotted overrides.

use std::sync::Arc;

use serde_saphyr::Options;

use super::{ConfigValue, Reference};
use crate::{ConfigueError, ConfigueResult};

/// Parse a raw override value into a [`ConfigValue`].
///
/// `!ext <name>` and `!path <path>` produce references, an empty string is
/// `null`, and anything else is read as a single YAML scalar or flow
/// collection with strict boolean handling.
///
/// ```
/// use configue_cli::{ConfigValue, parse_literal};
///
/// assert_eq!(parse_literal("5")?, ConfigValue::Integer(5));
/// assert_eq!(parse_literal("yes")?, ConfigValue::from("yes"));
/// assert_eq!(parse_literal("[a, b]")?, ConfigValue::from(vec!["a", "b"]));
/// # Ok::<_, std::sync::Arc<configue_cli::ConfigueError>>(())
/// ```
///
/// # Errors
///
/// Returns [`ConfigueError::Literal`] when the text is not valid YAML.
pub fn parse_literal(raw: &str) -> ConfigueResult<ConfigValue> {
    if let Some(reference) = Reference::parse_tagged(raw) {
        return Ok(ConfigValue::Reference(reference));
    }
    if raw.trim().is_empty() {
        return Ok(ConfigValue::Null);
    }
    serde_saphyr::from_str_with_options(
        raw,
        Options {
            strict_booleans: true,
            ..Options::default()
        },
    )
    .map_err(|err| {
        Arc::new(ConfigueError::Literal {
            input: raw.to_owned(),
            message: err.to_string(),
        })
    })
}
