//! Format-specific parsing of configuration documents.

use camino::Utf8Path;
use serde_saphyr::Options;

use crate::{ConfigValue, ConfigueError, ConfigueResult};

/// Parse `data` according to the extension of `path`.
pub(super) fn parse_by_format(path: &Utf8Path, data: &str) -> ConfigueResult<ConfigValue> {
    let ext = path.extension().map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => serde_json::from_str(data).map_err(|err| ConfigueError::file(path, err)),
        Some("toml") => parse_toml(path, data),
        _ => parse_yaml(path, data),
    }
}

fn parse_yaml(path: &Utf8Path, data: &str) -> ConfigueResult<ConfigValue> {
    if data.trim().is_empty() {
        return Ok(ConfigValue::Null);
    }
    serde_saphyr::from_str_with_options(
        data,
        Options {
            strict_booleans: true,
            ..Options::default()
        },
    )
    .map_err(|err| ConfigueError::file(path, err.to_string()))
}

#[cfg(feature = "toml")]
fn parse_toml(path: &Utf8Path, data: &str) -> ConfigueResult<ConfigValue> {
    toml::from_str(data).map_err(|err| ConfigueError::file(path, err))
}

#[cfg(not(feature = "toml"))]
fn parse_toml(path: &Utf8Path, _data: &str) -> ConfigueResult<ConfigValue> {
    Err(ConfigueError::file(
        path,
        std::io::Error::other("toml feature disabled: enable the 'toml' feature to read this file"),
    ))
}
