//! Reading configuration files into [`ConfigModel`]s.

mod parser;

use camino::Utf8Path;
use tracing::debug;

use crate::{ConfigModel, ConfigValue, ConfigueError, ConfigueResult};

use parser::parse_by_format;

/// Load a configuration file, selecting the parser from its extension.
///
/// `.yaml`/`.yml` and unknown extensions are read as YAML, `.json` as JSON
/// and `.toml` as TOML (behind the `toml` feature). An empty document yields
/// an empty model.
///
/// ```rust,no_run
/// use camino::Utf8Path;
/// use configue_cli::load_config_file;
///
/// let config = load_config_file(Utf8Path::new("config.yaml"))?;
/// println!("{} top-level keys", config.len());
/// # Ok::<_, std::sync::Arc<configue_cli::ConfigueError>>(())
/// ```
///
/// # Errors
///
/// Returns [`ConfigueError::File`] when the file cannot be read, fails to
/// parse, or does not hold a mapping at its root.
pub fn load_config_file(path: &Utf8Path) -> ConfigueResult<ConfigModel> {
    let contents = std::fs::read_to_string(path).map_err(|err| ConfigueError::file(path, err))?;
    let model = match parse_by_format(path, &contents)? {
        ConfigValue::Map(model) => model,
        ConfigValue::Null => ConfigModel::new(),
        other => {
            return Err(ConfigueError::file(
                path,
                format!("expected a mapping at the document root, found {}", other.kind()),
            ));
        }
    };
    debug!(%path, keys = model.len(), "loaded configuration file");
    Ok(model)
}
