//! Logging configured from a subtree of the final configuration.
//!
//! The subtree deserialises into [`LoggingConfig`], which installs a global
//! `tracing` subscriber: an [`EnvFilter`] built from the level and
//! per-module overrides, plus a `fmt` layer writing to stderr or stdout.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{ConfigModel, ConfigValue, ConfigueError, ConfigueResult};

/// Stream receiving log output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    /// Standard error.
    #[default]
    Stderr,
    /// Standard output.
    Stdout,
}

/// Logging settings read from configuration.
///
/// ```
/// use configue_cli::ConfigModel;
/// use configue_cli::logging::LoggingConfig;
///
/// let subtree = ConfigModel::from_dotlist(["level=debug", "modules.hyper=warn"])?;
/// let logging = LoggingConfig::from_model(&subtree)?;
/// assert_eq!(logging.directives(), "debug,hyper=warn");
/// # Ok::<_, std::sync::Arc<configue_cli::ConfigueError>>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default level: `trace`, `debug`, `info`, `warn`, `error` or `off`.
    pub level: String,
    /// Per-module level overrides.
    pub modules: BTreeMap<String, String>,
    /// Emit ANSI colour codes.
    pub ansi: bool,
    /// Include event targets.
    pub target: bool,
    /// Output stream.
    pub output: LogOutput,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            modules: BTreeMap::new(),
            ansi: true,
            target: true,
            output: LogOutput::Stderr,
        }
    }
}

fn logging_error(message: impl Into<String>) -> Arc<ConfigueError> {
    Arc::new(ConfigueError::Logging {
        message: message.into(),
    })
}

impl LoggingConfig {
    /// Read settings from a configuration subtree.
    ///
    /// # Errors
    ///
    /// [`ConfigueError::Logging`] when the subtree does not match.
    pub fn from_model(model: &ConfigModel) -> ConfigueResult<Self> {
        Self::from_value(&ConfigValue::Map(model.clone()))
    }

    /// Read settings from any configuration value.
    ///
    /// # Errors
    ///
    /// [`ConfigueError::Logging`] when the value is not a matching mapping.
    pub fn from_value(value: &ConfigValue) -> ConfigueResult<Self> {
        let json = value.to_json().map_err(|err| logging_error(err.to_string()))?;
        serde_json::from_value(json).map_err(|err| logging_error(err.to_string()))
    }

    /// Filter directives in `EnvFilter` syntax.
    #[must_use]
    pub fn directives(&self) -> String {
        std::iter::once(self.level.clone())
            .chain(
                self.modules
                    .iter()
                    .map(|(module, level)| format!("{module}={level}")),
            )
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Build the event filter.
    ///
    /// # Errors
    ///
    /// [`ConfigueError::Logging`] when a directive is invalid.
    pub fn env_filter(&self) -> ConfigueResult<EnvFilter> {
        EnvFilter::try_new(self.directives()).map_err(|err| logging_error(err.to_string()))
    }

    /// Install a global subscriber.
    ///
    /// Returns `false` when another subscriber was already installed; the
    /// existing one is kept.
    ///
    /// # Errors
    ///
    /// [`ConfigueError::Logging`] when the filter is invalid.
    pub fn install(&self) -> ConfigueResult<bool> {
        let filter = self.env_filter()?;
        let layer = fmt::layer().with_ansi(self.ansi).with_target(self.target);
        let installed = match self.output {
            LogOutput::Stderr => Registry::default()
                .with(filter)
                .with(layer.with_writer(std::io::stderr))
                .try_init(),
            LogOutput::Stdout => Registry::default()
                .with(filter)
                .with(layer.with_writer(std::io::stdout))
                .try_init(),
        };
        Ok(match installed {
            Ok(()) => true,
            Err(err) => {
                debug!(error = %err, "global subscriber already installed");
                false
            }
        })
    }
}
