//! Layered composition of files, overrides and schema defaults.

use std::io::Write;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::ConfigArgs;
use crate::logging::LoggingConfig;
use crate::render::{RenderOptions, render, render_to_string};
use crate::schema::{Structured, TypeRef};
use crate::{
    CONSTRUCTOR_KEY, ConfigModel, ConfigueError, ConfigueResult, ConfigueResultExt, ListMergeMode,
    dump, load_config_file,
};

/// Panel title for dry runs.
const HELPER_TITLE: &str = "Configuration helper";
/// Panel title for the configuration a command runs with.
const FINAL_TITLE: &str = "Configuration";

/// Turns [`ConfigArgs`] into a finished configuration and runs a command
/// with it.
///
/// Layers are applied in this order: configuration files, dotted
/// overrides, then defaults synthesised from the target schema for
/// anything still unset. An optional logging subtree is removed before
/// instantiation, used to install a subscriber, and shown again in the
/// rendered output.
///
/// ```
/// use configue_cli::{ConfigArgs, Injector, Structured};
///
/// #[derive(Structured, serde::Deserialize)]
/// struct Train {
///     #[configue(default = 10)]
///     epochs: u32,
///     #[configue(default = 0.1)]
///     rate: f64,
/// }
///
/// let args = ConfigArgs::with_parameters(["epochs=3"]);
/// let mut out = Vec::new();
/// let epochs = Injector::new().colour(false).run(&args, &mut out, |train: Train| train.epochs)?;
/// assert_eq!(epochs, Some(3));
/// # Ok::<_, std::sync::Arc<configue_cli::ConfigueError>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Injector {
    logging_key: Option<String>,
    file_merge_mode: ListMergeMode,
    cli_merge_mode: ListMergeMode,
    colour: bool,
}

impl Default for Injector {
    fn default() -> Self {
        Self {
            logging_key: None,
            file_merge_mode: ListMergeMode::Extend,
            cli_merge_mode: ListMergeMode::Replace,
            colour: true,
        }
    }
}

impl Injector {
    /// Injector with extend-merged files, replace-merged overrides and no
    /// logging subtree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure logging from the subtree stored under `key`.
    #[must_use]
    pub fn logging_key(mut self, key: impl Into<String>) -> Self {
        self.logging_key = Some(key.into());
        self
    }

    /// List policy used when layering configuration files.
    #[must_use]
    pub const fn file_merge_mode(mut self, mode: ListMergeMode) -> Self {
        self.file_merge_mode = mode;
        self
    }

    /// List policy used when layering dotted overrides over files.
    #[must_use]
    pub const fn cli_merge_mode(mut self, mode: ListMergeMode) -> Self {
        self.cli_merge_mode = mode;
        self
    }

    /// Emit ANSI colours in the rendered configuration.
    #[must_use]
    pub const fn colour(mut self, colour: bool) -> Self {
        self.colour = colour;
        self
    }

    /// Layer files, overrides and, when `target` is given, schema defaults.
    ///
    /// The result still contains the logging subtree and may contain
    /// missing leaves.
    ///
    /// # Errors
    ///
    /// File, override and traversal failures.
    pub fn compose(&self, args: &ConfigArgs, target: Option<&TypeRef>) -> ConfigueResult<ConfigModel> {
        let files = args
            .config
            .iter()
            .map(|path| load_config_file(path))
            .collect::<ConfigueResult<Vec<_>>>()?;
        let mut base = ConfigModel::new();
        base.merge(&files, self.file_merge_mode);

        if !args.parameters.is_empty() {
            let overrides = ConfigModel::from_dotlist(&args.parameters)?;
            base.merge([&overrides], self.cli_merge_mode);
        }

        let Some(ty) = target else {
            return Ok(base);
        };
        let mut config = ConfigModel::from_type_ref(ty, Some(&base))?;
        config.remove(CONSTRUCTOR_KEY);
        config.merge([&base], ListMergeMode::Replace);
        Ok(config)
    }

    /// Build the configuration for `T` and call `command` with it.
    ///
    /// Returns `None` on a dry run, after printing the configuration with
    /// missing leaves shown rather than rejected.
    ///
    /// # Errors
    ///
    /// Composition failures, [`ConfigueError::MissingMandatoryValue`] for
    /// unresolved leaves, instantiation and output failures.
    pub fn run<T, R>(
        &self,
        args: &ConfigArgs,
        out: &mut dyn Write,
        command: impl FnOnce(T) -> R,
    ) -> ConfigueResult<Option<R>>
    where
        T: Structured + DeserializeOwned,
    {
        self.execute(args, out, Some(&TypeRef::of::<T>()), ConfigModel::instantiate::<T>, command)
    }

    /// Like [`Injector::run`] without a schema: `command` receives the
    /// layered files and overrides.
    ///
    /// # Errors
    ///
    /// Composition failures and [`ConfigueError::MissingMandatoryValue`]
    /// when an override or file leaves a value missing.
    pub fn run_unstructured<R>(
        &self,
        args: &ConfigArgs,
        out: &mut dyn Write,
        command: impl FnOnce(ConfigModel) -> R,
    ) -> ConfigueResult<Option<R>> {
        self.execute(
            args,
            out,
            None,
            |config| config.to_json().map(|_| config.clone()),
            command,
        )
    }

    fn execute<V, R>(
        &self,
        args: &ConfigArgs,
        out: &mut dyn Write,
        target: Option<&TypeRef>,
        build: impl FnOnce(&ConfigModel) -> ConfigueResult<V>,
        command: impl FnOnce(V) -> R,
    ) -> ConfigueResult<Option<R>> {
        let mut config = self.compose(args, target)?;
        let logging = self.configure_logging(&mut config)?;
        let options = RenderOptions::new(HELPER_TITLE)
            .pretty(args.pretty_output())
            .depth(args.depth)
            .colour(self.colour);

        if args.dry_run {
            config.merge([&logging], ListMergeMode::Replace);
            render(&config, &options.strict(false), out)?;
            return Ok(None);
        }

        let value = build(&config)?;
        config.merge([&logging], ListMergeMode::Replace);

        let view = render_to_string(
            &config,
            &RenderOptions {
                title: FINAL_TITLE.to_owned(),
                ..options.strict(true)
            },
        )?;

        if let Some(path) = &args.output {
            let yaml = dump(&config)?;
            std::fs::write(path, yaml).map_err(|err| ConfigueError::file(path, err))?;
            debug!(path = %path, "wrote final configuration");
        }

        out.write_all(view.as_bytes()).into_configue()?;
        Ok(Some(command(value)))
    }

    /// Remove and apply the logging subtree, returning it keyed for merging
    /// back.
    fn configure_logging(&self, config: &mut ConfigModel) -> ConfigueResult<ConfigModel> {
        let Some(key) = self.logging_key.as_deref() else {
            return Ok(ConfigModel::new());
        };
        let Some(subtree) = config.remove(key) else {
            warn!("`{key}` was not found in the config, skip logging configuration");
            return Ok(ConfigModel::new());
        };
        let installed = LoggingConfig::from_value(&subtree)?.install()?;
        debug!(key, installed, "applied logging configuration");
        Ok([(key, subtree)].into_iter().collect())
    }
}
