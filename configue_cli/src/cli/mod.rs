//! Command-line surface: shared arguments and the injection pipeline.
//!
//! [`ConfigArgs`] is flattened into an application's own `clap` parser.
//! [`Injector`] turns the parsed arguments into a finished configuration,
//! renders it, and hands the result to the application.

mod injector;

use camino::Utf8PathBuf;
use clap::Args;

pub use injector::Injector;

/// Arguments shared by every configurable command.
///
/// ```
/// use clap::Parser;
/// use configue_cli::ConfigArgs;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(flatten)]
///     config: ConfigArgs,
/// }
///
/// let cli = Cli::try_parse_from(["app", "-c", "base.yaml", "--no-pretty", "model.depth=3"])?;
/// assert_eq!(cli.config.parameters, ["model.depth=3"]);
/// assert!(!cli.config.pretty_output());
/// # Ok::<_, clap::Error>(())
/// ```
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigArgs {
    /// Dotted overrides such as `module.param1=value1 module.sub.param2=value2`.
    #[arg(value_name = "KEY=VALUE")]
    pub parameters: Vec<String>,
    /// Configuration file to load; repeat the flag to merge several files in
    /// the order given.
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Vec<Utf8PathBuf>,
    /// Save the final configuration as YAML.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,
    /// Print the final configuration but do not run the command.
    #[arg(short = 'd', long = "dry-run")]
    pub dry_run: bool,
    /// Draw the framed, pretty-printed configuration view (default).
    #[arg(long = "pretty", overrides_with = "no_pretty")]
    pub pretty: bool,
    /// Print bare trees without the frame.
    #[arg(long = "no-pretty", overrides_with = "pretty")]
    pub no_pretty: bool,
    /// Only print the first levels of the configuration tree.
    #[arg(short = 'L', long = "level", value_name = "DEPTH")]
    pub depth: Option<usize>,
}

impl ConfigArgs {
    /// Arguments carrying only dotted overrides.
    #[must_use]
    pub fn with_parameters<I, S>(parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parameters: parameters.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Whether the pretty panel should be drawn.
    #[must_use]
    pub const fn pretty_output(&self) -> bool {
        !self.no_pretty
    }
}
