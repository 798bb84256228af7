//! Schema-driven configuration synthesis for command-line applications.
//!
//! A [`Structured`] type describes its fields and their defaults. The
//! traverser walks that description and produces a [`ConfigModel`] skeleton
//! whose leaves are resolved defaults or [`MISSING`]. Skeletons are layered
//! with configuration files and dotted command-line overrides through
//! [`ConfigModel::merge`], rendered as a tree, dumped back to YAML, and
//! finally deserialized into the target type.
//!
//! ```rust
//! use configue_cli::{ConfigModel, ListMergeMode, Structured};
//!
//! #[derive(Structured, serde::Deserialize)]
//! struct Settings {
//!     name: String,
//!     #[configue(default = 3)]
//!     retries: u32,
//! }
//!
//! let mut config = ConfigModel::from_type::<Settings>(None)?;
//! config.remove(configue_cli::CONSTRUCTOR_KEY);
//! config.merge([&ConfigModel::from_dotlist(["name=demo"])?], ListMergeMode::Replace);
//! let settings: Settings = config.instantiate()?;
//! assert_eq!(settings.retries, 3);
//! # Ok::<_, std::sync::Arc<configue_cli::ConfigueError>>(())
//! ```

extern crate self as configue_cli;

pub use configue_cli_macros::Structured;

pub mod cli;
mod dump;
mod error;
mod file;
pub mod logging;
mod missing;
mod model;
pub mod render;
mod result_ext;
pub mod schema;
mod traverse;
mod value;

pub use cli::{ConfigArgs, Injector};
pub use dump::dump;
pub use error::{ConfigueError, FactoryError};
pub use file::load_config_file;
pub use missing::{MISSING, Missing};
pub use model::{CONSTRUCTOR_KEY, ConfigModel, ListMergeMode};
pub use result_ext::ConfigueResultExt;
pub use schema::{Instance, Record, Shadow, Structured, ToInstance, TypeDescriptor, TypeRef};
pub use traverse::{traverse_instance, traverse_type};
pub use value::{ConfigValue, Reference, parse_literal};

use std::sync::Arc;

/// Result alias used across the crate.
pub type ConfigueResult<T> = Result<T, Arc<ConfigueError>>;
