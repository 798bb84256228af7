//! Primary error enum for configuration flows.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while building or finalising configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigueError {
    /// A type handed to the traverser does not describe its fields.
    #[error("unsupported structured type: {type_name}")]
    UnsupportedType {
        /// Name of the rejected type.
        type_name: String,
    },

    /// A leaf still holds the missing marker when a value is required.
    #[error("Missing mandatory value: {path}")]
    MissingMandatoryValue {
        /// Dotted path of the unresolved leaf.
        path: String,
    },

    /// The right-hand side of an override could not be parsed.
    #[error("failed to parse literal '{input}': {message}")]
    Literal {
        /// Raw text handed to the literal parser.
        input: String,
        /// Parser diagnostic.
        message: String,
    },

    /// A dotted override entry is malformed.
    #[error("invalid override '{entry}': {reason}")]
    InvalidOverride {
        /// Entry as supplied on the command line.
        entry: String,
        /// Human-readable explanation.
        reason: String,
    },

    /// A schema declares a field using the reserved constructor key.
    #[error("type {type_name} declares a field named `()`, which is reserved")]
    ReservedKey {
        /// Type whose descriptor is invalid.
        type_name: String,
    },

    /// Nested schemas recurse deeper than the traverser allows.
    #[error("schema nesting too deep while traversing {type_name}")]
    RecursionLimit {
        /// Type being traversed when the limit was hit.
        type_name: String,
    },

    /// Error originating from a configuration file.
    #[error("Configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: Utf8PathBuf,
        /// Underlying error reported by the file loader.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The finished configuration does not match the target type.
    #[error("failed to instantiate configuration: {0}")]
    Instantiate(#[from] serde_json::Error),

    /// The logging subtree could not be applied.
    #[error("invalid logging configuration: {message}")]
    Logging {
        /// Explanation of the failure.
        message: String,
    },

    /// Writing rendered or dumped output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
