//! Convenience constructors returning shared errors.

use std::sync::Arc;

use camino::Utf8Path;

use super::ConfigueError;

impl ConfigueError {
    /// Shared [`ConfigueError::MissingMandatoryValue`] for `path`.
    #[must_use]
    pub fn missing_value(path: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::MissingMandatoryValue { path: path.into() })
    }

    /// Shared [`ConfigueError::File`] for a configuration path.
    pub fn file(
        path: &Utf8Path,
        err: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Arc<Self> {
        Arc::new(Self::File {
            path: path.to_path_buf(),
            source: err.into(),
        })
    }

    /// Shared [`ConfigueError::InvalidOverride`].
    #[must_use]
    pub fn invalid_override(entry: &str, reason: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::InvalidOverride {
            entry: entry.to_owned(),
            reason: reason.into(),
        })
    }

    /// Shared [`ConfigueError::UnsupportedType`].
    #[must_use]
    pub fn unsupported(type_name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::UnsupportedType {
            type_name: type_name.into(),
        })
    }

    /// Whether this error means "treat the value as an opaque leaf".
    #[must_use]
    pub const fn is_unsupported_type(&self) -> bool {
        matches!(self, Self::UnsupportedType { .. })
    }
}
