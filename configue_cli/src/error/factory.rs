//! Failures raised by self-referential default factories.

use thiserror::Error;

/// Reasons a factory cannot produce a value yet.
///
/// The traverser recovers from every variant locally: the affected field
/// falls back to its override or to the missing marker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FactoryError {
    /// The sibling has not been resolved before the factory ran.
    #[error("field `{field}` is not set yet")]
    Unset {
        /// Sibling field name.
        field: String,
    },

    /// The sibling is resolved to the missing marker.
    #[error("field `{field}` is missing")]
    Missing {
        /// Sibling field name.
        field: String,
    },

    /// The sibling value or the produced value was rejected.
    #[error("field `{field}` rejected: {message}")]
    Rejected {
        /// Field whose value was rejected.
        field: String,
        /// Conversion diagnostic.
        message: String,
    },
}

impl FactoryError {
    /// Build a [`FactoryError::Rejected`] from any displayable diagnostic.
    pub fn rejected(field: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Rejected {
            field: field.into(),
            message: message.to_string(),
        }
    }

    /// Name of the field the failure refers to.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Unset { field } | Self::Missing { field } | Self::Rejected { field, .. } => field,
        }
    }
}
