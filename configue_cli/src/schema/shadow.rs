//! Scratch record visible to self-referential factories.

use serde::de::DeserializeOwned;
use tracing::debug;

use super::{Converter, Instance, Record};
use crate::FactoryError;

/// Partially built record of the type being traversed.
///
/// Fields are assigned in declaration order, so a factory only sees siblings
/// declared before its own field. The shadow is discarded once traversal
/// finishes.
#[derive(Clone, Debug)]
pub struct Shadow {
    record: Record,
}

impl Shadow {
    pub(crate) fn new(type_name: &str) -> Self {
        Self {
            record: Record::named(type_name.to_owned()),
        }
    }

    /// Name of the type under construction.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.record.type_name()
    }

    /// Whether `field` has been assigned.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.record.contains(field)
    }

    /// Raw value of an earlier sibling. Missing values are passed through.
    ///
    /// # Errors
    ///
    /// [`FactoryError::Unset`] when the sibling has not been assigned.
    pub fn field(&self, field: &str) -> Result<&Instance, FactoryError> {
        self.record.get(field).ok_or_else(|| FactoryError::Unset {
            field: field.to_owned(),
        })
    }

    /// Typed value of an earlier sibling.
    ///
    /// # Errors
    ///
    /// [`FactoryError::Unset`] when the sibling is not assigned,
    /// [`FactoryError::Missing`] when it still holds the missing marker and
    /// [`FactoryError::Rejected`] when it does not deserialize into `T`.
    pub fn get<T: DeserializeOwned>(&self, field: &str) -> Result<T, FactoryError> {
        self.field(field)?.decode(field)
    }

    pub(crate) fn assign(&mut self, field: &str, value: Instance, converter: Option<&Converter>) {
        let converted = match converter {
            Some(convert) => convert(&value),
            None => Ok(value),
        };
        match converted {
            Ok(stored) => self.record.set(field, stored),
            Err(err) => debug!(
                type_name = self.type_name(),
                field,
                error = %err,
                "converter rejected value; shadow field left unset"
            ),
        }
    }

    pub(crate) fn into_record(self) -> Record {
        self.record
    }
}
