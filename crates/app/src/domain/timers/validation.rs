//! Timer Validation Errors

use std::slice::Iter;

use serde::Serialize;
use smallvec::SmallVec;
use thiserror::Error;

/// A single rejected field and the message shown to the merchant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Ordered list of field errors, in the order the checks ran.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("validation failed")]
pub struct ValidationErrors {
    errors: SmallVec<[FieldError; 4]>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list holding one error.
    #[must_use]
    pub fn single(field: &'static str, message: &'static str) -> Self {
        let mut errors = Self::new();

        errors.push(field, message);

        errors
    }

    pub fn push(&mut self, field: &'static str, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message of the first recorded error.
    #[must_use]
    pub fn first_message(&self) -> Option<&'static str> {
        self.errors.first().map(|error| error.message)
    }

    pub fn messages(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.iter().map(|error| error.message)
    }

    pub fn iter(&self) -> Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing was recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one error was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
