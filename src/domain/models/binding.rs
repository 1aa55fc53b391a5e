//! Model Binding Outcomes
//!
//! The result of turning a request into a typed, validated input model.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

/// Outcome of binding and validating a request model
#[derive(Debug)]
pub enum BindOutcome<T> {
    /// The request bound and passed every validation rule
    Bound(T),
    /// The request could not be parsed into the model shape
    BindingFailed(String),
    /// The request parsed but broke one or more validation rules
    ValidationFailed(ValidationErrors),
}

impl<T> BindOutcome<T> {
    /// Run validation over a freshly bound model
    pub fn validated(model: T) -> Self
    where
        T: Validate,
    {
        match model.validate() {
            Ok(()) => Self::Bound(model),
            Err(errors) => Self::ValidationFailed(errors),
        }
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound(_))
    }
}

/// Input type of handlers that take no model
///
/// Deserializes from any payload and has no validation rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct NoInput {}

impl Validate for NoInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}
