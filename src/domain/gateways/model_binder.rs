//! Model Binder Gateway
//!
//! Abstract trait defining the contract for binding and validating input models.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::domain::models::binding::BindOutcome;

/// Binds a request context `C` into a validated model
#[async_trait]
pub trait ModelBinder<C>: Send + Sync
where
    C: Send + 'static,
{
    /// Bind the model, then run its validation rules
    ///
    /// Never fails outright: malformed input is reported as
    /// `BindOutcome::BindingFailed`, broken rules as
    /// `BindOutcome::ValidationFailed`.
    async fn bind_and_validate<T>(&self, context: C) -> BindOutcome<T>
    where
        T: DeserializeOwned + Validate + Send + 'static;
}
