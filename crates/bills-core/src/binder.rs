//! Request body binding.
//!
//! [`Binder::read_body`] decodes a JSON body into a target type and validates
//! it. Decoding failures become a malformed-request [`Problem`]; rule
//! violations become one invalid-request [`Problem`] listing every field.

use crate::validate::{Validate, Validator};
use crate::Problem;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Decodes and validates request bodies.
///
/// Built once at startup; every request context shares it.
#[derive(Debug, Clone, Default)]
pub struct Binder {
    validator: Arc<Validator>,
}

impl Binder {
    /// Creates a binder around a shared validator.
    #[must_use]
    pub fn new(validator: Arc<Validator>) -> Self {
        Self { validator }
    }

    /// The validator used by [`Binder::check`].
    #[must_use]
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Decodes `body` as JSON into `T` and validates it.
    ///
    /// An empty body is not decoded; `T::default()` is validated instead.
    pub fn read_body<T>(&self, body: &[u8]) -> Result<T, Problem>
    where
        T: DeserializeOwned + Validate + Default,
    {
        let value: T = if body.is_empty() {
            T::default()
        } else {
            serde_json::from_slice(body).map_err(|error| {
                tracing::debug!(error = %error, "request body could not be decoded");
                Problem::malformed_request()
            })?
        };

        self.check(&value)?;
        Ok(value)
    }

    /// Validates an already decoded value.
    pub fn check<T: Validate>(&self, value: &T) -> Result<(), Problem> {
        let details = self.validator.validate(value);
        if details.is_empty() {
            Ok(())
        } else {
            Err(Problem::invalid_request(&details))
        }
    }
}
