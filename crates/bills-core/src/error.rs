//! Error type returned by handlers and middleware.
//!
//! A [`BillsError`] is either a typed [`Problem`] that is rendered as-is, or
//! an opaque failure that the dispatcher turns into an internal server error
//! carrying the failure's message.

use crate::Problem;
use std::fmt::{Debug, Display};
use thiserror::Error;

/// Result type alias using [`BillsError`].
pub type BillsResult<T> = Result<T, BillsError>;

/// Failure of a handler or middleware layer.
///
/// # Example
///
/// ```
/// use bills_core::{BillsError, Problem};
///
/// let typed: BillsError = Problem::bad_request("no").into();
/// assert_eq!(typed.into_problem().code, 400);
///
/// let opaque = BillsError::msg("storage unavailable");
/// let problem = opaque.into_problem();
/// assert_eq!(problem.code, 500);
/// assert_eq!(problem.message, "storage unavailable");
/// ```
#[derive(Error, Debug)]
pub enum BillsError {
    /// A client-facing problem, rendered unchanged.
    #[error(transparent)]
    Problem(#[from] Problem),

    /// Any other failure.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl BillsError {
    /// Wraps an arbitrary error as an internal failure.
    pub fn internal<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Internal(anyhow::Error::new(error))
    }

    /// Builds an internal failure from a message.
    pub fn msg<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::Internal(anyhow::Error::msg(message))
    }

    /// Returns `true` for typed problems.
    #[must_use]
    pub const fn is_problem(&self) -> bool {
        matches!(self, Self::Problem(_))
    }

    /// Converts into the problem answered to the client.
    #[must_use]
    pub fn into_problem(self) -> Problem {
        match self {
            Self::Problem(problem) => problem,
            Self::Internal(error) => Problem::internal_server_error_with(error.to_string()),
        }
    }
}
