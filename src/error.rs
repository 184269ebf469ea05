//! Error types shared by the receipt operations.
//!
//! Internal code uses `anyhow` through the `Result` alias. Operations that answer a caller return
//! a `ServiceError`, which carries an `ErrorType` so the transport knows how to respond.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The public result type of the receipt operations.
pub type Res<T> = std::result::Result<T, ServiceError>;

/// Classifies a failure by who is responsible for it and how a caller should react.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The receipt failed a format check.
    Rejected,
    /// No receipt is stored under the requested identifier.
    NotFound,
    /// The request itself could not be understood, e.g. the body was not JSON.
    Request,
    /// The request body was over the size limit.
    TooLarge,
    /// Something went wrong on our side.
    Internal,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// An error returned from a receipt operation.
pub struct ServiceError {
    error_type: ErrorType,
    error: Error,
}

impl ServiceError {
    pub fn new(error_type: ErrorType, error: impl Into<Error>) -> Self {
        Self {
            error_type,
            error: error.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(ErrorType::NotFound, anyhow::anyhow!(NOT_FOUND_MESSAGE))
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    /// The underlying error, e.g. for downcasting to `ValidationError`.
    pub fn inner(&self) -> &Error {
        &self.error
    }
}

pub(crate) const NOT_FOUND_MESSAGE: &str = "No receipt found for that id";

impl Debug for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {:?}", self.error_type, self.error)
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.error, f)
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.error)
    }
}

/// Attaches an `ErrorType` to an internal result.
pub trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Res<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Res<T> {
        self.map_err(|e| ServiceError::new(error_type, e))
    }
}
