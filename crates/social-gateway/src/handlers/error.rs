//! Handler error types

use crate::protocol::CloseCode;
use social_core::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandlerError {
    /// The frame's `d` did not match the op's payload
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Repository failure while handling a frame
    #[error("Domain error: {0}")]
    DomainError(#[from] DomainError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Close code the socket is closed with
    #[must_use]
    pub const fn to_close_code(&self) -> CloseCode {
        match self {
            Self::InvalidPayload(_) => CloseCode::DecodeError,
            Self::DomainError(_) | Self::Internal(_) => CloseCode::UnknownError,
        }
    }
}

pub type HandlerResult<T> = Result<T, HandlerError>;
