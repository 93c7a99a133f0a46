//! Host adapter errors
//!
//! The platform adapters fail with [`HostError`]; at the trait boundary it
//! is folded into the HAL's error enums the core understands.

use std::io;

use pricetick_hal::{LinkError, TransportError};
use thiserror::Error;

/// Errors raised by the host platform adapters
#[derive(Error, Debug)]
pub enum HostError {
    /// HTTP client failure (connect, TLS, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Socket or name resolution failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Name resolved to no address
    #[error("Host has no address: {0}")]
    NoAddress(String),

    /// Response larger than the caller's buffer
    #[error("Response body of {size} bytes exceeds {capacity} byte buffer")]
    BodyTooLarge {
        /// Received body size
        size: usize,
        /// Buffer capacity
        capacity: usize,
    },
}

impl From<HostError> for TransportError {
    fn from(err: HostError) -> Self {
        match err {
            HostError::Http(err) if err.is_timeout() => TransportError::Timeout,
            HostError::Http(err) if err.is_builder() => TransportError::Tls,
            HostError::Http(_) | HostError::Io(_) | HostError::NoAddress(_) => {
                TransportError::Connection
            }
            HostError::BodyTooLarge { .. } => TransportError::BodyTooLarge,
        }
    }
}

impl From<HostError> for LinkError {
    fn from(err: HostError) -> Self {
        match err {
            HostError::Io(err) if err.kind() == io::ErrorKind::TimedOut => LinkError::Timeout,
            _ => LinkError::AssociationFailed,
        }
    }
}
