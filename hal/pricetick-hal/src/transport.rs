//! HTTP transport abstractions
//!
//! A [`Transport`] owns the socket pool / TLS context and hands out
//! [`HttpSession`]s. Sessions are recreated after every link recovery
//! since the old sockets are bound to the dropped association.

/// Errors from the HTTP stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Request did not complete within the timeout
    Timeout,
    /// Socket could not be opened or the peer reset it
    Connection,
    /// TLS handshake failed
    Tls,
    /// Response body did not fit the provided buffer
    BodyTooLarge,
    /// No usable session (link down, pool exhausted)
    NoSession,
}

impl core::fmt::Display for TransportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransportError::Timeout => f.write_str("request timed out"),
            TransportError::Connection => f.write_str("connection failed"),
            TransportError::Tls => f.write_str("TLS handshake failed"),
            TransportError::BodyTooLarge => f.write_str("response body too large"),
            TransportError::NoSession => f.write_str("no transport session"),
        }
    }
}

/// Completed HTTP response
///
/// The body has been copied into the caller's buffer and the underlying
/// connection is already released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Number of body bytes written to the buffer
    pub body_len: usize,
}

impl Response {
    /// Check for a 200 OK status
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// One HTTP session (connection pool + TLS context)
pub trait HttpSession {
    /// Perform a GET request
    ///
    /// - `url`: Absolute https URL
    /// - `timeout_ms`: Upper bound for the whole round trip
    /// - `body`: Buffer receiving the response body
    fn get(&mut self, url: &str, timeout_ms: u32, body: &mut [u8])
        -> Result<Response, TransportError>;
}

/// Session factory bound to the current link
pub trait Transport {
    /// Session type handed out by this transport
    type Session: HttpSession;

    /// Create a fresh session on the current link
    fn create_session(&mut self) -> Result<Self::Session, TransportError>;
}
