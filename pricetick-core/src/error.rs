//! Poll failure taxonomy
//!
//! Every failed poll tick ends up as one [`PollError`]. The recovery
//! controller only looks at its [`FailureClass`], which selects the
//! on-screen label; the escalation arithmetic is the same for all classes.

use pricetick_hal::{LinkError, TransportError};

/// Why a poll tick failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollError {
    /// Radio association lost or could not be re-established
    LinkFailure(LinkError),
    /// Request failed before a response arrived
    TransportFailure(TransportError),
    /// Response arrived with a non-success status
    HttpStatus(u16),
    /// Response body is not a usable ticker payload
    DecodeFailure(DecodeError),
    /// Well-formed payload carrying a non-zero exchange return code
    ApplicationFailure(i64),
}

/// Why a response body could not be turned into a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Not JSON, or JSON of the wrong shape
    Malformed,
    /// Ticker list empty
    NoTicker,
    /// Price field is not a decimal number
    InvalidNumber,
    /// Price value negative or not finite
    OutOfRange,
}

/// Failure class shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FailureClass {
    /// Link, transport or HTTP status failure
    Connection,
    /// Payload could not be decoded
    Decode,
    /// Exchange reported an error
    Api,
}

impl FailureClass {
    /// Text shown on the price slot
    pub fn label(self) -> &'static str {
        match self {
            FailureClass::Connection => "Conn Error",
            FailureClass::Decode => "JSON Error",
            FailureClass::Api => "API Error",
        }
    }
}

impl PollError {
    /// Class used for the on-screen label
    pub fn class(&self) -> FailureClass {
        match self {
            PollError::LinkFailure(_)
            | PollError::TransportFailure(_)
            | PollError::HttpStatus(_) => FailureClass::Connection,
            PollError::DecodeFailure(_) => FailureClass::Decode,
            PollError::ApplicationFailure(_) => FailureClass::Api,
        }
    }
}

impl From<LinkError> for PollError {
    fn from(err: LinkError) -> Self {
        PollError::LinkFailure(err)
    }
}

impl From<TransportError> for PollError {
    fn from(err: TransportError) -> Self {
        PollError::TransportFailure(err)
    }
}

impl From<DecodeError> for PollError {
    fn from(err: DecodeError) -> Self {
        PollError::DecodeFailure(err)
    }
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeError::Malformed => f.write_str("malformed payload"),
            DecodeError::NoTicker => f.write_str("empty ticker list"),
            DecodeError::InvalidNumber => f.write_str("invalid price number"),
            DecodeError::OutOfRange => f.write_str("price out of range"),
        }
    }
}

impl core::fmt::Display for PollError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PollError::LinkFailure(err) => write!(f, "link failure: {}", err),
            PollError::TransportFailure(err) => write!(f, "transport failure: {}", err),
            PollError::HttpStatus(status) => write!(f, "HTTP status {}", status),
            PollError::DecodeFailure(err) => write!(f, "decode failure: {}", err),
            PollError::ApplicationFailure(code) => write!(f, "API error code {}", code),
        }
    }
}
