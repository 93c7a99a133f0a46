//! Ticker response decoding
//!
//! Turns the exchange's v5 ticker envelope into a validated [`Quote`]:
//!
//! ```json
//! {"retCode":0,"retMsg":"OK","result":{"list":[
//!     {"lastPrice":"65000.40","highPrice24h":"66100.00","lowPrice24h":"64050.10"}
//! ]}}
//! ```
//!
//! Prices arrive as decimal strings.

use alloc::string::String;
use alloc::vec::Vec;

use log::warn;
use serde::Deserialize;

use crate::error::{DecodeError, PollError};

/// One fetched price snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Quote {
    /// Last traded price
    pub last_price: f64,
    /// 24h high
    pub high_24h: f64,
    /// 24h low
    pub low_24h: f64,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "retCode")]
    ret_code: i64,
    #[serde(rename = "retMsg", default)]
    ret_msg: String,
    #[serde(default)]
    result: Option<TickerList>,
}

#[derive(Deserialize)]
struct TickerList {
    #[serde(default)]
    list: Vec<TickerEntry>,
}

#[derive(Deserialize)]
struct TickerEntry {
    #[serde(rename = "lastPrice")]
    last_price: String,
    #[serde(rename = "highPrice24h")]
    high_price_24h: String,
    #[serde(rename = "lowPrice24h")]
    low_price_24h: String,
}

/// Largest accepted price; above this the integer part no longer fits `i64`
const MAX_PRICE: f64 = i64::MAX as f64;

/// Parse one decimal price field
fn parse_price(text: &str) -> Result<f64, DecodeError> {
    let value: f64 = text.trim().parse().map_err(|_| DecodeError::InvalidNumber)?;
    if !value.is_finite() || value < 0.0 || value >= MAX_PRICE {
        return Err(DecodeError::OutOfRange);
    }
    Ok(value)
}

impl Quote {
    /// Decode a response body
    ///
    /// A non-zero return code is an application failure even when the rest
    /// of the payload is well-formed.
    pub fn decode(body: &[u8]) -> Result<Self, PollError> {
        let envelope: Envelope =
            serde_json::from_slice(body).map_err(|_| DecodeError::Malformed)?;

        if envelope.ret_code != 0 {
            warn!(
                "Exchange error {}: {}",
                envelope.ret_code,
                envelope.ret_msg.as_str()
            );
            return Err(PollError::ApplicationFailure(envelope.ret_code));
        }

        let ticker = envelope
            .result
            .and_then(|result| result.list.into_iter().next())
            .ok_or(DecodeError::NoTicker)?;

        Ok(Self {
            last_price: parse_price(&ticker.last_price)?,
            high_24h: parse_price(&ticker.high_price_24h)?,
            low_24h: parse_price(&ticker.low_price_24h)?,
        })
    }
}
