//! Wireless link abstractions
//!
//! The link is the radio association with an access point. Implementations
//! only provide single primitives; retry policy lives in the core crate.

/// Errors from radio operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Access point not found or association rejected
    AssociationFailed,
    /// Radio is powered down
    RadioDisabled,
    /// Association did not complete within the allotted time
    Timeout,
    /// Radio driver fault
    Radio,
}

impl core::fmt::Display for LinkError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinkError::AssociationFailed => f.write_str("association failed"),
            LinkError::RadioDisabled => f.write_str("radio disabled"),
            LinkError::Timeout => f.write_str("link timeout"),
            LinkError::Radio => f.write_str("radio fault"),
        }
    }
}

/// Wireless link
pub trait Link {
    /// Power the radio up or down
    fn set_enabled(&mut self, enabled: bool) -> Result<(), LinkError>;

    /// Make one association attempt
    ///
    /// Returns once the station is associated and has an address, or
    /// with an error if this attempt failed.
    fn connect(&mut self, ssid: &str, password: &str) -> Result<(), LinkError>;
}
