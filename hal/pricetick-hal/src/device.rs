//! Device control

/// Device-level operations
pub trait Device {
    /// Restart the device
    ///
    /// Unconditional. No state is handed over to the next boot.
    fn restart(&mut self) -> !;
}
