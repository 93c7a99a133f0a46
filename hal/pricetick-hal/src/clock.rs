//! Time sources
//!
//! Monotonic time drives the poll interval; local wall-clock hour drives
//! night dimming. Wall-clock synchronization is the platform's job.

/// Platform clock
pub trait Clock {
    /// Milliseconds since an arbitrary fixed point, never decreasing
    fn monotonic_ms(&self) -> u64;

    /// Current local hour (0-23)
    fn local_hour(&self) -> u8;

    /// Block for the given number of milliseconds
    fn delay_ms(&mut self, ms: u32);
}
