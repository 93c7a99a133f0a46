//! Link reconnect procedure
//!
//! Builds the association policy on top of the single-attempt
//! [`Link`] primitive: keep trying until the timeout, and power-cycle the
//! radio before reconnecting during recovery.

use log::{debug, info, warn};
use pricetick_hal::{Clock, Link, LinkError};

use crate::config::Credentials;

/// Association timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectPolicy {
    /// Give up after this long
    pub timeout_ms: u32,
    /// Pause after a failed attempt
    pub retry_ms: u32,
    /// Radio off time during a reset
    pub radio_off_ms: u32,
}

impl Default for ConnectPolicy {
    fn default() -> Self {
        Self {
            timeout_ms: crate::config::CONNECT_TIMEOUT_MS,
            retry_ms: crate::config::CONNECT_RETRY_MS,
            radio_off_ms: crate::config::RADIO_OFF_MS,
        }
    }
}

/// Associate with the access point, retrying until the timeout
pub fn connect<L: Link, C: Clock>(
    link: &mut L,
    clock: &mut C,
    credentials: &Credentials<'_>,
    policy: &ConnectPolicy,
) -> Result<(), LinkError> {
    info!("Connecting to '{}'", credentials.ssid);
    link.set_enabled(true)?;

    let start = clock.monotonic_ms();
    while clock.monotonic_ms().saturating_sub(start) < u64::from(policy.timeout_ms) {
        match link.connect(credentials.ssid, credentials.password) {
            Ok(()) => {
                info!("Link up");
                return Ok(());
            }
            Err(err) => {
                debug!("Association attempt failed: {}", err);
                clock.delay_ms(policy.retry_ms);
            }
        }
    }

    warn!("Link connect timed out after {} ms", policy.timeout_ms);
    Err(LinkError::Timeout)
}

/// Power-cycle the radio and reconnect
pub fn reset<L: Link, C: Clock>(
    link: &mut L,
    clock: &mut C,
    credentials: &Credentials<'_>,
    policy: &ConnectPolicy,
) -> Result<(), LinkError> {
    info!("Resetting link");
    link.set_enabled(false)?;
    clock.delay_ms(policy.radio_off_ms);
    connect(link, clock, credentials, policy)
}

#[cfg(test)]
pub(crate) mod mock {
    use core::cell::Cell;

    use pricetick_hal::{Clock, Link, LinkError};

    /// Clock that advances only when delayed
    pub struct MockClock {
        pub now_ms: Cell<u64>,
        pub hour: u8,
        pub slept_ms: u64,
    }

    impl MockClock {
        pub fn new(hour: u8) -> Self {
            Self {
                now_ms: Cell::new(0),
                hour,
                slept_ms: 0,
            }
        }

        pub fn advance(&self, ms: u64) {
            self.now_ms.set(self.now_ms.get() + ms);
        }
    }

    impl Clock for MockClock {
        fn monotonic_ms(&self) -> u64 {
            self.now_ms.get()
        }

        fn local_hour(&self) -> u8 {
            self.hour
        }

        fn delay_ms(&mut self, ms: u32) {
            self.slept_ms += u64::from(ms);
            self.advance(u64::from(ms));
        }
    }

    /// Link that fails a scripted number of attempts
    pub struct MockLink {
        pub enabled: bool,
        pub connected: bool,
        pub fail_attempts: u32,
        pub down: bool,
        pub attempts: u32,
        pub power_cycles: u32,
    }

    impl MockLink {
        pub fn new(fail_attempts: u32) -> Self {
            Self {
                enabled: false,
                connected: false,
                fail_attempts,
                down: false,
                attempts: 0,
                power_cycles: 0,
            }
        }
    }

    impl Link for MockLink {
        fn set_enabled(&mut self, enabled: bool) -> Result<(), LinkError> {
            if !enabled {
                self.power_cycles += 1;
                self.connected = false;
            }
            self.enabled = enabled;
            Ok(())
        }

        fn connect(&mut self, _ssid: &str, _password: &str) -> Result<(), LinkError> {
            if !self.enabled {
                return Err(LinkError::RadioDisabled);
            }
            self.attempts += 1;
            if self.down || self.attempts <= self.fail_attempts {
                return Err(LinkError::AssociationFailed);
            }
            self.connected = true;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{MockClock, MockLink};
    use super::*;

    const CREDS: Credentials<'static> = Credentials {
        ssid: "ticker",
        password: "secret",
    };

    #[test]
    fn test_connect_first_try() {
        let mut link = MockLink::new(0);
        let mut clock = MockClock::new(12);
        connect(&mut link, &mut clock, &CREDS, &ConnectPolicy::default()).unwrap();
        assert!(link.connected);
        assert_eq!(link.attempts, 1);
        assert_eq!(clock.slept_ms, 0);
    }

    #[test]
    fn test_connect_retries_until_success() {
        let mut link = MockLink::new(4);
        let mut clock = MockClock::new(12);
        connect(&mut link, &mut clock, &CREDS, &ConnectPolicy::default()).unwrap();
        assert_eq!(link.attempts, 5);
        assert_eq!(clock.slept_ms, 4_000);
    }

    #[test]
    fn test_connect_times_out() {
        let mut link = MockLink::new(u32::MAX);
        let mut clock = MockClock::new(12);
        let result = connect(&mut link, &mut clock, &CREDS, &ConnectPolicy::default());
        assert_eq!(result, Err(LinkError::Timeout));
        assert_eq!(link.attempts, 20);
    }

    #[test]
    fn test_reset_power_cycles() {
        let mut link = MockLink::new(0);
        let mut clock = MockClock::new(12);
        reset(&mut link, &mut clock, &CREDS, &ConnectPolicy::default()).unwrap();
        assert_eq!(link.power_cycles, 1);
        assert_eq!(clock.slept_ms, 1_000);
        assert!(link.connected);
    }
}
