//! Fixed ticker settings
//!
//! Nothing here is runtime-configurable; [`Settings::default`] is what the
//! device runs with. The struct exists so tests can shorten timings.

use crate::color::Color;

/// Quote endpoint (linear BTCUSDT perpetual ticker)
pub const TICKER_URL: &str =
    "https://api.bybit.com/v5/market/tickers?category=linear&symbol=BTCUSDT";

/// Time between fetches
pub const POLL_INTERVAL_MS: u32 = 6_000;

/// Upper bound for one HTTP round trip
pub const FETCH_TIMEOUT_MS: u32 = 5_000;

/// Idle time between loop iterations
pub const IDLE_MS: u32 = 100;

/// Consecutive failures before the error is shown and the link is reset
pub const MAX_FAILED_ATTEMPTS: u8 = 3;

/// Link resets without an intervening success before the device restarts
pub const MAX_RECOVERY_ATTEMPTS: u8 = 3;

/// Total rollover animation time
pub const ANIMATION_DURATION_MS: u32 = 1_000;

/// Rollover animation frames (excluding the final settle frame)
pub const ANIMATION_STEPS: u8 = 10;

/// First local hour rendered dimmed
pub const NIGHT_START_HOUR: u8 = 21;

/// Channel multiplier applied at night
pub const DIM_FACTOR: f64 = 0.1;

/// Overall association timeout
pub const CONNECT_TIMEOUT_MS: u32 = 20_000;

/// Pause after a failed association attempt
pub const CONNECT_RETRY_MS: u32 = 1_000;

/// Radio off time during a link reset
pub const RADIO_OFF_MS: u32 = 1_000;

/// Splash hold time at boot
pub const SPLASH_MS: u32 = 2_000;

/// Splash text shown at boot
pub const SPLASH_TEXT: &str = "BTC-$";

/// Price slot text when no price was ever shown
pub const PLACEHOLDER_TEXT: &str = "BTC-USD";

/// Shown when the initial association fails
pub const LINK_ERROR_TEXT: &str = "WiFi Error";

/// Maximum response body size
pub const BODY_BUFFER_LEN: usize = 4096;

/// Access point credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials<'a> {
    /// Network name
    pub ssid: &'a str,
    /// WPA passphrase
    pub password: &'a str,
}

/// Palette used by the color policy
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Palette {
    /// No change / first value (orange)
    pub neutral: Color,
    /// Price went up (dark green)
    pub up: Color,
    /// Price went down (dark red)
    pub down: Color,
    /// 24h high label
    pub high: Color,
    /// 24h low label
    pub low: Color,
    /// Transient error text (never dimmed)
    pub error: Color,
    /// Boot splash
    pub splash: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            neutral: Color::new(0xA36C00),
            up: Color::new(0x006400),
            down: Color::new(0x8B0000),
            high: Color::new(0x006400),
            low: Color::new(0x8B0000),
            error: Color::new(0xFF0000),
            splash: Color::new(0x00FF00),
        }
    }
}

/// All tunables of the ticker
#[derive(Debug, Clone)]
pub struct Settings {
    /// Quote endpoint
    pub url: &'static str,
    /// Time between fetches
    pub poll_interval_ms: u32,
    /// HTTP round trip timeout
    pub fetch_timeout_ms: u32,
    /// Idle time between loop iterations
    pub idle_ms: u32,
    /// Failure threshold
    pub max_failed_attempts: u8,
    /// Link reset budget
    pub max_recovery_attempts: u8,
    /// Total rollover animation time
    pub animation_duration_ms: u32,
    /// Rollover frames
    pub animation_steps: u8,
    /// First dimmed hour
    pub night_start_hour: u8,
    /// Night channel multiplier (0 < factor < 1)
    pub dim_factor: f64,
    /// Overall association timeout
    pub connect_timeout_ms: u32,
    /// Pause between association attempts
    pub connect_retry_ms: u32,
    /// Radio off time during reset
    pub radio_off_ms: u32,
    /// Splash hold time
    pub splash_ms: u32,
    /// Colors
    pub palette: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: TICKER_URL,
            poll_interval_ms: POLL_INTERVAL_MS,
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
            idle_ms: IDLE_MS,
            max_failed_attempts: MAX_FAILED_ATTEMPTS,
            max_recovery_attempts: MAX_RECOVERY_ATTEMPTS,
            animation_duration_ms: ANIMATION_DURATION_MS,
            animation_steps: ANIMATION_STEPS,
            night_start_hour: NIGHT_START_HOUR,
            dim_factor: DIM_FACTOR,
            connect_timeout_ms: CONNECT_TIMEOUT_MS,
            connect_retry_ms: CONNECT_RETRY_MS,
            radio_off_ms: RADIO_OFF_MS,
            splash_ms: SPLASH_MS,
            palette: Palette::default(),
        }
    }
}

impl Settings {
    /// Delay between animation frames
    pub fn step_ms(&self) -> u32 {
        self.animation_duration_ms / u32::from(self.animation_steps.max(1))
    }
}
