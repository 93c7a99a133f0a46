//! Pricetick - desktop runner
//!
//! Runs the ticker's poll loop on a regular machine: HTTPS via reqwest,
//! local time via chrono and the matrix panel rendered as one line of
//! 24-bit colored terminal text.
//!
//! The host has no radio. The link is emulated by resolving the quote host,
//! so a dropped network still walks the full recovery path. A hard restart
//! exits with [`platform::RESTART_EXIT_CODE`] for a supervisor to act on.
//!
//! ```bash
//! RUST_LOG=debug cargo run -p pricetick-host
//! ```

mod error;
mod platform;

use std::env;

use log::info;
use pricetick_core::config::Credentials;
use pricetick_core::{PollLoop, Settings};

use crate::platform::{HttpTransport, ProbeLink, ProcessDevice, SystemClock, TerminalMatrix};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Only forwarded to the link contract; the probe link ignores them
    let ssid = env::var("PRICETICK_SSID").unwrap_or_else(|_| "pricetick".to_string());
    let password = env::var("PRICETICK_PASSWORD").unwrap_or_default();

    let settings = Settings::default();
    info!("Quote endpoint: {}", settings.url);

    let poll = PollLoop::new(
        ProbeLink::for_url(settings.url),
        HttpTransport::new(),
        SystemClock::new(),
        TerminalMatrix::new(),
        ProcessDevice,
        Credentials {
            ssid: &ssid,
            password: &password,
        },
        settings,
    );

    poll.run()
}
