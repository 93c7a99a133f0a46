//! Host implementations of the platform traits

use std::io::{self, Write};
use std::net::ToSocketAddrs;
use std::process;
use std::thread;
use std::time::{Duration, Instant};

use chrono::{Local, Timelike};
use log::{debug, error, warn};
use pricetick_hal::{
    Clock, Device, HttpSession, Link, LinkError, MatrixDisplay, Response, Slot, Transport,
    TransportError,
};

use crate::error::HostError;

/// Exit code asking the supervisor to start the ticker again (EX_TEMPFAIL)
pub const RESTART_EXIT_CODE: i32 = 75;

/// Extract the host name from an absolute URL
fn host_of(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let authority = rest.split('/').next().unwrap_or(rest);
    authority.split(':').next().unwrap_or(authority)
}

/// Link emulated by resolving the quote host
pub struct ProbeLink {
    host: String,
    enabled: bool,
    connected: bool,
}

impl ProbeLink {
    /// Probe the host of `url`
    pub fn for_url(url: &str) -> Self {
        Self {
            host: host_of(url).to_string(),
            enabled: false,
            connected: false,
        }
    }

    fn probe(&self) -> Result<(), HostError> {
        let mut addrs = (self.host.as_str(), 443).to_socket_addrs()?;
        match addrs.next() {
            Some(addr) => {
                debug!("{} resolves to {}", self.host, addr);
                Ok(())
            }
            None => Err(HostError::NoAddress(self.host.clone())),
        }
    }
}

impl Link for ProbeLink {
    fn set_enabled(&mut self, enabled: bool) -> Result<(), LinkError> {
        debug!("Link {}", if enabled { "enabled" } else { "disabled" });
        self.enabled = enabled;
        if !enabled {
            self.connected = false;
        }
        Ok(())
    }

    fn connect(&mut self, ssid: &str, _password: &str) -> Result<(), LinkError> {
        if !self.enabled {
            return Err(LinkError::RadioDisabled);
        }
        debug!("Associating with '{}'", ssid);
        self.probe().map_err(|err| {
            warn!("Link probe failed: {}", err);
            LinkError::from(err)
        })?;
        self.connected = true;
        Ok(())
    }
}

/// HTTPS transport backed by a blocking reqwest client
pub struct HttpTransport {
    user_agent: String,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    /// Create the transport
    pub fn new() -> Self {
        Self {
            user_agent: format!("pricetick/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// One reqwest client (connection pool + TLS config)
pub struct HttpsSession {
    client: reqwest::blocking::Client,
}

impl Transport for HttpTransport {
    type Session = HttpsSession;

    fn create_session(&mut self) -> Result<HttpsSession, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(|err| {
                error!("HTTP client setup failed: {}", err);
                TransportError::from(HostError::from(err))
            })?;
        Ok(HttpsSession { client })
    }
}

impl HttpsSession {
    fn fetch(&mut self, url: &str, timeout_ms: u32, body: &mut [u8]) -> Result<Response, HostError> {
        let response = self
            .client
            .get(url)
            .timeout(Duration::from_millis(u64::from(timeout_ms)))
            .send()?;
        let status = response.status().as_u16();
        let bytes = response.bytes()?;

        if bytes.len() > body.len() {
            return Err(HostError::BodyTooLarge {
                size: bytes.len(),
                capacity: body.len(),
            });
        }
        body[..bytes.len()].copy_from_slice(&bytes);

        Ok(Response {
            status,
            body_len: bytes.len(),
        })
    }
}

impl HttpSession for HttpsSession {
    fn get(
        &mut self,
        url: &str,
        timeout_ms: u32,
        body: &mut [u8],
    ) -> Result<Response, TransportError> {
        self.fetch(url, timeout_ms, body).map_err(|err| {
            debug!("GET {} failed: {}", url, err);
            TransportError::from(err)
        })
    }
}

/// Monotonic time since startup plus the local wall clock
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    /// Start counting now
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn monotonic_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn local_hour(&self) -> u8 {
        Local::now().hour() as u8
    }

    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

/// The matrix rendered as a single terminal line
pub struct TerminalMatrix {
    texts: [String; 3],
    colors: [u32; 3],
}

impl Default for TerminalMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalMatrix {
    /// Blank panel
    pub fn new() -> Self {
        Self {
            texts: Default::default(),
            colors: [0; 3],
        }
    }

    /// Compose the line: high, price, low in 24-bit color
    fn compose(&self) -> String {
        let mut line = String::from("\r\x1b[2K");
        for slot in Slot::ALL {
            let row = slot.row();
            let rgb = self.colors[row];
            line.push_str(&format!(
                "\x1b[38;2;{};{};{}m{:<12}\x1b[0m",
                (rgb >> 16) & 0xFF,
                (rgb >> 8) & 0xFF,
                rgb & 0xFF,
                self.texts[row]
            ));
        }
        line
    }

    fn redraw(&self) {
        let mut stdout = io::stdout().lock();
        if let Err(err) = stdout
            .write_all(self.compose().as_bytes())
            .and_then(|()| stdout.flush())
        {
            debug!("Terminal write failed: {}", err);
        }
    }
}

impl MatrixDisplay for TerminalMatrix {
    fn set_text(&mut self, slot: Slot, text: &str) {
        self.texts[slot.row()] = text.to_string();
        self.redraw();
    }

    fn set_color(&mut self, slot: Slot, rgb: u32) {
        self.colors[slot.row()] = rgb;
        self.redraw();
    }
}

/// Restart by exiting the process
pub struct ProcessDevice;

impl Device for ProcessDevice {
    fn restart(&mut self) -> ! {
        error!("Exiting with code {} for restart", RESTART_EXIT_CODE);
        println!();
        process::exit(RESTART_EXIT_CODE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_of() {
        assert_eq!(
            host_of("https://api.bybit.com/v5/market/tickers?category=linear"),
            "api.bybit.com"
        );
        assert_eq!(host_of("http://localhost:8080/x"), "localhost");
        assert_eq!(host_of("example.org"), "example.org");
    }

    #[test]
    fn test_link_requires_radio() {
        let mut link = ProbeLink::for_url("https://localhost/");
        assert_eq!(link.connect("ssid", ""), Err(LinkError::RadioDisabled));
        assert!(!link.connected);
    }

    #[test]
    fn test_terminal_line_order_and_color() {
        let mut matrix = TerminalMatrix::new();
        matrix.texts = ["H:66000 $".into(), "65'000$".into(), "L:64000 $".into()];
        matrix.colors = [0x006400, 0xA36C00, 0x8B0000];

        let line = matrix.compose();
        let high = line.find("H:66000").unwrap();
        let price = line.find("65'000$").unwrap();
        let low = line.find("L:64000").unwrap();
        assert!(high < price && price < low);
        assert!(line.contains("\x1b[38;2;163;108;0m"));
    }
}
