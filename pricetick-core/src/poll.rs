//! Poll loop
//!
//! Owns every piece of mutable runtime state: the transport session, the
//! last rendered texts and the failure counters. Each due tick fetches one
//! quote; success renders it, failure is handed to the
//! [`RecoveryController`] and the resulting actions are executed here.

use log::{debug, error, info, warn};
use pricetick_hal::{Clock, Device, HttpSession, Link, MatrixDisplay, Slot, Transport, TransportError};

use crate::animation::Rollover;
use crate::color::{self, Color};
use crate::config::{
    Credentials, Settings, BODY_BUFFER_LEN, LINK_ERROR_TEXT, PLACEHOLDER_TEXT, SPLASH_TEXT,
};
use crate::error::PollError;
use crate::format::{format_price, tagged_extreme, Text, HIGH_TAG, LOW_TAG};
use crate::link::{self, ConnectPolicy};
use crate::quote::Quote;
use crate::recovery::{RecoveryAction, RecoveryController};

/// Last rendered values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayState {
    /// Price text as formatted (unpadded)
    pub last_price_text: Option<Text>,
    /// High line text
    pub last_high_text: Option<Text>,
    /// Low line text
    pub last_low_text: Option<Text>,
    /// Price of the last successful tick, for trend coloring
    pub previous_price_value: Option<f64>,
}

/// Result of one loop iteration
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Interval not elapsed, nothing done
    Idle,
    /// Quote fetched and rendered
    Updated,
    /// Fetch failed and the escalation was executed
    Failed,
    /// Device must restart now
    Restart,
}

/// The ticker's main loop
pub struct PollLoop<'a, L, T, C, D, V>
where
    T: Transport,
{
    link: L,
    transport: T,
    session: Option<T::Session>,
    clock: C,
    display: D,
    device: V,
    credentials: Credentials<'a>,
    settings: Settings,
    display_state: DisplayState,
    recovery: RecoveryController,
    last_poll_ms: Option<u64>,
    /// Price slot shows something other than `last_price_text`
    price_slot_dirty: bool,
    body: [u8; BODY_BUFFER_LEN],
}

impl<'a, L, T, C, D, V> PollLoop<'a, L, T, C, D, V>
where
    L: Link,
    T: Transport,
    C: Clock,
    D: MatrixDisplay,
    V: Device,
{
    /// Create the loop; nothing touches the hardware until [`start`](Self::start)
    pub fn new(
        link: L,
        transport: T,
        clock: C,
        display: D,
        device: V,
        credentials: Credentials<'a>,
        settings: Settings,
    ) -> Self {
        let recovery =
            RecoveryController::new(settings.max_failed_attempts, settings.max_recovery_attempts);
        Self {
            link,
            transport,
            session: None,
            clock,
            display,
            device,
            credentials,
            settings,
            display_state: DisplayState::default(),
            recovery,
            last_poll_ms: None,
            price_slot_dirty: false,
            body: [0u8; BODY_BUFFER_LEN],
        }
    }

    /// Last rendered values
    pub fn display_state(&self) -> &DisplayState {
        &self.display_state
    }

    /// Failure bookkeeping
    pub fn recovery(&self) -> &RecoveryController {
        &self.recovery
    }

    fn connect_policy(&self) -> ConnectPolicy {
        ConnectPolicy {
            timeout_ms: self.settings.connect_timeout_ms,
            retry_ms: self.settings.connect_retry_ms,
            radio_off_ms: self.settings.radio_off_ms,
        }
    }

    fn is_night(&self) -> bool {
        color::is_night(self.clock.local_hour(), self.settings.night_start_hour)
    }

    fn show(&mut self, slot: Slot, text: &str, color: Color) {
        self.display.set_text(slot, text);
        self.display.set_color(slot, color.rgb());
    }

    /// Boot sequence: splash, initial association, first session
    ///
    /// Fails only when the initial association fails; the link error is
    /// already on screen in that case.
    pub fn start(&mut self) -> Result<(), PollError> {
        info!("Pricetick starting, polling {}", self.settings.url);

        let splash = self.settings.palette.splash;
        self.show(Slot::Price, SPLASH_TEXT, splash);
        self.clock.delay_ms(self.settings.splash_ms);

        let policy = self.connect_policy();
        if let Err(err) = link::connect(&mut self.link, &mut self.clock, &self.credentials, &policy) {
            error!("Initial link connect failed: {}", err);
            let color = self.settings.palette.error;
            self.show(Slot::Price, LINK_ERROR_TEXT, color);
            return Err(PollError::LinkFailure(err));
        }

        self.open_session();
        Ok(())
    }

    fn open_session(&mut self) -> bool {
        match self.transport.create_session() {
            Ok(session) => {
                self.session = Some(session);
                true
            }
            Err(err) => {
                warn!("Transport session unavailable: {}", err);
                self.session = None;
                false
            }
        }
    }

    /// Run forever: boot, then tick until a restart is required
    pub fn run(mut self) -> ! {
        if self.start().is_err() {
            self.halt();
        }

        loop {
            if self.tick() == TickOutcome::Restart {
                error!("Recovery exhausted, restarting device");
                self.device.restart();
            }
            self.clock.delay_ms(self.settings.idle_ms);
        }
    }

    /// Keep the error on screen and do nothing else
    fn halt(&mut self) -> ! {
        error!("Halted");
        loop {
            self.clock.delay_ms(1_000);
        }
    }

    /// One loop iteration
    pub fn tick(&mut self) -> TickOutcome {
        let now = self.clock.monotonic_ms();
        if let Some(last) = self.last_poll_ms {
            if now.saturating_sub(last) < u64::from(self.settings.poll_interval_ms) {
                return TickOutcome::Idle;
            }
        }
        self.last_poll_ms = Some(now);

        match self.fetch() {
            Ok(quote) => {
                self.render(&quote);
                self.recovery.record_success();
                TickOutcome::Updated
            }
            Err(err) => self.handle_failure(err),
        }
    }

    fn fetch(&mut self) -> Result<Quote, PollError> {
        let session = self.session.as_mut().ok_or(TransportError::NoSession)?;
        let response = session.get(
            self.settings.url,
            self.settings.fetch_timeout_ms,
            &mut self.body,
        )?;
        debug!("HTTP status {}", response.status);

        if !response.is_ok() {
            return Err(PollError::HttpStatus(response.status));
        }

        let len = response.body_len.min(self.body.len());
        Quote::decode(&self.body[..len])
    }

    fn render(&mut self, quote: &Quote) {
        let colors = color::select(
            &self.settings.palette,
            self.display_state.previous_price_value,
            quote.last_price,
            self.is_night(),
            self.settings.dim_factor,
        );

        let price_text = format_price(quote.last_price);
        let high_text = tagged_extreme(HIGH_TAG, quote.high_24h);
        let low_text = tagged_extreme(LOW_TAG, quote.low_24h);

        if self.display_state.last_price_text.as_ref() != Some(&price_text) {
            info!("Price {}", price_text.as_str());
            let old = self.display_state.last_price_text.take();
            self.animate(old.as_ref().map(|t| t.as_str()), &price_text, colors.price);
            self.display_state.last_price_text = Some(price_text);
        } else if self.price_slot_dirty {
            self.show(Slot::Price, &price_text, colors.price);
        } else {
            self.display.set_color(Slot::Price, colors.price.rgb());
        }
        self.price_slot_dirty = false;

        if self.display_state.last_high_text.as_ref() != Some(&high_text) {
            self.display.set_text(Slot::High, &high_text);
            self.display_state.last_high_text = Some(high_text);
        }
        self.display.set_color(Slot::High, colors.high.rgb());

        if self.display_state.last_low_text.as_ref() != Some(&low_text) {
            self.display.set_text(Slot::Low, &low_text);
            self.display_state.last_low_text = Some(low_text);
        }
        self.display.set_color(Slot::Low, colors.low.rgb());

        self.display_state.previous_price_value = Some(quote.last_price);
    }

    fn animate(&mut self, old: Option<&str>, new: &str, color: Color) {
        let step_ms = self.settings.step_ms();
        let rollover = Rollover::new(old, new, self.settings.animation_steps);
        let steps = usize::from(rollover.steps());

        for (i, frame) in rollover.enumerate() {
            self.show(Slot::Price, &frame, color);
            if i < steps {
                self.clock.delay_ms(step_ms);
            }
        }
    }

    fn handle_failure(&mut self, err: PollError) -> TickOutcome {
        warn!(
            "Poll failed ({} in a row): {}",
            self.recovery.consecutive_failures().saturating_add(1),
            err
        );

        let escalation = self.recovery.handle_failure(err.class());
        debug!("Recovery state: {:?}", self.recovery.health());
        for action in escalation {
            match action {
                RecoveryAction::None => {
                    debug!("Retrying next interval");
                }
                RecoveryAction::ShowTransientError(label) => {
                    let color = self.settings.palette.error;
                    self.show(Slot::Price, label, color);
                    self.price_slot_dirty = true;
                }
                RecoveryAction::AttemptLinkRecovery => {
                    self.recover_link();
                }
                RecoveryAction::HardRestart => {
                    return TickOutcome::Restart;
                }
            }
        }
        TickOutcome::Failed
    }

    fn recover_link(&mut self) {
        let policy = self.connect_policy();
        let restored = match link::reset(&mut self.link, &mut self.clock, &self.credentials, &policy)
        {
            Ok(()) => self.open_session(),
            Err(err) => {
                warn!("Link reset failed: {}", err);
                false
            }
        };

        if restored {
            self.recovery.recovery_succeeded();
            info!(
                "Link recovered ({}/{})",
                self.recovery.recovery_attempts(),
                self.settings.max_recovery_attempts
            );

            let color = color::shade(
                self.settings.palette.neutral,
                self.is_night(),
                self.settings.dim_factor,
            );
            let text = match &self.display_state.last_price_text {
                Some(text) => text.clone(),
                None => {
                    let mut text = Text::new();
                    let _ = text.push_str(PLACEHOLDER_TEXT);
                    text
                }
            };
            self.show(Slot::Price, &text, color);
            self.price_slot_dirty = false;
        } else {
            self.recovery.recovery_failed();
            warn!(
                "Link recovery failed ({}/{})",
                self.recovery.recovery_attempts(),
                self.settings.max_recovery_attempts
            );
        }
    }
}
