//! Board-agnostic core logic for the matrix price ticker
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Price formatting (grouping, suffix, padding)
//! - Color policy with night dimming
//! - Digit-rollover transition frames
//! - Failure bookkeeping and recovery escalation
//! - Ticker response decoding
//! - Link reconnect procedure
//! - The poll loop tying it together over the `pricetick-hal` traits

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod animation;
pub mod color;
pub mod config;
pub mod error;
pub mod format;
pub mod link;
pub mod poll;
pub mod quote;
pub mod recovery;

pub use color::{Color, ColorSet};
pub use config::Settings;
pub use error::{FailureClass, PollError};
pub use poll::{DisplayState, PollLoop, TickOutcome};
pub use quote::Quote;
pub use recovery::{Health, RecoveryAction, RecoveryController};
