//! Pricetick Platform Abstraction Layer
//!
//! This crate defines the traits a board (or a desktop host) implements so
//! the same ticker logic can run anywhere a radio, an HTTP stack and a
//! matrix panel are available.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  pricetick-core (poll loop, recovery)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pricetick-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ matrix board  │       │ pricetick-    │
//! │   firmware    │       │    host       │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`link::Link`] - Wireless association
//! - [`transport::Transport`], [`transport::HttpSession`] - HTTPS round trips
//! - [`clock::Clock`] - Monotonic time, local hour and delays
//! - [`display::MatrixDisplay`] - Text slots on the matrix panel
//! - [`device::Device`] - Unconditional restart

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod device;
pub mod display;
pub mod link;
pub mod transport;

// Re-export key traits at crate root for convenience
pub use clock::Clock;
pub use device::Device;
pub use display::{MatrixDisplay, Slot};
pub use link::{Link, LinkError};
pub use transport::{HttpSession, Response, Transport, TransportError};
