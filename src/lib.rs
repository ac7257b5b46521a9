//! # scrollnorm - Unified Scroll Deltas from Heterogeneous Input
//!
//! Turns wheel, legacy mouse-wheel, touch, legacy pointer and keyboard events from a
//! DOM-like host into one stream of scroll deltas, so animation loops and virtual
//! scrollers can react to scrolling intent without caring which device produced it.
//!
//! ## Features
//!
//! - **Capability detection**: each event family is probed once per normalizer
//! - **Lazy binding**: host listeners are attached with the first subscriber and
//!   detached with the last one
//! - **Device scaling**: per-family multipliers, including the line-mode wheel quirk
//! - **Running totals**: every dispatch carries the accumulated scroll offset
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`config`] - Normalizer options and optional TOML loading
//! - [`event`] - Raw host events and the normalized [`ScrollEvent`]
//! - [`host`] - The [`Host`] binding layer, an in-memory host and a terminal host
//! - [`normalizer`] - Capability-driven binding, delta translation and fan-out
//! - [`viewer`] - Terminal viewer used by the `scrollnorm` binary

// Core modules
pub mod config;
pub mod error;
pub mod event;

// Host binding layer
pub mod host;

// Core component
pub mod normalizer;

// Demo viewer
pub mod viewer;

// Re-export commonly used types for convenience
pub use error::{Result, ScrollnormError};

// Public API surface for external usage
pub use config::{AttachTarget, Config};
pub use event::{RawEvent, ScrollEvent};
pub use host::{Capabilities, Host};
pub use normalizer::listeners::{ListenerId, ListenerResult};
pub use normalizer::{Handled, Normalizer, ScrollState};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
