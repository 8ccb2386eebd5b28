#![cfg_attr(not(test), no_std)]

//! Polled button processing.
//!
//! `rbtn` turns periodically sampled digital inputs into button events:
//! press, release, (multi-)click and keep-alive. Virtual "combo" buttons fire
//! when a set of plain buttons is held at the same time.
//!
//! Everything is driven from a single tick function, [`ButtonManager::process`],
//! which is expected to be called at a roughly regular interval with a
//! wrapping millisecond timestamp. No interrupts and no heap are required.

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod bit_array;
pub mod button;
pub mod combo;
pub mod config;
pub mod error;
pub mod event;
pub mod input;
pub mod key_state;
pub mod manager;
pub mod time;

pub use button::Button;
pub use combo::Combo;
pub use config::ButtonParams;
pub use error::ButtonError;
pub use event::{ButtonEvent, EventMask};
pub use input::{DirectPinReader, EventHandler, StateReader};
pub use key_state::KeyState;
pub use manager::ButtonManager;
pub use time::{Time, TimeDiff, timer_sub};

/// Maximum number of indexable buttons, static and dynamic together.
///
/// This is also the width of every [`KeyState`], including combo masks.
pub const MAX_KEY_NUM: usize = 64;

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("You may not enable both `defmt` and `log` features.");
