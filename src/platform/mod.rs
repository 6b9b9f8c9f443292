//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key codes and pointer presses to intents)
//! - Storage (LocalStorage on web)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod storage;

pub use input::{intent_for_key, intent_for_pointer};
