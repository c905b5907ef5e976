//! Platform abstraction layer
//!
//! Browser glue lives in `web` (wasm32 only): storage, the trigger binding
//! and a JSON frame view for a JavaScript renderer. Native hosts drive
//! `sim::tick` directly (see the `gravity-switcher` binary).

#[cfg(target_arch = "wasm32")]
pub mod web;
