#![forbid(unsafe_code)]

//! WASM frontend for the Sunflower garden.
//!
//! This crate is intentionally host-specific (web/WASM). It exposes a
//! `wasm-bindgen` API that:
//! - finds the garden container and fills it with rows built by
//!   `sunflower-core`,
//! - rebuilds on window resize after a quiet period,
//! - routes `tracing` output to the browser console.
//!
//! All layout and debounce decisions live in `sunflower-core`; this crate
//! only owns DOM handles, listeners, and the timer.

pub mod console;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{SunflowerGarden, start};

/// Whether a `document.readyState` value means the initial build must wait
/// for `DOMContentLoaded`. Only `"loading"` does; `"interactive"` and
/// `"complete"` build immediately.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn is_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct SunflowerGarden;

#[cfg(not(target_arch = "wasm32"))]
impl SunflowerGarden {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}
