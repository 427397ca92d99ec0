#![forbid(unsafe_code)]

//! Browser console routing for tracing levels.

use tracing::Level;

/// `console.*` method a log line is written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMethod {
    Error,
    Warn,
    Info,
    Debug,
}

impl ConsoleMethod {
    #[must_use]
    pub fn for_level(level: Level) -> Self {
        match level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO => Self::Info,
            Level::DEBUG | Level::TRACE => Self::Debug,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserConsole;

#[cfg(target_arch = "wasm32")]
mod browser {
    use sunflower_core::console_layer::ConsoleSink;
    use tracing::Level;
    use wasm_bindgen::JsValue;
    use web_sys::console;

    use super::ConsoleMethod;

    /// Writes formatted lines through `web_sys::console`.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct BrowserConsole;

    impl ConsoleSink for BrowserConsole {
        fn write_line(&self, level: Level, line: &str) {
            let msg = JsValue::from_str(line);
            match ConsoleMethod::for_level(level) {
                ConsoleMethod::Error => console::error_1(&msg),
                ConsoleMethod::Warn => console::warn_1(&msg),
                ConsoleMethod::Info => console::info_1(&msg),
                ConsoleMethod::Debug => console::debug_1(&msg),
            }
        }
    }
}
