#![forbid(unsafe_code)]

//! Tracing layer that forwards formatted events to a line-oriented console.
//!
//! Each event becomes one line, `LEVEL target: message key=value ...`, handed
//! to a [`ConsoleSink`] together with its level. The web crate routes lines to
//! the browser console; tests capture them.
//!
//! ```no_run
//! use sunflower_core::console_layer::{ConsoleLayer, ConsoleSink};
//! use tracing::Level;
//! use tracing_subscriber::prelude::*;
//!
//! struct Stderr;
//! impl ConsoleSink for Stderr {
//!     fn write_line(&self, _level: Level, line: &str) {
//!         eprintln!("{line}");
//!     }
//! }
//!
//! tracing_subscriber::registry().with(ConsoleLayer::new(Stderr)).init();
//! ```

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Destination for formatted log lines.
pub trait ConsoleSink: Send + Sync + 'static {
    fn write_line(&self, level: Level, line: &str);
}

/// Format level as a fixed-width string.
fn level_str(level: Level) -> &'static str {
    match level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARN ",
        Level::INFO => "INFO ",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

/// Extracts message and structured fields from a tracing event.
#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        let rendered = strip_debug_quotes(&rendered);
        if field.name() == "message" {
            self.message = Some(rendered);
        } else {
            self.fields.push((field.name().to_string(), rendered));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields
                .push((field.name().to_string(), value.to_string()));
        }
    }
}

/// Remove surrounding quotes from Debug-formatted strings.
fn strip_debug_quotes(s: &str) -> String {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}

/// A `tracing_subscriber::Layer` that writes one line per event to a sink.
pub struct ConsoleLayer<S> {
    sink: S,
    show_target: bool,
}

impl<S: ConsoleSink> ConsoleLayer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            show_target: true,
        }
    }

    /// Builder: set whether to show the target module.
    #[must_use]
    pub fn show_target(mut self, show: bool) -> Self {
        self.show_target = show;
        self
    }

    fn format_event(&self, event: &Event<'_>) -> String {
        let metadata = event.metadata();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let mut line = String::new();
        line.push_str(level_str(*metadata.level()));
        line.push(' ');
        if self.show_target {
            let _ = write!(line, "{}: ", metadata.target());
        }
        line.push_str(visitor.message.as_deref().unwrap_or_default());
        for (key, value) in &visitor.fields {
            let _ = write!(line, " {key}={value}");
        }
        line
    }
}

impl<S, Sub> Layer<Sub> for ConsoleLayer<S>
where
    S: ConsoleSink,
    Sub: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, Sub>) {
        let line = self.format_event(event);
        self.sink.write_line(*event.metadata().level(), &line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::prelude::*;

    #[derive(Clone, Default)]
    struct CaptureSink(Arc<Mutex<Vec<(Level, String)>>>);

    impl ConsoleSink for CaptureSink {
        fn write_line(&self, level: Level, line: &str) {
            self.0
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push((level, line.to_string()));
        }
    }

    impl CaptureSink {
        fn lines(&self) -> Vec<(Level, String)> {
            self.0.lock().unwrap_or_else(|e| e.into_inner()).clone()
        }
    }

    #[test]
    fn formats_level_message_and_fields() {
        let sink = CaptureSink::default();
        let subscriber =
            tracing_subscriber::registry().with(ConsoleLayer::new(sink.clone()).show_target(false));
        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(selector = ".garden", "garden container not found");
            tracing::info!(flowers = 49u32, "garden mounted");
        });

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0, Level::ERROR);
        assert_eq!(
            lines[0].1,
            "ERROR garden container not found selector=.garden"
        );
        assert_eq!(lines[1].0, Level::INFO);
        assert_eq!(lines[1].1, "INFO  garden mounted flowers=49");
    }

    #[test]
    fn includes_target_by_default() {
        let sink = CaptureSink::default();
        let subscriber = tracing_subscriber::registry().with(ConsoleLayer::new(sink.clone()));
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "sunflower", "slow rebuild");
        });
        assert_eq!(sink.lines()[0].1, "WARN  sunflower: slow rebuild");
    }

    #[test]
    fn garden_logs_missing_container() {
        use crate::{Garden, GardenConfig, MemoryContainer};

        let sink = CaptureSink::default();
        let subscriber =
            tracing_subscriber::registry().with(ConsoleLayer::new(sink.clone()).show_target(false));
        tracing::subscriber::with_default(subscriber, || {
            let garden = Garden::new(GardenConfig::default()).expect("valid");
            assert!(garden.rebuild::<MemoryContainer>(None, 1200.0).is_none());
        });

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Level::ERROR);
        assert!(lines[0].1.contains("garden container not found"));
        assert!(lines[0].1.contains("selector=.garden"));
    }

    #[test]
    fn garden_warns_on_host_failure() {
        use crate::{Element, Garden, GardenConfig, GardenContainer};

        struct BrokenHost;

        impl GardenContainer for BrokenHost {
            type Error = &'static str;
            type Batch = ();

            fn prepare_rows(&mut self, _rows: &[Element]) -> Result<(), Self::Error> {
                Err("detached document")
            }

            fn swap_rows(&mut self, (): ()) -> Result<usize, Self::Error> {
                Ok(0)
            }

            fn clear_rows(&mut self) -> Result<usize, Self::Error> {
                Ok(0)
            }
        }

        let sink = CaptureSink::default();
        let subscriber =
            tracing_subscriber::registry().with(ConsoleLayer::new(sink.clone()).show_target(false));
        tracing::subscriber::with_default(subscriber, || {
            let garden = Garden::new(GardenConfig::default()).expect("valid");
            assert!(garden.rebuild(Some(&mut BrokenHost), 1200.0).is_none());
        });

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Level::WARN);
        assert_eq!(
            lines[0].1,
            "WARN  garden rebuild failed error=host error: detached document"
        );
    }
}
