#![forbid(unsafe_code)]

//! Core: garden configuration, responsive row counts, element building, and
//! resize debouncing.
//!
//! Nothing in this crate touches a real DOM. The builder produces owned
//! [`Element`] trees and a [`GardenContainer`] host materializes them; the web
//! crate supplies the DOM-backed host, tests use [`MemoryContainer`].

pub mod builder;
pub mod config;
pub mod container;
pub mod debounce;
pub mod element;
pub mod error;
pub mod garden;
pub mod logging;
pub mod responsive;

#[cfg(feature = "console-layer")]
pub mod console_layer;

pub use builder::{build_row, build_rows, build_sunflower, sway_duration};
pub use config::{
    GardenConfig, MAX_FLOWERS_PER_ROW, MAX_PETALS_PER_FLOWER, RowCounts, RowKind,
};
pub use container::{GardenContainer, MemoryContainer};
pub use debounce::{DebounceAction, ResizeDebouncer};
pub use element::Element;
pub use error::GardenError;
pub use garden::{Garden, GardenSession, GardenStats};
pub use responsive::{RowConfig, flower_count, row_configs, row_counts, viewport_ratio};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};
