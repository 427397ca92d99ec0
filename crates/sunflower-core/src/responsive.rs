#![forbid(unsafe_code)]

//! Responsive flower counts.
//!
//! The viewport width is turned into a ratio against the configured base
//! width, capped at `1`, and each row's base count is scaled by it:
//!
//! ```text
//! ratio = min(width / base_width, 1)
//! count = max(min_count, round(base_count * ratio))
//! ```
//!
//! # Invariants
//!
//! 1. `width >= base_width` yields the base count for every row.
//! 2. `width <= 0` (and NaN) yields the minimum count for every row.
//! 3. Counts are monotonically non-decreasing in `width`.
//! 4. Identical inputs yield identical counts.

use crate::config::{GardenConfig, RowCounts, RowKind};

/// Derived per-row settings for one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowConfig {
    pub kind: RowKind,
    /// Modifier class for the row element.
    pub class_name: &'static str,
    /// Size variant class for each flower (may be empty).
    pub flower_class: &'static str,
    /// Flowers to build for the current viewport.
    pub count: u32,
}

/// Viewport ratio in `[0, 1]`.
///
/// Negative and NaN widths count as `0`; positive infinity counts as wide.
#[must_use]
pub fn viewport_ratio(width: f64, base_width: f64) -> f64 {
    if width.is_nan() || width <= 0.0 {
        return 0.0;
    }
    (width / base_width).min(1.0)
}

/// Scale `base` by `ratio`, rounding half away from zero, never below `min`.
#[must_use]
pub fn flower_count(base: u32, min: u32, ratio: f64) -> u32 {
    let scaled = (f64::from(base) * ratio.clamp(0.0, 1.0)).round();
    // `scaled` is within [0, base], so the cast cannot truncate.
    (scaled as u32).max(min)
}

/// Row settings for `width`, in build order.
#[must_use]
pub fn row_configs(config: &GardenConfig, width: f64) -> [RowConfig; 3] {
    let ratio = viewport_ratio(width, config.base_width);
    RowKind::ALL.map(|kind| RowConfig {
        kind,
        class_name: kind.row_class(),
        flower_class: kind.flower_class(),
        count: flower_count(
            config.base_flower_counts.get(kind),
            config.min_flower_counts.get(kind),
            ratio,
        ),
    })
}

/// Just the counts from [`row_configs`].
#[must_use]
pub fn row_counts(config: &GardenConfig, width: f64) -> RowCounts {
    let mut counts = RowCounts::new(0, 0, 0);
    for row in row_configs(config, width) {
        counts.set(row.kind, row.count);
    }
    counts
}
