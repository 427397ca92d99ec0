#![forbid(unsafe_code)]

//! Garden configuration.
//!
//! [`GardenConfig`] holds the static table the whole garden is derived from:
//! the reference viewport width, per-row base and minimum flower counts,
//! petals per flower, and the cyclic sway-duration list. Hosts may override
//! any top-level field from JSON (camelCase keys); omitted fields keep their
//! defaults.
//!
//! # Invariants
//!
//! A config accepted by [`GardenConfig::validate`] satisfies:
//! - `base_width` is finite and strictly positive;
//! - every row's minimum count is `<=` its base count;
//! - no row's base count exceeds [`MAX_FLOWERS_PER_ROW`];
//! - `petals_per_flower` is at most [`MAX_PETALS_PER_FLOWER`];
//! - `sway_durations` is non-empty;
//! - `container_selector` is non-empty.

use std::time::Duration;

use serde::Deserialize;

use crate::error::GardenError;

/// Selector matching the page element that receives the garden rows.
pub const DEFAULT_CONTAINER_SELECTOR: &str = ".garden";

/// Quiet period after the last resize event before the garden is rebuilt.
pub const DEFAULT_DEBOUNCE_MS: u64 = 250;

/// Upper bound on any row's base (and so minimum) flower count.
pub const MAX_FLOWERS_PER_ROW: u32 = 1_000;

/// Upper bound on petals per flower.
pub const MAX_PETALS_PER_FLOWER: u32 = 64;

/// Viewport width (px) at which every row shows its base count.
pub const DEFAULT_BASE_WIDTH: f64 = 1920.0;

/// The three fixed garden rows, in build order (back to front).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    /// Farthest row, tiny flowers.
    FarBack,
    /// Middle row, small flowers.
    Back,
    /// Front row, full-size flowers.
    Front,
}

impl RowKind {
    /// All rows in the order they are appended to the container.
    pub const ALL: [RowKind; 3] = [RowKind::FarBack, RowKind::Back, RowKind::Front];

    /// Modifier class applied to the row element alongside `row`.
    #[must_use]
    pub const fn row_class(self) -> &'static str {
        match self {
            Self::FarBack => "row--far-back",
            Self::Back => "row--back",
            Self::Front => "row--front",
        }
    }

    /// Size variant class applied to each flower in the row. Empty for the
    /// front row, which uses the unmodified `sunflower` size.
    #[must_use]
    pub const fn flower_class(self) -> &'static str {
        match self {
            Self::FarBack => "sunflower--tiny",
            Self::Back => "sunflower--small",
            Self::Front => "",
        }
    }
}

/// One flower count per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RowCounts {
    pub far_back: u32,
    pub back: u32,
    pub front: u32,
}

impl RowCounts {
    #[must_use]
    pub const fn new(far_back: u32, back: u32, front: u32) -> Self {
        Self {
            far_back,
            back,
            front,
        }
    }

    /// Count for a single row.
    #[must_use]
    pub const fn get(&self, kind: RowKind) -> u32 {
        match kind {
            RowKind::FarBack => self.far_back,
            RowKind::Back => self.back,
            RowKind::Front => self.front,
        }
    }

    /// Set the count for a single row.
    pub fn set(&mut self, kind: RowKind, count: u32) {
        match kind {
            RowKind::FarBack => self.far_back = count,
            RowKind::Back => self.back = count,
            RowKind::Front => self.front = count,
        }
    }

    /// Sum over all rows.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.far_back
            .saturating_add(self.back)
            .saturating_add(self.front)
    }

    /// Counts in build order: `[far_back, back, front]`.
    #[must_use]
    pub const fn to_array(&self) -> [u32; 3] {
        [self.far_back, self.back, self.front]
    }
}

/// Static garden configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct GardenConfig {
    /// Viewport width (px) at which rows reach their base counts.
    pub base_width: f64,
    /// Flower counts at `base_width` and wider.
    pub base_flower_counts: RowCounts,
    /// Lower bound on flower counts for narrow viewports.
    pub min_flower_counts: RowCounts,
    /// Petal elements per flower head.
    pub petals_per_flower: u32,
    /// CSS durations cycled across flowers by index.
    pub sway_durations: Vec<String>,
    /// Selector for the container element.
    pub container_selector: String,
    /// Resize quiet period in milliseconds.
    pub debounce_ms: u64,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            base_width: DEFAULT_BASE_WIDTH,
            base_flower_counts: RowCounts::new(18, 15, 16),
            min_flower_counts: RowCounts::new(4, 3, 3),
            petals_per_flower: 12,
            sway_durations: ["4s", "4.2s", "4.5s", "4.6s", "4.8s", "5s", "5.2s"]
                .into_iter()
                .map(String::from)
                .collect(),
            container_selector: DEFAULT_CONTAINER_SELECTOR.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl GardenConfig {
    /// Decode a config from JSON and validate it.
    ///
    /// Omitted top-level fields take their defaults; unknown fields are
    /// rejected.
    pub fn from_json(json: &str) -> Result<Self, GardenError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants listed in the module docs.
    pub fn validate(&self) -> Result<(), GardenError> {
        if !self.base_width.is_finite() || self.base_width <= 0.0 {
            return Err(GardenError::InvalidConfig(
                "baseWidth must be finite and positive",
            ));
        }
        for kind in RowKind::ALL {
            if self.base_flower_counts.get(kind) > MAX_FLOWERS_PER_ROW {
                return Err(GardenError::InvalidConfig(
                    "baseFlowerCounts must not exceed 1000 per row",
                ));
            }
            if self.min_flower_counts.get(kind) > self.base_flower_counts.get(kind) {
                return Err(GardenError::InvalidConfig(
                    "minFlowerCounts must not exceed baseFlowerCounts",
                ));
            }
        }
        if self.petals_per_flower > MAX_PETALS_PER_FLOWER {
            return Err(GardenError::InvalidConfig(
                "petalsPerFlower must not exceed 64",
            ));
        }
        if self.sway_durations.is_empty() {
            return Err(GardenError::InvalidConfig("swayDurations must not be empty"));
        }
        if self.container_selector.trim().is_empty() {
            return Err(GardenError::InvalidConfig(
                "containerSelector must not be empty",
            ));
        }
        Ok(())
    }

    /// Resize quiet period as a [`Duration`].
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_matches_reference_table() {
        let config = GardenConfig::default();
        assert_eq!(config.base_width, 1920.0);
        assert_eq!(config.base_flower_counts, RowCounts::new(18, 15, 16));
        assert_eq!(config.min_flower_counts, RowCounts::new(4, 3, 3));
        assert_eq!(config.petals_per_flower, 12);
        assert_eq!(config.sway_durations.len(), 7);
        assert_eq!(config.sway_durations[0], "4s");
        assert_eq!(config.sway_durations[6], "5.2s");
        assert_eq!(config.container_selector, ".garden");
        assert_eq!(config.debounce(), Duration::from_millis(250));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn row_kind_classes() {
        assert_eq!(RowKind::FarBack.row_class(), "row--far-back");
        assert_eq!(RowKind::Back.row_class(), "row--back");
        assert_eq!(RowKind::Front.row_class(), "row--front");
        assert_eq!(RowKind::FarBack.flower_class(), "sunflower--tiny");
        assert_eq!(RowKind::Back.flower_class(), "sunflower--small");
        assert_eq!(RowKind::Front.flower_class(), "");
    }

    #[test]
    fn from_json_fills_omitted_fields() {
        let config = GardenConfig::from_json(r#"{"petalsPerFlower": 8, "debounceMs": 100}"#)
            .expect("valid json");
        assert_eq!(config.petals_per_flower, 8);
        assert_eq!(config.debounce_ms, 100);
        assert_eq!(config.base_flower_counts, RowCounts::new(18, 15, 16));
        assert_eq!(config.container_selector, ".garden");
    }

    #[test]
    fn from_json_reads_nested_counts() {
        let config = GardenConfig::from_json(
            r#"{"baseFlowerCounts": {"farBack": 10, "back": 9, "front": 8}}"#,
        )
        .expect("valid json");
        assert_eq!(config.base_flower_counts, RowCounts::new(10, 9, 8));
    }

    #[test]
    fn from_json_rejects_unknown_fields() {
        let err = GardenConfig::from_json(r#"{"petals": 3}"#).unwrap_err();
        assert!(matches!(err, GardenError::ConfigParse(_)), "{err:?}");
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        let err = GardenConfig::from_json("{").unwrap_err();
        assert!(matches!(err, GardenError::ConfigParse(_)));
    }

    #[test]
    fn validate_rejects_non_positive_base_width() {
        let config = GardenConfig {
            base_width: 0.0,
            ..GardenConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(GardenError::InvalidConfig(
                "baseWidth must be finite and positive"
            ))
        );

        let config = GardenConfig {
            base_width: f64::NAN,
            ..GardenConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_min_above_base() {
        let config = GardenConfig {
            min_flower_counts: RowCounts::new(4, 30, 3),
            ..GardenConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GardenError::InvalidConfig(_))
        ));
    }

    #[test]
    fn validate_rejects_empty_sway_list_and_selector() {
        let config = GardenConfig {
            sway_durations: Vec::new(),
            ..GardenConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GardenConfig {
            container_selector: "  ".to_string(),
            ..GardenConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_caps_flowers_and_petals() {
        let at_limit = GardenConfig {
            base_flower_counts: RowCounts::new(MAX_FLOWERS_PER_ROW, 1, 1),
            min_flower_counts: RowCounts::new(1, 1, 1),
            petals_per_flower: MAX_PETALS_PER_FLOWER,
            ..GardenConfig::default()
        };
        assert!(at_limit.validate().is_ok());

        let too_many_flowers = GardenConfig {
            base_flower_counts: RowCounts::new(18, MAX_FLOWERS_PER_ROW + 1, 16),
            ..GardenConfig::default()
        };
        assert_eq!(
            too_many_flowers.validate(),
            Err(GardenError::InvalidConfig(
                "baseFlowerCounts must not exceed 1000 per row"
            ))
        );

        let too_many_petals = GardenConfig {
            petals_per_flower: MAX_PETALS_PER_FLOWER + 1,
            ..GardenConfig::default()
        };
        assert_eq!(
            too_many_petals.validate(),
            Err(GardenError::InvalidConfig("petalsPerFlower must not exceed 64"))
        );
    }

    #[test]
    fn from_json_rejects_oversized_gardens() {
        let err = GardenConfig::from_json(r#"{"petalsPerFlower": 4294967295}"#).unwrap_err();
        assert!(matches!(err, GardenError::InvalidConfig(_)));

        let err = GardenConfig::from_json(
            r#"{"baseFlowerCounts": {"farBack": 100000000, "back": 15, "front": 16}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, GardenError::InvalidConfig(_)));
    }

    #[test]
    fn row_counts_accessors() {
        let mut counts = RowCounts::new(1, 2, 3);
        assert_eq!(counts.get(RowKind::Back), 2);
        counts.set(RowKind::Front, 7);
        assert_eq!(counts.to_array(), [1, 2, 7]);
        assert_eq!(counts.total(), 10);
    }
}
