#![forbid(unsafe_code)]

//! Sunflower element builder.
//!
//! Each flower is:
//!
//! ```text
//! div.sunflower[.<size variant>]  style="--sway-duration: <d>"
//! ├── div.stem
//! ├── div.leaf.leaf--left   aria-hidden="true"
//! ├── div.leaf.leaf--right  aria-hidden="true"
//! └── div.head
//!     └── div.petals
//!         ├── div.petal × petals_per_flower
//!         └── div.center
//! ```
//!
//! Rows are `div.row.<row class>` holding `count` flowers. Sway durations
//! cycle by the flower's index within its row so neighbours never sway in
//! lockstep.

use crate::config::GardenConfig;
use crate::element::Element;
use crate::responsive::{RowConfig, row_configs};

/// CSS custom property that carries each flower's sway duration.
pub const SWAY_DURATION_PROPERTY: &str = "--sway-duration";

/// Class on every row element; rebuilds remove elements carrying it.
pub const ROW_CLASS: &str = "row";

const LEAF_SIDES: [&str; 2] = ["left", "right"];

/// Sway duration for the flower at `index`, cycling through the configured list.
#[must_use]
pub fn sway_duration(config: &GardenConfig, index: usize) -> Option<&str> {
    let durations = &config.sway_durations;
    if durations.is_empty() {
        return None;
    }
    durations.get(index % durations.len()).map(String::as_str)
}

/// Build one flower.
#[must_use]
pub fn build_sunflower(config: &GardenConfig, size_class: &str, index: usize) -> Element {
    let mut flower = Element::div().with_class("sunflower").with_class(size_class);
    if let Some(duration) = sway_duration(config, index) {
        flower.set_style(SWAY_DURATION_PROPERTY, duration);
    }

    flower.push_child(Element::div().with_class("stem"));
    for side in LEAF_SIDES {
        flower.push_child(
            Element::div()
                .with_class("leaf")
                .with_class(&format!("leaf--{side}"))
                .with_attribute("aria-hidden", "true"),
        );
    }

    let mut petals = Element::div().with_class("petals");
    for _ in 0..config.petals_per_flower {
        petals.push_child(Element::div().with_class("petal"));
    }
    petals.push_child(Element::div().with_class("center"));

    flower.with_child(Element::div().with_class("head").with_child(petals))
}

/// Build one row with its flowers.
#[must_use]
pub fn build_row(config: &GardenConfig, row: &RowConfig) -> Element {
    let mut element = Element::div().with_class(ROW_CLASS).with_class(row.class_name);
    for index in 0..row.count as usize {
        element.push_child(build_sunflower(config, row.flower_class, index));
    }
    element
}

/// Build all rows for `width`, in append order.
#[must_use]
pub fn build_rows(config: &GardenConfig, width: f64) -> (Vec<Element>, [RowConfig; 3]) {
    let rows = row_configs(config, width);
    let elements = rows.iter().map(|row| build_row(config, row)).collect();
    (elements, rows)
}
