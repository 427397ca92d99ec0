#![forbid(unsafe_code)]

//! Garden controller.
//!
//! [`Garden`] turns a viewport width into rows and applies them to a
//! container: build everything first, have the host prepare the new batch,
//! then swap it in for the old rows. A host failure before the swap leaves
//! the previous garden on the page. [`GardenSession`] adds the resize debouncer on top so a
//! host only has to forward resize events and timer callbacks.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | No container | `error` log, no mutation, `None` |
//! | Host mutation fails | `warn` log, `None` |

use std::time::Duration;

use crate::builder::build_rows;
use crate::config::{GardenConfig, RowCounts};
use crate::container::GardenContainer;
use crate::debounce::{DebounceAction, ResizeDebouncer};
use crate::error::GardenError;
use crate::responsive::{RowConfig, row_configs};

/// Summary of one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GardenStats {
    /// Flowers built per row.
    pub rows: RowCounts,
    /// Rows removed from the container before appending.
    pub removed_rows: usize,
}

impl GardenStats {
    #[must_use]
    pub const fn total_flowers(&self) -> u32 {
        self.rows.total()
    }
}

/// Builds and rebuilds a garden from a validated config.
#[derive(Debug, Clone)]
pub struct Garden {
    config: GardenConfig,
}

impl Garden {
    /// Validate `config` and wrap it.
    pub fn new(config: GardenConfig) -> Result<Self, GardenError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &GardenConfig {
        &self.config
    }

    /// Row settings for `width`.
    #[must_use]
    pub fn row_configs(&self, width: f64) -> [RowConfig; 3] {
        row_configs(&self.config, width)
    }

    /// Replace the container's rows with rows built for `width`.
    pub fn render<C: GardenContainer>(
        &self,
        container: Option<&mut C>,
        width: f64,
    ) -> Result<GardenStats, GardenError> {
        let container = container.ok_or_else(|| GardenError::ContainerNotFound {
            selector: self.config.container_selector.clone(),
        })?;

        let (elements, rows) = build_rows(&self.config, width);
        let batch = container
            .prepare_rows(&elements)
            .map_err(|e| GardenError::Host(e.to_string()))?;
        let removed_rows = container
            .swap_rows(batch)
            .map_err(|e| GardenError::Host(e.to_string()))?;

        let mut counts = RowCounts::new(0, 0, 0);
        for row in rows {
            counts.set(row.kind, row.count);
        }
        crate::debug!(width, rows = ?counts.to_array(), removed_rows, "garden built");
        Ok(GardenStats {
            rows: counts,
            removed_rows,
        })
    }

    /// [`render`](Self::render), logging failures instead of returning them.
    pub fn rebuild<C: GardenContainer>(
        &self,
        container: Option<&mut C>,
        width: f64,
    ) -> Option<GardenStats> {
        match self.render(container, width) {
            Ok(stats) => Some(stats),
            Err(err) if err.is_missing_container() => {
                crate::error!(
                    selector = %self.config.container_selector,
                    "garden container not found"
                );
                None
            }
            Err(err) => {
                crate::warn!(error = %err, "garden rebuild failed");
                let _ = err; // Suppress unused warning when tracing is disabled
                None
            }
        }
    }
}

/// A garden plus its resize debouncer.
#[derive(Debug, Clone)]
pub struct GardenSession {
    garden: Garden,
    debouncer: ResizeDebouncer,
    builds: u64,
}

impl GardenSession {
    #[must_use]
    pub fn new(garden: Garden) -> Self {
        let debouncer = ResizeDebouncer::new(garden.config().debounce());
        Self {
            garden,
            debouncer,
            builds: 0,
        }
    }

    #[must_use]
    pub const fn garden(&self) -> &Garden {
        &self.garden
    }

    #[must_use]
    pub const fn debouncer(&self) -> &ResizeDebouncer {
        &self.debouncer
    }

    /// Successful builds so far.
    #[must_use]
    pub const fn builds(&self) -> u64 {
        self.builds
    }

    /// Initial build when the page becomes ready.
    pub fn mount<C: GardenContainer>(
        &mut self,
        container: Option<&mut C>,
        width: f64,
    ) -> Option<GardenStats> {
        let stats = self.rebuild_now(container, width)?;
        crate::info!(flowers = stats.total_flowers(), "garden mounted");
        Some(stats)
    }

    /// Immediate rebuild, dropping any pending debounced one.
    pub fn rebuild_now<C: GardenContainer>(
        &mut self,
        container: Option<&mut C>,
        width: f64,
    ) -> Option<GardenStats> {
        self.debouncer.cancel();
        let stats = self.garden.rebuild(container, width)?;
        self.builds += 1;
        Some(stats)
    }

    /// Record a resize at `now`; returns the timer delay to arm.
    pub fn on_resize(&mut self, now: Duration) -> Duration {
        self.debouncer.notify(now)
    }

    /// Timer callback at `now`.
    ///
    /// Rebuilds when the quiet period has elapsed. Returns the debouncer's
    /// decision so the host can re-arm on [`DebounceAction::Wait`], plus the
    /// build summary when a rebuild ran.
    pub fn on_timer<C: GardenContainer>(
        &mut self,
        now: Duration,
        container: Option<&mut C>,
        width: f64,
    ) -> (DebounceAction, Option<GardenStats>) {
        let action = self.debouncer.poll(now);
        let stats = match action {
            DebounceAction::Fire { .. } => {
                let stats = self.garden.rebuild(container, width);
                if stats.is_some() {
                    self.builds += 1;
                }
                stats
            }
            DebounceAction::Idle | DebounceAction::Wait(_) => None,
        };
        (action, stats)
    }

    /// Drop any pending rebuild.
    pub fn cancel_pending(&mut self) -> bool {
        self.debouncer.cancel()
    }
}
