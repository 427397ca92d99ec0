#![forbid(unsafe_code)]

//! Container seam between the garden builder and the page.
//!
//! The builder never mutates a document directly. A [`GardenContainer`]
//! first prepares a batch from built rows without touching the page, then
//! swaps it in for the stale rows. A host failure while preparing leaves the
//! existing garden in place. The web crate backs the seam with the live DOM
//! and [`MemoryContainer`] backs it in tests.

use std::convert::Infallible;

use crate::builder::ROW_CLASS;
use crate::element::Element;

/// Something that can hold garden rows.
pub trait GardenContainer {
    /// Error raised by the host while mutating the container.
    type Error: core::fmt::Display;

    /// Host-side form of a batch of rows, ready to insert.
    type Batch;

    /// Materialize `rows` without mutating the container.
    fn prepare_rows(&mut self, rows: &[Element]) -> Result<Self::Batch, Self::Error>;

    /// Insert `batch` in one operation and remove the rows that were there
    /// before, returning how many were removed.
    fn swap_rows(&mut self, batch: Self::Batch) -> Result<usize, Self::Error>;

    /// Remove every row element at any depth, returning how many were removed.
    fn clear_rows(&mut self) -> Result<usize, Self::Error>;
}

/// In-memory container that records what a host would have done.
///
/// Non-row children (e.g. a static background element) are preserved across
/// rebuilds, matching a DOM container whose markup includes other decoration.
/// Rows nested inside such children are removed like `querySelectorAll(".row")`
/// would find them.
#[derive(Debug, Clone, Default)]
pub struct MemoryContainer {
    children: Vec<Element>,
    append_batches: usize,
    removed_total: usize,
}

impl MemoryContainer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Container that starts with pre-existing children.
    #[must_use]
    pub fn with_children(children: Vec<Element>) -> Self {
        Self {
            children,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Direct children that are garden rows.
    pub fn rows(&self) -> impl Iterator<Item = &Element> + '_ {
        self.children.iter().filter(|c| c.has_class(ROW_CLASS))
    }

    /// Number of batches swapped in so far.
    #[must_use]
    pub const fn append_batches(&self) -> usize {
        self.append_batches
    }

    /// Rows removed across all clears.
    #[must_use]
    pub const fn removed_total(&self) -> usize {
        self.removed_total
    }

    /// Flowers currently in the container.
    #[must_use]
    pub fn flower_count(&self) -> usize {
        self.rows().map(|row| row.count_class("sunflower")).sum()
    }
}

impl MemoryContainer {
    fn remove_rows(&mut self) -> usize {
        let before = self.children.len();
        self.children.retain(|c| !c.has_class(ROW_CLASS));
        let mut removed = before - self.children.len();
        for child in &mut self.children {
            removed += child.remove_descendants_with_class(ROW_CLASS);
        }
        self.removed_total += removed;
        removed
    }
}

impl GardenContainer for MemoryContainer {
    type Error = Infallible;
    type Batch = Vec<Element>;

    fn prepare_rows(&mut self, rows: &[Element]) -> Result<Self::Batch, Self::Error> {
        Ok(rows.to_vec())
    }

    fn swap_rows(&mut self, batch: Self::Batch) -> Result<usize, Self::Error> {
        let removed = self.remove_rows();
        self.children.extend(batch);
        self.append_batches += 1;
        Ok(removed)
    }

    fn clear_rows(&mut self) -> Result<usize, Self::Error> {
        Ok(self.remove_rows())
    }
}
