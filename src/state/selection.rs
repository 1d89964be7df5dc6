//! Selection controller.
//!
//! Owns the selected-index set and the range anchor. The `is_selected` flag on
//! each record is a mirror of the set and is written here only.

use crate::model::{DataSet, Record, RecordIndex};
use crate::surface::Modifiers;
use std::collections::BTreeSet;
use tracing::debug;

/// What a click did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A modifier gesture changed the selection.
    Changed,
    /// A modifier gesture was made but nothing changed (no target).
    Unchanged,
    /// Plain click with an empty selection: the drag arm step owns it.
    HandOffToDrag,
    /// Plain click with a non-empty selection: the selection is cleared once
    /// the button is released, unless a drag happens first.
    ClearPending,
}

/// Selected-record set with shift-range and ctrl/cmd-toggle gestures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionController {
    selected: BTreeSet<usize>,
    anchor: Option<RecordIndex>,
}

impl SelectionController {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a click on `target` with `modifiers`.
    ///
    /// # Behavior
    /// - shift: select `target`, plus the inclusive range to the anchor if one exists
    /// - ctrl/cmd (no shift): toggle `target`
    /// - none: nothing changes here; see [`ClickOutcome`]
    ///
    /// After a modifier gesture the anchor moves to `target`, or is cleared if
    /// the selection became empty.
    pub fn click(
        &mut self,
        data: &mut DataSet,
        target: Option<RecordIndex>,
        modifiers: Modifiers,
    ) -> ClickOutcome {
        if !modifiers.any() {
            return if self.selected.is_empty() {
                ClickOutcome::HandOffToDrag
            } else {
                ClickOutcome::ClearPending
            };
        }
        let Some(target) = target.filter(|t| t.get() < data.len()) else {
            return ClickOutcome::Unchanged;
        };

        if modifiers.shift {
            self.select(data, target.get());
            if let Some(anchor) = self.anchor {
                let (low, high) = if anchor <= target {
                    (anchor.get(), target.get())
                } else {
                    (target.get(), anchor.get())
                };
                for index in low..=high.min(data.len().saturating_sub(1)) {
                    self.select(data, index);
                }
            }
        } else if self.selected.contains(&target.get()) {
            self.selected.remove(&target.get());
            data.set_selected(target.get(), false);
        } else {
            self.select(data, target.get());
        }

        self.anchor = if self.selected.is_empty() {
            None
        } else {
            Some(target)
        };
        debug!(
            target = target.get(),
            shift = modifiers.shift,
            selected = self.selected.len(),
            "Selection changed"
        );
        ClickOutcome::Changed
    }

    fn select(&mut self, data: &mut DataSet, index: usize) {
        self.selected.insert(index);
        data.set_selected(index, true);
    }

    /// Deselect everything and drop the anchor.
    pub fn clear(&mut self, data: &mut DataSet) {
        if !self.selected.is_empty() {
            debug!(cleared = self.selected.len(), "Selection cleared");
        }
        self.selected.clear();
        self.anchor = None;
        data.clear_selected();
    }

    /// Rebuild from the records' own `is_selected` flags. The anchor is reset.
    pub fn sync_from(&mut self, data: &DataSet) {
        self.selected = data.selected_indices().into_iter().map(|i| i.get()).collect();
        self.anchor = None;
    }

    /// Pick up the `is_selected` flag of a single patched record.
    pub fn sync_index(&mut self, data: &DataSet, index: usize) {
        match data.get(index) {
            Some(record) if record.is_selected => {
                self.selected.insert(index);
            }
            _ => {
                self.selected.remove(&index);
                if self.selected.is_empty() {
                    self.anchor = None;
                }
            }
        }
    }

    /// Selected records in dataset order.
    pub fn selected(&self, data: &DataSet) -> Vec<Record> {
        data.selected()
    }

    /// Selected indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }

    /// Number of selected records.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Whether the selection is non-empty (the selection-active flag).
    pub fn is_active(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Last record touched by a selection gesture.
    pub fn anchor(&self) -> Option<RecordIndex> {
        self.anchor
    }
}
