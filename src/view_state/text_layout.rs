//! Content width rule for item rows.
//!
//! Rows are laid out as `[prefix icon][text][suffix icon]`. The text column
//! width is recomputed from the measured list width whenever the list is
//! resized, overflows or underflows, and is pushed to the surface as a
//! single rule shared by every slot.

use crate::surface::{ItemMetrics, NodeId, RenderSurface};
use tracing::debug;

/// Tracks the last list width the text rule was computed for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextLayout {
    last_width: Option<i64>,
    correction_offset: i32,
}

impl TextLayout {
    /// New layout with a signed correction added to every computed width.
    pub fn new(correction_offset: i32) -> Self {
        Self {
            last_width: None,
            correction_offset,
        }
    }

    /// Change the correction. Takes effect on the next forced relayout.
    pub fn set_correction_offset(&mut self, offset: i32) {
        self.correction_offset = offset;
    }

    /// Current correction.
    pub fn correction_offset(&self) -> i32 {
        self.correction_offset
    }

    /// List width the current rule was computed for.
    pub fn last_width(&self) -> Option<i64> {
        self.last_width
    }

    /// Text width for a given list width.
    pub fn text_width(&self, list_width: i64, metrics: ItemMetrics) -> i64 {
        list_width - metrics.prefix_width() - metrics.suffix_width()
            + i64::from(self.correction_offset)
    }

    /// Re-measure `list` and inject a new width rule if its width changed.
    ///
    /// Returns the injected text width, or `None` when the width was
    /// unchanged and `force` was not set.
    pub fn relayout<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        list: NodeId,
        metrics: ItemMetrics,
        force: bool,
    ) -> Option<i64> {
        let width = surface.measure(list).width;
        if !force && self.last_width == Some(width) {
            return None;
        }
        let text_width = self.text_width(width, metrics);
        surface.inject_item_width_rule(text_width);
        self.last_width = Some(width);
        debug!(list_width = width, text_width, "Item text width updated");
        Some(text_width)
    }
}
