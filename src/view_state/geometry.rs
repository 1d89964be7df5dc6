//! Window geometry: slot count, spacer heights and scroll bounds.
//!
//! Pure arithmetic, no surface access. All heights are surface pixels.

/// Leading and trailing filler heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpacerHeights {
    /// Height above the first slot.
    pub pre: i64,
    /// Height below the last slot.
    pub post: i64,
}

/// Geometry derived from viewport height, item height and item count.
///
/// # Invariants
/// - `slot_count == min(ceil(viewport_height / item_height) + 1, item_count)`
/// - `fill_total_height == (item_count - slot_count) * item_height`
/// - `max_top_index == item_count - slot_count`
/// - for any top index, `pre + slot_count * item_height + post == item_count * item_height`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowGeometry {
    viewport_height: i64,
    item_height: i64,
    item_count: usize,
    slot_count: usize,
    fill_total_height: i64,
    max_scroll: i64,
    max_top_index: usize,
}

impl WindowGeometry {
    /// Compute geometry.
    ///
    /// A non-positive item height is treated as 1 and a negative viewport as 0;
    /// `ItemMetrics` rules the former out for probed metrics.
    pub fn compute(viewport_height: i64, item_height: i64, item_count: usize) -> Self {
        let item_height = item_height.max(1);
        let visible_rows = (viewport_height.max(0) + item_height - 1) / item_height;
        let slot_count = (visible_rows as usize).saturating_add(1).min(item_count);
        let count = item_count as i64;
        Self {
            viewport_height,
            item_height,
            item_count,
            slot_count,
            fill_total_height: (count - slot_count as i64) * item_height,
            max_scroll: count * item_height - viewport_height,
            max_top_index: item_count - slot_count,
        }
    }

    /// Viewport height used for the computation.
    pub fn viewport_height(&self) -> i64 {
        self.viewport_height
    }

    /// Row height.
    pub fn item_height(&self) -> i64 {
        self.item_height
    }

    /// Number of records.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Number of live slots (N).
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Combined spacer height.
    pub fn fill_total_height(&self) -> i64 {
        self.fill_total_height
    }

    /// Largest meaningful scroll offset. Negative when everything fits.
    pub fn max_scroll(&self) -> i64 {
        self.max_scroll
    }

    /// Largest top index that keeps every slot bound.
    pub fn max_top_index(&self) -> usize {
        self.max_top_index
    }

    /// Full virtual height of the list.
    pub fn total_height(&self) -> i64 {
        self.item_count as i64 * self.item_height
    }

    /// `floor(offset / item_height)`. Negative offsets map to 0; the upper end
    /// is deliberately not clamped to `max_top_index`.
    pub fn top_index_for_scroll(&self, scroll_offset: i64) -> usize {
        scroll_offset.max(0).div_euclid(self.item_height) as usize
    }

    /// Spacer heights for a window starting at `top_index`.
    pub fn spacer_heights(&self, top_index: usize) -> SpacerHeights {
        let wanted = (top_index as i64).saturating_mul(self.item_height);
        let pre = wanted.min(self.fill_total_height);
        SpacerHeights {
            pre,
            post: self.fill_total_height - pre,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousand_items_of_twenty_in_two_hundred() {
        let g = WindowGeometry::compute(200, 20, 1000);
        assert_eq!(g.slot_count(), 11);
        assert_eq!(g.max_top_index(), 989);
        assert_eq!(g.max_scroll(), 19800);
        assert_eq!(g.fill_total_height(), 989 * 20);
    }

    #[test]
    fn partial_rows_round_up() {
        let g = WindowGeometry::compute(210, 20, 1000);
        assert_eq!(g.slot_count(), 12);
    }

    #[test]
    fn slot_count_is_capped_by_item_count() {
        let g = WindowGeometry::compute(200, 20, 4);
        assert_eq!(g.slot_count(), 4);
        assert_eq!(g.max_top_index(), 0);
        assert_eq!(g.fill_total_height(), 0);
        assert_eq!(g.max_scroll(), -120);
    }

    #[test]
    fn empty_list_has_no_slots() {
        let g = WindowGeometry::compute(200, 20, 0);
        assert_eq!(g.slot_count(), 0);
        assert_eq!(g.spacer_heights(0), SpacerHeights { pre: 0, post: 0 });
    }

    #[test]
    fn zero_viewport_still_keeps_one_slot() {
        let g = WindowGeometry::compute(0, 20, 10);
        assert_eq!(g.slot_count(), 1);
    }

    #[test]
    fn spacers_sum_to_fill() {
        let g = WindowGeometry::compute(200, 20, 1000);
        let s = g.spacer_heights(500);
        assert_eq!(s.pre, 10000);
        assert_eq!(s.pre + s.post, g.fill_total_height());
    }

    #[test]
    fn pre_spacer_saturates_at_fill() {
        let g = WindowGeometry::compute(200, 20, 1000);
        let s = g.spacer_heights(5000);
        assert_eq!(s.pre, g.fill_total_height());
        assert_eq!(s.post, 0);
    }

    #[test]
    fn scroll_maps_by_floor() {
        let g = WindowGeometry::compute(200, 20, 1000);
        assert_eq!(g.top_index_for_scroll(0), 0);
        assert_eq!(g.top_index_for_scroll(19), 0);
        assert_eq!(g.top_index_for_scroll(20), 1);
        assert_eq!(g.top_index_for_scroll(-40), 0);
    }

    #[test]
    fn scroll_mapping_is_not_clamped_at_the_bottom() {
        let g = WindowGeometry::compute(200, 20, 1000);
        assert_eq!(g.top_index_for_scroll(g.max_scroll()), 990);
        assert!(g.top_index_for_scroll(g.max_scroll()) > g.max_top_index());
    }
}
