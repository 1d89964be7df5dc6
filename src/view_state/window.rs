//! Windowing engine: maps scroll offset to a window of the dataset and keeps
//! the slot pool bound to it.
//!
//! # Structure on the surface
//!
//! ```text
//! list (Container, .vlist)
//! ├── spacer-pre   (height = pre)
//! ├── slot 1 .. N  (Row, .vlist-item)
//! └── spacer-post  (height = post)
//! ```
//!
//! Scrolling never creates or destroys nodes; only `resize` changes the
//! number of slots.

use super::binder::DataBinder;
use super::constants::{CLASS_LIST, CLASS_SPACER_POST, CLASS_SPACER_PRE};
use super::geometry::WindowGeometry;
use super::slot_pool::{Slot, SlotPart, SlotPool};
use crate::model::{DataSet, RecordIndex};
use crate::surface::{NodeId, NodeKind, RenderSurface};
use std::ops::Range;
use tracing::{debug, trace};

/// The virtualization engine.
#[derive(Debug, Clone)]
pub struct WindowEngine {
    list: NodeId,
    pre_spacer: NodeId,
    post_spacer: NodeId,
    pool: SlotPool,
    geometry: WindowGeometry,
    current_top_index: Option<usize>,
    hide_broken_images: bool,
}

impl WindowEngine {
    /// Create the list container and its spacers. No slots exist until the
    /// first `resize`.
    pub fn new<S: RenderSurface>(surface: &mut S, hide_broken_images: bool) -> Self {
        let list = surface.create_node(NodeKind::Container);
        let pre_spacer = surface.create_node(NodeKind::Spacer);
        let post_spacer = surface.create_node(NodeKind::Spacer);
        surface.add_class(list, CLASS_LIST);
        surface.add_class(pre_spacer, CLASS_SPACER_PRE);
        surface.add_class(post_spacer, CLASS_SPACER_POST);
        surface.set_height(pre_spacer, 0);
        surface.set_height(post_spacer, 0);
        surface.append_child(list, pre_spacer);
        surface.append_child(list, post_spacer);

        Self {
            list,
            pre_spacer,
            post_spacer,
            pool: SlotPool::new(),
            geometry: WindowGeometry::default(),
            current_top_index: None,
            hide_broken_images,
        }
    }

    /// Assign `0..len` to every record's index. Runs after every structural
    /// dataset replacement.
    pub fn reindex(data: &mut DataSet) {
        data.reindex();
    }

    /// Recompute geometry, resize the pool to the new slot count, then force
    /// a render at the current top index.
    pub fn resize<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        data: &DataSet,
        viewport_height: i64,
        item_height: i64,
    ) {
        let geometry = WindowGeometry::compute(viewport_height, item_height, data.len());
        let target = geometry.slot_count();
        let current = self.pool.len();
        if target > current {
            self.pool.grow(
                surface,
                self.list,
                self.post_spacer,
                target - current,
                self.hide_broken_images,
            );
        } else if target < current {
            self.pool.shrink(surface, current - target);
        }
        self.geometry = geometry;
        debug!(
            viewport_height,
            item_height,
            item_count = data.len(),
            slots = target,
            max_scroll = geometry.max_scroll(),
            max_top_index = geometry.max_top_index(),
            "Window resized"
        );
        let top = self.current_top_index.unwrap_or(0);
        self.render(surface, data, top, true);
    }

    /// `floor(scroll_offset / item_height)`, not clamped at the bottom.
    pub fn map_scroll_to_index(&self, scroll_offset: i64) -> usize {
        self.geometry.top_index_for_scroll(scroll_offset)
    }

    /// Bind the window starting at `top_index` and size the spacers.
    ///
    /// No-op unless the top index changed or `force` is set. A forced render
    /// pulls the top index back into `0..=max_top_index`; scroll-driven
    /// renders use it as given. Slots whose index falls past the end keep
    /// their previous binding. Returns whether anything was rendered.
    pub fn render<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        data: &DataSet,
        top_index: usize,
        force: bool,
    ) -> bool {
        if !force && self.current_top_index == Some(top_index) {
            return false;
        }
        let top = if force {
            top_index.min(self.geometry.max_top_index())
        } else {
            top_index
        };
        self.bind_window(surface, data, top);

        let spacers = self.geometry.spacer_heights(top);
        surface.set_height(self.pre_spacer, spacers.pre);
        surface.set_height(self.post_spacer, spacers.post);
        self.current_top_index = Some(top);
        trace!(top, force, pre = spacers.pre, post = spacers.post, "Window rendered");
        true
    }

    /// Rebind every slot at the current top index, e.g. after selection changed.
    pub fn refresh<S: RenderSurface>(&mut self, surface: &mut S, data: &DataSet) {
        let top = self.current_top_index.unwrap_or(0);
        self.bind_window(surface, data, top);
    }

    /// Rebind the slot showing `index`, if it is inside the window.
    pub fn rebind_index<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        data: &DataSet,
        index: usize,
    ) -> bool {
        if !self.visible_range().contains(&index) {
            return false;
        }
        let Some(top) = self.current_top_index else {
            return false;
        };
        match (self.pool.get_mut(index - top), data.get(index)) {
            (Some(slot), Some(record)) => {
                DataBinder::apply(surface, slot, record);
                true
            }
            _ => false,
        }
    }

    fn bind_window<S: RenderSurface>(&mut self, surface: &mut S, data: &DataSet, top: usize) {
        for (offset, slot) in self.pool.iter_mut().enumerate() {
            if let Some(record) = data.get(top + offset) {
                DataBinder::apply(surface, slot, record);
            }
        }
    }

    /// Record indices the slots are bound to for the current top index,
    /// clipped to the dataset.
    pub fn visible_range(&self) -> Range<usize> {
        let Some(top) = self.current_top_index else {
            return 0..0;
        };
        let end = (top + self.pool.len()).min(self.geometry.item_count());
        top.min(end)..end
    }

    /// The slot owning `node` or its nearest ancestor, walking up until the
    /// list container.
    pub fn owning_slot<S: RenderSurface>(&self, surface: &S, node: NodeId) -> Option<&Slot> {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.list {
                return None;
            }
            if let Some((slot, SlotPart::Root)) = self.pool.find_node(id) {
                return Some(slot);
            }
            current = surface.parent(id);
        }
        None
    }

    /// Record index bound to the slot owning `node`.
    pub fn owning_index<S: RenderSurface>(&self, surface: &S, node: NodeId) -> Option<RecordIndex> {
        self.owning_slot(surface, node).and_then(Slot::bound_index)
    }

    /// Whether `node` is the list container or inside it.
    pub fn contains_node<S: RenderSurface>(&self, surface: &S, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.list {
                return true;
            }
            current = surface.parent(id);
        }
        false
    }

    /// List container node.
    pub fn list(&self) -> NodeId {
        self.list
    }

    /// Leading spacer node.
    pub fn pre_spacer(&self) -> NodeId {
        self.pre_spacer
    }

    /// Trailing spacer node.
    pub fn post_spacer(&self) -> NodeId {
        self.post_spacer
    }

    /// Slot pool.
    pub fn pool(&self) -> &SlotPool {
        &self.pool
    }

    /// Current geometry.
    pub fn geometry(&self) -> &WindowGeometry {
        &self.geometry
    }

    /// Top index of the last render.
    pub fn current_top_index(&self) -> Option<usize> {
        self.current_top_index
    }
}

#[cfg(test)]
#[path = "window_tests.rs"]
mod tests;
