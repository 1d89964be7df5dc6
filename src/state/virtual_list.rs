//! The virtual list: owns the dataset, the windowing engine and the
//! interaction controllers, and exposes the public list operations.
//!
//! # Event handling
//!
//! [`VirtualList::handle_event`] runs one input event to completion: routing,
//! state changes, re-binding and root class updates. Listener notifications
//! produced on the way are queued and dispatched only after that, so a
//! listener always observes the final state of the event that caused it.
//! Listeners must not call back into the list synchronously; hosts that need
//! to react by mutating the list queue the work and apply it afterwards.

use super::drag::DragController;
use super::listeners::{Listener, ListenerKind, ListenerRegistry, Notification};
use super::router::{EventRouter, RouteContext};
use super::selection::SelectionController;
use crate::config::ListConfig;
use crate::model::{CopyMode, DataSet, Record};
use crate::surface::{InputEvent, ItemMetrics, NodeId, RenderSurface};
use crate::view_state::constants::{CLASS_HOVER, CLASS_HOVER_FROZEN, CLASS_SELECTION_ACTIVE};
use crate::view_state::{TextLayout, WindowEngine};
use tracing::{debug, trace, warn};

/// Virtualized list over a [`RenderSurface`].
pub struct VirtualList<S: RenderSurface> {
    surface: S,
    config: ListConfig,
    metrics: ItemMetrics,
    data: DataSet,
    window: WindowEngine,
    text_layout: TextLayout,
    selection: SelectionController,
    drag: DragController,
    router: EventRouter,
    listeners: ListenerRegistry,
    outbox: Vec<Notification>,
    list_height: i64,
}

impl<S: RenderSurface> std::fmt::Debug for VirtualList<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualList")
            .field("config", &self.config)
            .field("items", &self.data.len())
            .field("window", &self.window.visible_range())
            .field("selected", &self.selection.len())
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

impl<S: RenderSurface> VirtualList<S> {
    /// Build the list on `surface`. Item metrics are probed once, here.
    pub fn new(mut surface: S, config: ListConfig) -> Self {
        let metrics = surface.probe_item_metrics();
        let window = WindowEngine::new(&mut surface, config.hide_broken_image_icons);
        let drag = DragController::new(&mut surface, window.list());
        let mut list = Self {
            surface,
            config,
            metrics,
            data: DataSet::new(),
            window,
            text_layout: TextLayout::new(config.menu_text_width_correction_offset),
            selection: SelectionController::new(),
            drag,
            router: EventRouter::new(),
            listeners: ListenerRegistry::new(),
            outbox: Vec::new(),
            list_height: 0,
        };
        list.recompute_dimensions(true);
        list.apply_root_classes();
        debug!(?config, ?metrics, "Virtual list created");
        list
    }

    // ===== dataset =====

    /// Replace every record.
    ///
    /// `Deep` copies rich content so later in-place changes to `records` are
    /// not seen by the list. The selection is rebuilt from the records' own
    /// `is_selected` flags and the anchor is dropped.
    pub fn update_full_dataset(&mut self, records: &[Record], mode: CopyMode) {
        self.data.replace_from(records, mode);
        WindowEngine::reindex(&mut self.data);
        self.selection.sync_from(&self.data);
        debug!(items = self.data.len(), ?mode, selected = self.selection.len(), "Dataset replaced");
        self.resize();
        self.apply_root_classes();
    }

    /// Take `records[index]` into the dataset and rebind it if it is
    /// currently on screen. Out-of-range indices are ignored.
    pub fn update_one_record(&mut self, records: &[Record], index: usize) {
        let Some(record) = records.get(index) else {
            warn!(index, len = records.len(), "update_one_record: index outside caller records");
            return;
        };
        if !self.data.patch(index, record.clone()) {
            warn!(index, items = self.data.len(), "update_one_record: index outside dataset");
            return;
        }
        self.selection.sync_index(&self.data, index);
        let rebound = self.window.rebind_index(&mut self.surface, &self.data, index);
        trace!(index, rebound, "Record patched");
        self.apply_root_classes();
    }

    /// Selected records in dataset order.
    pub fn selected_records(&self) -> Vec<Record> {
        self.selection.selected(&self.data)
    }

    // ===== listeners =====

    /// Register a listener. The same `Rc` is only kept once per kind.
    pub fn add_listener(&mut self, kind: ListenerKind, listener: Listener) -> bool {
        self.listeners.add(kind, listener)
    }

    /// Unregister a listener by identity.
    pub fn remove_listener(&mut self, kind: ListenerKind, listener: &Listener) -> bool {
        self.listeners.remove(kind, listener)
    }

    // ===== scrolling =====

    /// Scroll offset of the list container.
    pub fn scroll_position(&self) -> i64 {
        self.surface.scroll_offset(self.window.list())
    }

    /// Scroll the list container and re-render for the resulting offset.
    pub fn set_scroll_position(&mut self, offset: i64) {
        self.surface.set_scroll_offset(self.window.list(), offset);
        self.on_scroll();
    }

    /// Scroll so that `index` is visible with the given margins, moving as
    /// little as possible, or put it at the top when `force_to_top` is set.
    pub fn ensure_index_visible(
        &mut self,
        index: usize,
        top_margin: i64,
        bottom_margin: i64,
        force_to_top: bool,
    ) {
        let item_height = self.metrics.item_height();
        let item_top = index as i64 * item_height;
        let scroll = self.scroll_position();
        if force_to_top || item_top - top_margin < scroll {
            self.set_scroll_position(item_top - top_margin);
        } else if item_top + item_height + bottom_margin > scroll + self.list_height {
            self.set_scroll_position(item_top + item_height + bottom_margin - self.list_height);
        }
    }

    fn on_scroll(&mut self) {
        let offset = self.scroll_position();
        let top = self.window.map_scroll_to_index(offset);
        self.window.render(&mut self.surface, &self.data, top, false);
    }

    /// One item row per notch. At the bottom, when the viewport is not a
    /// whole number of rows, the partial row is added back so the last row
    /// stays flush with the bottom edge.
    fn scroll_by_notches(&mut self, notches: i32) {
        let item_height = self.metrics.item_height();
        let top = self.window.map_scroll_to_index(self.scroll_position()) as i64;
        let remainder = self.list_height.rem_euclid(item_height);
        let max_scroll = self.window.geometry().max_scroll();
        let at_max = max_scroll > 0 && self.scroll_position() >= max_scroll;
        let edge = if at_max && remainder != 0 {
            item_height - remainder
        } else {
            0
        };
        let target = (top + i64::from(notches)) * item_height + edge;
        trace!(notches, top, edge, target, "Wheel scroll");
        self.set_scroll_position(target);
    }

    // ===== options =====

    /// Keep the hover highlight while a selection exists.
    pub fn set_selected_plus_hover_state(&mut self, enabled: bool) {
        self.config.selected_plus_hover = enabled;
        self.apply_root_classes();
    }

    /// Change the text width correction and re-apply the width rule.
    pub fn set_text_width_correction_offset(&mut self, offset: i32) {
        self.config.menu_text_width_correction_offset = offset;
        self.text_layout.set_correction_offset(offset);
        self.relayout(true);
    }

    /// Freeze hover while the host shows something over the list. Presses
    /// stop reaching the selection and drag logic until unfrozen.
    pub fn freeze_hover(&mut self, frozen: bool) {
        self.router.set_hover_frozen(frozen);
        self.apply_root_classes();
    }

    /// Re-measure the list. Re-windows when its height changed (or `force`),
    /// then re-applies the text width rule.
    pub fn recompute_dimensions(&mut self, force: bool) {
        let height = self.surface.measure(self.window.list()).height;
        if force || height != self.list_height {
            self.list_height = height;
            self.resize();
        }
        self.relayout(force);
    }

    fn resize(&mut self) {
        self.window.resize(
            &mut self.surface,
            &self.data,
            self.list_height,
            self.metrics.item_height(),
        );
    }

    fn relayout(&mut self, force: bool) {
        self.text_layout
            .relayout(&mut self.surface, self.window.list(), self.metrics, force);
    }

    // ===== events =====

    /// Process one input event to completion, then dispatch the
    /// notifications it produced.
    pub fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Press(_)
            | InputEvent::Move(_)
            | InputEvent::Release(_)
            | InputEvent::Click(_) => {
                let mut ctx = RouteContext {
                    surface: &mut self.surface,
                    data: &mut self.data,
                    window: &mut self.window,
                    selection: &mut self.selection,
                    drag: &mut self.drag,
                    outbox: &mut self.outbox,
                };
                self.router.route(&mut ctx, event);
            }
            InputEvent::Wheel { notches } => self.scroll_by_notches(*notches),
            InputEvent::Scroll => self.on_scroll(),
            InputEvent::Resize | InputEvent::Overflow | InputEvent::Underflow => self.relayout(false),
            InputEvent::Key(key) => trace!(%key, "Key ignored"),
        }
        self.apply_root_classes();
        self.flush();
    }

    fn flush(&mut self) {
        for notification in std::mem::take(&mut self.outbox) {
            trace!(
                kind = ?notification.kind,
                tag = notification.event.tag.map(|t| t.as_str()),
                "Dispatching notification"
            );
            self.listeners.dispatch(&notification);
        }
    }

    fn apply_root_classes(&mut self) {
        let list = self.window.list();
        let active = self.selection.is_active();
        let hover = !active || self.config.selected_plus_hover;
        toggle_class(&mut self.surface, list, CLASS_SELECTION_ACTIVE, active);
        toggle_class(&mut self.surface, list, CLASS_HOVER, hover);
        toggle_class(&mut self.surface, list, CLASS_HOVER_FROZEN, self.router.hover_frozen());
    }

    // ===== accessors =====

    /// Render surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Render surface, mutably. Call [`recompute_dimensions`](Self::recompute_dimensions)
    /// after changing its geometry.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Current options.
    pub fn config(&self) -> ListConfig {
        self.config
    }

    /// Probed item metrics.
    pub fn metrics(&self) -> ItemMetrics {
        self.metrics
    }

    /// Backing records.
    pub fn data(&self) -> &DataSet {
        &self.data
    }

    /// Windowing engine.
    pub fn window(&self) -> &WindowEngine {
        &self.window
    }

    /// Selection state.
    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// Drag state.
    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    /// Router flags.
    pub fn router(&self) -> &EventRouter {
        &self.router
    }

    /// Text width rule state.
    pub fn text_layout(&self) -> &TextLayout {
        &self.text_layout
    }

    /// List container node.
    pub fn list_node(&self) -> NodeId {
        self.window.list()
    }

    /// Last measured list height.
    pub fn list_height(&self) -> i64 {
        self.list_height
    }
}

fn toggle_class<S: RenderSurface>(surface: &mut S, node: NodeId, class: &str, on: bool) {
    if on {
        surface.add_class(node, class);
    } else {
        surface.remove_class(node, class);
    }
}

#[cfg(test)]
#[path = "virtual_list_tests.rs"]
mod tests;
