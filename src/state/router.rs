//! Pointer event routing.
//!
//! Press, move, release and click are routed here with a fixed precedence.
//! Wheel, scroll and layout notifications are handled by
//! [`VirtualList`](super::VirtualList) directly. The router never calls
//! listeners itself: it queues [`Notification`]s which the owner dispatches
//! once the handler has finished.

use super::drag::DragController;
use super::listeners::{EventTag, ListEvent, ListenerKind, Notification};
use super::selection::{ClickOutcome, SelectionController};
use crate::model::{DataSet, Record, RecordIndex};
use crate::surface::{InputEvent, PointerButton, PointerEvent, RenderSurface};
use crate::view_state::{SlotPart, WindowEngine};
use tracing::trace;

/// Disjoint borrows of everything a pointer handler touches.
pub struct RouteContext<'a, S: RenderSurface> {
    /// Render surface.
    pub surface: &'a mut S,
    /// Backing records.
    pub data: &'a mut DataSet,
    /// Windowing engine.
    pub window: &'a mut WindowEngine,
    /// Selection state.
    pub selection: &'a mut SelectionController,
    /// Drag state.
    pub drag: &'a mut DragController,
    /// Notifications queued for dispatch.
    pub outbox: &'a mut Vec<Notification>,
}

impl<S: RenderSurface> RouteContext<'_, S> {
    fn record(&self, index: Option<RecordIndex>) -> Option<Record> {
        index.and_then(|i| self.data.get(i.get()).cloned())
    }

    fn owning_index(&self, pointer: &PointerEvent) -> Option<RecordIndex> {
        pointer
            .target
            .and_then(|target| self.window.owning_index(&*self.surface, target))
    }

    fn notify(&mut self, kind: ListenerKind, event: ListEvent) {
        self.outbox.push(Notification { kind, event });
    }

    fn forward_mouse(&mut self, event: &InputEvent, pointer: &PointerEvent) {
        let record = self.record(self.owning_index(pointer));
        self.notify(ListenerKind::Mouse, ListEvent::plain(event.clone()).with_record(record));
    }

    fn refresh(&mut self) {
        self.window.refresh(&mut *self.surface, self.data);
    }
}

/// Flags that carry across pointer events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventRouter {
    clear_on_release: bool,
    suppress_next_click: bool,
    hover_frozen: bool,
}

impl EventRouter {
    /// Router with all flags cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a host freeze is in effect.
    pub fn hover_frozen(&self) -> bool {
        self.hover_frozen
    }

    /// Freeze or unfreeze hover. While frozen, presses do not reach the
    /// selection or drag machinery.
    pub fn set_hover_frozen(&mut self, frozen: bool) {
        self.hover_frozen = frozen;
    }

    /// Whether the current press will clear the selection on release.
    pub fn clear_on_release(&self) -> bool {
        self.clear_on_release
    }

    /// Whether the next click will be swallowed.
    pub fn suppress_next_click(&self) -> bool {
        self.suppress_next_click
    }

    /// Route one pointer event. Non-pointer events are ignored.
    pub fn route<S: RenderSurface>(&mut self, ctx: &mut RouteContext<'_, S>, event: &InputEvent) {
        match event {
            InputEvent::Press(pointer) => self.on_press(ctx, event, pointer),
            InputEvent::Move(pointer) => self.on_move(ctx, event, pointer),
            InputEvent::Release(pointer) => self.on_release(ctx, event, pointer),
            InputEvent::Click(pointer) => self.on_click(ctx, event, pointer),
            _ => {}
        }
    }

    fn on_press<S: RenderSurface>(
        &mut self,
        ctx: &mut RouteContext<'_, S>,
        event: &InputEvent,
        pointer: &PointerEvent,
    ) {
        // A click that never followed its release must not eat this one.
        self.suppress_next_click = false;
        if !self.hover_frozen && pointer.button == PointerButton::Primary {
            let target = ctx.owning_index(pointer);
            if pointer.modifiers.any() {
                let outcome = ctx.selection.click(ctx.data, target, pointer.modifiers);
                if outcome == ClickOutcome::Changed {
                    ctx.refresh();
                }
            } else if ctx.selection.is_active() {
                ctx.drag.arm(target);
                self.clear_on_release = true;
            }
        }
        ctx.forward_mouse(event, pointer);
    }

    fn on_move<S: RenderSurface>(
        &mut self,
        ctx: &mut RouteContext<'_, S>,
        event: &InputEvent,
        pointer: &PointerEvent,
    ) {
        let count = ctx.selection.len();
        if let Some(origin) = ctx.drag.pointer_moved(&mut *ctx.surface, pointer.x, pointer.y, count)
        {
            let record = ctx.record(origin);
            let selection = ctx.data.selected();
            ctx.notify(
                ListenerKind::DragDrop,
                ListEvent::tagged(event.clone(), EventTag::DragStart, record).with_selection(selection),
            );
        }
    }

    fn on_release<S: RenderSurface>(
        &mut self,
        ctx: &mut RouteContext<'_, S>,
        event: &InputEvent,
        pointer: &PointerEvent,
    ) {
        // 1. drop, while the drag state and selection are still intact
        let over_list = pointer
            .target
            .is_some_and(|target| ctx.window.contains_node(&*ctx.surface, target));
        if ctx.drag.is_dragging() && over_list {
            let record = ctx.record(ctx.owning_index(pointer));
            let selection = ctx.data.selected();
            ctx.notify(
                ListenerKind::DragDrop,
                ListEvent::tagged(event.clone(), EventTag::Drop, record).with_selection(selection),
            );
        }

        // 2. deferred clear, only for a press that never turned into a drag
        if self.clear_on_release {
            self.clear_on_release = false;
            if !ctx.drag.is_dragging() {
                ctx.selection.clear(ctx.data);
                ctx.refresh();
                self.suppress_next_click = true;
            }
        }

        // 3. end, always
        ctx.drag.end(&mut *ctx.surface);

        // 4.
        ctx.forward_mouse(event, pointer);
    }

    fn on_click<S: RenderSurface>(
        &mut self,
        ctx: &mut RouteContext<'_, S>,
        event: &InputEvent,
        pointer: &PointerEvent,
    ) {
        if self.suppress_next_click {
            self.suppress_next_click = false;
            trace!("Click after selection clear suppressed");
            return;
        }
        if pointer.modifiers.any() {
            // consumed by the selection gesture on press
            return;
        }
        let Some(target) = pointer.target else {
            ctx.forward_mouse(event, pointer);
            return;
        };

        let icon_hit = ctx.window.pool().find_node(target).and_then(|(slot, part)| {
            let tag = match part {
                SlotPart::PrefixIcon => EventTag::Action1Click,
                SlotPart::SuffixIcon => EventTag::Action2Click,
                SlotPart::Root | SlotPart::Content => return None,
            };
            Some((tag, slot.bound_index()))
        });
        if let Some((tag, index)) = icon_hit {
            let record = ctx.record(index);
            ctx.notify(ListenerKind::Action, ListEvent::tagged(event.clone(), tag, record));
            return;
        }

        if target == ctx.window.list() {
            return;
        }

        match ctx.owning_index(pointer) {
            Some(index) => {
                let record = ctx.record(Some(index));
                ctx.notify(
                    ListenerKind::Action,
                    ListEvent::tagged(event.clone(), EventTag::MenuItemClick, record),
                );
            }
            None => ctx.forward_mouse(event, pointer),
        }
    }
}
