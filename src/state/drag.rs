//! Drag controller: Idle → Armed → Dragging → Idle.
//!
//! Arming records the record under the press. The first pointer move after
//! arming starts the drag; while dragging, a floating label showing the
//! selection size follows the pointer.

use crate::model::RecordIndex;
use crate::surface::{NodeId, NodeKind, RenderSurface};
use crate::view_state::constants::{
    CLASS_DRAG_LABEL, CLASS_VISIBLE, DRAG_LABEL_OFFSET_X, DRAG_LABEL_OFFSET_Y,
};
use tracing::debug;

/// Drag state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// Pressed with a selection, pointer not moved yet.
    Armed {
        /// Record under the press, if any.
        origin: Option<RecordIndex>,
    },
    /// Pointer moved while armed.
    Dragging {
        /// Record under the initial press, if any.
        origin: Option<RecordIndex>,
    },
}

/// Drives [`DragState`] and the feedback label.
#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
    label: NodeId,
}

impl DragController {
    /// Create the (hidden) feedback label under `parent`.
    pub fn new<S: RenderSurface>(surface: &mut S, parent: NodeId) -> Self {
        let label = surface.create_node(NodeKind::Label);
        surface.add_class(label, CLASS_DRAG_LABEL);
        surface.append_child(parent, label);
        Self {
            state: DragState::Idle,
            label,
        }
    }

    /// Current state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Feedback label node.
    pub fn label(&self) -> NodeId {
        self.label
    }

    /// Whether the pointer has moved since arming.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Whether a press armed the drag and no move happened yet.
    pub fn is_armed(&self) -> bool {
        matches!(self.state, DragState::Armed { .. })
    }

    /// Idle → Armed. Ignored in any other state.
    pub fn arm(&mut self, origin: Option<RecordIndex>) {
        if self.state == DragState::Idle {
            self.state = DragState::Armed { origin };
            debug!(origin = origin.map(|o| o.get()), "Drag armed");
        }
    }

    /// Track a pointer move.
    ///
    /// Returns `Some(origin)` exactly once, on the Armed → Dragging
    /// transition. While dragging, the label shows `count` and follows the
    /// pointer.
    pub fn pointer_moved<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        x: i64,
        y: i64,
        count: usize,
    ) -> Option<Option<RecordIndex>> {
        let started = match self.state {
            DragState::Idle => return None,
            DragState::Armed { origin } => {
                self.state = DragState::Dragging { origin };
                debug!(origin = origin.map(|o| o.get()), selected = count, "Drag started");
                Some(origin)
            }
            DragState::Dragging { .. } => None,
        };
        surface.set_text(self.label, &label_text(count));
        surface.set_position(self.label, x + DRAG_LABEL_OFFSET_X, y + DRAG_LABEL_OFFSET_Y);
        surface.add_class(self.label, CLASS_VISIBLE);
        started
    }

    /// Any state → Idle, hiding the label. Runs on every release.
    pub fn end<S: RenderSurface>(&mut self, surface: &mut S) {
        if self.state != DragState::Idle {
            debug!(dragged = self.is_dragging(), "Drag ended");
        }
        self.state = DragState::Idle;
        surface.remove_class(self.label, CLASS_VISIBLE);
    }
}

fn label_text(count: usize) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{count} items")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{ItemMetrics, MemorySurface};

    fn fixture() -> (MemorySurface, DragController) {
        let mut surface = MemorySurface::new(40, 10, ItemMetrics::default());
        let list = surface.create_node(NodeKind::Container);
        let drag = DragController::new(&mut surface, list);
        (surface, drag)
    }

    #[test]
    fn starts_idle_with_hidden_label() {
        let (surface, drag) = fixture();
        assert_eq!(drag.state(), DragState::Idle);
        assert!(surface.has_class(drag.label(), CLASS_DRAG_LABEL));
        assert!(!surface.has_class(drag.label(), CLASS_VISIBLE));
    }

    #[test]
    fn move_while_idle_does_nothing() {
        let (mut surface, mut drag) = fixture();
        assert_eq!(drag.pointer_moved(&mut surface, 3, 3, 2), None);
        assert_eq!(drag.state(), DragState::Idle);
        assert!(!surface.has_class(drag.label(), CLASS_VISIBLE));
    }

    #[test]
    fn first_move_after_arm_starts_drag_once() {
        let (mut surface, mut drag) = fixture();
        let origin = Some(RecordIndex::new(4));
        drag.arm(origin);
        assert!(drag.is_armed());
        assert_eq!(drag.pointer_moved(&mut surface, 5, 6, 3), Some(origin));
        assert!(drag.is_dragging());
        assert_eq!(drag.pointer_moved(&mut surface, 7, 8, 3), None);
    }

    #[test]
    fn label_follows_pointer_with_offset() {
        let (mut surface, mut drag) = fixture();
        drag.arm(None);
        drag.pointer_moved(&mut surface, 10, 4, 3);
        let label = surface.node(drag.label()).unwrap();
        assert_eq!(label.position(), (12, 5));
        assert_eq!(label.text(), Some("3 items"));
        assert!(surface.has_class(drag.label(), CLASS_VISIBLE));
    }

    #[test]
    fn arm_is_ignored_while_dragging() {
        let (mut surface, mut drag) = fixture();
        drag.arm(Some(RecordIndex::new(1)));
        drag.pointer_moved(&mut surface, 0, 0, 1);
        drag.arm(Some(RecordIndex::new(2)));
        assert_eq!(
            drag.state(),
            DragState::Dragging {
                origin: Some(RecordIndex::new(1))
            }
        );
    }

    #[test]
    fn end_returns_to_idle_and_hides_label() {
        let (mut surface, mut drag) = fixture();
        drag.arm(None);
        drag.pointer_moved(&mut surface, 1, 1, 1);
        assert_eq!(surface.node(drag.label()).unwrap().text(), Some("1 item"));
        drag.end(&mut surface);
        assert_eq!(drag.state(), DragState::Idle);
        assert!(!surface.has_class(drag.label(), CLASS_VISIBLE));
    }

    #[test]
    fn end_from_armed_skips_drag() {
        let (mut surface, mut drag) = fixture();
        drag.arm(None);
        drag.end(&mut surface);
        assert_eq!(drag.state(), DragState::Idle);
    }
}
