//! Interaction state (pure).
//!
//! Selection, drag and event routing, plus the [`VirtualList`] facade that
//! ties them to the windowing engine. Nothing here touches a terminal; all
//! output goes through a [`RenderSurface`](crate::surface::RenderSurface).

pub mod drag;
pub mod listeners;
pub mod router;
pub mod selection;
pub mod virtual_list;

pub use drag::{DragController, DragState};
pub use listeners::{EventTag, ListEvent, Listener, ListenerKind, ListenerRegistry, Notification};
pub use router::{EventRouter, RouteContext};
pub use selection::{ClickOutcome, SelectionController};
pub use virtual_list::VirtualList;
