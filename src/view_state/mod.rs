//! View-state layer - windowing, slot recycling and record binding
//!
//! This module owns everything that turns a dataset and a scroll offset into
//! a bounded set of bound nodes on a [`RenderSurface`](crate::surface::RenderSurface).
//!
//! # Module Structure
//!
//! - `constants`: Class names and fixed offsets shared with the surface
//! - `geometry`: WindowGeometry - slot count, spacer heights, scroll bounds
//! - `slot_pool`: Slot / SlotPool - reusable visual units in display order
//! - `binder`: DataBinder - record → slot projection
//! - `window`: WindowEngine - scroll → top index → bound window
//! - `text_layout`: TextLayout - shared text column width rule

pub mod binder;
pub mod constants;
pub mod geometry;
pub mod slot_pool;
pub mod text_layout;
pub mod window;

pub use binder::DataBinder;
pub use geometry::{SpacerHeights, WindowGeometry};
pub use slot_pool::{Slot, SlotPart, SlotPool};
pub use text_layout::TextLayout;
pub use window::WindowEngine;
