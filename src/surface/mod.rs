//! Render surface seam.
//!
//! The engine never touches a concrete UI toolkit. Everything it needs from
//! the outside world (creating nodes, toggling classes, setting heights,
//! measuring boxes, scrolling, injecting the per-item width rule) goes through
//! [`RenderSurface`]. Events flow the other way: the host translates its raw
//! input into [`InputEvent`]s and hands them to
//! [`VirtualList::handle_event`](crate::state::VirtualList::handle_event).
//!
//! Domain state is never stored on surface nodes. Nodes are opaque
//! [`NodeId`] handles; the engine keeps its own slot records.

pub mod event;
pub mod memory;

pub use event::{InputEvent, Modifiers, PointerButton, PointerEvent};
pub use memory::{ImageState, MemorySurface, Node};

use crate::model::RichNode;
use thiserror::Error;

/// Opaque handle to a node owned by the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Wrap a raw surface handle.
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw handle value.
    pub fn get(&self) -> u32 {
        self.0
    }
}

/// What a node is for; surfaces lay nodes out by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Scrolling container. Children flow vertically.
    Container,
    /// One list row. Children flow horizontally.
    Row,
    /// Text content.
    Text,
    /// Image (icon).
    Image,
    /// Filler with an explicit height.
    Spacer,
    /// Floating label positioned absolutely.
    Label,
}

/// Axis-aligned box in surface pixels. May have negative extents when
/// geometry degenerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: i64,
    /// Top edge.
    pub y: i64,
    /// Width.
    pub width: i64,
    /// Height.
    pub height: i64,
}

impl Rect {
    /// Create a rect.
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self { x, y, width, height }
    }

    /// Whether a point falls inside the rect.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Error returned when item metrics would be unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Item height must be >= 1 (got {0})")]
pub struct InvalidGeometry(pub u32);

/// Fixed per-item dimensions learned once by probing the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemMetrics {
    item_height: u32,
    prefix_width: u32,
    suffix_width: u32,
}

impl ItemMetrics {
    /// Smart constructor: item height must be at least 1.
    pub fn new(item_height: u32, prefix_width: u32, suffix_width: u32) -> Result<Self, InvalidGeometry> {
        if item_height == 0 {
            return Err(InvalidGeometry(item_height));
        }
        Ok(Self {
            item_height,
            prefix_width,
            suffix_width,
        })
    }

    /// Row height.
    pub fn item_height(&self) -> i64 {
        i64::from(self.item_height)
    }

    /// Prefix icon column width.
    pub fn prefix_width(&self) -> i64 {
        i64::from(self.prefix_width)
    }

    /// Suffix icon column width.
    pub fn suffix_width(&self) -> i64 {
        i64::from(self.suffix_width)
    }
}

impl Default for ItemMetrics {
    fn default() -> Self {
        Self {
            item_height: 1,
            prefix_width: 2,
            suffix_width: 2,
        }
    }
}

/// Primitive element operations the engine depends on.
///
/// Implementations own the node tree. Style concerns (what a class looks
/// like) belong to the implementation; the engine only names classes.
pub trait RenderSurface {
    /// Create a detached node.
    fn create_node(&mut self, kind: NodeKind) -> NodeId;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Insert `child` into `parent` directly before `reference`.
    fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId);

    /// Detach and destroy `node` with its subtree.
    fn remove_node(&mut self, node: NodeId);

    /// Parent of a node, if attached.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Replace a node's content with plain text.
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Replace a node's content with a fresh clone of `content`.
    fn set_rich_content(&mut self, node: NodeId, content: &RichNode);

    /// Add a class.
    fn add_class(&mut self, node: NodeId, class: &str);

    /// Remove a class.
    fn remove_class(&mut self, node: NodeId, class: &str);

    /// Whether a node carries a class.
    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Set an attribute.
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    /// Remove an attribute.
    fn remove_attribute(&mut self, node: NodeId, name: &str);

    /// Set an explicit height in pixels.
    fn set_height(&mut self, node: NodeId, height: i64);

    /// Set opacity in `[0.0, 1.0]`.
    fn set_opacity(&mut self, node: NodeId, opacity: f32);

    /// Position an absolutely placed node.
    fn set_position(&mut self, node: NodeId, x: i64, y: i64);

    /// Set an image node's source.
    fn set_image_source(&mut self, node: NodeId, url: &str);

    /// Install or remove the hook that hides an image whose source failed to
    /// load instead of showing a broken-image glyph.
    fn set_hide_on_error(&mut self, node: NodeId, enabled: bool);

    /// Bounding box of a node.
    fn measure(&self, node: NodeId) -> Rect;

    /// Current scroll offset of a container.
    fn scroll_offset(&self, node: NodeId) -> i64;

    /// Scroll a container. Surfaces clamp to their scrollable range.
    fn set_scroll_offset(&mut self, node: NodeId, offset: i64);

    /// The single stylesheet injection point: width of each item's text column.
    fn inject_item_width_rule(&mut self, text_width: i64);

    /// One-time geometry probe for fixed item dimensions.
    fn probe_item_metrics(&mut self) -> ItemMetrics;
}
