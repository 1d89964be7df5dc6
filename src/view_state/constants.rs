//! Class names and fixed offsets shared by the engine and surfaces.

/// List root container.
pub const CLASS_LIST: &str = "vlist";
/// Slot root (an item node).
pub const CLASS_ITEM: &str = "vlist-item";
/// Slot prefix icon.
pub const CLASS_PREFIX_ICON: &str = "prefix-icon";
/// Slot text content.
pub const CLASS_CONTENT: &str = "content";
/// Slot suffix icon.
pub const CLASS_SUFFIX_ICON: &str = "suffix-icon";
/// Leading spacer.
pub const CLASS_SPACER_PRE: &str = "spacer-pre";
/// Trailing spacer.
pub const CLASS_SPACER_POST: &str = "spacer-post";

/// Slot state: bound record is selected.
pub const CLASS_SELECTED: &str = "selected";
/// Slot state: prefix icon column collapsed.
pub const CLASS_NO_PREFIX_ICON: &str = "no-prefix-icon";
/// Slot state: suffix icon column collapsed.
pub const CLASS_NO_SUFFIX_ICON: &str = "no-suffix-icon";

/// Classes the binder owns on a slot root. Rebinding resets exactly these;
/// caller classes are left alone.
pub const STATE_CLASSES: [&str; 3] = [CLASS_SELECTED, CLASS_NO_PREFIX_ICON, CLASS_NO_SUFFIX_ICON];

/// Root flag: the selection is non-empty.
pub const CLASS_SELECTION_ACTIVE: &str = "selection-active";
/// Root flag: hover highlight is active.
pub const CLASS_HOVER: &str = "hover";
/// Root flag: hover is frozen by the host.
pub const CLASS_HOVER_FROZEN: &str = "hover-frozen";

/// Floating drag feedback label.
pub const CLASS_DRAG_LABEL: &str = "drag-label";
/// Drag label is showing.
pub const CLASS_VISIBLE: &str = "visible";

/// Horizontal offset of the drag label from the pointer.
pub const DRAG_LABEL_OFFSET_X: i64 = 2;
/// Vertical offset of the drag label from the pointer.
pub const DRAG_LABEL_OFFSET_Y: i64 = 1;
