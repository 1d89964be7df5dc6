//! Paints a [`MemorySurface`] list into a ratatui buffer.
//!
//! Surface pixels map one-to-one onto terminal cells, with the surface origin
//! at the top-left of the widget area. Everything is clipped to the list
//! container, except the drag label which floats over the whole area.

use super::styles::ListStyles;
use crate::surface::{MemorySurface, NodeId, NodeKind, Rect as SurfaceRect};
use crate::view_state::constants::{CLASS_HOVER, CLASS_SELECTED, CLASS_VISIBLE};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use std::collections::HashMap;

/// Widget drawing one list container of a memory surface.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceView<'a> {
    surface: &'a MemorySurface,
    list: NodeId,
    styles: ListStyles,
    hover_row: Option<NodeId>,
}

impl<'a> SurfaceView<'a> {
    /// Paint `list` from `surface`.
    pub fn new(surface: &'a MemorySurface, list: NodeId, styles: ListStyles) -> Self {
        Self {
            surface,
            list,
            styles,
            hover_row: None,
        }
    }

    /// Row under the pointer. Highlighted only while the list carries the
    /// hover class.
    pub fn hover_row(mut self, row: Option<NodeId>) -> Self {
        self.hover_row = row;
        self
    }

    fn paint_row(&self, buf: &mut Buffer, layout: &HashMap<NodeId, SurfaceRect>, area: Rect, clip: Rect, row: NodeId) {
        let Some(node) = self.surface.node(row) else {
            return;
        };
        let Some(rect) = layout.get(&row) else {
            return;
        };
        let Some(row_area) = to_area(*rect, area).map(|a| a.intersection(clip)) else {
            return;
        };
        if row_area.is_empty() {
            return;
        }

        let mut style = self.styles.row();
        if node.classes().contains(CLASS_SELECTED) {
            style = style.patch(self.styles.selected());
        } else if self.hover_row == Some(row) && self.list_has_class(CLASS_HOVER) {
            style = style.patch(self.styles.hover());
        }
        buf.set_style(row_area, style);

        for &child in node.children() {
            let Some(child_node) = self.surface.node(child) else {
                continue;
            };
            let Some(child_rect) = layout.get(&child) else {
                continue;
            };
            match child_node.kind() {
                NodeKind::Image => {
                    if child_rect.width <= 0 {
                        continue;
                    }
                    if let Some((glyph, icon_style)) = self.styles.icon(self.surface.image_state(child)) {
                        put(buf, area, clip, child_rect.x, child_rect.y, glyph, child_rect.width, icon_style);
                    }
                }
                NodeKind::Text => {
                    let text = self.surface.rendered_text(child);
                    put(buf, area, clip, child_rect.x, child_rect.y, &text, child_rect.width, Style::default());
                }
                _ => {}
            }
        }
    }

    fn paint_label(&self, buf: &mut Buffer, layout: &HashMap<NodeId, SurfaceRect>, area: Rect, label: NodeId) {
        let Some(node) = self.surface.node(label) else {
            return;
        };
        if !node.classes().contains(CLASS_VISIBLE) {
            return;
        }
        let (Some(rect), Some(text)) = (layout.get(&label), node.text()) else {
            return;
        };
        put(buf, area, area, rect.x, rect.y, text, rect.width, self.styles.drag_label());
    }

    fn list_has_class(&self, class: &str) -> bool {
        self.surface
            .node(self.list)
            .is_some_and(|n| n.classes().contains(class))
    }
}

impl Widget for SurfaceView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = self.surface.layout();
        let Some(list_rect) = layout.get(&self.list) else {
            return;
        };
        let Some(clip) = to_area(*list_rect, area) else {
            return;
        };
        let Some(list) = self.surface.node(self.list) else {
            return;
        };

        let mut labels = Vec::new();
        for &child in list.children() {
            match self.surface.node(child).map(|n| n.kind()) {
                Some(NodeKind::Row) => self.paint_row(buf, &layout, area, clip, child),
                Some(NodeKind::Label) => labels.push(child),
                _ => {}
            }
        }
        // Labels float above the rows.
        for label in labels {
            self.paint_label(buf, &layout, area, label);
        }
    }
}

/// Convert a surface rect (relative to `area`'s origin) into terminal cells,
/// clipped to `area`.
fn to_area(rect: SurfaceRect, area: Rect) -> Option<Rect> {
    let left = rect.x.max(0);
    let top = rect.y.max(0);
    let right = (rect.x + rect.width).min(i64::from(area.width));
    let bottom = (rect.y + rect.height).min(i64::from(area.height));
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(
        area.x + u16::try_from(left).ok()?,
        area.y + u16::try_from(top).ok()?,
        u16::try_from(right - left).ok()?,
        u16::try_from(bottom - top).ok()?,
    ))
}

/// Write `text` on the first line of a surface box, cut to `width` and `clip`.
#[allow(clippy::too_many_arguments)]
fn put(buf: &mut Buffer, area: Rect, clip: Rect, x: i64, y: i64, text: &str, width: i64, style: Style) {
    let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
        return;
    };
    let (x, y) = (area.x.saturating_add(x), area.y.saturating_add(y));
    if y < clip.top() || y >= clip.bottom() || x < clip.left() || x >= clip.right() {
        return;
    }
    let room = usize::from(clip.right() - x);
    let width = usize::try_from(width).unwrap_or(0).min(room);
    if width == 0 {
        return;
    }
    buf.set_stringn(x, y, text, width, style);
}
