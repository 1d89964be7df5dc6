//! Retained in-memory render surface.
//!
//! Backs the terminal demo, the tests and the benches. It plays the part of
//! the external styling layer too: it knows that a row flagged
//! `no-prefix-icon` collapses its leading icon column, that the injected
//! width rule sizes every text column, and that a broken image with the
//! hide-on-error hook installed disappears.

use super::{ItemMetrics, NodeId, NodeKind, Rect, RenderSurface};
use crate::model::RichNode;
use crate::view_state::constants::{CLASS_NO_PREFIX_ICON, CLASS_NO_SUFFIX_ICON};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use unicode_width::UnicodeWidthStr;

/// One node in the memory surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: NodeKind,
    tag: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    text: Option<String>,
    height: Option<i64>,
    opacity: f32,
    position: (i64, i64),
    image_source: Option<String>,
    hide_on_error: bool,
    scroll_offset: i64,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            tag: None,
            parent: None,
            children: Vec::new(),
            classes: BTreeSet::new(),
            attributes: BTreeMap::new(),
            text: None,
            height: None,
            opacity: 1.0,
            position: (0, 0),
            image_source: None,
            hide_on_error: false,
            scroll_offset: 0,
        }
    }

    /// Node kind.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Tag of a rich content clone.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Parent handle.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child handles in order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Class set.
    pub fn classes(&self) -> &BTreeSet<String> {
        &self.classes
    }

    /// Attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Own text.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Explicit height.
    pub fn height(&self) -> Option<i64> {
        self.height
    }

    /// Opacity.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Absolute position (labels).
    pub fn position(&self) -> (i64, i64) {
        self.position
    }

    /// Image source.
    pub fn image_source(&self) -> Option<&str> {
        self.image_source.as_deref()
    }

    /// Whether the hide-on-error hook is installed.
    pub fn hides_on_error(&self) -> bool {
        self.hide_on_error
    }
}

/// How an image node currently presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageState {
    /// No source set.
    Empty,
    /// Source set but opacity is zero.
    Transparent,
    /// Source loaded.
    Loaded,
    /// Source failed and the broken-image glyph is showing.
    Broken,
    /// Source failed and the hide-on-error hook removed the node from view.
    Hidden,
}

/// In-memory implementation of [`RenderSurface`].
#[derive(Debug, Clone)]
pub struct MemorySurface {
    nodes: Vec<Option<Node>>,
    viewport_width: i64,
    viewport_height: i64,
    metrics: ItemMetrics,
    item_width_rule: Option<i64>,
    failing_images: HashSet<String>,
    probe_count: usize,
}

impl MemorySurface {
    /// Create a surface whose top-level containers measure `width x height`.
    pub fn new(width: i64, height: i64, metrics: ItemMetrics) -> Self {
        Self {
            nodes: Vec::new(),
            viewport_width: width,
            viewport_height: height,
            metrics,
            item_width_rule: None,
            failing_images: HashSet::new(),
            probe_count: 0,
        }
    }

    /// Change the size of top-level containers.
    pub fn set_viewport(&mut self, width: i64, height: i64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Make every image with this source fail to load.
    pub fn fail_image(&mut self, url: impl Into<String>) {
        self.failing_images.insert(url.into());
    }

    /// Last injected text width rule.
    pub fn item_width_rule(&self) -> Option<i64> {
        self.item_width_rule
    }

    /// How many times item metrics were probed.
    pub fn probe_count(&self) -> usize {
        self.probe_count
    }

    /// Look up a live node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.get() as usize).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.get() as usize).and_then(Option::as_mut)
    }

    /// Number of live nodes.
    pub fn live_node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Detached top-level containers, in creation order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(raw, node)| {
                let node = node.as_ref()?;
                (node.parent.is_none() && node.kind == NodeKind::Container)
                    .then(|| NodeId::new(raw as u32))
            })
            .collect()
    }

    /// Live nodes carrying `class`, in tree order.
    pub fn nodes_with_class(&self, class: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        for root in self.roots() {
            self.walk(root, &mut |id, node| {
                if node.classes.contains(class) {
                    out.push(id);
                }
            });
        }
        out
    }

    fn walk(&self, id: NodeId, visit: &mut dyn FnMut(NodeId, &Node)) {
        let Some(node) = self.node(id) else {
            return;
        };
        visit(id, node);
        for &child in &node.children {
            self.walk(child, visit);
        }
    }

    /// Text as displayed: own text, or the concatenated text of rich children.
    pub fn rendered_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.walk(id, &mut |_, node| {
            if let Some(text) = &node.text {
                out.push_str(text);
            }
        });
        out
    }

    /// Presentation state of an image node.
    pub fn image_state(&self, id: NodeId) -> ImageState {
        let Some(node) = self.node(id) else {
            return ImageState::Empty;
        };
        let Some(source) = node.image_source.as_deref() else {
            return ImageState::Empty;
        };
        let failed = self.failing_images.contains(source);
        if failed && node.hide_on_error {
            ImageState::Hidden
        } else if node.opacity <= 0.0 {
            ImageState::Transparent
        } else if failed {
            ImageState::Broken
        } else {
            ImageState::Loaded
        }
    }

    /// Lay out every top-level container.
    pub fn layout(&self) -> HashMap<NodeId, Rect> {
        let mut out = HashMap::new();
        for root in self.roots() {
            let rect = Rect::new(0, 0, self.viewport_width, self.viewport_height);
            self.layout_container(root, rect, &mut out);
        }
        out
    }

    /// Deepest non-label node under a point, clipped to its container.
    pub fn hit_test(&self, x: i64, y: i64) -> Option<NodeId> {
        let layout = self.layout();
        let root = self
            .roots()
            .into_iter()
            .find(|root| layout.get(root).is_some_and(|r| r.contains(x, y)))?;
        let mut current = root;
        'descend: loop {
            let node = self.node(current)?;
            for &child in node.children.iter().rev() {
                let is_label = self.node(child).is_some_and(|c| c.kind == NodeKind::Label);
                if is_label {
                    continue;
                }
                if layout.get(&child).is_some_and(|r| r.contains(x, y)) {
                    current = child;
                    continue 'descend;
                }
            }
            return Some(current);
        }
    }

    fn flow_height(&self, id: NodeId) -> i64 {
        let Some(node) = self.node(id) else {
            return 0;
        };
        node.height.unwrap_or(match node.kind {
            NodeKind::Row | NodeKind::Text | NodeKind::Image => self.metrics.item_height(),
            NodeKind::Container | NodeKind::Spacer | NodeKind::Label => 0,
        })
    }

    fn content_height(&self, id: NodeId) -> i64 {
        self.node(id)
            .map(|node| {
                node.children
                    .iter()
                    .filter(|&&c| self.node(c).is_some_and(|n| n.kind != NodeKind::Label))
                    .map(|&c| self.flow_height(c))
                    .sum()
            })
            .unwrap_or(0)
    }

    fn max_scroll(&self, id: NodeId) -> i64 {
        let visible = match self.node(id) {
            Some(node) if node.parent.is_none() => self.viewport_height,
            Some(_) => self.flow_height(id),
            None => 0,
        };
        (self.content_height(id) - visible).max(0)
    }

    fn layout_container(&self, id: NodeId, rect: Rect, out: &mut HashMap<NodeId, Rect>) {
        out.insert(id, rect);
        let Some(node) = self.node(id) else {
            return;
        };
        let mut y = rect.y - self.scroll_offset(id);
        for &child in &node.children {
            let Some(child_node) = self.node(child) else {
                continue;
            };
            if child_node.kind == NodeKind::Label {
                let (lx, ly) = child_node.position;
                let width = child_node.text.as_deref().map_or(0, |t| t.width() as i64);
                out.insert(child, Rect::new(lx, ly, width, 1));
                continue;
            }
            let height = self.flow_height(child);
            self.layout_node(child, Rect::new(rect.x, y, rect.width, height), out);
            y += height;
        }
    }

    fn layout_node(&self, id: NodeId, rect: Rect, out: &mut HashMap<NodeId, Rect>) {
        match self.node(id).map(|n| n.kind) {
            Some(NodeKind::Container) => self.layout_container(id, rect, out),
            Some(NodeKind::Row) => self.layout_row(id, rect, out),
            Some(_) => self.layout_fill(id, rect, out),
            None => {}
        }
    }

    fn layout_fill(&self, id: NodeId, rect: Rect, out: &mut HashMap<NodeId, Rect>) {
        out.insert(id, rect);
        if let Some(node) = self.node(id) {
            for &child in &node.children {
                self.layout_fill(child, rect, out);
            }
        }
    }

    fn icon_width(&self, row: &Node, image: NodeId, leading: bool) -> i64 {
        let (collapse_class, width) = if leading {
            (CLASS_NO_PREFIX_ICON, self.metrics.prefix_width())
        } else {
            (CLASS_NO_SUFFIX_ICON, self.metrics.suffix_width())
        };
        if row.classes.contains(collapse_class) || self.image_state(image) == ImageState::Hidden {
            0
        } else {
            width
        }
    }

    fn layout_row(&self, id: NodeId, rect: Rect, out: &mut HashMap<NodeId, Rect>) {
        out.insert(id, rect);
        let Some(row) = self.node(id) else {
            return;
        };
        let text_at = row
            .children
            .iter()
            .position(|&c| self.node(c).is_some_and(|n| n.kind == NodeKind::Text));
        let mut left = 0;
        let mut right = 0;
        for (position, &child) in row.children.iter().enumerate() {
            if self.node(child).map(|n| n.kind) != Some(NodeKind::Image) {
                continue;
            }
            let leading = text_at.is_none_or(|t| position < t);
            let width = self.icon_width(row, child, leading);
            let x = if leading {
                rect.x + left
            } else {
                rect.x + rect.width - right - width
            };
            out.insert(child, Rect::new(x, rect.y, width, rect.height));
            if leading {
                left += width;
            } else {
                right += width;
            }
        }
        if let Some(text_at) = text_at {
            let text = row.children[text_at];
            let width = self
                .item_width_rule
                .unwrap_or(rect.width - left - right);
            self.layout_fill(text, Rect::new(rect.x + left, rect.y, width, rect.height), out);
        }
    }

    fn detach(&mut self, node: NodeId) {
        let parent = self.node(node).and_then(|n| n.parent);
        if let Some(parent) = parent.and_then(|p| self.node_mut(p)) {
            parent.children.retain(|&c| c != node);
        }
        if let Some(n) = self.node_mut(node) {
            n.parent = None;
        }
    }

    fn destroy(&mut self, node: NodeId) {
        let children = self
            .node(node)
            .map(|n| n.children.clone())
            .unwrap_or_default();
        for child in children {
            self.destroy(child);
        }
        if let Some(entry) = self.nodes.get_mut(node.get() as usize) {
            *entry = None;
        }
    }

    fn clear_children(&mut self, node: NodeId) {
        let children = self
            .node_mut(node)
            .map(|n| std::mem::take(&mut n.children))
            .unwrap_or_default();
        for child in children {
            self.destroy(child);
        }
    }

    fn clone_rich(&mut self, parent: NodeId, content: &RichNode) {
        let id = self.create_node(NodeKind::Text);
        if let Some(node) = self.node_mut(id) {
            node.tag = Some(content.tag.clone());
            node.text = content.text.clone();
            node.classes = content.classes.iter().cloned().collect();
        }
        self.append_child(parent, id);
        for child in &content.children {
            self.clone_rich(id, child);
        }
    }
}

impl RenderSurface for MemorySurface {
    fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(Some(Node::new(kind)));
        id
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        if let Some(p) = self.node_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
    }

    fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        self.detach(child);
        if let Some(p) = self.node_mut(parent) {
            let at = p
                .children
                .iter()
                .position(|&c| c == reference)
                .unwrap_or(p.children.len());
            p.children.insert(at, child);
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
    }

    fn remove_node(&mut self, node: NodeId) {
        self.detach(node);
        self.destroy(node);
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.clear_children(node);
        if let Some(n) = self.node_mut(node) {
            n.text = Some(text.to_string());
        }
    }

    fn set_rich_content(&mut self, node: NodeId, content: &RichNode) {
        self.clear_children(node);
        if let Some(n) = self.node_mut(node) {
            n.text = None;
        }
        self.clone_rich(node, content);
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.node_mut(node) {
            n.classes.insert(class.to_string());
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.node_mut(node) {
            n.classes.remove(class);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).is_some_and(|n| n.classes.contains(class))
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(n) = self.node_mut(node) {
            n.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(n) = self.node_mut(node) {
            n.attributes.remove(name);
        }
    }

    fn set_height(&mut self, node: NodeId, height: i64) {
        if let Some(n) = self.node_mut(node) {
            n.height = Some(height);
        }
    }

    fn set_opacity(&mut self, node: NodeId, opacity: f32) {
        if let Some(n) = self.node_mut(node) {
            n.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    fn set_position(&mut self, node: NodeId, x: i64, y: i64) {
        if let Some(n) = self.node_mut(node) {
            n.position = (x, y);
        }
    }

    fn set_image_source(&mut self, node: NodeId, url: &str) {
        if let Some(n) = self.node_mut(node) {
            n.image_source = Some(url.to_string());
        }
    }

    fn set_hide_on_error(&mut self, node: NodeId, enabled: bool) {
        if let Some(n) = self.node_mut(node) {
            n.hide_on_error = enabled;
        }
    }

    fn measure(&self, node: NodeId) -> Rect {
        self.layout().get(&node).copied().unwrap_or_default()
    }

    fn scroll_offset(&self, node: NodeId) -> i64 {
        let stored = self.node(node).map_or(0, |n| n.scroll_offset);
        stored.clamp(0, self.max_scroll(node))
    }

    fn set_scroll_offset(&mut self, node: NodeId, offset: i64) {
        let clamped = offset.clamp(0, self.max_scroll(node));
        if let Some(n) = self.node_mut(node) {
            n.scroll_offset = clamped;
        }
    }

    fn inject_item_width_rule(&mut self, text_width: i64) {
        self.item_width_rule = Some(text_width);
    }

    fn probe_item_metrics(&mut self) -> ItemMetrics {
        self.probe_count += 1;
        self.metrics
    }
}
