//! Bounded pool of reusable slots.
//!
//! Slots are kept in display order between the two spacers. Growth appends
//! ahead of the trailing spacer; shrinking drops from the front, i.e. the
//! oldest slots, whatever they are bound to.

use super::constants::{CLASS_CONTENT, CLASS_ITEM, CLASS_PREFIX_ICON, CLASS_SUFFIX_ICON};
use crate::model::{Record, RecordIndex};
use crate::surface::{NodeId, NodeKind, RenderSurface};
use serde_json::Value;
use std::collections::{BTreeMap, VecDeque};
use tracing::debug;

/// Which part of a slot a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPart {
    /// The slot's root (the item node).
    Root,
    /// Prefix icon.
    PrefixIcon,
    /// Text content.
    Content,
    /// Suffix icon.
    SuffixIcon,
}

/// One reusable visual unit and the domain state bound to it.
#[derive(Debug, Clone)]
pub struct Slot {
    root: NodeId,
    prefix: NodeId,
    content: NodeId,
    suffix: NodeId,
    pub(crate) bound_index: Option<RecordIndex>,
    pub(crate) last_record: Option<Record>,
    pub(crate) selected: bool,
    pub(crate) properties: BTreeMap<String, Value>,
}

impl Slot {
    /// Allocate a slot: root plus prefix icon, content and suffix icon.
    ///
    /// `hide_broken_images` installs the degrade-on-error hook on both icons.
    pub fn create<S: RenderSurface>(surface: &mut S, hide_broken_images: bool) -> Self {
        let root = surface.create_node(NodeKind::Row);
        let prefix = surface.create_node(NodeKind::Image);
        let content = surface.create_node(NodeKind::Text);
        let suffix = surface.create_node(NodeKind::Image);

        surface.add_class(root, CLASS_ITEM);
        surface.add_class(prefix, CLASS_PREFIX_ICON);
        surface.add_class(content, CLASS_CONTENT);
        surface.add_class(suffix, CLASS_SUFFIX_ICON);
        for icon in [prefix, suffix] {
            surface.set_opacity(icon, 0.0);
            surface.set_hide_on_error(icon, hide_broken_images);
        }
        surface.append_child(root, prefix);
        surface.append_child(root, content);
        surface.append_child(root, suffix);

        Self {
            root,
            prefix,
            content,
            suffix,
            bound_index: None,
            last_record: None,
            selected: false,
            properties: BTreeMap::new(),
        }
    }

    /// Root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Prefix icon node.
    pub fn prefix(&self) -> NodeId {
        self.prefix
    }

    /// Content node.
    pub fn content(&self) -> NodeId {
        self.content
    }

    /// Suffix icon node.
    pub fn suffix(&self) -> NodeId {
        self.suffix
    }

    /// Index of the record last bound to this slot.
    pub fn bound_index(&self) -> Option<RecordIndex> {
        self.bound_index
    }

    /// Record last bound to this slot.
    pub fn last_record(&self) -> Option<&Record> {
        self.last_record.as_ref()
    }

    /// Selected flag of the bound record.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Properties copied from `userDefined.properties`.
    pub fn properties(&self) -> &BTreeMap<String, Value> {
        &self.properties
    }

    /// Which part of this slot `node` is, if any.
    pub fn part_of(&self, node: NodeId) -> Option<SlotPart> {
        if node == self.root {
            Some(SlotPart::Root)
        } else if node == self.prefix {
            Some(SlotPart::PrefixIcon)
        } else if node == self.content {
            Some(SlotPart::Content)
        } else if node == self.suffix {
            Some(SlotPart::SuffixIcon)
        } else {
            None
        }
    }
}

/// Slots in display order.
#[derive(Debug, Clone, Default)]
pub struct SlotPool {
    slots: VecDeque<Slot>,
}

impl SlotPool {
    /// Empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot at a display position.
    pub fn get(&self, position: usize) -> Option<&Slot> {
        self.slots.get(position)
    }

    pub(crate) fn get_mut(&mut self, position: usize) -> Option<&mut Slot> {
        self.slots.get_mut(position)
    }

    /// Slots in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Slot> {
        self.slots.iter_mut()
    }

    /// Insert `count` new idle slots into `list` directly ahead of `trailing`.
    pub fn grow<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        list: NodeId,
        trailing: NodeId,
        count: usize,
        hide_broken_images: bool,
    ) {
        for _ in 0..count {
            let slot = Slot::create(surface, hide_broken_images);
            surface.insert_before(list, slot.root, trailing);
            self.slots.push_back(slot);
        }
        debug!(added = count, slots = self.slots.len(), "Slot pool grown");
    }

    /// Remove `count` slots starting right after the leading spacer.
    pub fn shrink<S: RenderSurface>(&mut self, surface: &mut S, count: usize) {
        let count = count.min(self.slots.len());
        for slot in self.slots.drain(..count) {
            surface.remove_node(slot.root);
        }
        debug!(removed = count, slots = self.slots.len(), "Slot pool shrunk");
    }

    /// Find the slot owning `node` directly (not through descendants).
    pub fn find_node(&self, node: NodeId) -> Option<(&Slot, SlotPart)> {
        self.slots
            .iter()
            .find_map(|slot| slot.part_of(node).map(|part| (slot, part)))
    }

    /// Slot currently bound to `index`.
    pub fn slot_for_index(&self, index: RecordIndex) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.bound_index == Some(index))
    }
}
