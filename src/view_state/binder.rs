//! Projects one record onto one slot.

use super::constants::{CLASS_NO_PREFIX_ICON, CLASS_NO_SUFFIX_ICON, CLASS_SELECTED, STATE_CLASSES};
use super::slot_pool::Slot;
use crate::model::{Record, RecordText};
use crate::surface::{NodeId, RenderSurface};
use tracing::trace;

/// Stateless record → slot projection.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataBinder;

impl DataBinder {
    /// Bind `record` to `slot`.
    ///
    /// Text and icons are fully replaced. The binder's state classes are reset
    /// first. Caller decorations are merged, not replaced: properties and
    /// classes from an earlier record survive a rebind that does not mention
    /// them, while attributes honour set/remove per key.
    pub fn apply<S: RenderSurface>(surface: &mut S, slot: &mut Slot, record: &Record) {
        let root = slot.root();

        let text_changed = slot
            .last_record
            .as_ref()
            .is_none_or(|last| last.text != record.text);
        if text_changed {
            match &record.text {
                RecordText::Plain(text) => surface.set_text(slot.content(), text),
                RecordText::Rich(node) => surface.set_rich_content(slot.content(), node),
            }
        }

        for class in STATE_CLASSES {
            surface.remove_class(root, class);
        }

        Self::apply_icon(surface, slot.prefix(), record.icon_url1.as_deref());
        if record.no_prefix_icon {
            surface.add_class(root, CLASS_NO_PREFIX_ICON);
        }
        Self::apply_icon(surface, slot.suffix(), record.icon_url2.as_deref());
        if record.no_suffix_icon {
            surface.add_class(root, CLASS_NO_SUFFIX_ICON);
        }

        slot.selected = record.is_selected;
        if record.is_selected {
            surface.add_class(root, CLASS_SELECTED);
        }

        if let Some(user) = &record.user_defined {
            for (key, value) in &user.properties {
                slot.properties.insert(key.clone(), value.clone());
            }
            for (name, value) in &user.attributes {
                match value.as_deref() {
                    Some(value) if !value.is_empty() => surface.set_attribute(root, name, value),
                    _ => surface.remove_attribute(root, name),
                }
            }
            for (class, enabled) in &user.classes {
                if *enabled {
                    surface.add_class(root, class);
                } else {
                    surface.remove_class(root, class);
                }
            }
        }

        trace!(index = record.index().get(), "Record bound to slot");
        slot.bound_index = Some(record.index());
        slot.last_record = Some(record.clone());
    }

    // Hidden icons keep their old source: clearing it does not reliably drop
    // a broken-image glyph, zero opacity does.
    fn apply_icon<S: RenderSurface>(surface: &mut S, icon: NodeId, url: Option<&str>) {
        match url {
            Some(url) if !url.is_empty() => {
                surface.set_image_source(icon, url);
                surface.set_opacity(icon, 1.0);
            }
            _ => surface.set_opacity(icon, 0.0),
        }
    }
}
