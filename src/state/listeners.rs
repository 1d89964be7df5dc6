//! Listener registry and notification payloads.
//!
//! Registration is deduplicated by callback identity: the same `Rc` added
//! twice is kept once. Distinct closures are never merged even if they
//! behave the same.

use crate::model::Record;
use crate::surface::InputEvent;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Listener channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// `dragstart` and `drop`.
    DragDrop,
    /// Pointer activity the list did not consume.
    Mouse,
    /// Icon and item clicks.
    Action,
}

/// Tag carried by drag/drop and action notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTag {
    /// First pointer move after arming.
    DragStart,
    /// Release over the list while dragging.
    Drop,
    /// Click on a prefix icon.
    Action1Click,
    /// Click on a suffix icon.
    Action2Click,
    /// Click on an item body.
    MenuItemClick,
}

impl EventTag {
    /// Wire name of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventTag::DragStart => "dragstart",
            EventTag::Drop => "drop",
            EventTag::Action1Click => "action1click",
            EventTag::Action2Click => "action2click",
            EventTag::MenuItemClick => "menuitemclick",
        }
    }

    /// Channel this tag is delivered on.
    pub fn kind(&self) -> ListenerKind {
        match self {
            EventTag::DragStart | EventTag::Drop => ListenerKind::DragDrop,
            EventTag::Action1Click | EventTag::Action2Click | EventTag::MenuItemClick => {
                ListenerKind::Action
            }
        }
    }
}

impl fmt::Display for EventTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload handed to listeners.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEvent {
    /// Originating input event.
    pub event: InputEvent,
    /// Tag, for drag/drop and action notifications.
    pub tag: Option<EventTag>,
    /// Owning record of the event target, if any.
    pub record: Option<Record>,
    /// Selected records, for drag/drop notifications.
    pub selection: Vec<Record>,
}

impl ListEvent {
    /// Untagged event with no record.
    pub fn plain(event: InputEvent) -> Self {
        Self {
            event,
            tag: None,
            record: None,
            selection: Vec::new(),
        }
    }

    /// Tagged event.
    pub fn tagged(event: InputEvent, tag: EventTag, record: Option<Record>) -> Self {
        Self {
            event,
            tag: Some(tag),
            record,
            selection: Vec::new(),
        }
    }

    /// Attach the selected-record set.
    pub fn with_selection(mut self, selection: Vec<Record>) -> Self {
        self.selection = selection;
        self
    }

    /// Attach the owning record.
    pub fn with_record(mut self, record: Option<Record>) -> Self {
        self.record = record;
        self
    }
}

/// A notification waiting to be dispatched.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Channel.
    pub kind: ListenerKind,
    /// Payload.
    pub event: ListEvent,
}

/// Listener callback.
pub type Listener = Rc<dyn Fn(&ListEvent)>;

/// Listeners by channel, in registration order.
#[derive(Default, Clone)]
pub struct ListenerRegistry {
    listeners: HashMap<ListenerKind, Vec<Listener>>,
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<_, _> = self.listeners.iter().map(|(k, v)| (*k, v.len())).collect();
        f.debug_struct("ListenerRegistry").field("listeners", &counts).finish()
    }
}

impl ListenerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` on `kind`. Returns false if that same callback is
    /// already registered there.
    pub fn add(&mut self, kind: ListenerKind, listener: Listener) -> bool {
        let entries = self.listeners.entry(kind).or_default();
        if entries.iter().any(|l| Rc::ptr_eq(l, &listener)) {
            debug!(?kind, "Duplicate listener ignored");
            return false;
        }
        entries.push(listener);
        true
    }

    /// Unregister `listener` from `kind`. Returns whether it was registered.
    pub fn remove(&mut self, kind: ListenerKind, listener: &Listener) -> bool {
        let Some(entries) = self.listeners.get_mut(&kind) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|l| !Rc::ptr_eq(l, listener));
        before != entries.len()
    }

    /// Number of listeners on `kind`.
    pub fn count(&self, kind: ListenerKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    /// Listeners on `kind`, snapshotted so callbacks can't observe
    /// registration changes mid-dispatch.
    pub fn snapshot(&self, kind: ListenerKind) -> Vec<Listener> {
        self.listeners.get(&kind).cloned().unwrap_or_default()
    }

    /// Call every listener on the notification's channel.
    pub fn dispatch(&self, notification: &Notification) {
        for listener in self.snapshot(notification.kind) {
            listener(&notification.event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, Listener) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let listener: Listener = Rc::new(move |event: &ListEvent| {
            let tag = event.tag.map_or("-", |t| t.as_str());
            sink.borrow_mut().push(tag.to_string());
        });
        (log, listener)
    }

    fn notification(kind: ListenerKind, tag: Option<EventTag>) -> Notification {
        let mut event = ListEvent::plain(InputEvent::Scroll);
        event.tag = tag;
        Notification { kind, event }
    }

    #[test]
    fn tag_names_and_channels() {
        assert_eq!(EventTag::DragStart.as_str(), "dragstart");
        assert_eq!(EventTag::Drop.to_string(), "drop");
        assert_eq!(EventTag::Action1Click.as_str(), "action1click");
        assert_eq!(EventTag::Action2Click.as_str(), "action2click");
        assert_eq!(EventTag::MenuItemClick.as_str(), "menuitemclick");
        assert_eq!(EventTag::Drop.kind(), ListenerKind::DragDrop);
        assert_eq!(EventTag::MenuItemClick.kind(), ListenerKind::Action);
    }

    #[test]
    fn same_callback_is_registered_once() {
        let mut registry = ListenerRegistry::new();
        let (log, listener) = recorder();
        assert!(registry.add(ListenerKind::Action, Rc::clone(&listener)));
        assert!(!registry.add(ListenerKind::Action, Rc::clone(&listener)));
        registry.dispatch(&notification(ListenerKind::Action, Some(EventTag::MenuItemClick)));
        assert_eq!(*log.borrow(), vec!["menuitemclick"]);
    }

    #[test]
    fn same_callback_may_listen_on_several_channels() {
        let mut registry = ListenerRegistry::new();
        let (_, listener) = recorder();
        assert!(registry.add(ListenerKind::Action, Rc::clone(&listener)));
        assert!(registry.add(ListenerKind::Mouse, Rc::clone(&listener)));
        assert_eq!(registry.count(ListenerKind::Action), 1);
        assert_eq!(registry.count(ListenerKind::Mouse), 1);
    }

    #[test]
    fn distinct_closures_are_kept_apart() {
        let mut registry = ListenerRegistry::new();
        let (log_a, a) = recorder();
        let (log_b, b) = recorder();
        registry.add(ListenerKind::Mouse, a);
        registry.add(ListenerKind::Mouse, b);
        registry.dispatch(&notification(ListenerKind::Mouse, None));
        assert_eq!(log_a.borrow().len(), 1);
        assert_eq!(log_b.borrow().len(), 1);
    }

    #[test]
    fn remove_unregisters_by_identity() {
        let mut registry = ListenerRegistry::new();
        let (log, listener) = recorder();
        registry.add(ListenerKind::DragDrop, Rc::clone(&listener));
        assert!(registry.remove(ListenerKind::DragDrop, &listener));
        assert!(!registry.remove(ListenerKind::DragDrop, &listener));
        registry.dispatch(&notification(ListenerKind::DragDrop, Some(EventTag::Drop)));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn dispatch_only_reaches_matching_channel() {
        let mut registry = ListenerRegistry::new();
        let (log, listener) = recorder();
        registry.add(ListenerKind::Action, listener);
        registry.dispatch(&notification(ListenerKind::Mouse, None));
        assert!(log.borrow().is_empty());
    }
}
