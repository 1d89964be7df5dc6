//! Acceptance tests for the virtual list, driven through the public API only.
//!
//! Each test is a user-level scenario against a `MemorySurface`:
//! - windowing a large dataset and scrolling to the very end
//! - range selection followed by a drag and drop
//! - caller decorations surviving rebinds
//! - shallow and deep dataset copies

use std::cell::RefCell;
use std::rc::Rc;
use vlist::config::ListConfig;
use vlist::model::{CopyMode, Record, RecordIndex, RecordText, RichNode, UserDefined};
use vlist::state::{ListEvent, Listener, ListenerKind, VirtualList};
use vlist::surface::{InputEvent, ItemMetrics, MemorySurface, Modifiers, NodeId, PointerEvent};

// ===== Test Helpers =====

type Log = Rc<RefCell<Vec<String>>>;

fn records(count: usize) -> Vec<Record> {
    (0..count).map(|i| Record::new(format!("Item {i}"))).collect()
}

fn build(count: usize, metrics: ItemMetrics, height: i64) -> VirtualList<MemorySurface> {
    let surface = MemorySurface::new(40, height, metrics);
    let mut list = VirtualList::new(surface, ListConfig::default());
    list.update_full_dataset(&records(count), CopyMode::Shallow);
    list
}

fn content(list: &VirtualList<MemorySurface>, index: usize) -> NodeId {
    list.window()
        .pool()
        .slot_for_index(RecordIndex::new(index))
        .expect("index on screen")
        .content()
}

fn row(list: &VirtualList<MemorySurface>, index: usize) -> NodeId {
    list.window()
        .pool()
        .slot_for_index(RecordIndex::new(index))
        .expect("index on screen")
        .root()
}

fn at(list: &VirtualList<MemorySurface>, index: usize, modifiers: Modifiers) -> PointerEvent {
    PointerEvent::primary(5, index as i64, Some(content(list, index))).with_modifiers(modifiers)
}

fn click(list: &mut VirtualList<MemorySurface>, index: usize, modifiers: Modifiers) {
    let event = at(list, index, modifiers);
    list.handle_event(&InputEvent::Press(event));
    list.handle_event(&InputEvent::Release(event));
    list.handle_event(&InputEvent::Click(event));
}

fn record_events(list: &mut VirtualList<MemorySurface>) -> Log {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    for kind in [ListenerKind::DragDrop, ListenerKind::Mouse, ListenerKind::Action] {
        let sink = Rc::clone(&log);
        let listener: Listener = Rc::new(move |event: &ListEvent| {
            let entry = match event.tag {
                Some(tag) => {
                    let texts: Vec<_> = event.selection.iter().map(|r| r.text.plain_text()).collect();
                    let target = event.record.as_ref().map(|r| r.text.plain_text()).unwrap_or_default();
                    format!("{tag}:{target}:{}", texts.join(","))
                }
                None => match &event.event {
                    InputEvent::Press(_) => "mouse:press".to_string(),
                    InputEvent::Release(_) => "mouse:release".to_string(),
                    InputEvent::Click(_) => "mouse:click".to_string(),
                    other => format!("mouse:{other:?}"),
                },
            };
            sink.borrow_mut().push(entry);
        });
        list.add_listener(kind, listener);
    }
    log
}

fn texts(records: &[Record]) -> Vec<String> {
    records.iter().map(|r| r.text.plain_text()).collect()
}

// ===== Windowing =====

#[test]
fn thousand_rows_scroll_to_the_end_and_back() {
    // GIVEN 1000 rows of height 20 in a 200px viewport
    let metrics = ItemMetrics::new(20, 16, 16).unwrap();
    let mut list = build(1000, metrics, 200);
    let geometry = *list.window().geometry();
    assert_eq!(list.window().pool().len(), 11);
    assert_eq!(geometry.max_top_index(), 989);
    assert_eq!(geometry.max_scroll(), 19800);

    // WHEN scrolled all the way down
    list.set_scroll_position(19800);

    // THEN the top index runs one past max_top_index and the pre spacer is capped
    assert_eq!(list.window().current_top_index(), Some(990));
    assert_eq!(list.window().visible_range(), 990..1000);
    let pre = list.surface().node(list.window().pre_spacer()).and_then(|n| n.height());
    let post = list.surface().node(list.window().post_spacer()).and_then(|n| n.height());
    assert_eq!(pre, Some(989 * 20));
    assert_eq!(post, Some(0));

    // WHEN dimensions are recomputed with force
    list.recompute_dimensions(true);

    // THEN the window is pulled back to the last full window
    assert_eq!(list.window().current_top_index(), Some(989));
    let bound: Vec<_> = list
        .window()
        .pool()
        .iter()
        .filter_map(|slot| slot.bound_index())
        .map(|i| i.get())
        .collect();
    assert_eq!(bound, (989..1000).collect::<Vec<_>>());

    // WHEN scrolled back to the top
    list.set_scroll_position(0);
    assert_eq!(list.surface().rendered_text(content(&list, 0)), "Item 0");
}

#[test]
fn surface_nodes_stay_bounded_while_scrolling() {
    let mut list = build(100_000, ItemMetrics::default(), 30);
    let nodes = list.surface().live_node_count();
    for offset in (0..100_000).step_by(997) {
        list.set_scroll_position(offset);
    }
    assert_eq!(list.surface().live_node_count(), nodes);
    assert_eq!(list.window().pool().len(), 31);
}

// ===== Selection and drag =====

#[test]
fn range_select_then_drag_onto_another_row() {
    // GIVEN a range 1..=3 built with ctrl then shift
    let mut list = build(20, ItemMetrics::default(), 10);
    click(&mut list, 1, Modifiers::CTRL);
    click(&mut list, 3, Modifiers::SHIFT);
    assert_eq!(texts(&list.selected_records()), vec!["Item 1", "Item 2", "Item 3"]);
    let log = record_events(&mut list);

    // WHEN the selection is dragged from row 2 onto row 7
    let press = at(&list, 2, Modifiers::NONE);
    let release = at(&list, 7, Modifiers::NONE);
    list.handle_event(&InputEvent::Press(press));
    list.handle_event(&InputEvent::Move(PointerEvent::primary(6, 4, None)));
    list.handle_event(&InputEvent::Move(PointerEvent::primary(6, 6, None)));
    list.handle_event(&InputEvent::Release(release));

    // THEN listeners see press, one dragstart, the drop, then the release
    assert_eq!(
        *log.borrow(),
        vec![
            "mouse:press",
            "dragstart:Item 2:Item 1,Item 2,Item 3",
            "drop:Item 7:Item 1,Item 2,Item 3",
            "mouse:release",
        ]
    );
    // AND the selection survives the drop
    assert_eq!(list.selected_records().len(), 3);
    assert!(!list.drag().is_dragging());
}

#[test]
fn plain_click_on_selection_clears_and_swallows_the_click() {
    let mut list = build(20, ItemMetrics::default(), 10);
    click(&mut list, 4, Modifiers::CTRL);
    let log = record_events(&mut list);

    click(&mut list, 4, Modifiers::NONE);
    assert!(list.selected_records().is_empty());
    assert_eq!(*log.borrow(), vec!["mouse:press", "mouse:release"]);

    // The next plain click is an ordinary item click again
    click(&mut list, 5, Modifiers::NONE);
    assert_eq!(log.borrow().last().map(String::as_str), Some("menuitemclick:Item 5:"));
}

#[test]
fn root_classes_follow_selection_state() {
    let mut list = build(20, ItemMetrics::default(), 10);
    let root = list.list_node();
    let has = |list: &VirtualList<MemorySurface>, class: &str| {
        list.surface().node(root).is_some_and(|n| n.classes().contains(class))
    };
    assert!(has(&list, "hover"));
    assert!(!has(&list, "selection-active"));

    click(&mut list, 2, Modifiers::META);
    assert!(has(&list, "selection-active"));
    assert!(!has(&list, "hover"));

    list.set_selected_plus_hover_state(true);
    assert!(has(&list, "hover"));
}

#[test]
fn listener_registered_twice_is_called_once() {
    let mut list = build(5, ItemMetrics::default(), 10);
    let calls = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&calls);
    let listener: Listener = Rc::new(move |_: &ListEvent| *sink.borrow_mut() += 1);

    assert!(list.add_listener(ListenerKind::Action, Rc::clone(&listener)));
    assert!(!list.add_listener(ListenerKind::Action, Rc::clone(&listener)));
    click(&mut list, 1, Modifiers::NONE);
    assert_eq!(*calls.borrow(), 1);

    assert!(list.remove_listener(ListenerKind::Action, &listener));
    click(&mut list, 1, Modifiers::NONE);
    assert_eq!(*calls.borrow(), 1);
}

// ===== Binding contract =====

#[test]
fn caller_decorations_merge_across_rebinds() {
    // GIVEN a record decorated with a class, an attribute and a property
    let decorated = Record::new("Decorated").with_user_defined(
        UserDefined::default()
            .with_class("x", true)
            .with_attribute("title", Some("tip"))
            .with_property("id", 7),
    );
    let mut data = records(5);
    data[0] = decorated;
    let mut list = build(5, ItemMetrics::default(), 10);
    list.update_full_dataset(&data, CopyMode::Shallow);

    // WHEN the record is replaced by a plain one
    data[0] = Record::new("Plain");
    list.update_one_record(&data, 0);

    // THEN text changes but decorations stay
    let node = list.surface().node(row(&list, 0)).unwrap();
    assert_eq!(list.surface().rendered_text(content(&list, 0)), "Plain");
    assert!(node.classes().contains("x"));
    assert_eq!(node.attribute("title"), Some("tip"));
    let slot = list.window().pool().slot_for_index(RecordIndex::new(0)).unwrap();
    assert_eq!(slot.properties().get("id"), Some(&serde_json::json!(7)));

    // WHEN a later record switches them off explicitly
    data[0] = Record::new("Undecorated").with_user_defined(
        UserDefined::default()
            .with_class("x", false)
            .with_attribute("title", None),
    );
    list.update_one_record(&data, 0);

    // THEN they are removed
    let node = list.surface().node(row(&list, 0)).unwrap();
    assert!(!node.classes().contains("x"));
    assert_eq!(node.attribute("title"), None);
}

#[test]
fn icon_flags_collapse_columns() {
    let data = vec![
        Record::new("a").with_prefix_icon("p.png").without_suffix_icon(),
        Record::new("b").without_prefix_icon(),
    ];
    let mut list = build(0, ItemMetrics::default(), 10);
    list.update_full_dataset(&data, CopyMode::Shallow);

    let layout = list.surface().layout();
    let text_x = |index| layout.get(&content(&list, index)).map(|r| r.x);
    assert_eq!(text_x(0), Some(2));
    assert_eq!(text_x(1), Some(0));
}

// ===== Copy modes =====

#[test]
fn shallow_copy_shares_rich_content_and_deep_copy_does_not() {
    let rich = vec![Record::new(RichNode::new("b").with_text("bold"))];
    let shared = |list: &VirtualList<MemorySurface>| match (&rich[0].text, &list.data().records()[0].text) {
        (RecordText::Rich(a), RecordText::Rich(b)) => Rc::ptr_eq(a, b),
        _ => false,
    };

    let mut list = build(0, ItemMetrics::default(), 10);
    list.update_full_dataset(&rich, CopyMode::Shallow);
    assert!(shared(&list));

    list.update_full_dataset(&rich, CopyMode::Deep);
    assert!(!shared(&list));
    assert_eq!(list.surface().rendered_text(content(&list, 0)), "bold");
}
