//! Integration tests for the terminal demo
//!
//! These tests drive the TUI app on a TestBackend without requiring
//! an actual terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use vlist::config::ListConfig;
use vlist::source::generate_records;
use vlist::surface::ItemMetrics;
use vlist::view::{ColorConfig, ListStyles, TuiApp};

fn app(width: u16, height: u16, count: usize, config: ListConfig) -> TuiApp<TestBackend> {
    let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    let styles = ListStyles::with_color_config(ColorConfig::from_env_and_args(true));
    TuiApp::with_terminal(terminal, &generate_records(count), ItemMetrics::default(), config, styles).unwrap()
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn line(app: &TuiApp<TestBackend>, y: u16) -> String {
    let buffer = app.terminal().backend().buffer();
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol().to_string())
        .collect()
}

/// Test that 'q' key triggers quit
#[test]
fn test_q_key_triggers_quit() {
    let mut app = app(40, 10, 10, ListConfig::default());
    assert!(app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
}

/// Test that other keys reach the list and change nothing
#[test]
fn test_other_keys_do_not_quit() {
    let mut app = app(40, 10, 10, ListConfig::default());
    let before = app.list().window().current_top_index();
    assert!(!app.handle_key(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE)));
    assert_eq!(app.list().window().current_top_index(), before);
}

#[test]
fn generated_records_render_with_icons() {
    let mut app = app(40, 10, 50, ListConfig::default());
    app.draw().unwrap();

    // Entry 0 collapses its prefix column and carries an arrow suffix
    assert!(line(&app, 0).starts_with("Entry 0 (rich)"));
    assert_eq!(line(&app, 0).chars().nth(38), Some('■'));
    // Entry 7 has a broken prefix icon
    assert!(line(&app, 7).starts_with("✗ Entry 7"));
    // Entry 3 has a folder icon
    assert!(line(&app, 3).starts_with("■ Entry 3"));
    // Entry 1 has no icons
    assert!(line(&app, 1).starts_with("  Entry 1"));
}

#[test]
fn hide_broken_images_collapses_broken_icon() {
    let config = ListConfig {
        hide_broken_image_icons: true,
        ..ListConfig::default()
    };
    let mut app = app(40, 10, 50, config);
    app.draw().unwrap();
    assert!(line(&app, 7).starts_with("Entry 7"));
}

#[test]
fn wheel_then_redraw_shows_later_rows() {
    let mut app = app(40, 10, 50, ListConfig::default());
    for _ in 0..5 {
        app.handle_mouse(mouse(MouseEventKind::ScrollDown, 5, 2));
    }
    app.draw().unwrap();
    assert!(line(&app, 0).contains("Entry 5"));
    assert!(line(&app, 9).contains("top 5"));
}

#[test]
fn clicking_an_arrow_reports_action2click() {
    let mut app = app(40, 10, 50, ListConfig::default());
    // Entry 4 has an arrow suffix in the last two columns
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 39, 4));
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 39, 4));
    assert_eq!(app.status(), "action2click: Entry 4");
}

#[test]
fn shrinking_terminal_shrinks_pool() {
    let mut app = app(40, 20, 100, ListConfig::default());
    assert_eq!(app.list().window().pool().len(), 20);
    app.handle_resize(40, 6);
    app.draw().unwrap();
    assert_eq!(app.list().window().pool().len(), 6);
    assert!(line(&app, 5).contains("100 items"));
}
