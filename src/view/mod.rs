//! Terminal shell for the demo (impure).
//!
//! Owns a ratatui terminal and a [`VirtualList`] over a [`MemorySurface`].
//! Crossterm input is translated into [`InputEvent`]s; every frame paints the
//! surface with [`SurfaceView`]. The bottom row is a status line showing the
//! last listener notification.

mod paint;
mod styles;

pub use paint::SurfaceView;
pub use styles::{ColorConfig, ListStyles};

use crate::config::ListConfig;
use crate::model::{CopyMode, ListError, Record};
use crate::source::BROKEN_ICON;
use crate::state::{EventTag, ListEvent, Listener, ListenerKind, VirtualList};
use crate::surface::{
    InputEvent, ItemMetrics, MemorySurface, Modifiers, NodeId, PointerButton, PointerEvent,
};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    text::Line,
    widgets::Paragraph,
    Terminal,
};
use std::cell::RefCell;
use std::io::{self, Stdout};
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, info};

/// Rows reserved below the list.
const STATUS_HEIGHT: u16 = 1;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<TuiError> for ListError {
    fn from(err: TuiError) -> Self {
        match err {
            TuiError::Io(e) => ListError::Terminal(e),
        }
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    list: VirtualList<MemorySurface>,
    styles: ListStyles,
    status: Rc<RefCell<String>>,
    /// Target under the last button press, for click synthesis
    pressed: Option<Option<NodeId>>,
    /// Row under the pointer
    hover_row: Option<NodeId>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture
    pub fn new(
        records: &[Record],
        metrics: ItemMetrics,
        config: ListConfig,
        styles: ListStyles,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Self::with_terminal(terminal, records, metrics, config, styles)
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q, Esc or Ctrl+C)
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;
        loop {
            match event::read()? {
                Event::Key(key) => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(width, height) => self.handle_resize(width, height),
                _ => continue,
            }
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build the app on an already initialised terminal.
    ///
    /// The surface takes the terminal size minus the status line; icons using
    /// [`BROKEN_ICON`] fail to load.
    pub fn with_terminal(
        terminal: Terminal<B>,
        records: &[Record],
        metrics: ItemMetrics,
        config: ListConfig,
        styles: ListStyles,
    ) -> Result<Self, TuiError> {
        let size = terminal.size()?;
        let mut surface = MemorySurface::new(
            i64::from(size.width),
            i64::from(size.height.saturating_sub(STATUS_HEIGHT)),
            metrics,
        );
        surface.fail_image(BROKEN_ICON);

        let mut list = VirtualList::new(surface, config);
        list.update_full_dataset(records, CopyMode::Shallow);

        let status = Rc::new(RefCell::new(String::from("q to quit")));
        for kind in [ListenerKind::DragDrop, ListenerKind::Mouse, ListenerKind::Action] {
            let sink = Rc::clone(&status);
            let listener: Listener = Rc::new(move |event: &ListEvent| {
                if let Some(text) = describe(kind, event) {
                    *sink.borrow_mut() = text;
                }
            });
            list.add_listener(kind, listener);
        }

        info!(
            items = records.len(),
            width = size.width,
            height = size.height,
            "Terminal demo started"
        );
        Ok(Self {
            terminal,
            list,
            styles,
            status,
            pressed: None,
            hover_row: None,
        })
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
            KeyCode::Char('q') | KeyCode::Esc => true,
            KeyCode::Char('f') => {
                let frozen = !self.list.router().hover_frozen();
                self.list.freeze_hover(frozen);
                self.set_status(format!("hover frozen: {frozen}"));
                false
            }
            KeyCode::Char('s') => {
                let enabled = !self.list.config().selected_plus_hover;
                self.list.set_selected_plus_hover_state(enabled);
                self.set_status(format!("selected plus hover: {enabled}"));
                false
            }
            KeyCode::Char(c) => {
                self.list.handle_event(&InputEvent::Key(c));
                false
            }
            _ => false,
        }
    }

    /// Handle a single mouse event
    ///
    /// Down, drag and up become press, move and release. A release over the
    /// node that was pressed is followed by a click. Wheel notches scroll one
    /// row each.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let x = i64::from(mouse.column);
        let y = i64::from(mouse.row);
        let target = self.list.surface().hit_test(x, y);
        let modifiers = to_modifiers(mouse.modifiers);
        let pointer = |button| PointerEvent {
            x,
            y,
            button,
            modifiers,
            target,
        };

        match mouse.kind {
            MouseEventKind::Down(button) => {
                self.pressed = Some(target);
                self.list.handle_event(&InputEvent::Press(pointer(to_button(button))));
            }
            MouseEventKind::Drag(button) => {
                self.list.handle_event(&InputEvent::Move(pointer(to_button(button))));
            }
            MouseEventKind::Moved => {
                self.list.handle_event(&InputEvent::Move(pointer(PointerButton::Primary)));
            }
            MouseEventKind::Up(button) => {
                let event = pointer(to_button(button));
                self.list.handle_event(&InputEvent::Release(event));
                if self.pressed.take() == Some(target) {
                    self.list.handle_event(&InputEvent::Click(event));
                }
            }
            MouseEventKind::ScrollDown => self.list.handle_event(&InputEvent::Wheel { notches: 1 }),
            MouseEventKind::ScrollUp => self.list.handle_event(&InputEvent::Wheel { notches: -1 }),
            MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => {}
        }

        // The row under a still pointer changes when the list scrolls
        let target = self.list.surface().hit_test(x, y);
        self.hover_row = target.and_then(|node| {
            self.list
                .window()
                .owning_slot(self.list.surface(), node)
                .map(|slot| slot.root())
        });
    }

    /// Handle a terminal resize event
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "Handling resize");
        self.list.surface_mut().set_viewport(
            i64::from(width),
            i64::from(height.saturating_sub(STATUS_HEIGHT)),
        );
        self.list.recompute_dimensions(false);
        self.list.handle_event(&InputEvent::Resize);
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let status = self.status_line();
        let list = &self.list;
        let styles = self.styles;
        let hover_row = self.hover_row;
        self.terminal.draw(|frame| {
            let area = frame.area();
            let list_height = area.height.saturating_sub(STATUS_HEIGHT);
            let list_area = Rect::new(area.x, area.y, area.width, list_height);
            let status_area = Rect::new(area.x, area.y + list_height, area.width, area.height - list_height);
            frame.render_widget(
                SurfaceView::new(list.surface(), list.list_node(), styles).hover_row(hover_row),
                list_area,
            );
            frame.render_widget(Paragraph::new(Line::from(status)).style(styles.status()), status_area);
        })?;
        Ok(())
    }

    fn status_line(&self) -> String {
        let top = self.list.window().current_top_index().unwrap_or(0);
        format!(
            " {} items | top {} | {} selected | {}",
            self.list.data().len(),
            top,
            self.list.selection().len(),
            self.status.borrow()
        )
    }

    fn set_status(&self, text: String) {
        *self.status.borrow_mut() = text;
    }

    /// The list being shown.
    pub fn list(&self) -> &VirtualList<MemorySurface> {
        &self.list
    }

    /// The list being shown, mutably.
    pub fn list_mut(&mut self) -> &mut VirtualList<MemorySurface> {
        &mut self.list
    }

    /// Last status message.
    pub fn status(&self) -> String {
        self.status.borrow().clone()
    }

    /// Row currently under the pointer.
    pub fn hover_row(&self) -> Option<NodeId> {
        self.hover_row
    }

    /// Underlying terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

fn to_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
    }
}

fn to_modifiers(modifiers: KeyModifiers) -> Modifiers {
    Modifiers {
        shift: modifiers.contains(KeyModifiers::SHIFT),
        ctrl: modifiers.contains(KeyModifiers::CONTROL),
        meta: modifiers.contains(KeyModifiers::SUPER),
    }
}

/// Status text for a notification, or `None` for ones not worth showing.
fn describe(kind: ListenerKind, event: &ListEvent) -> Option<String> {
    let label = |e: &ListEvent| {
        e.record
            .as_ref()
            .map(|r| r.text.plain_text())
            .unwrap_or_else(|| "-".to_string())
    };
    match (kind, event.tag) {
        (_, Some(tag @ (EventTag::DragStart | EventTag::Drop))) => Some(format!(
            "{tag}: {} ({} dragged)",
            label(event),
            event.selection.len()
        )),
        (_, Some(tag)) => Some(format!("{tag}: {}", label(event))),
        (ListenerKind::Mouse, None) => match &event.event {
            InputEvent::Click(p) => Some(format!("click at {},{}", p.x, p.y)),
            _ => None,
        },
        _ => None,
    }
}

/// Restore terminal to normal state
pub fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(DisableMouseCapture)?;
    stdout.execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Run the demo over `records` until the user quits.
///
/// The terminal is restored even when the event loop fails.
pub fn run_with_records(
    records: &[Record],
    metrics: ItemMetrics,
    config: ListConfig,
    styles: ListStyles,
) -> Result<(), TuiError> {
    let result = TuiApp::new(records, metrics, config, styles).and_then(|mut app| app.run());
    let restored = restore_terminal();
    result?;
    restored
}
