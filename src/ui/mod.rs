//! Terminal picker
//!
//! [`TerminalPicker`] implements [`PickerUi`] with ratatui on top of
//! crossterm. Each `open` takes over the terminal (raw mode, alternate
//! screen) and `close` hands it back, so a stage that exits by any path
//! leaves the terminal usable.

pub mod filter;

use crate::error::{FontPickError, Result};
use crate::flow::{PickerEvent, PickerView};
use crate::picker::PickerUi;
use crate::theme::Styles;
use crate::types::CURRENT_MARKER;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use filter::FilteredList;
use log::{debug, warn};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io::{stdout, Stdout};
use std::sync::mpsc::Sender;

/// Lines moved by PageUp/PageDown
const PAGE: usize = 10;

/// What one picker stage shows.
#[derive(Debug, Clone)]
pub struct PickerScreen {
    pub title: String,
    pub placeholder: String,
    pub list: FilteredList,
}

impl PickerScreen {
    pub fn new(view: &PickerView) -> Self {
        Self {
            title: view.title.clone(),
            placeholder: view.placeholder.clone(),
            list: FilteredList::new(view.items.clone(), view.highlighted),
        }
    }

    /// Apply a key press, returning the events it produced.
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<PickerEvent> {
        let moved = match key.code {
            KeyCode::Esc => return vec![PickerEvent::Dismissed],
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![PickerEvent::Dismissed];
            }
            KeyCode::Enter => {
                return self
                    .list
                    .highlighted()
                    .map(PickerEvent::Accepted)
                    .into_iter()
                    .collect();
            }
            KeyCode::Up => self.list.move_up(),
            KeyCode::Down => self.list.move_down(),
            KeyCode::PageUp => self.list.page_up(PAGE),
            KeyCode::PageDown => self.list.page_down(PAGE),
            KeyCode::Home => self.list.first(),
            KeyCode::End => self.list.last(),
            KeyCode::Backspace => self.list.pop_char(),
            KeyCode::Char(c) => self.list.push_char(c),
            _ => false,
        };

        match self.list.highlighted() {
            Some(index) if moved => vec![PickerEvent::Highlighted(index)],
            _ => Vec::new(),
        }
    }
}

/// Render a picker stage into the whole frame.
pub fn render_picker(f: &mut Frame, screen: &PickerScreen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filter input
            Constraint::Min(3),    // Items
            Constraint::Length(1), // Key hints
        ])
        .split(f.area());

    render_query(f, screen, chunks[0]);
    render_items(f, screen, chunks[1]);

    let hints = Paragraph::new(Line::from(Span::styled(
        " ↑↓ move • type to filter • Enter select • Esc back",
        Styles::hint(),
    )));
    f.render_widget(hints, chunks[2]);
}

fn render_query(f: &mut Frame, screen: &PickerScreen, area: Rect) {
    let query = screen.list.query();
    let line = if query.is_empty() {
        Line::from(Span::styled(screen.placeholder.as_str(), Styles::placeholder()))
    } else {
        Line::from(vec![
            Span::styled("> ", Styles::title()),
            Span::styled(query, Styles::text()),
        ])
    };

    let input = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", screen.title))
            .title_style(Styles::title())
            .border_style(Styles::border()),
    );
    f.render_widget(input, area);
}

fn render_items(f: &mut Frame, screen: &PickerScreen, area: Rect) {
    let items: Vec<ListItem> = screen
        .list
        .visible()
        .iter()
        .map(|&index| {
            let label = screen.list.items()[index].as_str();
            if label.ends_with(CURRENT_MARKER) {
                ListItem::new(label).style(Styles::current())
            } else {
                ListItem::new(label).style(Styles::text())
            }
        })
        .collect();

    let count = format!(" {}/{} ", items.len(), screen.list.items().len());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(count)
                .border_style(Styles::border()),
        )
        .highlight_style(Styles::selected())
        .highlight_symbol(">> ");

    let mut state = ListState::default();
    if screen.list.highlighted().is_some() {
        state.select(Some(screen.list.cursor()));
    }
    f.render_stateful_widget(list, area, &mut state);
}

/// Full-screen picker on the controlling terminal.
#[derive(Default)]
pub struct TerminalPicker {
    terminal: Option<Terminal<CrosstermBackend<Stdout>>>,
    screen: Option<PickerScreen>,
}

impl TerminalPicker {
    pub fn new() -> Self {
        Self::default()
    }

    fn draw(&mut self) -> Result<()> {
        let (Some(terminal), Some(screen)) = (self.terminal.as_mut(), self.screen.as_ref()) else {
            return Err(FontPickError::terminal("picker is not open"));
        };
        terminal
            .draw(|f| render_picker(f, screen))
            .map_err(|e| FontPickError::terminal(format!("Failed to draw picker: {}", e)))?;
        Ok(())
    }

    fn enter_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()
            .map_err(|e| FontPickError::terminal(format!("Failed to enable raw mode: {}", e)))?;
        crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen).map_err(|e| {
            let _ = disable_raw_mode();
            FontPickError::terminal(format!("Failed to enter alternate screen: {}", e))
        })?;
        Terminal::new(CrosstermBackend::new(stdout())).map_err(|e| {
            leave_terminal();
            FontPickError::terminal(format!("Failed to create terminal: {}", e))
        })
    }
}

fn leave_terminal() {
    if let Err(e) = disable_raw_mode() {
        warn!("Failed to disable raw mode: {}", e);
    }
    if let Err(e) = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen) {
        warn!("Failed to leave alternate screen: {}", e);
    }
}

impl PickerUi for TerminalPicker {
    fn open(&mut self, view: &PickerView) -> Result<()> {
        if self.terminal.is_none() {
            self.terminal = Some(Self::enter_terminal()?);
        }
        debug!("Opening picker '{}' with {} items", view.title, view.items.len());
        self.screen = Some(PickerScreen::new(view));
        self.draw()
    }

    fn pump(&mut self, events: &Sender<PickerEvent>) -> Result<()> {
        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            Event::Resize(_, _) => return self.draw(),
            _ => return Ok(()),
        };

        let produced = self
            .screen
            .as_mut()
            .ok_or_else(|| FontPickError::terminal("picker is not open"))?
            .handle_key(key);

        for picker_event in produced {
            events
                .send(picker_event)
                .map_err(|_| FontPickError::general("picker event queue closed"))?;
        }
        self.draw()
    }

    fn close(&mut self) {
        self.screen = None;
        if self.terminal.take().is_some() {
            leave_terminal();
        }
    }
}

impl Drop for TerminalPicker {
    fn drop(&mut self) {
        self.close();
    }
}
