//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the session's task store,
//! handles user input, renders the board, and applies image attachments as
//! their background reads complete.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info, warn};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::attachment::{self, describe_data_uri, format_size, AttachmentLoaded};
use crate::store::Store;
use crate::task::{has_content, Task, TaskId};
use crate::tui::{
    colors::{ALERT_RED, DONE_LAVENDER, DONE_PURPLE, MEMO_AMBER, MEMO_BROWN, TODO_GREEN},
    enums::{AppState, FocusField},
    input::InputField,
    text_area::TextArea,
    utils::{centered_rect, input_spans},
};
use crate::view::{BoardView, Section, SectionView};

/// Main application state for the terminal user interface.
///
/// The store is the only task state; everything else here (input text,
/// selection, cursors) is transient view state for this session.
pub struct App {
    state: AppState,
    alert_return: AppState,
    store: Store,
    selected: Option<TaskId>,
    section: Section,
    list_states: [ListState; 2],
    compose: InputField,
    edit_target: Option<TaskId>,
    edit_field: InputField,
    focus_title: InputField,
    focus_memo: TextArea,
    focus_field: FocusField,
    attach_path: InputField,
    alert_message: String,
    status_message: String,
    loads_tx: Sender<AttachmentLoaded>,
    loads_rx: Receiver<AttachmentLoaded>,
    /// Background reads still running, per task.
    pending_loads: HashMap<TaskId, usize>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create an App with an empty store.
    pub fn new() -> Self {
        let (loads_tx, loads_rx) = mpsc::channel();
        App {
            state: AppState::Board,
            alert_return: AppState::Board,
            store: Store::new(),
            selected: None,
            section: Section::Todo,
            list_states: [ListState::default(), ListState::default()],
            compose: InputField::new(),
            edit_target: None,
            edit_field: InputField::new(),
            focus_title: InputField::new(),
            focus_memo: TextArea::new(),
            focus_field: FocusField::Title,
            attach_path: InputField::new(),
            alert_message: String::new(),
            status_message: String::new(),
            loads_tx,
            loads_rx,
            pending_loads: HashMap::new(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn selected(&self) -> Option<TaskId> {
        self.selected
    }

    fn section_ids(&self, section: Section) -> Vec<TaskId> {
        self.store
            .tasks()
            .iter()
            .filter(|t| Section::of(t) == section)
            .map(|t| t.id)
            .collect()
    }

    /// Id of the task under the cursor in the current section.
    fn highlighted(&self) -> Option<TaskId> {
        let ids = self.section_ids(self.section);
        self.list_states[self.section.index()]
            .selected()
            .and_then(|i| ids.get(i).copied())
    }

    /// Keep both list cursors inside their sections after a mutation.
    fn clamp_cursors(&mut self) {
        for section in [Section::Todo, Section::Done] {
            let len = self.section_ids(section).len();
            let state = &mut self.list_states[section.index()];
            if len == 0 {
                state.select(None);
            } else {
                state.select(Some(state.selected().unwrap_or(0).min(len - 1)));
            }
        }
    }

    /// Move the board cursor onto `id`, switching section if needed.
    fn place_cursor_on(&mut self, id: TaskId) {
        if let Some(task) = self.store.get(id) {
            let section = Section::of(task);
            let position = self.section_ids(section).iter().position(|t| *t == id);
            self.section = section;
            self.list_states[section.index()].select(position);
        }
        self.clamp_cursors();
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    /// Show a blocking notification, returning to `back_to` once dismissed.
    fn show_alert(&mut self, msg: impl Into<String>, back_to: AppState) {
        self.alert_message = msg.into();
        if self.state != AppState::Alert {
            self.alert_return = back_to;
        }
        self.state = AppState::Alert;
    }

    fn open_focus(&mut self, id: TaskId) {
        if let Some(task) = self.store.get(id) {
            self.focus_title = InputField::with_value(&task.text);
            self.focus_memo = TextArea::from_text(task.memo_text());
            self.focus_field = FocusField::Title;
            self.selected = Some(id);
            self.state = AppState::Focus;
            debug!("event=focus_open id={}", id);
        }
    }

    fn close_focus(&mut self) {
        self.state = AppState::Board;
        if let Some(id) = self.selected.take() {
            self.place_cursor_on(id);
        }
        self.attach_path.clear();
    }

    /// Write the focus editor back to the store and leave the focus view.
    fn save_focus(&mut self) {
        if let Some(id) = self.selected {
            let title_ok = self.store.edit(id, &self.focus_title.value);
            self.store.update_memo(id, self.focus_memo.text());
            if title_ok {
                self.set_status_message("Task saved");
            } else {
                self.set_status_message("Memo saved; an empty title is not allowed, kept the old one");
            }
        }
        self.close_focus();
    }

    fn toggle(&mut self, id: TaskId) {
        match self.store.toggle(id) {
            Some(true) => self.set_status_message("Marked as done"),
            Some(false) => self.set_status_message("Moved back to TO DO"),
            None => {}
        }
        self.clamp_cursors();
    }

    /// Start the session over, as a page reload would.
    fn reset_session(&mut self) {
        self.store.clear();
        self.selected = None;
        self.edit_target = None;
        self.compose.clear();
        self.section = Section::Todo;
        self.state = AppState::Board;
        self.clamp_cursors();
        info!("event=session_reset");
        self.set_status_message("Session reset");
    }

    fn finish_load(&mut self, id: TaskId) {
        if let Some(count) = self.pending_loads.get_mut(&id) {
            *count -= 1;
            if *count == 0 {
                self.pending_loads.remove(&id);
            }
        }
    }

    fn is_loading(&self, id: TaskId) -> bool {
        self.pending_loads.contains_key(&id)
    }

    /// Apply finished background reads to the store.
    pub fn poll_attachments(&mut self) {
        while let Ok(loaded) = self.loads_rx.try_recv() {
            self.finish_load(loaded.task_id);
            match loaded.result {
                Ok(uri) => {
                    if self.store.set_image(loaded.task_id, Some(uri)) {
                        self.set_status_message(format!("Attached {}", loaded.name));
                    } else {
                        debug!("event=attachment_dropped id={} reason=task_gone", loaded.task_id);
                    }
                }
                Err(err) => {
                    let back_to = self.state;
                    self.show_alert(err.to_string(), back_to);
                }
            }
        }
    }

    /// Validate the typed path and start reading it in the background.
    fn submit_attachment(&mut self) {
        let Some(id) = self.selected else {
            self.state = AppState::Board;
            return;
        };
        let path = expand_home(self.attach_path.value.trim());
        self.attach_path.clear();

        match attachment::intake(&path) {
            Ok(candidate) => {
                let name = candidate.name.clone();
                match attachment::spawn_load(id, candidate, self.loads_tx.clone()) {
                    Ok(_) => {
                        *self.pending_loads.entry(id).or_insert(0) += 1;
                        self.state = AppState::Focus;
                        self.set_status_message(format!("Loading {}...", name));
                    }
                    Err(err) => self.show_alert(format!("Could not start reading: {err}"), AppState::Focus),
                }
            }
            Err(err) => {
                warn!("event=attachment_rejected id={} error={}", id, err);
                self.show_alert(err.to_string(), AppState::Focus);
            }
        }
    }

    /// Handle keyboard input on the board.
    ///
    /// Returns true if the application should quit.
    fn handle_board_input(&mut self, key: KeyEvent) -> io::Result<bool> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => return Ok(true),
            KeyCode::Char('r') if ctrl => self.reset_session(),
            KeyCode::Esc | KeyCode::Char('q') => return Ok(true),
            KeyCode::Tab | KeyCode::BackTab => self.section = self.section.other(),
            KeyCode::Left => self.section = Section::Todo,
            KeyCode::Right => self.section = Section::Done,
            KeyCode::Up | KeyCode::Char('k') => {
                let state = &mut self.list_states[self.section.index()];
                if let Some(selected) = state.selected() {
                    state.select(Some(selected.saturating_sub(1)));
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.section_ids(self.section).len();
                let state = &mut self.list_states[self.section.index()];
                match state.selected() {
                    Some(selected) if selected + 1 < len => state.select(Some(selected + 1)),
                    None if len > 0 => state.select(Some(0)),
                    _ => {}
                }
            }
            KeyCode::Char(' ') | KeyCode::Char('c') => {
                if let Some(id) = self.highlighted() {
                    self.toggle(id);
                }
            }
            KeyCode::Char('e') => {
                if let Some(id) = self.highlighted() {
                    if self.section == Section::Done {
                        self.set_status_message("Completed tasks can't be edited inline; press Enter to open");
                    } else if let Some(task) = self.store.get(id) {
                        self.edit_field = InputField::with_value(&task.text);
                        self.edit_target = Some(id);
                        self.state = AppState::InlineEdit;
                    }
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.highlighted() {
                    if self.store.delete(id).is_some() {
                        self.set_status_message("Task deleted");
                    }
                    self.clamp_cursors();
                }
            }
            KeyCode::Enter => {
                if let Some(id) = self.highlighted() {
                    self.open_focus(id);
                }
            }
            KeyCode::Char('a') | KeyCode::Char('i') => self.state = AppState::Compose,
            KeyCode::Char('h') | KeyCode::F(1) => self.state = AppState::Help,
            _ => {}
        }
        Ok(false)
    }

    /// Handle keyboard input in the new-task input.
    fn handle_compose_input(&mut self, key: KeyEvent) -> io::Result<bool> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
            KeyCode::Esc => self.state = AppState::Board,
            KeyCode::Enter => match self.store.add(&self.compose.value) {
                Some(task) => {
                    self.compose.clear();
                    self.place_cursor_on(task.id);
                    self.set_status_message("Task added");
                }
                None => self.set_status_message("Type a task first"),
            },
            _ => edit_field(&mut self.compose, key),
        }
        Ok(false)
    }

    /// Handle keyboard input while editing a task's text in place.
    fn handle_inline_edit_input(&mut self, key: KeyEvent) -> io::Result<bool> {
        match key.code {
            KeyCode::Esc => {
                self.edit_target = None;
                self.state = AppState::Board;
                self.set_status_message("Edit cancelled");
            }
            KeyCode::Enter => {
                if !has_content(&self.edit_field.value) {
                    self.set_status_message("Task text can't be empty");
                } else {
                    if let Some(id) = self.edit_target.take() {
                        self.store.edit(id, &self.edit_field.value);
                    }
                    self.state = AppState::Board;
                    self.set_status_message("Task updated");
                }
            }
            _ => edit_field(&mut self.edit_field, key),
        }
        Ok(false)
    }

    /// Handle keyboard input in the focus view.
    fn handle_focus_input(&mut self, key: KeyEvent) -> io::Result<bool> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let Some(id) = self.selected else {
            self.state = AppState::Board;
            return Ok(false);
        };
        match key.code {
            KeyCode::Char('c') if ctrl => return Ok(true),
            KeyCode::Char('s') if ctrl => self.save_focus(),
            KeyCode::Char('d') if ctrl => {
                self.store.delete(id);
                self.selected = None;
                self.state = AppState::Board;
                self.clamp_cursors();
                self.set_status_message("Task deleted");
            }
            KeyCode::Char('t') if ctrl => self.toggle(id),
            KeyCode::Char('o') if ctrl => {
                self.attach_path.clear();
                self.state = AppState::AttachPrompt;
            }
            KeyCode::Char('x') if ctrl => {
                if self.store.get(id).is_some_and(Task::has_image) {
                    self.store.set_image(id, None);
                    self.set_status_message("Image removed");
                }
            }
            KeyCode::Esc => {
                self.close_focus();
                self.set_status_message("Closed without saving");
            }
            KeyCode::Tab | KeyCode::BackTab => self.focus_field = self.focus_field.next(),
            _ => match self.focus_field {
                FocusField::Title => match key.code {
                    KeyCode::Enter => self.save_focus(),
                    _ => edit_field(&mut self.focus_title, key),
                },
                FocusField::Memo => edit_memo(&mut self.focus_memo, key),
            },
        }
        Ok(false)
    }

    /// Handle keyboard input in the attachment path prompt.
    fn handle_attach_input(&mut self, key: KeyEvent) -> io::Result<bool> {
        match key.code {
            KeyCode::Esc => {
                self.attach_path.clear();
                self.state = AppState::Focus;
            }
            KeyCode::Enter => self.submit_attachment(),
            _ => edit_field(&mut self.attach_path, key),
        }
        Ok(false)
    }

    /// Dispatch one key press to the handler for the current screen.
    ///
    /// Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> io::Result<bool> {
        if key.kind != KeyEventKind::Press {
            return Ok(false);
        }
        if self.state != AppState::Alert {
            self.clear_status_message();
        }
        match self.state {
            AppState::Board => self.handle_board_input(key),
            AppState::Compose => self.handle_compose_input(key),
            AppState::InlineEdit => self.handle_inline_edit_input(key),
            AppState::Focus => self.handle_focus_input(key),
            AppState::AttachPrompt => self.handle_attach_input(key),
            AppState::Alert => {
                self.alert_message.clear();
                self.state = self.alert_return;
                Ok(false)
            }
            AppState::Help => {
                self.state = AppState::Board;
                Ok(false)
            }
        }
    }

    /// Poll for and handle keyboard events.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                return self.handle_key(key);
            }
        }
        Ok(false)
    }

    fn accent(&self) -> Color {
        match self.selected.and_then(|id| self.store.get(id)) {
            Some(task) => section_color(Section::of(task)),
            None => section_color(self.section),
        }
    }

    /// Render the title bar with section counts.
    fn render_header(&self, f: &mut Frame, area: Rect) {
        let counts = format!(
            "{} to do  |  {} done",
            self.store.active_view().len(),
            self.store.completed_view().len()
        );
        let header = Paragraph::new(Line::from(vec![
            Span::styled("TODO BOARD", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                counts,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_attach_prompt(&self, f: &mut Frame, area: Rect) {
        let area = centered_rect(70, 30, area);
        f.render_widget(Clear, area);
        let text = vec![
            Line::from("Path to an image file (name: A-Z a-z 0-9 . _ -, size: 5MB max)"),
            Line::from(""),
            Line::from(input_spans(&self.attach_path, true)),
            Line::from(""),
            Line::from(Span::styled(
                "Enter attach  |  Esc cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let prompt = Paragraph::new(text)
            .block(
                Block::default()
                    .title("Attach Image")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.accent())),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(prompt, area);
    }

    fn render_alert(&self, f: &mut Frame, area: Rect) {
        let area = centered_rect(60, 30, area);
        f.render_widget(Clear, area);
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.alert_message.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Press any key to continue"),
        ];
        let alert = Paragraph::new(text)
            .block(
                Block::default()
                    .title("Notice")
                    .borders(Borders::ALL)
                    .style(Style::default().bg(ALERT_RED).fg(Color::White)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(alert, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let help_text = vec![
            Line::from(Span::styled("Board", bold)),
            Line::from("  a/i          Type a new task (Enter adds, Esc leaves the input)"),
            Line::from("  Tab  ←/→     Switch between TO DO and DONE"),
            Line::from("  ↑/↓  k/j     Move within a section"),
            Line::from("  Space/c      Toggle done"),
            Line::from("  e            Edit the task text in place (TO DO only)"),
            Line::from("  d/Del        Delete the task"),
            Line::from("  Enter        Open the task (title, memo, image)"),
            Line::from("  Ctrl+R       Start over with an empty board"),
            Line::from("  q/Esc        Quit"),
            Line::from(""),
            Line::from(Span::styled("Open task", bold)),
            Line::from("  Tab          Switch between title and memo"),
            Line::from("  Ctrl+S       Save title and memo, back to the board"),
            Line::from("  Ctrl+T       Toggle done"),
            Line::from("  Ctrl+O       Attach an image"),
            Line::from("  Ctrl+X       Remove the image"),
            Line::from("  Ctrl+D       Delete the task"),
            Line::from("  Esc          Back to the board without saving"),
        ];
        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help - Press any key to return"),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(Clear, area);
        f.render_widget(help, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                AppState::Board if self.store.is_empty() => {
                    "Board is empty | a: add a task  h: help  q: quit".to_string()
                }
                AppState::Board => format!(
                    "Tasks: {} | a: add  Enter: open  Space: toggle  d: delete  h: help",
                    self.store.len()
                ),
                AppState::Compose => "New task | Enter to add, Esc to leave".to_string(),
                AppState::InlineEdit => "Editing | Enter to save, Esc to cancel".to_string(),
                AppState::Focus => {
                    "Tab: field  Ctrl+S: save  Ctrl+T: toggle  Ctrl+O: image  Ctrl+D: delete  Esc: close"
                        .to_string()
                }
                AppState::AttachPrompt => "Attach Image".to_string(),
                AppState::Alert => "Notice".to_string(),
                AppState::Help => "Help".to_string(),
            }
        };
        let status = Paragraph::new(text)
            .style(Style::default().bg(self.accent()).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function that dispatches to the view model's layout.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);

        match BoardView::derive(&self.store, self.selected) {
            BoardView::Overview { todo, done } => {
                let parts = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(3), Constraint::Min(0)])
                    .split(chunks[1]);
                render_compose(f, parts[0], &self.compose, self.state == AppState::Compose);

                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(parts[1]);
                let editing = match (self.state, self.edit_target) {
                    (AppState::InlineEdit, Some(id)) => Some((id, &self.edit_field)),
                    _ => None,
                };
                let board_active = matches!(self.state, AppState::Board | AppState::InlineEdit);
                for (view, area) in [(todo, columns[0]), (done, columns[1])] {
                    let active = board_active && view.section == self.section;
                    let list_state = &mut self.list_states[view.section.index()];
                    render_section(f, area, &view, list_state, active, editing);
                }
            }
            BoardView::Focus { section, task } => {
                let panel = FocusPanel {
                    section,
                    task,
                    title: &self.focus_title,
                    field: self.focus_field,
                    editing: self.state == AppState::Focus,
                    loading: self.is_loading(task.id),
                };
                render_focus(f, chunks[1], panel, &mut self.focus_memo);
            }
        }

        match self.state {
            AppState::AttachPrompt => self.render_attach_prompt(f, chunks[1]),
            AppState::Alert => self.render_alert(f, chunks[1]),
            AppState::Help => self.render_help(f, chunks[1]),
            _ => {}
        }

        self.render_status_bar(f, chunks[2]);
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering, attachment completions and input until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        info!("event=tui_start");
        loop {
            self.poll_attachments();
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        info!("event=tui_exit tasks={}", self.store.len());
        Ok(())
    }
}

fn section_color(section: Section) -> Color {
    match section {
        Section::Todo => TODO_GREEN,
        Section::Done => DONE_PURPLE,
    }
}

/// `~/x` becomes `$HOME/x`; anything else is taken as is.
fn expand_home(raw: &str) -> PathBuf {
    match (raw.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(raw),
    }
}

/// Apply a line-editing key to a single-line field.
fn edit_field(field: &mut InputField, key: KeyEvent) {
    match key.code {
        KeyCode::Backspace => field.handle_backspace(),
        KeyCode::Delete => field.handle_delete(),
        KeyCode::Left => field.move_cursor_left(),
        KeyCode::Right => field.move_cursor_right(),
        KeyCode::Home => field.move_home(),
        KeyCode::End => field.move_end(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => field.handle_char(c),
        _ => {}
    }
}

/// Apply an editing key to the memo text area.
fn edit_memo(memo: &mut TextArea, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => memo.insert_newline(),
        KeyCode::Backspace => memo.backspace(),
        KeyCode::Delete => memo.delete(),
        KeyCode::Left => memo.move_left(),
        KeyCode::Right => memo.move_right(),
        KeyCode::Up => memo.move_up(),
        KeyCode::Down => memo.move_down(),
        KeyCode::Home => memo.move_home(),
        KeyCode::End => memo.move_end(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => memo.insert_char(c),
        _ => {}
    }
}

/// Render the new-task input with its add hint.
fn render_compose(f: &mut Frame, area: Rect, compose: &InputField, active: bool) {
    let can_add = has_content(&compose.value);
    let hint_style = if can_add {
        Style::default().fg(TODO_GREEN).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut spans = if compose.value.is_empty() && !active {
        vec![Span::styled(
            "Press 'a' and type a task",
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        input_spans(compose, active)
    };
    spans.push(Span::raw("  "));
    spans.push(Span::styled("[Enter] Add", hint_style));

    let border = if active {
        Style::default().fg(TODO_GREEN).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("New task")
            .border_style(border),
    );
    f.render_widget(input, area);
}

/// Render one board section as a list, or its empty-state message.
fn render_section(
    f: &mut Frame,
    area: Rect,
    view: &SectionView<'_>,
    state: &mut ListState,
    active: bool,
    editing: Option<(TaskId, &InputField)>,
) {
    let accent = section_color(view.section);
    let border_style = if active {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(
            format!(" {} ({}) ", view.section.title(), view.len()),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));

    if view.is_empty() {
        let mut lines = vec![Line::from("")];
        lines.extend(view.section.empty_message().lines().map(|l| {
            Line::from(Span::styled(l, Style::default().fg(Color::DarkGray)))
        }));
        let empty = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = view
        .tasks
        .iter()
        .map(|task| {
            let (checkbox, text_style) = if task.completed {
                (
                    "[x] ",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT),
                )
            } else {
                ("[ ] ", Style::default())
            };
            let mut spans = vec![Span::styled(checkbox, Style::default().fg(accent))];
            match editing {
                Some((id, field)) if id == task.id => spans.extend(input_spans(field, true)),
                _ => spans.push(Span::styled(task.text.as_str(), text_style)),
            }
            if task.memo.is_some() {
                spans.push(Span::styled(" [memo]", Style::default().fg(MEMO_BROWN)));
            }
            if task.has_image() {
                spans.push(Span::styled(" [img]", Style::default().fg(Color::Cyan)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let highlight = if active {
        Style::default().bg(Color::Gray).fg(Color::Black)
    } else {
        Style::default()
    };
    let list = List::new(items)
        .block(block)
        .highlight_style(highlight)
        .highlight_symbol(if active { ">> " } else { "   " });
    f.render_stateful_widget(list, area, state);
}

/// Borrowed pieces the focus view needs besides the memo editor.
struct FocusPanel<'a> {
    section: Section,
    task: &'a Task,
    title: &'a InputField,
    field: FocusField,
    editing: bool,
    loading: bool,
}

/// Render a single selected task with its title, image and memo.
fn render_focus(f: &mut Frame, area: Rect, panel: FocusPanel<'_>, memo: &mut TextArea) {
    let accent = section_color(panel.section);
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .title(format!(" {} ", panel.section.title()));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(inner);

    let title_active = panel.editing && panel.field == FocusField::Title;
    let checkbox = if panel.task.completed { "[x] " } else { "[ ] " };
    let mut title_spans = vec![Span::styled(
        checkbox,
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    )];
    title_spans.extend(input_spans(panel.title, title_active));
    let title_style = if panel.task.completed {
        Style::default().bg(DONE_LAVENDER).fg(Color::Black)
    } else {
        Style::default()
    };
    let title_border = if title_active {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let title = Paragraph::new(Line::from(title_spans))
        .style(title_style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Title")
                .border_style(title_border),
        );
    f.render_widget(title, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[1]);

    let mut image_lines = match panel.task.image_url.as_deref().and_then(describe_data_uri) {
        Some(info) => vec![
            Line::from(Span::styled(
                "Image attached",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(info.mime),
            Line::from(format_size(info.bytes as u64)),
            Line::from(""),
            Line::from(Span::styled(
                "Ctrl+X remove, Ctrl+O replace",
                Style::default().fg(Color::DarkGray),
            )),
        ],
        None => vec![
            Line::from(Span::styled("No image", Style::default().fg(Color::DarkGray))),
            Line::from(""),
            Line::from(Span::styled(
                "Ctrl+O to attach",
                Style::default().fg(Color::DarkGray),
            )),
        ],
    };
    if panel.loading {
        image_lines.push(Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::Yellow),
        )));
    }
    let image = Paragraph::new(image_lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Image"));
    f.render_widget(image, columns[0]);

    let memo_active = panel.editing && panel.field == FocusField::Memo;
    let memo_block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            "Memo",
            Style::default().fg(MEMO_BROWN).add_modifier(Modifier::BOLD),
        ))
        .border_style(if memo_active {
            Style::default().fg(MEMO_BROWN).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        })
        .style(Style::default().bg(MEMO_AMBER).fg(Color::Black));
    let memo_inner = memo_block.inner(columns[1]);
    f.render_widget(memo_block, columns[1]);

    let height = memo_inner.height as usize;
    let scroll = memo.scroll_to_cursor(height);
    let memo_lines: Vec<Line> = if memo.text().is_empty() && !memo_active {
        vec![Line::from(Span::styled(
            "Tab here to write a memo",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        memo.lines()
            .into_iter()
            .skip(scroll)
            .take(height)
            .map(|l| Line::from(l.to_string()))
            .collect()
    };
    f.render_widget(Paragraph::new(memo_lines), memo_inner);

    if memo_active {
        let (cursor_y, cursor_x) = memo.cursor();
        if cursor_y >= scroll && cursor_y - scroll < height {
            let max_x = memo_inner.width.saturating_sub(1) as usize;
            let x = memo_inner.x + cursor_x.min(max_x) as u16;
            f.set_cursor_position((x, memo_inner.y + (cursor_y - scroll) as u16));
        }
    }

    let hints = Paragraph::new(Span::styled(
        "Ctrl+S save  |  Ctrl+T toggle done  |  Ctrl+D delete  |  Esc close",
        Style::default().fg(Color::DarkGray),
    ))
    .alignment(Alignment::Right);
    f.render_widget(hints, rows[2]);
}
