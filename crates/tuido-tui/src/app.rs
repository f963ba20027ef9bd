use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tracing::warn;
use tuido_core::todo::{Draft, Todo};
use tuido_service::BlockingHttpService;

use crate::components::todo_table::TodoTable;

/// What the app is currently doing
#[derive(Debug, Clone)]
pub enum Mode {
    /// Normal table navigation
    Normal,
    /// The add/edit form. `editing` is false for Add mode, true for Edit.
    Form {
        draft: Draft,
        field: FormField,
        editing: bool,
    },
    /// Typing an id into the lookup box
    FetchById { input: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Id,
    Title,
    Description,
    Completed,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Id => FormField::Title,
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Completed,
            FormField::Completed => FormField::Id,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormField::Id => FormField::Completed,
            FormField::Title => FormField::Id,
            FormField::Description => FormField::Title,
            FormField::Completed => FormField::Description,
        }
    }
}

pub struct App {
    service: BlockingHttpService,
    server_url: String,
    table: TodoTable,
    fetched: Option<Todo>,
    message: Option<String>,
    mode: Mode,
}

impl App {
    /// Load the initial list. An unreachable backend is not fatal: the
    /// table starts empty with the fetch-failure message showing.
    pub fn new(service: BlockingHttpService, server_url: &str) -> Self {
        let (todos, message) = match service.list_todos() {
            Ok(todos) => (todos, None),
            Err(e) => {
                warn!("initial fetch failed: {e}");
                (Vec::new(), Some("Failed to fetch todos.".to_string()))
            }
        };

        Self {
            service,
            server_url: server_url.to_string(),
            table: TodoTable::new(todos),
            fetched: None,
            message,
            mode: Mode::Normal,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn todos(&self) -> &[Todo] {
        self.table.todos()
    }

    pub fn fetched(&self) -> Option<&Todo> {
        self.fetched.as_ref()
    }

    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, Mode::Form { .. } | Mode::FetchById { .. })
    }

    /// Full list reload. Every mutation is followed by one of these; the
    /// client never patches the list locally.
    /// Returns true on success so callers can restore their own message
    /// after the reload clears it.
    fn reload(&mut self) -> bool {
        match self.service.list_todos() {
            Ok(todos) => {
                self.table.set_todos(todos);
                self.message = None;
                true
            }
            Err(e) => {
                warn!("fetch todos failed: {e}");
                self.message = Some("Failed to fetch todos.".into());
                false
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match &self.mode.clone() {
            Mode::Normal => self.handle_normal(key),
            Mode::Form {
                draft,
                field,
                editing,
            } => self.handle_form(key, draft.clone(), *field, *editing),
            Mode::FetchById { input } => self.handle_fetch_by_id(key, input.clone()),
        }
    }

    fn handle_normal(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('a') => {
                self.mode = Mode::Form {
                    draft: Draft::default(),
                    field: FormField::Id,
                    editing: false,
                };
            }
            KeyCode::Char('e') => {
                if let Some(todo) = self.table.selected_todo() {
                    let draft = Draft::from_todo(todo);
                    self.message = Some(format!("Editing todo with ID {}", draft.id));
                    self.mode = Mode::Form {
                        draft,
                        field: FormField::Id,
                        editing: true,
                    };
                }
            }
            KeyCode::Char('d') => {
                if let Some(todo) = self.table.selected_todo() {
                    let id = todo.id.clone();
                    match self.service.delete_todo(&id) {
                        Ok(body) => {
                            let msg = if body.trim().is_empty() {
                                "Todo deleted.".to_string()
                            } else {
                                body
                            };
                            if self.reload() {
                                self.message = Some(msg);
                            }
                        }
                        Err(e) => {
                            warn!("delete todo {id} failed: {e}");
                            self.message = Some("Error deleting todo.".into());
                        }
                    }
                }
            }
            // Toggle the completion flag: a full-replace update with the
            // flag flipped, then reload.
            KeyCode::Char('t') | KeyCode::Char(' ') => {
                if let Some(todo) = self.table.selected_todo() {
                    let mut toggled = todo.clone();
                    toggled.completed = !toggled.completed;
                    match self.service.update_todo(&toggled) {
                        Ok(()) => {
                            if self.reload() {
                                self.message = Some("Todo updated successfully.".into());
                            }
                        }
                        Err(e) => {
                            warn!("toggle todo {} failed: {e}", toggled.id);
                            self.message = Some("Error updating todo.".into());
                        }
                    }
                }
            }
            KeyCode::Char('f') => {
                self.mode = Mode::FetchById {
                    input: String::new(),
                };
            }
            KeyCode::Char('r') => {
                self.reload();
            }
            KeyCode::Esc => {
                self.fetched = None;
                self.message = None;
            }
            _ => self.table.handle_key(key),
        }
    }

    fn handle_form(&mut self, key: KeyEvent, mut draft: Draft, field: FormField, editing: bool) {
        match key.code {
            KeyCode::Enter => {
                if draft.validate().is_err() {
                    self.message = Some("Please fill out the title field.".into());
                    self.mode = Mode::Form {
                        draft,
                        field,
                        editing,
                    };
                    return;
                }
                if editing {
                    self.submit_update(draft, field);
                } else {
                    self.submit_add(draft, field);
                }
            }
            // Cancel clears the draft and goes back to Add-ready state
            KeyCode::Esc => {
                self.message = None;
                self.mode = Mode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.mode = Mode::Form {
                    draft,
                    field: field.next(),
                    editing,
                };
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.mode = Mode::Form {
                    draft,
                    field: field.prev(),
                    editing,
                };
            }
            KeyCode::Char(' ') if field == FormField::Completed => {
                draft.completed = !draft.completed;
                self.mode = Mode::Form {
                    draft,
                    field,
                    editing,
                };
            }
            KeyCode::Backspace => {
                match field {
                    FormField::Id => {
                        draft.id.pop();
                    }
                    FormField::Title => {
                        draft.title.pop();
                    }
                    FormField::Description => {
                        draft.description.pop();
                    }
                    FormField::Completed => {}
                }
                self.mode = Mode::Form {
                    draft,
                    field,
                    editing,
                };
            }
            KeyCode::Char(c) => {
                match field {
                    FormField::Id => draft.id.push(c),
                    FormField::Title => draft.title.push(c),
                    FormField::Description => draft.description.push(c),
                    FormField::Completed => {}
                }
                self.mode = Mode::Form {
                    draft,
                    field,
                    editing,
                };
            }
            _ => {
                self.mode = Mode::Form {
                    draft,
                    field,
                    editing,
                };
            }
        }
    }

    fn submit_add(&mut self, draft: Draft, field: FormField) {
        match self.service.add_todo(&draft.to_create()) {
            Ok(()) => {
                self.mode = Mode::Normal;
                if self.reload() {
                    self.message = Some("Todo added successfully.".into());
                }
            }
            Err(e) => {
                warn!("add todo failed: {e}");
                self.message = Some("Error adding todo.".into());
                // Failed add keeps the form open with the draft intact
                self.mode = Mode::Form {
                    draft,
                    field,
                    editing: false,
                };
            }
        }
    }

    fn submit_update(&mut self, draft: Draft, field: FormField) {
        match self.service.update_todo(&draft.to_todo()) {
            Ok(()) => {
                self.mode = Mode::Normal;
                if self.reload() {
                    self.message = Some("Todo updated successfully.".into());
                }
            }
            Err(e) => {
                warn!("update todo {} failed: {e}", draft.id);
                self.message = Some("Error updating todo.".into());
                self.mode = Mode::Form {
                    draft,
                    field,
                    editing: true,
                };
            }
        }
    }

    fn handle_fetch_by_id(&mut self, key: KeyEvent, mut input: String) {
        match key.code {
            KeyCode::Enter => {
                let id = input.trim().to_string();
                if id.is_empty() {
                    self.message = Some("Please enter an ID to fetch.".into());
                    self.mode = Mode::FetchById { input };
                    return;
                }
                match self.service.get_todo(&id) {
                    Ok(todo) => {
                        self.fetched = Some(todo);
                        self.message = None;
                    }
                    Err(e) => {
                        warn!("get todo {id} failed: {e}");
                        self.fetched = None;
                        self.message = Some("Todo not found.".into());
                    }
                }
                self.mode = Mode::Normal;
            }
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Backspace => {
                input.pop();
                self.mode = Mode::FetchById { input };
            }
            KeyCode::Char(c) => {
                input.push(c);
                self.mode = Mode::FetchById { input };
            }
            _ => {}
        }
    }

    //  Rendering

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_title_bar(frame, layout[0]);
        self.render_main(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        // Overlays
        match &self.mode {
            Mode::Normal => {}
            Mode::Form {
                draft,
                field,
                editing,
            } => self.render_form(frame, draft, *field, *editing, area),
            Mode::FetchById { input } => {
                self.render_input_bar(frame, "Fetch by ID: ", input, area)
            }
        }
    }

    fn render_main(&self, frame: &mut Frame, area: Rect) {
        match &self.fetched {
            Some(todo) => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(9)])
                    .split(area);
                self.table.render(frame, chunks[0]);
                self.render_fetched(frame, todo, chunks[1]);
            }
            None => self.table.render(frame, area),
        }
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled(" tuido ", Style::default().bold().fg(Color::Cyan)),
            Span::raw("| "),
            Span::styled(&self.server_url, Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(title, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if let Some(ref msg) = self.message {
            // Same cosmetic rule the web UI used: anything containing
            // "error" renders as an error banner, everything else as success.
            let color = if msg.to_lowercase().contains("error") {
                Color::Red
            } else {
                Color::Green
            };
            let line = Line::from(Span::styled(
                format!(" {msg}"),
                Style::default().fg(color),
            ));
            frame.render_widget(line, area);
            return;
        }

        let hints = match &self.mode {
            Mode::Normal => vec![
                ("q", "quit"),
                ("j/k", "rows"),
                ("a", "add"),
                ("e", "edit"),
                ("d", "del"),
                ("t", "toggle"),
                ("f", "fetch by id"),
                ("r", "reload"),
                ("Esc", "clear"),
            ],
            Mode::Form { editing: false, .. } => vec![
                ("Tab", "next field"),
                ("Space", "toggle done"),
                ("Enter", "add"),
                ("Esc", "cancel"),
            ],
            Mode::Form { editing: true, .. } => vec![
                ("Tab", "next field"),
                ("Space", "toggle done"),
                ("Enter", "update"),
                ("Esc", "cancel"),
            ],
            Mode::FetchById { .. } => vec![("Enter", "fetch"), ("Esc", "cancel")],
        };

        let spans: Vec<Span> = hints
            .into_iter()
            .flat_map(|(key, desc)| {
                vec![
                    Span::styled(
                        format!(" {key}"),
                        Style::default().fg(Color::Yellow).bold(),
                    ),
                    Span::raw(format!(" {desc} ")),
                ]
            })
            .collect();

        frame.render_widget(Line::from(spans), area);
    }

    fn render_input_bar(&self, frame: &mut Frame, label: &str, input: &str, area: Rect) {
        let input_area = Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(3),
            width: area.width,
            height: 3,
        };
        frame.render_widget(Clear, input_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(label);
        let paragraph = Paragraph::new(input).block(block);
        frame.render_widget(paragraph, input_area);
    }

    fn render_fetched(&self, frame: &mut Frame, todo: &Todo, area: Rect) {
        let block = Block::default()
            .title(" Todo Found ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let body = serde_json::to_string_pretty(todo)
            .unwrap_or_else(|_| "(unprintable todo)".into());
        let paragraph = Paragraph::new(body)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn render_form(
        &self,
        frame: &mut Frame,
        draft: &Draft,
        field: FormField,
        editing: bool,
        area: Rect,
    ) {
        let popup = centered_rect(55, 45, area);
        frame.render_widget(Clear, popup);

        let title = if editing { " Edit Todo " } else { " Add Todo " };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let completed_display = if draft.completed { "[x]" } else { "[ ]" };
        let id_display = if !editing && draft.id.is_empty() {
            "(blank = server assigns)".to_string()
        } else {
            draft.id.clone()
        };
        let rows = [
            (FormField::Id, "ID", id_display),
            (FormField::Title, "Title", draft.title.clone()),
            (
                FormField::Description,
                "Description",
                draft.description.clone(),
            ),
            (
                FormField::Completed,
                "Completed",
                completed_display.to_string(),
            ),
        ];

        let mut lines = Vec::new();
        for (f, label, value) in rows {
            let marker = if f == field { "> " } else { "  " };
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan).bold()),
                Span::styled(format!("{label}: "), Style::default().bold()),
                Span::raw(value),
            ]));
            lines.push(Line::from(""));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, inner);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
