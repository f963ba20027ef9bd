use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};
use tuido_core::todo::Todo;

/// The list of todos, rendered as a table in whatever order the server
/// returned them.
pub struct TodoTable {
    todos: Vec<Todo>,
    state: TableState,
}

impl TodoTable {
    pub fn new(todos: Vec<Todo>) -> Self {
        let mut state = TableState::default();
        if !todos.is_empty() {
            state.select(Some(0));
        }
        Self { todos, state }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Replace the list after a reload, keeping the cursor on the same
    /// todo when it still exists.
    pub fn set_todos(&mut self, todos: Vec<Todo>) {
        let selected_id = self.selected_todo().map(|t| t.id.clone());
        self.todos = todos;
        if self.todos.is_empty() {
            self.state.select(None);
        } else {
            let idx = selected_id
                .and_then(|id| self.todos.iter().position(|t| t.id == id))
                .unwrap_or(0);
            self.state.select(Some(idx));
        }
    }

    /// Returns the currently highlighted todo, if any.
    pub fn selected_todo(&self) -> Option<&Todo> {
        let idx = self.state.selected()?;
        self.todos.get(idx)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let current = self.state.selected().unwrap_or(0);
                if current + 1 < self.todos.len() {
                    self.state.select(Some(current + 1));
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let current = self.state.selected().unwrap_or(0);
                if current > 0 {
                    self.state.select(Some(current - 1));
                }
            }
            KeyCode::Char('g') => {
                if !self.todos.is_empty() {
                    self.state.select(Some(0));
                }
            }
            KeyCode::Char('G') => {
                if !self.todos.is_empty() {
                    self.state.select(Some(self.todos.len() - 1));
                }
            }
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let title = format!(" All Todos ({}) ", self.todos.len());
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        if self.todos.is_empty() {
            let empty = ratatui::widgets::Paragraph::new("No todos found.")
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, area);
            return;
        }

        let header = Row::new(vec!["ID", "Title", "Description", "Completed"])
            .style(Style::default().fg(Color::Yellow).bold())
            .bottom_margin(1);

        let rows: Vec<Row> = self
            .todos
            .iter()
            .map(|t| {
                let completed_cell = if t.completed {
                    Cell::from("true").style(Style::default().fg(Color::Green))
                } else {
                    Cell::from("false").style(Style::default().fg(Color::DarkGray))
                };
                Row::new(vec![
                    Cell::from(t.id.clone()),
                    Cell::from(t.title.clone()),
                    Cell::from(t.description.clone()),
                    completed_cell,
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(8),
                Constraint::Percentage(35),
                Constraint::Percentage(45),
                Constraint::Length(9),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan).bold())
        .highlight_symbol("> ");

        let mut state = self.state.clone();
        frame.render_stateful_widget(table, area, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn make_todo(id: &str) -> Todo {
        Todo {
            id: id.to_string(),
            title: format!("Todo {id}"),
            description: String::new(),
            completed: false,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn make_table() -> TodoTable {
        TodoTable::new(vec![make_todo("1"), make_todo("2"), make_todo("3")])
    }

    #[test]
    fn new_selects_first_row() {
        let table = make_table();
        assert_eq!(table.selected_todo().unwrap().id, "1");
    }

    #[test]
    fn new_empty_selects_nothing() {
        let table = TodoTable::new(vec![]);
        assert!(table.selected_todo().is_none());
    }

    #[test]
    fn j_and_k_move_selection() {
        let mut table = make_table();
        table.handle_key(key(KeyCode::Char('j')));
        assert_eq!(table.selected_todo().unwrap().id, "2");
        table.handle_key(key(KeyCode::Char('k')));
        assert_eq!(table.selected_todo().unwrap().id, "1");
    }

    #[test]
    fn selection_stops_at_ends() {
        let mut table = make_table();
        table.handle_key(key(KeyCode::Char('k')));
        assert_eq!(table.selected_todo().unwrap().id, "1");
        for _ in 0..10 {
            table.handle_key(key(KeyCode::Char('j')));
        }
        assert_eq!(table.selected_todo().unwrap().id, "3");
    }

    #[test]
    fn g_and_shift_g_jump() {
        let mut table = make_table();
        table.handle_key(key(KeyCode::Char('G')));
        assert_eq!(table.selected_todo().unwrap().id, "3");
        table.handle_key(key(KeyCode::Char('g')));
        assert_eq!(table.selected_todo().unwrap().id, "1");
    }

    #[test]
    fn set_todos_keeps_selection_by_id() {
        let mut table = make_table();
        table.handle_key(key(KeyCode::Char('j')));
        assert_eq!(table.selected_todo().unwrap().id, "2");

        // "1" deleted server-side; "2" survives at a new position
        table.set_todos(vec![make_todo("2"), make_todo("3")]);
        assert_eq!(table.selected_todo().unwrap().id, "2");
    }

    #[test]
    fn set_todos_falls_back_to_first_when_selection_gone() {
        let mut table = make_table();
        table.handle_key(key(KeyCode::Char('G')));
        table.set_todos(vec![make_todo("1")]);
        assert_eq!(table.selected_todo().unwrap().id, "1");
    }

    #[test]
    fn set_todos_empty_clears_selection() {
        let mut table = make_table();
        table.set_todos(vec![]);
        assert!(table.selected_todo().is_none());
    }
}
