//! Client-side application state for the todo list.
//!
//! # Design
//! `TodoApp` mirrors the server list as of the last successful fetch, holds
//! the pending new-item text and the last user-facing error. Every successful
//! mutation is followed by a full list refresh; nothing is patched locally.
//! Failures never panic or leave a half-updated list: a failed list fetch
//! clears the list, a failed mutation only sets the error message.

use tracing::warn;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::{CreateTodo, Todo, UpdateTodo};

pub const LOAD_FAILED: &str = "Failed to load todos.";
pub const BAD_LIST_FORMAT: &str = "Received an unexpected response from the server.";
pub const CREATE_FAILED: &str = "Failed to add todo.";
pub const UPDATE_FAILED: &str = "Failed to update todo.";
pub const DELETE_FAILED: &str = "Failed to delete todo.";

/// One rendered line of the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Error(&'a str),
    Empty,
    Item(&'a Todo),
}

pub struct TodoApp<T> {
    client: TodoClient,
    transport: T,
    todos: Vec<Todo>,
    input: String,
    error: Option<String>,
}

impl<T: Transport> TodoApp<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self {
            client,
            transport,
            todos: Vec::new(),
            input: String::new(),
            error: None,
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Fetch the full list and replace local state with it.
    pub fn refresh(&mut self) {
        match self.fetch_list() {
            Ok(todos) => {
                self.todos = todos;
                self.error = None;
            }
            Err(err) => {
                warn!(error = %err, "failed to load todos");
                self.todos.clear();
                self.error = Some(
                    match err {
                        ApiError::UnexpectedShape { .. } => BAD_LIST_FORMAT,
                        _ => LOAD_FAILED,
                    }
                    .to_string(),
                );
            }
        }
    }

    /// Create a todo from the pending input. Blank input is ignored.
    pub fn submit(&mut self) {
        if self.input.trim().is_empty() {
            return;
        }
        let input = CreateTodo {
            text: self.input.clone(),
        };
        let result = self
            .client
            .build_create_todo(&input)
            .and_then(|req| self.transport.execute(req))
            .and_then(|resp| self.client.parse_create_todo(resp));
        match result {
            Ok(_) => {
                self.input.clear();
                self.refresh();
            }
            Err(err) => self.fail("create", CREATE_FAILED, err),
        }
    }

    /// Flip the completion flag of a listed todo. Ids not in the local list
    /// are ignored.
    pub fn toggle(&mut self, id: i64) {
        let Some(current) = self.todos.iter().find(|t| t.id == id) else {
            return;
        };
        let input = UpdateTodo {
            completed: !current.completed,
        };
        let result = self
            .client
            .build_update_todo(id, &input)
            .and_then(|req| self.transport.execute(req))
            .and_then(|resp| self.client.parse_update_todo(resp));
        match result {
            Ok(_) => self.refresh(),
            Err(err) => self.fail("update", UPDATE_FAILED, err),
        }
    }

    pub fn delete(&mut self, id: i64) {
        let req = self.client.build_delete_todo(id);
        let result = self
            .transport
            .execute(req)
            .and_then(|resp| self.client.parse_delete_todo(resp));
        match result {
            Ok(_) => self.refresh(),
            Err(err) => self.fail("delete", DELETE_FAILED, err),
        }
    }

    /// The list as it should be displayed: the error first if any, then an
    /// empty placeholder only when there is neither an error nor any item.
    pub fn view(&self) -> Vec<Line<'_>> {
        let mut lines = Vec::with_capacity(self.todos.len() + 1);
        if let Some(error) = &self.error {
            lines.push(Line::Error(error));
        } else if self.todos.is_empty() {
            lines.push(Line::Empty);
        }
        lines.extend(self.todos.iter().map(Line::Item));
        lines
    }

    fn fetch_list(&self) -> Result<Vec<Todo>, ApiError> {
        let req = self.client.build_list_todos();
        let resp = self.transport.execute(req)?;
        self.client.parse_list_todos(resp)
    }

    fn fail(&mut self, action: &str, message: &str, err: ApiError) {
        warn!(action, error = %err, "todo request failed");
        self.error = Some(message.to_string());
    }
}
