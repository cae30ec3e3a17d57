//! Wire DTOs for the todo API.
//!
//! # Design
//! These mirror the server's JSON shapes but are defined independently so the
//! client does not depend on axum or sqlx. The live-server integration test
//! catches any drift between the two crates.

use serde::{Deserialize, Serialize};

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub text: String,
    pub completed: bool,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub text: String,
}

/// Request payload for setting a todo's completion flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodo {
    pub completed: bool,
}

/// Body of a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Acknowledgement {
    pub message: String,
}
