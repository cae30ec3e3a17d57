//! Client core for the todo service.
//!
//! # Overview
//! `TodoClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern). `TodoApp` layers the
//! client-side list state on top: it drives a host-provided `Transport`,
//! refreshes the whole list after every successful write and turns failures
//! into a short user-facing message. `UreqTransport` is the stock blocking
//! transport used by the terminal client and the live-server tests.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - DTOs are defined independently from the server crate; integration tests
//!   catch schema drift.

pub mod app;
pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use app::{Line, TodoApp};
pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use transport::UreqTransport;
pub use types::{Acknowledgement, CreateTodo, Todo, UpdateTodo};
