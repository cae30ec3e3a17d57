//! Terminal front end for the todo service.
//!
//! Reads one command per line from stdin, applies it through `TodoApp` and
//! prints the refreshed list. `TODO_API_URL` selects the server (default
//! `http://127.0.0.1:8080`, the proxy).

mod command;
mod render;

use std::io::{self, BufRead, Write};

use todo_core::{TodoApp, TodoClient, UreqTransport};
use tracing_subscriber::EnvFilter;

use command::Command;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the rendered list.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let base_url = std::env::var("TODO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let mut app = TodoApp::new(TodoClient::new(&base_url), UreqTransport::new());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    app.refresh();
    write!(stdout, "{}", render::render(&app.view()))?;

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => {
                writeln!(stdout, "{}", command::HELP)?;
                continue;
            }
            Ok(Command::List) => app.refresh(),
            Ok(Command::Add(text)) => {
                app.set_input(text);
                app.submit();
            }
            Ok(Command::Toggle(id)) => app.toggle(id),
            Ok(Command::Delete(id)) => app.delete(id),
            Err(message) => {
                writeln!(stdout, "{message}")?;
                continue;
            }
        }
        write!(stdout, "{}", render::render(&app.view()))?;
    }
    Ok(())
}
