//! Parsing of the interactive command line.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Add(String),
    Toggle(i64),
    Delete(i64),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  list            reload and show all todos
  add <text>      create a todo
  toggle <id>     flip a todo between open and done
  delete <id>     remove a todo
  help            show this message
  quit            exit";

/// Parse one input line. `Err` carries a message for the user.
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "" | "list" | "ls" => Ok(Command::List),
        "add" | "a" => Ok(Command::Add(rest.to_string())),
        "toggle" | "t" => parse_id(rest).map(Command::Toggle),
        "delete" | "rm" => parse_id(rest).map(Command::Delete),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("unknown command {other:?}, try `help`")),
    }
}

fn parse_id(raw: &str) -> Result<i64, String> {
    raw.parse()
        .map_err(|_| format!("expected a numeric todo id, got {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_keeps_the_rest_of_the_line() {
        assert_eq!(parse("add buy oat milk"), Ok(Command::Add("buy oat milk".into())));
    }

    #[test]
    fn bare_add_yields_empty_text() {
        assert_eq!(parse("add"), Ok(Command::Add(String::new())));
    }

    #[test]
    fn ids_must_be_numeric() {
        assert_eq!(parse("toggle 3"), Ok(Command::Toggle(3)));
        assert_eq!(parse("rm 12"), Ok(Command::Delete(12)));
        assert!(parse("toggle three").is_err());
        assert!(parse("delete").is_err());
    }

    #[test]
    fn blank_line_lists() {
        assert_eq!(parse("   "), Ok(Command::List));
    }

    #[test]
    fn unknown_word_is_an_error() {
        assert!(parse("frobnicate").is_err());
    }
}
