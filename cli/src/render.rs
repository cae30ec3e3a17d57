use todo_core::Line;

pub const EMPTY_PLACEHOLDER: &str = "No todos yet. Add one with `add <text>`.";

/// Render the app view as terminal text, one line per entry.
pub fn render(lines: &[Line<'_>]) -> String {
    let mut out = String::new();
    for line in lines {
        let text = match line {
            Line::Error(message) => format!("error: {message}"),
            Line::Empty => EMPTY_PLACEHOLDER.to_string(),
            Line::Item(todo) => {
                let mark = if todo.completed { 'x' } else { ' ' };
                format!("[{mark}] {:>4}  {}", todo.id, todo.text)
            }
        };
        out.push_str(&text);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use todo_core::Todo;

    use super::*;

    #[test]
    fn renders_items_with_checkbox() {
        let open = Todo {
            id: 1,
            text: "buy milk".into(),
            completed: false,
        };
        let done = Todo {
            id: 12,
            text: "walk dog".into(),
            completed: true,
        };
        let out = render(&[Line::Item(&open), Line::Item(&done)]);
        assert_eq!(out, "[ ]    1  buy milk\n[x]   12  walk dog\n");
    }

    #[test]
    fn renders_error_and_placeholder() {
        let out = render(&[Line::Error("Failed to load todos.")]);
        assert_eq!(out, "error: Failed to load todos.\n");
        assert_eq!(render(&[Line::Empty]), format!("{EMPTY_PLACEHOLDER}\n"));
    }
}
