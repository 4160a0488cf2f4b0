//! Jupyter notebook extraction.

use super::Extracted;
use crate::domain::Limits;
use crate::utils::read_file_lossy;
use serde_json::Value;
use std::path::Path;

/// Render notebook cells as plain text. Code cells are emitted verbatim;
/// markdown cells become `# `-prefixed comment lines and are dropped when
/// they reach `max_markdown_cell_chars`.
pub(crate) fn extract_notebook(path: &Path, limits: &Limits) -> Extracted {
    let text = match read_file_lossy(path) {
        Ok(text) => text,
        Err(err) => return Extracted::read_error(&err),
    };
    let notebook: Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(err) => return Extracted::Error(format!("[Error reading notebook: {err}]")),
    };
    Extracted::Content(render_cells(&notebook, limits.max_markdown_cell_chars))
}

fn render_cells(notebook: &Value, max_markdown_chars: usize) -> String {
    let cells: &[Value] =
        notebook.get("cells").and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default();
    let count_of = |kind: &str| cells.iter().filter(|c| cell_type(c) == kind).count();

    let mut parts = vec![format!(
        "# Jupyter Notebook: {} code cells, {} markdown cells\n",
        count_of("code"),
        count_of("markdown")
    )];

    for (i, cell) in cells.iter().enumerate() {
        let source = cell_source(cell);
        match cell_type(cell) {
            "code" => {
                parts.push(format!("\n# --- Cell {} [Code] ---", i + 1));
                parts.push(source);
            }
            "markdown" if source.chars().count() < max_markdown_chars => {
                parts.push(format!("\n# --- Cell {} [Markdown] ---", i + 1));
                parts.extend(source.split('\n').map(|line| format!("# {line}")));
            }
            _ => {}
        }
    }
    parts.join("\n")
}

fn cell_type(cell: &Value) -> &str {
    cell.get("cell_type").and_then(Value::as_str).unwrap_or("unknown")
}

/// Cell source is either a single string or a list of line strings.
fn cell_source(cell: &Value) -> String {
    match cell.get("source") {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(lines)) => lines.iter().filter_map(Value::as_str).collect(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::extract_notebook;
    use crate::domain::Limits;
    use crate::extract::Extracted;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn write_notebook(tmp: &TempDir, cells: serde_json::Value) -> std::path::PathBuf {
        let path = tmp.path().join("nb.ipynb");
        let doc = json!({"cells": cells, "metadata": {}, "nbformat": 4, "nbformat_minor": 5});
        fs::write(&path, doc.to_string()).expect("write notebook");
        path
    }

    #[test]
    fn renders_code_and_short_markdown() {
        let tmp = TempDir::new().expect("tmp");
        let path = write_notebook(
            &tmp,
            json!([
                {"cell_type": "markdown", "source": ["# Title\n", "Intro"]},
                {"cell_type": "code", "source": ["import os\n", "print(os.getcwd())"]},
            ]),
        );

        let Extracted::Content(out) = extract_notebook(&path, &Limits::default()) else {
            panic!("expected content");
        };
        assert_eq!(
            out,
            "# Jupyter Notebook: 1 code cells, 1 markdown cells\n\n\
             \n# --- Cell 1 [Markdown] ---\n# # Title\n# Intro\n\
             \n# --- Cell 2 [Code] ---\nimport os\nprint(os.getcwd())"
        );
    }

    #[test]
    fn long_markdown_cells_are_omitted() {
        let tmp = TempDir::new().expect("tmp");
        let long = "m".repeat(600);
        let code = "x = 1\n".repeat(200);
        let path = write_notebook(
            &tmp,
            json!([
                {"cell_type": "markdown", "source": long},
                {"cell_type": "code", "source": code},
            ]),
        );

        let Extracted::Content(out) = extract_notebook(&path, &Limits::default()) else {
            panic!("expected content");
        };
        assert!(!out.contains("[Markdown]"));
        assert!(!out.contains("mmmm"));
        assert!(out.contains("# --- Cell 2 [Code] ---"));
        assert!(out.ends_with(&code));
    }

    #[test]
    fn malformed_notebook_is_an_inline_error() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.ipynb");
        fs::write(&path, "{ not json").expect("write");

        match extract_notebook(&path, &Limits::default()) {
            Extracted::Error(line) => assert!(line.starts_with("[Error reading notebook: ")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
