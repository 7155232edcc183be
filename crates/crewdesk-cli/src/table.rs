//! Plain-text table rendering for list commands.
//!
//! A [`Column`] either names a record field directly or carries a render
//! callback for derived cells (joined names, yes/no flags). Rendering is
//! width-aligned; an empty row set prints a fixed placeholder instead of a
//! bare header.

use serde_json::Value;
use std::collections::HashMap;

/// Printed when a list command has nothing to show.
pub const EMPTY_MESSAGE: &str = "No records found.";

enum CellSource {
    Field(&'static str),
    Render(Box<dyn Fn(&Value) -> String>),
}

/// One table column: a header plus how to produce each cell.
pub struct Column {
    header: &'static str,
    source: CellSource,
}

impl Column {
    /// A column showing a record field verbatim.
    pub fn field(header: &'static str, field: &'static str) -> Self {
        Self {
            header,
            source: CellSource::Field(field),
        }
    }

    /// A column with a render callback for derived cells.
    pub fn render<F>(header: &'static str, render: F) -> Self
    where
        F: Fn(&Value) -> String + 'static,
    {
        Self {
            header,
            source: CellSource::Render(Box::new(render)),
        }
    }

    fn cell(&self, row: &Value) -> String {
        match &self.source {
            CellSource::Field(field) => display(row.get(*field)),
            CellSource::Render(render) => render(row),
        }
    }
}

/// Human display for one field value: strings unquoted, null and missing as
/// a dash, everything else in JSON notation.
pub fn display(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// An `id -> name` lookup built from a list of records.
pub fn name_index(records: &[Value]) -> HashMap<i64, String> {
    records
        .iter()
        .filter_map(|record| {
            let id = record.get("id").and_then(Value::as_i64)?;
            let name = record.get("name").and_then(Value::as_str)?;
            Some((id, name.to_string()))
        })
        .collect()
}

/// Renders rows under headers, columns padded to their widest cell.
pub fn render_table(columns: &[Column], rows: &[Value]) -> String {
    if rows.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|column| column.cell(row)).collect())
        .collect();

    let mut widths: Vec<usize> = columns
        .iter()
        .map(|column| column.header.chars().count())
        .collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for (i, column) in columns.iter().enumerate() {
        push_cell(&mut out, column.header, widths[i], i + 1 == columns.len());
    }
    out.push('\n');
    for (i, width) in widths.iter().enumerate() {
        push_cell(&mut out, &"-".repeat(*width), *width, i + 1 == widths.len());
    }
    out.push('\n');
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            push_cell(&mut out, cell, widths[i], i + 1 == row.len());
        }
        out.push('\n');
    }
    out
}

fn push_cell(out: &mut String, content: &str, width: usize, last: bool) {
    out.push_str(content);
    if !last {
        for _ in content.chars().count()..width {
            out.push(' ');
        }
        out.push_str("  ");
    }
}
