//! Plain-text task table.

use consoleview_core::format::{pad_left, pad_right, ABSENT};
use consoleview_stats::{TaskRecord, SUMMARY_HEADERS};

const SEPARATOR: &str = "  ";

/// Render records as an aligned table, one task per line.
pub(crate) fn render_table(records: &[TaskRecord], precision: usize) -> String {
    let mut headers = vec!["ID", "NAME", "STATE"];
    headers.extend(SUMMARY_HEADERS);
    headers.push("LOCATION");
    let last = headers.len() - 1;

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            let state = if record.summary.completed { "done" } else { "running" };
            let mut row = vec![
                record.id.to_string(),
                record.name.clone().unwrap_or_else(|| ABSENT.to_string()),
                state.to_string(),
            ];
            row.extend(record.summary.cells(precision));
            row.push(record.location.clone());
            row
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    // text columns read left to right, numbers line up on the right
    let left_aligned = |i: usize| i == 1 || i == 2 || i == last;
    let format_line = |cells: Vec<&str>| -> String {
        let line: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if left_aligned(i) {
                    pad_left(cell, widths[i])
                } else {
                    pad_right(cell, widths[i])
                }
            })
            .collect();
        line.join(SEPARATOR).trim_end().to_string()
    };

    let mut out = format_line(headers.clone());
    out.push('\n');
    for row in &rows {
        out.push_str(&format_line(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}
