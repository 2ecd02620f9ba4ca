//! HTML projection of a [`RenderGrid`].

use std::fmt::Write;

use crate::grid::RenderGrid;

/// Escape text for use in HTML element content or quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Serialize a grid as a complete `<table>` element.
///
/// One header row from `grid.header`, one body row per grid row. All header
/// and cell text is escaped.
///
/// ```
/// use vitrina::{grid_to_html, RenderGrid};
///
/// let grid = RenderGrid {
///     header: vec!["name".into()],
///     rows: vec![vec!["<script>".into()]],
///     ..RenderGrid::default()
/// };
/// assert_eq!(
///     grid_to_html(&grid),
///     "<table><thead><tr><th>name</th></tr></thead>\
///      <tbody><tr><td>&lt;script&gt;</td></tr></tbody></table>"
/// );
/// ```
pub fn grid_to_html(grid: &RenderGrid) -> String {
    let mut html = String::from("<table><thead><tr>");
    for col in &grid.header {
        // Writing to a String cannot fail.
        let _ = write!(html, "<th>{}</th>", escape_html(col));
    }
    html.push_str("</tr></thead><tbody>");
    for row in &grid.rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{}</td>", escape_html(cell));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

/// Inline error block shown in place of a table that failed to load.
pub fn error_block(message: &str) -> String {
    format!(
        "<div class=\"vitrina-error\">{}</div>",
        escape_html(message)
    )
}
