//! Plain-text table output for a grid page.

use std::fmt::Write;

use erpgrid_lib::ColumnDescriptor;
use erpgrid_lib::ColumnRegistry;
use erpgrid_lib::GridRow;
use erpgrid_lib::GridView;
use erpgrid_lib::Value;
use erpgrid_lib::engine::ViewNode;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

const SEPARATOR: &str = " │ ";
const INDENT: &str = "  ";

enum Line {
    Group { depth: usize, text: String },
    Cells(Vec<String>),
}

/// Renders the page as aligned text.
///
/// Group headers are printed on their own line, indented by depth, with the
/// full member count of the group. Rows are indented below the innermost
/// header.
pub fn render_view<R: GridRow>(view: &GridView<'_, R>, registry: &ColumnRegistry) -> String {
    let mut out = String::new();
    let columns = &view.columns;

    let lines: Vec<Line> = view
        .nodes
        .iter()
        .map(|node| match node {
            ViewNode::GroupHeader(header) => {
                let label = registry
                    .get(header.column())
                    .map(|c| c.label.as_str())
                    .unwrap_or(header.column());
                let value = match header.value() {
                    Value::Null => "(empty)".into(),
                    value => value.to_text(),
                };
                Line::Group {
                    depth: header.depth,
                    text: format!("▾ {}: {} ({})", label, value, header.member_count),
                }
            }
            ViewNode::Row { row, .. } => Line::Cells(
                columns
                    .iter()
                    .map(|c| format_cell(row.value(&c.key), c))
                    .collect(),
            ),
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let natural = lines
                .iter()
                .filter_map(|line| match line {
                    Line::Cells(cells) => Some(display_width(&cells[i])),
                    Line::Group { .. } => None,
                })
                .fold(display_width(&column.label), usize::max);
            match column.width {
                Some(max) => natural.min(usize::from(max).max(1)),
                None => natural,
            }
        })
        .collect();

    let indent = INDENT.repeat(view.grouping.len());

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, &w)| pad(&c.label, w, false))
        .collect();
    let _ = writeln!(out, "{}{}", indent, header.join(SEPARATOR).trim_end());

    let rule: Vec<String> = widths.iter().map(|&w| "─".repeat(w)).collect();
    let _ = writeln!(out, "{}{}", indent, rule.join("─┼─"));

    if lines.is_empty() {
        let _ = writeln!(out, "{}(no rows)", indent);
    }

    for line in &lines {
        match line {
            Line::Group { depth, text } => {
                let _ = writeln!(out, "{}{}", INDENT.repeat(*depth), text);
            }
            Line::Cells(cells) => {
                let padded: Vec<String> = cells
                    .iter()
                    .zip(columns.iter().zip(&widths))
                    .map(|(cell, (c, &w))| pad(cell, w, is_numeric_column(c, view)))
                    .collect();
                let _ = writeln!(out, "{}{}", indent, padded.join(SEPARATOR).trim_end());
            }
        }
    }

    let page = &view.page;
    let _ = writeln!(
        out,
        "Page {} of {} · {} rows",
        page.page_index + 1,
        page.page_count,
        page.total_count
    );
    out
}

/// Formats one cell, honoring the column's render hint.
///
/// - `currency`: numbers with two decimals
/// - `date`: the date part of timestamps
fn format_cell(value: &Value, column: &ColumnDescriptor) -> String {
    match (column.render_hint.as_deref(), value) {
        (Some("currency"), Value::Int(i)) => format!("{}.00", i),
        (Some("currency"), Value::Long(l)) => format!("{}.00", l),
        (Some("currency"), Value::Float(f)) => format!("{:.2}", f),
        (Some("currency"), Value::Decimal(d)) => format!("{:.2}", d),
        (Some("date"), Value::DateTime(dt)) => dt.format("%Y-%m-%d").to_string(),
        (Some("date"), Value::String(s)) => s.split('T').next().unwrap_or(s).to_string(),
        _ => value.to_text().into_owned(),
    }
}

fn is_numeric_column<R: GridRow>(column: &ColumnDescriptor, view: &GridView<'_, R>) -> bool {
    view.rows().any(|row| {
        matches!(
            row.value(&column.key),
            Value::Int(_) | Value::Long(_) | Value::Float(_) | Value::Decimal(_)
        )
    })
}

fn display_width(s: &str) -> usize {
    s.width()
}

/// Pads to exactly `width` display columns, truncating with an ellipsis.
fn pad(text: &str, width: usize, align_right: bool) -> String {
    let text = truncate_to_width(text, width);
    let fill = " ".repeat(width.saturating_sub(display_width(&text)));
    if align_right {
        fill + &text
    } else {
        text + &fill
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target = max_width - 1;
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > target {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use erpgrid_lib::state::Direction;
    use erpgrid_lib::{Grid, GridConfig, Row};

    use super::*;

    fn grid() -> Grid<Row> {
        let registry = ColumnRegistry::new(vec![
            ColumnDescriptor::new("client", "Client").width(12).groupable(),
            ColumnDescriptor::new("status", "Status").groupable(),
            ColumnDescriptor::new("amount", "Amount")
                .sortable()
                .render_hint("currency"),
        ])
        .unwrap();
        let rows = vec![
            Row::new("1")
                .set("client", "JAIPUR SYNTEX LIMITED")
                .set("status", "Pending")
                .set("amount", 500i64),
            Row::new("2")
                .set("client", "C.M. TEXTILES PVT. LTD.")
                .set("status", "Pending")
                .set("amount", 42.5f64),
        ];
        Grid::with_rows(registry, GridConfig::default(), rows).unwrap()
    }

    #[test]
    fn test_render_flat_page() {
        let grid = grid();
        let text = render_view(&grid.view().unwrap(), grid.registry());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Client       │ Status  │ Amount");
        assert_eq!(lines[2], "JAIPUR SYNT… │ Pending │ 500.00");
        assert_eq!(lines[3], "C.M. TEXTIL… │ Pending │  42.50");
        assert_eq!(lines[4], "Page 1 of 1 · 2 rows");
    }

    #[test]
    fn test_render_grouped_page() {
        let mut grid = grid();
        grid.group_by("status").unwrap();
        grid.sort_by("amount", Direction::Desc).unwrap();
        let text = render_view(&grid.view().unwrap(), grid.registry());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "  Client       │ Amount");
        assert_eq!(lines[2], "▾ Status: Pending (2)");
        assert_eq!(lines[3], "  JAIPUR SYNT… │ 500.00");
    }

    #[test]
    fn test_truncate_wide_chars() {
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(display_width(&pad("日本", 6, false)), 6);
    }
}
