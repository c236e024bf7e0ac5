//! Plain-text rendering of a table page.

use std::fmt::Write;

use ledgerview_lib::column::Alignment;
use ledgerview_lib::controller::TableController;
use ledgerview_lib::options::FilterOption;

const EMPTY_MESSAGE: &str = "no data available";

/// Renders the current page as an aligned text table with a footer.
pub fn render_page(table: &TableController) -> String {
    let mut out = String::new();

    if table.visible_len() == 0 {
        out.push_str(EMPTY_MESSAGE);
        out.push('\n');
        return out;
    }

    let columns: Vec<_> = table.columns().iter().collect();
    let rows = table.page_rows();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.header.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            *width = (*width).max(cell.plain_text().chars().count());
        }
    }

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, &w)| pad(&c.header, w, c.align))
        .collect();
    let _ = writeln!(out, "{}", header.join(" | ").trim_end());
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));

    for row in &rows {
        let line: Vec<String> = row
            .cells
            .iter()
            .zip(columns.iter().zip(&widths))
            .map(|(cell, (c, &w))| pad(cell.plain_text(), w, c.align))
            .collect();
        let _ = writeln!(out, "{}", line.join(" | ").trim_end());
    }

    let _ = writeln!(
        out,
        "page {}/{} ({} of {} rows)",
        table.page_index() + 1,
        table.page_count().max(1),
        table.visible_len(),
        table.full_len()
    );
    out
}

/// Renders filter options one per line.
pub fn render_options(options: &[FilterOption]) -> String {
    options.iter().fold(String::new(), |mut out, option| {
        let _ = writeln!(out, "{}", option.label);
        out
    })
}

fn pad(text: &str, width: usize, align: Alignment) -> String {
    match align {
        Alignment::Left => format!("{:<width$}", text),
        Alignment::Center => format!("{:^width$}", text),
        Alignment::Right => format!("{:>width$}", text),
    }
}
