//! Plain-text table rendering

use crate::table::{Page, SortConfig, TableRow};
use crate::utils::helpers::{create_pagination_info, truncate_text};

/// Widest a single cell may get before it is truncated
pub const MAX_CELL_WIDTH: usize = 40;

fn header_label(key: &str, label: &str, sort: Option<SortConfig>) -> String {
    match sort {
        Some(config) if config.key == key => format!("{} {}", label.to_uppercase(), config.direction.indicator()),
        _ => label.to_uppercase(),
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// Render one page as an aligned table followed by the pagination footer
pub fn render_table<R: TableRow>(title: &str, page: &Page<'_, R>, sort: Option<SortConfig>) -> String {
    let mut out = format!("{}\n", title);

    if page.items.is_empty() {
        out.push_str("No records.\n");
        return out;
    }

    let columns = R::columns();
    let headers: Vec<String> = columns
        .iter()
        .map(|c| header_label(c.key, c.label, sort))
        .collect();
    let rows: Vec<Vec<String>> = page
        .items
        .iter()
        .map(|r| r.cells().iter().map(|c| truncate_text(c, MAX_CELL_WIDTH)).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| pad(c, *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    out.push_str(&line(&headers));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in &rows {
        out.push_str(&line(row));
        out.push('\n');
    }

    out.push_str(&render_footer(page));
    out
}

/// Pagination summary plus which navigation moves are available
pub fn render_footer<R>(page: &Page<'_, R>) -> String {
    let mut footer = create_pagination_info(page.current_page, page.total_pages, page.total_items);
    if page.total_pages > 1 {
        let back = if page.can_go_back { "first/prev" } else { "-" };
        let forward = if page.can_go_forward { "next/last" } else { "-" };
        footer.push_str(&format!("  [{} | {}]", back, forward));
    }
    footer.push('\n');
    footer
}
