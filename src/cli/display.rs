//! Plain-text table rendering for terminal output

const ELLIPSIS: &str = "...";

/// Cut a cell to at most `max_width` characters, marking the cut
pub fn truncate_cell(cell: &str, max_width: usize) -> String {
    let cell = cell.replace('\n', " ");
    if cell.chars().count() <= max_width {
        return cell;
    }

    // Too narrow for the marker: hard cut
    if max_width < ELLIPSIS.len() {
        return cell.chars().take(max_width).collect();
    }

    let keep = max_width - ELLIPSIS.len();
    let mut out: String = cell.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Render headers and rows as an aligned grid with a leading row index
pub fn render_table(headers: &[&str], rows: &[Vec<String>], max_colwidth: usize) -> String {
    let index_width = rows.len().saturating_sub(1).to_string().len();

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|c| truncate_cell(c, max_colwidth)).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();

    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad(h, *w))
        .collect();
    out.push_str(&format!("{} | {}\n", " ".repeat(index_width), header_line.join(" | ")));

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("{}-+-{}\n", "-".repeat(index_width), rule.join("-+-")));

    for (i, row) in cells.iter().enumerate() {
        let line: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(j, w)| pad(row.get(j).map(String::as_str).unwrap_or(""), *w))
            .collect();
        out.push_str(&format!("{:>width$} | {}\n", i, line.join(" | "), width = index_width));
    }

    out
}

fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    format!("{}{}", cell, " ".repeat(width.saturating_sub(len)))
}
