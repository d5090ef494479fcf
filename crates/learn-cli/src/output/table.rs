#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render an aligned table for string rows. Columns keep the order of `headers`.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
                .max(4)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| format_cell(&truncate_text(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");

    let divider = "-".repeat(header_line.chars().count());

    let row_lines = rows.iter().map(|row| {
        widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("", String::as_str);
                let cell = truncate_text(value, *width);
                let padded = format_cell(&cell, *width, looks_numeric(&cell));
                if options.color && cell == "NULL" {
                    padded.replacen("NULL", DIM_NULL, 1)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    });

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line.trim_end().to_string());
    lines.push(divider);
    lines.extend(row_lines.map(|line| line.trim_end().to_string()));
    lines.join("\n")
}

/// SQL NULL, dimmed so it stands apart from the text `"NULL"`.
const DIM_NULL: &str = "\u{1b}[2mNULL\u{1b}[0m";

/// Narrow the widest shrinkable column one step at a time until the table
/// fits. A column never drops below its header width (or 4).
fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let floors: Vec<usize> = headers.iter().map(|h| h.chars().count().max(4)).collect();
    let gaps = 2 * widths.len().saturating_sub(1);

    while widths.iter().sum::<usize>() + gaps > max_width {
        let widest = widths
            .iter()
            .zip(&floors)
            .enumerate()
            .filter(|(_, (width, floor))| width > floor)
            .max_by_key(|(index, (width, _))| (**width, std::cmp::Reverse(*index)))
            .map(|(index, _)| index);
        match widest {
            Some(index) => widths[index] -= 1,
            None => break,
        }
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    match value.char_indices().nth(width.saturating_sub(1)) {
        Some((cut, _)) if value.chars().count() > width => format!("{}…", &value[..cut]),
        _ if width == 0 && !value.is_empty() => "…".to_string(),
        _ => value.to_string(),
    }
}

/// Integers and decimals; rejects `inf`, `NaN` and exponents.
fn looks_numeric(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    !digits.is_empty()
        && digits.chars().any(|ch| ch.is_ascii_digit())
        && digits.chars().all(|ch| ch.is_ascii_digit() || ch == '.')
        && digits.matches('.').count() <= 1
}

fn format_cell(value: &str, width: usize, right: bool) -> String {
    if right {
        format!("{value:>width$}")
    } else {
        format!("{value:<width$}")
    }
}
