use std::collections::HashMap;

use crate::data::record::FieldValue;

/// Rows examined when looking for a header.
pub const HEADER_SCAN_ROWS: usize = 50;

/// Number of cells in `row`, ignoring trailing empty cells.
pub fn row_width(row: &[FieldValue]) -> usize {
    row.iter().rposition(|c| *c != FieldValue::Null).map_or(0, |i| i + 1)
}

/// Most common row width among the first `max_rows` non-empty rows.
pub fn dominant_width(rows: &[Vec<FieldValue>], max_rows: usize) -> usize {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for row in rows.iter().take(max_rows) {
        let width = row_width(row);
        if width > 0 {
            *counts.entry(width).or_insert(0) += 1;
        }
    }
    // Ties go to the wider layout so the result does not depend on hash order
    counts
        .into_iter()
        .max_by_key(|&(width, c)| (c, width))
        .map(|(width, _)| width)
        .unwrap_or(0)
}

/// Detect the header row among the first `max_rows` rows.
///
/// Scans bottom-up for a row of the dominant width whose cells are all non-numeric
/// text. Returns `None` when the file has no such row.
pub fn detect_header(rows: &[Vec<FieldValue>], max_rows: usize) -> Option<usize> {
    let width = dominant_width(rows, max_rows);
    if width == 0 {
        return None;
    }

    let scanned = rows.len().min(max_rows);
    (0..scanned).rev().find(|&i| {
        let row = &rows[i];
        row_width(row) == width && row[..width].iter().all(is_header_cell)
    })
}

fn is_header_cell(cell: &FieldValue) -> bool {
    match cell {
        FieldValue::Text(s) => {
            let trimmed = s.trim();
            !trimmed.is_empty() && trimmed.parse::<f64>().is_err()
        }
        _ => false,
    }
}
