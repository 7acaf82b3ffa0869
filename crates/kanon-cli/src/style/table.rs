//! Table formatting using comfy-table.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

fn styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a table with a bold header row. Columns after the first are
/// right-aligned, since they hold numbers.
pub fn data_table<S: AsRef<str>>(headers: &[&str], rows: &[Vec<S>]) -> Table {
    let mut table = styled_table();

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|col| {
            if super::no_color() {
                Cell::new(col)
            } else {
                Cell::new(col).add_attribute(Attribute::Bold).fg(Color::Cyan)
            }
        })
        .collect();
    table.set_header(header_cells);

    for row in rows {
        table.add_row(row.iter().enumerate().map(|(i, value)| {
            let cell = Cell::new(value.as_ref());
            if i == 0 {
                cell
            } else {
                cell.set_alignment(CellAlignment::Right)
            }
        }));
    }

    table
}

/// Creates a key-value info table (two columns: key and value).
pub fn info_table(entries: &[(&str, String)]) -> Table {
    let mut table = styled_table();

    for (key, value) in entries {
        let key_cell = if super::no_color() {
            Cell::new(key)
        } else {
            Cell::new(key).fg(Color::DarkGrey)
        };
        table.add_row(vec![key_cell, Cell::new(value)]);
    }

    table
}

/// Prints a key-value info table.
pub fn print_info_table(entries: &[(&str, String)]) {
    println!("{}", info_table(entries));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_table_holds_every_cell() {
        let rows = vec![vec!["age", "3"], vec!["zip", "12"]];
        let rendered = data_table(&["Column", "Count"], &rows).to_string();
        for text in ["Column", "Count", "age", "zip", "12"] {
            assert!(rendered.contains(text), "missing {text}");
        }
    }

    #[test]
    fn info_table_holds_entries() {
        let rendered = info_table(&[("Records", "5".to_string())]).to_string();
        assert!(rendered.contains("Records"));
        assert!(rendered.contains('5'));
    }
}
