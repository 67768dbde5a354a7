//! Console table for ranked functions.

use crate::aggregator::cross_batch::AggregatedEntry;
use colored::*;

const HEADERS: [&str; 3] = ["Function", "Score", "Occurrences"];

/// Render entries as a bordered table, in the order given
///
/// **Public** - the report command prints this to stdout
///
/// Header cells are bold when colour output is enabled.
pub fn render_table(entries: &[AggregatedEntry]) -> String {
    let rows: Vec<[String; 3]> = entries
        .iter()
        .map(|entry| {
            [
                entry.name.clone(),
                entry.score.to_string(),
                entry.occurrences.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = render_border(&widths);
    let mut out = String::new();

    out.push_str(&border);
    out.push_str(&render_row(&HEADERS, &widths, true));
    out.push_str(&border);
    for row in &rows {
        out.push_str(&render_row(row, &widths, false));
    }
    if !rows.is_empty() {
        out.push_str(&border);
    }

    out
}

fn render_border(widths: &[usize; 3]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn render_row<S: AsRef<str>>(cells: &[S; 3], widths: &[usize; 3], header: bool) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        let cell = cell.as_ref();
        let padded = format!("{}{}", cell, " ".repeat(width - cell.chars().count()));
        let padded = if header {
            padded.bold().to_string()
        } else {
            padded
        };
        line.push_str(&format!(" {} |", padded));
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(name: &str, score: u64, occurrences: u32) -> AggregatedEntry {
        AggregatedEntry {
            name: name.to_string(),
            score,
            occurrences,
        }
    }

    #[test]
    fn test_render_table() {
        colored::control::set_override(false);

        let table = render_table(&[entry("g", 5, 1), entry("App\\Repo::find", 14, 12)]);

        let expected = "\
+----------------+-------+-------------+
| Function       | Score | Occurrences |
+----------------+-------+-------------+
| g              | 5     | 1           |
| App\\Repo::find | 14    | 12          |
+----------------+-------+-------------+
";
        assert_eq!(table, expected);
    }

    #[test]
    fn test_render_empty_table() {
        colored::control::set_override(false);

        let table = render_table(&[]);
        assert_eq!(table.lines().count(), 3);
        assert!(table.contains("| Function | Score | Occurrences |"));
    }
}
