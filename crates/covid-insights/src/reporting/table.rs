//! Plain-text table rendering.

use serde::Serialize;

/// Horizontal alignment of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Align {
    Left,
    Right,
}

/// A small text table with a header row and no index column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    #[serde(skip)]
    align: Vec<Align>,
}

impl TextTable {
    /// Create an empty table; every column is right-aligned by default.
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let align = vec![Align::Right; headers.len()];
        Self {
            headers,
            rows: Vec::new(),
            align,
        }
    }

    /// Override the alignment of one column.
    pub fn with_align(mut self, column: usize, align: Align) -> Self {
        if let Some(slot) = self.align.get_mut(column) {
            *slot = align;
        }
        self
    }

    /// Append a row. Short rows are padded with empty cells.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// Render the table, one line per row, columns separated by a space.
    pub fn render(&self) -> String {
        let widths: Vec<usize> = (0..self.headers.len())
            .map(|i| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(self.headers[i].chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        std::iter::once(&self.headers)
            .chain(self.rows.iter())
            .map(|cells| self.render_line(cells, &widths))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_line(&self, cells: &[String], widths: &[usize]) -> String {
        cells
            .iter()
            .zip(widths)
            .zip(&self.align)
            .map(|((cell, &width), align)| match align {
                Align::Left => format!("{:<width$}", cell),
                Align::Right => format!("{:>width$}", cell),
            })
            .collect::<Vec<_>>()
            .join(" ")
            .trim_end()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_right_aligned() {
        let mut table = TextTable::new(["Country", "Confirmed"]);
        table.push_row(vec!["US".to_string(), "4290259".to_string()]);
        table.push_row(vec!["Brazil".to_string(), "2442375".to_string()]);

        let expected = "Country Confirmed\n     US   4290259\n Brazil   2442375";
        assert_eq!(table.render(), expected);
    }

    #[test]
    fn test_render_left_aligned_first_column() {
        let mut table = TextTable::new(["", "Deaths"]).with_align(0, Align::Left);
        table.push_row(vec!["count".to_string(), "3".to_string()]);
        table.push_row(vec!["mean".to_string(), "12.5".to_string()]);

        let expected = "      Deaths\ncount      3\nmean    12.5";
        assert_eq!(table.render(), expected);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut table = TextTable::new(["a", "b"]);
        table.push_row(vec!["x".to_string()]);
        assert_eq!(table.rows[0], vec!["x".to_string(), String::new()]);
    }

    #[test]
    fn test_header_only() {
        let table = TextTable::new(["Country", "Deaths"]);
        assert!(table.rows.is_empty());
        assert_eq!(table.render(), "Country Deaths");
    }
}
