//! ASCII table renderer for the report sections.
//!
//! Cells are center-aligned inside `+-|` borders with a separator line
//! after every row. Column widths are computed from the plain text via
//! `unicode-width` before any styling is applied, so ANSI escape codes
//! never skew the layout.

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

/// Visual emphasis for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Plain,
    /// A worsening value (bold bright red).
    Worse,
    /// An improving or unchanged value (bold blue).
    Better,
}

/// One table cell: text plus emphasis.
#[derive(Debug, Clone)]
pub struct Cell {
    text: String,
    style: CellStyle,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: CellStyle::Plain,
        }
    }

    pub fn styled(text: impl Into<String>, style: CellStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// A bordered, center-aligned table.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    #[must_use]
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(ToString::to_string).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, cells: Vec<Cell>) {
        debug_assert_eq!(cells.len(), self.headers.len());
        self.rows.push(cells);
    }

    /// True when no data rows were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table to a string, with a trailing newline.
    #[must_use]
    pub fn render(&self, use_color: bool) -> String {
        let widths = self.column_widths();
        let border = render_border(&widths);

        let mut out = String::new();
        out.push_str(&border);
        out.push_str(&render_line(
            &self
                .headers
                .iter()
                .map(|h| Cell::plain(h.clone()))
                .collect::<Vec<_>>(),
            &widths,
            use_color,
        ));
        out.push_str(&border);
        for row in &self.rows {
            out.push_str(&render_line(row, &widths, use_color));
            out.push_str(&border);
        }
        out
    }

    // Inner widths: widest content per column plus one space margin on
    // each side.
    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.text.width());
                }
            }
        }
        widths.iter().map(|w| w + 2).collect()
    }
}

fn render_border(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for w in widths {
        line.push_str(&"-".repeat(*w));
        line.push('+');
    }
    line.push('\n');
    line
}

fn render_line(cells: &[Cell], widths: &[usize], use_color: bool) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        let pad = width.saturating_sub(cell.text.width());
        let left = pad / 2;
        let right = pad - left;
        line.push_str(&" ".repeat(left));
        line.push_str(&paint(cell, use_color));
        line.push_str(&" ".repeat(right));
        line.push('|');
    }
    line.push('\n');
    line
}

fn paint(cell: &Cell, use_color: bool) -> String {
    if !use_color {
        return cell.text.clone();
    }
    match cell.style {
        CellStyle::Plain => cell.text.clone(),
        CellStyle::Worse => cell.text.bright_red().bold().to_string(),
        CellStyle::Better => cell.text.blue().bold().to_string(),
    }
}
