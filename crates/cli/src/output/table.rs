//! Column-aligned tables over a colour-capable writer.

use std::io::{self, Write};
use termcolor::{ColorSpec, WriteColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone)]
struct Column {
    header: String,
    align: Align,
    style: ColorSpec,
}

/// A cell's text and an optional style overriding its column's.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    text: String,
    style: Option<ColorSpec>,
}

impl Cell {
    pub fn styled(text: impl Into<String>, style: ColorSpec) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self { text, style: None }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::from(text.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
    show_header_rule: bool,
}

impl Table {
    pub fn new() -> Self {
        Self {
            show_header_rule: true,
            ..Self::default()
        }
    }

    /// A table without the rule under the header.
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn column(mut self, header: &str, align: Align, style: ColorSpec) -> Self {
        self.columns.push(Column {
            header: header.to_string(),
            align,
            style,
        });
        self
    }

    /// Append a row. Missing trailing cells render empty.
    pub fn row(&mut self, cells: Vec<Cell>) {
        self.rows.push(cells);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.text.chars().count())
                    .chain(std::iter::once(column.header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn render(&self, w: &mut dyn WriteColor) -> io::Result<()> {
        let widths = self.widths();
        let mut header_style = ColorSpec::new();
        header_style.set_bold(true);

        for (i, column) in self.columns.iter().enumerate() {
            separator(w, i)?;
            write_padded(w, &column.header, widths[i], column.align, &header_style)?;
        }
        writeln!(w)?;

        if self.show_header_rule {
            let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
            writeln!(w, "{}", "─".repeat(total))?;
        }

        let empty = Cell::default();
        for row in &self.rows {
            for (i, column) in self.columns.iter().enumerate() {
                let cell = row.get(i).unwrap_or(&empty);
                let style = cell.style.as_ref().unwrap_or(&column.style);
                separator(w, i)?;
                write_padded(w, &cell.text, widths[i], column.align, style)?;
            }
            writeln!(w)?;
        }

        Ok(())
    }
}

fn separator(w: &mut dyn WriteColor, index: usize) -> io::Result<()> {
    if index > 0 {
        write!(w, "  ")?;
    }
    Ok(())
}

fn write_padded(
    w: &mut dyn WriteColor,
    text: &str,
    width: usize,
    align: Align,
    style: &ColorSpec,
) -> io::Result<()> {
    let pad = " ".repeat(width.saturating_sub(text.chars().count()));

    if align == Align::Right {
        write!(w, "{pad}")?;
    }
    w.set_color(style)?;
    write!(w, "{text}")?;
    w.reset()?;
    if align == Align::Left {
        write!(w, "{pad}")?;
    }
    Ok(())
}
