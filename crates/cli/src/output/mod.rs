//! Terminal output.
//!
//! Every printer takes a `WriteColor` so tests can render into a
//! `termcolor::Buffer`. Raw mode bypasses styling and writes pretty JSON.

mod format;
mod table;
mod tree;
mod views;

use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

pub use format::format_currency;
pub use views::{
    category_items, print_asset_tree, print_item, print_portfolio, print_portfolios,
    print_sheet_detail,
};

pub fn stdout() -> StandardStream {
    StandardStream::stdout(ColorChoice::Auto)
}

pub fn stderr() -> StandardStream {
    StandardStream::stderr(ColorChoice::Auto)
}

/// Pretty-printed JSON followed by a newline.
pub fn print_json<T: Serialize + ?Sized>(w: &mut dyn WriteColor, value: &T) -> io::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    writeln!(w, "{s}")
}

pub fn print_success(w: &mut dyn WriteColor, message: &str) -> io::Result<()> {
    w.set_color(&fg(Color::Green))?;
    write!(w, "✓")?;
    w.reset()?;
    writeln!(w, " {message}")
}

pub fn print_error(w: &mut dyn WriteColor, message: &str) -> io::Result<()> {
    w.set_color(&fg(Color::Red))?;
    writeln!(w, "✗ {message}")?;
    w.reset()
}

pub(crate) fn fg(color: Color) -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(color));
    spec
}

pub(crate) fn bold() -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_bold(true);
    spec
}

pub(crate) fn dimmed(color: Color) -> ColorSpec {
    let mut spec = fg(color);
    spec.set_dimmed(true);
    spec
}
