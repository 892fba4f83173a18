//! Indented tree rendering.

use std::io::{self, Write};
use termcolor::{ColorSpec, WriteColor};

#[derive(Debug, Clone, Default)]
pub struct Node {
    label: String,
    style: ColorSpec,
    children: Vec<Node>,
}

impl Node {
    pub fn new(label: impl Into<String>, style: ColorSpec) -> Self {
        Self {
            label: label.into(),
            style,
            children: Vec::new(),
        }
    }

    /// Add a child and return it for further nesting.
    pub fn add(&mut self, child: Node) -> &mut Node {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn render(&self, w: &mut dyn WriteColor) -> io::Result<()> {
        write_label(w, &self.label, &self.style)?;
        self.render_children(w, "")
    }

    fn render_children(&self, w: &mut dyn WriteColor, prefix: &str) -> io::Result<()> {
        let count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            let last = i + 1 == count;
            let (branch, indent) = if last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };

            write!(w, "{prefix}{branch}")?;
            write_label(w, &child.label, &child.style)?;
            child.render_children(w, &format!("{prefix}{indent}"))?;
        }
        Ok(())
    }
}

fn write_label(w: &mut dyn WriteColor, label: &str, style: &ColorSpec) -> io::Result<()> {
    w.set_color(style)?;
    write!(w, "{label}")?;
    w.reset()?;
    writeln!(w)
}
