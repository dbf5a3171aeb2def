//! Plain-text rendering.

use crate::document::{Block, Document};

const INDENT: usize = 2;

/// Render `document` as indented plain text. Images are only counted.
pub fn render_text(document: &Document) -> String {
    let mut out = String::new();
    push_line(&mut out, 0, &document.title);
    push_line(&mut out, 0, &document.date_line);
    for section in &document.sections {
        out.push('\n');
        push_line(&mut out, 0, &section.heading);
        for block in &section.blocks {
            write_block(&mut out, block, INDENT);
        }
    }
    out
}

fn push_line(out: &mut String, indent: usize, text: &str) {
    out.extend(std::iter::repeat_n(' ', indent));
    out.push_str(text);
    out.push('\n');
}

fn write_block(out: &mut String, block: &Block, indent: usize) {
    match block {
        Block::Table(rows) => {
            for row in rows {
                push_line(out, indent, &format!("{}: {}", row.label, row.value));
            }
        }
        Block::Text(text) => {
            for line in text.lines() {
                push_line(out, indent, line);
            }
        }
        Block::Lines { caption, lines } => {
            push_line(out, indent, &format!("{caption}:"));
            for line in lines {
                push_line(out, indent + INDENT, line);
            }
        }
        Block::Images { caption, sources } => {
            push_line(out, indent, &format!("{caption}: {}장", sources.len()));
        }
        Block::Group { heading, blocks } => {
            push_line(out, indent, heading);
            for inner in blocks {
                write_block(out, inner, indent + INDENT);
            }
        }
    }
}
