//! XHTML rendering.

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::document::{Block, Document};

const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

const STYLE: &str = "body{font-family:sans-serif;max-width:960px;margin:auto}\
table{width:100%;border-collapse:collapse}\
th{width:25%;text-align:left;color:#555}\
th,td{padding:4px;border-bottom:1px solid #ddd}\
.description{white-space:pre-wrap}\
.marking{font-family:monospace;background:#f0fdf4;padding:8px}\
img{max-height:200px;margin:4px}";

/// Render `document` as a standalone XHTML page.
pub fn render_html(document: &Document) -> Result<String> {
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    let mut html = BytesStart::new("html");
    html.push_attribute(("xmlns", XHTML_NS));
    html.push_attribute(("lang", "ko"));
    xml.write_event(Event::Start(html))?;

    xml.write_event(Event::Start(BytesStart::new("head")))?;
    let mut meta = BytesStart::new("meta");
    meta.push_attribute(("charset", "UTF-8"));
    xml.write_event(Event::Empty(meta))?;
    write_text_element(&mut xml, "title", &document.title, None)?;
    write_text_element(&mut xml, "style", STYLE, None)?;
    xml.write_event(Event::End(BytesEnd::new("head")))?;

    xml.write_event(Event::Start(BytesStart::new("body")))?;
    write_text_element(&mut xml, "h1", &document.title, None)?;
    write_text_element(&mut xml, "p", &document.date_line, Some("date"))?;
    for section in &document.sections {
        xml.write_event(Event::Start(BytesStart::new("section")))?;
        write_text_element(&mut xml, "h2", &section.heading, None)?;
        for block in &section.blocks {
            write_block(&mut xml, block, document.include_images)?;
        }
        xml.write_event(Event::End(BytesEnd::new("section")))?;
    }
    xml.write_event(Event::End(BytesEnd::new("body")))?;
    xml.write_event(Event::End(BytesEnd::new("html")))?;

    String::from_utf8(xml.into_inner()).context("rendered document is not UTF-8")
}

fn write_text_element(
    xml: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
    class: Option<&str>,
) -> Result<()> {
    let mut start = BytesStart::new(name);
    if let Some(class) = class {
        start.push_attribute(("class", class));
    }
    xml.write_event(Event::Start(start))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_block(xml: &mut Writer<Vec<u8>>, block: &Block, include_images: bool) -> Result<()> {
    match block {
        Block::Table(rows) => {
            xml.write_event(Event::Start(BytesStart::new("table")))?;
            xml.write_event(Event::Start(BytesStart::new("tbody")))?;
            for row in rows {
                xml.write_event(Event::Start(BytesStart::new("tr")))?;
                write_text_element(xml, "th", &row.label, None)?;
                write_text_element(xml, "td", &row.value, None)?;
                xml.write_event(Event::End(BytesEnd::new("tr")))?;
            }
            xml.write_event(Event::End(BytesEnd::new("tbody")))?;
            xml.write_event(Event::End(BytesEnd::new("table")))?;
        }
        Block::Text(text) => write_text_element(xml, "p", text, Some("description"))?,
        Block::Lines { caption, lines } => {
            let mut div = BytesStart::new("div");
            div.push_attribute(("class", "marking"));
            xml.write_event(Event::Start(div))?;
            write_text_element(xml, "p", &format!("{caption}:"), None)?;
            for line in lines {
                write_text_element(xml, "div", line, None)?;
            }
            xml.write_event(Event::End(BytesEnd::new("div")))?;
        }
        Block::Images { caption, sources } => {
            if !include_images {
                let note = format!("{caption}: {}장", sources.len());
                return write_text_element(xml, "p", &note, Some("images"));
            }
            let mut div = BytesStart::new("div");
            div.push_attribute(("class", "images"));
            xml.write_event(Event::Start(div))?;
            for (index, source) in sources.iter().enumerate() {
                let alt = format!("{caption} {}", index + 1);
                let mut img = BytesStart::new("img");
                img.push_attribute(("src", source.as_str()));
                img.push_attribute(("alt", alt.as_str()));
                xml.write_event(Event::Empty(img))?;
            }
            xml.write_event(Event::End(BytesEnd::new("div")))?;
        }
        Block::Group { heading, blocks } => {
            let mut div = BytesStart::new("div");
            div.push_attribute(("class", "group"));
            xml.write_event(Event::Start(div))?;
            write_text_element(xml, "h3", heading, None)?;
            for inner in blocks {
                write_block(xml, inner, include_images)?;
            }
            xml.write_event(Event::End(BytesEnd::new("div")))?;
        }
    }
    Ok(())
}
