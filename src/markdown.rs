//! Best-effort formatter for job descriptions.
//!
//! Supports `#`/`##`/`###` headings, `-`/`*`/`1.` list items, blank-line
//! separation and `**bold**`, `*italic*` and `` `code` `` inside paragraphs.
//! Anything else is kept as literal paragraph text; malformed markup never
//! fails.

use std::str::Lines;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static ORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.+?)`").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading { level: u8, text: String },
    List { items: Vec<String> },
    /// Text with `<strong>`, `<em>` and `<code>` markers applied
    Paragraph { text: String },
}

/// Lazily parse `text` into blocks
pub fn blocks(text: &str) -> Blocks<'_> {
    Blocks {
        lines: text.lines(),
        list: Vec::new(),
        pending: None,
    }
}

/// Parse `text` into a block list
pub fn render(text: &str) -> Vec<Block> {
    blocks(text).collect()
}

/// Iterator over the blocks of a description, see [`blocks`]
pub struct Blocks<'a> {
    lines: Lines<'a>,
    list: Vec<String>,
    /// Block that closed the open list and still has to be yielded
    pending: Option<Block>,
}

enum Line<'a> {
    Heading(u8, &'a str),
    ListItem(&'a str),
    Blank,
    Text(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    let line = line.trim();

    if let Some(text) = line.strip_prefix("### ") {
        return Line::Heading(3, text);
    }
    if let Some(text) = line.strip_prefix("## ") {
        return Line::Heading(2, text);
    }
    if let Some(text) = line.strip_prefix("# ") {
        return Line::Heading(1, text);
    }
    // a bullet marker is stripped first, then a numeric one
    let bullet = line.strip_prefix("- ").or_else(|| line.strip_prefix("* "));
    if bullet.is_some() || ORDERED_ITEM.is_match(line) {
        let text = bullet.unwrap_or(line);
        let text = ORDERED_ITEM.find(text).map_or(text, |marker| &text[marker.end()..]);
        return Line::ListItem(text);
    }
    if line.is_empty() {
        return Line::Blank;
    }
    Line::Text(line)
}

/// Apply bold, then italic, then inline code substitution
pub fn inline(text: &str) -> String {
    let text = BOLD.replace_all(text, "<strong>$1</strong>");
    let text = ITALIC.replace_all(&text, "<em>$1</em>");
    CODE.replace_all(&text, "<code>$1</code>").into_owned()
}

impl Blocks<'_> {
    fn flush_list(&mut self) -> Option<Block> {
        if self.list.is_empty() {
            None
        } else {
            Some(Block::List {
                items: std::mem::take(&mut self.list),
            })
        }
    }
}

impl Iterator for Blocks<'_> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        if let Some(block) = self.pending.take() {
            return Some(block);
        }

        while let Some(line) = self.lines.next() {
            let block = match classify(line) {
                Line::ListItem(item) => {
                    self.list.push(item.to_string());
                    continue;
                }
                Line::Blank => {
                    if let Some(list) = self.flush_list() {
                        return Some(list);
                    }
                    continue;
                }
                Line::Heading(level, text) => Block::Heading {
                    level,
                    text: text.to_string(),
                },
                Line::Text(text) => Block::Paragraph { text: inline(text) },
            };

            return match self.flush_list() {
                Some(list) => {
                    self.pending = Some(block);
                    Some(list)
                }
                None => Some(block),
            };
        }

        self.flush_list()
    }
}
