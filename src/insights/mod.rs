// src/insights/mod.rs
//
// Renderer for the small markdown subset the analysis service uses in its
// AI commentary: bold, italic, headings, paragraph/line breaks and flat
// lists. Parsing produces a block node list first; emission is a separate
// step so the supported grammar stays testable on its own. This is a
// best-effort subset, not a markdown processor: nested structures,
// escaping and code spans are out of scope.

/// Fragment shown when the service returned no commentary.
pub const NO_INSIGHTS_PLACEHOLDER: &str = "<p>No insights available.</p>";

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Strong(String),
    Emphasis(String),
    /// A single newline inside a paragraph.
    Break,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// `###` maps to level 3; `##` and `#` both map to level 2.
    Heading { level: u8, spans: Vec<Inline> },
    Paragraph(Vec<Inline>),
    /// One container per run of adjacent `- x` / `N. x` lines.
    List(Vec<Vec<Inline>>),
}

/// Parse commentary text into block nodes.
pub fn parse(text: &str) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut paragraph: Vec<Inline> = Vec::new();

    for raw_line in text.lines() {
        let line = raw_line.trim_end_matches('\r');
        if line.trim().is_empty() {
            flush_paragraph(&mut blocks, &mut paragraph);
        } else if let Some(rest) = line.strip_prefix("### ") {
            flush_paragraph(&mut blocks, &mut paragraph);
            blocks.push(Block::Heading {
                level: 3,
                spans: parse_inlines(rest),
            });
        } else if let Some(rest) = line
            .strip_prefix("## ")
            .or_else(|| line.strip_prefix("# "))
        {
            flush_paragraph(&mut blocks, &mut paragraph);
            blocks.push(Block::Heading {
                level: 2,
                spans: parse_inlines(rest),
            });
        } else if let Some(rest) = line.strip_prefix("- ") {
            flush_paragraph(&mut blocks, &mut paragraph);
            push_list_item(&mut blocks, parse_inlines(rest));
        } else if let Some(rest) = strip_ordered_marker(line) {
            flush_paragraph(&mut blocks, &mut paragraph);
            // Numeral discarded, text kept.
            push_list_item(&mut blocks, parse_inlines(rest));
        } else {
            if !paragraph.is_empty() {
                paragraph.push(Inline::Break);
            }
            paragraph.extend(parse_inlines(line));
        }
    }
    flush_paragraph(&mut blocks, &mut paragraph);
    blocks
}

/// Render commentary to markup. Empty or absent input yields the fixed
/// placeholder fragment.
pub fn render_html(text: Option<&str>) -> String {
    match text {
        Some(t) if !t.trim().is_empty() => emit_html(&parse(t)),
        _ => NO_INSIGHTS_PLACEHOLDER.to_string(),
    }
}

fn flush_paragraph(blocks: &mut Vec<Block>, paragraph: &mut Vec<Inline>) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph(std::mem::take(paragraph)));
    }
}

/// Adjacent list items end up in one container.
fn push_list_item(blocks: &mut Vec<Block>, item: Vec<Inline>) {
    if let Some(Block::List(items)) = blocks.last_mut() {
        items.push(item);
    } else {
        blocks.push(Block::List(vec![item]));
    }
}

/// Match `N. text` at the start of a line, returning the text.
fn strip_ordered_marker(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    line[digits..]
        .strip_prefix('.')?
        .strip_prefix(|c: char| c.is_whitespace())
}

/// Split a line into text, `**strong**` and `*emphasis*` spans. Unmatched
/// markers fall through as literal text.
fn parse_inlines(text: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while let Some(i) = rest.find('*') {
        let (before, after) = rest.split_at(i);
        plain.push_str(before);
        if let Some(tail) = after.strip_prefix("**") {
            match tail.find("**") {
                Some(end) if end > 0 => {
                    flush_plain(&mut spans, &mut plain);
                    spans.push(Inline::Strong(tail[..end].to_string()));
                    rest = &tail[end + 2..];
                }
                _ => {
                    plain.push_str("**");
                    rest = tail;
                }
            }
        } else {
            let tail = &after[1..];
            match tail.find('*') {
                Some(end) if end > 0 => {
                    flush_plain(&mut spans, &mut plain);
                    spans.push(Inline::Emphasis(tail[..end].to_string()));
                    rest = &tail[end + 1..];
                }
                _ => {
                    plain.push('*');
                    rest = tail;
                }
            }
        }
    }
    plain.push_str(rest);
    flush_plain(&mut spans, &mut plain);
    spans
}

fn flush_plain(spans: &mut Vec<Inline>, plain: &mut String) {
    if !plain.is_empty() {
        spans.push(Inline::Text(std::mem::take(plain)));
    }
}

fn emit_html(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            Block::Heading { level, spans } => {
                out.push_str(&format!(
                    "<h{level}>{}</h{level}>",
                    emit_inlines(spans)
                ));
            }
            Block::Paragraph(spans) => {
                out.push_str(&format!("<p>{}</p>", emit_inlines(spans)));
            }
            Block::List(items) => {
                out.push_str("<ul>");
                for item in items {
                    out.push_str(&format!("<li>{}</li>", emit_inlines(item)));
                }
                out.push_str("</ul>");
            }
        }
    }
    out
}

fn emit_inlines(spans: &[Inline]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Inline::Text(t) => out.push_str(t),
            Inline::Strong(t) => out.push_str(&format!("<strong>{t}</strong>")),
            Inline::Emphasis(t) => out.push_str(&format!("<em>{t}</em>")),
            Inline::Break => out.push_str("<br>"),
        }
    }
    out
}
