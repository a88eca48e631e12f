// src/process/text.rs
//
// Plain-text rendering of OCW Studio descriptions, which mix markdown,
// inline HTML and `{{< shortcode >}}` markup.

use once_cell::sync::Lazy;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use regex::Regex;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").unwrap());
static SHORTCODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{.*?\}\}\n?").unwrap());

/// Clean a course description down to plain text:
///  1. render markdown to its text content,
///  2. strip anything that looks like an HTML tag,
///  3. drop `{{ ... }}` shortcodes along with a trailing newline.
pub fn text_cleanup(text: &str) -> String {
    let plain = markdown_to_text(text);
    let untagged = HTML_TAG.replace_all(&plain, "");
    SHORTCODE.replace_all(&untagged, "").into_owned()
}

/// What closing a tag appends to the output.
#[derive(Clone, Copy)]
enum Close {
    Nothing,
    Newline,
    /// HTML block text already ends in a newline; only add one if missing.
    LineEnd,
}

/// Depth-first walk over the markdown events, keeping text and discarding
/// markup. Raw HTML and entity references are kept verbatim for the tag
/// stripper.
///
/// Each block closes with a newline and containers (lists, quotes, loose
/// list items) also open with one, so blank lines in the source collapse to
/// a single separator between paragraphs.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    let mut open: Vec<Close> = Vec::new();
    let mut image_depth = 0usize;
    let mut events = Parser::new(markdown).into_offset_iter().peekable();

    while let Some((event, range)) = events.next() {
        match event {
            Event::Start(tag) => {
                let close = match tag {
                    Tag::List(_) | Tag::BlockQuote(_) => {
                        out.push('\n');
                        Close::Newline
                    }
                    Tag::Item => {
                        // loose items wrap their content in paragraphs
                        if matches!(events.peek(), Some((Event::Start(Tag::Paragraph), _))) {
                            out.push('\n');
                        }
                        Close::Newline
                    }
                    Tag::Paragraph | Tag::Heading { .. } | Tag::CodeBlock(_) => Close::Newline,
                    Tag::HtmlBlock => Close::LineEnd,
                    Tag::Image { .. } => {
                        image_depth += 1;
                        Close::Nothing
                    }
                    _ => Close::Nothing,
                };
                open.push(close);
            }
            Event::End(end) => {
                if matches!(end, TagEnd::Image) {
                    image_depth = image_depth.saturating_sub(1);
                }
                match open.pop().unwrap_or(Close::Nothing) {
                    Close::Newline => out.push('\n'),
                    Close::LineEnd if !out.ends_with('\n') => out.push('\n'),
                    _ => {}
                }
            }
            // alt text has no place in the rendered text
            Event::Text(_) | Event::Code(_) if image_depth > 0 => {}
            Event::Text(text) => {
                let source = &markdown[range];
                if source.contains('&') && *text != *source {
                    out.push_str(source);
                } else {
                    out.push_str(&text);
                }
            }
            Event::Code(text) => out.push_str(&text),
            Event::Html(html) | Event::InlineHtml(html) => out.push_str(&html),
            Event::SoftBreak | Event::HardBreak | Event::Rule => out.push('\n'),
            _ => {}
        }
    }

    out.trim().to_string()
}
