use std::sync::LazyLock;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use regex::Regex;

static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(amp|lt|gt|quot|#39);").unwrap());

const SIZE_PAIR_DELIM: char = ':';
/// Stands in for `&` while markdown is parsed so the parser can't decode an
/// entity a second time.
const AMP_GUARD: char = '\u{E000}';
const LIST_MARKERS: [char; 4] = ['-', '+', '*', '>'];

/// One `label: sizing text` line from a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingPair {
    pub label: String,
    pub sizing_text: String,
}

/// Decode the handful of entities Reddit escapes in comment bodies.
/// Single pass, so `&amp;lt;` becomes `&lt;`.
pub fn unescape_html(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &regex::Captures| match &caps[1] {
            "amp" => "&",
            "lt" => "<",
            "gt" => ">",
            "quot" => "\"",
            _ => "'",
        })
        .into_owned()
}

/// Render markdown down to its text content, one block per line. Entities are
/// left as written.
fn strip_markdown(md: &str) -> String {
    let guarded = md.replace('&', &AMP_GUARD.to_string());
    let mut out = String::with_capacity(md.len());
    for event in Parser::new_ext(&guarded, Options::ENABLE_STRIKETHROUGH) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak | Event::Rule => out.push('\n'),
            Event::Start(Tag::Item) => out.push('\n'),
            Event::End(
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::CodeBlock,
            ) => out.push('\n'),
            _ => {}
        }
    }
    out.replace(AMP_GUARD, "&")
}

/// Turn a markdown comment body into trimmed, non-empty plain-text lines.
pub fn normalize_md(md: &str) -> Vec<String> {
    let text = unescape_html(md);
    strip_markdown(&text)
        .split('\n')
        .filter(|line| !line.is_empty())
        // Reddit users often write "-item" or ">quote" without the space the
        // markdown parser needs to recognise the marker.
        .map(|line| line.strip_prefix(LIST_MARKERS).unwrap_or(line))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a line on its single delimiter. Zero or several delimiters is not a pair.
pub fn split_sizing_pair(line: &str) -> Option<SizingPair> {
    let parts: Vec<&str> = line.split(SIZE_PAIR_DELIM).map(str::trim).collect();
    match parts.as_slice() {
        [label, sizing_text] => Some(SizingPair {
            label: label.to_string(),
            sizing_text: sizing_text.to_string(),
        }),
        _ => None,
    }
}

pub fn sizing_pairs(md: &str) -> Vec<SizingPair> {
    normalize_md(md)
        .iter()
        .filter_map(|line| split_sizing_pair(line))
        .collect()
}
