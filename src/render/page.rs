use std::fmt::Display;
use std::sync::LazyLock;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

use crate::config::PageAttrs;
use crate::denormalize::SizeRecord;
use crate::reference_size::format_size;

use super::group::Grouping;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Characters left alone by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Characters left alone by `encodeURI`.
const URI: &AsciiSet = &COMPONENT
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'#');

/// Fragment identifier for a group heading.
pub fn make_anchor(key: &str) -> String {
    let dashed = WHITESPACE_RE.replace_all(key.trim(), "-");
    utf8_percent_encode(&dashed, COMPONENT).to_string()
}

/// Title-case each word. A letter after an apostrophe stays lowercase, so
/// `white's bounty` becomes `White's Bounty`.
pub fn model_last(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut prev: Option<char> = None;
    for c in label.chars() {
        let starts_word = match prev {
            None => true,
            Some(p) => !p.is_alphanumeric() && p != '\'' && p != '’',
        };
        if starts_word {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        prev = Some(c);
    }
    out
}

pub fn comment_url(record: &SizeRecord) -> String {
    format!("{}/{}", record.thread_url.trim_end_matches('/'), record.id)
}

/// The size a respondent wears in this model, e.g. `10.5D` or `43`.
pub fn tag_size(record: &SizeRecord) -> String {
    format_size(record.size, record.width.as_deref().unwrap_or(""))
}

/// One table on a page.
pub struct GroupDisplay<'a> {
    pub name: String,
    pub anchor: String,
    pub count: usize,
    pub records: &'a [SizeRecord],
}

pub struct TablesPage<K> {
    pub name: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub groups: Vec<Grouping<K>>,
}

impl<K: Display> TablesPage<K> {
    pub fn new(attrs: &PageAttrs, groups: Vec<Grouping<K>>) -> Self {
        Self {
            name: attrs.name.to_string(),
            title: attrs.title.to_string(),
            subtitle: Some(attrs.subtitle.to_string()).filter(|s| !s.is_empty()),
            groups,
        }
    }

    pub fn filename(&self) -> String {
        utf8_percent_encode(&format!("{}.html", self.name), URI).to_string()
    }

    pub fn group_displays(&self) -> Vec<GroupDisplay<'_>> {
        self.groups
            .iter()
            .map(|(key, records)| {
                let name = key.to_string();
                GroupDisplay {
                    anchor: make_anchor(&name),
                    name,
                    count: records.len(),
                    records,
                }
            })
            .collect()
    }
}
