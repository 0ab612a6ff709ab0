use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

// Only ".0" and ".5" count as a fraction. "8.2" matches as "8".
static SIZE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]{1,2}(\.[05])?").unwrap());
static WIDTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s?(EEE|EE|E|[ABCDFG])").unwrap());
static CONVENTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^\s?(US|UK|EU)").unwrap());
static CONVENTION_PRECEDING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(US|UK|EUR?)\s?[0-9]").unwrap());
static SPACES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Space plus three chars for "EEE".
const POST_CHARS_AHEAD: usize = 4;
/// Space, the R of "EUR", and four chars for e.g. "11.5".
const PRECEDES_CHARS_AHEAD: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Convention {
    #[serde(rename = "US")]
    Us,
    #[serde(rename = "UK")]
    Uk,
    #[serde(rename = "EU")]
    Eu,
}

impl Convention {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "US" => Some(Self::Us),
            "UK" => Some(Self::Uk),
            "EU" | "EUR" => Some(Self::Eu),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::Uk => "UK",
            Self::Eu => "EU",
        }
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate parse of a sizing text. Every slot may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeParts {
    pub size: Option<String>,
    pub width: Option<String>,
    pub convention: Option<Convention>,
}

/// Byte range of a match inside the haystack it was given.
type MatchFn = fn(&str) -> Option<(usize, usize)>;

fn match_size(s: &str) -> Option<(usize, usize)> {
    SIZE_RE.find(s).map(|m| (m.start(), m.end()))
}

fn match_width(s: &str) -> Option<(usize, usize)> {
    let caps = WIDTH_RE.captures(s)?;
    let width = caps.get(1)?;
    // A lone "E" followed by "U" is the start of "EU", not a width. This loses
    // "7.5EUK", which is much rarer than "44EU".
    if width.as_str().eq_ignore_ascii_case("E")
        && s[width.end()..].starts_with(|c: char| c.eq_ignore_ascii_case(&'U'))
    {
        return None;
    }
    let whole = caps.get(0)?;
    Some((whole.start(), whole.end()))
}

fn match_convention(s: &str) -> Option<(usize, usize)> {
    CONVENTION_RE.find(s).map(|m| (m.start(), m.end()))
}

/// A convention only counts as preceding when a number follows it.
fn match_convention_preceding(s: &str) -> Option<(usize, usize)> {
    let caps = CONVENTION_PRECEDING_RE.captures(s)?;
    let convention = caps.get(1)?;
    Some((convention.start(), convention.end()))
}

pub fn collapse_spaces(s: &str) -> String {
    SPACES_RE.replace_all(s, " ").into_owned()
}

/// Byte offset `n` chars past `start`, clamped to the end of `s`.
fn advance_chars(s: &str, start: usize, n: usize) -> usize {
    s[start..]
        .char_indices()
        .nth(n)
        .map(|(i, _)| start + i)
        .unwrap_or(s.len())
}

/// Run `fns` in order over `line`. Once something matches, the next search
/// starts right after it and may only look `chars_ahead` chars further. A
/// miss leaves the window where it was. Matches come back trimmed and
/// uppercased.
pub fn sticky_match(line: &str, fns: &[MatchFn], chars_ahead: usize) -> Vec<Option<String>> {
    let input = collapse_spaces(line).to_uppercase();
    let mut start = 0;
    let mut end = input.len();

    fns.iter()
        .map(|find| {
            let window = &input[start..end];
            let (m_start, m_end) = find(window)?;
            let matched = window[m_start..m_end].trim().to_string();
            start += m_end;
            end = advance_chars(&input, start, chars_ahead);
            Some(matched)
        })
        .collect()
}

/// Size, then width, then convention: "10.5EE US".
pub fn post_match(line: &str) -> SizeParts {
    let fns: [MatchFn; 3] = [match_size, match_width, match_convention];
    let mut matches = sticky_match(line, &fns, POST_CHARS_AHEAD).into_iter();
    let size = matches.next().flatten();
    let width = matches.next().flatten();
    let convention = matches.next().flatten();
    SizeParts {
        size,
        width,
        convention: convention.as_deref().and_then(Convention::from_token),
    }
}

/// Convention before the size: "UK 9.5E", "EUR 44".
pub fn precedes_match(line: &str) -> SizeParts {
    let fns: [MatchFn; 3] = [match_convention_preceding, match_size, match_width];
    let mut matches = sticky_match(line, &fns, PRECEDES_CHARS_AHEAD).into_iter();
    let convention = matches.next().flatten();
    let size = matches.next().flatten();
    let width = matches.next().flatten();
    SizeParts {
        size,
        width,
        convention: convention.as_deref().and_then(Convention::from_token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTES: &str = ", words (and another 9UK size).";

    fn parts(size: &str, width: Option<&str>, convention: Option<Convention>) -> SizeParts {
        SizeParts {
            size: Some(size.to_string()),
            width: width.map(str::to_string),
            convention,
        }
    }

    #[test]
    fn collapses_whitespace() {
        for input in ["hello world", "hello  world", "hello\tworld", "hello\nworld"] {
            assert_eq!(collapse_spaces(input), "hello world");
        }
    }

    #[test]
    fn sticky_miss_keeps_window() {
        // Width is missing, so the convention is still searched right after the size.
        let fns: [MatchFn; 3] = [match_size, match_width, match_convention];
        assert_eq!(
            sticky_match("9 uk", &fns, 4),
            vec![Some("9".to_string()), None, Some("UK".to_string())]
        );
    }

    #[test]
    fn sticky_window_limits_lookahead() {
        let fns: [MatchFn; 2] = [match_size, match_convention];
        // The convention is further than four chars away from the size.
        assert_eq!(sticky_match("9 and UK", &fns, 4), vec![Some("9".to_string()), None]);
    }

    #[test]
    fn post_patterns() {
        use Convention::*;
        let cases: &[(&str, SizeParts)] = &[
            ("8", parts("8", None, None)),
            ("8D", parts("8", Some("D"), None)),
            ("11", parts("11", None, None)),
            ("11D", parts("11", Some("D"), None)),
            ("8.5", parts("8.5", None, None)),
            ("8.5D", parts("8.5", Some("D"), None)),
            ("11.5D", parts("11.5", Some("D"), None)),
            ("8D US", parts("8", Some("D"), Some(Us))),
            ("8DUS", parts("8", Some("D"), Some(Us))),
            ("8 US", parts("8", None, Some(Us))),
            ("8US", parts("8", None, Some(Us))),
            ("8.0 US", parts("8.0", None, Some(Us))),
            ("8.0US", parts("8.0", None, Some(Us))),
            ("11.0US", parts("11.0", None, Some(Us))),
            ("8.5D US", parts("8.5", Some("D"), Some(Us))),
            ("11.5DUS", parts("11.5", Some("D"), Some(Us))),
            ("8A US", parts("8", Some("A"), Some(Us))),
            ("8B US", parts("8", Some("B"), Some(Us))),
            ("8C US", parts("8", Some("C"), Some(Us))),
            ("8E US", parts("8", Some("E"), Some(Us))),
            ("8EE US", parts("8", Some("EE"), Some(Us))),
            ("8EEE US", parts("8", Some("EEE"), Some(Us))),
            ("8F US", parts("8", Some("F"), Some(Us))),
            ("8G US", parts("8", Some("G"), Some(Us))),
            ("8d us", parts("8", Some("D"), Some(Us))),
            ("8D UK", parts("8", Some("D"), Some(Uk))),
            ("8DUK", parts("8", Some("D"), Some(Uk))),
            ("8UK", parts("8", None, Some(Uk))),
            ("44D EU", parts("44", Some("D"), Some(Eu))),
            ("44DEU", parts("44", Some("D"), Some(Eu))),
            ("44 EU", parts("44", None, Some(Eu))),
            ("44EU", parts("44", None, Some(Eu))),
            ("44.0EU", parts("44.0", None, Some(Eu))),
            ("44D EUR", parts("44", Some("D"), Some(Eu))),
            ("44DEUR", parts("44", Some("D"), Some(Eu))),
            ("44EUR", parts("44", None, Some(Eu))),
            ("44.0 EUR", parts("44.0", None, Some(Eu))),
            ("10.5E,", parts("10.5", Some("E"), None)),
            ("8 (best...)", parts("8", None, None)),
            ("8/8E", parts("8", None, None)),
            ("8.2D", parts("8", None, None)),
        ];

        for (line, expected) in cases {
            assert_eq!(&post_match(line), expected, "{line:?}");
            let noted = format!("{line}{NOTES}");
            assert_eq!(&post_match(&noted), expected, "{noted:?}");
        }
    }

    #[test]
    fn post_without_number() {
        assert_eq!(post_match("no idea"), SizeParts::default());
    }

    #[test]
    fn e_width_before_uk_is_lost() {
        // Known limitation of the "E not followed by U" guard.
        assert_eq!(post_match("7.5EUK"), parts("7.5", None, Some(Convention::Eu)));
    }

    #[test]
    fn precedes_patterns() {
        use Convention::*;
        let cases: &[(&str, SizeParts)] = &[
            ("US8", parts("8", None, Some(Us))),
            ("US 8", parts("8", None, Some(Us))),
            ("US8D", parts("8", Some("D"), Some(Us))),
            ("US 8D", parts("8", Some("D"), Some(Us))),
            ("US8.5", parts("8.5", None, Some(Us))),
            ("US 8.5", parts("8.5", None, Some(Us))),
            ("US8.5D", parts("8.5", Some("D"), Some(Us))),
            ("US 8.5D", parts("8.5", Some("D"), Some(Us))),
            ("UK8", parts("8", None, Some(Uk))),
            ("UK 8D", parts("8", Some("D"), Some(Uk))),
            ("UK 8.5", parts("8.5", None, Some(Uk))),
            ("uk 8.5d", parts("8.5", Some("D"), Some(Uk))),
            ("EU44", parts("44", None, Some(Eu))),
            ("EU 44", parts("44", None, Some(Eu))),
            ("EU44.0", parts("44.0", None, Some(Eu))),
            ("EUR44", parts("44", None, Some(Eu))),
            ("EUR 44", parts("44", None, Some(Eu))),
            ("EUR 44.0", parts("44.0", None, Some(Eu))),
        ];

        for (line, expected) in cases {
            assert_eq!(&precedes_match(line), expected, "{line:?}");
            let noted = format!("{line}{NOTES}");
            assert_eq!(&precedes_match(&noted), expected, "{noted:?}");
        }
    }

    #[test]
    fn precedes_falls_back_to_first_number() {
        assert_eq!(precedes_match("10D"), parts("10", Some("D"), None));
        // "US" is not followed by a number here.
        assert_eq!(precedes_match("8.5 US"), parts("8.5", None, None));
    }

    #[test]
    fn number_and_convention_in_either_order() {
        assert_eq!(post_match("8.5 US"), parts("8.5", None, Some(Convention::Us)));
        assert_eq!(precedes_match("US 8.5"), parts("8.5", None, Some(Convention::Us)));
    }

    #[test]
    fn convention_tokens() {
        assert_eq!(Convention::from_token("eur"), Some(Convention::Eu));
        assert_eq!(Convention::from_token("UK"), Some(Convention::Uk));
        assert_eq!(Convention::from_token("JP"), None);
        assert_eq!(Convention::Us.to_string(), "US");
    }
}
