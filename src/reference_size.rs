use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ThreadError;
use crate::reddit::Comment;

static SIZE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]{1,2}(\.5)?").unwrap());
/// Size and width as announced at the top of a sizing sub-thread, e.g.
/// `##**Brannock:** 8.5D` or `#8.5 Narrow`.
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[0-9]{1,2}(\.5)?\s*(Narrow|Wide|[A-Z]{1,3})").unwrap());

const WIDTH_ADJECTIVES: [&str; 2] = ["NARROW", "WIDE"];

/// Format a size with its width: `10.5D`, or `10.5 Wide` when the width is a
/// word rather than a Brannock width.
pub fn format_size(size: f64, width: &str) -> String {
    let upper = width.to_uppercase();
    if WIDTH_ADJECTIVES.contains(&upper.as_str()) {
        let lower = width.to_lowercase();
        let mut chars = lower.chars();
        let capitalized: String = chars
            .next()
            .map(|first| first.to_uppercase().chain(chars).collect())
            .unwrap_or_default();
        return format!("{size} {capitalized}");
    }
    format!("{size}{upper}")
}

/// A self-reported Brannock measurement heading a sizing sub-thread.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceSize {
    pub size: f64,
    /// Always uppercase.
    pub width: String,
}

impl ReferenceSize {
    pub fn new(size: f64, width: &str) -> Self {
        Self {
            size,
            width: width.to_uppercase(),
        }
    }

    pub fn from_comment(comment: &Comment) -> Result<Self, ThreadError> {
        let body = comment.body.as_deref().ok_or_else(|| ThreadError::MissingBody {
            id: comment.id.clone(),
        })?;
        let found = COMMENT_RE
            .find(body)
            .ok_or_else(|| ThreadError::NoReferenceSize {
                text: body.to_string(),
            })?;
        found.as_str().parse()
    }
}

impl FromStr for ReferenceSize {
    type Err = ThreadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let no_size = || ThreadError::NoReferenceSize {
            text: input.to_string(),
        };
        let found = SIZE_RE.find(input).ok_or_else(no_size)?;
        let size: f64 = found.as_str().parse().map_err(|_| no_size())?;
        let width = format!("{}{}", &input[..found.start()], &input[found.end()..]);
        Ok(Self::new(size, width.trim()))
    }
}

impl fmt::Display for ReferenceSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_size(self.size, &self.width))
    }
}

impl PartialEq for ReferenceSize {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ReferenceSize {}

impl PartialOrd for ReferenceSize {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Numeric size first, then width.
impl Ord for ReferenceSize {
    fn cmp(&self, other: &Self) -> Ordering {
        self.size
            .total_cmp(&other.size)
            .then_with(|| self.width.cmp(&other.width))
    }
}
