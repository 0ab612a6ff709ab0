use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ThreadError;

const LISTING_KIND: &str = "Listing";
const COMMENT_KIND: &str = "t1";
const POST_KIND: &str = "t3";
/// Placeholder for collapsed replies. Carries no comment data.
const MORE_KIND: &str = "more";

const PERMALINK_BASE: &str = "https://www.reddit.com";

#[derive(Deserialize)]
struct RawNode {
    kind: String,
    #[serde(default)]
    data: Value,
}

#[derive(Deserialize)]
struct RawListing {
    #[serde(default)]
    children: Vec<RawNode>,
    modhash: Option<String>,
}

#[derive(Deserialize)]
struct RawComment {
    #[serde(default)]
    author: String,
    body: Option<String>,
    selftext: Option<String>,
    created_utc: Option<f64>,
    id: String,
    parent_id: Option<String>,
    #[serde(default)]
    subreddit: String,
    url: Option<String>,
    permalink: Option<String>,
    #[serde(default)]
    replies: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub children: Vec<Comment>,
    pub modhash: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommentKind {
    Comment,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub kind: CommentKind,
    pub author: String,
    /// Markdown; `selftext` for posts, `body` for comments.
    pub body: Option<String>,
    pub created_utc: Option<DateTime<Utc>>,
    pub id: String,
    pub parent_id: Option<String>,
    pub subreddit: String,
    pub url: String,
    /// `None` when the API sent no reply listing at all.
    pub replies: Option<Listing>,
}

impl Listing {
    pub fn from_value(value: Value) -> Result<Self, ThreadError> {
        let node: RawNode = serde_json::from_value(value).map_err(|source| {
            ThreadError::Malformed {
                context: "listing",
                source,
            }
        })?;
        Self::from_node(node)
    }

    fn from_node(node: RawNode) -> Result<Self, ThreadError> {
        if node.kind != LISTING_KIND {
            return Err(ThreadError::UnexpectedKind {
                expected: "\"Listing\"",
                found: node.kind,
            });
        }

        let data: RawListing =
            serde_json::from_value(node.data).map_err(|source| ThreadError::Malformed {
                context: "listing data",
                source,
            })?;

        let mut children = Vec::with_capacity(data.children.len());
        for child in data.children {
            if child.kind == MORE_KIND {
                debug!("Skipping collapsed replies placeholder");
                continue;
            }
            children.push(Comment::from_node(child)?);
        }

        Ok(Self {
            children,
            modhash: data.modhash,
        })
    }
}

impl Comment {
    fn from_node(node: RawNode) -> Result<Self, ThreadError> {
        let kind = match node.kind.as_str() {
            COMMENT_KIND => CommentKind::Comment,
            POST_KIND => CommentKind::Post,
            _ => {
                return Err(ThreadError::UnexpectedKind {
                    expected: "\"t1\" or \"t3\"",
                    found: node.kind,
                })
            }
        };

        let data: RawComment =
            serde_json::from_value(node.data).map_err(|source| ThreadError::Malformed {
                context: "comment data",
                source,
            })?;

        // An empty string stands in for "no replies".
        let replies = match data.replies {
            Value::Object(_) => Some(Listing::from_value(data.replies)?),
            _ => None,
        };

        let body = data
            .selftext
            .filter(|s| !s.is_empty())
            .or(data.body)
            .filter(|s| !s.is_empty());

        let url = data
            .url
            .or_else(|| data.permalink.map(|p| format!("{PERMALINK_BASE}{p}")))
            .unwrap_or_default();

        Ok(Self {
            kind,
            author: data.author,
            body,
            created_utc: data
                .created_utc
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs as i64, 0)),
            id: data.id,
            parent_id: data.parent_id,
            subreddit: data.subreddit,
            url,
            replies,
        })
    }

    /// First-level replies, empty when there is no listing.
    pub fn reply_comments(&self) -> &[Comment] {
        self.replies
            .as_ref()
            .map(|l| l.children.as_slice())
            .unwrap_or_default()
    }
}
