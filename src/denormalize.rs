use serde::Serialize;
use serde_json::Value;

use crate::error::ThreadError;
use crate::parser::{self, matcher::Convention};
use crate::reddit::{Comment, Listing};
use crate::reference_size::ReferenceSize;

/// The original post and its top-level comments.
#[derive(Debug, Clone)]
pub struct ThreadComments {
    pub op: Comment,
    pub comments: Vec<Comment>,
}

/// A top-level comment by the thread author announcing one Brannock size.
#[derive(Debug, Clone)]
pub struct SizeThread {
    pub id: String,
    pub reference_size: ReferenceSize,
    pub replies: Vec<Comment>,
}

/// One respondent's size for one model/last, with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeRecord {
    pub label: String,
    pub size: f64,
    pub width: Option<String>,
    pub convention: Option<Convention>,
    pub sizing_text: String,
    pub id: String,
    /// Always the announcing comment, never a deeper parent.
    pub parent_id: String,
    pub reference_size: ReferenceSize,
    pub thread_id: String,
    pub thread_url: String,
}

/// A thread document is `[op listing, comment listing]`.
pub fn parse_thread(json: &str) -> Result<ThreadComments, ThreadError> {
    let listings: Vec<Value> = serde_json::from_str(json).map_err(|source| {
        ThreadError::Malformed {
            context: "thread document",
            source,
        }
    })?;
    let mut listings = listings.into_iter();

    let op_listing = Listing::from_value(
        listings
            .next()
            .ok_or(ThreadError::MissingListing("Original poster"))?,
    )?;
    let main_listing = Listing::from_value(
        listings
            .next()
            .ok_or(ThreadError::MissingListing("Comment"))?,
    )?;

    let op = op_listing
        .children
        .into_iter()
        .next()
        .ok_or(ThreadError::MissingListing("Original poster"))?;

    Ok(ThreadComments {
        op,
        comments: main_listing.children,
    })
}

/// Top-level comments by the thread author that have a reply listing. Each
/// must announce a Brannock size; one that doesn't means the thread layout
/// changed, so it is an error rather than a skip.
pub fn sizing_threads(op: &Comment, comments: &[Comment]) -> Result<Vec<SizeThread>, ThreadError> {
    comments
        .iter()
        .filter(|c| c.author == op.author)
        .filter(|c| c.replies.is_some())
        .map(|c| {
            Ok(SizeThread {
                id: c.id.clone(),
                reference_size: ReferenceSize::from_comment(c)?,
                replies: c.reply_comments().to_vec(),
            })
        })
        .collect()
}

/// Records from the first level of replies, which is where respondents are
/// asked to answer.
pub fn from_sizing_thread(thread: &SizeThread, thread_id: &str, thread_url: &str) -> Vec<SizeRecord> {
    thread
        .replies
        .iter()
        .filter_map(|reply| reply.body.as_deref().map(|body| (reply, body)))
        .flat_map(|(reply, body)| {
            parser::extract_size_lines(body)
                .into_iter()
                .map(move |line| SizeRecord {
                    label: line.label,
                    size: line.sizing.size,
                    width: line.sizing.width,
                    convention: line.sizing.convention,
                    sizing_text: line.sizing_text,
                    id: reply.id.clone(),
                    parent_id: thread.id.clone(),
                    reference_size: thread.reference_size.clone(),
                    thread_id: thread_id.to_string(),
                    thread_url: thread_url.to_string(),
                })
        })
        .collect()
}

pub fn extract(thread: &ThreadComments) -> Result<Vec<SizeRecord>, ThreadError> {
    let ThreadComments { op, comments } = thread;
    let records = sizing_threads(op, comments)?
        .iter()
        .flat_map(|t| from_sizing_thread(t, &op.id, &op.url))
        .collect();
    Ok(records)
}
