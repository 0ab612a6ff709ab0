use tracing::{debug, warn};

use super::matcher::{post_match, precedes_match, Convention, SizeParts};

/// 33.5 is the smallest adult size in the continental European table; no
/// US or UK adult size gets that high.
const MIN_EU_SIZE: f64 = 33.5;

/// Validated sizing for one line.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeInfo {
    pub size: f64,
    pub width: Option<String>,
    pub convention: Option<Convention>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Post,
    Precedes,
}

/// Candidate parses in order of trust. `post` was matched against the
/// expected layout, so it wins unless only a later one found a convention.
pub const PRECEDENCE: [Strategy; 2] = [Strategy::Post, Strategy::Precedes];

/// Both candidate parses of one sizing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidates {
    pub post: SizeParts,
    pub precedes: SizeParts,
}

impl Candidates {
    pub fn from_text(text: &str) -> Self {
        Self {
            post: post_match(text),
            precedes: precedes_match(text),
        }
    }

    fn get(&self, strategy: Strategy) -> &SizeParts {
        match strategy {
            Strategy::Post => &self.post,
            Strategy::Precedes => &self.precedes,
        }
    }
}

pub fn is_eu(size: f64) -> bool {
    size >= MIN_EU_SIZE
}

fn parse_size(size: Option<&str>) -> Option<f64> {
    size?.parse::<f64>().ok().filter(|s| s.is_finite())
}

/// Check the convention against the magnitude of the size. Only EU can be
/// told apart by size alone, so a wrong "EU" is dropped rather than guessed.
pub fn reconcile_convention(size: f64, convention: Option<Convention>) -> Option<Convention> {
    if is_eu(size) && convention != Some(Convention::Eu) {
        debug!("Expected EU, instead got {:?} for {}", convention, size);
        return Some(Convention::Eu);
    }

    if !is_eu(size) && convention == Some(Convention::Eu) {
        debug!("Expected US or UK, instead got EU for {}", size);
        return None;
    }

    convention
}

/// Pick the candidate to trust. `None` when the two disagree on the number
/// or the chosen one has no usable number.
///
/// Two missing numbers agree; such a line is then dropped for having no size.
pub fn select_sizing(candidates: &Candidates) -> Option<&SizeParts> {
    let Candidates { post, precedes } = candidates;
    if post.size != precedes.size {
        warn!(
            "Expected sizes to match, instead got {:?} and {:?}",
            post.size, precedes.size
        );
        return None;
    }

    let chosen = PRECEDENCE
        .iter()
        .copied()
        .find(|s| candidates.get(*s).convention.is_some())
        .unwrap_or(Strategy::Post);
    if chosen == Strategy::Precedes {
        debug!("Convention only found preceding the size, using that parse");
    }

    let sizing = candidates.get(chosen);
    parse_size(sizing.size.as_deref())?;
    Some(sizing)
}

/// Extract validated sizing from the text after a label.
pub fn extract_sizing(text: &str) -> Option<SizeInfo> {
    let candidates = Candidates::from_text(text);
    let parts = select_sizing(&candidates)?;
    let size = parse_size(parts.size.as_deref())?;

    Some(SizeInfo {
        size,
        width: parts.width.clone(),
        convention: reconcile_convention(size, parts.convention),
    })
}
