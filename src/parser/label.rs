use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

/// Substitutions applied to a manufacturer/model/last label, in order.
static SUBSTITUTIONS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"(?i)&(amp;){1,2}").unwrap(), "&"),
        (Regex::new(r"\(.*\)").unwrap(), ""),
        (Regex::new(r"(?i)unknown last\s*$").unwrap(), ""),
        (Regex::new(r"(?i)last\s*$").unwrap(), ""),
        (Regex::new(r"\s+").unwrap(), " "),
    ]
});

/// Clean a raw label. `None` when nothing is left after cleaning.
pub fn clean_label(raw: &str) -> Option<String> {
    let cleaned = SUBSTITUTIONS
        .iter()
        .fold(raw.to_string(), |acc, (re, repl)| {
            re.replace_all(&acc, *repl).into_owned()
        });
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        warn!("Cleaning {:?} resulted in an empty string", raw);
        return None;
    }
    Some(cleaned.to_string())
}

fn has_note(label: &str) -> bool {
    label.to_lowercase().contains("note")
}

/// The line described the reference measurement rather than a response.
fn has_reference_size(label: &str) -> bool {
    let lowered = label.to_lowercase();
    lowered.contains("brannock") || lowered == "size"
}

pub fn has_valid_label(label: &str) -> bool {
    !has_note(label) && !has_reference_size(label)
}
