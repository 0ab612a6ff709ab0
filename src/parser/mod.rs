pub mod label;
pub mod lines;
pub mod matcher;
pub mod sizing;

use tracing::debug;

use sizing::SizeInfo;

/// A labelled size found on one line of a reply.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeLine {
    pub label: String,
    pub sizing_text: String,
    pub sizing: SizeInfo,
}

/// Pipeline: markdown → lines → label/sizing pairs → validated sizes.
/// Lines that fail any step are dropped.
pub fn extract_size_lines(md: &str) -> Vec<SizeLine> {
    lines::sizing_pairs(md)
        .into_iter()
        .filter_map(|pair| {
            let sizing = sizing::extract_sizing(&pair.sizing_text);
            let label = label::clean_label(&pair.label);
            match (label, sizing) {
                (Some(label), Some(sizing)) if label::has_valid_label(&label) => Some(SizeLine {
                    label,
                    sizing_text: pair.sizing_text,
                    sizing,
                }),
                (Some(label), Some(_)) => {
                    debug!("Skipping {:?}: not a model or last", label);
                    None
                }
                _ => None,
            }
        })
        .collect()
}
