use thiserror::Error;

/// Structural problems with a thread document. Any of these means the
/// document no longer has the shape extraction relies on.
#[derive(Debug, Error)]
pub enum ThreadError {
    #[error("expected {expected}, got {found:?} instead")]
    UnexpectedKind { expected: &'static str, found: String },

    #[error("malformed {context}: {source}")]
    Malformed {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} listing was not found")]
    MissingListing(&'static str),

    #[error("comment {id} must have a body")]
    MissingBody { id: String },

    #[error("no Brannock size found in {text:?}")]
    NoReferenceSize { text: String },
}
