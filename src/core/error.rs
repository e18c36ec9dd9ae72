use thiserror::Error;

/// Errors raised at the input boundary, before the rule engine runs.
///
/// Compliance findings are never errors — a non-compliant invoice is a
/// successful validation run that reports issues. The engine either returns
/// a complete [`crate::core::ValidationResult`] or fails here; there is no
/// partial state.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BijakError {
    /// The payload is not a structurally valid invoice document.
    #[error("invalid invoice payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// The payload deserialized but fails a shape constraint the rule
    /// engine is not designed to defend against.
    #[error("invoice failed shape check: {0}")]
    Shape(String),
}
