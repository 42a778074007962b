//! Error types for voiceline processing.
//!
//! Every failure aborts the run: a half-completed build would leave the
//! cross-file slot numbering and the aggregate index inconsistent, so there
//! is no retry or partial-continuation path anywhere in the pipeline.

use thiserror::Error;

/// Error types that can occur while patching scene documents.
#[derive(Error, Debug)]
pub enum VoicelineError {
    /// File read or write failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The document parsed but is missing required structure
    /// (a container element, a `puppet` attribute, a title).
    #[error("malformed document: {0}")]
    Malformed(String),

    /// A resolved dialog line has no original sound reference to rewrite.
    #[error("missing sound reference: {0}")]
    MissingReference(String),

    /// The mappings file failed to deserialize.
    #[error("mappings error: {0}")]
    Mappings(#[from] toml::de::Error),

    /// JSON serialization failure for the per-actor dataset.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An anchored patch pattern failed to compile.
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

/// Convenience result type for voiceline operations.
pub type Result<T> = std::result::Result<T, VoicelineError>;
