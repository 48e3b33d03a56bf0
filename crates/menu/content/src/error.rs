//! Error types raised by document loading and parsing.

use thiserror::Error;

/// Errors surfaced while reading and decoding menu documents.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON in {file}: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("menu document {file} is not a JSON object")]
    NotAnObject { file: String },

    #[error("item '{item}' in {file} is not a JSON object")]
    InvalidItem { item: String, file: String },

    #[error("requirement for '{owner}' in {file} is not a JSON object")]
    InvalidRequirement { owner: String, file: String },
}

pub type Result<T> = std::result::Result<T, ContentError>;
