//! Error types for the medmij crate.
//!
//! All parse-time errors are fatal to the `from_xml_data` call that raised
//! them: either the whole document parses or no collection is produced.
//! Lookup errors are local to a single `get_by_name` call.

use thiserror::Error;

/// Main error type for the medmij library.
#[derive(Debug, Error)]
pub enum MedMijError {
    /// Input text is not well-formed XML.
    #[error("XML parsing failed: {0}")]
    XmlSyntax(#[from] roxmltree::Error),

    /// Well-formed document does not conform to the zorgaanbiederslijst schema.
    #[error("Schema validation failed: {reason}")]
    SchemaValidation { reason: String },

    /// The schema definition itself could not be compiled.
    #[error("Invalid schema definition: {reason}")]
    SchemaDefinition { reason: String },

    /// A structurally required sub-element is missing or duplicated.
    #[error("Expected exactly one <{element}> in <{context}>, found {count}")]
    MalformedEntry {
        element: String,
        context: String,
        count: usize,
    },

    /// An endpoint value is not a valid absolute URI.
    #[error("Invalid {element} '{value}': {source}")]
    InvalidEndpointUri {
        element: String,
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// Lookup by name found no matching zorgaanbieder.
    #[error("No zorgaanbieder named '{0}' in the lijst")]
    ZorgaanbiederNotFound(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to download the zorgaanbiederslijst.
    #[error("Failed to download zorgaanbiederslijst from {url}: {source}")]
    LijstDownload {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// All retry attempts for a download were exhausted.
    #[error("Request failed after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// Response body exceeded the configured size limit.
    #[error("Response too large: {size} bytes (limit {limit})")]
    ResponseTooLarge { size: u64, limit: u64 },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for medmij operations.
pub type Result<T> = std::result::Result<T, MedMijError>;
