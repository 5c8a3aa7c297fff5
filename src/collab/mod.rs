//! Contracts for the two external collaborators: the generative model and
//! the retrieval service.
//!
//! Both are opaque to this crate — only the request/response protocol is
//! modeled here. Calls are synchronous and single-attempt; timeout behavior
//! belongs to the endpoint implementations. Client handles are created once
//! at startup and shared by reference across requests, with no per-request
//! mutable state.

use crate::error::CollaboratorError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Detects an image media type from the binary signature of the payload.
///
/// Recognizes JPEG, PNG, GIF and WEBP magic bytes; anything else is treated
/// as JPEG.
pub fn sniff_media_type(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if bytes.starts_with(b"GIF8") {
        "image/gif"
    } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "image/jpeg"
    }
}

/// A decoded image attachment tagged with its sniffed media type.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub data: Vec<u8>,
    pub media_type: &'static str,
}

impl ImagePayload {
    /// Decodes a base64 payload and tags it with the detected media type.
    pub fn from_base64(encoded: &str) -> Result<Self, base64::DecodeError> {
        let data = BASE64.decode(encoded.trim())?;
        let media_type = sniff_media_type(&data);
        Ok(Self { data, media_type })
    }
}

/// Text-generation collaborator.
///
/// Accepts an assembled prompt, optionally with an inlined image payload,
/// and returns the generated text. One call per request, no retries.
pub trait ModelClient: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
        image: Option<&ImagePayload>,
    ) -> Result<String, CollaboratorError>;
}

/// A scored content fragment returned by the retrieval collaborator.
#[derive(Debug, Clone)]
pub struct RetrievedChunk {
    pub text: String,
    pub score: f64,
    /// Source location of the backing document.
    pub uri: String,
    pub document_id: Option<String>,
    pub document_name: Option<String>,
}

/// Metadata filter attached to a retrieval query, scoped to one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataFilter {
    /// The key must equal exactly this value.
    Equals { key: String, value: String },
    /// Logical OR of equality checks over the same key.
    AnyOf { key: String, values: Vec<String> },
}

impl MetadataFilter {
    /// Builds the document allow-list filter: an equality filter for a
    /// single id, an OR-of-equalities for several, `None` when the list is
    /// empty.
    pub fn for_documents(key: &str, ids: &[String]) -> Option<Self> {
        match ids {
            [] => None,
            [only] => Some(MetadataFilter::Equals {
                key: key.to_string(),
                value: only.clone(),
            }),
            many => Some(MetadataFilter::AnyOf {
                key: key.to_string(),
                values: many.to_vec(),
            }),
        }
    }
}

/// Retrieval collaborator.
///
/// Accepts a query string, an optional metadata filter and a result cap,
/// and returns scored content fragments in the service's own ranking order.
pub trait Retriever: Send + Sync {
    fn retrieve(
        &self,
        query: &str,
        filter: Option<&MetadataFilter>,
        max_results: usize,
    ) -> Result<Vec<RetrievedChunk>, CollaboratorError>;
}
