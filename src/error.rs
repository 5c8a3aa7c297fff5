use thiserror::Error;

/// Errors raised by the structural validation gate.
///
/// These never reach an API caller on the generation path: any rejection is
/// absorbed by the fallback graph synthesizer. They exist so that log lines
/// and tests can name the exact invariant that was violated.
// Hand-written Display/Error impls below: thiserror would treat the
// `source` fields of `DanglingReference`/`UnknownLogic` as an implicit
// error source, which does not type-check for `String`.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphValidationError {
    NotAnObject,

    MissingSection { section: &'static str },

    EmptyGraph,

    MalformedNode { index: usize, detail: String },

    DuplicateNodeId { node_id: String },

    MalformedEdge { index: usize, detail: String },

    DanglingReference {
        source: String,
        target: String,
        node_id: String,
    },

    UnknownLogic {
        source: String,
        target: String,
        found: String,
    },
}

impl std::fmt::Display for GraphValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "candidate is not a JSON object"),
            Self::MissingSection { section } => {
                write!(f, "graph is missing a '{section}' array")
            }
            Self::EmptyGraph => write!(f, "graph contains no nodes"),
            Self::MalformedNode { index, detail } => {
                write!(f, "node at index {index} is malformed: {detail}")
            }
            Self::DuplicateNodeId { node_id } => {
                write!(f, "node id '{node_id}' appears more than once")
            }
            Self::MalformedEdge { index, detail } => {
                write!(f, "edge at index {index} is malformed: {detail}")
            }
            Self::DanglingReference {
                source,
                target,
                node_id,
            } => write!(
                f,
                "edge '{source}' -> '{target}' references unknown node '{node_id}'"
            ),
            Self::UnknownLogic {
                source,
                target,
                found,
            } => write!(
                f,
                "edge '{source}' -> '{target}' carries unrecognized logic label {found}"
            ),
        }
    }
}

impl std::error::Error for GraphValidationError {}

/// Failure reported by an external collaborator call (model or retrieval).
///
/// Collaborator endpoints own their timeout behavior; this type only carries
/// the message back. Every call is single-attempt.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct CollaboratorError {
    pub message: String,
}

impl CollaboratorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Request-level error taxonomy. Every variant maps onto an HTTP-style
/// status code via [`ApiError::status_code`]; all failure responses share
/// one envelope shape (see `api::ErrorBody`).
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Server configuration error: {0}")]
    Configuration(String),

    #[error("Model invocation failed: {0}")]
    Model(String),
}

impl ApiError {
    /// The HTTP-equivalent status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidInput(_) => 400,
            ApiError::Configuration(_) | ApiError::Model(_) => 500,
        }
    }
}
