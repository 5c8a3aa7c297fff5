//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and traits from the flowlens
//! crate. Import this module to get access to the core functionality
//! without having to import each type individually.

// Service surface
pub use crate::api::{
    AnalyzeRequest, AnalyzeResponse, DiagramService, DiagramServiceBuilder, ErrorBody,
    GenerateRequest, GenerateResponse,
};

// Collaborator contracts
pub use crate::collab::{ImagePayload, MetadataFilter, ModelClient, RetrievedChunk, Retriever};

// Graph model and pipeline stages
pub use crate::graph::complexity::Complexity;
pub use crate::graph::fallback::fallback_graph;
pub use crate::graph::normalize::normalize_graph;
pub use crate::graph::validate::validate_graph;
pub use crate::graph::{
    ConditionRule, EdgeCondition, FlowEdge, FlowGraph, FlowNode, NodeData, NodeType, Position,
};

// Extraction stack
pub use crate::extract::{ExtractStrategy, JsonExtractor};

// Prompt building
pub use crate::prompt::{ConditionDetector, KeywordDetector};

// Retrieval context
pub use crate::retrieval::{ContextAssembler, RetrievalConfig, RetrievalSource};

// Error types
pub use crate::error::{ApiError, CollaboratorError, GraphValidationError};
