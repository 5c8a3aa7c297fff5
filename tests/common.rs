//! Common test utilities: canned collaborators and graph builders.
use flowlens::error::CollaboratorError;
use flowlens::prelude::*;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

/// Model client that always answers with the same canned text.
#[allow(dead_code)]
pub struct CannedModel {
    pub output: String,
}

#[allow(dead_code)]
impl CannedModel {
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
        }
    }
}

impl ModelClient for CannedModel {
    fn generate(
        &self,
        _prompt: &str,
        _image: Option<&ImagePayload>,
    ) -> Result<String, CollaboratorError> {
        Ok(self.output.clone())
    }
}

/// Model client that records every prompt it receives before answering.
#[derive(Clone)]
#[allow(dead_code)]
pub struct RecordingModel {
    pub output: String,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl RecordingModel {
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn last_prompt(&self) -> String {
        self.prompts
            .lock()
            .expect("prompt log lock")
            .last()
            .cloned()
            .unwrap_or_default()
    }
}

impl ModelClient for RecordingModel {
    fn generate(
        &self,
        prompt: &str,
        _image: Option<&ImagePayload>,
    ) -> Result<String, CollaboratorError> {
        self.prompts
            .lock()
            .expect("prompt log lock")
            .push(prompt.to_string());
        Ok(self.output.clone())
    }
}

/// Model client whose call always fails.
#[allow(dead_code)]
pub struct FailingModel;

impl ModelClient for FailingModel {
    fn generate(
        &self,
        _prompt: &str,
        _image: Option<&ImagePayload>,
    ) -> Result<String, CollaboratorError> {
        Err(CollaboratorError::new("model endpoint unreachable"))
    }
}

/// Retriever that returns the same canned chunks for every query.
#[allow(dead_code)]
pub struct CannedRetriever {
    pub chunks: Vec<RetrievedChunk>,
}

impl Retriever for CannedRetriever {
    fn retrieve(
        &self,
        _query: &str,
        _filter: Option<&MetadataFilter>,
        _max_results: usize,
    ) -> Result<Vec<RetrievedChunk>, CollaboratorError> {
        Ok(self.chunks.clone())
    }
}

/// Retriever whose call always fails.
#[allow(dead_code)]
pub struct FailingRetriever;

impl Retriever for FailingRetriever {
    fn retrieve(
        &self,
        _query: &str,
        _filter: Option<&MetadataFilter>,
        _max_results: usize,
    ) -> Result<Vec<RetrievedChunk>, CollaboratorError> {
        Err(CollaboratorError::new("retrieval endpoint unreachable"))
    }
}

/// A chunk with the given score and text, carrying document metadata.
#[allow(dead_code)]
pub fn chunk(score: f64, text: &str) -> RetrievedChunk {
    RetrievedChunk {
        text: text.to_string(),
        score,
        uri: format!("s3://documents/doc-{score}.pdf"),
        document_id: Some(format!("doc-{score}")),
        document_name: Some(format!("Tài liệu {score}")),
    }
}

/// A small well-formed `{nodes, edges}` candidate, pre-normalization: no
/// positions, no types, no edge ids.
#[allow(dead_code)]
pub fn raw_graph() -> Value {
    json!({
        "nodes": [
            {"id": "1", "data": {"label": "Nhận đơn hàng"}},
            {"id": "2", "data": {"label": "Kiểm tra kho"}},
            {"id": "3", "data": {"label": "Giao hàng"}}
        ],
        "edges": [
            {"source": "1", "target": "2"},
            {"source": "2", "target": "3"}
        ]
    })
}

/// A three-node branch graph where the decision lives on the edges, in the
/// exact shape a conforming model answer uses.
#[allow(dead_code)]
pub fn branch_graph() -> Value {
    json!({
        "nodes": [
            {"id": "A", "data": {"label": "A"}},
            {"id": "B", "data": {"label": "B"}},
            {"id": "C", "data": {"label": "C"}}
        ],
        "edges": [
            {
                "source": "A",
                "target": "B",
                "data": {
                    "logic": "Và",
                    "rules": [{"field": "X", "operator": "Là đúng", "value": "true"}]
                }
            },
            {
                "source": "A",
                "target": "C",
                "data": {
                    "logic": "Và",
                    "rules": [{"field": "Y", "operator": "Là đúng", "value": "true"}]
                }
            }
        ]
    })
}

/// Service over canned collaborators with default settings.
#[allow(dead_code)]
pub fn canned_service(model_output: &str, chunks: Vec<RetrievedChunk>) -> DiagramService {
    DiagramService::builder(
        Box::new(CannedModel::new(model_output)),
        Box::new(CannedRetriever { chunks }),
    )
    .build()
}
