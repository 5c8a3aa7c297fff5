//! Request handlers and response envelopes for the two service paths.
//!
//! Transport plumbing is out of scope: handlers take deserialized request
//! structs and return typed responses or an [`ApiError`] carrying an
//! HTTP-style status code. Each request is handled independently and
//! synchronously; the service holds process-wide collaborator handles with
//! no per-request mutable state.

use crate::analysis;
use crate::collab::{ImagePayload, ModelClient, Retriever};
use crate::error::ApiError;
use crate::extract::JsonExtractor;
use crate::graph::FlowGraph;
use crate::graph::complexity::Complexity;
use crate::graph::fallback::fallback_graph;
use crate::graph::normalize::normalize_graph;
use crate::graph::validate::validate_graph;
use crate::prompt::{self, ConditionDetector, KeywordDetector};
use crate::retrieval::{ContextAssembler, RetrievalConfig, RetrievalSource};
use crate::text::truncate_chars;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_LANGUAGE: &str = "vietnamese";
pub const DEFAULT_QUESTION: &str = "Hãy phân tích sơ đồ này";

/// Longest slice of the input text echoed back in generation metadata.
const INPUT_ECHO_CHARS: usize = 100;

/// Generation-path request. At least one of `text`/`image` must be
/// non-empty.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub text: String,
    /// Base64-encoded image payload.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub diagram: FlowGraph,
    pub metadata: GenerateMetadata,
}

#[derive(Debug, Serialize)]
pub struct GenerateMetadata {
    pub nodes_count: usize,
    pub edges_count: usize,
    pub conditional_edges_count: usize,
    pub input_text: String,
    pub has_image: bool,
    pub language: String,
}

/// Analysis-path request. The diagram is required; the question defaults to
/// the localized standard prompt; a non-empty document allow-list turns on
/// retrieval filtering.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub diagram: Value,
    #[serde(default = "default_question")]
    pub question: String,
    #[serde(default, rename = "selectedDocumentIds")]
    pub selected_document_ids: Vec<String>,
}

fn default_question() -> String {
    DEFAULT_QUESTION.to_string()
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: Value,
    pub sources: Vec<RetrievalSource>,
    pub metadata: AnalyzeMetadata,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeMetadata {
    pub context_sources: usize,
    pub diagram_complexity: String,
    pub question: String,
    pub is_filtered: bool,
}

/// The envelope every failure response shares.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ErrorBody {
    /// Status code plus body for an error, ready for the transport layer.
    pub fn from_error(error: &ApiError) -> (u16, Self) {
        (
            error.status_code(),
            Self {
                success: false,
                error: error.to_string(),
            },
        )
    }
}

/// The request-handling core, wired to its collaborators once at startup.
pub struct DiagramService {
    model: Box<dyn ModelClient>,
    retriever: Box<dyn Retriever>,
    extractor: JsonExtractor,
    detector: Box<dyn ConditionDetector>,
    retrieval: RetrievalConfig,
}

/// Builder for [`DiagramService`]; the extractor, condition detector and
/// retrieval settings all have standard defaults.
pub struct DiagramServiceBuilder {
    model: Box<dyn ModelClient>,
    retriever: Box<dyn Retriever>,
    extractor: JsonExtractor,
    detector: Box<dyn ConditionDetector>,
    retrieval: RetrievalConfig,
}

impl DiagramServiceBuilder {
    pub fn new(model: Box<dyn ModelClient>, retriever: Box<dyn Retriever>) -> Self {
        Self {
            model,
            retriever,
            extractor: JsonExtractor::default(),
            detector: Box::new(KeywordDetector::default()),
            retrieval: RetrievalConfig::default(),
        }
    }

    pub fn with_extractor(mut self, extractor: JsonExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_condition_detector(mut self, detector: Box<dyn ConditionDetector>) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_retrieval_config(mut self, retrieval: RetrievalConfig) -> Self {
        self.retrieval = retrieval;
        self
    }

    pub fn build(self) -> DiagramService {
        DiagramService {
            model: self.model,
            retriever: self.retriever,
            extractor: self.extractor,
            detector: self.detector,
            retrieval: self.retrieval,
        }
    }
}

impl DiagramService {
    pub fn builder(
        model: Box<dyn ModelClient>,
        retriever: Box<dyn Retriever>,
    ) -> DiagramServiceBuilder {
        DiagramServiceBuilder::new(model, retriever)
    }

    /// Generation path: prompt the model, then recover a valid diagram from
    /// its output.
    ///
    /// Extraction and validation failures are absorbed by the fallback
    /// synthesizer, so once input checks pass the only error that can
    /// surface is a model-invocation failure.
    pub fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ApiError> {
        let text = request.text.trim();
        let encoded_image = request
            .image
            .as_deref()
            .map(str::trim)
            .filter(|payload| !payload.is_empty());

        if text.is_empty() && encoded_image.is_none() {
            return Err(ApiError::InvalidInput(
                "either 'text' or 'image' must be provided".to_string(),
            ));
        }

        let image = match encoded_image {
            Some(encoded) => Some(ImagePayload::from_base64(encoded).map_err(|error| {
                ApiError::InvalidInput(format!("invalid base64 image payload: {error}"))
            })?),
            None => None,
        };

        let with_conditions = self.detector.has_conditions(text);
        log::debug!("generation request: {} input chars, conditional guidance: {with_conditions}", text.len());

        let prompt = prompt::generation_prompt(text, &request.language, with_conditions);
        let output = self
            .model
            .generate(&prompt, image.as_ref())
            .map_err(|error| ApiError::Model(error.to_string()))?;

        let diagram = self.recover_diagram(&output, text);
        let metadata = GenerateMetadata {
            nodes_count: diagram.nodes.len(),
            edges_count: diagram.edges.len(),
            conditional_edges_count: diagram.conditional_edge_count(),
            input_text: truncate_chars(text, INPUT_ECHO_CHARS),
            has_image: image.is_some(),
            language: request.language.clone(),
        };

        Ok(GenerateResponse {
            success: true,
            diagram,
            metadata,
        })
    }

    /// Analysis path: assemble retrieval context, prompt the model, recover
    /// the structured analysis.
    ///
    /// Retrieval must complete and its context must be fully assembled
    /// before the model prompt is built. Retrieval failure degrades to
    /// context-free analysis; a model failure is a 500-equivalent error.
    pub fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, ApiError> {
        let has_diagram = request
            .diagram
            .as_object()
            .is_some_and(|graph| !graph.is_empty());
        if !has_diagram {
            return Err(ApiError::InvalidInput(
                "Diagram data is required".to_string(),
            ));
        }

        let assembler = ContextAssembler::new(self.retriever.as_ref(), &self.retrieval);
        let (context, sources) = assembler.assemble(
            &request.diagram,
            &request.question,
            &request.selected_document_ids,
        );

        let prompt =
            analysis::analysis_prompt(&request.diagram, &request.question, &context, &sources);
        let output = self
            .model
            .generate(&prompt, None)
            .map_err(|error| ApiError::Model(error.to_string()))?;

        let analysis = self
            .extractor
            .extract_any_object(&output)
            .unwrap_or_else(|| {
                log::info!("analysis answer carried no JSON object; wrapping raw text");
                analysis::fallback_analysis(&output)
            });

        let metadata = AnalyzeMetadata {
            context_sources: sources.len(),
            diagram_complexity: Complexity::of_value(&request.diagram).to_string(),
            question: request.question.clone(),
            is_filtered: !request.selected_document_ids.is_empty(),
        };

        Ok(AnalyzeResponse {
            success: true,
            analysis,
            sources,
            metadata,
        })
    }

    /// Runs the recovery pipeline over raw model output: extract, validate,
    /// normalize, and fall back to a synthesized diagram when nothing
    /// usable comes out.
    fn recover_diagram(&self, model_output: &str, source_text: &str) -> FlowGraph {
        let Some(candidate) = self.extractor.extract_graph(model_output) else {
            log::info!("no graph found in model output; synthesizing fallback diagram");
            return fallback_graph(source_text);
        };

        if let Err(error) = validate_graph(&candidate) {
            log::info!("extracted graph rejected ({error}); synthesizing fallback diagram");
            return fallback_graph(source_text);
        }

        match serde_json::from_value::<FlowGraph>(normalize_graph(candidate)) {
            Ok(graph) => graph,
            Err(error) => {
                log::warn!("normalized graph failed to deserialize ({error}); synthesizing fallback diagram");
                fallback_graph(source_text)
            }
        }
    }
}
