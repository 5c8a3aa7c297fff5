//! # FlowLens - Flow-Diagram Generation and Analysis Core
//!
//! **FlowLens** turns natural-language (optionally image) input into a
//! validated flow-diagram graph, and answers questions about an existing
//! diagram with retrieval-backed, citation-carrying analysis. Its core is a
//! JSON-recovery pipeline: extracting a schema-conformant graph from the
//! unreliable text stream a generative model produces, then repairing the
//! fields that can be derived.
//!
//! ## Core Workflow
//!
//! The crate is transport-agnostic. Wire it to your own model and retrieval
//! endpoints by implementing the two collaborator traits:
//!
//! 1. **Implement the collaborators**: [`collab::ModelClient`] for the
//!    generative model and [`collab::Retriever`] for the document retrieval
//!    service. Both are synchronous and single-attempt.
//! 2. **Build the service**: use [`api::DiagramService::builder`] to wire
//!    the collaborators together with the extraction stack, the condition
//!    detector and the retrieval settings.
//! 3. **Handle requests**: [`api::DiagramService::generate`] for the
//!    text-to-diagram path and [`api::DiagramService::analyze`] for the
//!    question-answering path. Generation always yields a usable diagram —
//!    unusable model output is absorbed by a synthesized fallback graph.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowlens::prelude::*;
//! use flowlens::error::CollaboratorError;
//!
//! // 1. Wire the two collaborator endpoints.
//! struct MyModel;
//! impl ModelClient for MyModel {
//!     fn generate(
//!         &self,
//!         prompt: &str,
//!         image: Option<&ImagePayload>,
//!     ) -> Result<String, CollaboratorError> {
//!         // Call your model endpoint here.
//!         let _ = (prompt, image);
//!         Ok(String::new())
//!     }
//! }
//!
//! struct MyRetriever;
//! impl Retriever for MyRetriever {
//!     fn retrieve(
//!         &self,
//!         query: &str,
//!         filter: Option<&MetadataFilter>,
//!         max_results: usize,
//!     ) -> Result<Vec<RetrievedChunk>, CollaboratorError> {
//!         // Call your retrieval endpoint here.
//!         let _ = (query, filter, max_results);
//!         Ok(Vec::new())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 2. Build the service once at startup.
//!     let service = DiagramService::builder(Box::new(MyModel), Box::new(MyRetriever)).build();
//!
//!     // 3. Handle a generation request.
//!     let request: GenerateRequest = serde_json::from_str(
//!         r#"{"text": "Nhận đơn hàng, kiểm tra kho, giao hàng"}"#,
//!     )?;
//!     let response = service.generate(&request)?;
//!     println!(
//!         "diagram: {} nodes, {} edges",
//!         response.metadata.nodes_count, response.metadata.edges_count
//!     );
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod collab;
pub mod error;
pub mod extract;
pub mod graph;
pub mod prelude;
pub mod prompt;
pub mod retrieval;

mod text;
