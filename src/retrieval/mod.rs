//! Merges retrieval-service results into a labeled context block and a
//! parallel source-citation list.

use crate::collab::{MetadataFilter, Retriever};
use crate::text::ellipsize;
use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;

/// Results at or below this relevance score are discarded.
pub const SCORE_THRESHOLD: f64 = 0.2;

/// Context block used when retrieval fails or nothing relevant survives the
/// threshold. Analysis then proceeds context-free.
pub const NO_CONTEXT: &str =
    "Không tìm thấy thông tin liên quan trong các tài liệu đã chọn.";

const PREVIEW_CHARS: usize = 150;

/// Settings for the retrieval collaborator call.
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// Result-count cap passed to the collaborator.
    pub max_results: usize,
    pub score_threshold: f64,
    /// Metadata key the document allow-list filter is scoped to.
    pub metadata_key: String,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            max_results: 4,
            score_threshold: SCORE_THRESHOLD,
            metadata_key: "document_id".to_string(),
        }
    }
}

/// One cited source backing an analysis, serialized with the response wire
/// names. Created fresh per request; never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalSource {
    /// Sequential 1-based marker matching the in-text `(Nguồn [n])`
    /// citations, re-indexed after threshold filtering.
    pub citation_id: usize,
    pub document_id: String,
    pub title: String,
    pub uri: String,
    pub score: f64,
    pub content_preview: String,
    pub full_text: String,
}

/// Assembles the retrieval context for one analysis request.
pub struct ContextAssembler<'a> {
    retriever: &'a dyn Retriever,
    config: &'a RetrievalConfig,
}

impl<'a> ContextAssembler<'a> {
    pub fn new(retriever: &'a dyn Retriever, config: &'a RetrievalConfig) -> Self {
        Self { retriever, config }
    }

    /// Queries the retrieval collaborator and merges the surviving results
    /// into a labeled context block plus the parallel source list.
    ///
    /// Collaborator failure and empty result sets both degrade to the fixed
    /// [`NO_CONTEXT`] block with no sources — retrieval problems never fail
    /// the request.
    pub fn assemble(
        &self,
        diagram: &Value,
        question: &str,
        selected_document_ids: &[String],
    ) -> (String, Vec<RetrievalSource>) {
        let query = build_query(diagram, question);
        let filter = MetadataFilter::for_documents(&self.config.metadata_key, selected_document_ids);

        let chunks = match self
            .retriever
            .retrieve(&query, filter.as_ref(), self.config.max_results)
        {
            Ok(chunks) => chunks,
            Err(error) => {
                log::warn!("retrieval collaborator failed: {error}; continuing without context");
                return (NO_CONTEXT.to_string(), Vec::new());
            }
        };

        let mut context_parts = Vec::new();
        let mut sources = Vec::new();
        for chunk in chunks {
            if chunk.score <= self.config.score_threshold {
                continue;
            }
            let citation_id = sources.len() + 1;
            context_parts.push(format!("Nguồn [{citation_id}]:\n{}", chunk.text));

            let title = chunk.document_name.unwrap_or_else(|| {
                chunk
                    .uri
                    .rsplit('/')
                    .next()
                    .unwrap_or_default()
                    .to_string()
            });
            sources.push(RetrievalSource {
                citation_id,
                document_id: chunk.document_id.unwrap_or_else(|| "N/A".to_string()),
                title,
                uri: chunk.uri,
                score: chunk.score,
                content_preview: ellipsize(&chunk.text, PREVIEW_CHARS),
                full_text: chunk.text,
            });
        }

        if context_parts.is_empty() {
            (NO_CONTEXT.to_string(), Vec::new())
        } else {
            (context_parts.join("\n\n"), sources)
        }
    }
}

/// The retrieval query: a short diagram summary, the user's question and
/// fixed guidance about what to look for.
fn build_query(diagram: &Value, question: &str) -> String {
    format!(
        "Phân tích sơ đồ quy trình:\n\
         Tóm tắt sơ đồ: {}\n\
         Câu hỏi cụ thể: {question}\n\
         Tìm thông tin về:\n\
         - Phương pháp phân tích quy trình\n\
         - Best practices cho loại sơ đồ này\n\
         - Các tiêu chí đánh giá chất lượng\n\
         - Đề xuất cải tiến",
        diagram_summary(diagram)
    )
}

/// Short descriptive summary of a diagram: node count and up to the first
/// five labels, with an ellipsis when there are more.
pub fn diagram_summary(diagram: &Value) -> String {
    let Some(nodes) = diagram.get("nodes").and_then(Value::as_array) else {
        return "Sơ đồ quy trình".to_string();
    };
    let labels: Vec<&str> = nodes
        .iter()
        .map(|node| {
            node.get("data")
                .and_then(|data| data.get("label"))
                .and_then(Value::as_str)
                .unwrap_or("Unknown")
        })
        .collect();
    let joined = labels.iter().take(5).join(" -> ");
    let suffix = if labels.len() > 5 { "..." } else { "" };
    format!("Sơ đồ có {} bước: {joined}{suffix}", nodes.len())
}
