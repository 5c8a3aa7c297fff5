//! Tests for retrieval-context assembly and citation bookkeeping.
mod common;

use common::{CannedRetriever, FailingRetriever, chunk, raw_graph};
use flowlens::prelude::*;
use flowlens::retrieval::{NO_CONTEXT, diagram_summary};
use serde_json::json;

fn assemble(
    retriever: &dyn Retriever,
    selected: &[String],
) -> (String, Vec<RetrievalSource>) {
    let config = RetrievalConfig::default();
    ContextAssembler::new(retriever, &config).assemble(
        &raw_graph(),
        "Quy trình này có rủi ro gì?",
        selected,
    )
}

#[test]
fn threshold_filters_and_reindexes_citations() {
    let retriever = CannedRetriever {
        chunks: vec![
            chunk(0.5, "đoạn thứ nhất"),
            chunk(0.15, "đoạn bị loại"),
            chunk(0.3, "đoạn thứ ba"),
        ],
    };

    let (context, sources) = assemble(&retriever, &[]);

    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0].citation_id, 1);
    assert_eq!(sources[1].citation_id, 2);
    assert_eq!(sources[0].full_text, "đoạn thứ nhất");
    assert_eq!(sources[1].full_text, "đoạn thứ ba");

    assert!(context.contains("Nguồn [1]:\nđoạn thứ nhất"));
    assert!(context.contains("Nguồn [2]:\nđoạn thứ ba"));
    assert!(!context.contains("đoạn bị loại"));
}

#[test]
fn source_records_mirror_chunk_metadata() {
    let retriever = CannedRetriever {
        chunks: vec![chunk(0.9, "nội dung tài liệu")],
    };

    let (_, sources) = assemble(&retriever, &[]);
    let source = &sources[0];
    assert_eq!(source.document_id, "doc-0.9");
    assert_eq!(source.title, "Tài liệu 0.9");
    assert_eq!(source.uri, "s3://documents/doc-0.9.pdf");
    assert_eq!(source.score, 0.9);
    assert_eq!(source.content_preview, "nội dung tài liệu");
}

#[test]
fn preview_is_truncated_with_ellipsis() {
    let long_text = "một ".repeat(60);
    let retriever = CannedRetriever {
        chunks: vec![chunk(0.9, &long_text)],
    };

    let (_, sources) = assemble(&retriever, &[]);
    let preview = &sources[0].content_preview;
    assert!(preview.ends_with("..."));
    assert_eq!(preview.chars().count(), 153); // 150 chars + ellipsis
    assert_eq!(sources[0].full_text, long_text);
}

#[test]
fn title_falls_back_to_uri_basename() {
    let retriever = CannedRetriever {
        chunks: vec![RetrievedChunk {
            text: "nội dung".to_string(),
            score: 0.8,
            uri: "s3://bucket/folder/bao-cao.pdf".to_string(),
            document_id: None,
            document_name: None,
        }],
    };

    let (_, sources) = assemble(&retriever, &[]);
    assert_eq!(sources[0].title, "bao-cao.pdf");
    assert_eq!(sources[0].document_id, "N/A");
}

#[test]
fn retriever_failure_degrades_to_empty_context() {
    let (context, sources) = assemble(&FailingRetriever, &[]);
    assert_eq!(context, NO_CONTEXT);
    assert!(sources.is_empty());
}

#[test]
fn nothing_above_threshold_degrades_to_empty_context() {
    let retriever = CannedRetriever {
        chunks: vec![chunk(0.1, "quá mờ nhạt"), chunk(0.2, "đúng ngưỡng vẫn loại")],
    };
    let (context, sources) = assemble(&retriever, &[]);
    assert_eq!(context, NO_CONTEXT);
    assert!(sources.is_empty());
}

#[test]
fn document_filter_shapes() {
    assert_eq!(MetadataFilter::for_documents("document_id", &[]), None);

    let one = vec!["d1".to_string()];
    assert_eq!(
        MetadataFilter::for_documents("document_id", &one),
        Some(MetadataFilter::Equals {
            key: "document_id".to_string(),
            value: "d1".to_string(),
        })
    );

    let many = vec!["d1".to_string(), "d2".to_string()];
    assert_eq!(
        MetadataFilter::for_documents("document_id", &many),
        Some(MetadataFilter::AnyOf {
            key: "document_id".to_string(),
            values: many.clone(),
        })
    );
}

#[test]
fn summary_lists_up_to_five_labels() {
    assert_eq!(
        diagram_summary(&raw_graph()),
        "Sơ đồ có 3 bước: Nhận đơn hàng -> Kiểm tra kho -> Giao hàng"
    );

    let wide = json!({
        "nodes": (1..=7)
            .map(|i| json!({"id": i.to_string(), "data": {"label": format!("B{i}")}}))
            .collect::<Vec<_>>(),
        "edges": []
    });
    let summary = diagram_summary(&wide);
    assert_eq!(summary, "Sơ đồ có 7 bước: B1 -> B2 -> B3 -> B4 -> B5...");

    assert_eq!(diagram_summary(&json!({})), "Sơ đồ quy trình");
}
