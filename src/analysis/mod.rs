//! Analysis-path prompt assembly and structured-result recovery.
//!
//! The model is asked to fill a fixed nested JSON schema (overview,
//! components, execution, evaluation, improvement, summary) and to cite
//! retrieval sources with `(Nguồn [n])` markers. When no JSON object can be
//! recovered from its answer, the raw text is wrapped in a fallback
//! structure instead of failing the request.

use crate::retrieval::RetrievalSource;
use serde_json::{Value, json};

/// The nested schema the model is asked to fill, verbatim in the prompt.
const ANALYSIS_SCHEMA: &str = r#"{
    "overview": {
        "process_name": "Tên quy trình",
        "purpose": "Mục đích và chức năng chính",
        "process_type": "Loại quy trình (tuần tự, song song, có nhánh...)",
        "complexity_level": "Độ phức tạp (Đơn giản/Trung bình/Phức tạp)",
        "scope": "Phạm vi áp dụng"
    },
    "components": {
        "start_event": "Sự kiện bắt đầu",
        "end_event": "Sự kiện kết thúc",
        "actors": ["Danh sách các tác nhân tham gia"],
        "steps": ["Danh sách các bước xử lý"],
        "sequence": "Mô tả trình tự thực hiện"
    },
    "execution": {
        "sla": "Thời gian xử lý dự kiến",
        "input_requirements": ["Yêu cầu đầu vào"],
        "output": "Kết quả đầu ra",
        "system_integration": ["Hệ thống liên quan"]
    },
    "evaluation": {
        "logic_coherence": "Đánh giá tính logic và mạch lạc",
        "completeness": "Đánh giá tính đầy đủ",
        "risks": ["Danh sách rủi ro có thể xảy ra"],
        "controls": ["Các điểm kiểm soát"],
        "compliance": "Tuân thủ quy định"
    },
    "improvement": {
        "bottlenecks": ["Điểm nghẽn cần cải thiện"],
        "optimization_opportunities": ["Cơ hội tối ưu hóa"],
        "automation_possibility": "Khả năng tự động hóa",
        "kpis": ["Chỉ số đánh giá hiệu suất"]
    },
    "summary": {
        "conclusion": "Kết luận tổng thể",
        "recommendations": ["Khuyến nghị quan trọng"]
    }
}"#;

/// Assembles the analysis prompt from the diagram, the question, the
/// retrieval context and the citation reference list.
pub fn analysis_prompt(
    diagram: &Value,
    question: &str,
    context: &str,
    sources: &[RetrievalSource],
) -> String {
    let mut source_refs = String::new();
    if !sources.is_empty() {
        source_refs.push_str("\n\nNGUỒN THAM KHẢO:\n");
        for source in sources {
            source_refs.push_str(&format!(
                "- Nguồn [{}]: {} (ID: {})\n",
                source.citation_id, source.title, source.document_id
            ));
        }
    }

    let diagram_text =
        serde_json::to_string_pretty(diagram).unwrap_or_else(|_| diagram.to_string());

    format!(
        "Bạn là chuyên gia phân tích quy trình và sơ đồ hệ thống. Hãy phân tích chi \
         tiết sơ đồ sau và trả về kết quả dưới dạng JSON theo schema đã định.\n\n\
         SƠ ĐỒ CẦN PHÂN TÍCH:\n{diagram_text}\n\n\
         CÂU HỎI CỦA NGƯỜI DÙNG:\n{question}\n\n\
         KIẾN THỨC THAM KHẢO (chỉ sử dụng các nguồn này):\n{context}{source_refs}\n\n\
         YÊU CẦU QUAN TRỌNG:\n\
         1. Khi trích dẫn thông tin từ nguồn tham khảo, hãy sử dụng định dạng: \
         \"(Nguồn [số])\"\n\
         2. Trả về kết quả theo JSON schema sau:\n\n{ANALYSIS_SCHEMA}\n\n\
         Hãy phân tích chi tiết và trả về JSON hoàn chỉnh. Nhớ trích dẫn nguồn khi \
         sử dụng thông tin từ tài liệu tham khảo."
    )
}

/// Fixed structure wrapping the raw model text when no JSON object could be
/// recovered from the answer.
pub fn fallback_analysis(analysis_text: &str) -> Value {
    json!({
        "overview": {
            "process_name": "Quy trình được phân tích",
            "purpose": "Được xác định từ phân tích",
            "process_type": "Cần xác định thêm",
            "complexity_level": "Trung bình",
            "scope": "Theo sơ đồ được cung cấp"
        },
        "components": {
            "start_event": "Được xác định từ sơ đồ",
            "end_event": "Được xác định từ sơ đồ",
            "actors": ["Cần xác định từ phân tích"],
            "steps": ["Được liệt kê trong phân tích"],
            "sequence": "Tuần tự theo sơ đồ"
        },
        "execution": {
            "sla": "Cần xác định",
            "input_requirements": ["Theo yêu cầu quy trình"],
            "output": "Kết quả mong đợi",
            "system_integration": ["Cần xác định"]
        },
        "evaluation": {
            "logic_coherence": "Đánh giá dựa trên phân tích",
            "completeness": "Cần đánh giá thêm",
            "risks": ["Cần xác định từ phân tích"],
            "controls": ["Cần bổ sung"],
            "compliance": "Cần kiểm tra"
        },
        "improvement": {
            "bottlenecks": ["Được xác định từ phân tích"],
            "optimization_opportunities": ["Cần đánh giá thêm"],
            "automation_possibility": "Có thể tự động hóa một phần",
            "kpis": ["Cần định nghĩa"]
        },
        "summary": {
            "conclusion": "Phân tích chi tiết được cung cấp",
            "recommendations": ["Xem phân tích chi tiết"]
        },
        "detailed_analysis": analysis_text
    })
}
