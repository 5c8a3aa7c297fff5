//! Assembles the generation instruction sent to the model.
//!
//! The prompt is a pure function of the input text and language tag. The
//! conditional-edge authoring block is only attached when the input looks
//! like it describes branching logic, which is decided by a pluggable
//! [`ConditionDetector`].

use crate::graph::condition::{LOGIC_ALL, LOGIC_ANY, OPERATORS};
use itertools::Itertools;

/// Decides whether free-text input describes branching or conditions.
pub trait ConditionDetector: Send + Sync {
    fn has_conditions(&self, text: &str) -> bool;
}

/// Fixed vocabulary the default detector scans for, case-insensitively.
pub const CONDITION_KEYWORDS: [&str; 18] = [
    "nếu",
    "điều kiện",
    "trường hợp",
    "tách nhánh",
    "rẽ nhánh",
    "phân nhánh",
    "ngược lại",
    "lớn hơn",
    "nhỏ hơn",
    "bằng",
    "chứa",
    "if ",
    "condition",
    "branch",
    "when ",
    "otherwise",
    "greater",
    "less than",
];

/// Case-insensitive fixed-vocabulary substring matcher.
pub struct KeywordDetector {
    vocabulary: Vec<String>,
}

impl KeywordDetector {
    /// Detector over a custom vocabulary. Keywords are matched lowercased.
    pub fn new<I, S>(vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            vocabulary: vocabulary
                .into_iter()
                .map(|keyword| keyword.into().to_lowercase())
                .collect(),
        }
    }
}

impl Default for KeywordDetector {
    fn default() -> Self {
        Self::new(CONDITION_KEYWORDS)
    }
}

impl ConditionDetector for KeywordDetector {
    fn has_conditions(&self, text: &str) -> bool {
        let haystack = text.to_lowercase();
        self.vocabulary
            .iter()
            .any(|keyword| haystack.contains(keyword.as_str()))
    }
}

/// Builds the full generation prompt.
///
/// Always appends the literal input text and the output-format
/// instructions; the conditional-edge block is included only when
/// `with_conditions` is set.
pub fn generation_prompt(text: &str, language: &str, with_conditions: bool) -> String {
    let mut prompt = String::from(
        "Bạn là chuyên gia mô hình hóa quy trình nghiệp vụ. Hãy chuyển mô tả sau \
         thành một sơ đồ luồng và trả về DUY NHẤT một đối tượng JSON có đúng hai \
         khóa \"nodes\" và \"edges\".\n\n\
         ĐỊNH DẠNG:\n\
         - Node: {\"id\": \"1\", \"type\": \"input|default|output\", \
         \"data\": {\"label\": \"Tên bước\"}, \"position\": {\"x\": 100, \"y\": 100}}\n\
         - Edge: {\"id\": \"e1-2\", \"source\": \"1\", \"target\": \"2\"}\n\
         - Mỗi node phải có \"data.label\" không rỗng; \"source\"/\"target\" của edge \
         phải trỏ tới id node có thật.\n",
    );

    if with_conditions {
        prompt.push_str(&conditional_block());
    }

    prompt.push_str(&format!(
        "\nMÔ TẢ ĐẦU VÀO:\n{text}\n\n\
         YÊU CẦU ĐẦU RA:\n\
         - Nhãn các bước viết bằng ngôn ngữ: {language}.\n\
         - Chỉ trả về đối tượng JSON, không kèm giải thích hay markdown.\n"
    ));

    prompt
}

/// The conditional-edge authoring block: schema, operator vocabulary and a
/// worked before/after example. The key rule is that a branch never becomes
/// a node of its own — the decision lives on the outgoing edges.
fn conditional_block() -> String {
    let operators = OPERATORS.iter().join(", ");
    format!(
        "\nQUY TẮC CHO NHÁNH ĐIỀU KIỆN:\n\
         - TUYỆT ĐỐI KHÔNG tạo node riêng để biểu diễn điểm rẽ nhánh. Điều kiện \
         nằm trên edge, không phải trên node.\n\
         - Edge có điều kiện mang thêm \"data\": {{\"logic\": \"{LOGIC_ALL}\" | \
         \"{LOGIC_ANY}\", \"rules\": [{{\"field\": \"tên biến\", \"operator\": \
         \"toán tử\", \"value\": \"giá trị\"}}]}}\n\
         - \"logic\" = \"{LOGIC_ALL}\" khi mọi rule phải đúng, \"{LOGIC_ANY}\" khi \
         chỉ cần một rule đúng.\n\
         - \"operator\" phải thuộc danh sách: {operators}.\n\
         VÍ DỤ CHUYỂN ĐỔI — mô tả: \"A → Nếu X thì B, nếu Y thì C\":\n\
         SAI: tạo node trung gian \"Kiểm tra X/Y\" rồi nối A → node đó → B/C.\n\
         ĐÚNG: {{\"nodes\": [A, B, C], \"edges\": [A→B với rule X, A→C với rule Y]}}, \
         ví dụ edge A→B: {{\"id\": \"eA-B\", \"source\": \"A\", \"target\": \"B\", \
         \"data\": {{\"logic\": \"{LOGIC_ALL}\", \"rules\": [{{\"field\": \"X\", \
         \"operator\": \"Là đúng\", \"value\": \"true\"}}]}}}}\n"
    )
}
