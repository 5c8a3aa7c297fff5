//! Shared vocabulary for conditional edges.
//!
//! The logic labels appear verbatim in both the generation prompt and the
//! validation gate; keeping them in one module prevents the two from
//! drifting apart.

/// Every rule on the edge must hold (AND).
pub const LOGIC_ALL: &str = "Và";

/// At least one rule on the edge must hold (OR).
pub const LOGIC_ANY: &str = "Hoặc";

/// The only logic labels the validator accepts.
pub const RECOGNIZED_LOGIC: [&str; 2] = [LOGIC_ALL, LOGIC_ANY];

/// Comparison kinds a condition rule may use, as presented to the model.
pub const OPERATORS: [&str; 13] = [
    "Chứa",
    "Không chứa",
    "Bằng",
    "Nằm trong",
    "Không nằm trong",
    "Lớn hơn",
    "Nhỏ hơn",
    "Sau",
    "Trước",
    "Là đúng",
    "Là sai",
    "Tồn tại",
    "Không tồn tại",
];

/// Whether `label` is one of the two recognized logic labels.
pub fn is_recognized_logic(label: &str) -> bool {
    RECOGNIZED_LOGIC.contains(&label)
}
