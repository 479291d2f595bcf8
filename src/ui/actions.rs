//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    MoveSelectionUp,
    MoveSelectionDown,

    // 卡片操作
    ToggleMeaning,
    ToggleStar,

    // 整个词表的操作
    HideAllMeanings,
    ToggleStarFilter,
    Shuffle,
    ResetOrder,
    StartSelectList,

    // 对话框
    Cancel, // Esc
    Submit, // Enter
}
