//! 终端界面：单词卡片列表
//!
//! - state.rs: App 持有词表控制器、卡片 presenter、星标存储和后台加载器
//! - actions.rs / input.rs: 按键按当前模式（浏览、选择词表、提示框）映射为 Action
//! - logic.rs: 执行 Action，改动控制器和 presenter
//! - view/: 标题栏（词表名与 ⭐ 数）、卡片列表、帮助栏、词表选择框与提示框

pub mod actions;
pub mod input;
pub mod logic;
pub mod state;
pub mod view;

// Re-export for convenience
pub use input::handle_key_event;
pub use state::App;
pub use view::render;
