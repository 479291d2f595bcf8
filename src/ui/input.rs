//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::{App, AppMode};

/// 根据当前模式和按键获取对应的 Action
pub fn get_action(mode: &AppMode, key: KeyCode) -> Option<Action> {
    match mode {
        AppMode::Normal => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::ToggleMeaning),
            KeyCode::Char('s') | KeyCode::Char('*') => Some(Action::ToggleStar),
            KeyCode::Char('h') => Some(Action::HideAllMeanings),
            KeyCode::Char('f') => Some(Action::ToggleStarFilter),
            KeyCode::Char('x') => Some(Action::Shuffle),
            KeyCode::Char('r') => Some(Action::ResetOrder),
            KeyCode::Char('l') => Some(Action::StartSelectList),
            _ => None,
        },
        AppMode::SelectingList(_) => match key {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            _ => None,
        },
        AppMode::Alert(_) => match key {
            KeyCode::Enter | KeyCode::Esc => Some(Action::Cancel),
            _ => None,
        },
    }
}

/// 处理按键事件，返回 true 表示退出
pub fn handle_key_event(app: &mut App, key: KeyCode) -> bool {
    match get_action(&app.mode, key) {
        Some(action) => app.dispatch(action),
        None => false,
    }
}
