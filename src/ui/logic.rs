//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑和各种业务处理方法

use super::actions::Action;
use super::state::{App, AppMode};

impl App {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),

            Action::ToggleMeaning => self.toggle_meaning(),
            Action::ToggleStar => self.toggle_star(),

            Action::HideAllMeanings => {
                self.controller.hide_all_meanings();
                self.message = Some("已隐藏所有释义".to_string());
            }
            Action::ToggleStarFilter => self.toggle_star_filter(),
            Action::Shuffle => self.shuffle(),
            Action::ResetOrder => {
                self.controller.reset_order();
                self.selected_index = 0;
                self.message = Some("已恢复原始顺序".to_string());
            }
            Action::StartSelectList => self.start_select_list(),

            Action::Cancel => self.cancel(),
            Action::Submit => {
                if let AppMode::SelectingList(cursor) = self.mode {
                    self.confirm_select_list(cursor);
                }
            }
        }
        false
    }

    // ============ 导航相关 ============

    /// 向上移动选择
    pub fn move_up(&mut self) {
        match &mut self.mode {
            AppMode::SelectingList(cursor) => {
                *cursor = cursor.saturating_sub(1);
            }
            _ => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                }
            }
        }
    }

    /// 向下移动选择
    pub fn move_down(&mut self) {
        let list_count = self.controller.wordlists().len();
        match &mut self.mode {
            AppMode::SelectingList(cursor) => {
                if *cursor + 1 < list_count {
                    *cursor += 1;
                }
            }
            _ => {
                if self.selected_index + 1 < self.controller.display_len() {
                    self.selected_index += 1;
                }
            }
        }
    }

    // ============ 卡片相关 ============

    pub fn toggle_meaning(&mut self) {
        if let Some(id) = self.selected_entry_id() {
            self.controller.toggle_meaning(&id);
        }
    }

    /// 切换选中单词的星标，随后立即处理通知
    pub fn toggle_star(&mut self) {
        if let Some(id) = self.selected_entry_id() {
            self.presenters.toggle_star(&id, &mut *self.store);
            self.process_star_events();
        }
    }

    // ============ 筛选与顺序 ============

    pub fn toggle_star_filter(&mut self) {
        let presenters = &self.presenters;
        self.controller
            .toggle_star_filter(|entry| presenters.is_starred(entry));
        self.selected_index = 0;
        self.message = Some(if self.controller.is_filtered() {
            format!("仅显示⭐️单词（{} 个）", self.controller.display_len())
        } else {
            "显示全部单词".to_string()
        });
    }

    pub fn shuffle(&mut self) {
        if self.controller.display_len() == 0 {
            self.message = Some("没有可打乱的单词".to_string());
            return;
        }
        self.controller.shuffle();
        self.selected_index = 0;
        self.message = Some("已打乱顺序".to_string());
    }

    // ============ 词表选择 ============

    pub fn start_select_list(&mut self) {
        let cursor = self
            .controller
            .selected_list()
            .and_then(|id| self.controller.wordlists().iter().position(|w| w.id == id))
            .unwrap_or(0);
        self.mode = AppMode::SelectingList(cursor);
    }

    pub fn confirm_select_list(&mut self, cursor: usize) {
        self.mode = AppMode::Normal;
        let Some(list_id) = self
            .controller
            .wordlists()
            .get(cursor)
            .map(|w| w.id.clone())
        else {
            return;
        };
        self.request_list(&list_id);
    }

    // ============ 通用操作 ============

    /// 取消当前操作 / 关闭提示
    pub fn cancel(&mut self) {
        self.mode = AppMode::Normal;
    }
}
