//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use std::sync::mpsc::{self, Receiver, Sender};

use crate::controller::{Applied, ListController};
use crate::loader::{LoadOutcome, Loader};
use crate::models::WordEntry;
use crate::presenter::{Presenters, StarChanged};
use crate::storage::StarStore;

/// 应用状态
pub struct App {
    pub controller: ListController,
    pub presenters: Presenters,
    pub store: Box<dyn StarStore>,
    pub loader: Loader,
    pub selected_index: usize,
    pub mode: AppMode,
    pub message: Option<String>,
    star_tx: Sender<StarChanged>,
    star_rx: Receiver<StarChanged>,
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    SelectingList(usize), // 词表选择框中的光标位置
    Alert(String),        // 阻塞式提示，确认后关闭
}

impl App {
    /// 创建新的应用实例
    pub fn new(controller: ListController, store: Box<dyn StarStore>) -> Self {
        let (star_tx, star_rx) = mpsc::channel();
        Self {
            controller,
            presenters: Presenters::default(),
            store,
            loader: Loader::new(),
            selected_index: 0,
            mode: AppMode::Normal,
            message: None,
            star_tx,
            star_rx,
        }
    }

    /// 请求加载词表，未知词表直接弹窗提示
    pub fn request_list(&mut self, list_id: &str) {
        match self.controller.select_list(list_id) {
            Ok(request) => {
                self.message = None;
                self.loader.spawn(request);
            }
            Err(err) => {
                tracing::warn!(list = %list_id, error = %err, "rejected wordlist selection");
                self.mode = AppMode::Alert(format!("单词文件加载失败: {}", err));
            }
        }
    }

    /// 处理后台加载结果和星标事件，每轮主循环调用一次
    pub fn poll_background(&mut self) {
        for outcome in self.loader.drain() {
            self.apply_outcome(outcome);
        }
        self.process_star_events();
    }

    pub fn apply_outcome(&mut self, outcome: LoadOutcome) {
        match self.controller.apply_outcome(outcome) {
            Applied::Loaded { list_id, count } => {
                self.presenters =
                    Presenters::build(self.controller.entries(), &*self.store, &self.star_tx);
                self.selected_index = 0;
                let name = self
                    .controller
                    .wordlists()
                    .iter()
                    .find(|w| w.id == list_id)
                    .map(|w| w.name.clone())
                    .unwrap_or(list_id);
                self.message = Some(format!("已加载 {}（{} 词）", name, count));
            }
            Applied::Failed(err) => {
                self.mode = AppMode::Alert(format!("单词文件加载失败: {}", err));
            }
            Applied::Stale => {}
        }
    }

    /// 将卡片发出的星标变化转交给控制器
    pub fn process_star_events(&mut self) {
        while let Ok(event) = self.star_rx.try_recv() {
            tracing::debug!(
                entry = %event.entry_id,
                word = %event.word,
                starred = event.starred,
                "star changed"
            );
            self.presenters.sync_word(&event);
            let presenters = &self.presenters;
            self.controller
                .on_star_changed(|entry| presenters.is_starred(entry));
            self.clamp_selection();
        }
    }

    /// 确保选中索引有效
    pub fn clamp_selection(&mut self) {
        let len = self.controller.display_len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    /// 获取当前选中的条目
    pub fn selected_entry(&self) -> Option<&WordEntry> {
        self.controller.display_at(self.selected_index)
    }

    /// 获取当前选中的条目 ID
    pub fn selected_entry_id(&self) -> Option<String> {
        self.selected_entry().map(|e| e.id.clone())
    }

    pub fn starred_count(&self) -> usize {
        let presenters = &self.presenters;
        self.controller
            .starred_count(|entry| presenters.is_starred(entry))
    }

    /// 当前词表的显示名称
    pub fn current_list_name(&self) -> Option<&str> {
        let id = self.controller.selected_list()?;
        self.controller
            .wordlists()
            .iter()
            .find(|w| w.id == id)
            .map(|w| w.name.as_str())
    }
}
