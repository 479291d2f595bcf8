//! 词表控制器
//!
//! 管理当前词表、各条目释义的显示状态，以及“筛选 / 打乱”组合状态机：
//!
//! | filtered | shuffled | 显示顺序                         |
//! |----------|----------|----------------------------------|
//! | false    | false    | 原始加载顺序                     |
//! | true     | false    | 原始顺序中带星标的条目           |
//! | false    | true     | 最近一次打乱得到的完整顺序       |
//! | true     | true     | 最近一次打乱顺序中带星标的条目   |
//!
//! 显示顺序以条目下标保存，因此不可能包含当前词表之外的条目。

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use rand::Rng;

use crate::config::{AppConfig, WordlistInfo};
use crate::error::LoadError;
use crate::loader::{LoadOutcome, LoadRequest, LoadToken};
use crate::models::WordEntry;

/// 筛选 / 打乱状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderState {
    pub filtered: bool,
    pub shuffled: bool,
    /// 最近一次打乱得到的完整排列（覆盖全部条目）
    last_shuffled: Option<Vec<usize>>,
}

/// 处理加载结果后的状态
#[derive(Debug)]
pub enum Applied {
    Loaded { list_id: String, count: usize },
    Failed(LoadError),
    Stale,
}

pub struct ListController {
    config: AppConfig,
    data_dir: PathBuf,
    selected: Option<String>,
    entries: Vec<WordEntry>,
    shown: HashMap<String, bool>,
    order: OrderState,
    display: Vec<usize>,
    next_token: u64,
    pending: Option<LoadToken>,
}

impl ListController {
    pub fn new(config: AppConfig, data_dir: PathBuf) -> Self {
        Self {
            config,
            data_dir,
            selected: None,
            entries: Vec::new(),
            shown: HashMap::new(),
            order: OrderState::default(),
            display: Vec::new(),
            next_token: 0,
            pending: None,
        }
    }

    // ============ 词表加载 ============

    /// 请求加载词表
    ///
    /// 未知的词表返回错误且不改变任何状态；否则生成新的加载令牌，
    /// 之前尚未完成的请求随之过期。
    pub fn select_list(&mut self, list_id: &str) -> Result<LoadRequest, LoadError> {
        let info = self
            .config
            .find(list_id)
            .ok_or_else(|| LoadError::UnknownList(list_id.to_string()))?;

        self.next_token += 1;
        let token = LoadToken(self.next_token);
        self.pending = Some(token);

        Ok(LoadRequest {
            token,
            list_id: info.id.clone(),
            path: info.resolve_source(&self.data_dir),
        })
    }

    /// 处理加载线程送回的结果
    pub fn apply_outcome(&mut self, outcome: LoadOutcome) -> Applied {
        if self.pending != Some(outcome.token) {
            tracing::debug!(token = outcome.token.0, list = %outcome.list_id, "discarding stale load result");
            return Applied::Stale;
        }
        self.pending = None;

        match outcome.result {
            Ok(entries) => {
                let count = entries.len();
                self.apply_loaded(outcome.list_id.clone(), entries);
                tracing::info!(list = %outcome.list_id, count, "wordlist loaded");
                Applied::Loaded {
                    list_id: outcome.list_id,
                    count,
                }
            }
            Err(err) => {
                tracing::error!(list = %outcome.list_id, error = %err, "failed to load wordlist");
                Applied::Failed(err)
            }
        }
    }

    fn apply_loaded(&mut self, list_id: String, entries: Vec<WordEntry>) {
        self.shown = entries.iter().map(|e| (e.id.clone(), true)).collect();
        self.display = (0..entries.len()).collect();
        self.entries = entries;
        self.order = OrderState::default();
        self.selected = Some(list_id);
    }

    // ============ 释义显示 ============

    pub fn hide_all_meanings(&mut self) {
        for shown in self.shown.values_mut() {
            *shown = false;
        }
    }

    /// 切换单个条目的释义显示，未知 id 忽略
    pub fn toggle_meaning(&mut self, id: &str) {
        if let Some(shown) = self.shown.get_mut(id) {
            *shown = !*shown;
        }
    }

    pub fn is_shown(&self, id: &str) -> bool {
        self.shown.get(id).copied().unwrap_or(false)
    }

    // ============ 筛选与顺序 ============

    pub fn toggle_star_filter(&mut self, is_starred: impl Fn(&WordEntry) -> bool) {
        self.order.filtered = !self.order.filtered;
        self.recompute(is_starred);
    }

    /// 打乱当前显示的条目
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.display.is_empty() {
            return;
        }

        let mut picked = self.display.clone();
        fisher_yates(&mut picked, rng);

        // 打乱结果填回基准顺序中可见条目所占的位置，未显示的条目原地不动，
        // 这样关闭筛选后仍能看到完整的排列
        let visible: HashSet<usize> = picked.iter().copied().collect();
        let mut shuffled = picked.iter().copied();
        let full = self
            .base_order()
            .into_iter()
            .map(|i| {
                if visible.contains(&i) {
                    shuffled.next().unwrap_or(i)
                } else {
                    i
                }
            })
            .collect();

        self.order.last_shuffled = Some(full);
        self.order.shuffled = true;
        self.display = picked;
    }

    pub fn reset_order(&mut self) {
        self.order.filtered = false;
        self.order.shuffled = false;
        self.display = (0..self.entries.len()).collect();
    }

    /// 某个条目的星标发生变化后，在当前模式下重新计算显示顺序
    pub fn on_star_changed(&mut self, is_starred: impl Fn(&WordEntry) -> bool) {
        self.recompute(is_starred);
    }

    fn base_order(&self) -> Vec<usize> {
        match (self.order.shuffled, &self.order.last_shuffled) {
            (true, Some(permutation)) => permutation.clone(),
            _ => (0..self.entries.len()).collect(),
        }
    }

    fn recompute(&mut self, is_starred: impl Fn(&WordEntry) -> bool) {
        let base = self.base_order();
        self.display = if self.order.filtered {
            base.into_iter()
                .filter(|&i| is_starred(&self.entries[i]))
                .collect()
        } else {
            base
        };
    }

    // ============ 查询 ============

    pub fn wordlists(&self) -> &[WordlistInfo] {
        &self.config.wordlists
    }

    pub fn selected_list(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_filtered(&self) -> bool {
        self.order.filtered
    }

    pub fn is_shuffled(&self) -> bool {
        self.order.shuffled
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn starred_count(&self, is_starred: impl Fn(&WordEntry) -> bool) -> usize {
        self.entries.iter().filter(|e| is_starred(*e)).count()
    }

    pub fn display_len(&self) -> usize {
        self.display.len()
    }

    /// 当前显示的条目
    pub fn display(&self) -> impl Iterator<Item = &WordEntry> {
        self.display.iter().map(|&i| &self.entries[i])
    }

    pub fn display_at(&self, position: usize) -> Option<&WordEntry> {
        self.display.get(position).map(|&i| &self.entries[i])
    }
}

/// Fisher–Yates 洗牌，每种排列概率相同
fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn controller() -> ListController {
        ListController::new(AppConfig::default(), PathBuf::from("/tmp/wortschatz"))
    }

    fn entries(words: &[&str]) -> Vec<WordEntry> {
        words
            .iter()
            .enumerate()
            .map(|(i, w)| WordEntry::sample(&(i + 1).to_string(), w))
            .collect()
    }

    fn load(ctrl: &mut ListController, list_id: &str, words: &[&str]) {
        let request = ctrl.select_list(list_id).unwrap();
        let applied = ctrl.apply_outcome(LoadOutcome {
            token: request.token,
            list_id: request.list_id,
            result: Ok(entries(words)),
        });
        assert!(matches!(applied, Applied::Loaded { .. }));
    }

    fn ids(ctrl: &ListController) -> Vec<String> {
        ctrl.display().map(|e| e.id.clone()).collect()
    }

    fn starred<'a>(words: &'a [&'a str]) -> impl Fn(&WordEntry) -> bool + 'a {
        move |e: &WordEntry| words.contains(&e.word.as_str())
    }

    const FIVE: [&str; 5] = ["Haus", "Baum", "Hund", "Katze", "Tisch"];

    #[test]
    fn test_unknown_list_is_an_error() {
        let mut ctrl = controller();
        load(&mut ctrl, "words_2505", &FIVE);

        let err = ctrl.select_list("words_c1").unwrap_err();
        assert!(matches!(err, LoadError::UnknownList(ref id) if id == "words_c1"));
        assert!(!ctrl.is_loading());
        assert_eq!(ctrl.selected_list(), Some("words_2505"));
        assert_eq!(ctrl.total(), 5);
    }

    #[test]
    fn test_reload_resets_everything() {
        let mut ctrl = controller();
        load(&mut ctrl, "words_2505", &FIVE);
        ctrl.hide_all_meanings();
        ctrl.toggle_star_filter(starred(&["Haus"]));
        ctrl.shuffle_with(&mut StdRng::seed_from_u64(3));

        load(&mut ctrl, "words_b2_german", &["Umwelt", "Gesellschaft", "Zukunft"]);

        assert_eq!(ctrl.selected_list(), Some("words_b2_german"));
        assert!(!ctrl.is_filtered());
        assert!(!ctrl.is_shuffled());
        assert_eq!(ids(&ctrl), vec!["1", "2", "3"]);
        assert!(ctrl.entries().iter().all(|e| ctrl.is_shown(&e.id)));

        // 重新加载后没有残留的打乱记录
        ctrl.toggle_star_filter(starred(&["Umwelt", "Zukunft"]));
        assert_eq!(ids(&ctrl), vec!["1", "3"]);
    }

    #[test]
    fn test_toggle_meaning_twice_restores() {
        let mut ctrl = controller();
        load(&mut ctrl, "words_2505", &FIVE);
        ctrl.toggle_meaning("2");
        assert!(!ctrl.is_shown("2"));
        assert!(ctrl.is_shown("1"));
        ctrl.toggle_meaning("2");
        assert!(ctrl.is_shown("2"));

        ctrl.toggle_meaning("999");
        assert!(!ctrl.is_shown("999"));
    }

    #[test]
    fn test_hide_all_meanings() {
        let mut ctrl = controller();
        load(&mut ctrl, "words_2505", &FIVE);
        ctrl.hide_all_meanings();
        assert!(ctrl.entries().iter().all(|e| !ctrl.is_shown(&e.id)));
    }

    #[test]
    fn test_shuffle_on_empty_source_is_noop() {
        let mut ctrl = controller();
        ctrl.shuffle();
        assert!(!ctrl.is_shuffled());
        assert_eq!(ctrl.display_len(), 0);

        load(&mut ctrl, "words_2505", &FIVE);
        ctrl.toggle_star_filter(starred(&[]));
        assert_eq!(ctrl.display_len(), 0);
        ctrl.shuffle();
        assert!(!ctrl.is_shuffled());
        assert_eq!(ctrl.display_len(), 0);
    }

    #[test]
    fn test_shuffle_is_permutation_and_reset_restores() {
        let mut ctrl = controller();
        load(&mut ctrl, "words_2505", &FIVE);
        ctrl.shuffle_with(&mut StdRng::seed_from_u64(42));
        assert!(ctrl.is_shuffled());

        let mut shuffled = ids(&ctrl);
        shuffled.sort();
        assert_eq!(shuffled, vec!["1", "2", "3", "4", "5"]);

        ctrl.toggle_star_filter(starred(&["Baum"]));
        ctrl.reset_order();
        assert!(!ctrl.is_filtered());
        assert!(!ctrl.is_shuffled());
        assert_eq!(ids(&ctrl), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_filter_keeps_relative_order() {
        let mut ctrl = controller();
        load(&mut ctrl, "words_2505", &FIVE);
        ctrl.shuffle_with(&mut StdRng::seed_from_u64(7));
        let before = ids(&ctrl);

        let stars = ["Katze", "Baum"];
        ctrl.toggle_star_filter(starred(&stars));

        let expected: Vec<String> = before
            .iter()
            .filter(|id| *id == "2" || *id == "4")
            .cloned()
            .collect();
        assert_eq!(ids(&ctrl), expected);
        assert_eq!(ctrl.display_len(), 2);
    }

    #[test]
    fn test_disabling_filter_keeps_shuffle() {
        let mut ctrl = controller();
        load(&mut ctrl, "words_2505", &FIVE);
        ctrl.shuffle_with(&mut StdRng::seed_from_u64(11));
        let shuffled = ids(&ctrl);

        ctrl.toggle_star_filter(starred(&["Haus"]));
        assert_eq!(ids(&ctrl), vec!["1"]);
        ctrl.toggle_star_filter(starred(&["Haus"]));

        assert!(ctrl.is_shuffled());
        assert!(!ctrl.is_filtered());
        assert_eq!(ids(&ctrl), shuffled);
    }

    #[test]
    fn test_shuffle_while_filtered_then_unfilter_shows_all() {
        let mut ctrl = controller();
        load(&mut ctrl, "words_2505", &FIVE);
        let stars = ["Haus", "Hund", "Tisch"];
        ctrl.toggle_star_filter(starred(&stars));
        ctrl.shuffle_with(&mut StdRng::seed_from_u64(5));
        let filtered_shuffle = ids(&ctrl);

        ctrl.toggle_star_filter(starred(&stars));
        let all = ids(&ctrl);
        assert_eq!(all.len(), 5);

        // 未带星标的条目留在原位
        assert_eq!(all[1], "2");
        assert_eq!(all[3], "4");

        ctrl.toggle_star_filter(starred(&stars));
        assert_eq!(ids(&ctrl), filtered_shuffle);
    }

    #[test]
    fn test_star_change_refilters_without_reshuffle() {
        let mut ctrl = controller();
        load(&mut ctrl, "words_2505", &FIVE);
        ctrl.shuffle_with(&mut StdRng::seed_from_u64(9));
        let shuffled = ids(&ctrl);

        ctrl.toggle_star_filter(starred(&["Haus", "Hund"]));
        ctrl.on_star_changed(starred(&["Haus", "Hund", "Tisch"]));

        let expected: Vec<String> = shuffled
            .iter()
            .filter(|id| ["1", "3", "5"].contains(&id.as_str()))
            .cloned()
            .collect();
        assert_eq!(ids(&ctrl), expected);
        assert!(ctrl.is_shuffled());
        assert!(ctrl.is_filtered());

        ctrl.on_star_changed(starred(&["Tisch"]));
        assert_eq!(ids(&ctrl), vec!["5"]);
    }

    #[test]
    fn test_star_change_without_shuffle_uses_load_order() {
        let mut ctrl = controller();
        load(&mut ctrl, "words_2505", &FIVE);
        ctrl.toggle_star_filter(starred(&["Tisch"]));
        ctrl.on_star_changed(starred(&["Tisch", "Haus"]));
        assert_eq!(ids(&ctrl), vec!["1", "5"]);

        // 未筛选时星标变化不影响顺序
        ctrl.reset_order();
        ctrl.on_star_changed(starred(&[]));
        assert_eq!(ids(&ctrl), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_starred_count() {
        let mut ctrl = controller();
        load(&mut ctrl, "words_2505", &FIVE);
        assert_eq!(ctrl.starred_count(starred(&["Baum", "Katze"])), 2);
        assert_eq!(ctrl.total(), 5);
    }

    #[test]
    fn test_stale_outcome_is_discarded() {
        let mut ctrl = controller();
        let first = ctrl.select_list("words_2505").unwrap();
        let second = ctrl.select_list("words_b2_german").unwrap();
        assert!(second.token > first.token);

        let applied = ctrl.apply_outcome(LoadOutcome {
            token: second.token,
            list_id: second.list_id,
            result: Ok(entries(&["Umwelt"])),
        });
        assert!(matches!(applied, Applied::Loaded { count: 1, .. }));

        // 较早的请求后完成，结果被丢弃
        let applied = ctrl.apply_outcome(LoadOutcome {
            token: first.token,
            list_id: first.list_id,
            result: Ok(entries(&FIVE)),
        });
        assert!(matches!(applied, Applied::Stale));
        assert_eq!(ctrl.selected_list(), Some("words_b2_german"));
        assert_eq!(ctrl.total(), 1);
    }

    #[test]
    fn test_failed_load_keeps_previous_list() {
        let mut ctrl = controller();
        load(&mut ctrl, "words_2505", &FIVE);
        ctrl.toggle_meaning("3");

        let request = ctrl.select_list("words_b2_german").unwrap();
        assert!(ctrl.is_loading());
        let applied = ctrl.apply_outcome(LoadOutcome {
            token: request.token,
            list_id: request.list_id,
            result: Err(LoadError::Io {
                path: PathBuf::from("/tmp/wortschatz/words_b2_german.json"),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
        });

        assert!(matches!(applied, Applied::Failed(LoadError::Io { .. })));
        assert!(!ctrl.is_loading());
        assert_eq!(ctrl.selected_list(), Some("words_2505"));
        assert_eq!(ctrl.total(), 5);
        assert!(!ctrl.is_shown("3"));
    }

    #[test]
    fn test_fisher_yates_is_permutation() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut items: Vec<u32> = (0..50).collect();
        fisher_yates(&mut items, &mut rng);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());

        let mut single = vec![1];
        fisher_yates(&mut single, &mut rng);
        assert_eq!(single, vec![1]);
    }
}
