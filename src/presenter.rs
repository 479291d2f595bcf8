//! 单词卡片
//!
//! 每个条目对应一个 `EntryPresenter`，只拥有自己的星标状态。
//! 星标变化通过 channel 通知控制器，释义的显示与否由控制器管理。

use std::collections::HashMap;
use std::sync::mpsc::Sender;

use crate::models::{Conjugation, Etymology, Gender, WordEntry, WordExample, WordVariant};
use crate::storage::{StarStore, read_star, write_star};

/// 星标变化事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarChanged {
    pub entry_id: String,
    pub word: String,
    pub starred: bool,
}

#[derive(Debug)]
pub struct EntryPresenter {
    entry_id: String,
    word: String,
    starred: bool,
    last_reported: bool,
    notifier: Option<Sender<StarChanged>>,
}

impl EntryPresenter {
    /// 创建时同步读取星标，保证首次渲染就是正确的值
    pub fn new(
        entry: &WordEntry,
        store: &dyn StarStore,
        notifier: Option<Sender<StarChanged>>,
    ) -> Self {
        let starred = match read_star(store, &entry.word) {
            Ok(starred) => starred,
            Err(err) => {
                tracing::warn!(word = %entry.word, error = %err, "failed to read star flag");
                false
            }
        };

        Self {
            entry_id: entry.id.clone(),
            word: entry.word.clone(),
            starred,
            last_reported: starred,
            notifier,
        }
    }

    pub fn is_starred(&self) -> bool {
        self.starred
    }

    /// 同名单词的另一张卡片改了星标，这里只同步内存值，不写存储也不通知
    fn adopt_star(&mut self, starred: bool) {
        self.starred = starred;
        self.last_reported = starred;
    }

    /// 切换星标并立即写入存储
    ///
    /// 写入失败只记录日志，内存中的值在本次会话内仍然有效。
    pub fn toggle_star(&mut self, store: &mut dyn StarStore) {
        self.starred = !self.starred;

        if let Err(err) = write_star(store, &self.word, self.starred) {
            tracing::warn!(word = %self.word, error = %err, "failed to persist star flag");
        }

        self.notify_if_changed();
    }

    fn notify_if_changed(&mut self) {
        if self.starred == self.last_reported {
            return;
        }
        self.last_reported = self.starred;

        if let Some(notifier) = &self.notifier {
            let event = StarChanged {
                entry_id: self.entry_id.clone(),
                word: self.word.clone(),
                starred: self.starred,
            };
            if notifier.send(event).is_err() {
                tracing::debug!(word = %self.word, "star listener is gone");
            }
        }
    }

    /// 生成卡片的渲染数据
    pub fn card(&self, entry: &WordEntry, meaning_shown: bool) -> Card {
        Card {
            title: word_label(&entry.word, self.starred),
            gender: entry.gender(),
            plural: entry.plural.clone(),
            conjugation: entry.conjugation.as_ref().map(conjugation_line),
            variants: entry.variants.as_deref().and_then(variants_line),
            meanings: meaning_lines(entry),
            meaning_shown,
            examples: entry
                .examples
                .as_deref()
                .map(example_lines)
                .unwrap_or_default(),
            etymology: entry.etymology.as_ref().and_then(etymology_line),
        }
    }
}

/// 卡片渲染数据，缺失的字段为 None 或空
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub gender: Option<Gender>,
    pub plural: Option<String>,
    pub conjugation: Option<String>,
    pub variants: Option<String>,
    pub meanings: Vec<MeaningLine>,
    pub meaning_shown: bool,
    pub examples: Vec<(String, String)>,
    pub etymology: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeaningLine {
    pub text: String,
    pub note: Option<String>,
}

pub fn word_label(word: &str, starred: bool) -> String {
    if starred {
        format!("⭐️{}", word)
    } else {
        word.to_string()
    }
}

/// `infinitive / preterite / pastParticiple [auxiliary]`
pub fn conjugation_line(conjugation: &Conjugation) -> String {
    let mut line = format!(
        "{} / {} / {}",
        conjugation.infinitive, conjugation.preterite, conjugation.past_participle
    );
    if let Some(auxiliary) = conjugation.auxiliary {
        line.push(' ');
        line.push_str(auxiliary.as_str());
    }
    line
}

fn variant_text(variant: &WordVariant) -> String {
    let mut text = variant.form.clone();
    if !variant.gender.is_empty() {
        text.push_str(&format!(" ({})", variant.gender));
    }
    if let Some(plural) = &variant.plural {
        text.push_str(&format!(" / {}", plural));
    }
    text
}

pub fn variants_line(variants: &[WordVariant]) -> Option<String> {
    if variants.is_empty() {
        return None;
    }
    Some(
        variants
            .iter()
            .map(variant_text)
            .collect::<Vec<_>>()
            .join(", "),
    )
}

pub fn meaning_lines(entry: &WordEntry) -> Vec<MeaningLine> {
    entry
        .meanings
        .iter()
        .map(|m| MeaningLine {
            text: format!("{} / {}", m.ja, m.en),
            note: m.note.clone(),
        })
        .collect()
}

fn example_lines(examples: &[WordExample]) -> Vec<(String, String)> {
    examples
        .iter()
        .map(|ex| (ex.de.clone(), ex.ja.clone()))
        .collect()
}

pub fn etymology_line(etymology: &Etymology) -> Option<String> {
    if etymology.components.is_empty() {
        return None;
    }
    Some(
        etymology
            .components
            .iter()
            .map(|c| {
                format!(
                    "{}（{} / {}, {}）",
                    c.form, c.meaning.ja, c.meaning.en, c.part_of_speech
                )
            })
            .collect::<Vec<_>>()
            .join(" + "),
    )
}

/// 当前词表所有条目的卡片，按条目 id 索引
#[derive(Debug, Default)]
pub struct Presenters {
    by_id: HashMap<String, EntryPresenter>,
}

impl Presenters {
    pub fn build(
        entries: &[WordEntry],
        store: &dyn StarStore,
        notifier: &Sender<StarChanged>,
    ) -> Self {
        let by_id = entries
            .iter()
            .map(|e| {
                (
                    e.id.clone(),
                    EntryPresenter::new(e, store, Some(notifier.clone())),
                )
            })
            .collect();
        Self { by_id }
    }

    pub fn get(&self, entry_id: &str) -> Option<&EntryPresenter> {
        self.by_id.get(entry_id)
    }

    pub fn is_starred(&self, entry: &WordEntry) -> bool {
        self.by_id
            .get(&entry.id)
            .is_some_and(EntryPresenter::is_starred)
    }

    pub fn toggle_star(&mut self, entry_id: &str, store: &mut dyn StarStore) {
        if let Some(presenter) = self.by_id.get_mut(entry_id) {
            presenter.toggle_star(store);
        }
    }

    /// 星标按单词原文共享：把变化同步到同一单词的其余卡片
    pub fn sync_word(&mut self, changed: &StarChanged) {
        for presenter in self.by_id.values_mut() {
            if presenter.word == changed.word && presenter.entry_id != changed.entry_id {
                presenter.adopt_star(changed.starred);
            }
        }
    }
}
