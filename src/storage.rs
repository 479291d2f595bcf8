//! 星标（“还没记住”）持久化存储
//!
//! 键为 `nochNichtGelernt_<单词原文>`，值为字符串 `"true"` / `"false"`，
//! 缺失的键视为 `false`。同一单词在不同词表之间共享同一个星标。

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

const KEY_PREFIX: &str = "nochNichtGelernt_";

/// 由单词原文生成存储键
pub fn star_key(word: &str) -> String {
    format!("{}{}", KEY_PREFIX, word)
}

/// 同步的键值存储
pub trait StarStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// 读取单词的星标，缺失视为未标记
pub fn read_star(store: &dyn StarStore, word: &str) -> Result<bool, StoreError> {
    Ok(store.get(&star_key(word))?.as_deref() == Some("true"))
}

pub fn write_star(store: &mut dyn StarStore, word: &str, starred: bool) -> Result<(), StoreError> {
    store.set(&star_key(word), if starred { "true" } else { "false" })
}

/// TOML 文件结构
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StarFileData {
    meta: StarFileMeta,
    #[serde(default)]
    flags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StarFileMeta {
    version: String,
    last_modified: DateTime<Local>,
}

/// 基于 TOML 文件的存储
///
/// 打开时整体读入内存，之后每次写入都立即落盘。
/// 多个进程同时打开同一文件时各自持有缓存，直到重启才会重新读取。
#[derive(Debug)]
pub struct FileStarStore {
    path: PathBuf,
    flags: BTreeMap<String, String>,
}

impl FileStarStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let flags = if path.exists() {
            let content = fs::read_to_string(path)?;
            let data: StarFileData = toml::from_str(&content)?;
            data.flags
        } else {
            BTreeMap::new()
        };

        tracing::debug!(path = %path.display(), count = flags.len(), "star store opened");

        Ok(Self {
            path: path.to_path_buf(),
            flags,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let data = StarFileData {
            meta: StarFileMeta {
                version: "1.0".to_string(),
                last_modified: Local::now(),
            },
            flags: self.flags.clone(),
        };
        let content = toml::to_string_pretty(&data)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl StarStore for FileStarStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.flags.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.flags.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// 内存存储：存储文件不可用时的退路，本次会话结束即丢失
#[derive(Debug, Default)]
pub struct MemoryStarStore {
    flags: BTreeMap<String, String>,
}

impl MemoryStarStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StarStore for MemoryStarStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.flags.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.flags.insert(key.to_string(), value.to_string());
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_uses_word_text() {
        assert_eq!(star_key("Haus"), "nochNichtGelernt_Haus");
        assert_eq!(star_key("sich freuen"), "nochNichtGelernt_sich freuen");
    }

    #[test]
    fn test_missing_key_is_false() {
        let store = MemoryStarStore::new();
        assert!(!read_star(&store, "Baum").unwrap());
    }

    #[test]
    fn test_only_literal_true_counts() {
        let mut store = MemoryStarStore::new();
        store.set("nochNichtGelernt_Baum", "TRUE").unwrap();
        store.set("nochNichtGelernt_Haus", "true").unwrap();
        assert!(!read_star(&store, "Baum").unwrap());
        assert!(read_star(&store, "Haus").unwrap());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stars.toml");

        let mut store = FileStarStore::open(&path).unwrap();
        write_star(&mut store, "Haus", true).unwrap();
        write_star(&mut store, "Baum", true).unwrap();
        write_star(&mut store, "Baum", false).unwrap();
        drop(store);

        let reopened = FileStarStore::open(&path).unwrap();
        assert!(read_star(&reopened, "Haus").unwrap());
        assert!(!read_star(&reopened, "Baum").unwrap());
        assert_eq!(
            reopened.get("nochNichtGelernt_Baum").unwrap().as_deref(),
            Some("false")
        );
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stars.toml");
        fs::write(&path, "this is = = not toml").unwrap();

        assert!(matches!(
            FileStarStore::open(&path),
            Err(StoreError::Decode(_))
        ));
    }

    #[test]
    fn test_broken_store_reports_errors() {
        let mut store = testing::BrokenStore;
        assert!(read_star(&store, "Haus").is_err());
        assert!(write_star(&mut store, "Haus", true).is_err());
    }
}
