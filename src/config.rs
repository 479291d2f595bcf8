//! 配置：可用词表及默认词表
//!
//! 配置文件 (~/.local/share/wortschatz/config.toml) 缺失时使用内置默认值。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 一个可选的词表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordlistInfo {
    pub id: String,
    pub name: String,
    /// JSON 文件路径，相对路径以数据目录为基准
    pub source: PathBuf,
}

impl WordlistInfo {
    pub fn resolve_source(&self, data_dir: &Path) -> PathBuf {
        if self.source.is_absolute() {
            self.source.clone()
        } else {
            data_dir.join(&self.source)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_list_id")]
    pub default_list: String,
    #[serde(default = "default_wordlists")]
    pub wordlists: Vec<WordlistInfo>,
}

fn default_list_id() -> String {
    "words_2505".to_string()
}

fn default_wordlists() -> Vec<WordlistInfo> {
    vec![
        WordlistInfo {
            id: "words_2505".to_string(),
            name: "基本単語 (2505語)".to_string(),
            source: PathBuf::from("words_2505.json"),
        },
        WordlistInfo {
            id: "words_b2_german".to_string(),
            name: "ドイツ語B2レベル".to_string(),
            source: PathBuf::from("words_b2_german.json"),
        },
    ]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_list: default_list_id(),
            wordlists: default_wordlists(),
        }
    }
}

impl AppConfig {
    /// 从 TOML 文件加载配置，文件不存在时返回默认配置
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = toml::from_str(&content).map_err(|source| ConfigError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        if config.find(&config.default_list).is_none() {
            return Err(ConfigError::UnknownDefault(config.default_list));
        }

        Ok(config)
    }

    pub fn find(&self, list_id: &str) -> Option<&WordlistInfo> {
        self.wordlists.iter().find(|w| w.id == list_id)
    }
}
