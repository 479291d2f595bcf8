//! 错误类型
//!
//! 词表加载失败需要以弹窗提示用户；星标存储失败只记录日志。

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 词表加载错误
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("未知的词表: {0}")]
    UnknownList(String),

    #[error("无法读取词表文件 {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("词表文件格式错误 {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// 星标存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("存储文件读写失败: {0}")]
    Io(#[from] io::Error),

    #[error("存储文件解析失败: {0}")]
    Decode(#[from] toml::de::Error),

    #[error("存储文件序列化失败: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// 配置文件错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("无法读取配置文件 {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("配置文件格式错误 {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("默认词表 {0} 不在词表列表中")]
    UnknownDefault(String),
}
