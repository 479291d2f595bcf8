//! 词表异步加载
//!
//! 每次加载在独立线程中读取并解析 JSON，结果通过 channel 送回主循环。
//! 每个请求携带单调递增的令牌，过期令牌的结果由控制器丢弃。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use crate::error::LoadError;
use crate::models::WordEntry;

/// 加载令牌，数值越大越新
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadToken(pub u64);

/// 一次加载请求
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub token: LoadToken,
    pub list_id: String,
    pub path: PathBuf,
}

/// 加载结果
#[derive(Debug)]
pub struct LoadOutcome {
    pub token: LoadToken,
    pub list_id: String,
    pub result: Result<Vec<WordEntry>, LoadError>,
}

/// 随程序发布的词表，文件名与默认配置中的 source 一致
const BUNDLED_LISTS: [(&str, &str); 2] = [
    ("words_2505.json", include_str!("../data/words_2505.json")),
    ("words_b2_german.json", include_str!("../data/words_b2_german.json")),
];

/// 把内置词表写入数据目录，已存在的文件保持不变，返回新写入的文件数
pub fn install_bundled_lists(data_dir: &Path) -> io::Result<usize> {
    let mut installed = 0;
    for (name, content) in BUNDLED_LISTS {
        let path = data_dir.join(name);
        if path.exists() {
            continue;
        }
        fs::write(&path, content)?;
        tracing::info!(path = %path.display(), "installed bundled wordlist");
        installed += 1;
    }
    Ok(installed)
}

/// 同步读取并解析词表文件
pub fn read_wordlist(path: &Path) -> Result<Vec<WordEntry>, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// 后台加载器
pub struct Loader {
    tx: Sender<LoadOutcome>,
    rx: Receiver<LoadOutcome>,
}

impl Loader {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// 启动加载线程，不可取消
    pub fn spawn(&self, request: LoadRequest) {
        let tx = self.tx.clone();
        tracing::debug!(token = request.token.0, list = %request.list_id, "spawning list load");

        thread::spawn(move || {
            let result = read_wordlist(&request.path);
            let outcome = LoadOutcome {
                token: request.token,
                list_id: request.list_id,
                result,
            };
            // 接收端只会在程序退出时被丢弃
            let _ = tx.send(outcome);
        });
    }

    /// 取出所有已完成的加载结果
    pub fn drain(&self) -> Vec<LoadOutcome> {
        let mut outcomes = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(outcome) => outcomes.push(outcome),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        outcomes
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
