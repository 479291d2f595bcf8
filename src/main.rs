mod config;
mod controller;
mod error;
mod loader;
mod models;
mod presenter;
mod storage;
mod ui;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::controller::ListController;
use crate::storage::{FileStarStore, MemoryStarStore, StarStore};
use crate::ui::{App, render};

#[derive(Parser)]
#[command(name = "wortschatz")]
#[command(about = "德语单词卡片：显示/隐藏释义、⭐️标记还没记住的单词、筛选与打乱")]
struct Cli {
    /// 数据目录（词表、星标、日志），默认 ~/.local/share/wortschatz/
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// 配置文件路径，默认 <数据目录>/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 启动时加载的词表 ID，默认使用配置中的 default_list
    #[arg(short, long)]
    list: Option<String>,
}

/// 获取数据目录路径 (~/.local/share/wortschatz/)
fn get_data_dir(override_dir: Option<PathBuf>) -> io::Result<PathBuf> {
    let data_dir = match override_dir {
        Some(dir) => dir,
        None => dirs::data_dir()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "无法获取用户数据目录"))?
            .join("wortschatz"),
    };

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// 日志写入数据目录下的文件，标准输出留给终端界面
fn init_tracing(data_dir: &std::path::Path) -> WorkerGuard {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("wortschatz=info"));

    let file_appender = tracing_appender::rolling::never(data_dir, "wortschatz.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    guard
}

/// 星标文件无法打开时退回内存存储，本次会话的标记不会保存
fn open_store(path: &std::path::Path) -> Box<dyn StarStore> {
    match FileStarStore::open(path) {
        Ok(store) => {
            tracing::info!(path = %store.path().display(), "star store ready");
            Box::new(store)
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "star store unavailable, using memory store");
            Box::new(MemoryStarStore::new())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = get_data_dir(cli.data_dir).context("无法创建数据目录")?;
    let _guard = init_tracing(&data_dir);

    if let Err(err) = loader::install_bundled_lists(&data_dir) {
        tracing::warn!(error = %err, "failed to install bundled wordlists");
    }

    let config_path = cli.config.unwrap_or_else(|| data_dir.join("config.toml"));
    let config = AppConfig::load(&config_path)?;
    let initial_list = cli.list.unwrap_or_else(|| config.default_list.clone());

    let store = open_store(&data_dir.join("stars.toml"));
    let controller = ListController::new(config, data_dir.clone());

    // 创建应用状态
    let mut app = App::new(controller, store);
    app.request_list(&initial_list);

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    tracing::info!("exiting");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> anyhow::Result<()> {
    loop {
        app.poll_background();
        terminal.draw(|f| render(f, app))?;

        // 加载在后台进行，轮询以便及时显示结果
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && ui::handle_key_event(app, key.code) {
                break;
            }
        }
    }
    Ok(())
}
