//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::state::{App, AppMode};
use components::{card_item, render_dialog_framework};
use layouts::centered_rect;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // 标题与计数
            Constraint::Min(10),   // 单词卡片
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_cards(frame, app, chunks[1]);
    render_help(frame, app, chunks[2]);

    // 渲染弹窗
    match &app.mode {
        AppMode::SelectingList(cursor) => render_list_selector(frame, app, *cursor),
        AppMode::Alert(message) => render_alert(frame, message),
        AppMode::Normal => {}
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let list_name = app.current_list_name().unwrap_or("(未选择)");
    let title = Line::from(vec![
        Span::styled(
            "📘 单词本  ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("📂 {}", list_name)),
    ]);

    let mut status = vec![Span::raw(format!(
        "⭐️ {} / {}   当前单词数: {}",
        app.starred_count(),
        app.controller.total(),
        app.controller.display_len()
    ))];
    if app.controller.is_filtered() {
        status.push(Span::styled("  [仅⭐️]", Style::default().fg(Color::Green)));
    }
    if app.controller.is_shuffled() {
        status.push(Span::styled("  [已打乱]", Style::default().fg(Color::Yellow)));
    }
    if app.controller.is_loading() {
        status.push(Span::styled(
            "  正在加载单词数据...",
            Style::default().fg(Color::Magenta),
        ));
    }

    let header = Paragraph::new(vec![title, Line::from(status)])
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_cards(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().title("单词").borders(Borders::ALL);

    if app.controller.display_len() == 0 {
        let hint = if app.controller.is_loading() {
            "正在加载单词数据..."
        } else if app.controller.is_filtered() {
            "没有带⭐️的单词，按 [f] 显示全部"
        } else {
            "词表为空，按 [l] 选择其他词表"
        };
        frame.render_widget(
            Paragraph::new(hint)
                .style(Style::default().fg(Color::Gray))
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = app
        .controller
        .display()
        .enumerate()
        .filter_map(|(i, entry)| {
            let presenter = app.presenters.get(&entry.id)?;
            let card = presenter.card(entry, app.controller.is_shown(&entry.id));
            Some(card_item(&card, i == app.selected_index))
        })
        .collect();

    let list = List::new(items).block(block);

    let mut state = ListState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match &app.mode {
        AppMode::Normal => {
            "[j/k] 导航  [空格] 显示/隐藏释义  [s] ⭐️  [h] 隐藏全部释义  [f] 仅⭐️/全部  [x] 打乱  [r] 原始顺序  [l] 词表  [q] 退出"
        }
        AppMode::SelectingList(_) => "[j/k] 选择词表  [Enter] 加载  [Esc] 取消",
        AppMode::Alert(_) => "[Enter] 确定",
    };

    let message = app.message.as_deref().unwrap_or("");
    let text = if message.is_empty() {
        help_text.to_string()
    } else {
        format!("{}  |  {}", help_text, message)
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_list_selector(frame: &mut Frame, app: &App, cursor: usize) {
    let area = centered_rect(50, 40, frame.area());
    let inner = render_dialog_framework(frame, area, "📂 选择词表", Color::Cyan);

    let current = app.controller.selected_list();
    let items: Vec<ListItem> = app
        .controller
        .wordlists()
        .iter()
        .map(|w| {
            let marker = if Some(w.id.as_str()) == current { "● " } else { "  " };
            ListItem::new(format!("{}{}", marker, w.name))
        })
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED),
    );

    let mut state = ListState::default();
    state.select(Some(cursor));
    frame.render_stateful_widget(list, inner, &mut state);
}

fn render_alert(frame: &mut Frame, message: &str) {
    let area = centered_rect(60, 25, frame.area());
    let inner = render_dialog_framework(frame, area, "⚠️ 错误", Color::Red);

    let dialog = Paragraph::new(format!("{}\n\n[Enter] 确定", message))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true });
    frame.render_widget(dialog, inner);
}
