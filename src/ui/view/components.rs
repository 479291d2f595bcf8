//! 通用 UI 组件
//!
//! 对话框框架与单词卡片

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, ListItem},
};

use crate::models::Gender;
use crate::presenter::Card;

/// [组件] 弹窗基础框架
pub fn render_dialog_framework(frame: &mut Frame, area: Rect, title: &str, color: Color) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// 名词按性别着色：阳性蓝、阴性红、中性绿、复数黄
pub fn gender_color(gender: Option<Gender>) -> Color {
    match gender {
        Some(Gender::Masculine) => Color::Blue,
        Some(Gender::Feminine) => Color::Red,
        Some(Gender::Neuter) => Color::Green,
        Some(Gender::Plural) => Color::Yellow,
        None => Color::White,
    }
}

/// [组件] 单词卡片
pub fn card_item(card: &Card, selected: bool) -> ListItem<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();

    let mut title_style = Style::default()
        .fg(gender_color(card.gender))
        .add_modifier(Modifier::BOLD);
    if selected {
        title_style = title_style.add_modifier(Modifier::REVERSED);
    }
    let mut title = vec![Span::styled(card.title.clone(), title_style)];
    if let Some(gender) = card.gender {
        title.push(Span::styled(format!(" [{}]", gender.marker()), dim));
    }
    if let Some(plural) = &card.plural {
        title.push(Span::styled(format!("  {}", plural), dim));
    }
    lines.push(Line::from(title));

    if let Some(conjugation) = &card.conjugation {
        lines.push(Line::from(Span::styled(format!("  {}", conjugation), dim)));
    }
    if let Some(variants) = &card.variants {
        lines.push(Line::from(Span::styled(format!("  {}", variants), dim)));
    }

    for meaning in &card.meanings {
        if card.meaning_shown {
            lines.push(Line::from(Span::styled(
                format!("  {}", meaning.text),
                Style::default().fg(Color::Cyan),
            )));
            if let Some(note) = &meaning.note {
                lines.push(Line::from(Span::styled(format!("    ※ {}", note), dim)));
            }
        } else {
            // 隐藏时保留行数，避免卡片高度跳动
            let width = meaning.text.chars().count();
            lines.push(Line::from(Span::styled(
                format!("  {}", "░".repeat(width)),
                dim,
            )));
        }
    }

    for (de, ja) in &card.examples {
        lines.push(Line::from(Span::raw(format!("  ▸ {}", de))));
        lines.push(Line::from(Span::styled(format!("    {}", ja), dim)));
    }

    if let Some(etymology) = &card.etymology {
        lines.push(Line::from(Span::styled(
            format!("  {}", etymology),
            Style::default().fg(Color::Magenta),
        )));
    }

    lines.push(Line::from(""));
    ListItem::new(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::MeaningLine;

    fn card(shown: bool) -> Card {
        Card {
            title: "⭐️Haus".to_string(),
            gender: Some(Gender::Neuter),
            plural: Some("Häuser".to_string()),
            conjugation: None,
            variants: None,
            meanings: vec![MeaningLine {
                text: "家 / house".to_string(),
                note: Some("建物".to_string()),
            }],
            meaning_shown: shown,
            examples: vec![("Das Haus ist alt.".to_string(), "その家は古い。".to_string())],
            etymology: None,
        }
    }

    #[test]
    fn test_card_height() {
        // 标题 + 释义 + 注释 + 例句两行 + 空行
        assert_eq!(card_item(&card(true), false).height(), 6);
        // 隐藏时注释不显示
        assert_eq!(card_item(&card(false), false).height(), 5);
    }

    #[test]
    fn test_gender_color() {
        assert_eq!(gender_color(Some(Gender::Feminine)), Color::Red);
        assert_eq!(gender_color(None), Color::White);
    }
}
