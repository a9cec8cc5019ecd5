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
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::state::{App, AppMode, Field};
use crate::models::{MAX_PEOPLE_SELECTOR, TIP_PERCENTAGES};
use crate::money::format_currency;
use components::{render_dialog_framework, render_input_widget};
use layouts::centered_rect;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Length(5), // 输入表单
            Constraint::Min(5),    // 结果
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, chunks[0]);
    render_form(frame, app, chunks[1]);
    render_result(frame, app, chunks[2]);
    render_help(frame, app, chunks[3]);

    // 渲染弹窗
    match &app.mode {
        AppMode::EditingAmount => render_amount_dialog(frame, app),
        AppMode::PickingPeople => render_people_dialog(frame, app),
        AppMode::PickingTip => render_tip_dialog(frame, app),
        AppMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("🧾 AA 分账计算器")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let currency = &app.config.currency;
    let rows = [
        (
            Field::Amount,
            "账单金额",
            format_currency(app.state.check_amount, currency),
        ),
        (
            Field::People,
            "人数    ",
            format!("{} 人", app.state.party_size()),
        ),
        (
            Field::Tip,
            "小费比例",
            format!("{}%", app.state.tip_percentage),
        ),
    ];

    let items: Vec<ListItem> = rows
        .iter()
        .map(|(field, label, value)| {
            let focused = *field == app.focus;
            let marker = if focused { "▸ " } else { "  " };
            let content = format!("{}{}  {}", marker, label, value);

            let style = if focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![Span::styled(content, style)]))
        })
        .collect();

    let form = List::new(items).block(Block::default().title("输入").borders(Borders::ALL));
    frame.render_widget(form, area);
}

fn render_result(frame: &mut Frame, app: &App, area: Rect) {
    let currency = &app.config.currency;
    let content = format!(
        "每人应付      {}\n合计（含小费）{}\n其中小费      {}",
        format_currency(app.result.amount_per_person, currency),
        format_currency(app.result.total_with_tip, currency),
        format_currency(app.result.tip_value, currency),
    );

    let result = Paragraph::new(content)
        .style(Style::default().fg(Color::Green))
        .block(Block::default().title("结果").borders(Borders::ALL));
    frame.render_widget(result, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match &app.mode {
        AppMode::Normal => {
            "[a] 金额  [p] 人数  [t] 小费  [j/k] 移动  [Enter] 编辑  [q] 退出"
        }
        AppMode::EditingAmount => "输入金额后按 [Enter] 确认  [Esc] 取消",
        AppMode::PickingPeople => "[j/k] 选择人数  [Enter] 确认  [Esc] 取消",
        AppMode::PickingTip => "[j/k] 选择档位  [Enter] 确认  [Esc] 取消",
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

fn render_amount_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(50, 30, frame.area());
    let inner = render_dialog_framework(frame, area, "输入账单金额");

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(inner);

    render_input_widget(frame, chunks[0], "金额", &app.input_buffer, true, Color::Yellow);

    let hint = Paragraph::new("支持千分位逗号，留空表示 0").style(Style::default().fg(Color::Gray));
    frame.render_widget(hint, chunks[1]);
}

fn render_people_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(30, 60, frame.area());
    let inner = render_dialog_framework(frame, area, "选择人数");

    let items: Vec<ListItem> = (0..=MAX_PEOPLE_SELECTOR)
        .map(|selector| ListItem::new(format!("{} 人", selector + 2)))
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::REVERSED),
    );

    let mut state = ListState::default();
    state.select(Some(app.picker_index));

    frame.render_stateful_widget(list, inner, &mut state);
}

fn render_tip_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(30, 40, frame.area());
    let inner = render_dialog_framework(frame, area, "选择小费比例");

    let items: Vec<ListItem> = TIP_PERCENTAGES
        .iter()
        .map(|tip| ListItem::new(format!("{}%", tip)))
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::REVERSED),
    );

    let mut state = ListState::default();
    state.select(Some(app.picker_index));

    frame.render_stateful_widget(list, inner, &mut state);
}
