mod logging;
mod models;
mod money;
mod storage;
mod ui;

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::info;

use crate::money::format_currency;
use crate::storage::load_config;
use crate::ui::{App, render};

/// 获取配置目录路径 (~/.config/fenzhang/)
fn get_config_dir() -> io::Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "无法获取用户配置目录"))?
        .join("fenzhang");

    fs::create_dir_all(&config_dir)?;

    Ok(config_dir)
}

/// 获取数据目录路径 (~/.local/share/fenzhang/)，存放日志
fn get_data_dir() -> io::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "无法获取用户数据目录"))?
        .join("fenzhang");

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

fn main() -> anyhow::Result<()> {
    // 日志写文件，终端留给 TUI；日志初始化失败不影响使用
    if let Ok(data_dir) = get_data_dir() {
        let _ = logging::init_file_logging(&data_dir.join(logging::log_file_name()));
    }

    // 配置文件路径 (~/.config/fenzhang/config.toml)
    let config_path = get_config_dir()?.join("config.toml");
    let config = load_config(&config_path)
        .with_context(|| format!("读取配置失败: {}", config_path.display()))?;
    info!(currency = %config.currency, default_tip = config.default_tip, "配置已加载");

    // 创建应用状态
    let mut app = App::new(config);

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

    // 退出时把最后一次计算结果回显到终端
    println!(
        "本次分账: {} 人，每人 {}，合计 {}",
        app.state.party_size(),
        format_currency(app.result.amount_per_person, &app.config.currency),
        format_currency(app.result.total_with_tip, &app.config.currency),
    );

    Ok(result?)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
            if key.kind == crossterm::event::KeyEventKind::Press {
                if ui::handle_key_event(app, key.code)? {
                    break;
                }
            }
        }
    }
    Ok(())
}
