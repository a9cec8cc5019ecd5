//! 日志初始化
//!
//! TUI 占用终端，日志全部写到数据目录下按日期命名的文件里。
//! 级别通过 RUST_LOG 控制，默认 info。

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use tracing_subscriber::EnvFilter;

/// 当天日志文件名，例如 fenzhang-2026-08-06.log
pub fn log_file_name() -> String {
    format!("fenzhang-{}.log", Local::now().format("%Y-%m-%d"))
}

/// 初始化 tracing，追加写到指定文件
pub fn init_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("无法打开日志文件 {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing 初始化失败: {e}"))?;

    Ok(())
}
