//! 日志系统模块
//!
//! 基于 `tracing` 提供结构化的日志记录功能。
//! 转换流水线和命令行界面使用不同的 target，方便用 `EnvFilter` 单独过滤。
//!
//! # 使用示例
//!
//! ```no_run
//! use ps2_mesh::core::log::{self, LogLevel};
//!
//! log::init_logger(LogLevel::Info, false, None);
//! ps2_mesh::pipeline_info!(faces = 12, "Mesh assembled");
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use std::path::Path;

pub use super::config::LogLevel;

/// 初始化日志系统
///
/// 必须在程序开始时调用一次。
///
/// # 参数
///
/// * `level` - 日志级别
/// * `file_output` - 是否输出到文件
/// * `log_file_path` - 日志文件路径（可选，默认为 "ps2_mesh.log"）
pub fn init_logger(level: LogLevel, file_output: bool, log_file_path: Option<&str>) {
    let filter = EnvFilter::new(level.as_filter());

    if file_output {
        let log_path = log_file_path.unwrap_or("ps2_mesh.log");
        let path = Path::new(log_path);
        let directory = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let filename = path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("ps2_mesh.log");

        let file_appender = RollingFileAppender::new(
            Rotation::DAILY,
            directory,
            filename
        );

        let console_layer = fmt::layer()
            .with_target(false)
            .with_ansi(true);

        let file_layer = fmt::layer()
            .with_target(true)
            .with_ansi(false)  // 文件不需要 ANSI 颜色
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .with(file_layer)
            .init();
    } else {
        let fmt_layer = fmt::layer()
            .with_target(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

impl LogLevel {
    /// 对应的 `EnvFilter` 指令
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// 转换流水线日志 - Debug 级别
#[macro_export]
macro_rules! pipeline_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "ps2_mesh::pipeline", $($arg)*)
    };
}

/// 转换流水线日志 - Info 级别
#[macro_export]
macro_rules! pipeline_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "ps2_mesh::pipeline", $($arg)*)
    };
}

/// 转换流水线日志 - Warn 级别
#[macro_export]
macro_rules! pipeline_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "ps2_mesh::pipeline", $($arg)*)
    };
}

/// 命令行日志 - Info 级别
#[macro_export]
macro_rules! cli_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "ps2_mesh::cli", $($arg)*)
    };
}

/// 命令行日志 - Warn 级别
#[macro_export]
macro_rules! cli_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "ps2_mesh::cli", $($arg)*)
    };
}

/// 命令行日志 - Error 级别
#[macro_export]
macro_rules! cli_error {
    ($($arg:tt)*) => {
        tracing::error!(target: "ps2_mesh::cli", $($arg)*)
    };
}
