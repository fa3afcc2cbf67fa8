//! 核心功能模块
//!
//! 本模块提供转换工具的基础设施：日志系统、配置管理和错误处理。
//! 这些模块与具体的网格格式无关。
//!
//! # 模块组织
//!
//! - `log`：日志系统，提供结构化的日志记录功能
//! - `config`：配置管理，支持从 TOML 文件加载转换设置
//! - `error`：错误处理，定义统一的错误类型

pub mod log;
pub mod config;
pub mod error;

// 重新导出常用类型，方便使用
pub use error::{Result, MeshConvertError};
pub use config::Config;
