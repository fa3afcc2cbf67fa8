//! ps2_mesh - 网格数据转换工具
//!
//! # 使用方法
//!
//! ```bash
//! # 直接转换
//! ps2_mesh model.obj model.json
//! ps2_mesh model.json build/mesh_data.c
//!
//! # 交互菜单
//! ps2_mesh
//! ```
//!
//! 工作目录下的 `ps2_mesh.toml` 可覆盖默认配置。

use ps2_mesh::cli::{self, Invocation};
use ps2_mesh::core::config::CONFIG_FILE;
use ps2_mesh::core::{log, Config};

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载配置文件（ps2_mesh.toml）
/// 2. 验证配置
/// 3. 初始化日志系统
/// 4. 按参数数量选择直接转换或交互菜单
///
/// 退出码：成功为 0，转换失败为 1。
fn main() {
    // 1. 加载配置（在初始化日志之前），文件不存在时使用默认配置
    let config = match Config::from_file_or_default(CONFIG_FILE) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {}: {}", CONFIG_FILE, e);
            std::process::exit(1);
        }
    };

    // 2. 验证配置
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // 3. 初始化日志系统
    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "ps2_mesh starting");

    // 4. 选择运行模式
    match cli::parse_args(std::env::args().skip(1)) {
        Invocation::Direct { input, output } => {
            std::process::exit(cli::run_direct(&input, &output, &config));
        }
        Invocation::Interactive { show_usage } => {
            if show_usage {
                cli::warn_usage();
            }

            let stdin = std::io::stdin();
            if let Err(e) = cli::run_interactive(stdin.lock(), std::io::stdout(), &config) {
                ps2_mesh::cli_error!("Interactive session failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}
