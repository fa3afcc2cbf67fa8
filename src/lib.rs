//! ps2_mesh - PS2DEV 网格数据转换工具
//!
//! 把已三角化的网格（每个面-顶点带位置和 UV）转换成去重后的
//! 顶点/索引数组，并写出为目标平台构建可以直接编译的 C 静态数据。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、错误处理）
//! - `geometry`: 顶点量化、去重、网格组装和场景加载
//! - `export`: JSON 中间交换文件与 C 静态数组写出
//! - `pipeline`: 一次完整的转换流程
//! - `cli`: 命令行与交互菜单
//!
//! # 使用示例
//!
//! ```no_run
//! use ps2_mesh::core::Config;
//! use ps2_mesh::pipeline::convert;
//! use std::path::Path;
//!
//! let summary = convert(Path::new("cube.obj"), Path::new("build/mesh_data.c"), &Config::default())?;
//! println!("{} 个唯一顶点", summary.vertex_count);
//! # Ok::<(), ps2_mesh::core::MeshConvertError>(())
//! ```

pub mod core;
pub mod geometry;
pub mod export;
pub mod pipeline;
pub mod cli;
