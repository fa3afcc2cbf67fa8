//! 配置管理模块
//!
//! 提供转换工具配置的加载、解析和校验。
//! 配置文件可选，不存在时全部使用默认值。
//!
//! # 配置文件格式 (ps2_mesh.toml)
//!
//! ```toml
//! [conversion]
//! precision_decimals = 6   # 顶点去重时保留的小数位数
//! uv_set = "map1"          # 读取的 UV 通道
//! object = ""              # 要导出的网格名，空表示第一个网格
//!
//! [output]
//! banner_author = "ps2_mesh"
//! default_filename = "mesh_data.c"
//! interchange_filename = "mesh_data.json"
//! include_guard = "__GENERATED_MESH_DATA__"
//! vector_type = "VECTOR"
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! ```

use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

use super::error::{ConfigError, MeshConvertError, Result};

/// 默认配置文件名
pub const CONFIG_FILE: &str = "ps2_mesh.toml";

/// 量化精度上限
///
/// 10^12 乘以常见的模型坐标仍远小于 i64 的范围。
pub const MAX_PRECISION_DECIMALS: u32 = 12;

/// 工具配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 转换配置
    #[serde(default)]
    pub conversion: ConversionConfig,

    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 转换配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// 顶点去重键保留的小数位数
    #[serde(default = "default_precision")]
    pub precision_decimals: u32,

    /// UV 通道名
    #[serde(default = "default_uv_set")]
    pub uv_set: String,

    /// 要导出的网格名称，空字符串表示场景中的第一个网格
    #[serde(default)]
    pub object: String,
}

/// 输出配置
///
/// 直接传给序列化器，替代脚本里的全局输出路径和作者常量。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 文件头注释中的作者名
    #[serde(default = "default_author")]
    pub banner_author: String,

    /// 输出路径是目录时使用的 C 文件名
    #[serde(default = "default_filename")]
    pub default_filename: String,

    /// 输出路径是目录时使用的 JSON 文件名
    #[serde(default = "default_interchange_filename")]
    pub interchange_filename: String,

    /// 头文件保护宏
    #[serde(default = "default_include_guard")]
    pub include_guard: String,

    /// 四分量向量类型名
    #[serde(default = "default_vector_type")]
    pub vector_type: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_precision() -> u32 { 6 }
fn default_uv_set() -> String { "map1".to_string() }
fn default_author() -> String { "ps2_mesh".to_string() }
fn default_filename() -> String { "mesh_data.c".to_string() }
fn default_interchange_filename() -> String { "mesh_data.json".to_string() }
fn default_include_guard() -> String { "__GENERATED_MESH_DATA__".to_string() }
fn default_vector_type() -> String { "VECTOR".to_string() }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "ps2_mesh.log".to_string() }

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            precision_decimals: default_precision(),
            uv_set: default_uv_set(),
            object: String::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            banner_author: default_author(),
            default_filename: default_filename(),
            interchange_filename: default_interchange_filename(),
            include_guard: default_include_guard(),
            vector_type: default_vector_type(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl ConversionConfig {
    /// 选中的网格名，未指定时返回 `None`
    pub fn selected_object(&self) -> Option<&str> {
        let name = self.object.trim();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    ///
    /// 只有文件不存在时返回 `ConfigError::FileNotFound`，
    /// 权限不足等其他读取失败作为 IO 错误返回。
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => {
                ConfigError::FileNotFound(path.to_string_lossy().to_string()).into()
            }
            _ => MeshConvertError::Io(e),
        })?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 文本解析
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在则使用默认配置
    ///
    /// 文件存在但无法读取或解析失败时返回错误。
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match Self::from_file(path) {
            Err(MeshConvertError::Config(ConfigError::FileNotFound(_))) => Ok(Self::default()),
            other => other,
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.conversion.precision_decimals > MAX_PRECISION_DECIMALS {
            return Err(ConfigError::InvalidValue {
                field: "conversion.precision_decimals".to_string(),
                reason: format!("must be at most {}", MAX_PRECISION_DECIMALS),
            }.into());
        }

        if self.conversion.uv_set.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "conversion.uv_set".to_string(),
                reason: "UV set name must not be empty".to_string(),
            }.into());
        }

        for (field, name) in [
            ("output.default_filename", &self.output.default_filename),
            ("output.interchange_filename", &self.output.interchange_filename),
        ] {
            if name.trim().is_empty() || name.contains(['/', '\\']) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must be a plain, non-empty file name".to_string(),
                }.into());
            }
        }

        if !is_c_identifier(&self.output.include_guard) {
            return Err(ConfigError::InvalidValue {
                field: "output.include_guard".to_string(),
                reason: "must be a valid C identifier".to_string(),
            }.into());
        }

        if !is_c_identifier(&self.output.vector_type) {
            return Err(ConfigError::InvalidValue {
                field: "output.vector_type".to_string(),
                reason: "must be a valid C identifier".to_string(),
            }.into());
        }

        Ok(())
    }
}

fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.conversion.precision_decimals, 6);
        assert_eq!(config.conversion.uv_set, "map1");
        assert_eq!(config.output.default_filename, "mesh_data.c");
        assert_eq!(config.conversion.selected_object(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml_str(
            "[conversion]\nprecision_decimals = 4\nobject = \"pCube1\"\n\n[output]\nbanner_author = \"kelsno\"\n",
        )
        .unwrap();

        assert_eq!(config.conversion.precision_decimals, 4);
        assert_eq!(config.conversion.uv_set, "map1");
        assert_eq!(config.conversion.selected_object(), Some("pCube1"));
        assert_eq!(config.output.banner_author, "kelsno");
        assert_eq!(config.output.include_guard, "__GENERATED_MESH_DATA__");
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::from_toml_str("[conversion\nprecision_decimals = ").is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.conversion.precision_decimals = 13;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.output.include_guard = "1BAD-GUARD".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.output.default_filename = "out/mesh.c".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_file_or_default(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.output.vector_type, "VECTOR");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[conversion]\nprecision_decimals = 3\n\n[logging]\nlevel = \"debug\"\n").unwrap();

        let config = Config::from_file_or_default(&path).unwrap();
        assert_eq!(config.conversion.precision_decimals, 3);
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[conversion\nprecision_decimals = ").unwrap();

        assert!(matches!(
            Config::from_file_or_default(&path),
            Err(MeshConvertError::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_unreadable_file_is_not_treated_as_missing() {
        // 路径存在但是目录，读取失败不应回退到默认配置
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::create_dir(&path).unwrap();

        assert!(matches!(Config::from_file(&path), Err(MeshConvertError::Io(_))));
        assert!(Config::from_file_or_default(&path).is_err());
    }
}
