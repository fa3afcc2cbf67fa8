//! 错误处理模块
//!
//! 定义了转换工具中使用的统一错误类型。
//!
//! # 错误分类
//!
//! - `IngestError`：读取场景/网格数据失败（未选中网格、不是多边形网格等）
//! - `ConversionError`：去重与组装阶段的错误（坏面、空网格）
//! - `InterchangeError`：中间 JSON 文件缺失或格式无效
//! - `OutputWrite`：写出目标文件失败
//!
//! 除了单个坏面（跳过并继续）以外，其余错误都会中止当前转换。

use std::fmt;
use std::path::PathBuf;

/// 工具统一的 Result 类型
pub type Result<T> = std::result::Result<T, MeshConvertError>;

/// 网格转换工具的错误类型
#[derive(Debug)]
pub enum MeshConvertError {
    /// 配置错误
    Config(ConfigError),

    /// 场景数据读取错误
    Ingest(IngestError),

    /// 去重/组装错误
    Conversion(ConversionError),

    /// 中间交换文件错误
    Interchange(InterchangeError),

    /// 写出文件失败（已创建的目录保留不删除）
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// IO 错误
    Io(std::io::Error),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 场景数据读取相关的错误
#[derive(Debug)]
pub enum IngestError {
    /// 没有选中任何网格
    NoSelection(String),

    /// 选中的对象不是多边形网格
    NotAMesh(String),

    /// 网格上不存在指定的 UV 通道
    MissingUvSet { mesh: String, uv_set: String },

    /// 文件不存在
    FileNotFound(PathBuf),

    /// 不支持的文件格式
    UnsupportedFormat(String),

    /// 解析失败
    ParseError(String),
}

/// 单个坏面的描述
///
/// 面不是三角形，或者 UV 数量与顶点数量不一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedFace {
    /// 面在输入中的序号
    pub face_index: usize,
    pub vertex_count: usize,
    pub uv_count: usize,
}

/// 去重/组装相关的错误
#[derive(Debug)]
pub enum ConversionError {
    /// 处理完成后没有任何面或顶点
    EmptyMesh { faces: usize, vertices: usize },
}

/// 中间交换文件相关的错误
#[derive(Debug)]
pub enum InterchangeError {
    /// 输入文件不存在
    InputNotFound(PathBuf),

    /// 不是合法的 JSON 交换文件
    InvalidFormat(String),

    /// 字段缺失、为空或互相矛盾
    Validation(String),
}

impl fmt::Display for MeshConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshConvertError::Config(e) => write!(f, "Configuration error: {}", e),
            MeshConvertError::Ingest(e) => write!(f, "Ingest error: {}", e),
            MeshConvertError::Conversion(e) => write!(f, "Conversion error: {}", e),
            MeshConvertError::Interchange(e) => write!(f, "Interchange error: {}", e),
            MeshConvertError::OutputWrite { path, source } => {
                write!(f, "Failed to write '{}': {}", path.display(), source)
            }
            MeshConvertError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::NoSelection(msg) => write!(f, "No mesh selected: {}", msg),
            IngestError::NotAMesh(name) => {
                write!(f, "Selected object '{}' is not a polygon mesh", name)
            }
            IngestError::MissingUvSet { mesh, uv_set } => {
                write!(f, "Mesh '{}' has no UV set named '{}'", mesh, uv_set)
            }
            IngestError::FileNotFound(path) => write!(f, "Mesh file not found: {}", path.display()),
            IngestError::UnsupportedFormat(msg) => write!(f, "Unsupported input format: {}", msg),
            IngestError::ParseError(msg) => write!(f, "Failed to parse mesh: {}", msg),
        }
    }
}

impl fmt::Display for MalformedFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Face {} is not a triangle or has mismatched vertex/UV count ({} vertices, {} UVs)",
            self.face_index, self.vertex_count, self.uv_count
        )
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::EmptyMesh { faces, vertices } => write!(
                f,
                "Nothing to export: {} face indices, {} unique vertices",
                faces, vertices
            ),
        }
    }
}

impl fmt::Display for InterchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterchangeError::InputNotFound(path) => {
                write!(f, "Input file not found: {}", path.display())
            }
            InterchangeError::InvalidFormat(msg) => write!(f, "Not a valid mesh JSON file: {}", msg),
            InterchangeError::Validation(msg) => write!(f, "Mesh data rejected: {}", msg),
        }
    }
}

impl std::error::Error for MeshConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeshConvertError::Io(e) => Some(e),
            MeshConvertError::OutputWrite { source, .. } => Some(source),
            MeshConvertError::Config(e) => Some(e),
            MeshConvertError::Ingest(e) => Some(e),
            MeshConvertError::Conversion(e) => Some(e),
            MeshConvertError::Interchange(e) => Some(e),
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for IngestError {}
impl std::error::Error for MalformedFace {}
impl std::error::Error for ConversionError {}
impl std::error::Error for InterchangeError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for MeshConvertError {
    fn from(err: std::io::Error) -> Self {
        MeshConvertError::Io(err)
    }
}

impl From<ConfigError> for MeshConvertError {
    fn from(err: ConfigError) -> Self {
        MeshConvertError::Config(err)
    }
}

impl From<IngestError> for MeshConvertError {
    fn from(err: IngestError) -> Self {
        MeshConvertError::Ingest(err)
    }
}

impl From<ConversionError> for MeshConvertError {
    fn from(err: ConversionError) -> Self {
        MeshConvertError::Conversion(err)
    }
}

impl From<InterchangeError> for MeshConvertError {
    fn from(err: InterchangeError) -> Self {
        MeshConvertError::Interchange(err)
    }
}
