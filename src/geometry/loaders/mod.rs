/// 场景加载器模块
///
/// 提供统一的场景读取接口和各种格式的具体实现。
/// 加载器只负责产出 `Scene` 纯数据，不修改源文件。
///
/// # 支持的格式
///
/// - **OBJ**: Wavefront OBJ 格式（使用 tobj crate）
///
/// # 使用示例
///
/// ```rust,no_run
/// use ps2_mesh::geometry::loaders::{SceneLoader, ObjLoader};
/// use std::path::Path;
///
/// let scene = ObjLoader::load_from_file(Path::new("model.obj"))?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
use crate::core::error::{IngestError, Result};
use crate::geometry::scene::Scene;
use std::path::Path;

pub mod obj_loader;

pub use obj_loader::ObjLoader;

/// 场景加载器 trait
///
/// 所有格式的加载器都实现此 trait，加载器本身无状态。
pub trait SceneLoader {
    /// 从文件路径加载场景
    ///
    /// # 错误
    ///
    /// - 文件不存在或无法读取
    /// - 文件格式错误或损坏
    fn load_from_file(path: &Path) -> Result<Scene>;

    /// 从内存数据加载场景
    fn load_from_memory(data: &[u8]) -> Result<Scene>;

    /// 支持的文件扩展名列表（小写，不含点号）
    fn supported_extensions() -> &'static [&'static str];
}

/// 是否有加载器能处理该扩展名
pub fn is_supported(path: &Path) -> bool {
    lowercase_extension(path)
        .map(|ext| ObjLoader::supported_extensions().contains(&ext.as_str()))
        .unwrap_or(false)
}

/// 根据文件扩展名选择合适的加载器
pub fn load_scene(path: &Path) -> Result<Scene> {
    let extension = lowercase_extension(path).ok_or_else(|| {
        IngestError::UnsupportedFormat(format!("cannot determine the extension of '{}'", path.display()))
    })?;

    match extension.as_str() {
        "obj" => ObjLoader::load_from_file(path),
        _ => Err(IngestError::UnsupportedFormat(format!(".{}", extension)).into()),
    }
}

pub(crate) fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::MeshConvertError;

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported(Path::new("model.OBJ")));
        assert!(!is_supported(Path::new("model.fbx")));
        assert!(!is_supported(Path::new("model")));
    }

    #[test]
    fn test_unsupported_format() {
        let result = load_scene(Path::new("model.fbx"));
        assert!(matches!(
            result,
            Err(MeshConvertError::Ingest(IngestError::UnsupportedFormat(_)))
        ));
    }
}
