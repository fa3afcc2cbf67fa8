/// 导出模块
///
/// 把网格记录写成两种产物：
///
/// - `interchange`: JSON 中间交换文件（`faces_count`/`faces`/`vertex_count`/`vertices`/`sts`）
/// - `static_table`: 目标平台构建直接编译的 C 静态数组
///
/// # 输出路径策略
///
/// - 目标是已存在的目录时，改写为目录下的默认文件名，不报错
/// - 父目录不存在时先创建
/// - 整个文档一次性写出，不做流式或原子写入
use crate::core::error::{MeshConvertError, Result};
use std::path::{Path, PathBuf};

pub mod interchange;
pub mod static_table;

pub use interchange::{read_interchange, save_interchange, write_interchange, InterchangeDocument};
pub use static_table::{export_static_table, write_static_table, StaticTableWriter};

/// 解析最终的输出文件路径
///
/// # 示例
///
/// ```rust,no_run
/// use ps2_mesh::export::resolve_output_path;
/// use std::path::Path;
///
/// // "build" 是已存在的目录时得到 "build/mesh_data.c"
/// let path = resolve_output_path(Path::new("build"), "mesh_data.c");
/// ```
pub fn resolve_output_path(path: &Path, default_filename: &str) -> PathBuf {
    if path.is_dir() {
        let redirected = path.join(default_filename);
        crate::pipeline_warn!(
            "Output path '{}' is a directory. Automatically saving as '{}'.",
            path.display(),
            redirected.display()
        );
        redirected
    } else {
        path.to_path_buf()
    }
}

/// 写出完整文档，必要时创建父目录
///
/// 写入失败时已经创建的目录保留不动。
pub fn write_document(path: &Path, contents: &str) -> Result<()> {
    let output_write = |source| MeshConvertError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir).map_err(output_write)?;
            crate::pipeline_info!("Created output directory: {}", dir.display());
        }
    }

    std::fs::write(path, contents).map_err(output_write)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_is_redirected() {
        let dir = tempfile::tempdir().unwrap();

        let resolved = resolve_output_path(dir.path(), "mesh_data.c");
        assert_eq!(resolved, dir.path().join("mesh_data.c"));
    }

    #[test]
    fn test_file_path_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("cube.c");

        assert_eq!(resolve_output_path(&target, "mesh_data.c"), target);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("deeper").join("mesh.c");

        write_document(&target, "int x;\n").unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "int x;\n");
    }

    #[test]
    fn test_write_failure_is_output_write() {
        let dir = tempfile::tempdir().unwrap();

        // 目录本身不能作为文件写入
        let result = write_document(dir.path(), "data");
        assert!(matches!(result, Err(MeshConvertError::OutputWrite { .. })));
    }
}
