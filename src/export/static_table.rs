//! C 静态数组写出
//!
//! 生成可直接加入 PS2DEV 工程编译的 C 源文件：
//!
//! - 文件头注释（作者名来自配置）
//! - 头文件保护宏
//! - `faces_count` / `faces[]`：扁平的三角形索引，每行 3 个
//! - `vertex_count` / `vertices[]`：位置补第 4 分量 1.0
//! - `sts[]`：UV 补 (1.0, 0.0)
//!
//! 所有浮点数固定 6 位小数。除每个数组的最后一个元素外都以逗号结尾。

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::config::OutputConfig;
use crate::core::error::Result;
use super::interchange::InterchangeDocument;

const BANNER: [&str; 5] = [
    "/*",
    "# _____     ___ ____     ___ ____",
    "#  ____|   |    ____|   |        | |____|",
    "# |     ___|   |____ ___|    ____| |    \\    PS2DEV Open Source Project.",
    "#-----------------------------------------------------------------------",
];

/// 静态数组写出器
///
/// # 示例
///
/// ```rust
/// use ps2_mesh::core::config::OutputConfig;
/// use ps2_mesh::export::{InterchangeDocument, StaticTableWriter};
///
/// let document = InterchangeDocument {
///     faces_count: 3,
///     faces: vec![0, 1, 2],
///     vertex_count: 3,
///     vertices: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
///     sts: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
/// };
/// let config = OutputConfig::default();
/// let source = StaticTableWriter::new(&config).render(&document)?;
/// assert!(source.contains("int faces[3] = {"));
/// # Ok::<(), ps2_mesh::core::MeshConvertError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StaticTableWriter<'a> {
    config: &'a OutputConfig,
}

impl<'a> StaticTableWriter<'a> {
    pub fn new(config: &'a OutputConfig) -> Self {
        Self { config }
    }

    /// 生成完整的 C 源文本
    ///
    /// 文档未通过校验时返回错误，不生成任何内容。
    pub fn render(&self, document: &InterchangeDocument) -> Result<String> {
        document.validate()?;

        let guard = &self.config.include_guard;
        let vector = &self.config.vector_type;
        let faces_count = document.faces.len();
        let vertex_count = document.vertices.len();

        let mut lines: Vec<String> = BANNER.iter().map(|line| line.to_string()).collect();
        lines.push(format!("# Generated from 3D model data by {}", self.config.banner_author));
        lines.push("*/".to_string());
        lines.push(String::new());

        lines.push(format!("#ifndef {}", guard));
        lines.push(format!("#define {}", guard));
        lines.push(String::new());

        lines.push(format!("int faces_count = {};", faces_count));
        lines.push(String::new());
        lines.push("/**".to_string());
        lines.push(" * Array of vertex indexes.".to_string());
        lines.push(" * 3 faces = 1 triangle".to_string());
        lines.push(" */".to_string());
        lines.push(format!("int faces[{}] = {{", faces_count));
        let triangle_count = faces_count / 3;
        for (i, triangle) in document.faces.chunks(3).enumerate() {
            let values: Vec<String> = triangle.iter().map(u32::to_string).collect();
            lines.push(format!("    {}{}", values.join(", "), separator(i, triangle_count)));
        }
        lines.push("};".to_string());
        lines.push(String::new());

        lines.push(format!("int vertex_count = {};", vertex_count));
        lines.push(String::new());
        lines.push(format!("{} vertices[{}] = {{", vector, vertex_count));
        for (i, [x, y, z]) in document.vertices.iter().enumerate() {
            lines.push(format!(
                "    {{ {}, {}, {}, {} }}{}",
                float(*x),
                float(*y),
                float(*z),
                float(1.0),
                separator(i, vertex_count)
            ));
        }
        lines.push("};".to_string());
        lines.push(String::new());

        lines.push("/** Texture coordinates */".to_string());
        lines.push(format!("{} sts[{}] = {{", vector, vertex_count));
        for (i, [s, t]) in document.sts.iter().enumerate() {
            lines.push(format!(
                "    {{ {}, {}, {}, {} }}{}",
                float(*s),
                float(*t),
                float(1.0),
                float(0.0),
                separator(i, vertex_count)
            ));
        }
        lines.push("};".to_string());
        lines.push(String::new());

        lines.push(format!("#endif // {}", guard));
        lines.push(String::new());

        Ok(lines.join("\n"))
    }

    /// 生成并写入到任意输出
    pub fn write<W: Write>(&self, document: &InterchangeDocument, sink: &mut W) -> Result<()> {
        let source = self.render(document)?;
        sink.write_all(source.as_bytes())?;
        sink.flush()?;
        Ok(())
    }
}

#[inline]
fn float(value: f64) -> String {
    format!("{:.6}f", value)
}

#[inline]
fn separator(index: usize, len: usize) -> &'static str {
    if index + 1 < len {
        ","
    } else {
        ""
    }
}

/// 把交换文档写成静态数组
pub fn write_static_table<W: Write>(
    document: &InterchangeDocument,
    config: &OutputConfig,
    sink: &mut W,
) -> Result<()> {
    StaticTableWriter::new(config).write(document, sink)
}

/// 写出静态数组文件，返回实际写入的路径
///
/// 先在内存中生成完整文本，校验失败时不会创建任何文件或目录。
pub fn export_static_table(
    document: &InterchangeDocument,
    path: &Path,
    config: &OutputConfig,
) -> Result<PathBuf> {
    let source = StaticTableWriter::new(config).render(document)?;

    let path = super::resolve_output_path(path, &config.default_filename);
    let has_c_extension = crate::geometry::loaders::lowercase_extension(&path)
        .map(|ext| ext == "c" || ext == "h")
        .unwrap_or(false);
    if !has_c_extension {
        crate::pipeline_warn!(
            "Output file '{}' does not have a .c or .h extension. Proceeding anyway.",
            path.display()
        );
    }

    super::write_document(&path, &source)?;
    crate::pipeline_info!("Successfully generated C mesh data to: {}", path.display());
    Ok(path)
}
