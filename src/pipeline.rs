//! 转换流水线
//!
//! 一次调用完成整个转换：读取 → 去重 → 组装 → 写出，全程单线程同步执行。
//!
//! ```text
//! model.obj ──► Scene ──► FaceRecords ──► MeshAssembler ──► MeshRecord
//!                                                              │
//!                     mesh_data.json ◄── InterchangeDocument ◄─┤
//!                     mesh_data.c    ◄── StaticTableWriter   ◄─┘
//! mesh_data.json ──► InterchangeDocument ──► StaticTableWriter ──► mesh_data.c
//! ```

use std::path::{Path, PathBuf};

use crate::core::config::Config;
use crate::core::error::{IngestError, Result};
use crate::export::{self, InterchangeDocument};
use crate::geometry::assembler::{assemble, AssembledMesh};
use crate::geometry::loaders::{self, lowercase_extension};
use crate::geometry::quantize::Quantizer;
use crate::geometry::scene::Scene;

/// 写出的产物类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// JSON 中间交换文件
    Interchange,
    /// C 静态数组
    StaticTable,
}

/// 一次转换的结果摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    /// 实际写入的文件
    pub output: PathBuf,
    pub kind: OutputKind,
    pub face_count: u32,
    pub vertex_count: u32,
    /// 被跳过的坏面数量
    pub skipped_faces: usize,
}

/// 执行一次转换
///
/// - 输入为 `.json`：读取交换文件并生成 C 静态数组
/// - 输入为网格文件：去重组装后，输出为 `.json` 时写交换文件，否则写 C 静态数组
pub fn convert(input: &Path, output: &Path, config: &Config) -> Result<ConversionSummary> {
    crate::pipeline_info!(
        "Starting conversion from '{}' to '{}'...",
        input.display(),
        output.display()
    );

    if lowercase_extension(input).as_deref() == Some("json") {
        let document = export::read_interchange(input)?;
        let path = export::export_static_table(&document, output, &config.output)?;
        return Ok(ConversionSummary {
            output: path,
            kind: OutputKind::StaticTable,
            face_count: document.faces_count,
            vertex_count: document.vertex_count,
            skipped_faces: 0,
        });
    }

    if !loaders::is_supported(input) {
        return Err(IngestError::UnsupportedFormat(format!(
            "'{}' is neither a mesh file nor a mesh JSON file",
            input.display()
        ))
        .into());
    }

    let scene = loaders::load_scene(input)?;
    let assembled = assemble_scene(&scene, config)?;
    let mesh = &assembled.mesh;

    let (path, kind) = if lowercase_extension(output).as_deref() == Some("json") {
        let path = export::save_interchange(mesh, output, &config.output)?;
        (path, OutputKind::Interchange)
    } else {
        let document = InterchangeDocument::from(mesh);
        let path = export::export_static_table(&document, output, &config.output)?;
        (path, OutputKind::StaticTable)
    };

    Ok(ConversionSummary {
        output: path,
        kind,
        face_count: mesh.face_count,
        vertex_count: mesh.vertex_count,
        skipped_faces: assembled.skipped_faces.len(),
    })
}

/// 选中场景中的网格并组装
///
/// 选中失败或组装后为空都会中止转换，此时不写出任何文件。
pub fn assemble_scene(scene: &Scene, config: &Config) -> Result<AssembledMesh> {
    let mesh = scene.select(config.conversion.selected_object())?;
    crate::pipeline_debug!(
        mesh = %mesh.name,
        points = mesh.points.len(),
        polygons = mesh.polygons.len(),
        "Selected mesh"
    );

    let faces = mesh.face_records(&config.conversion.uv_set)?;
    let quantizer = Quantizer::new(config.conversion.precision_decimals);
    let assembled = assemble(faces, quantizer)?;

    crate::pipeline_info!(
        mesh = %mesh.name,
        unique_vertices = assembled.mesh.vertex_count,
        face_indices = assembled.mesh.face_count,
        skipped_faces = assembled.skipped_faces.len(),
        "Mesh assembled"
    );
    Ok(assembled)
}
