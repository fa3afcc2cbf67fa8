/// OBJ 文件加载器
///
/// 使用 tobj crate 加载 Wavefront OBJ 格式的场景。
/// 不做三角化，位置和 UV 保持各自的索引，这样每个面的
/// 顶点 id / UV id 与建模软件导出时完全一致。
use super::SceneLoader;
use crate::core::error::{IngestError, Result};
use crate::geometry::scene::{Polygon, Scene, SceneMesh, UvSet};
use std::io::BufReader;
use std::path::Path;

/// OBJ 文件里唯一的纹理坐标通道对外使用的名字
pub const OBJ_UV_SET: &str = "map1";

/// OBJ 格式加载器
///
/// # 特性
///
/// - 每个 `o`/`g` 分组对应场景中的一个网格
/// - 点和线元素被忽略
/// - 多边形保持原样，由组装阶段负责检查是否为三角形
pub struct ObjLoader;

impl ObjLoader {
    fn load_options() -> tobj::LoadOptions {
        tobj::LoadOptions {
            triangulate: false,   // 三角化由建模软件完成
            single_index: false,  // 位置和 UV 各自索引
            ignore_points: true,
            ignore_lines: true,
            ..Default::default()
        }
    }

    fn scene_from_models(models: Vec<tobj::Model>) -> Result<Scene> {
        let meshes = models
            .into_iter()
            .map(mesh_from_model)
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(meshes = meshes.len(), "OBJ scene loaded");
        Ok(Scene::new(meshes))
    }
}

impl SceneLoader for ObjLoader {
    fn load_from_file(path: &Path) -> Result<Scene> {
        if !path.exists() {
            return Err(IngestError::FileNotFound(path.to_path_buf()).into());
        }

        let (models, _materials) = tobj::load_obj(path, &Self::load_options())
            .map_err(|e| IngestError::ParseError(format!("tobj 解析失败: {}", e)))?;

        Self::scene_from_models(models)
    }

    fn load_from_memory(data: &[u8]) -> Result<Scene> {
        let mut reader = BufReader::new(data);

        // 内存数据没有可解析的 mtl 路径，材质一律不加载
        let (models, _materials) = tobj::load_obj_buf(&mut reader, &Self::load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })
        .map_err(|e| IngestError::ParseError(format!("tobj 解析失败: {}", e)))?;

        Self::scene_from_models(models)
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["obj"]
    }
}

fn mesh_from_model(model: tobj::Model) -> Result<SceneMesh> {
    let mesh = model.mesh;

    if mesh.positions.len() % 3 != 0 {
        return Err(IngestError::ParseError(format!(
            "顶点位置数据不完整: {} 个浮点数",
            mesh.positions.len()
        ))
        .into());
    }

    let points = mesh
        .positions
        .chunks_exact(3)
        .map(|p| [p[0], p[1], p[2]])
        .collect();
    let coords = mesh
        .texcoords
        .chunks_exact(2)
        .map(|t| [t[0], t[1]])
        .collect();

    // 没有 face_arities 时所有面都是三角形
    let arities: Vec<usize> = if mesh.face_arities.is_empty() {
        vec![3; mesh.indices.len() / 3]
    } else {
        mesh.face_arities.iter().map(|&a| a as usize).collect()
    };
    let has_uv_indices = mesh.texcoord_indices.len() == mesh.indices.len();

    let mut polygons = Vec::with_capacity(arities.len());
    let mut offset = 0;
    for arity in arities {
        let range = offset..offset + arity;
        let vertex_ids = mesh.indices.get(range.clone()).ok_or_else(|| {
            IngestError::ParseError(format!("面索引越界: 模型 '{}'", model.name))
        })?;
        let uv_ids = if has_uv_indices {
            mesh.texcoord_indices[range].to_vec()
        } else {
            Vec::new()
        };

        polygons.push(Polygon::new(vertex_ids.to_vec(), uv_ids));
        offset += arity;
    }

    Ok(SceneMesh {
        name: model.name,
        points,
        uv_sets: vec![UvSet { name: OBJ_UV_SET.to_string(), coords }],
        polygons,
    })
}
