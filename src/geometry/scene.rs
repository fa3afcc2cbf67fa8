/// 场景数据模块
///
/// 把建模软件的场景图抽象成纯数据：网格的点列表、按名字区分的 UV 通道，
/// 以及每个面的顶点 id / UV id 列表。转换核心只通过 `FaceRecords`
/// 这个一次性的惰性迭代器读取面数据，不依赖任何宿主 API。

use crate::core::error::IngestError;
use super::vertex::AttributeTuple;

/// 一个多边形面的原始 id 列表
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polygon {
    /// 按绕序排列的顶点 id
    pub vertex_ids: Vec<u32>,

    /// 与顶点一一对应的 UV id
    pub uv_ids: Vec<u32>,
}

impl Polygon {
    pub fn new(vertex_ids: Vec<u32>, uv_ids: Vec<u32>) -> Self {
        Self { vertex_ids, uv_ids }
    }
}

/// 命名的 UV 通道
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UvSet {
    pub name: String,
    pub coords: Vec<[f64; 2]>,
}

/// 场景中的一个网格对象
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneMesh {
    pub name: String,

    /// 世界空间点列表，按顶点 id 索引
    pub points: Vec<[f64; 3]>,

    pub uv_sets: Vec<UvSet>,

    pub polygons: Vec<Polygon>,
}

impl SceneMesh {
    /// 是否包含多边形数据
    pub fn is_polygonal(&self) -> bool {
        !self.polygons.is_empty()
    }

    pub fn uv_set(&self, name: &str) -> Option<&UvSet> {
        self.uv_sets.iter().find(|set| set.name == name)
    }

    /// 通过指定的 UV 通道解析出每个面的属性
    ///
    /// 无法解析的 id 会从面记录中丢掉，组装时该面会因为数量不符被跳过。
    pub fn face_records<'a>(&'a self, uv_set: &str) -> Result<FaceRecords<'a>, IngestError> {
        let set = self.uv_set(uv_set).ok_or_else(|| IngestError::MissingUvSet {
            mesh: self.name.clone(),
            uv_set: uv_set.to_string(),
        })?;

        Ok(FaceRecords {
            points: &self.points,
            uvs: &set.coords,
            polygons: self.polygons.iter(),
        })
    }
}

/// 一个面解析后的属性
///
/// 位置和 UV 分开存放，这样数量不一致的坏面也能如实表达。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FaceRecord {
    pub positions: Vec<[f64; 3]>,
    pub uvs: Vec<[f64; 2]>,
}

impl FaceRecord {
    pub fn new(positions: Vec<[f64; 3]>, uvs: Vec<[f64; 2]>) -> Self {
        Self { positions, uvs }
    }

    /// 由一组完整的属性创建
    pub fn from_tuples<I: IntoIterator<Item = AttributeTuple>>(tuples: I) -> Self {
        let (positions, uvs) = tuples.into_iter().map(|t| (t.position, t.uv)).unzip();
        Self { positions, uvs }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn uv_count(&self) -> usize {
        self.uvs.len()
    }

    /// 恰好 3 个顶点且 UV 数量一致
    #[inline]
    pub fn is_triangle(&self) -> bool {
        self.vertex_count() == 3 && self.uv_count() == 3
    }

    /// 按顶点顺序给出属性
    pub fn tuples(&self) -> impl Iterator<Item = AttributeTuple> + '_ {
        self.positions
            .iter()
            .zip(&self.uvs)
            .map(|(&position, &uv)| AttributeTuple::new(position, uv))
    }
}

/// 面记录迭代器
///
/// 有限、只能遍历一次，不可重新开始。
#[derive(Debug, Clone)]
pub struct FaceRecords<'a> {
    points: &'a [[f64; 3]],
    uvs: &'a [[f64; 2]],
    polygons: std::slice::Iter<'a, Polygon>,
}

impl Iterator for FaceRecords<'_> {
    type Item = FaceRecord;

    fn next(&mut self) -> Option<FaceRecord> {
        let polygon = self.polygons.next()?;

        let positions = polygon
            .vertex_ids
            .iter()
            .filter_map(|&id| self.points.get(id as usize).copied())
            .collect();
        let uvs = polygon
            .uv_ids
            .iter()
            .filter_map(|&id| self.uvs.get(id as usize).copied())
            .collect();

        Some(FaceRecord { positions, uvs })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.polygons.size_hint()
    }
}

/// 场景
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub meshes: Vec<SceneMesh>,
}

impl Scene {
    pub fn new(meshes: Vec<SceneMesh>) -> Self {
        Self { meshes }
    }

    /// 选中要导出的网格
    ///
    /// 指定名字时按名字查找，否则取第一个对象。
    pub fn select(&self, object: Option<&str>) -> Result<&SceneMesh, IngestError> {
        let mesh = match object {
            Some(name) => self.meshes.iter().find(|m| m.name == name).ok_or_else(|| {
                IngestError::NoSelection(format!("no object named '{}' in the scene", name))
            })?,
            None => self.meshes.first().ok_or_else(|| {
                IngestError::NoSelection("the scene contains no objects".to_string())
            })?,
        };

        if !mesh.is_polygonal() {
            return Err(IngestError::NotAMesh(mesh.name.clone()));
        }

        Ok(mesh)
    }
}
