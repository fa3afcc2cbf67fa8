/// 网格记录模块
///
/// 定义组装完成后的 CPU 侧网格记录：三角形索引列表加上
/// 按唯一顶点顺序排列的位置和 UV 数组。

use super::vertex::UniqueVertex;

/// 去重后的网格记录
///
/// # 不变量
///
/// - `face_count == face_indices.len()`，且是 3 的倍数
/// - `vertex_count == vertices.len() == uvs.len()`
/// - `face_indices` 中每个值都小于 `vertex_count`
/// - 所有位置和 UV 分量都是有限值
///
/// 注意 `face_count` 沿用目标平台的叫法，是索引个数而不是三角形个数。
///
/// # 示例
///
/// ```rust
/// use ps2_mesh::geometry::mesh::MeshRecord;
///
/// let mesh = MeshRecord::new(
///     vec![0, 1, 2],
///     vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
///     vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
/// );
/// assert_eq!(mesh.triangle_count(), 1);
/// assert!(mesh.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MeshRecord {
    /// 索引个数
    pub face_count: u32,

    /// 三角形索引，每 3 个一组，保持原始绕序
    pub face_indices: Vec<u32>,

    /// 唯一顶点个数
    pub vertex_count: u32,

    /// 顶点位置
    pub vertices: Vec<[f64; 3]>,

    /// 纹理坐标，与 `vertices` 一一对应
    pub uvs: Vec<[f64; 2]>,
}

impl MeshRecord {
    /// 由索引和顶点数组创建，计数字段根据数组长度填写
    pub fn new(face_indices: Vec<u32>, vertices: Vec<[f64; 3]>, uvs: Vec<[f64; 2]>) -> Self {
        Self {
            face_count: face_indices.len() as u32,
            face_indices,
            vertex_count: vertices.len() as u32,
            vertices,
            uvs,
        }
    }

    /// 由去重器输出的唯一顶点列表创建
    pub fn from_unique_vertices(face_indices: Vec<u32>, unique_vertices: &[UniqueVertex]) -> Self {
        let vertices = unique_vertices.iter().map(|v| v.position).collect();
        let uvs = unique_vertices.iter().map(|v| v.uv).collect();
        Self::new(face_indices, vertices, uvs)
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.face_indices.len() / 3
    }

    /// 按三角形遍历索引
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.face_indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// 验证网格记录的不变量
    ///
    /// # 返回
    ///
    /// - `Ok(())`: 数据有效
    /// - `Err(String)`: 第一个被违反的不变量
    pub fn validate(&self) -> Result<(), String> {
        if self.face_count as usize != self.face_indices.len() {
            return Err(format!(
                "face_count ({}) 与索引数量 ({}) 不一致",
                self.face_count,
                self.face_indices.len()
            ));
        }

        if self.face_indices.len() % 3 != 0 {
            return Err(format!("索引数量 ({}) 不是3的倍数", self.face_indices.len()));
        }

        if self.vertex_count as usize != self.vertices.len() || self.vertices.len() != self.uvs.len() {
            return Err(format!(
                "vertex_count ({}) 与顶点数量 ({}) 或 UV 数量 ({}) 不一致",
                self.vertex_count,
                self.vertices.len(),
                self.uvs.len()
            ));
        }

        if let Some(i) = self
            .face_indices
            .iter()
            .position(|&index| index >= self.vertex_count)
        {
            return Err(format!(
                "索引 {} 的值 {} 超出顶点范围 (顶点数: {})",
                i, self.face_indices[i], self.vertex_count
            ));
        }

        // JSON 无法表示 NaN/Inf，写出后读不回来
        if let Some(i) = self.vertices.iter().position(|p| !p.iter().all(|v| v.is_finite())) {
            return Err(format!("顶点 {} 的位置 {:?} 不是有限值", i, self.vertices[i]));
        }
        if let Some(i) = self.uvs.iter().position(|uv| !uv.iter().all(|v| v.is_finite())) {
            return Err(format!("顶点 {} 的 UV {:?} 不是有限值", i, self.uvs[i]));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> MeshRecord {
        MeshRecord::new(
            vec![0, 1, 2, 0, 1, 3],
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
            vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]],
        )
    }

    #[test]
    fn test_counts_follow_arrays() {
        let mesh = quad();

        assert_eq!(mesh.face_count, 6);
        assert_eq!(mesh.vertex_count, 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[0, 1, 2], [0, 1, 3]]);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_from_unique_vertices() {
        let vertices = [
            UniqueVertex { index: 0, position: [0.0, 0.0, 0.0], uv: [0.0, 0.0] },
            UniqueVertex { index: 1, position: [1.0, 0.0, 0.0], uv: [1.0, 0.0] },
            UniqueVertex { index: 2, position: [0.0, 1.0, 0.0], uv: [0.0, 1.0] },
        ];
        let mesh = MeshRecord::from_unique_vertices(vec![2, 1, 0], &vertices);

        assert_eq!(mesh.vertices[1], [1.0, 0.0, 0.0]);
        assert_eq!(mesh.uvs[2], [0.0, 1.0]);
        assert_eq!(mesh.face_indices, vec![2, 1, 0]);
    }

    #[test]
    fn test_validation_invalid_index_count() {
        let mut mesh = quad();
        mesh.face_indices.pop();
        mesh.face_count = 5;

        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_index_range() {
        let mut mesh = quad();
        mesh.face_indices[5] = 9;

        let result = mesh.validate();
        assert!(result.unwrap_err().contains("超出顶点范围"));
    }

    #[test]
    fn test_validation_non_finite() {
        let mut mesh = quad();
        mesh.vertices[2][0] = f64::NAN;
        assert!(mesh.validate().unwrap_err().contains("顶点 2"));

        let mut mesh = quad();
        mesh.uvs[3][1] = f64::INFINITY;
        assert!(mesh.validate().unwrap_err().contains("顶点 3"));
    }

    #[test]
    fn test_validation_uv_mismatch() {
        let mut mesh = quad();
        mesh.uvs.pop();

        assert!(mesh.validate().is_err());
    }
}
