/// 顶点属性定义模块
///
/// 定义去重流水线中的三种顶点形态：
/// - `AttributeTuple`：遍历面时得到的原始属性（位置 + UV），用完即弃
/// - `QuantizedKey`：量化后的去重键，相等即视为同一个顶点
/// - `UniqueVertex`：去重后的唯一顶点，保留未量化的完整精度

/// 单个面-顶点的原始属性
///
/// # 示例
///
/// ```rust
/// use ps2_mesh::geometry::vertex::AttributeTuple;
///
/// let tuple = AttributeTuple::new([1.0, 0.0, 0.0], [1.0, 0.0]);
/// assert_eq!(tuple.uv, [1.0, 0.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AttributeTuple {
    /// 世界空间位置 (x, y, z)
    pub position: [f64; 3],

    /// 纹理坐标 (u, v)
    pub uv: [f64; 2],
}

impl AttributeTuple {
    #[inline]
    pub fn new(position: [f64; 3], uv: [f64; 2]) -> Self {
        Self { position, uv }
    }
}

/// 量化后的去重键
///
/// 每个分量为 `round(value * 10^precision)`，只用作映射键。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuantizedKey {
    pub position: [i64; 3],
    pub uv: [i64; 2],
}

/// 去重后的唯一顶点
///
/// `index` 按首次出现的顺序从 0 开始分配，创建后不再改变。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniqueVertex {
    pub index: u32,
    pub position: [f64; 3],
    pub uv: [f64; 2],
}

impl UniqueVertex {
    /// 由未量化的属性创建唯一顶点
    #[inline]
    pub fn from_tuple(index: u32, tuple: &AttributeTuple) -> Self {
        Self {
            index,
            position: tuple.position,
            uv: tuple.uv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_vertex_keeps_full_precision() {
        let tuple = AttributeTuple::new([0.123456789, 1.0, -2.5], [0.987654321, 0.5]);
        let vertex = UniqueVertex::from_tuple(3, &tuple);

        assert_eq!(vertex.index, 3);
        assert_eq!(vertex.position, [0.123456789, 1.0, -2.5]);
        assert_eq!(vertex.uv, [0.987654321, 0.5]);
    }

    #[test]
    fn test_attribute_tuple_default() {
        let tuple = AttributeTuple::default();
        assert_eq!(tuple.position, [0.0, 0.0, 0.0]);
        assert_eq!(tuple.uv, [0.0, 0.0]);
    }
}
