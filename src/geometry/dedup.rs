/// 顶点去重模块
///
/// 对面-顶点属性流做去重：每个量化键第一次出现时分配一个新索引，
/// 之后再出现直接返回已有索引。唯一顶点列表只追加不修改，
/// 其顺序就是各个键第一次出现的顺序。

use std::collections::HashMap;

use super::quantize::Quantizer;
use super::vertex::{AttributeTuple, QuantizedKey, UniqueVertex};

/// 顶点去重器
///
/// # 示例
///
/// ```rust
/// use ps2_mesh::geometry::dedup::VertexDeduplicator;
/// use ps2_mesh::geometry::vertex::AttributeTuple;
///
/// let mut dedup = VertexDeduplicator::default();
/// let a = dedup.intern(AttributeTuple::new([0.0, 0.0, 0.0], [0.0, 0.0]));
/// let b = dedup.intern(AttributeTuple::new([1.0, 0.0, 0.0], [1.0, 0.0]));
/// let again = dedup.intern(AttributeTuple::new([0.0, 0.0, 0.0], [0.0, 0.0]));
///
/// assert_eq!((a, b, again), (0, 1, 0));
/// assert_eq!(dedup.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct VertexDeduplicator {
    quantizer: Quantizer,
    unique_vertices: Vec<UniqueVertex>,
    key_to_index: HashMap<QuantizedKey, u32>,
}

impl VertexDeduplicator {
    pub fn new(quantizer: Quantizer) -> Self {
        Self {
            quantizer,
            unique_vertices: Vec::new(),
            key_to_index: HashMap::new(),
        }
    }

    /// 返回属性对应的唯一顶点索引，必要时创建新顶点
    ///
    /// 新顶点保存的是未量化的原始属性，量化只用于判断是否相同。
    pub fn intern(&mut self, tuple: AttributeTuple) -> u32 {
        let key = self.quantizer.quantize(&tuple);

        if let Some(&index) = self.key_to_index.get(&key) {
            return index;
        }

        let index = self.unique_vertices.len() as u32;
        self.unique_vertices.push(UniqueVertex::from_tuple(index, &tuple));
        self.key_to_index.insert(key, index);
        index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.unique_vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.unique_vertices.is_empty()
    }

    #[inline]
    pub fn unique_vertices(&self) -> &[UniqueVertex] {
        &self.unique_vertices
    }

    /// 取出唯一顶点列表，结束去重
    pub fn into_vertices(self) -> Vec<UniqueVertex> {
        self.unique_vertices
    }
}
