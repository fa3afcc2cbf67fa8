/// 几何处理模块
///
/// 把场景中的多边形面转换成去重后的网格记录。
///
/// # 模块结构
///
/// - `vertex`: 原始属性、量化键和唯一顶点
/// - `quantize`: 属性量化
/// - `dedup`: 顶点去重
/// - `mesh`: 网格记录
/// - `assembler`: 逐面组装
/// - `scene`: 场景数据抽象
/// - `loaders`: 各种格式的场景加载器
///
/// # 数据流
///
/// ```text
/// 文件 (OBJ)
///     ↓
/// Loader (ObjLoader) → Scene
///     ↓
/// FaceRecords (每个面的位置 + UV)
///     ↓
/// Quantizer → VertexDeduplicator → MeshAssembler
///     ↓
/// MeshRecord
/// ```

pub mod vertex;
pub mod quantize;
pub mod dedup;
pub mod mesh;
pub mod assembler;
pub mod scene;
pub mod loaders;

// 重新导出常用类型
pub use vertex::{AttributeTuple, QuantizedKey, UniqueVertex};
pub use quantize::Quantizer;
pub use dedup::VertexDeduplicator;
pub use mesh::MeshRecord;
pub use assembler::{assemble, AssembledMesh, MeshAssembler};
pub use scene::{FaceRecord, Scene, SceneMesh};
