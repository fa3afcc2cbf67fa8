/// 网格组装模块
///
/// 按输入顺序遍历面记录：三角形面的 3 个顶点依次去重并追加索引，
/// 坏面记录一条警告后跳过，不中止整个转换。
/// 全部处理完后如果没有任何索引或顶点，则报告空网格。

use crate::core::error::{ConversionError, MalformedFace};
use super::dedup::VertexDeduplicator;
use super::mesh::MeshRecord;
use super::quantize::Quantizer;
use super::scene::FaceRecord;

/// 组装结果
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledMesh {
    pub mesh: MeshRecord,

    /// 被跳过的坏面，按输入顺序
    pub skipped_faces: Vec<MalformedFace>,
}

/// 增量式网格组装器
#[derive(Debug, Clone, Default)]
pub struct MeshAssembler {
    dedup: VertexDeduplicator,
    face_indices: Vec<u32>,
    skipped_faces: Vec<MalformedFace>,
    next_face: usize,
}

impl MeshAssembler {
    pub fn new(quantizer: Quantizer) -> Self {
        Self {
            dedup: VertexDeduplicator::new(quantizer),
            ..Default::default()
        }
    }

    /// 处理下一个面
    ///
    /// 坏面返回 `Err` 并记入跳过列表，组装器状态保持可用。
    pub fn push_face(&mut self, face: &FaceRecord) -> Result<(), MalformedFace> {
        let face_index = self.next_face;
        self.next_face += 1;

        if !face.is_triangle() {
            let malformed = MalformedFace {
                face_index,
                vertex_count: face.vertex_count(),
                uv_count: face.uv_count(),
            };
            crate::pipeline_warn!("{}. Skipping this face.", malformed);
            self.skipped_faces.push(malformed);
            return Err(malformed);
        }

        for tuple in face.tuples() {
            let index = self.dedup.intern(tuple);
            self.face_indices.push(index);
        }
        Ok(())
    }

    /// 结束组装，生成网格记录
    pub fn finish(self) -> Result<AssembledMesh, ConversionError> {
        if self.face_indices.is_empty() || self.dedup.is_empty() {
            return Err(ConversionError::EmptyMesh {
                faces: self.face_indices.len(),
                vertices: self.dedup.len(),
            });
        }

        crate::pipeline_debug!(
            faces = self.next_face,
            skipped = self.skipped_faces.len(),
            unique_vertices = self.dedup.len(),
            face_indices = self.face_indices.len(),
            "Finished iterating through faces"
        );

        let mesh = MeshRecord::from_unique_vertices(self.face_indices, self.dedup.unique_vertices());
        Ok(AssembledMesh {
            mesh,
            skipped_faces: self.skipped_faces,
        })
    }
}

/// 把一组面记录组装成网格记录
///
/// # 示例
///
/// ```rust
/// use ps2_mesh::geometry::assembler::assemble;
/// use ps2_mesh::geometry::quantize::Quantizer;
/// use ps2_mesh::geometry::scene::FaceRecord;
///
/// let face = FaceRecord::new(
///     vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
///     vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
/// );
/// let assembled = assemble(vec![face], Quantizer::default()).unwrap();
/// assert_eq!(assembled.mesh.face_indices, vec![0, 1, 2]);
/// ```
pub fn assemble<I>(faces: I, quantizer: Quantizer) -> Result<AssembledMesh, ConversionError>
where
    I: IntoIterator<Item = FaceRecord>,
{
    let mut assembler = MeshAssembler::new(quantizer);
    for face in faces {
        // 坏面已记录在组装器中
        let _ = assembler.push_face(&face);
    }
    assembler.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::vertex::AttributeTuple;

    const A: AttributeTuple = AttributeTuple { position: [0.0, 0.0, 0.0], uv: [0.0, 0.0] };
    const B: AttributeTuple = AttributeTuple { position: [1.0, 0.0, 0.0], uv: [1.0, 0.0] };
    const C: AttributeTuple = AttributeTuple { position: [0.0, 1.0, 0.0], uv: [0.0, 1.0] };
    const D: AttributeTuple = AttributeTuple { position: [1.0, 1.0, 0.0], uv: [1.0, 1.0] };

    fn face(tuples: &[AttributeTuple]) -> FaceRecord {
        FaceRecord::from_tuples(tuples.iter().copied())
    }

    #[test]
    fn test_shared_edge() {
        let assembled = assemble(vec![face(&[A, B, C]), face(&[A, B, D])], Quantizer::default()).unwrap();
        let mesh = assembled.mesh;

        assert_eq!(mesh.vertex_count, 4);
        assert_eq!(mesh.face_count, 6);
        assert_eq!(mesh.face_indices, vec![0, 1, 2, 0, 1, 3]);
        assert_eq!(mesh.vertices[3], D.position);
        assert_eq!(mesh.uvs[3], D.uv);
        assert!(assembled.skipped_faces.is_empty());
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_winding_is_preserved() {
        let mesh = assemble(vec![face(&[C, B, A]), face(&[A, B, C])], Quantizer::default())
            .unwrap()
            .mesh;

        assert_eq!(mesh.face_indices, vec![0, 1, 2, 2, 1, 0]);
        assert_eq!(mesh.vertices[0], C.position);
    }

    #[test]
    fn test_skips_quad_and_continues() {
        let faces = vec![face(&[A, B, C]), face(&[A, B, D, C]), face(&[B, D, C])];
        let assembled = assemble(faces, Quantizer::default()).unwrap();

        assert_eq!(assembled.mesh.face_count, 6);
        assert_eq!(
            assembled.skipped_faces,
            vec![MalformedFace { face_index: 1, vertex_count: 4, uv_count: 4 }]
        );
        assert!(assembled.mesh.validate().is_ok());
    }

    #[test]
    fn test_skips_uv_count_mismatch() {
        let mut bad = face(&[A, B, D]);
        bad.uvs.pop();

        let assembled = assemble(vec![bad, face(&[A, B, C])], Quantizer::default()).unwrap();

        assert_eq!(assembled.skipped_faces.len(), 1);
        assert_eq!(assembled.skipped_faces[0].uv_count, 2);
        // 跳过的面不会占用顶点索引
        assert_eq!(assembled.mesh.face_indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_input_rejected() {
        let result = assemble(Vec::new(), Quantizer::default());
        assert!(matches!(result, Err(ConversionError::EmptyMesh { faces: 0, vertices: 0 })));
    }

    #[test]
    fn test_all_faces_malformed_rejected() {
        let result = assemble(vec![face(&[A, B]), face(&[A, B, C, D])], Quantizer::default());
        assert!(matches!(result, Err(ConversionError::EmptyMesh { .. })));
    }

    #[test]
    fn test_push_face_reports_ordinal() {
        let mut assembler = MeshAssembler::new(Quantizer::default());

        assert!(assembler.push_face(&face(&[A, B, C])).is_ok());
        let err = assembler.push_face(&face(&[A])).unwrap_err();
        assert_eq!(err.face_index, 1);
        assert_eq!(err.vertex_count, 1);
    }

    #[test]
    fn test_indices_in_range() {
        let faces: Vec<FaceRecord> = (0..20)
            .map(|i| {
                let x = (i % 5) as f64;
                face(&[
                    AttributeTuple::new([x, 0.0, 0.0], [0.0, 0.0]),
                    AttributeTuple::new([x + 1.0, 0.0, 0.0], [1.0, 0.0]),
                    AttributeTuple::new([x, 1.0, 0.0], [0.0, 1.0]),
                ])
            })
            .collect();
        let mesh = assemble(faces, Quantizer::default()).unwrap().mesh;

        assert_eq!(mesh.face_count % 3, 0);
        assert!(mesh.face_indices.iter().all(|&i| i < mesh.vertex_count));
        assert_eq!(mesh.vertices.len(), mesh.uvs.len());
    }
}
