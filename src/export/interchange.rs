//! JSON 中间交换格式
//!
//! 连接导出前后两个阶段的磁盘契约：
//!
//! ```json
//! {
//!   "faces_count": 6,
//!   "faces": [0, 1, 2, 0, 1, 3],
//!   "vertex_count": 4,
//!   "vertices": [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
//!   "sts": [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]
//! }
//! ```
//!
//! 浮点数按 `serde_json` 的最短往返表示写出，读回后与写入前完全一致。

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::config::OutputConfig;
use crate::core::error::{InterchangeError, Result};
use crate::geometry::mesh::MeshRecord;

/// 中间交换文档
///
/// 缺失的字段按空值处理，由 `validate` 统一拒绝。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InterchangeDocument {
    #[serde(default)]
    pub faces_count: u32,

    #[serde(default)]
    pub faces: Vec<u32>,

    #[serde(default)]
    pub vertex_count: u32,

    #[serde(default)]
    pub vertices: Vec<[f64; 3]>,

    /// 纹理坐标
    #[serde(default)]
    pub sts: Vec<[f64; 2]>,
}

impl From<&MeshRecord> for InterchangeDocument {
    fn from(record: &MeshRecord) -> Self {
        Self {
            faces_count: record.face_count,
            faces: record.face_indices.clone(),
            vertex_count: record.vertex_count,
            vertices: record.vertices.clone(),
            sts: record.uvs.clone(),
        }
    }
}

impl InterchangeDocument {
    /// 解析 JSON 文本
    pub fn from_json(text: &str) -> std::result::Result<Self, InterchangeError> {
        serde_json::from_str(text).map_err(|e| InterchangeError::InvalidFormat(e.to_string()))
    }

    /// 生成缩进为 2 的 JSON 文本
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| InterchangeError::InvalidFormat(e.to_string()).into())
    }

    /// 转回网格记录
    pub fn to_mesh_record(&self) -> MeshRecord {
        MeshRecord {
            face_count: self.faces_count,
            face_indices: self.faces.clone(),
            vertex_count: self.vertex_count,
            vertices: self.vertices.clone(),
            uvs: self.sts.clone(),
        }
    }

    /// 检查文档能否生成静态数组
    ///
    /// 计数为 0、数组为空、计数与数组长度不符或索引越界都视为无效，
    /// 此时不写出任何内容。
    pub fn validate(&self) -> std::result::Result<(), InterchangeError> {
        if self.faces.is_empty()
            || self.vertices.is_empty()
            || self.sts.is_empty()
            || self.faces_count == 0
            || self.vertex_count == 0
        {
            return Err(InterchangeError::Validation(
                "Missing or empty mesh data (faces, vertices, or sts)".to_string(),
            ));
        }

        self.to_mesh_record()
            .validate()
            .map_err(InterchangeError::Validation)
    }
}

/// 把网格记录写成交换文档
///
/// 记录无效（包括含有 NaN/Inf 分量）时不写出任何内容。
pub fn write_interchange<W: Write>(record: &MeshRecord, sink: &mut W) -> Result<()> {
    record.validate().map_err(InterchangeError::Validation)?;
    let json = InterchangeDocument::from(record).to_json()?;
    sink.write_all(json.as_bytes())?;
    sink.flush()?;
    Ok(())
}

/// 读取交换文件
pub fn read_interchange(path: &Path) -> Result<InterchangeDocument> {
    if !path.is_file() {
        return Err(InterchangeError::InputNotFound(path.to_path_buf()).into());
    }

    let text = std::fs::read_to_string(path)?;
    let document = InterchangeDocument::from_json(&text)?;

    crate::pipeline_debug!(
        path = %path.display(),
        faces_count = document.faces_count,
        vertex_count = document.vertex_count,
        "Interchange file loaded"
    );
    Ok(document)
}

/// 把网格记录保存为交换文件，返回实际写入的路径
pub fn save_interchange(record: &MeshRecord, path: &Path, config: &OutputConfig) -> Result<PathBuf> {
    record.validate().map_err(InterchangeError::Validation)?;
    let path = super::resolve_output_path(path, &config.interchange_filename);

    let json = InterchangeDocument::from(record).to_json()?;
    super::write_document(&path, &json)?;

    crate::pipeline_info!("Mesh data exported successfully to: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::MeshConvertError;

    fn sample_record() -> MeshRecord {
        MeshRecord::new(
            vec![0, 1, 2, 0, 1, 3],
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.30000000000000004, -1.0e-7, 123.456789012345],
            ],
            vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.1 + 0.2, 1.0 / 3.0]],
        )
    }

    #[test]
    fn test_field_names() {
        let mut sink = Vec::new();
        write_interchange(&sample_record(), &mut sink).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&sink).unwrap();
        assert_eq!(value["faces_count"], 6);
        assert_eq!(value["vertex_count"], 4);
        assert_eq!(value["faces"].as_array().unwrap().len(), 6);
        assert_eq!(value["vertices"][1], serde_json::json!([1.0, 0.0, 0.0]));
        assert_eq!(value["sts"][2], serde_json::json!([0.0, 1.0]));
    }

    #[test]
    fn test_round_trip_is_exact() {
        let record = sample_record();
        let mut sink = Vec::new();
        write_interchange(&record, &mut sink).unwrap();

        let document = InterchangeDocument::from_json(std::str::from_utf8(&sink).unwrap()).unwrap();
        assert_eq!(document.to_mesh_record(), record);
    }

    #[test]
    fn test_missing_fields_fail_validation() {
        let document = InterchangeDocument::from_json("{\"faces\": [0, 1, 2]}").unwrap();

        assert_eq!(document.faces_count, 0);
        assert!(matches!(document.validate(), Err(InterchangeError::Validation(_))));
    }

    #[test]
    fn test_inconsistent_counts_fail_validation() {
        let mut document = InterchangeDocument::from(&sample_record());
        assert!(document.validate().is_ok());

        document.faces_count = 9;
        assert!(document.validate().is_err());

        let mut document = InterchangeDocument::from(&sample_record());
        document.sts.pop();
        assert!(document.validate().is_err());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            InterchangeDocument::from_json("{ not json"),
            Err(InterchangeError::InvalidFormat(_))
        ));
        assert!(matches!(
            InterchangeDocument::from_json("{\"faces\": [-1]}"),
            Err(InterchangeError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_interchange(Path::new("definitely_missing_mesh.json"));
        assert!(matches!(
            result,
            Err(MeshConvertError::Interchange(InterchangeError::InputNotFound(_)))
        ));
    }

    #[test]
    fn test_non_finite_values_are_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out").join("mesh.json");
        let mut record = sample_record();
        record.vertices[1][2] = f64::NAN;

        let result = save_interchange(&record, &target, &OutputConfig::default());
        match result {
            Err(MeshConvertError::Interchange(InterchangeError::Validation(msg))) => {
                assert!(msg.contains("顶点 1"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!target.exists());

        let mut sink = Vec::new();
        assert!(write_interchange(&record, &mut sink).is_err());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_save_into_directory() {
        let dir = tempfile::tempdir().unwrap();

        let path = save_interchange(&sample_record(), dir.path(), &OutputConfig::default()).unwrap();
        assert_eq!(path, dir.path().join("mesh_data.json"));
        assert_eq!(read_interchange(&path).unwrap().to_mesh_record(), sample_record());
    }
}
