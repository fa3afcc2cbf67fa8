/// 属性量化模块
///
/// 浮点数直接比较相等并不可靠：同一个顶点从不同路径读取时可能得到
/// 位级不同的 double。量化把每个分量四舍五入到固定小数位，
/// 在容差范围内定义顶点的同一性。

use super::vertex::{AttributeTuple, QuantizedKey};

/// 默认保留的小数位数
pub const DEFAULT_PRECISION_DECIMALS: u32 = 6;

/// 属性量化器
///
/// 纯函数式：同一输入总是得到同一个键。
///
/// # 示例
///
/// ```rust
/// use ps2_mesh::geometry::quantize::Quantizer;
/// use ps2_mesh::geometry::vertex::AttributeTuple;
///
/// let quantizer = Quantizer::default();
/// let a = quantizer.quantize(&AttributeTuple::new([0.1, 0.0, 0.0], [0.0, 0.0]));
/// let b = quantizer.quantize(&AttributeTuple::new([0.1000000004, 0.0, 0.0], [0.0, 0.0]));
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantizer {
    precision_decimals: u32,
    scale: f64,
}

impl Quantizer {
    /// 创建指定精度的量化器
    pub fn new(precision_decimals: u32) -> Self {
        Self {
            precision_decimals,
            scale: 10f64.powi(precision_decimals as i32),
        }
    }

    #[inline]
    pub fn precision_decimals(&self) -> u32 {
        self.precision_decimals
    }

    /// 五个分量分别量化后组成去重键
    pub fn quantize(&self, tuple: &AttributeTuple) -> QuantizedKey {
        let [x, y, z] = tuple.position;
        let [u, v] = tuple.uv;

        QuantizedKey {
            position: [self.component(x), self.component(y), self.component(z)],
            uv: [self.component(u), self.component(v)],
        }
    }

    #[inline]
    fn component(&self, value: f64) -> i64 {
        (value * self.scale).round() as i64
    }
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION_DECIMALS)
    }
}
