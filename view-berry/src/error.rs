//! 运行时错误.

use crate::Plane;
use thiserror::Error;

/// 切片提取、渲染与交互控制的运行时错误.
///
/// 所有错误都由出错的纯函数同步返回, 不存在需要重试的瞬时错误.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    /// 切片索引越界. `extent` 为该平面对应轴的长度.
    #[error("{plane} 切片索引 {index} 越界, 合法范围为 [0, {extent})")]
    IndexOutOfRange {
        /// 出错的平面.
        plane: Plane,
        /// 请求的索引 (可能为负, 来自控件).
        index: i64,
        /// 该轴的长度.
        extent: usize,
    },

    /// 两个操作数的形状不一致.
    #[error("形状不一致: 期望 {expected:?}, 实际 {found:?}")]
    ShapeMismatch {
        /// 基准形状.
        expected: Vec<usize>,
        /// 实际形状.
        found: Vec<usize>,
    },

    /// 参数 (透明度, 轮廓线宽等) 超出定义域.
    #[error("参数 `{name}` 的值 {value} 不在 [{min}, {max}] 内")]
    ValueOutOfRange {
        /// 参数名.
        name: &'static str,
        /// 实际值.
        value: f64,
        /// 下界 (含).
        min: f64,
        /// 上界 (含).
        max: f64,
    },

    /// 体数据的某个维度长度为 0.
    #[error("体数据的某个维度为空")]
    EmptyVolume,

    /// 当前显示模式没有该控件.
    #[error("显示模式 `{mode}` 没有控件 `{control}`")]
    UnsupportedControl {
        /// 显示模式名.
        mode: &'static str,
        /// 控件名.
        control: &'static str,
    },

    /// 输出端 (文件, 窗口) 失败.
    #[error("输出失败: {0}")]
    Sink(String),
}

/// 渲染 / 控制运行时结果.
pub type ViewResult<T> = Result<T, ViewError>;

/// 若 `found` 与 `expected` 不同则返回 `ShapeMismatch`.
#[inline]
pub(crate) fn ensure_shape(expected: &[usize], found: &[usize]) -> ViewResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(ViewError::ShapeMismatch {
            expected: expected.to_vec(),
            found: found.to_vec(),
        })
    }
}

/// 若 `value` 不在 `[min, max]` 内 (或不是有限值) 则返回 `ValueOutOfRange`.
#[inline]
pub(crate) fn ensure_within(name: &'static str, value: f64, min: f64, max: f64) -> ViewResult<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ViewError::ValueOutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_shape() {
        assert!(ensure_shape(&[10, 10], &[10, 10]).is_ok());
        let err = ensure_shape(&[10, 10], &[10, 11]).unwrap_err();
        assert_eq!(
            err,
            ViewError::ShapeMismatch {
                expected: vec![10, 10],
                found: vec![10, 11],
            }
        );
    }

    #[test]
    fn test_ensure_within() {
        assert!(ensure_within("alpha", 0.0, 0.0, 1.0).is_ok());
        assert!(ensure_within("alpha", 1.0, 0.0, 1.0).is_ok());
        assert!(ensure_within("alpha", -0.01, 0.0, 1.0).is_err());
        assert!(ensure_within("alpha", 1.01, 0.0, 1.0).is_err());
        assert!(ensure_within("alpha", f64::NAN, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_error_message_names_plane() {
        let e = ViewError::IndexOutOfRange {
            plane: Plane::Sagittal,
            index: 70,
            extent: 60,
        };
        let msg = e.to_string();
        assert!(msg.contains("Sagittal"));
        assert!(msg.contains("70"));
    }
}
