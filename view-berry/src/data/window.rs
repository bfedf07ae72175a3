use crate::Volume;
use ndarray::{Array2, ArrayView2};
use num::ToPrimitive;

/// 显示窗口, 包含下限和上限. 用于把原始强度线性映射到 `[0.0, 1.0]` 或 8-bit 灰度.
///
/// 该窗口是只读的. 若要修改窗口参数, 你应该创建新的实例.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DisplayWindow {
    lower: f64,
    upper: f64,
}

impl DisplayWindow {
    /// 构建显示窗口.
    ///
    /// `lower` 和 `upper` 必须是有限值且 `lower < upper`, 否则返回 `None`.
    pub fn new(lower: f64, upper: f64) -> Option<DisplayWindow> {
        if lower.is_finite() && upper.is_finite() && lower < upper {
            Some(Self { lower, upper })
        } else {
            None
        }
    }

    /// 单位窗口 `[0, 1]`.
    #[inline]
    pub const fn unit() -> DisplayWindow {
        Self {
            lower: 0.0,
            upper: 1.0,
        }
    }

    /// 以整个体数据的最小值和最大值为窗口 (线性重缩放).
    ///
    /// 非有限值 (inf, NaN) 不参与统计. 若没有有限值则返回 [`DisplayWindow::unit`];
    /// 若所有有限值都相同, 则窗口为 `[v, v + 1]`, 即全部映射为 0.
    pub fn from_volume<T>(volume: &Volume<'_, T>) -> DisplayWindow
    where
        T: ToPrimitive + Sync,
    {
        let (lo, hi) = finite_min_max(volume);
        if lo > hi {
            Self::unit()
        } else if lo == hi {
            Self {
                lower: lo,
                upper: lo + 1.0,
            }
        } else {
            Self {
                lower: lo,
                upper: hi,
            }
        }
    }

    /// 窗下限.
    #[inline]
    pub fn lower_bound(&self) -> f64 {
        self.lower
    }

    /// 窗上限.
    #[inline]
    pub fn upper_bound(&self) -> f64 {
        self.upper
    }

    /// 窗宽.
    #[inline]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// 求 `v` 在当前窗口下对应的单位强度 (0.0 <= value <= 1.0).
    ///
    /// 如果 `v` 无意义 (如 inf, NaN), 则返回 `None`.
    pub fn eval_unit(&self, v: f64) -> Option<f32> {
        if !v.is_finite() {
            return None;
        }
        if v <= self.lower {
            Some(0.0)
        } else if v >= self.upper {
            Some(1.0)
        } else {
            Some(((v - self.lower) / self.width()) as f32)
        }
    }

    /// 求 `v` 在当前窗口下对应的灰度图像素整数值 (0 <= value <= 255).
    ///
    /// 如果 `v` 无意义 (如 inf, NaN), 则返回 `None`.
    #[inline]
    pub fn eval(&self, v: f64) -> Option<u8> {
        // 255, not 256.
        self.eval_unit(v).map(|u| (u * 255.0) as u8)
    }

    /// 将整幅切片映射为单位灰度图. 无意义的像素映射为 0.
    pub fn rescale<T: ToPrimitive>(&self, data: ArrayView2<T>) -> Array2<f32> {
        data.map(|v| v.to_f64().and_then(|v| self.eval_unit(v)).unwrap_or(0.0))
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use rayon::iter::{IntoParallelIterator, ParallelIterator};
    }
}

const EMPTY_RANGE: (f64, f64) = (f64::INFINITY, f64::NEG_INFINITY);

#[inline]
fn fold_finite<T: ToPrimitive>((lo, hi): (f64, f64), v: &T) -> (f64, f64) {
    match v.to_f64() {
        Some(x) if x.is_finite() => (lo.min(x), hi.max(x)),
        _ => (lo, hi),
    }
}

/// 体数据中有限值的 `(最小值, 最大值)`. 没有有限值时返回 `(inf, -inf)`.
#[cfg(feature = "rayon")]
fn finite_min_max<T: ToPrimitive + Sync>(volume: &Volume<'_, T>) -> (f64, f64) {
    volume
        .data()
        .into_par_iter()
        .fold(|| EMPTY_RANGE, fold_finite)
        .reduce(|| EMPTY_RANGE, |a, b| (a.0.min(b.0), a.1.max(b.1)))
}

/// 体数据中有限值的 `(最小值, 最大值)`. 没有有限值时返回 `(inf, -inf)`.
#[cfg(not(feature = "rayon"))]
fn finite_min_max<T: ToPrimitive + Sync>(volume: &Volume<'_, T>) -> (f64, f64) {
    volume.data().iter().fold(EMPTY_RANGE, fold_finite)
}
