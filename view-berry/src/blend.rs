//! 透明叠加 (alpha 混合).
//!
//! `result[p] = (1 - alpha) * base[p] + alpha * overlay[p]`.

use crate::error::{ensure_shape, ensure_within, ViewResult};
use ndarray::{Array2, ArrayView2, Zip};
use num::{Float, NumCast};

/// 检查透明度是否在 `[0.0, 1.0]` 内. 不合法的值直接拒绝, 不做截断.
#[inline]
pub fn check_alpha(alpha: f64) -> ViewResult<()> {
    ensure_within("alpha", alpha, 0.0, 1.0)
}

/// 单个像素的混合. 结果被截断到 `[min(b, o), max(b, o)]`, 用于消除浮点误差.
#[inline]
fn mix<T: Float>(b: T, o: T, alpha: T) -> T {
    let v = (T::one() - alpha) * b + alpha * o;
    v.max(b.min(o)).min(b.max(o))
}

/// 按透明度 `alpha` 将 `overlay` 叠加到 `base` 上, 返回新图像.
///
/// `alpha == 0` 时结果与 `base` 逐像素相等, `alpha == 1` 时与 `overlay` 逐像素相等.
/// 每个输出像素都位于对应两个输入像素之间, 因此输出不会超出输入的取值范围.
///
/// # 返回值
///
/// - 形状不同时, 返回 `Err(ViewError::ShapeMismatch)`;
/// - `alpha` 不在 `[0.0, 1.0]` 内 (或为 NaN) 时, 返回 `Err(ViewError::ValueOutOfRange)`.
pub fn blend<T>(base: ArrayView2<T>, overlay: ArrayView2<T>, alpha: f64) -> ViewResult<Array2<T>>
where
    T: Float + Send + Sync,
{
    ensure_shape(base.shape(), overlay.shape())?;
    check_alpha(alpha)?;
    // `Float` 类型总能表示 [0, 1] 内的 f64.
    let a: T = <T as NumCast>::from(alpha).unwrap_or_else(T::zero);

    let zip = Zip::from(&base).and(&overlay);
    #[cfg(feature = "rayon")]
    let out = zip.par_map_collect(|&b, &o| mix(b, o, a));
    #[cfg(not(feature = "rayon"))]
    let out = zip.map_collect(|&b, &o| mix(b, o, a));
    Ok(out)
}
