use super::neighbour4;
use super::region::is_boundary_pixel;
use crate::consts::MIN_THICKNESS;
use crate::error::{ensure_shape, ensure_within, ViewResult};
use crate::Idx2d;
use ndarray::{Array2, ArrayView2, Zip};
use num::Zero;

/// 检查轮廓线宽是否至少为 [`MIN_THICKNESS`].
#[inline]
pub fn check_thickness(thickness: u32) -> ViewResult<()> {
    ensure_within(
        "thickness",
        thickness as f64,
        MIN_THICKNESS as f64,
        u32::MAX as f64,
    )
}

/// 计算线宽为 `thickness` 的轮廓带. 返回与 `mask` 同形状的布尔图, `true` 表示需要着色.
///
/// 第 1 层为所有区域的边缘像素; 第 `k` 层为同一区域内与第 `k - 1` 层 4-相邻的像素.
/// 轮廓带只向区域内部生长, 因此永远不会覆盖任何区域之外的像素.
///
/// `thickness == 0` 时返回 `ValueOutOfRange`.
pub fn contour_band<L: Copy + PartialEq + Zero>(
    mask: ArrayView2<L>,
    thickness: u32,
) -> ViewResult<Array2<bool>> {
    check_thickness(thickness)?;

    let mut band = Array2::<bool>::default(mask.dim());
    let mut frontier: Vec<Idx2d> = mask
        .indexed_iter()
        .filter_map(|(pos, &label)| {
            (!label.is_zero() && is_boundary_pixel(mask, pos, label)).then_some(pos)
        })
        .collect();
    frontier.iter().for_each(|&pos| band[pos] = true);

    for _ in 1..thickness {
        let mut next = Vec::with_capacity(frontier.len());
        for &pos in frontier.iter() {
            let label = mask[pos];
            for n in neighbour4(pos) {
                if matches!(mask.get(n), Some(&v) if v == label) && !band[n] {
                    band[n] = true;
                    next.push(n);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }
    Ok(band)
}

/// 在 `base` 的副本上用 `color` 画出 `mask` 中每个非零区域的轮廓 (只画轮廓, 不填充).
///
/// # 返回值
///
/// - `base` 与 `mask` 形状不同时, 返回 `Err(ViewError::ShapeMismatch)`;
/// - `thickness` 不合法时, 返回 `Err(ViewError::ValueOutOfRange)`;
/// - 否则返回绘制结果. 轮廓带之外的像素与 `base` 完全一致.
pub fn draw_contours<P: Clone, L: Copy + PartialEq + Zero>(
    base: ArrayView2<P>,
    mask: ArrayView2<L>,
    thickness: u32,
    color: P,
) -> ViewResult<Array2<P>> {
    ensure_shape(base.shape(), mask.shape())?;
    let band = contour_band(mask, thickness)?;

    let mut out = base.to_owned();
    Zip::from(&mut out).and(&band).for_each(|pix, &on| {
        if on {
            *pix = color.clone();
        }
    });
    Ok(out)
}
