//! 标签区域的轮廓提取与绘制.
//!
//! 区域: 每个非零标签值按 8-邻接划分的连通分量.
//! 边缘: 区域中 4-邻域含有区域外像素 (其他标签, 背景, 或图像外) 的那些像素,
//! 它们组成一条 8-邻接曲线.

mod draw;
mod region;
mod trace;

use crate::Idx2d;

pub use draw::{check_thickness, contour_band, draw_contours};
pub use region::{regions, Region};
pub use trace::{find_contours, Contour};

/// 顺时针的 8 个方向 `(dh, dw)`, 从正上方开始. 偶数下标为 4-邻接方向.
pub(crate) const CLOCKWISE: [(isize, isize); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// 沿 `(dh, dw)` 平移. 越过 0 时回绕为极大值, 对任何切片都落在图像外.
#[inline]
fn offset((h, w): Idx2d, (dh, dw): (isize, isize)) -> Idx2d {
    (h.wrapping_add_signed(dh), w.wrapping_add_signed(dw))
}

/// `(h, w)` 的 4-邻居索引, 按顺时针排列. 不检查越界.
#[inline]
pub(crate) fn neighbour4(pos: Idx2d) -> [Idx2d; 4] {
    [0, 2, 4, 6].map(|d| offset(pos, CLOCKWISE[d]))
}

/// `(h, w)` 的 8-邻居索引, 按顺时针排列. 不检查越界.
#[inline]
pub(crate) fn neighbour8(pos: Idx2d) -> [Idx2d; 8] {
    CLOCKWISE.map(|d| offset(pos, d))
}
