use super::region::regions;
use super::CLOCKWISE;
use crate::Idx2d;
use ndarray::ArrayView2;
use num::Zero;

/// 一条闭合外轮廓.
///
/// `points` 从区域的行优先首像素出发, 沿顺时针方向 (高向下, 宽向右)
/// 排列区域的外边缘像素, 相邻两点 8-相邻, 末点与首点 8-相邻.
/// 单像素区域的轮廓只有一个点. 区域内部空洞的边缘不包含在内.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour<L> {
    /// 轮廓所属区域的标签.
    pub label: L,

    /// 边缘像素序列.
    pub points: Vec<Idx2d>,
}

/// `CLOCKWISE` 中正左方的下标.
const WEST: usize = 6;

/// 获取标签切片中每个区域 (见 [`super::regions`]) 的外轮廓, 顺序与区域顺序一致.
pub fn find_contours<L: Copy + PartialEq + Zero>(mask: ArrayView2<L>) -> Vec<Contour<L>> {
    regions(mask)
        .iter()
        .map(|r| Contour {
            label: r.label(),
            points: trace_outer(mask, r.seed(), r.label(), r.len()),
        })
        .collect()
}

/// 沿方向 `d` 走一步. 结果为负时返回 `None`.
#[inline]
fn step((h, w): Idx2d, d: usize) -> Option<Idx2d> {
    let (dh, dw) = CLOCKWISE[d];
    Some((h.checked_add_signed(dh)?, w.checked_add_signed(dw)?))
}

/// 从 `to` 看 `from` 的方向. 两点必须 8-相邻.
#[inline]
fn direction((fh, fw): (isize, isize), to: Idx2d) -> usize {
    let delta = (fh - to.0 as isize, fw - to.1 as isize);
    let d = CLOCKWISE.iter().position(|&o| o == delta);
    debug_assert!(d.is_some());
    d.unwrap_or(WEST)
}

/// Moore 邻域跟踪. `seed` 必须是区域的行优先首像素, 因此其左侧一定在区域外.
fn trace_outer<L: Copy + PartialEq>(
    mask: ArrayView2<L>,
    seed: Idx2d,
    label: L,
    area: usize,
) -> Vec<Idx2d> {
    let inside = |pos: Idx2d, d: usize| {
        step(pos, d).filter(|&p| matches!(mask.get(p), Some(&v) if v == label))
    };

    let mut points = vec![seed];
    let mut cur = seed;
    // 从 cur 指向最近一次检查过的区域外位置.
    let mut back = WEST;
    let mut first_move = None;

    // 每个边缘像素至多被进入 4 次.
    for _ in 0..4 * area + 4 {
        let found = (1..=8)
            .map(|k| (back + k) % 8)
            .find_map(|d| inside(cur, d).map(|p| (d, p)));
        let Some((d, next)) = found else {
            // 孤立像素.
            break;
        };

        if cur == seed {
            match first_move {
                None => first_move = Some(next),
                Some(f) if f == next => break,
                Some(_) => {}
            }
        }

        // 新的回溯位置是 `d` 之前刚检查过的那个邻居, 它可能在图像外.
        let (dh, dw) = CLOCKWISE[(d + 7) % 8];
        let prev = (cur.0 as isize + dh, cur.1 as isize + dw);
        back = direction(prev, next);

        points.push(next);
        cur = next;
    }

    if points.len() > 1 && points.last() == Some(&seed) {
        points.pop();
    }
    points
}
