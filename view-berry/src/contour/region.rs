use super::{neighbour4, neighbour8};
use crate::{Area2d, Idx2d};
use ndarray::{Array2, ArrayView2};
use num::Zero;
use std::collections::VecDeque;

/// 标签切片上的一个 8-邻接连通区域. 区域内所有像素标签相同且非零.
#[derive(Clone, Debug, PartialEq)]
pub struct Region<L> {
    label: L,

    /// 首元素为区域在行优先序下的第一个像素.
    pixels: Area2d,
}

impl<L: Copy + PartialEq> Region<L> {
    /// 区域标签.
    #[inline]
    pub fn label(&self) -> L {
        self.label
    }

    /// 区域内全部像素. 首元素为行优先序下的第一个像素, 其余为 BFS 顺序.
    #[inline]
    pub fn pixels(&self) -> &[Idx2d] {
        &self.pixels
    }

    /// 区域面积 (像素数).
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// 区域是否为空? 由 [`regions`] 得到的区域永远非空.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// 行优先序下的第一个像素. 其上方和左侧邻居一定不在区域内.
    #[inline]
    pub fn seed(&self) -> Idx2d {
        self.pixels[0]
    }

    /// 区域的边缘像素, 即 4-邻域含有区域外像素的那些.
    ///
    /// `mask` 必须是得到该区域的那张标签切片.
    pub fn boundary(&self, mask: ArrayView2<L>) -> Vec<Idx2d> {
        self.pixels
            .iter()
            .copied()
            .filter(|&pos| is_boundary_pixel(mask, pos, self.label))
            .collect()
    }
}

/// 判断 `pos` 的 4-邻域是否含有标签不是 `label` 的像素 (图像外也算).
#[inline]
pub(crate) fn is_boundary_pixel<L: Copy + PartialEq>(
    mask: ArrayView2<L>,
    pos: Idx2d,
    label: L,
) -> bool {
    neighbour4(pos)
        .into_iter()
        .any(|p| !matches!(mask.get(p), Some(&v) if v == label))
}

/// 获取标签切片中所有非零区域. 同一标签值的两个像素属于同一区域, 当且仅当
/// 存在一条连接它们且全部由该标签像素组成的 8-相邻路径.
///
/// 区域按其首像素的行优先序排列, 因此每次运行产生同样的结果.
pub fn regions<L: Copy + PartialEq + Zero>(mask: ArrayView2<L>) -> Vec<Region<L>> {
    let mut visited = Array2::<bool>::default(mask.dim());
    let mut ans = Vec::with_capacity(1);
    let mut bfs_q = VecDeque::with_capacity(16);

    for (pos, &label) in mask.indexed_iter() {
        if label.is_zero() || visited[pos] {
            continue;
        }
        visited[pos] = true;
        bfs_q.push_back(pos);

        let mut pixels = Area2d::with_capacity(16);
        while let Some(cur) = bfs_q.pop_front() {
            pixels.push(cur);
            for n in neighbour8(cur) {
                if matches!(mask.get(n), Some(&v) if v == label) && !visited[n] {
                    visited[n] = true;
                    bfs_q.push_back(n);
                }
            }
        }
        ans.push(Region { label, pixels });
    }
    ans
}
