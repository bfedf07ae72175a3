//! 两个体数据 (变换前 / 变换后) 的并排对比.
//!
//! 两个体数据相互独立, 形状可以不同. 每个面板单独报告自己的错误,
//! 一侧越界不会妨碍另一侧的渲染.

use crate::{Plane, PlaneSlice, ViewError, ViewResult, Volume};
use std::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 对比的一侧.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    /// 变换前, 左列.
    Before,

    /// 变换后, 右列.
    After,
}

impl Side {
    /// 按列的顺序排列.
    pub const ALL: [Side; 2] = [Side::Before, Side::After];

    /// 所在列, 也是在 [`Side::ALL`] 中的下标.
    #[inline]
    pub const fn column(&self) -> usize {
        match self {
            Side::Before => 0,
            Side::After => 1,
        }
    }

    /// 小写名称, 同时用作该侧切片滑块的控件名.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Side::Before => "before",
            Side::After => "after",
        }
    }
}

/// 同一平面上的一对面板.
#[derive(Debug)]
pub struct PanelPair<'a, T> {
    /// 所在平面.
    pub plane: Plane,

    /// 变换前一侧的切片.
    pub before: ViewResult<PlaneSlice<'a, T>>,

    /// 变换后一侧的切片.
    pub after: ViewResult<PlaneSlice<'a, T>>,
}

impl<T> PanelPair<'_, T> {
    /// 两侧是否都成功?
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.before.is_ok() && self.after.is_ok()
    }

    /// 收集两侧的错误 (最多两个).
    pub fn errors(&self) -> Vec<&ViewError> {
        [&self.before, &self.after]
            .into_iter()
            .filter_map(|r| r.as_ref().err())
            .collect()
    }
}

/// 并排对比布局.
#[derive(Debug)]
pub struct Comparison<'a, T> {
    before: Volume<'a, T>,
    after: Volume<'a, T>,
}

impl<T> Clone for Comparison<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Comparison<'_, T> {}

impl<'a, T> Comparison<'a, T> {
    /// 直接初始化.
    #[inline]
    pub fn new(before: Volume<'a, T>, after: Volume<'a, T>) -> Self {
        Self { before, after }
    }

    /// 变换前的体数据.
    #[inline]
    pub fn before(&self) -> Volume<'a, T> {
        self.before
    }

    /// 变换后的体数据.
    #[inline]
    pub fn after(&self) -> Volume<'a, T> {
        self.after
    }

    /// 驱动三个平面和两侧的单个滑块的范围.
    ///
    /// 取两侧 [`Volume::shared_range`] 的并集, 因此较小一侧可能出现单侧越界.
    pub fn shared_range(&self) -> RangeInclusive<usize> {
        let a = *self.before.shared_range().end();
        let b = *self.after.shared_range().end();
        0..=a.max(b)
    }

    /// 在平面 `plane` 上, 以各自的索引分别取两侧切片.
    pub fn render_each(&self, plane: Plane, before: i64, after: i64) -> PanelPair<'a, T> {
        PanelPair {
            plane,
            before: self.before.slice_checked(plane, before),
            after: self.after.slice_checked(plane, after),
        }
    }

    /// 在平面 `plane` 上, 以同一个索引取两侧切片.
    #[inline]
    pub fn render(&self, plane: Plane, index: i64) -> PanelPair<'a, T> {
        self.render_each(plane, index, index)
    }

    /// 三行两列的对比网格: 行依次为轴位面, 矢状面, 冠状面; 列为变换前, 变换后.
    /// 左列三个平面都取第 `before` 层, 右列都取第 `after` 层.
    pub fn render_grid_each(&self, before: i64, after: i64) -> [PanelPair<'a, T>; 3] {
        Plane::ALL.map(|plane| self.render_each(plane, before, after))
    }

    /// 两列使用同一个索引的 [`Comparison::render_grid_each`].
    #[inline]
    pub fn render_grid(&self, index: i64) -> [PanelPair<'a, T>; 3] {
        self.render_grid_each(index, index)
    }
}
