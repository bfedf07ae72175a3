use std::fmt;
use std::ops::{Index, RangeInclusive};

use ndarray::{Array3, ArrayView3, Axis};

use crate::error::{ensure_shape, ViewError, ViewResult};
use crate::{Idx2d, Idx3d};

pub mod slice;
pub mod window;

pub use slice::{gray_to_rgb, ImgWriteVis, PlaneSlice, RgbImage2d};

#[cfg(feature = "plot")]
pub use slice::ImgDisplay;

pub use window::DisplayWindow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 三个正交解剖平面之一.
///
/// 轴约定 (对所有体数据一致): 轴位面固定数组第 0 轴, 矢状面固定第 1 轴,
/// 冠状面固定第 2 轴. 切片保留剩余两轴的原始顺序.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Plane {
    /// 轴位面, 固定第 0 轴.
    Axial,

    /// 矢状面, 固定第 1 轴.
    Sagittal,

    /// 冠状面, 固定第 2 轴.
    Coronal,
}

impl Plane {
    /// 全部平面, 也是面板的展示顺序.
    pub const ALL: [Plane; 3] = [Plane::Axial, Plane::Sagittal, Plane::Coronal];

    /// 该平面所固定的数组轴.
    #[inline]
    pub const fn axis(&self) -> usize {
        match self {
            Plane::Axial => 0,
            Plane::Sagittal => 1,
            Plane::Coronal => 2,
        }
    }

    /// 与 [`Plane::axis`] 相反.
    #[inline]
    pub const fn from_axis(axis: usize) -> Option<Plane> {
        match axis {
            0 => Some(Plane::Axial),
            1 => Some(Plane::Sagittal),
            2 => Some(Plane::Coronal),
            _ => None,
        }
    }

    /// 平面名称.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Plane::Axial => "Axial",
            Plane::Sagittal => "Sagittal",
            Plane::Coronal => "Coronal",
        }
    }

    /// 是否为轴位面?
    #[inline]
    pub const fn is_axial(&self) -> bool {
        matches!(self, Plane::Axial)
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 借用的三维体数据 (扫描或标签), 形状 `(d0, d1, d2)`, 每个维度都非空.
///
/// 数据归调用者所有; 该结构只是一个轻量视图, 可以随意复制.
#[derive(Debug)]
pub struct Volume<'a, T> {
    /// 底层数据的轻量级视图.
    data: ArrayView3<'a, T>,
}

/// 与某个 [`Volume`] 对齐的三维标签体数据. 非零值代表感兴趣区域.
pub type Mask<'a, L = u8> = Volume<'a, L>;

impl<T> Clone for Volume<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Volume<'_, T> {}

impl<T> Index<Idx3d> for Volume<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, index: Idx3d) -> &Self::Output {
        &self.data[index]
    }
}

impl<'a, T> Volume<'a, T> {
    /// 包装一个三维视图. 任一维度为 0 时返回 `Err(ViewError::EmptyVolume)`.
    pub fn new(data: ArrayView3<'a, T>) -> ViewResult<Self> {
        if data.is_empty() {
            return Err(ViewError::EmptyVolume);
        }
        Ok(Self { data })
    }

    /// 借用一个拥有所有权的三维数组.
    #[inline]
    pub fn from_array(data: &'a Array3<T>) -> ViewResult<Self> {
        Self::new(data.view())
    }

    /// 包装一个标签体数据, 要求其形状与 `self` 一致, 否则返回 `ShapeMismatch`.
    pub fn aligned<L>(&self, mask: ArrayView3<'a, L>) -> ViewResult<Mask<'a, L>> {
        ensure_shape(self.data.shape(), mask.shape())?;
        Mask::new(mask)
    }

    /// 获得底层数据的一份不可变 shallow copy.
    #[inline]
    pub fn data(&self) -> ArrayView3<'a, T> {
        self.data
    }

    /// 数据形状.
    #[inline]
    pub fn shape(&self) -> Idx3d {
        self.data.dim()
    }

    /// 体素个数.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// 平面 `plane` 所固定轴的长度.
    #[inline]
    pub fn extent(&self, plane: Plane) -> usize {
        self.data.len_of(Axis(plane.axis()))
    }

    /// 平面 `plane` 的合法切片索引范围 `[0, extent - 1]`. 可直接用来约束滑块.
    #[inline]
    pub fn valid_range(&self, plane: Plane) -> RangeInclusive<usize> {
        // 构造时保证 extent >= 1.
        0..=self.extent(plane) - 1
    }

    /// 同时驱动三个平面的单个滑块的合法范围 `[0, min(extent) - 1]`.
    #[inline]
    pub fn shared_range(&self) -> RangeInclusive<usize> {
        let (a, b, c) = self.shape();
        0..=a.min(b).min(c) - 1
    }

    /// 平面 `plane` 上切片的形状, 即未被固定的两个轴的长度.
    pub fn slice_shape(&self, plane: Plane) -> Idx2d {
        let (a, b, c) = self.shape();
        match plane {
            Plane::Axial => (b, c),
            Plane::Sagittal => (a, c),
            Plane::Coronal => (a, b),
        }
    }

    /// 检查来自控件的 (有符号) 索引, 合法时返回对应的 `usize` 索引.
    ///
    /// `index < 0` 或 `index >= extent` 时返回 `IndexOutOfRange`.
    pub fn check_index(&self, plane: Plane, index: i64) -> ViewResult<usize> {
        let extent = self.extent(plane);
        match usize::try_from(index) {
            Ok(i) if i < extent => Ok(i),
            _ => Err(ViewError::IndexOutOfRange {
                plane,
                index,
                extent,
            }),
        }
    }

    /// 获取平面 `plane` 上第 `index` 层切片视图. 纯读取, 不复制数据.
    ///
    /// 当 `index` 越界时返回 `IndexOutOfRange`.
    pub fn slice(&self, plane: Plane, index: usize) -> ViewResult<PlaneSlice<'a, T>> {
        let extent = self.extent(plane);
        if index >= extent {
            return Err(ViewError::IndexOutOfRange {
                plane,
                index: i64::try_from(index).unwrap_or(i64::MAX),
                extent,
            });
        }
        let data = self.data.index_axis_move(Axis(plane.axis()), index);
        Ok(PlaneSlice::new(data, plane, index))
    }

    /// 同 [`Volume::slice`], 但接受控件传来的有符号索引.
    #[inline]
    pub fn slice_checked(&self, plane: Plane, index: i64) -> ViewResult<PlaneSlice<'a, T>> {
        let index = self.check_index(plane, index)?;
        self.slice(plane, index)
    }

    /// 获取能按升序迭代平面 `plane` 上所有切片的迭代器.
    #[inline]
    pub fn slice_iter(&self, plane: Plane) -> impl ExactSizeIterator<Item = PlaneSlice<'a, T>> {
        let data = self.data;
        (0..self.extent(plane))
            .map(move |i| PlaneSlice::new(data.index_axis_move(Axis(plane.axis()), i), plane, i))
    }
}
