use crate::{Idx2d, Plane, Rgb};
use ndarray::iter::Iter;
use ndarray::{s, Array2, ArrayView2, Ix2};
use std::ops::Index;

/// 三通道图像, 像素为 `[r, g, b]`, 各通道 `[0.0, 1.0]`.
pub type RgbImage2d = Array2<Rgb>;

/// 不可变、借用的二维切片, 同时记录它来自哪个平面的第几层.
pub struct PlaneSlice<'a, T> {
    /// 底层数据的轻量级视图, 借用于 [`crate::Volume`].
    data: ArrayView2<'a, T>,

    /// 来源平面.
    plane: Plane,

    /// 来源层号.
    index: usize,
}

impl<T> Index<Idx2d> for PlaneSlice<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, index: Idx2d) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> Clone for PlaneSlice<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            data: self.data,
            plane: self.plane,
            index: self.index,
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for PlaneSlice<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaneSlice")
            .field("plane", &self.plane)
            .field("index", &self.index)
            .field("shape", &self.shape())
            .finish()
    }
}

impl<'a, T> PlaneSlice<'a, T> {
    /// 直接初始化.
    #[inline]
    pub(crate) fn new(data: ArrayView2<'a, T>, plane: Plane, index: usize) -> Self {
        Self { data, plane, index }
    }

    /// 获得数据的一份不可变 shallow copy.
    #[inline]
    pub fn data(&self) -> ArrayView2<'a, T> {
        self.data
    }

    /// 来源平面.
    #[inline]
    pub fn plane(&self) -> Plane {
        self.plane
    }

    /// 来源层号.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// 图像的分辨率 (高, 宽).
    #[inline]
    pub fn shape(&self) -> Idx2d {
        self.data.dim()
    }

    /// 图像的像素个数.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// 获取给定位置 (高, 宽) 的像素值. 越界时返回 `None`.
    #[inline]
    pub fn get(&self, pos: Idx2d) -> Option<&T> {
        self.data.get(pos)
    }

    /// 获取可以迭代图像像素的迭代器.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, Ix2> {
        self.data.iter()
    }

    /// 展示用的视图: 若 `flip_non_axial` 且该切片不是轴位面, 则上下翻转.
    ///
    /// 同一体数据的扫描和标签切片必须使用同一规则, 以保证像素对齐.
    pub fn oriented(&self, flip_non_axial: bool) -> ArrayView2<'a, T> {
        if flip_non_axial && !self.plane.is_axial() {
            self.data.slice_move(s![..;-1, ..])
        } else {
            self.data
        }
    }

    /// 面板标题, 形如 `Axial Slice 12`.
    #[inline]
    pub fn title(&self) -> String {
        format!("{} Slice {}", self.plane, self.index)
    }
}

impl<T: Clone> PlaneSlice<'_, T> {
    /// 克隆自己, 获得一个拥有所有权的二维数组.
    #[inline]
    pub fn to_owned(&self) -> Array2<T> {
        self.data.to_owned()
    }
}

/// 将 `[0.0, 1.0]` 灰度图复制到三个通道.
pub fn gray_to_rgb(gray: ArrayView2<f32>) -> RgbImage2d {
    gray.map(|&g| [g, g, g])
}
