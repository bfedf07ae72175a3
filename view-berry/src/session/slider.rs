use crate::error::ensure_within;
use crate::{Plane, ViewError, ViewResult};
use num::ToPrimitive;
use std::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::Serialize;

/// 一个滑块控件的状态: 闭区间 `[min, max]`, 步长和当前值.
///
/// 步长只是给控件的提示, `set` 不要求新值落在步长网格上.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Slider<V> {
    name: &'static str,
    min: V,
    max: V,
    step: V,
    value: V,

    /// 切片索引滑块所驱动 (或受其长度约束) 的平面.
    /// 有该字段时越界报告为 `IndexOutOfRange`, 否则为 `ValueOutOfRange`.
    plane: Option<Plane>,
}

/// 切片索引 / 线宽滑块. 控件给出的值是有符号的.
pub type IndexSlider = Slider<i64>;

/// 透明度滑块.
pub type FloatSlider = Slider<f64>;

impl<V: Copy + PartialOrd + ToPrimitive> Slider<V> {
    /// 创建滑块. `value` 不在 `[min, max]` 内时返回错误.
    pub fn new(name: &'static str, min: V, max: V, step: V, value: V) -> ViewResult<Self> {
        let s = Self {
            name,
            min,
            max,
            step,
            value: min,
            plane: None,
        };
        s.check(value)?;
        Ok(Self { value, ..s })
    }

    /// 控件名.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 下界 (含).
    #[inline]
    pub fn min(&self) -> V {
        self.min
    }

    /// 上界 (含).
    #[inline]
    pub fn max(&self) -> V {
        self.max
    }

    /// 步长.
    #[inline]
    pub fn step(&self) -> V {
        self.step
    }

    /// 当前值.
    #[inline]
    pub fn value(&self) -> V {
        self.value
    }

    /// 驱动的平面.
    #[inline]
    pub fn plane(&self) -> Option<Plane> {
        self.plane
    }

    /// 检查 `value` 是否可以被接受, 不修改状态.
    pub fn check(&self, value: V) -> ViewResult<()> {
        let inside = value >= self.min && value <= self.max;
        match self.plane {
            Some(plane) if !inside => Err(ViewError::IndexOutOfRange {
                plane,
                index: value.to_i64().unwrap_or(i64::MIN),
                extent: self.max.to_usize().map_or(0, |m| m + 1),
            }),
            _ => ensure_within(
                self.name,
                value.to_f64().unwrap_or(f64::NAN),
                self.min.to_f64().unwrap_or(f64::NAN),
                self.max.to_f64().unwrap_or(f64::NAN),
            ),
        }
    }

    /// 更新当前值, 返回旧值. 非法时状态不变.
    pub fn set(&mut self, value: V) -> ViewResult<V> {
        self.check(value)?;
        Ok(std::mem::replace(&mut self.value, value))
    }
}

impl IndexSlider {
    /// 覆盖平面 `plane` 合法索引范围 `range` 的切片滑块, 初值为范围中点.
    pub fn over(name: &'static str, plane: Plane, range: RangeInclusive<usize>) -> Self {
        let (lo, hi) = range.into_inner();
        let min = lo as i64;
        let max = hi as i64;
        Self {
            name,
            min,
            max,
            step: 1,
            value: min + (max - min) / 2,
            plane: Some(plane),
        }
    }

    /// 同 [`IndexSlider::over`], 但初值为 `value`. 越界时返回 `IndexOutOfRange`.
    pub fn over_at(
        name: &'static str,
        plane: Plane,
        range: RangeInclusive<usize>,
        value: i64,
    ) -> ViewResult<Self> {
        let mut s = Self::over(name, plane, range);
        s.set(value)?;
        Ok(s)
    }

    /// 当前值作为数组索引. 构造和 `set` 保证其非负.
    #[inline]
    pub fn index(&self) -> usize {
        usize::try_from(self.value).unwrap_or_default()
    }
}
