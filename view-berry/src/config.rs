//! 显示配置.

use crate::consts::{
    DEFAULT_CONTOUR_COLOR, DEFAULT_THICKNESS, DEFAULT_TRANSPARENCY, TRANSPARENCY_STEP,
};
use crate::contour::check_thickness;
use crate::error::{ensure_within, ViewResult};
use crate::Rgb;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 一次显示会话的配置. 所有字段均可直接修改, 使用前由 [`ViewConfig::validate`] 检查.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ViewConfig {
    /// 轮廓颜色, 各通道 `[0.0, 1.0]`.
    pub contour_color: Rgb,

    /// 轮廓线宽初值 (像素), 至少为 1.
    pub thickness: u32,

    /// 透明度初值, `[0.0, 1.0]`.
    pub transparency: f64,

    /// 透明度控件步长.
    pub transparency_step: f64,

    /// 展示时是否将矢状面和冠状面切片上下翻转 (轴位面从不翻转).
    pub flip_non_axial: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            contour_color: DEFAULT_CONTOUR_COLOR,
            thickness: DEFAULT_THICKNESS,
            transparency: DEFAULT_TRANSPARENCY,
            transparency_step: TRANSPARENCY_STEP,
            flip_non_axial: true,
        }
    }
}

impl ViewConfig {
    /// 检查各字段是否在定义域内.
    pub fn validate(&self) -> ViewResult<()> {
        check_thickness(self.thickness)?;
        ensure_within("transparency", self.transparency, 0.0, 1.0)?;
        ensure_within("transparency_step", self.transparency_step, f64::EPSILON, 1.0)?;
        for c in self.contour_color {
            ensure_within("contour_color", c as f64, 0.0, 1.0)?;
        }
        Ok(())
    }

    /// 替换轮廓颜色.
    #[inline]
    pub fn with_contour_color(mut self, color: Rgb) -> Self {
        self.contour_color = color;
        self
    }

    /// 替换轮廓线宽初值.
    #[inline]
    pub fn with_thickness(mut self, thickness: u32) -> Self {
        self.thickness = thickness;
        self
    }

    /// 替换透明度初值.
    #[inline]
    pub fn with_transparency(mut self, transparency: f64) -> Self {
        self.transparency = transparency;
        self
    }

    /// 设置是否翻转非轴位面.
    #[inline]
    pub fn with_flip_non_axial(mut self, flip: bool) -> Self {
        self.flip_non_axial = flip;
        self
    }
}
