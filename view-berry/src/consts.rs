//! 通用常量.

use crate::Rgb;

/// 三通道颜色, 各通道取值 `[0.0, 1.0]`.
pub mod color {
    use super::Rgb;

    /// 黑色.
    pub const BLACK: Rgb = [0.0, 0.0, 0.0];

    /// 白色.
    pub const WHITE: Rgb = [1.0, 1.0, 1.0];

    /// 红色.
    pub const RED: Rgb = [1.0, 0.0, 0.0];

    /// 绿色. 默认的轮廓颜色.
    pub const GREEN: Rgb = [0.0, 1.0, 0.0];

    /// 蓝色.
    pub const BLUE: Rgb = [0.0, 0.0, 1.0];

    /// 黄色.
    pub const YELLOW: Rgb = [1.0, 1.0, 0.0];
}

/// 默认轮廓线宽 (像素).
pub const DEFAULT_THICKNESS: u32 = 1;

/// 最小轮廓线宽 (像素). 线宽没有上限, 超过区域半径时整个区域着色.
pub const MIN_THICKNESS: u32 = 1;

/// 默认透明度.
pub const DEFAULT_TRANSPARENCY: f64 = 0.5;

/// 透明度控件步长.
pub const TRANSPARENCY_STEP: f64 = 0.01;

/// 默认轮廓颜色.
pub const DEFAULT_CONTOUR_COLOR: Rgb = color::GREEN;
