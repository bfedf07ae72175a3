#![warn(missing_docs)] // <= 合适时移除它.
// #![warn(clippy::missing_docs_in_private_items)]  // <= too strict.

//! 核心库. 提供三维医学影像体数据 (CT, MRI 等) 的三平面切片浏览、
//! 标签轮廓叠加、透明混合与前后对比显示.
//!
//! 所有渲染例程都是借用体数据的纯函数; 交互部分 ([`session`]) 只保存控件状态,
//! 由外部窗口系统在控件变化时显式调用回调.
//!
//! 该 crate 只提供 `safe` 接口.
//!
//! # 注意
//!
//! 1. 该 crate 不负责文件读取, 配准或重采样. 输入是内存中的 `ndarray` 数组.
//! 2. 轴约定: 轴位面固定第 0 轴, 矢状面固定第 1 轴, 冠状面固定第 2 轴.
//!
//! # 功能
//!
//! ### 切片索引 ✅
//!
//! 实现位于 `view-berry/src/data`.
//!
//! ### 显示窗口 ✅
//!
//! 把整个体数据线性缩放到 `[0, 1]`, 以便转换为 8-bit 灰度或 RGB.
//!
//! 实现位于 `view-berry/src/data/window.rs`.
//!
//! ### 标签轮廓 ✅
//!
//! 8-邻接区域划分, 边缘带绘制与 Moore 邻域轮廓跟踪.
//!
//! 实现位于 `view-berry/src/contour`.
//!
//! ### 透明混合 ✅
//!
//! 实现位于 `view-berry/src/blend.rs`.
//!
//! ### 前后对比 ✅
//!
//! 实现位于 `view-berry/src/compare.rs`.
//!
//! ### 交互会话 ✅
//!
//! 滑块状态, `on_change` 回调, PNG / 窗口输出.
//!
//! 实现位于 `view-berry/src/session`.

/// 二维索引 (高, 宽).
pub type Idx2d = (usize, usize);

/// 三维索引.
pub type Idx3d = (usize, usize, usize);

/// 三通道颜色 / 像素 `[r, g, b]`, 各通道 `[0.0, 1.0]`.
pub type Rgb = [f32; 3];

type Area2d = Vec<Idx2d>;

/// 体数据, 切片与显示窗口.
mod data;

pub use data::{gray_to_rgb, DisplayWindow, ImgWriteVis, Mask, Plane, PlaneSlice, RgbImage2d, Volume};

#[cfg(feature = "plot")]
pub use data::ImgDisplay;

pub mod blend;

pub mod compare;

pub mod config;

pub use config::ViewConfig;

pub mod consts;

pub mod contour;

mod error;

pub use error::{ViewError, ViewResult};

pub mod session;

pub use session::{DisplaySession, Frame, FrameSink, Panel, Param};

pub mod prelude;
