//! 窗口展示模块, 主要用于调试和本地交互.
//!
//! # 注意
//!
//! 需要 `plot` feature.

use super::save::unit_to_u8;
use crate::Rgb;
use ndarray::{Array2, ArrayView2};
use opencv::core::{Scalar, Size, VecN, CV_8UC3};
use opencv::highgui::{imshow, wait_key};
use opencv::prelude::{Mat, MatTrait, MatTraitConst};
use std::time::Duration;

/// 表明一个可以在窗口中可视化的对象.
pub trait ImgDisplay {
    /// 在名为 `title` 的窗口中展示对象.
    fn show(&self, title: &str) -> opencv::Result<()>;

    /// 同 `show()`, 但在之后自动等待一次用户按键输入.
    fn show_and_wait(&self, title: &str) -> opencv::Result<i32> {
        self.show(title)?;
        wait_key(0)
    }

    /// 同 `show()`, 但在之后自动等待给定时间 (不超过 `i32::MAX` 毫秒).
    fn show_and_wait_for(&self, title: &str, d: Duration) -> opencv::Result<i32> {
        self.show(title)?;
        let ms = d.as_millis().min(i32::MAX as u128);
        wait_key(ms as i32)
    }
}

/// 将三通道单位强度图像转换为 opencv 的 BGR 8-bit 矩阵.
fn rgb_to_opencv_mat(data: ArrayView2<Rgb>) -> opencv::Result<Mat> {
    let (h, w) = data.dim();
    let mut mat = Mat::new_size_with_default(
        Size::new(w as i32, h as i32),
        CV_8UC3,
        Scalar::all(0.0),
    )?;
    for ((i, j), &[r, g, b]) in data.indexed_iter() {
        let slot = mat.at_2d_mut::<VecN<u8, 3>>(i as i32, j as i32)?;
        // opencv 使用 BGR 顺序.
        *slot = VecN([unit_to_u8(b), unit_to_u8(g), unit_to_u8(r)]);
    }
    Ok(mat)
}

macro_rules! impl_rgb_display {
    ($($image: ty),+) => {
        $(
            /// 以 BGR 8-bit 形式展示三通道图像.
            impl ImgDisplay for $image {
                fn show(&self, title: &str) -> opencv::Result<()> {
                    let mat = rgb_to_opencv_mat(self.view())?;
                    imshow(title, &mat)
                }
            }
        )+
    };
}

impl_rgb_display!(Array2<Rgb>, ArrayView2<'_, Rgb>);
