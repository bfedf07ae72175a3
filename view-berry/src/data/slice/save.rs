//! 渲染结果的持久化存储.

use crate::Rgb;
use image::ImageResult;
use ndarray::{Array2, ArrayView2};
use std::path::Path;

/// 表明一个可以通过 **可视化友好** 模式持久化存储的图像对象.
///
/// 图像以 8-bit 形式保存: 单位强度 `[0.0, 1.0]` 线性映射到 `[0, 255]`,
/// 超出范围的值被截断, NaN 保存为 0.
pub trait ImgWriteVis {
    /// 按照可视化规则将图片保存到 `path` 路径. 格式由扩展名决定.
    fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()>;
}

/// 单位强度 -> 8-bit.
#[inline]
pub(crate) fn unit_to_u8(v: f32) -> u8 {
    // `as` 对 NaN 给出 0.
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// 将三通道图像转换为 `image` crate 的 8-bit RGB 图像.
pub(crate) fn rgb_to_image(data: ArrayView2<Rgb>) -> image::RgbImage {
    let (height, width) = data.dim();
    let mut buf = image::RgbImage::new(width as u32, height as u32);
    for ((h, w), &[r, g, b]) in data.indexed_iter() {
        buf.put_pixel(
            w as u32,
            h as u32,
            image::Rgb([unit_to_u8(r), unit_to_u8(g), unit_to_u8(b)]),
        );
    }
    buf
}

macro_rules! impl_rgb_vis {
    ($($image: ty),+) => {
        $(
            /// 三通道图像.
            impl ImgWriteVis for $image {
                fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
                    rgb_to_image(self.view()).save(path)
                }
            }
        )+
    };
}

macro_rules! impl_gray_vis {
    ($($image: ty),+) => {
        $(
            /// 单位强度灰度图.
            impl ImgWriteVis for $image {
                fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
                    let (height, width) = self.dim();
                    let mut buf = image::GrayImage::new(width as u32, height as u32);
                    for ((h, w), &v) in self.indexed_iter() {
                        buf.put_pixel(w as u32, h as u32, image::Luma([unit_to_u8(v)]));
                    }
                    buf.save(path)
                }
            }
        )+
    };
}

impl_rgb_vis!(Array2<Rgb>, ArrayView2<'_, Rgb>);
impl_gray_vis!(Array2<f32>, ArrayView2<'_, f32>);
