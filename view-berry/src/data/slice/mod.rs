//! 平面切片对象与渲染结果的输出.

mod core;
mod save;

pub use core::{gray_to_rgb, PlaneSlice, RgbImage2d};

pub use save::ImgWriteVis;

cfg_if::cfg_if! {
    if #[cfg(feature = "plot")] {
        mod plot;

        pub use plot::ImgDisplay;
    }
}
