//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::{Idx2d, Idx3d, Rgb};

pub use crate::data::{DisplayWindow, Mask, Plane, PlaneSlice, RgbImage2d, Volume};
pub use crate::data::{gray_to_rgb, ImgWriteVis};

#[cfg(feature = "plot")]
pub use crate::data::ImgDisplay;

pub use crate::blend::blend;
pub use crate::compare::{Comparison, PanelPair, Side};
pub use crate::contour::{draw_contours, find_contours, Contour};

pub use crate::config::ViewConfig;
pub use crate::consts::color::{BLUE, GREEN, RED, YELLOW};
pub use crate::error::{ViewError, ViewResult};

pub use crate::session::{
    DisplaySession, Frame, FrameSink, MemorySink, Mode, Panel, Param, PngSink,
};

#[cfg(feature = "plot")]
pub use crate::session::WindowSink;
