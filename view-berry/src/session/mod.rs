//! 交互式显示会话.
//!
//! 一个 [`DisplaySession`] 对应一次可视化: 创建时借用体数据, 由 [`DisplaySession::show`]
//! 展示初始帧, 每次控件变化时由外部窗口系统调用 [`DisplaySession::on_change`],
//! 关闭视图时丢弃 (或 [`DisplaySession::close`]) 会话.
//!
//! 渲染本身是纯函数 ([`DisplaySession::render`]), 只依赖控件状态和借用的体数据.
//! 单线程, 同步; 每个事件对应一次渲染.

mod frame;
mod slider;

pub use frame::{Frame, FrameSink, MemorySink, Panel, PngSink};
pub use slider::{FloatSlider, IndexSlider, Slider};

#[cfg(feature = "plot")]
pub use frame::WindowSink;

use crate::blend::blend;
use crate::compare::{Comparison, Side};
use crate::consts::MIN_THICKNESS;
use crate::contour::draw_contours;
use crate::error::ensure_shape;
use crate::{
    gray_to_rgb, DisplayWindow, Mask, Plane, PlaneSlice, RgbImage2d, ViewConfig, ViewError,
    ViewResult, Volume,
};
use ndarray::Array2;
use num::{ToPrimitive, Zero};
use std::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 显示模式, 决定面板布局和可用控件.
#[derive(Debug)]
pub enum Mode<'a, T, L = u8> {
    /// 一个滑块同时驱动三个平面, 灰度显示.
    Explore,

    /// 三个平面各一个滑块, 外加线宽滑块; 在灰度图上画出标签轮廓.
    Contour(Mask<'a, L>),

    /// 三个平面各一个滑块, 外加透明度滑块; 在灰度图上透明叠加另一体数据.
    Overlay(Volume<'a, T>),

    /// 三行两列地对比变换前 (主体数据) 与变换后 (该体数据).
    /// 一个共享滑块同时驱动两侧, 两侧另有各自的切片滑块.
    ///
    /// 面板按数组原始方向显示, 不受 [`ViewConfig::flip_non_axial`] 影响.
    Compare(Volume<'a, T>),
}

impl<T, L> Clone for Mode<'_, T, L> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, L> Copy for Mode<'_, T, L> {}

impl<T, L> Mode<'_, T, L> {
    /// 模式名.
    pub const fn name(&self) -> &'static str {
        match self {
            Mode::Explore => "explore",
            Mode::Contour(_) => "contour",
            Mode::Overlay(_) => "overlay",
            Mode::Compare(_) => "compare",
        }
    }
}

/// 一次控件变化. 数值直接来自控件, 因此索引是有符号的.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Param {
    /// 同时驱动三个平面的切片滑块.
    SharedIndex(i64),

    /// 单个平面的切片滑块.
    Index(Plane, i64),

    /// 透明度.
    Transparency(f64),

    /// 轮廓线宽.
    Thickness(i64),

    /// 对比模式中一侧的切片滑块, 只驱动该侧三个平面.
    SideIndex(Side, i64),
}

impl Param {
    /// 对应的控件名.
    pub const fn control(&self) -> &'static str {
        match self {
            Param::SharedIndex(_) => "slice",
            Param::Index(plane, _) => plane.name(),
            Param::Transparency(_) => "transparency",
            Param::Thickness(_) => "thickness",
            Param::SideIndex(side, _) => side.name(),
        }
    }
}

/// 一个会话的全部控件状态. 当前模式没有的控件为 `None`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Controls {
    /// 共享切片滑块 (探索, 对比模式).
    pub shared: Option<IndexSlider>,

    /// 按 [`Plane::axis`] 排列的三个切片滑块 (轮廓, 叠加模式).
    pub planes: Option<[IndexSlider; 3]>,

    /// 轮廓线宽滑块.
    pub thickness: Option<IndexSlider>,

    /// 透明度滑块.
    pub transparency: Option<FloatSlider>,

    /// 按 [`Side::column`] 排列的两侧切片滑块 (对比模式).
    pub sides: Option<[IndexSlider; 2]>,
}

impl Controls {
    fn shared(plane: Plane, range: RangeInclusive<usize>, value: Option<i64>) -> ViewResult<Self> {
        let slider = match value {
            Some(v) => IndexSlider::over_at("slice", plane, range, v)?,
            None => IndexSlider::over("slice", plane, range),
        };
        Ok(Self {
            shared: Some(slider),
            planes: None,
            thickness: None,
            transparency: None,
            sides: None,
        })
    }

    fn per_plane<T>(volume: &Volume<'_, T>) -> Self {
        Self {
            shared: None,
            planes: Some(Plane::ALL.map(|p| IndexSlider::over(p.name(), p, volume.valid_range(p)))),
            thickness: None,
            transparency: None,
            sides: None,
        }
    }

    /// 平面 `plane` 当前显示的层号.
    pub fn index_of(&self, plane: Plane) -> usize {
        match (&self.planes, &self.shared) {
            (Some(planes), _) => planes[plane.axis()].index(),
            (None, Some(shared)) => shared.index(),
            (None, None) => 0,
        }
    }

    /// 对比模式中 `side` 一侧当前显示的层号. 没有单侧滑块时退回到 [`Controls::index_of`].
    pub fn side_index(&self, side: Side) -> usize {
        match &self.sides {
            Some(sides) => sides[side.column()].index(),
            None => self.index_of(Plane::Axial),
        }
    }

    /// 当前轮廓线宽.
    #[inline]
    pub fn thickness(&self) -> Option<u32> {
        self.thickness
            .as_ref()
            .and_then(|s| u32::try_from(s.value()).ok())
    }

    /// 当前透明度.
    #[inline]
    pub fn transparency(&self) -> Option<f64> {
        self.transparency.as_ref().map(Slider::value)
    }

    /// 把 `param` 应用到对应滑块. 非法时状态不变.
    fn apply(&mut self, mode: &'static str, param: Param) -> ViewResult<()> {
        let unsupported = || ViewError::UnsupportedControl {
            mode,
            control: param.control(),
        };
        match param {
            Param::SharedIndex(v) => {
                self.shared.as_mut().ok_or_else(unsupported)?.set(v)?;
                // 两侧滑块与共享滑块范围相同, 这里不会失败.
                for side in self.sides.iter_mut().flatten() {
                    side.set(v)?;
                }
            }
            Param::Index(plane, v) => {
                let planes = self.planes.as_mut().ok_or_else(unsupported)?;
                planes[plane.axis()].set(v)?;
            }
            Param::Transparency(v) => {
                self.transparency.as_mut().ok_or_else(unsupported)?.set(v)?;
            }
            Param::Thickness(v) => {
                self.thickness.as_mut().ok_or_else(unsupported)?.set(v)?;
            }
            Param::SideIndex(side, v) => {
                let sides = self.sides.as_mut().ok_or_else(unsupported)?;
                sides[side.column()].set(v)?;
            }
        }
        Ok(())
    }
}

/// 体数据中最短的轴所对应的平面, 即共享滑块越界时报告的平面.
fn shortest_plane<T>(volume: &Volume<'_, T>) -> (Plane, usize) {
    Plane::ALL
        .into_iter()
        .map(|p| (p, volume.extent(p)))
        .min_by_key(|&(_, e)| e)
        .unwrap_or((Plane::Axial, volume.extent(Plane::Axial)))
}

/// 一次可视化的控制器.
///
/// 借用主体数据和模式附带的体数据, 拥有输出端 `sink`.
pub struct DisplaySession<'a, T, L, S> {
    volume: Volume<'a, T>,
    mode: Mode<'a, T, L>,
    config: ViewConfig,
    controls: Controls,

    /// 主体数据的显示窗口.
    window: DisplayWindow,

    /// 叠加 / 对比体数据的显示窗口. 其他模式下与 `window` 相同.
    secondary: DisplayWindow,

    sink: S,
}

impl<'a, T, S> DisplaySession<'a, T, u8, S>
where
    T: ToPrimitive + Sync,
    S: FrameSink,
{
    /// 探索模式: 一个范围为 `[0, min(extent) - 1]` 的滑块同时驱动三个平面.
    pub fn explore(volume: Volume<'a, T>, config: ViewConfig, sink: S) -> ViewResult<Self> {
        let (plane, _) = shortest_plane(&volume);
        let controls = Controls::shared(plane, volume.shared_range(), None)?;
        Self::start(volume, Mode::Explore, config, controls, sink)
    }

    /// 叠加模式: `overlay` 必须与 `volume` 形状相同. 两者各自线性缩放到 `[0, 1]` 后混合.
    pub fn with_overlay(
        volume: Volume<'a, T>,
        overlay: Volume<'a, T>,
        config: ViewConfig,
        sink: S,
    ) -> ViewResult<Self> {
        ensure_shape(volume.data().shape(), overlay.data().shape())?;
        let mut controls = Controls::per_plane(&volume);
        controls.transparency = Some(FloatSlider::new(
            "transparency",
            0.0,
            1.0,
            config.transparency_step,
            config.transparency,
        )?);
        Self::start(volume, Mode::Overlay(overlay), config, controls, sink)
    }

    /// 对比模式: `before` 与 `after` 形状可以不同. 滑块范围取两者共享范围的并集, 初值为 0.
    ///
    /// 共享滑块 ([`Param::SharedIndex`]) 同时移动两侧; 单侧滑块 ([`Param::SideIndex`])
    /// 范围相同, 只移动一侧.
    pub fn compare(
        before: Volume<'a, T>,
        after: Volume<'a, T>,
        config: ViewConfig,
        sink: S,
    ) -> ViewResult<Self> {
        let range = Comparison::new(before, after).shared_range();
        let (plane, _) = [shortest_plane(&before), shortest_plane(&after)]
            .into_iter()
            .max_by_key(|&(_, e)| e)
            .unwrap_or_else(|| shortest_plane(&before));
        let mut controls = Controls::shared(plane, range.clone(), Some(0))?;
        controls.sides = Some([
            IndexSlider::over_at(Side::Before.name(), plane, range.clone(), 0)?,
            IndexSlider::over_at(Side::After.name(), plane, range, 0)?,
        ]);
        Self::start(before, Mode::Compare(after), config, controls, sink)
    }
}

impl<'a, T, L, S> DisplaySession<'a, T, L, S>
where
    T: ToPrimitive + Sync,
    L: Copy + PartialEq + Zero,
    S: FrameSink,
{
    /// 轮廓模式: `mask` 必须与 `volume` 形状相同. 初始线宽取自 `config.thickness`.
    pub fn with_contours(
        volume: Volume<'a, T>,
        mask: Mask<'a, L>,
        config: ViewConfig,
        sink: S,
    ) -> ViewResult<Self> {
        ensure_shape(volume.data().shape(), mask.data().shape())?;
        config.validate()?;
        // 线宽达到最长轴长度后, 任何区域都已被整体着色.
        let longest = Plane::ALL.map(|p| volume.extent(p)).into_iter().max().unwrap_or(1);
        let mut controls = Controls::per_plane(&volume);
        controls.thickness = Some(IndexSlider::new(
            "thickness",
            MIN_THICKNESS as i64,
            (longest as i64).max(config.thickness as i64),
            1,
            config.thickness as i64,
        )?);
        Self::start(volume, Mode::Contour(mask), config, controls, sink)
    }

    fn start(
        volume: Volume<'a, T>,
        mode: Mode<'a, T, L>,
        config: ViewConfig,
        controls: Controls,
        sink: S,
    ) -> ViewResult<Self> {
        config.validate()?;
        let window = DisplayWindow::from_volume(&volume);
        let secondary = match &mode {
            Mode::Overlay(v) | Mode::Compare(v) => DisplayWindow::from_volume(v),
            Mode::Explore | Mode::Contour(_) => window,
        };
        log::info!(
            "Starting {} session on volume {:?}",
            mode.name(),
            volume.shape()
        );
        Ok(Self {
            volume,
            mode,
            config,
            controls,
            window,
            secondary,
            sink,
        })
    }

    /// 主体数据.
    #[inline]
    pub fn volume(&self) -> Volume<'a, T> {
        self.volume
    }

    /// 显示模式.
    #[inline]
    pub fn mode(&self) -> &Mode<'a, T, L> {
        &self.mode
    }

    /// 配置.
    #[inline]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// 当前控件状态.
    #[inline]
    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// 输出端.
    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// 输出端 (可变).
    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// 主体数据平面 `plane` 第 `index` 层, 按显示方向排列并缩放到 `[0, 1]`.
    fn gray(&self, plane: Plane, index: usize) -> ViewResult<Array2<f32>> {
        let s = self.volume.slice(plane, index)?;
        Ok(self.window.rescale(s.oriented(self.config.flip_non_axial)))
    }

    /// 每个平面一个面板, 按 [`Plane::ALL`] 排列.
    fn plane_panels<F>(&self, draw: F) -> Frame
    where
        F: Fn(Plane, usize) -> ViewResult<RgbImage2d>,
    {
        let panels = Plane::ALL
            .into_iter()
            .map(|plane| {
                let i = self.controls.index_of(plane);
                Panel::new(format!("{plane} Slice {i}"), draw(plane, i))
            })
            .collect();
        Frame::new(panels, Plane::ALL.len())
    }

    /// 按当前控件状态渲染一帧. 不修改任何状态, 也不调用输出端.
    pub fn render(&self) -> Frame {
        let flip = self.config.flip_non_axial;
        match self.mode {
            Mode::Explore => self.plane_panels(|plane, i| {
                let gray = self.gray(plane, i)?;
                Ok(gray_to_rgb(gray.view()))
            }),
            Mode::Contour(mask) => {
                let thickness = self.controls.thickness().unwrap_or(self.config.thickness);
                self.plane_panels(|plane, i| {
                    let gray = self.gray(plane, i)?;
                    let labels = mask.slice(plane, i)?;
                    draw_contours(
                        gray_to_rgb(gray.view()).view(),
                        labels.oriented(flip),
                        thickness,
                        self.config.contour_color,
                    )
                })
            }
            Mode::Overlay(overlay) => {
                let alpha = self
                    .controls
                    .transparency()
                    .unwrap_or(self.config.transparency);
                self.plane_panels(|plane, i| {
                    let base = self.gray(plane, i)?;
                    let top = overlay.slice(plane, i)?;
                    let top = self.secondary.rescale(top.oriented(flip));
                    let mixed = blend(base.view(), top.view(), alpha)?;
                    Ok(gray_to_rgb(mixed.view()))
                })
            }
            Mode::Compare(after) => {
                let [before, after_index] =
                    Side::ALL.map(|side| self.controls.side_index(side) as i64);
                let to_rgb = |window: &DisplayWindow, s: PlaneSlice<'a, T>| {
                    gray_to_rgb(window.rescale(s.data()).view())
                };
                let panels = Comparison::new(self.volume, after)
                    .render_grid_each(before, after_index)
                    .into_iter()
                    .flat_map(|pair| {
                        let plane = pair.plane;
                        [
                            Panel::new(
                                format!("{plane} - Before"),
                                pair.before.map(|s| to_rgb(&self.window, s)),
                            ),
                            Panel::new(
                                format!("{plane} - After"),
                                pair.after.map(|s| to_rgb(&self.secondary, s)),
                            ),
                        ]
                    })
                    .collect();
                Frame::new(panels, 2)
            }
        }
    }

    /// 渲染当前状态并交给输出端. 用于展示初始帧.
    pub fn show(&mut self) -> ViewResult<Frame> {
        let frame = self.render();
        log::debug!("Presenting [{}]", frame.titles());
        self.sink.present(&frame)?;
        Ok(frame)
    }

    /// 控件回调: 校验并应用 `param`, 重新渲染并展示.
    ///
    /// 出错 (值不合法, 当前模式没有该控件, 或输出端失败) 时, 控件状态保持不变并返回错误.
    pub fn on_change(&mut self, param: Param) -> ViewResult<Frame> {
        let previous = self.controls.clone();
        if let Err(e) = self.controls.apply(self.mode.name(), param) {
            log::warn!("Rejected {param:?} in {} mode: {e}", self.mode.name());
            return Err(e);
        }
        match self.show() {
            Ok(frame) => Ok(frame),
            Err(e) => {
                log::warn!("Presenting after {param:?} failed: {e}");
                self.controls = previous;
                Err(e)
            }
        }
    }

    /// 关闭视图, 交还输出端.
    pub fn close(self) -> S {
        log::info!("Closing {} session", self.mode.name());
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::{DisplaySession, FrameSink, MemorySink, Param};
    use crate::compare::Side;
    use crate::consts::color::GREEN;
    use crate::{
        gray_to_rgb, DisplayWindow, Frame, Plane, ViewConfig, ViewError, ViewResult, Volume,
    };
    use ndarray::{s, Array3};

    fn init_logger() {
        let _ = simple_logger::init_with_level(log::Level::Debug);
    }

    fn ramp(shape: (usize, usize, usize)) -> Array3<f32> {
        Array3::from_shape_fn(shape, |(a, b, c)| (a + b + c) as f32)
    }

    #[test]
    fn test_explore_defaults_and_shapes() {
        init_logger();
        let a = ramp((50, 60, 70));
        let v = Volume::from_array(&a).unwrap();
        let mut session = DisplaySession::explore(v, ViewConfig::default(), MemorySink::new()).unwrap();
        let shared = session.controls().shared.unwrap();
        assert_eq!((shared.min(), shared.max(), shared.value()), (0, 49, 24));

        let frame = session.show().unwrap();
        assert_eq!(frame.columns, 3);
        assert!(frame.is_complete());
        let shape = |title: &str| frame.panel(title).unwrap().image.as_ref().unwrap().dim();
        assert_eq!(shape("Axial Slice 24"), (60, 70));
        assert_eq!(shape("Sagittal Slice 24"), (50, 70));
        assert_eq!(shape("Coronal Slice 24"), (50, 60));
        assert_eq!(session.sink().count(), 1);
    }

    #[test]
    fn test_explore_rejects_and_keeps_state() {
        init_logger();
        let a = ramp((50, 60, 70));
        let v = Volume::from_array(&a).unwrap();
        let mut session = DisplaySession::explore(v, ViewConfig::default(), MemorySink::new()).unwrap();
        let before = session.controls().clone();

        assert_eq!(
            session.on_change(Param::SharedIndex(50)).unwrap_err(),
            ViewError::IndexOutOfRange {
                plane: Plane::Axial,
                index: 50,
                extent: 50
            }
        );
        assert!(session.on_change(Param::SharedIndex(-1)).is_err());
        assert_eq!(
            session.on_change(Param::Transparency(0.3)).unwrap_err(),
            ViewError::UnsupportedControl {
                mode: "explore",
                control: "transparency"
            }
        );
        assert_eq!(session.controls(), &before);
        assert_eq!(session.sink().count(), 0);

        let frame = session.on_change(Param::SharedIndex(49)).unwrap();
        assert!(frame.panel("Sagittal Slice 49").is_some());
        assert_eq!(session.sink().count(), 1);
        assert_eq!(session.sink().last(), Some(&frame));
    }

    #[test]
    fn test_flip_non_axial() {
        let a = ramp((4, 5, 6));
        let v = Volume::from_array(&a).unwrap();
        let flipped = DisplaySession::explore(v, ViewConfig::default(), MemorySink::new())
            .unwrap()
            .render();
        let plain = DisplaySession::explore(
            v,
            ViewConfig::default().with_flip_non_axial(false),
            MemorySink::new(),
        )
        .unwrap()
        .render();

        let img = |f: &Frame, i: usize| f.panels[i].image.clone().unwrap();
        // 轴位面从不翻转.
        assert_eq!(img(&flipped, 0), img(&plain, 0));
        // 矢状面: 第 0 行对应第 3 行.
        let (f, p) = (img(&flipped, 1), img(&plain, 1));
        assert_eq!(f.row(0), p.row(3));
        assert_eq!(f.row(3), p.row(0));
    }

    fn block_mask(shape: (usize, usize, usize)) -> Array3<u8> {
        let mut m = Array3::<u8>::zeros(shape);
        m.slice_mut(s![5..15, 10..30, 10..30]).fill(1);
        m
    }

    #[test]
    fn test_contour_session() {
        init_logger();
        let a = ramp((20, 40, 40));
        let m = block_mask((20, 40, 40));
        let v = Volume::from_array(&a).unwrap();
        let mask = v.aligned(m.view()).unwrap();
        let mut session =
            DisplaySession::with_contours(v, mask, ViewConfig::default(), MemorySink::new())
                .unwrap();
        assert_eq!(session.controls().thickness(), Some(1));
        assert_eq!(session.controls().index_of(Plane::Axial), 9);

        let frame = session.show().unwrap();
        let axial = frame.panels[0].image.as_ref().unwrap();
        assert_eq!(axial[(10, 10)], GREEN);
        assert_ne!(axial[(11, 11)], GREEN);
        assert_ne!(axial[(9, 9)], GREEN);

        let frame = session.on_change(Param::Thickness(2)).unwrap();
        let axial = frame.panels[0].image.as_ref().unwrap();
        assert_eq!(axial[(11, 11)], GREEN);

        assert!(matches!(
            session.on_change(Param::Thickness(0)),
            Err(ViewError::ValueOutOfRange {
                name: "thickness",
                ..
            })
        ));
        assert_eq!(session.controls().thickness(), Some(2));

        // 切到区域之外的层: 没有轮廓.
        let frame = session.on_change(Param::Index(Plane::Axial, 0)).unwrap();
        let axial = frame.panels[0].image.as_ref().unwrap();
        assert!(axial.iter().all(|&p| p != GREEN));
        assert!(session.on_change(Param::Index(Plane::Coronal, 40)).is_err());
        assert!(session.on_change(Param::SharedIndex(0)).is_err());
    }

    #[test]
    fn test_contour_thickness_beyond_region() {
        let a = ramp((20, 40, 40));
        let m = block_mask((20, 40, 40));
        let v = Volume::from_array(&a).unwrap();
        let mask = v.aligned(m.view()).unwrap();
        let config = ViewConfig::default().with_thickness(100);
        let mut session = DisplaySession::with_contours(v, mask, config, MemorySink::new()).unwrap();
        let slider = session.controls().thickness.unwrap();
        assert_eq!((slider.min(), slider.max(), slider.value()), (1, 100, 100));

        // 整个 20x20 区域着色, 区域外不变.
        let frame = session.show().unwrap();
        let axial = frame.panels[0].image.as_ref().unwrap();
        assert_eq!(axial.iter().filter(|&&p| p == GREEN).count(), 20 * 20);
        assert_ne!(axial[(9, 20)], GREEN);

        session.on_change(Param::Thickness(65)).unwrap();
        assert_eq!(session.controls().thickness(), Some(65));

        // 缺省配置下滑块上限为最长轴.
        let mask = v.aligned(m.view()).unwrap();
        let session =
            DisplaySession::with_contours(v, mask, ViewConfig::default(), MemorySink::new())
                .unwrap();
        assert_eq!(session.controls().thickness.unwrap().max(), 40);
    }

    #[test]
    fn test_contour_shape_mismatch() {
        let a = ramp((20, 40, 40));
        let m = Array3::<u8>::zeros((20, 40, 41));
        let v = Volume::from_array(&a).unwrap();
        let mask = Volume::from_array(&m).unwrap();
        assert!(matches!(
            DisplaySession::with_contours(v, mask, ViewConfig::default(), MemorySink::new()),
            Err(ViewError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_overlay_session() {
        init_logger();
        let a = ramp((6, 7, 8));
        let b = a.mapv(|x| 100.0 - x);
        let v = Volume::from_array(&a).unwrap();
        let o = Volume::from_array(&b).unwrap();
        let config = ViewConfig::default().with_transparency(0.0);
        let mut session = DisplaySession::with_overlay(v, o, config, MemorySink::new()).unwrap();

        let base = DisplaySession::explore(v, ViewConfig::default(), MemorySink::new()).unwrap();
        let only_base = session.show().unwrap();
        let axial_index = session.controls().index_of(Plane::Axial);
        assert_eq!(only_base.panels[0].title, format!("Axial Slice {axial_index}"));

        let frame = session.on_change(Param::Transparency(0.5)).unwrap();
        let img = frame.panels[0].image.as_ref().unwrap();
        // 两者缩放后逐像素互补, 平均值恒为 0.5.
        assert!(img.iter().all(|p| (p[0] - 0.5).abs() < 1e-5));

        assert!(session.on_change(Param::Transparency(1.5)).is_err());
        assert!(session.on_change(Param::Transparency(f64::NAN)).is_err());
        assert_eq!(session.controls().transparency(), Some(0.5));
        assert!(base.render().is_complete());
    }

    #[test]
    fn test_compare_partial_failure() {
        init_logger();
        let a = ramp((4, 5, 6));
        let b = ramp((8, 8, 8));
        let before = Volume::from_array(&a).unwrap();
        let after = Volume::from_array(&b).unwrap();
        let mut session =
            DisplaySession::compare(before, after, ViewConfig::default(), MemorySink::new())
                .unwrap();
        let shared = session.controls().shared.unwrap();
        assert_eq!((shared.max(), shared.value()), (7, 0));

        let frame = session.show().unwrap();
        assert_eq!(frame.columns, 2);
        assert_eq!(frame.rows(), 3);
        assert!(frame.is_complete());
        assert_eq!(frame.panels[2].title, "Sagittal - Before");

        let frame = session.on_change(Param::SharedIndex(6)).unwrap();
        for pair in frame.panels.chunks(2) {
            assert!(pair[0].image.is_err());
            assert!(pair[1].image.is_ok());
        }
        assert!(session.on_change(Param::SharedIndex(8)).is_err());
    }

    #[test]
    fn test_compare_side_indices() {
        init_logger();
        let a = ramp((4, 5, 6));
        let b = ramp((8, 8, 8));
        let before = Volume::from_array(&a).unwrap();
        let after = Volume::from_array(&b).unwrap();
        let mut session =
            DisplaySession::compare(before, after, ViewConfig::default(), MemorySink::new())
                .unwrap();
        let sides = session.controls().sides.unwrap();
        assert!(sides.iter().all(|s| (s.max(), s.value()) == (7, 0)));

        session.on_change(Param::SideIndex(Side::After, 7)).unwrap();
        let frame = session.on_change(Param::SideIndex(Side::Before, 2)).unwrap();
        assert_eq!(session.controls().side_index(Side::Before), 2);
        assert_eq!(session.controls().side_index(Side::After), 7);
        assert!(frame.is_complete());
        let after_axial = frame.panels[1].image.as_ref().unwrap();
        assert_eq!(after_axial.dim(), (8, 8));
        let window = DisplayWindow::from_volume(&after);
        let slice = after.slice(Plane::Axial, 7).unwrap();
        let expected = gray_to_rgb(window.rescale(slice.data()).view());
        assert_eq!(after_axial, &expected);

        // 单侧越界: 状态不变.
        assert_eq!(
            session.on_change(Param::SideIndex(Side::Before, 8)).unwrap_err(),
            ViewError::IndexOutOfRange {
                plane: Plane::Axial,
                index: 8,
                extent: 8
            }
        );
        assert_eq!(session.controls().side_index(Side::Before), 2);

        // 共享滑块同时移动两侧.
        session.on_change(Param::SharedIndex(3)).unwrap();
        assert_eq!(session.controls().side_index(Side::Before), 3);
        assert_eq!(session.controls().side_index(Side::After), 3);

        let a = ramp((4, 5, 6));
        let v = Volume::from_array(&a).unwrap();
        let mut explore = DisplaySession::explore(v, ViewConfig::default(), MemorySink::new()).unwrap();
        assert_eq!(
            explore.on_change(Param::SideIndex(Side::After, 0)).unwrap_err(),
            ViewError::UnsupportedControl {
                mode: "explore",
                control: "after"
            }
        );
    }

    #[test]
    fn test_compare_is_never_flipped() {
        let a = ramp((4, 5, 6));
        let b = a.mapv(|x| x * 2.0);
        let before = Volume::from_array(&a).unwrap();
        let after = Volume::from_array(&b).unwrap();
        let frame = DisplaySession::compare(before, after, ViewConfig::default(), MemorySink::new())
            .unwrap()
            .render();

        // 第 2, 3 个面板为矢状面.
        let window = DisplayWindow::from_volume(&before);
        let plain = before.slice(Plane::Sagittal, 0).unwrap();
        let expected = gray_to_rgb(window.rescale(plain.data()).view());
        assert_eq!(frame.panels[2].image.as_ref().unwrap(), &expected);
        assert_ne!(frame.panels[2].image.as_ref().unwrap().row(0), expected.row(3));
    }

    struct BrokenSink;

    impl FrameSink for BrokenSink {
        fn present(&mut self, _: &Frame) -> ViewResult<()> {
            Err(ViewError::Sink("closed".into()))
        }
    }

    #[test]
    fn test_sink_failure_restores_state() {
        let a = ramp((4, 5, 6));
        let v = Volume::from_array(&a).unwrap();
        let mut session = DisplaySession::explore(v, ViewConfig::default(), BrokenSink).unwrap();
        let before = session.controls().clone();
        assert_eq!(
            session.on_change(Param::SharedIndex(0)).unwrap_err(),
            ViewError::Sink("closed".into())
        );
        assert_eq!(session.controls(), &before);
    }

    #[test]
    fn test_close_returns_sink() {
        let a = ramp((4, 5, 6));
        let v = Volume::from_array(&a).unwrap();
        let mut session = DisplaySession::explore(v, ViewConfig::default(), MemorySink::new()).unwrap();
        session.on_change(Param::SharedIndex(1)).unwrap();
        let sink = session.close();
        assert_eq!(sink.count(), 1);
    }
}
