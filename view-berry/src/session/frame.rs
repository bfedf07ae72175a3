use crate::{ImgWriteVis, RgbImage2d, ViewError, ViewResult};
use itertools::Itertools;
use std::path::{Path, PathBuf};

/// 一个带标题的面板. 渲染失败的面板保留导致失败的错误, 不影响同一帧的其他面板.
#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    /// 标题, 如 `Axial Slice 12` 或 `Sagittal - Before`.
    pub title: String,

    /// 渲染结果.
    pub image: ViewResult<RgbImage2d>,
}

impl Panel {
    /// 直接初始化.
    #[inline]
    pub fn new(title: impl Into<String>, image: ViewResult<RgbImage2d>) -> Self {
        Self {
            title: title.into(),
            image,
        }
    }

    /// 渲染是否成功?
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.image.is_ok()
    }

    /// 由标题得到的文件名片段: 小写, 非字母数字字符替换为 `_`, 连续的 `_` 合并.
    pub fn slug(&self) -> String {
        self.title
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|s| !s.is_empty())
            .map(str::to_ascii_lowercase)
            .join("_")
    }
}

/// 一次回调渲染得到的一组面板, 按行优先排列.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// 全部面板.
    pub panels: Vec<Panel>,

    /// 每行面板数.
    pub columns: usize,
}

impl Frame {
    /// 直接初始化.
    #[inline]
    pub fn new(panels: Vec<Panel>, columns: usize) -> Self {
        Self { panels, columns }
    }

    /// 行数.
    #[inline]
    pub fn rows(&self) -> usize {
        match self.columns {
            0 => 0,
            c => self.panels.len().div_ceil(c),
        }
    }

    /// 所有面板是否都渲染成功?
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.panels.iter().all(Panel::is_ok)
    }

    /// 按标题查找面板.
    pub fn panel(&self, title: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.title == title)
    }

    /// 全部标题, 以 `", "` 连接. 用于日志.
    pub fn titles(&self) -> String {
        self.panels.iter().map(|p| p.title.as_str()).join(", ")
    }
}

/// "展示这一帧" 的输出端.
pub trait FrameSink {
    /// 展示 `frame`. 失败时返回 `ViewError::Sink`.
    fn present(&mut self, frame: &Frame) -> ViewResult<()>;
}

impl<S: FrameSink + ?Sized> FrameSink for &mut S {
    #[inline]
    fn present(&mut self, frame: &Frame) -> ViewResult<()> {
        (**self).present(frame)
    }
}

/// 在内存中保留最近一帧.
#[derive(Debug, Default)]
pub struct MemorySink {
    last: Option<Frame>,
    count: usize,
}

impl MemorySink {
    /// 空输出端.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// 最近一次展示的帧.
    #[inline]
    pub fn last(&self) -> Option<&Frame> {
        self.last.as_ref()
    }

    /// 已展示的帧数.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }
}

impl FrameSink for MemorySink {
    fn present(&mut self, frame: &Frame) -> ViewResult<()> {
        self.last = Some(frame.clone());
        self.count += 1;
        Ok(())
    }
}

/// 把每个成功的面板保存为 `<dir>/<prefix>_<slug>.png`. 失败的面板只记录警告.
#[derive(Debug, Clone)]
pub struct PngSink {
    dir: PathBuf,
    prefix: String,
}

impl PngSink {
    /// 输出到 `dir`. 目录必须已存在.
    pub fn new<P: AsRef<Path>>(dir: P, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            prefix: prefix.into(),
        }
    }

    /// 修改文件名前缀, 用于区分同一目录下的多次会话或多个时刻.
    #[inline]
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    /// 面板 `panel` 的输出路径.
    pub fn path_of(&self, panel: &Panel) -> PathBuf {
        let name = if self.prefix.is_empty() {
            format!("{}.png", panel.slug())
        } else {
            format!("{}_{}.png", self.prefix, panel.slug())
        };
        self.dir.join(name)
    }
}

impl FrameSink for PngSink {
    fn present(&mut self, frame: &Frame) -> ViewResult<()> {
        for panel in frame.panels.iter() {
            match &panel.image {
                Ok(img) => {
                    let path = self.path_of(panel);
                    img.save(&path)
                        .map_err(|e| ViewError::Sink(format!("{}: {e}", path.display())))?;
                    log::debug!("Saved {}", path.display());
                }
                Err(e) => log::warn!("Panel `{}` skipped: {e}", panel.title),
            }
        }
        Ok(())
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "plot")] {
        use crate::ImgDisplay;
        use std::time::Duration;

        /// 每个面板一个 opencv 窗口, 以面板标题为窗口名.
        #[derive(Debug, Clone, Default)]
        pub struct WindowSink {
            /// 展示后等待按键的时间. `None` 表示一直等待.
            pub wait: Option<Duration>,
        }

        impl FrameSink for WindowSink {
            fn present(&mut self, frame: &Frame) -> ViewResult<()> {
                let to_sink = |e: opencv::Error| ViewError::Sink(e.to_string());
                for panel in frame.panels.iter() {
                    match &panel.image {
                        Ok(img) => img.show(&panel.title).map_err(to_sink)?,
                        Err(e) => log::warn!("Panel `{}` skipped: {e}", panel.title),
                    }
                }
                let ms = self.wait.map_or(0, |d| d.as_millis().min(i32::MAX as u128) as i32);
                opencv::highgui::wait_key(ms).map_err(to_sink)?;
                Ok(())
            }
        }
    }
}
