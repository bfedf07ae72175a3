//! 在合成体模上依次运行四种显示模式, 把每一帧保存为 PNG.
//!
//! 用法: `phantom [输出目录] [--shift N] [--thickness N]`, 缺省输出到 `./snapshots`.

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use utils::{init_logger, sep, Phantom};
use view_berry::prelude::*;

const SHAPE: Idx3d = (40, 48, 56);

#[derive(Parser, Debug)]
struct Args {
    /// PNG 输出目录, 不存在时创建.
    #[arg(default_value = "snapshots")]
    out_dir: PathBuf,

    /// "变换后" 体模沿第 2 轴的平移量 (体素).
    #[arg(long, default_value_t = 4)]
    shift: usize,

    /// 轮廓模式的初始线宽.
    #[arg(long, default_value_t = 2)]
    thickness: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logger();
    let args = Args::parse();
    let dir = args.out_dir;
    std::fs::create_dir_all(&dir)?;
    let phantom = Phantom::new(SHAPE);
    let after = phantom.shifted(args.shift);

    let scan = Volume::from_array(&phantom.scan)?;
    let label = scan.aligned(phantom.label.view())?;
    let moved = Volume::from_array(&after)?;
    let config = ViewConfig::default();

    sep();
    let mut explore = DisplaySession::explore(scan, config.clone(), PngSink::new(&dir, "explore"))?;
    explore.show()?;
    explore.on_change(Param::SharedIndex(10))?;
    if let Err(e) = explore.on_change(Param::SharedIndex(SHAPE.0 as i64)) {
        log::warn!("Expected rejection: {e}");
    }
    explore.close();

    sep();
    let mut contour = DisplaySession::with_contours(
        scan,
        label,
        config.clone().with_thickness(args.thickness),
        PngSink::new(&dir, "contour"),
    )?;
    contour.show()?;
    for (plane, index) in [(Plane::Sagittal, 20), (Plane::Coronal, 30)] {
        contour.on_change(Param::Index(plane, index))?;
    }
    contour.sink_mut().set_prefix("contour_thick");
    contour.on_change(Param::Thickness(4))?;
    contour.close();

    sep();
    let mut overlay = DisplaySession::with_overlay(
        scan,
        moved,
        config.clone(),
        PngSink::new(&dir, "overlay"),
    )?;
    overlay.show()?;
    overlay.sink_mut().set_prefix("overlay_alpha");
    overlay.on_change(Param::Transparency(0.8))?;
    overlay.close();

    sep();
    let mut compare =
        DisplaySession::compare(scan, moved, config, PngSink::new(&dir, "compare"))?;
    compare.on_change(Param::SharedIndex(20))?;
    compare.sink_mut().set_prefix("compare_sides");
    compare.on_change(Param::SideIndex(Side::After, 24))?;
    compare.close();

    sep();
    log::info!("Snapshots written to {}", dir.display());
    Ok(())
}
