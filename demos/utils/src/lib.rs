//! 演示程序依赖的通用组件.

use ndarray::Array3;

const SEP: &str = "--------------------------------------------------------";

/// 简单分隔线.
#[inline]
pub fn sep() {
    println!("{SEP}");
}

/// 以 `Info` 级别初始化日志. 重复调用无害.
pub fn init_logger() {
    if simple_logger::init_with_level(log::Level::Info).is_err() {
        log::debug!("Logger already initialised");
    }
}

/// 合成体模: 一个椭球形 "躯干", 内含一个较亮的球形 "器官" 和一个更亮的小 "病灶".
pub struct Phantom {
    /// 强度体数据.
    pub scan: Array3<f32>,

    /// 标签体数据: 0 背景, 1 器官, 2 病灶.
    pub label: Array3<u8>,
}

/// 点 `p` 是否在以 `c` 为中心, 半轴为 `r` 的椭球内.
#[inline]
fn in_ellipsoid(p: (usize, usize, usize), c: [f32; 3], r: [f32; 3]) -> bool {
    let d = [p.0 as f32 - c[0], p.1 as f32 - c[1], p.2 as f32 - c[2]];
    d.iter().zip(r.iter()).map(|(d, r)| (d / r).powi(2)).sum::<f32>() <= 1.0
}

impl Phantom {
    /// 生成形状为 `shape` 的体模. 强度带有确定性的条纹纹理, 每次运行结果相同.
    pub fn new(shape: (usize, usize, usize)) -> Self {
        let (d0, d1, d2) = shape;
        let c = [d0 as f32 / 2.0, d1 as f32 / 2.0, d2 as f32 / 2.0];
        let body = [d0 as f32 * 0.45, d1 as f32 * 0.45, d2 as f32 * 0.45];
        let organ_c = [c[0], c[1] * 0.8, c[2] * 1.1];
        let organ_r = [d0 as f32 * 0.25, d1 as f32 * 0.2, d2 as f32 * 0.2];
        let lesion_c = [c[0], organ_c[1] + organ_r[1] * 0.4, organ_c[2]];
        let lesion_r = [organ_r[0] * 0.3; 3];

        let label = Array3::from_shape_fn(shape, |p| {
            if in_ellipsoid(p, lesion_c, lesion_r) {
                2
            } else if in_ellipsoid(p, organ_c, organ_r) {
                1
            } else {
                0
            }
        });
        let scan = Array3::from_shape_fn(shape, |p| {
            let texture = ((p.0 * 7 + p.1 * 3 + p.2 * 5) % 11) as f32;
            match label[p] {
                2 => 160.0 + texture,
                1 => 100.0 + texture,
                _ if in_ellipsoid(p, c, body) => 40.0 + texture,
                _ => -1000.0,
            }
        });
        Self { scan, label }
    }

    /// "变换后" 的体模: 沿第 2 轴平移 `shift` 个体素, 空出的位置填充背景值.
    pub fn shifted(&self, shift: usize) -> Array3<f32> {
        let (_, _, d2) = self.scan.dim();
        Array3::from_shape_fn(self.scan.dim(), |(a, b, c)| {
            if c >= shift && c - shift < d2 {
                self.scan[(a, b, c - shift)]
            } else {
                -1000.0
            }
        })
    }
}
