//! 端到端场景.

use ndarray::{s, Array2, Array3};
use view_berry::prelude::*;

fn ramp(shape: (usize, usize, usize)) -> Array3<f32> {
    Array3::from_shape_fn(shape, |(a, b, c)| (a * 3 + b * 2 + c) as f32)
}

#[test]
fn sagittal_slice_of_50_60_70() {
    let a = ramp((50, 60, 70));
    let v = Volume::from_array(&a).unwrap();
    assert_eq!(v.slice_checked(Plane::Sagittal, 30).unwrap().shape(), (50, 70));
    assert_eq!(
        v.slice_checked(Plane::Sagittal, 70).unwrap_err(),
        ViewError::IndexOutOfRange {
            plane: Plane::Sagittal,
            index: 70,
            extent: 60
        }
    );
}

#[test]
fn quarter_blend_of_constant_images() {
    let base = Array2::<f32>::zeros((32, 32));
    let overlay = Array2::<f32>::from_elem((32, 32), 100.0);
    let out = blend(base.view(), overlay.view(), 0.25).unwrap();
    assert!(out.iter().all(|&v| v == 25.0));
}

#[test]
fn shape_mismatch_is_reported_by_both_renderers() {
    let base = Array2::<f32>::zeros((10, 10));
    let other = Array2::<f32>::zeros((10, 11));
    let mask = Array2::<u8>::zeros((10, 11));
    let expected = ViewError::ShapeMismatch {
        expected: vec![10, 10],
        found: vec![10, 11],
    };
    assert_eq!(blend(base.view(), other.view(), 0.5).unwrap_err(), expected);
    assert_eq!(
        draw_contours(base.view(), mask.view(), 1, 1.0).unwrap_err(),
        expected
    );
}

#[test]
fn contours_of_a_mask_slice() {
    let mut m = Array3::<u8>::zeros((8, 16, 16));
    m.slice_mut(s![.., 2..6, 2..6]).fill(1);
    m.slice_mut(s![.., 9..14, 9..14]).fill(2);
    let mask = Volume::from_array(&m).unwrap();
    let slice = mask.slice(Plane::Axial, 4).unwrap();

    let contours = find_contours(slice.data());
    assert_eq!(contours.len(), 2);
    assert_eq!(contours[0].label, 1);
    assert_eq!(contours[0].points.len(), 12);
    assert_eq!(contours[1].label, 2);
    assert_eq!(contours[1].points.len(), 16);

    let base = Array2::<Rgb>::from_elem((16, 16), [0.2; 3]);
    let out = draw_contours(base.view(), slice.data(), 1, GREEN).unwrap();
    let painted = out.iter().filter(|&&p| p == GREEN).count();
    assert_eq!(painted, 12 + 16);
}

#[test]
fn session_walkthrough() {
    let _ = simple_logger::init_with_level(log::Level::Info);

    let a = ramp((30, 40, 50));
    let mut m = Array3::<u8>::zeros((30, 40, 50));
    m.slice_mut(s![10..20, 10..30, 10..40]).fill(1);
    let v = Volume::from_array(&a).unwrap();
    let mask = v.aligned(m.view()).unwrap();

    let mut session =
        DisplaySession::with_contours(v, mask, ViewConfig::default(), MemorySink::new()).unwrap();
    session.show().unwrap();
    for i in [0, 15, 29] {
        let frame = session.on_change(Param::Index(Plane::Axial, i)).unwrap();
        assert_eq!(frame.panels[0].title, format!("Axial Slice {i}"));
    }
    assert!(session.on_change(Param::Index(Plane::Axial, 30)).is_err());
    assert!(session.on_change(Param::Index(Plane::Sagittal, -1)).is_err());
    let sink = session.close();
    assert_eq!(sink.count(), 4);
    assert_eq!(sink.last().unwrap().panels[0].title, "Axial Slice 29");
}

#[test]
fn compare_session_writes_pngs() {
    let a = ramp((6, 6, 6));
    let b = ramp((6, 7, 8));
    let dir = std::env::temp_dir().join(format!("view-berry-compare-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let before = Volume::from_array(&a).unwrap();
    let after = Volume::from_array(&b).unwrap();
    let mut session = DisplaySession::compare(
        before,
        after,
        ViewConfig::default(),
        PngSink::new(&dir, "cmp"),
    )
    .unwrap();
    session.show().unwrap();
    assert!(dir.join("cmp_axial_before.png").is_file());
    assert!(dir.join("cmp_coronal_after.png").is_file());

    let _ = std::fs::remove_dir_all(&dir);
}
