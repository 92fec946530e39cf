#![cfg(feature = "image")]

use streetpano::io::{load_json, CropReport, CROP_REPORT_FILE};
use streetpano::pipeline::{load_rgb, save_rgb, stitch_dir, tile_path, write_crops};
use streetpano::projection::CropPlan;
use streetpano::{PipelineError, RgbImage};

fn tile(seed: u8) -> RgbImage {
    RgbImage::from_fn(8, 8, |x, y| [seed, x as u8, y as u8]).expect("tile")
}

#[test]
fn stitches_a_tile_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    // zoom 1 is a 2x1 grid
    save_rgb(&tile(10), tile_path(dir.path(), 1, 0, 0)).unwrap();
    save_rgb(&tile(20), tile_path(dir.path(), 1, 1, 0)).unwrap();
    // other zooms and unrelated files are ignored
    save_rgb(&tile(99), tile_path(dir.path(), 2, 0, 0)).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();

    let pano = stitch_dir(dir.path(), 1).expect("stitch");
    assert_eq!((pano.width, pano.height), (16, 8));
    assert_eq!(pano.pixel(3, 5), [10, 3, 5]);
    assert_eq!(pano.pixel(11, 5), [20, 3, 5]);
}

#[test]
fn missing_tile_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    save_rgb(&tile(10), tile_path(dir.path(), 1, 0, 0)).unwrap();
    let err = stitch_dir(dir.path(), 1).unwrap_err();
    assert!(matches!(err, PipelineError::Tile(_)), "{err:?}");
}

#[test]
fn empty_directory_has_no_tiles() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = stitch_dir(dir.path(), 0).unwrap_err();
    assert!(matches!(err, PipelineError::NoTiles { zoom: 0, .. }), "{err:?}");
}

#[test]
fn png_round_trip_is_lossless() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("pano.png");
    let pano = RgbImage::from_fn(20, 10, |x, y| [x as u8 * 7, y as u8 * 11, 3]).unwrap();
    save_rgb(&pano, &path).unwrap();
    assert_eq!(load_rgb(&path).unwrap(), pano);
}

#[test]
fn writes_crops_and_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pano = RgbImage::filled(64, 32, [5, 6, 7]).unwrap();
    let plan = CropPlan::overlapping(90.0, 90.0, &[-20.0, 0.0], 12).unwrap();

    let report = write_crops("pano.png", &pano, &plan, dir.path()).expect("crops");
    assert_eq!(report.crops.len(), 8);
    assert_eq!(report.crops[0].file, "h000_dn20.png");
    assert_eq!(report.crops[7].file, "h270_p00.png");

    for record in &report.crops {
        let crop = load_rgb(dir.path().join(&record.file)).expect("crop on disk");
        assert_eq!((crop.width, crop.height), (12, 12));
        assert_eq!(crop.pixel(6, 6), [5, 6, 7]);
    }

    let on_disk: CropReport = load_json(dir.path().join(CROP_REPORT_FILE)).unwrap();
    assert_eq!(on_disk, report);
    assert_eq!(on_disk.overlap_percent, Some(0.0));
}

#[test]
fn sub_degree_pitches_are_rejected_before_writing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("crops");
    let pano = RgbImage::filled(64, 32, [5, 6, 7]).unwrap();
    // both pitches are tagged up20
    let plan = CropPlan::overlapping(90.0, 180.0, &[20.2, 20.7], 8).unwrap();

    let err = write_crops("pano.png", &pano, &plan, &out).unwrap_err();
    match err {
        PipelineError::DuplicateCropFile {
            file,
            first,
            second,
        } => {
            assert_eq!(file, "h000_up20.png");
            assert_eq!((first, second), (0, 2));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(!out.exists());
}
