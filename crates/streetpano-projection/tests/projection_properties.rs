use std::f64::consts::{FRAC_PI_2, PI};

use streetpano_core::RgbImage;
use streetpano_projection::{
    overlap_percent, project, project_many, project_plan, CropParams, CropRequest,
};

fn coordinate_pano(width: usize, height: usize) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        [(x % 256) as u8, (x / 256) as u8, y as u8]
    })
    .expect("pano")
}

fn decode(px: [u8; 3]) -> (i64, i64) {
    (px[0] as i64 + 256 * px[1] as i64, px[2] as i64)
}

/// Straight-line scalar rendition of the projection for one output pixel.
fn reference_sample(
    width: usize,
    height: usize,
    request: &CropRequest,
    col: usize,
    row: usize,
) -> (i64, i64) {
    let n = request.out_size as f64;
    let f = (n / 2.0) / (request.fov_deg.to_radians() / 2.0).tan();
    let (x, y, z) = (col as f64 - n / 2.0, row as f64 - n / 2.0, f);
    let norm = (x * x + y * y + z * z).sqrt();
    let (x, y, z) = (x / norm, y / norm, z / norm);

    let (sp, cp) = request.pitch_deg.to_radians().sin_cos();
    let (y, z) = (cp * y - sp * z, sp * y + cp * z);

    let (sh, ch) = request.heading_deg.rem_euclid(360.0).to_radians().sin_cos();
    let (x, z) = (ch * x + sh * z, -sh * x + ch * z);

    let lon = x.atan2(z);
    let lat = y.clamp(-1.0, 1.0).asin();
    let sx = ((lon / PI + 1.0) / 2.0 * width as f64).clamp(0.0, width as f64 - 1.0);
    let sy = ((lat / FRAC_PI_2 + 1.0) / 2.0 * height as f64).clamp(0.0, height as f64 - 1.0);
    (sx.round() as i64, sy.round() as i64)
}

#[test]
fn uniform_panorama_gives_uniform_crops() {
    let color = [37, 142, 201];
    let pano = RgbImage::filled(200, 100, color).expect("pano");
    for (heading, pitch, fov) in [
        (0.0, 0.0, 90.0),
        (123.4, 45.0, 30.0),
        (-400.0, -80.0, 170.0),
        (359.99, 89.0, 1.0),
    ] {
        let crop = project(&pano.view(), &CropRequest::new(heading, pitch, fov, 33)).expect("crop");
        assert!(
            crop.image.data.chunks_exact(3).all(|p| p == color),
            "heading={heading} pitch={pitch} fov={fov}"
        );
    }
}

#[test]
fn identical_requests_give_identical_bytes() {
    let pano = coordinate_pano(512, 256);
    let request = CropRequest::new(77.0, -12.5, 75.0, 96);
    let a = project(&pano.view(), &request).expect("first");
    let b = project(&pano.view(), &request).expect("second");
    assert_eq!(a.image.data, b.image.data);
}

#[test]
fn matches_scalar_reference_within_one_pixel() {
    let (w, h) = (512, 256);
    let pano = coordinate_pano(w, h);
    for request in [
        CropRequest::new(0.0, 0.0, 90.0, 48),
        CropRequest::new(200.0, 20.0, 60.0, 40),
        CropRequest::new(315.0, -35.0, 120.0, 31),
    ] {
        let crop = project(&pano.view(), &request).expect("crop");
        for row in 0..request.out_size {
            for col in 0..request.out_size {
                let (gx, gy) = decode(crop.image.pixel(col, row));
                let (rx, ry) = reference_sample(w, h, &request, col, row);
                let dx = (gx - rx).abs();
                let dx = dx.min(w as i64 - dx);
                assert!(
                    dx <= 1 && (gy - ry).abs() <= 1,
                    "{request:?} at ({col}, {row}): got ({gx}, {gy}), expected ({rx}, {ry})"
                );
            }
        }
    }
}

#[test]
fn batch_matches_single_crops_in_order() {
    let pano = coordinate_pano(256, 128);
    let plan = CropParams {
        fov_deg: 90.0,
        out_size: 24,
        heading_step_deg: 90.0,
        pitches_deg: vec![-20.0, 0.0],
    }
    .plan()
    .expect("plan");

    let batch = project_plan(&pano.view(), &plan).expect("batch");
    assert_eq!(batch.len(), 8);

    for (crop, request) in batch.iter().zip(plan.requests()) {
        let single = project(&pano.view(), &request).expect("single");
        assert_eq!(crop, &single);
    }

    let again = project_many(&pano.view(), &plan.requests()).expect("again");
    assert_eq!(batch, again);
}

#[test]
fn default_sweep_overlaps_by_half() {
    let params = CropParams::default();
    assert_eq!(overlap_percent(params.fov_deg, params.heading_step_deg), 50.0);
}
