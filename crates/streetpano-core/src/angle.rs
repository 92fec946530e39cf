/// Wrap a compass heading in degrees into `[0, 360)`.
///
/// Any finite value is accepted, including negative headings and headings of
/// several full turns. Non-finite input yields NaN; callers reject it with
/// their own error type.
#[inline]
pub fn normalize_heading(heading_deg: f64) -> f64 {
    let h = heading_deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}
