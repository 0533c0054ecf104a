//! Closed-form IEC 61966-2-1 decoding.

const SRGB_THRESHOLD: f32 = 0.040_45;
const SRGB_LINEAR_SLOPE: f32 = 1.0 / 12.92;
const SRGB_OFFSET: f32 = 0.055;
const SRGB_SCALE: f32 = 1.055;
const SRGB_GAMMA: f32 = 2.4;

/// Decodes one sRGB-encoded sample to linear light.
///
/// Negative samples are decoded by magnitude and keep their sign, so
/// out-of-gamut values survive the round trip.
#[inline]
#[must_use]
pub fn srgb_to_linear(x: f32) -> f32 {
    let v = x.abs();
    let linear = if v <= SRGB_THRESHOLD {
        v * SRGB_LINEAR_SLOPE
    } else {
        ((v + SRGB_OFFSET) / SRGB_SCALE).powf(SRGB_GAMMA)
    };
    linear.copysign(x)
}

/// Decodes a row of sRGB samples into `dst`.
///
/// # Panics
/// - If `src` and `dst` differ in length
pub fn srgb_to_linear_row(src: &[f32], dst: &mut [f32]) {
    assert_eq!(src.len(), dst.len(), "sRGB rows differ in length");
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = srgb_to_linear(s);
    }
}
