//! Full-range BT.601 RGB to YCbCr, as defined by JFIF (ITU-T T.871).
//!
//! Samples are in `0.0..=255.0`. Y is centered on zero, so all three output
//! channels are signed.

#![allow(clippy::many_single_char_names)]


use rayon::ThreadPool;
#[cfg(feature = "simd")]
use wide::f32x8;

#[cfg(feature = "simd")]
use crate::rgb_xyb::{load8, store8};
use crate::{run_on_pool, Backend, Image3F, ImageF};

const K_R: f32 = 0.299;
const K_G: f32 = 0.587;
const K_B: f32 = 0.114;
const K_AMP_R: f32 = 0.701;
const K_AMP_B: f32 = 0.886;
const K_DIFF_R: f32 = K_AMP_R + K_R;
const K_DIFF_B: f32 = K_AMP_B + K_B;
const K_NORM_R: f32 = 1.0 / (K_AMP_R + K_G + K_B);
const K_NORM_B: f32 = 1.0 / (K_R + K_G + K_AMP_B);
const K_OFFSET: f32 = 128.0;

/// Side of the square area one stripe task covers.
pub const GROUP_DIM: usize = 256;

/// Rows per stripe, so that a stripe covers about `GROUP_DIM²` samples.
///
/// A zero width is treated as one column.
#[must_use]
pub const fn lines_per_group(width: usize) -> usize {
    let width = if width == 0 { 1 } else { width };
    (GROUP_DIM * GROUP_DIM + width - 1) / width
}

#[inline]
fn ycbcr_pixel(r: f32, g: f32, b: f32) -> [f32; 3] {
    let y_base = r * K_R + g * K_G + b * K_B;
    [
        y_base - K_OFFSET,
        (b * K_DIFF_B - y_base) * K_NORM_B,
        (r * K_DIFF_R - y_base) * K_NORM_R,
    ]
}

#[cfg(feature = "simd")]
#[inline]
fn ycbcr_lanes(r: f32x8, g: f32x8, b: f32x8) -> [f32x8; 3] {
    let y_base = r * f32x8::splat(K_R) + g * f32x8::splat(K_G) + b * f32x8::splat(K_B);
    [
        y_base - f32x8::splat(K_OFFSET),
        (b * f32x8::splat(K_DIFF_B) - y_base) * f32x8::splat(K_NORM_B),
        (r * f32x8::splat(K_DIFF_R) - y_base) * f32x8::splat(K_NORM_R),
    ]
}

fn ycbcr_row(backend: Backend, rgb: [&[f32]; 3], out: [&mut [f32]; 3]) {
    let [r, g, b] = rgb;
    let [y, cb, cr] = out;
    let start = match backend {
        #[cfg(feature = "simd")]
        Backend::Wide => {
            let whole = y.len() / 8 * 8;
            for i in (0..whole).step_by(8) {
                let [yv, cbv, crv] = ycbcr_lanes(load8(&r[i..]), load8(&g[i..]), load8(&b[i..]));
                store8(yv, &mut y[i..]);
                store8(cbv, &mut cb[i..]);
                store8(crv, &mut cr[i..]);
            }
            whole
        }
        _ => 0,
    };

    for i in start..y.len() {
        [y[i], cb[i], cr[i]] = ycbcr_pixel(r[i], g[i], b[i]);
    }
}

// Each sample is loaded before anything is stored at its position.
fn ycbcr_row_in_place(backend: Backend, rows: [&mut [f32]; 3]) {
    let [c0, c1, c2] = rows;
    let start = match backend {
        #[cfg(feature = "simd")]
        Backend::Wide => {
            let whole = c0.len() / 8 * 8;
            for i in (0..whole).step_by(8) {
                let [yv, cbv, crv] =
                    ycbcr_lanes(load8(&c0[i..]), load8(&c1[i..]), load8(&c2[i..]));
                store8(yv, &mut c0[i..]);
                store8(cbv, &mut c1[i..]);
                store8(crv, &mut c2[i..]);
            }
            whole
        }
        _ => 0,
    };

    for i in start..c0.len() {
        [c0[i], c1[i], c2[i]] = ycbcr_pixel(c0[i], c1[i], c2[i]);
    }
}

/// Converts the R, G and B planes into the Y, Cb and Cr planes.
///
/// Each task covers a stripe of [`lines_per_group`] rows. Images with no
/// rows or no columns are left untouched.
///
/// # Panics
/// - If the six planes do not all have the same dimensions
pub fn rgb_to_ycbcr(
    r: &ImageF,
    g: &ImageF,
    b: &ImageF,
    y: &mut ImageF,
    cb: &mut ImageF,
    cr: &mut ImageF,
    pool: Option<&ThreadPool>,
) {
    rgb_to_ycbcr_with_backend(Backend::active(), r, g, b, y, cb, cr, pool);
}

/// [`rgb_to_ycbcr`] with an explicitly chosen kernel backend.
///
/// # Panics
/// - If the six planes do not all have the same dimensions
#[allow(clippy::too_many_arguments)]
pub fn rgb_to_ycbcr_with_backend(
    backend: Backend,
    r: &ImageF,
    g: &ImageF,
    b: &ImageF,
    y: &mut ImageF,
    cb: &mut ImageF,
    cr: &mut ImageF,
    pool: Option<&ThreadPool>,
) {
    let width = r.width();
    let height = r.height();
    let dims = (width, height);
    for plane in [g, b, &*y, &*cb, &*cr] {
        assert_eq!(
            (plane.width(), plane.height()),
            dims,
            "YCbCr planes differ in size"
        );
    }
    if width == 0 || height == 0 {
        return;
    }

    let lines = lines_per_group(width);
    let stride = r.stride();
    let tasks = y
        .stripes_mut(lines)
        .zip(cb.stripes_mut(lines))
        .zip(cr.stripes_mut(lines))
        .map(|((y, cb), cr)| [y, cb, cr])
        .collect::<Vec<_>>();

    run_on_pool(pool, tasks, "RgbToYcbCr", |idx, stripe| {
        let [ys, cbs, crs] = stripe;
        let rows = ys
            .chunks_exact_mut(stride)
            .zip(cbs.chunks_exact_mut(stride))
            .zip(crs.chunks_exact_mut(stride));
        for (k, ((y_row, cb_row), cr_row)) in rows.enumerate() {
            let row = idx * lines + k;
            ycbcr_row(
                backend,
                [r.padded_row(row), g.padded_row(row), b.padded_row(row)],
                [y_row, cb_row, cr_row],
            );
        }
    });
}

/// Converts an RGB image to YCbCr in place: planes 0, 1 and 2 become Y, Cb
/// and Cr.
///
/// Gives the same result as [`rgb_to_ycbcr`] into separate planes.
pub fn rgb_to_ycbcr_in_place(image: &mut Image3F, pool: Option<&ThreadPool>) {
    rgb_to_ycbcr_in_place_with_backend(Backend::active(), image, pool);
}

/// [`rgb_to_ycbcr_in_place`] with an explicitly chosen kernel backend.
pub fn rgb_to_ycbcr_in_place_with_backend(
    backend: Backend,
    image: &mut Image3F,
    pool: Option<&ThreadPool>,
) {
    let width = image.width();
    if width == 0 || image.height() == 0 {
        return;
    }

    let stride = image.plane(0).stride();
    let tasks = image.stripes_mut(lines_per_group(width));
    run_on_pool(pool, tasks, "RgbToYcbCr", |_, stripe| {
        let [s0, s1, s2] = stripe;
        let rows = s0
            .chunks_exact_mut(stride)
            .zip(s1.chunks_exact_mut(stride))
            .zip(s2.chunks_exact_mut(stride));
        for ((c0, c1), c2) in rows {
            ycbcr_row_in_place(backend, [c0, c1, c2]);
        }
    });
}

/// Inverse of [`rgb_to_ycbcr_in_place`]: planes 0, 1 and 2 go from Y, Cb and
/// Cr back to R, G and B.
pub fn ycbcr_to_rgb(image: &mut Image3F, pool: Option<&ThreadPool>) {
    const INV_NORM_R: f32 = K_AMP_R + K_G + K_B;
    const INV_NORM_B: f32 = K_R + K_G + K_AMP_B;

    let width = image.width();
    if width == 0 || image.height() == 0 {
        return;
    }

    let tasks = image.stripes_mut(lines_per_group(width));
    run_on_pool(pool, tasks, "YcbCrToRgb", |_, stripe| {
        let [c0, c1, c2] = stripe;
        for ((y, cb), cr) in c0.iter_mut().zip(c1.iter_mut()).zip(c2.iter_mut()) {
            let y_base = *y + K_OFFSET;
            let r = (*cr * INV_NORM_R + y_base) / K_DIFF_R;
            let b = (*cb * INV_NORM_B + y_base) / K_DIFF_B;
            let g = (y_base - K_R * r - K_B * b) / K_G;
            *y = r;
            *cb = g;
            *cr = b;
        }
    });
}
