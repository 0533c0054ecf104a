//! Opsin absorbance mixing and the XYB combination, as row kernels.
//!
//! Linear RGB is mixed by a fixed 3x3 matrix plus bias, clamped, passed
//! through the cube root and offset so that black maps to zero, then
//! combined into X, Y and B. The scalar and vector kernels perform the same
//! operations in the same order without fusing, so they agree bit for bit.

#![allow(clippy::many_single_char_names)]


use opsin_math::cbrt_and_add;
#[cfg(feature = "simd")]
use opsin_math::cbrt_and_add_x8;
#[cfg(feature = "simd")]
use wide::f32x8;

use crate::Backend;

const K_M02: f32 = 0.078f32;
const K_M00: f32 = 0.30f32;
const K_M01: f32 = 1.0f32 - K_M02 - K_M00;

const K_M12: f32 = 0.078f32;
const K_M10: f32 = 0.23f32;
const K_M11: f32 = 1.0f32 - K_M12 - K_M10;

const K_M20: f32 = 0.243_422_69_f32;
const K_M21: f32 = 0.204_767_45_f32;
const K_M22: f32 = 1.0f32 - K_M20 - K_M21;

const K_B0: f32 = 0.003_793_073_4_f32;
const K_B1: f32 = K_B0;
const K_B2: f32 = K_B0;

pub const OPSIN_ABSORBANCE_MATRIX: [f32; 9] = [
    K_M00, K_M01, K_M02, K_M10, K_M11, K_M12, K_M20, K_M21, K_M22,
];
pub const OPSIN_ABSORBANCE_BIAS: [f32; 3] = [K_B0, K_B1, K_B2];

/// Absorbance constants prepared for one conversion.
///
/// Holds the matrix and bias together with the negated cube roots of the
/// bias, computed with the exact cube root. With the `simd` feature every
/// constant is also broadcast across eight lanes.
#[derive(Debug, Clone, Copy)]
pub struct PremulAbsorb {
    matrix: [f32; 9],
    bias: [f32; 3],
    neg_bias_cbrt: [f32; 3],
    #[cfg(feature = "simd")]
    lanes: [f32x8; 15],
}

impl PremulAbsorb {
    #[must_use]
    pub fn new() -> Self {
        let neg_bias_cbrt = [
            -OPSIN_ABSORBANCE_BIAS[0].cbrt(),
            -OPSIN_ABSORBANCE_BIAS[1].cbrt(),
            -OPSIN_ABSORBANCE_BIAS[2].cbrt(),
        ];

        #[cfg(feature = "simd")]
        let lanes = {
            let mut lanes = [f32x8::splat(0.0); 15];
            let all = OPSIN_ABSORBANCE_MATRIX
                .iter()
                .chain(OPSIN_ABSORBANCE_BIAS.iter())
                .chain(neg_bias_cbrt.iter());
            for (lane, &value) in lanes.iter_mut().zip(all) {
                *lane = f32x8::splat(value);
            }
            lanes
        };

        Self {
            matrix: OPSIN_ABSORBANCE_MATRIX,
            bias: OPSIN_ABSORBANCE_BIAS,
            neg_bias_cbrt,
            #[cfg(feature = "simd")]
            lanes,
        }
    }

    /// Value added after the cube root of each mixed channel.
    #[must_use]
    pub const fn neg_bias_cbrt(&self) -> [f32; 3] {
        self.neg_bias_cbrt
    }
}

impl Default for PremulAbsorb {
    fn default() -> Self {
        Self::new()
    }
}

/// Mixes one linear RGB pixel. The result is not clamped.
#[inline]
#[must_use]
pub fn opsin_absorbance(r: f32, g: f32, b: f32, premul: &PremulAbsorb) -> [f32; 3] {
    let m = &premul.matrix;
    let bias = &premul.bias;
    [
        m[0] * r + (m[1] * g + (m[2] * b + bias[0])),
        m[3] * r + (m[4] * g + (m[5] * b + bias[1])),
        m[6] * r + (m[7] * g + (m[8] * b + bias[2])),
    ]
}

/// Converts one linear RGB pixel to XYB.
#[inline]
#[must_use]
pub fn linear_rgb_to_xyb(r: f32, g: f32, b: f32, premul: &PremulAbsorb) -> [f32; 3] {
    let mut mixed = opsin_absorbance(r, g, b, premul);
    for (m, add) in mixed.iter_mut().zip(premul.neg_bias_cbrt.iter()) {
        if *m < 0.0 {
            *m = 0.0;
        }
        *m = cbrt_and_add(*m, *add);
    }
    mixed_to_xyb(mixed)
}

/// X is left signed; it is negative wherever the second mixed channel
/// exceeds the first.
#[inline]
#[must_use]
pub fn mixed_to_xyb(mixed: [f32; 3]) -> [f32; 3] {
    [
        0.5f32 * (mixed[0] - mixed[1]),
        0.5f32 * (mixed[0] + mixed[1]),
        mixed[2],
    ]
}

/// Converts rows of linear RGB to rows of XYB.
///
/// All six rows must have the same length. Inputs and outputs are distinct
/// buffers.
pub fn linear_rows_to_xyb(
    backend: Backend,
    rgb: [&[f32]; 3],
    xyb: [&mut [f32]; 3],
    premul: &PremulAbsorb,
) {
    let len = xyb[0].len();
    assert!(
        rgb.iter().all(|row| row.len() == len) && xyb.iter().all(|row| row.len() == len),
        "XYB kernel rows differ in length"
    );

    match backend {
        #[cfg(feature = "simd")]
        Backend::Wide => rows_to_xyb_wide(rgb, xyb, premul),
        _ => rows_to_xyb_scalar(rgb, xyb, premul),
    }
}

fn rows_to_xyb_scalar(rgb: [&[f32]; 3], xyb: [&mut [f32]; 3], premul: &PremulAbsorb) {
    let [r, g, b] = rgb;
    let [x_out, y_out, b_out] = xyb;
    for i in 0..x_out.len() {
        let [x, y, bb] = linear_rgb_to_xyb(r[i], g[i], b[i], premul);
        x_out[i] = x;
        y_out[i] = y;
        b_out[i] = bb;
    }
}

#[cfg(feature = "simd")]
#[inline]
pub(crate) fn load8(src: &[f32]) -> f32x8 {
    let mut arr = [0.0f32; 8];
    arr.copy_from_slice(&src[..8]);
    f32x8::new(arr)
}

#[cfg(feature = "simd")]
#[inline]
pub(crate) fn store8(v: f32x8, dst: &mut [f32]) {
    let arr: [f32; 8] = v.into();
    dst[..8].copy_from_slice(&arr);
}

#[cfg(feature = "simd")]
fn rows_to_xyb_wide(rgb: [&[f32]; 3], xyb: [&mut [f32]; 3], premul: &PremulAbsorb) {
    let [r, g, b] = rgb;
    let [x_out, y_out, b_out] = xyb;
    let len = x_out.len();
    let whole = len / 8 * 8;

    let k = &premul.lanes;
    let zero = f32x8::splat(0.0);
    let half = f32x8::splat(0.5);

    for i in (0..whole).step_by(8) {
        let rv = load8(&r[i..]);
        let gv = load8(&g[i..]);
        let bv = load8(&b[i..]);

        let mixed0 = k[0] * rv + (k[1] * gv + (k[2] * bv + k[9]));
        let mixed1 = k[3] * rv + (k[4] * gv + (k[5] * bv + k[10]));
        let mixed2 = k[6] * rv + (k[7] * gv + (k[8] * bv + k[11]));

        let mixed0 = cbrt_and_add_x8(mixed0.max(zero), k[12]);
        let mixed1 = cbrt_and_add_x8(mixed1.max(zero), k[13]);
        let mixed2 = cbrt_and_add_x8(mixed2.max(zero), k[14]);

        store8(half * (mixed0 - mixed1), &mut x_out[i..]);
        store8(half * (mixed0 + mixed1), &mut y_out[i..]);
        store8(mixed2, &mut b_out[i..]);
    }

    if whole < len {
        rows_to_xyb_scalar(
            [&r[whole..], &g[whole..], &b[whole..]],
            [&mut x_out[whole..], &mut y_out[whole..], &mut b_out[whole..]],
            premul,
        );
    }
}
