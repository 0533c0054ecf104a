#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

use core::f32::consts::LOG2_E;

// Polynomial exp2/log2 after José Fonseca's SSE2 pow:
// https://jrfonseca.blogspot.com/2008/09/fast-sse2-pow-tables-or-polynomials.html
const EXP2_POLY: [f32; 6] = [
    9.999_999_4E-1,
    6.931_531E-1,
    2.401_536_1E-1,
    5.582_631_8E-2,
    8.989_34E-3,
    1.877_576_7E-3,
];
const LOG2_POLY: [f32; 6] = [
    3.115_79,
    -3.324_199,
    2.598_845_2,
    -1.231_530_3,
    3.182_133_7E-1,
    -3.443_600_6E-2,
];

/// Computes `x` raised to the power of `y`.
///
/// With the `fastmath` feature this is a polynomial approximation with a
/// relative error around `1e-4`, which is plenty for transfer curves but not
/// for the cube root in the opsin kernels.
#[must_use]
pub fn powf(x: f32, y: f32) -> f32 {
    if cfg!(feature = "fastmath") {
        exp2(log2(x) * y)
    } else {
        x.powf(y)
    }
}

/// Computes e raised to the power of `x`.
#[must_use]
pub fn expf(x: f32) -> f32 {
    if cfg!(feature = "fastmath") {
        let t = LOG2_E * x;
        let whole = t.floor();
        exp2(whole) * exp2(t - whole)
    } else {
        x.exp()
    }
}

fn exp2(x: f32) -> f32 {
    let x = x.clamp(-126.99999, 129.0);
    // Truncates toward zero; x is clamped so the cast cannot saturate.
    let ipart = (x - 0.5) as i32;
    let fpart = x - ipart as f32;

    let scale = f32::from_bits(((ipart + 127) << 23) as u32);
    scale * horner(fpart, &EXP2_POLY)
}

fn log2(x: f32) -> f32 {
    const EXP_MASK: u32 = 0x7F80_0000;
    const MANT_MASK: u32 = 0x007F_FFFF;

    let bits = x.to_bits();
    let exp = (((bits & EXP_MASK) >> 23) as i32 - 127) as f32;
    let mant = f32::from_bits((bits & MANT_MASK) | 1f32.to_bits());

    horner(mant, &LOG2_POLY) * (mant - 1.0) + exp
}

/// Evaluates `c[0] + x * (c[1] + x * (...))`.
#[inline]
fn horner(x: f32, coeffs: &[f32]) -> f32 {
    coeffs
        .iter()
        .rev()
        .fold(0.0, |acc, &c| multiply_add(x, acc, c))
}

/// Computes `(a * b) + c`, fused when the target has FMA.
#[inline]
#[allow(clippy::suboptimal_flops)]
fn multiply_add(a: f32, b: f32, c: f32) -> f32 {
    if cfg!(target_feature = "fma") {
        a.mul_add(b, c)
    } else {
        a * b + c
    }
}
