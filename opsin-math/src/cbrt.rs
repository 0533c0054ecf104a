#[cfg(test)]
mod tests;

/// `f32` bit pattern of `1.0` plus a third of it, used to seed `x^(-1/3)`.
pub(crate) const EXP_BIAS: i32 = 0x5480_0000;
/// One third, shifted into the exponent field.
pub(crate) const EXP_MUL: i32 = 0x002A_AAAA;

pub(crate) const ONE_THIRD: f32 = 1.0 / 3.0;
pub(crate) const FOUR_THIRDS: f32 = 4.0 / 3.0;

/// Computes an initial guess for `x^(-1/3)` by scaling the exponent field
/// of `x` by `-1/3`.
///
/// The guess is only correct to an order of magnitude. Zero has an exponent
/// field of zero, which the bias subtraction would turn into a large non-zero
/// seed, so zero maps to a zero seed instead.
#[inline(always)]
#[must_use]
pub(crate) fn inv_cbrt_seed(x: f32) -> f32 {
    let bits = x.to_bits() as i32;
    if bits == 0 {
        return 0.0;
    }
    f32::from_bits(EXP_BIAS.wrapping_sub((bits >> 23).wrapping_mul(EXP_MUL)) as u32)
}

/// Computes `cbrt(x) + add`.
///
/// `x` must be non-negative and finite; callers clamp before calling this.
/// For `x` in `[0, 20)` the absolute error is below `8e-7`, and
/// `cbrt_and_add(0.0, add)` returns exactly `add`.
///
/// This is the scalar reference for [`cbrt_and_add_x4`] and
/// [`cbrt_and_add_x8`]; all three perform the same unfused operations in the
/// same order, so they agree bit for bit.
///
/// [`cbrt_and_add_x4`]: crate::cbrt_and_add_x4
/// [`cbrt_and_add_x8`]: crate::cbrt_and_add_x8
#[inline]
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn cbrt_and_add(x: f32, add: f32) -> f32 {
    let x_3 = ONE_THIRD * x;
    let mut r = inv_cbrt_seed(x);

    // Newton-Raphson on r^3 * x - 1 = 0.
    for _ in 0..3 {
        let r2 = r * r;
        r = FOUR_THIRDS * r - x_3 * (r2 * r2);
    }

    let r2 = r * r;
    r = ONE_THIRD * (r - x * (r2 * r2)) + r;

    // x * x^(-2/3) = x^(1/3)
    let r2 = r * r;
    r2 * x + add
}

/// Largest absolute error of [`cbrt_and_add`] against [`f32::cbrt`] over
/// `[0, 20)` sampled every `1e-5`.
#[must_use]
pub fn cube_root_max_error() -> f32 {
    let mut max_err = 0.0f32;
    for x5 in 0..2_000_000u32 {
        let x = x5 as f32 * 1E-5;
        let err = (cbrt_and_add(x, 0.0) - x.cbrt()).abs();
        max_err = max_err.max(err);
    }
    max_err
}
