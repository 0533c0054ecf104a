mod cbrt;
mod pow_exp;

#[cfg(feature = "simd")]
mod cbrt_simd;

pub use cbrt::{cbrt_and_add, cube_root_max_error};
pub use pow_exp::{expf, powf};

#[cfg(feature = "simd")]
pub use cbrt_simd::{cbrt_and_add_x4, cbrt_and_add_x8};

/// Largest allowed absolute error of the cube root over `[0, 20)`.
pub const CUBE_ROOT_MAX_ERROR: f32 = 8E-7;

/// Largest allowed difference between lanes fed identical input.
pub const CUBE_ROOT_LANE_TOLERANCE: f32 = 1.2E-7;

/// Sweeps `[0, 20)` in `1e-5` steps and asserts that the cube root meets its
/// error bound and that all vector lanes agree.
///
/// Run this before trusting the kernels on a new platform or compiler: a
/// failure means the arithmetic has been miscompiled and any encode would be
/// silently wrong.
///
/// # Panics
/// - If the maximum error reaches [`CUBE_ROOT_MAX_ERROR`]
/// - If two lanes differ by more than [`CUBE_ROOT_LANE_TOLERANCE`]
pub fn test_cube_root() {
    let mut max_err = 0.0f32;
    for x5 in 0..2_000_000u32 {
        let x = x5 as f32 * 1E-5;
        let expected = x.cbrt();
        let approx = lanes_of(x);

        for lane in &approx[1..] {
            assert!(
                (approx[0] - lane).abs() <= CUBE_ROOT_LANE_TOLERANCE,
                "cube root lanes disagree for x={}: {:?}",
                x,
                approx
            );
        }

        max_err = max_err.max((approx[0] - expected).abs());
    }
    assert!(
        max_err < CUBE_ROOT_MAX_ERROR,
        "cube root max error {:e} exceeds {:e}",
        max_err,
        CUBE_ROOT_MAX_ERROR
    );
}

#[cfg(feature = "simd")]
fn lanes_of(x: f32) -> [f32; 8] {
    cbrt_and_add_x8(wide::f32x8::splat(x), wide::f32x8::splat(0.0)).into()
}

#[cfg(not(feature = "simd"))]
fn lanes_of(x: f32) -> [f32; 1] {
    [cbrt_and_add(x, 0.0)]
}
