use super::*;
use crate::test_cube_root;

#[test]
fn zero_returns_add_exactly() {
    for add in [0.0f32, -0.155_954_2, 1.0, -3.75, 1e-30, f32::MAX] {
        assert_eq!(cbrt_and_add(0.0, add).to_bits(), add.to_bits());
    }
}

#[test]
fn seed_of_zero_is_zero() {
    assert_eq!(inv_cbrt_seed(0.0).to_bits(), 0);
    assert!(inv_cbrt_seed(1.0) > 0.0);
}

#[test]
fn seed_is_order_of_magnitude_correct() {
    for x in [1e-4f32, 0.01, 0.5, 1.0, 3.0, 19.0] {
        let seed = inv_cbrt_seed(x);
        let exact = 1.0 / x.cbrt();
        assert!(
            seed > exact * 0.5 && seed < exact * 2.0,
            "seed {} too far from {} for x={}",
            seed,
            exact,
            x
        );
    }
}

#[test]
fn add_is_applied_after_root() {
    let x = 0.729f32;
    let with_add = cbrt_and_add(x, 2.0);
    let without = cbrt_and_add(x, 0.0);
    assert!((with_add - without - 2.0).abs() < 1e-6);
    assert!((without - 0.9).abs() < 8e-7);
}

#[test]
fn max_error_within_bound() {
    let max_err = cube_root_max_error();
    assert!(max_err < 8E-7, "max error {:e}", max_err);
}

#[test]
fn conformance_self_test_passes() {
    test_cube_root();
}
