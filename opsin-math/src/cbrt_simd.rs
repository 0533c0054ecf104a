//! Vectorized cube root using the `wide` lane types.
//!
//! The seed is computed per lane with the same bit manipulation as the scalar
//! version; the Newton-Raphson refinement then runs on whole vectors.

use wide::{f32x4, f32x8};

use crate::cbrt::{inv_cbrt_seed, FOUR_THIRDS, ONE_THIRD};

macro_rules! cbrt_and_add_lanes {
    ($lanes:literal) => {
        paste::paste! {
            #[doc = "Computes `cbrt(x) + add` on " $lanes " lanes."]
            ///
            /// Every lane produces exactly the result of the scalar
            /// [`cbrt_and_add`](crate::cbrt_and_add) for that lane's input.
            #[inline]
            #[must_use]
            pub fn [<cbrt_and_add_x $lanes>](x: [<f32x $lanes>], add: [<f32x $lanes>]) -> [<f32x $lanes>] {
                let x_arr: [f32; $lanes] = x.into();
                let mut seed = [0.0f32; $lanes];
                for (s, &v) in seed.iter_mut().zip(x_arr.iter()) {
                    *s = inv_cbrt_seed(v);
                }

                let k1_3 = [<f32x $lanes>]::splat(ONE_THIRD);
                let k4_3 = [<f32x $lanes>]::splat(FOUR_THIRDS);
                let x_3 = k1_3 * x;
                let mut r = [<f32x $lanes>]::new(seed);

                for _ in 0..3 {
                    let r2 = r * r;
                    r = k4_3 * r - x_3 * (r2 * r2);
                }

                let r2 = r * r;
                r = k1_3 * (r - x * (r2 * r2)) + r;

                let r2 = r * r;
                r2 * x + add
            }
        }
    };
}

cbrt_and_add_lanes!(4);
cbrt_and_add_lanes!(8);
