//! Conversion of arbitrary encodings to linear light.
//!
//! [`to_xyb`](crate::to_xyb) only handles linear and sRGB input itself;
//! everything else goes through a [`ColorManagement`] implementation.
//! [`ParametricCms`] covers the transfer functions and primaries that
//! `av-data` can describe. Callers with ICC profiles can plug in their own.

#[cfg(test)]
mod tests;

mod primaries;
mod transfer;

use rayon::ThreadPool;

pub use self::primaries::primaries_transform;
pub use self::transfer::{linearize_fn, LinearizeFn};
use self::{primaries::transform_rows, transfer::linearize_row};
use crate::{run_on_pool, ColorEncoding, ConversionError, Image3F, ImageBundle};

/// Brings images into a linear target encoding.
pub trait ColorManagement: Sync {
    /// Returns `input` converted to `target`, with the dimensions of
    /// `input`.
    ///
    /// # Errors
    /// - If the conversion between the two encodings is not supported
    fn transform(
        &self,
        input: &ImageBundle,
        target: &ColorEncoding,
        pool: Option<&ThreadPool>,
    ) -> Result<Image3F, ConversionError>;
}

/// Color management for encodings described by an `av-data` transfer
/// characteristic and set of primaries.
///
/// Samples are linearized with the source transfer curve, then converted
/// between primaries with a Bradford-adapted matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParametricCms;

impl ColorManagement for ParametricCms {
    fn transform(
        &self,
        input: &ImageBundle,
        target: &ColorEncoding,
        pool: Option<&ThreadPool>,
    ) -> Result<Image3F, ConversionError> {
        if !target.is_linear() {
            return Err(ConversionError::NonLinearTarget);
        }

        let source = input.c_current();
        let curve = linearize_fn(source.transfer)?;
        let matrix = primaries_transform(source.primaries, target.primaries)?;
        log::debug!(
            "Converting {}/{} to linear {}",
            source.primaries,
            source.transfer,
            target.primaries
        );

        let width = input.width();
        let src = input.color();
        let mut out = Image3F::new(width, input.height());
        run_on_pool(pool, out.rows_mut(), "ParametricCms", |y, rows| {
            let [r, g, b] = rows;
            let [r, g, b] = [&mut r[..width], &mut g[..width], &mut b[..width]];
            r.copy_from_slice(src.plane_row(0, y));
            g.copy_from_slice(src.plane_row(1, y));
            b.copy_from_slice(src.plane_row(2, y));

            linearize_row(curve, r);
            linearize_row(curve, g);
            linearize_row(curve, b);
            if let Some(matrix) = &matrix {
                transform_rows(matrix, [r, g, b]);
            }
        });

        Ok(out)
    }
}
