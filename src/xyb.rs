//! Conversion of images in any color encoding to XYB.


use std::ops::Deref;

use num_traits::clamp;
use rayon::ThreadPool;
use v_frame::{frame::Frame, prelude::CastFromPrimitive, prelude::Pixel};

use crate::{
    rgb_xyb::{linear_rows_to_xyb, PremulAbsorb},
    run_on_pool,
    srgb::srgb_to_linear_row,
    Backend, ColorEncoding, ColorManagement, ConversionError, Image3F, ImageBundle,
};

/// The linear-light image an XYB conversion read from.
///
/// Dereferences to the bundle, so callers that also need linear RGB can use
/// it without linearizing a second time.
#[derive(Debug, Clone, Copy)]
pub enum LinearImage<'a> {
    /// The input was already in linear sRGB and was read in place.
    Input(&'a ImageBundle),
    /// The input was linearized into the caller's scratch storage.
    Storage(&'a ImageBundle),
}

impl LinearImage<'_> {
    #[must_use]
    pub const fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }
}

impl Deref for LinearImage<'_> {
    type Target = ImageBundle;

    fn deref(&self) -> &ImageBundle {
        match *self {
            Self::Input(bundle) | Self::Storage(bundle) => bundle,
        }
    }
}

/// Converts `input` to XYB, writing the result to `xyb`.
///
/// Input already in linear sRGB (of matching gray-ness) is read directly.
/// Standard sRGB is decoded with the closed-form curve in the same pass as
/// the XYB conversion. Anything else is first handed to `cms`. In the last
/// two cases the linear image is stored in `linear_storage`, replacing its
/// previous content.
///
/// # Errors
/// - If `cms` cannot convert the input encoding to linear sRGB
///
/// # Panics
/// - If `xyb` does not have the dimensions of `input`
pub fn to_xyb<'a>(
    input: &'a ImageBundle,
    pool: Option<&ThreadPool>,
    xyb: &mut Image3F,
    linear_storage: &'a mut Option<ImageBundle>,
    cms: &dyn ColorManagement,
) -> Result<LinearImage<'a>, ConversionError> {
    to_xyb_with_backend(Backend::active(), input, pool, xyb, linear_storage, cms)
}

/// [`to_xyb`] with an explicitly chosen kernel backend.
///
/// # Errors
/// - If `cms` cannot convert the input encoding to linear sRGB
///
/// # Panics
/// - If `xyb` does not have the dimensions of `input`
pub fn to_xyb_with_backend<'a>(
    backend: Backend,
    input: &'a ImageBundle,
    pool: Option<&ThreadPool>,
    xyb: &mut Image3F,
    linear_storage: &'a mut Option<ImageBundle>,
    cms: &dyn ColorManagement,
) -> Result<LinearImage<'a>, ConversionError> {
    assert!(
        xyb.same_size(input.color()),
        "XYB output is {}x{} but input is {}x{}",
        xyb.width(),
        xyb.height(),
        input.width(),
        input.height()
    );

    let target = ColorEncoding::linear_srgb(input.is_gray());
    let premul = PremulAbsorb::new();

    if input.c_current().same_color_encoding(&target) {
        log::debug!("Input is linear sRGB, converting to XYB in place");
        linear_to_xyb_pass(backend, input.color(), xyb, &premul, pool);
        return Ok(LinearImage::Input(input));
    }

    let linear = if input.is_srgb() {
        log::debug!("Input is sRGB, decoding while converting to XYB");
        srgb_to_xyb_pass(backend, input.color(), xyb, &premul, pool)
    } else {
        log::debug!(
            "Input is {}/{}, linearizing through color management",
            input.c_current().primaries,
            input.c_current().transfer
        );
        let linear = cms.transform(input, &target, pool)?;
        assert!(
            linear.same_size(input.color()),
            "Color management changed the image dimensions"
        );
        linear_to_xyb_pass(backend, &linear, xyb, &premul, pool);
        linear
    };

    let storage =
        linear_storage.get_or_insert_with(|| ImageBundle::new(Image3F::new(0, 0), target));
    storage.set_from_image(linear, target);
    Ok(LinearImage::Storage(storage))
}

/// Converts an 8-bit sRGB frame to XYB.
///
/// # Panics
/// - If the frame has subsampled planes
#[must_use]
pub fn opsin_dynamics_image(srgb8: &Frame<u8>, pool: Option<&ThreadPool>) -> Image3F {
    let srgb = image_from_frame(srgb8, 8);
    let mut xyb = Image3F::new(srgb.width(), srgb.height());
    srgb_to_xyb_pass(
        Backend::active(),
        &srgb,
        &mut xyb,
        &PremulAbsorb::new(),
        pool,
    );
    xyb
}

/// Copies an integer frame into float planes scaled to `0.0..=1.0`.
///
/// # Panics
/// - If `bit_depth` is not in `1..=16`
/// - If the frame has subsampled planes
#[must_use]
pub fn image_from_frame<T: Pixel>(frame: &Frame<T>, bit_depth: u8) -> Image3F {
    assert!(
        (1..=16).contains(&bit_depth),
        "Bit depth {} is not supported",
        bit_depth
    );
    let width = frame.planes[0].cfg.width;
    let height = frame.planes[0].cfg.height;
    assert!(
        frame
            .planes
            .iter()
            .all(|p| p.cfg.width == width && p.cfg.height == height),
        "Frame planes must not be subsampled"
    );

    let scale = 1.0 / ((1u32 << bit_depth) - 1) as f32;
    let mut image = Image3F::new(width, height);
    for (c, plane) in frame.planes.iter().enumerate() {
        let stride = plane.cfg.stride;
        let origin = plane.data_origin();
        let dst = image.plane_mut(c);
        for y in 0..height {
            for (d, &px) in dst.row_mut(y).iter_mut().zip(&origin[y * stride..]) {
                *d = clamp(f32::from(u16::cast_from(px)) * scale, 0.0, 1.0);
            }
        }
    }
    image
}

fn linear_to_xyb_pass(
    backend: Backend,
    linear: &Image3F,
    xyb: &mut Image3F,
    premul: &PremulAbsorb,
    pool: Option<&ThreadPool>,
) {
    run_on_pool(pool, xyb.rows_mut(), "LinearToXYB", |y, out| {
        linear_rows_to_xyb(backend, linear.padded_rows(y), out, premul);
    });
}

/// Decodes `srgb` into a new linear image and converts it to XYB, one row
/// per task. Returns the linear image.
fn srgb_to_xyb_pass(
    backend: Backend,
    srgb: &Image3F,
    xyb: &mut Image3F,
    premul: &PremulAbsorb,
    pool: Option<&ThreadPool>,
) -> Image3F {
    let width = srgb.width();
    let mut linear = Image3F::new(width, srgb.height());
    let tasks = linear
        .rows_mut()
        .into_iter()
        .zip(xyb.rows_mut())
        .collect::<Vec<_>>();

    run_on_pool(pool, tasks, "SRGBToXYB", |y, (lin, out)| {
        let [l0, l1, l2] = lin;
        srgb_to_linear_row(srgb.plane_row(0, y), &mut l0[..width]);
        srgb_to_linear_row(srgb.plane_row(1, y), &mut l1[..width]);
        srgb_to_linear_row(srgb.plane_row(2, y), &mut l2[..width]);
        linear_rows_to_xyb(backend, [&*l0, &*l1, &*l2], out, premul);
    });

    linear
}
