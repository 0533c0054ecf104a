#![deny(clippy::all)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::default_trait_access)]
#![allow(clippy::inconsistent_struct_constructor)]
#![allow(clippy::inline_always)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::similar_names)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::use_self)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::create_dir)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::default_numeric_fallback)]
#![warn(clippy::exit)]
#![warn(clippy::filetype_is_file)]
#![warn(clippy::float_cmp_const)]
#![warn(clippy::if_then_some_else_none)]
#![warn(clippy::lossy_float_literal)]
#![warn(clippy::map_err_ignore)]
#![warn(clippy::mem_forget)]
#![warn(clippy::mod_module_files)]
#![warn(clippy::multiple_inherent_impl)]
#![warn(clippy::pattern_type_mismatch)]
#![warn(clippy::rc_buffer)]
#![warn(clippy::rc_mutex)]
#![warn(clippy::rest_pat_in_fully_bound_structs)]
#![warn(clippy::same_name_method)]
#![warn(clippy::str_to_string)]
#![warn(clippy::string_to_string)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::unnecessary_self_imports)]
#![warn(clippy::unneeded_field_pattern)]
#![warn(clippy::use_debug)]
#![warn(clippy::verbose_file_reads)]

//! Perceptual color transforms for an image encoder front end.
//!
//! [`to_xyb`] brings an image in any color encoding into the XYB opsin
//! space, reusing the input or decoding sRGB on the fly when it can.
//! [`rgb_to_ycbcr`] is the full-range BT.601 transform used for JPEG
//! compatible output. Both split the image into row tasks and run them on
//! an optional [`rayon::ThreadPool`]; results do not depend on whether or
//! how a pool is used.

mod color_management;
mod dispatch;
mod encoding;
mod errors;
mod image;
mod parallel;
mod srgb;
mod xyb;

// This is pub and doc hidden so it can be run through cargo asm for
// optimization easier
#[doc(hidden)]
pub mod rgb_xyb;
#[doc(hidden)]
pub mod rgb_ycbcr;

pub use crate::color_management::{
    linearize_fn, primaries_transform, ColorManagement, LinearizeFn, ParametricCms,
};
pub use crate::dispatch::Backend;
pub use crate::encoding::ColorEncoding;
pub use crate::errors::{ConversionError, CreationError};
pub use crate::image::{Image3F, ImageBundle, ImageF, LANES};
pub use crate::parallel::run_on_pool;
pub use crate::rgb_ycbcr::{
    rgb_to_ycbcr, rgb_to_ycbcr_in_place, rgb_to_ycbcr_in_place_with_backend,
    rgb_to_ycbcr_with_backend, ycbcr_to_rgb,
};
pub use crate::srgb::{srgb_to_linear, srgb_to_linear_row};
pub use crate::xyb::{
    image_from_frame, opsin_dynamics_image, to_xyb, to_xyb_with_backend, LinearImage,
};
pub use av_data::pixel::{ColorPrimaries, TransferCharacteristic};
pub use opsin_math::{cube_root_max_error, test_cube_root, CUBE_ROOT_MAX_ERROR};
pub use rayon::ThreadPool;
pub use v_frame::{
    frame::Frame,
    plane::Plane,
    prelude::{CastFromPrimitive, Pixel},
};
