use thiserror::Error;

/// Error type for when bringing an image into linear light fails.
///
/// Only the general color-management path can fail; the already-linear and
/// sRGB paths of [`to_xyb`] are infallible.
///
/// [`to_xyb`]: crate::to_xyb
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Cannot linearize using this transfer function.")]
    UnsupportedTransferCharacteristic,
    #[error("No transfer function was specified.")]
    UnspecifiedTransferCharacteristic,
    #[error("Cannot convert between these primaries.")]
    UnsupportedColorPrimaries,
    #[error("No primaries were specified.")]
    UnspecifiedColorPrimaries,
    /// The requested target encoding is not linear light.
    #[error("Target color encoding must have a linear transfer function.")]
    NonLinearTarget,
}

/// Error type for when creating one of the image structs fails.
///
/// # Example
/// ```
/// use opsin::{CreationError, Image3F, ImageF};
///
/// let r = ImageF::new(16, 16);
/// let g = ImageF::new(16, 16);
/// let b = ImageF::new(8, 16);
/// let result = Image3F::from_planes(r, g, b);
///
/// assert_eq!(result.unwrap_err(), CreationError::ResolutionMismatch);
/// ```
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CreationError {
    /// The planes or the supplied data do not match the specified dimensions.
    #[error("Data length does not match the specified dimensions.")]
    ResolutionMismatch,
}
