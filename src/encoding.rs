
use av_data::pixel::{ColorPrimaries, TransferCharacteristic};

/// Describes how the samples of a set of color planes are to be interpreted.
///
/// Two encodings are the same when primaries, transfer function and the
/// gray flag all match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorEncoding {
    pub primaries: ColorPrimaries,
    pub transfer: TransferCharacteristic,
    /// Whether the image is grayscale stored as three equal planes.
    pub gray: bool,
}

impl ColorEncoding {
    /// Creates an encoding, guessing sRGB for any unspecified component.
    #[must_use]
    pub fn new(
        mut primaries: ColorPrimaries,
        mut transfer: TransferCharacteristic,
        gray: bool,
    ) -> Self {
        if transfer == TransferCharacteristic::Unspecified {
            transfer = TransferCharacteristic::SRGB;
            log::warn!(
                "Transfer characteristics not specified. Guessing {}",
                transfer
            );
        }

        if primaries == ColorPrimaries::Unspecified {
            primaries = ColorPrimaries::BT709;
            log::warn!("Color primaries not specified. Guessing {}", primaries);
        }

        Self {
            primaries,
            transfer,
            gray,
        }
    }

    /// Standard sRGB: BT.709 primaries with the IEC 61966-2-1 transfer curve.
    #[must_use]
    pub const fn srgb(gray: bool) -> Self {
        Self {
            primaries: ColorPrimaries::BT709,
            transfer: TransferCharacteristic::SRGB,
            gray,
        }
    }

    /// BT.709 primaries in linear light.
    #[must_use]
    pub const fn linear_srgb(gray: bool) -> Self {
        Self {
            primaries: ColorPrimaries::BT709,
            transfer: TransferCharacteristic::Linear,
            gray,
        }
    }

    /// True only for the exact sRGB primaries and transfer curve. Other
    /// gamma curves do not qualify, even simple power laws.
    #[must_use]
    pub fn is_srgb(&self) -> bool {
        self.primaries == ColorPrimaries::BT709 && self.transfer == TransferCharacteristic::SRGB
    }

    #[must_use]
    pub fn is_linear(&self) -> bool {
        self.transfer == TransferCharacteristic::Linear
    }

    #[must_use]
    pub fn same_color_encoding(&self, other: &Self) -> bool {
        self == other
    }
}

impl Default for ColorEncoding {
    fn default() -> Self {
        Self::srgb(false)
    }
}
