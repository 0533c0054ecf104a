use av_data::pixel::TransferCharacteristic;
use opsin_math::{expf, powf};

use crate::{srgb::srgb_to_linear, ConversionError};

/// Maps an encoded sample to linear light.
pub type LinearizeFn = fn(f32) -> f32;

/// Returns the curve that takes samples encoded with `transfer` to linear
/// light.
///
/// # Errors
/// - If the transfer function is reserved or has no defined inverse
/// - If the transfer function is unspecified
pub fn linearize_fn(transfer: TransferCharacteristic) -> Result<LinearizeFn, ConversionError> {
    Ok(match transfer {
        TransferCharacteristic::Logarithmic100 => log100_inverse_oetf,
        TransferCharacteristic::Logarithmic316 => log316_inverse_oetf,
        TransferCharacteristic::BT1886
        | TransferCharacteristic::ST170M
        | TransferCharacteristic::ST240M
        | TransferCharacteristic::BT2020Ten
        | TransferCharacteristic::BT2020Twelve => rec_1886_eotf,
        TransferCharacteristic::BT470M => rec_470m_oetf,
        TransferCharacteristic::BT470BG => rec_470bg_oetf,
        TransferCharacteristic::XVYCC => xvycc_eotf,
        TransferCharacteristic::SRGB => srgb_to_linear,
        TransferCharacteristic::PerceptualQuantizer => st_2084_inverse_oetf,
        TransferCharacteristic::HybridLogGamma => arib_b67_inverse_oetf,
        TransferCharacteristic::Linear => identity,
        TransferCharacteristic::Reserved0
        | TransferCharacteristic::Reserved
        | TransferCharacteristic::BT1361E
        | TransferCharacteristic::ST428 => {
            return Err(ConversionError::UnsupportedTransferCharacteristic)
        }
        TransferCharacteristic::Unspecified => {
            return Err(ConversionError::UnspecifiedTransferCharacteristic)
        }
    })
}

/// Applies `curve` to every sample of `row` in place.
#[inline]
pub fn linearize_row(curve: LinearizeFn, row: &mut [f32]) {
    for v in row {
        *v = curve(*v);
    }
}

const REC709_ALPHA: f32 = 1.099_296_8;
const REC709_BETA: f32 = 0.018_053_97;

const ST2084_M1: f32 = 0.159_301_76;
const ST2084_M2: f32 = 78.84375;
const ST2084_C1: f32 = 0.835_937_5;
const ST2084_C2: f32 = 18.851_563;
const ST2084_C3: f32 = 18.6875;

// Chosen for compatibility with higher precision REC709_ALPHA/REC709_BETA.
// See: ITU-R BT.2390-2 5.3.1
const ST2084_OOTF_SCALE: f32 = 59.490_803;

const ARIB_B67_A: f32 = 0.178_832_77;
const ARIB_B67_B: f32 = 0.284_668_92;
const ARIB_B67_C: f32 = 0.559_910_7;

const fn identity(x: f32) -> f32 {
    x
}

fn log100_inverse_oetf(x: f32) -> f32 {
    if x <= 0.0 {
        0.01
    } else {
        powf(10.0, 2.0 * (x - 1.0))
    }
}

fn log316_inverse_oetf(x: f32) -> f32 {
    if x <= 0.0 {
        0.003_162_277_6
    } else {
        powf(10.0, 2.5 * (x - 1.0))
    }
}

// Ideal CRT; the BT.1886 black level terms are ignored.
fn rec_1886_eotf(x: f32) -> f32 {
    if x < 0.0 {
        0.0
    } else {
        powf(x, 2.4)
    }
}

fn rec_1886_inverse_eotf(x: f32) -> f32 {
    if x < 0.0 {
        0.0
    } else {
        powf(x, 1.0 / 2.4)
    }
}

fn rec_470m_oetf(x: f32) -> f32 {
    if x < 0.0 {
        0.0
    } else {
        powf(x, 2.2)
    }
}

fn rec_470bg_oetf(x: f32) -> f32 {
    if x < 0.0 {
        0.0
    } else {
        powf(x, 2.8)
    }
}

fn rec_709_inverse_oetf(x: f32) -> f32 {
    let x = x.max(0.0);

    if x < 4.5 * REC709_BETA {
        x / 4.5
    } else {
        powf((x + (REC709_ALPHA - 1.0)) / REC709_ALPHA, 1.0 / 0.45)
    }
}

fn xvycc_eotf(x: f32) -> f32 {
    if (0.0..=1.0).contains(&x) {
        rec_1886_eotf(x.abs()).copysign(x)
    } else {
        rec_709_inverse_oetf(x.abs()).copysign(x)
    }
}

fn st_2084_eotf(x: f32) -> f32 {
    if x > 0.0 {
        let xpow = powf(x, 1.0 / ST2084_M2);
        let num = (xpow - ST2084_C1).max(0.0);
        let den = ST2084_C3.mul_add(-xpow, ST2084_C2).max(f32::EPSILON);
        powf(num / den, 1.0 / ST2084_M1)
    } else {
        0.0
    }
}

fn inverse_ootf_st2084(x: f32) -> f32 {
    rec_709_inverse_oetf(rec_1886_inverse_eotf(x * 100.0)) / ST2084_OOTF_SCALE
}

fn st_2084_inverse_oetf(x: f32) -> f32 {
    inverse_ootf_st2084(st_2084_eotf(x))
}

fn arib_b67_inverse_oetf(x: f32) -> f32 {
    let x = x.max(0.0);

    if x <= 0.5 {
        (x * x) * (1.0 / 3.0)
    } else {
        (expf((x - ARIB_B67_C) / ARIB_B67_A) + ARIB_B67_B) / 12.0
    }
}

#[cfg(test)]
mod tests {
    use interpolate_name::interpolate_test;

    use super::*;

    #[interpolate_test(bt1886, TransferCharacteristic::BT1886)]
    #[interpolate_test(bt470m, TransferCharacteristic::BT470M)]
    #[interpolate_test(bt470bg, TransferCharacteristic::BT470BG)]
    #[interpolate_test(srgb, TransferCharacteristic::SRGB)]
    #[interpolate_test(xvycc, TransferCharacteristic::XVYCC)]
    #[interpolate_test(linear, TransferCharacteristic::Linear)]
    fn sdr_curves_fix_black_and_white(transfer: TransferCharacteristic) {
        let curve = linearize_fn(transfer).unwrap();
        assert!(curve(0.0).abs() < 1e-6);
        assert!((curve(1.0) - 1.0).abs() < 1e-3);
    }

    #[interpolate_test(bt1886, TransferCharacteristic::BT1886)]
    #[interpolate_test(srgb, TransferCharacteristic::SRGB)]
    #[interpolate_test(pq, TransferCharacteristic::PerceptualQuantizer)]
    #[interpolate_test(hlg, TransferCharacteristic::HybridLogGamma)]
    #[interpolate_test(log100, TransferCharacteristic::Logarithmic100)]
    fn curves_are_monotonic(transfer: TransferCharacteristic) {
        let curve = linearize_fn(transfer).unwrap();
        let mut prev = curve(0.0);
        for i in 1..=100 {
            let next = curve(i as f32 / 100.0);
            assert!(next >= prev, "curve decreases at {}", i);
            prev = next;
        }
    }

    #[test]
    fn hlg_segments_meet() {
        let below = arib_b67_inverse_oetf(0.5);
        let above = arib_b67_inverse_oetf(0.500_01);
        assert!((below - 1.0 / 12.0).abs() < 1e-6);
        assert!((above - below).abs() < 1e-3);
    }

    #[test]
    fn unusable_transfers_are_rejected() {
        assert_eq!(
            linearize_fn(TransferCharacteristic::Reserved).unwrap_err(),
            ConversionError::UnsupportedTransferCharacteristic
        );
        assert_eq!(
            linearize_fn(TransferCharacteristic::Unspecified).unwrap_err(),
            ConversionError::UnspecifiedTransferCharacteristic
        );
    }

    #[test]
    fn row_applies_curve() {
        let mut row = [0.0f32, 0.5, 1.0];
        linearize_row(linearize_fn(TransferCharacteristic::BT470M).unwrap(), &mut row);
        assert!((row[1] - 0.5f32.powf(2.2)).abs() < 1e-3);
    }
}
