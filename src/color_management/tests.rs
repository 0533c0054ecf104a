use av_data::pixel::{ColorPrimaries, TransferCharacteristic};
use rand::Rng;
use rayon::ThreadPoolBuilder;

use super::*;

fn random_bundle(width: usize, height: usize, encoding: ColorEncoding) -> ImageBundle {
    let mut rng = rand::thread_rng();
    let data = (0..width * height)
        .map(|_| [rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)])
        .collect::<Vec<[f32; 3]>>();
    ImageBundle::new(
        Image3F::from_interleaved(&data, width, height).unwrap(),
        encoding,
    )
}

#[test]
fn gamma_curve_is_applied_per_sample() {
    let encoding = ColorEncoding::new(ColorPrimaries::BT709, TransferCharacteristic::BT470M, false);
    let input = random_bundle(11, 3, encoding);
    let out = ParametricCms
        .transform(&input, &ColorEncoding::linear_srgb(false), None)
        .unwrap();

    assert!(out.same_size(input.color()));
    for (src, dst) in input.color().to_interleaved().iter().zip(out.to_interleaved()) {
        for c in 0..3 {
            let expected = src[c].powf(2.2);
            assert!(
                (dst[c] - expected).abs() <= 1e-3 * expected.max(1e-3),
                "{} became {}, expected {}",
                src[c],
                dst[c],
                expected
            );
        }
    }
}

#[test]
fn linear_input_only_changes_primaries() {
    let encoding = ColorEncoding::new(ColorPrimaries::BT2020, TransferCharacteristic::Linear, false);
    let mut input = random_bundle(4, 4, encoding);
    input.color_mut().plane_mut(0).fill(0.0);
    input.color_mut().plane_mut(1).fill(1.0);
    input.color_mut().plane_mut(2).fill(0.0);

    let out = ParametricCms
        .transform(&input, &ColorEncoding::linear_srgb(false), None)
        .unwrap();
    // BT.2020 green lies outside the sRGB gamut.
    assert!(out.plane(0).get(2, 2) < 0.0);
    assert!(out.plane(1).get(2, 2) > 1.0);
}

#[test]
fn pool_does_not_change_result() {
    let pool = ThreadPoolBuilder::new().num_threads(3).build().unwrap();
    let encoding = ColorEncoding::new(
        ColorPrimaries::P3Display,
        TransferCharacteristic::PerceptualQuantizer,
        false,
    );
    let input = random_bundle(37, 29, encoding);
    let target = ColorEncoding::linear_srgb(false);

    let serial = ParametricCms.transform(&input, &target, None).unwrap();
    let parallel = ParametricCms.transform(&input, &target, Some(&pool)).unwrap();
    assert_eq!(serial, parallel);
}

#[test]
fn non_linear_target_is_rejected() {
    let input = random_bundle(2, 2, ColorEncoding::srgb(false));
    let result = ParametricCms.transform(&input, &ColorEncoding::srgb(false), None);
    assert_eq!(result.unwrap_err(), ConversionError::NonLinearTarget);
}

#[test]
fn reserved_transfer_is_rejected() {
    let encoding = ColorEncoding {
        primaries: ColorPrimaries::BT709,
        transfer: TransferCharacteristic::BT1361E,
        gray: false,
    };
    let input = random_bundle(2, 2, encoding);
    let result = ParametricCms.transform(&input, &ColorEncoding::linear_srgb(false), None);
    assert_eq!(
        result.unwrap_err(),
        ConversionError::UnsupportedTransferCharacteristic
    );
}
