use av_data::pixel::ColorPrimaries;
use nalgebra::{Matrix3, Matrix3x1};

use crate::ConversionError;

/// Returns the matrix taking linear RGB in `in_primaries` to linear RGB in
/// `out_primaries`, or `None` when they are the same.
///
/// White points are adapted with the Bradford transform.
///
/// # Errors
/// - If either set of primaries is reserved or unspecified
pub fn primaries_transform(
    in_primaries: ColorPrimaries,
    out_primaries: ColorPrimaries,
) -> Result<Option<Matrix3<f32>>, ConversionError> {
    if in_primaries == out_primaries {
        return Ok(None);
    }

    Ok(Some(
        gamut_xyz_to_rgb_matrix(out_primaries)?
            * white_point_adaptation_matrix(in_primaries, out_primaries)?
            * gamut_rgb_to_xyz_matrix(in_primaries)?,
    ))
}

/// Applies `matrix` to each pixel of three rows in place.
pub fn transform_rows(matrix: &Matrix3<f32>, rows: [&mut [f32]; 3]) {
    let [r, g, b] = rows;
    for ((r, g), b) in r.iter_mut().zip(g.iter_mut()).zip(b.iter_mut()) {
        let res = matrix * Matrix3x1::new(*r, *g, *b);
        *r = res[0];
        *g = res[1];
        *b = res[2];
    }
}

fn get_primaries_xy(primaries: ColorPrimaries) -> Result<[[f32; 2]; 3], ConversionError> {
    Ok(match primaries {
        ColorPrimaries::BT470M => [[0.670, 0.330], [0.210, 0.710], [0.140, 0.080]],
        ColorPrimaries::BT470BG => [[0.640, 0.330], [0.290, 0.600], [0.150, 0.060]],
        ColorPrimaries::ST170M | ColorPrimaries::ST240M => {
            [[0.630, 0.340], [0.310, 0.595], [0.155, 0.070]]
        }
        ColorPrimaries::BT709 => [[0.640, 0.330], [0.300, 0.600], [0.150, 0.060]],
        ColorPrimaries::Film => [[0.681, 0.319], [0.243, 0.692], [0.145, 0.049]],
        ColorPrimaries::BT2020 => [[0.708, 0.292], [0.170, 0.797], [0.131, 0.046]],
        ColorPrimaries::P3DCI | ColorPrimaries::P3Display => {
            [[0.680, 0.320], [0.265, 0.690], [0.150, 0.060]]
        }
        ColorPrimaries::Tech3213 => [[0.630, 0.340], [0.295, 0.605], [0.155, 0.077]],
        ColorPrimaries::Reserved0 | ColorPrimaries::Reserved | ColorPrimaries::ST428 => {
            return Err(ConversionError::UnsupportedColorPrimaries)
        }
        ColorPrimaries::Unspecified => return Err(ConversionError::UnspecifiedColorPrimaries),
    })
}

fn get_white_point(primaries: ColorPrimaries) -> [f32; 3] {
    // White points in xy.
    const ILLUMINANT_C: [f32; 2] = [0.31, 0.316];
    const ILLUMINANT_DCI: [f32; 2] = [0.314, 0.351];
    const ILLUMINANT_D65: [f32; 2] = [0.3127, 0.3290];
    const ILLUMINANT_E: [f32; 2] = [1.0 / 3.0, 1.0 / 3.0];

    match primaries {
        ColorPrimaries::BT470M | ColorPrimaries::Film => {
            xy_to_xyz(ILLUMINANT_C[0], ILLUMINANT_C[1])
        }
        ColorPrimaries::ST428 => xy_to_xyz(ILLUMINANT_E[0], ILLUMINANT_E[1]),
        ColorPrimaries::P3DCI => xy_to_xyz(ILLUMINANT_DCI[0], ILLUMINANT_DCI[1]),
        _ => xy_to_xyz(ILLUMINANT_D65[0], ILLUMINANT_D65[1]),
    }
}

fn xy_to_xyz(x: f32, y: f32) -> [f32; 3] {
    [x / y, 1.0, (1.0 - x - y) / y]
}

fn gamut_rgb_to_xyz_matrix(primaries: ColorPrimaries) -> Result<Matrix3<f32>, ConversionError> {
    // ST 428 is already CIE XYZ.
    if primaries == ColorPrimaries::ST428 {
        return Ok(Matrix3::identity());
    }

    let xyz_matrix = get_primaries_xyz(primaries)?;
    let white_xyz = Matrix3x1::from_column_slice(&get_white_point(primaries));

    let s = (xyz_matrix
        .try_inverse()
        .ok_or(ConversionError::UnsupportedColorPrimaries)?
        * white_xyz)
        .transpose();
    let mut m = [0f32; 9];
    m[0..3].copy_from_slice((xyz_matrix.row(0).component_mul(&s)).as_slice());
    m[3..6].copy_from_slice((xyz_matrix.row(1).component_mul(&s)).as_slice());
    m[6..9].copy_from_slice((xyz_matrix.row(2).component_mul(&s)).as_slice());

    Ok(Matrix3::from_row_slice(&m))
}

fn gamut_xyz_to_rgb_matrix(primaries: ColorPrimaries) -> Result<Matrix3<f32>, ConversionError> {
    if primaries == ColorPrimaries::ST428 {
        return Ok(Matrix3::identity());
    }

    gamut_rgb_to_xyz_matrix(primaries)?
        .try_inverse()
        .ok_or(ConversionError::UnsupportedColorPrimaries)
}

fn get_primaries_xyz(primaries: ColorPrimaries) -> Result<Matrix3<f32>, ConversionError> {
    // Columns: R G B
    // Rows: X Y Z
    let primaries_xy = get_primaries_xy(primaries)?;

    let mut ret = [0f32; 9];
    ret[0..3].copy_from_slice(&xy_to_xyz(primaries_xy[0][0], primaries_xy[0][1]));
    ret[3..6].copy_from_slice(&xy_to_xyz(primaries_xy[1][0], primaries_xy[1][1]));
    ret[6..9].copy_from_slice(&xy_to_xyz(primaries_xy[2][0], primaries_xy[2][1]));

    Ok(Matrix3::from_row_slice(&ret).transpose())
}

fn white_point_adaptation_matrix(
    in_primaries: ColorPrimaries,
    out_primaries: ColorPrimaries,
) -> Result<Matrix3<f32>, ConversionError> {
    let bradford = Matrix3::from_row_slice(&[
        0.8951f32, 0.2664f32, -0.1614f32, -0.7502f32, 1.7135f32, 0.0367f32, 0.0389f32, -0.0685f32,
        1.0296f32,
    ]);

    let white_in = Matrix3x1::from_column_slice(&get_white_point(in_primaries));
    let white_out = Matrix3x1::from_column_slice(&get_white_point(out_primaries));

    if white_in == white_out {
        return Ok(Matrix3::identity());
    }

    let rgb_in = bradford * white_in;
    let rgb_out = bradford * white_out;

    let mut m: Matrix3<f32> = Matrix3::zeros();
    m[0] = rgb_out[0] / rgb_in[0];
    m[4] = rgb_out[1] / rgb_in[1];
    m[8] = rgb_out[2] / rgb_in[2];

    Ok(bradford
        .try_inverse()
        .ok_or(ConversionError::UnsupportedColorPrimaries)?
        * m
        * bradford)
}
