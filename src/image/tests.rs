use interpolate_name::interpolate_test;

use super::*;

#[interpolate_test(width_0, 0, LANES)]
#[interpolate_test(width_1, 1, LANES)]
#[interpolate_test(width_7, 7, LANES)]
#[interpolate_test(width_8, 8, 8)]
#[interpolate_test(width_9, 9, 16)]
#[interpolate_test(width_33, 33, 40)]
fn stride_is_padded(width: usize, expected: usize) {
    let plane = ImageF::new(width, 3);
    assert_eq!(plane.stride(), expected);
    assert_eq!(plane.stride() % LANES, 0);
    assert_eq!(plane.row(1).len(), width);
    assert_eq!(plane.padded_row(1).len(), expected);
}

#[test]
fn packed_data_round_trips() {
    let data = (0..15).map(|v| v as f32).collect::<Vec<_>>();
    let plane = ImageF::from_packed(&data, 5, 3).unwrap();
    assert_eq!(plane.get(4, 2), 14.0);
    assert_eq!(plane.row(1), &[5.0, 6.0, 7.0, 8.0, 9.0]);
    assert_eq!(plane.to_packed(), data);
    assert!(plane.padded_row(0)[5..].iter().all(|&v| v == 0.0));
}

#[test]
fn packed_data_length_is_checked() {
    let result = ImageF::from_packed(&[0.0; 14], 5, 3);
    assert_eq!(result.unwrap_err(), CreationError::ResolutionMismatch);
}

#[test]
fn fill_leaves_padding_alone() {
    let mut plane = ImageF::new(3, 2);
    plane.fill(2.5);
    for y in 0..2 {
        assert_eq!(plane.row(y), &[2.5; 3]);
        assert!(plane.padded_row(y)[3..].iter().all(|&v| v == 0.0));
    }
}

#[test]
fn rows_mut_are_disjoint_rows() {
    let mut plane = ImageF::new(10, 4);
    for (y, row) in plane.rows_mut().enumerate() {
        assert_eq!(row.len(), 16);
        row[0] = y as f32;
    }
    for y in 0..4 {
        assert_eq!(plane.get(0, y), y as f32);
    }
}

#[test]
fn stripes_cover_every_row() {
    let mut plane = ImageF::new(4, 10);
    let stripes = plane.stripes_mut(3).map(|s| s.len() / 8).collect::<Vec<_>>();
    assert_eq!(stripes, vec![3, 3, 3, 1]);
}

#[test]
fn mismatched_planes_are_rejected() {
    let ok = Image3F::from_planes(ImageF::new(4, 4), ImageF::new(4, 4), ImageF::new(4, 4));
    assert!(ok.is_ok());

    let bad = Image3F::from_planes(ImageF::new(4, 4), ImageF::new(4, 5), ImageF::new(4, 4));
    assert_eq!(bad.unwrap_err(), CreationError::ResolutionMismatch);
}

#[test]
fn interleaved_round_trip() {
    let data = vec![[0.1, 0.2, 0.3], [0.4, 0.5, 0.6], [0.7, 0.8, 0.9], [1.0, 1.1, 1.2]];
    let image = Image3F::from_interleaved(&data, 2, 2).unwrap();
    assert_eq!(image.plane_row(1, 1), &[0.8, 1.1]);
    assert_eq!(image.to_interleaved(), data);
}

#[test]
fn same_size_compares_dimensions() {
    let a = Image3F::new(3, 2);
    assert!(a.same_size(&Image3F::new(3, 2)));
    assert!(!a.same_size(&Image3F::new(2, 3)));
}

#[test]
fn bundle_reports_encoding() {
    let bundle = ImageBundle::new(Image3F::new(2, 2), ColorEncoding::srgb(false));
    assert!(bundle.is_srgb());
    assert!(!bundle.is_gray());
    assert_eq!(bundle.width(), 2);
    assert_eq!(bundle.c_current(), &ColorEncoding::srgb(false));
}
