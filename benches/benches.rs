use criterion::{black_box, criterion_group, criterion_main, Criterion};
use opsin::*;
use rand::Rng;
use rayon::ThreadPoolBuilder;

fn make_frame_8b() -> Frame<u8> {
    let (width, height) = (320usize, 240usize);
    let mut data: Frame<u8> = Frame {
        planes: [
            Plane::new(width, height, 0, 0, 0, 0),
            Plane::new(width, height, 0, 0, 0, 0),
            Plane::new(width, height, 0, 0, 0, 0),
        ],
    };
    let mut rng = rand::thread_rng();
    for plane in &mut data.planes {
        for val in plane.data_origin_mut().iter_mut() {
            *val = rng.gen_range(0..=255);
        }
    }
    data
}

fn make_bundle(encoding: ColorEncoding) -> ImageBundle {
    ImageBundle::new(image_from_frame(&make_frame_8b(), 8), encoding)
}

fn bench_xyb(c: &mut Criterion, name: &str, encoding: ColorEncoding, backend: Backend) {
    c.bench_function(name, |b| {
        let input = make_bundle(encoding);
        let mut xyb = Image3F::new(input.width(), input.height());
        let mut storage = None;
        b.iter(|| {
            to_xyb_with_backend(
                backend,
                black_box(&input),
                None,
                &mut xyb,
                &mut storage,
                &ParametricCms,
            )
            .map(|linear| linear.width())
            .unwrap()
        })
    });
}

fn bench_linear_to_xyb(c: &mut Criterion) {
    bench_xyb(
        c,
        "linear srgb to xyb",
        ColorEncoding::linear_srgb(false),
        Backend::active(),
    );
}

fn bench_linear_to_xyb_scalar(c: &mut Criterion) {
    bench_xyb(
        c,
        "linear srgb to xyb (scalar)",
        ColorEncoding::linear_srgb(false),
        Backend::Scalar,
    );
}

fn bench_srgb_to_xyb(c: &mut Criterion) {
    bench_xyb(c, "srgb to xyb", ColorEncoding::srgb(false), Backend::active());
}

fn bench_pq_to_xyb(c: &mut Criterion) {
    bench_xyb(
        c,
        "pq bt2020 to xyb via cms",
        ColorEncoding::new(
            ColorPrimaries::BT2020,
            TransferCharacteristic::PerceptualQuantizer,
            false,
        ),
        Backend::active(),
    );
}

fn bench_srgb_to_xyb_pool(c: &mut Criterion) {
    c.bench_function("srgb to xyb on 4 threads", |b| {
        let pool = ThreadPoolBuilder::new().num_threads(4).build().unwrap();
        let input = make_bundle(ColorEncoding::srgb(false));
        let mut xyb = Image3F::new(input.width(), input.height());
        let mut storage = None;
        b.iter(|| {
            to_xyb(
                black_box(&input),
                Some(&pool),
                &mut xyb,
                &mut storage,
                &ParametricCms,
            )
            .map(|linear| linear.width())
            .unwrap()
        })
    });
}

fn bench_rgb_to_ycbcr(c: &mut Criterion) {
    c.bench_function("rgb to ycbcr in place", |b| {
        let mut input = image_from_frame(&make_frame_8b(), 8);
        for plane in input.planes_mut() {
            for y in 0..plane.height() {
                plane.row_mut(y).iter_mut().for_each(|v| *v *= 255.0);
            }
        }
        b.iter(|| {
            let mut image = input.clone();
            rgb_to_ycbcr_in_place(black_box(&mut image), None);
            image
        })
    });
}

criterion_group!(
    benches,
    bench_linear_to_xyb,
    bench_linear_to_xyb_scalar,
    bench_srgb_to_xyb,
    bench_pq_to_xyb,
    bench_srgb_to_xyb_pool,
    bench_rgb_to_ycbcr,
);
criterion_main!(benches);
