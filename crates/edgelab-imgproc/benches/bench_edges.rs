use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use edgelab_image::{Image, ImageSize};
use edgelab_imgproc::{
    edges::EdgeOperator,
    filter::{convolve, kernels},
};

fn make_image(width: usize, height: usize) -> Image<u8, 1> {
    let data = (0..width * height).map(|i| (i % 251) as u8).collect();
    Image::new(ImageSize { width, height }, data).unwrap()
}

fn bench_edges(c: &mut Criterion) {
    let mut group = c.benchmark_group("EdgeOperators");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);
        let image = make_image(*width, *height);

        let sobel_x = kernels::sobel_kernels().horizontal().clone();
        group.bench_with_input(
            BenchmarkId::new("convolve_3x3", &parameter_string),
            &image,
            |b, i| b.iter(|| black_box(convolve(i, &sobel_x))),
        );

        for operator in EdgeOperator::ALL {
            group.bench_with_input(
                BenchmarkId::new(operator.slug(), &parameter_string),
                &image,
                |b, i| b.iter(|| black_box(operator.apply(i))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_edges);
criterion_main!(benches);
