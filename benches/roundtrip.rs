use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use graylzw::{compress, decompress, PixelBuffer};

fn flat(height: u32, width: u32) -> PixelBuffer {
    let mut image = PixelBuffer::new(height, width).expect("extents");
    image.fill(127);
    image
}

fn gradient(height: u32, width: u32) -> PixelBuffer {
    let mut image = PixelBuffer::new(height, width).expect("extents");
    for row in 0..height {
        for col in 0..width {
            image
                .set(row, col, ((row + col) % 256) as u8)
                .expect("in bounds");
        }
    }
    image
}

fn noise(height: u32, width: u32) -> PixelBuffer {
    let mut image = PixelBuffer::new(height, width).expect("extents");
    let mut state = 0x2545_f491u32;
    for row in 0..height {
        for col in 0..width {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            image
                .set(row, col, (state & 0xff) as u8)
                .expect("in bounds");
        }
    }
    image
}

fn bench_image(c: &mut Criterion, name: &str, image: &PixelBuffer) {
    let pixels = image.samples().len() as u64;
    let stream = compress(image).expect("compress");

    let mut group = c.benchmark_group("compress");
    group.throughput(Throughput::Bytes(pixels));
    group.bench_with_input(BenchmarkId::new(name, pixels), image, |b, image| {
        b.iter(|| black_box(compress(image).expect("compress")))
    });
    group.finish();

    let mut group = c.benchmark_group("decompress");
    group.throughput(Throughput::Bytes(pixels));
    group.bench_with_input(BenchmarkId::new(name, pixels), &stream, |b, stream| {
        b.iter(|| black_box(decompress(stream).expect("decompress")))
    });
    group.finish();
}

fn bench_flat(c: &mut Criterion) {
    bench_image(c, "flat", &flat(512, 512));
}

fn bench_gradient(c: &mut Criterion) {
    bench_image(c, "gradient", &gradient(512, 512));
}

fn bench_noise(c: &mut Criterion) {
    bench_image(c, "noise", &noise(512, 512));
}

criterion_group!(benches, bench_flat, bench_gradient, bench_noise);
criterion_main!(benches);
