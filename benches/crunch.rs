//! Crunch pipeline benchmarks.
//! Covers 9-patch frame parsing, color-mode selection and the full crunch.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ninecrunch::png::select;
use ninecrunch::{crunch_with_scratch, ninepatch, CrunchOptions, PixelBuffer, Scratch};

const BLACK: u32 = 0xFF00_0000;
const WHITE: u32 = 0xFFFF_FFFF;

fn make_random(len: usize, mut seed: u32) -> Vec<u32> {
    let mut out = Vec::with_capacity(len);
    while out.len() < len {
        seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
        out.push(seed | 0xFF00_0000);
    }
    out
}

fn gradient_image(width: u32, height: u32) -> Vec<u32> {
    let mut pixels = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255) / width;
            let g = (y * 255) / height;
            let b = ((x + y) * 127) / (width + height);
            pixels.push(0xFF00_0000 | r << 16 | g << 8 | b);
        }
    }
    pixels
}

/// Wrap `pixels` in a white guide frame with one stretch column and row.
fn framed(pixels: &[u32], width: u32, height: u32) -> Vec<u32> {
    let fw = width + 2;
    let mut out = vec![WHITE; (fw * (height + 2)) as usize];
    for y in 0..height {
        let dst = ((y + 1) * fw + 1) as usize;
        let src = (y * width) as usize;
        out[dst..dst + width as usize].copy_from_slice(&pixels[src..src + width as usize]);
    }
    for x in width / 3..2 * width / 3 {
        out[(x + 1) as usize] = BLACK;
    }
    for y in height / 3..2 * height / 3 {
        out[((y + 1) * fw) as usize] = BLACK;
    }
    out
}

fn bench_select(c: &mut Criterion) {
    let (w, h) = (512, 512);
    let gradient = gradient_image(w, h);
    let random = make_random((w * h) as usize, 0x1234_5678);
    let flat = vec![0xFF80_8080; (w * h) as usize];

    let mut group = c.benchmark_group("select");
    group.throughput(Throughput::Elements((w * h) as u64));

    for (name, pixels) in [("gradient", &gradient), ("random", &random), ("gray", &flat)] {
        group.bench_with_input(BenchmarkId::new("plan", name), pixels, |b, pixels| {
            let image = PixelBuffer::new(pixels, w, h).unwrap();
            let mut scratch = Scratch::new();
            b.iter(|| {
                let plan = select::plan(&mut scratch, black_box(&image), false);
                black_box(plan.raw.len());
            });
        });
    }
    group.finish();
}

fn bench_ninepatch(c: &mut Criterion) {
    let (w, h) = (256, 256);
    let pixels = framed(&gradient_image(w, h), w, h);

    c.bench_function("ninepatch_build_256", |b| {
        let image = PixelBuffer::new(&pixels, w + 2, h + 2).unwrap();
        b.iter(|| black_box(ninepatch::build(black_box(&image)).unwrap()));
    });
}

fn bench_crunch(c: &mut Criterion) {
    let (w, h) = (256, 256);
    let plain = gradient_image(w, h);
    let patch = framed(&plain, w, h);

    let mut group = c.benchmark_group("crunch");
    group.throughput(Throughput::Elements((w * h) as u64));

    for (name, options) in [
        ("fast", CrunchOptions::fast()),
        ("balanced", CrunchOptions::balanced()),
        ("max", CrunchOptions::max_compression()),
    ] {
        group.bench_with_input(BenchmarkId::new("gradient", name), &options, |b, options| {
            let image = PixelBuffer::new(&plain, w, h).unwrap();
            let mut scratch = Scratch::new();
            b.iter(|| {
                black_box(
                    crunch_with_scratch(&mut scratch, "bench.png", &image, false, options).unwrap(),
                )
            });
        });
        group.bench_with_input(BenchmarkId::new("ninepatch", name), &options, |b, options| {
            let image = PixelBuffer::new(&patch, w + 2, h + 2).unwrap();
            let mut scratch = Scratch::new();
            b.iter(|| {
                black_box(
                    crunch_with_scratch(&mut scratch, "bench.9.png", &image, true, options)
                        .unwrap(),
                )
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_select, bench_ninepatch, bench_crunch);
criterion_main!(benches);
