// SPDX-License-Identifier: MIT
//
// Criterion benchmarks for the comparison core: the absolute-error metric on
// a synthetic page pair, with and without fuzz.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{Rgba, RgbaImage};

use pdfcomp_compare::score;
use pdfcomp_document::Page;

/// Benchmark the per-page absolute-error metric on a 640x480 pair where
/// roughly half the pixels differ, the realistic shape for a page with a
/// changed region.
fn bench_page_score(c: &mut Criterion) {
    let (width, height) = (640u32, 480u32);
    let first = Page::new(RgbaImage::from_pixel(width, height, Rgba([250, 250, 250, 255])));
    let second = Page::new(RgbaImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgba([250, 250, 250, 255])
        } else {
            Rgba([30, 30, 200, 255])
        }
    }));

    c.bench_function("page_score (640x480, fuzz 0)", |b| {
        b.iter(|| {
            let mut page = first.clone();
            black_box(score(&mut page, black_box(&second), 0.0));
        });
    });

    c.bench_function("page_score (640x480, fuzz 16)", |b| {
        b.iter(|| {
            let mut page = first.clone();
            black_box(score(&mut page, black_box(&second), 16.0));
        });
    });
}

criterion_group!(benches, bench_page_score);
criterion_main!(benches);
