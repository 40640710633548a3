use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use image::{GrayImage, Luma};
use imageproc::drawing::draw_filled_circle_mut;
use mouse_tracker_rs::tracking_pipeline::preprocess::{
    DepthWindow, crop, foreground_mask, smooth, to_grayscale,
};
use mouse_tracker_rs::tracking_pipeline::source::SourceKind;
use mouse_tracker_rs::tracking_pipeline::source::types::DEPTH_WIDTH;
use mouse_tracker_rs::tracking_pipeline::tracker::{TrackState, locate};
use mouse_tracker_rs::tracking_pipeline::RawFrame;

fn generate_depth_frame() -> RawFrame {
    let samples = (0..SourceKind::Depth.buffer_len())
        .map(|i| 600 + ((i % DEPTH_WIDTH + i / DEPTH_WIDTH) % 200) as u16)
        .collect();
    RawFrame::depth(samples).expect("depth geometry")
}

fn generate_color_frame() -> RawFrame {
    let bytes = (0..SourceKind::Color.buffer_len())
        .map(|i| (i % 256) as u8)
        .collect();
    RawFrame::color(bytes).expect("color geometry")
}

fn frame_with_disc(width: u32, height: u32) -> GrayImage {
    let mut frame = GrayImage::new(width, height);
    draw_filled_circle_mut(
        &mut frame,
        (width as i32 / 2, height as i32 / 2),
        20,
        Luma([120]),
    );
    frame
}

fn benchmark_grayscale(c: &mut Criterion) {
    let mut group = c.benchmark_group("grayscale_by_source");
    let window = DepthWindow::default();

    for (frame, label) in [
        (generate_depth_frame(), "depth"),
        (generate_color_frame(), "color"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(label), &frame, |b, frame| {
            b.iter(|| to_grayscale(black_box(frame), window));
        });
    }

    group.finish();
}

fn benchmark_blur_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("blur_by_kernel");
    let frame = frame_with_disc(430, 210);

    for kernel in [1u32, 5, 15, 31] {
        group.bench_with_input(BenchmarkId::from_parameter(kernel), &kernel, |b, &kernel| {
            b.iter(|| smooth(black_box(&frame), kernel));
        });
    }

    group.finish();
}

fn benchmark_mask_and_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("mask_and_locate");
    let background = GrayImage::new(430, 210);
    let frame = frame_with_disc(430, 210);

    group.bench_function("foreground_mask", |b| {
        b.iter(|| foreground_mask(black_box(&frame), &background, 1, 30));
    });

    let mask = foreground_mask(&frame, &background, 1, 30);
    group.bench_function("locate", |b| {
        b.iter(|| locate(black_box(&mask), 6.0, TrackState::default()));
    });

    group.finish();
}

fn benchmark_full_frame_vs_crop(c: &mut Criterion) {
    let mut group = c.benchmark_group("crop_impact");
    let gray = to_grayscale(&generate_depth_frame(), DepthWindow::default());
    let region = SourceKind::Depth.default_crop();

    group.bench_function("full_frame", |b| {
        b.iter(|| smooth(black_box(&gray), 15));
    });

    group.bench_function("cropped", |b| {
        b.iter(|| smooth(&crop(black_box(&gray), region), 15));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_grayscale,
    benchmark_blur_sizes,
    benchmark_mask_and_locate,
    benchmark_full_frame_vs_crop
);
criterion_main!(benches);
