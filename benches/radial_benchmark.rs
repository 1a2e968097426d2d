//! Benchmark for the radial plot draw pipeline.

use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trueno_radar::canvas::{RasterCanvas, RecordingCanvas};
use trueno_radar::dataset::SimpleCategoryDataset;
use trueno_radar::geometry::Rect;
use trueno_radar::plots::{IntervalMarker, RadialPlot};

fn plot_with(series: usize, categories: usize) -> RadialPlot {
    let mut data = SimpleCategoryDataset::new();
    for s in 0..series {
        for c in 0..categories {
            let value = ((s * 7 + c * 13) % 10) as f64 + 1.0;
            data.set_value(Some(value), &format!("s{s}"), &format!("c{c}"));
        }
    }
    let mut plot = RadialPlot::with_dataset(Rc::new(data));
    if let Ok(band) = IntervalMarker::new(4.0, 8.0) {
        plot.add_interval_marker(band);
    }
    plot
}

fn recording_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("radial_draw_recording");

    for (series, categories) in [(2, 6), (8, 24), (32, 96)] {
        let plot = plot_with(series, categories);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{series}x{categories}")),
            &plot,
            |b, plot| {
                b.iter(|| {
                    let mut canvas = RecordingCanvas::new();
                    plot.draw(&mut canvas, black_box(Rect::new(0.0, 0.0, 800.0, 600.0)), None);
                    canvas
                });
            },
        );
    }

    group.finish();
}

fn raster_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("radial_draw_raster");
    let plot = plot_with(4, 12);

    for size in [256u32, 800] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut canvas = RasterCanvas::new(size, size).expect("valid size");
                let area = Rect::new(0.0, 0.0, f64::from(size), f64::from(size));
                plot.draw(&mut canvas, black_box(area), None);
                canvas
            });
        });
    }

    group.finish();
}

fn svg_benchmark(c: &mut Criterion) {
    let plot = plot_with(4, 12);
    c.bench_function("radial_to_svg_800", |b| {
        b.iter(|| plot.to_svg(black_box(800), black_box(800)));
    });
}

criterion_group!(benches, recording_benchmark, raster_benchmark, svg_benchmark);
criterion_main!(benches);
