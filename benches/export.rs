use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rawstrip::export_pipeline::{
    ExportParams, ExtractedImage, FrameExtractor, GrayscaleWriter, PnmWriter, SensorFrame,
    StripTiffWriter, ToneCurveBuilder,
};
use std::io::Cursor;

fn generate_samples(width: usize, height: usize) -> Vec<u16> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            data.push(((x + y) % 16384) as u16);
        }
    }
    data
}

fn frame(samples: &[u16], width: usize, height: usize) -> SensorFrame<'_> {
    SensorFrame {
        raw_width: width,
        raw_height: height,
        top_margin: 4,
        left_margin: 4,
        crop_width: width - 4,
        crop_height: height - 4,
        row_pitch_bytes: width * 2,
        sample_depth_bits: 14,
        samples: Some(samples),
    }
}

fn benchmark_extraction_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction_by_size");

    let sizes = vec![
        (100, 100, "100x100"),
        (500, 500, "500x500"),
        (1000, 1000, "1000x1000"),
    ];

    for (width, height, label) in sizes {
        let samples = generate_samples(width, height);

        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &samples,
            |b, samples| {
                let params = ExportParams::builder().auto_scale(false).input_bps(14).build();
                let mut dest = ExtractedImage::default();

                b.iter(|| {
                    let frame = frame(black_box(samples), width, height);
                    FrameExtractor
                        .extract_into(&frame, &params, &mut dest)
                        .unwrap();
                });
            },
        );
    }

    group.finish();
}

fn benchmark_writers(c: &mut Criterion) {
    let mut group = c.benchmark_group("writers");

    let image = ExtractedImage {
        width: 500,
        height: 500,
        samples: generate_samples(500, 500),
    };

    group.bench_function("tiff_500x500", |b| {
        let writer = StripTiffWriter::default();
        b.iter(|| {
            let mut output = Cursor::new(Vec::new());
            writer.write_image(black_box(&image), &mut output).unwrap();
        });
    });

    group.bench_function("pgm_500x500", |b| {
        b.iter(|| {
            let mut output = Cursor::new(Vec::new());
            PnmWriter.write_image(black_box(&image), &mut output).unwrap();
        });
    });

    group.finish();
}

fn benchmark_tone_curve(c: &mut Criterion) {
    c.bench_function("tone_curve_build", |b| {
        b.iter(|| ToneCurveBuilder::new(black_box(2.2)).build());
    });
}

criterion_group!(
    benches,
    benchmark_extraction_sizes,
    benchmark_writers,
    benchmark_tone_curve
);
criterion_main!(benches);
