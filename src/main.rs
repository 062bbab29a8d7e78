use rawstrip::export_pipeline::{ExportParams, ExportSession, SensorFrame};
use rawstrip::logger;

use tracing::{error, info};

/// Synthesizes one sensor readout: a diagonal gradient with masked margins.
fn demo_frame(samples: &mut Vec<u16>) -> SensorFrame<'_> {
    const RAW_WIDTH: usize = 560;
    const RAW_HEIGHT: usize = 400;
    const TOP_MARGIN: usize = 8;
    const LEFT_MARGIN: usize = 24;

    samples.clear();
    samples.reserve(RAW_WIDTH * RAW_HEIGHT);
    for row in 0..RAW_HEIGHT {
        for col in 0..RAW_WIDTH {
            samples.push(((row * 117 + col * 31) % 16384) as u16);
        }
    }

    SensorFrame {
        raw_width: RAW_WIDTH,
        raw_height: RAW_HEIGHT,
        top_margin: TOP_MARGIN,
        left_margin: LEFT_MARGIN,
        crop_width: RAW_WIDTH - LEFT_MARGIN,
        crop_height: RAW_HEIGHT - TOP_MARGIN,
        row_pitch_bytes: RAW_WIDTH * 2,
        sample_depth_bits: 14,
        samples: Some(samples),
    }
}

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting rawstrip...");

    let params = ExportParams::builder()
        .auto_scale(false)
        .input_bps(14)
        .gamma(2.2)
        .build();
    let mut session = ExportSession::new(params);

    info!("Export session initialized");
    info!("Gamma: {}", session.params().gamma);
    info!(
        "Range expansion: {}",
        if session.params().auto_scale {
            "upstream"
        } else {
            "local"
        }
    );

    let mut samples = Vec::new();
    let frame = demo_frame(&mut samples);
    let (width, height) = session.extract_unprocessed(&frame)?;
    info!(width, height, "Sensor window extracted");

    match session.write_unprocessed("output.tiff") {
        Ok(()) => info!("TIFF export successful!"),
        Err(e) => error!("TIFF export failed: {}", e),
    }

    if let Some(image) = session.unprocessed().cloned() {
        session.set_processed(image);
        match session.write_processed("output.pgm") {
            Ok(()) => info!("PGM export successful!"),
            Err(e) => error!("PGM export failed: {}", e),
        }
    }

    Ok(())
}
