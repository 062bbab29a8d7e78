use std::collections::HashMap;

fn main() -> anyhow::Result<()> {
    let mut decoder = tiff::decoder::Decoder::new(std::fs::File::open("output.tiff")?)?;
    let (width, height) = decoder.dimensions()?;

    println!("Image: {}x{} pixels", width, height);

    let image = decoder.read_image()?;

    if let tiff::decoder::DecodingResult::U16(data) = image {
        let mut values = HashMap::new();
        let mut min = u16::MAX;
        let mut max = u16::MIN;

        for &v in &data {
            *values.entry(v).or_insert(0u64) += 1;
            min = min.min(v);
            max = max.max(v);
        }

        println!("\nGray channel:");
        println!("  Range: {} - {} (span: {})", min, max, max - min);
        println!("  Unique values: {}", values.len());
        println!("  Effective bits: {:.2}", (values.len() as f64).log2());

        let clipped = values.get(&65535).copied().unwrap_or(0);
        let total_pixels = width as u64 * height as u64;
        println!(
            "\nClipping at maximum (65535): {} pixels ({:.2}%)",
            clipped,
            clipped as f64 / total_pixels as f64 * 100.0
        );
    } else {
        println!("Unexpected sample format (not 16-bit)");
    }

    Ok(())
}
