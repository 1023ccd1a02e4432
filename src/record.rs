use crate::error::Result;
use crate::simulation::Sample;
use std::io::Write;
use std::path::Path;

/// Writes samples as tab-separated lines: `time, a.x, a.y, b.x, b.y`, six
/// decimals each, after a `#`-prefixed header naming the two bodies.
pub fn write_records_to<W: Write>(
    writer: W,
    samples: &[Sample],
    label_a: &str,
    label_b: &str,
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    wtr.write_record([
        "# Time".to_string(),
        format!("{label_a}-x"),
        format!("{label_a}-y"),
        format!("{label_b}-x"),
        format!("{label_b}-y"),
    ])?;
    for sample in samples {
        wtr.write_record(&[
            format!("{:.6}", sample.time),
            format!("{:.6}", sample.body_a.0),
            format!("{:.6}", sample.body_a.1),
            format!("{:.6}", sample.body_b.0),
            format!("{:.6}", sample.body_b.1),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_records<P: AsRef<Path>>(
    path: P,
    samples: &[Sample],
    label_a: &str,
    label_b: &str,
) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_records_to(file, samples, label_a, label_b)
}
