use std::io::{Read, Write};
use std::path::Path;

use afrwave_core::{FrameNotation, FrameScanner};
use afrwave_decode::Lc1Convertor;
use anyhow::Context;

use crate::output::{write_reading, OutputFormat};

/// Decodes frames written as text.
pub(crate) fn decode_frames(
    frames: &[String],
    notation: FrameNotation,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let convertor = Lc1Convertor::new();
    for text in frames {
        let bytes = notation
            .parse(text)
            .with_context(|| format!("cannot parse frame `{text}`"))?;
        let reading = convertor.decode(&bytes);
        write_reading(out, format, &bytes, &reading)?;
    }
    Ok(())
}

/// Reads a raw capture from `path`, or stdin when absent.
pub(crate) fn read_capture(path: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("failed to read capture `{}`", path.display())),
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read capture from stdin")?;
            Ok(buf)
        }
    }
}

/// Decodes every header-aligned frame in `capture`.
pub(crate) fn replay(
    capture: &[u8],
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<usize> {
    let convertor = Lc1Convertor::new();
    let mut scanner = FrameScanner::new();
    let frames = scanner.push(capture);

    for frame in &frames {
        let reading = convertor.decode(frame);
        write_reading(out, format, frame, &reading)?;
    }

    log::debug!(
        "replayed {} frame(s), skipped {} byte(s), {} byte(s) left incomplete",
        frames.len(),
        scanner.discarded(),
        scanner.pending().len()
    );
    Ok(frames.len())
}
