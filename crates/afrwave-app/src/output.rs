use std::io::Write;

use afrwave_core::format_hex;
use afrwave_decode::{Lc1Reading, Rejection};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Frame hex followed by a description of the reading.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
    /// Only the float value expected by logging consumers.
    Legacy,
}

#[derive(Serialize)]
struct JsonLine<'a> {
    frame: String,
    reading: &'a Lc1Reading,
    value: f64,
}

pub(crate) fn write_reading(
    out: &mut impl Write,
    format: OutputFormat,
    frame: &[u8],
    reading: &Lc1Reading,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}  {}", format_hex(frame), describe(reading))?,
        OutputFormat::Json => {
            let line = JsonLine {
                frame: hex::encode_upper(frame),
                reading,
                value: reading.to_legacy(),
            };
            serde_json::to_writer(&mut *out, &line)?;
            writeln!(out)?;
        }
        OutputFormat::Legacy => writeln!(out, "{}", reading.to_legacy())?,
    }
    Ok(())
}

fn describe(reading: &Lc1Reading) -> String {
    match reading {
        Lc1Reading::Afr(afr) => format!("AFR {afr:.2}"),
        Lc1Reading::Error(lambda) => format!("ERROR {lambda}"),
        Lc1Reading::Overrun => format!("OVERRUN ({})", afrwave_decode::MAX_AFR),
        Lc1Reading::Unrecognized(Rejection::TooShort { len }) => {
            format!("UNRECOGNIZED (too short: {len} bytes)")
        }
        Lc1Reading::Unrecognized(Rejection::NotLc1 { tag }) => {
            format!("UNRECOGNIZED (type tag {tag:08b})")
        }
        Lc1Reading::Unrecognized(Rejection::BadHeader { header }) => {
            format!("UNRECOGNIZED (header {})", format_hex(header))
        }
    }
}
