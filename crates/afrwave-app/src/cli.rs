use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Command-line options for the LC-1 frame decoder.
#[derive(Debug, Parser)]
#[command(name = "afrwave", about = "Decode Innovate LC-1 wideband AFR frames.")]
pub(crate) struct Args {
    /// How frame text is written (`auto` picks binary when every token is 8 bits).
    #[arg(long, global = true, value_parser = ["auto", "hex", "binary", "bin"])]
    pub notation: Option<String>,
    /// Output format.
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,
    /// Settings file to use instead of the default location.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Log filter directive, e.g. `afrwave_decode=trace`. Overrides `RUST_LOG`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Decode frames given as text, one argument per frame.
    Decode {
        #[arg(required = true)]
        frames: Vec<String>,
    },
    /// Decode every frame found in a raw capture file, or stdin.
    Replay { path: Option<PathBuf> },
}
