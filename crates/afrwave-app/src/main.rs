mod cli;
mod error;
mod output;
mod run;
mod settings;
mod telemetry;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Args, Command};
use crate::settings::{Options, Settings};

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref())?;
    telemetry::initialise_logging(args.log_level.as_deref(), settings.log_level.as_deref())?;
    let options = Options::resolve(&args, &settings);

    let mut stdout = std::io::stdout().lock();
    match &args.command {
        Command::Decode { frames } => {
            run::decode_frames(frames, options.notation, options.format, &mut stdout)
        }
        Command::Replay { path } => {
            let capture = run::read_capture(path.as_deref())?;
            run::replay(&capture, options.format, &mut stdout).map(|_| ())
        }
    }
}
