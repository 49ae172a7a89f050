use clap::Parser;
use std::path::PathBuf;

// Build version with crate info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Viewport dimensions must be finite and at least 1 px; layout math has no
/// meaningful answer for zero, negative or NaN sizes.
fn parse_dimension(s: &str) -> Result<f32, String> {
    let px: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if !px.is_finite() || px < 1.0 {
        return Err(format!("expected a dimension >= 1 px, got {s:?}"));
    }
    Ok(px)
}

/// Neural-network teaching stage (headless GUI core driver)
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Viewport width in pixels
    #[arg(long = "width", value_name = "PX", default_value = "1280", value_parser = parse_dimension)]
    pub width: f32,

    /// Viewport height in pixels
    #[arg(long = "height", value_name = "PX", default_value = "720", value_parser = parse_dimension)]
    pub height: f32,

    /// Number of frames to run the scripted session for
    #[arg(short = 'n', long = "frames", value_name = "N", default_value = "120")]
    pub frames: usize,

    /// Stage configuration JSON (defaults used when omitted)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}
