use clap::Parser;
use std::path::PathBuf;

use crate::config::SourceKind;

// Build version with target info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// 360-degree vehicle viewer
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Frame source (overrides config)
    #[arg(short = 's', long = "source", value_enum)]
    pub source: Option<SourceKind>,

    /// Local asset catalog root (<DIR>/<model>/<color>/*.png)
    #[arg(long = "assets", value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// Asset origin URL (also SPIN360_BASE_URL)
    #[arg(short = 'b', long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Vehicle model
    #[arg(short = 'm', long = "model")]
    pub model: Option<String>,

    /// Exterior color code
    #[arg(long = "color")]
    pub color: Option<String>,

    /// Interior color code
    #[arg(long = "interior")]
    pub interior: Option<String>,

    /// Auto-play on startup
    #[arg(short = 'a', long = "autoplay")]
    pub autoplay: bool,

    /// Auto-play period in milliseconds
    #[arg(short = 'i', long = "interval", value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Frames per subject for the probe source
    #[arg(long = "frames", value_name = "N")]
    pub frames: Option<usize>,

    /// Resolve frames once, print one per line and exit
    #[arg(long = "list")]
    pub list: bool,

    /// Enable logging to file (default: spin360.log in config dir)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}
