//! Application paths and viewer configuration
//!
//! Priority for every setting: CLI flag → environment → `spin360.json` → default.
//!
//! Environment:
//! - `SPIN360_CONFIG_DIR`: config directory
//! - `SPIN360_BASE_URL`: origin the frame/swatch assets are served from

use anyhow::{Context, Result, ensure};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::cli::Args;
use crate::frames::{CatalogSource, FrameNaming, FrameSource, HttpProbe, ProbeSource};
use crate::subject::{ColorSwatch, Subject, default_swatches};

/// Config file name inside the config directory
pub const CONFIG_FILE: &str = "spin360.json";

const ENV_CONFIG_DIR: &str = "SPIN360_CONFIG_DIR";
const ENV_BASE_URL: &str = "SPIN360_BASE_URL";

// ============================================================================
// Paths
// ============================================================================

/// Configuration for overriding default application paths
#[derive(Debug, Clone, Default)]
pub struct PathConfig {
    /// Custom config directory (from CLI or ENV)
    pub config_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Priority: CLI args → ENV var (SPIN360_CONFIG_DIR) → None (use defaults)
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        let config_dir = cli_dir.or_else(|| std::env::var(ENV_CONFIG_DIR).ok().map(PathBuf::from));
        Self { config_dir }
    }
}

/// Get path to a configuration file
///
/// Priority:
/// 1. CLI --config-dir / SPIN360_CONFIG_DIR
/// 2. Local folder IF spin360.json exists there
/// 3. Platform config directory (~/.config/spin360 on Linux)
pub fn config_file(name: &str, config: &PathConfig) -> PathBuf {
    get_config_dir(config).join(name)
}

fn get_config_dir(config: &PathConfig) -> PathBuf {
    if let Some(dir) = &config.config_dir {
        return dir.clone();
    }

    if let Ok(current_dir) = std::env::current_dir()
        && current_dir.join(CONFIG_FILE).exists()
    {
        return current_dir;
    }

    if let Some(dir) = dirs_next::config_dir() {
        return dir.join("spin360");
    }

    PathBuf::from(".")
}

// ============================================================================
// Viewer config
// ============================================================================

/// How frame lists are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Enumerate a local asset folder
    #[default]
    Catalog,
    /// Synthesize numbered URLs and probe them with HEAD
    Probe,
}

/// Persistent viewer settings (`spin360.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub auto_play: bool,
    pub auto_play_interval_ms: u64,
    /// Asset origin; None = local file URIs (catalog only)
    pub base_url: Option<String>,
    pub source: SourceKind,
    pub catalog_dir: PathBuf,
    pub frame_count: usize,
    pub frame_padding: usize,
    pub first_frame: usize,
    pub frame_extension: String,
    pub probe_threads: usize,
    pub probe_timeout_ms: u64,
    pub model: String,
    pub exterior_color: String,
    pub interior_color: String,
    pub swatches: Vec<ColorSwatch>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let naming = FrameNaming::default();
        Self {
            auto_play: false,
            auto_play_interval_ms: 1000,
            base_url: None,
            source: SourceKind::Catalog,
            catalog_dir: PathBuf::from("assets"),
            frame_count: naming.count,
            frame_padding: naming.padding,
            first_frame: naming.first,
            frame_extension: naming.extension,
            probe_threads: 8,
            probe_timeout_ms: 5000,
            model: "k9".to_string(),
            exterior_color: "abp".to_string(),
            interior_color: String::new(),
            swatches: default_swatches(),
        }
    }
}

impl ViewerConfig {
    /// Load from `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply environment overrides
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(ENV_BASE_URL)
            && !url.is_empty()
        {
            debug!("{} = {}", ENV_BASE_URL, url);
            self.base_url = Some(url);
        }
    }

    /// Apply command-line overrides
    pub fn apply_args(&mut self, args: &Args) {
        if args.autoplay {
            self.auto_play = true;
        }
        if let Some(ms) = args.interval_ms {
            self.auto_play_interval_ms = ms;
        }
        if let Some(url) = &args.base_url {
            self.base_url = Some(url.clone());
        }
        if let Some(source) = args.source {
            self.source = source;
        }
        if let Some(dir) = &args.assets {
            self.catalog_dir = dir.clone();
        }
        if let Some(n) = args.frames {
            self.frame_count = n;
        }
        if let Some(model) = &args.model {
            self.model = model.clone();
        }
        if let Some(color) = &args.color {
            self.exterior_color = color.clone();
        }
        if let Some(interior) = &args.interior {
            self.interior_color = interior.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.auto_play_interval_ms > 0, "auto_play_interval_ms must be > 0");
        ensure!(self.probe_threads > 0, "probe_threads must be > 0");
        if self.source == SourceKind::Probe {
            ensure!(self.base_url.is_some(), "probe source needs a base_url");
            ensure!(self.frame_count > 0, "frame_count must be > 0");
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.auto_play_interval_ms)
    }

    pub fn initial_subject(&self) -> Subject {
        Subject::new(&self.model, &self.exterior_color).with_interior(&self.interior_color)
    }

    pub fn naming(&self) -> FrameNaming {
        FrameNaming {
            count: self.frame_count,
            first: self.first_frame,
            padding: self.frame_padding,
            extension: self.frame_extension.clone(),
        }
    }

    /// Image URI of a color swatch: `<base>/swatches/<code>.<ext>` or
    /// `<catalog_dir>/swatches/<code>.<ext>` as a file URI.
    pub fn swatch_uri(&self, swatch: &ColorSwatch) -> String {
        match &self.base_url {
            Some(base) => format!("{}/swatches/{}", base.trim_end_matches('/'), swatch.file_name()),
            None => {
                let path = self.catalog_dir.join("swatches").join(swatch.file_name());
                let abs = std::fs::canonicalize(&path).unwrap_or(path);
                format!("file://{}", abs.display())
            }
        }
    }

    /// Build the configured FrameSource
    pub fn build_source(&self) -> Result<Arc<dyn FrameSource>> {
        match self.source {
            SourceKind::Catalog => {
                info!("Frame source: catalog at {}", self.catalog_dir.display());
                Ok(Arc::new(CatalogSource::new(&self.catalog_dir, self.base_url.clone())))
            }
            SourceKind::Probe => {
                let base = self
                    .base_url
                    .as_deref()
                    .context("probe source needs a base_url")?;
                let probe = HttpProbe::new(Duration::from_millis(self.probe_timeout_ms))
                    .context("Failed to create HTTP client")?;
                let source = ProbeSource::new(base, self.naming(), probe, self.probe_threads)
                    .context("Failed to create probe pool")?;
                info!("Frame source: probing {} ({} frames)", base, self.frame_count);
                Ok(Arc::new(source))
            }
        }
    }
}
