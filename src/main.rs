use spin360::{Resolver, ViewerApp};
use spin360::cli::Args;
use spin360::config::{self, PathConfig, ViewerConfig};

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use log::{debug, info};
use std::sync::Arc;

fn main() -> Result<()> {
    // Parse command-line arguments first (needed for log setup)
    let args = Args::parse();

    let path_config = PathConfig::from_env_and_cli(args.config_dir.clone());
    init_logger(&args, &path_config)?;

    info!("spin360 starting...");
    debug!("Command-line args: {:?}", args);

    let config_path = config::config_file(config::CONFIG_FILE, &path_config);
    info!("Config path: {}", config_path.display());

    let mut viewer_config = ViewerConfig::load(&config_path)?;
    viewer_config.apply_env();
    viewer_config.apply_args(&args);
    viewer_config.validate().context("Invalid configuration")?;
    debug!("Effective config: {:?}", viewer_config);

    let source = viewer_config.build_source()?;

    if args.list {
        // Headless: resolve once and print
        let set = Resolver::new(source).resolve_blocking(&viewer_config.initial_subject());
        for uri in set.iter() {
            println!("{}", uri);
        }
        return Ok(());
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("spin360 v{} • F1 for help", env!("CARGO_PKG_VERSION")))
            .with_inner_size([960.0, 560.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "spin360",
        native_options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);

            let ctx = cc.egui_ctx.clone();
            let notify: spin360::frames::resolver::Notify = Arc::new(move || ctx.request_repaint());
            Ok(Box::new(ViewerApp::new(viewer_config, source, Some(notify))))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))?;

    info!("spin360 exited");
    Ok(())
}

/// Console or file logger based on --log / -v flags
fn init_logger(args: &Args, path_config: &PathConfig) -> Result<()> {
    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    if let Some(log_path_opt) = &args.log_file {
        let log_path = log_path_opt
            .as_ref()
            .cloned()
            .unwrap_or_else(|| config::config_file("spin360.log", path_config));
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }
        let file = std::fs::File::create(&log_path)
            .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .filter_module("reqwest", log::LevelFilter::Info)
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!("Logging to file: {} (level: {:?})", log_path.display(), log_level);
    } else {
        // Console logging (respects RUST_LOG if set)
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .filter_module("egui", log::LevelFilter::Info)
            .filter_module("reqwest", log::LevelFilter::Info)
            .format_timestamp_millis()
            .init();
    }
    Ok(())
}
