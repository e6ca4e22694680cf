//! mousebind - mouse button to keyboard shortcut daemon
//!
//! Entry point for the daemon binary.

use anyhow::Result;
use clap::Parser;
use tokio::io::AsyncBufReadExt;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mousebind::config::Config;
use mousebind::engine::TracingInjector;
use mousebind::{MouseButton, MouseListener};

/// Command-line arguments for mousebind
#[derive(Parser, Debug)]
#[command(name = "mousebind")]
#[command(version, about = "Mouse button to keyboard shortcut daemon", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "/etc/mousebind/config.toml")]
    pub config: String,

    /// Mapping file path (overrides the configured path)
    #[arg(short, long, env = "MOUSEBIND_MAPPINGS")]
    pub mappings: Option<std::path::PathBuf>,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log format (json|pretty|compact)
    #[arg(long, default_value = "pretty")]
    pub log_format: String,

    /// Write logs to file (in addition to stdout)
    #[arg(long)]
    pub log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}, using defaults", e);
        Config::default()
    });
    let config = config.with_overrides(args.mappings.clone());

    // Initialize logging
    init_logging(&args, &config)?;

    info!("════════════════════════════════════════════════════════");
    info!("  mousebind v{}", env!("CARGO_PKG_VERSION"));
    info!("  Built: {}", env!("BUILD_DATE"));
    info!("  Commit: {}", env!("GIT_HASH"));
    info!("════════════════════════════════════════════════════════");
    info!(mappings = %config.listener.mappings_path.display(), "configuration loaded");

    // No platform hook backend is bundled; key injection goes to the
    // tracing injector and button events arrive on stdin, one button
    // number per line, each treated as a release.
    let listener = MouseListener::new(&config, TracingInjector);
    let started = listener.start();
    if !started.success {
        anyhow::bail!("failed to start listener: {}", started.message);
    }

    let sink = listener.sink();
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => match line? {
                Some(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match line.parse::<u8>() {
                        Ok(number) => {
                            sink.on_click(0.0, 0.0, MouseButton::from_number(number), false);
                        }
                        Err(_) => warn!(input = %line, "expected a button number"),
                    }
                }
                None => {
                    // stdin closed; keep running until interrupted
                    tokio::signal::ctrl_c().await?;
                    break;
                }
            },
        }
    }

    listener.stop();
    info!("mousebind shut down");
    Ok(())
}

fn init_logging(args: &Args, config: &Config) -> Result<()> {
    use std::fs::File;

    let log_level = match args.verbose {
        0 => config.logging.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("mousebind={},warn", log_level))
    });

    // If log file is specified, write to both stdout and file
    if let Some(log_file_path) = &args.log_file {
        let file = File::create(log_file_path)?;

        match args.log_format.as_str() {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(std::io::stdout),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
            "compact" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(std::io::stdout),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .pretty()
                            .with_writer(std::io::stdout),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
        }
        info!("Logging to file: {}", log_file_path);
    } else {
        match args.log_format.as_str() {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().json())
                    .init();
            }
            "compact" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().compact())
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().pretty())
                    .init();
            }
        }
    }

    Ok(())
}
