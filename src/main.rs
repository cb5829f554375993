//! Posture analysis over recorded landmark traces.
//!
//! Replays a JSON landmark trace (one nullable 33-entry landmark array
//! per frame, as recorded from a pose model run) through the rule engine
//! and prints the per-frame result or session summary as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use posture_analysis::analyzer::PostureAnalyzer;
use posture_analysis::provider::RecordedProvider;
use posture_analysis::rules::PostureMode;
use posture_analysis::session::SamplingPolicy;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Landmark trace file (JSON array of nullable landmark arrays)
    trace: String,

    /// Posture mode (sitting, squat); falls back to the config file, then
    /// to sitting
    #[arg(short, long)]
    mode: Option<String>,

    /// Analyze a single frame by index instead of the whole session
    #[arg(short = 'F', long)]
    frame: Option<usize>,

    /// Fixed sampling stride; derived from the trace length when omitted
    #[arg(short, long)]
    stride: Option<usize>,

    /// Target number of analyzed frames when no stride is given
    #[arg(long, default_value = "100")]
    max_frames: usize,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    // Load configuration if provided
    let config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {config_path}");
        match posture_analysis::config::Config::from_file(config_path) {
            Ok(cfg) => {
                cfg.validate()?;
                cfg
            }
            Err(e) => {
                log::warn!("Failed to load config file: {e}. Using defaults.");
                posture_analysis::config::Config::default()
            }
        }
    } else {
        posture_analysis::config::Config::default()
    };

    // Command-line mode wins over the config file
    let mode = match args.mode.as_deref() {
        Some("squat") => PostureMode::Squat,
        Some("sitting") => PostureMode::Sitting,
        Some(other) => {
            log::warn!("Unknown mode '{other}', defaulting to sitting");
            PostureMode::Sitting
        }
        None => config.mode,
    };

    let sampling = match args.stride.or(config.sampling.stride) {
        Some(stride) => SamplingPolicy::Stride(stride),
        None => SamplingPolicy::Auto {
            max_frames: args.max_frames,
        },
    };

    let provider = RecordedProvider::from_file(&args.trace)
        .with_context(|| format!("cannot read landmark trace {}", args.trace))?;
    let frames = provider.trace().frame_indices();
    info!("Loaded trace with {} frames", frames.len());

    let mut analyzer = PostureAnalyzer::new(provider, config.thresholds.clone());

    if let Some(frame) = args.frame {
        let result = analyzer.analyze_frame(&frame, mode)?;
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let summary = analyzer.analyze_session(&frames, mode, sampling);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
