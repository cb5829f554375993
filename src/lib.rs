//! Posture classification engine for 2D body landmarks.
//!
//! This library turns the landmark arrays produced by an external pose
//! model into semantic posture findings:
//! 1. Geometry primitives compute joint angles and midpoints
//! 2. A keypoint extractor projects the full landmark array down to the
//!    named subset each evaluator needs
//! 3. Rule evaluators (sitting, squat) classify each frame as good or bad
//!    and name the specific issues
//! 4. A session aggregator reduces a sampled frame sequence into a report
//!    with ranked recurring issues
//!
//! The pose model itself is external: anything implementing
//! [`provider::LandmarkProvider`] can drive the engine, and the handle is
//! owned by the caller rather than shared process-wide.
//!
//! # Examples
//!
//! ## Analyzing a single frame
//!
//! ```
//! use posture_analysis::analyzer::PostureAnalyzer;
//! use posture_analysis::config::Thresholds;
//! use posture_analysis::provider::{LandmarkTrace, RecordedProvider};
//! use posture_analysis::rules::PostureMode;
//!
//! # fn main() -> posture_analysis::Result<()> {
//! // A trace recorded from a real pose model run; frame 0 had no pose
//! let provider = RecordedProvider::new(LandmarkTrace { frames: vec![None] });
//! let mut analyzer = PostureAnalyzer::new(provider, Thresholds::default());
//!
//! let result = analyzer.analyze_frame(&0, PostureMode::Sitting)?;
//! assert!(!result.landmarks_detected);
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Aggregating a video session
//!
//! ```
//! use posture_analysis::analyzer::PostureAnalyzer;
//! use posture_analysis::config::Thresholds;
//! use posture_analysis::provider::{LandmarkTrace, RecordedProvider};
//! use posture_analysis::rules::PostureMode;
//! use posture_analysis::session::SamplingPolicy;
//!
//! let trace = LandmarkTrace { frames: vec![None; 10] };
//! let frames = trace.frame_indices();
//! let mut analyzer = PostureAnalyzer::new(RecordedProvider::new(trace), Thresholds::default());
//!
//! let summary = analyzer.analyze_session(&frames, PostureMode::Squat, SamplingPolicy::default());
//! assert_eq!(summary.total_frames, 10);
//! assert_eq!(summary.analyzed_frames, 0);
//! ```

/// Per-frame orchestration and result records
pub mod analyzer;

/// Configuration management and decision thresholds
pub mod config;

/// Error types and result handling
pub mod error;

/// Planar geometry primitives
pub mod geometry;

/// Landmark records and keypoint extraction
pub mod landmarks;

/// Landmark provider contract and recorded-trace replay
pub mod provider;

/// Posture rule evaluators
pub mod rules;

/// Session aggregation
pub mod session;

pub use error::{Error, Result};
