//! Configuration management for the posture analysis engine.
//!
//! Every decision threshold the evaluators use lives here rather than in
//! the rule code, so the rules stay declarative and tunable without
//! touching evaluator logic.

use crate::rules::PostureMode;
use crate::session::SamplingPolicy;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Posture mode to evaluate
    pub mode: PostureMode,

    /// Frame sampling configuration for video sessions
    pub sampling: SamplingConfig,

    /// Decision thresholds
    pub thresholds: Thresholds,
}

/// Frame sampling parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Fixed sampling stride; when unset the stride is derived from the
    /// video length to cap analyzed frames near `max_analyzed_frames`
    pub stride: Option<usize>,

    /// Target number of analyzed frames when no fixed stride is set
    pub max_analyzed_frames: usize,
}

/// Decision thresholds for both evaluators.
///
/// Normalized-coordinate tolerances and degree cutoffs, calibrated
/// empirically against typical camera framing rather than derived from
/// physical units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    /// Forward-head tolerance: ear midpoint more than this far left of the
    /// shoulder midpoint flags forward head posture
    pub forward_head_x: f64,

    /// Maximum shoulder height difference before flagging uneven shoulders
    pub shoulder_height: f64,

    /// Slouch tolerance: shoulder midpoint more than this far left of the
    /// hip midpoint flags slouching
    pub slouch_x: f64,

    /// Maximum ear height difference before flagging head tilt
    pub head_tilt_y: f64,

    /// Optional neck-angle gate in degrees of deviation from a straight
    /// ear-shoulder-hip line; `None` reports the angle without gating it
    pub neck_angle_deg: Option<f64>,

    /// Average knee angle above this means the squat is too shallow
    pub squat_shallow_deg: f64,

    /// Average knee angle below this means the squat is too deep
    pub squat_deep_deg: f64,

    /// Knee separation below this fraction of hip separation flags valgus
    pub knee_valgus_ratio: f64,

    /// Average hip angle below this flags excessive forward lean
    pub hip_angle_low: f64,

    /// Average hip angle above this flags a too-upright torso
    pub hip_angle_high: f64,

    /// Maximum average ankle-knee horizontal offset before flagging poor
    /// alignment
    pub ankle_align: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: PostureMode::default(),
            sampling: SamplingConfig::default(),
            thresholds: Thresholds::default(),
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            stride: None,
            max_analyzed_frames: 100,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            forward_head_x: 0.05,
            shoulder_height: 0.03,
            slouch_x: 0.08,
            head_tilt_y: 0.02,
            neck_angle_deg: None,
            squat_shallow_deg: 120.0,
            squat_deep_deg: 70.0,
            knee_valgus_ratio: 0.8,
            hip_angle_low: 85.0,
            hip_angle_high: 105.0,
            ankle_align: 0.05,
        }
    }
}

impl SamplingConfig {
    /// Resolve this configuration into a sampling policy
    #[must_use]
    pub fn policy(&self) -> SamplingPolicy {
        match self.stride {
            Some(stride) => SamplingPolicy::Stride(stride),
            None => SamplingPolicy::Auto {
                max_frames: self.max_analyzed_frames,
            },
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first inconsistent value.
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;

        for (name, value) in [
            ("forward_head_x", t.forward_head_x),
            ("shoulder_height", t.shoulder_height),
            ("slouch_x", t.slouch_x),
            ("head_tilt_y", t.head_tilt_y),
            ("ankle_align", t.ankle_align),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!(
                    "{name} must be a normalized tolerance between 0.0 and 1.0"
                )));
            }
        }

        for (name, value) in [
            ("squat_shallow_deg", t.squat_shallow_deg),
            ("squat_deep_deg", t.squat_deep_deg),
            ("hip_angle_low", t.hip_angle_low),
            ("hip_angle_high", t.hip_angle_high),
        ] {
            if !(0.0..=180.0).contains(&value) {
                return Err(Error::Config(format!("{name} must be between 0 and 180 degrees")));
            }
        }

        if t.squat_deep_deg >= t.squat_shallow_deg {
            return Err(Error::Config(
                "squat_deep_deg must be below squat_shallow_deg".to_string(),
            ));
        }
        if t.hip_angle_low >= t.hip_angle_high {
            return Err(Error::Config(
                "hip_angle_low must be below hip_angle_high".to_string(),
            ));
        }
        if t.knee_valgus_ratio <= 0.0 {
            return Err(Error::Config("knee_valgus_ratio must be positive".to_string()));
        }
        if let Some(limit) = t.neck_angle_deg {
            if !(0.0..=180.0).contains(&limit) {
                return Err(Error::Config(
                    "neck_angle_deg must be between 0 and 180 degrees".to_string(),
                ));
            }
        }

        if self.sampling.max_analyzed_frames == 0 {
            return Err(Error::Config(
                "max_analyzed_frames must be greater than 0".to_string(),
            ));
        }
        if self.sampling.stride == Some(0) {
            return Err(Error::Config("stride must be greater than 0".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Posture Analysis Configuration

# Posture mode: sitting or squat
mode: sitting

# Video sampling
sampling:
  # Fixed stride; omit to derive from video length
  stride: null
  max_analyzed_frames: 100

# Decision thresholds
thresholds:
  forward_head_x: 0.05
  shoulder_height: 0.03
  slouch_x: 0.08
  head_tilt_y: 0.02
  # Deviation gate for the neck angle; null reports without gating
  neck_angle_deg: null
  squat_shallow_deg: 120.0
  squat_deep_deg: 70.0
  knee_valgus_ratio: 0.8
  hip_angle_low: 85.0
  hip_angle_high: 105.0
  ankle_align: 0.05
"#;
