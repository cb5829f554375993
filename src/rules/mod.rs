//! Posture rule evaluators.
//!
//! One evaluator per supported posture mode, each a pure function from a
//! [`KeypointSet`] and the configured [`Thresholds`] to an [`Evaluation`].
//! The checks inside an evaluator are independent and order-insensitive;
//! several issues may co-occur in one frame.

pub mod sitting;
pub mod squat;

use crate::config::Thresholds;
use crate::landmarks::{BodyPart, KeypointSet};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Issue texts, fixed so session aggregation can count recurrences by
/// exact string.
pub mod messages {
    /// Reported when the provider finds no skeleton in the frame
    pub const NO_POSE: &str = "No person detected in the image";
    /// Sitting: ear midpoint ahead of the shoulder midpoint
    pub const FORWARD_HEAD: &str = "Forward head posture detected";
    /// Sitting: ear-shoulder-hip line bent past the configured gate
    pub const NECK_BENT: &str = "Neck bent too much";
    /// Sitting: shoulder heights differ
    pub const UNEVEN_SHOULDERS: &str = "Uneven shoulder height detected";
    /// Sitting: shoulder midpoint behind the hip midpoint
    pub const SLOUCHING: &str = "Slouching posture detected";
    /// Sitting: ear heights differ
    pub const HEAD_TILT: &str = "Head tilt detected";
    /// Squat: average knee angle above the shallow cutoff
    pub const SQUAT_TOO_SHALLOW: &str = "Squat depth too shallow - go deeper";
    /// Squat: average knee angle below the deep cutoff
    pub const SQUAT_TOO_DEEP: &str = "Squat too deep";
    /// Squat: knees narrower than the valgus fraction of hip width
    pub const KNEE_VALGUS: &str = "Knees caving inward";
    /// Squat: average hip angle below the lean cutoff
    pub const FORWARD_LEAN: &str = "Excessive forward lean";
    /// Squat: average hip angle above the upright cutoff
    pub const TOO_UPRIGHT: &str = "Torso too upright";
    /// Squat: ankles offset horizontally from the knees
    pub const ANKLE_ALIGNMENT: &str = "Poor ankle-knee alignment";
}

/// Supported posture modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostureMode {
    /// Desk posture: head, shoulder, and hip alignment
    #[default]
    Sitting,
    /// Squat form: knee and hip angles, knee tracking
    Squat,
}

impl PostureMode {
    /// Keypoints the mode's evaluator requires
    #[must_use]
    pub fn required_parts(self) -> &'static [BodyPart] {
        match self {
            Self::Sitting => &[
                BodyPart::LeftEar,
                BodyPart::RightEar,
                BodyPart::LeftShoulder,
                BodyPart::RightShoulder,
                BodyPart::LeftHip,
                BodyPart::RightHip,
            ],
            Self::Squat => &[
                BodyPart::LeftShoulder,
                BodyPart::RightShoulder,
                BodyPart::LeftHip,
                BodyPart::RightHip,
                BodyPart::LeftKnee,
                BodyPart::RightKnee,
                BodyPart::LeftAnkle,
                BodyPart::RightAnkle,
            ],
        }
    }

    /// Mode name as used in serialized form and on the CLI
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sitting => "sitting",
            Self::Squat => "squat",
        }
    }
}

/// A single posture finding with optional numeric evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostureIssue {
    /// Human-readable finding, one of the [`messages`] constants
    pub message: String,
    /// The measurement that triggered the finding, if any
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<f64>,
}

impl PostureIssue {
    /// Issue with numeric evidence
    #[must_use]
    pub fn with_value(message: &str, value: f64) -> Self {
        Self {
            message: message.to_string(),
            value: Some(value),
        }
    }

    /// Issue without numeric evidence
    #[must_use]
    pub fn plain(message: &str) -> Self {
        Self {
            message: message.to_string(),
            value: None,
        }
    }
}

/// Outcome of one evaluator run over one frame's keypoints
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    /// Findings, empty for good posture
    pub issues: Vec<PostureIssue>,
    /// Named measurements backing the findings
    pub measurements: BTreeMap<String, f64>,
}

impl Evaluation {
    /// Bad posture means at least one finding
    #[must_use]
    pub fn bad_posture(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// Dispatch to the evaluator for the given mode.
///
/// # Errors
///
/// Returns [`crate::Error::IncompleteKeypoints`] if a required landmark is
/// absent and [`crate::Error::DegenerateGeometry`] if an angle or ratio
/// cannot be computed. Callers degrade these into a frame-level error
/// result rather than propagating them further.
pub fn evaluate(mode: PostureMode, keypoints: &KeypointSet, thresholds: &Thresholds) -> Result<Evaluation> {
    match mode {
        PostureMode::Sitting => sitting::evaluate(keypoints, thresholds),
        PostureMode::Squat => squat::evaluate(keypoints, thresholds),
    }
}
