//! Per-frame analysis: provider invocation, keypoint extraction, rule
//! dispatch.
//!
//! Each frame moves through a fixed sequence: request landmarks, short-
//! circuit on no pose, extract the mode's keypoints, evaluate, and emit
//! exactly one [`FrameResult`]. Internal computation failures (missing
//! keypoint, degenerate angle) degrade into an error-carrying result
//! instead of propagating, so one bad frame can never abort a session.

use crate::config::Thresholds;
use crate::landmarks::KeypointSet;
use crate::provider::LandmarkProvider;
use crate::rules::{self, messages, PostureIssue, PostureMode};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Binary posture classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// No issues found (also the convention for no-pose and errored
    /// frames, which carry their own markers)
    #[default]
    Good,
    /// At least one issue found
    Bad,
}

/// Analysis outcome for a single frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameResult {
    /// Whether the provider found a skeleton in the frame
    pub landmarks_detected: bool,
    /// Binary posture classification
    pub verdict: Verdict,
    /// Findings for this frame
    pub issues: Vec<PostureIssue>,
    /// Named measurements backing the findings
    pub measurements: BTreeMap<String, f64>,
    /// Evaluation failure for this frame, if any; such frames are
    /// excluded from session tallies
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl FrameResult {
    /// Result for a frame in which the provider found no skeleton.
    ///
    /// Absence of a detected person is not classified as bad posture.
    #[must_use]
    pub fn no_pose() -> Self {
        Self {
            landmarks_detected: false,
            verdict: Verdict::Good,
            issues: vec![PostureIssue::plain(messages::NO_POSE)],
            measurements: BTreeMap::new(),
            error: None,
        }
    }

    /// Result for a frame whose evaluation failed after a successful
    /// detection
    #[must_use]
    pub fn evaluation_failed(message: String) -> Self {
        Self {
            landmarks_detected: true,
            verdict: Verdict::Good,
            issues: Vec::new(),
            measurements: BTreeMap::new(),
            error: Some(message),
        }
    }

    /// Whether this frame counts toward session tallies
    #[must_use]
    pub fn analyzable(&self) -> bool {
        self.landmarks_detected && self.error.is_none()
    }
}

/// Frame-by-frame posture analyzer owning its provider handle.
///
/// The provider is passed in at construction (not reached through a
/// global), so callers that want parallel sessions create one analyzer
/// per thread.
pub struct PostureAnalyzer<P> {
    provider: P,
    thresholds: Thresholds,
}

impl<P: LandmarkProvider> PostureAnalyzer<P> {
    /// Create an analyzer around a provider handle and threshold set
    pub fn new(provider: P, thresholds: Thresholds) -> Self {
        Self { provider, thresholds }
    }

    /// The configured thresholds
    #[must_use]
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Tear down the analyzer, returning the provider handle
    pub fn into_provider(self) -> P {
        self.provider
    }

    /// Analyze a single frame under the given mode.
    ///
    /// The provider is invoked exactly once; a transient provider failure
    /// is reported, not retried, since re-invocation on the same static
    /// frame cannot change the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Provider`] if the provider cannot be
    /// invoked. Every other failure is folded into the returned
    /// [`FrameResult`].
    pub fn analyze_frame(&mut self, frame: &P::Frame, mode: PostureMode) -> Result<FrameResult> {
        let Some(landmarks) = self.provider.process(frame)? else {
            log::debug!("no pose detected in frame");
            return Ok(FrameResult::no_pose());
        };

        let evaluation = KeypointSet::from_landmarks(&landmarks, mode.required_parts())
            .and_then(|keypoints| rules::evaluate(mode, &keypoints, &self.thresholds));

        match evaluation {
            Ok(evaluation) => {
                let verdict = if evaluation.bad_posture() {
                    Verdict::Bad
                } else {
                    Verdict::Good
                };
                Ok(FrameResult {
                    landmarks_detected: true,
                    verdict,
                    issues: evaluation.issues,
                    measurements: evaluation.measurements,
                    error: None,
                })
            }
            Err(e) => {
                log::warn!("frame evaluation failed: {e}");
                Ok(FrameResult::evaluation_failed(e.to_string()))
            }
        }
    }
}
