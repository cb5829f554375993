//! Session aggregation: many per-frame verdicts reduced to one report.
//!
//! A video is subsampled at a stride, each sampled frame analyzed
//! independently and strictly in order, and the per-frame verdicts and
//! issue texts tallied into a [`SessionSummary`]. No state crosses frames
//! other than the running tallies.

use crate::analyzer::{FrameResult, PostureAnalyzer, Verdict};
use crate::provider::LandmarkProvider;
use crate::rules::PostureMode;
use serde::{Deserialize, Serialize};

/// Bad-posture percentage at or above which a session is rated bad
const BAD_RATING_PERCENTAGE: f64 = 30.0;

/// Number of recurring issues reported in a summary
const TOP_ISSUE_COUNT: usize = 3;

/// How a video is subsampled for analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SamplingPolicy {
    /// Analyze every Nth frame
    Stride(usize),
    /// Derive the stride from the video length so roughly `max_frames`
    /// frames get analyzed regardless of duration
    Auto { max_frames: usize },
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        Self::Auto { max_frames: 100 }
    }
}

impl SamplingPolicy {
    /// Resolve the stride for a video of `total_frames` frames
    #[must_use]
    pub fn stride(&self, total_frames: usize) -> usize {
        match *self {
            Self::Stride(stride) => stride.max(1),
            Self::Auto { max_frames } => (total_frames / max_frames.max(1)).max(1),
        }
    }
}

/// Aggregated report for one analyzed video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Frames in the source sequence, sampled or not
    pub total_frames: usize,
    /// Sampled frames that produced a usable verdict
    pub analyzed_frames: usize,
    /// Analyzed frames classified bad
    pub bad_posture_count: usize,
    /// `bad_posture_count / analyzed_frames`, in percent; 0 when nothing
    /// was analyzed
    pub bad_posture_percentage: f64,
    /// Session-level classification
    pub overall_rating: Verdict,
    /// Up to three most frequent issue texts with their counts, ties kept
    /// in first-seen order
    pub top_issues: Vec<(String, usize)>,
}

/// Running tallies while a session is being analyzed
#[derive(Debug, Default)]
struct SessionTally {
    analyzed_frames: usize,
    bad_posture_count: usize,
    // Insertion order is the tie-breaker for top_issues, so a Vec keyed
    // by first occurrence instead of a map
    issue_counts: Vec<(String, usize)>,
}

impl SessionTally {
    /// Fold one frame result into the tallies.
    ///
    /// No-pose and errored frames are skipped entirely; they count toward
    /// `total_frames` only.
    fn record(&mut self, result: &FrameResult) {
        if !result.analyzable() {
            return;
        }

        self.analyzed_frames += 1;
        if result.verdict == Verdict::Bad {
            self.bad_posture_count += 1;
        }

        for issue in &result.issues {
            match self
                .issue_counts
                .iter_mut()
                .find(|(text, _)| *text == issue.message)
            {
                Some((_, count)) => *count += 1,
                None => self.issue_counts.push((issue.message.clone(), 1)),
            }
        }
    }

    fn finalize(mut self, total_frames: usize) -> SessionSummary {
        let bad_posture_percentage = if self.analyzed_frames == 0 {
            0.0
        } else {
            self.bad_posture_count as f64 / self.analyzed_frames as f64 * 100.0
        };

        let overall_rating = if bad_posture_percentage < BAD_RATING_PERCENTAGE {
            Verdict::Good
        } else {
            Verdict::Bad
        };

        // Stable sort keeps first-seen order among equal counts
        self.issue_counts.sort_by(|a, b| b.1.cmp(&a.1));
        self.issue_counts.truncate(TOP_ISSUE_COUNT);

        SessionSummary {
            total_frames,
            analyzed_frames: self.analyzed_frames,
            bad_posture_count: self.bad_posture_count,
            bad_posture_percentage,
            overall_rating,
            top_issues: self.issue_counts,
        }
    }
}

impl<P: LandmarkProvider> PostureAnalyzer<P> {
    /// Analyze a frame sequence and aggregate it into a session summary.
    ///
    /// Frames are sampled at the policy's stride and processed strictly
    /// sequentially. Per-frame failures of any kind are logged and
    /// excluded from `analyzed_frames`; they never abort the session.
    pub fn analyze_session(
        &mut self,
        frames: &[P::Frame],
        mode: PostureMode,
        sampling: SamplingPolicy,
    ) -> SessionSummary {
        let total_frames = frames.len();
        let stride = sampling.stride(total_frames);
        log::info!(
            "analyzing session: {total_frames} frames, stride {stride}, mode {}",
            mode.name()
        );

        let mut tally = SessionTally::default();
        for frame in frames.iter().step_by(stride) {
            match self.analyze_frame(frame, mode) {
                Ok(result) => tally.record(&result),
                Err(e) => {
                    // Frame stays in total_frames but not analyzed_frames
                    log::warn!("skipping frame after provider failure: {e}");
                }
            }
        }

        tally.finalize(total_frames)
    }
}
