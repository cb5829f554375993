//! Landmark provider contract and the recorded-trace implementation.
//!
//! The pose model itself is an external collaborator: all the engine
//! needs is something that, given a frame, either returns the complete
//! 33-entry landmark array or reports that no pose was found. The handle
//! is owned by the caller and passed in explicitly, so per-thread
//! instances and clean teardown are the caller's choice rather than a
//! process-wide singleton.

use crate::landmarks::Landmark;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Source of pose landmarks for single frames.
///
/// Implementations must be deterministic for a static frame under fixed
/// configuration. `process` takes `&mut self` because real providers hold
/// internal model buffers and are not safe to share across threads.
pub trait LandmarkProvider {
    /// The frame representation this provider consumes
    type Frame;

    /// Run pose detection on one frame.
    ///
    /// Returns `Ok(None)` when no pose is found; that is a valid outcome,
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Provider`] when the provider cannot be invoked at
    /// all for this frame.
    fn process(&mut self, frame: &Self::Frame) -> Result<Option<Vec<Landmark>>>;
}

/// One frame of a recorded landmark trace: `None` when the pose model
/// found no skeleton
pub type TraceFrame = Option<Vec<Landmark>>;

/// A landmark trace recorded from a real pose model run, one entry per
/// video frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkTrace {
    pub frames: Vec<TraceFrame>,
}

impl LandmarkTrace {
    /// Load a trace from a JSON file (an array of nullable landmark
    /// arrays).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Number of frames in the trace
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the trace holds no frames
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame handles covering the whole trace, in order
    #[must_use]
    pub fn frame_indices(&self) -> Vec<usize> {
        (0..self.frames.len()).collect()
    }
}

/// Provider replaying a recorded trace, addressed by frame index.
///
/// Doubles as the test double for the engine: it honors the full provider
/// contract, including the no-pose outcome.
#[derive(Debug, Clone)]
pub struct RecordedProvider {
    trace: LandmarkTrace,
}

impl RecordedProvider {
    /// Wrap a trace for replay
    #[must_use]
    pub fn new(trace: LandmarkTrace) -> Self {
        Self { trace }
    }

    /// Load a trace file and wrap it for replay
    ///
    /// # Errors
    ///
    /// Returns an error if the trace cannot be loaded.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(LandmarkTrace::from_file(path)?))
    }

    /// The wrapped trace
    #[must_use]
    pub fn trace(&self) -> &LandmarkTrace {
        &self.trace
    }
}

impl LandmarkProvider for RecordedProvider {
    type Frame = usize;

    fn process(&mut self, frame: &usize) -> Result<Option<Vec<Landmark>>> {
        self.trace
            .frames
            .get(*frame)
            .cloned()
            .ok_or_else(|| Error::Provider(format!("frame {frame} is beyond the recorded trace")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_and_no_pose() {
        let trace = LandmarkTrace {
            frames: vec![Some(vec![Landmark::at(0.5, 0.5)]), None],
        };
        let mut provider = RecordedProvider::new(trace);

        let detected = provider.process(&0).unwrap();
        assert!(detected.is_some());

        let missing = provider.process(&1).unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_out_of_range_frame_fails() {
        let mut provider = RecordedProvider::new(LandmarkTrace::default());
        assert!(matches!(provider.process(&3), Err(Error::Provider(_))));
    }

    #[test]
    fn test_trace_json_shape() {
        // A trace is a bare JSON array of nullable landmark arrays
        let json = r#"[null, [{"x": 0.5, "y": 0.25, "visibility": 0.9}]]"#;
        let trace: LandmarkTrace = serde_json::from_str(json).unwrap();
        assert_eq!(trace.len(), 2);
        assert!(trace.frames[0].is_none());
        let landmarks = trace.frames[1].as_ref().unwrap();
        assert!((landmarks[0].y - 0.25).abs() < 1e-12);
        assert!((landmarks[0].z - 0.0).abs() < 1e-12);
    }
}
