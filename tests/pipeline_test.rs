//! Integration tests for the frame analysis pipeline


use posture_analysis::analyzer::{PostureAnalyzer, Verdict};
use posture_analysis::config::Thresholds;
use posture_analysis::landmarks::Landmark;
use posture_analysis::provider::{LandmarkProvider, LandmarkTrace, RecordedProvider};
use posture_analysis::rules::{messages, PostureMode};
use posture_analysis::Error;
use test_helpers::{neutral_sitting_frame, uneven_shoulder_frame};

fn analyzer_over(frames: Vec<Option<Vec<Landmark>>>) -> PostureAnalyzer<RecordedProvider> {
    PostureAnalyzer::new(
        RecordedProvider::new(LandmarkTrace { frames }),
        Thresholds::default(),
    )
}

#[test]
fn test_good_frame_through_pipeline() {
    let mut analyzer = analyzer_over(vec![neutral_sitting_frame()]);
    let result = analyzer.analyze_frame(&0, PostureMode::Sitting).unwrap();

    assert!(result.landmarks_detected);
    assert_eq!(result.verdict, Verdict::Good);
    assert!(result.issues.is_empty());
    assert!(result.error.is_none());
    // The neck angle is always reported as a measurement
    assert!(result.measurements.contains_key("neck_angle_deg"));
}

#[test]
fn test_bad_frame_through_pipeline() {
    let mut analyzer = analyzer_over(vec![uneven_shoulder_frame()]);
    let result = analyzer.analyze_frame(&0, PostureMode::Sitting).unwrap();

    assert_eq!(result.verdict, Verdict::Bad);
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].message, messages::UNEVEN_SHOULDERS);
    let diff = result.issues[0].value.unwrap();
    assert!((diff - 0.06).abs() < 1e-9);
}

#[test]
fn test_no_pose_frame() {
    let mut analyzer = analyzer_over(vec![None]);
    let result = analyzer.analyze_frame(&0, PostureMode::Sitting).unwrap();

    assert!(!result.landmarks_detected);
    assert_eq!(result.verdict, Verdict::Good);
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].message, messages::NO_POSE);
}

#[test]
fn test_default_mode_is_sitting() {
    assert_eq!(PostureMode::default(), PostureMode::Sitting);
}

#[test]
fn test_sitting_frame_under_squat_mode_fails_gracefully() {
    // The sitting pose has no knee or ankle data (zeroed slots produce
    // degenerate geometry), so squat evaluation must degrade into an
    // error result, not a panic or Err
    let mut analyzer = analyzer_over(vec![neutral_sitting_frame()]);
    let result = analyzer.analyze_frame(&0, PostureMode::Squat).unwrap();

    assert!(result.landmarks_detected);
    assert!(result.error.is_some());
}

#[test]
fn test_provider_invoked_once_per_frame() {
    /// Provider that counts invocations and always reports no pose
    struct CountingProvider {
        calls: usize,
    }

    impl LandmarkProvider for CountingProvider {
        type Frame = u32;

        fn process(&mut self, _frame: &u32) -> posture_analysis::Result<Option<Vec<Landmark>>> {
            self.calls += 1;
            Ok(None)
        }
    }

    let mut analyzer = PostureAnalyzer::new(CountingProvider { calls: 0 }, Thresholds::default());
    analyzer.analyze_frame(&7, PostureMode::Sitting).unwrap();
    assert_eq!(analyzer.into_provider().calls, 1);
}

#[test]
fn test_provider_failure_is_an_error() {
    let mut analyzer = analyzer_over(Vec::new());
    let result = analyzer.analyze_frame(&0, PostureMode::Sitting);
    assert!(matches!(result, Err(Error::Provider(_))));
}
