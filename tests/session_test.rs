//! Integration tests for session aggregation over recorded traces


use posture_analysis::analyzer::{PostureAnalyzer, Verdict};
use posture_analysis::config::Thresholds;
use posture_analysis::landmarks::Landmark;
use posture_analysis::provider::{LandmarkProvider, LandmarkTrace, RecordedProvider, TraceFrame};
use posture_analysis::rules::{messages, PostureMode};
use posture_analysis::session::SamplingPolicy;
use test_helpers::{head_tilt_frame, neutral_sitting_frame, uneven_shoulder_frame};

fn run_session(frames: Vec<TraceFrame>, sampling: SamplingPolicy) -> posture_analysis::session::SessionSummary {
    let trace = LandmarkTrace { frames };
    let indices = trace.frame_indices();
    let mut analyzer = PostureAnalyzer::new(RecordedProvider::new(trace), Thresholds::default());
    analyzer.analyze_session(&indices, PostureMode::Sitting, sampling)
}

#[test]
fn test_quarter_bad_session_rates_good() {
    // 100 frames, exactly 25 bad: 25% sits under the 30% cut
    let mut frames = Vec::with_capacity(100);
    for i in 0..100 {
        frames.push(if i < 25 {
            uneven_shoulder_frame()
        } else {
            neutral_sitting_frame()
        });
    }

    let summary = run_session(frames, SamplingPolicy::Stride(1));
    assert_eq!(summary.total_frames, 100);
    assert_eq!(summary.analyzed_frames, 100);
    assert_eq!(summary.bad_posture_count, 25);
    assert!((summary.bad_posture_percentage - 25.0).abs() < 1e-12);
    assert_eq!(summary.overall_rating, Verdict::Good);
    assert_eq!(
        summary.top_issues,
        vec![(messages::UNEVEN_SHOULDERS.to_string(), 25)]
    );
}

#[test]
fn test_all_good_session() {
    let summary = run_session(vec![neutral_sitting_frame(); 10], SamplingPolicy::Stride(1));
    assert_eq!(summary.analyzed_frames, 10);
    assert!((summary.bad_posture_percentage - 0.0).abs() < f64::EPSILON);
    assert!(summary.top_issues.is_empty());
}

#[test]
fn test_empty_trace_yields_zeroed_summary() {
    let summary = run_session(Vec::new(), SamplingPolicy::default());
    assert_eq!(summary.total_frames, 0);
    assert_eq!(summary.analyzed_frames, 0);
    assert!((summary.bad_posture_percentage - 0.0).abs() < f64::EPSILON);
    assert_eq!(summary.overall_rating, Verdict::Good);
}

#[test]
fn test_no_pose_frames_counted_but_not_analyzed() {
    let frames = vec![
        neutral_sitting_frame(),
        None,
        None,
        uneven_shoulder_frame(),
    ];

    let summary = run_session(frames, SamplingPolicy::Stride(1));
    assert_eq!(summary.total_frames, 4);
    assert_eq!(summary.analyzed_frames, 2);
    assert_eq!(summary.bad_posture_count, 1);
    assert!((summary.bad_posture_percentage - 50.0).abs() < 1e-12);
}

#[test]
fn test_auto_sampling_caps_analyzed_frames() {
    // 1000 frames with a 100-frame cap resolve to stride 10
    let summary = run_session(
        vec![neutral_sitting_frame(); 1000],
        SamplingPolicy::Auto { max_frames: 100 },
    );
    assert_eq!(summary.total_frames, 1000);
    assert_eq!(summary.analyzed_frames, 100);
}

#[test]
fn test_fixed_stride_subsamples() {
    let mut frames = vec![neutral_sitting_frame(); 10];
    // Bad frames at odd indices are skipped by a stride of 2
    for i in (1..10).step_by(2) {
        frames[i] = uneven_shoulder_frame();
    }

    let summary = run_session(frames, SamplingPolicy::Stride(2));
    assert_eq!(summary.analyzed_frames, 5);
    assert_eq!(summary.bad_posture_count, 0);
}

#[test]
fn test_issue_counts_accumulate_across_frames() {
    let frames = vec![
        head_tilt_frame(),
        uneven_shoulder_frame(),
        head_tilt_frame(),
        head_tilt_frame(),
    ];

    let summary = run_session(frames, SamplingPolicy::Stride(1));
    assert_eq!(summary.bad_posture_count, 4);
    // 100% bad flips the session rating
    assert_eq!(summary.overall_rating, Verdict::Bad);
    assert_eq!(summary.top_issues.len(), 2);
    assert_eq!(summary.top_issues[0], (messages::HEAD_TILT.to_string(), 3));
    assert_eq!(summary.top_issues[1], (messages::UNEVEN_SHOULDERS.to_string(), 1));
}

#[test]
fn test_provider_failures_do_not_abort_session() {
    /// Provider that fails on every odd frame and reports a clean pose
    /// otherwise
    struct FlakyProvider {
        pose: Vec<Landmark>,
    }

    impl LandmarkProvider for FlakyProvider {
        type Frame = usize;

        fn process(&mut self, frame: &usize) -> posture_analysis::Result<Option<Vec<Landmark>>> {
            if frame % 2 == 1 {
                return Err(posture_analysis::Error::Provider("inference backend gone".to_string()));
            }
            Ok(Some(self.pose.clone()))
        }
    }

    let pose = neutral_sitting_frame().unwrap();
    let mut analyzer = PostureAnalyzer::new(FlakyProvider { pose }, Thresholds::default());
    let frames: Vec<usize> = (0..10).collect();

    let summary = analyzer.analyze_session(&frames, PostureMode::Sitting, SamplingPolicy::Stride(1));
    assert_eq!(summary.total_frames, 10);
    assert_eq!(summary.analyzed_frames, 5);
    assert_eq!(summary.overall_rating, Verdict::Good);
}
