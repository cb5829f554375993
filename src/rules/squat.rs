//! Squat form evaluator.
//!
//! Works on the shoulder, hip, knee, and ankle keypoints. Joint angles
//! are averaged over both sides so a half-visible rep does not swing the
//! verdict on one noisy landmark.

use super::{messages, Evaluation, PostureIssue};
use crate::config::Thresholds;
use crate::geometry::angle;
use crate::landmarks::{BodyPart, KeypointSet};
use crate::{Error, Result};

/// Measurement key for the averaged hip-knee-ankle angle
pub const AVG_KNEE_ANGLE: &str = "avg_knee_angle";
/// Measurement key for the averaged shoulder-hip-knee angle
pub const AVG_HIP_ANGLE: &str = "avg_hip_angle";
/// Measurement key for knee separation over hip separation
pub const KNEE_HIP_RATIO: &str = "knee_hip_ratio";
/// Measurement key for the averaged ankle-knee horizontal offset
pub const ANKLE_KNEE_OFFSET: &str = "ankle_knee_offset";

/// Hip separations below this cannot anchor the valgus ratio
const MIN_HIP_SEPARATION: f64 = 1e-9;

/// Evaluate squat form for one frame.
///
/// Four independent checks: depth (shallow/deep bands on the averaged
/// knee angle), knee valgus, torso lean (bands on the averaged hip
/// angle), and ankle-knee alignment.
///
/// # Errors
///
/// Returns [`Error::IncompleteKeypoints`] for a missing landmark,
/// [`Error::DegenerateGeometry`] when a joint angle is degenerate or the
/// hip separation is zero.
pub fn evaluate(keypoints: &KeypointSet, thresholds: &Thresholds) -> Result<Evaluation> {
    let left_shoulder = keypoints.point(BodyPart::LeftShoulder)?;
    let right_shoulder = keypoints.point(BodyPart::RightShoulder)?;
    let left_hip = keypoints.point(BodyPart::LeftHip)?;
    let right_hip = keypoints.point(BodyPart::RightHip)?;
    let left_knee = keypoints.point(BodyPart::LeftKnee)?;
    let right_knee = keypoints.point(BodyPart::RightKnee)?;
    let left_ankle = keypoints.point(BodyPart::LeftAnkle)?;
    let right_ankle = keypoints.point(BodyPart::RightAnkle)?;

    let avg_knee_angle = (angle(left_hip, left_knee, left_ankle)?
        + angle(right_hip, right_knee, right_ankle)?)
        / 2.0;
    let avg_hip_angle = (angle(left_shoulder, left_hip, left_knee)?
        + angle(right_shoulder, right_hip, right_knee)?)
        / 2.0;

    let knee_separation = (left_knee.x - right_knee.x).abs();
    let hip_separation = (left_hip.x - right_hip.x).abs();
    if hip_separation < MIN_HIP_SEPARATION {
        return Err(Error::DegenerateGeometry(
            "zero hip separation in knee valgus check".to_string(),
        ));
    }
    let knee_hip_ratio = knee_separation / hip_separation;

    let ankle_offset = ((left_ankle.x - left_knee.x).abs() + (right_ankle.x - right_knee.x).abs()) / 2.0;

    let mut evaluation = Evaluation::default();
    evaluation
        .measurements
        .insert(AVG_KNEE_ANGLE.to_string(), avg_knee_angle);
    evaluation
        .measurements
        .insert(AVG_HIP_ANGLE.to_string(), avg_hip_angle);
    evaluation
        .measurements
        .insert(KNEE_HIP_RATIO.to_string(), knee_hip_ratio);
    evaluation
        .measurements
        .insert(ANKLE_KNEE_OFFSET.to_string(), ankle_offset);

    // Shallow and deep are mutually exclusive since the deep cutoff sits
    // below the shallow one (enforced by Config::validate).
    if avg_knee_angle > thresholds.squat_shallow_deg {
        evaluation
            .issues
            .push(PostureIssue::with_value(messages::SQUAT_TOO_SHALLOW, avg_knee_angle));
    } else if avg_knee_angle < thresholds.squat_deep_deg {
        evaluation
            .issues
            .push(PostureIssue::with_value(messages::SQUAT_TOO_DEEP, avg_knee_angle));
    }

    if knee_hip_ratio < thresholds.knee_valgus_ratio {
        evaluation
            .issues
            .push(PostureIssue::with_value(messages::KNEE_VALGUS, knee_hip_ratio));
    }

    if avg_hip_angle < thresholds.hip_angle_low {
        evaluation
            .issues
            .push(PostureIssue::with_value(messages::FORWARD_LEAN, avg_hip_angle));
    } else if avg_hip_angle > thresholds.hip_angle_high {
        evaluation
            .issues
            .push(PostureIssue::with_value(messages::TOO_UPRIGHT, avg_hip_angle));
    }

    if ankle_offset > thresholds.ankle_align {
        evaluation
            .issues
            .push(PostureIssue::with_value(messages::ANKLE_ALIGNMENT, ankle_offset));
    }

    Ok(evaluation)
}
