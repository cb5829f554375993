//! Sitting posture evaluator.
//!
//! Works on the ear, shoulder, and hip keypoints. All checks run on the
//! frame's normalized coordinates; x decreases toward image-left, so
//! "ahead of" the shoulders means a smaller x under the usual side-on
//! camera framing.

use super::{messages, Evaluation, PostureIssue};
use crate::config::Thresholds;
use crate::geometry::{angle, midpoint};
use crate::landmarks::{BodyPart, KeypointSet};
use crate::Result;

/// Measurement key for the ear-shoulder-hip angle in degrees
pub const NECK_ANGLE_DEG: &str = "neck_angle_deg";
/// Measurement key for the absolute shoulder height difference
pub const SHOULDER_HEIGHT_DIFF: &str = "shoulder_height_diff";
/// Measurement key for the absolute ear height difference
pub const HEAD_TILT_DIFF: &str = "head_tilt_diff";

/// Evaluate sitting posture for one frame.
///
/// Five independent checks: forward head, optional neck-angle gate,
/// uneven shoulders, slouching, and head tilt. The neck angle is always
/// reported as a measurement even when no gate is configured.
///
/// # Errors
///
/// Returns [`crate::Error::IncompleteKeypoints`] for a missing landmark or
/// [`crate::Error::DegenerateGeometry`] when the ear, shoulder, and hip
/// midpoints coincide.
pub fn evaluate(keypoints: &KeypointSet, thresholds: &Thresholds) -> Result<Evaluation> {
    let left_ear = keypoints.point(BodyPart::LeftEar)?;
    let right_ear = keypoints.point(BodyPart::RightEar)?;
    let left_shoulder = keypoints.point(BodyPart::LeftShoulder)?;
    let right_shoulder = keypoints.point(BodyPart::RightShoulder)?;
    let left_hip = keypoints.point(BodyPart::LeftHip)?;
    let right_hip = keypoints.point(BodyPart::RightHip)?;

    let ear_mid = midpoint(left_ear, right_ear);
    let shoulder_mid = midpoint(left_shoulder, right_shoulder);
    let hip_mid = midpoint(left_hip, right_hip);

    let neck_angle = angle(ear_mid, shoulder_mid, hip_mid)?;
    let shoulder_diff = (left_shoulder.y - right_shoulder.y).abs();
    let ear_diff = (left_ear.y - right_ear.y).abs();

    let mut evaluation = Evaluation::default();
    evaluation
        .measurements
        .insert(NECK_ANGLE_DEG.to_string(), neck_angle);
    evaluation
        .measurements
        .insert(SHOULDER_HEIGHT_DIFF.to_string(), shoulder_diff);
    evaluation
        .measurements
        .insert(HEAD_TILT_DIFF.to_string(), ear_diff);

    if ear_mid.x < shoulder_mid.x - thresholds.forward_head_x {
        evaluation.issues.push(PostureIssue::with_value(
            messages::FORWARD_HEAD,
            shoulder_mid.x - ear_mid.x,
        ));
    }

    // The gate fires on deviation from a straight ear-shoulder-hip line;
    // the included angle itself is ~180 degrees in neutral posture.
    if let Some(limit) = thresholds.neck_angle_deg {
        let deviation = 180.0 - neck_angle;
        if deviation > limit {
            evaluation
                .issues
                .push(PostureIssue::with_value(messages::NECK_BENT, deviation));
        }
    }

    if shoulder_diff > thresholds.shoulder_height {
        evaluation
            .issues
            .push(PostureIssue::with_value(messages::UNEVEN_SHOULDERS, shoulder_diff));
    }

    if shoulder_mid.x < hip_mid.x - thresholds.slouch_x {
        evaluation.issues.push(PostureIssue::with_value(
            messages::SLOUCHING,
            hip_mid.x - shoulder_mid.x,
        ));
    }

    if ear_diff > thresholds.head_tilt_y {
        evaluation
            .issues
            .push(PostureIssue::with_value(messages::HEAD_TILT, ear_diff));
    }

    Ok(evaluation)
}
