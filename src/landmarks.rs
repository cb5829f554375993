//! Landmark records and keypoint extraction.
//!
//! The external pose model reports a fixed-length array of 33 body
//! landmarks per detected person, indexed by the standard pose topology.
//! Evaluators only consume the small named subset modeled by [`BodyPart`];
//! [`KeypointSet`] projects the full array down to that subset.

use crate::geometry::Point;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Number of entries in a complete pose landmark array
pub const POSE_LANDMARK_COUNT: usize = 33;

/// A single tracked body point as reported by the landmark provider.
///
/// `x` and `y` are normalized image coordinates in `[0, 1]` with y
/// increasing downward. `z` is a relative depth estimate with no fixed
/// range and is unused by the evaluators. `visibility` is the provider's
/// confidence that the point is visible, in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default)]
    pub visibility: f64,
}

impl Landmark {
    /// Create a landmark from 2D coordinates with full visibility
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: 1.0,
        }
    }

    /// The landmark's 2D position
    #[must_use]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Named body parts used by the posture evaluators.
///
/// Each variant maps to its fixed index in the provider's 33-entry
/// landmark array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Nose,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl BodyPart {
    /// Index of this part in the provider's landmark array
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Nose => 0,
            Self::LeftEar => 7,
            Self::RightEar => 8,
            Self::LeftShoulder => 11,
            Self::RightShoulder => 12,
            Self::LeftHip => 23,
            Self::RightHip => 24,
            Self::LeftKnee => 25,
            Self::RightKnee => 26,
            Self::LeftAnkle => 27,
            Self::RightAnkle => 28,
        }
    }

    /// Snake-case name, matching the serialized form
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The named subset of landmarks required by one evaluator.
///
/// Built once per frame and handed to the evaluator read-only. Access is
/// checked: asking for a part that was not extracted yields
/// [`Error::IncompleteKeypoints`] so evaluation degrades gracefully
/// instead of panicking.
#[derive(Debug, Clone, Default)]
pub struct KeypointSet {
    parts: BTreeMap<BodyPart, Landmark>,
}

impl KeypointSet {
    /// Project a full landmark array down to the requested parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompleteKeypoints`] if the array is too short to
    /// contain one of the requested parts. A provider that detects a pose
    /// reports the complete skeleton, so this only fires on malformed
    /// input.
    pub fn from_landmarks(landmarks: &[Landmark], parts: &[BodyPart]) -> Result<Self> {
        let mut set = BTreeMap::new();
        for &part in parts {
            let landmark = landmarks
                .get(part.index())
                .ok_or(Error::IncompleteKeypoints(part))?;
            set.insert(part, *landmark);
        }
        Ok(Self { parts: set })
    }

    /// Insert or replace a single keypoint
    pub fn insert(&mut self, part: BodyPart, landmark: Landmark) {
        self.parts.insert(part, landmark);
    }

    /// Remove a keypoint, returning it if present
    pub fn remove(&mut self, part: BodyPart) -> Option<Landmark> {
        self.parts.remove(&part)
    }

    /// Checked access to a keypoint
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompleteKeypoints`] if the part is absent.
    pub fn get(&self, part: BodyPart) -> Result<&Landmark> {
        self.parts.get(&part).ok_or(Error::IncompleteKeypoints(part))
    }

    /// Checked access to a keypoint's 2D position
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompleteKeypoints`] if the part is absent.
    pub fn point(&self, part: BodyPart) -> Result<Point> {
        self.get(part).map(Landmark::point)
    }

    /// Number of keypoints in the set
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the set holds no keypoints
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_array() -> Vec<Landmark> {
        let mut landmarks = vec![Landmark::default(); POSE_LANDMARK_COUNT];
        landmarks[BodyPart::LeftShoulder.index()] = Landmark::at(0.42, 0.45);
        landmarks[BodyPart::RightShoulder.index()] = Landmark::at(0.58, 0.45);
        landmarks
    }

    #[test]
    fn test_extract_requested_parts() {
        let set = KeypointSet::from_landmarks(
            &full_array(),
            &[BodyPart::LeftShoulder, BodyPart::RightShoulder],
        )
        .unwrap();

        assert_eq!(set.len(), 2);
        let left = set.get(BodyPart::LeftShoulder).unwrap();
        assert!((left.x - 0.42).abs() < 1e-12);
    }

    #[test]
    fn test_short_array_is_incomplete() {
        let landmarks = vec![Landmark::default(); 10];
        let result = KeypointSet::from_landmarks(&landmarks, &[BodyPart::LeftHip]);
        assert!(matches!(
            result,
            Err(Error::IncompleteKeypoints(BodyPart::LeftHip))
        ));
    }

    #[test]
    fn test_missing_part_access_fails() {
        let set = KeypointSet::from_landmarks(&full_array(), &[BodyPart::LeftShoulder]).unwrap();
        assert!(matches!(
            set.get(BodyPart::RightHip),
            Err(Error::IncompleteKeypoints(BodyPart::RightHip))
        ));
    }

    #[test]
    fn test_indices_fit_array() {
        for part in [
            BodyPart::Nose,
            BodyPart::LeftEar,
            BodyPart::RightEar,
            BodyPart::LeftShoulder,
            BodyPart::RightShoulder,
            BodyPart::LeftHip,
            BodyPart::RightHip,
            BodyPart::LeftKnee,
            BodyPart::RightKnee,
            BodyPart::LeftAnkle,
            BodyPart::RightAnkle,
        ] {
            assert!(part.index() < POSE_LANDMARK_COUNT);
        }
    }
}
