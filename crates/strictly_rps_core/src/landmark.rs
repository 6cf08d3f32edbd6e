//! Hand landmarks as produced by a keypoint detector.
//!
//! Landmarks follow the standard 21-point hand skeleton numbering:
//! 0 is the wrist, and 4/8/12/16/20 are the thumb, index, middle, ring
//! and pinky fingertips.

use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter};
use tracing::instrument;

/// Number of landmarks in a complete hand skeleton.
pub const LANDMARK_COUNT: usize = 21;

/// A 2-D point in image-pixel space.
///
/// Y grows downward, so a raised fingertip has a *smaller* y than the wrist.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal pixel coordinate.
    pub x: f32,
    /// Vertical pixel coordinate.
    pub y: f32,
}

impl Landmark {
    /// Creates a new landmark.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another landmark.
    pub fn distance(&self, other: &Landmark) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Named landmark indices in the hand skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, Serialize, Deserialize)]
pub enum HandLandmark {
    /// Wrist (0).
    Wrist,
    /// Thumb carpometacarpal joint (1).
    ThumbCmc,
    /// Thumb metacarpophalangeal joint (2).
    ThumbMcp,
    /// Thumb interphalangeal joint (3).
    ThumbIp,
    /// Thumb tip (4).
    ThumbTip,
    /// Index finger knuckle (5).
    IndexMcp,
    /// Index finger middle joint (6).
    IndexPip,
    /// Index finger outer joint (7).
    IndexDip,
    /// Index fingertip (8).
    IndexTip,
    /// Middle finger knuckle (9).
    MiddleMcp,
    /// Middle finger middle joint (10).
    MiddlePip,
    /// Middle finger outer joint (11).
    MiddleDip,
    /// Middle fingertip (12).
    MiddleTip,
    /// Ring finger knuckle (13).
    RingMcp,
    /// Ring finger middle joint (14).
    RingPip,
    /// Ring finger outer joint (15).
    RingDip,
    /// Ring fingertip (16).
    RingTip,
    /// Pinky knuckle (17).
    PinkyMcp,
    /// Pinky middle joint (18).
    PinkyPip,
    /// Pinky outer joint (19).
    PinkyDip,
    /// Pinky tip (20).
    PinkyTip,
}

impl HandLandmark {
    /// The four non-thumb fingertips, in skeleton order.
    pub const FINGERTIPS: [HandLandmark; 4] = [
        HandLandmark::IndexTip,
        HandLandmark::MiddleTip,
        HandLandmark::RingTip,
        HandLandmark::PinkyTip,
    ];

    /// Converts to the skeleton index (0-20).
    pub fn to_index(self) -> usize {
        self as usize
    }
}

/// Error building a [`HandPose`] from raw detector output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PoseError {
    /// The detector returned a skeleton with the wrong number of points.
    #[display("Expected {} landmarks, got {}", LANDMARK_COUNT, _0)]
    WrongLandmarkCount(usize),
}

impl std::error::Error for PoseError {}

/// A validated hand skeleton of exactly [`LANDMARK_COUNT`] landmarks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandPose {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl HandPose {
    /// Validates raw landmarks into a pose.
    #[instrument(skip(landmarks), fields(count = landmarks.len()))]
    pub fn from_landmarks(landmarks: &[Landmark]) -> Result<Self, PoseError> {
        let landmarks: [Landmark; LANDMARK_COUNT] = landmarks
            .try_into()
            .map_err(|_| PoseError::WrongLandmarkCount(landmarks.len()))?;
        Ok(Self { landmarks })
    }

    /// Returns the landmark at a named index.
    pub fn get(&self, landmark: HandLandmark) -> Landmark {
        self.landmarks[landmark.to_index()]
    }

    /// Returns all landmarks in skeleton order.
    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.landmarks
    }

    /// Distance between the index and pinky knuckles, a proxy for hand scale.
    pub fn palm_width(&self) -> f32 {
        self.get(HandLandmark::IndexMcp)
            .distance(&self.get(HandLandmark::PinkyMcp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_landmark_indices_follow_skeleton_numbering() {
        assert_eq!(HandLandmark::COUNT, LANDMARK_COUNT);
        assert_eq!(HandLandmark::Wrist.to_index(), 0);
        assert_eq!(HandLandmark::ThumbTip.to_index(), 4);
        assert_eq!(HandLandmark::IndexTip.to_index(), 8);
        assert_eq!(HandLandmark::MiddleTip.to_index(), 12);
        assert_eq!(HandLandmark::RingTip.to_index(), 16);
        assert_eq!(HandLandmark::PinkyTip.to_index(), 20);
        for (i, landmark) in HandLandmark::iter().enumerate() {
            assert_eq!(landmark.to_index(), i);
        }
    }

    #[test]
    fn test_pose_requires_exactly_21_points() {
        let points = vec![Landmark::default(); 20];
        assert_eq!(
            HandPose::from_landmarks(&points),
            Err(PoseError::WrongLandmarkCount(20))
        );

        let points = vec![Landmark::default(); 22];
        assert_eq!(
            HandPose::from_landmarks(&points),
            Err(PoseError::WrongLandmarkCount(22))
        );

        let points = vec![Landmark::default(); LANDMARK_COUNT];
        assert!(HandPose::from_landmarks(&points).is_ok());
    }

    #[test]
    fn test_palm_width() {
        let mut points = vec![Landmark::default(); LANDMARK_COUNT];
        points[HandLandmark::IndexMcp.to_index()] = Landmark::new(100.0, 200.0);
        points[HandLandmark::PinkyMcp.to_index()] = Landmark::new(160.0, 280.0);
        let pose = HandPose::from_landmarks(&points).unwrap();
        assert!((pose.palm_width() - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_pose_keeps_skeleton_order() {
        let points: Vec<_> = (0..LANDMARK_COUNT)
            .map(|i| Landmark::new(i as f32, 2.0 * i as f32))
            .collect();
        let pose = HandPose::from_landmarks(&points).unwrap();
        assert_eq!(pose.landmarks().as_slice(), points.as_slice());
        assert_eq!(pose.get(HandLandmark::PinkyTip), Landmark::new(20.0, 40.0));
    }

    #[test]
    fn test_detection_json_shape() {
        let detection: Option<Vec<Landmark>> =
            serde_json::from_str(r#"[{"x": 12.5, "y": 300.0}, {"x": 0.0, "y": -4.0}]"#).unwrap();
        assert_eq!(
            detection,
            Some(vec![Landmark::new(12.5, 300.0), Landmark::new(0.0, -4.0)])
        );

        let absent: Option<Vec<Landmark>> = serde_json::from_str("null").unwrap();
        assert_eq!(absent, None);
    }
}
