use crate::shared::point::Point2D;

/// Number of landmarks in the 68-point annotation convention.
pub const LANDMARK_COUNT: usize = 68;

/// Index of the first non-jaw landmark. Points `0..17` trace the jawline
/// and are excluded from alignment, which uses only the inner 51 points
/// (brows, eyes, nose, mouth).
pub const INNER_START: usize = 17;

/// Facial landmarks for one detected face, in frame pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LandmarkSet {
    points: [Point2D; LANDMARK_COUNT],
}

impl LandmarkSet {
    pub fn new(points: [Point2D; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    /// The 51 inner landmarks used for alignment.
    pub fn inner(&self) -> &[Point2D] {
        &self.points[INNER_START..]
    }

    /// True when every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|p| p.is_finite())
    }
}

/// Collaborators hand landmarks over as slices; anything but exactly 68
/// points is a contract violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("expected {LANDMARK_COUNT} landmarks, got {0}")]
pub struct WrongLandmarkCount(pub usize);

impl TryFrom<&[Point2D]> for LandmarkSet {
    type Error = WrongLandmarkCount;

    fn try_from(points: &[Point2D]) -> Result<Self, Self::Error> {
        let points: [Point2D; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| WrongLandmarkCount(points.len()))?;
        Ok(Self::new(points))
    }
}
