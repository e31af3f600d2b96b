//! Hand landmark data structures.
//!
//! Models the 21-point hand produced by MediaPipe-style detectors:
//! one wrist point plus four joints per finger, in a fixed anatomical
//! order.  Coordinates are normalized image space — x grows rightward,
//! y grows downward, z is depth and defaults to 0 when the detector
//! omits it.

// ── Landmark indices ────────────────────────────────────────

/// Number of landmarks in a usable hand frame.
pub const HAND_LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

// ── Landmark ────────────────────────────────────────────────

/// A single 3-D keypoint in normalized image space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Construct from a 2-D point; depth defaults to 0.
    pub fn flat(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Euclidean distance to another landmark.
    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

// ── Handedness ──────────────────────────────────────────────

/// Which hand the detector believes it saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Parse a detector handedness label (case-insensitive).
    pub fn from_label(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

// ── DetectedHand ────────────────────────────────────────────

/// One hand as reported by a detector for a single frame.
#[derive(Debug, Clone)]
pub struct DetectedHand {
    /// Ordered landmarks; a usable hand has exactly
    /// [`HAND_LANDMARK_COUNT`] entries.
    pub landmarks: Vec<Landmark>,
    /// Handedness label if the detector provides one.
    pub handedness: Option<Handedness>,
}

impl DetectedHand {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self {
            landmarks,
            handedness: None,
        }
    }

    /// Whether the frame carries enough landmarks to classify.
    pub fn is_usable(&self) -> bool {
        self.landmarks.len() >= HAND_LANDMARK_COUNT
    }
}

// ── Tests ───────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_distance() {
        let a = Landmark::new(0.0, 0.0, 0.0);
        let b = Landmark::new(3.0, 4.0, 0.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_flat_defaults_depth_to_zero() {
        let p = Landmark::flat(0.3, 0.7);
        assert_eq!(p.z, 0.0);
    }

    #[test]
    fn test_handedness_labels() {
        assert_eq!(Handedness::from_label("Left"), Some(Handedness::Left));
        assert_eq!(Handedness::from_label("RIGHT"), Some(Handedness::Right));
        assert_eq!(Handedness::from_label("unknown"), None);
        assert_eq!(Handedness::Left.as_str(), "left");
    }

    #[test]
    fn test_usable_hand_needs_21_points() {
        let short = DetectedHand::new(vec![Landmark::flat(0.0, 0.0); 10]);
        assert!(!short.is_usable());

        let full = DetectedHand::new(vec![Landmark::flat(0.0, 0.0); HAND_LANDMARK_COUNT]);
        assert!(full.is_usable());
    }

    #[test]
    fn test_index_constants_cover_the_hand() {
        assert_eq!(WRIST, 0);
        assert_eq!(THUMB_CMC, 1);
        assert_eq!(THUMB_TIP, 4);
        assert_eq!(INDEX_TIP, 8);
        assert_eq!(MIDDLE_TIP, 12);
        assert_eq!(RING_TIP, 16);
        assert_eq!(PINKY_TIP, 20);
        assert_eq!(PINKY_TIP + 1, HAND_LANDMARK_COUNT);
    }
}
