//! Pose descriptor builder — raw landmarks to per-finger geometry.
//!
//! Reduces a 21-point hand frame to five (curl, direction) pairs: how
//! bent each finger is, banded into three states by the summed interior
//! joint angles, and which of eight compass octants its base-to-tip
//! vector points toward.  Pure functions of the input; thresholds live
//! in [`DescriptorConfig`].

use crate::landmarks::{
    Landmark, INDEX_MCP, MIDDLE_MCP, PINKY_MCP, RING_MCP, THUMB_CMC,
};

// ── Finger ──────────────────────────────────────────────────

/// The five fingers, in fixed descriptor order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    /// All fingers in descriptor order.
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thumb => "thumb",
            Self::Index => "index",
            Self::Middle => "middle",
            Self::Ring => "ring",
            Self::Pinky => "pinky",
        }
    }

    /// Array index into a per-finger table.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Landmark indices of this finger's four-joint chain, base to tip.
    pub fn chain(&self) -> [usize; 4] {
        let base = match self {
            Self::Thumb => THUMB_CMC,
            Self::Index => INDEX_MCP,
            Self::Middle => MIDDLE_MCP,
            Self::Ring => RING_MCP,
            Self::Pinky => PINKY_MCP,
        };
        [base, base + 1, base + 2, base + 3]
    }
}

// ── CurlState ───────────────────────────────────────────────

/// Discretized degree of finger flexion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurlState {
    NoCurl,
    HalfCurl,
    FullCurl,
}

impl CurlState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoCurl => "no-curl",
            Self::HalfCurl => "half-curl",
            Self::FullCurl => "full-curl",
        }
    }

    /// Position in the ordered no/half/full band sequence.
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// Ordinal distance between two curl bands (0, 1, or 2).
    pub fn distance(&self, other: CurlState) -> u8 {
        self.ordinal().abs_diff(other.ordinal())
    }
}

// ── PointingDirection ───────────────────────────────────────

/// Discretized pointing direction of a finger's base-to-tip vector,
/// one of eight compass octants in the image plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointingDirection {
    VerticalUp,
    VerticalDown,
    HorizontalLeft,
    HorizontalRight,
    DiagonalUpLeft,
    DiagonalUpRight,
    DiagonalDownLeft,
    DiagonalDownRight,
}

impl PointingDirection {
    pub const ALL: [PointingDirection; 8] = [
        PointingDirection::VerticalUp,
        PointingDirection::VerticalDown,
        PointingDirection::HorizontalLeft,
        PointingDirection::HorizontalRight,
        PointingDirection::DiagonalUpLeft,
        PointingDirection::DiagonalUpRight,
        PointingDirection::DiagonalDownLeft,
        PointingDirection::DiagonalDownRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VerticalUp => "vertical-up",
            Self::VerticalDown => "vertical-down",
            Self::HorizontalLeft => "horizontal-left",
            Self::HorizontalRight => "horizontal-right",
            Self::DiagonalUpLeft => "diagonal-up-left",
            Self::DiagonalUpRight => "diagonal-up-right",
            Self::DiagonalDownLeft => "diagonal-down-left",
            Self::DiagonalDownRight => "diagonal-down-right",
        }
    }

    /// Canonical planar angle in degrees.  Measured with up = +90°,
    /// right = 0° (image y is flipped so "up" means toward the top of
    /// the frame).
    pub fn canonical_angle_deg(&self) -> f32 {
        match self {
            Self::HorizontalRight => 0.0,
            Self::DiagonalUpRight => 45.0,
            Self::VerticalUp => 90.0,
            Self::DiagonalUpLeft => 135.0,
            Self::HorizontalLeft => 180.0,
            Self::DiagonalDownLeft => -135.0,
            Self::VerticalDown => -90.0,
            Self::DiagonalDownRight => -45.0,
        }
    }

    /// The octant whose canonical angle is closest to `angle_deg`.
    pub fn nearest(angle_deg: f32) -> Self {
        let mut best = Self::HorizontalRight;
        let mut best_diff = f32::MAX;
        for dir in Self::ALL {
            let diff = wrap_angle_diff(angle_deg, dir.canonical_angle_deg());
            if diff < best_diff {
                best_diff = diff;
                best = dir;
            }
        }
        best
    }

    /// Angular separation between two octants, in degrees (0–180).
    pub fn angular_distance_deg(&self, other: PointingDirection) -> f32 {
        wrap_angle_diff(self.canonical_angle_deg(), other.canonical_angle_deg())
    }
}

/// Absolute angular difference wrapped into 0–180 degrees.
fn wrap_angle_diff(a: f32, b: f32) -> f32 {
    let mut d = (a - b) % 360.0;
    if d < -180.0 {
        d += 360.0;
    } else if d > 180.0 {
        d -= 360.0;
    }
    d.abs()
}

// ── DescriptorConfig ────────────────────────────────────────

/// Tunable thresholds for the descriptor builder.
#[derive(Debug, Clone)]
pub struct DescriptorConfig {
    /// Summed joint flexion (degrees) at which a finger leaves NoCurl.
    pub half_curl_min_deg: f32,
    /// Summed joint flexion (degrees) at which a finger becomes FullCurl.
    pub full_curl_min_deg: f32,
}

impl Default for DescriptorConfig {
    fn default() -> Self {
        Self {
            half_curl_min_deg: 50.0,
            full_curl_min_deg: 120.0,
        }
    }
}

// ── PoseDescriptor ──────────────────────────────────────────

/// Per-frame summary of a hand: one (curl, direction) pair per finger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseDescriptor {
    fingers: [(CurlState, PointingDirection); 5],
}

impl PoseDescriptor {
    /// Build from explicit per-finger states, ordered as [`Finger::ALL`].
    pub fn new(fingers: [(CurlState, PointingDirection); 5]) -> Self {
        Self { fingers }
    }

    /// Observed state for one finger.
    pub fn finger(&self, finger: Finger) -> (CurlState, PointingDirection) {
        self.fingers[finger.index()]
    }

    /// Derive a descriptor from a 21-point hand frame.
    ///
    /// Callers must pass at least [`crate::HAND_LANDMARK_COUNT`]
    /// landmarks; the session layer enforces this precondition.
    pub fn from_landmarks(landmarks: &[Landmark], config: &DescriptorConfig) -> Self {
        let mut fingers = [(CurlState::NoCurl, PointingDirection::VerticalUp); 5];
        for f in Finger::ALL {
            let chain = f.chain();
            let p: [&Landmark; 4] = [
                &landmarks[chain[0]],
                &landmarks[chain[1]],
                &landmarks[chain[2]],
                &landmarks[chain[3]],
            ];

            // Total flexion: interior bend at the two middle joints.
            let flexion =
                segment_bend_deg(p[0], p[1], p[2]) + segment_bend_deg(p[1], p[2], p[3]);
            let curl = if flexion >= config.full_curl_min_deg {
                CurlState::FullCurl
            } else if flexion >= config.half_curl_min_deg {
                CurlState::HalfCurl
            } else {
                CurlState::NoCurl
            };

            // Pointing direction: base-to-tip vector quantized to the
            // nearest octant.  Image y grows downward, so negate it.
            let dx = p[3].x - p[0].x;
            let dy = p[3].y - p[0].y;
            let angle_deg = (-dy).atan2(dx).to_degrees();
            let direction = PointingDirection::nearest(angle_deg);

            fingers[f.index()] = (curl, direction);
        }
        Self { fingers }
    }
}

/// Bend angle (degrees) between segments a→b and b→c.
/// Straight chains yield 0; degenerate segments yield 0.
fn segment_bend_deg(a: &Landmark, b: &Landmark, c: &Landmark) -> f32 {
    let u = [b.x - a.x, b.y - a.y, b.z - a.z];
    let v = [c.x - b.x, c.y - b.y, c.z - b.z];
    let ul = (u[0] * u[0] + u[1] * u[1] + u[2] * u[2]).sqrt();
    let vl = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if ul < 1e-6 || vl < 1e-6 {
        return 0.0;
    }
    let dot = u[0] * v[0] + u[1] * v[1] + u[2] * v[2];
    let cos = (dot / (ul * vl)).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

// ── Test helpers ────────────────────────────────────────────

/// Lay out a finger chain in the image plane starting at `base`,
/// heading along `heading_deg` (up = +90°), bending by `bend_deg`
/// at each of the two interior joints.
#[cfg(test)]
pub(crate) fn test_chain(
    base: (f32, f32),
    heading_deg: f32,
    bend_deg: f32,
) -> [Landmark; 4] {
    const SEG_LEN: f32 = 0.08;
    let mut points = [Landmark::flat(base.0, base.1); 4];
    let mut heading = heading_deg;
    for i in 1..4 {
        let prev = points[i - 1];
        let rad = heading.to_radians();
        // Image y grows downward.
        points[i] = Landmark::flat(prev.x + rad.cos() * SEG_LEN, prev.y - rad.sin() * SEG_LEN);
        heading += bend_deg;
    }
    points
}

// ── Tests ───────────────────────────────────────────────────
