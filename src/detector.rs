//! Landmark source boundary.
//!
//! The actual hand-landmark model (camera, inference runtime) lives
//! behind the [`HandDetector`] trait.  This module carries the retry
//! policy for model initialization and a scripted detector that stands
//! in for hardware in tests and the demo binary.

use std::collections::VecDeque;
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::landmarks::{DetectedHand, Landmark, HAND_LANDMARK_COUNT};

// ── DetectorError ───────────────────────────────────────────

/// Failures surfaced by the landmark collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DetectorError {
    /// Initialization still failing after the whole retry budget.
    #[error("detector initialization failed after {attempts} attempts: {reason}")]
    Init { attempts: u32, reason: String },
    /// A per-frame detection failure from the underlying model.
    #[error("detector backend error: {0}")]
    Backend(String),
}

// ── HandDetector trait ──────────────────────────────────────

/// A collaborator that detects hands in whatever input it watches.
///
/// One detection returns zero or more hands, each with 21 landmarks
/// and optional handedness.  Consumers of this crate only ever use the
/// first usable hand per frame.
pub trait HandDetector {
    /// Load whatever model resources the detector needs.
    fn initialize(&mut self) -> Result<(), DetectorError>;

    /// Detect hands in the current input frame.
    fn detect(&mut self) -> Result<Vec<DetectedHand>, DetectorError>;

    /// Release model resources.  Must be safe to call more than once.
    fn shutdown(&mut self);
}

// ── RetryPolicy ─────────────────────────────────────────────

/// Bounded-attempt, fixed-backoff retry for detector initialization.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total initialization attempts before giving up.
    pub attempts: u32,
    /// Fixed delay between attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff: Duration::from_millis(1000),
        }
    }
}

/// Initialize `detector`, retrying per `policy`.
///
/// Returns [`DetectorError::Init`] wrapping the last failure once the
/// attempt budget is exhausted.
pub fn initialize_with_retry(
    detector: &mut dyn HandDetector,
    policy: &RetryPolicy,
) -> Result<(), DetectorError> {
    let attempts = policy.attempts.max(1);
    let mut last_reason = String::new();
    for attempt in 1..=attempts {
        match detector.initialize() {
            Ok(()) => {
                info!("detector initialized on attempt {attempt}");
                return Ok(());
            }
            Err(err) => {
                warn!("detector init attempt {attempt}/{attempts} failed: {err}");
                last_reason = err.to_string();
                if attempt < attempts {
                    thread::sleep(policy.backoff);
                }
            }
        }
    }
    Err(DetectorError::Init {
        attempts,
        reason: last_reason,
    })
}

// ── ScriptedDetector ────────────────────────────────────────

/// Detector fed from a fixed queue of frames.
///
/// Replaces real hardware in tests and the demo: each `detect()` pops
/// the next scripted frame; an exhausted script reports no hands.
pub struct ScriptedDetector {
    frames: VecDeque<Result<Vec<DetectedHand>, DetectorError>>,
    /// How many initialize() calls fail before one succeeds.
    init_failures: u32,
    initialized: bool,
}

impl ScriptedDetector {
    pub fn new() -> Self {
        Self {
            frames: VecDeque::new(),
            init_failures: 0,
            initialized: false,
        }
    }

    /// Make the first `n` initialize() calls fail.
    pub fn failing_initializations(mut self, n: u32) -> Self {
        self.init_failures = n;
        self
    }

    /// Queue a frame containing the given hands.
    pub fn push_frame(&mut self, hands: Vec<DetectedHand>) {
        self.frames.push_back(Ok(hands));
    }

    /// Queue a frame that fails at the detector.
    pub fn push_failure(&mut self, reason: &str) {
        self.frames
            .push_back(Err(DetectorError::Backend(reason.to_string())));
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl Default for ScriptedDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl HandDetector for ScriptedDetector {
    fn initialize(&mut self) -> Result<(), DetectorError> {
        if self.init_failures > 0 {
            self.init_failures -= 1;
            return Err(DetectorError::Backend("model unavailable".to_string()));
        }
        self.initialized = true;
        Ok(())
    }

    fn detect(&mut self) -> Result<Vec<DetectedHand>, DetectorError> {
        match self.frames.pop_front() {
            Some(frame) => frame,
            None => {
                debug!("scripted detector exhausted; reporting no hands");
                Ok(Vec::new())
            }
        }
    }

    fn shutdown(&mut self) {
        self.initialized = false;
    }
}

// ── Synthetic hands ─────────────────────────────────────────

/// A 21-point open-palm hand: all five fingers straight and pointing
/// up.  Scores ~0.9 against the alphabet's "B" template, which makes
/// it a convenient accepted-quality frame for simulation.
pub fn open_palm_hand() -> Vec<Landmark> {
    const SEG_LEN: f32 = 0.08;
    let mut landmarks = vec![Landmark::flat(0.5, 0.9); HAND_LANDMARK_COUNT];
    // Finger chains occupy indices 1..=20, four joints each.
    for (finger, base_x) in [0.30f32, 0.40, 0.47, 0.54, 0.61].iter().enumerate() {
        let base_slot = 1 + finger * 4;
        for joint in 0..4 {
            landmarks[base_slot + joint] =
                Landmark::flat(*base_x, 0.6 - SEG_LEN * joint as f32);
        }
    }
    landmarks
}

// ── Tests ───────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_succeeds_after_transient_failures() {
        let mut detector = ScriptedDetector::new().failing_initializations(2);
        let policy = RetryPolicy {
            attempts: 3,
            backoff: Duration::from_millis(0),
        };
        assert!(initialize_with_retry(&mut detector, &policy).is_ok());
        assert!(detector.is_initialized());
    }

    #[test]
    fn test_retry_gives_up_after_budget() {
        let mut detector = ScriptedDetector::new().failing_initializations(5);
        let policy = RetryPolicy {
            attempts: 3,
            backoff: Duration::from_millis(0),
        };
        let err = initialize_with_retry(&mut detector, &policy).unwrap_err();
        match err {
            DetectorError::Init { attempts, .. } => assert_eq!(attempts, 3),
            other => panic!("expected Init error, got {other:?}"),
        }
        assert!(!detector.is_initialized());
    }

    #[test]
    fn test_scripted_frames_pop_in_order() {
        let mut detector = ScriptedDetector::new();
        detector.push_frame(vec![DetectedHand::new(open_palm_hand())]);
        detector.push_frame(Vec::new());
        detector.push_failure("camera unplugged");

        assert_eq!(detector.detect().unwrap().len(), 1);
        assert!(detector.detect().unwrap().is_empty());
        assert!(matches!(detector.detect(), Err(DetectorError::Backend(_))));
        // Exhausted script keeps reporting no hands.
        assert!(detector.detect().unwrap().is_empty());
    }

    #[test]
    fn test_shutdown_releases() {
        let mut detector = ScriptedDetector::new();
        detector.initialize().unwrap();
        assert!(detector.is_initialized());
        detector.shutdown();
        detector.shutdown(); // idempotent
        assert!(!detector.is_initialized());
    }

    #[test]
    fn test_open_palm_hand_shape() {
        let hand = open_palm_hand();
        assert_eq!(hand.len(), HAND_LANDMARK_COUNT);
        // Every fingertip sits above its base (image y grows downward).
        for base in [1usize, 5, 9, 13, 17] {
            assert!(hand[base + 3].y < hand[base].y);
        }
    }
}
