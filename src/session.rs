//! Recognition session — classification over a frame stream.
//!
//! Owns the detector collaborator and the matcher, debounces accepted
//! matches with a cooldown, and keeps a bounded FIFO history of
//! recognition events with on-demand statistics.
//!
//! Calls are synchronous and must be serialized by the caller (one
//! frame classified and consumed before the next); the session never
//! queues or parallelizes frames.  Separate sessions share no state
//! and are safe to drive from independent streams.

use std::collections::{HashSet, VecDeque};

use thiserror::Error;
use tracing::{debug, info};

use crate::descriptor::{DescriptorConfig, PoseDescriptor};
use crate::detector::{initialize_with_retry, DetectorError, HandDetector, RetryPolicy};
use crate::landmarks::{Landmark, HAND_LANDMARK_COUNT};
use crate::matcher::GestureMatcher;

// ── SessionError ────────────────────────────────────────────

/// Hard failures of the session API.  "No hand" and "no match" are
/// `Ok(None)` outcomes, not errors; nothing here corrupts session
/// state, so every error is recoverable by the caller.
#[derive(Debug, Error)]
pub enum SessionError {
    /// `classify` was called while the session is Idle.
    #[error("session is not armed; call start() first")]
    NotArmed,
    /// The supplied hand frame does not carry 21 landmarks.
    #[error("hand frame has {got} landmarks, expected {HAND_LANDMARK_COUNT}")]
    MalformedHand { got: usize },
    /// The landmark collaborator failed.
    #[error(transparent)]
    Detector(#[from] DetectorError),
}

// ── RecognitionEvent ────────────────────────────────────────

/// One accepted recognition: a letter, its confidence, and when.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionEvent {
    /// Recognized letter.
    pub text: char,
    /// Confidence of the accepted match, in [0, 1].
    pub confidence: f32,
    /// Caller-supplied timestamp of the classified frame (ms).
    pub timestamp_ms: f64,
}

// ── SessionStats ────────────────────────────────────────────

/// Running statistics derived from the event history.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStats {
    /// Events currently held in the history.
    pub total_recognitions: usize,
    /// Mean confidence over held events (0 if empty).
    pub average_confidence: f64,
    /// Distinct letters among held events.
    pub unique_letters: usize,
}

// ── SessionConfig ───────────────────────────────────────────

/// Tunables for the recognition session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Minimum confidence for a match to become an event.
    pub acceptance_threshold: f32,
    /// Minimum elapsed time between two accepted events (ms).
    pub cooldown_ms: f64,
    /// Event history capacity; the oldest event is evicted beyond it.
    pub history_capacity: usize,
    /// Thresholds for the pose descriptor builder.
    pub descriptor: DescriptorConfig,
    /// Retry policy for detector initialization during `start()`.
    pub retry: RetryPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: 0.7,
            cooldown_ms: 500.0,
            history_capacity: 20,
            descriptor: DescriptorConfig::default(),
            retry: RetryPolicy::default(),
        }
    }
}

// ── RecognitionSession ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Idle,
    Armed,
}

/// Stateful recognizer over a stream of hand frames.
pub struct RecognitionSession<D: HandDetector> {
    config: SessionConfig,
    matcher: GestureMatcher,
    detector: D,
    state: SessionState,
    history: VecDeque<RecognitionEvent>,
    /// Timestamp of the last accepted event; drives the cooldown.
    last_accepted_ms: Option<f64>,
}

impl<D: HandDetector> RecognitionSession<D> {
    pub fn new(detector: D, matcher: GestureMatcher, config: SessionConfig) -> Self {
        Self {
            config,
            matcher,
            detector,
            state: SessionState::Idle,
            history: VecDeque::with_capacity(20),
            last_accepted_ms: None,
        }
    }

    /// Arm the session: initialize the detector through the retry
    /// policy, then reset history, stats, and the cooldown clock.
    pub fn start(&mut self) -> Result<(), SessionError> {
        initialize_with_retry(&mut self.detector, &self.config.retry)?;
        self.history.clear();
        self.last_accepted_ms = None;
        self.state = SessionState::Armed;
        info!("recognition session armed");
        Ok(())
    }

    /// Disarm the session and forward shutdown to the detector so it
    /// releases its model resources.
    pub fn stop(&mut self) {
        self.detector.shutdown();
        self.state = SessionState::Idle;
        info!("recognition session stopped");
    }

    pub fn is_armed(&self) -> bool {
        self.state == SessionState::Armed
    }

    /// Classify one frame supplied by the caller.
    ///
    /// `None` means no hand was detected this frame; that consumes the
    /// frame without touching any session state.  An accepted match
    /// becomes a [`RecognitionEvent`]; a below-threshold match or a
    /// frame inside the cooldown window yields `Ok(None)`.
    pub fn classify(
        &mut self,
        hand: Option<&[Landmark]>,
        timestamp_ms: f64,
    ) -> Result<Option<RecognitionEvent>, SessionError> {
        if self.state != SessionState::Armed {
            return Err(SessionError::NotArmed);
        }

        let landmarks = match hand {
            Some(lms) => lms,
            None => return Ok(None),
        };
        if landmarks.len() < HAND_LANDMARK_COUNT {
            return Err(SessionError::MalformedHand {
                got: landmarks.len(),
            });
        }

        // Debounce: the same static pose persists across many frames
        // of a continuous stream.  Only accepted events reset this.
        if let Some(last) = self.last_accepted_ms {
            if timestamp_ms - last < self.config.cooldown_ms {
                return Ok(None);
            }
        }

        let descriptor = PoseDescriptor::from_landmarks(landmarks, &self.config.descriptor);
        let ranking = self.matcher.estimate(&descriptor);
        let best = match ranking.first() {
            Some(best) if best.confidence > self.config.acceptance_threshold => best,
            _ => return Ok(None),
        };

        let event = RecognitionEvent {
            text: best.letter,
            confidence: best.confidence,
            timestamp_ms,
        };
        debug!(
            "accepted '{}' at {:.3} (t={:.0}ms)",
            event.text, event.confidence, timestamp_ms,
        );

        self.history.push_back(event.clone());
        while self.history.len() > self.config.history_capacity {
            self.history.pop_front();
        }
        self.last_accepted_ms = Some(timestamp_ms);
        Ok(Some(event))
    }

    /// Pull the next frame from the owned detector and classify it.
    ///
    /// Only the first detected hand counts; additional hands in the
    /// frame are ignored, and a first hand with fewer than 21
    /// landmarks is treated as no usable hand.  Detector failures
    /// surface as [`SessionError::Detector`], never as a silent
    /// no-hand result.
    pub fn classify_next(
        &mut self,
        timestamp_ms: f64,
    ) -> Result<Option<RecognitionEvent>, SessionError> {
        if self.state != SessionState::Armed {
            return Err(SessionError::NotArmed);
        }
        let hands = self.detector.detect()?;
        if hands.len() > 1 {
            debug!(
                "frame carried {} hands, classifying only the first",
                hands.len(),
            );
        }
        let hand = hands
            .first()
            .filter(|h| h.is_usable())
            .map(|h| h.landmarks.as_slice());
        self.classify(hand, timestamp_ms)
    }

    /// The last `n` accepted events, oldest first; `n` is clamped to
    /// the history length.
    pub fn recent(&self, n: usize) -> Vec<RecognitionEvent> {
        let len = self.history.len();
        let start = len - n.min(len);
        self.history.iter().skip(start).cloned().collect()
    }

    /// Statistics over the current history.
    pub fn stats(&self) -> SessionStats {
        if self.history.is_empty() {
            return SessionStats {
                total_recognitions: 0,
                average_confidence: 0.0,
                unique_letters: 0,
            };
        }
        let total = self.history.len();
        let sum: f64 = self.history.iter().map(|e| e.confidence as f64).sum();
        let unique: HashSet<char> = self.history.iter().map(|e| e.text).collect();
        SessionStats {
            total_recognitions: total,
            average_confidence: sum / total as f64,
            unique_letters: unique.len(),
        }
    }

    /// Empty the history and reset the cooldown; the Armed/Idle state
    /// is unchanged.
    pub fn clear(&mut self) {
        self.history.clear();
        self.last_accepted_ms = None;
    }
}

// ── Tests ───────────────────────────────────────────────────
