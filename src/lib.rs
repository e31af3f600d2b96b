//! handsign — static ASL alphabet recognition from 3-D hand landmarks.
//!
//! Pipeline: a landmark detector (external collaborator behind the
//! [`HandDetector`] trait) produces 21-point hand frames; the pose
//! descriptor builder reduces a frame to per-finger curl and pointing
//! direction; the matcher ranks the fixed letter vocabulary against the
//! descriptor; the recognition session debounces accepted matches and
//! keeps a bounded history with running statistics.
//!
//! The crate does no camera capture, rendering, or model inference —
//! those live behind the detector boundary.

pub mod descriptor;
pub mod detector;
pub mod landmarks;
pub mod matcher;
pub mod session;
pub mod vocabulary;

pub use descriptor::{CurlState, DescriptorConfig, Finger, PointingDirection, PoseDescriptor};
pub use detector::{
    initialize_with_retry, DetectorError, HandDetector, RetryPolicy, ScriptedDetector,
};
pub use landmarks::{DetectedHand, Handedness, Landmark, HAND_LANDMARK_COUNT};
pub use matcher::{GestureMatcher, MatchResult};
pub use session::{
    RecognitionEvent, RecognitionSession, SessionConfig, SessionError, SessionStats,
};
pub use vocabulary::{GestureTemplate, Vocabulary};
