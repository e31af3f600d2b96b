//! Gesture matcher — ranks the vocabulary against a pose descriptor.
//!
//! Scoring works entirely on the abstracted descriptor: per finger,
//! curl agreement decays with ordinal band distance and direction
//! agreement with octant angular distance; the five finger scores are
//! averaged into one confidence in [0, 1].  Ranking is a stable
//! descending sort, so equal confidences keep vocabulary registration
//! order and repeated calls are value-identical.

use std::cmp::Ordering;

use tracing::debug;

use crate::descriptor::{Finger, PoseDescriptor};
use crate::vocabulary::{GestureTemplate, Vocabulary};

// ── MatchResult ─────────────────────────────────────────────

/// Confidence of one template against one descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Letter of the matched template.
    pub letter: char,
    /// Agreement score in [0, 1]; 1.0 is an exact per-finger match.
    pub confidence: f32,
}

// ── GestureMatcher ──────────────────────────────────────────

/// Scores descriptors against an injected vocabulary.
#[derive(Debug, Clone)]
pub struct GestureMatcher {
    vocabulary: Vocabulary,
}

impl GestureMatcher {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// The vocabulary this matcher ranks against.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Rank every template against `descriptor`, best first.
    ///
    /// Never errors: an all-mismatch pose yields low scores and an
    /// empty vocabulary yields an empty ranking.
    pub fn estimate(&self, descriptor: &PoseDescriptor) -> Vec<MatchResult> {
        debug!("descriptor: {}", describe(descriptor));

        let mut results: Vec<MatchResult> = self
            .vocabulary
            .templates()
            .iter()
            .map(|template| MatchResult {
                letter: template.letter,
                confidence: template_confidence(template, descriptor),
            })
            .collect();

        // Stable sort: ties keep registration order.
        results.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });

        if let Some(best) = results.first() {
            debug!(
                "best match '{}' at {:.3} over {} templates",
                best.letter,
                best.confidence,
                results.len(),
            );
        }
        results
    }
}

/// Per-finger "finger=curl:direction" summary for diagnostics.
fn describe(descriptor: &PoseDescriptor) -> String {
    Finger::ALL
        .iter()
        .map(|f| {
            let (curl, dir) = descriptor.finger(*f);
            format!("{}={}:{}", f.as_str(), curl.as_str(), dir.as_str())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Mean per-finger agreement between a template and a descriptor.
fn template_confidence(template: &GestureTemplate, descriptor: &PoseDescriptor) -> f32 {
    let mut sum = 0.0;
    for f in Finger::ALL {
        let (obs_curl, obs_dir) = descriptor.finger(f);
        let (exp_curl, exp_dir) = template.finger(f);

        // One curl band away gets half credit, two bands none.
        let curl_score = 1.0 - 0.5 * obs_curl.distance(exp_curl) as f32;
        // Direction credit decays linearly with octant separation.
        let dir_score = 1.0 - obs_dir.angular_distance_deg(exp_dir) / 180.0;

        sum += (curl_score + dir_score) / 2.0;
    }
    sum / Finger::ALL.len() as f32
}

// ── Tests ───────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{CurlState, PointingDirection};
    use crate::vocabulary::{GestureTemplate, Vocabulary};

    /// Descriptor exactly matching the alphabet's "B" template.
    fn make_b_descriptor() -> PoseDescriptor {
        PoseDescriptor::new([
            (CurlState::FullCurl, PointingDirection::VerticalUp),
            (CurlState::NoCurl, PointingDirection::VerticalUp),
            (CurlState::NoCurl, PointingDirection::VerticalUp),
            (CurlState::NoCurl, PointingDirection::VerticalUp),
            (CurlState::NoCurl, PointingDirection::VerticalUp),
        ])
    }

    #[test]
    fn test_exact_match_scores_one_and_ranks_first() {
        let matcher = GestureMatcher::new(Vocabulary::asl_alphabet());
        let ranking = matcher.estimate(&make_b_descriptor());

        assert_eq!(ranking.len(), 15);
        assert_eq!(ranking[0].letter, 'B');
        assert!(
            (ranking[0].confidence - 1.0).abs() < 1e-6,
            "exact match should score 1.0, got {:.4}",
            ranking[0].confidence,
        );
        for r in &ranking[1..] {
            assert!(r.confidence < 1.0, "'{}' should score below B", r.letter);
        }
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let matcher = GestureMatcher::new(Vocabulary::asl_alphabet());
        let descriptor = make_b_descriptor();
        let first = matcher.estimate(&descriptor);
        for _ in 0..5 {
            assert_eq!(matcher.estimate(&descriptor), first);
        }
    }

    #[test]
    fn test_ties_keep_registration_order() {
        // U and V carry identical profiles, so they always tie; U was
        // registered first and must stay ahead.
        let matcher = GestureMatcher::new(Vocabulary::asl_alphabet());
        let descriptor = PoseDescriptor::new([
            (CurlState::FullCurl, PointingDirection::VerticalDown),
            (CurlState::NoCurl, PointingDirection::VerticalUp),
            (CurlState::NoCurl, PointingDirection::VerticalUp),
            (CurlState::FullCurl, PointingDirection::VerticalDown),
            (CurlState::FullCurl, PointingDirection::VerticalDown),
        ]);
        let ranking = matcher.estimate(&descriptor);
        assert_eq!(ranking[0].letter, 'U');
        assert_eq!(ranking[1].letter, 'V');
        assert!((ranking[0].confidence - ranking[1].confidence).abs() < 1e-6);
    }

    #[test]
    fn test_partial_credit_decreases_with_distance() {
        let template = GestureTemplate::new('X', [
            (CurlState::NoCurl, PointingDirection::VerticalUp); 5
        ]);
        let matcher = GestureMatcher::new(Vocabulary::new(vec![template]));

        let near = PoseDescriptor::new([
            (CurlState::HalfCurl, PointingDirection::DiagonalUpRight); 5
        ]);
        let far = PoseDescriptor::new([
            (CurlState::FullCurl, PointingDirection::VerticalDown); 5
        ]);

        let near_score = matcher.estimate(&near)[0].confidence;
        let far_score = matcher.estimate(&far)[0].confidence;
        assert!(
            near_score > far_score,
            "one band/octant off ({:.3}) should beat the opposite pose ({:.3})",
            near_score,
            far_score,
        );
        assert!(far_score.abs() < 1e-6, "opposite pose should score 0.0");
    }

    #[test]
    fn test_all_mismatch_is_low_score_not_error() {
        let matcher = GestureMatcher::new(Vocabulary::asl_alphabet());
        // Everything half-curled and pointing down-left matches nothing well.
        let descriptor = PoseDescriptor::new([
            (CurlState::HalfCurl, PointingDirection::DiagonalDownLeft); 5
        ]);
        let ranking = matcher.estimate(&descriptor);
        assert_eq!(ranking.len(), 15);
        assert!(ranking[0].confidence < 0.7);
    }

    #[test]
    fn test_describe_labels_every_finger() {
        let summary = describe(&make_b_descriptor());
        assert_eq!(
            summary,
            "thumb=full-curl:vertical-up index=no-curl:vertical-up \
             middle=no-curl:vertical-up ring=no-curl:vertical-up \
             pinky=no-curl:vertical-up",
        );
    }

    #[test]
    fn test_empty_vocabulary_yields_empty_ranking() {
        let matcher = GestureMatcher::new(Vocabulary::new(Vec::new()));
        assert!(matcher.estimate(&make_b_descriptor()).is_empty());
    }
}
