//! Gesture vocabulary — the fixed registry of letter templates.
//!
//! Each template fixes one expected (curl, direction) pair per finger;
//! there are no wildcards.  The registry is built once at startup and
//! never mutated.  Adding a letter means appending a template here —
//! no other component changes.

use crate::descriptor::{CurlState, Finger, PointingDirection};

// ── GestureTemplate ─────────────────────────────────────────

/// Expected pose for one alphabet letter.
#[derive(Debug, Clone)]
pub struct GestureTemplate {
    /// The letter this template recognizes.
    pub letter: char,
    /// Expected (curl, direction) per finger, ordered as [`Finger::ALL`].
    expected: [(CurlState, PointingDirection); 5],
}

impl GestureTemplate {
    pub fn new(letter: char, expected: [(CurlState, PointingDirection); 5]) -> Self {
        Self { letter, expected }
    }

    /// Expected state for one finger.
    pub fn finger(&self, finger: Finger) -> (CurlState, PointingDirection) {
        self.expected[finger.index()]
    }
}

// ── Vocabulary ──────────────────────────────────────────────

/// Ordered, read-only collection of gesture templates.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    templates: Vec<GestureTemplate>,
}

impl Vocabulary {
    /// Build a vocabulary from explicit templates (registration order
    /// is preserved and breaks ranking ties).
    pub fn new(templates: Vec<GestureTemplate>) -> Self {
        Self { templates }
    }

    /// Templates in registration order.
    pub fn templates(&self) -> &[GestureTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// The 15-letter static ASL alphabet vocabulary.
    pub fn asl_alphabet() -> Self {
        use CurlState::{FullCurl, HalfCurl, NoCurl};
        use PointingDirection::{
            DiagonalUpRight, HorizontalRight, VerticalDown, VerticalUp,
        };

        let templates = vec![
            GestureTemplate::new('A', [
                (NoCurl, DiagonalUpRight),
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
            ]),
            GestureTemplate::new('B', [
                (FullCurl, VerticalUp),
                (NoCurl, VerticalUp),
                (NoCurl, VerticalUp),
                (NoCurl, VerticalUp),
                (NoCurl, VerticalUp),
            ]),
            GestureTemplate::new('C', [
                (HalfCurl, DiagonalUpRight),
                (HalfCurl, VerticalUp),
                (HalfCurl, VerticalUp),
                (HalfCurl, VerticalUp),
                (HalfCurl, VerticalUp),
            ]),
            GestureTemplate::new('D', [
                (HalfCurl, DiagonalUpRight),
                (NoCurl, VerticalUp),
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
            ]),
            GestureTemplate::new('E', [
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
            ]),
            GestureTemplate::new('F', [
                (HalfCurl, DiagonalUpRight),
                (FullCurl, VerticalDown),
                (NoCurl, VerticalUp),
                (NoCurl, VerticalUp),
                (NoCurl, VerticalUp),
            ]),
            GestureTemplate::new('G', [
                (NoCurl, HorizontalRight),
                (NoCurl, HorizontalRight),
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
            ]),
            GestureTemplate::new('H', [
                (FullCurl, VerticalDown),
                (NoCurl, HorizontalRight),
                (NoCurl, HorizontalRight),
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
            ]),
            GestureTemplate::new('I', [
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
                (NoCurl, VerticalUp),
            ]),
            GestureTemplate::new('L', [
                (NoCurl, VerticalUp),
                (NoCurl, VerticalUp),
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
            ]),
            GestureTemplate::new('O', [
                (HalfCurl, DiagonalUpRight),
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
            ]),
            GestureTemplate::new('U', [
                (FullCurl, VerticalDown),
                (NoCurl, VerticalUp),
                (NoCurl, VerticalUp),
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
            ]),
            // V shares U's static finger profile; registration order
            // keeps the ranking deterministic between them.
            GestureTemplate::new('V', [
                (FullCurl, VerticalDown),
                (NoCurl, VerticalUp),
                (NoCurl, VerticalUp),
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
            ]),
            GestureTemplate::new('W', [
                (FullCurl, VerticalDown),
                (NoCurl, VerticalUp),
                (NoCurl, VerticalUp),
                (NoCurl, VerticalUp),
                (FullCurl, VerticalDown),
            ]),
            GestureTemplate::new('Y', [
                (NoCurl, DiagonalUpRight),
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
                (FullCurl, VerticalDown),
                (NoCurl, VerticalUp),
            ]),
        ];
        Self { templates }
    }
}

// ── Tests ───────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_has_15_letters() {
        let vocab = Vocabulary::asl_alphabet();
        assert_eq!(vocab.len(), 15);
        let letters: String = vocab.templates().iter().map(|t| t.letter).collect();
        assert_eq!(letters, "ABCDEFGHILOUVWY");
    }

    #[test]
    fn test_template_b_profile() {
        let vocab = Vocabulary::asl_alphabet();
        let b = &vocab.templates()[1];
        assert_eq!(b.letter, 'B');
        assert_eq!(
            b.finger(Finger::Thumb),
            (CurlState::FullCurl, PointingDirection::VerticalUp),
        );
        for f in [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky] {
            assert_eq!(
                b.finger(f),
                (CurlState::NoCurl, PointingDirection::VerticalUp),
            );
        }
    }

    #[test]
    fn test_custom_vocabulary_injection() {
        let single = Vocabulary::new(vec![GestureTemplate::new('X', [
            (CurlState::FullCurl, PointingDirection::VerticalDown); 5
        ])]);
        assert_eq!(single.len(), 1);
        assert!(!single.is_empty());
        assert!(Vocabulary::new(Vec::new()).is_empty());
    }
}
