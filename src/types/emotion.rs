//! Emotion labels and their display palette

use serde::{Deserialize, Serialize};
use crate::DEFAULT_LABEL_COLOR;

/// The closed set of labels the classifier produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Love,
    Neutral,
}

impl Emotion {
    /// All labels in canonical order
    pub const ALL: [Emotion; 7] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Surprise,
        Emotion::Love,
        Emotion::Neutral,
    ];

    /// Parse a label, ignoring case and surrounding whitespace
    pub fn from_label(label: &str) -> Option<Emotion> {
        let label = label.trim();
        Emotion::ALL
            .into_iter()
            .find(|e| e.label().eq_ignore_ascii_case(label))
    }

    /// Canonical lower-case label
    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
            Emotion::Surprise => "surprise",
            Emotion::Love => "love",
            Emotion::Neutral => "neutral",
        }
    }

    /// Hex color used for this emotion in every chart
    pub fn color(&self) -> &'static str {
        match self {
            Emotion::Joy => "#28a745",
            Emotion::Sadness => "#6c757d",
            Emotion::Anger => "#dc3545",
            Emotion::Fear => "#6f42c1",
            Emotion::Surprise => "#fd7e14",
            Emotion::Love => "#e83e8c",
            Emotion::Neutral => "#17a2b8",
        }
    }

    /// Balance dimension this emotion counts toward
    pub fn polarity(&self) -> Polarity {
        match self {
            Emotion::Joy | Emotion::Love | Emotion::Surprise => Polarity::Positive,
            Emotion::Sadness | Emotion::Anger | Emotion::Fear => Polarity::Negative,
            Emotion::Neutral => Polarity::Neutral,
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Emotional balance dimensions shown on the radar chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

impl Polarity {
    pub const ALL: [Polarity; 3] = [Polarity::Positive, Polarity::Negative, Polarity::Neutral];

    /// Dimension label as sent over the wire
    pub fn label(&self) -> &'static str {
        match self {
            Polarity::Positive => "Positive",
            Polarity::Negative => "Negative",
            Polarity::Neutral => "Neutral",
        }
    }
}

/// Title-case a label for display ("sadness" -> "Sadness")
pub fn display_label(label: &str) -> String {
    let lower = label.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Color for any label; unknown labels get the neutral default
pub fn label_color(label: &str) -> &'static str {
    Emotion::from_label(label)
        .map(|e| e.color())
        .unwrap_or(DEFAULT_LABEL_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_is_case_insensitive() {
        assert_eq!(Emotion::from_label("JOY"), Some(Emotion::Joy));
        assert_eq!(Emotion::from_label(" Sadness "), Some(Emotion::Sadness));
        assert_eq!(Emotion::from_label("boredom"), None);
    }

    #[test]
    fn test_every_canonical_label_parses_back() {
        for emotion in Emotion::ALL {
            assert_eq!(Emotion::from_label(emotion.label()), Some(emotion));
        }
    }

    #[test]
    fn test_display_label_title_cases() {
        assert_eq!(display_label("joy"), "Joy");
        assert_eq!(display_label("SADNESS"), "Sadness");
        assert_eq!(display_label(""), "");
    }

    #[test]
    fn test_label_color_lookup_uses_lowercase() {
        assert_eq!(label_color("Joy"), "#28a745");
        assert_eq!(label_color("sadness"), "#6c757d");
        assert_eq!(label_color("boredom"), DEFAULT_LABEL_COLOR);
    }

    #[test]
    fn test_polarity_groups() {
        assert_eq!(Emotion::Love.polarity(), Polarity::Positive);
        assert_eq!(Emotion::Fear.polarity(), Polarity::Negative);
        assert_eq!(Emotion::Neutral.polarity(), Polarity::Neutral);
    }
}
