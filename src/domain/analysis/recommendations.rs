//! Recommendation text keyed by confidence category and media kind.

use super::{ConfidenceCategory, MediaKind};

/// Builds the recommendation list shown alongside a result.
///
/// The first entry is the category headline; the remaining entries are
/// specific to the kind of media analyzed.
pub fn recommendations_for(kind: MediaKind, category: ConfidenceCategory) -> Vec<String> {
    let mut out = vec![headline(category).to_string()];
    out.extend(kind_specific(kind, category).iter().map(|s| s.to_string()));
    out
}

fn headline(category: ConfidenceCategory) -> &'static str {
    match category {
        ConfidenceCategory::VeryLow => {
            "No signs of manipulation were detected. The content appears authentic."
        }
        ConfidenceCategory::Low => {
            "Minor anomalies were found, but the content is most likely authentic."
        }
        ConfidenceCategory::Medium => {
            "Inconclusive result. Verify the content with an independent source before sharing."
        }
        ConfidenceCategory::High => {
            "Strong indicators of manipulation. Treat this content as suspicious."
        }
        ConfidenceCategory::VeryHigh => {
            "This content is very likely AI-generated or manipulated. Do not rely on it."
        }
    }
}

fn kind_specific(kind: MediaKind, category: ConfidenceCategory) -> &'static [&'static str] {
    use ConfidenceCategory::*;

    match (kind, category) {
        (MediaKind::Image, VeryLow | Low) => &["Check the image metadata if provenance matters."],
        (MediaKind::Image, Medium) => &[
            "Run a reverse image search to find the original source.",
            "Look closely at hands, text, reflections and backgrounds for artifacts.",
        ],
        (MediaKind::Image, High | VeryHigh) => &[
            "Run a reverse image search to find the original source.",
            "Report the image to the platform where you found it.",
        ],
        (MediaKind::Video, VeryLow | Low) => {
            &["Compare with other recordings of the same event if available."]
        }
        (MediaKind::Video, Medium) => &[
            "Watch for lip-sync drift, unnatural blinking and face-boundary flicker.",
            "Compare with other recordings of the same event.",
        ],
        (MediaKind::Video, High | VeryHigh) => &[
            "Do not share the video until its origin has been confirmed.",
            "Report the video to the platform where you found it.",
        ],
        (MediaKind::Audio, VeryLow | Low) => {
            &["Confirm the speaker's identity through a known channel for sensitive requests."]
        }
        (MediaKind::Audio, Medium) => &[
            "Listen for robotic intonation, missing breaths and abrupt background changes.",
            "Call the speaker back on a number you already know.",
        ],
        (MediaKind::Audio, High | VeryHigh) => &[
            "Possible voice clone. Do not act on instructions or payment requests in this clip.",
            "Call the speaker back on a number you already know.",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_CATEGORIES: [ConfidenceCategory; 5] = [
        ConfidenceCategory::VeryLow,
        ConfidenceCategory::Low,
        ConfidenceCategory::Medium,
        ConfidenceCategory::High,
        ConfidenceCategory::VeryHigh,
    ];

    #[test]
    fn every_combination_has_headline_and_specific_advice() {
        for kind in [MediaKind::Image, MediaKind::Video, MediaKind::Audio] {
            for category in ALL_CATEGORIES {
                let recs = recommendations_for(kind, category);
                assert!(recs.len() >= 2, "{kind} {category}");
                assert_eq!(recs[0], headline(category));
            }
        }
    }

    #[test]
    fn headlines_are_distinct_per_category() {
        let mut seen: Vec<&str> = ALL_CATEGORIES.iter().map(|c| headline(*c)).collect();
        seen.dedup();
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn high_risk_audio_warns_about_voice_clones() {
        let recs = recommendations_for(MediaKind::Audio, ConfidenceCategory::VeryHigh);
        assert!(recs.iter().any(|r| r.contains("voice clone")));
    }

    #[test]
    fn recommendations_are_deterministic() {
        assert_eq!(
            recommendations_for(MediaKind::Video, ConfidenceCategory::Medium),
            recommendations_for(MediaKind::Video, ConfidenceCategory::Medium)
        );
    }
}
