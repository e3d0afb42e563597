use serde::{Deserialize, Serialize};

use crate::util::preview_text;

const ORIGINAL_PREVIEW_CHARS: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: String,
    pub text: String,
    pub score: u32,
    #[serde(default)]
    pub is_original: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub prediction: u32,
    pub lower_estimate: u32,
    pub upper_estimate: u32,
    pub variants: Vec<Variant>,
    pub insights: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorScore {
    pub name: String,
    pub score: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreBand {
    Low,
    Neutral,
    High,
}

impl ScoreBand {
    pub fn of(score: u32) -> Self {
        if score < 20 {
            Self::Low
        } else if score > 80 {
            Self::High
        } else {
            Self::Neutral
        }
    }
}

/// Stable per-factor score in `0..100` derived from the factor name.
pub fn mock_factor_score(name: &str) -> u32 {
    let mut hash = 0_i64;
    for unit in name.encode_utf16() {
        let shifted = i64::from((hash as i32).wrapping_shl(5));
        hash = i64::from(unit) + shifted - hash;
    }
    (hash % 100).unsigned_abs() as u32
}

pub fn factor_scores<N: AsRef<str>>(names: &[N]) -> Vec<FactorScore> {
    names
        .iter()
        .map(|name| FactorScore {
            name: name.as_ref().to_owned(),
            score: mock_factor_score(name.as_ref()),
        })
        .collect()
}

impl Variant {
    fn suggested(id: &str, text: &str, score: u32) -> Self {
        Self {
            id: id.to_owned(),
            text: text.to_owned(),
            score,
            is_original: false,
        }
    }
}

impl SimulationReport {
    /// Canned evaluation used while no scoring backend is wired in.
    pub fn mock(post_text: &str) -> Self {
        let prediction = 79;

        Self {
            prediction,
            lower_estimate: 43,
            upper_estimate: 158,
            variants: vec![
                Variant {
                    id: "original".to_owned(),
                    text: preview_text(post_text, ORIGINAL_PREVIEW_CHARS),
                    score: prediction,
                    is_original: true,
                },
                Variant::suggested("variant-1", "After my talk at Building Green D...", 95),
                Variant::suggested("variant-2", "Since my talk at Building Green D...", 94),
                Variant::suggested("variant-3", "What an amazing response since...", 93),
            ],
            insights: "The post's predicted performance is decent, but not outstanding."
                .to_owned(),
        }
    }

    pub fn with_generated_variants(&self, instructions: Option<&str>) -> Self {
        let mut variants = self
            .variants
            .iter()
            .filter(|variant| variant.is_original)
            .cloned()
            .collect::<Vec<_>>();

        let lead = match instructions.map(str::trim).filter(|text| !text.is_empty()) {
            Some(instructions) => format!(
                "New variant based on \"{}\"...",
                preview_text(instructions, 32)
            ),
            None => "New variant based on instructions...".to_owned(),
        };
        variants.push(Variant {
            id: "variant-new-1".to_owned(),
            text: lead,
            score: 97,
            is_original: false,
        });
        variants.push(Variant::suggested(
            "variant-new-2",
            "Another optimized variant...",
            96,
        ));

        Self {
            variants,
            ..self.clone()
        }
    }

    pub fn original(&self) -> Option<&Variant> {
        self.variants.iter().find(|variant| variant.is_original)
    }

    pub fn best_variant(&self) -> Option<&Variant> {
        self.variants
            .iter()
            .filter(|variant| !variant.is_original)
            .max_by_key(|variant| variant.score)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_report_previews_long_posts() {
        let post = "x".repeat(80);
        let report = SimulationReport::mock(&post);

        assert_eq!(report.prediction, 79);
        assert_eq!((report.lower_estimate, report.upper_estimate), (43, 158));
        assert_eq!(report.variants.len(), 4);

        let original = report.original().unwrap();
        assert_eq!(original.text, format!("{}...", "x".repeat(50)));
        assert_eq!(original.score, 79);
        assert_eq!(report.best_variant().unwrap().score, 95);
    }

    #[test]
    fn short_posts_are_kept_verbatim() {
        let report = SimulationReport::mock("Hello network");
        assert_eq!(report.original().unwrap().text, "Hello network");
    }

    #[test]
    fn generated_variants_keep_only_the_original() {
        let report = SimulationReport::mock("Hello network");
        let regenerated = report.with_generated_variants(Some("  more upbeat  "));

        assert_eq!(regenerated.prediction, report.prediction);
        assert_eq!(regenerated.variants.len(), 3);
        assert_eq!(regenerated.variants[0], report.variants[0]);
        assert_eq!(
            regenerated.variants[1].text,
            "New variant based on \"more upbeat\"..."
        );
        assert_eq!(regenerated.best_variant().unwrap().score, 97);

        let plain = report.with_generated_variants(Some("   "));
        assert_eq!(plain.variants[1].text, "New variant based on instructions...");
    }

    #[test]
    fn factor_scores_are_stable_per_name() {
        assert_eq!(mock_factor_score("Age"), 59);
        assert_eq!(mock_factor_score(""), 0);

        let scores = factor_scores(&["Culture", "Age"]);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[1].score, 59);
        assert!(scores.iter().all(|factor| factor.score < 100));
        assert_eq!(factor_scores(&["Culture"])[0], scores[0]);
    }

    #[test]
    fn score_bands_split_at_twenty_and_eighty() {
        assert_eq!(ScoreBand::of(19), ScoreBand::Low);
        assert_eq!(ScoreBand::of(20), ScoreBand::Neutral);
        assert_eq!(ScoreBand::of(80), ScoreBand::Neutral);
        assert_eq!(ScoreBand::of(81), ScoreBand::High);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let json = SimulationReport::mock("Hi").to_json().unwrap();
        assert!(json.contains("\"lowerEstimate\": 43"));
        assert!(json.contains("\"isOriginal\": true"));

        let parsed: SimulationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, SimulationReport::mock("Hi"));
    }
}
