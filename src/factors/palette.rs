use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use eframe::egui::Color32;
use serde::Deserialize;

use crate::util::parse_hex_color;

const DEFAULT_FACTORS: [(&str, Color32, &str); 10] = [
    (
        "Culture",
        Color32::from_rgb(0x34, 0x98, 0xdb),
        "Measures how fairly the AI treats people from different cultural and ethnic backgrounds.",
    ),
    (
        "Income",
        Color32::from_rgb(0xe6, 0x7e, 0x22),
        "Evaluates if outcomes remain consistent across low, middle, and high income levels.",
    ),
    (
        "Gender",
        Color32::from_rgb(0xe9, 0x1e, 0x63),
        "Checks for balanced and respectful treatment across all gender identities.",
    ),
    (
        "Age",
        Color32::from_rgb(0x9c, 0x27, 0xb0),
        "Tests if results are fair across different age groups and life stages.",
    ),
    (
        "Region",
        Color32::from_rgb(0x00, 0xbc, 0xd4),
        "Compares how location or geography affects model outcomes.",
    ),
    (
        "Education",
        Color32::from_rgb(0x4c, 0xaf, 0x50),
        "Looks at differences in results for people with varying education levels.",
    ),
    (
        "Access",
        Color32::from_rgb(0xff, 0x98, 0x00),
        "Ensures equitable experience for users with different accessibility needs.",
    ),
    (
        "Language",
        Color32::from_rgb(0x21, 0x96, 0xf3),
        "Examines whether the AI performs equally well across languages and dialects.",
    ),
    (
        "Literacy",
        Color32::from_rgb(0x8b, 0xc3, 0x4a),
        "Tests fairness across different levels of digital and informational literacy.",
    ),
    (
        "Trust",
        Color32::from_rgb(0xf4, 0x43, 0x36),
        "Combines all factors into an overall fairness and transparency score.",
    ),
];

#[derive(Clone, Debug, PartialEq)]
pub struct Factor {
    pub name: String,
    pub color: Color32,
    pub description: String,
}

/// Ordered, non-empty set of named factor colors.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    factors: Vec<Factor>,
}

#[derive(Debug, Deserialize)]
struct RawFactor {
    name: String,
    color: String,
    #[serde(default)]
    description: String,
}

impl Palette {
    pub fn new(factors: Vec<Factor>) -> Result<Self> {
        if factors.is_empty() {
            return Err(anyhow!("palette must contain at least one factor"));
        }

        let mut seen = HashSet::with_capacity(factors.len());
        for factor in &factors {
            if factor.name.trim().is_empty() {
                return Err(anyhow!("palette factor names must not be blank"));
            }
            if !seen.insert(factor.name.as_str()) {
                return Err(anyhow!("palette lists factor {:?} twice", factor.name));
            }
        }

        Ok(Self { factors })
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let entries: Vec<RawFactor> =
            serde_json::from_str(raw).context("palette JSON must be an array of factors")?;

        let factors = entries
            .into_iter()
            .map(|entry| {
                let color = parse_hex_color(&entry.color)
                    .with_context(|| format!("invalid color for factor {:?}", entry.name))?;
                Ok(Factor {
                    name: entry.name,
                    color,
                    description: entry.description,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(factors)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read palette file {}", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("failed to load palette from {}", path.display()))
    }

    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn color_of(&self, name: &str) -> Option<Color32> {
        self.factors
            .iter()
            .find(|factor| factor.name == name)
            .map(|factor| factor.color)
    }

    /// Colors of the selected factors in palette order, or the whole palette
    /// when nothing selected is known.
    pub fn active_colors<N: AsRef<str>>(&self, selected: &[N]) -> Vec<Color32> {
        let colors = self
            .factors
            .iter()
            .filter(|factor| selected.iter().any(|name| name.as_ref() == factor.name))
            .map(|factor| factor.color)
            .collect::<Vec<_>>();

        if colors.is_empty() {
            self.factors.iter().map(|factor| factor.color).collect()
        } else {
            colors
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        let factors = DEFAULT_FACTORS
            .iter()
            .map(|(name, color, description)| Factor {
                name: (*name).to_owned(),
                color: *color,
                description: (*description).to_owned(),
            })
            .collect();

        Self { factors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_factor_palette() -> Palette {
        Palette::new(vec![
            Factor {
                name: "A".to_owned(),
                color: Color32::RED,
                description: String::new(),
            },
            Factor {
                name: "B".to_owned(),
                color: Color32::BLUE,
                description: String::new(),
            },
        ])
        .unwrap()
    }

    #[test]
    fn default_palette_has_the_trust_factors_in_order() {
        let palette = Palette::default();
        let names = palette
            .factors()
            .iter()
            .map(|factor| factor.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                "Culture",
                "Income",
                "Gender",
                "Age",
                "Region",
                "Education",
                "Access",
                "Language",
                "Literacy",
                "Trust"
            ]
        );
        assert_eq!(
            palette.color_of("Trust"),
            Some(Color32::from_rgb(0xf4, 0x43, 0x36))
        );
    }

    #[test]
    fn default_colors_match_their_hex_codes() {
        let hex = [
            "#3498DB", "#E67E22", "#E91E63", "#9C27B0", "#00BCD4", "#4CAF50", "#FF9800",
            "#2196F3", "#8BC34A", "#F44336",
        ];
        let palette = Palette::default();
        for (factor, code) in palette.factors().iter().zip(hex) {
            assert_eq!(factor.color, parse_hex_color(code).unwrap(), "{}", factor.name);
        }
        assert_eq!(palette.len(), hex.len());
    }

    #[test]
    fn active_colors_keep_palette_order() {
        let palette = two_factor_palette();
        assert_eq!(palette.active_colors(&["B", "A"]), [Color32::RED, Color32::BLUE]);
        assert_eq!(palette.active_colors(&["A"]), [Color32::RED]);
    }

    #[test]
    fn active_colors_fall_back_to_full_palette() {
        let palette = two_factor_palette();
        let empty: [&str; 0] = [];
        assert_eq!(palette.active_colors(&empty), [Color32::RED, Color32::BLUE]);
        assert_eq!(palette.active_colors(&["Unknown"]), [Color32::RED, Color32::BLUE]);
    }

    #[test]
    fn rejects_empty_and_duplicate_palettes() {
        assert!(Palette::new(Vec::new()).is_err());
        assert!(Palette::from_json_str("[]").is_err());
        assert!(
            Palette::from_json_str(
                r##"[{"name":"A","color":"#ff0000"},{"name":"A","color":"#00ff00"}]"##
            )
            .is_err()
        );
    }

    #[test]
    fn loads_palette_file() {
        let path = std::env::temp_dir().join(format!(
            "trust-swarm-palette-{}.json",
            std::process::id()
        ));
        fs::write(
            &path,
            r##"[{"name":"Reach","color":"#112233","description":"Audience size"},{"name":"Tone","color":"#445566"}]"##,
        )
        .unwrap();

        let palette = Palette::from_json_file(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(palette.len(), 2);
        assert_eq!(palette.factors()[0].description, "Audience size");
        assert_eq!(palette.color_of("Tone"), Some(Color32::from_rgb(0x44, 0x55, 0x66)));
    }

    #[test]
    fn reports_bad_colors_with_factor_name() {
        let error = Palette::from_json_str(r#"[{"name":"Reach","color":"red"}]"#).unwrap_err();
        assert!(format!("{error:#}").contains("Reach"));
    }
}
