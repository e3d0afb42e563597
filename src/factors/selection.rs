use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::palette::{Factor, Palette};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionMode {
    All,
    Custom,
}

impl SelectionMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All factors",
            Self::Custom => "Custom",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactorSelection {
    names: Vec<String>,
    mode: SelectionMode,
}

impl FactorSelection {
    pub fn all(palette: &Palette) -> Self {
        Self {
            names: palette
                .factors()
                .iter()
                .map(|factor| factor.name.clone())
                .collect(),
            mode: SelectionMode::All,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[cfg(test)]
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.names.iter().any(|selected| selected == name)
    }

    /// Mode shown in the sidebar: a full manual selection reads as "all".
    pub fn display_mode(&self, palette: &Palette) -> SelectionMode {
        if self.mode == SelectionMode::All || self.names.len() == palette.len() {
            SelectionMode::All
        } else {
            SelectionMode::Custom
        }
    }

    pub fn toggle(&mut self, name: &str, palette: &Palette) {
        if let Some(index) = self.names.iter().position(|selected| selected == name) {
            self.names.remove(index);
        } else {
            self.names.push(name.to_owned());
        }

        let next_mode = if self.names.is_empty() || self.names.len() == palette.len() {
            SelectionMode::All
        } else {
            SelectionMode::Custom
        };

        if next_mode == SelectionMode::All && self.mode != SelectionMode::All {
            *self = Self::all(palette);
        } else {
            self.mode = next_mode;
        }
    }

    pub fn set_mode(&mut self, mode: SelectionMode, palette: &Palette) {
        match mode {
            SelectionMode::All => *self = Self::all(palette),
            SelectionMode::Custom => self.mode = SelectionMode::Custom,
        }
    }

    pub fn visible_factors<'a>(&self, palette: &'a Palette) -> Vec<&'a Factor> {
        palette
            .factors()
            .iter()
            .filter(|factor| self.is_selected(&factor.name))
            .collect()
    }

    /// Names to score, in palette order. An empty selection scores every factor.
    pub fn scored_factors<'a>(&self, palette: &'a Palette) -> Vec<&'a str> {
        let visible = self.visible_factors(palette);
        let factors = if visible.is_empty() {
            palette.factors().iter().collect()
        } else {
            visible
        };
        factors.into_iter().map(|factor| factor.name.as_str()).collect()
    }
}

pub fn matches_query(matcher: &SkimMatcherV2, name: &str, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }

    matcher.fuzzy_match(name, query).is_some()
        || matcher
            .fuzzy_match(&name.to_ascii_lowercase(), &query.to_ascii_lowercase())
            .is_some()
}
