//! Replacement rules: ordered literal substring substitutions, optionally
//! gated on marker substrings.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One literal `from` → `to` substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

impl Replacement {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Ordered replacements. Each rule sees the output of the previous one.
///
/// When `markers` is non-empty the rules only run on text containing at least
/// one marker. Presets whose markers are exactly their `from` strings behave
/// the same with or without the gate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub replacements: Vec<Replacement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<String>,
}

/// Result of running a rule set over one text blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub text: String,
    pub replacements: usize,
}

/// A potential problem with a rule set, reported alongside rewrite results.
#[derive(Debug, Clone, Serialize)]
pub struct RuleWarning {
    pub kind: String,
    /// Zero-based index of the rule in the set.
    pub rule: usize,
    pub message: String,
}

impl RuleSet {
    pub fn new(replacements: Vec<Replacement>) -> Self {
        Self {
            replacements,
            markers: Vec::new(),
        }
    }

    pub fn with_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markers = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.replacements.is_empty() {
            return Err(Error::validation_invalid_argument(
                "replacements",
                "Rule set must contain at least one replacement",
                None,
                None,
            ));
        }

        if let Some(index) = self.replacements.iter().position(|r| r.from.is_empty()) {
            return Err(Error::validation_invalid_argument(
                "replacements",
                format!("Replacement #{} has an empty 'from' string", index + 1),
                None,
                None,
            ));
        }

        if self.markers.iter().any(String::is_empty) {
            return Err(Error::validation_invalid_argument(
                "markers",
                "Marker strings must not be empty",
                None,
                None,
            ));
        }

        Ok(())
    }

    /// Whether the marker gate lets this text through.
    pub fn applies_to(&self, text: &str) -> bool {
        self.markers.is_empty() || self.markers.iter().any(|m| text.contains(m.as_str()))
    }

    /// Apply every rule in order. Gated-out text comes back unchanged.
    pub fn apply(&self, text: &str) -> Applied {
        let mut current = text.to_string();
        let mut replacements = 0;

        if !self.applies_to(text) {
            return Applied {
                text: current,
                replacements,
            };
        }

        for rule in &self.replacements {
            let count = current.matches(rule.from.as_str()).count();
            if count == 0 {
                continue;
            }
            current = current.replace(rule.from.as_str(), &rule.to);
            replacements += count;
        }

        Applied {
            text: current,
            replacements,
        }
    }

    /// Rules whose output contains their own input grow on every rerun.
    pub fn warnings(&self) -> Vec<RuleWarning> {
        self.replacements
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.from.is_empty() && r.to.contains(r.from.as_str()))
            .map(|(rule, r)| RuleWarning {
                kind: "non_idempotent".to_string(),
                rule,
                message: format!(
                    "Replacement '{}' contains its own source '{}'; running twice rewrites it again",
                    r.to, r.from
                ),
            })
            .collect()
    }
}

/// Rule file accepted by `mediaref run`.
///
/// ```json
/// {
///   "extensions": [".html", ".css"],
///   "markers": ["assets/img/"],
///   "replacements": [{ "from": "assets/img/", "to": "assets/media/" }]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,
    #[serde(default)]
    pub markers: Vec<String>,
    pub replacements: Vec<Replacement>,
}

impl RuleFile {
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| {
            Error::validation_invalid_json(
                e,
                Some("parse rule file".to_string()),
                Some(raw.chars().take(200).collect::<String>()),
            )
        })
    }

    pub fn rule_set(&self) -> RuleSet {
        RuleSet::new(self.replacements.clone()).with_markers(self.markers.clone())
    }
}
