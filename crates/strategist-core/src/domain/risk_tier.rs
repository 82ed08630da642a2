use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Coarse risk tolerance label selecting an allocation template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Strict, case-insensitive lookup.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Lenient lookup: anything unrecognized becomes [`RiskTier::Medium`].
    pub fn resolve(input: &str) -> Self {
        Self::parse(input).unwrap_or_else(|| {
            tracing::warn!(requested = input, "unrecognized risk tier, using medium");
            Self::Medium
        })
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Conservative (Low Risk)",
            Self::Medium => "Balanced (Medium Risk)",
            Self::High => "Aggressive (High Risk)",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Low => {
                "Focus on stable, defensive stocks and ETFs. Lower returns but safer."
            }
            Self::Medium => "Mix of growth and stability. Good for most investors.",
            Self::High => {
                "Growth-focused with tech stocks. Higher potential returns but volatile."
            }
        }
    }

    pub const fn volatility_band(self) -> &'static str {
        match self {
            Self::Low => "15-18% annually",
            Self::Medium => "18-22% annually",
            Self::High => "22-25% annually",
        }
    }
}

impl Display for RiskTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(RiskTier::parse(" HIGH "), Some(RiskTier::High));
        assert_eq!(RiskTier::parse("Low"), Some(RiskTier::Low));
        assert_eq!(RiskTier::parse("aggressive"), None);
    }

    #[test]
    fn resolve_defaults_to_medium() {
        assert_eq!(RiskTier::resolve("yolo"), RiskTier::Medium);
        assert_eq!(RiskTier::resolve(""), RiskTier::Medium);
        assert_eq!(RiskTier::resolve("low"), RiskTier::Low);
    }
}
