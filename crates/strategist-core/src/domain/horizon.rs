use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{RiskTier, ValidationError};

pub const MAX_HORIZON_MONTHS: u32 = 120;

/// Named horizons and their month counts.
const LABELED_HORIZONS: [(&str, u32); 12] = [
    ("3_months", 3),
    ("6_months", 6),
    ("1_year", 12),
    ("2_years", 24),
    ("3_years", 36),
    ("4_years", 48),
    ("5_years", 60),
    ("6_years", 72),
    ("7_years", 84),
    ("8_years", 96),
    ("9_years", 108),
    ("10_years", 120),
];

/// Investment horizon, either a named label (`1_year`) or a raw month count.
///
/// Both spellings collapse to a month count; the label is kept only so the
/// horizon can be echoed back the way it was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeHorizon {
    months: u32,
    label: Option<&'static str>,
}

impl TimeHorizon {
    /// Build from a month count in `1..=120`.
    pub fn from_months(months: u32) -> Result<Self, ValidationError> {
        if months == 0 || months > MAX_HORIZON_MONTHS {
            return Err(ValidationError::InvalidHorizon {
                value: months.to_string(),
                max_months: MAX_HORIZON_MONTHS,
            });
        }
        Ok(Self {
            months,
            label: None,
        })
    }

    /// Build from a named label such as `6_months` or `3_years`.
    pub fn from_label(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_lowercase().replace(' ', "_");
        LABELED_HORIZONS
            .iter()
            .find(|(label, _)| *label == normalized)
            .map(|&(label, months)| Self {
                months,
                label: Some(label),
            })
            .ok_or_else(|| ValidationError::InvalidHorizon {
                value: input.to_owned(),
                max_months: MAX_HORIZON_MONTHS,
            })
    }

    pub const fn one_year() -> Self {
        Self {
            months: 12,
            label: Some("1_year"),
        }
    }

    pub const fn months(self) -> u32 {
        self.months
    }

    pub fn years(self) -> f64 {
        f64::from(self.months) / 12.0
    }

    pub const fn label(self) -> Option<&'static str> {
        self.label
    }

    /// Human-readable form, e.g. `6 months`, `1 year`, `18 months`.
    pub fn display_label(self) -> String {
        match self.label {
            Some(label) => label.replace('_', " "),
            None if self.months == 12 => String::from("1 year"),
            None if self.months == 1 => String::from("1 month"),
            None => format!("{} months", self.months),
        }
    }

    /// Horizon choices offered to users, with the tiers suited to each.
    pub fn offered() -> Vec<HorizonOption> {
        use RiskTier::{High, Low, Medium};

        [
            ("6_months", "6 Months", vec![Low, Medium]),
            ("1_year", "1 Year", vec![Low, Medium, High]),
            ("2_years", "2 Years", vec![Medium, High]),
            ("3_years", "3 Years", vec![Medium, High]),
            ("5_years", "5 Years", vec![Medium, High]),
            ("10_years", "10 Years", vec![High]),
        ]
        .into_iter()
        .map(|(value, label, recommended_risk)| HorizonOption {
            value,
            label,
            recommended_risk,
        })
        .collect()
    }
}

impl Default for TimeHorizon {
    fn default() -> Self {
        Self::one_year()
    }
}

impl Display for TimeHorizon {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.label {
            Some(label) => f.write_str(label),
            None => write!(f, "{}", self.months),
        }
    }
}

impl FromStr for TimeHorizon {
    type Err = ValidationError;

    /// Accepts a label (`1_year`) or a bare month count (`18`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|ch| ch.is_ascii_digit()) {
            let months = trimmed
                .parse::<u32>()
                .map_err(|_| ValidationError::InvalidHorizon {
                    value: value.to_owned(),
                    max_months: MAX_HORIZON_MONTHS,
                })?;
            return Self::from_months(months);
        }
        Self::from_label(trimmed)
    }
}

impl Serialize for TimeHorizon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.label {
            Some(label) => serializer.serialize_str(label),
            None => serializer.serialize_u32(self.months),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawHorizon {
    Months(u32),
    Text(String),
}

impl<'de> Deserialize<'de> for TimeHorizon {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawHorizon::deserialize(deserializer)? {
            RawHorizon::Months(months) => Self::from_months(months),
            RawHorizon::Text(text) => text.parse(),
        }
        .map_err(serde::de::Error::custom)
    }
}

/// One entry of the horizon picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HorizonOption {
    pub value: &'static str,
    pub label: &'static str,
    pub recommended_risk: Vec<RiskTier>,
}
