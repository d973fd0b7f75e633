//! Fit Classifier: maps a similarity score to an ordinal fit band.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ordinal fit category. Declaration order gives `Missing < Weak < ... < Excellent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FitBand {
    Missing,
    Weak,
    Moderate,
    Strong,
    Excellent,
}

impl FitBand {
    pub fn label(&self) -> &'static str {
        match self {
            FitBand::Excellent => "Excellent",
            FitBand::Strong => "Strong",
            FitBand::Moderate => "Moderate",
            FitBand::Weak => "Weak",
            FitBand::Missing => "Missing",
        }
    }

    /// Weak and Missing requirements are reported as gaps.
    pub fn is_gap(&self) -> bool {
        matches!(self, FitBand::Weak | FitBand::Missing)
    }
}

impl fmt::Display for FitBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ThresholdError {
    #[error("expected 4 comma-separated cut points, got {0}")]
    WrongCount(usize),

    #[error("invalid cut point '{0}'")]
    NotANumber(String),

    #[error("cut points must be strictly descending")]
    NotDescending,
}

/// Band cut points. A score must be strictly greater than a cut point to reach that band.
///
/// The defaults are fixed policy shared with earlier reports; override only deliberately.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitThresholds {
    pub excellent: f32,
    pub strong: f32,
    pub moderate: f32,
    pub weak: f32,
}

impl Default for FitThresholds {
    fn default() -> Self {
        Self {
            excellent: 0.75,
            strong: 0.55,
            moderate: 0.35,
            weak: 0.20,
        }
    }
}

impl FitThresholds {
    pub fn classify(&self, score: f32) -> FitBand {
        if score > self.excellent {
            FitBand::Excellent
        } else if score > self.strong {
            FitBand::Strong
        } else if score > self.moderate {
            FitBand::Moderate
        } else if score > self.weak {
            FitBand::Weak
        } else {
            // NaN lands here too
            FitBand::Missing
        }
    }
}

/// Parses "excellent,strong,moderate,weak", e.g. `0.75,0.55,0.35,0.20`.
impl FromStr for FitThresholds {
    type Err = ThresholdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(ThresholdError::WrongCount(parts.len()));
        }

        let mut values = [0.0_f32; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse::<f32>()
                .map_err(|_| ThresholdError::NotANumber(part.to_string()))?;
        }

        if !values.windows(2).all(|w| w[0] > w[1]) {
            return Err(ThresholdError::NotDescending);
        }

        Ok(Self {
            excellent: values[0],
            strong: values[1],
            moderate: values[2],
            weak: values[3],
        })
    }
}

/// Classifies with the default cut points.
#[allow(dead_code)]
pub fn classify(score: f32) -> FitBand {
    FitThresholds::default().classify(score)
}
