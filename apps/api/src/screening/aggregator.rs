//! Aggregator: combines per-requirement results into an overall hire recommendation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::screening::fit_band::FitBand;
use crate::screening::report::RequirementResult;

/// Overall score must exceed this for a strong fit.
pub const STRONG_FIT_THRESHOLD: f32 = 0.75;
/// Overall score must exceed this for a moderate fit.
pub const MODERATE_FIT_THRESHOLD: f32 = 0.5;

/// Band weights used by band-weighted aggregation. Other bands weigh 0.
pub const EXCELLENT_WEIGHT: f32 = 1.0;
pub const STRONG_WEIGHT: f32 = 0.8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMode {
    /// Arithmetic mean of similarity scores.
    MeanScore,
    /// Excellent counts 1.0, Strong 0.8, everything else 0, over the total.
    #[default]
    BandWeighted,
}

impl AggregationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationMode::MeanScore => "mean_score",
            AggregationMode::BandWeighted => "band_weighted",
        }
    }
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" | "mean_score" => Ok(AggregationMode::MeanScore),
            "band_weighted" | "weighted" => Ok(AggregationMode::BandWeighted),
            other => Err(format!("unknown aggregation mode '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallFit {
    StrongFit,
    ModerateFit,
    WeakFit,
    /// Nothing was scored, so there is nothing to recommend.
    Undetermined,
}

impl OverallFit {
    pub fn recommendation(&self) -> &'static str {
        match self {
            OverallFit::StrongFit => "Strong fit — proceed to interview.",
            OverallFit::ModerateFit => "Moderate fit — consider further evaluation.",
            OverallFit::WeakFit => "Weak fit — likely not suitable.",
            OverallFit::Undetermined => "No requirements were scored — no recommendation.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallVerdict {
    pub score: f32,
    pub fit: OverallFit,
    pub mode: AggregationMode,
    /// Requirements that contributed to the score.
    pub scored: usize,
    /// Requirements whose oracle call failed; excluded from the score.
    pub failed: usize,
    pub recommendation: String,
}

/// Maps an overall score onto a fit level.
pub fn verdict_for(score: f32) -> OverallFit {
    if score > STRONG_FIT_THRESHOLD {
        OverallFit::StrongFit
    } else if score > MODERATE_FIT_THRESHOLD {
        OverallFit::ModerateFit
    } else {
        OverallFit::WeakFit
    }
}

fn band_weight(band: FitBand) -> f32 {
    match band {
        FitBand::Excellent => EXCELLENT_WEIGHT,
        FitBand::Strong => STRONG_WEIGHT,
        FitBand::Moderate | FitBand::Weak | FitBand::Missing => 0.0,
    }
}

/// Aggregates scored results under `mode`. Failed results are counted but not scored.
pub fn aggregate(results: &[RequirementResult], mode: AggregationMode) -> OverallVerdict {
    let failed = results.iter().filter(|r| r.is_failed()).count();
    let scored = results.len() - failed;

    if scored == 0 {
        let fit = OverallFit::Undetermined;
        return OverallVerdict {
            score: 0.0,
            fit,
            mode,
            scored,
            failed,
            recommendation: fit.recommendation().to_string(),
        };
    }

    let total: f32 = match mode {
        AggregationMode::MeanScore => results.iter().filter_map(|r| r.score()).sum(),
        AggregationMode::BandWeighted => results
            .iter()
            .filter_map(|r| r.band())
            .map(band_weight)
            .sum(),
    };
    let score = total / scored as f32;
    let fit = verdict_for(score);

    OverallVerdict {
        score,
        fit,
        mode,
        scored,
        failed,
        recommendation: fit.recommendation().to_string(),
    }
}
