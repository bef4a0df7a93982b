use std::sync::OnceLock;

use crate::core::mbti::{clamp_unit, MbtiTable};
use crate::core::similarity::jaccard_similarity;
use crate::models::{Profile, ScoreBreakdown, ScoringWeights, WeightsError};

/// Weights plus MBTI table, injected into the scorer at construction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoringConfig {
    weights: ScoringWeights,
    mbti: MbtiTable,
}

impl ScoringConfig {
    pub fn new(weights: ScoringWeights, mbti: MbtiTable) -> Result<Self, WeightsError> {
        weights.validate()?;
        Ok(Self { weights, mbti })
    }

    pub fn with_weights(weights: ScoringWeights) -> Result<Self, WeightsError> {
        Self::new(weights, MbtiTable::default())
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn mbti_table(&self) -> &MbtiTable {
        &self.mbti
    }
}

fn default_config() -> &'static ScoringConfig {
    static CONFIG: OnceLock<ScoringConfig> = OnceLock::new();
    CONFIG.get_or_init(ScoringConfig::default)
}

/// Calculate a match score (0-100) for a pair under the default weights
///
/// Scoring formula:
/// score = (
///     communication * W_COMM +     # Jaccard over communication-style tags
///     interest * W_INTEREST +      # Jaccard over interest tags
///     mbti * W_MBTI                # MBTI pair table lookup
/// ) / (W_COMM + W_INTEREST + W_MBTI) * 100
///
/// The hard filter is not re-checked here; callers gate on it first.
pub fn compute_match_score(a: &Profile, b: &Profile) -> f64 {
    score_breakdown_with(a, b, default_config()).score
}

/// `compute_match_score` under an explicit configuration
pub fn compute_match_score_with(a: &Profile, b: &Profile, config: &ScoringConfig) -> f64 {
    score_breakdown_with(a, b, config).score
}

/// Sub-metrics and total under the default weights
pub fn score_breakdown(a: &Profile, b: &Profile) -> ScoreBreakdown {
    score_breakdown_with(a, b, default_config())
}

pub fn score_breakdown_with(a: &Profile, b: &Profile, config: &ScoringConfig) -> ScoreBreakdown {
    let communication = clamp_unit(jaccard_similarity(
        &a.communication_style_tags,
        &b.communication_style_tags,
    ));
    let interest = clamp_unit(jaccard_similarity(&a.interest_tags, &b.interest_tags));
    let mbti = clamp_unit(config.mbti.score_opt(a.mbti_type, b.mbti_type));

    ScoreBreakdown {
        communication,
        interest,
        mbti,
        score: normalized_score(&config.weights, communication, interest, mbti),
    }
}

/// Weighted mean of sub-metrics scaled to [0, 100]
///
/// An all-zero weight set scores 0.
#[inline]
pub fn normalized_score(
    weights: &ScoringWeights,
    communication: f64,
    interest: f64,
    mbti: f64,
) -> f64 {
    let total_weight = weights.sum();
    if total_weight <= 0.0 {
        return 0.0;
    }

    let total = weights.communication * clamp_unit(communication)
        + weights.interest * clamp_unit(interest)
        + weights.mbti * clamp_unit(mbti);

    (total / total_weight * 100.0).clamp(0.0, 100.0)
}
