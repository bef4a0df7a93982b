use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{PairEvaluation, Profile};

const UNKNOWN_BUCKET: &str = "unknown";

/// Aggregate view of a batch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_profiles: usize,
    pub total_pairs: usize,
    pub hard_filter_passed: usize,
    /// Share of pairs passing the hard filter, 0 for an empty batch
    pub pass_rate: f64,
    /// Mean over all pairs; rejected pairs count as 0
    pub average_score: f64,
    /// Mean over passing pairs only
    pub average_passing_score: f64,
    pub mbti_distribution: BTreeMap<String, usize>,
    pub province_distribution: BTreeMap<String, usize>,
}

/// Summarize a batch of pair evaluations
pub fn summarize(profiles: &[Profile], evaluations: &[PairEvaluation]) -> BatchSummary {
    let total_pairs = evaluations.len();
    let passing: Vec<f64> = evaluations
        .iter()
        .filter(|e| e.passed_hard_conditions)
        .map(|e| e.score)
        .collect();

    let mut mbti_distribution = BTreeMap::new();
    let mut province_distribution = BTreeMap::new();
    for profile in profiles {
        let mbti = profile
            .mbti_type
            .map(|t| t.code().to_string())
            .unwrap_or_else(|| UNKNOWN_BUCKET.to_string());
        *mbti_distribution.entry(mbti).or_insert(0) += 1;

        let province = profile
            .province
            .clone()
            .unwrap_or_else(|| UNKNOWN_BUCKET.to_string());
        *province_distribution.entry(province).or_insert(0) += 1;
    }

    BatchSummary {
        total_profiles: profiles.len(),
        total_pairs,
        hard_filter_passed: passing.len(),
        pass_rate: ratio(passing.len() as f64, total_pairs),
        average_score: ratio(evaluations.iter().map(|e| e.score).sum(), total_pairs),
        average_passing_score: ratio(passing.iter().sum(), passing.len()),
        mbti_distribution,
        province_distribution,
    }
}

#[inline]
fn ratio(numerator: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        numerator / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MbtiType;

    fn evaluation(passed: bool, score: f64) -> PairEvaluation {
        PairEvaluation {
            user1_id: "a".to_string(),
            user2_id: "b".to_string(),
            passed_hard_conditions: passed,
            rejections: vec![],
            score,
            details: None,
        }
    }

    #[test]
    fn test_empty_batch() {
        let summary = summarize(&[], &[]);
        assert_eq!(summary.total_pairs, 0);
        assert_eq!(summary.pass_rate, 0.0);
        assert_eq!(summary.average_score, 0.0);
        assert_eq!(summary.average_passing_score, 0.0);
    }

    #[test]
    fn test_rates_and_averages() {
        let evaluations = vec![
            evaluation(true, 80.0),
            evaluation(true, 60.0),
            evaluation(false, 0.0),
            evaluation(false, 0.0),
        ];
        let summary = summarize(&[], &evaluations);

        assert_eq!(summary.hard_filter_passed, 2);
        assert_eq!(summary.pass_rate, 0.5);
        assert_eq!(summary.average_score, 35.0);
        assert_eq!(summary.average_passing_score, 70.0);
    }

    #[test]
    fn test_distributions() {
        let profiles = vec![
            Profile {
                mbti_type: Some(MbtiType::Intj),
                province: Some("北京".to_string()),
                ..Profile::default()
            },
            Profile {
                mbti_type: Some(MbtiType::Intj),
                province: Some("上海".to_string()),
                ..Profile::default()
            },
            Profile::default(),
        ];
        let summary = summarize(&profiles, &[]);

        assert_eq!(summary.mbti_distribution.get("INTJ"), Some(&2));
        assert_eq!(summary.mbti_distribution.get("unknown"), Some(&1));
        assert_eq!(summary.province_distribution.get("北京"), Some(&1));
        assert_eq!(summary.province_distribution.len(), 3);
    }
}
