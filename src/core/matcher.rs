use rayon::prelude::*;
use std::cmp::Ordering;

use crate::core::{
    filters::{evaluate_hard_filter, hard_filter_pass_with},
    scoring::{score_breakdown_with, ScoringConfig},
};
use crate::models::{FilterPolicy, PairEvaluation, Profile, RankedMatch};

/// Result of ranking candidates for one target
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<RankedMatch>,
    pub total_candidates: usize,
    pub rejected: usize,
}

/// Match orchestrator: hard-filter gate, then soft scoring and ranking
///
/// # Pipeline Stages
/// 1. Hard filter (orientation, age, location, marital, children, dealbreakers)
/// 2. Soft scoring (communication, interests, MBTI)
/// 3. Ranking
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    policy: FilterPolicy,
    scoring: ScoringConfig,
}

impl Matcher {
    pub fn new(policy: FilterPolicy, scoring: ScoringConfig) -> Self {
        Self { policy, scoring }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn policy(&self) -> &FilterPolicy {
        &self.policy
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    #[inline]
    pub fn passes(&self, a: &Profile, b: &Profile) -> bool {
        hard_filter_pass_with(a, b, &self.policy)
    }

    /// Score in [0, 100], or 0 when the hard filter rejects the pair
    pub fn score(&self, a: &Profile, b: &Profile) -> f64 {
        if self.passes(a, b) {
            score_breakdown_with(a, b, &self.scoring).score
        } else {
            0.0
        }
    }

    /// Full evaluation of one pair; rejected pairs carry their reasons and score 0
    pub fn evaluate_pair(&self, a: &Profile, b: &Profile) -> PairEvaluation {
        let outcome = evaluate_hard_filter(a, b, &self.policy);
        let passed = outcome.passed();

        let details = passed.then(|| score_breakdown_with(a, b, &self.scoring));

        PairEvaluation {
            user1_id: a.user_id.clone(),
            user2_id: b.user_id.clone(),
            passed_hard_conditions: passed,
            rejections: outcome.into_rejections(),
            score: details.map(|d| d.score).unwrap_or(0.0),
            details,
        }
    }

    /// Rank candidates for `target`
    ///
    /// # Arguments
    /// * `target` - The profile matches are found for
    /// * `candidates` - Potential partners; the target itself is skipped by `user_id`
    /// * `top_k` - Maximum number of matches to return
    pub fn find_best_matches(
        &self,
        target: &Profile,
        candidates: &[Profile],
        top_k: usize,
    ) -> MatchResult {
        let others: Vec<&Profile> = candidates
            .iter()
            .filter(|candidate| candidate.user_id != target.user_id)
            .collect();
        let total_candidates = others.len();

        let mut matches: Vec<RankedMatch> = others
            .into_iter()
            .filter(|candidate| self.passes(target, candidate))
            .map(|candidate| {
                let details = score_breakdown_with(target, candidate, &self.scoring);
                RankedMatch {
                    user_id: candidate.user_id.clone(),
                    match_score: details.score,
                    details,
                }
            })
            .collect();

        let rejected = total_candidates - matches.len();

        // Sort by score (descending), then by user id for a stable order
        matches.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        matches.truncate(top_k);

        tracing::debug!(
            "Ranked {} of {} candidates for {} ({} rejected by hard filter)",
            matches.len(),
            total_candidates,
            target.user_id,
            rejected
        );

        MatchResult {
            matches,
            total_candidates,
            rejected,
        }
    }

    /// Evaluate every unordered pair `(i, j)` with `i < j` in parallel
    ///
    /// Results are sorted by score (descending), ties broken by user ids.
    pub fn batch_match(&self, profiles: &[Profile]) -> Vec<PairEvaluation> {
        let n = profiles.len();

        let mut results: Vec<PairEvaluation> = (0..n)
            .into_par_iter()
            .flat_map_iter(|i| (i + 1..n).map(move |j| (i, j)))
            .map(|(i, j)| self.evaluate_pair(&profiles[i], &profiles[j]))
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.user1_id.cmp(&b.user1_id))
                .then_with(|| a.user2_id.cmp(&b.user2_id))
        });

        tracing::debug!(
            "Evaluated {} pairs over {} profiles ({} passed hard filter)",
            results.len(),
            n,
            results.iter().filter(|r| r.passed_hard_conditions).count()
        );

        results
    }
}
