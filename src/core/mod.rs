// Core algorithm exports
pub mod analysis;
pub mod filters;
pub mod matcher;
pub mod mbti;
pub mod scoring;
pub mod similarity;

pub use analysis::{summarize, BatchSummary};
pub use filters::{evaluate_hard_filter, hard_filter_pass, hard_filter_pass_with, FilterOutcome};
pub use matcher::{MatchResult, Matcher};
pub use mbti::{mbti_score, MbtiTable, MBTI_FALLBACK_SCORE};
pub use scoring::{
    compute_match_score, compute_match_score_with, normalized_score, score_breakdown,
    score_breakdown_with, ScoringConfig,
};
pub use similarity::jaccard_similarity;
