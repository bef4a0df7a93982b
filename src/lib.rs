//! Kindred Match - pair compatibility engine for a matchmaking app
//!
//! Every candidate pair goes through two stages: a hard-filter gate that
//! rejects categorically incompatible pairs, then a weighted soft score
//! blending communication-style overlap, interest overlap and MBTI
//! compatibility into a percentage.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use core::{
    compute_match_score, hard_filter_pass, jaccard_similarity, mbti_score, Matcher, MbtiTable,
    ScoringConfig,
};
pub use models::{FilterPolicy, Profile, ProfileError, ProfileRecord, ScoringWeights};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        assert_eq!(mbti_score("INTJ", "ENFP"), mbti_score("ENFP", "INTJ"));
        assert!(!hard_filter_pass(&Profile::default(), &Profile::default()));
    }
}
