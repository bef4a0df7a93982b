use std::sync::OnceLock;

use crate::models::MbtiType;
use crate::models::MbtiType::*;

/// Score for pairings the table does not list, identical types included
pub const MBTI_FALLBACK_SCORE: f64 = 0.5;

/// Hand-authored pair judgments, each entry an unordered pair
///
/// 0.95 classic complementary pairs, 0.80 same-temperament intuitive pairs,
/// 0.60 same-temperament sensing pairs plus the INTJ/ESTJ partial match
/// (shared T and J), 0.20 fully opposite types.
const DEFAULT_PAIRINGS: &[(MbtiType, MbtiType, f64)] = &[
    (Infj, Enfp, 0.95),
    (Infj, Entp, 0.95),
    (Infp, Enfj, 0.95),
    (Infp, Entj, 0.95),
    (Intj, Enfp, 0.95),
    (Intj, Entp, 0.95),
    (Intp, Entj, 0.95),
    (Intp, Estj, 0.95),
    (Isfj, Esfp, 0.95),
    (Isfj, Estp, 0.95),
    (Isfp, Enfj, 0.95),
    (Isfp, Esfj, 0.95),
    (Isfp, Estj, 0.95),
    (Istj, Esfp, 0.95),
    (Istj, Estp, 0.95),
    (Istp, Esfj, 0.95),
    (Istp, Estj, 0.95),
    (Infj, Infp, 0.80),
    (Infj, Enfj, 0.80),
    (Infp, Enfp, 0.80),
    (Enfj, Enfp, 0.80),
    (Intj, Intp, 0.80),
    (Intj, Entj, 0.80),
    (Intp, Entp, 0.80),
    (Entj, Entp, 0.80),
    (Infj, Intj, 0.80),
    (Infp, Intp, 0.80),
    (Enfp, Entp, 0.80),
    (Enfj, Entj, 0.80),
    (Istj, Estj, 0.60),
    (Isfj, Esfj, 0.60),
    (Istj, Isfj, 0.60),
    (Estj, Esfj, 0.60),
    (Istp, Isfp, 0.60),
    (Estp, Esfp, 0.60),
    // Partial similarity
    (Intj, Estj, 0.60),
    (Estj, Infp, 0.20),
    (Esfj, Intp, 0.20),
    (Istj, Enfp, 0.20),
    (Isfj, Entp, 0.20),
    (Estp, Infj, 0.20),
    (Esfp, Intj, 0.20),
    (Istp, Enfj, 0.20),
    (Isfp, Entj, 0.20),
];

/// Symmetric 16x16 MBTI compatibility table with scores in [0, 1]
#[derive(Debug, Clone, PartialEq)]
pub struct MbtiTable {
    scores: [[f64; 16]; 16],
}

impl MbtiTable {
    /// Table where every pairing scores `fallback`
    pub fn uniform(fallback: f64) -> Self {
        let fallback = clamp_unit(fallback);
        Self {
            scores: [[fallback; 16]; 16],
        }
    }

    /// Build from unordered pair entries over a fallback; later entries win
    pub fn from_pairings<I>(fallback: f64, pairings: I) -> Self
    where
        I: IntoIterator<Item = (MbtiType, MbtiType, f64)>,
    {
        let mut table = Self::uniform(fallback);
        for (a, b, score) in pairings {
            table.set(a, b, score);
        }
        table
    }

    /// Set both orientations of a pair at once
    pub fn set(&mut self, a: MbtiType, b: MbtiType, score: f64) {
        let score = clamp_unit(score);
        self.scores[a as usize][b as usize] = score;
        self.scores[b as usize][a as usize] = score;
    }

    #[inline]
    pub fn score(&self, a: MbtiType, b: MbtiType) -> f64 {
        self.scores[a as usize][b as usize]
    }

    /// Score for optional types; an unknown type on either side scores 0
    #[inline]
    pub fn score_opt(&self, a: Option<MbtiType>, b: Option<MbtiType>) -> f64 {
        match (a, b) {
            (Some(a), Some(b)) => self.score(a, b),
            _ => 0.0,
        }
    }
}

impl Default for MbtiTable {
    fn default() -> Self {
        Self::from_pairings(MBTI_FALLBACK_SCORE, DEFAULT_PAIRINGS.iter().copied())
    }
}

/// NaN maps to 0
#[inline]
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn default_table() -> &'static MbtiTable {
    static TABLE: OnceLock<MbtiTable> = OnceLock::new();
    TABLE.get_or_init(MbtiTable::default)
}

/// MBTI compatibility of two 4-letter codes under the default table
///
/// Codes are case-insensitive. An unrecognized code scores 0.
pub fn mbti_score(a: &str, b: &str) -> f64 {
    default_table().score_opt(a.parse().ok(), b.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_symmetric_and_bounded() {
        let table = MbtiTable::default();
        for a in MbtiType::ALL {
            for b in MbtiType::ALL {
                let s = table.score(a, b);
                assert_eq!(s, table.score(b, a), "{a} / {b}");
                assert!((0.0..=1.0).contains(&s));
            }
        }
    }

    #[test]
    fn test_identical_types_use_fallback() {
        for t in MbtiType::ALL {
            assert_eq!(mbti_score(t.code(), t.code()), MBTI_FALLBACK_SCORE);
        }
    }

    #[test]
    fn test_complementary_beats_antagonistic() {
        assert!(mbti_score("INTJ", "ENFP") > mbti_score("INTJ", "ESTJ"));
        assert!(mbti_score("ENFP", "INFP") > mbti_score("ESTJ", "INFP"));
        assert!(mbti_score("INTJ", "ESTJ") > mbti_score("ESTJ", "INFP"));
    }

    #[test]
    fn test_partial_similarity_pair() {
        assert_eq!(mbti_score("INTJ", "ESTJ"), 0.60);
        assert_eq!(mbti_score("ESTJ", "INTJ"), 0.60);
    }

    #[test]
    fn test_unknown_code_scores_zero() {
        assert_eq!(mbti_score("XXXX", "INTJ"), 0.0);
        assert_eq!(mbti_score("", ""), 0.0);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(mbti_score("intj", "enfp"), mbti_score("INTJ", "ENFP"));
    }

    #[test]
    fn test_set_clamps_and_mirrors() {
        let mut table = MbtiTable::uniform(0.5);
        table.set(MbtiType::Istj, MbtiType::Enfp, 3.0);
        assert_eq!(table.score(MbtiType::Enfp, MbtiType::Istj), 1.0);
        table.set(MbtiType::Istj, MbtiType::Enfp, f64::NAN);
        assert_eq!(table.score(MbtiType::Istj, MbtiType::Enfp), 0.0);
    }
}
