use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Labels that mean "no restriction" wherever a categorical value is expected
pub const WILDCARD_LABELS: &[&str] = &["any", "*", "不限"];

fn is_wildcard(label: &str) -> bool {
    WILDCARD_LABELS
        .iter()
        .any(|w| w.eq_ignore_ascii_case(label))
}

/// A profile's own categorical attribute (orientation, marital status, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Category {
    /// Wildcard, satisfies any acceptance set
    Any,
    Known(String),
    /// Missing or blank; never accepted by a restricted set
    #[default]
    Unknown,
}

impl Category {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Category::Unknown,
            Some(label) if is_wildcard(label) => Category::Any,
            Some(label) => Category::Known(label.to_string()),
        }
    }

    pub fn known(label: &str) -> Self {
        Category::parse(Some(label))
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            Category::Known(label) => Some(label),
            _ => None,
        }
    }
}

/// The set of categorical values a profile will accept in a partner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acceptance {
    Any,
    OneOf(BTreeSet<String>),
}

impl Default for Acceptance {
    /// Accepts nothing: an absent expectation fails closed
    fn default() -> Self {
        Acceptance::OneOf(BTreeSet::new())
    }
}

impl Acceptance {
    /// Build from raw labels. Any wildcard label widens the whole set to `Any`.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() {
                continue;
            }
            if is_wildcard(label) {
                return Acceptance::Any;
            }
            set.insert(label.to_string());
        }
        Acceptance::OneOf(set)
    }

    #[inline]
    pub fn accepts(&self, category: &Category) -> bool {
        match (self, category) {
            (Acceptance::Any, _) => true,
            (Acceptance::OneOf(_), Category::Any) => true,
            (Acceptance::OneOf(set), Category::Known(label)) => set.contains(label),
            (Acceptance::OneOf(_), Category::Unknown) => false,
        }
    }
}

/// Inclusive age interval a profile accepts in a partner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u16,
    pub max: u16,
}

impl AgeRange {
    /// Returns `None` for an inverted interval
    pub fn new(min: u16, max: u16) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    #[inline]
    pub fn contains(&self, age: i32) -> bool {
        age >= i32::from(self.min) && age <= i32::from(self.max)
    }
}

/// The 16 canonical MBTI personality codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MbtiType {
    Istj,
    Isfj,
    Infj,
    Intj,
    Istp,
    Isfp,
    Infp,
    Intp,
    Estp,
    Esfp,
    Enfp,
    Entp,
    Estj,
    Esfj,
    Enfj,
    Entj,
}

impl MbtiType {
    pub const ALL: [MbtiType; 16] = [
        MbtiType::Istj,
        MbtiType::Isfj,
        MbtiType::Infj,
        MbtiType::Intj,
        MbtiType::Istp,
        MbtiType::Isfp,
        MbtiType::Infp,
        MbtiType::Intp,
        MbtiType::Estp,
        MbtiType::Esfp,
        MbtiType::Enfp,
        MbtiType::Entp,
        MbtiType::Estj,
        MbtiType::Esfj,
        MbtiType::Enfj,
        MbtiType::Entj,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            MbtiType::Istj => "ISTJ",
            MbtiType::Isfj => "ISFJ",
            MbtiType::Infj => "INFJ",
            MbtiType::Intj => "INTJ",
            MbtiType::Istp => "ISTP",
            MbtiType::Isfp => "ISFP",
            MbtiType::Infp => "INFP",
            MbtiType::Intp => "INTP",
            MbtiType::Estp => "ESTP",
            MbtiType::Esfp => "ESFP",
            MbtiType::Enfp => "ENFP",
            MbtiType::Entp => "ENTP",
            MbtiType::Estj => "ESTJ",
            MbtiType::Esfj => "ESFJ",
            MbtiType::Enfj => "ENFJ",
            MbtiType::Entj => "ENTJ",
        }
    }
}

impl fmt::Display for MbtiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown MBTI code: {0}")]
pub struct UnknownMbti(pub String);

impl FromStr for MbtiType {
    type Err = UnknownMbti;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        MbtiType::ALL
            .iter()
            .copied()
            .find(|t| t.code() == code)
            .ok_or_else(|| UnknownMbti(s.to_string()))
    }
}

/// Typed user profile consumed by the hard filter and the soft scorer
///
/// Constructed at the record boundary (see `ProfileRecord`); absent optional
/// fields are already normalized to `Unknown` / empty sets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub user_id: String,
    pub orientation: Category,
    pub desired_partner_orientation: Acceptance,
    pub birth_year: Option<i32>,
    pub desired_partner_age_range: Option<AgeRange>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub accepts_long_distance: bool,
    pub marital_status: Category,
    pub desired_partner_marital_status: Acceptance,
    pub has_children: Category,
    pub desired_partner_children_status: Acceptance,
    pub dealbreaker_tags: BTreeSet<String>,
    pub personal_traits: BTreeSet<String>,
    pub mbti_type: Option<MbtiType>,
    pub communication_style_tags: BTreeSet<String>,
    pub interest_tags: BTreeSet<String>,
}

impl Profile {
    /// Age at `reference_year`, or `None` when the birth year is unknown
    /// or the difference does not fit in an `i32`
    pub fn age_at(&self, reference_year: i32) -> Option<i32> {
        self.birth_year
            .and_then(|year| reference_year.checked_sub(year))
    }
}

/// Which location field decides whether two profiles are "nearby"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationGranularity {
    Province,
    #[default]
    City,
}

/// Hard-filter policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterPolicy {
    pub reference_year: i32,
    pub location_granularity: LocationGranularity,
}

/// Year the age computation is anchored to unless configured otherwise
pub const DEFAULT_REFERENCE_YEAR: i32 = 2024;

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            reference_year: DEFAULT_REFERENCE_YEAR,
            location_granularity: LocationGranularity::default(),
        }
    }
}

/// Hard-filter sub-checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCheck {
    Orientation,
    Age,
    Location,
    MaritalStatus,
    Children,
    Dealbreaker,
}

impl FilterCheck {
    pub fn name(&self) -> &'static str {
        match self {
            FilterCheck::Orientation => "orientation",
            FilterCheck::Age => "age",
            FilterCheck::Location => "location",
            FilterCheck::MaritalStatus => "marital_status",
            FilterCheck::Children => "children",
            FilterCheck::Dealbreaker => "dealbreaker",
        }
    }
}

/// One failed hard-filter check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub check: FilterCheck,
    pub reason: String,
}

/// Per-metric view of a soft score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(rename = "communicationScore")]
    pub communication: f64,
    #[serde(rename = "interestScore")]
    pub interest: f64,
    #[serde(rename = "mbtiScore")]
    pub mbti: f64,
    /// Normalized weighted score in [0, 100]
    pub score: f64,
}

/// Full evaluation of one unordered pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairEvaluation {
    #[serde(rename = "user1Id")]
    pub user1_id: String,
    #[serde(rename = "user2Id")]
    pub user2_id: String,
    #[serde(rename = "passedHardConditions")]
    pub passed_hard_conditions: bool,
    #[serde(default)]
    pub rejections: Vec<Rejection>,
    /// 0 when the hard filter rejected the pair
    pub score: f64,
    #[serde(default)]
    pub details: Option<ScoreBreakdown>,
}

/// A candidate ranked for one target profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    pub details: ScoreBreakdown,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub communication: f64,
    pub interest: f64,
    pub mbti: f64,
}

pub const W_COMM: f64 = 0.30;
pub const W_INTEREST: f64 = 0.30;
pub const W_MBTI: f64 = 0.40;

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            communication: W_COMM,
            interest: W_INTEREST,
            mbti: W_MBTI,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightsError {
    #[error("weight `{name}` must be finite and non-negative, got {value}")]
    Invalid { name: &'static str, value: f64 },
}

impl ScoringWeights {
    /// Construct a weight set, rejecting negative or non-finite weights
    pub fn new(communication: f64, interest: f64, mbti: f64) -> Result<Self, WeightsError> {
        let weights = Self {
            communication,
            interest,
            mbti,
        };
        weights.validate()?;
        Ok(weights)
    }

    pub fn validate(&self) -> Result<(), WeightsError> {
        for (name, value) in [
            ("communication", self.communication),
            ("interest", self.interest),
            ("mbti", self.mbti),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(WeightsError::Invalid { name, value });
            }
        }
        Ok(())
    }

    pub fn sum(&self) -> f64 {
        self.communication + self.interest + self.mbti
    }
}
