// Model exports
pub mod domain;
pub mod record;
pub mod requests;
pub mod responses;

pub use domain::{
    Acceptance, AgeRange, Category, FilterCheck, FilterPolicy, LocationGranularity, MbtiType,
    PairEvaluation, Profile, RankedMatch, Rejection, ScoreBreakdown, ScoringWeights, WeightsError,
    DEFAULT_REFERENCE_YEAR, W_COMM, W_INTEREST, W_MBTI,
};
pub use record::{ProfileError, ProfileRecord};
pub use requests::{BatchMatchRequest, FindMatchesRequest, ScorePairRequest};
pub use responses::{BatchMatchResponse, ErrorResponse, FindMatchesResponse, HealthResponse};
