use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::record::ProfileRecord;

/// Request to evaluate one pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorePairRequest {
    #[serde(rename = "profileA")]
    pub profile_a: ProfileRecord,
    #[serde(rename = "profileB")]
    pub profile_b: ProfileRecord,
}

/// Request to rank candidates for one target profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    pub target: ProfileRecord,
    #[validate(length(min = 1))]
    pub candidates: Vec<ProfileRecord>,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u16,
}

fn default_limit() -> u16 {
    20
}

/// Request to evaluate every unordered pair in a collection
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BatchMatchRequest {
    #[validate(length(min = 2))]
    pub profiles: Vec<ProfileRecord>,
}
