use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use thiserror::Error;

use crate::models::domain::{Acceptance, AgeRange, Category, Profile};

/// Errors raised when a transport record cannot become a `Profile`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("invalid birth year: {0}")]
    InvalidBirthYear(String),

    #[error("invalid age range: {0}")]
    InvalidAgeRange(String),

    #[error("invalid yes/no value for `{field}`: {value}")]
    InvalidFlag { field: &'static str, value: String },
}

/// A single label or a list of labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn labels(&self) -> Vec<&str> {
        match self {
            OneOrMany::One(label) => vec![label.as_str()],
            OneOrMany::Many(labels) => labels.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearInput {
    Number(i64),
    Text(String),
}

/// `"25-35"` or `[25, 35]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgeRangeInput {
    Pair([u16; 2]),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagInput {
    Bool(bool),
    Text(String),
}

/// Loosely-typed profile record as it arrives over the wire
///
/// Field names follow the app's camelCase API; the Chinese field names used by
/// spreadsheet-style data exports are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(rename = "userId", alias = "用户ID", alias = "id", default)]
    pub user_id: String,
    #[serde(alias = "属性", default)]
    pub orientation: Option<String>,
    #[serde(rename = "desiredPartnerOrientation", alias = "希望伴侣的属性", default)]
    pub desired_partner_orientation: Option<OneOrMany>,
    #[serde(rename = "birthYear", alias = "出生年份", default)]
    pub birth_year: Option<YearInput>,
    #[serde(rename = "desiredPartnerAgeRange", alias = "期望伴侣年龄范围", default)]
    pub desired_partner_age_range: Option<AgeRangeInput>,
    #[serde(alias = "所在省份", default)]
    pub province: Option<String>,
    #[serde(alias = "所在城市", default)]
    pub city: Option<String>,
    #[serde(rename = "acceptsLongDistance", alias = "能否接受异地恋", default)]
    pub accepts_long_distance: Option<FlagInput>,
    #[serde(rename = "maritalStatus", alias = "婚姻状态", default)]
    pub marital_status: Option<String>,
    #[serde(rename = "desiredPartnerMaritalStatus", alias = "期望伴侣婚姻状态", default)]
    pub desired_partner_marital_status: Option<OneOrMany>,
    #[serde(rename = "hasChildren", alias = "是否有子女", default)]
    pub has_children: Option<String>,
    #[serde(rename = "desiredPartnerChildrenStatus", alias = "期望伴侣子女情况", default)]
    pub desired_partner_children_status: Option<OneOrMany>,
    #[serde(rename = "dealbreakerTags", alias = "绝对排斥标签", default)]
    pub dealbreaker_tags: Option<Vec<String>>,
    #[serde(rename = "personalTraits", alias = "个人特征", default)]
    pub personal_traits: Option<Vec<String>>,
    #[serde(alias = "MBTI", default)]
    pub mbti: Option<String>,
    #[serde(rename = "communicationStyleTags", alias = "沟通方式标签", default)]
    pub communication_style_tags: Option<Vec<String>>,
    #[serde(rename = "interestTags", alias = "兴趣标签", default)]
    pub interest_tags: Option<Vec<String>>,
}

impl TryFrom<ProfileRecord> for Profile {
    type Error = ProfileError;

    fn try_from(record: ProfileRecord) -> Result<Self, Self::Error> {
        Ok(Profile {
            user_id: record.user_id,
            orientation: Category::parse(record.orientation.as_deref()),
            desired_partner_orientation: acceptance(record.desired_partner_orientation.as_ref()),
            birth_year: record.birth_year.as_ref().map(parse_birth_year).transpose()?,
            desired_partner_age_range: record
                .desired_partner_age_range
                .as_ref()
                .map(parse_age_range)
                .transpose()?,
            province: non_blank(record.province),
            city: non_blank(record.city),
            accepts_long_distance: record
                .accepts_long_distance
                .as_ref()
                .map(|flag| parse_flag("acceptsLongDistance", flag))
                .transpose()?
                .unwrap_or(false),
            marital_status: Category::parse(record.marital_status.as_deref()),
            desired_partner_marital_status: acceptance(
                record.desired_partner_marital_status.as_ref(),
            ),
            has_children: Category::parse(record.has_children.as_deref()),
            desired_partner_children_status: acceptance(
                record.desired_partner_children_status.as_ref(),
            ),
            dealbreaker_tags: tag_set(record.dealbreaker_tags),
            personal_traits: tag_set(record.personal_traits),
            // Unrecognized codes degrade to "no MBTI" rather than rejecting the record
            mbti_type: record.mbti.as_deref().and_then(|code| code.parse().ok()),
            communication_style_tags: tag_set(record.communication_style_tags),
            interest_tags: tag_set(record.interest_tags),
        })
    }
}

fn acceptance(raw: Option<&OneOrMany>) -> Acceptance {
    raw.map(|labels| Acceptance::from_labels(labels.labels()))
        .unwrap_or_default()
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn tag_set(raw: Option<Vec<String>>) -> BTreeSet<String> {
    raw.unwrap_or_default()
        .into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Birth years accepted at the record boundary
pub const BIRTH_YEAR_RANGE: RangeInclusive<i32> = 1900..=2100;

fn parse_birth_year(input: &YearInput) -> Result<i32, ProfileError> {
    let year = match input {
        YearInput::Number(n) => i32::try_from(*n).ok(),
        YearInput::Text(text) => text.trim().parse::<i32>().ok(),
    };

    year.filter(|year| BIRTH_YEAR_RANGE.contains(year))
        .ok_or_else(|| match input {
            YearInput::Number(n) => ProfileError::InvalidBirthYear(n.to_string()),
            YearInput::Text(text) => ProfileError::InvalidBirthYear(text.clone()),
        })
}

fn parse_age_range(input: &AgeRangeInput) -> Result<AgeRange, ProfileError> {
    let (min, max) = match input {
        AgeRangeInput::Pair([min, max]) => (*min, *max),
        AgeRangeInput::Text(text) => {
            let mut bounds = text
                .split(|c: char| matches!(c, '-' | '~' | '至' | ','))
                .map(|part| part.trim().parse::<u16>());
            match (bounds.next(), bounds.next(), bounds.next()) {
                (Some(Ok(min)), Some(Ok(max)), None) => (min, max),
                _ => return Err(ProfileError::InvalidAgeRange(text.clone())),
            }
        }
    };

    AgeRange::new(min, max).ok_or_else(|| ProfileError::InvalidAgeRange(format!("{min}-{max}")))
}

fn parse_flag(field: &'static str, input: &FlagInput) -> Result<bool, ProfileError> {
    match input {
        FlagInput::Bool(value) => Ok(*value),
        FlagInput::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "是" | "能" | "可以" | "yes" | "y" | "true" => Ok(true),
            "否" | "不能" | "不可以" | "no" | "n" | "false" => Ok(false),
            _ => Err(ProfileError::InvalidFlag {
                field,
                value: text.clone(),
            }),
        },
    }
}
