use serde::{Deserialize, Deserializer, Serialize};

use crate::db::search::{NameMatch, PlayerSearch};
use crate::error::ApiError;

/// Body for creating or updating a match.
#[derive(Debug, Deserialize)]
pub struct MatchInput {
    pub match_type: Option<String>,
    pub match_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub home_club_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub away_club_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub home_score: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub away_score: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub stadium_id: Option<i64>,
}

impl MatchInput {
    pub fn same_club(&self) -> bool {
        self.home_club_id == self.away_club_id
    }
}

/// Body for adding a player to a match lineup.
#[derive(Debug, Deserialize)]
pub struct AppearanceInput {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub player_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub minutes_played: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub goals: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub assists: Option<i64>,
}

/// Body for creating or updating a player. An empty `club_id` means free
/// agent.
#[derive(Debug, Deserialize)]
pub struct PlayerInput {
    pub f_name: Option<String>,
    pub l_name: Option<String>,
    pub dob: Option<String>,
    pub position: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub club_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct TransferInput {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub new_club_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub new_salary: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Query string of `GET /players/search`. Everything arrives as text; empty
/// values are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub name: Option<String>,
    pub name_match_type: Option<String>,
    pub position: Option<String>,
    #[serde(rename = "club_id")]
    pub club_id: Option<String>,
    pub min_age: Option<String>,
    pub max_age: Option<String>,
    pub min_salary: Option<String>,
    pub min_trophies: Option<String>,
}

impl TryFrom<SearchQuery> for PlayerSearch {
    type Error = ApiError;

    fn try_from(query: SearchQuery) -> Result<Self, Self::Error> {
        Ok(PlayerSearch {
            name_match: NameMatch::parse(query.name_match_type.as_deref()),
            name: non_empty(query.name),
            position: non_empty(query.position),
            club_id: parse_filter("club_id", query.club_id)?,
            min_age: parse_filter("minAge", query.min_age)?,
            max_age: parse_filter("maxAge", query.max_age)?,
            min_salary: parse_filter("minSalary", query.min_salary)?,
            min_trophies: parse_filter("minTrophies", query.min_trophies)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlayerCreatedResponse {
    pub message: String,
    pub player_id: u64,
}

/// Only the empty string counts as absent; whitespace is a real value.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_filter<T: std::str::FromStr>(field: &str, value: Option<String>) -> Result<Option<T>, ApiError> {
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("Invalid value for {field}: {raw}"))),
    }
}

// 2^63 is exactly representable; i64::MAX is not.
const I64_MIN_F: f64 = -9_223_372_036_854_775_808.0;
const I64_MAX_F: f64 = 9_223_372_036_854_775_808.0;

/// Form fields arrive either as JSON numbers or as strings; `""` and `null`
/// both mean absent.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Text(String),
}

fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Int(v)) => Ok(Some(v)),
        Some(NumberOrString::Float(v)) if v.fract() == 0.0 && (I64_MIN_F..I64_MAX_F).contains(&v) => {
            Ok(Some(v as i64))
        }
        Some(NumberOrString::Float(v)) => Err(D::Error::custom(format!("expected an integer, got {v}"))),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::Text(s)) => s.trim().parse::<i64>().map(Some).map_err(D::Error::custom),
    }
}

fn deserialize_optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Int(v)) => Ok(Some(v as f64)),
        Some(NumberOrString::Float(v)) => Ok(Some(v)),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::Text(s)) => s.trim().parse::<f64>().map(Some).map_err(D::Error::custom),
    }
}
