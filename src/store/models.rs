use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One aggregation pass over the catalog, partitioned by match status.
/// This is the exact document published to disk and served by the API:
/// three top-level lists, each in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub ongoing: Vec<MatchRecord>,
    pub finished: Vec<MatchRecord>,
    pub not_started: Vec<MatchRecord>,
}

/// A catalog match as it appears in the published snapshot.
/// Rebuilt from the catalog every refresh cycle; a lineup is attached
/// during the cycle when the upstream API has one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    /// Upstream event ID (unique, stable)
    pub id: u64,
    /// Team descriptors are source-defined (name-only or a full team
    /// object); passed through verbatim
    pub home_team: Value,
    pub away_team: Value,
    /// Scheduled kick-off, Unix seconds on the wire
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub start_time: Option<DateTime<Utc>>,
    pub status: MatchStatus,
    /// Present only for ongoing/finished matches whose lineup fetch
    /// succeeded this cycle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineup: Option<LineupRecord>,
}

/// Both team sheets for one match, as fetched from the lineup API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupRecord {
    pub match_id: u64,
    /// Whether the source has confirmed the starting eleven
    pub confirmed: bool,
    pub home_team: Vec<PlayerRecord>,
    pub away_team: Vec<PlayerRecord>,
}

/// A single player entry flattened from the upstream nested shape.
/// Optional upstream fields stay `None` (serialized as null) rather than
/// failing the lineup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub name: String,
    pub short_name: String,
    /// Position code as the source reports it (e.g. "G", "D", "M", "F")
    pub position: String,
    /// The source sends this as either a string or a number; normalized
    /// to a string
    pub jersey_number: String,
    /// Height in centimetres
    pub height: Option<u32>,
    pub nationality: String,
    pub market_value_currency: Option<String>,
    /// Unix seconds on the wire
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub date_of_birth: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_substitute: bool,
    /// Per-player stats; shape varies by sport and match state, so kept
    /// as raw JSON
    #[serde(default)]
    pub statistics: serde_json::Map<String, Value>,
}

/// The three match states this service classifies. Catalog entries with
/// any other status are skipped entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    NotStarted,
    InProgress,
    Finished,
}

impl MatchStatus {
    /// Parse a raw catalog status. Statuses are matched exactly; anything
    /// unrecognized returns `None` and the entry is dropped from the
    /// snapshot.
    pub fn from_catalog(status: &str) -> Option<MatchStatus> {
        match status {
            "notstarted" => Some(MatchStatus::NotStarted),
            "inprogress" => Some(MatchStatus::InProgress),
            "finished" => Some(MatchStatus::Finished),
            _ => None,
        }
    }
}
