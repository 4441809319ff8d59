use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::provider::LineupProvider;
use crate::store::models::{LineupRecord, PlayerRecord};

const DEFAULT_BASE_URL: &str = "https://www.sofascore.com/api/v1";

/// Lineup provider backed by the public Sofascore event API
/// (`GET {base}/event/{id}/lineups`).
pub struct SofaScore {
    http: Client,
    /// Base URL for overriding in tests
    base_url: String,
}

impl SofaScore {
    pub fn new(base_url: Option<&str>) -> Result<Self> {
        let base_url = base_url.unwrap_or(DEFAULT_BASE_URL);
        Url::parse(base_url).with_context(|| format!("Invalid lineups base URL: {base_url}"))?;
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(SofaScore {
            http,
            base_url: base_url.to_string(),
        })
    }
}

#[async_trait]
impl LineupProvider for SofaScore {
    fn name(&self) -> &str {
        "SofaScore"
    }

    async fn fetch_lineup(&self, match_id: u64) -> Result<Option<LineupRecord>> {
        let url = format!("{}/event/{}/lineups", self.base_url, match_id);
        debug!("Fetching lineup from {}", url);

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .context("Lineup request failed")?;

        if !resp.status().is_success() {
            // Lineups stay unpublished until shortly before kick-off, so a
            // miss here is ordinary operation, not a fault.
            warn!(
                "No lineup available for match {} (HTTP {})",
                match_id,
                resp.status()
            );
            return Ok(None);
        }

        let raw: LineupsResponse = resp
            .json()
            .await
            .context("Failed to parse lineup response")?;

        Ok(Some(raw.into_record(match_id)))
    }
}

// ── Upstream wire shape ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct LineupsResponse {
    #[serde(default)]
    confirmed: bool,
    home: TeamSheet,
    away: TeamSheet,
}

#[derive(Debug, Deserialize)]
struct TeamSheet {
    players: Vec<PlayerEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerEntry {
    player: PlayerInfo,
    position: String,
    #[serde(deserialize_with = "string_or_number")]
    jersey_number: String,
    #[serde(default)]
    substitute: bool,
    #[serde(default)]
    statistics: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerInfo {
    name: String,
    short_name: String,
    country: Country,
    height: Option<u32>,
    market_value_currency: Option<String>,
    date_of_birth_timestamp: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Country {
    name: String,
}

impl LineupsResponse {
    fn into_record(self, match_id: u64) -> LineupRecord {
        LineupRecord {
            match_id,
            confirmed: self.confirmed,
            home_team: self.home.players.into_iter().map(PlayerRecord::from).collect(),
            away_team: self.away.players.into_iter().map(PlayerRecord::from).collect(),
        }
    }
}

impl From<PlayerEntry> for PlayerRecord {
    fn from(entry: PlayerEntry) -> Self {
        let PlayerEntry {
            player,
            position,
            jersey_number,
            substitute,
            statistics,
        } = entry;
        PlayerRecord {
            name: player.name,
            short_name: player.short_name,
            position,
            jersey_number,
            height: player.height,
            nationality: player.country.name,
            market_value_currency: player.market_value_currency,
            date_of_birth: player
                .date_of_birth_timestamp
                .and_then(|ts| DateTime::from_timestamp(ts, 0)),
            is_substitute: substitute,
            statistics,
        }
    }
}

/// The upstream is inconsistent about jersey numbers ("10" vs 10); accept
/// both and keep the string form.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
