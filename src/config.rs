use clap::Parser;

/// Football match lineup aggregator and read API
#[derive(Parser, Debug, Clone)]
#[command(name = "matchday-api", version, about)]
pub struct Config {
    /// HTTP listen port for the read API
    #[arg(long, env = "PORT", default_value = "5000")]
    pub port: u16,

    /// Match catalog path (read once at startup)
    #[arg(long, env = "CATALOG_PATH", default_value = "foot.json")]
    pub catalog_path: String,

    /// Published snapshot path (rewritten every refresh cycle)
    #[arg(long, env = "SNAPSHOT_PATH", default_value = "classements.json")]
    pub snapshot_path: String,

    /// Lineups API base URL
    #[arg(
        long,
        env = "LINEUPS_API_URL",
        default_value = "https://www.sofascore.com/api/v1"
    )]
    pub lineups_api_url: String,

    /// Refresh interval between cycles in seconds
    #[arg(long, env = "POLL_INTERVAL_SECS", default_value = "3")]
    pub poll_interval_secs: u64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.poll_interval_secs == 0 {
            anyhow::bail!("poll_interval_secs must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_deployment() {
        let config = Config::try_parse_from(["matchday-api"]).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.catalog_path, "foot.json");
        assert_eq!(config.snapshot_path, "classements.json");
        assert_eq!(config.lineups_api_url, "https://www.sofascore.com/api/v1");
        assert_eq!(config.poll_interval_secs, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config =
            Config::try_parse_from(["matchday-api", "--poll-interval-secs", "0"]).unwrap();
        assert!(config.validate().is_err());
    }
}
