use crate::api::endpoints::Region;
use crate::error::AppError;
use std::env;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;

/// Bounds and lifetimes of the per-operation response caches.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub capacity: usize,
    pub summoner_ttl: Duration,
    pub league_entries_ttl: Duration,
    pub league_listing_ttl: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        CacheSettings {
            capacity: 1024,
            summoner_ttl: Duration::from_secs(60 * 60),
            league_entries_ttl: Duration::from_secs(60),
            league_listing_ttl: Duration::from_secs(60 * 5),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub region: Region,
    pub db_path: PathBuf,
    /// Pause before the single retry that follows a 429.
    pub retry_after: Duration,
    pub requests_per_second: NonZeroU32,
    pub cache: CacheSettings,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Config {
            api_key: api_key.into(),
            region: Region::Euw,
            db_path: Self::default_db_path(),
            retry_after: Duration::from_secs(120),
            requests_per_second: NonZeroU32::new(20).unwrap_or(NonZeroU32::MIN),
            cache: CacheSettings::default(),
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("RIOT_API_KEY").map_err(|_| {
            AppError::ConfigError("RIOT_API_KEY not found in environment or .env file".to_string())
        })?;

        let mut config = Config::new(api_key);

        if let Ok(region) = env::var("RIOT_REGION") {
            config.region = region.parse()?;
        }

        config.db_path = Self::db_path_from_env();

        if let Ok(secs) = env::var("RIOT_RETRY_AFTER_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                AppError::ConfigError(format!("RIOT_RETRY_AFTER_SECS is not a number: {}", secs))
            })?;
            config.retry_after = Duration::from_secs(secs);
        }

        if let Ok(rate) = env::var("RIOT_REQUESTS_PER_SECOND") {
            config.requests_per_second = rate
                .parse::<u32>()
                .ok()
                .and_then(NonZeroU32::new)
                .ok_or_else(|| {
                    AppError::ConfigError(format!(
                        "RIOT_REQUESTS_PER_SECOND must be a positive integer: {}",
                        rate
                    ))
                })?;
        }

        Ok(config)
    }

    /// `RIOT_DB_PATH` if set, the default location otherwise. Needs no API key.
    pub fn db_path_from_env() -> PathBuf {
        dotenvy::dotenv().ok();
        env::var_os("RIOT_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_db_path)
    }

    pub fn default_db_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".league_ingest")
            .join("league.db")
    }
}
