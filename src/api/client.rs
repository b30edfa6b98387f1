use crate::api::endpoints::{
    league_v4, match_v5, summoner_v4, Division, MatchIdsFilter, Queue, Region, Tier,
};
use crate::api::normalize::normalize_keys;
use crate::api::transport::{RequestContext, Transport, UreqTransport};
use crate::cache::{CacheKey, TtlCache};
use crate::config::Config;
use crate::decompose;
use crate::error::AppError;
use crate::model::{LeagueEntry, LeagueListing, MatchInfo, SummonerProfile};
use crate::rate_limit::{RetryPolicy, Throttle};
use serde_json::Value;
use std::sync::{Mutex, PoisonError};
use std::thread;
use tracing::{debug, trace, warn};

/// Identifiers a summoner can be looked up by. The first non-empty one wins,
/// in the order `summoner_id`, `account_id`, `puuid`, `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummonerQuery {
    pub summoner_id: Option<String>,
    pub account_id: Option<String>,
    pub puuid: Option<String>,
    pub name: Option<String>,
}

impl SummonerQuery {
    pub fn by_id(summoner_id: impl Into<String>) -> Self {
        SummonerQuery {
            summoner_id: Some(summoner_id.into()),
            ..Default::default()
        }
    }

    pub fn by_account_id(account_id: impl Into<String>) -> Self {
        SummonerQuery {
            account_id: Some(account_id.into()),
            ..Default::default()
        }
    }

    pub fn by_puuid(puuid: impl Into<String>) -> Self {
        SummonerQuery {
            puuid: Some(puuid.into()),
            ..Default::default()
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        SummonerQuery {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    fn present(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|v| !v.trim().is_empty())
    }

    /// Endpoint path for the highest-precedence identifier.
    fn path(&self) -> Result<String, AppError> {
        if let Some(id) = Self::present(&self.summoner_id) {
            Ok(summoner_v4::by_id(id))
        } else if let Some(id) = Self::present(&self.account_id) {
            Ok(summoner_v4::by_account_id(id))
        } else if let Some(puuid) = Self::present(&self.puuid) {
            Ok(summoner_v4::by_puuid(puuid))
        } else if let Some(name) = Self::present(&self.name) {
            Ok(summoner_v4::by_name(name))
        } else {
            Err(AppError::InvalidArgument(
                "summoner query needs an id, account id, puuid or name".to_string(),
            ))
        }
    }

    fn cache_key(&self, region: Region) -> CacheKey {
        let param = |value: &Option<String>| Self::present(value).map(str::to_string);
        CacheKey::with_optional(
            "summoner",
            vec![
                Some(region.label().to_string()),
                param(&self.summoner_id),
                param(&self.account_id),
                param(&self.puuid),
                param(&self.name),
            ],
        )
    }
}

struct Caches {
    summoners: Mutex<TtlCache<CacheKey, SummonerProfile>>,
    league_entries: Mutex<TtlCache<CacheKey, Vec<LeagueEntry>>>,
    listings: Mutex<TtlCache<CacheKey, LeagueListing>>,
}

impl Caches {
    fn new(config: &Config) -> Self {
        let settings = &config.cache;
        Caches {
            summoners: Mutex::new(TtlCache::new(settings.capacity, settings.summoner_ttl)),
            league_entries: Mutex::new(TtlCache::new(
                settings.capacity,
                settings.league_entries_ttl,
            )),
            listings: Mutex::new(TtlCache::new(
                settings.capacity,
                settings.league_listing_ttl,
            )),
        }
    }
}

/// Looks `key` up in `cache`, falling back to `fetch` on a miss. The lock is
/// released while `fetch` runs.
fn cached<V: Clone>(
    cache: &Mutex<TtlCache<CacheKey, V>>,
    key: CacheKey,
    fetch: impl FnOnce() -> Result<V, AppError>,
) -> Result<V, AppError> {
    let hit = cache
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key);
    if let Some(value) = hit {
        trace!(operation = key.operation, "cache hit");
        return Ok(value);
    }

    let value = fetch()?;
    cache
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(key, value.clone());
    Ok(value)
}

fn require_non_empty(name: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidArgument(format!("{} must not be empty", name)));
    }
    Ok(())
}

/// Message of an upstream error body (`{"status": {"message": ..}}`), if any.
fn upstream_message(body: &Value) -> String {
    body.pointer("/status/message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| match body {
            Value::Null => "no response body".to_string(),
            other => other.to_string(),
        })
}

pub struct RiotApiClient<T: Transport = UreqTransport> {
    config: Config,
    context: RequestContext,
    transport: T,
    throttle: Throttle,
    retry: RetryPolicy,
    caches: Caches,
}

impl RiotApiClient<UreqTransport> {
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> RiotApiClient<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        RiotApiClient {
            context: RequestContext::new(config.api_key.clone()),
            throttle: Throttle::per_second(config.requests_per_second),
            retry: RetryPolicy::fixed(config.retry_after),
            caches: Caches::new(&config),
            transport,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Replaces the request context; later calls authenticate with `api_key`.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        let api_key = api_key.into();
        self.config.api_key = api_key.clone();
        self.context = RequestContext::new(api_key);
    }

    /// GET with throttling and a single retry after a 429. Successful bodies
    /// come back with snake_cased keys.
    fn execute_request(&self, url: &str) -> Result<Value, AppError> {
        let mut attempt = 0;

        loop {
            attempt += 1;
            self.throttle.wait();
            debug!(url, attempt, "GET");

            let response = self.transport.get(url, &self.context)?;
            match response.status {
                200 => return Ok(normalize_keys(response.body)),
                status if self.retry.should_retry(status, attempt) => {
                    warn!(
                        url,
                        wait_secs = self.retry.retry_after.as_secs(),
                        "Rate limited, retrying once"
                    );
                    thread::sleep(self.retry.retry_after);
                }
                RetryPolicy::TOO_MANY_REQUESTS => {
                    return Err(AppError::RateLimited { attempts: attempt })
                }
                status => {
                    return Err(AppError::Upstream {
                        status,
                        message: upstream_message(&response.body),
                    })
                }
            }
        }
    }

    fn platform_url(region: Region, path: &str) -> String {
        format!("https://{}{}", region.platform_host(), path)
    }

    fn regional_url(region: Region, path: &str) -> String {
        format!("https://{}{}", region.regional_host(), path)
    }

    pub fn get_summoner(
        &self,
        region: Region,
        query: &SummonerQuery,
    ) -> Result<SummonerProfile, AppError> {
        let path = query.path()?;
        cached(&self.caches.summoners, query.cache_key(region), || {
            let body = self.execute_request(&Self::platform_url(region, &path))?;
            decompose::summoner(body, region)
        })
    }

    pub fn get_league_entries(
        &self,
        region: Region,
        summoner_id: &str,
    ) -> Result<Vec<LeagueEntry>, AppError> {
        require_non_empty("summoner_id", summoner_id)?;
        let key = CacheKey::new("league_entries", [region.label(), summoner_id]);
        cached(&self.caches.league_entries, key, || {
            let path = league_v4::entries_by_summoner_id(summoner_id);
            let body = self.execute_request(&Self::platform_url(region, &path))?;
            decompose::league_entries(body, region)
        })
    }

    /// One page (1-based) of the ranked standings of a queue, tier and division.
    pub fn get_league_entries_by_tier(
        &self,
        region: Region,
        queue: Queue,
        tier: Tier,
        division: Division,
        page: u32,
    ) -> Result<Vec<LeagueEntry>, AppError> {
        let code = queue.require_ladder_code()?;
        let page = page.max(1);
        let key = CacheKey::new(
            "league_entries_by_tier",
            [
                region.label().to_string(),
                code.to_string(),
                tier.as_str().to_string(),
                division.as_str().to_string(),
                page.to_string(),
            ],
        );
        cached(&self.caches.league_entries, key, || {
            let path = league_v4::entries(code, tier.as_str(), division.as_str(), page);
            let body = self.execute_request(&Self::platform_url(region, &path))?;
            decompose::league_entries(body, region)
        })
    }

    pub fn get_challenger_league(
        &self,
        region: Region,
        queue: Queue,
    ) -> Result<LeagueListing, AppError> {
        let code = queue.require_ladder_code()?;
        let path = league_v4::challenger_league_by_queue(code);
        self.listing(region, "challenger_league", code, path)
    }

    pub fn get_grandmaster_league(
        &self,
        region: Region,
        queue: Queue,
    ) -> Result<LeagueListing, AppError> {
        let code = queue.require_ladder_code()?;
        let path = league_v4::grandmaster_league_by_queue(code);
        self.listing(region, "grandmaster_league", code, path)
    }

    pub fn get_master_league(&self, region: Region, queue: Queue) -> Result<LeagueListing, AppError> {
        let code = queue.require_ladder_code()?;
        let path = league_v4::master_league_by_queue(code);
        self.listing(region, "master_league", code, path)
    }

    pub fn get_league_by_id(
        &self,
        region: Region,
        league_id: &str,
    ) -> Result<LeagueListing, AppError> {
        require_non_empty("league_id", league_id)?;
        let path = league_v4::league_by_id(league_id);
        self.listing(region, "league_by_id", league_id, path)
    }

    fn listing(
        &self,
        region: Region,
        operation: &'static str,
        param: &str,
        path: String,
    ) -> Result<LeagueListing, AppError> {
        let key = CacheKey::new(operation, [region.label(), param]);
        cached(&self.caches.listings, key, || {
            let body = self.execute_request(&Self::platform_url(region, &path))?;
            decompose::league_listing(body, region)
        })
    }

    /// Match with participants and teams; `fetch_timeline` adds a second call
    /// for the per-frame state and events. Never cached.
    pub fn get_match(
        &self,
        region: Region,
        match_id: &str,
        fetch_timeline: bool,
    ) -> Result<MatchInfo, AppError> {
        require_non_empty("match_id", match_id)?;

        let game = self.execute_request(&Self::regional_url(region, &match_v5::by_id(match_id)))?;
        let timeline = if fetch_timeline {
            let url = Self::regional_url(region, &match_v5::timeline_by_id(match_id));
            Some(self.execute_request(&url)?)
        } else {
            None
        };

        decompose::match_info(game, timeline)
    }

    pub fn get_match_ids(
        &self,
        region: Region,
        puuid: &str,
        filter: &MatchIdsFilter,
    ) -> Result<Vec<String>, AppError> {
        require_non_empty("puuid", puuid)?;
        filter.validate()?;

        let path = match_v5::ids_by_puuid(puuid, &filter.query_string());
        decompose::match_ids(self.execute_request(&Self::regional_url(region, &path))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summoner_query_precedence() {
        let query = SummonerQuery {
            summoner_id: Some(String::new()),
            account_id: Some("acc".to_string()),
            puuid: Some("pu".to_string()),
            name: Some("name".to_string()),
        };
        assert_eq!(query.path().unwrap(), summoner_v4::by_account_id("acc"));

        let query = SummonerQuery {
            puuid: Some("pu".to_string()),
            name: Some("name".to_string()),
            ..Default::default()
        };
        assert_eq!(query.path().unwrap(), summoner_v4::by_puuid("pu"));

        assert_eq!(
            SummonerQuery::by_name("Faker").path().unwrap(),
            summoner_v4::by_name("Faker")
        );
    }

    #[test]
    fn empty_summoner_query_is_rejected() {
        let query = SummonerQuery {
            name: Some("  ".to_string()),
            ..Default::default()
        };

        assert!(matches!(query.path(), Err(AppError::InvalidArgument(_))));
    }

    #[test]
    fn cache_key_keeps_absent_params_distinct() {
        let by_id = SummonerQuery::by_id("x").cache_key(Region::Euw);
        let by_name = SummonerQuery::by_name("x").cache_key(Region::Euw);
        let other_region = SummonerQuery::by_id("x").cache_key(Region::Na);

        assert_ne!(by_id, by_name);
        assert_ne!(by_id, other_region);
        assert_eq!(by_id, SummonerQuery::by_id("x").cache_key(Region::Euw));
    }

    #[test]
    fn upstream_message_prefers_status_message() {
        let body = json!({"status": {"message": "Data not found", "status_code": 404}});
        assert_eq!(upstream_message(&body), "Data not found");
        assert_eq!(upstream_message(&Value::Null), "no response body");
    }
}
