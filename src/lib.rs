//! Client for the League of Legends web API that turns nested responses into
//! a flat, foreign-key-linked entity graph and stores it in SQLite.
//!
//! ```no_run
//! use league_ingest::api::{client::SummonerQuery, endpoints::Region, RiotApiClient};
//! use league_ingest::config::Config;
//! use league_ingest::store::Database;
//!
//! # fn main() -> Result<(), league_ingest::error::AppError> {
//! let client = RiotApiClient::new(Config::from_env()?);
//! let summoner = client.get_summoner(Region::Euw, &SummonerQuery::by_name("Caps"))?;
//!
//! let mut db = Database::open("league.db")?;
//! db.create_schema(false)?;
//! db.merge(&summoner)?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod decompose;
pub mod error;
pub mod logging;
pub mod model;
pub mod rate_limit;
pub mod store;
