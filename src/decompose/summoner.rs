use super::{expect_object, inject, rename};
use crate::api::endpoints::Region;
use crate::error::AppError;
use crate::model::{Fields, SummonerProfile};
use serde_json::Value;

const ENTITY: &str = "summoner";

/// Summoner-v4 payload → profile. The region is not part of the payload and
/// comes from the caller.
pub fn summoner(value: Value, region: Region) -> Result<SummonerProfile, AppError> {
    let mut map = expect_object(ENTITY, "response", value)?;

    rename(&mut map, ENTITY, "id", "summoner_id")?;
    rename(&mut map, ENTITY, "name", "summoner_name")?;
    inject(&mut map, [("region", Value::from(region.label()))]);

    SummonerProfile::from_fields(&Fields::new(ENTITY, &map))
}
