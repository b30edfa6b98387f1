use super::{expect_array, expect_object, inject, take_array, take_optional};
use crate::api::endpoints::Region;
use crate::error::AppError;
use crate::model::{Fields, LeagueEntry, LeagueItem, LeagueListing, MiniSeries};
use serde_json::Value;

/// League-v4 entries response (a sequence of standings) → entries.
///
/// An entry carrying a promotion series yields both the entry and its
/// [`MiniSeries`]; neither is ever dropped.
pub fn league_entries(value: Value, region: Region) -> Result<Vec<LeagueEntry>, AppError> {
    expect_array("league_entry", "response", value)?
        .into_iter()
        .map(|entry| league_entry(entry, region))
        .collect()
}

/// Ladder or league-by-id response → listing with its ordered items.
pub fn league_listing(value: Value, region: Region) -> Result<LeagueListing, AppError> {
    let mut map = expect_object("league_list", "response", value)?;
    let entries = take_array(&mut map, "league_list", "entries")?;
    inject(&mut map, [("region", Value::from(region.label()))]);

    let mut listing = LeagueListing::from_fields(&Fields::new("league_list", &map))?;
    listing.entries = entries
        .into_iter()
        .map(|item| league_item(item, &listing.region, &listing.league_id))
        .collect::<Result<_, _>>()?;

    Ok(listing)
}

fn league_entry(value: Value, region: Region) -> Result<LeagueEntry, AppError> {
    let mut map = expect_object("league_entry", "entries[]", value)?;
    let series = take_optional(&mut map, "mini_series");
    inject(&mut map, [("region", Value::from(region.label()))]);

    let mut entry = LeagueEntry::from_fields(&Fields::new("league_entry", &map))?;
    entry.mini_series = series
        .map(|s| mini_series(s, &entry.region, &entry.summoner_id, &entry.league_id))
        .transpose()?;

    Ok(entry)
}

fn league_item(value: Value, region: &str, league_id: &str) -> Result<LeagueItem, AppError> {
    let mut map = expect_object("league_item", "entries[]", value)?;
    let series = take_optional(&mut map, "mini_series");
    inject(
        &mut map,
        [
            ("region", Value::from(region)),
            ("league_id", Value::from(league_id)),
        ],
    );

    let mut item = LeagueItem::from_fields(&Fields::new("league_item", &map))?;
    item.mini_series = series
        .map(|s| mini_series(s, &item.region, &item.summoner_id, &item.league_id))
        .transpose()?;

    Ok(item)
}

fn mini_series(
    value: Value,
    region: &str,
    summoner_id: &str,
    league_id: &str,
) -> Result<MiniSeries, AppError> {
    let mut map = expect_object("mini_series", "mini_series", value)?;
    inject(
        &mut map,
        [
            ("region", Value::from(region)),
            ("summoner_id", Value::from(summoner_id)),
            ("league_id", Value::from(league_id)),
        ],
    );

    MiniSeries::from_fields(&Fields::new("mini_series", &map))
}
