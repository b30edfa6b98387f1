use chrono::{DateTime, Utc};

entity! {
    /// Summoner identity as returned by Summoner-v4, tagged with the region it was looked up in.
    pub struct SummonerProfile in "summoner" {
        key {
            region: String,
            summoner_id: String,
        }
        fields {
            account_id: String,
            puuid: String,
            summoner_name: String,
            profile_icon_id: i64,
            revision_date: DateTime<Utc>,
            summoner_level: i64,
        }
    }
}
