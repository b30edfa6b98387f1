entity! {
    /// Promotion series in progress. Only ever exists inside its owning entry or item.
    pub struct MiniSeries in "mini_series" {
        key {
            region: String,
            summoner_id: String,
            league_id: String,
        }
        fields {
            wins: i64,
            losses: i64,
            target: i64,
            progress: String,
        }
    }
}

entity! {
    /// One ranked standing of a summoner.
    pub struct LeagueEntry in "league_entry" {
        key {
            region: String,
            summoner_id: String,
            league_id: String,
        }
        fields {
            queue_type: String,
            summoner_name: String,
            tier: String,
            rank: String,
            league_points: i64,
            wins: i64,
            losses: i64,
            hot_streak: bool,
            veteran: bool,
            fresh_blood: bool,
            inactive: bool,
        }
        children {
            mini_series: Option<MiniSeries>,
        }
    }
}

entity! {
    /// Apex-tier ladder snapshot (challenger, grandmaster, master) or a league looked up by id.
    pub struct LeagueListing in "league_list" {
        key {
            region: String,
            league_id: String,
        }
        fields {
            tier: String,
            name: String,
            queue: String,
        }
        children {
            entries: Vec<LeagueItem>,
        }
    }
}

entity! {
    pub struct LeagueItem in "league_item" references "league_list" (region, league_id) {
        key {
            region: String,
            league_id: String,
            summoner_id: String,
        }
        fields {
            summoner_name: String,
            league_points: i64,
            wins: i64,
            losses: i64,
            rank: String,
            hot_streak: bool,
            veteran: bool,
            fresh_blood: bool,
            inactive: bool,
        }
        children {
            mini_series: Option<MiniSeries>,
        }
    }
}
