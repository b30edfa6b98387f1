#![allow(dead_code)]

use league_ingest::api::{RequestContext, Transport, TransportResponse};
use league_ingest::config::Config;
use league_ingest::error::AppError;
use league_ingest::model::{MatchParticipant, TimelineParticipantFrame};
use serde_json::{json, Map, Value};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// One GET as seen by the stub.
#[derive(Debug, Clone)]
pub struct Call {
    pub url: String,
    pub api_key: String,
}

/// Replays canned responses in order and records every call.
#[derive(Default)]
pub struct StubTransport {
    responses: Mutex<VecDeque<TransportResponse>>,
    calls: Mutex<Vec<Call>>,
}

impl StubTransport {
    pub fn new(responses: Vec<(u16, Value)>) -> Self {
        StubTransport {
            responses: Mutex::new(
                responses
                    .into_iter()
                    .map(|(status, body)| TransportResponse { status, body })
                    .collect(),
            ),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn ok(bodies: Vec<Value>) -> Self {
        Self::new(bodies.into_iter().map(|body| (200, body)).collect())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Transport for StubTransport {
    fn get(&self, url: &str, context: &RequestContext) -> Result<TransportResponse, AppError> {
        self.calls.lock().unwrap().push(Call {
            url: url.to_string(),
            api_key: context.api_key().to_string(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AppError::HttpError("no stubbed response left".to_string()))
    }
}

/// Test configuration: no retry pause, default caches.
pub fn config() -> Config {
    let mut config = Config::new("RGAPI-test");
    config.retry_after = Duration::ZERO;
    config
}

/// `summoner_id` → `summonerId`, the inverse of the key normalizer.
pub fn camel(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper = false;
    for c in snake.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

pub fn summoner_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "accountId": format!("acc-{}", id),
        "puuid": format!("puuid-{}", id),
        "name": name,
        "profileIconId": 4568,
        "revisionDate": 1_700_000_000_000_i64,
        "summonerLevel": 421
    })
}

pub fn league_entry_json(summoner_id: &str, with_series: bool) -> Value {
    let mut entry = json!({
        "leagueId": "league-1",
        "queueType": "RANKED_SOLO_5x5",
        "tier": "PLATINUM",
        "rank": "I",
        "summonerId": summoner_id,
        "summonerName": "Player",
        "leaguePoints": 100,
        "wins": 30,
        "losses": 25,
        "veteran": false,
        "inactive": false,
        "freshBlood": false,
        "hotStreak": true
    });
    if with_series {
        entry["miniSeries"] = json!({"target": 3, "wins": 1, "losses": 0, "progress": "WNNNN"});
    }
    entry
}

pub fn listing_json(league_id: &str, tier: &str, players: usize) -> Value {
    let entries: Vec<Value> = (0..players)
        .map(|i| {
            json!({
                "summonerId": format!("s{}", i),
                "summonerName": format!("Player {}", i),
                "leaguePoints": 1000 - i as i64,
                "rank": "I",
                "wins": 200,
                "losses": 150,
                "veteran": true,
                "inactive": false,
                "freshBlood": false,
                "hotStreak": false
            })
        })
        .collect();

    json!({
        "tier": tier,
        "leagueId": league_id,
        "queue": "RANKED_SOLO_5x5",
        "name": "Zed's Duelists",
        "entries": entries
    })
}

fn perks_json() -> Value {
    json!({
        "statPerks": {"defense": 5002, "flex": 5008, "offense": 5005},
        "styles": [
            {
                "description": "primaryStyle",
                "style": 8100,
                "selections": [
                    {"perk": 8112, "var1": 1, "var2": 0, "var3": 0},
                    {"perk": 8139, "var1": 2, "var2": 0, "var3": 0},
                    {"perk": 8138, "var1": 3, "var2": 0, "var3": 0},
                    {"perk": 8135, "var1": 4, "var2": 0, "var3": 0}
                ]
            },
            {
                "description": "subStyle",
                "style": 8300,
                "selections": [
                    {"perk": 8345, "var1": 3, "var2": 0, "var3": 0},
                    {"perk": 8347, "var1": 0, "var2": 0, "var3": 0}
                ]
            }
        ]
    })
}

/// Every participant column filled with a plausible value, keyed the way
/// the upstream API spells it.
pub fn participant_json(participant_id: i64, team_id: i64) -> Value {
    let mut map = Map::new();
    for column in MatchParticipant::TABLE.columns {
        if column.name == "game_id" {
            continue;
        }
        let value = match column.sql_type {
            "INTEGER" => json!(participant_id * 10),
            "REAL" => json!(0.5),
            "BOOLEAN" => json!(false),
            _ => json!(format!("{}-{}", column.name, participant_id)),
        };
        map.insert(camel(column.name), value);
    }

    map.insert("participantId".to_string(), json!(participant_id));
    map.insert("teamId".to_string(), json!(team_id));
    map.insert("puuid".to_string(), json!(format!("puuid-p{}", participant_id)));
    map.insert("win".to_string(), json!(team_id == 100));
    map.insert("perks".to_string(), perks_json());
    Value::Object(map)
}

fn team_json(team_id: i64) -> Value {
    let first_pick = if team_id == 100 { 1 } else { 6 };
    let bans: Vec<Value> = (0..5)
        .map(|i| json!({"championId": 100 + first_pick + i, "pickTurn": first_pick + i}))
        .collect();
    let won = team_id == 100;
    let barons = if won { 2 } else { 0 };

    json!({
        "teamId": team_id,
        "win": won,
        "bans": bans,
        "objectives": {
            "baron": {"first": won, "kills": barons},
            "champion": {"first": won, "kills": 30},
            "dragon": {"first": !won, "kills": 3},
            "inhibitor": {"first": won, "kills": 1},
            "riftHerald": {"first": won, "kills": 1},
            "tower": {"first": won, "kills": 9}
        }
    })
}

pub fn match_json(game_id: i64) -> Value {
    let participants: Vec<Value> = (1..=10)
        .map(|id| participant_json(id, if id <= 5 { 100 } else { 200 }))
        .collect();

    json!({
        "metadata": {
            "dataVersion": "2",
            "matchId": format!("EUW1_{}", game_id),
            "participants": (1..=10).map(|id| format!("puuid-p{}", id)).collect::<Vec<_>>()
        },
        "info": {
            "gameId": game_id,
            "platformId": "EUW1",
            "gameCreation": 1_700_000_000_000_i64,
            "gameDuration": 1834,
            "gameStartTimestamp": 1_700_000_030_000_i64,
            "gameEndTimestamp": 1_700_001_864_000_i64,
            "gameMode": "CLASSIC",
            "gameName": "teambuilder-match-1",
            "gameType": "MATCHED_GAME",
            "gameVersion": "13.22.545.1783",
            "mapId": 11,
            "queueId": 420,
            "participants": participants,
            "teams": [team_json(100), team_json(200)]
        }
    })
}

fn participant_frame_json(participant_id: i64, seed: i64) -> Value {
    let mut champion_stats = Map::new();
    let mut top_level = Map::new();
    for column in TimelineParticipantFrame::TABLE.columns {
        match column.name {
            "game_id" | "participant_id" | "timestamp" | "x" | "y" => {}
            "current_gold" | "total_gold" | "xp" | "level" => {
                top_level.insert(camel(column.name), json!(seed));
            }
            name => {
                champion_stats.insert(camel(name), json!(seed));
            }
        }
    }

    top_level.insert("participantId".to_string(), json!(participant_id));
    top_level.insert("championStats".to_string(), Value::Object(champion_stats));
    top_level.insert("damageStats".to_string(), json!({}));
    top_level.insert("position".to_string(), json!({"x": 500 + seed, "y": 700 + seed}));
    Value::Object(top_level)
}

/// Two frames of ten participants; events cover every owner source and one
/// kind the decomposer does not know.
pub fn timeline_json(game_id: i64) -> Value {
    let frame = |timestamp: i64, events: Value| {
        let participant_frames: Map<String, Value> = (1..=10)
            .map(|id| (id.to_string(), participant_frame_json(id, timestamp / 1000)))
            .collect();
        json!({
            "timestamp": timestamp,
            "participantFrames": participant_frames,
            "events": events
        })
    };

    json!({
        "metadata": {"matchId": format!("EUW1_{}", game_id)},
        "info": {
            "frameInterval": 60000,
            "gameId": game_id,
            "frames": [
                frame(0, json!([
                    {"type": "PAUSE_END", "timestamp": 0, "realTimestamp": 1_700_000_030_000_i64},
                    {"type": "ITEM_PURCHASED", "timestamp": 2100, "participantId": 4, "itemId": 1055},
                    {"type": "FEAT_UPDATE", "timestamp": 2500, "featType": 1}
                ])),
                frame(60000, json!([
                    {"type": "WARD_PLACED", "timestamp": 61000, "creatorId": 7, "wardType": "YELLOW_TRINKET"},
                    {"type": "CHAMPION_KILL", "timestamp": 62000, "killerId": 2, "victimId": 8, "assistingParticipantIds": [1]},
                    {"type": "ELITE_MONSTER_KILL", "timestamp": 62000, "killerId": 2, "monsterType": "DRAGON"}
                ]))
            ]
        }
    })
}
