//! Endpoint templates and the closed enumerations used to fill them.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Platform a summoner plays on. League and summoner endpoints live on the
/// platform host, match endpoints on the regional route of the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Br,
    Eune,
    Euw,
    Jp,
    Kr,
    Lan,
    Las,
    Me,
    Na,
    Oce,
    Ph,
    Ru,
    Sg,
    Th,
    Tr,
    Tw,
    Vn,
}

/// Regional routing values (Match-v5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionalRoute {
    Americas,
    Asia,
    Europe,
    Sea,
}

impl Region {
    /// Label stored on every region-scoped record.
    pub fn label(&self) -> &'static str {
        match self {
            Region::Br => "BR",
            Region::Eune => "EUNE",
            Region::Euw => "EUW",
            Region::Jp => "JP",
            Region::Kr => "KR",
            Region::Lan => "LAN",
            Region::Las => "LAS",
            Region::Me => "ME",
            Region::Na => "NA",
            Region::Oce => "OCE",
            Region::Ph => "PH",
            Region::Ru => "RU",
            Region::Sg => "SG",
            Region::Th => "TH",
            Region::Tr => "TR",
            Region::Tw => "TW",
            Region::Vn => "VN",
        }
    }

    pub fn platform(&self) -> &'static str {
        match self {
            Region::Br => "br1",
            Region::Eune => "eun1",
            Region::Euw => "euw1",
            Region::Jp => "jp1",
            Region::Kr => "kr",
            Region::Lan => "la1",
            Region::Las => "la2",
            Region::Me => "me1",
            Region::Na => "na1",
            Region::Oce => "oc1",
            Region::Ph => "ph2",
            Region::Ru => "ru",
            Region::Sg => "sg2",
            Region::Th => "th2",
            Region::Tr => "tr1",
            Region::Tw => "tw2",
            Region::Vn => "vn2",
        }
    }

    pub fn route(&self) -> RegionalRoute {
        match self {
            Region::Br | Region::Lan | Region::Las | Region::Na => RegionalRoute::Americas,
            Region::Jp | Region::Kr => RegionalRoute::Asia,
            Region::Eune | Region::Euw | Region::Me | Region::Ru | Region::Tr => {
                RegionalRoute::Europe
            }
            Region::Oce | Region::Ph | Region::Sg | Region::Th | Region::Tw | Region::Vn => {
                RegionalRoute::Sea
            }
        }
    }

    pub fn platform_host(&self) -> String {
        format!("{}.api.riotgames.com", self.platform())
    }

    pub fn regional_host(&self) -> String {
        format!("{}.api.riotgames.com", self.route().as_str())
    }
}

impl RegionalRoute {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionalRoute::Americas => "americas",
            RegionalRoute::Asia => "asia",
            RegionalRoute::Europe => "europe",
            RegionalRoute::Sea => "sea",
        }
    }
}

impl FromStr for Region {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BR" | "BR1" => Ok(Region::Br),
            "EUNE" | "EUN1" => Ok(Region::Eune),
            "EUW" | "EUW1" => Ok(Region::Euw),
            "JP" | "JP1" => Ok(Region::Jp),
            "KR" => Ok(Region::Kr),
            "LAN" | "LA1" => Ok(Region::Lan),
            "LAS" | "LA2" => Ok(Region::Las),
            "ME" | "ME1" => Ok(Region::Me),
            "NA" | "NA1" => Ok(Region::Na),
            "OCE" | "OC1" => Ok(Region::Oce),
            "PH" | "PH2" => Ok(Region::Ph),
            "RU" => Ok(Region::Ru),
            "SG" | "SG2" => Ok(Region::Sg),
            "TH" | "TH2" => Ok(Region::Th),
            "TR" | "TR1" => Ok(Region::Tr),
            "TW" | "TW2" => Ok(Region::Tw),
            "VN" | "VN2" => Ok(Region::Vn),
            _ => Err(AppError::InvalidArgument(format!("unknown region: {}", s))),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Queue kinds understood by the ladder and match-listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Queue {
    RankedSolo,
    RankedFlex,
    NormalDraft,
    NormalBlind,
}

impl Queue {
    /// Upstream queue code for league endpoints. Only ranked queues have ladders.
    pub fn ladder_code(&self) -> Option<&'static str> {
        match self {
            Queue::RankedSolo => Some("RANKED_SOLO_5x5"),
            Queue::RankedFlex => Some("RANKED_FLEX_SR"),
            Queue::NormalDraft | Queue::NormalBlind => None,
        }
    }

    /// `(type, queue)` query parameters of the match-listing endpoint.
    pub fn match_filter(&self) -> (&'static str, u16) {
        match self {
            Queue::RankedSolo => ("ranked", 420),
            Queue::RankedFlex => ("ranked", 440),
            Queue::NormalDraft => ("normal", 400),
            Queue::NormalBlind => ("normal", 430),
        }
    }

    pub(crate) fn require_ladder_code(&self) -> Result<&'static str, AppError> {
        self.ladder_code().ok_or_else(|| {
            AppError::InvalidArgument(format!("{:?} has no ranked ladder", self))
        })
    }
}

impl FromStr for Queue {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "solo" | "ranked_solo_5x5" => Ok(Queue::RankedSolo),
            "flex" | "ranked_flex_sr" => Ok(Queue::RankedFlex),
            "draft" => Ok(Queue::NormalDraft),
            "blind" => Ok(Queue::NormalBlind),
            _ => Err(AppError::InvalidArgument(format!("unknown queue: {}", s))),
        }
    }
}

/// Tiers reachable through the paged entries endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Iron => "IRON",
            Tier::Bronze => "BRONZE",
            Tier::Silver => "SILVER",
            Tier::Gold => "GOLD",
            Tier::Platinum => "PLATINUM",
            Tier::Emerald => "EMERALD",
            Tier::Diamond => "DIAMOND",
        }
    }
}

impl FromStr for Tier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "IRON" => Ok(Tier::Iron),
            "BRONZE" => Ok(Tier::Bronze),
            "SILVER" => Ok(Tier::Silver),
            "GOLD" => Ok(Tier::Gold),
            "PLATINUM" => Ok(Tier::Platinum),
            "EMERALD" => Ok(Tier::Emerald),
            "DIAMOND" => Ok(Tier::Diamond),
            _ => Err(AppError::InvalidArgument(format!("unknown tier: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Division {
    I,
    II,
    III,
    IV,
}

impl Division {
    pub fn as_str(&self) -> &'static str {
        match self {
            Division::I => "I",
            Division::II => "II",
            Division::III => "III",
            Division::IV => "IV",
        }
    }
}

impl FromStr for Division {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "I" | "1" => Ok(Division::I),
            "II" | "2" => Ok(Division::II),
            "III" | "3" => Ok(Division::III),
            "IV" | "4" => Ok(Division::IV),
            _ => Err(AppError::InvalidArgument(format!("unknown division: {}", s))),
        }
    }
}

pub mod summoner_v4 {
    pub fn by_name(name: &str) -> String {
        format!("/lol/summoner/v4/summoners/by-name/{}", name)
    }

    pub fn by_id(summoner_id: &str) -> String {
        format!("/lol/summoner/v4/summoners/{}", summoner_id)
    }

    pub fn by_account_id(account_id: &str) -> String {
        format!("/lol/summoner/v4/summoners/by-account/{}", account_id)
    }

    pub fn by_puuid(puuid: &str) -> String {
        format!("/lol/summoner/v4/summoners/by-puuid/{}", puuid)
    }
}

pub mod league_v4 {
    pub fn challenger_league_by_queue(queue: &str) -> String {
        format!("/lol/league/v4/challengerleagues/by-queue/{}", queue)
    }

    pub fn grandmaster_league_by_queue(queue: &str) -> String {
        format!("/lol/league/v4/grandmasterleagues/by-queue/{}", queue)
    }

    pub fn master_league_by_queue(queue: &str) -> String {
        format!("/lol/league/v4/masterleagues/by-queue/{}", queue)
    }

    pub fn entries_by_summoner_id(summoner_id: &str) -> String {
        format!("/lol/league/v4/entries/by-summoner/{}", summoner_id)
    }

    pub fn entries(queue: &str, tier: &str, division: &str, page: u32) -> String {
        format!(
            "/lol/league/v4/entries/{}/{}/{}?page={}",
            queue, tier, division, page
        )
    }

    pub fn league_by_id(league_id: &str) -> String {
        format!("/lol/league/v4/leagues/{}", league_id)
    }
}

pub mod match_v5 {
    pub fn by_id(match_id: &str) -> String {
        format!("/lol/match/v5/matches/{}", match_id)
    }

    pub fn timeline_by_id(match_id: &str) -> String {
        format!("/lol/match/v5/matches/{}/timeline", match_id)
    }

    pub fn ids_by_puuid(puuid: &str, query: &str) -> String {
        if query.is_empty() {
            format!("/lol/match/v5/matches/by-puuid/{}/ids", puuid)
        } else {
            format!("/lol/match/v5/matches/by-puuid/{}/ids?{}", puuid, query)
        }
    }
}

/// Optional filters of the match-listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchIdsFilter {
    pub count: Option<u32>,
    pub start: Option<u32>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub queue: Option<Queue>,
}

impl MatchIdsFilter {
    pub const MAX_COUNT: u32 = 100;

    pub fn query_string(&self) -> String {
        let mut params: Vec<String> = Vec::new();

        if let Some(count) = self.count {
            params.push(format!("count={}", count));
        }
        if let Some(start) = self.start {
            params.push(format!("start={}", start));
        }
        if let Some(start_time) = self.start_time {
            params.push(format!("startTime={}", start_time.timestamp()));
        }
        if let Some(end_time) = self.end_time {
            params.push(format!("endTime={}", end_time.timestamp()));
        }
        if let Some(queue) = self.queue {
            let (kind, id) = queue.match_filter();
            params.push(format!("type={}", kind));
            params.push(format!("queue={}", id));
        }

        params.join("&")
    }

    pub(crate) fn validate(&self) -> Result<(), AppError> {
        match self.count {
            Some(count) if count > Self::MAX_COUNT => Err(AppError::InvalidArgument(format!(
                "count must be at most {}, got {}",
                Self::MAX_COUNT,
                count
            ))),
            _ => Ok(()),
        }
    }
}
