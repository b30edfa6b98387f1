use super::{
    Ban, LeagueEntry, LeagueItem, LeagueListing, MatchInfo, MatchParticipant, MatchTeam,
    MiniSeries, Objective, StatPerk, StylePerk, SummonerProfile, TableDef, TimelineEvent,
    TimelineParticipantFrame,
};
use crate::error::AppError;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Summoner,
    LeagueEntry,
    MiniSeries,
    LeagueListing,
    LeagueItem,
    Match,
    Participant,
    StatPerk,
    StylePerk,
    Team,
    Objective,
    Ban,
    ParticipantFrame,
    Event,
}

impl EntityKind {
    /// Every kind, parents before the children that reference them.
    pub const ALL: [EntityKind; 14] = [
        EntityKind::Summoner,
        EntityKind::LeagueEntry,
        EntityKind::MiniSeries,
        EntityKind::LeagueListing,
        EntityKind::LeagueItem,
        EntityKind::Match,
        EntityKind::Participant,
        EntityKind::StatPerk,
        EntityKind::StylePerk,
        EntityKind::Team,
        EntityKind::Objective,
        EntityKind::Ban,
        EntityKind::ParticipantFrame,
        EntityKind::Event,
    ];

    pub fn table(&self) -> TableDef {
        match self {
            EntityKind::Summoner => SummonerProfile::TABLE,
            EntityKind::LeagueEntry => LeagueEntry::TABLE,
            EntityKind::MiniSeries => MiniSeries::TABLE,
            EntityKind::LeagueListing => LeagueListing::TABLE,
            EntityKind::LeagueItem => LeagueItem::TABLE,
            EntityKind::Match => MatchInfo::TABLE,
            EntityKind::Participant => MatchParticipant::TABLE,
            EntityKind::StatPerk => StatPerk::TABLE,
            EntityKind::StylePerk => StylePerk::TABLE,
            EntityKind::Team => MatchTeam::TABLE,
            EntityKind::Objective => Objective::TABLE,
            EntityKind::Ban => Ban::TABLE,
            EntityKind::ParticipantFrame => TimelineParticipantFrame::TABLE,
            EntityKind::Event => TimelineEvent::TABLE,
        }
    }
}

/// One flat record borrowed out of an entity graph.
#[derive(Debug, Clone, Copy)]
pub enum Record<'a> {
    Summoner(&'a SummonerProfile),
    LeagueEntry(&'a LeagueEntry),
    MiniSeries(&'a MiniSeries),
    LeagueListing(&'a LeagueListing),
    LeagueItem(&'a LeagueItem),
    Match(&'a MatchInfo),
    Participant(&'a MatchParticipant),
    StatPerk(&'a StatPerk),
    StylePerk(&'a StylePerk),
    Team(&'a MatchTeam),
    Objective(&'a Objective),
    Ban(&'a Ban),
    ParticipantFrame(&'a TimelineParticipantFrame),
    Event(&'a TimelineEvent),
}

impl Record<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Summoner(_) => EntityKind::Summoner,
            Record::LeagueEntry(_) => EntityKind::LeagueEntry,
            Record::MiniSeries(_) => EntityKind::MiniSeries,
            Record::LeagueListing(_) => EntityKind::LeagueListing,
            Record::LeagueItem(_) => EntityKind::LeagueItem,
            Record::Match(_) => EntityKind::Match,
            Record::Participant(_) => EntityKind::Participant,
            Record::StatPerk(_) => EntityKind::StatPerk,
            Record::StylePerk(_) => EntityKind::StylePerk,
            Record::Team(_) => EntityKind::Team,
            Record::Objective(_) => EntityKind::Objective,
            Record::Ban(_) => EntityKind::Ban,
            Record::ParticipantFrame(_) => EntityKind::ParticipantFrame,
            Record::Event(_) => EntityKind::Event,
        }
    }

    /// Serialized form keyed by column name. Child collections come along
    /// but are not columns, so the store ignores them.
    pub fn to_row(&self) -> Result<Map<String, Value>, AppError> {
        let value = match self {
            Record::Summoner(r) => serde_json::to_value(r),
            Record::LeagueEntry(r) => serde_json::to_value(r),
            Record::MiniSeries(r) => serde_json::to_value(r),
            Record::LeagueListing(r) => serde_json::to_value(r),
            Record::LeagueItem(r) => serde_json::to_value(r),
            Record::Match(r) => serde_json::to_value(r),
            Record::Participant(r) => serde_json::to_value(r),
            Record::StatPerk(r) => serde_json::to_value(r),
            Record::StylePerk(r) => serde_json::to_value(r),
            Record::Team(r) => serde_json::to_value(r),
            Record::Objective(r) => serde_json::to_value(r),
            Record::Ban(r) => serde_json::to_value(r),
            Record::ParticipantFrame(r) => serde_json::to_value(r),
            Record::Event(r) => serde_json::to_value(r),
        }
        .map_err(|e| AppError::JsonError(e.to_string()))?;

        match value {
            Value::Object(map) => Ok(map),
            _ => Err(AppError::JsonError(format!(
                "{} did not serialize to an object",
                self.kind().table().name
            ))),
        }
    }
}

/// Explicit walk of an entity graph into persistable records, parents first.
pub trait Flatten {
    fn records(&self) -> Vec<Record<'_>>;
}

impl Flatten for SummonerProfile {
    fn records(&self) -> Vec<Record<'_>> {
        vec![Record::Summoner(self)]
    }
}

impl Flatten for LeagueEntry {
    fn records(&self) -> Vec<Record<'_>> {
        let mut out = vec![Record::LeagueEntry(self)];
        out.extend(self.mini_series.iter().map(Record::MiniSeries));
        out
    }
}

impl Flatten for LeagueItem {
    fn records(&self) -> Vec<Record<'_>> {
        let mut out = vec![Record::LeagueItem(self)];
        out.extend(self.mini_series.iter().map(Record::MiniSeries));
        out
    }
}

impl Flatten for LeagueListing {
    fn records(&self) -> Vec<Record<'_>> {
        let mut out = vec![Record::LeagueListing(self)];
        for item in &self.entries {
            out.extend(item.records());
        }
        out
    }
}

impl Flatten for MatchParticipant {
    fn records(&self) -> Vec<Record<'_>> {
        let mut out = vec![Record::Participant(self)];
        out.extend(self.stat_perks.iter().map(Record::StatPerk));
        out.extend(self.style_perks.iter().map(Record::StylePerk));
        out
    }
}

impl Flatten for MatchTeam {
    fn records(&self) -> Vec<Record<'_>> {
        let mut out = vec![Record::Team(self)];
        out.extend(self.objectives.iter().map(Record::Objective));
        out.extend(self.bans.iter().map(Record::Ban));
        out
    }
}

impl Flatten for MatchInfo {
    fn records(&self) -> Vec<Record<'_>> {
        let mut out = vec![Record::Match(self)];
        for participant in &self.participants {
            out.extend(participant.records());
        }
        for team in &self.teams {
            out.extend(team.records());
        }
        out.extend(self.timeline_participants.iter().map(Record::ParticipantFrame));
        out.extend(self.timeline_events.iter().map(Record::Event));
        out
    }
}

macro_rules! leaf {
    ($($ty:ident => $variant:ident),+ $(,)?) => {
        $(impl Flatten for $ty {
            fn records(&self) -> Vec<Record<'_>> {
                vec![Record::$variant(self)]
            }
        })+
    };
}

leaf! {
    MiniSeries => MiniSeries,
    StatPerk => StatPerk,
    StylePerk => StylePerk,
    Objective => Objective,
    Ban => Ban,
    TimelineParticipantFrame => ParticipantFrame,
    TimelineEvent => Event,
}

impl<T: Flatten> Flatten for [T] {
    fn records(&self) -> Vec<Record<'_>> {
        self.iter().flat_map(Flatten::records).collect()
    }
}

impl<T: Flatten> Flatten for Vec<T> {
    fn records(&self) -> Vec<Record<'_>> {
        self.as_slice().records()
    }
}
