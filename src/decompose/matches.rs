use super::{expect_array, expect_object, inject, take_array, take_object};
use crate::error::AppError;
use crate::model::{
    Ban, Fields, MatchInfo, MatchParticipant, MatchTeam, Objective, StatPerk, StylePerk,
};
use serde_json::{Map, Value};

/// Match-v5 payload (and optionally its timeline) → match with every child
/// collection filled in.
pub fn match_info(value: Value, timeline: Option<Value>) -> Result<MatchInfo, AppError> {
    let mut response = expect_object("match", "response", value)?;
    let mut info = take_object(&mut response, "match", "info")?;
    let participants = take_array(&mut info, "match", "participants")?;
    let teams = take_array(&mut info, "match", "teams")?;

    let mut game = MatchInfo::from_fields(&Fields::new("match", &info))?;
    let game_id = game.game_id;

    game.participants = participants
        .into_iter()
        .map(|p| participant(p, game_id))
        .collect::<Result<_, _>>()?;
    game.teams = teams
        .into_iter()
        .map(|t| team(t, game_id))
        .collect::<Result<_, _>>()?;

    if let Some(timeline) = timeline {
        let (frames, events) = super::timeline(timeline, game_id)?;
        game.timeline_participants = frames;
        game.timeline_events = events;
    }

    Ok(game)
}

/// Match-ids response → ids in upstream order.
pub fn match_ids(value: Value) -> Result<Vec<String>, AppError> {
    expect_array("match_ids", "response", value)?
        .into_iter()
        .map(|id| match id {
            Value::String(id) => Ok(id),
            _ => Err(AppError::InvalidField {
                entity: "match_ids",
                field: "response[]".to_string(),
                expected: "string",
            }),
        })
        .collect()
}

fn participant(value: Value, game_id: i64) -> Result<MatchParticipant, AppError> {
    let mut map = expect_object("participant", "participants[]", value)?;
    let perks = take_object(&mut map, "participant", "perks")?;
    inject(&mut map, [("game_id", Value::from(game_id))]);

    let mut participant = MatchParticipant::from_fields(&Fields::new("participant", &map))?;
    let owner = (participant.game_id, participant.participant_id, participant.team_id);
    let (stat_perk, style_perks) = perks_of(perks, owner)?;
    participant.stat_perks = vec![stat_perk];
    participant.style_perks = style_perks;

    Ok(participant)
}

/// `owner` is the participant's (game_id, participant_id, team_id).
fn perks_of(
    mut perks: Map<String, Value>,
    owner: (i64, i64, i64),
) -> Result<(StatPerk, Vec<StylePerk>), AppError> {
    let (game_id, participant_id, team_id) = owner;
    let owner_keys = || {
        [
            ("game_id", Value::from(game_id)),
            ("participant_id", Value::from(participant_id)),
            ("team_id", Value::from(team_id)),
        ]
    };

    let mut stats = take_object(&mut perks, "perks", "stat_perks")?;
    inject(&mut stats, owner_keys());
    let stat_perk = StatPerk::from_fields(&Fields::new("stat_perk", &stats))?;

    let mut style_perks = Vec::new();
    for style in take_array(&mut perks, "perks", "styles")? {
        let mut style = expect_object("perk_style", "styles[]", style)?;
        let selections = take_array(&mut style, "perk_style", "selections")?;
        let (description, style_id) = {
            let fields = Fields::new("perk_style", &style);
            (fields.get::<String>("description")?, fields.get::<i64>("style")?)
        };

        for selection in selections {
            let mut selection = expect_object("style_perk", "selections[]", selection)?;
            inject(&mut selection, owner_keys());
            inject(
                &mut selection,
                [
                    ("style", Value::from(style_id)),
                    ("description", Value::from(description.as_str())),
                ],
            );
            style_perks.push(StylePerk::from_fields(&Fields::new(
                "style_perk",
                &selection,
            ))?);
        }
    }

    Ok((stat_perk, style_perks))
}

fn team(value: Value, game_id: i64) -> Result<MatchTeam, AppError> {
    let mut map = expect_object("team", "teams[]", value)?;
    let bans = take_array(&mut map, "team", "bans")?;
    let objectives = take_object(&mut map, "team", "objectives")?;
    inject(&mut map, [("game_id", Value::from(game_id))]);

    let mut team = MatchTeam::from_fields(&Fields::new("team", &map))?;
    let team_keys = || {
        [
            ("game_id", Value::from(team.game_id)),
            ("team_id", Value::from(team.team_id)),
        ]
    };

    let mut team_bans = Vec::with_capacity(bans.len());
    for ban in bans {
        let mut ban = expect_object("ban", "bans[]", ban)?;
        inject(&mut ban, team_keys());
        team_bans.push(Ban::from_fields(&Fields::new("ban", &ban))?);
    }

    let mut team_objectives = Vec::with_capacity(objectives.len());
    for (name, objective) in objectives {
        let mut objective = expect_object("objective", &name, objective)?;
        inject(&mut objective, team_keys());
        inject(&mut objective, [("objective", Value::from(name))]);
        team_objectives.push(Objective::from_fields(&Fields::new(
            "objective",
            &objective,
        ))?);
    }

    team.bans = team_bans;
    team.objectives = team_objectives;
    Ok(team)
}
