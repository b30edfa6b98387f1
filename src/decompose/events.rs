use super::{expect_object, inject};
use crate::error::AppError;
use crate::model::{Fields, TimelineEvent};
use serde_json::Value;
use tracing::warn;

const ENTITY: &str = "timeline_event";

/// Which payload field names the participant that owns an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantSource {
    /// `participant_id` as sent.
    Participant,
    /// `killer_id`.
    Killer,
    /// `creator_id`.
    Creator,
    /// The event has no single owner.
    Nobody,
}

impl ParticipantSource {
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ParticipantSource::Participant => Some("participant_id"),
            ParticipantSource::Killer => Some("killer_id"),
            ParticipantSource::Creator => Some("creator_id"),
            ParticipantSource::Nobody => None,
        }
    }
}

/// `None` for kinds this crate does not know yet.
pub fn classify(kind: &str) -> Option<ParticipantSource> {
    let source = match kind {
        "LEVEL_UP" | "ITEM_PURCHASED" | "SKILL_LEVEL_UP" | "ITEM_DESTROYED" | "ITEM_SOLD"
        | "ITEM_UNDO" => ParticipantSource::Participant,
        "WARD_KILL" | "BUILDING_KILL" | "CHAMPION_KILL" | "TURRET_PLATE_DESTROYED"
        | "CHAMPION_SPECIAL_KILL" | "ELITE_MONSTER_KILL" => ParticipantSource::Killer,
        "WARD_PLACED" => ParticipantSource::Creator,
        "DRAGON_SOUL_GIVEN" | "PAUSE_END" | "GAME_END" | "OBJECTIVE_BOUNTY_PRESTART"
        | "OBJECTIVE_BOUNTY_FINISH" => ParticipantSource::Nobody,
        _ => return None,
    };
    Some(source)
}

/// Builds one event; unknown kinds are logged and yield `Ok(None)`.
pub(crate) fn event(
    value: Value,
    game_id: i64,
    timeframe: i64,
    sequence: i64,
) -> Result<Option<TimelineEvent>, AppError> {
    let mut map = expect_object(ENTITY, "events[]", value)?;

    let (kind, participant) = {
        let fields = Fields::new(ENTITY, &map);
        let kind: String = fields.get("type")?;
        let Some(source) = classify(&kind) else {
            warn!(kind = %kind, game_id, timeframe, sequence, "Dropping unknown timeline event");
            return Ok(None);
        };
        let participant = match source.field() {
            Some(field) => Value::from(fields.get::<i64>(field)?),
            None => Value::Null,
        };
        (kind, participant)
    };

    inject(
        &mut map,
        [
            ("kind", Value::from(kind)),
            ("participant_id", participant),
            ("game_id", Value::from(game_id)),
            ("timeframe", Value::from(timeframe)),
            ("sequence", Value::from(sequence)),
        ],
    );

    TimelineEvent::from_fields(&Fields::new(ENTITY, &map)).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const KNOWN: [(&str, ParticipantSource); 18] = [
        ("LEVEL_UP", ParticipantSource::Participant),
        ("ITEM_PURCHASED", ParticipantSource::Participant),
        ("SKILL_LEVEL_UP", ParticipantSource::Participant),
        ("ITEM_DESTROYED", ParticipantSource::Participant),
        ("ITEM_SOLD", ParticipantSource::Participant),
        ("ITEM_UNDO", ParticipantSource::Participant),
        ("WARD_KILL", ParticipantSource::Killer),
        ("BUILDING_KILL", ParticipantSource::Killer),
        ("CHAMPION_KILL", ParticipantSource::Killer),
        ("TURRET_PLATE_DESTROYED", ParticipantSource::Killer),
        ("CHAMPION_SPECIAL_KILL", ParticipantSource::Killer),
        ("ELITE_MONSTER_KILL", ParticipantSource::Killer),
        ("WARD_PLACED", ParticipantSource::Creator),
        ("DRAGON_SOUL_GIVEN", ParticipantSource::Nobody),
        ("PAUSE_END", ParticipantSource::Nobody),
        ("GAME_END", ParticipantSource::Nobody),
        ("OBJECTIVE_BOUNTY_PRESTART", ParticipantSource::Nobody),
        ("OBJECTIVE_BOUNTY_FINISH", ParticipantSource::Nobody),
    ];

    #[test]
    fn every_known_kind_uses_its_documented_source() {
        for (kind, expected) in KNOWN {
            let raw = json!({
                "type": kind,
                "timestamp": 1500,
                "participant_id": 1,
                "killer_id": 2,
                "creator_id": 3
            });

            let event = event(raw, 10, 60_000, 4)
                .unwrap()
                .unwrap_or_else(|| panic!("{} was dropped", kind));

            assert_eq!(classify(kind), Some(expected));
            let want = match expected {
                ParticipantSource::Participant => Some(1),
                ParticipantSource::Killer => Some(2),
                ParticipantSource::Creator => Some(3),
                ParticipantSource::Nobody => None,
            };
            assert_eq!(event.participant_id, want, "{}", kind);
            assert_eq!(event.kind, kind);
            assert_eq!((event.game_id, event.timeframe, event.sequence), (10, 60_000, 4));
            assert_eq!(event.timestamp, 1500);
        }
    }

    #[test]
    fn unknown_kind_is_dropped_without_error() {
        let raw = json!({"type": "UNKNOWN_FUTURE_EVENT", "timestamp": 1});

        assert_eq!(event(raw, 1, 0, 0).unwrap(), None);
    }

    #[test]
    fn missing_type_is_missing_field() {
        let raw = json!({"timestamp": 1, "participant_id": 1});

        assert!(matches!(
            event(raw, 1, 0, 0),
            Err(AppError::MissingField { entity: "timeline_event", .. })
        ));
    }

    #[test]
    fn kill_without_killer_is_missing_field() {
        let raw = json!({"type": "CHAMPION_KILL", "timestamp": 1, "victim_id": 4});

        match event(raw, 1, 0, 0) {
            Err(AppError::MissingField { field, .. }) => assert_eq!(field, "killer_id"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
