use super::events::event;
use super::{expect_object, inject, take_array, take_object};
use crate::error::AppError;
use crate::model::{Fields, TimelineEvent, TimelineParticipantFrame};
use serde_json::{Map, Value};

/// Sub-objects of a participant frame that are flattened into its row.
const FLATTENED: [&str; 3] = ["champion_stats", "damage_stats", "position"];

/// Match timeline payload → per-frame participant state and classified events.
///
/// Each frame's `timestamp` becomes the `timestamp` of its participant rows
/// and the `timeframe` of its events.
pub fn timeline(
    value: Value,
    game_id: i64,
) -> Result<(Vec<TimelineParticipantFrame>, Vec<TimelineEvent>), AppError> {
    let mut response = expect_object("timeline", "response", value)?;
    let mut info = take_object(&mut response, "timeline", "info")?;

    let mut participant_frames = Vec::new();
    let mut events = Vec::new();

    for frame in take_array(&mut info, "timeline", "frames")? {
        let mut frame = expect_object("timeline_frame", "frames[]", frame)?;
        let timestamp: i64 = Fields::new("timeline_frame", &frame).get("timestamp")?;

        for (key, state) in take_object(&mut frame, "timeline_frame", "participant_frames")? {
            participant_frames.push(participant_frame(&key, state, game_id, timestamp)?);
        }

        for (sequence, raw) in take_array(&mut frame, "timeline_frame", "events")?
            .into_iter()
            .enumerate()
        {
            if let Some(event) = event(raw, game_id, timestamp, sequence as i64)? {
                events.push(event);
            }
        }
    }

    Ok((participant_frames, events))
}

fn participant_frame(
    key: &str,
    value: Value,
    game_id: i64,
    timestamp: i64,
) -> Result<TimelineParticipantFrame, AppError> {
    const ENTITY: &str = "timeline_participant";

    let mut map = expect_object(ENTITY, key, value)?;
    let mut flat = Map::new();
    for nested in FLATTENED {
        flat.extend(take_object(&mut map, ENTITY, nested)?);
    }
    map.extend(flat);

    if !map.contains_key("participant_id") {
        if let Ok(id) = key.parse::<i64>() {
            map.insert("participant_id".to_string(), Value::from(id));
        }
    }
    inject(
        &mut map,
        [
            ("game_id", Value::from(game_id)),
            ("timestamp", Value::from(timestamp)),
        ],
    );

    TimelineParticipantFrame::from_fields(&Fields::new(ENTITY, &map))
}
