//! Fan-out of normalized (snake_cased) responses into the entity graph.
//!
//! Every function takes ownership of the JSON tree, pops nested sub-objects
//! out of their parent, copies the parent's key columns into each child and
//! builds the flat records. Foreign keys are never read from the child's own
//! payload.

mod events;
mod league;
mod matches;
mod summoner;
mod timeline;

pub use events::{classify, ParticipantSource};
pub use league::{league_entries, league_listing};
pub use matches::{match_ids, match_info};
pub use summoner::summoner;
pub use timeline::timeline;

use crate::error::AppError;
use serde_json::{Map, Value};

pub(crate) fn expect_object(
    entity: &'static str,
    field: &str,
    value: Value,
) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Err(AppError::missing(entity, field)),
        _ => Err(AppError::InvalidField {
            entity,
            field: field.to_string(),
            expected: "object",
        }),
    }
}

pub(crate) fn expect_array(
    entity: &'static str,
    field: &str,
    value: Value,
) -> Result<Vec<Value>, AppError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Null => Err(AppError::missing(entity, field)),
        _ => Err(AppError::InvalidField {
            entity,
            field: field.to_string(),
            expected: "array",
        }),
    }
}

/// Removes a required sub-object from `map`.
pub(crate) fn take_object(
    map: &mut Map<String, Value>,
    entity: &'static str,
    field: &str,
) -> Result<Map<String, Value>, AppError> {
    let value = map.remove(field).unwrap_or(Value::Null);
    expect_object(entity, field, value)
}

/// Removes a required sequence from `map`.
pub(crate) fn take_array(
    map: &mut Map<String, Value>,
    entity: &'static str,
    field: &str,
) -> Result<Vec<Value>, AppError> {
    let value = map.remove(field).unwrap_or(Value::Null);
    expect_array(entity, field, value)
}

/// Removes an optional sub-value; explicit nulls count as absent.
pub(crate) fn take_optional(map: &mut Map<String, Value>, field: &str) -> Option<Value> {
    match map.remove(field) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

/// Moves a required field to a new name.
pub(crate) fn rename(
    map: &mut Map<String, Value>,
    entity: &'static str,
    from: &str,
    to: &str,
) -> Result<(), AppError> {
    let value = map
        .remove(from)
        .ok_or_else(|| AppError::missing(entity, from))?;
    map.insert(to.to_string(), value);
    Ok(())
}

/// Copies parent context into a child object, overwriting whatever the child carried.
pub(crate) fn inject<const N: usize>(map: &mut Map<String, Value>, pairs: [(&str, Value); N]) {
    for (key, value) in pairs {
        map.insert(key.to_string(), value);
    }
}
