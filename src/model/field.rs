use crate::error::AppError;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};

/// A column type readable from a normalized JSON field.
pub trait FieldValue: Sized {
    const SQL_TYPE: &'static str;
    const NULLABLE: bool = false;
    /// Shown in `InvalidField` errors.
    const EXPECTED: &'static str;

    fn from_json(value: &Value) -> Option<Self>;

    /// Value used when the field is absent or null; `None` means required.
    fn absent() -> Option<Self> {
        None
    }
}

impl FieldValue for i64 {
    const SQL_TYPE: &'static str = "INTEGER";
    const EXPECTED: &'static str = "integer";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl FieldValue for f64 {
    const SQL_TYPE: &'static str = "REAL";
    const EXPECTED: &'static str = "number";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FieldValue for bool {
    const SQL_TYPE: &'static str = "BOOLEAN";
    const EXPECTED: &'static str = "boolean";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FieldValue for String {
    const SQL_TYPE: &'static str = "TEXT";
    const EXPECTED: &'static str = "string";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

/// Upstream timestamps are epoch milliseconds.
impl FieldValue for DateTime<Utc> {
    const SQL_TYPE: &'static str = "TIMESTAMP";
    const EXPECTED: &'static str = "epoch milliseconds";

    fn from_json(value: &Value) -> Option<Self> {
        value
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    const SQL_TYPE: &'static str = T::SQL_TYPE;
    const NULLABLE: bool = true;
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_json(value: &Value) -> Option<Self> {
        T::from_json(value).map(Some)
    }

    fn absent() -> Option<Self> {
        Some(None)
    }
}

/// Read-only view over one normalized JSON object, tagged with the entity
/// being built so errors name both the entity and the field.
pub struct Fields<'a> {
    entity: &'static str,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub fn new(entity: &'static str, map: &'a Map<String, Value>) -> Self {
        Fields { entity, map }
    }

    pub fn get<T: FieldValue>(&self, field: &str) -> Result<T, AppError> {
        match self.map.get(field) {
            None | Some(Value::Null) => {
                T::absent().ok_or_else(|| AppError::missing(self.entity, field))
            }
            Some(value) => T::from_json(value).ok_or_else(|| AppError::InvalidField {
                entity: self.entity,
                field: field.to_string(),
                expected: T::EXPECTED,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn reads_typed_values() {
        let map = object(json!({"kills": 3, "win": true, "lane": "TOP", "ratio": 0.5}));
        let fields = Fields::new("participant", &map);

        assert_eq!(fields.get::<i64>("kills").unwrap(), 3);
        assert!(fields.get::<bool>("win").unwrap());
        assert_eq!(fields.get::<String>("lane").unwrap(), "TOP");
        assert_eq!(fields.get::<f64>("ratio").unwrap(), 0.5);
    }

    #[test]
    fn missing_required_field_names_entity_and_field() {
        let map = object(json!({}));
        let fields = Fields::new("participant", &map);

        match fields.get::<i64>("kills") {
            Err(AppError::MissingField { entity, field }) => {
                assert_eq!(entity, "participant");
                assert_eq!(field, "kills");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn optional_fields_accept_absent_and_null() {
        let map = object(json!({"tournament_code": null}));
        let fields = Fields::new("match", &map);

        assert_eq!(fields.get::<Option<String>>("tournament_code").unwrap(), None);
        assert_eq!(fields.get::<Option<i64>>("nexus_takedowns").unwrap(), None);
    }

    #[test]
    fn wrong_type_is_invalid_not_missing() {
        let map = object(json!({"kills": "three"}));
        let fields = Fields::new("participant", &map);

        assert!(matches!(
            fields.get::<i64>("kills"),
            Err(AppError::InvalidField { expected: "integer", .. })
        ));
    }

    #[test]
    fn timestamps_are_epoch_millis() {
        let map = object(json!({"game_creation": 1_700_000_000_123_i64}));
        let fields = Fields::new("match", &map);

        let ts: DateTime<Utc> = fields.get("game_creation").unwrap();
        assert_eq!(ts.timestamp_millis(), 1_700_000_000_123);
    }
}
