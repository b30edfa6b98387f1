//! camelCase → snake_case rewriting of response keys.

use serde_json::{Map, Value};

/// Rewrites one key: every non-leading ASCII uppercase letter gets an
/// underscore in front of it, then the whole key is lowercased.
///
/// - `"summonerId"` → `"summoner_id"`
/// - `"Name"` → `"name"` (a leading capital never gets an underscore)
/// - `"timeCCingOthers"` → `"time_c_cing_others"` (each capital is split)
/// - `"summoner1Id"` → `"summoner1_id"`, `"item0"` → `"item0"` (digits are kept as-is)
/// - `"summoner_id"` → `"summoner_id"` (snake_case input is a no-op)
pub fn camel_to_snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);

    for (idx, ch) in key.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if idx > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.extend(ch.to_lowercase());
        }
    }

    out
}

/// Returns `value` with every mapping key rewritten by [`camel_to_snake`].
/// Sequences are walked element by element; scalars are returned untouched.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (camel_to_snake(&key), normalize_keys(value)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        scalar => scalar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rewrites_nested_keys() {
        let raw = json!({"summonerId": "x", "nested": {"accountId": "y"}});

        assert_eq!(
            normalize_keys(raw),
            json!({"summoner_id": "x", "nested": {"account_id": "y"}})
        );
    }

    #[test]
    fn key_edge_cases() {
        assert_eq!(camel_to_snake("Name"), "name");
        assert_eq!(camel_to_snake("XP"), "x_p");
        assert_eq!(camel_to_snake("timeCCingOthers"), "time_c_cing_others");
        assert_eq!(camel_to_snake("summoner1Id"), "summoner1_id");
        assert_eq!(camel_to_snake("item0"), "item0");
        assert_eq!(camel_to_snake("already_snake"), "already_snake");
        assert_eq!(camel_to_snake(""), "");
    }

    #[test]
    fn is_idempotent() {
        let raw = json!({
            "gameId": 1,
            "participants": [
                {"perks": {"statPerks": {"defense": 5001}}, "teamId": 100},
                "scalar",
                42,
                null
            ],
            "objectives": {"riftHerald": {"first": false, "kills": 0}}
        });

        let once = normalize_keys(raw);
        let twice = normalize_keys(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn mixed_sequences_keep_scalars() {
        let raw = json!([{"pickTurn": 1}, 7, "teamId", [{"championId": 3}]]);

        assert_eq!(
            normalize_keys(raw),
            json!([{"pick_turn": 1}, 7, "teamId", [{"champion_id": 3}]])
        );
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(normalize_keys(json!("camelCase")), json!("camelCase"));
        assert_eq!(normalize_keys(json!(3.5)), json!(3.5));
        assert_eq!(normalize_keys(Value::Null), Value::Null);
    }
}
