use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::models::props::{Props, PropsModify};

/// Property key stamped on every key-value store modification.
pub const UPDATED_KEY: &str = "__updated__";

/// A named key-value store instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValueStore {
    pub name: String,
    #[serde(default)]
    pub props: Props,
}

impl KeyValueStore {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.props.get(key).map(String::as_str)
    }

    /// Time of the last modification made through this library.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        let stamp = self.get(UPDATED_KEY)?;
        DateTime::parse_from_rfc3339(stamp).ok().map(|t| t.with_timezone(&Utc))
    }
}

/// Adds the `__updated__` stamp for `now` to a modification, keeping every
/// caller-supplied override.
pub(crate) fn stamp_update(mut modify: PropsModify, now: DateTime<Utc>) -> PropsModify {
    modify.override_props.insert(
        UPDATED_KEY.to_string(),
        now.to_rfc3339_opts(SecondsFormat::Millis, true),
    );
    modify
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn stamp_merges_with_caller_props() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        let modify = PropsModify::new().set("theme", "dark").delete("legacy");
        let stamped = stamp_update(modify, now);
        assert_eq!(
            serde_json::to_value(&stamped).unwrap(),
            json!({
                "override_props": {
                    "theme": "dark",
                    "__updated__": "2026-10-18T09:30:00.000Z"
                },
                "delete_props": ["legacy"]
            })
        );
    }

    #[test]
    fn stamp_wins_over_caller_value() {
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let stamped = stamp_update(PropsModify::new().set(UPDATED_KEY, "yesterday"), now);
        assert_eq!(stamped.override_props[UPDATED_KEY], "2026-01-02T03:04:05.000Z");
        assert_eq!(stamped.override_props.len(), 1);
    }

    #[test]
    fn updated_at_reads_the_stamp() {
        let store: KeyValueStore = serde_json::from_value(json!({
            "name": "console",
            "props": { "__updated__": "2026-10-18T09:30:00.000Z" }
        }))
        .unwrap();
        assert_eq!(
            store.updated_at(),
            Some(Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap())
        );
        assert_eq!(
            KeyValueStore { name: "x".into(), props: Props::new() }.updated_at(),
            None
        );
    }
}
