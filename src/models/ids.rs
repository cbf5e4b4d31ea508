use crate::models::PromptId;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Supplies a fresh identifier for every new prompt.
///
/// Ids only need to be unique for the lifetime of the process.
pub trait IdSource: std::fmt::Debug {
    fn next_id(&mut self) -> PromptId;
}

/// Millisecond timestamps, bumped so every id is strictly larger than the last
#[derive(Debug, Default)]
pub struct TimestampIds {
    last: i64,
}

impl TimestampIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for TimestampIds {
    fn next_id(&mut self) -> PromptId {
        let now = Utc::now().timestamp_millis();
        self.last = if now > self.last { now } else { self.last + 1 };
        PromptId::new(self.last.to_string())
    }
}

#[derive(Debug, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> PromptId {
        PromptId::new(Uuid::new_v4().to_string())
    }
}

/// Which id source the store is built with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    #[default]
    Timestamp,
    Uuid,
}

impl IdScheme {
    pub fn build(self) -> Box<dyn IdSource> {
        match self {
            IdScheme::Timestamp => Box::new(TimestampIds::new()),
            IdScheme::Uuid => Box::new(UuidIds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn timestamp_ids_strictly_increase() {
        let mut ids = TimestampIds::new();
        let values: Vec<i64> = (0..200)
            .map(|_| ids.next_id().as_str().parse().unwrap())
            .collect();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn uuid_ids_are_distinct() {
        let mut ids = UuidIds;
        let seen: HashSet<_> = (0..50).map(|_| ids.next_id()).collect();
        assert_eq!(seen.len(), 50);
    }

    #[test]
    fn scheme_deserializes_from_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            scheme: IdScheme,
        }
        let parsed: Wrapper = toml::from_str("scheme = \"uuid\"").unwrap();
        assert_eq!(parsed.scheme, IdScheme::Uuid);
    }
}
