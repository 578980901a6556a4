//! Import merge: wholesale replacement of the schedule by imported records.

use crate::domain::resolver::normalize_wall_time;
use crate::domain::{DomainError, ExamEntry, ImportRecord, Schedule};
use serde_json::Value;
use std::collections::HashSet;

/// Records served by the default/reset lookup.
pub fn default_import_records() -> Vec<ImportRecord> {
    vec![
        ImportRecord::new("數學", "01:00", "02:00").with_id(1),
        ImportRecord::new("國文", "03:00", "04:00").with_id(2),
        ImportRecord::new("自然", "05:00", "06:00").with_id(3),
    ]
}

/// Seed schedule used when nothing is persisted.
pub fn default_schedule() -> Schedule {
    merge_import(&default_import_records())
}

/// Replaces the schedule with `records` in order. Nothing from the previous schedule survives.
///
/// Supplied ids are kept. A record without an id gets its 1-based position unless another
/// record already claims that number; it then takes the next id above every claimed one, as
/// does a repeated supplied id. Times are zero-padded the way the editor stores them.
pub fn merge_import(records: &[ImportRecord]) -> Schedule {
    let supplied: HashSet<u32> = records.iter().filter_map(|r| r.id).collect();
    let mut next = supplied
        .iter()
        .copied()
        .max()
        .unwrap_or(0)
        .max(records.len() as u32);
    let mut used = HashSet::with_capacity(records.len());

    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let position = i as u32 + 1;
            let id = match r.id {
                Some(id) if !used.contains(&id) => id,
                None if !supplied.contains(&position) && !used.contains(&position) => position,
                _ => {
                    next += 1;
                    next
                }
            };
            used.insert(id);
            ExamEntry::new(
                id,
                &r.subject,
                normalize_wall_time(&r.start_time),
                normalize_wall_time(&r.end_time),
            )
        })
        .collect()
}

/// Interprets a lookup response. Only a JSON array of records is a success; an
/// `{"error": ..}` object or any other shape is a failure, never an empty schedule.
pub fn parse_import_payload(payload: Value) -> Result<Vec<ImportRecord>, DomainError> {
    match payload {
        Value::Array(_) => serde_json::from_value(payload)
            .map_err(|e| DomainError::Import(format!("malformed records: {e}"))),
        Value::Object(ref map) if map.contains_key("error") => {
            let msg = map
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("lookup reported an error");
            Err(DomainError::Import(msg.to_string()))
        }
        other => Err(DomainError::Import(format!(
            "unexpected payload: {}",
            other.to_string().chars().take(120).collect::<String>()
        ))),
    }
}
