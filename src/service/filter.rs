//! Filter engine: date-equality filtering of tickets and the two-stage
//! section + occupancy filter for spaces.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::{Section, Space, Ticket, Vehicle};

/// Parses an upstream ISO-8601 timestamp. A trailing `Z` (or an explicit
/// offset) is accepted; the wall-clock date as written is what date filtering
/// compares against.
pub fn parse_timestamp(
    record_id: &str,
    field: &'static str,
    raw: &str,
) -> Result<NaiveDateTime, AppError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local());
    }
    let normalized = raw.strip_suffix('Z').unwrap_or(raw);
    normalized
        .parse::<NaiveDateTime>()
        .map_err(|e| AppError::MalformedRecord {
            id: record_id.to_string(),
            field,
            reason: format!("unparseable timestamp {raw:?}: {e}"),
        })
}

/// Keeps tickets whose entry date equals `date_str` (calendar date only) and
/// whose vehicle resolves in `vehicle_index`. An unparseable `date_str` or
/// ticket entry timestamp is a hard error, never a silent skip.
pub fn filter_tickets_by_date(
    tickets: Vec<Ticket>,
    date_str: &str,
    vehicle_index: &HashMap<String, Vehicle>,
) -> Result<Vec<Ticket>, AppError> {
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| AppError::InvalidDate(format!("{date_str:?}: {e}")))?;

    let mut kept = Vec::new();
    for ticket in tickets {
        let entry = parse_timestamp(&ticket.id, "fechaIngreso", &ticket.entry_time)?;
        if entry.date() == date && vehicle_index.contains_key(&ticket.vehicle_id) {
            kept.push(ticket);
        }
    }
    Ok(kept)
}

/// Two-stage space filter: resolve the section by letter, then keep spaces in
/// that section with the requested occupancy flag. No matching section means
/// an empty result, not an error. At most one section per letter is assumed;
/// on duplicates the first encountered wins.
pub fn filter_spaces_by_section_and_state(
    sections: &[Section],
    spaces: Vec<Space>,
    section_letter: &str,
    occupied: bool,
) -> Vec<Space> {
    let mut matching = sections
        .iter()
        .filter(|s| s.section_letter == section_letter);
    let Some(section) = matching.next() else {
        return Vec::new();
    };
    if matching.next().is_some() {
        tracing::warn!(
            "{} Multiple sections share letter {:?}; using section {}",
            API_NAME,
            section_letter,
            section.id
        );
    }

    spaces
        .into_iter()
        .filter(|space| space.occupied == occupied && space.section_id == section.id)
        .collect()
}
