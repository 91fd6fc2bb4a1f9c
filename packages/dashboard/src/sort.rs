//! Table column sorting.
//!
//! Selecting a column sorts ascending; selecting it again flips the
//! direction. Sorting always produces a reordered copy of the visible
//! list — the store's insertion order is never touched. The sort is
//! stable, so ties keep their original relative order.

use std::cmp::Ordering;

use emergency_map_report_models::Report;
use strum_macros::{AsRefStr, Display, EnumString};

/// A sortable table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum SortKey {
    /// Location column (street address).
    Address,
    /// Type column (emergency type label).
    EmergencyType,
    /// Time-reported column.
    ReportedAt,
    /// Status column (lifecycle order).
    Status,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest value first.
    Ascending,
    /// Largest value first.
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// The active column sort, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    /// Sorted column.
    pub key: SortKey,
    /// Current direction.
    pub direction: SortDirection,
}

impl SortState {
    /// Applies a column selection to the current state: a repeated key
    /// flips the direction, a new key starts ascending.
    #[must_use]
    pub fn toggle(current: Option<Self>, key: SortKey) -> Self {
        match current {
            Some(state) if state.key == key => Self {
                key,
                direction: state.direction.flipped(),
            },
            _ => Self {
                key,
                direction: SortDirection::Ascending,
            },
        }
    }
}

/// Stably sorts the list in place according to `state`.
pub fn sort_reports(reports: &mut [&Report], state: SortState) {
    reports.sort_by(|a, b| {
        let ordering = compare(a, b, state.key);
        match state.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Natural ordering of the column's value: lexicographic for strings,
/// chronological for the timestamp, lifecycle order for the status.
fn compare(a: &Report, b: &Report, key: SortKey) -> Ordering {
    match key {
        SortKey::Address => a.location.address.cmp(&b.location.address),
        SortKey::EmergencyType => a.emergency_type.label().cmp(b.emergency_type.label()),
        SortKey::ReportedAt => a.reported_at.cmp(&b.reported_at),
        SortKey::Status => a.status.cmp(&b.status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{TimeZone, Utc};
    use emergency_map_report_models::{EmergencyType, Location, ReportStatus};
    use uuid::Uuid;

    fn report(address: &str, emergency_type: EmergencyType, minute: u32) -> Report {
        Report {
            report_id: Uuid::new_v4(),
            reporter_name: "Alex Chen".to_string(),
            reporter_phone: "604-555-0199".to_string(),
            emergency_type,
            location: Location {
                address: address.to_string(),
                place_name: None,
                coordinates: None,
            },
            picture_url: None,
            comments: String::new(),
            reported_at: Utc.with_ymd_and_hms(2023, 11, 1, 17, minute, 0).unwrap(),
            status: ReportStatus::Open,
        }
    }

    #[test]
    fn repeated_key_flips_direction() {
        let first = SortState::toggle(None, SortKey::Address);
        assert_eq!(first.direction, SortDirection::Ascending);

        let second = SortState::toggle(Some(first), SortKey::Address);
        assert_eq!(second.direction, SortDirection::Descending);

        let third = SortState::toggle(Some(second), SortKey::ReportedAt);
        assert_eq!(third.key, SortKey::ReportedAt);
        assert_eq!(third.direction, SortDirection::Ascending);
    }

    #[test]
    fn sorts_addresses_lexicographically() {
        let a = report("Metrotown", EmergencyType::Fire, 0);
        let b = report("Gastown", EmergencyType::Fire, 1);
        let c = report("SFU Burnaby", EmergencyType::Fire, 2);
        let mut list: Vec<&Report> = vec![&a, &b, &c];

        sort_reports(
            &mut list,
            SortState {
                key: SortKey::Address,
                direction: SortDirection::Ascending,
            },
        );

        let addresses: Vec<&str> = list.iter().map(|r| r.location.address.as_str()).collect();
        assert_eq!(addresses, ["Gastown", "Metrotown", "SFU Burnaby"]);
    }

    #[test]
    fn same_direction_sort_is_idempotent() {
        let a = report("Metrotown", EmergencyType::Fire, 0);
        let b = report("Gastown", EmergencyType::Medical, 1);
        let c = report("SFU Burnaby", EmergencyType::Shooting, 2);
        let state = SortState {
            key: SortKey::ReportedAt,
            direction: SortDirection::Descending,
        };

        let mut once: Vec<&Report> = vec![&a, &b, &c];
        sort_reports(&mut once, state);
        let mut twice = once.clone();
        sort_reports(&mut twice, state);

        let ids = |list: &[&Report]| list.iter().map(|r| r.report_id).collect::<Vec<_>>();
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn flipped_direction_reverses_distinct_keys() {
        let a = report("Metrotown", EmergencyType::Fire, 0);
        let b = report("Gastown", EmergencyType::Medical, 1);
        let c = report("SFU Burnaby", EmergencyType::Shooting, 2);

        let mut ascending: Vec<&Report> = vec![&a, &b, &c];
        sort_reports(
            &mut ascending,
            SortState {
                key: SortKey::Address,
                direction: SortDirection::Ascending,
            },
        );
        let mut descending: Vec<&Report> = vec![&a, &b, &c];
        sort_reports(
            &mut descending,
            SortState {
                key: SortKey::Address,
                direction: SortDirection::Descending,
            },
        );

        let forward: Vec<_> = ascending.iter().map(|r| r.report_id).collect();
        let mut backward: Vec<_> = descending.iter().map(|r| r.report_id).collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn ties_preserve_original_relative_order() {
        let first = report("Metrotown", EmergencyType::Fire, 0);
        let second = report("Metrotown", EmergencyType::Medical, 1);
        let other = report("Gastown", EmergencyType::Shooting, 2);
        let mut list: Vec<&Report> = vec![&first, &second, &other];

        sort_reports(
            &mut list,
            SortState {
                key: SortKey::Address,
                direction: SortDirection::Ascending,
            },
        );

        assert_eq!(list[0].report_id, other.report_id);
        assert_eq!(list[1].report_id, first.report_id);
        assert_eq!(list[2].report_id, second.report_id);
    }

    #[test]
    fn status_sorts_in_lifecycle_order() {
        let mut open = report("A", EmergencyType::Fire, 0);
        open.status = ReportStatus::Open;
        let mut in_progress = report("B", EmergencyType::Fire, 1);
        in_progress.status = ReportStatus::InProgress;
        let mut closed = report("C", EmergencyType::Fire, 2);
        closed.status = ReportStatus::Closed;
        let mut list: Vec<&Report> = vec![&closed, &open, &in_progress];

        sort_reports(
            &mut list,
            SortState {
                key: SortKey::Status,
                direction: SortDirection::Ascending,
            },
        );

        let statuses: Vec<ReportStatus> = list.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            [
                ReportStatus::Open,
                ReportStatus::InProgress,
                ReportStatus::Closed
            ]
        );
    }
}
