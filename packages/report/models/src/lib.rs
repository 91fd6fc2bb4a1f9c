#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Emergency report entity types and the closed report taxonomy.
//!
//! This crate defines the canonical [`Report`] record persisted by the store
//! and consumed by every view, along with the closed [`EmergencyType`] and
//! [`ReportStatus`] enumerations and the [`MapPin`] projection handed to the
//! map rendering surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use uuid::Uuid;

/// The nature of a reported emergency.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EmergencyType {
    /// Structure or wildland fire
    Fire,
    /// Active shooting or shots fired
    Shooting,
    /// Traffic collision
    VehicleAccident,
    /// Medical emergency
    Medical,
    /// Anything not covered by a more specific type
    Other,
}

impl EmergencyType {
    /// Returns the human-readable label shown in the table, detail card,
    /// and form select options.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fire => "Fire",
            Self::Shooting => "Shooting",
            Self::VehicleAccident => "Vehicle Accident",
            Self::Medical => "Medical",
            Self::Other => "Other",
        }
    }

    /// Returns all variants of this enum, in form display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Fire,
            Self::Shooting,
            Self::VehicleAccident,
            Self::Medical,
            Self::Other,
        ]
    }
}

/// Lifecycle status of a report.
///
/// `InProgress` is part of the closed enumeration and round-trips through
/// storage, but no lifecycle action currently produces it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    /// Newly submitted, awaiting attention
    Open,
    /// Being handled by a responder
    InProgress,
    /// Resolved and closed out
    Closed,
}

impl ReportStatus {
    /// Returns the status an admin toggle action transitions to.
    ///
    /// The toggle flips `Open` ↔ `Closed`. An `InProgress` report toggles
    /// to `Closed` — the toggle is always a resolve/reopen switch.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Open | Self::InProgress => Self::Closed,
            Self::Closed => Self::Open,
        }
    }

    /// Whether this status renders as resolved (checkmark) rather than
    /// outstanding (cross).
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Open, Self::InProgress, Self::Closed]
    }
}

/// Error returned when constructing [`Coordinates`] outside the valid
/// WGS84 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidCoordinatesError {
    /// The rejected latitude value.
    pub latitude: f64,
    /// The rejected longitude value.
    pub longitude: f64,
}

impl std::fmt::Display for InvalidCoordinatesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid coordinates ({}, {}): expected finite latitude in [-90, 90] and longitude in [-180, 180]",
            self.latitude, self.longitude
        )
    }
}

impl std::error::Error for InvalidCoordinatesError {}

/// A validated WGS84 coordinate pair.
///
/// Construction (including deserialization of persisted data) enforces
/// finite latitude in [-90, 90] and longitude in [-180, 180], so any
/// `Coordinates` value in the system is usable for map placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawCoordinates")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

/// Unvalidated wire shape for [`Coordinates`].
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCoordinates {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = InvalidCoordinatesError;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl Coordinates {
    /// Creates a validated coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCoordinatesError`] if either value is non-finite or
    /// outside the WGS84 range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinatesError> {
        if latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude)
        {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(InvalidCoordinatesError {
                latitude,
                longitude,
            })
        }
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(self) -> f64 {
        self.longitude
    }
}

/// Where an emergency happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Street address as entered by the reporter.
    pub address: String,
    /// Optional landmark or venue name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_name: Option<String>,
    /// Optional map-picked coordinates. A report without coordinates is
    /// excluded from map rendering and viewport filtering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// A citizen emergency report — the sole persisted entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Unique identifier, assigned at creation, immutable.
    pub report_id: Uuid,
    /// Reporting person's name.
    pub reporter_name: String,
    /// Reporting person's phone number, free text.
    pub reporter_phone: String,
    /// The nature of the emergency.
    pub emergency_type: EmergencyType,
    /// Where it happened.
    pub location: Location,
    /// Optional image reference, unvalidated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    /// Free-text comments from the reporter.
    pub comments: String,
    /// When the report was lodged, immutable. Persisted under the legacy
    /// `timeDate` key.
    #[serde(rename = "timeDate")]
    pub reported_at: DateTime<Utc>,
    /// Lifecycle status, mutable by authenticated sessions only.
    pub status: ReportStatus,
}

impl Report {
    /// Convenience accessor for the optional map coordinates.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.location.coordinates
    }
}

/// The projection of a report consumed by the map rendering surface:
/// one pin per report with coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPin {
    /// Report identifier, echoed back on pin click events.
    pub id: Uuid,
    /// Popup title.
    pub title: String,
    /// Popup body.
    pub description: String,
    /// Pin placement.
    pub coordinates: Coordinates,
}

impl MapPin {
    /// Builds the pin projection for a report.
    ///
    /// Returns `None` for reports without coordinates — those never reach
    /// the map surface.
    #[must_use]
    pub fn for_report(report: &Report) -> Option<Self> {
        let coordinates = report.coordinates()?;
        Some(Self {
            id: report.report_id,
            title: report.emergency_type.label().to_string(),
            description: report.location.address.clone(),
            coordinates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report(coordinates: Option<Coordinates>) -> Report {
        Report {
            report_id: Uuid::new_v4(),
            reporter_name: "Alex Chen".to_string(),
            reporter_phone: "604-555-0199".to_string(),
            emergency_type: EmergencyType::Shooting,
            location: Location {
                address: "Metrotown".to_string(),
                place_name: None,
                coordinates,
            },
            picture_url: None,
            comments: "Shots heard near the station".to_string(),
            reported_at: Utc::now(),
            status: ReportStatus::Open,
        }
    }

    #[test]
    fn status_toggle_is_involution_on_open_and_closed() {
        assert_eq!(ReportStatus::Open.toggled(), ReportStatus::Closed);
        assert_eq!(ReportStatus::Closed.toggled(), ReportStatus::Open);
        for status in [ReportStatus::Open, ReportStatus::Closed] {
            assert_eq!(status.toggled().toggled(), status);
        }
    }

    #[test]
    fn in_progress_toggles_to_closed() {
        assert_eq!(ReportStatus::InProgress.toggled(), ReportStatus::Closed);
    }

    #[test]
    fn no_transition_produces_in_progress() {
        for status in ReportStatus::all() {
            assert_ne!(status.toggled(), ReportStatus::InProgress);
        }
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        assert!(Coordinates::new(90.001, 0.0).is_err());
        assert!(Coordinates::new(-91.0, 0.0).is_err());
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        assert!(Coordinates::new(0.0, 180.5).is_err());
        assert!(Coordinates::new(0.0, -181.0).is_err());
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn accepts_boundary_coordinates() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn deserialization_enforces_coordinate_range() {
        let result: Result<Coordinates, _> =
            serde_json::from_str(r#"{"latitude": 120.0, "longitude": 0.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn report_serializes_with_legacy_key_names() {
        let report = sample_report(Some(Coordinates::new(49.2258, -123.0036).unwrap()));
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("reportId").is_some());
        assert!(json.get("timeDate").is_some());
        assert_eq!(json["emergencyType"], "SHOOTING");
        assert_eq!(json["location"]["coordinates"]["latitude"], 49.2258);
    }

    #[test]
    fn report_roundtrips_through_json() {
        let report = sample_report(Some(Coordinates::new(49.2258, -123.0036).unwrap()));
        let json = serde_json::to_string(&report).unwrap();
        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn emergency_type_labels_match_ui_strings() {
        assert_eq!(EmergencyType::VehicleAccident.label(), "Vehicle Accident");
        assert_eq!(EmergencyType::Fire.label(), "Fire");
    }

    #[test]
    fn emergency_type_parses_wire_form() {
        let parsed: EmergencyType = "VEHICLE_ACCIDENT".parse().unwrap();
        assert_eq!(parsed, EmergencyType::VehicleAccident);
    }

    #[test]
    fn map_pin_skips_reports_without_coordinates() {
        assert!(MapPin::for_report(&sample_report(None)).is_none());
    }

    #[test]
    fn map_pin_projects_id_and_label() {
        let report = sample_report(Some(Coordinates::new(49.2258, -123.0036).unwrap()));
        let pin = MapPin::for_report(&report).unwrap();
        assert_eq!(pin.id, report.report_id);
        assert_eq!(pin.title, "Shooting");
        assert_eq!(pin.description, "Metrotown");
    }
}
