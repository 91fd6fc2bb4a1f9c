#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Report intake: validates a submitted form draft and turns it into a
//! stored [`Report`].
//!
//! Field validation failures are collected per field so a form view can
//! render them inline; any failure blocks submission. The three auto-filled
//! fields (id, timestamp, status) are never taken from the draft.

use chrono::Utc;
use emergency_map_report_models::{Coordinates, EmergencyType, Location, Report, ReportStatus};
use emergency_map_store::{ReportStore, StoreError};
use thiserror::Error;
use uuid::Uuid;

/// Minimum reporter name length, in characters.
pub const MIN_NAME_LEN: usize = 2;

/// Minimum number of digits a phone number must contain once separators
/// are stripped.
pub const MIN_PHONE_DIGITS: usize = 10;

/// A single failed form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field name.
    pub field: &'static str,
    /// Inline message for the field.
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors from report submission.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// One or more form fields failed validation; nothing was stored.
    #[error("Validation failed on {} field(s)", .0.len())]
    Invalid(Vec<FieldError>),

    /// The store rejected the report or persistence failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The editable field set of the report form.
///
/// Mirrors [`Report`] minus the auto-filled id, timestamp, and status.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDraft {
    /// Reporting person's name.
    pub reporter_name: String,
    /// Reporting person's phone number.
    pub reporter_phone: String,
    /// Selected emergency type.
    pub emergency_type: EmergencyType,
    /// Street address.
    pub address: String,
    /// Optional landmark or venue name.
    pub place_name: String,
    /// Optional map-picked coordinates as raw (latitude, longitude).
    pub coordinates: Option<(f64, f64)>,
    /// Optional picture URL.
    pub picture_url: String,
    /// Free-text comments.
    pub comments: String,
}

impl Default for ReportDraft {
    fn default() -> Self {
        Self {
            reporter_name: String::new(),
            reporter_phone: String::new(),
            emergency_type: EmergencyType::Other,
            address: String::new(),
            place_name: String::new(),
            coordinates: None,
            picture_url: String::new(),
            comments: String::new(),
        }
    }
}

impl ReportDraft {
    /// Validates every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns the full list of [`FieldError`]s if any field is invalid.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = self.reporter_name.trim();
        if name.is_empty() {
            errors.push(FieldError {
                field: "reporterName",
                message: "Name is required".to_string(),
            });
        } else if name.chars().count() < MIN_NAME_LEN {
            errors.push(FieldError {
                field: "reporterName",
                message: format!("Name must be at least {MIN_NAME_LEN} characters"),
            });
        }

        let phone = self.reporter_phone.trim();
        if phone.is_empty() {
            errors.push(FieldError {
                field: "reporterPhone",
                message: "Mobile number is required".to_string(),
            });
        } else if digit_count(phone) < MIN_PHONE_DIGITS {
            errors.push(FieldError {
                field: "reporterPhone",
                message: format!("Mobile number must contain at least {MIN_PHONE_DIGITS} digits"),
            });
        }

        if self.address.trim().is_empty() {
            errors.push(FieldError {
                field: "address",
                message: "Address is required".to_string(),
            });
        }

        if let Some((latitude, longitude)) = self.coordinates {
            if let Err(e) = Coordinates::new(latitude, longitude) {
                errors.push(FieldError {
                    field: "coordinates",
                    message: e.to_string(),
                });
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Validates the draft, builds the report with a fresh id, the current
/// time, and status [`ReportStatus::Open`], and appends it to the store.
///
/// Returns the assigned report id.
///
/// # Errors
///
/// Returns [`SubmitError::Invalid`] when validation fails (store untouched)
/// or [`SubmitError::Store`] when persistence fails.
pub fn submit(draft: &ReportDraft, store: &mut ReportStore) -> Result<Uuid, SubmitError> {
    draft.validate().map_err(SubmitError::Invalid)?;

    // validate() already rejected out-of-range pairs
    let coordinates = draft
        .coordinates
        .and_then(|(latitude, longitude)| Coordinates::new(latitude, longitude).ok());

    let report = Report {
        report_id: Uuid::new_v4(),
        reporter_name: draft.reporter_name.trim().to_string(),
        reporter_phone: draft.reporter_phone.trim().to_string(),
        emergency_type: draft.emergency_type,
        location: Location {
            address: draft.address.trim().to_string(),
            place_name: non_empty(&draft.place_name),
            coordinates,
        },
        picture_url: non_empty(&draft.picture_url),
        comments: draft.comments.trim().to_string(),
        reported_at: Utc::now(),
        status: ReportStatus::Open,
    };

    let id = report.report_id;
    store.submit(report)?;
    log::info!("Accepted report {id}");
    Ok(id)
}

/// Number of ASCII digits in a phone string, ignoring separators.
fn digit_count(phone: &str) -> usize {
    phone.chars().filter(char::is_ascii_digit).count()
}

/// Trims a form value, mapping an empty string to `None`.
fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
