//! Read-only projections handed to the table and details surfaces.

use chrono::{DateTime, Utc};
use emergency_map_report_models::{Report, ReportStatus};
use uuid::Uuid;

/// One table row: the columns the report table renders.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// Report identifier, echoed back on row click events.
    pub id: Uuid,
    /// Location column (street address).
    pub location: String,
    /// Type column label.
    pub emergency_type: String,
    /// Time-reported column.
    pub reported_at: DateTime<Utc>,
    /// Status column.
    pub status: ReportStatus,
}

impl From<&Report> for TableRow {
    fn from(report: &Report) -> Self {
        Self {
            id: report.report_id,
            location: report.location.address.clone(),
            emergency_type: report.emergency_type.label().to_string(),
            reported_at: report.reported_at,
            status: report.status,
        }
    }
}

/// The detail overlay for the selected report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDetails {
    /// Report identifier.
    pub id: Uuid,
    /// Emergency type label (card title).
    pub emergency_type: String,
    /// Street address (card subtitle).
    pub address: String,
    /// Reporter comments (card body).
    pub comments: String,
    /// Reporting person's name.
    pub reporter_name: String,
    /// Reporting person's phone number.
    pub reporter_phone: String,
    /// When the report was lodged.
    pub reported_at: DateTime<Utc>,
    /// Whether the card shows the resolved check rather than the open cross.
    pub resolved: bool,
    /// Optional header image.
    pub picture_url: Option<String>,
}

impl From<&Report> for ReportDetails {
    fn from(report: &Report) -> Self {
        Self {
            id: report.report_id,
            emergency_type: report.emergency_type.label().to_string(),
            address: report.location.address.clone(),
            comments: report.comments.clone(),
            reporter_name: report.reporter_name.clone(),
            reporter_phone: report.reporter_phone.clone(),
            reported_at: report.reported_at,
            resolved: report.status.is_resolved(),
            picture_url: report.picture_url.clone(),
        }
    }
}
