#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Persisted emergency report store.
//!
//! The store is the source of truth for every view: an ordered collection of
//! [`Report`] records mirrored to a single keyed JSON blob after every
//! mutation. Persistence goes through the [`Storage`] seam so the browser
//! storage of the original deployment, a file on disk, and the in-memory
//! test double are interchangeable.

pub mod storage;

use emergency_map_report_models::{EmergencyType, Report, ReportStatus};
use thiserror::Error;
use uuid::Uuid;

pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};

/// Storage key holding the JSON array of report records.
pub const REPORTS_KEY: &str = "emergency-reports";

/// Errors from report store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying storage failed. The in-memory report set is left
    /// unchanged and the operation can be retried.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Persisted data could not be serialized or re-hydrated. Timestamps
    /// that fail to parse back into date values land here.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No report with the given id exists in the store.
    #[error("Report not found: {0}")]
    NotFound(Uuid),

    /// A submitted report reused an id already present in the store.
    #[error("Duplicate report id: {0}")]
    DuplicateId(Uuid),
}

/// Ordered, persisted collection of emergency reports.
///
/// Insertion order is preserved; every successful mutation is written to
/// storage before the in-memory state changes, so a storage failure leaves
/// the store exactly as it was.
pub struct ReportStore {
    storage: Box<dyn Storage>,
    reports: Vec<Report>,
}

impl ReportStore {
    /// Opens the store, loading any previously persisted reports.
    ///
    /// A missing key yields an empty store. Timestamps are re-hydrated into
    /// date values as part of deserialization — data that fails to parse is
    /// a load error, not a silent string.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if storage is unavailable or the persisted
    /// JSON does not deserialize into report records.
    pub fn open(storage: Box<dyn Storage>) -> Result<Self, StoreError> {
        let reports = match storage.read(REPORTS_KEY)? {
            Some(raw) => serde_json::from_str::<Vec<Report>>(&raw)?,
            None => Vec::new(),
        };
        log::info!("Loaded {} persisted reports", reports.len());
        Ok(Self { storage, reports })
    }

    /// All reports in insertion order.
    #[must_use]
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// Looks up a report by id.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Report> {
        self.reports.iter().find(|r| r.report_id == id)
    }

    /// Number of stored reports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// Whether the store holds no reports.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Appends a new report and persists the full set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] if the id is already present, or
    /// a storage/serialization error (in which case nothing is appended).
    pub fn submit(&mut self, report: Report) -> Result<(), StoreError> {
        if self.get(report.report_id).is_some() {
            return Err(StoreError::DuplicateId(report.report_id));
        }
        let mut next = self.reports.clone();
        next.push(report);
        self.persist(next)?;
        log::info!("Stored new report ({} total)", self.reports.len());
        Ok(())
    }

    /// Toggles a report's status (`Open` ↔ `Closed`) and persists.
    ///
    /// Returns the new status.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an absent id, or a
    /// storage/serialization error (state unchanged).
    pub fn toggle_status(&mut self, id: Uuid) -> Result<ReportStatus, StoreError> {
        self.update(id, |report| report.status = report.status.toggled())
            .map(|report| report.status)
    }

    /// Replaces a report's emergency type and persists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an absent id, or a
    /// storage/serialization error (state unchanged).
    pub fn set_emergency_type(
        &mut self,
        id: Uuid,
        emergency_type: EmergencyType,
    ) -> Result<(), StoreError> {
        self.update(id, |report| report.emergency_type = emergency_type)
            .map(|_| ())
    }

    /// Removes the report with the given id and persists.
    ///
    /// Returns `true` if a report was removed, `false` if no record matched
    /// (removal of an absent id is a no-op, not a failure).
    ///
    /// # Errors
    ///
    /// Returns a storage/serialization error, in which case nothing is
    /// removed.
    pub fn delete(&mut self, id: Uuid) -> Result<bool, StoreError> {
        let mut next = self.reports.clone();
        let before = next.len();
        next.retain(|r| r.report_id != id);
        if next.len() == before {
            return Ok(false);
        }
        self.persist(next)?;
        log::info!("Deleted report {id}");
        Ok(true)
    }

    /// Applies `mutate` to the matching report in a prospective copy,
    /// persists the copy, then commits it. Returns the mutated record.
    fn update(
        &mut self,
        id: Uuid,
        mutate: impl FnOnce(&mut Report),
    ) -> Result<Report, StoreError> {
        let mut next = self.reports.clone();
        let report = next
            .iter_mut()
            .find(|r| r.report_id == id)
            .ok_or(StoreError::NotFound(id))?;
        mutate(report);
        let updated = report.clone();
        self.persist(next)?;
        Ok(updated)
    }

    /// Serializes and writes the prospective report set, committing it to
    /// memory only after the write succeeds.
    fn persist(&mut self, next: Vec<Report>) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&next)?;
        self.storage.write(REPORTS_KEY, &raw)?;
        self.reports = next;
        Ok(())
    }
}
