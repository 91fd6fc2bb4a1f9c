#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dashboard coordinator: keeps the map and the report table in sync.
//!
//! The map surface pushes [`DashboardEvent`]s (viewport moves, pin clicks);
//! the table pushes row clicks and column sorts; the coordinator owns the
//! store, the session, and the view state, recomputes the visible subset,
//! and tells the caller what actually changed so unchanged views skip
//! re-rendering. Destructive and edit actions are gated on the session and
//! surface prompts instead of failing hard.

pub mod sort;
pub mod view;

use emergency_map_intake::{ReportDraft, SubmitError};
use emergency_map_report_models::{EmergencyType, MapPin, Report};
use emergency_map_session::{LoginError, Session};
use emergency_map_store::{ReportStore, StoreError};
use emergency_map_viewport::{Bounds, DASHBOARD_CAMERA, FOCUS_ZOOM, MapCamera, MarkerIndex};
use std::collections::HashSet;
use uuid::Uuid;

pub use sort::{SortDirection, SortKey, SortState};
pub use view::{ReportDetails, TableRow};

/// An event pushed into the coordinator by the map or table surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashboardEvent {
    /// The map viewport moved; the payload is the new bounds.
    ViewportChanged(Bounds),
    /// A map pin was clicked.
    PinClicked(Uuid),
    /// A table row was clicked.
    RowClicked(Uuid),
    /// The current selection was dismissed.
    Deselect,
}

/// What a handled event changed, so callers can skip redundant re-renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewUpdate {
    /// Nothing visible changed.
    Unchanged,
    /// The visible report subset changed; the table must refresh.
    VisibleReports,
    /// Only the selection changed; the details overlay must refresh.
    Selection,
}

/// Outcome of a session-gated lifecycle action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The mutation was applied and persisted.
    Applied,
    /// The session is not authenticated; nothing happened. The caller
    /// should surface the login prompt.
    LoginRequired,
    /// The target report no longer exists; nothing happened.
    NotFound,
    /// Deletion is allowed but needs confirmation for this report first.
    ConfirmDelete(Uuid),
}

/// Owns the report store, the session, and all map/table view state.
pub struct Dashboard {
    store: ReportStore,
    session: Session,
    index: MarkerIndex,
    viewport: Option<Bounds>,
    visible: Vec<Uuid>,
    selected: Option<Uuid>,
    sort: Option<SortState>,
}

impl Dashboard {
    /// Creates the coordinator over an opened store and a session.
    ///
    /// Until the first viewport event arrives, every stored report is
    /// visible.
    #[must_use]
    pub fn new(store: ReportStore, session: Session) -> Self {
        let index = MarkerIndex::build(store.reports());
        let visible = store.reports().iter().map(|r| r.report_id).collect();
        Self {
            store,
            session,
            index,
            viewport: None,
            visible,
            selected: None,
            sort: None,
        }
    }

    // -----------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------

    /// Handles a map/table event and reports what changed.
    pub fn handle(&mut self, event: DashboardEvent) -> ViewUpdate {
        match event {
            DashboardEvent::ViewportChanged(bounds) => {
                self.viewport = Some(bounds);
                if self.recompute_visible() {
                    ViewUpdate::VisibleReports
                } else {
                    ViewUpdate::Unchanged
                }
            }
            DashboardEvent::PinClicked(id) | DashboardEvent::RowClicked(id) => self.select(id),
            DashboardEvent::Deselect => {
                if self.selected.take().is_some() {
                    ViewUpdate::Selection
                } else {
                    ViewUpdate::Unchanged
                }
            }
        }
    }

    fn select(&mut self, id: Uuid) -> ViewUpdate {
        if self.store.get(id).is_none() {
            log::debug!("Ignoring click on unknown report {id}");
            return ViewUpdate::Unchanged;
        }
        if self.selected == Some(id) {
            return ViewUpdate::Unchanged;
        }
        self.selected = Some(id);
        ViewUpdate::Selection
    }

    /// Recomputes the visible id list from the current viewport.
    ///
    /// Returns whether the list changed; an identical subset is the
    /// short-circuit that keeps map and table from re-rendering each other
    /// in a loop.
    fn recompute_visible(&mut self) -> bool {
        let next: Vec<Uuid> = match self.viewport {
            Some(bounds) => {
                let within: HashSet<Uuid> = self.index.ids_within(bounds).into_iter().collect();
                self.store
                    .reports()
                    .iter()
                    .map(|r| r.report_id)
                    .filter(|id| within.contains(id))
                    .collect()
            }
            None => self.store.reports().iter().map(|r| r.report_id).collect(),
        };

        if next == self.visible {
            return false;
        }
        log::debug!("Visible reports: {} -> {}", self.visible.len(), next.len());
        self.visible = next;
        true
    }

    /// Rebuilds the marker index and view state after the report set
    /// itself changed (submit or delete).
    fn refresh_after_set_change(&mut self) {
        self.index = MarkerIndex::build(self.store.reports());
        self.recompute_visible();
        if let Some(id) = self.selected {
            if self.store.get(id).is_none() {
                self.selected = None;
            }
        }
    }

    // -----------------------------------------------------------------
    // Intake
    // -----------------------------------------------------------------

    /// Submits a new report from the form and refreshes the views.
    ///
    /// Returns the assigned report id.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] if validation or persistence fails; the
    /// views are untouched in that case.
    pub fn submit_report(&mut self, draft: &ReportDraft) -> Result<Uuid, SubmitError> {
        let id = emergency_map_intake::submit(draft, &mut self.store)?;
        self.refresh_after_set_change();
        Ok(id)
    }

    // -----------------------------------------------------------------
    // Session-gated lifecycle actions
    // -----------------------------------------------------------------

    /// Toggles a report's status (`Open` ↔ `Closed`) and persists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only for storage failures; gating and
    /// missing ids are reported through [`ActionOutcome`].
    pub fn toggle_status(&mut self, id: Uuid) -> Result<ActionOutcome, StoreError> {
        if !self.session.is_authenticated() {
            log::warn!("Blocked status toggle without an authenticated session");
            return Ok(ActionOutcome::LoginRequired);
        }
        match self.store.toggle_status(id) {
            Ok(status) => {
                log::info!("Report {id} status is now {status}");
                Ok(ActionOutcome::Applied)
            }
            Err(StoreError::NotFound(_)) => Ok(ActionOutcome::NotFound),
            Err(e) => Err(e),
        }
    }

    /// Replaces a report's emergency type and persists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only for storage failures.
    pub fn set_emergency_type(
        &mut self,
        id: Uuid,
        emergency_type: EmergencyType,
    ) -> Result<ActionOutcome, StoreError> {
        if !self.session.is_authenticated() {
            log::warn!("Blocked type edit without an authenticated session");
            return Ok(ActionOutcome::LoginRequired);
        }
        match self.store.set_emergency_type(id, emergency_type) {
            Ok(()) => Ok(ActionOutcome::Applied),
            Err(StoreError::NotFound(_)) => Ok(ActionOutcome::NotFound),
            Err(e) => Err(e),
        }
    }

    /// First step of deletion: decides which prompt the caller must show.
    ///
    /// Unauthenticated sessions get [`ActionOutcome::LoginRequired`];
    /// authenticated ones get [`ActionOutcome::ConfirmDelete`] and are
    /// expected to call [`Dashboard::confirm_delete`] once the user
    /// confirms. The store is never touched here.
    #[must_use]
    pub fn request_delete(&self, id: Uuid) -> ActionOutcome {
        if !self.session.is_authenticated() {
            return ActionOutcome::LoginRequired;
        }
        if self.store.get(id).is_none() {
            return ActionOutcome::NotFound;
        }
        ActionOutcome::ConfirmDelete(id)
    }

    /// Second step of deletion, after user confirmation: removes the
    /// report, clears a matching selection, and refreshes the views.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only for storage failures; nothing is
    /// removed in that case.
    pub fn confirm_delete(&mut self, id: Uuid) -> Result<ActionOutcome, StoreError> {
        if !self.session.is_authenticated() {
            return Ok(ActionOutcome::LoginRequired);
        }
        if !self.store.delete(id)? {
            return Ok(ActionOutcome::NotFound);
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.refresh_after_set_change();
        Ok(ActionOutcome::Applied)
    }

    // -----------------------------------------------------------------
    // Sort
    // -----------------------------------------------------------------

    /// Applies a column-header click: ascending on a new column, flipped
    /// direction on a repeated one. Returns the new sort state.
    pub fn sort_by(&mut self, key: SortKey) -> SortState {
        let state = SortState::toggle(self.sort, key);
        self.sort = Some(state);
        state
    }

    /// The active column sort, if any.
    #[must_use]
    pub const fn sort_state(&self) -> Option<SortState> {
        self.sort
    }

    // -----------------------------------------------------------------
    // Session
    // -----------------------------------------------------------------

    /// Attempts to authenticate the session.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError`] from the credential check.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), LoginError> {
        self.session.login(username, password)
    }

    /// Logs the session out. Subsequent lifecycle actions prompt for
    /// login again.
    pub fn logout(&mut self) {
        self.session.logout();
    }

    /// Read access to the session flag.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    // -----------------------------------------------------------------
    // Projections
    // -----------------------------------------------------------------

    /// All stored reports in insertion order.
    #[must_use]
    pub fn reports(&self) -> &[Report] {
        self.store.reports()
    }

    /// The currently selected report id.
    #[must_use]
    pub const fn selection(&self) -> Option<Uuid> {
        self.selected
    }

    /// The selected report, always read fresh from the store so edits are
    /// reflected immediately.
    #[must_use]
    pub fn selected_report(&self) -> Option<&Report> {
        self.selected.and_then(|id| self.store.get(id))
    }

    /// The details overlay projection for the selected report.
    #[must_use]
    pub fn details(&self) -> Option<ReportDetails> {
        self.selected_report().map(ReportDetails::from)
    }

    /// The current viewport bounds, once the map has reported any.
    #[must_use]
    pub const fn viewport(&self) -> Option<Bounds> {
        self.viewport
    }

    /// Visible reports in store order, reordered by the active sort.
    #[must_use]
    pub fn visible_reports(&self) -> Vec<&Report> {
        let mut reports: Vec<&Report> = self
            .visible
            .iter()
            .filter_map(|id| self.store.get(*id))
            .collect();
        if let Some(state) = self.sort {
            sort::sort_reports(&mut reports, state);
        }
        reports
    }

    /// Table rows for the visible, sorted report list.
    #[must_use]
    pub fn table_rows(&self) -> Vec<TableRow> {
        self.visible_reports().into_iter().map(TableRow::from).collect()
    }

    /// Pins for every stored report with coordinates. The map always
    /// renders the full set; the viewport only narrows the table.
    #[must_use]
    pub fn map_pins(&self) -> Vec<MapPin> {
        self.store.reports().iter().filter_map(MapPin::for_report).collect()
    }

    /// Where the map camera starts before any viewport event.
    #[must_use]
    pub const fn initial_camera() -> MapCamera {
        DASHBOARD_CAMERA
    }

    /// Camera position focusing the selected report's marker, if the
    /// selection has coordinates. The map pans there when a selection is
    /// made from the table.
    #[must_use]
    pub fn focus_camera(&self) -> Option<MapCamera> {
        let coordinates = self.selected_report()?.coordinates()?;
        Some(MapCamera::new(
            coordinates.latitude(),
            coordinates.longitude(),
            FOCUS_ZOOM,
        ))
    }
}
