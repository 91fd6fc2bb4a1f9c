#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map viewport bounds and the report marker index.
//!
//! The map surface reports its current rectangular bounds on every pan or
//! zoom; this crate answers "which reports are visible in those bounds".
//! Containment is inclusive on every edge, and reports without coordinates
//! are never part of a visible set.

use emergency_map_report_models::{Coordinates, Report};
use rstar::{AABB, RTree, RTreeObject};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rectangular geographic viewport in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

impl Bounds {
    /// Creates bounds from the given edges.
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Parses a bounds string `"west,south,east,north"`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<f64> = s.split(',').filter_map(|p| p.trim().parse().ok()).collect();
        if parts.len() == 4 {
            Some(Self::new(parts[0], parts[1], parts[2], parts[3]))
        } else {
            None
        }
    }

    /// Whether the point lies within the bounds, edges included.
    #[must_use]
    pub fn contains(&self, coordinates: Coordinates) -> bool {
        let latitude = coordinates.latitude();
        let longitude = coordinates.longitude();
        (self.south..=self.north).contains(&latitude)
            && (self.west..=self.east).contains(&longitude)
    }

    fn envelope(&self) -> AABB<[f64; 2]> {
        AABB::from_corners([self.west, self.south], [self.east, self.north])
    }
}

/// Filters `reports` to those whose coordinates lie within `bounds`,
/// preserving input order. Reports without coordinates are skipped.
#[must_use]
pub fn visible_reports<'a>(reports: &'a [Report], bounds: Bounds) -> Vec<&'a Report> {
    reports
        .iter()
        .filter(|report| report.coordinates().is_some_and(|c| bounds.contains(c)))
        .collect()
}

/// One map marker stored in the R-tree.
struct MarkerEntry {
    id: Uuid,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for MarkerEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// R-tree index over report coordinates for viewport queries.
///
/// Built from the full report set and rebuilt whenever it changes; the
/// dashboard queries it on every viewport move.
pub struct MarkerIndex {
    tree: RTree<MarkerEntry>,
}

impl MarkerIndex {
    /// Builds the index from the current report set. Reports without
    /// coordinates are not indexed.
    #[must_use]
    pub fn build(reports: &[Report]) -> Self {
        let entries: Vec<MarkerEntry> = reports
            .iter()
            .filter_map(|report| {
                report.coordinates().map(|c| MarkerEntry {
                    id: report.report_id,
                    envelope: AABB::from_point([c.longitude(), c.latitude()]),
                })
            })
            .collect();
        log::debug!("Indexed {} report markers", entries.len());
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Ids of all indexed reports whose coordinates fall within `bounds`
    /// (edges included). Order is unspecified.
    #[must_use]
    pub fn ids_within(&self, bounds: Bounds) -> Vec<Uuid> {
        self.tree
            .locate_in_envelope_intersecting(&bounds.envelope())
            .map(|entry| entry.id)
            .collect()
    }

    /// Number of indexed markers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Whether no markers are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

/// A map camera position handed to the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapCamera {
    /// Center latitude.
    pub latitude: f64,
    /// Center longitude.
    pub longitude: f64,
    /// Tile zoom level.
    pub zoom: u8,
}

impl MapCamera {
    /// Creates a camera position.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64, zoom: u8) -> Self {
        Self {
            latitude,
            longitude,
            zoom,
        }
    }
}

/// Initial camera for the dashboard map (Metro Vancouver overview).
pub const DASHBOARD_CAMERA: MapCamera = MapCamera::new(49.2276, -123.0076, 11);

/// Initial camera for the form's location picker.
pub const PICKER_CAMERA: MapCamera = MapCamera::new(49.276_765, -122.917_957, 13);

/// Zoom level used when focusing the camera on a selected marker.
pub const FOCUS_ZOOM: u8 = 13;
