//! Street network components - nodes and slope-annotated segments

use geo::{LineString, Point};

use crate::{Error, Meters, NodeId, SlopePercent, loading::SkipReason};

/// Upper bound on a single segment's length, keeping summed search
/// weights far below `u64::MAX`
pub const MAX_SEGMENT_LENGTH: Meters = 10_000_000.0;

/// Street graph node (intersection or dead end)
#[derive(Debug, Clone, PartialEq)]
pub struct StreetNode {
    /// Identifier from the raw topology
    pub id: NodeId,
    /// Node coordinates, x = longitude, y = latitude
    pub geometry: Point<f64>,
    /// Elevation in meters, `None` when the elevation source had no sample
    pub elevation: Option<Meters>,
}

impl StreetNode {
    pub fn new(id: NodeId, lat: f64, lon: f64, elevation: Option<Meters>) -> Self {
        Self {
            id,
            geometry: Point::new(lon, lat),
            // NaN samples are treated as missing
            elevation: elevation.filter(|e| e.is_finite()),
        }
    }
}

/// Street graph edge (street segment) annotated with its grade
#[derive(Debug, Clone, PartialEq)]
pub struct StreetSegment {
    pub start: NodeId,
    pub end: NodeId,
    /// Horizontal length in meters, always > 0
    pub length: Meters,
    /// End elevation minus start elevation
    pub elevation_change: Meters,
    /// Signed grade from `start` to `end`
    pub slope: SlopePercent,
    /// Directionality carried through from the source topology
    pub oneway: bool,
    pub name: Option<String>,
    /// Optional detailed geometry for export
    pub geometry: Option<LineString<f64>>,
}

impl StreetSegment {
    /// Builds a segment between two nodes and computes its slope.
    ///
    /// # Errors
    ///
    /// `Error::InvalidSegment` when the length is not a positive finite number
    /// or exceeds [`MAX_SEGMENT_LENGTH`], or when either endpoint has no
    /// elevation.
    pub fn new(start: &StreetNode, end: &StreetNode, length: Meters) -> Result<Self, Error> {
        if !length.is_finite() || length <= 0.0 {
            return Err(Error::InvalidSegment {
                reason: SkipReason::NonPositiveLength(length),
            });
        }
        if length > MAX_SEGMENT_LENGTH {
            return Err(Error::InvalidSegment {
                reason: SkipReason::ExcessiveLength(length),
            });
        }

        let start_elevation = start.elevation.ok_or(Error::InvalidSegment {
            reason: SkipReason::MissingElevation(start.id),
        })?;
        let end_elevation = end.elevation.ok_or(Error::InvalidSegment {
            reason: SkipReason::MissingElevation(end.id),
        })?;

        let elevation_change = end_elevation - start_elevation;

        Ok(Self {
            start: start.id,
            end: end.id,
            length,
            elevation_change,
            slope: slope_percentage(elevation_change, length),
            oneway: false,
            name: None,
            geometry: None,
        })
    }

    #[must_use]
    pub fn with_oneway(mut self, oneway: bool) -> Self {
        self.oneway = oneway;
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: Option<LineString<f64>>) -> Self {
        self.geometry = geometry;
        self
    }

    /// Absolute grade, the value every threshold comparison uses
    pub fn abs_slope(&self) -> SlopePercent {
        self.slope.abs()
    }

    /// Grade seen when travelling away from `from`
    pub fn slope_from(&self, from: NodeId) -> SlopePercent {
        if from == self.end {
            -self.slope
        } else {
            self.slope
        }
    }

    /// Elevation change seen when travelling away from `from`
    pub fn elevation_change_from(&self, from: NodeId) -> Meters {
        if from == self.end {
            -self.elevation_change
        } else {
            self.elevation_change
        }
    }

    /// Integer search weight in millimeters, never zero
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn weight(&self) -> u64 {
        ((self.length * 1000.0).round() as u64).max(1)
    }
}

/// Slope percentage = (elevation change / length) * 100
///
/// Scaling before dividing keeps whole-number grades exact.
pub fn slope_percentage(elevation_change: Meters, length: Meters) -> SlopePercent {
    elevation_change * 100.0 / length
}
