//! Tabular segment records for exchange with external components:
//! one `start_id,end_id,length,elevation_change,slope` row per segment.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::{Error, Meters, NodeId, SlopeGraph, SlopePercent, StreetSegment, ThresholdSubgraph};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub start_id: NodeId,
    pub end_id: NodeId,
    pub length: Meters,
    pub elevation_change: Meters,
    pub slope: SlopePercent,
}

impl From<&StreetSegment> for SegmentRecord {
    fn from(segment: &StreetSegment) -> Self {
        Self {
            start_id: segment.start,
            end_id: segment.end,
            length: segment.length,
            elevation_change: segment.elevation_change,
            slope: segment.slope,
        }
    }
}

/// Writes records as CSV with a header row
pub fn write_segment_records<'a, W, I>(writer: W, segments: I) -> Result<usize, Error>
where
    W: Write,
    I: IntoIterator<Item = &'a StreetSegment>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut count = 0;
    for segment in segments {
        csv_writer.serialize(SegmentRecord::from(segment))?;
        count += 1;
    }
    csv_writer.flush()?;
    Ok(count)
}

impl SlopeGraph {
    /// All segments in id order; returns the number of rows written
    pub fn write_segment_table<W: Write>(&self, writer: W) -> Result<usize, Error> {
        write_segment_records(writer, self.segments().map(|(_, segment)| segment))
    }
}

impl ThresholdSubgraph {
    /// Admitted segments in id order; returns the number of rows written
    pub fn write_segment_table<W: Write>(&self, writer: W) -> Result<usize, Error> {
        write_segment_records(writer, self.segments().map(|(_, segment)| segment))
    }
}
