use std::{collections::BTreeMap, fmt};

use crate::{Meters, NodeId};

/// Why a raw edge did not make it into the graph
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkipReason {
    NonPositiveLength(Meters),
    /// Longer than [`MAX_SEGMENT_LENGTH`](crate::model::MAX_SEGMENT_LENGTH)
    ExcessiveLength(Meters),
    MissingElevation(NodeId),
    SelfLoop,
    /// Another edge joins the same node pair; the shorter one is kept
    DuplicateSegment { kept_length: Meters },
}

impl SkipReason {
    fn label(&self) -> &'static str {
        match self {
            SkipReason::NonPositiveLength(_) => "non-positive length",
            SkipReason::ExcessiveLength(_) => "excessive length",
            SkipReason::MissingElevation(_) => "missing elevation",
            SkipReason::SelfLoop => "self loop",
            SkipReason::DuplicateSegment { .. } => "duplicate segment",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NonPositiveLength(length) => write!(f, "non-positive length {length}"),
            SkipReason::ExcessiveLength(length) => write!(f, "implausible length {length} m"),
            SkipReason::MissingElevation(node) => write!(f, "missing elevation at node {node}"),
            SkipReason::SelfLoop => write!(f, "segment starts and ends at the same node"),
            SkipReason::DuplicateSegment { kept_length } => {
                write!(f, "parallel segment, kept one of length {kept_length}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSegment {
    /// Position of the edge in the raw topology
    pub raw_index: usize,
    pub start: NodeId,
    pub end: NodeId,
    pub reason: SkipReason,
}

/// Build warnings: every raw edge that was dropped, in raw-input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    pub skipped: Vec<SkippedSegment>,
}

impl BuildReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Skip counts keyed by reason label, in label order
    pub fn counts_by_reason(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for skipped in &self.skipped {
            *counts.entry(skipped.reason.label()).or_insert(0) += 1;
        }
        counts
    }

    pub(crate) fn record(&mut self, raw_index: usize, start: NodeId, end: NodeId, reason: SkipReason) {
        log::trace!("Skipping raw edge #{raw_index} ({start} -> {end}): {reason}");
        self.skipped.push(SkippedSegment {
            raw_index,
            start,
            end,
            reason,
        });
    }

    pub(crate) fn sort(&mut self) {
        self.skipped.sort_by_key(|s| s.raw_index);
    }
}
