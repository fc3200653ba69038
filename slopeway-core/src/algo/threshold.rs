//! Threshold filtering. A subgraph at threshold `t` keeps every node and
//! exactly the segments with `|slope| <= t`, so admitted sets only grow as
//! the threshold increases.

use std::{collections::BTreeMap, sync::Arc};

use fixedbitset::FixedBitSet;
use itertools::Itertools;
use log::debug;
use rayon::prelude::*;

use crate::{Error, SegmentId, SlopePercent, model::SlopeGraph, model::ThresholdSubgraph};

/// Derives the subgraph of segments whose absolute slope does not exceed
/// `threshold`.
///
/// # Errors
///
/// `Error::InvalidThreshold` unless `threshold` is positive and finite
pub fn filter(graph: &Arc<SlopeGraph>, threshold: SlopePercent) -> Result<ThresholdSubgraph, Error> {
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(Error::InvalidThreshold(format!(
            "threshold must be a positive number, got {threshold}"
        )));
    }

    let mut admitted = FixedBitSet::with_capacity(graph.segment_count());
    for (id, segment) in graph.segments() {
        if admits(segment.abs_slope(), threshold) {
            admitted.insert(id);
        }
    }

    Ok(ThresholdSubgraph::from_parts(
        Arc::clone(graph),
        threshold,
        admitted,
    ))
}

/// One subgraph per integer threshold in `min..=max`.
///
/// Segments are visited once in ascending slope order and the admitted set
/// is extended as the threshold sweeps upward.
///
/// # Errors
///
/// `Error::InvalidThreshold` if `min` is zero or greater than `max`
pub fn compute_thresholds(
    graph: &Arc<SlopeGraph>,
    min: u32,
    max: u32,
) -> Result<BTreeMap<u32, ThresholdSubgraph>, Error> {
    validate_range(min, max)?;

    let order = segments_by_slope(graph);
    let mut admitted = FixedBitSet::with_capacity(graph.segment_count());
    let mut cursor = 0;
    let mut subgraphs = BTreeMap::new();

    for threshold in min..=max {
        let limit = f64::from(threshold);
        while let Some(&(id, slope)) = order.get(cursor) {
            if !admits(slope, limit) {
                break;
            }
            admitted.insert(id);
            cursor += 1;
        }
        debug!(
            "Threshold {threshold}%: {} of {} segments admitted",
            cursor,
            order.len()
        );
        subgraphs.insert(
            threshold,
            ThresholdSubgraph::from_parts(Arc::clone(graph), limit, admitted.clone()),
        );
    }

    Ok(subgraphs)
}

/// Same output as [`compute_thresholds`], each threshold filtered
/// independently on the rayon pool.
///
/// # Errors
///
/// `Error::InvalidThreshold` if `min` is zero or greater than `max`
pub fn compute_thresholds_par(
    graph: &Arc<SlopeGraph>,
    min: u32,
    max: u32,
) -> Result<BTreeMap<u32, ThresholdSubgraph>, Error> {
    validate_range(min, max)?;

    (min..=max)
        .into_par_iter()
        .map(|threshold| filter(graph, f64::from(threshold)).map(|sub| (threshold, sub)))
        .collect()
}

fn admits(abs_slope: SlopePercent, threshold: SlopePercent) -> bool {
    abs_slope <= threshold
}

fn validate_range(min: u32, max: u32) -> Result<(), Error> {
    if min == 0 {
        return Err(Error::InvalidThreshold(
            "minimum threshold must be at least 1".to_string(),
        ));
    }
    if min > max {
        return Err(Error::InvalidThreshold(format!(
            "minimum threshold {min} exceeds maximum {max}"
        )));
    }
    Ok(())
}

/// `(segment, |slope|)` sorted by slope, ties by id
fn segments_by_slope(graph: &SlopeGraph) -> Vec<(SegmentId, SlopePercent)> {
    graph
        .segments()
        .map(|(id, segment)| (id, segment.abs_slope()))
        .sorted_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
        .collect()
}
