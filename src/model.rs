use std::{borrow::Cow, collections::BTreeMap, fmt, sync::Arc};

use log::info;
use slopeway_core::prelude::*;

use crate::Error;

/// SlopeModel
///
/// Base street graph of one network kind together with a threshold
/// subgraph for every integer grade in the configured range.
///
/// The model is immutable after construction and can be shared across
/// threads; every subgraph holds a handle to the same base graph.
#[derive(Debug, Clone)]
pub struct SlopeModel {
    graph: Arc<SlopeGraph>,
    report: BuildReport,
    config: SlopeModelConfig,
    thresholds: BTreeMap<u32, ThresholdSubgraph>,
}

impl SlopeModel {
    /// Builds the base graph and precomputes the threshold subgraphs.
    ///
    /// Skipped raw edges do not fail the build; they are listed in
    /// [`SlopeModel::report`].
    ///
    /// # Errors
    ///
    /// Invalid configuration, malformed topology or threshold range
    pub fn build<E: ElevationLookup>(
        raw: &RawTopology,
        elevations: &E,
        config: SlopeModelConfig,
    ) -> Result<Self, Error> {
        config.validate()?;

        let GraphBuild { graph, report } = build_graph(raw, elevations, config.network)?;
        let graph = Arc::new(graph);

        let (min, max) = (config.min_threshold, config.max_threshold());
        let thresholds = if config.parallel {
            compute_thresholds_par(&graph, min, max)?
        } else {
            compute_thresholds(&graph, min, max)?
        };

        info!(
            "{}: {} thresholds precomputed ({min}%..={max}%)",
            config.network.label(),
            thresholds.len()
        );

        Ok(Self {
            graph,
            report,
            config,
            thresholds,
        })
    }

    pub fn graph(&self) -> &Arc<SlopeGraph> {
        &self.graph
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub fn config(&self) -> &SlopeModelConfig {
        &self.config
    }

    pub fn network(&self) -> NetworkKind {
        self.config.network
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn segment_count(&self) -> usize {
        self.graph.segment_count()
    }

    /// Precomputed integer thresholds in ascending order
    pub fn thresholds(&self) -> impl Iterator<Item = u32> + '_ {
        self.thresholds.keys().copied()
    }

    pub fn subgraph(&self, threshold: u32) -> Option<&ThresholdSubgraph> {
        self.thresholds.get(&threshold)
    }

    /// Precomputed subgraph when `threshold` is one of the integer
    /// thresholds, otherwise a freshly filtered one.
    ///
    /// # Errors
    ///
    /// `InvalidThreshold` unless `threshold` is positive and finite
    pub fn subgraph_for(&self, threshold: SlopePercent) -> Result<Cow<'_, ThresholdSubgraph>, Error> {
        if threshold.fract() == 0.0 && threshold >= 1.0 && threshold <= f64::from(u32::MAX) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let key = threshold as u32;
            if let Some(subgraph) = self.thresholds.get(&key) {
                return Ok(Cow::Borrowed(subgraph));
            }
        }
        Ok(Cow::Owned(filter(&self.graph, threshold)?))
    }

    /// Number of admitted segments per precomputed threshold
    pub fn coverage(&self) -> Vec<(u32, usize)> {
        self.thresholds
            .iter()
            .map(|(&threshold, subgraph)| (threshold, subgraph.segment_count()))
            .collect()
    }
}

impl fmt::Display for SlopeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SlopeModel({}) with {} nodes, {} segments, {} thresholds and {} skipped edges",
            self.config.network.label(),
            self.graph.node_count(),
            self.graph.segment_count(),
            self.thresholds.len(),
            self.report.skipped_count()
        )
    }
}
