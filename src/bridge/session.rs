// In: src/bridge/session.rs

//! The stateful session facade.
//!
//! A `CurveSession` acquires the single backend connection once, ensures the
//! schema, and exposes both pipelines over it. The connection is scoped to
//! the session value: components borrow it through the storage seams, and it
//! is released when the session drops, success or failure alike. Exactly one
//! pipeline runs on a session at a time.

use std::sync::Arc;

use crate::bridge::gateway::InterpolationGateway;
use crate::config::CurveCacheConfig;
use crate::error::CurveCacheError;
use crate::routines;
use crate::sample_pipeline::{run_bulk_pipeline, BulkRunReport, SamplingPlan};
use crate::storage::{PointStore, ResultLog, SqliteBackend};
use crate::types::{
    InterpolationKind, InterpolationOutcome, InterpolationRequest, ResultLogEntry, SamplePoint,
};

pub struct CurveSession {
    backend: SqliteBackend,
    config: Arc<CurveCacheConfig>,
}

impl CurveSession {
    /// Opens the configured store and ensures the schema. The connection this
    /// acquires is held for the lifetime of the session.
    pub fn open(config: Arc<CurveCacheConfig>) -> Result<Self, CurveCacheError> {
        config.validate()?;
        let backend = SqliteBackend::open(&config.storage)?;
        log::info!("session opened over {:?}", config.storage);
        Ok(Self { backend, config })
    }

    /// Atomically replaces the named dataset's input points.
    pub fn load_points(
        &mut self,
        dataset_id: &str,
        points: &[SamplePoint],
    ) -> Result<(), CurveCacheError> {
        self.backend.replace_points(dataset_id, points)
    }

    /// The dataset's current points, empty for an unknown id.
    pub fn points(&self, dataset_id: &str) -> Result<Vec<SamplePoint>, CurveCacheError> {
        self.backend.get_points(dataset_id)
    }

    /// Runs the interactive pipeline: one routine call, archived and returned.
    pub fn evaluate(
        &mut self,
        request: &InterpolationRequest,
    ) -> Result<InterpolationOutcome, CurveCacheError> {
        InterpolationGateway::new(&mut self.backend).evaluate(request)
    }

    /// The audit trail for one dataset and kind, in call order.
    pub fn results(
        &self,
        dataset_id: &str,
        kind: InterpolationKind,
    ) -> Result<Vec<ResultLogEntry>, CurveCacheError> {
        self.backend.query(dataset_id, kind)
    }

    /// Runs the bulk pipeline: samples a client-side curve of the given kind
    /// over the dataset's points and commits the pairs in batches.
    ///
    /// The curve refuses targets outside the fitted range; the configured
    /// out-of-range policy decides what the run does with those samples.
    pub fn bulk_sample(
        &mut self,
        plan: &SamplingPlan,
        dataset_id: &str,
        kind: InterpolationKind,
    ) -> Result<BulkRunReport, CurveCacheError> {
        let points = self.backend.get_points(dataset_id)?;
        let mut xs = Vec::with_capacity(points.len());
        let mut ys = Vec::with_capacity(points.len());
        for p in &points {
            xs.push(p.x);
            ys.push(p.y);
        }

        let degree = self.config.default_polynomial_degree;
        let curve = |x: f64| -> Result<f64, CurveCacheError> {
            let eval = routines::evaluate(kind, &xs, &ys, x, degree)?;
            if eval.extrapolated {
                return Err(CurveCacheError::Domain {
                    x,
                    min: xs[0],
                    max: xs[xs.len() - 1],
                });
            }
            Ok(eval.y)
        };

        run_bulk_pipeline(
            plan,
            curve,
            &mut self.backend,
            dataset_id,
            kind,
            self.config.flush_threshold,
            self.config.out_of_range,
        )
    }
}
