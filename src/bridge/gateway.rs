// In: src/bridge/gateway.rs

//! The gateway that carries one interpolation request across the routine
//! boundary and archives what came back.
//!
//! The archival ordering is the point of this type: the log entry exists
//! before the outcome is returned, so a caller holding an outcome may rely on
//! the audit trail already containing it.

use crate::bridge::format;
use crate::error::CurveCacheError;
use crate::storage::{InterpolationRoutine, ResultLog};
use crate::types::{InterpolationOutcome, InterpolationRequest, ResultLogEntry};

pub struct InterpolationGateway<'a, B: InterpolationRoutine + ResultLog> {
    backend: &'a mut B,
}

impl<'a, B: InterpolationRoutine + ResultLog> InterpolationGateway<'a, B> {
    pub fn new(backend: &'a mut B) -> Self {
        Self { backend }
    }

    /// Issues one logical request and returns its decoded outcome.
    ///
    /// Non-zero routine codes are data, not failures: the outcome carries
    /// them and still gets archived. `Err` is reserved for infrastructure
    /// (`Connection`, `Sqlite`) and contract violations (`Protocol`), neither
    /// of which produces an archivable outcome.
    pub fn evaluate(
        &mut self,
        request: &InterpolationRequest,
    ) -> Result<InterpolationOutcome, CurveCacheError> {
        // 1. One logical request against the routine boundary.
        let row = self.backend.call_interpolation(request)?;

        // 2. Decode exactly one structured row (or its absence).
        let outcome = format::decode_procedure_row(row)?;
        if !outcome.is_success() {
            log::warn!(
                "routine returned code {} for {} over dataset '{}' at x={}: {}",
                outcome.error_code,
                request.kind,
                request.dataset_id,
                request.target_x,
                outcome.error_message
            );
        }

        // 3. Archive the request/outcome pair. This happens-before the
        //    return below; callers may rely on the entry existing.
        let entry = ResultLogEntry::record(request, &outcome);
        self.backend.append(&entry)?;

        // 4. Hand the outcome to the caller.
        Ok(outcome)
    }
}
