// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the public-facing API of the curvecache library. It owns the
// contract with the server-side interpolation routine and completely
// encapsulates the storage backend behind the session facade. It is the
// authoritative boundary between callers and the internal pipeline logic.
//
// Data Flow (Interactive):
//
//   1. [Stateful Facade (CurveSession)]     -> Receives an InterpolationRequest
//         |
//         `-> delegates per request ->
//
//   2. [Gateway (InterpolationGateway)]     -> Issues one logical routine call
//         |
//         `-> a. Backend resolves the dataset's point columns and runs the kernel
//         |
//         `-> b. `format::decode_procedure_row` turns the raw row into an outcome
//         |
//         `-> c. The request/outcome pair is archived in the result log
//         |
//         `-> Returns `Result<InterpolationOutcome>` (archived before returned)
//
// Data Flow (Bulk):
//
//   1. [Stateful Facade (CurveSession)]     -> Receives a SamplingPlan
//         |
//         `-> builds a client-side curve over the dataset's points
//         |
//   2. [Sample Pipeline (run_bulk_pipeline)] -> generator -> batching writer -> sink
//         |
//         `-> Returns `Result<BulkRunReport>`
//
// ====================================================================================

pub mod format;
pub mod gateway;
pub mod session;

// --- High-Level Stateful API ---
pub use session::CurveSession;

// --- Low-Level API (for custom backends and testing) ---
pub use format::{decode_procedure_row, ProcedureRow};
pub use gateway::InterpolationGateway;
