//! Initialization precondition shared by every query

use crate::domain::QueryResult;
use crate::rsmi::InitGate;

/// Run `query` only when the gate is ready
///
/// Otherwise return the gate's status with a neutral payload.
#[inline]
pub fn gated<R, F>(gate: &InitGate, query: F) -> R
where
    R: QueryResult,
    F: FnOnce() -> R,
{
    if !gate.is_ready() {
        return R::neutral(gate.status());
    }
    query()
}
