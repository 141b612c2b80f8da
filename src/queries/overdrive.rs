//! Two-step overdrive query
//!
//! Graphics overdrive is read first, memory overdrive second. The chain
//! stops at the first failed read: later reads are not attempted, and a
//! field is only filled from a read that succeeded.

use crate::domain::OverdriveLevels;
use crate::queries::envelope::gated;
use crate::rsmi::{InitGate, RsmiAdapter};

use std::ops::ControlFlow;

/// Progress through the overdrive reads
///
/// Finished states (all reads done, or a read failed) are represented by
/// `ControlFlow::Break` carrying the final result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OverdriveRead {
    NotStarted,
    GraphicsRead { graphics: u32 },
}

impl OverdriveRead {
    /// Perform the next read
    fn step<A>(self, adapter: &A, dv_ind: u32) -> ControlFlow<OverdriveLevels, Self>
    where
        A: RsmiAdapter + ?Sized,
    {
        match self {
            Self::NotStarted => {
                let mut graphics = 0;
                let status = adapter.overdrive_level(dv_ind, &mut graphics);
                if !status.is_success() {
                    return ControlFlow::Break(OverdriveLevels::graphics_failed(status));
                }
                ControlFlow::Continue(Self::GraphicsRead { graphics })
            }
            Self::GraphicsRead { graphics } => {
                let mut memory = 0;
                let status = adapter.mem_overdrive_level(dv_ind, &mut memory);
                if !status.is_success() {
                    return ControlFlow::Break(OverdriveLevels::memory_failed(status, graphics));
                }
                ControlFlow::Break(OverdriveLevels::read(graphics, memory))
            }
        }
    }
}

/// Graphics and memory overdrive levels
///
/// The status is that of the last read attempted, so it is success only
/// when both reads succeeded.
pub fn overdrive_levels<A>(gate: &InitGate, adapter: &A, dv_ind: u32) -> OverdriveLevels
where
    A: RsmiAdapter + ?Sized,
{
    gated(gate, || {
        let mut state = OverdriveRead::NotStarted;
        loop {
            match state.step(adapter, dv_ind) {
                ControlFlow::Continue(next) => state = next,
                ControlFlow::Break(levels) => return levels,
            }
        }
    })
}
