//! Supported clock frequency list

use crate::domain::{ClockDomain, Frequencies, QueryResult};
use crate::queries::envelope::gated;
use crate::queries::materialize::materialize;
use crate::rsmi::bindings::RsmiFrequencies;
use crate::rsmi::{InitGate, RsmiAdapter};

/// Supported frequencies of `domain` and the currently selected index
///
/// On success the list holds the first `num_supported` entries the
/// adapter reported, capped at the native capacity. On failure the list
/// is empty and nothing is allocated.
pub fn frequencies<A>(gate: &InitGate, adapter: &A, dv_ind: u32, domain: ClockDomain) -> Frequencies
where
    A: RsmiAdapter + ?Sized,
{
    gated(gate, || {
        let mut native = RsmiFrequencies::default();
        let status = adapter.gpu_clk_freq(dv_ind, domain, &mut native);
        if !status.is_success() {
            return Frequencies::neutral(status);
        }

        let frequencies = materialize(native.num_supported, &native.frequency);
        Frequencies::new(status, native.current, frequencies)
    })
}
