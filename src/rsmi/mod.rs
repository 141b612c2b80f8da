//! ROCm SMI abstraction layer
//!
//! Native bindings, the adapter trait the queries are written against, the
//! runtime-loaded library implementing it, and the facade tying them to an
//! initialization gate.

pub mod bindings;
pub mod gate;
pub mod library;
pub mod traits;
pub mod wrapper;

pub use gate::InitGate;
pub use library::RsmiLibrary;
pub use traits::RsmiAdapter;
pub use wrapper::RocmSmi;
