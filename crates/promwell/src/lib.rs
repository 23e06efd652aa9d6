//! Top-level facade crate for promwell.
//!
//! Re-exports the core registry types and the gateway library so users can
//! depend on a single crate.

pub mod core {
    pub use promwell_core::*;
}

pub mod gateway {
    pub use promwell_gateway::*;
}
