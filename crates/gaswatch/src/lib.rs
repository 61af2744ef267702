//! Top-level facade crate for gaswatch.
//!
//! Re-exports the domain model and the server library so users can depend on a single crate.

pub mod core {
    pub use gaswatch_core::*;
}

pub mod server {
    pub use gaswatch_server::*;
}
