//! Domain layer: pure business logic with no I/O.

pub mod plan;
pub mod provisioning;
pub mod webhook;
