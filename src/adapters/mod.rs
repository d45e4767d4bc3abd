//! Adapters layer: concrete implementations of the ports plus the HTTP
//! surface.

pub mod email;
pub mod http;
pub mod memory;
