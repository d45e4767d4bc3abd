//! Application layer: use-case handlers wired over `Arc<dyn Port>`.

pub mod handlers;
