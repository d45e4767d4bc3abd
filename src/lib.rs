//! App Queima payment gateway backend.
//!
//! Receives PerfectPay webhook events, verifies their authenticity, and
//! provisions user accounts and subscription plans from approved payments.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
