//! Deal entities, the transition table, pricing rules and storage ports.

pub mod deal;
pub mod lifecycle;
pub mod ports;
pub mod pricing;
