//! Application layer containing the deal lifecycle orchestration.
//!
//! This module defines the `DealEngine`, the single entry point the HTTP and
//! CSV interfaces go through. It checks who is acting, applies domain
//! transitions and commits them through the `DealStore` port.

pub mod engine;
