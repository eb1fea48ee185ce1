//! State management module
//!
//! This module holds everything the viewer knows, independent of the UI:
//! - Sibling resolution and natural sorting (siblings.rs)
//! - Open sessions and wraparound navigation (session.rs)
//! - The registry of open sessions (registry.rs)
//! - User configuration (config.rs)
//! - Background image metadata probing (probe.rs)

pub mod config;
pub mod probe;
pub mod registry;
pub mod session;
pub mod siblings;
