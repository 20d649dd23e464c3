//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Seeding (wall clock)
//! - Storage (LocalStorage on web)
//! - Timer ownership (interval/timeout registration and teardown)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// A fresh seed from the wall clock. Good enough for promotional games;
/// determinism matters in tests, where seeds are fixed instead.
#[cfg(target_arch = "wasm32")]
pub fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
