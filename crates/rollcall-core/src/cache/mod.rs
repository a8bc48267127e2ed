//! Short-lived in-memory caching of the roster table.
//!
//! The sheet is slow and rate-limited, so `CachedSource` keeps the last
//! loaded table for a bounded time-to-live (15 minutes by default) and can
//! refresh it on demand or on a timer.

pub mod manager;

pub use manager::{CachedData, CachedSource, DEFAULT_TTL_MINUTES};
