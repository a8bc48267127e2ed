//! Core library for rollcall.
//!
//! Answers "which cadets are free during this window" from a roster sheet in
//! which each cadet lists busy blocks per weekday. The pure matching lives
//! in [`availability`]; [`source`] and [`cache`] supply the table it runs on.

pub mod availability;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod source;
pub mod utils;

pub use availability::{find_available, is_free, lookup_person, AvailabilityService, QueryWindow};
pub use cache::CachedSource;
pub use config::Config;
pub use error::{AvailabilityError, InputError};
pub use models::{Interval, Person, Weekday};
pub use source::{PeopleSource, RosterSource, SourceError};
