//! Availability matching.
//!
//! Each cadet's busy cell for a weekday is parsed into intervals, the
//! requested window is tested against them with half-open overlap, and the
//! cadets who are free are ranked by class level and name.
//!
//! A blank cell means the cadet is free all day: the sheet records busy time,
//! not availability.

pub mod interval;
pub mod overlap;
pub mod query;
pub mod ranking;
pub mod service;

pub use interval::{format_clock, parse_busy_cell, parse_clock};
pub use overlap::{conflicts, is_free};
pub use query::{
    available_for, find_available, lookup_person, parse_window, person_schedule, QueryWindow,
};
pub use ranking::{rank_level, rank_people, sort_key, RANK_SENTINEL};
pub use service::AvailabilityService;
