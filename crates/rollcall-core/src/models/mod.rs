//! Data models for roster entities.
//!
//! This module contains the data structures shared by the parser, the
//! availability query and the data sources:
//!
//! - `Person`: one roster row with contact details and busy blocks
//! - `Weekday`: the five class days a busy column can describe
//! - `Interval`: a half-open busy block in minutes since midnight

pub mod person;
pub mod schedule;

pub use person::Person;
pub use schedule::{Interval, Weekday, LAST_MINUTE};
