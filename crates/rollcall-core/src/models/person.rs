use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Interval, Weekday};
use crate::utils::format_phone;

/// One row of the roster/availability sheet.
///
/// Identity is positional: `row` is the 0-based data row in the source table,
/// so the same cadet can move if the sheet is re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub row: usize,
    pub first: String,
    pub last: String,
    /// Rank/level exactly as entered, e.g. "MS3".
    pub rank: String,
    /// Numeric level extracted from `rank`, if any.
    pub rank_level: Option<u32>,
    /// `None` when the sheet has no organization column at all.
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub contracted: Option<String>,
    #[serde(rename = "priorService", default)]
    pub prior_service: Option<String>,
    #[serde(default)]
    pub vehicle: Option<String>,
    #[serde(rename = "busyByDay", default)]
    pub busy_by_day: BTreeMap<Weekday, Vec<Interval>>,
}

impl Person {
    pub fn full_name(&self) -> String {
        match (self.first.is_empty(), self.last.is_empty()) {
            (false, false) => format!("{} {}", self.first, self.last),
            (false, true) => self.first.clone(),
            (true, false) => self.last.clone(),
            (true, true) => String::new(),
        }
    }

    pub fn display_name(&self) -> String {
        if self.first.is_empty() {
            self.last.clone()
        } else {
            format!("{}, {}", self.last, self.first)
        }
    }

    /// Busy blocks for `day`; empty when the cell was blank.
    pub fn busy_on(&self, day: Weekday) -> &[Interval] {
        self.busy_by_day
            .get(&day)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn rank_display(&self) -> String {
        if self.rank.trim().is_empty() {
            "-".to_string()
        } else {
            self.rank.trim().to_string()
        }
    }

    pub fn phone_display(&self) -> Option<String> {
        self.phone
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(format_phone)
    }
}
