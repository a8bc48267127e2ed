use serde::{Deserialize, Serialize};

use super::interval::parse_clock;
use super::overlap::{conflicts, is_free};
use super::ranking::rank_people;
use crate::error::{AvailabilityError, InputError};
use crate::models::{Interval, Person, Weekday};
use crate::utils::contains_ignore_case;

/// A validated `(day, start, end)` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryWindow {
    pub day: Weekday,
    pub window: Interval,
}

impl QueryWindow {
    pub fn parse(day: &str, start: &str, end: &str) -> Result<Self, InputError> {
        let day = Weekday::parse(day).ok_or_else(|| InputError::UnknownDay(day.trim().to_string()))?;
        let window = parse_window(start, end)?;
        Ok(Self { day, window })
    }
}

/// Validate an `HHMM` pair into a non-empty window.
pub fn parse_window(start: &str, end: &str) -> Result<Interval, InputError> {
    let start_min = parse_clock(start).ok_or_else(|| InputError::BadClock {
        field: "start",
        value: start.to_string(),
    })?;
    let end_min = parse_clock(end).ok_or_else(|| InputError::BadClock {
        field: "end",
        value: end.to_string(),
    })?;
    Interval::new(start_min, end_min).ok_or_else(|| InputError::EmptyWindow {
        start: start.trim().to_string(),
        end: end.trim().to_string(),
    })
}

/// A sheet without an organization column cannot be filtered by it, so
/// everyone passes; a blank cell in an existing column does not.
fn in_organization(person: &Person, org: Option<&str>) -> bool {
    match (org, person.organization.as_deref()) {
        (Some(org), Some(organization)) => contains_ignore_case(organization, org),
        _ => true,
    }
}

/// People free for the whole window, ranked.
pub fn available_for(people: &[Person], query: QueryWindow, org: Option<&str>) -> Vec<Person> {
    let mut matched: Vec<Person> = people
        .iter()
        .filter(|p| in_organization(p, org))
        .filter(|p| is_free(p.busy_on(query.day), query.window))
        .cloned()
        .collect();
    rank_people(&mut matched);
    matched
}

/// Validate the request, then return everyone free during it.
///
/// `org` is a case-insensitive substring filter on the organization field
/// and is applied before any interval test. It is ignored when the roster
/// has no organization column.
pub fn find_available(
    people: &[Person],
    day: &str,
    start: &str,
    end: &str,
    org: Option<&str>,
) -> Result<Vec<Person>, AvailabilityError> {
    let query = QueryWindow::parse(day, start, end)?;
    Ok(available_for(people, query, org))
}

pub(crate) fn normalize_query(query: &str) -> Result<String, InputError> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        Err(InputError::EmptyQuery)
    } else {
        Ok(q)
    }
}

fn matches_query(person: &Person, q: &str) -> bool {
    if q.contains('@') {
        return person
            .email
            .as_deref()
            .is_some_and(|email| email.trim().to_lowercase() == q);
    }
    let parts: Vec<&str> = q.split_whitespace().collect();
    let [given @ .., last] = parts.as_slice() else {
        return false;
    };
    if given.is_empty() || person.last.trim().to_lowercase() != *last {
        return false;
    }
    // "Mary Ann Evans" and "Mary Evans" both find first name "Mary Ann";
    // "Ann Q Archer" finds first name "Ann".
    let first = person.first.to_lowercase();
    let first_words: Vec<&str> = first.split_whitespace().collect();
    first_words.as_slice() == given || first_words.first() == given.first()
}

/// Find one cadet by school email or by "First Last".
pub fn lookup_person(
    people: &[Person],
    query: &str,
    org: Option<&str>,
) -> Result<Person, AvailabilityError> {
    let q = normalize_query(query)?;
    people
        .iter()
        .filter(|p| in_organization(p, org))
        .find(|p| matches_query(p, &q))
        .cloned()
        .ok_or_else(|| AvailabilityError::NotFound(query.trim().to_string()))
}

/// Busy blocks that keep `person` from the requested window.
pub fn person_schedule(person: &Person, query: QueryWindow) -> Vec<Interval> {
    conflicts(person.busy_on(query.day), query.window)
}
