use tracing::debug;

use super::query::{available_for, lookup_person, normalize_query, QueryWindow};
use crate::error::AvailabilityError;
use crate::models::Person;
use crate::source::PeopleSource;

/// Availability queries over an injected roster source.
///
/// Requests are validated before the table is loaded, so a bad request
/// never costs a sheet fetch.
pub struct AvailabilityService<S> {
    source: S,
}

impl<S: PeopleSource> AvailabilityService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn find_available(
        &self,
        day: &str,
        start: &str,
        end: &str,
        org: Option<&str>,
    ) -> Result<Vec<Person>, AvailabilityError> {
        let query = QueryWindow::parse(day, start, end)?;
        let people = self.source.load_people().await?;
        let matched = available_for(&people, query, org);
        debug!(
            day = %query.day,
            window = %query.window,
            candidates = people.len(),
            matched = matched.len(),
            "Availability query"
        );
        Ok(matched)
    }

    pub async fn lookup_person(
        &self,
        query: &str,
        org: Option<&str>,
    ) -> Result<Person, AvailabilityError> {
        normalize_query(query)?;
        let people = self.source.load_people().await?;
        lookup_person(&people, query, org)
    }
}
