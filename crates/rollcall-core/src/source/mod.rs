//! Data-access boundary for the roster/availability sheet.
//!
//! A `PeopleSource` hands the core an already-materialized table. Sources
//! own everything about fetching: file IO, HTTP, retries and header
//! resolution. Any failure is returned as a `SourceError`; a source never
//! substitutes an empty table for one it could not read.

pub mod error;
pub mod file;
pub mod http;
pub mod schema;
pub mod table;

use std::future::Future;

pub use error::SourceError;
pub use file::CsvFileSource;
pub use http::HttpCsvSource;
pub use schema::{Field, SchemaAdapter};
pub use table::parse_people_csv;

use crate::config::Config;
use crate::models::Person;

pub trait PeopleSource: Send + Sync {
    /// Load the current roster snapshot.
    fn load_people(&self) -> impl Future<Output = Result<Vec<Person>, SourceError>> + Send;
}

/// A fixed in-memory table.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    people: Vec<Person>,
}

impl StaticSource {
    pub fn new(people: Vec<Person>) -> Self {
        Self { people }
    }
}

impl PeopleSource for StaticSource {
    async fn load_people(&self) -> Result<Vec<Person>, SourceError> {
        Ok(self.people.clone())
    }
}

impl<S: PeopleSource> PeopleSource for std::sync::Arc<S> {
    fn load_people(&self) -> impl Future<Output = Result<Vec<Person>, SourceError>> + Send {
        (**self).load_people()
    }
}

/// The source named by configuration: a local export or a published URL.
#[derive(Clone)]
pub enum RosterSource {
    File(CsvFileSource),
    Http(HttpCsvSource),
}

impl RosterSource {
    /// A local CSV path wins over a sheet URL when both are configured.
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        let schema = config.schema();
        if let Some(ref path) = config.csv_path {
            return Ok(RosterSource::File(CsvFileSource::new(path).with_schema(schema)));
        }
        if let Some(ref url) = config.sheet_csv_url {
            let source = HttpCsvSource::with_timeout(url.clone(), config.request_timeout())?;
            return Ok(RosterSource::Http(source.with_schema(schema)));
        }
        Err(SourceError::NotConfigured)
    }

    pub fn describe(&self) -> String {
        match self {
            RosterSource::File(source) => source.path().display().to_string(),
            RosterSource::Http(source) => source.url().to_string(),
        }
    }
}

impl PeopleSource for RosterSource {
    async fn load_people(&self) -> Result<Vec<Person>, SourceError> {
        match self {
            RosterSource::File(source) => source.load_people().await,
            RosterSource::Http(source) => source.load_people().await,
        }
    }
}
