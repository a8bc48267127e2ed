use std::path::PathBuf;

use tracing::debug;

use super::{parse_people_csv, PeopleSource, SchemaAdapter, SourceError};
use crate::models::Person;

/// A CSV export saved on local disk.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
    schema: SchemaAdapter,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            schema: SchemaAdapter::default(),
        }
    }

    pub fn with_schema(mut self, schema: SchemaAdapter) -> Self {
        self.schema = schema;
        self
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl PeopleSource for CsvFileSource {
    async fn load_people(&self) -> Result<Vec<Person>, SourceError> {
        debug!(path = %self.path.display(), "Reading roster CSV");
        let contents = tokio::fs::read(&self.path).await?;
        parse_people_csv(contents.as_slice(), &self.schema)
    }
}
