//! Header resolution for the roster sheet.
//!
//! The sheet is edited by hand, so the same column shows up under several
//! spellings. All accepted spellings live in one table here; nothing past
//! this boundary sees raw header text.

use std::collections::{HashMap, HashSet};

use super::SourceError;
use crate::models::Weekday;

/// Canonical roster fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    First,
    Last,
    FullName,
    Rank,
    Organization,
    Email,
    Phone,
    Major,
    Contracted,
    PriorService,
    Vehicle,
    Day(Weekday),
}

impl Field {
    pub const PROFILE: [Field; 11] = [
        Field::First,
        Field::Last,
        Field::FullName,
        Field::Rank,
        Field::Organization,
        Field::Email,
        Field::Phone,
        Field::Major,
        Field::Contracted,
        Field::PriorService,
        Field::Vehicle,
    ];

    /// Key used in configuration overrides, e.g. `"rank"` or `"monday"`.
    pub fn key(&self) -> String {
        match self {
            Field::First => "first".into(),
            Field::Last => "last".into(),
            Field::FullName => "name".into(),
            Field::Rank => "rank".into(),
            Field::Organization => "organization".into(),
            Field::Email => "email".into(),
            Field::Phone => "phone".into(),
            Field::Major => "major".into(),
            Field::Contracted => "contracted".into(),
            Field::PriorService => "prior_service".into(),
            Field::Vehicle => "vehicle".into(),
            Field::Day(day) => day.name().to_lowercase(),
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        Self::PROFILE
            .iter()
            .copied()
            .chain(Weekday::ALL.iter().map(|d| Field::Day(*d)))
            .find(|f| f.key() == key)
    }

    fn default_spellings(&self) -> Vec<String> {
        let spellings: &[&str] = match self {
            Field::First => &["First Name", "First", "Given Name", "First name"],
            Field::Last => &["Last Name", "Last", "Surname", "Family name"],
            Field::FullName => &["Name", "Full Name", "Cadet Name", "Cadet"],
            Field::Rank => &["MS level", "MS Level", "MS", "Class", "Level"],
            Field::Organization => &["Academic School", "School", "Campus", "Program"],
            Field::Email => &["School Email", "Email", "Email Address"],
            Field::Phone => &["Phone Number", "Phone", "Cell"],
            Field::Major => &["Academic Major", "Major"],
            Field::Contracted => &["Are you contracted?", "contracted"],
            Field::PriorService => &["Are you prior service? (Guard or otherwise)", "prior service"],
            Field::Vehicle => &[
                "Do you have a vehicle or reliable transportation to?",
                "vehicle",
            ],
            Field::Day(day) => return vec![day.name().to_string()],
        };
        spellings.iter().map(|s| s.to_string()).collect()
    }
}

/// Mapping from canonical field to accepted header spellings, in priority order.
#[derive(Debug, Clone)]
pub struct SchemaAdapter {
    spellings: HashMap<Field, Vec<String>>,
}

impl Default for SchemaAdapter {
    fn default() -> Self {
        let spellings = Field::PROFILE
            .iter()
            .copied()
            .chain(Weekday::ALL.iter().map(|d| Field::Day(*d)))
            .map(|f| (f, f.default_spellings()))
            .collect();
        Self { spellings }
    }
}

/// Column indices for one concrete header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedColumns {
    columns: HashMap<Field, usize>,
}

impl ResolvedColumns {
    pub fn get(&self, field: Field) -> Option<usize> {
        self.columns.get(&field).copied()
    }
}

impl SchemaAdapter {
    /// Extra spellings tried before the built-in ones. Unknown keys are ignored.
    pub fn with_overrides(mut self, overrides: &HashMap<String, Vec<String>>) -> Self {
        for (key, extra) in overrides {
            if let Some(field) = Field::from_key(key) {
                let entry = self.spellings.entry(field).or_default();
                let mut merged = extra.clone();
                merged.append(entry);
                *entry = merged;
            }
        }
        self
    }

    pub fn spellings(&self, field: Field) -> &[String] {
        self.spellings.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    fn candidates(&self, field: Field) -> Vec<String> {
        self.spellings(field)
            .iter()
            .map(|c| c.trim().to_lowercase())
            .collect()
    }

    /// Resolve a header row, failing when required columns are absent.
    ///
    /// Required: a name (first+last, or a single full-name column), rank, and
    /// all five weekday columns. Every field first tries exact
    /// (case-insensitive, trimmed) matches; prefix matching then only
    /// considers headers no other field has claimed, so "School Email" can
    /// never double as the organization column.
    pub fn resolve(&self, headers: &[String]) -> Result<ResolvedColumns, SourceError> {
        let lowered: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let fields: Vec<Field> = Field::PROFILE
            .iter()
            .copied()
            .chain(Weekday::ALL.iter().map(|d| Field::Day(*d)))
            .collect();

        let mut columns: HashMap<Field, usize> = HashMap::new();
        let mut claimed: HashSet<usize> = HashSet::new();

        for field in &fields {
            let exact = self.candidates(*field).iter().find_map(|cand| {
                (0..lowered.len()).find(|i| lowered[*i] == *cand && !claimed.contains(i))
            });
            if let Some(idx) = exact {
                columns.insert(*field, idx);
                claimed.insert(idx);
            }
        }

        for field in &fields {
            if columns.contains_key(field) {
                continue;
            }
            let candidates = self.candidates(*field);
            let prefixed = (0..lowered.len()).find(|i| {
                let h = &lowered[*i];
                !h.is_empty()
                    && !claimed.contains(i)
                    && candidates.iter().any(|cand| h.starts_with(cand.as_str()))
            });
            if let Some(idx) = prefixed {
                columns.insert(*field, idx);
                claimed.insert(idx);
            }
        }

        // "Name" prefix-matches nothing useful once first/last exist
        let has_split_name = columns.contains_key(&Field::First) && columns.contains_key(&Field::Last);
        if has_split_name {
            columns.remove(&Field::FullName);
        }

        let mut missing = Vec::new();
        if !has_split_name && !columns.contains_key(&Field::FullName) {
            missing.push("first/last or name".to_string());
        }
        if !columns.contains_key(&Field::Rank) {
            missing.push(Field::Rank.key());
        }
        for day in Weekday::ALL {
            if !columns.contains_key(&Field::Day(day)) {
                missing.push(day.name().to_string());
            }
        }

        if missing.is_empty() {
            Ok(ResolvedColumns { columns })
        } else {
            Err(SourceError::MissingColumns {
                missing,
                present: headers.to_vec(),
            })
        }
    }
}
