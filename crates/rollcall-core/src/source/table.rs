use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use super::schema::{Field, ResolvedColumns, SchemaAdapter};
use super::SourceError;
use crate::availability::{parse_busy_cell, rank_level};
use crate::models::{Person, Weekday};

fn cell(record: &StringRecord, cols: &ResolvedColumns, field: Field) -> String {
    cols.get(field)
        .and_then(|idx| record.get(idx))
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn optional_cell(record: &StringRecord, cols: &ResolvedColumns, field: Field) -> Option<String> {
    Some(cell(record, cols, field)).filter(|s| !s.is_empty())
}

/// Split "Jane Q Public" into ("Jane Q", "Public"); a single word is a first name.
fn split_full_name(name: &str) -> (String, String) {
    let parts: Vec<&str> = name.split_whitespace().collect();
    match parts.as_slice() {
        [] => (String::new(), String::new()),
        [only] => (only.to_string(), String::new()),
        [rest @ .., last] => (rest.join(" "), last.to_string()),
    }
}

fn person_from_record(row: usize, record: &StringRecord, cols: &ResolvedColumns) -> Person {
    let (first, last) = if cols.get(Field::First).is_some() {
        (
            cell(record, cols, Field::First),
            cell(record, cols, Field::Last),
        )
    } else {
        split_full_name(&cell(record, cols, Field::FullName))
    };

    let rank = cell(record, cols, Field::Rank);
    let busy_by_day = Weekday::ALL
        .iter()
        .filter_map(|day| {
            let busy = parse_busy_cell(&cell(record, cols, Field::Day(*day)));
            (!busy.is_empty()).then_some((*day, busy))
        })
        .collect();

    Person {
        row,
        first,
        last,
        rank_level: rank_level(&rank),
        rank,
        organization: cols
            .get(Field::Organization)
            .map(|_| cell(record, cols, Field::Organization)),
        email: optional_cell(record, cols, Field::Email),
        phone: optional_cell(record, cols, Field::Phone),
        major: optional_cell(record, cols, Field::Major),
        contracted: optional_cell(record, cols, Field::Contracted),
        prior_service: optional_cell(record, cols, Field::PriorService),
        vehicle: optional_cell(record, cols, Field::Vehicle),
        busy_by_day,
    }
}

/// Materialize the people table from a CSV export.
///
/// Short rows are tolerated; rows without any name are skipped but still
/// count toward `row`, so positions match the sheet.
pub fn parse_people_csv<R: Read>(reader: R, schema: &SchemaAdapter) -> Result<Vec<Person>, SourceError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let cols = schema.resolve(&headers)?;

    let mut people = Vec::new();
    let mut skipped = 0usize;
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let person = person_from_record(row, &record, &cols);
        if person.first.is_empty() && person.last.is_empty() {
            skipped += 1;
            continue;
        }
        people.push(person);
    }

    debug!(people = people.len(), skipped, "Parsed roster table");
    Ok(people)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::{find_available, lookup_person};
    use crate::models::Interval;

    const SHEET: &str = "\
Timestamp,First Name,Last Name,MS level,Academic School,School Email,Phone Number,Monday,Tuesday,Wednesday,Thursday,Friday
1/5/2025,Ann,Archer,MS2,GSU,ann@gsu.edu,3185550100,0900-1000,,N/A,,
1/5/2025,Ben,Baker,3,ULM,,,,\"0800-0900, 1330-1500\",,,
1/6/2025,,,MS1,GSU,,,,,,,
1/6/2025,Cat,Carter,,GSU,,,0930-0945; garbage,,,,1200-1300
";

    #[test]
    fn test_parse_roster_sheet() {
        let people = parse_people_csv(SHEET.as_bytes(), &SchemaAdapter::default()).unwrap();
        assert_eq!(people.len(), 3);

        let ann = &people[0];
        assert_eq!(ann.row, 0);
        assert_eq!((ann.first.as_str(), ann.last.as_str()), ("Ann", "Archer"));
        assert_eq!(ann.rank_level, Some(2));
        assert_eq!(ann.organization.as_deref(), Some("GSU"));
        assert_eq!(ann.email.as_deref(), Some("ann@gsu.edu"));
        assert_eq!(ann.busy_on(Weekday::Monday), &[Interval::new(540, 600).unwrap()]);
        assert!(ann.busy_on(Weekday::Wednesday).is_empty());
        assert!(!ann.busy_by_day.contains_key(&Weekday::Wednesday));

        let ben = &people[1];
        assert_eq!(ben.rank_level, Some(3));
        assert_eq!(ben.email, None);
        assert_eq!(ben.busy_on(Weekday::Tuesday).len(), 2);

        // blank-name row is skipped but keeps its position
        let cat = &people[2];
        assert_eq!(cat.row, 3);
        assert_eq!(cat.rank_level, None);
        assert_eq!(cat.busy_on(Weekday::Monday), &[Interval::new(570, 585).unwrap()]);
        assert_eq!(cat.busy_on(Weekday::Friday), &[Interval::new(720, 780).unwrap()]);
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let sheet = "First,Last,MS,Monday,Tuesday,Wednesday,Thursday,Friday\nDee,Dunn,MS4,0700-0800\n";
        let people = parse_people_csv(sheet.as_bytes(), &SchemaAdapter::default()).unwrap();
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].busy_on(Weekday::Monday).len(), 1);
        assert!(people[0].busy_on(Weekday::Friday).is_empty());
    }

    #[test]
    fn test_full_name_column_is_split() {
        let sheet = "Name,MS,Monday,Tuesday,Wednesday,Thursday,Friday\nMary Ann Evans,MS1,,,,,\nCher,MS2,,,,,\n";
        let people = parse_people_csv(sheet.as_bytes(), &SchemaAdapter::default()).unwrap();
        assert_eq!((people[0].first.as_str(), people[0].last.as_str()), ("Mary Ann", "Evans"));
        assert_eq!((people[1].first.as_str(), people[1].last.as_str()), ("Cher", ""));
    }

    #[test]
    fn test_split_full_name_is_found_by_lookup() {
        let sheet = "Name,MS,Monday,Tuesday,Wednesday,Thursday,Friday\nMary Ann Evans,MS1,,,,,\n";
        let people = parse_people_csv(sheet.as_bytes(), &SchemaAdapter::default()).unwrap();

        for query in ["Mary Ann Evans", "mary evans", "  MARY   ANN EVANS "] {
            let found = lookup_person(&people, query, None).unwrap();
            assert_eq!(found.last, "Evans", "query {query:?}");
        }
        assert!(lookup_person(&people, "Ann Evans", None).is_err());
    }

    #[test]
    fn test_org_filter_ignored_without_org_column() {
        let sheet = "First,Last,MS,Monday,Tuesday,Wednesday,Thursday,Friday\nDee,Dunn,MS4,,,,,\n";
        let people = parse_people_csv(sheet.as_bytes(), &SchemaAdapter::default()).unwrap();
        assert_eq!(people[0].organization, None);

        let found = find_available(&people, "Monday", "0900", "1000", Some("GSU")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].last, "Dunn");
    }

    #[test]
    fn test_blank_org_cell_is_filtered_out() {
        let sheet = "First,Last,MS,School,Monday,Tuesday,Wednesday,Thursday,Friday\n\
                     Dee,Dunn,MS4,,,,,,\n\
                     Eve,Eng,MS2,GSU,,,,,\n";
        let people = parse_people_csv(sheet.as_bytes(), &SchemaAdapter::default()).unwrap();
        assert_eq!(people[0].organization.as_deref(), Some(""));

        let found = find_available(&people, "Monday", "0900", "1000", Some("gsu")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].last, "Eng");
    }

    #[test]
    fn test_missing_day_column_fails_loudly() {
        let sheet = "First,Last,MS,Monday\nDee,Dunn,MS4,0700-0800\n";
        let err = parse_people_csv(sheet.as_bytes(), &SchemaAdapter::default()).unwrap_err();
        assert!(matches!(err, SourceError::MissingColumns { .. }));
    }
}
