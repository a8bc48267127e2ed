use crate::models::Person;

/// Sort position for people whose rank text has no number.
pub const RANK_SENTINEL: u32 = 99;

/// First run of ASCII digits in free-text rank, e.g. "MS3" -> 3, "ms 4" -> 4.
pub fn rank_level(text: &str) -> Option<u32> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// `(rank, last, first, row)`; the trailing row keeps the order total.
pub fn sort_key(person: &Person) -> (u32, String, String, usize) {
    (
        person.rank_level.unwrap_or(RANK_SENTINEL),
        person.last.to_lowercase(),
        person.first.to_lowercase(),
        person.row,
    )
}

pub fn rank_people(people: &mut [Person]) {
    people.sort_by_cached_key(sort_key);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(row: usize, rank: &str, first: &str, last: &str) -> Person {
        Person {
            row,
            first: first.to_string(),
            last: last.to_string(),
            rank: rank.to_string(),
            rank_level: rank_level(rank),
            ..Default::default()
        }
    }

    #[test]
    fn test_rank_level_extraction() {
        assert_eq!(rank_level("MS3"), Some(3));
        assert_eq!(rank_level("ms 4"), Some(4));
        assert_eq!(rank_level("3"), Some(3));
        assert_eq!(rank_level("MS1 (contracted)"), Some(1));
        assert_eq!(rank_level("MSL-5"), Some(5));
        assert_eq!(rank_level(""), None);
        assert_eq!(rank_level("Cadet"), None);
    }

    #[test]
    fn test_rank_then_last_name_with_sentinel_last() {
        let mut people = vec![
            person(0, "MS3", "", "Smith"),
            person(1, "MS1", "", "Adams"),
            person(2, "", "", "Zed"),
        ];
        rank_people(&mut people);
        let order: Vec<&str> = people.iter().map(|p| p.last.as_str()).collect();
        assert_eq!(order, vec!["Adams", "Smith", "Zed"]);
    }

    #[test]
    fn test_names_compare_case_insensitively() {
        let mut people = vec![
            person(0, "MS2", "bob", "baker"),
            person(1, "MS2", "Amy", "Baker"),
            person(2, "MS2", "Cal", "adams"),
        ];
        rank_people(&mut people);
        let order: Vec<usize> = people.iter().map(|p| p.row).collect();
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn test_identical_people_ordered_by_row() {
        let mut people = vec![
            person(7, "MS1", "Pat", "Lee"),
            person(3, "MS1", "Pat", "Lee"),
        ];
        rank_people(&mut people);
        assert_eq!(people[0].row, 3);
        assert_eq!(people[1].row, 7);
    }
}
