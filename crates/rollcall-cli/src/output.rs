//! Plain-text rendering for terminal output.

use std::fmt::Write;

use rollcall_core::availability::QueryWindow;
use rollcall_core::models::{Interval, Person, Weekday};
use rollcall_core::utils::truncate;

const NAME_WIDTH: usize = 24;
const ORG_WIDTH: usize = 20;
const EMAIL_WIDTH: usize = 28;

pub fn render_available(query: QueryWindow, people: &[Person]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} cadet(s) free {} {}",
        people.len(),
        query.day,
        query.window
    );
    if people.is_empty() {
        return out;
    }
    let _ = writeln!(
        out,
        "{:<name$}  {:<5}  {:<org$}  {:<14}  {}",
        "NAME",
        "RANK",
        "ORGANIZATION",
        "PHONE",
        "EMAIL",
        name = NAME_WIDTH,
        org = ORG_WIDTH
    );
    for person in people {
        let _ = writeln!(
            out,
            "{:<name$}  {:<5}  {:<org$}  {:<14}  {}",
            truncate(&person.display_name(), NAME_WIDTH),
            truncate(&person.rank_display(), 5),
            truncate(person.organization.as_deref().unwrap_or("-"), ORG_WIDTH),
            person.phone_display().unwrap_or_else(|| "-".to_string()),
            truncate(person.email.as_deref().unwrap_or("-"), EMAIL_WIDTH),
            name = NAME_WIDTH,
            org = ORG_WIDTH
        );
    }
    out
}

pub fn render_person(person: &Person) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", person.full_name());
    field(&mut out, "Rank", Some(person.rank_display().as_str()));
    field(&mut out, "Organization", person.organization.as_deref());
    field(&mut out, "Email", person.email.as_deref());
    field(&mut out, "Phone", person.phone_display().as_deref());
    field(&mut out, "Major", person.major.as_deref());
    field(&mut out, "Contracted", person.contracted.as_deref());
    field(&mut out, "Prior service", person.prior_service.as_deref());
    field(&mut out, "Vehicle", person.vehicle.as_deref());
    let _ = writeln!(out, "  Busy:");
    for day in Weekday::ALL {
        let _ = writeln!(out, "    {:<10} {}", day.name(), blocks(person.busy_on(day)));
    }
    out
}

pub fn render_check(window: Interval, busy: &[Interval], conflicts: &[Interval]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Parsed:    {}", blocks(busy));
    if conflicts.is_empty() {
        let _ = writeln!(out, "Free for {}", window);
    } else {
        let _ = writeln!(out, "Busy during {}: {}", window, blocks(conflicts));
    }
    out
}

fn field(out: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        let _ = writeln!(out, "  {:<14} {}", format!("{}:", label), value);
    }
}

fn blocks(intervals: &[Interval]) -> String {
    if intervals.is_empty() {
        return "free".to_string();
    }
    intervals
        .iter()
        .map(Interval::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cadet() -> Person {
        let mut p = Person {
            first: "Ann".into(),
            last: "Archer".into(),
            rank: "MS2".into(),
            organization: Some("GSU".into()),
            phone: Some("3185551234".into()),
            ..Default::default()
        };
        p.busy_by_day
            .insert(Weekday::Tuesday, vec![Interval::new(540, 600).unwrap()]);
        p
    }

    #[test]
    fn test_render_available_rows() {
        let query = QueryWindow::parse("Monday", "0900", "1000").unwrap();
        let text = render_available(query, &[cadet()]);
        assert!(text.starts_with("1 cadet(s) free Monday 0900-1000"));
        assert!(text.contains("Archer, Ann"));
        assert!(text.contains("(318) 555-1234"));
    }

    #[test]
    fn test_render_available_empty() {
        let query = QueryWindow::parse("Fri", "1300", "1400").unwrap();
        assert_eq!(render_available(query, &[]), "0 cadet(s) free Friday 1300-1400\n");
    }

    #[test]
    fn test_render_person_lists_every_day() {
        let text = render_person(&cadet());
        assert!(text.contains("Tuesday    0900-1000"));
        assert!(text.contains("Monday     free"));
        assert!(!text.contains("Vehicle"));
    }

    #[test]
    fn test_render_check() {
        let window = Interval::new(570, 630).unwrap();
        let busy = vec![Interval::new(540, 600).unwrap()];
        let text = render_check(window, &busy, &busy);
        assert!(text.contains("Busy during 0930-1030: 0900-1000"));

        let text = render_check(window, &[], &[]);
        assert!(text.contains("Parsed:    free"));
        assert!(text.contains("Free for 0930-1030"));
    }
}
