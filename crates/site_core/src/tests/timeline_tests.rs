use super::*;
use shared::domain::{ExperienceId, ExperienceKind, YearMonth};

fn ym(raw: &str) -> YearMonth {
    raw.parse().expect("year month")
}

fn record(id: &str, start: &str, end: Option<&str>) -> Experience {
    Experience {
        id: ExperienceId::from(id),
        kind: ExperienceKind::Work,
        title: format!("{id} title"),
        organization: "Org".to_string(),
        location: None,
        start_date: ym(start),
        end_date: end.map(ym),
        is_ongoing: false,
        description: vec!["did things".to_string()],
        skills: Vec::new(),
        link: None,
        certificate_url: None,
        order: 0,
    }
}

fn ids<'a>(group: &YearGroup<'a>) -> Vec<&'a str> {
    group.records.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn groups_newest_year_first_with_records_newest_first() {
    let records = vec![
        record("edu", "2023-08", None),
        record("hack", "2025-03", None),
        record("intern", "2025-06", Some("2025-08")),
    ];

    let groups = group_by_year(&records);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].year, 2025);
    assert_eq!(ids(&groups[0]), vec!["intern", "hack"]);
    assert_eq!(groups[1].year, 2023);
    assert_eq!(ids(&groups[1]), vec!["edu"]);
}

#[test]
fn equal_effective_dates_keep_input_order() {
    let records = vec![
        record("first", "2024-01", Some("2024-05")),
        record("second", "2024-05", None),
        record("third", "2023-02", Some("2024-05")),
    ];

    let groups = group_by_year(&records);
    assert_eq!(groups.len(), 1);
    assert_eq!(ids(&groups[0]), vec!["first", "second", "third"]);
}

#[test]
fn bucket_uses_end_date_year_even_when_start_is_earlier() {
    let records = vec![record("span", "2021-09", Some("2024-06"))];
    let groups = group_by_year(&records);
    assert_eq!(groups[0].year, 2024);
}

#[test]
fn every_record_lands_in_exactly_one_descending_bucket() {
    let records = vec![
        record("a", "2019-01", None),
        record("b", "2022-03", Some("2023-01")),
        record("c", "2020-07", None),
        record("d", "2023-11", None),
        record("e", "2019-12", None),
        record("f", "2021-01", Some("2022-12")),
    ];

    let groups = group_by_year(&records);
    let total: usize = groups.iter().map(|g| g.records.len()).sum();
    assert_eq!(total, records.len());

    for pair in groups.windows(2) {
        assert!(pair[0].year > pair[1].year);
    }
    for group in &groups {
        for record in &group.records {
            assert_eq!(record.effective_date().year(), group.year);
        }
        for pair in group.records.windows(2) {
            assert!(pair[0].effective_date() >= pair[1].effective_date());
        }
    }
}

#[test]
fn empty_input_yields_no_groups() {
    let records: Vec<Experience> = Vec::new();
    assert!(group_by_year(&records).is_empty());
}

#[test]
fn duration_formats_closed_ongoing_and_open_ranges() {
    let closed = record("closed", "2025-06", Some("2025-08"));
    assert_eq!(format_duration(&closed), "Jun 2025 – Aug 2025");

    let mut ongoing = record("ongoing", "2023-08", Some("2027-05"));
    ongoing.is_ongoing = true;
    assert_eq!(format_duration(&ongoing), "Aug 2023 – Present");

    let single = record("single", "2025-03", None);
    assert_eq!(format_duration(&single), "Mar 2025");
}

#[test]
fn view_reports_empty_state_instead_of_empty_years() {
    let records: Vec<Experience> = Vec::new();
    let view = timeline_view(&records, MotionPreference::Full);
    assert!(view.years.is_empty());
    assert_eq!(view.empty_message.as_deref(), Some(EMPTY_TIMELINE_MESSAGE));
}

#[test]
fn view_carries_labels_markers_and_preferred_link() {
    let mut cert = record("cert", "2024-02", None);
    cert.kind = ExperienceKind::Achievement;
    cert.link = Some("https://example.test/post".to_string());
    cert.certificate_url = Some("https://example.test/cert".to_string());
    let records = vec![cert];

    let view = timeline_view(&records, MotionPreference::Full);
    assert!(view.empty_message.is_none());
    let year = &view.years[0];
    assert_eq!(year.marker, "24");
    let entry = &year.entries[0];
    assert_eq!(entry.kind_label, "Achievement");
    assert_eq!(entry.duration, "Feb 2024");
    assert_eq!(entry.link.as_deref(), Some("https://example.test/cert"));
}

#[test]
fn reduced_motion_drops_reveal_hints_only() {
    let records = vec![
        record("new", "2025-01", None),
        record("old", "2022-01", None),
    ];

    let full = timeline_view(&records, MotionPreference::Full);
    let reduced = timeline_view(&records, MotionPreference::Reduced);

    assert_eq!(full.years[1].reveal_delay_secs, Some(0.1));
    assert!(reduced
        .years
        .iter()
        .all(|y| y.reveal_delay_secs.is_none() && y.entries.iter().all(|e| e.reveal_delay_secs.is_none())));

    let strip = |view: &TimelineView| -> Vec<(i32, Vec<String>)> {
        view.years
            .iter()
            .map(|y| (y.year, y.entries.iter().map(|e| e.id.to_string()).collect()))
            .collect()
    };
    assert_eq!(strip(&full), strip(&reduced));
}
