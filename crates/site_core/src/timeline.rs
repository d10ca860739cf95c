//! Year-bucketed, newest-first view of experience records.

use shared::{
    domain::Experience,
    protocol::{TimelineEntry, TimelineView, TimelineYear},
};

use crate::motion::MotionPreference;

pub const EMPTY_TIMELINE_MESSAGE: &str = "No experiences to display.";

#[derive(Debug, Clone, PartialEq)]
pub struct YearGroup<'a> {
    pub year: i32,
    pub records: Vec<&'a Experience>,
}

/// Groups records by the year of their effective date, newest year first.
///
/// Records are ordered by effective date descending; the sort is stable, so
/// records sharing an effective date keep their input order.
pub fn group_by_year<'a, I>(records: I) -> Vec<YearGroup<'a>>
where
    I: IntoIterator<Item = &'a Experience>,
{
    let mut sorted: Vec<&Experience> = records.into_iter().collect();
    sorted.sort_by(|a, b| b.effective_date().cmp(&a.effective_date()));

    let mut groups: Vec<YearGroup<'a>> = Vec::new();
    for record in sorted {
        let year = record.effective_date().year();
        match groups.last_mut() {
            Some(group) if group.year == year => group.records.push(record),
            _ => groups.push(YearGroup {
                year,
                records: vec![record],
            }),
        }
    }
    groups
}

/// Display range such as `Jun 2025 – Aug 2025` or `Aug 2023 – Present`.
pub fn format_duration(record: &Experience) -> String {
    let start = record.start_date.short_label();
    if record.is_ongoing {
        return format!("{start} – Present");
    }
    match record.end_date {
        Some(end) => format!("{start} – {}", end.short_label()),
        None => start,
    }
}

pub fn timeline_view<'a, I>(records: I, motion: MotionPreference) -> TimelineView
where
    I: IntoIterator<Item = &'a Experience>,
{
    let groups = group_by_year(records);
    if groups.is_empty() {
        return TimelineView {
            years: Vec::new(),
            empty_message: Some(EMPTY_TIMELINE_MESSAGE.to_string()),
        };
    }

    let years = groups
        .into_iter()
        .enumerate()
        .map(|(year_index, group)| TimelineYear {
            year: group.year,
            marker: year_marker(group.year),
            reveal_delay_secs: motion.year_delay(year_index),
            entries: group
                .records
                .into_iter()
                .enumerate()
                .map(|(entry_index, record)| {
                    timeline_entry(record, motion.entry_delay(year_index, entry_index))
                })
                .collect(),
        })
        .collect();

    TimelineView {
        years,
        empty_message: None,
    }
}

fn timeline_entry(record: &Experience, reveal_delay_secs: Option<f32>) -> TimelineEntry {
    TimelineEntry {
        id: record.id.clone(),
        kind: record.kind,
        kind_label: record.kind.label().to_string(),
        title: record.title.clone(),
        organization: record.organization.clone(),
        location: record.location.clone(),
        duration: format_duration(record),
        description: record.description.clone(),
        skills: record.skills.clone(),
        link: record
            .certificate_url
            .clone()
            .or_else(|| record.link.clone()),
        reveal_delay_secs,
    }
}

fn year_marker(year: i32) -> String {
    format!("{:02}", year.rem_euclid(100))
}

#[cfg(test)]
#[path = "tests/timeline_tests.rs"]
mod tests;
