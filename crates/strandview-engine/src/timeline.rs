use chrono::{DateTime, Datelike, Utc};
use strandview_types::{Group, Strand};

use crate::extract::last_modified;

/// Relative-time buckets, in display order. The set is fixed; buckets that
/// end up empty are dropped from the output, unlike board groups.
const PERIODS: &[(&str, &str)] = &[
    ("today", "Today"),
    ("yesterday", "Yesterday"),
    ("this-week", "This Week"),
    ("this-month", "This Month"),
    ("older", "Older"),
];

/// Partition strands into relative-time buckets against the current clock.
pub fn partition(strands: &[Strand], collapsed: &[String]) -> Vec<Group> {
    partition_at(strands, Utc::now(), collapsed)
}

/// Partition against an explicit "now", so classification is testable.
///
/// Within each bucket strands are ordered most-recent first; records with
/// no parsable timestamp rank as epoch zero (oldest) and always classify
/// as `older`.
pub fn partition_at(strands: &[Strand], now: DateTime<Utc>, collapsed: &[String]) -> Vec<Group> {
    let mut buckets: Vec<Vec<(i64, Strand)>> = vec![Vec::new(); PERIODS.len()];

    for strand in strands {
        let ts = last_modified(strand);
        let index = period_index(ts, now);
        let millis = ts.map(|dt| dt.timestamp_millis()).unwrap_or(0);
        buckets[index].push((millis, strand.clone()));
    }

    PERIODS
        .iter()
        .zip(buckets)
        .filter(|(_, members)| !members.is_empty())
        .map(|((id, label), mut members)| {
            members.sort_by(|(a, _), (b, _)| b.cmp(a));
            Group {
                id: (*id).to_string(),
                label: (*label).to_string(),
                color: None,
                strands: members.into_iter().map(|(_, strand)| strand).collect(),
                is_collapsed: collapsed.iter().any(|c| c.as_str() == *id),
            }
        })
        .collect()
}

/// Calendar-relative classification. Checks run from most to least
/// specific, so "this week" never claims today or yesterday, and "this
/// month" never claims the current week.
fn period_index(ts: Option<DateTime<Utc>>, now: DateTime<Utc>) -> usize {
    let Some(ts) = ts else {
        return PERIODS.len() - 1;
    };
    let day = ts.date_naive();
    let today = now.date_naive();

    if day == today {
        return 0;
    }
    if today.pred_opt().is_some_and(|yesterday| day == yesterday) {
        return 1;
    }
    if ts.iso_week() == now.iso_week() {
        return 2;
    }
    if ts.year() == now.year() && ts.month() == now.month() {
        return 3;
    }
    PERIODS.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // 2025-06-18 is a Wednesday, far enough into week and month for every
    // bucket to be reachable.
    fn wednesday_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 18, 12, 0, 0).unwrap()
    }

    fn dated(path: &str, ts: &str) -> Strand {
        let mut strand = Strand::new(path);
        strand.last_modified = Some(ts.to_string());
        strand
    }

    fn bucket_ids(groups: &[Group]) -> Vec<&str> {
        groups.iter().map(|g| g.id.as_str()).collect()
    }

    #[test]
    fn classifies_each_calendar_bucket() {
        let strands = vec![
            dated("/today", "2025-06-18T08:00:00Z"),
            dated("/yesterday", "2025-06-17T23:00:00Z"),
            dated("/monday", "2025-06-16T09:00:00Z"),
            dated("/weekend", "2025-06-14T09:00:00Z"),
            dated("/last-month", "2025-05-30T09:00:00Z"),
        ];
        let groups = partition_at(&strands, wednesday_noon(), &[]);
        assert_eq!(
            bucket_ids(&groups),
            vec!["today", "yesterday", "this-week", "this-month", "older"]
        );
        assert_eq!(groups[2].strands[0].path, "/monday");
        // Saturday is the same month but the previous ISO week.
        assert_eq!(groups[3].strands[0].path, "/weekend");
    }

    #[test]
    fn two_days_ago_lands_in_this_week_not_today_or_yesterday() {
        let strands = vec![dated("/a", "2025-06-16T12:00:00Z")];
        let groups = partition_at(&strands, wednesday_noon(), &[]);
        assert_eq!(bucket_ids(&groups), vec!["this-week"]);
    }

    #[test]
    fn empty_buckets_are_dropped() {
        let strands = vec![dated("/a", "2025-06-18T08:00:00Z")];
        let groups = partition_at(&strands, wednesday_noon(), &[]);
        assert_eq!(bucket_ids(&groups), vec!["today"]);
    }

    #[test]
    fn missing_and_unparsable_dates_land_in_older() {
        let mut broken = Strand::new("/broken");
        broken.last_modified = Some("yesterday-ish".to_string());
        let strands = vec![Strand::new("/absent"), broken];
        let groups = partition_at(&strands, wednesday_noon(), &[]);
        assert_eq!(bucket_ids(&groups), vec!["older"]);
        assert_eq!(groups[0].strands.len(), 2);
    }

    #[test]
    fn buckets_sort_most_recent_first_with_missing_as_oldest() {
        let strands = vec![
            dated("/early", "2025-05-01T08:00:00Z"),
            Strand::new("/absent"),
            dated("/late", "2025-05-20T08:00:00Z"),
        ];
        let groups = partition_at(&strands, wednesday_noon(), &[]);
        let older: Vec<&str> = groups[0].strands.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(older, vec!["/late", "/early", "/absent"]);
    }

    #[test]
    fn collapsed_groups_come_from_the_persisted_list() {
        let strands = vec![dated("/a", "2025-05-01T08:00:00Z")];
        let collapsed = vec!["older".to_string()];
        let groups = partition_at(&strands, wednesday_noon(), &collapsed);
        assert!(groups[0].is_collapsed);
    }

    #[test]
    fn buckets_carry_no_color() {
        let strands = vec![dated("/a", "2025-06-18T08:00:00Z")];
        let groups = partition_at(&strands, wednesday_noon(), &[]);
        assert!(groups[0].color.is_none());
    }

    #[test]
    fn partition_covers_every_record_exactly_once() {
        let strands = vec![
            dated("/a", "2025-06-18T08:00:00Z"),
            dated("/b", "2025-06-10T08:00:00Z"),
            Strand::new("/c"),
        ];
        let groups = partition_at(&strands, wednesday_noon(), &[]);
        let total: usize = groups.iter().map(|g| g.strands.len()).sum();
        assert_eq!(total, strands.len());
    }
}
