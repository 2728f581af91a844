//! Text filter and display ordering for the visible job list.
//!
//! Pure and synchronous: the controller re-runs it on every raw-page or
//! query change rather than caching the result, so the visible list can
//! never go stale relative to its inputs.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::job::JobRecord;

/// Return the records matching `query`, ordered for display.
///
/// A record is visible iff the case-insensitive query is a substring of
/// its title, company, or location; the empty query matches everything.
/// Visible records are ordered by `scraped_date` descending; records
/// without a parseable `scraped_date` keep their original relative order
/// after all dated ones.
pub fn visible_jobs(jobs: &[JobRecord], query: &str) -> Vec<JobRecord> {
    let needle = query.to_lowercase();
    let mut visible: Vec<JobRecord> = jobs
        .iter()
        .filter(|job| needle.is_empty() || matches_query(job, &needle))
        .cloned()
        .collect();

    // Stable sort keeps the server order for undated records and ties.
    visible.sort_by(|a, b| match (scrape_key(a), scrape_key(b)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    visible
}

/// Case-insensitive substring match across title, company, and location.
/// `needle` must already be lowercased.
fn matches_query(job: &JobRecord, needle: &str) -> bool {
    [&job.title, &job.company, &job.location]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Parse the scrape timestamp into an ordering key.
///
/// Accepts RFC 3339 first, then the space-separated form the resource
/// renders for naive timestamps (taken as UTC). Anything else counts as
/// undated.
fn scrape_key(job: &JobRecord) -> Option<DateTime<Utc>> {
    let raw = job.scraped_date.as_deref()?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, company: &str, location: &str, scraped: Option<&str>) -> JobRecord {
        JobRecord {
            id: None,
            title: title.into(),
            company: company.into(),
            location: location.into(),
            scraped_date: scraped.map(Into::into),
            ..JobRecord::default()
        }
    }

    fn sample() -> Vec<JobRecord> {
        vec![
            job("Engineer", "Acme", "Berlin", Some("2024-05-01T10:00:00Z")),
            job("Designer", "Globex", "Remote", None),
            job("Data Engineer", "Initech", "Munich", Some("2024-05-02T10:00:00Z")),
            job("Manager", "Acme", "Hamburg", Some("not a date")),
        ]
    }

    #[test]
    fn empty_query_returns_all_in_sort_order() {
        let visible = visible_jobs(&sample(), "");
        assert_eq!(visible.len(), 4);
        // Dated records first, newest scrape first; undated and
        // unparseable keep their original relative order afterwards.
        assert_eq!(visible[0].title, "Data Engineer");
        assert_eq!(visible[1].title, "Engineer");
        assert_eq!(visible[2].title, "Designer");
        assert_eq!(visible[3].title, "Manager");
    }

    #[test]
    fn query_is_case_insensitive() {
        let visible = visible_jobs(&sample(), "ENGINEER");
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|j| j.title.contains("Engineer")));
    }

    #[test]
    fn query_matches_any_of_the_three_fields() {
        // Company match.
        assert_eq!(visible_jobs(&sample(), "globex").len(), 1);
        // Location match.
        assert_eq!(visible_jobs(&sample(), "berlin").len(), 1);
        // Description is deliberately not searched.
        let mut jobs = sample();
        jobs[0].description = "unicorn wrangling".into();
        assert!(visible_jobs(&jobs, "unicorn").is_empty());
    }

    #[test]
    fn output_is_a_subset_with_the_query_as_substring() {
        let jobs = sample();
        for query in ["a", "er", "Acme", "nothing-matches-this"] {
            let needle = query.to_lowercase();
            let visible = visible_jobs(&jobs, query);
            assert!(visible.len() <= jobs.len());
            for job in &visible {
                assert!(jobs.contains(job));
                assert!(
                    job.title.to_lowercase().contains(&needle)
                        || job.company.to_lowercase().contains(&needle)
                        || job.location.to_lowercase().contains(&needle),
                    "{query:?} should be a substring of a searched field of {job:?}"
                );
            }
        }
    }

    #[test]
    fn no_match_yields_empty() {
        assert!(visible_jobs(&sample(), "zzzzzz").is_empty());
    }

    #[test]
    fn space_separated_timestamps_still_order() {
        let jobs = vec![
            job("Old", "A", "X", Some("2024-01-01 08:00:00")),
            job("New", "B", "Y", Some("2024-06-01 08:00:00")),
        ];
        let visible = visible_jobs(&jobs, "");
        assert_eq!(visible[0].title, "New");
    }
}
