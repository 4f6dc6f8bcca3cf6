//! Display labels for listings.

use chrono::{DateTime, Utc};

use crate::db::models::JobType;

const EXCERPT_CHARS: usize = 150;

fn dollars(amount: i32) -> String {
    let amount = f64::from(amount);
    if amount >= 1_000_000.0 {
        format!("${:.1}M", (amount / 100_000.0).round() / 10.0)
    } else if amount >= 1_000.0 {
        format!("${}k", (amount / 1_000.0).round())
    } else {
        format!("${amount}")
    }
}

/// Human readable salary range, `None` when neither bound is set
///
/// A zero bound counts as unset.
pub fn salary_range(min: Option<i32>, max: Option<i32>) -> Option<String> {
    let min = min.filter(|v| *v > 0);
    let max = max.filter(|v| *v > 0);

    match (min, max) {
        (Some(min), Some(max)) => Some(format!("{} - {}", dollars(min), dollars(max))),
        (Some(min), None) => Some(format!("{}+", dollars(min))),
        (None, Some(max)) => Some(format!("Up to {}", dollars(max))),
        (None, None) => None,
    }
}

/// `full-time` -> `Full-Time`
pub fn job_type_label(job_type: JobType) -> String {
    job_type
        .as_str()
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join("-")
}

/// Age of a posting relative to `now`
pub fn posted_ago(posted_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - posted_at).num_days();
    match days {
        i64::MIN..=0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => format!("{} weeks ago", days / 7),
        30..=364 => format!("{} months ago", days / 30),
        _ => format!("{} years ago", days / 365),
    }
}

/// First 150 characters, with `...` appended when cut
pub fn excerpt(text: &str) -> String {
    let mut chars = text.char_indices();
    match chars.nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn salary_range_variants() {
        assert_eq!(
            salary_range(Some(80000), Some(120000)).as_deref(),
            Some("$80k - $120k")
        );
        assert_eq!(salary_range(Some(85500), None).as_deref(), Some("$86k+"));
        assert_eq!(salary_range(None, Some(90000)).as_deref(), Some("Up to $90k"));
        assert_eq!(salary_range(Some(0), None), None);
        assert_eq!(salary_range(None, None), None);
    }

    #[test]
    fn salary_range_millions_and_small_amounts() {
        assert_eq!(
            salary_range(Some(1_250_000), None).as_deref(),
            Some("$1.3M+")
        );
        assert_eq!(salary_range(Some(1_000_000), None).as_deref(), Some("$1.0M+"));
        assert_eq!(salary_range(None, Some(500)).as_deref(), Some("Up to $500"));
    }

    #[test]
    fn job_type_labels() {
        assert_eq!(job_type_label(JobType::FullTime), "Full-Time");
        assert_eq!(job_type_label(JobType::PartTime), "Part-Time");
        assert_eq!(job_type_label(JobType::Internship), "Internship");
    }

    #[test]
    fn posted_ago_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let ago = |days: i64| posted_ago(now - Duration::days(days), now);

        assert_eq!(ago(0), "Today");
        assert_eq!(ago(1), "Yesterday");
        assert_eq!(ago(3), "3 days ago");
        assert_eq!(ago(14), "2 weeks ago");
        assert_eq!(ago(65), "2 months ago");
        assert_eq!(ago(800), "2 years ago");
        assert_eq!(posted_ago(now + Duration::hours(5), now), "Today");
    }

    #[test]
    fn excerpt_cuts_long_text_on_char_boundary() {
        assert_eq!(excerpt("short"), "short");

        let exact = "a".repeat(150);
        assert_eq!(excerpt(&exact), exact);

        let long = "é".repeat(200);
        let cut = excerpt(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 153);
    }
}
