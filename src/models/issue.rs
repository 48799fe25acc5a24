use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Issue payload as returned by the GitHub issues endpoint. The endpoint
/// also returns pull requests, marked by the `pull_request` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawIssue {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub html_url: String,
    pub state: String,
    pub closed_at: Option<DateTime<Utc>>,
    pub pull_request: Option<PullRequestMarker>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestMarker {
    pub url: String,
}

impl RawIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub owner: RepositoryOwner,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryOwner {
    pub login: String,
}

/// A closed issue as consumed by the classification and assembly stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRecord {
    pub number: u64,
    pub title: String,
    pub body: String,
    pub url: String,
    pub closed_at: DateTime<Utc>,
}

impl IssueRecord {
    /// Converts a raw API issue. Returns `None` for pull requests and
    /// issues without a closed timestamp.
    pub fn from_raw(raw: RawIssue) -> Option<Self> {
        if raw.is_pull_request() {
            return None;
        }
        let closed_at = raw.closed_at?;
        Some(Self {
            number: raw.number,
            title: raw.title,
            body: raw.body.unwrap_or_default(),
            url: raw.html_url,
            closed_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Inclusive closed-date range, ISO calendar dates.
#[derive(Debug, Clone, Copy)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        let date = timestamp.date_naive();
        date >= self.start && date <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_is_inclusive_at_both_ends() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31));
        let start_of_range = Utc.with_ymd_and_hms(2024, 1, 1, 0, 30, 0).unwrap();
        let end_of_range = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 1).unwrap();

        assert!(range.contains(start_of_range));
        assert!(range.contains(end_of_range));
        assert!(!range.contains(after));
    }

    #[test]
    fn test_from_raw_skips_pull_requests_and_open_issues() {
        let pr = RawIssue {
            number: 5,
            title: "A PR".to_string(),
            body: None,
            html_url: "https://github.com/o/r/pull/5".to_string(),
            state: "closed".to_string(),
            closed_at: Some(Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap()),
            pull_request: Some(PullRequestMarker {
                url: "https://api.github.com/repos/o/r/pulls/5".to_string(),
            }),
        };
        assert!(IssueRecord::from_raw(pr).is_none());

        let never_closed = RawIssue {
            number: 6,
            title: "Still open".to_string(),
            body: Some("details".to_string()),
            html_url: "https://github.com/o/r/issues/6".to_string(),
            state: "open".to_string(),
            closed_at: None,
            pull_request: None,
        };
        assert!(IssueRecord::from_raw(never_closed).is_none());
    }
}
