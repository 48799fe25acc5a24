use reqwest::{header, Client};

use crate::error::{Error, Result};
use crate::github::paginator::Paginator;
use crate::github::rate_limiter::RateLimiter;
use crate::models::{DateRange, IssueRecord, RawIssue, RepoRef, Repository};

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", token))?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("relnotes/0.1"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(),
            base_url: "https://api.github.com".to_string(),
        })
    }

    /// Resolves the repository before any issue listing so a typo'd name
    /// fails with a distinct error instead of an empty result.
    pub async fn get_repository(&self, repo: &RepoRef) -> Result<Repository> {
        self.rate_limiter.throttle().await;
        let url = format!("{}/repos/{}/{}", self.base_url, repo.owner, repo.name);
        tracing::info!("Fetching repository: {}", repo);

        let response = self.client.get(&url).send().await?;
        self.rate_limiter.record_response(&response);

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::RepoNotFound(repo.to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GitHubApi(format!(
                "Failed to fetch repository {}: {} - {}",
                repo, status, body
            )));
        }

        Ok(response.json().await?)
    }

    /// Fetches the closed issues whose closed date falls inside the
    /// inclusive range, excluding pull requests. Returned in issue-number
    /// order.
    pub async fn list_closed_issues(
        &self,
        repo: &RepoRef,
        range: &DateRange,
    ) -> Result<Vec<IssueRecord>> {
        // `since` filters on update time, a superset of "closed in range";
        // the exact closed_at filter happens locally.
        let url = format!(
            "{}/repos/{}/{}/issues?state=closed&since={}T00:00:00Z&direction=asc",
            self.base_url, repo.owner, repo.name, range.start
        );

        let paginator = Paginator::new(&self.client, &self.rate_limiter);
        tracing::info!("Fetching closed issues for {} ({})", repo, range);
        let raw: Vec<RawIssue> = paginator.fetch_all(&url, 100).await?;

        let mut issues: Vec<IssueRecord> = raw
            .into_iter()
            .filter_map(IssueRecord::from_raw)
            .filter(|issue| range.contains(issue.closed_at))
            .collect();

        issues.sort_by_key(|issue| issue.number);
        issues.dedup_by_key(|issue| issue.number);

        Ok(issues)
    }
}
