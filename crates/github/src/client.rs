//! [`GitHubClient`]: the review-system ports over the GitHub REST API.

use async_trait::async_trait;
use pipeline::{
    AutoAssignError, EventPayload, IssueNumber, LabelName, LabelQuery, Login, RepositoryId,
    ReviewMutation, ReviewState, ReviewStateQuery, ReviewSystemError, ReviewerCandidate,
    SelectionLimit, TeamSlug,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use rand::Rng;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::selection::{is_author, select, split_reviewers};
use crate::wire::{
    AddAssigneesBody, ErrorResponse, IssueResponse, LabelRef, RequestReviewersBody,
    RequestedReviewersResponse,
};

/// Default REST endpoint when `GITHUB_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("auto-assign/", env!("CARGO_PKG_VERSION"));

/// GitHub REST client scoped to one repository.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: String,
    owner: String,
    repo: String,
}

impl GitHubClient {
    /// Builds a client for `repository` that authenticates with `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AutoAssignError::ConfigurationError`] if the repository is
    /// not in `owner/repo` form, the token is not a valid header value, or the
    /// HTTP client cannot be built.
    pub fn new(
        api_url: &str,
        token: &str,
        repository: &RepositoryId,
    ) -> Result<Self, AutoAssignError> {
        let (owner, repo) = repository.split().ok_or_else(|| {
            AutoAssignError::configuration(format!(
                "Repository '{repository}' is not in owner/repo form"
            ))
        })?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| AutoAssignError::configuration("GitHub token contains invalid characters"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                AutoAssignError::configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Absolute URL of a repository-relative path such as `issues/7/labels`.
    fn url(&self, path: &str) -> String {
        format!("{}/repos/{}/{}/{}", self.api_url, self.owner, self.repo, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ReviewSystemError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self.http.get(&url).send().await.map_err(transport)?;
        let response = check_status(response).await?;
        response.json::<T>().await.map_err(|e| ReviewSystemError::Decode {
            message: format!("{url}: {e}"),
        })
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), ReviewSystemError> {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await?;
        Ok(())
    }
}

fn transport(e: reqwest::Error) -> ReviewSystemError {
    ReviewSystemError::Transport {
        message: e.to_string(),
    }
}

/// Passes 2xx responses through and turns everything else into
/// [`ReviewSystemError::Api`], preferring GitHub's `message` field.
async fn check_status(response: Response) -> Result<Response, ReviewSystemError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ReviewSystemError::Api {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) => parsed.message,
        Err(_) if body.trim().is_empty() => "no response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

/// Pending review requests exist only on pull requests.
fn requested_reviewers_path(subject: &EventPayload) -> Option<String> {
    subject
        .is_pull_request()
        .then(|| format!("pulls/{}/requested_reviewers", subject.number()))
}

/// Body of a review request, or `None` when no candidate survives selection.
fn reviewer_request<R: Rng + ?Sized>(
    subject: &EventPayload,
    candidates: &[ReviewerCandidate],
    limit: SelectionLimit,
    rng: &mut R,
) -> Option<RequestReviewersBody> {
    let author = subject.author();
    let selected = select(candidates, limit, |c| is_author(c, author), rng);
    if selected.is_empty() {
        return None;
    }
    let (users, teams) = split_reviewers(&selected);
    Some(RequestReviewersBody {
        reviewers: users.iter().map(|u| u.as_str().to_string()).collect(),
        team_reviewers: teams.iter().map(|t| t.as_str().to_string()).collect(),
    })
}

fn assignee_request<R: Rng + ?Sized>(
    candidates: &[Login],
    limit: SelectionLimit,
    rng: &mut R,
) -> Option<AddAssigneesBody> {
    let selected = select(candidates, limit, |_| false, rng);
    (!selected.is_empty()).then(|| AddAssigneesBody {
        assignees: selected.iter().map(|u| u.as_str().to_string()).collect(),
    })
}

// ---------------------------------------------------------------------------
// Port implementations
// ---------------------------------------------------------------------------

#[async_trait]
impl LabelQuery for GitHubClient {
    #[instrument(skip(self))]
    async fn labels(&self, number: IssueNumber) -> Result<Vec<LabelName>, ReviewSystemError> {
        let labels: Vec<LabelRef> = self
            .get(&format!("issues/{number}/labels?per_page=100"))
            .await?;
        Ok(labels.into_iter().filter_map(|l| LabelName::new(l.name)).collect())
    }
}

#[async_trait]
impl ReviewStateQuery for GitHubClient {
    #[instrument(skip_all, fields(number = %subject.number()))]
    async fn review_state(
        &self,
        subject: &EventPayload,
    ) -> Result<ReviewState, ReviewSystemError> {
        let number = subject.number();
        let issue: IssueResponse = self.get(&format!("issues/{number}")).await?;
        let assignees = issue
            .assignees
            .into_iter()
            .filter_map(|u| Login::new(u.login))
            .collect();

        let Some(path) = requested_reviewers_path(subject) else {
            return Ok(ReviewState {
                assignees,
                ..ReviewState::default()
            });
        };
        let requested: RequestedReviewersResponse = self.get(&path).await?;
        Ok(ReviewState {
            assignees,
            teams: requested
                .teams
                .into_iter()
                .filter_map(|t| TeamSlug::new(t.slug))
                .collect(),
            reviewers: requested
                .users
                .into_iter()
                .filter_map(|u| Login::new(u.login))
                .collect(),
        })
    }
}

#[async_trait]
impl ReviewMutation for GitHubClient {
    #[instrument(skip_all, fields(number = %subject.number(), %limit))]
    async fn add_reviewers(
        &self,
        subject: &EventPayload,
        candidates: &[ReviewerCandidate],
        limit: SelectionLimit,
    ) -> Result<(), ReviewSystemError> {
        let Some(body) = reviewer_request(subject, candidates, limit, &mut rand::thread_rng())
        else {
            debug!("no reviewer candidates left after excluding the author");
            return Ok(());
        };
        self.post(
            &format!("pulls/{}/requested_reviewers", subject.number()),
            &body,
        )
        .await?;

        info!(
            reviewers = ?body.reviewers,
            team_reviewers = ?body.team_reviewers,
            "requested reviews"
        );
        Ok(())
    }

    #[instrument(skip_all, fields(number = %subject.number(), %limit))]
    async fn add_assignees(
        &self,
        subject: &EventPayload,
        candidates: &[Login],
        limit: SelectionLimit,
    ) -> Result<(), ReviewSystemError> {
        let Some(body) = assignee_request(candidates, limit, &mut rand::thread_rng()) else {
            return Ok(());
        };
        self.post(&format!("issues/{}/assignees", subject.number()), &body)
            .await?;

        info!(assignees = ?body.assignees, "added assignees");
        Ok(())
    }
}
