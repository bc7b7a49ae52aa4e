//! Shared value types for the auto-assign domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! the data that the decision functions inspect: the triggering event, the
//! event payload, the review state of the subject, and reviewer candidates.

use serde::{Deserialize, Serialize};

use crate::{IssueNumber, LabelName, Login, TeamSlug};

// ---------------------------------------------------------------------------
// Trigger
// ---------------------------------------------------------------------------

/// Name of the workflow event that started the run (`GITHUB_EVENT_NAME`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventName {
    /// `issues`
    Issues,
    /// `pull_request`
    PullRequest,
    /// `pull_request_target`
    PullRequestTarget,
    /// Any event the action does not act on.
    Other(String),
}

impl EventName {
    /// Maps a raw event name onto an [`EventName`].
    pub fn parse(raw: &str) -> Self {
        match raw {
            "issues" => Self::Issues,
            "pull_request" => Self::PullRequest,
            "pull_request_target" => Self::PullRequestTarget,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the raw event name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Issues => "issues",
            Self::PullRequest => "pull_request",
            Self::PullRequestTarget => "pull_request_target",
            Self::Other(other) => other,
        }
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------

/// The `action` field of the event payload (the event's sub-action).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// `opened`
    Opened,
    /// `edited`
    Edited,
    /// `labeled`
    Labeled,
    /// `unlabeled`
    Unlabeled,
    /// Any other sub-action, or none at all (empty string).
    Other(String),
}

impl EventAction {
    /// Maps a raw sub-action onto an [`EventAction`].
    pub fn parse(raw: &str) -> Self {
        match raw {
            "opened" => Self::Opened,
            "edited" => Self::Edited,
            "labeled" => Self::Labeled,
            "unlabeled" => Self::Unlabeled,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the raw sub-action.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Opened => "opened",
            Self::Edited => "edited",
            Self::Labeled => "labeled",
            Self::Unlabeled => "unlabeled",
            Self::Other(other) => other,
        }
    }
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------

/// Event name plus sub-action: the tag the event-type filter looks at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trigger {
    /// Workflow event name.
    pub event: EventName,
    /// Sub-action from the payload.
    pub action: EventAction,
}

impl Trigger {
    /// Creates a [`Trigger`] from raw strings.
    pub fn new(event: &str, action: &str) -> Self {
        Self {
            event: EventName::parse(event),
            action: EventAction::parse(action),
        }
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// The pull request carried by a `pull_request` or `pull_request_target` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestPayload {
    /// Pull request number, shared with the issue numbering space.
    pub number: IssueNumber,
    /// Title as delivered with the event; matched against `skipKeywords`.
    pub title: String,
    /// `true` while the pull request is a draft.
    pub draft: bool,
    /// Labels as delivered with the event.
    pub labels: Vec<LabelName>,
    /// Login of the pull request author, if the payload carried one.
    pub author: Option<Login>,
}

/// The issue carried by an `issues` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuePayload {
    /// Issue number.
    pub number: IssueNumber,
    /// Title as delivered with the event; matched against `skipKeywords`.
    pub title: String,
    /// Labels as delivered with the event.
    pub labels: Vec<LabelName>,
    /// Login of the issue author, if the payload carried one.
    pub author: Option<Login>,
}

/// The subject of an invocation: either a pull request or an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventPayload {
    /// A `pull_request` or `pull_request_target` subject.
    PullRequest(PullRequestPayload),
    /// An `issues` subject.
    Issue(IssuePayload),
}

impl EventPayload {
    /// Issue or pull request number.
    pub fn number(&self) -> IssueNumber {
        match self {
            Self::PullRequest(pr) => pr.number,
            Self::Issue(issue) => issue.number,
        }
    }

    /// Issue or pull request title.
    pub fn title(&self) -> &str {
        match self {
            Self::PullRequest(pr) => &pr.title,
            Self::Issue(issue) => &issue.title,
        }
    }

    /// Labels as delivered with the event. The label filters re-fetch the
    /// current labels instead of trusting these.
    pub fn labels(&self) -> &[LabelName] {
        match self {
            Self::PullRequest(pr) => &pr.labels,
            Self::Issue(issue) => &issue.labels,
        }
    }

    /// Login of the author, if the payload carried one.
    pub fn author(&self) -> Option<&Login> {
        match self {
            Self::PullRequest(pr) => pr.author.as_ref(),
            Self::Issue(issue) => issue.author.as_ref(),
        }
    }

    /// `true` only for a pull request marked as draft. Issues are never drafts.
    pub fn is_draft(&self) -> bool {
        matches!(self, Self::PullRequest(pr) if pr.draft)
    }

    /// `true` for a pull request subject.
    pub fn is_pull_request(&self) -> bool {
        matches!(self, Self::PullRequest(_))
    }
}

// ---------------------------------------------------------------------------
// Review state
// ---------------------------------------------------------------------------

/// Current assignment state of the subject, as reported by the review system.
///
/// Always fetched fresh immediately before the reviewer and assignee
/// decisions; never cached between invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewState {
    /// Users currently assigned.
    pub assignees: Vec<Login>,
    /// Teams with a pending review request. Always empty for issues.
    pub teams: Vec<TeamSlug>,
    /// Users with a pending review request. Always empty for issues.
    pub reviewers: Vec<Login>,
}

// ---------------------------------------------------------------------------
// Reviewer candidates
// ---------------------------------------------------------------------------

/// One entry of the configured `reviewers` list.
///
/// An entry written as `org/team-slug` requests a review from a team; any
/// other entry names a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ReviewerCandidate {
    /// A single user, requested through `reviewers`.
    User(Login),
    /// A team, requested through `team_reviewers` by its slug.
    Team {
        /// Organisation that owns the team.
        org: String,
        /// Team slug within `org`.
        slug: TeamSlug,
    },
}

impl ReviewerCandidate {
    /// Parses a configured entry. Returns `None` for empty entries and for
    /// team entries that are not exactly `org/slug` with both parts present.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.split_once('/') {
            Some((org, slug)) if !org.is_empty() && !slug.contains('/') => Some(Self::Team {
                org: org.to_string(),
                slug: TeamSlug::new(slug)?,
            }),
            Some(_) => None,
            None => Login::new(raw).map(Self::User),
        }
    }
}

impl std::fmt::Display for ReviewerCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User(login) => write!(f, "{login}"),
            Self::Team { org, slug } => write!(f, "{org}/{slug}"),
        }
    }
}

// ---------------------------------------------------------------------------

/// Maximum number of candidates to pick. Zero means "all of them".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SelectionLimit(u32);

impl SelectionLimit {
    /// Creates a [`SelectionLimit`] from a raw integer.
    pub fn new(limit: u32) -> Self {
        Self(limit)
    }

    /// Returns the underlying integer value.
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns `true` if every candidate should be picked.
    pub fn is_unlimited(self) -> bool {
        self.0 == 0
    }

    /// Number of candidates to pick out of `available`.
    pub fn cap(self, available: usize) -> usize {
        if self.is_unlimited() {
            available
        } else {
            available.min(self.0 as usize)
        }
    }
}

impl std::fmt::Display for SelectionLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
