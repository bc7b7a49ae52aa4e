//! Port traits for the external review system.
//!
//! The pipeline talks to the review system only through these traits.
//! Infrastructure crates implement them (the `github` crate over the GitHub
//! REST API); tests implement them in memory.
//!
//! All methods are `async` and object-safe through [`async_trait`], so the
//! executor can hold a `&dyn ReviewSystem`.

use async_trait::async_trait;

use crate::{
    EventPayload, IssueNumber, LabelName, Login, ReviewState, ReviewSystemError,
    ReviewerCandidate, SelectionLimit,
};

/// Reads the current labels of an issue or pull request.
#[async_trait]
pub trait LabelQuery: Send + Sync {
    /// Current label names of issue or pull request `number`.
    async fn labels(&self, number: IssueNumber) -> Result<Vec<LabelName>, ReviewSystemError>;
}

/// Reads the current assignees and pending review requests of the subject.
#[async_trait]
pub trait ReviewStateQuery: Send + Sync {
    /// Implementations must not cache: every call reflects the review system
    /// at the moment of the call.
    async fn review_state(&self, subject: &EventPayload)
        -> Result<ReviewState, ReviewSystemError>;
}

/// Applies reviewer and assignee changes.
///
/// Choosing which of the `candidates` to use, up to `limit`, is the
/// implementation's concern. Results are not reported back.
#[async_trait]
pub trait ReviewMutation: Send + Sync {
    /// Requests reviews on the pull request `subject` from up to `limit` of
    /// `candidates` (all of them when `limit` is unlimited). Team candidates
    /// are requested as teams.
    async fn add_reviewers(
        &self,
        subject: &EventPayload,
        candidates: &[ReviewerCandidate],
        limit: SelectionLimit,
    ) -> Result<(), ReviewSystemError>;

    /// Assigns up to `limit` of `candidates` to `subject`.
    async fn add_assignees(
        &self,
        subject: &EventPayload,
        candidates: &[Login],
        limit: SelectionLimit,
    ) -> Result<(), ReviewSystemError>;
}

/// Everything the pipeline needs from the review system.
pub trait ReviewSystem: LabelQuery + ReviewStateQuery + ReviewMutation {}

impl<T> ReviewSystem for T where T: LabelQuery + ReviewStateQuery + ReviewMutation {}
