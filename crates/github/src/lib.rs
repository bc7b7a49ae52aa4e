//! auto-assign GitHub infrastructure adapter.
//!
//! Implements the review-system traits defined in the [`pipeline`] crate
//! ([`pipeline::LabelQuery`], [`pipeline::ReviewStateQuery`],
//! [`pipeline::ReviewMutation`]) over the GitHub REST API using `reqwest`.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules.
//! All GitHub API details (authentication, headers, error bodies, team vs.
//! user reviewer fields) are handled here; the [`pipeline`] crate never sees
//! them. Candidate selection (random sampling up to the configured limit,
//! excluding the pull request author) lives in [`selection`] because it is the
//! review system's concern, not a pipeline rule.
//!
//! ## Endpoints
//!
//! | Port method | Request |
//! |-------------|---------|
//! | `labels` | `GET /repos/{owner}/{repo}/issues/{n}/labels` |
//! | `review_state` | `GET /repos/{owner}/{repo}/issues/{n}` and, for pull requests, `GET .../pulls/{n}/requested_reviewers` |
//! | `add_reviewers` | `POST /repos/{owner}/{repo}/pulls/{n}/requested_reviewers` |
//! | `add_assignees` | `POST /repos/{owner}/{repo}/issues/{n}/assignees` |
//!
//! Only the first 100 labels are read.

mod client;
pub mod selection;
mod wire;

pub use client::{GitHubClient, DEFAULT_API_URL};
