//! Decision domain for auto-assign.
//!
//! This crate contains every domain concept, newtype identifier, and error type
//! used to decide whether a pull request or issue gets reviewers and assignees.
//! Infrastructure crates implement the traits defined here; they never add
//! domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`IssueNumber`, `Login`, `LabelName`, etc.) |
//! | [`types`] | Trigger, payload, review state, reviewer candidates |
//! | [`config`] | [`Configuration`] and action input parsing |
//! | [`decision`] | Pure guard and step decision functions |
//! | [`ports`] | Review-system port traits |
//! | [`executor`] | [`Pipeline`], which runs the decisions against a port |
//! | [`errors`] | Error types |

pub mod config;
pub mod decision;
pub mod errors;
pub mod executor;
pub mod identifiers;
pub mod ports;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use config::Configuration;
pub use decision::{Action, Outcome, SkipReason, StepDecision};
pub use errors::{AutoAssignError, ReviewSystemError};
pub use executor::{Invocation, Pipeline};
pub use identifiers::{InvocationId, IssueNumber, LabelName, Login, RepositoryId, TeamSlug};
pub use ports::{LabelQuery, ReviewMutation, ReviewStateQuery, ReviewSystem};
pub use types::{
    EventAction, EventName, EventPayload, IssuePayload, PullRequestPayload, ReviewState,
    ReviewerCandidate, SelectionLimit, Trigger,
};
