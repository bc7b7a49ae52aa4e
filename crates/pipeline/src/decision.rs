//! Pure decision functions.
//!
//! Every guard of the pipeline is a function of already-fetched data and
//! returns either a [`SkipReason`] or a [`StepDecision`]. None of them performs
//! I/O; [`crate::Pipeline`] fetches the data and applies the decisions.
//!
//! Guard order (first match wins):
//!
//! 1. [`is_supported`]: event name and sub-action
//! 2. [`check_draft`]
//! 3. [`check_skip_keywords`]
//! 4. [`check_labels`]: include list, then exclude list
//!
//! After the guards, [`decide_reviewers`] and [`decide_assignees`] run
//! independently of each other.

use serde::Serialize;

use crate::{
    Configuration, EventAction, EventName, EventPayload, LabelName, Login, ReviewState,
    ReviewerCandidate, SelectionLimit, Trigger,
};

// ---------------------------------------------------------------------------
// Skip reasons
// ---------------------------------------------------------------------------

/// Human-readable reason for a controlled early exit.
///
/// A skip is not an error; the invocation still succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SkipReason(String);

impl SkipReason {
    /// The pull request is a draft and `skipDraft` is on.
    pub fn draft() -> Self {
        Self("is draft".to_string())
    }

    /// The title contains one of the `skipKeywords`.
    pub fn skip_keywords() -> Self {
        Self("title includes skip-keywords".to_string())
    }

    /// None of the current labels is in `includeLabels`.
    pub fn not_included() -> Self {
        Self(r#"is not labeled with any of the "includeLabels""#.to_string())
    }

    /// One of the current labels is in `excludeLabels`.
    pub fn excluded() -> Self {
        Self(r#"is labeled with one of the "excludeLabels""#.to_string())
    }

    /// `has requested reviewer "a"`, `has requested team_reviewers "x, y"`, or
    /// both joined with `and`. At least one list must be non-empty.
    pub fn requested_reviewers<R, T>(reviewers: &[R], teams: &[T]) -> Self
    where
        R: std::fmt::Display,
        T: std::fmt::Display,
    {
        let log_reviewers = format!(
            "reviewer{} \"{}\"",
            plural(reviewers.len()),
            join(reviewers)
        );
        let log_teams = format!("team_reviewer{} \"{}\"", plural(teams.len()), join(teams));

        let message = match (reviewers.is_empty(), teams.is_empty()) {
            (false, false) => format!("has requested {log_reviewers} and {log_teams}"),
            (true, false) => format!("has requested {log_teams}"),
            _ => format!("has requested {log_reviewers}"),
        };
        Self(message)
    }

    /// `has assigned to a, b`: the subject already has assignees.
    pub fn assigned(assignees: &[Login]) -> Self {
        Self(format!("has assigned to {}", join(assignees)))
    }

    /// The message without the `Skipped: ` prefix or trailing period.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn plural(len: usize) -> &'static str {
    if len > 1 {
        "s"
    } else {
        ""
    }
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Decisions
// ---------------------------------------------------------------------------

/// Outcome of one of the two independent mutation steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum StepDecision<C> {
    /// The subject already has state in this category; nothing is changed.
    Skip { reason: SkipReason },
    /// Ask the review system to add up to `limit` of `candidates`.
    Add {
        candidates: Vec<C>,
        limit: SelectionLimit,
    },
    /// Nothing to do: the step is disabled or has no candidates configured.
    NoOp,
}

impl<C> StepDecision<C> {
    /// `true` if the step asks the review system for a change.
    pub fn is_add(&self) -> bool {
        matches!(self, Self::Add { .. })
    }

    /// The reason, if the step was skipped.
    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            Self::Skip { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Summary of what an invocation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "reason", rename_all = "snake_case")]
pub enum Action {
    /// A guard or a step stopped with this reason.
    Skip(SkipReason),
    /// Only reviews were requested.
    AddReviewers,
    /// Only assignees were added.
    AddAssignees,
    /// Reviews were requested and assignees added.
    AddBoth,
    /// Nothing applied.
    NoOp,
}

/// Full result of a pipeline run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The event-type filter rejected the trigger. Nothing was logged as a skip.
    NotApplicable,
    /// A guard stopped the run before the review state was read.
    Skipped { reason: SkipReason },
    /// The reviewer and assignee steps both ran.
    Evaluated {
        reviewers: StepDecision<ReviewerCandidate>,
        assignees: StepDecision<Login>,
    },
}

impl Outcome {
    /// Collapses the outcome into a single [`Action`].
    pub fn action(&self) -> Action {
        match self {
            Self::NotApplicable => Action::NoOp,
            Self::Skipped { reason } => Action::Skip(reason.clone()),
            Self::Evaluated {
                reviewers,
                assignees,
            } => match (reviewers.is_add(), assignees.is_add()) {
                (true, true) => Action::AddBoth,
                (true, false) => Action::AddReviewers,
                (false, true) => Action::AddAssignees,
                (false, false) => reviewers
                    .skip_reason()
                    .or_else(|| assignees.skip_reason())
                    .map(|r| Action::Skip(r.clone()))
                    .unwrap_or(Action::NoOp),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Guards
// ---------------------------------------------------------------------------

/// Returns `true` if the trigger is one the action acts on.
pub fn is_supported(trigger: &Trigger) -> bool {
    let event_ok = matches!(
        trigger.event,
        EventName::Issues | EventName::PullRequest | EventName::PullRequestTarget
    );
    let action_ok = matches!(
        trigger.action,
        EventAction::Opened | EventAction::Edited | EventAction::Labeled | EventAction::Unlabeled
    );
    event_ok && action_ok
}

/// Skips draft pull requests unless `skip_draft` is disabled.
pub fn check_draft(payload: &EventPayload, config: &Configuration) -> Option<SkipReason> {
    (payload.is_draft() && config.skip_draft).then(SkipReason::draft)
}

/// Skips when the title contains any keyword, ignoring case.
pub fn check_skip_keywords(title: &str, keywords: &[String]) -> Option<SkipReason> {
    let title = title.to_lowercase();
    keywords
        .iter()
        .any(|k| title.contains(&k.to_lowercase()))
        .then(SkipReason::skip_keywords)
}

/// Returns `true` if the label filters need the current labels at all.
pub fn needs_labels(config: &Configuration) -> bool {
    !config.include_labels.is_empty() || !config.exclude_labels.is_empty()
}

/// Applies the include list and then the exclude list to the current labels.
///
/// An empty list disables its filter.
pub fn check_labels(current: &[LabelName], config: &Configuration) -> Option<SkipReason> {
    let has_any = |wanted: &[LabelName]| current.iter().any(|l| wanted.contains(l));

    if !config.include_labels.is_empty() && !has_any(&config.include_labels) {
        return Some(SkipReason::not_included());
    }
    if !config.exclude_labels.is_empty() && has_any(&config.exclude_labels) {
        return Some(SkipReason::excluded());
    }
    None
}

/// Decides the reviewer step from the current review state.
///
/// Existing requests always win: the step never adds to a subject that already
/// has a pending user or team review request.
pub fn decide_reviewers(
    state: &ReviewState,
    payload: &EventPayload,
    config: &Configuration,
) -> StepDecision<ReviewerCandidate> {
    if !state.teams.is_empty() || !state.reviewers.is_empty() {
        return StepDecision::Skip {
            reason: SkipReason::requested_reviewers(&state.reviewers, &state.teams),
        };
    }
    if !payload.is_pull_request() || !config.add_reviewers || config.reviewers.is_empty() {
        return StepDecision::NoOp;
    }
    StepDecision::Add {
        candidates: config.reviewers.clone(),
        limit: config.number_of_reviewers,
    }
}

/// Decides the assignee step from the current review state.
pub fn decide_assignees(state: &ReviewState, config: &Configuration) -> StepDecision<Login> {
    if !state.assignees.is_empty() {
        return StepDecision::Skip {
            reason: SkipReason::assigned(&state.assignees),
        };
    }
    if !config.add_assignees || config.assignees.is_empty() {
        return StepDecision::NoOp;
    }
    StepDecision::Add {
        candidates: config.assignees.clone(),
        limit: config.number_of_assignees,
    }
}
