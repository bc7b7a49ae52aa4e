//! The thin executor that sequences the pure decisions around port calls.
//!
//! [`Pipeline::run`] is the only place in the crate that awaits the review
//! system. Its sequence:
//!
//! 1. event-type filter (silent)
//! 2. draft and skip-keyword guards (no I/O, also available on their own as
//!    [`Invocation::screen`])
//! 3. label guards (one label fetch, only if a label list is configured)
//! 4. one review-state fetch
//! 5. reviewer step, then assignee step, each deciding independently
//!
//! Any port error aborts the run with `?`. A reviewer request that already
//! succeeded is not undone when the assignee request fails afterwards.
//!
//! The review state is read and then written without any locking, so two
//! concurrent invocations can both see "no reviewers" and both add some.

use tracing::{debug, info, instrument};

use crate::decision::{
    check_draft, check_labels, check_skip_keywords, decide_assignees, decide_reviewers,
    is_supported, needs_labels, Outcome, SkipReason, StepDecision,
};
use crate::{AutoAssignError, Configuration, EventPayload, InvocationId, ReviewSystem, Trigger};

/// One triggering event, as handed over by the event source.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Correlation id attached to the executor span.
    pub id: InvocationId,
    /// Event name and sub-action that triggered the run.
    pub trigger: Trigger,
    /// `None` when the event carried neither a pull request nor an issue.
    pub payload: Option<EventPayload>,
}

impl Invocation {
    /// Creates an invocation with a fresh random id.
    pub fn new(trigger: Trigger, payload: Option<EventPayload>) -> Self {
        Self {
            id: InvocationId::new_random(),
            trigger,
            payload,
        }
    }

    /// Returns the payload if the event-type filter lets this invocation run.
    pub fn subject(&self) -> Option<&EventPayload> {
        if is_supported(&self.trigger) {
            self.payload.as_ref()
        } else {
            None
        }
    }

    /// Applies the guards that need no review-system data: the event-type
    /// filter, then the draft and skip-keyword checks.
    ///
    /// Returns the final outcome if one of them ends the run, `None` if the
    /// run has to go on to the review system.
    pub fn screen(&self, config: &Configuration) -> Option<Outcome> {
        let Some(payload) = self.subject() else {
            debug!("event is not handled by this action");
            return Some(Outcome::NotApplicable);
        };

        debug!(
            inputs = %to_json(config),
            payload = %to_json(payload),
            number = %payload.number(),
            "evaluating event"
        );

        check_draft(payload, config)
            .or_else(|| check_skip_keywords(payload.title(), &config.skip_keywords))
            .map(skipped)
    }
}

/// Drives one invocation against a review system.
pub struct Pipeline<'a> {
    system: &'a dyn ReviewSystem,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline that reads from and writes to `system`.
    pub fn new(system: &'a dyn ReviewSystem) -> Self {
        Self { system }
    }

    /// Runs every guard and both mutation steps for `invocation`.
    ///
    /// # Errors
    ///
    /// Returns [`AutoAssignError::ReviewSystem`] for the first failing call to
    /// the review system.
    #[instrument(
        skip_all,
        fields(
            invocation = %invocation.id,
            event = %invocation.trigger.event,
            action = %invocation.trigger.action,
        )
    )]
    pub async fn run(
        &self,
        invocation: &Invocation,
        config: &Configuration,
    ) -> Result<Outcome, AutoAssignError> {
        if let Some(outcome) = invocation.screen(config) {
            return Ok(outcome);
        }
        let Some(payload) = invocation.subject() else {
            return Ok(Outcome::NotApplicable);
        };

        debug!("checking for any includeLabels or excludeLabels");
        if needs_labels(config) {
            let labels = self.system.labels(payload.number()).await?;
            debug!(labels = ?labels, "fetched current labels");
            if let Some(reason) = check_labels(&labels, config) {
                return Ok(skipped(reason));
            }
        }

        debug!("checking for any existing assignees, teams or reviewers");
        let state = self.system.review_state(payload).await?;
        debug!(state = %to_json(&state), "fetched review state");

        let reviewers = decide_reviewers(&state, payload, config);
        match &reviewers {
            StepDecision::Skip { reason } => log_skip(reason),
            StepDecision::Add { candidates, limit } => {
                debug!(count = candidates.len(), %limit, "adding reviewers from inputs");
                self.system
                    .add_reviewers(payload, candidates, *limit)
                    .await?;
            }
            StepDecision::NoOp => debug!("no reviewers to add"),
        }

        let assignees = decide_assignees(&state, config);
        match &assignees {
            StepDecision::Skip { reason } => log_skip(reason),
            StepDecision::Add { candidates, limit } => {
                debug!(count = candidates.len(), %limit, "adding assignees from inputs");
                self.system
                    .add_assignees(payload, candidates, *limit)
                    .await?;
            }
            StepDecision::NoOp => debug!("no assignees to add"),
        }

        Ok(Outcome::Evaluated {
            reviewers,
            assignees,
        })
    }
}

fn skipped(reason: SkipReason) -> Outcome {
    log_skip(&reason);
    Outcome::Skipped { reason }
}

fn log_skip(reason: &SkipReason) {
    debug!(%reason, "stopping execution");
    info!("Skipped: {reason}.");
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("<unserialisable: {e}>"))
}
