//! Picks which configured candidates are sent to GitHub.
//!
//! Rules, applied in order:
//!
//! 1. duplicates are dropped (first occurrence wins; logins compare
//!    case-insensitively, as GitHub does)
//! 2. excluded candidates are dropped (the pull request author, for reviewers)
//! 3. if the limit covers what is left, everything is kept in configured order;
//!    otherwise a uniform random sample of `limit` candidates is drawn

use std::collections::HashSet;

use pipeline::{Login, ReviewerCandidate, SelectionLimit, TeamSlug};
use rand::seq::SliceRandom;
use rand::Rng;

/// A candidate that can be deduplicated.
pub trait Selectable: Clone {
    /// Two candidates with the same key name the same GitHub account or team.
    fn key(&self) -> String;
}

impl Selectable for Login {
    fn key(&self) -> String {
        self.as_str().to_ascii_lowercase()
    }
}

impl Selectable for ReviewerCandidate {
    fn key(&self) -> String {
        self.to_string().to_ascii_lowercase()
    }
}

/// Applies the selection rules to `candidates`.
pub fn select<T, R>(
    candidates: &[T],
    limit: SelectionLimit,
    exclude: impl Fn(&T) -> bool,
    rng: &mut R,
) -> Vec<T>
where
    T: Selectable,
    R: Rng + ?Sized,
{
    let mut seen = HashSet::new();
    let mut pool: Vec<T> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !exclude(candidate) && seen.insert(candidate.key()) {
            pool.push(candidate.clone());
        }
    }

    let wanted = limit.cap(pool.len());
    if wanted == pool.len() {
        return pool;
    }
    pool.choose_multiple(rng, wanted).cloned().collect()
}

/// `true` if `candidate` is the user `author`. GitHub logins compare
/// case-insensitively.
pub fn is_author(candidate: &ReviewerCandidate, author: Option<&Login>) -> bool {
    match (candidate, author) {
        (ReviewerCandidate::User(login), Some(author)) => {
            login.as_str().eq_ignore_ascii_case(author.as_str())
        }
        _ => false,
    }
}

/// Splits reviewer candidates into the `reviewers` and `team_reviewers`
/// fields of a review request.
pub fn split_reviewers(selected: &[ReviewerCandidate]) -> (Vec<Login>, Vec<TeamSlug>) {
    let mut users = Vec::new();
    let mut teams = Vec::new();
    for candidate in selected {
        match candidate {
            ReviewerCandidate::User(login) => users.push(login.clone()),
            ReviewerCandidate::Team { slug, .. } => teams.push(slug.clone()),
        }
    }
    (users, teams)
}
