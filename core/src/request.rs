//! The request cycle behind the view: `NoProblem` -> `Pending` ->
//! `Resolved` | `Failed`, forward-only. A generation ticket identifies each
//! submission so that a late result for a superseded problem is dropped
//! instead of overwriting the display.

use strive_common::{Problem, Recommendation};

/// What a finished fetch produced.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Recommendation(Recommendation),
    /// The backend answered, but the payload could not be used.
    Unusable,
    /// The call itself failed; the message is shown raw.
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    NoProblem,
    Pending,
    Resolved(Recommendation),
    /// `error` is only populated for a rejected call; an unusable response
    /// leaves it empty. The two failure flavors stay distinct.
    Failed { error: Option<String> },
}

#[derive(Debug, Clone)]
pub struct RequestCycle {
    problem: Option<Problem>,
    phase: Phase,
    generation: u64,
}

impl Default for RequestCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestCycle {
    pub fn new() -> Self {
        Self {
            problem: None,
            phase: Phase::NoProblem,
            generation: 0,
        }
    }

    pub fn problem(&self) -> Option<&Problem> {
        self.problem.as_ref()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending)
    }

    /// Accept a confirmed problem and open a new fetch cycle. Returns the
    /// ticket identifying this submission. Any fetch still outstanding for an
    /// earlier ticket is abandoned, not cancelled.
    pub fn submit(&mut self, problem: Problem) -> u64 {
        self.problem = Some(problem);
        self.phase = Phase::Pending;
        self.generation += 1;
        self.generation
    }

    /// Apply a fetch outcome. Returns `false` (and changes nothing) when the
    /// ticket belongs to a superseded submission.
    pub fn complete(&mut self, ticket: u64, outcome: FetchOutcome) -> bool {
        if ticket != self.generation || !self.is_pending() {
            return false;
        }
        self.phase = match outcome {
            FetchOutcome::Recommendation(recommendation) => Phase::Resolved(recommendation),
            FetchOutcome::Unusable => Phase::Failed { error: None },
            FetchOutcome::Error(message) => Phase::Failed {
                error: Some(message),
            },
        };
        true
    }
}
