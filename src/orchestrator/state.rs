//! Orchestrator state and its transitions

use crate::metrics::Stage;
use crate::results::Answer;
use serde::Serialize;

/// Where the orchestrator is in its request lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Nothing has run yet, or a run was abandoned
    Idle,
    /// A submission is in flight
    Searching,
    /// The last submission produced the current answer
    Done,
    /// The last submission failed; the previous answer is still shown
    Failed { stage: Stage, reason: String },
}

/// Everything the page renders: query text, answer and phase.
///
/// Mutated only through the transition methods below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrchestratorState {
    query: String,
    answer: Answer,
    phase: Phase,
    generation: u64,
}

impl OrchestratorState {
    pub fn new(initial_suggestions: Vec<String>) -> Self {
        Self {
            query: String::new(),
            answer: Answer::initial(initial_suggestions),
            phase: Phase::Idle,
            generation: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn answer(&self) -> &Answer {
        &self.answer
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_searching(&self) -> bool {
        self.phase == Phase::Searching
    }

    /// Replace the input text. Ignored while searching, since the input is
    /// disabled then.
    pub fn set_query(&mut self, text: impl Into<String>) -> bool {
        if self.is_searching() {
            return false;
        }
        self.query = text.into();
        true
    }

    /// Enter `Searching` for a new submission and return its generation.
    ///
    /// The previous answer stays in place until replaced.
    pub fn begin(&mut self, query: impl Into<String>) -> u64 {
        self.generation += 1;
        self.query = query.into();
        self.phase = Phase::Searching;
        self.generation
    }

    /// Apply a finished answer if `generation` is still the current one
    pub fn complete(&mut self, generation: u64, answer: Answer) -> bool {
        if generation != self.generation {
            return false;
        }
        self.answer = answer;
        self.phase = Phase::Done;
        true
    }

    /// Record a failed submission if `generation` is still the current one
    pub fn fail(&mut self, generation: u64, stage: Stage, reason: impl Into<String>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.phase = Phase::Failed {
            stage,
            reason: reason.into(),
        };
        true
    }

    /// Leave `Searching` if `generation` never reached `complete` or `fail`
    pub fn release(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.is_searching() {
            return false;
        }
        self.phase = Phase::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::Summary;

    fn answer(text: &str) -> Answer {
        Answer::new("q", Summary::from_text(text.to_string()), vec!["tag".into()])
    }

    #[test]
    fn test_initial_state() {
        let state = OrchestratorState::new(vec!["a".into(), "b".into()]);
        assert_eq!(state.phase(), &Phase::Idle);
        assert_eq!(state.query(), "");
        assert_eq!(state.answer().related_searches, vec!["a", "b"]);
        assert!(state.answer().summary.is_none());
    }

    #[test]
    fn test_begin_keeps_previous_answer() {
        let mut state = OrchestratorState::new(vec![]);
        let first = state.begin("acme");
        assert!(state.complete(first, answer("old")));

        state.begin("globex");
        assert!(state.is_searching());
        assert_eq!(state.query(), "globex");
        assert_eq!(state.answer().summary_text(), "old");
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let mut state = OrchestratorState::new(vec![]);
        let stale = state.begin("one");
        let current = state.begin("two");

        assert!(!state.complete(stale, answer("stale")));
        assert!(!state.fail(stale, Stage::Search, "late"));
        assert!(state.is_searching());

        assert!(state.complete(current, answer("fresh")));
        assert_eq!(state.answer().summary_text(), "fresh");
        assert_eq!(state.phase(), &Phase::Done);
    }

    #[test]
    fn test_release_only_from_searching() {
        let mut state = OrchestratorState::new(vec![]);
        let generation = state.begin("acme");
        assert!(state.fail(generation, Stage::Generation, "quota"));
        assert!(!state.release(generation));
        assert!(matches!(state.phase(), Phase::Failed { stage: Stage::Generation, .. }));

        let generation = state.begin("acme");
        assert!(state.release(generation));
        assert_eq!(state.phase(), &Phase::Idle);
    }

    #[test]
    fn test_set_query_blocked_while_searching() {
        let mut state = OrchestratorState::new(vec![]);
        assert!(state.set_query("typed"));
        state.begin("typed");
        assert!(!state.set_query("clicked tag"));
        assert_eq!(state.query(), "typed");
    }
}
