use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use career_core::model::{
    AnswerOptionId, Question, QuestionId, RoleId, SessionId, StageId, TestResult,
};
use tracing::{info, warn};

use super::classify::{classify, fault};
use super::descriptor::{ErrorDescriptor, FailureCause, RetryAction};
use super::guard::{NavigationGuard, NavigationHost};
use super::operation::{
    Generation, Operation, OperationOutcome, OperationSuccess, RetryableOperation,
};
use super::progress::SessionProgress;

//
// ─── SCREEN ────────────────────────────────────────────────────────────────────
//

/// Visible mode of the session. Exactly one is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Welcome,
    Test,
    Analyzing,
    Results,
    /// Unrecoverable fault; only a restart is offered.
    Error,
}

//
// ─── APPLY RESULT ──────────────────────────────────────────────────────────────
//

/// Milestones reported to the analytics side channel.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    Started {
        session_id: SessionId,
        question_count: usize,
    },
    Completed {
        session_id: SessionId,
        role_count: usize,
        primary_role: Option<RoleId>,
        primary_stage: Option<StageId>,
    },
}

/// What applying an outcome produced.
#[derive(Debug, Default)]
#[must_use]
pub struct Applied {
    /// Follow-up operation to run immediately (completion after the final submit).
    pub next: Option<RetryableOperation>,
    pub event: Option<SessionEvent>,
    /// The outcome belonged to an older generation or an operation no longer in flight.
    pub discarded: bool,
}

impl Applied {
    fn discarded() -> Self {
        Self {
            discarded: true,
            ..Self::default()
        }
    }
}

//
// ─── MACHINE ───────────────────────────────────────────────────────────────────
//

/// Client-side state of one assessment session.
///
/// The machine performs no I/O. Operations that need the network return a
/// [`RetryableOperation`]; the caller runs it and feeds the outcome back through
/// [`SessionMachine::apply`]. While an operation is in flight every other
/// mutating call except [`SessionMachine::reset`] is a no-op.
pub struct SessionMachine {
    navigation: Arc<dyn NavigationHost>,
    guard: Option<NavigationGuard>,
    generation: Generation,
    in_flight: Option<RetryableOperation>,

    screen: Screen,
    session_id: Option<SessionId>,
    questions: Vec<Question>,
    current_index: usize,
    answers: HashMap<QuestionId, AnswerOptionId>,
    results: Option<TestResult>,
    error: Option<ErrorDescriptor>,
}

impl SessionMachine {
    #[must_use]
    pub fn new(navigation: Arc<dyn NavigationHost>) -> Self {
        Self {
            navigation,
            guard: None,
            generation: Generation::default(),
            in_flight: None,
            screen: Screen::Welcome,
            session_id: None,
            questions: Vec::new(),
            current_index: 0,
            answers: HashMap::new(),
            results: None,
            error: None,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// Answer recorded for the question on screen.
    #[must_use]
    pub fn selected_answer(&self) -> Option<&AnswerOptionId> {
        self.current_question()
            .and_then(|question| self.answers.get(&question.id))
    }

    #[must_use]
    pub fn answers(&self) -> &HashMap<QuestionId, AnswerOptionId> {
        &self.answers
    }

    #[must_use]
    pub fn results(&self) -> Option<&TestResult> {
        self.results.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&ErrorDescriptor> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        !self.questions.is_empty() && self.current_index + 1 == self.questions.len()
    }

    /// True while navigation listeners ask for confirmation before leaving.
    #[must_use]
    pub fn is_leave_guarded(&self) -> bool {
        self.guard.is_some()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let answered = self
            .questions
            .iter()
            .filter(|question| self.answers.contains_key(&question.id))
            .count();
        let position = if self.questions.is_empty() {
            0
        } else {
            self.current_index + 1
        };
        SessionProgress {
            total: self.questions.len(),
            answered,
            position,
        }
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Begin a new session from the welcome screen.
    pub fn start(&mut self) -> Option<RetryableOperation> {
        if self.is_submitting() || self.screen != Screen::Welcome {
            return None;
        }
        self.generation = self.generation.next();
        self.error = None;
        Some(self.dispatch(Operation::Start))
    }

    /// Record an answer for the current question. Purely local.
    ///
    /// The option is trusted to belong to the question on screen.
    pub fn answer(&mut self, option_id: AnswerOptionId) -> bool {
        if self.is_submitting() || self.screen != Screen::Test {
            return false;
        }
        let Some(question_id) = self.current_question().map(|q| q.id.clone()) else {
            self.fail_inconsistent(format!("no question at index {}", self.current_index));
            return false;
        };
        self.answers.insert(question_id, option_id);
        true
    }

    /// Submit the current answer. Without a recorded answer this is a no-op.
    pub fn advance(&mut self) -> Option<RetryableOperation> {
        if self.is_submitting() || self.screen != Screen::Test {
            return None;
        }
        let Some(question) = self.current_question() else {
            self.fail_inconsistent(format!("no question at index {}", self.current_index));
            return None;
        };
        let question_id = question.id.clone();
        let answer_id = self.answers.get(&question_id)?.clone();
        let Some(session_id) = self.session_id.clone() else {
            self.fail_inconsistent("test screen without a session id");
            return None;
        };

        Some(self.dispatch(Operation::Submit {
            session_id,
            index: self.current_index,
            question_id,
            answer_id,
        }))
    }

    /// Go back one question. Clears any active error.
    pub fn retreat(&mut self) -> bool {
        if self.is_submitting() || self.screen != Screen::Test {
            return false;
        }
        self.current_index = self.current_index.saturating_sub(1);
        self.error = None;
        true
    }

    /// Re-dispatch the operation named by the active error.
    pub fn retry(&mut self) -> Option<RetryableOperation> {
        if self.is_submitting() {
            return None;
        }
        match self.error.as_ref()?.retry_action() {
            RetryAction::Start => self.start(),
            RetryAction::Submit => {
                let op = self.advance()?;
                self.error = None;
                Some(op)
            }
            RetryAction::Complete => {
                if self.screen != Screen::Test {
                    return None;
                }
                let Some(session_id) = self.session_id.clone() else {
                    self.fail_inconsistent("completion retry without a session id");
                    return None;
                };
                self.error = None;
                self.set_screen(Screen::Analyzing);
                Some(self.dispatch(Operation::Complete { session_id }))
            }
            RetryAction::Restart => {
                self.reset();
                None
            }
        }
    }

    /// Drop everything and return to the welcome screen.
    ///
    /// Any operation still in flight becomes stale.
    pub fn reset(&mut self) {
        self.generation = self.generation.next();
        self.in_flight = None;
        self.session_id = None;
        self.questions.clear();
        self.current_index = 0;
        self.answers.clear();
        self.results = None;
        self.error = None;
        self.set_screen(Screen::Welcome);
    }

    /// Apply the outcome of an operation previously returned by this machine.
    pub fn apply(&mut self, outcome: OperationOutcome) -> Applied {
        let matches_in_flight = self.in_flight.as_ref().is_some_and(|op| {
            op.generation() == outcome.generation && *op.operation() == outcome.operation
        });
        if outcome.generation != self.generation || !matches_in_flight {
            warn!(
                operation = %outcome.operation,
                generation = outcome.generation.value(),
                current = self.generation.value(),
                "discarding stale outcome"
            );
            return Applied::discarded();
        }
        self.in_flight = None;

        let success = match outcome.result {
            Ok(success) => success,
            Err(err) => {
                let descriptor = classify(&outcome.operation, &err);
                warn!(operation = %outcome.operation, error = %err, retry = %descriptor.retry_action(), "operation failed");
                if matches!(outcome.operation, Operation::Complete { .. }) {
                    self.set_screen(Screen::Test);
                }
                self.error = Some(descriptor);
                return Applied::default();
            }
        };

        match (outcome.operation, success) {
            (
                Operation::Start,
                OperationSuccess::Started {
                    session_id,
                    questions,
                },
            ) => self.on_started(session_id, questions),
            (Operation::Submit { index, .. }, OperationSuccess::Submitted) => {
                self.on_submitted(index)
            }
            (Operation::Complete { session_id }, OperationSuccess::Completed(result)) => {
                self.on_completed(session_id, result)
            }
            (operation, _) => {
                self.fail_inconsistent(format!("unexpected response to {operation}"));
                Applied::default()
            }
        }
    }

    fn on_started(&mut self, session_id: SessionId, questions: Vec<Question>) -> Applied {
        if questions.is_empty() {
            warn!(%session_id, "backend returned no questions");
            self.error = Some(ErrorDescriptor::Start {
                cause: FailureCause::EmptyQuestionnaire,
            });
            return Applied::default();
        }

        info!(%session_id, questions = questions.len(), "test session started");
        let event = SessionEvent::Started {
            session_id: session_id.clone(),
            question_count: questions.len(),
        };
        self.session_id = Some(session_id);
        self.questions = questions;
        self.current_index = 0;
        self.answers.clear();
        self.results = None;
        self.error = None;
        self.set_screen(Screen::Test);

        Applied {
            event: Some(event),
            ..Applied::default()
        }
    }

    fn on_submitted(&mut self, index: usize) -> Applied {
        self.error = None;
        if index + 1 < self.questions.len() {
            self.current_index = index + 1;
            return Applied::default();
        }

        let Some(session_id) = self.session_id.clone() else {
            self.fail_inconsistent("final answer submitted without a session id");
            return Applied::default();
        };
        self.set_screen(Screen::Analyzing);
        Applied {
            next: Some(self.dispatch(Operation::Complete { session_id })),
            ..Applied::default()
        }
    }

    fn on_completed(&mut self, session_id: SessionId, result: TestResult) -> Applied {
        info!(%session_id, roles = result.ranked_roles.len(), "test session completed");
        let event = SessionEvent::Completed {
            session_id,
            role_count: result.ranked_roles.len(),
            primary_role: result.primary_role().map(|role| role.role_id.clone()),
            primary_stage: result.primary_stage_id().cloned(),
        };
        self.results = Some(result);
        self.error = None;
        self.set_screen(Screen::Results);

        Applied {
            event: Some(event),
            ..Applied::default()
        }
    }

    fn dispatch(&mut self, operation: Operation) -> RetryableOperation {
        let op = RetryableOperation::new(self.generation, operation);
        self.in_flight = Some(op.clone());
        op
    }

    fn fail_inconsistent(&mut self, detail: impl Into<String>) {
        let descriptor = fault(detail);
        warn!(error = %descriptor, "session state is inconsistent");
        self.in_flight = None;
        self.error = Some(descriptor);
        self.set_screen(Screen::Error);
    }

    /// The navigation guard is held exactly while the test screen is shown.
    fn set_screen(&mut self, screen: Screen) {
        self.screen = screen;
        if screen == Screen::Test {
            if self.guard.is_none() {
                self.guard = Some(NavigationGuard::acquire(Arc::clone(&self.navigation)));
            }
        } else {
            self.guard = None;
        }
    }
}

impl fmt::Debug for SessionMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionMachine")
            .field("screen", &self.screen)
            .field("session_id", &self.session_id)
            .field("questions_len", &self.questions.len())
            .field("current_index", &self.current_index)
            .field("answers_len", &self.answers.len())
            .field("error", &self.error)
            .field("in_flight", &self.in_flight)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::guard::{Intercept, ListenerRegistry};
    use backend::ApiError;
    use career_core::model::{AnswerOption, RoleScore};
    use std::collections::BTreeMap;

    fn build_question(id: &str) -> Question {
        Question {
            id: QuestionId::new(id),
            text: format!("Question {id}"),
            thematic_block: "block".into(),
            kind: None,
            answer_options: ["a", "b", "c"]
                .iter()
                .map(|opt| AnswerOption {
                    id: AnswerOptionId::new(*opt),
                    text: opt.to_uppercase(),
                })
                .collect(),
        }
    }

    fn build_result(session: &str) -> TestResult {
        TestResult {
            session_id: SessionId::new(session),
            ranked_roles: vec![
                RoleScore {
                    role_id: RoleId::new("qa_automation"),
                    score: 0.3,
                },
                RoleScore {
                    role_id: RoleId::new("backend_developer"),
                    score: 0.8,
                },
            ],
            signal_profile: BTreeMap::new(),
            interpretation: None,
            ranked_stages: None,
            stage_recommendation: None,
            warnings: None,
        }
    }

    fn machine() -> (SessionMachine, Arc<ListenerRegistry>) {
        let registry = Arc::new(ListenerRegistry::new());
        (SessionMachine::new(registry.clone()), registry)
    }

    fn ok(op: &RetryableOperation, success: OperationSuccess) -> OperationOutcome {
        OperationOutcome {
            generation: op.generation(),
            operation: op.operation().clone(),
            result: Ok(success),
        }
    }

    fn failed(op: &RetryableOperation) -> OperationOutcome {
        OperationOutcome {
            generation: op.generation(),
            operation: op.operation().clone(),
            result: Err(ApiError::Connection("boom".into())),
        }
    }

    /// Machine on the test screen with `count` questions.
    fn started(count: usize) -> (SessionMachine, Arc<ListenerRegistry>) {
        let (mut m, registry) = machine();
        let op = m.start().unwrap();
        let questions = (1..=count).map(|i| build_question(&format!("q{i}"))).collect();
        let applied = m.apply(ok(
            &op,
            OperationSuccess::Started {
                session_id: SessionId::new("s1"),
                questions,
            },
        ));
        assert!(!applied.discarded);
        (m, registry)
    }

    #[test]
    fn start_success_enters_test_and_guards_navigation() {
        let (mut m, registry) = machine();
        let op = m.start().unwrap();
        assert!(m.is_submitting());
        assert_eq!(op.operation(), &Operation::Start);

        let applied = m.apply(ok(
            &op,
            OperationSuccess::Started {
                session_id: SessionId::new("s1"),
                questions: vec![build_question("q1"), build_question("q2")],
            },
        ));

        assert_eq!(m.screen(), Screen::Test);
        assert_eq!(m.current_index(), 0);
        assert!(!m.is_submitting());
        assert!(m.is_leave_guarded());
        assert!(registry.is_intercepting(Intercept::ExitPrompt));
        assert_eq!(
            applied.event,
            Some(SessionEvent::Started {
                session_id: SessionId::new("s1"),
                question_count: 2,
            })
        );
    }

    #[test]
    fn start_failure_stays_on_welcome_with_start_error() {
        let (mut m, registry) = machine();
        let op = m.start().unwrap();

        let _ = m.apply(failed(&op));

        assert_eq!(m.screen(), Screen::Welcome);
        assert_eq!(m.error().map(ErrorDescriptor::retry_action), Some(RetryAction::Start));
        assert!(m.session_id().is_none());
        assert_eq!(registry.active_count(), 0);

        let retry = m.retry().unwrap();
        assert_eq!(retry.operation(), &Operation::Start);
        assert!(m.error().is_none());
    }

    #[test]
    fn empty_questionnaire_is_a_start_error() {
        let (mut m, _) = machine();
        let op = m.start().unwrap();
        let _ = m.apply(ok(
            &op,
            OperationSuccess::Started {
                session_id: SessionId::new("s1"),
                questions: Vec::new(),
            },
        ));

        assert_eq!(m.screen(), Screen::Welcome);
        assert_eq!(
            m.error().map(ErrorDescriptor::cause),
            Some(&FailureCause::EmptyQuestionnaire)
        );
    }

    #[test]
    fn advance_without_answer_is_noop() {
        let (mut m, _) = started(2);
        assert!(m.advance().is_none());
        assert!(!m.is_submitting());
    }

    #[test]
    fn submit_failure_keeps_answer_and_index() {
        let (mut m, _) = started(3);
        assert!(m.answer(AnswerOptionId::new("b")));
        let op = m.advance().unwrap();

        let _ = m.apply(failed(&op));

        assert_eq!(m.screen(), Screen::Test);
        assert_eq!(m.current_index(), 0);
        assert_eq!(m.selected_answer(), Some(&AnswerOptionId::new("b")));
        assert_eq!(
            m.error(),
            Some(&ErrorDescriptor::Submit {
                index: 0,
                question_id: QuestionId::new("q1"),
                cause: FailureCause::Unreachable,
            })
        );
        assert!(m.is_leave_guarded());
    }

    #[test]
    fn in_flight_submit_blocks_duplicate_input() {
        let (mut m, _) = started(3);
        m.answer(AnswerOptionId::new("a"));
        let op = m.advance().unwrap();

        assert!(m.advance().is_none());
        assert!(m.retry().is_none());
        assert!(!m.answer(AnswerOptionId::new("c")));
        assert!(!m.retreat());
        assert_eq!(m.selected_answer(), Some(&AnswerOptionId::new("a")));

        let _ = m.apply(ok(&op, OperationSuccess::Submitted));
        assert_eq!(m.current_index(), 1);
    }

    #[test]
    fn retry_submits_current_answer_for_failed_index() {
        let (mut m, _) = started(3);
        m.answer(AnswerOptionId::new("a"));
        let first = m.advance().unwrap();
        let _ = m.apply(ok(&first, OperationSuccess::Submitted));

        m.answer(AnswerOptionId::new("b"));
        let second = m.advance().unwrap();
        let _ = m.apply(failed(&second));

        // The user changes their mind before retrying.
        m.answer(AnswerOptionId::new("c"));
        let retry = m.retry().unwrap();

        assert_eq!(
            retry.operation(),
            &Operation::Submit {
                session_id: SessionId::new("s1"),
                index: 1,
                question_id: QuestionId::new("q2"),
                answer_id: AnswerOptionId::new("c"),
            }
        );
        assert!(m.error().is_none());
        let _ = m.apply(ok(&retry, OperationSuccess::Submitted));
        assert_eq!(m.current_index(), 2);
    }

    #[test]
    fn final_submit_moves_to_analyzing_and_requests_completion() {
        let (mut m, registry) = started(1);
        m.answer(AnswerOptionId::new("a"));
        let op = m.advance().unwrap();

        let applied = m.apply(ok(&op, OperationSuccess::Submitted));

        assert_eq!(m.screen(), Screen::Analyzing);
        assert_eq!(registry.active_count(), 0);
        let next = applied.next.unwrap();
        assert_eq!(
            next.operation(),
            &Operation::Complete {
                session_id: SessionId::new("s1")
            }
        );
        assert!(m.is_submitting());

        let applied = m.apply(ok(&next, OperationSuccess::Completed(build_result("s1"))));
        assert_eq!(m.screen(), Screen::Results);
        assert!(m.results().is_some());
        assert_eq!(
            applied.event,
            Some(SessionEvent::Completed {
                session_id: SessionId::new("s1"),
                role_count: 2,
                primary_role: Some(RoleId::new("backend_developer")),
                primary_stage: None,
            })
        );
    }

    #[test]
    fn completion_failure_returns_to_test_and_retries_completion_only() {
        let (mut m, registry) = started(2);
        for _ in 0..2 {
            m.answer(AnswerOptionId::new("a"));
            let op = m.advance().unwrap();
            let applied = m.apply(ok(&op, OperationSuccess::Submitted));
            if let Some(next) = applied.next {
                let _ = m.apply(failed(&next));
            }
        }

        assert_eq!(m.screen(), Screen::Test);
        assert_eq!(m.current_index(), 1);
        assert_eq!(m.answers().len(), 2);
        assert_eq!(m.error().map(ErrorDescriptor::retry_action), Some(RetryAction::Complete));
        assert!(registry.is_intercepting(Intercept::BackNavigation));

        let retry = m.retry().unwrap();
        assert!(matches!(retry.operation(), Operation::Complete { .. }));
        assert_eq!(m.screen(), Screen::Analyzing);
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn retreat_decrements_and_clears_error() {
        let (mut m, _) = started(3);
        m.answer(AnswerOptionId::new("a"));
        let op = m.advance().unwrap();
        let _ = m.apply(ok(&op, OperationSuccess::Submitted));
        m.answer(AnswerOptionId::new("b"));
        let op = m.advance().unwrap();
        let _ = m.apply(failed(&op));

        assert!(m.retreat());
        assert_eq!(m.current_index(), 0);
        assert!(m.error().is_none());
        assert_eq!(m.selected_answer(), Some(&AnswerOptionId::new("a")));

        assert!(m.retreat());
        assert_eq!(m.current_index(), 0);
    }

    fn assert_cleared(m: &SessionMachine, registry: &ListenerRegistry) {
        assert_eq!(m.screen(), Screen::Welcome);
        assert!(m.session_id().is_none());
        assert!(m.questions().is_empty());
        assert_eq!(m.current_index(), 0);
        assert!(m.answers().is_empty());
        assert!(m.results().is_none());
        assert!(m.error().is_none());
        assert!(!m.is_submitting());
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn reset_clears_everything_from_test() {
        let (mut m, registry) = started(2);
        m.answer(AnswerOptionId::new("a"));
        let _ = m.advance().unwrap();

        m.reset();

        assert_cleared(&m, &registry);
    }

    #[test]
    fn reset_clears_everything_from_results() {
        let (mut m, registry) = started(1);
        m.answer(AnswerOptionId::new("a"));
        let op = m.advance().unwrap();
        let complete = m.apply(ok(&op, OperationSuccess::Submitted)).next.unwrap();
        let _ = m.apply(ok(&complete, OperationSuccess::Completed(build_result("s1"))));
        assert_eq!(m.screen(), Screen::Results);

        m.reset();

        assert_cleared(&m, &registry);
    }

    #[test]
    fn reset_clears_a_start_error_on_welcome() {
        let (mut m, registry) = machine();
        let op = m.start().unwrap();
        let _ = m.apply(failed(&op));
        assert_eq!(m.screen(), Screen::Welcome);
        assert!(m.error().is_some());

        m.reset();

        assert_cleared(&m, &registry);
        assert!(m.retry().is_none());
        assert!(m.apply(failed(&op)).discarded);
        assert!(m.error().is_none());
    }

    #[test]
    fn outcome_arriving_after_reset_is_discarded() {
        let (mut m, _) = started(2);
        m.answer(AnswerOptionId::new("a"));
        let op = m.advance().unwrap();
        m.reset();

        let applied = m.apply(ok(&op, OperationSuccess::Submitted));

        assert!(applied.discarded);
        assert_eq!(m.screen(), Screen::Welcome);
        assert_eq!(m.current_index(), 0);
    }

    #[test]
    fn outcome_from_previous_session_does_not_leak_into_new_one() {
        let (mut m, _) = machine();
        let old = m.start().unwrap();
        m.reset();
        let current = m.start().unwrap();
        assert_ne!(old.generation(), current.generation());

        let applied = m.apply(ok(
            &old,
            OperationSuccess::Started {
                session_id: SessionId::new("old"),
                questions: vec![build_question("q1")],
            },
        ));

        assert!(applied.discarded);
        assert!(m.is_submitting());
        assert!(m.session_id().is_none());
    }

    #[test]
    fn missing_current_question_offers_only_restart() {
        let (mut m, registry) = started(2);
        m.current_index = 7;

        assert!(m.advance().is_none());

        assert_eq!(m.screen(), Screen::Error);
        assert_eq!(m.error().map(ErrorDescriptor::retry_action), Some(RetryAction::Restart));
        assert_eq!(registry.active_count(), 0);

        assert!(m.retry().is_none());
        assert_eq!(m.screen(), Screen::Welcome);
        assert!(m.error().is_none());
    }

    #[test]
    fn progress_tracks_answers_and_position() {
        let (mut m, _) = started(4);
        assert_eq!(
            m.progress(),
            SessionProgress {
                total: 4,
                answered: 0,
                position: 1
            }
        );
        m.answer(AnswerOptionId::new("a"));
        assert_eq!(m.progress().answered, 1);
        assert!((m.progress().ratio() - 0.25).abs() < f64::EPSILON);
    }
}
