// Integration tests (native) for the SCORM session facade and the game's
// lifecycle reporting sequences. Everything runs against the mock transport
// (or a local stub), so no browser APIs are involved and the tests run under
// plain `cargo test` on the host.

use word_strike::game::report::{open_session, submit_outcome, suspend_on_unload};
use word_strike::game::score::ScoreBoard;
use word_strike::scorm::{LmsApi, MockApi, ScormSession, ScormVersion};

fn mock_session() -> (ScormSession, MockApi) {
    let mock = MockApi::new();
    (ScormSession::new(Box::new(mock.clone())), mock)
}

#[test]
fn data_exchange_is_gated_until_initialize() {
    let (mut session, mock) = mock_session();
    assert!(!session.set_value("cmi.score.raw", 50));
    assert!(!session.commit());
    assert_eq!(session.get_value("cmi.score.max"), "");
    // Nothing reached the store and no transport call was journaled.
    assert_eq!(mock.stored("cmi.score.raw").as_deref(), Some("0"));
    assert!(mock.calls().is_empty());
}

#[test]
fn last_error_is_answerable_before_initialize() {
    let (session, _mock) = mock_session();
    assert_eq!(session.last_error(), "0");
}

#[test]
fn initialize_is_idempotent() {
    let (mut session, mock) = mock_session();
    assert!(session.initialize());
    assert!(session.initialize());
    assert!(session.is_initialized());
    let inits = mock.calls().iter().filter(|c| *c == "Initialize").count();
    assert_eq!(inits, 1);
}

#[test]
fn mock_session_resolves_to_version_2004() {
    let (mut session, _mock) = mock_session();
    assert!(session.initialize());
    assert_eq!(session.version(), ScormVersion::V2004);
    assert!(session.is_mock());
}

#[test]
fn terminate_twice_succeeds_with_one_side_effect() {
    let (mut session, mock) = mock_session();
    assert!(session.initialize());
    assert!(session.terminate());
    assert!(session.terminate());
    assert!(!session.is_initialized());
    let terms = mock.calls().iter().filter(|c| *c == "Terminate").count();
    assert_eq!(terms, 1);
}

#[test]
fn set_then_get_round_trips_strings_verbatim() {
    let (mut session, _mock) = mock_session();
    session.initialize();
    assert!(session.set_value("cmi.score.raw", "42"));
    assert_eq!(session.get_value("cmi.score.raw"), "42");
}

#[test]
fn get_value_on_unset_key_returns_empty_string() {
    let (mut session, _mock) = mock_session();
    session.initialize();
    assert_eq!(session.get_value("cmi.learner_id"), "");
}

#[test]
fn mock_store_is_seeded_with_cmi_defaults() {
    let (mut session, _mock) = mock_session();
    session.initialize();
    assert_eq!(session.get_value("cmi.completion_status"), "not attempted");
    assert_eq!(session.get_value("cmi.success_status"), "unknown");
    assert_eq!(session.get_value("cmi.score.max"), "100");
}

#[test]
fn open_session_marks_the_attempt_incomplete() {
    let (mut session, mock) = mock_session();
    assert!(open_session(&mut session));
    assert_eq!(
        mock.stored("cmi.completion_status").as_deref(),
        Some("incomplete")
    );
    assert!(mock.calls().iter().any(|c| c == "Commit"));
}

#[test]
fn submit_outcome_reports_score_and_closes_the_session() {
    let (mut session, mock) = mock_session();
    open_session(&mut session);
    let mut score = ScoreBoard::default();
    score.reset(10);
    for _ in 0..7 {
        score.record_correct();
    }
    let percent = submit_outcome(&mut session, &score);
    assert_eq!(percent, 70);
    assert_eq!(mock.stored("cmi.score.raw").as_deref(), Some("70"));
    assert_eq!(mock.stored("cmi.score.max").as_deref(), Some("100"));
    assert_eq!(mock.stored("cmi.score.min").as_deref(), Some("0"));
    assert_eq!(
        mock.stored("cmi.completion_status").as_deref(),
        Some("completed")
    );
    assert_eq!(mock.stored("cmi.success_status").as_deref(), Some("passed"));
    assert!(!session.is_initialized());
    // Mock is 2004; the legacy 1.2 field must not have been touched.
    assert_eq!(
        mock.stored("cmi.core.lesson_status").as_deref(),
        Some("not attempted")
    );
}

#[test]
fn a_single_mistake_fails_success_but_not_completion() {
    let (mut session, mock) = mock_session();
    open_session(&mut session);
    let mut score = ScoreBoard::default();
    score.reset(10);
    for _ in 0..10 {
        score.record_correct();
    }
    score.record_miss("apple");
    submit_outcome(&mut session, &score);
    assert_eq!(mock.stored("cmi.success_status").as_deref(), Some("failed"));
    assert_eq!(
        mock.stored("cmi.completion_status").as_deref(),
        Some("completed")
    );
}

#[test]
fn empty_question_set_submits_zero() {
    let (mut session, mock) = mock_session();
    open_session(&mut session);
    let mut score = ScoreBoard::default();
    score.reset(0);
    let percent = submit_outcome(&mut session, &score);
    assert_eq!(percent, 0);
    assert_eq!(mock.stored("cmi.score.raw").as_deref(), Some("0"));
}

#[test]
fn unload_mid_game_suspends_before_terminating() {
    let (mut session, mock) = mock_session();
    open_session(&mut session);
    suspend_on_unload(&mut session, false);
    assert_eq!(mock.stored("cmi.exit").as_deref(), Some("suspend"));
    assert!(!session.is_initialized());
}

#[test]
fn unload_after_finishing_only_terminates() {
    let (mut session, mock) = mock_session();
    open_session(&mut session);
    suspend_on_unload(&mut session, true);
    assert_eq!(mock.stored("cmi.exit").as_deref(), Some(""));
    assert!(!session.is_initialized());
}

#[test]
fn unload_without_a_session_is_a_no_op() {
    let (mut session, mock) = mock_session();
    let before = mock.calls().len();
    suspend_on_unload(&mut session, false);
    assert_eq!(mock.calls().len(), before);
}

// ---------------------------------------------------------------------------
// SCORM 1.2 behavior requires a transport that reports V12; the mock is
// pinned to 2004, so use a local stub.

#[derive(Clone, Default)]
struct StubV12 {
    store: std::rc::Rc<std::cell::RefCell<std::collections::HashMap<String, String>>>,
}

impl LmsApi for StubV12 {
    fn version(&self) -> ScormVersion {
        ScormVersion::V12
    }
    fn initialize(&self) -> String {
        "true".into()
    }
    fn terminate(&self) -> String {
        "true".into()
    }
    fn get_value(&self, element: &str) -> String {
        self.store
            .borrow()
            .get(element)
            .cloned()
            .unwrap_or_default()
    }
    fn set_value(&self, element: &str, value: &str) -> String {
        self.store
            .borrow_mut()
            .insert(element.into(), value.into());
        "true".into()
    }
    fn commit(&self) -> String {
        "true".into()
    }
    fn last_error(&self) -> String {
        "0".into()
    }
    fn error_string(&self, _code: &str) -> String {
        "No error".into()
    }
}

#[test]
fn legacy_lesson_status_is_written_only_for_v12() {
    let stub = StubV12::default();
    let mut session = ScormSession::new(Box::new(stub.clone()));
    open_session(&mut session);
    let mut score = ScoreBoard::default();
    score.reset(4);
    for _ in 0..4 {
        score.record_correct();
    }
    submit_outcome(&mut session, &score);
    assert_eq!(
        stub.store.borrow().get("cmi.core.lesson_status").cloned(),
        Some("passed".to_string())
    );
}

// A transport that refuses Initialize: the session must stay unusable but the
// failure must not propagate as a panic (degraded, non-reporting mode).
struct RefusingApi;

impl LmsApi for RefusingApi {
    fn version(&self) -> ScormVersion {
        ScormVersion::V2004
    }
    fn initialize(&self) -> String {
        "false".into()
    }
    fn terminate(&self) -> String {
        "false".into()
    }
    fn get_value(&self, _element: &str) -> String {
        String::new()
    }
    fn set_value(&self, _element: &str, _value: &str) -> String {
        "false".into()
    }
    fn commit(&self) -> String {
        "false".into()
    }
    fn last_error(&self) -> String {
        "101".into()
    }
    fn error_string(&self, _code: &str) -> String {
        "General exception".into()
    }
}

#[test]
fn refused_initialize_leaves_the_session_degraded() {
    let mut session = ScormSession::new(Box::new(RefusingApi));
    assert!(!open_session(&mut session));
    assert!(!session.is_initialized());
    assert!(!session.set_value("cmi.score.raw", 10));
    assert_eq!(session.get_value("cmi.score.raw"), "");
    // Terminate on a never-opened session is still a success.
    assert!(session.terminate());
}
