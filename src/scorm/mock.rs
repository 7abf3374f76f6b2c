//! In-memory fallback transport used when no host LMS is found.
//!
//! The mock backs both protocol vocabularies with one shared store, so the
//! facade can drive it exactly like a real API. It is selected only after the
//! locator exhausts its retry budget; it is not a user-facing mode. The store
//! lives only as long as the page (nothing is persisted across reloads).

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{LmsApi, ScormVersion, debug};

/// CMI defaults pre-seeded into a fresh mock store.
const MOCK_DEFAULTS: &[(&str, &str)] = &[
    ("cmi.core.lesson_status", "not attempted"),
    ("cmi.completion_status", "not attempted"),
    ("cmi.success_status", "unknown"),
    ("cmi.score.raw", "0"),
    ("cmi.score.max", "100"),
    ("cmi.score.min", "0"),
    ("cmi.exit", ""),
];

/// Drop-in stand-in for a host API object. Cloning yields a handle onto the
/// same store and call journal (handy for tests; single-threaded wasm makes
/// `Rc` the right tool here).
#[derive(Clone)]
pub struct MockApi {
    store: Rc<RefCell<HashMap<String, String>>>,
    calls: Rc<RefCell<Vec<String>>>,
}

impl MockApi {
    pub fn new() -> Self {
        let store = MOCK_DEFAULTS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            store: Rc::new(RefCell::new(store)),
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Journal of transport calls made so far, in order ("Initialize",
    /// "SetValue cmi.score.raw=70", ...).
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Direct (ungated) view of a stored element, for tests.
    pub fn stored(&self, element: &str) -> Option<String> {
        self.store.borrow().get(element).cloned()
    }

    fn journal(&self, entry: String) {
        debug(&format!("[MOCK] {entry}"));
        self.calls.borrow_mut().push(entry);
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

impl LmsApi for MockApi {
    fn version(&self) -> ScormVersion {
        // The mock always simulates the newer protocol.
        ScormVersion::V2004
    }

    fn is_mock(&self) -> bool {
        true
    }

    fn initialize(&self) -> String {
        self.journal("Initialize".into());
        "true".into()
    }

    fn terminate(&self) -> String {
        self.journal("Terminate".into());
        "true".into()
    }

    fn get_value(&self, element: &str) -> String {
        let value = self
            .store
            .borrow()
            .get(element)
            .cloned()
            .unwrap_or_default();
        self.journal(format!("GetValue {element}={value}"));
        value
    }

    fn set_value(&self, element: &str, value: &str) -> String {
        self.store
            .borrow_mut()
            .insert(element.to_string(), value.to_string());
        self.journal(format!("SetValue {element}={value}"));
        "true".into()
    }

    fn commit(&self) -> String {
        self.journal("Commit".into());
        "true".into()
    }

    fn last_error(&self) -> String {
        // The mock cannot fail.
        "0".into()
    }

    fn error_string(&self, _code: &str) -> String {
        "No error".into()
    }
}
