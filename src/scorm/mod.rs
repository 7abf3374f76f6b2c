//! SCORM session layer.
//!
//! The hosting LMS exposes an API object on some ancestor window; which object
//! (and which method vocabulary) depends on the SCORM edition the LMS speaks.
//! This module hides all of that behind [`ScormSession`]: discovery lives in
//! [`locator`], the two protocol vocabularies behind [`LmsApi`] adapters in
//! [`adapter`], and the standalone fallback in [`mock`].
//!
//! All transport methods follow the SCORM convention of returning the literal
//! strings `"true"` / `"false"` for boolean results; comparisons here are
//! string comparisons on purpose.

pub mod adapter;
pub mod locator;
pub mod mock;

use std::fmt;

pub use adapter::JsApiAdapter;
pub use locator::resolve_session;
pub use mock::MockApi;

/// Success sentinel used by every boolean-ish SCORM call.
pub const SCORM_TRUE: &str = "true";

/// Protocol edition resolved at discovery time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScormVersion {
    V12,
    V2004,
}

impl fmt::Display for ScormVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScormVersion::V12 => f.write_str("1.2"),
            ScormVersion::V2004 => f.write_str("2004"),
        }
    }
}

/// Version-agnostic transport surface. One implementation wraps a real host
/// API object ([`JsApiAdapter`]), the other is the in-memory fallback
/// ([`MockApi`]).
pub trait LmsApi {
    fn version(&self) -> ScormVersion;
    fn is_mock(&self) -> bool {
        false
    }
    fn initialize(&self) -> String;
    fn terminate(&self) -> String;
    fn get_value(&self, element: &str) -> String;
    fn set_value(&self, element: &str, value: &str) -> String;
    fn commit(&self) -> String;
    fn last_error(&self) -> String;
    fn error_string(&self, code: &str) -> String;
}

/// The single call surface the game controller uses. Owns the resolved
/// transport for the lifetime of the session; transport selection happens
/// once, before construction, and is never revisited.
pub struct ScormSession {
    api: Box<dyn LmsApi>,
    initialized: bool,
}

impl ScormSession {
    pub fn new(api: Box<dyn LmsApi>) -> Self {
        Self {
            api,
            initialized: false,
        }
    }

    pub fn version(&self) -> ScormVersion {
        self.api.version()
    }

    pub fn is_mock(&self) -> bool {
        self.api.is_mock()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Opens communication with the LMS. Idempotent: calling again while the
    /// session is already open is a no-op returning `true`, so a stray second
    /// call cannot double-initialize the host.
    pub fn initialize(&mut self) -> bool {
        if self.initialized {
            return true;
        }
        let result = self.api.initialize();
        if result == SCORM_TRUE {
            self.initialized = true;
            debug(&format!(
                "LMS connection established ({}{})",
                self.version(),
                if self.is_mock() { ", mock" } else { "" }
            ));
            true
        } else {
            debug(&format!("LMS Initialize failed: {result}"));
            false
        }
    }

    /// Closes the session. No-op success when not initialized; a transport
    /// failure leaves the initialized flag set (matching the host's view).
    pub fn terminate(&mut self) -> bool {
        if !self.initialized {
            return true;
        }
        let result = self.api.terminate();
        if result == SCORM_TRUE {
            self.initialized = false;
            true
        } else {
            debug(&format!("LMS Terminate failed: {result}"));
            false
        }
    }

    pub fn commit(&mut self) -> bool {
        if !self.initialized {
            return false;
        }
        self.api.commit() == SCORM_TRUE
    }

    /// Writes a CMI element. The value is coerced to its string form; a
    /// transport failure is logged with the LMS error code but only the
    /// boolean result reaches the caller.
    pub fn set_value(&mut self, element: &str, value: impl fmt::Display) -> bool {
        if !self.initialized {
            return false;
        }
        let value = value.to_string();
        let result = self.api.set_value(element, &value);
        if result == SCORM_TRUE {
            true
        } else {
            let code = self.api.last_error();
            debug(&format!(
                "SetValue failed for {element}='{value}': code {code} ({})",
                self.api.error_string(&code)
            ));
            false
        }
    }

    /// Reads a CMI element. Returns `""` when not initialized. An empty
    /// result that coincides with error code "0" or "301" is benign; other
    /// codes are logged. The received value is returned either way, so
    /// callers cannot distinguish "legitimately empty" from "unreadable".
    pub fn get_value(&self, element: &str) -> String {
        if !self.initialized {
            return String::new();
        }
        let value = self.api.get_value(element);
        if value.is_empty() {
            let code = self.api.last_error();
            if code != "0" && code != "301" {
                debug(&format!("GetValue failed for {element}: code {code}"));
            }
        }
        value
    }

    /// Always answerable, even before Initialize.
    pub fn last_error(&self) -> String {
        self.api.last_error()
    }
}

/// Console logging shim; no-op off wasm so the facade stays host-testable.
pub(crate) fn debug(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(&format!("SCORM: {msg}")));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}
