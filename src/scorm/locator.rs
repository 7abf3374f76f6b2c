//! Host API discovery.
//!
//! A SCORM player loads this content in a frame and injects the API object on
//! some ancestor window, possibly *after* our own load event fires. Discovery
//! therefore walks the parent chain, and on a miss reschedules itself a
//! bounded number of times before giving up and falling back to the mock.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Window, window};

use super::{JsApiAdapter, MockApi, ScormSession, ScormVersion, debug};

/// Maximum number of delayed re-probes before mock fallback engages.
pub const MAX_DISCOVERY_TRIES: u32 = 500;
/// Delay between re-probes, in milliseconds.
pub const DISCOVERY_INTERVAL_MS: i32 = 10;

/// Outcome of registering a failed probe against the budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attempt {
    /// Budget remains; caller may schedule another probe.
    Retry,
    /// Budget spent; caller must fall back and never probe again.
    Exhausted,
}

/// Bounded retry state. Kept separate from the scheduling side so the
/// ceiling semantics are testable without a browser event loop.
pub struct DiscoveryBudget {
    tries: u32,
    limit: u32,
}

impl DiscoveryBudget {
    pub fn new(limit: u32) -> Self {
        Self { tries: 0, limit }
    }

    /// Records one failed probe. Once `Exhausted` is returned it is returned
    /// forever; the budget never re-arms.
    pub fn record_miss(&mut self) -> Attempt {
        if self.tries >= self.limit {
            return Attempt::Exhausted;
        }
        self.tries += 1;
        if self.tries >= self.limit {
            Attempt::Exhausted
        } else {
            Attempt::Retry
        }
    }

    pub fn tries(&self) -> u32 {
        self.tries
    }
}

/// Walks the ancestor chain of `start` (never testing `start` itself) looking
/// for `API_1484_11` (SCORM 2004) or `API` (SCORM 1.2) on each ancestor. The
/// walk ends when there is no parent or the parent references itself (top of
/// the chain). A cross-origin ancestor that refuses property access counts as
/// a miss for that ancestor.
pub fn find_api_in_ancestors(start: &Window) -> Option<(js_sys::Object, ScormVersion)> {
    let mut current = start.clone();
    loop {
        let parent = current.parent().ok().flatten()?;
        if js_sys::Object::is(parent.as_ref(), current.as_ref()) {
            return None;
        }
        if let Some(api) = global_api_object(&parent, "API_1484_11") {
            return Some((api, ScormVersion::V2004));
        }
        if let Some(api) = global_api_object(&parent, "API") {
            return Some((api, ScormVersion::V12));
        }
        current = parent;
    }
}

fn global_api_object(win: &Window, name: &str) -> Option<js_sys::Object> {
    let value = js_sys::Reflect::get(win.as_ref(), &JsValue::from_str(name)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    value.dyn_into().ok()
}

fn probe() -> Option<(js_sys::Object, ScormVersion)> {
    let win = window()?;
    find_api_in_ancestors(&win)
}

type ReadyCallback = Rc<RefCell<Option<Box<dyn FnOnce(ScormSession)>>>>;
type RetryClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Resolves a transport and delivers a fresh [`ScormSession`] to `on_ready`
/// exactly once: immediately when a host API is already present, later from a
/// `setTimeout` re-probe when the hosting frame needed time to inject it, or
/// with the mock transport once the retry budget is exhausted.
pub fn resolve_session<F>(on_ready: F)
where
    F: FnOnce(ScormSession) + 'static,
{
    // Fast path: the host API is already there.
    if let Some((api, version)) = probe() {
        debug(&format!("found host LMS API (version {version})"));
        on_ready(ScormSession::new(Box::new(JsApiAdapter::new(api, version))));
        return;
    }

    // The synchronous probe above counts against the same budget as the
    // rescheduled ones: exactly MAX_DISCOVERY_TRIES misses total.
    let mut initial = DiscoveryBudget::new(MAX_DISCOVERY_TRIES);
    if initial.record_miss() == Attempt::Exhausted {
        debug("no host LMS API after max tries; switching to mock mode");
        on_ready(ScormSession::new(Box::new(MockApi::new())));
        return;
    }

    let done: ReadyCallback = Rc::new(RefCell::new(Some(Box::new(on_ready))));
    let budget = Rc::new(RefCell::new(initial));

    let tick: RetryClosure = Rc::new(RefCell::new(None));
    let tick_handle = tick.clone();
    *tick_handle.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let resolved = if let Some((api, version)) = probe() {
            debug(&format!("found host LMS API (version {version})"));
            Some(ScormSession::new(Box::new(JsApiAdapter::new(api, version))))
        } else if budget.borrow_mut().record_miss() == Attempt::Exhausted {
            debug("no host LMS API after max tries; switching to mock mode");
            Some(ScormSession::new(Box::new(MockApi::new())))
        } else {
            None
        };
        match resolved {
            Some(session) => {
                if let Some(cb) = done.borrow_mut().take() {
                    cb(session);
                }
            }
            None => schedule(&tick),
        }
    }) as Box<dyn FnMut()>));

    schedule(&tick_handle);
}

fn schedule(tick: &RetryClosure) {
    if let (Some(win), Some(closure)) = (window(), tick.borrow().as_ref()) {
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            DISCOVERY_INTERVAL_MS,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_allows_retries_up_to_the_ceiling() {
        let mut budget = DiscoveryBudget::new(MAX_DISCOVERY_TRIES);
        for _ in 0..MAX_DISCOVERY_TRIES - 1 {
            assert_eq!(budget.record_miss(), Attempt::Retry);
        }
        assert_eq!(budget.record_miss(), Attempt::Exhausted);
        assert_eq!(budget.tries(), MAX_DISCOVERY_TRIES);
    }

    #[test]
    fn budget_never_rearms_after_exhaustion() {
        let mut budget = DiscoveryBudget::new(3);
        while budget.record_miss() == Attempt::Retry {}
        for _ in 0..10 {
            assert_eq!(budget.record_miss(), Attempt::Exhausted);
        }
        assert_eq!(budget.tries(), 3);
    }

    #[test]
    fn zero_limit_budget_is_immediately_exhausted() {
        let mut budget = DiscoveryBudget::new(0);
        assert_eq!(budget.record_miss(), Attempt::Exhausted);
    }
}
