//! Version adapters over a real host API object.
//!
//! SCORM 1.2 and SCORM 2004 expose the same seven operations under different
//! method names. An adapter binds one host object to one vocabulary at
//! discovery time; after that the facade never needs to know which edition it
//! is talking to.

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use super::{LmsApi, ScormVersion, debug};

/// Method vocabulary for one protocol edition.
struct MethodNames {
    initialize: &'static str,
    terminate: &'static str,
    get_value: &'static str,
    set_value: &'static str,
    commit: &'static str,
    last_error: &'static str,
    error_string: &'static str,
}

const V12_METHODS: MethodNames = MethodNames {
    initialize: "LMSInitialize",
    terminate: "LMSFinish",
    get_value: "LMSGetValue",
    set_value: "LMSSetValue",
    commit: "LMSCommit",
    last_error: "LMSGetLastError",
    error_string: "LMSGetErrorString",
};

const V2004_METHODS: MethodNames = MethodNames {
    initialize: "Initialize",
    terminate: "Terminate",
    get_value: "GetValue",
    set_value: "SetValue",
    commit: "Commit",
    last_error: "GetLastError",
    error_string: "GetErrorString",
};

/// Wraps the API object a hosting LMS injected into an ancestor window.
pub struct JsApiAdapter {
    api: js_sys::Object,
    version: ScormVersion,
    names: &'static MethodNames,
}

impl JsApiAdapter {
    pub fn new(api: js_sys::Object, version: ScormVersion) -> Self {
        let names = match version {
            ScormVersion::V12 => &V12_METHODS,
            ScormVersion::V2004 => &V2004_METHODS,
        };
        Self {
            api,
            version,
            names,
        }
    }

    fn method(&self, name: &str) -> Option<Function> {
        let member = Reflect::get(&self.api, &JsValue::from_str(name)).ok()?;
        member.dyn_into::<Function>().ok()
    }

    /// Boolean-result call. SCORM mandates a single `""` argument for
    /// Initialize / Terminate / Commit. A missing method or a throwing call
    /// maps to `"false"`.
    fn call_bool(&self, name: &str) -> String {
        let Some(f) = self.method(name) else {
            debug(&format!(
                "{name} not available on the {} API object",
                self.version
            ));
            return "false".into();
        };
        match f.call1(&self.api, &JsValue::from_str("")) {
            Ok(r) => r.as_string().unwrap_or_else(|| "false".into()),
            Err(_) => "false".into(),
        }
    }
}

impl LmsApi for JsApiAdapter {
    fn version(&self) -> ScormVersion {
        self.version
    }

    fn initialize(&self) -> String {
        self.call_bool(self.names.initialize)
    }

    fn terminate(&self) -> String {
        self.call_bool(self.names.terminate)
    }

    fn get_value(&self, element: &str) -> String {
        let Some(f) = self.method(self.names.get_value) else {
            return String::new();
        };
        f.call1(&self.api, &JsValue::from_str(element))
            .ok()
            .and_then(|r| r.as_string())
            .unwrap_or_default()
    }

    fn set_value(&self, element: &str, value: &str) -> String {
        let Some(f) = self.method(self.names.set_value) else {
            return "false".into();
        };
        match f.call2(
            &self.api,
            &JsValue::from_str(element),
            &JsValue::from_str(value),
        ) {
            Ok(r) => r.as_string().unwrap_or_else(|| "false".into()),
            Err(_) => "false".into(),
        }
    }

    fn commit(&self) -> String {
        self.call_bool(self.names.commit)
    }

    fn last_error(&self) -> String {
        let Some(f) = self.method(self.names.last_error) else {
            return "0".into();
        };
        f.call0(&self.api)
            .ok()
            .and_then(|r| r.as_string())
            .unwrap_or_else(|| "0".into())
    }

    fn error_string(&self, code: &str) -> String {
        let Some(f) = self.method(self.names.error_string) else {
            return String::new();
        };
        f.call1(&self.api, &JsValue::from_str(code))
            .ok()
            .and_then(|r| r.as_string())
            .unwrap_or_default()
    }
}
