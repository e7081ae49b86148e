// SPDX-License-Identifier: MIT

//! Callback handles and the untyped argument payload

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Argument passed to listeners.
///
/// Ordinary payloads travel as JSON values; the `newListener` /
/// `removeListener` meta-events additionally carry the registered callback
/// handle itself.
#[derive(Clone, Debug)]
pub enum Arg {
    Json(Value),
    Callback(Callback),
}

impl Arg {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Arg::Json(value) => Some(value),
            Arg::Callback(_) => None,
        }
    }

    /// Shortcut for string payloads (`Arg::Json(Value::String(_))`).
    pub fn as_str(&self) -> Option<&str> {
        self.as_json().and_then(Value::as_str)
    }

    pub fn as_callback(&self) -> Option<&Callback> {
        match self {
            Arg::Callback(callback) => Some(callback),
            Arg::Json(_) => None,
        }
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Json(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Json(Value::from(value))
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Json(Value::from(value))
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Json(Value::from(value))
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Json(Value::from(value))
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Json(Value::from(value))
    }
}

impl From<Callback> for Arg {
    fn from(callback: Callback) -> Self {
        Arg::Callback(callback)
    }
}

/// Closure type invoked on dispatch.
pub type CallbackFn = dyn Fn(&[Arg]) + Send + Sync;

/// Shared, identity-preserving handle around a listener closure.
///
/// Identity is the allocation, not the code: clones of one `Callback` are
/// "the same callback" under [`Callback::same`], while two handles built from
/// identical closures are not. Removal by identity therefore requires keeping
/// a clone of the handle that was registered.
#[derive(Clone)]
pub struct Callback(Arc<CallbackFn>);

impl Callback {
    pub fn new(callback: impl Fn(&[Arg]) + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    /// Identity comparison: do both handles share one allocation?
    pub fn same(&self, other: &Callback) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn invoke(&self, args: &[Arg]) {
        (self.0)(args)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Arc::as_ptr(&self.0))
    }
}

/// A registered callback plus whether it fires only once
#[derive(Clone, Debug)]
pub struct Listener {
    callback: Callback,
    once: bool,
}

impl Listener {
    pub(crate) fn new(callback: Callback, once: bool) -> Self {
        Self { callback, once }
    }

    pub fn callback(&self) -> &Callback {
        &self.callback
    }

    pub fn once(&self) -> bool {
        self.once
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
