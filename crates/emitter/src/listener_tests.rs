use super::*;
use serde_json::json;
use std::sync::{Arc, Mutex};

#[test]
fn clones_share_identity() {
    let callback = Callback::new(|_| {});
    let clone = callback.clone();
    assert!(callback.same(&clone));
}

#[test]
fn separate_handles_are_never_the_same() {
    // Identical bodies, distinct allocations.
    let a = Callback::new(|_| {});
    let b = Callback::new(|_| {});
    assert!(!a.same(&b));
}

#[test]
fn invoke_passes_args_through() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let callback = {
        let seen = Arc::clone(&seen);
        Callback::new(move |args| {
            let payload = args[0].as_str().unwrap_or_default().to_string();
            seen.lock().unwrap().push(payload);
        })
    };

    callback.invoke(&[Arg::from("payload")]);

    assert_eq!(*seen.lock().unwrap(), vec!["payload".to_string()]);
}

#[test]
fn arg_conversions() {
    assert_eq!(Arg::from("s").as_str(), Some("s"));
    assert_eq!(Arg::from(7i64).as_json(), Some(&json!(7)));
    assert_eq!(Arg::from(true).as_json(), Some(&json!(true)));
    assert!(Arg::from(1.5f64).as_callback().is_none());

    let callback = Callback::new(|_| {});
    let arg = Arg::from(callback.clone());
    assert!(arg.as_callback().is_some_and(|c| c.same(&callback)));
    assert!(arg.as_json().is_none());
    assert!(arg.as_str().is_none());
}

#[test]
fn listener_exposes_callback_and_once_flag() {
    let callback = Callback::new(|_| {});
    let listener = Listener::new(callback.clone(), true);
    assert!(listener.once());
    assert!(listener.callback().same(&callback));
}
