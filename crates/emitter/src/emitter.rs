// SPDX-License-Identifier: MIT

//! The emitter: listener registry and dispatch

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinSet;

use crate::listener::{Arg, Callback, Listener};
use crate::pattern::EventPattern;

/// Meta-event emitted after every successful `on`/`once` registration, with
/// `(pattern, callback)` as arguments.
pub const NEW_LISTENER: &str = "newListener";

/// Meta-event emitted after every external [`Emitter::remove_listener`] that
/// actually removed something, with `(pattern, callback)` as arguments.
/// Internal once-consumption removal does not emit it.
pub const REMOVE_LISTENER: &str = "removeListener";

type Registry = HashMap<EventPattern, Vec<Listener>>;

/// In-process pub/sub registry with wildcard event patterns.
///
/// All methods take `&self`; the registry is guarded by a single exclusive
/// lock that is always released before any callback or meta-event runs, so a
/// listener may call back into the emitter without deadlocking. Share across
/// threads or tasks by wrapping in an `Arc`.
pub struct Emitter {
    registry: Mutex<Registry>,
}

impl Emitter {
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register `callback` on `pattern`. Emits `"newListener"`.
    ///
    /// The same callback handle may be registered any number of times; each
    /// registration fires separately.
    pub fn on(&self, pattern: &str, callback: Callback) -> &Self {
        self.attach(pattern, callback, false)
    }

    /// Alias for [`Emitter::on`].
    pub fn add_listener(&self, pattern: &str, callback: Callback) -> &Self {
        self.on(pattern, callback)
    }

    /// Register a one-shot listener: it fires at most once across all
    /// subsequent emits and is removed from the registry before it runs.
    /// Emits `"newListener"`.
    pub fn once(&self, pattern: &str, callback: Callback) -> &Self {
        self.attach(pattern, callback, true)
    }

    fn attach(&self, pattern: &str, callback: Callback, once: bool) -> &Self {
        {
            let mut registry = self.lock();
            registry
                .entry(EventPattern::new(pattern))
                .or_default()
                .push(Listener::new(callback.clone(), once));
        }
        tracing::debug!(pattern, once, "listener added");
        self.emit_sync(NEW_LISTENER, &[Arg::from(pattern), Arg::from(callback)]);
        self
    }

    /// Remove the first listener on the exact key `pattern` whose callback is
    /// the same handle as `callback`, preserving the order of the rest.
    /// Emits `"removeListener"` when something was removed; silent no-op when
    /// the pattern or callback is not found.
    pub fn remove_listener(&self, pattern: &str, callback: &Callback) -> &Self {
        if self.detach(pattern, callback) {
            tracing::debug!(pattern, "listener removed");
            self.emit_sync(
                REMOVE_LISTENER,
                &[Arg::from(pattern), Arg::from(callback.clone())],
            );
        }
        self
    }

    // Locked match-and-delete. Atomic, so two dispatches racing to consume
    // the same once-listener remove it exactly once.
    fn detach(&self, pattern: &str, callback: &Callback) -> bool {
        let mut registry = self.lock();
        let Some(sequence) = registry.get_mut(pattern) else {
            return false;
        };
        match sequence.iter().position(|l| l.callback().same(callback)) {
            Some(index) => {
                sequence.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every listener on the exact key `pattern`, or clear the whole
    /// registry when `pattern` is `None`. The key is matched literally, never
    /// expanded: removing `"user.created"` leaves a `"user.*"` entry alone.
    pub fn remove_all_listeners(&self, pattern: Option<&str>) -> &Self {
        let mut registry = self.lock();
        match pattern {
            None => {
                registry.clear();
                tracing::debug!("registry cleared");
            }
            Some(key) => {
                registry.remove(key);
                tracing::debug!(pattern = key, "pattern cleared");
            }
        }
        self
    }

    /// Snapshot copy of every listener whose pattern matches `event_name`.
    ///
    /// Listeners registered on a common key appear in registration order;
    /// order across different matching patterns is unspecified.
    pub fn listeners(&self, event_name: &str) -> Vec<Listener> {
        self.matching(event_name)
            .into_iter()
            .map(|(_, listener)| listener)
            .collect()
    }

    /// Number of listeners that would fire for `event_name`.
    pub fn listeners_count(&self, event_name: &str) -> usize {
        self.matching(event_name).len()
    }

    // Locked snapshot keeping the source pattern per listener, so once
    // consumption removes from the key the listener actually lives under.
    fn matching(&self, event_name: &str) -> Vec<(EventPattern, Listener)> {
        let registry = self.lock();
        registry
            .iter()
            .filter(|(pattern, _)| pattern.matches(event_name))
            .flat_map(|(pattern, sequence)| {
                sequence
                    .iter()
                    .map(|listener| (pattern.clone(), listener.clone()))
            })
            .collect()
    }

    /// Invoke every matching listener on the caller's thread, in snapshot
    /// order. Once-listeners are detached (with the `"removeListener"`
    /// emission suppressed) before their callback runs.
    ///
    /// A panicking listener propagates to the caller; the remaining listeners
    /// in that dispatch are not guaranteed to run.
    pub fn emit_sync(&self, event_name: &str, args: &[Arg]) -> &Self {
        let snapshot = self.matching(event_name);
        if !snapshot.is_empty() {
            tracing::trace!(
                event = event_name,
                listeners = snapshot.len(),
                "dispatching sync"
            );
        }
        for (pattern, listener) in snapshot {
            if listener.once() {
                self.detach(pattern.as_str(), listener.callback());
            }
            listener.callback().invoke(args);
        }
        self
    }

    /// Schedule every matching listener on its own task. Fire-and-forget:
    /// no ordering between listeners, no completion guarantee when this
    /// returns, and a panic stays confined to its own task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn emit_async(&self, event_name: &str, args: Vec<Arg>) -> &Self {
        let args: Arc<[Arg]> = args.into();
        let snapshot = self.matching(event_name);
        if !snapshot.is_empty() {
            tracing::trace!(
                event = event_name,
                listeners = snapshot.len(),
                "dispatching async"
            );
        }
        for (pattern, listener) in snapshot {
            if listener.once() {
                self.detach(pattern.as_str(), listener.callback());
            }
            let args = Arc::clone(&args);
            tokio::spawn(async move {
                listener.callback().invoke(&args);
            });
        }
        self
    }

    /// Like [`Emitter::emit_async`], but returns a [`JoinSet`] aggregating
    /// the scheduled invocations, so the caller can await completion and
    /// observe per-listener panics as join errors.
    ///
    /// Note that dropping the returned set aborts tasks that have not started
    /// running; callers wanting fire-and-forget should use
    /// [`Emitter::emit_async`] instead.
    pub fn emit_async_tracked(&self, event_name: &str, args: Vec<Arg>) -> JoinSet<()> {
        let args: Arc<[Arg]> = args.into();
        let mut tasks = JoinSet::new();
        for (pattern, listener) in self.matching(event_name) {
            if listener.once() {
                self.detach(pattern.as_str(), listener.callback());
            }
            let args = Arc::clone(&args);
            tasks.spawn(async move {
                listener.callback().invoke(&args);
            });
        }
        tasks
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "emitter_tests.rs"]
mod tests;
