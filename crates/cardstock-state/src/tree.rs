//! The shared observable state document.
//!
//! One `StateTree` exists per running application. All reads and writes go
//! through [`Path`]s; a write replaces the whole value at its path and wakes
//! every subscriber observing that exact path.

use crate::error::value_type_name;
use crate::{Path, Seg, StateError, StateResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::broadcast;

/// Buffered writes per observed path before a slow reader lags.
///
/// A lagged reader skips to newer values; readers must tolerate seeing only
/// the latest of a burst of writes.
const WATCH_CAPACITY: usize = 16;

/// Observable key-path state tree.
///
/// Reads clone the value at a path ([`StateTree::get`] returns `None` for an
/// absent path — the "no value yet" sentinel). Writes overwrite the whole
/// value, creating intermediate objects along key segments as needed.
pub struct StateTree {
    doc: Mutex<Value>,
    watchers: Mutex<HashMap<Path, broadcast::Sender<Value>>>,
}

impl StateTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            doc: Mutex::new(Value::Object(Map::new())),
            watchers: Mutex::new(HashMap::new()),
        }
    }

    /// Read the current value at a path.
    ///
    /// Returns `None` when the path has never been written (or was cleared).
    pub fn get(&self, path: &Path) -> Option<Value> {
        let doc = self.doc.lock().unwrap();
        let mut current: &Value = &doc;
        for seg in path {
            current = match seg {
                Seg::Key(k) => current.as_object()?.get(k)?,
                Seg::Index(i) => current.as_array()?.get(*i)?,
            };
        }
        Some(current.clone())
    }

    /// Read and deserialize the current value at a path.
    pub fn get_as<T: DeserializeOwned>(&self, path: &Path) -> StateResult<Option<T>> {
        match self.get(path) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Overwrite the value at a path and notify its subscribers.
    ///
    /// Intermediate objects are created along key segments; an index segment
    /// must land inside an existing array element.
    pub fn set(&self, path: &Path, value: impl Into<Value>) -> StateResult<()> {
        let value = value.into();
        {
            let mut doc = self.doc.lock().unwrap();
            let slot = slot_at(&mut doc, path, 0)?;
            *slot = value.clone();
        }
        self.notify(path, value);
        Ok(())
    }

    /// Serialize and overwrite the value at a path.
    pub fn set_as<T: Serialize>(&self, path: &Path, value: &T) -> StateResult<()> {
        self.set(path, serde_json::to_value(value)?)
    }

    /// Remove the value at a path, restoring the "no value yet" sentinel.
    ///
    /// Clears are silent: subscribers are not notified (a cleared path has
    /// no value to deliver). Only key paths can be cleared; clearing an
    /// absent path is a no-op.
    pub fn clear(&self, path: &Path) {
        let Some(Seg::Key(leaf)) = path.last() else {
            return;
        };
        let mut doc = self.doc.lock().unwrap();
        let mut current: &mut Value = &mut doc;
        for seg in &path.segments()[..path.len() - 1] {
            let next = match seg {
                Seg::Key(k) => current.as_object_mut().and_then(|m| m.get_mut(k)),
                Seg::Index(i) => current.as_array_mut().and_then(|a| a.get_mut(*i)),
            };
            match next {
                Some(v) => current = v,
                None => return,
            }
        }
        if let Some(map) = current.as_object_mut() {
            map.remove(leaf);
        }
    }

    /// Subscribe to every future write at a path.
    ///
    /// The subscription lives independently of any one navigation; it keeps
    /// delivering for as long as the tree exists.
    pub fn observe(&self, path: &Path) -> Subscription {
        let mut watchers = self.watchers.lock().unwrap();
        let tx = watchers
            .entry(path.clone())
            .or_insert_with(|| broadcast::channel(WATCH_CAPACITY).0);
        Subscription { rx: tx.subscribe() }
    }

    /// Wait for the first value at a path.
    ///
    /// Resolves immediately when the path is already set; otherwise suspends
    /// until the next write. This is the one-shot flavor of [`observe`]:
    /// deferred values are awaited, not callback-registered.
    ///
    /// [`observe`]: StateTree::observe
    pub async fn first_value(&self, path: &Path) -> Value {
        // Subscribe before checking so a write between the two is not lost.
        let mut sub = self.observe(path);
        if let Some(value) = self.get(path) {
            return value;
        }
        match sub.recv().await {
            Some(value) => value,
            // The sender lives inside this tree, so the channel cannot close
            // while `&self` is borrowed.
            None => std::future::pending().await,
        }
    }

    /// Wait for the first value at a path and deserialize it.
    pub async fn first_value_as<T: DeserializeOwned>(&self, path: &Path) -> StateResult<T> {
        let value = self.first_value(path).await;
        Ok(serde_json::from_value(value)?)
    }

    /// Clone the whole document.
    pub fn snapshot(&self) -> Value {
        self.doc.lock().unwrap().clone()
    }

    fn notify(&self, path: &Path, value: Value) {
        let watchers = self.watchers.lock().unwrap();
        if let Some(tx) = watchers.get(path) {
            // No receivers is fine; the value is simply dropped.
            let _ = tx.send(value);
        }
    }
}

impl Default for StateTree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StateTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StateTree").field(&"<Value>").finish()
    }
}

/// A live subscription to writes at one path.
pub struct Subscription {
    rx: broadcast::Receiver<Value>,
}

impl Subscription {
    /// Receive the next written value.
    ///
    /// A lagging subscription skips to the newest buffered value. Returns
    /// `None` once the owning tree is gone.
    pub async fn recv(&mut self) -> Option<Value> {
        loop {
            match self.rx.recv().await {
                Ok(value) => return Some(value),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// Walk to the slot a path names, creating intermediate objects.
fn slot_at<'a>(slot: &'a mut Value, path: &Path, depth: usize) -> StateResult<&'a mut Value> {
    if depth == path.len() {
        return Ok(slot);
    }
    let prefix = || path.segments()[..depth].iter().cloned().collect::<Path>();
    match &path.segments()[depth] {
        Seg::Key(k) => {
            if slot.is_null() {
                *slot = Value::Object(Map::new());
            }
            match slot {
                Value::Object(map) => {
                    let child = map.entry(k.clone()).or_insert(Value::Null);
                    slot_at(child, path, depth + 1)
                }
                other => Err(StateError::type_mismatch(
                    prefix(),
                    "object",
                    value_type_name(other),
                )),
            }
        }
        Seg::Index(i) => match slot {
            Value::Array(items) => {
                let len = items.len();
                match items.get_mut(*i) {
                    Some(child) => slot_at(child, path, depth + 1),
                    None => Err(StateError::index_out_of_bounds(prefix(), *i, len)),
                }
            }
            other => Err(StateError::type_mismatch(
                prefix(),
                "array",
                value_type_name(other),
            )),
        },
    }
}
