//! Button callback registry, keyed by element id.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::render::Callback;

/// Maps button ids to the callbacks attached when markup is built.
///
/// Lookups happen at build time: changing the registry does not affect
/// buttons that were already built.
#[derive(Default, Clone)]
pub struct CallbackRegistry {
    callbacks: HashMap<String, Callback>,
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&str> = self.callbacks.keys().map(String::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("CallbackRegistry").field("ids", &ids).finish()
    }
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for buttons with `id`, replacing any previous one.
    pub fn add(&mut self, id: impl Into<String>, callback: impl Fn() + 'static) {
        self.callbacks.insert(id.into(), Rc::new(callback));
    }

    /// Returns `true` if a callback was registered for `id`.
    pub fn remove(&mut self, id: &str) -> bool {
        self.callbacks.remove(id).is_some()
    }

    pub fn clear(&mut self) {
        self.callbacks.clear();
    }

    pub fn get(&self, id: &str) -> Option<&Callback> {
        self.callbacks.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.callbacks.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}
