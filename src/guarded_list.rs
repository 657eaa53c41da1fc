//! A list whose every access goes through one mutex.
//!
//! The list owns its lock; callers share it by reference (or `Arc`) instead of
//! reaching for a global.

use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct GuardedList<T> {
    items: Mutex<Vec<T>>,
}

impl<T> GuardedList<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }

    /// Append `value`. The guard lives until the end of the call.
    pub fn add(&self, value: T) {
        let mut items = self.lock();
        items.push(value);
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.lock().contains(value)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the current contents, taken under the lock.
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.lock().clone()
    }

    // A push or a lookup cannot leave the Vec half-updated, so the data behind a
    // poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        self.items.lock().unwrap_or_else(|poisoned| {
            log::warn!("guarded list mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}
