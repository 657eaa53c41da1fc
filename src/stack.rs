//! A stack that is safe to share between threads.
//!
//! Locking each method on its own is not enough: a caller that checks `is_empty()`
//! and then pops can lose the last element to another thread in between. Here the
//! check and the removal happen in one critical section (`try_pop` / `pop`), and
//! `len` / `is_empty` are only snapshots.

use crate::error::StackError;
use std::ptr;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct ThreadSafeStack<T> {
    items: Mutex<Vec<T>>,
}

impl<T> ThreadSafeStack<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }

    pub fn push(&self, value: T) {
        self.lock().push(value);
    }

    /// Remove and return the top element, or `None` if the stack is empty.
    pub fn try_pop(&self) -> Option<T> {
        self.lock().pop()
    }

    /// Like [`try_pop`](Self::try_pop), but an empty stack is an error.
    pub fn pop(&self) -> Result<T, StackError> {
        self.try_pop().ok_or(StackError::Empty)
    }

    /// Copy of the top element. Another thread may pop it before you use it.
    pub fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        self.lock().last().cloned()
    }

    /// Snapshot only; may be stale by the time the caller reads it.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Snapshot only; never use it to decide whether a following `pop` will succeed.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Exchange the contents of two stacks.
    ///
    /// Both locks are taken in address order, so two threads swapping `a` with `b`
    /// and `b` with `a` at the same time cannot deadlock.
    pub fn swap(&self, other: &Self) {
        if ptr::eq(self, other) {
            return;
        }

        let (first, second) = if (self as *const Self) < (other as *const Self) {
            (self, other)
        } else {
            (other, self)
        };

        let mut a = first.lock();
        let mut b = second.lock();
        std::mem::swap(&mut *a, &mut *b);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        self.items.lock().unwrap_or_else(|poisoned| {
            log::warn!("stack mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}
