//! # Lock helpers
//!
//! Shared state in this crate lives behind `std::sync::Mutex`: the raster
//! caches and the coordinator's subscriber list.
//!
//! A mutex becomes poisoned when a thread panics while holding it. Host change
//! callbacks are allowed to panic (faults propagate to the host's event
//! dispatch), so a poisoned lock is an expected situation, not a bug.
//!
//! All of the guarded data stays valid after a partial update:
//!
//! | Data | Worst case after recovery |
//! |------|---------------------------|
//! | Raster cache | An entry missing, re-rendered on next use |
//! | Subscriber list | A listener missing or still present |
//!
//! so every production lock goes through [`lock_recover`], or
//! [`lock_recover_debug`] where a recovery is worth a warning. Tests keep using
//! `.lock().unwrap()` to fail fast.
//!
//! ```rust
//! use std::sync::Mutex;
//! use edgy_color_picker::sync::lock_recover;
//!
//! let palette = Mutex::new(vec![0xF800_u16, 0x07E0]);
//! let guard = lock_recover(&palette);
//! assert_eq!(guard.len(), 2);
//! ```

use std::sync::{Mutex, MutexGuard};

/// Lock a mutex, recovering from poison if necessary.
///
/// Never panics.
#[inline]
pub fn lock_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Lock a mutex, logging a warning with `context` when poison is recovered.
///
/// ```rust
/// use std::sync::Mutex;
/// use edgy_color_picker::sync::lock_recover_debug;
///
/// let mutex = Mutex::new("hello");
/// let guard = lock_recover_debug(&mutex, "doc example");
/// assert_eq!(*guard, "hello");
/// ```
#[inline]
pub fn lock_recover_debug<'a, T>(mutex: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|e| {
        log::warn!("mutex poison recovered at: {context}");
        e.into_inner()
    })
}
