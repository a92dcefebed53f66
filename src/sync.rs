//! The lock that serialises dispatch into a table's round state.
//!
//! Backed by `std::sync::Mutex` (poison-tolerant) with `std`, and by
//! `spin::Mutex` in `alloc`-only builds.

#[cfg(feature = "std")]
type Inner<T> = std::sync::Mutex<T>;
#[cfg(feature = "std")]
pub type Guard<'a, T> = std::sync::MutexGuard<'a, T>;

#[cfg(all(not(feature = "std"), feature = "alloc"))]
type Inner<T> = spin::Mutex<T>;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
pub type Guard<'a, T> = spin::MutexGuard<'a, T>;

pub struct Mutex<T>(Inner<T>);

impl<T> Mutex<T> {
    pub const fn new(value: T) -> Self {
        Self(Inner::new(value))
    }

    #[cfg(feature = "std")]
    pub fn lock(&self) -> Guard<'_, T> {
        self.0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    #[cfg(all(not(feature = "std"), feature = "alloc"))]
    pub fn lock(&self) -> Guard<'_, T> {
        self.0.lock()
    }

    /// Clones the guarded value out of the lock.
    pub fn cloned(&self) -> T
    where
        T: Clone,
    {
        self.lock().clone()
    }

    /// Swaps in `value` and returns the previous one.
    pub fn replace(&self, value: T) -> T {
        core::mem::replace(&mut *self.lock(), value)
    }
}
