//! Exclusive lock guarding one injector's mutable state.

#[cfg(feature = "parking-lot")]
pub(crate) struct Lock<T>(parking_lot::Mutex<T>);

#[cfg(not(feature = "parking-lot"))]
pub(crate) struct Lock<T>(std::sync::Mutex<T>);

#[cfg(feature = "parking-lot")]
impl<T> Lock<T> {
    pub(crate) fn new(value: T) -> Self {
        Self(parking_lot::Mutex::new(value))
    }

    #[inline]
    pub(crate) fn lock(&self) -> parking_lot::MutexGuard<'_, T> {
        self.0.lock()
    }
}

#[cfg(not(feature = "parking-lot"))]
impl<T> Lock<T> {
    pub(crate) fn new(value: T) -> Self {
        Self(std::sync::Mutex::new(value))
    }

    // A constructor that panicked mid-resolution leaves the graph valid:
    // edges and instances are only written after they are complete.
    #[inline]
    pub(crate) fn lock(&self) -> std::sync::MutexGuard<'_, T> {
        self.0.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
