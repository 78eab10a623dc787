use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// A shared epoch counter for session liveness.
///
/// Work dispatched by a session is stamped with the epoch current at dispatch
/// time. When the session stops it calls `advance()`, and every in-flight
/// result carrying an older stamp is discarded instead of applied.
#[derive(Clone, Debug)]
pub struct Epoch {
    value: Arc<AtomicU64>,
}

impl Default for Epoch {
    fn default() -> Self {
        Self::new()
    }
}

impl Epoch {
    pub fn new() -> Self {
        Self {
            value: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Get the current epoch value.
    pub fn current(&self) -> u64 {
        self.value.load(Ordering::Acquire)
    }

    /// Advance to the next epoch. Returns the new epoch value.
    /// This instantly invalidates all in-flight work from previous epochs.
    pub fn advance(&self) -> u64 {
        self.value.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Check if the given epoch is still current.
    pub fn is_current(&self, epoch: u64) -> bool {
        epoch == self.current()
    }

    /// Stamp a value with the current epoch.
    pub fn stamp<T>(&self, inner: T) -> Stamped<T> {
        Stamped {
            epoch: self.current(),
            inner,
        }
    }
}

/// A value stamped with the epoch it was created in.
#[derive(Clone, Debug)]
pub struct Stamped<T> {
    pub epoch: u64,
    pub inner: T,
}

impl<T> Stamped<T> {
    /// Unwrap the value if its epoch is still current.
    pub fn into_current(self, epoch: &Epoch) -> Option<T> {
        epoch.is_current(self.epoch).then_some(self.inner)
    }
}
