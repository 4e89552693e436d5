#![allow(missing_docs)]

use std::{cell::Cell, rc::Rc};

use time::{Duration, OffsetDateTime};

use crate::{
    Clock, Error,
    stores::{KeyValueStore, MemoryStore},
};

/// A clock that returns `start`, then advances by `step` on every call.
pub(crate) struct StepClock {
    next: Cell<OffsetDateTime>,
    step: Duration,
}

impl StepClock {
    pub(crate) fn new(start: OffsetDateTime, step: Duration) -> Self {
        Self {
            next: Cell::new(start),
            step,
        }
    }

    /// A clock that is stuck at `now`.
    pub(crate) fn frozen(now: OffsetDateTime) -> Self {
        Self::new(now, Duration::ZERO)
    }
}

impl Clock for StepClock {
    fn now(&self) -> OffsetDateTime {
        let now = self.next.get();
        self.next.set(now + self.step);
        now
    }
}

/// An in-memory store whose writes start failing once the returned switch is
/// set to `true`.
pub(crate) struct FailingStore {
    inner: MemoryStore,
    fail_writes: Rc<Cell<bool>>,
    fail_reads: bool,
}

impl FailingStore {
    pub(crate) fn new() -> (Self, Rc<Cell<bool>>) {
        let fail_writes = Rc::new(Cell::new(false));
        let store = Self {
            inner: MemoryStore::new(),
            fail_writes: fail_writes.clone(),
            fail_reads: false,
        };

        (store, fail_writes)
    }

    pub(crate) fn fail_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        if self.fail_reads {
            return Err(Error::StorageError("read failed".to_owned()));
        }

        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        if self.fail_writes.get() {
            return Err(Error::StorageError("quota exceeded".to_owned()));
        }

        self.inner.set(key, value)
    }
}
