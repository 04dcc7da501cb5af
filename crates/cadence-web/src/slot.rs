use std::cell::{Cell, RefCell};

/// Single-owner cell shared by the frame callback and the JS-facing handle.
///
/// The frame callback holds the value mutably while the engine runs, and the
/// engine may call back into the handle from its own `update`/`render`. Those
/// re-entrant accesses never panic: reads see nothing, and a stop request is
/// deferred until the callback lets go.
pub(crate) struct SessionSlot<T> {
    value: RefCell<Option<T>>,
    stop_requested: Cell<bool>,
}

impl<T> SessionSlot<T> {
    pub(crate) fn new() -> Self {
        Self {
            value: RefCell::new(None),
            stop_requested: Cell::new(false),
        }
    }

    pub(crate) fn install(&self, value: T) {
        *self.value.borrow_mut() = Some(value);
    }

    /// Runs `f` on the value. `None` when the slot is empty or already in use
    /// further up the stack.
    pub(crate) fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut guard = self.value.try_borrow_mut().ok()?;
        guard.as_mut().map(f)
    }

    /// Removes the value for teardown. While the value is in use the request
    /// is recorded instead and picked up by [`take_if_stop_requested`].
    ///
    /// [`take_if_stop_requested`]: Self::take_if_stop_requested
    pub(crate) fn request_stop(&self) -> Option<T> {
        match self.value.try_borrow_mut() {
            Ok(mut guard) => guard.take(),
            Err(_) => {
                self.stop_requested.set(true);
                None
            }
        }
    }

    /// Removes the value if a stop was deferred. Call only with no borrow
    /// outstanding.
    pub(crate) fn take_if_stop_requested(&self) -> Option<T> {
        if !self.stop_requested.replace(false) {
            return None;
        }
        self.value.try_borrow_mut().ok()?.take()
    }
}
