// Viewport providers - where the scheduler learns the current viewport size

use crate::grid::ViewportSize;
use std::cell::RefCell;
use std::rc::Rc;

pub type ViewportCallback = Rc<dyn Fn(ViewportSize)>;

/// Source of the viewport size, with change notification
pub trait ViewportProvider {
    fn current_size(&self) -> ViewportSize;

    /// Call `callback` on every size change until the returned subscription
    /// is dropped or unsubscribed
    fn on_change(&self, callback: ViewportCallback) -> Subscription;
}

/// Handle returned by `on_change`. Dropping it removes the callback.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new<F: FnOnce() + 'static>(cancel: F) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to cancel
    pub fn empty() -> Self {
        Self { cancel: None }
    }

    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

/// A viewport that never changes
#[derive(Debug, Clone, Copy)]
pub struct FixedViewport(pub ViewportSize);

impl ViewportProvider for FixedViewport {
    fn current_size(&self) -> ViewportSize {
        self.0
    }

    fn on_change(&self, _callback: ViewportCallback) -> Subscription {
        Subscription::empty()
    }
}

struct ViewportState {
    size: ViewportSize,
    next_id: u64,
    callbacks: Vec<(u64, ViewportCallback)>,
}

/// Single-threaded viewport whose size is pushed by the host (e.g. from a
/// resize event). Clones share the same state.
#[derive(Clone)]
pub struct SharedViewport {
    state: Rc<RefCell<ViewportState>>,
}

impl SharedViewport {
    pub fn new(size: ViewportSize) -> Self {
        Self {
            state: Rc::new(RefCell::new(ViewportState {
                size,
                next_id: 0,
                callbacks: Vec::new(),
            })),
        }
    }

    /// Update the size and notify subscribers if it changed
    pub fn set_size(&self, size: ViewportSize) {
        let callbacks: Vec<ViewportCallback> = {
            let mut state = self.state.borrow_mut();
            if state.size == size {
                return;
            }
            state.size = size;
            state.callbacks.iter().map(|(_, cb)| cb.clone()).collect()
        };
        // Callbacks run without the borrow held so they can query the viewport
        for callback in callbacks {
            callback(size);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().callbacks.len()
    }
}

impl ViewportProvider for SharedViewport {
    fn current_size(&self) -> ViewportSize {
        self.state.borrow().size
    }

    fn on_change(&self, callback: ViewportCallback) -> Subscription {
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state.callbacks.push((id, callback));
            id
        };
        let weak = Rc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().callbacks.retain(|(cb_id, _)| *cb_id != id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_shared_viewport_notifies_until_unsubscribed() {
        let viewport = SharedViewport::new(ViewportSize::new(800.0, 600.0));
        let seen = Rc::new(Cell::new(0.0));
        let handle = seen.clone();
        let subscription = viewport.on_change(Rc::new(move |size: ViewportSize| handle.set(size.width)));
        assert_eq!(viewport.subscriber_count(), 1);

        viewport.set_size(ViewportSize::new(1024.0, 768.0));
        assert_eq!(seen.get(), 1024.0);
        assert_eq!(viewport.current_size(), ViewportSize::new(1024.0, 768.0));

        subscription.unsubscribe();
        assert_eq!(viewport.subscriber_count(), 0);
        viewport.set_size(ViewportSize::new(640.0, 480.0));
        assert_eq!(seen.get(), 1024.0);
    }

    #[test]
    fn test_unchanged_size_is_silent() {
        let viewport = SharedViewport::new(ViewportSize::new(800.0, 600.0));
        let calls = Rc::new(Cell::new(0));
        let handle = calls.clone();
        let _subscription = viewport.on_change(Rc::new(move |_: ViewportSize| handle.set(handle.get() + 1)));

        viewport.set_size(ViewportSize::new(800.0, 600.0));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_dropping_subscription_unsubscribes() {
        let viewport = SharedViewport::new(ViewportSize::default());
        {
            let _subscription = viewport.on_change(Rc::new(|_: ViewportSize| {}));
            assert_eq!(viewport.subscriber_count(), 1);
        }
        assert_eq!(viewport.subscriber_count(), 0);
    }

    #[test]
    fn test_callback_can_read_viewport() {
        let viewport = SharedViewport::new(ViewportSize::default());
        let reader = viewport.clone();
        let seen = Rc::new(Cell::new(0.0));
        let handle = seen.clone();
        let _subscription =
            viewport.on_change(Rc::new(move |_: ViewportSize| handle.set(reader.current_size().height)));
        viewport.set_size(ViewportSize::new(10.0, 20.0));
        assert_eq!(seen.get(), 20.0);
    }
}
