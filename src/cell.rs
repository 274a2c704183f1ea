//! Single-threaded reactive cell.
//!
//! A [`ReactiveCell`] holds one value and a list of subscribers. Every write
//! notifies each subscriber in registration order before the outermost write
//! returns. Each write snapshots the subscriber list at the moment it is made,
//! so a callback may read, write, subscribe or release subscriptions on the
//! same cell while it runs, and a subscriber only ever hears about writes made
//! after it subscribed.

use nanoid::nanoid;
use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    fmt,
    rc::{Rc, Weak},
};

type Callback<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Entry<T> {
    id: u64,
    callback: Callback<T>,
    active: Rc<Cell<bool>>,
}

impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            callback: Rc::clone(&self.callback),
            active: Rc::clone(&self.active),
        }
    }
}

struct Inner<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<Entry<T>>>,
    /// Writes not yet delivered, each with the subscribers present when it was made.
    pending: RefCell<VecDeque<(T, Vec<Entry<T>>)>>,
    notifying: Cell<bool>,
    next_id: Cell<u64>,
}

/// Ends a notification pass, even one cut short by a panicking subscriber.
///
/// Undelivered writes are dropped so a later write does not replay them.
struct NotifyGuard<'a, T>(&'a Inner<T>);

impl<T> Drop for NotifyGuard<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.0.pending.try_borrow_mut() {
            pending.clear();
        }
        self.0.notifying.set(false);
    }
}

/// A mutable value that notifies registered observers on every write.
///
/// Cloning a cell clones the handle; all clones share the same value and
/// subscriber list.
pub struct ReactiveCell<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for ReactiveCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> ReactiveCell<T> {
    /// Creates a cell holding `value` with no subscribers.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                subscribers: RefCell::new(Vec::new()),
                pending: RefCell::new(VecDeque::new()),
                notifying: Cell::new(false),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Runs `f` with a borrow of the current value.
    ///
    /// `f` must not write to this cell.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Replaces the value and notifies every active subscriber.
    ///
    /// Subscribers are notified even when the new value equals the old one.
    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value.clone();
        self.publish(value);
    }

    /// Applies `f` to a copy of the value and writes the result back like
    /// [`set`](Self::set). `f` may read the cell; it still sees the old value.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut value = self.get();
        f(&mut value);
        self.set(value);
    }

    /// Registers `callback`, calls it once with the current value, and
    /// returns the handle that keeps it registered.
    pub fn subscribe(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        let callback: Callback<T> = Rc::new(RefCell::new(callback));
        let active = Rc::new(Cell::new(true));
        self.inner.subscribers.borrow_mut().push(Entry {
            id,
            callback: Rc::clone(&callback),
            active: Rc::clone(&active),
        });

        let current = self.get();
        (&mut *callback.borrow_mut())(&current);

        let weak: Weak<Inner<T>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            active.set(false);
            if let Some(inner) = weak.upgrade() {
                inner.subscribers.borrow_mut().retain(|entry| entry.id != id);
            }
        })
    }

    /// Number of subscribers still registered.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    fn publish(&self, value: T) {
        let snapshot: Vec<Entry<T>> = self.inner.subscribers.borrow().clone();
        self.inner.pending.borrow_mut().push_back((value, snapshot));

        // A write from inside a callback only queues; the outer pass drains it.
        if self.inner.notifying.replace(true) {
            return;
        }
        let _guard = NotifyGuard(&*self.inner);

        loop {
            let next = self.inner.pending.borrow_mut().pop_front();
            let Some((value, snapshot)) = next else { break };

            for entry in snapshot {
                if !entry.active.get() {
                    continue;
                }
                // A subscriber is never re-entered while it is still running.
                if let Ok(mut callback) = entry.callback.try_borrow_mut() {
                    (&mut *callback)(&value);
                }
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ReactiveCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactiveCell")
            .field("value", &*self.inner.value.borrow())
            .field("subscribers", &self.inner.subscribers.borrow().len())
            .finish()
    }
}

/// Handle for a registered subscriber.
///
/// Dropping the handle, or calling [`unsubscribe`](Self::unsubscribe),
/// removes the subscriber. [`detach`](Self::detach) leaves it registered for
/// as long as the cell lives.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    tag: String,
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            tag: nanoid!(5),
            release: Some(Box::new(release)),
        }
    }

    /// Short random tag used to tell subscriptions apart in logs.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Removes the subscriber now.
    pub fn unsubscribe(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    /// Gives up the handle without unsubscribing.
    pub fn detach(mut self) {
        self.release.take();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("tag", &self.tag)
            .field("active", &self.release.is_some())
            .finish()
    }
}
