//! Dimension-change notifications.
//!
//! A host exposes its viewport through [`MetricsProvider`] and its resize
//! notifications through [`DimensionEvents`]. Registering a listener returns a
//! [`Subscription`]; dropping or disposing it removes the listener.
//!
//! ```text
//!   host resize ──▶ DisplayHost::update ──▶ listeners (registration order)
//!                                              └─▶ Observer ──▶ consumers
//! ```

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use dimscale_protocol::ScreenMetrics;
use log::{debug, trace};

use crate::metrics::MetricsProvider;

/// Disposer for a registered callback.
///
/// The callback is removed exactly once: on [`dispose`](Self::dispose) or on
/// drop, whichever comes first.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    dispose: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(dispose: impl FnOnce() + 'static) -> Self {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.dispose.is_some()
    }

    pub fn dispose(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Host-side viewport change notifications.
pub trait DimensionEvents {
    /// Register `listener` to receive every metrics update the host reports.
    fn subscribe(&self, listener: Box<dyn FnMut(ScreenMetrics)>) -> Subscription;
}

impl<E: DimensionEvents + ?Sized> DimensionEvents for &E {
    fn subscribe(&self, listener: Box<dyn FnMut(ScreenMetrics)>) -> Subscription {
        (**self).subscribe(listener)
    }
}

impl<E: DimensionEvents + ?Sized> DimensionEvents for Rc<E> {
    fn subscribe(&self, listener: Box<dyn FnMut(ScreenMetrics)>) -> Subscription {
        (**self).subscribe(listener)
    }
}

type Listener = Rc<RefCell<Box<dyn FnMut(ScreenMetrics)>>>;

#[derive(Default)]
struct HostState {
    metrics: Cell<ScreenMetrics>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_id: Cell<u64>,
    pending: RefCell<VecDeque<ScreenMetrics>>,
    notifying: Cell<bool>,
}

impl HostState {
    fn remove(&self, id: u64) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        before != listeners.len()
    }

    fn is_registered(&self, id: u64) -> bool {
        self.listeners.borrow().iter().any(|(lid, _)| *lid == id)
    }
}

/// In-process display host: the current metrics plus a listener registry.
///
/// Cloning yields another handle to the same host. Platform adapters feed
/// their resize events into [`update`](Self::update); tests drive it directly.
#[derive(Clone, Default)]
pub struct DisplayHost {
    state: Rc<HostState>,
}

impl DisplayHost {
    pub fn new(metrics: ScreenMetrics) -> Self {
        let host = Self::default();
        host.state.metrics.set(metrics);
        host
    }

    /// Store new metrics and notify every listener, in registration order.
    ///
    /// Listeners are notified even if the metrics did not change; observers
    /// are responsible for suppressing no-op updates. An update issued from
    /// inside a listener is queued and delivered after the current one, so
    /// every listener sees every update in order.
    pub fn update(&self, metrics: ScreenMetrics) {
        self.state.metrics.set(metrics);
        self.state.pending.borrow_mut().push_back(metrics);
        if self.state.notifying.replace(true) {
            return;
        }

        loop {
            let Some(next) = self.state.pending.borrow_mut().pop_front() else {
                break;
            };
            self.notify(next);
        }
        self.state.notifying.set(false);
    }

    fn notify(&self, metrics: ScreenMetrics) {
        // Snapshot so listeners can subscribe or dispose while being notified.
        let listeners: Vec<(u64, Listener)> = self.state.listeners.borrow().clone();
        trace!(
            "dimension change {}x{} @{} to {} listener(s)",
            metrics.width,
            metrics.height,
            metrics.pixel_ratio,
            listeners.len()
        );
        for (id, listener) in listeners {
            if !self.state.is_registered(id) {
                continue;
            }
            let mut f = listener.borrow_mut();
            f(metrics);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }
}

impl MetricsProvider for DisplayHost {
    fn metrics(&self) -> ScreenMetrics {
        self.state.metrics.get()
    }
}

impl DimensionEvents for DisplayHost {
    fn subscribe(&self, listener: Box<dyn FnMut(ScreenMetrics)>) -> Subscription {
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);
        self.state
            .listeners
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(listener))));
        debug!(
            "dimension listener {id} registered ({} active)",
            self.listener_count()
        );

        let state: Weak<HostState> = Rc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = state.upgrade()
                && state.remove(id)
            {
                debug!(
                    "dimension listener {id} removed ({} active)",
                    state.listeners.borrow().len()
                );
            }
        })
    }
}

impl std::fmt::Debug for DisplayHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayHost")
            .field("metrics", &self.state.metrics.get())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
