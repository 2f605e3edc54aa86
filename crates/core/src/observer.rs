use std::cell::{Cell, RefCell};
use std::fmt::Debug;
use std::rc::Rc;

use dimscale_protocol::{BreakpointRange, Orientation, ScreenMetrics};
use log::debug;

use crate::breakpoints::BreakpointTable;
use crate::events::{DimensionEvents, Subscription};
use crate::metrics::{MetricsProvider, sample};

type Consumer<T> = Rc<RefCell<Box<dyn FnMut(&T)>>>;

struct ObserverState<T> {
    current: RefCell<T>,
    consumers: RefCell<Vec<(u64, Consumer<T>)>>,
    next_id: Cell<u64>,
}

impl<T: Clone + PartialEq + Debug> ObserverState<T> {
    fn transition(&self, next: T) {
        if *self.current.borrow() == next {
            return;
        }
        let prev = self.current.replace(next.clone());
        debug!("observed value {prev:?} -> {next:?}");

        let consumers: Vec<(u64, Consumer<T>)> = self.consumers.borrow().clone();
        for (id, consumer) in consumers {
            let registered = self.consumers.borrow().iter().any(|(cid, _)| *cid == id);
            if !registered {
                continue;
            }
            if let Ok(mut f) = consumer.try_borrow_mut() {
                f(&next);
            }
        }
    }
}

/// A value derived from the host metrics, kept current by dimension-change
/// events.
///
/// The value is computed synchronously on construction. Each host update
/// recomputes it, and consumers are called only when it actually changed.
/// Dropping the observer (or calling [`dispose`](Self::dispose)) removes its
/// host listener.
pub struct Observer<T> {
    state: Rc<ObserverState<T>>,
    host_subscription: Subscription,
}

impl<T: Clone + PartialEq + Debug + 'static> Observer<T> {
    pub fn new<H>(host: &H, derive: impl Fn(&ScreenMetrics) -> T + 'static) -> Self
    where
        H: MetricsProvider + DimensionEvents + ?Sized,
    {
        let initial = derive(&sample(host));
        debug!("observer created with {initial:?}");
        let state = Rc::new(ObserverState {
            current: RefCell::new(initial),
            consumers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        });

        let weak = Rc::downgrade(&state);
        let host_subscription = host.subscribe(Box::new(move |metrics| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            state.transition(derive(&metrics.sanitized()));
        }));

        Self {
            state,
            host_subscription,
        }
    }

    pub fn get(&self) -> T {
        self.state.current.borrow().clone()
    }

    /// Call `consumer` with the new value after every change.
    pub fn subscribe(&self, consumer: impl FnMut(&T) + 'static) -> Subscription {
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);
        self.state
            .consumers
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(Box::new(consumer)))));

        let state = Rc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = state.upgrade() {
                state.consumers.borrow_mut().retain(|(cid, _)| *cid != id);
            }
        })
    }

    pub fn consumer_count(&self) -> usize {
        self.state.consumers.borrow().len()
    }

    /// Stop listening to the host. Equivalent to dropping the observer.
    pub fn dispose(self) {
        self.host_subscription.dispose();
    }
}

impl<T: Debug> Debug for Observer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observer")
            .field("current", &*self.state.current.borrow())
            .field("consumers", &self.state.consumers.borrow().len())
            .finish()
    }
}

pub type OrientationObserver = Observer<Orientation>;

/// Track the host orientation.
///
/// ```
/// use dimscale_core::{DisplayHost, observe_orientation};
/// use dimscale_protocol::{Orientation, ScreenMetrics};
///
/// let host = DisplayHost::new(ScreenMetrics::new(400.0, 800.0, 2.0));
/// let orientation = observe_orientation(&host);
/// assert_eq!(orientation.get(), Orientation::Portrait);
///
/// host.update(ScreenMetrics::new(800.0, 400.0, 2.0));
/// assert_eq!(orientation.get(), Orientation::Landscape);
/// ```
pub fn observe_orientation<H>(host: &H) -> OrientationObserver
where
    H: MetricsProvider + DimensionEvents + ?Sized,
{
    Observer::new(host, Orientation::of)
}

/// Track which breakpoint the host width falls into.
pub fn observe_breakpoint<H>(host: &H, table: BreakpointTable) -> Observer<BreakpointRange>
where
    H: MetricsProvider + DimensionEvents + ?Sized,
{
    Observer::new(host, move |metrics| {
        let idx = table.position(metrics.width).unwrap_or(0);
        table.ranges()[idx].clone()
    })
}
