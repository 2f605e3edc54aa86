use std::rc::Rc;

use dimscale_protocol::ScreenMetrics;
use log::warn;

/// Source of the current viewport size.
///
/// Implementations must not fail: when the host cannot report its
/// dimensions they return [`ScreenMetrics::ZERO`].
pub trait MetricsProvider {
    fn metrics(&self) -> ScreenMetrics;
}

/// A fixed snapshot, mostly useful in tests and for one-off conversions.
impl MetricsProvider for ScreenMetrics {
    fn metrics(&self) -> ScreenMetrics {
        *self
    }
}

impl<P: MetricsProvider + ?Sized> MetricsProvider for &P {
    fn metrics(&self) -> ScreenMetrics {
        (**self).metrics()
    }
}

impl<P: MetricsProvider + ?Sized> MetricsProvider for Rc<P> {
    fn metrics(&self) -> ScreenMetrics {
        (**self).metrics()
    }
}

impl<P: MetricsProvider + ?Sized> MetricsProvider for Box<P> {
    fn metrics(&self) -> ScreenMetrics {
        (**self).metrics()
    }
}

/// Adapts a closure into a [`MetricsProvider`].
#[derive(Debug, Clone, Copy)]
pub struct FnProvider<F>(pub F);

impl<F: Fn() -> ScreenMetrics> MetricsProvider for FnProvider<F> {
    fn metrics(&self) -> ScreenMetrics {
        (self.0)()
    }
}

/// Wrap a closure that reads metrics from the host.
pub fn provider_fn<F: Fn() -> ScreenMetrics>(f: F) -> FnProvider<F> {
    FnProvider(f)
}

/// Read `provider` and clamp whatever it reports into a usable snapshot.
pub fn sample<P: MetricsProvider + ?Sized>(provider: &P) -> ScreenMetrics {
    let raw = provider.metrics();
    let clean = raw.sanitized();
    if clean != raw {
        warn!("host reported unusable metrics {raw:?}, using {clean:?}");
    }
    clean
}

/// `numerator / denominator`, defined as zero when the denominator is zero
/// or the result would not be finite.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let r = numerator / denominator;
    if r.is_finite() { r } else { 0.0 }
}
