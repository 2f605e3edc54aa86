//! Responsive dimension helpers.
//!
//! Percentage and design-pixel scaling, font scaling, tablet and breakpoint
//! classification, and observers that follow the host viewport. All
//! computation reads metrics through an injected [`MetricsProvider`], so
//! nothing here depends on a real display.

pub mod breakpoints;
pub mod config;
pub mod device;
pub mod error;
pub mod events;
pub mod metrics;
pub mod observer;
pub mod scale;

pub use breakpoints::{BreakpointTable, get_breakpoint};
pub use config::ScaleConfig;
pub use error::{ConfigError, DimensionError};
pub use events::{DimensionEvents, DisplayHost, Subscription};
pub use metrics::{FnProvider, MetricsProvider, provider_fn};
pub use observer::{Observer, OrientationObserver, observe_breakpoint, observe_orientation};
pub use scale::{Responsive, Unit};
